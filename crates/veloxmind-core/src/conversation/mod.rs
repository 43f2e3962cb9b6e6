use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::Result;

pub const DEFAULT_MAX_TURNS: usize = 50;

const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ConversationFile {
    #[serde(default)]
    version: String,
    #[serde(default)]
    last_updated: String,
    #[serde(default)]
    messages: Vec<ConversationMessage>,
}

/// Conversation memory carried between prompt generations so the model can
/// use earlier turns as context. Mirrored to disk after every mutation;
/// trimmed to the most recent turns at save time.
pub struct ConversationLog {
    path: PathBuf,
    messages: Vec<ConversationMessage>,
    max_turns: usize,
}

impl ConversationLog {
    /// Open a log backed by the given file. A missing file is an empty
    /// log, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut log = Self {
            path: path.into(),
            messages: Vec::new(),
            max_turns: DEFAULT_MAX_TURNS,
        };
        log.load();
        log
    }

    /// Open the log at its default location
    /// (`~/.veloxmind/conversation.json` unless overridden in settings).
    pub fn open_default(settings: &Settings) -> Result<Self> {
        let path = settings.conversation_file()?;
        Ok(Self::open(path).with_max_turns(settings.conversation.max_turns))
    }

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    /// Append a message and persist immediately.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ConversationMessage {
            role,
            content: content.into(),
        });
        self.persist();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.persist();
    }

    /// Ordered view for building an API message list from.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Human-readable context summary: counts user-authored turns.
    pub fn summary(&self) -> String {
        if self.messages.is_empty() {
            return "No conversation context".to_string();
        }

        let turn_count = self
            .messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count();
        format!("{} turn(s) in context", turn_count)
    }

    pub fn load(&mut self) {
        if !self.path.exists() {
            self.messages = Vec::new();
            return;
        }

        match self.read_file() {
            Ok(messages) => self.messages = messages,
            Err(e) => {
                tracing::warn!("Failed to load conversation: {}", e);
                self.messages = Vec::new();
            }
        }
    }

    /// Write the log to disk, first dropping all but the trailing
    /// `max_turns * 2` messages. The in-memory list can exceed the cap
    /// between saves; the file never does.
    pub fn save(&mut self) -> Result<()> {
        let cap = self.max_turns * 2;
        if self.messages.len() > cap {
            let excess = self.messages.len() - cap;
            self.messages.drain(..excess);
        }

        let file = ConversationFile {
            version: FORMAT_VERSION.to_string(),
            last_updated: Utc::now().to_rfc3339(),
            messages: self.messages.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn read_file(&self) -> Result<Vec<ConversationMessage>> {
        let contents = fs::read_to_string(&self.path)?;
        let file: ConversationFile = serde_json::from_str(&contents)?;
        Ok(file.messages)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save conversation: {}", e);
        }
    }
}
