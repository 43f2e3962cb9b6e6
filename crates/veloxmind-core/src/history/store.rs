use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::Result;

use super::entry::HistoryEntry;

pub const DEFAULT_MAX_HISTORY: usize = 100;

const FORMAT_VERSION: &str = "1.0";

/// On-disk shape of the history file. Export files carry an extra
/// `exported_at` field, which deserialization ignores, so the same shape
/// reads both.
#[derive(Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    version: String,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    version: &'static str,
    exported_at: String,
    history: &'a [HistoryEntry],
}

/// Bounded prompt history, most recent first, mirrored to disk after every
/// mutation.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl HistoryStore {
    /// Open a store backed by the given file. A missing file is an empty
    /// store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            entries: Vec::new(),
            max_entries: DEFAULT_MAX_HISTORY,
        };
        store.load();
        store
    }

    /// Open the store at its default location (`~/.veloxmind/history.json`
    /// unless overridden in settings).
    pub fn open_default(settings: &Settings) -> Result<Self> {
        let path = settings.history_file()?;
        Ok(Self::open(path).with_max_entries(settings.history.max_entries))
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self.entries.truncate(max);
        self
    }

    /// Record a new entry at the front, trim to capacity, persist.
    pub fn add(
        &mut self,
        user_input: impl Into<String>,
        generated_prompt: impl Into<String>,
        template_id: impl Into<String>,
    ) {
        let entry = HistoryEntry::new(user_input, generated_prompt, template_id);
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_entries);
        self.persist();
    }

    /// Entries most recent first, up to `limit` when given.
    pub fn entries(&self, limit: Option<usize>) -> &[HistoryEntry] {
        match limit {
            Some(limit) => &self.entries[..limit.min(self.entries.len())],
            None => &self.entries,
        }
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Remove the entry at `index` and persist. Out-of-range is a no-op.
    pub fn delete(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over user input and generated
    /// prompt, in store order.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.user_input.to_lowercase().contains(&query_lower)
                    || entry.generated_prompt.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Write the full store plus an export timestamp to `path`. Returns
    /// whether the export succeeded.
    pub fn export(&self, path: &Path) -> bool {
        match self.write_export(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to export history: {}", e);
                false
            }
        }
    }

    /// Import entries from `path`. With `merge`, the union is re-sorted by
    /// timestamp descending and trimmed; otherwise the store is replaced
    /// outright. The file is fully parsed before the store is touched, so
    /// a malformed file reports failure and leaves the store unchanged.
    pub fn import(&mut self, path: &Path, merge: bool) -> bool {
        let imported = match Self::read_entries(path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to import history: {}", e);
                return false;
            }
        };

        if merge {
            self.entries.extend(imported);
            self.entries
                .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        } else {
            self.entries = imported;
        }
        self.entries.truncate(self.max_entries);

        self.persist();
        true
    }

    fn load(&mut self) {
        if !self.path.exists() {
            return;
        }

        match Self::read_entries(&self.path) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                tracing::warn!("Failed to load history: {}", e);
                self.entries = Vec::new();
            }
        }
    }

    fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
        let contents = fs::read_to_string(path)?;
        let file: HistoryFile = serde_json::from_str(&contents)?;
        Ok(file.history)
    }

    fn save(&self) -> Result<()> {
        let file = HistoryFile {
            version: FORMAT_VERSION.to_string(),
            history: self.entries.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, &contents)
    }

    fn write_export(&self, path: &Path) -> Result<()> {
        let export = HistoryExport {
            version: FORMAT_VERSION,
            exported_at: Utc::now().to_rfc3339(),
            history: &self.entries,
        };
        let contents = serde_json::to_string_pretty(&export)?;
        write_atomic(path, &contents)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Write via a temporary file and rename; a partial write never replaces
/// the existing file.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
