use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE_ID: &str = "context_aware";

/// A single prompt history record: what the user typed, what was generated
/// for them, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub generated_prompt: String,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    #[serde(default = "current_timestamp")]
    pub timestamp: String,
}

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339()
}

impl HistoryEntry {
    pub fn new(
        user_input: impl Into<String>,
        generated_prompt: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            user_input: user_input.into(),
            generated_prompt: generated_prompt.into(),
            template_id: template_id.into(),
            timestamp: current_timestamp(),
        }
    }

    /// Shortened one-line label for a history list: `[MM/DD HH:MM] text...`
    pub fn display_text(&self, max_length: usize) -> String {
        let text = self.user_input.replace('\n', " ");
        let text = text.trim();
        let text = if text.chars().count() > max_length {
            let truncated: String = text.chars().take(max_length).collect();
            format!("{}...", truncated)
        } else {
            text.to_string()
        };

        let time_str = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.format("%m/%d %H:%M").to_string())
            .unwrap_or_else(|_| "Unknown".to_string());

        format!("[{}] {}", time_str, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_flattens_and_truncates() {
        let mut entry = HistoryEntry::new("line one\nline two", "prompt", DEFAULT_TEMPLATE_ID);
        entry.timestamp = "2025-03-14T09:26:00+00:00".to_string();

        let display = entry.display_text(60);
        assert_eq!(display, "[03/14 09:26] line one line two");

        let display = entry.display_text(8);
        assert_eq!(display, "[03/14 09:26] line one...");
    }

    #[test]
    fn test_display_text_unparseable_timestamp() {
        let mut entry = HistoryEntry::new("hello", "prompt", DEFAULT_TEMPLATE_ID);
        entry.timestamp = "not-a-date".to_string();

        assert_eq!(entry.display_text(60), "[Unknown] hello");
    }
}
