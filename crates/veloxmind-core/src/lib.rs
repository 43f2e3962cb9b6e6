pub mod error;
pub mod config;
pub mod history;
pub mod conversation;
pub mod spell;

// Re-export key types
pub use error::{Result, StudioError};
pub use config::Settings;
pub use history::{HistoryEntry, HistoryStore};
pub use conversation::{ConversationLog, ConversationMessage, Role};
pub use spell::{
    apply_corrections, auto_corrections, find_spelling_errors, Correction, SpellChecker,
    SpellingError, Unavailable, WordList,
};
