use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid correction span {start}..{end}: {message}")]
    InvalidSpan {
        start: usize,
        end: usize,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl StudioError {
    pub fn invalid_span(start: usize, end: usize, message: impl Into<String>) -> Self {
        Self::InvalidSpan {
            start,
            end,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
