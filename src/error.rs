use crate::clipboard::ClipboardError;
use std::path::PathBuf;

/// Failures inside the selection machinery.
///
/// These never reach callers: sessions absorb them, log them and leave the
/// selection untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("text layout is not available yet")]
    LayoutUnavailable,

    #[error("offset {offset} is at or past the end of text ({len} chars)")]
    OffsetPastEnd { offset: usize, len: usize },

    #[error("clipboard write failed: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Errors loading or validating [`SelectionOptions`](crate::SelectionOptions)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid option `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
