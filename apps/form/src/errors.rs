use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while acquiring the reference geography dataset.
///
/// Controllers never propagate these to the user: the address cascade logs
/// them and degrades to country-level-only behaviour.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reference data request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FormError {
    /// Short machine-readable code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            FormError::Http(_) => "HTTP_ERROR",
            FormError::Status { .. } => "STATUS_ERROR",
            FormError::Io { .. } => "IO_ERROR",
            FormError::Parse(_) => "PARSE_ERROR",
        }
    }
}
