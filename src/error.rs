//! Error types — authentication, timeline fetch, and platform API failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhittleError {
    #[error("credentials rejected: {reason}")]
    Auth { reason: String },

    #[error("first timeline page unavailable: {reason}")]
    Upstream { reason: String },

    #[error("api error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WhittleError>;
