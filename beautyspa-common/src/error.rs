// ================================================================
// File: beautyspa-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure: no response was obtained at all.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` carries the
    /// server-supplied `message` field when one was present.
    #[error("HTTP {code}: {message}")]
    Http { code: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// A pay trigger arrived before all four booking choices were made.
    /// The payload names the first missing field.
    #[error("Selection incomplete: select a {0} first")]
    IncompleteSelection(&'static str),
}

impl Error {
    /// Non-2xx response helper; substitutes a generic message when the
    /// server did not send one.
    pub fn http_status(code: u16, message: Option<String>) -> Self {
        Error::Http {
            code,
            message: message.unwrap_or_else(|| "server returned an error".to_string()),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}
