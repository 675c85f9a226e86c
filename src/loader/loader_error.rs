use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("IO error: {0}")]
    Io(String),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    /// The embedded dataset itself could not be built. Nothing left to serve.
    #[error("Fallback data unavailable: {0}")]
    Fallback(String),
}

impl LoaderError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoaderError::Fallback(_))
    }
}
