#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider configuration error: {0}")]
    Config(String),
    #[error("Provider returned {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        details: String,
    },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}
