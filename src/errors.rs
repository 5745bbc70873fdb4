// errors.rs
use astra::Response;

use crate::provider::ProviderError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, provider).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Provider Error: {0}")]
    Provider(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::MethodNotAllowed => 405,
            ServerError::Conflict(_) => 409,
            ServerError::Provider(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show to a visitor. Database details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not Found".to_string(),
            ServerError::BadRequest(msg) => msg.clone(),
            ServerError::MethodNotAllowed => "Method not allowed".to_string(),
            ServerError::Conflict(msg) => msg.clone(),
            ServerError::Provider(_) => "The property provider is unavailable".to_string(),
            ServerError::DbError(_) | ServerError::InternalError => {
                "Internal Server Error".to_string()
            }
        }
    }
}

impl From<ProviderError> for ServerError {
    fn from(err: ProviderError) -> Self {
        ServerError::Provider(err.to_string())
    }
}
