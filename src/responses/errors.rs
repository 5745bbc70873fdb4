use crate::errors::ServerError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a response: JSON for `/api/*`, an HTML page otherwise.
pub fn error_to_response(err: ServerError, wants_json: bool) -> Response {
    let status = err.status();
    match &err {
        ServerError::DbError(_) | ServerError::InternalError | ServerError::Provider(_) => {
            log::error!("request failed: {err}")
        }
        _ => log::debug!("request rejected: {err}"),
    }

    let message = err.public_message();
    let (content_type, body) = if wants_json {
        (
            mime::APPLICATION_JSON.as_ref(),
            json!({ "error": message }).to_string(),
        )
    } else {
        (
            mime::TEXT_HTML_UTF_8.as_ref(),
            error_page(status, &message).into_string(),
        )
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
