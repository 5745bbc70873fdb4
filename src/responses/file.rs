// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use crate::service::DocumentFile;
use astra::{Body, ResponseBuilder};

/// Return a downloadable document as HTTP response
pub fn file_response(file: DocumentFile) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", file.content_type)
        .header("Content-Disposition", file.disposition)
        .body(Body::from(file.bytes))
        .map_err(|_| ServerError::InternalError)?; // Convert any builder error

    Ok(resp)
}
