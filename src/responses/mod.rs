pub mod errors;
pub mod file;
pub mod html;
pub mod json;

pub use crate::errors::ResultResp;
pub use errors::error_to_response;

pub use file::file_response;
pub use html::{html_response, html_status, redirect};
pub use json::{json_error, json_response};
