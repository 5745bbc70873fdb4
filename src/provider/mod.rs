mod client;
mod models;
mod provider_error;

pub use client::{AuthScheme, InfoTrackClient, ProviderReply, TitleProvider};
pub use models::{
    interpret_status, map_search_response, OrderRequest, ProviderResponse, StatusOutcome,
    TitleSearchRequest,
};
pub use provider_error::ProviderError;
