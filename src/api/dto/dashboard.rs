//! DTOs for the composed dashboard endpoint.

use serde::Serialize;

/// Body returned with `202 Accepted` while a data source is still loading.
#[derive(Debug, Serialize)]
pub struct LoadingResponse {
    pub status: &'static str,
}

impl LoadingResponse {
    pub fn new() -> Self {
        Self { status: "loading" }
    }
}

impl Default for LoadingResponse {
    fn default() -> Self {
        Self::new()
    }
}
