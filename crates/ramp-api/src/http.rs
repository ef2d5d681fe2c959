//! Shared HTTP client construction.

use crate::error::{ApiError, ApiResult};
use reqwest::Client;
use std::time::Duration;

/// Default timeout for API requests.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared reqwest client.
pub(crate) fn build_client() -> ApiResult<Client> {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {e}")))
}
