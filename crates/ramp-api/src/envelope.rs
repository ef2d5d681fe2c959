//! Common response envelope.
//!
//! All aggregator and rate endpoints wrap their payload in
//! `{ status, data, message }`, with `status == "success"` signalling a
//! usable `data` field and `message` carrying the failure reason otherwise.

use crate::error::{ApiError, ApiResult};
use serde::Deserialize;

/// Response envelope shared by the rate and aggregator endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Unwrap the payload, or fail with the service's message.
    pub fn into_data(self, context: &str) -> ApiResult<T> {
        if !self.is_success() {
            let message = self
                .message
                .unwrap_or_else(|| format!("{context} request failed"));
            return Err(ApiError::Rejected(message));
        }
        self.data
            .ok_or_else(|| ApiError::Decode(format!("{context}: success response without data")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"status":"success","data":"1500.5"}"#).unwrap();
        assert!(env.is_success());
        assert_eq!(env.into_data("rate").unwrap(), "1500.5");
    }

    #[test]
    fn test_error_envelope_surfaces_message() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"status":"error","message":"unsupported token"}"#).unwrap();
        let err = env.into_data("rate").unwrap_err();
        assert_eq!(err.to_string(), "unsupported token");
    }

    #[test]
    fn test_error_envelope_without_message() {
        let env: ApiEnvelope<String> = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        let err = env.into_data("rate").unwrap_err();
        assert!(err.to_string().contains("rate"));
    }
}
