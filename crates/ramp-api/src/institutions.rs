//! Bank directory and account verification.

use crate::envelope::ApiEnvelope;
use crate::error::{ApiError, ApiResult};
use crate::{http, BoxFuture};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A payout institution from the bank directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub code: String,
    pub name: String,
}

/// Account verification request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyAccountRequest<'a> {
    institution: &'a str,
    account_identifier: &'a str,
}

/// Verifies a (institution, account) pair into an account holder name.
///
/// The HTTP client implements this; tests substitute scripted verifiers.
pub trait AccountVerifier: Send + Sync {
    fn verify_account(
        &self,
        institution_code: &str,
        account_identifier: &str,
    ) -> BoxFuture<'_, ApiResult<String>>;
}

/// Client for the aggregator's institution directory and account
/// verification endpoints.
pub struct InstitutionClient {
    client: Client,
    base_url: String,
}

impl InstitutionClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the aggregator wrapper.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            base_url: base_url.into(),
        })
    }

    /// Fetch the institution directory for a fiat currency.
    pub async fn fetch_institutions(&self, currency: &str) -> ApiResult<Vec<Institution>> {
        let url = format!("{}/payment/institutions/{currency}", self.base_url);
        debug!(%url, "Fetching institutions");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Institutions request failed: {e}")))?;

        let envelope: ApiEnvelope<Vec<Institution>> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Institutions response: {e}")))?;

        envelope.into_data("institutions")
    }

    async fn verify(&self, institution_code: &str, account_identifier: &str) -> ApiResult<String> {
        let url = format!("{}/payment/verify-account", self.base_url);
        let request = VerifyAccountRequest {
            institution: institution_code,
            account_identifier,
        };
        debug!(%url, institution = %institution_code, "Verifying account");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Verify request failed: {e}")))?;

        let envelope: ApiEnvelope<String> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Verify response: {e}")))?;

        envelope.into_data("verify-account")
    }
}

/// `AccountVerifier` backed by the aggregator endpoint.
pub struct HttpAccountVerifier {
    inner: InstitutionClient,
}

impl HttpAccountVerifier {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            inner: InstitutionClient::new(base_url)?,
        })
    }
}

impl AccountVerifier for HttpAccountVerifier {
    fn verify_account(
        &self,
        institution_code: &str,
        account_identifier: &str,
    ) -> BoxFuture<'_, ApiResult<String>> {
        let institution = institution_code.to_string();
        let account = account_identifier.to_string();
        Box::pin(async move { self.inner.verify(&institution, &account).await })
    }
}
