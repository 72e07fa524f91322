use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Url};

use crate::{
    constants::{CONTENT_TYPE as VERIFY_RECEIPT_CONTENT_TYPE, DEFAULT_TIMEOUT_SECS},
    data::models::verify_receipt::request_model::IapRequest,
    errors::AppStoreError,
};

#[async_trait]
pub trait VerifyReceiptDatasource: Send + Sync {
    /// Verify Receipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// Posts the request to `url` and returns the raw response body. The HTTP
    /// status of the response is not checked; the App Store reports failures
    /// through the `status` field of the body.
    async fn verify_receipt(
        &self,
        url: &str,
        request: &IapRequest,
    ) -> Result<Vec<u8>, AppStoreError>;
}

pub struct VerifyReceiptDatasourceImpl {
    http: reqwest::Client,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn verify_receipt(
        &self,
        url: &str,
        request: &IapRequest,
    ) -> Result<Vec<u8>, AppStoreError> {
        let endpoint = Url::parse(url).map_err(|e| AppStoreError::InvalidEndpoint {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let body = serde_json::to_vec(request).map_err(AppStoreError::Serialize)?;

        tracing::debug!(endpoint = %endpoint, "sending verifyReceipt request");
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, VERIFY_RECEIPT_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| AppStoreError::Transport {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        tracing::debug!(endpoint = url, http_status = %status, "verifyReceipt responded");
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppStoreError::Transport {
                url: url.to_owned(),
                source: e,
            })?;
        Ok(bytes.to_vec())
    }
}

impl VerifyReceiptDatasourceImpl {
    /// Uses a fresh HTTP client with the default 10 second timeout.
    pub fn new() -> Result<Self, AppStoreError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppStoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppStoreError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Uses a caller-supplied client, e.g. for a proxy or a custom timeout.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}
