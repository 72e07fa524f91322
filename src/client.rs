use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    config::AppStoreConfig,
    constants::{PRODUCTION_URL, SANDBOX_URL},
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        models::verify_receipt::request_model::IapRequest,
        repositories::receipt_verifier_impl::ReceiptVerifierImpl,
    },
    domain::repositories::receipt_verifier::ReceiptVerifier,
    errors::AppStoreError,
};

/// Client for the App Store verifyReceipt endpoint.
///
/// Every call is sent to `production_url` first. Unless `is_production` is
/// set, a 21007 answer (sandbox receipt sent to production) is retried once
/// against `sandbox_url`. The endpoint fields may be changed freely, e.g. to
/// point at a local test server.
///
/// The client holds no per-call state and can be shared across tasks.
pub struct AppStoreClient<D: VerifyReceiptDatasource = VerifyReceiptDatasourceImpl> {
    pub production_url: String,
    pub sandbox_url: String,
    pub is_production: bool,
    verifier: ReceiptVerifierImpl<D>,
}

impl AppStoreClient<VerifyReceiptDatasourceImpl> {
    /// Creates a client with its own HTTP transport and a 10 second timeout.
    pub fn new(is_production: bool) -> Result<Self, AppStoreError> {
        Ok(Self::with_datasource(
            VerifyReceiptDatasourceImpl::new()?,
            is_production,
        ))
    }

    /// Creates a client that sends requests through `http`, which controls
    /// timeouts, proxies and TLS.
    pub fn with_http_client(http: reqwest::Client, is_production: bool) -> Self {
        Self::with_datasource(
            VerifyReceiptDatasourceImpl::with_http_client(http),
            is_production,
        )
    }

    pub fn from_config(config: &AppStoreConfig) -> Result<Self, AppStoreError> {
        config.validate()?;
        let mut client = Self::with_datasource(
            VerifyReceiptDatasourceImpl::with_timeout(config.timeout())?,
            config.is_production,
        );
        client.production_url = config.production_url.clone();
        client.sandbox_url = config.sandbox_url.clone();
        Ok(client)
    }
}

impl<D: VerifyReceiptDatasource> AppStoreClient<D> {
    /// Creates a client on top of a custom transport.
    pub fn with_datasource(datasource: D, is_production: bool) -> Self {
        Self {
            production_url: PRODUCTION_URL.to_owned(),
            sandbox_url: SANDBOX_URL.to_owned(),
            is_production,
            verifier: ReceiptVerifierImpl::new(datasource),
        }
    }

    /// Sends the receipt for verification and decodes the final response
    /// (production, or sandbox after a fallback) into `T`.
    ///
    /// Dropping the returned future aborts whichever request is in flight.
    pub async fn verify<T: DeserializeOwned + Send>(
        &self,
        request: &IapRequest,
    ) -> Result<T, AppStoreError> {
        self.verifier
            .verify_with_sandbox_fallback(
                request,
                &self.production_url,
                &self.sandbox_url,
                !self.is_production,
            )
            .await
    }

    /// Like [`AppStoreClient::verify`], but gives up with
    /// [`AppStoreError::TimedOut`] once `deadline` has passed. The deadline
    /// covers the production request and the sandbox retry together.
    pub async fn verify_within<T: DeserializeOwned + Send>(
        &self,
        request: &IapRequest,
        deadline: Duration,
    ) -> Result<T, AppStoreError> {
        tokio::time::timeout(deadline, self.verify(request))
            .await
            .map_err(|_| AppStoreError::TimedOut(deadline))?
    }
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptVerifier for AppStoreClient<D> {
    async fn verify<T: DeserializeOwned + Send>(
        &self,
        request: &IapRequest,
    ) -> Result<T, AppStoreError> {
        AppStoreClient::verify(self, request).await
    }
}
