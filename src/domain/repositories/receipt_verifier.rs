use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{data::models::verify_receipt::request_model::IapRequest, errors::AppStoreError};

/// Verifies receipts with the App Store and decodes the response into any
/// caller-provided shape.
///
/// A non-zero `status` in the response is returned as data, not as an error.
/// Pass it through [`crate::domain::entities::status_code::handle_error`] to
/// turn it into one.
#[async_trait]
pub trait ReceiptVerifier: Send + Sync {
    async fn verify<T: DeserializeOwned + Send>(
        &self,
        request: &IapRequest,
    ) -> Result<T, AppStoreError>;
}
