use serde::de::DeserializeOwned;

use crate::{
    constants::SANDBOX_RECEIPT_STATUS,
    data::{
        datasources::{utils::decode_response, verify_receipt_datasource::VerifyReceiptDatasource},
        models::verify_receipt::{
            request_model::IapRequest, status_response_model::StatusResponseModel,
        },
    },
    errors::AppStoreError,
};

pub(crate) struct ReceiptVerifierImpl<D: VerifyReceiptDatasource> {
    datasource: D,
}

impl<D: VerifyReceiptDatasource> ReceiptVerifierImpl<D> {
    pub(crate) fn new(datasource: D) -> Self {
        Self { datasource }
    }

    #[cfg(test)]
    pub(crate) fn datasource(&self) -> &D {
        &self.datasource
    }

    /// As per Apple's documentation, always verify against production first.
    /// If production answers 21007 (receipt issued by the sandbox) and
    /// `sandbox_fallback` is set, send the same request to the sandbox once and
    /// return that result instead.
    ///
    /// https://developer.apple.com/library/archive/technotes/tn2413/_index.html
    pub(crate) async fn verify_with_sandbox_fallback<T: DeserializeOwned + Send>(
        &self,
        request: &IapRequest,
        production_url: &str,
        sandbox_url: &str,
        sandbox_fallback: bool,
    ) -> Result<T, AppStoreError> {
        let body = self
            .datasource
            .verify_receipt(production_url, request)
            .await?;
        let production_result: T = decode_response(production_url, &body)?;
        let envelope: StatusResponseModel = decode_response(production_url, &body)?;

        if !sandbox_fallback || envelope.status() != SANDBOX_RECEIPT_STATUS {
            return Ok(production_result);
        }

        // The production result is discarded even if it carried a receipt.
        drop(production_result);
        tracing::info!(
            production_url,
            sandbox_url,
            "sandbox receipt sent to production, retrying against sandbox"
        );
        let body = self.datasource.verify_receipt(sandbox_url, request).await?;
        decode_response(sandbox_url, &body)
    }
}
