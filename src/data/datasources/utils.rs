use serde::de::DeserializeOwned;

use crate::errors::AppStoreError;

/// Decodes a verifyReceipt response body received from `url`.
pub(crate) fn decode_response<T: DeserializeOwned>(
    url: &str,
    body: &[u8],
) -> Result<T, AppStoreError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(endpoint = url, error = %e, "failed to parse verifyReceipt response");
        AppStoreError::Decode {
            url: url.to_owned(),
            source: e,
        }
    })
}
