use serde::Deserialize;

/// Only the status of a verifyReceipt response. Decoded next to the caller's
/// own result type to decide on the sandbox fallback without knowing the
/// full schema.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponseModel {
    /// `null` and a missing field both read as 0.
    #[serde(default)]
    pub(crate) status: Option<i64>,
}

impl StatusResponseModel {
    pub(crate) fn status(&self) -> i64 {
        self.status.unwrap_or(0)
    }
}
