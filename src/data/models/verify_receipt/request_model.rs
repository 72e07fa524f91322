use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Request body of the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IapRequest {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub receipt_data: String,
    /// The app's shared secret. Only used for receipts that contain
    /// auto-renewable subscriptions.
    pub password: Option<String>,
    /// Only used for iOS 7 style app receipts that contain auto-renewable or
    /// non-renewing subscriptions. If true, the response includes only the
    /// latest renewal transaction for any subscriptions.
    #[serde(rename = "exclude-old-transactions", default)]
    pub exclude_old_transactions: bool,
}

impl IapRequest {
    pub fn new(receipt_data: impl Into<String>) -> Self {
        Self {
            receipt_data: receipt_data.into(),
            password: None,
            exclude_old_transactions: false,
        }
    }

    /// Sets the shared secret. An empty secret is treated as absent.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password = if password.is_empty() {
            None
        } else {
            Some(password)
        };
        self
    }

    pub fn with_exclude_old_transactions(mut self, exclude: bool) -> Self {
        self.exclude_old_transactions = exclude;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_without_password() {
        let body = serde_json::to_string(&IapRequest::new("abc123")).unwrap();
        assert_eq!(
            body,
            r#"{"receipt-data":"abc123","exclude-old-transactions":false}"#
        );
    }

    #[test]
    fn test_wire_format_with_password() {
        let request = IapRequest::new("abc123")
            .with_password("s3cret")
            .with_exclude_old_transactions(true);
        let body = serde_json::to_string(&request).unwrap();
        assert_eq!(
            body,
            r#"{"receipt-data":"abc123","password":"s3cret","exclude-old-transactions":true}"#
        );
    }

    #[test]
    fn test_empty_password_is_omitted() {
        let request = IapRequest::new("abc123").with_password("");
        assert_eq!(request.password, None);
        let body = serde_json::to_string(&request).unwrap();
        assert!(!body.contains("password"));
    }
}
