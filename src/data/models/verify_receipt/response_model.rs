use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::{
    CancellationDate, Environment, ExpiresDate, NumericString, OriginalPurchaseDate,
    PurchaseDate, ReceiptCreationDate, RequestDate,
};
use crate::domain::entities::status_code::{handle_error, ReceiptStatusError};

/// Response body of the verifyReceipt endpoint for iOS 7 style app receipts.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Only the fields observed in real responses are modeled. Callers that need
/// other fields can verify into their own `Deserialize` type instead.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IapResponse {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error.
    #[serde(deserialize_with = "super::common::null_as_zero")]
    pub status: i64,
    /// The environment for which the receipt was generated.
    pub environment: Option<Environment>,
    /// The decoded version of the encoded receipt.
    pub receipt: Receipt,
    /// All in-app purchase transactions, for receipts that contain
    /// auto-renewable subscriptions.
    pub latest_receipt_info: Option<Vec<InApp>>,
    /// The latest Base64 encoded app receipt.
    pub latest_receipt: Option<String>,
    /// Pending renewal information for each auto-renewable subscription.
    pub pending_renewal_info: Option<Vec<PendingRenewalInfo>>,
    /// Set when a temporary issue occurred while processing the request; the
    /// request may be retried later.
    #[serde(rename = "is-retryable")]
    pub is_retryable: Option<bool>,
}

impl IapResponse {
    /// Runs [`handle_error`] on the response status.
    pub fn status_error(&self) -> Result<(), ReceiptStatusError> {
        handle_error(self.status)
    }
}

/// The decoded app receipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Receipt {
    pub receipt_type: String,
    pub adam_id: i64,
    pub app_item_id: NumericString,
    pub bundle_id: String,
    pub application_version: String,
    pub download_id: i64,
    pub version_external_identifier: NumericString,
    pub original_application_version: String,
    pub in_app: Vec<InApp>,
    #[serde(flatten)]
    pub receipt_creation_date: ReceiptCreationDate,
    #[serde(flatten)]
    pub request_date: RequestDate,
    #[serde(flatten)]
    pub original_purchase_date: OriginalPurchaseDate,
}

/// A single in-app purchase transaction.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InApp {
    pub quantity: String,
    pub product_id: String,
    pub transaction_id: String,
    pub original_transaction_id: String,
    pub web_order_line_item_id: Option<String>,
    pub is_trial_period: String,
    #[serde(flatten)]
    pub expires_date: ExpiresDate,
    #[serde(flatten)]
    pub purchase_date: PurchaseDate,
    #[serde(flatten)]
    pub original_purchase_date: OriginalPurchaseDate,
    #[serde(flatten)]
    pub cancellation_date: CancellationDate,
    pub cancellation_reason: Option<String>,
}

impl InApp {
    pub fn is_trial(&self) -> bool {
        self.is_trial_period == "true"
    }

    /// A transaction with a cancellation date was refunded by Apple customer
    /// support and should be treated as never purchased.
    pub fn is_canceled(&self) -> bool {
        self.cancellation_date.cancellation_date.is_some()
            || self.cancellation_date.cancellation_date_ms.is_some()
    }
}

/// A renewal scheduled in the future, or one that failed in the past.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/pending_renewal_info
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PendingRenewalInfo {
    #[serde(rename = "expiration_intent")]
    pub subscription_expiration_intent: String,
    #[serde(rename = "auto_renew_product_id")]
    pub subscription_auto_renew_product_id: String,
    #[serde(rename = "is_in_billing_retry_period")]
    pub subscription_retry_flag: String,
    #[serde(rename = "auto_renew_status")]
    pub subscription_auto_renew_status: String,
    #[serde(rename = "price_consent_status")]
    pub subscription_price_consent_status: String,
    pub product_id: String,
}
