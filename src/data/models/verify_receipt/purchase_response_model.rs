use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::parse_millis;
use crate::domain::entities::status_code::{handle_error, ReceiptStatusError};

/// Response body returned right after a purchase. The renewal related fields
/// are only present for auto-renewable products.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PurchaseIapResponse {
    pub auto_renew_status: u32,
    #[serde(deserialize_with = "super::common::null_as_zero")]
    pub status: i64,
    pub auto_renew_product_id: String,
    pub receipt: PurchaseReceipt,
    pub latest_receipt_info: PurchaseReceipt,
    #[serde(rename = "latest_expired_receipt_info")]
    pub latest_expire_receipt_info: PurchaseReceipt,
    pub latest_receipt: String,
}

impl PurchaseIapResponse {
    pub fn status_error(&self) -> Result<(), ReceiptStatusError> {
        handle_error(self.status)
    }
}

/// Receipt of a purchase result. Dates are flat here, unlike [`crate::InApp`].
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PurchaseReceipt {
    pub quantity: Option<String>,
    pub unique_vendor_identifier: Option<String>,
    pub bvrs: Option<String>,
    pub app_item_id: Option<String>,
    /// Milliseconds since the epoch, as a string.
    pub expires_date: Option<String>,
    pub expires_date_formatted: Option<String>,
    pub expires_date_formatted_pst: Option<String>,
    pub is_in_intro_offer_period: Option<String>,
    pub is_trial_period: Option<String>,
    pub item_id: Option<String>,
    pub unique_identifier: Option<String>,
    pub original_transaction_id: Option<String>,
    pub transaction_id: Option<String>,
    pub web_order_line_item_id: Option<String>,
    pub bid: Option<String>,
    pub product_id: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_date_ms: Option<String>,
    pub purchase_date_pst: Option<String>,
    pub original_purchase_date: Option<String>,
    pub original_purchase_date_ms: Option<String>,
    pub original_purchase_date_pst: Option<String>,
    pub version_external_identifier: Option<String>,
    pub bundle_id: String,
    pub application_version: String,
    #[serde(rename = "receipt_creation_date")]
    pub creation_date: String,
    #[serde(rename = "receipt_creation_date_ms")]
    pub creation_date_ms: String,
    #[serde(rename = "receipt_creation_date_pst")]
    pub creation_date_pst: String,
    pub is_in_billing_retry_period: Option<String>,
}

impl PurchaseReceipt {
    pub fn purchase_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.purchase_date_ms.as_deref().and_then(parse_millis)
    }

    pub fn expires_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.expires_date.as_deref().and_then(parse_millis)
    }
}
