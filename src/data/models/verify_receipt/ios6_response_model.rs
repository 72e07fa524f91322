use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::common::{
    CancellationDate, ExpiresDate, NumericString, OriginalPurchaseDate, PurchaseDate,
};
use crate::domain::entities::status_code::{handle_error, ReceiptStatusError};

/// Response body for iOS 6 style transaction receipts.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IapResponseForIos6 {
    pub auto_renew_product_id: String,
    pub auto_renew_status: i64,
    pub cancellation_reason: Option<String>,
    pub expiration_intent: Option<String>,
    pub is_in_billing_retry_period: Option<String>,
    #[serde(rename = "latest_expired_receipt_info")]
    pub latest_receipt_info: ReceiptForIos6,
    pub receipt: ReceiptForIos6,
    #[serde(deserialize_with = "super::common::null_as_zero")]
    pub status: i64,
}

impl IapResponseForIos6 {
    pub fn status_error(&self) -> Result<(), ReceiptStatusError> {
        handle_error(self.status)
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiptForIos6 {
    pub app_item_id: NumericString,
    pub bid: String,
    pub bvrs: String,
    #[serde(flatten)]
    pub cancellation_date: CancellationDate,
    #[serde(flatten)]
    pub expires_date: ExpiresDate,
    pub is_trial_period: String,
    pub is_in_intro_offer_period: String,
    pub item_id: String,
    pub product_id: String,
    #[serde(flatten)]
    pub purchase_date: PurchaseDate,
    pub original_transaction_id: String,
    #[serde(flatten)]
    pub original_purchase_date: OriginalPurchaseDate,
    pub quantity: String,
    pub transaction_id: String,
    pub unique_identifier: String,
    pub unique_vendor_identifier: String,
    pub version_external_identifier: Option<NumericString>,
    pub web_order_line_item_id: String,
}
