use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_with::skip_serializing_none;

/// The environment for which the receipt was generated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Environment {
    Sandbox,
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// An identifier that Apple sends either as a JSON number or as a string.
/// The text of the number is kept exactly as it appeared on the wire, so ids
/// wider than 64 bits survive.
///
/// Must be decoded straight from JSON text (e.g. `serde_json::from_slice`);
/// decoding from a `serde_json::Value` is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericString(pub String);

impl NumericString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumericString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NumericString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = if raw.get().starts_with('"') {
            serde_json::from_str::<String>(raw.get()).map_err(serde::de::Error::custom)?
        } else {
            raw.get().to_owned()
        };
        if text.parse::<serde_json::Number>().is_err() {
            return Err(serde::de::Error::custom(format!(
                "invalid numeric string '{text}'"
            )));
        }
        Ok(NumericString(text))
    }
}

impl Serialize for NumericString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Reads an integer status where `null` counts as 0.
pub(crate) fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Parses one of Apple's `*_ms` fields (milliseconds since the epoch, sent as
/// a string).
pub(crate) fn parse_millis(value: &str) -> Option<DateTime<Utc>> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

/// When the app receipt was created.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiptCreationDate {
    #[serde(rename = "receipt_creation_date")]
    pub creation_date: String,
    #[serde(rename = "receipt_creation_date_ms")]
    pub creation_date_ms: String,
    #[serde(rename = "receipt_creation_date_pst")]
    pub creation_date_pst: String,
}

impl ReceiptCreationDate {
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.creation_date_ms)
    }
}

/// When the verification request was sent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestDate {
    pub request_date: String,
    pub request_date_ms: String,
    pub request_date_pst: String,
}

impl RequestDate {
    pub fn request_time(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.request_date_ms)
    }
}

/// When the item was purchased.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PurchaseDate {
    pub purchase_date: String,
    pub purchase_date_ms: String,
    pub purchase_date_pst: String,
}

impl PurchaseDate {
    pub fn purchase_time(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.purchase_date_ms)
    }
}

/// Beginning of the subscription period (or the original purchase for
/// restored transactions).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginalPurchaseDate {
    pub original_purchase_date: String,
    pub original_purchase_date_ms: String,
    pub original_purchase_date_pst: String,
}

impl OriginalPurchaseDate {
    pub fn original_purchase_time(&self) -> Option<DateTime<Utc>> {
        parse_millis(&self.original_purchase_date_ms)
    }
}

/// Expiration of a subscription. Absent for non-subscription products.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExpiresDate {
    pub expires_date: Option<String>,
    pub expires_date_ms: Option<String>,
    pub expires_date_pst: Option<String>,
    pub expires_date_formatted: Option<String>,
    pub expires_date_formatted_pst: Option<String>,
}

impl ExpiresDate {
    /// Legacy receipts put the milliseconds value in `expires_date` itself,
    /// so that field is tried when `expires_date_ms` is missing.
    pub fn expires_time(&self) -> Option<DateTime<Utc>> {
        self.expires_date_ms
            .as_deref()
            .and_then(parse_millis)
            .or_else(|| self.expires_date.as_deref().and_then(parse_millis))
    }
}

/// When Apple customer support canceled the transaction.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CancellationDate {
    pub cancellation_date: Option<String>,
    pub cancellation_date_ms: Option<String>,
    pub cancellation_date_pst: Option<String>,
}

impl CancellationDate {
    pub fn cancellation_time(&self) -> Option<DateTime<Utc>> {
        self.cancellation_date_ms.as_deref().and_then(parse_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_string_accepts_number_and_string() {
        let n: NumericString = serde_json::from_str("557130558").unwrap();
        assert_eq!(n.as_str(), "557130558");
        let s: NumericString = serde_json::from_str("\"828156491\"").unwrap();
        assert_eq!(s.as_str(), "828156491");
    }

    #[test]
    fn test_numeric_string_keeps_wire_text() {
        let cases = [
            ("12345678901234567890123", "12345678901234567890123"),
            ("\"12345678901234567890123\"", "12345678901234567890123"),
            ("\"1e3\"", "1e3"),
            ("1e3", "1e3"),
            ("\"-0\"", "-0"),
            ("-0", "-0"),
        ];
        for (json, expected) in cases {
            let n: NumericString = serde_json::from_str(json).unwrap();
            assert_eq!(n.as_str(), expected, "decoding {json}");
        }
    }

    #[test]
    fn test_numeric_string_inside_receipt_keeps_wide_ids() {
        #[derive(Deserialize)]
        struct Holder {
            app_item_id: NumericString,
            version_external_identifier: Option<NumericString>,
        }
        let h: Holder = serde_json::from_str(
            r#"{"app_item_id":98765432109876543210987,"version_external_identifier":"1e3"}"#,
        )
        .unwrap();
        assert_eq!(h.app_item_id.as_str(), "98765432109876543210987");
        assert_eq!(
            h.version_external_identifier,
            Some(NumericString("1e3".to_owned()))
        );
    }

    #[test]
    fn test_numeric_string_rejects_text() {
        assert!(serde_json::from_str::<NumericString>("\"abc\"").is_err());
        assert!(serde_json::from_str::<NumericString>("true").is_err());
    }

    #[test]
    fn test_environment_unknown_is_preserved() {
        let e: Environment = serde_json::from_str("\"Sandbox\"").unwrap();
        assert_eq!(e, Environment::Sandbox);
        let e: Environment = serde_json::from_str("\"Staging\"").unwrap();
        assert_eq!(e, Environment::Unknown("Staging".to_owned()));
    }

    #[test]
    fn test_millis_parsing() {
        let t = parse_millis("1536325472000").unwrap();
        assert_eq!(t.to_rfc3339(), "2018-09-07T13:04:32+00:00");
        assert!(parse_millis("").is_none());
        assert!(parse_millis("2018-09-07 13:04:32 Etc/GMT").is_none());
    }

    #[test]
    fn test_expires_time_falls_back_to_legacy_field() {
        let d = ExpiresDate {
            expires_date: Some("1538917472000".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            d.expires_time().unwrap().timestamp_millis(),
            1538917472000
        );
    }
}
