use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_TIMEOUT_SECS, PRODUCTION_URL, SANDBOX_URL},
    data::models::verify_receipt::request_model::IapRequest,
    errors::AppStoreError,
};

pub const APPSTORE_IS_PRODUCTION: &str = "APPSTORE_IS_PRODUCTION";
pub const APPSTORE_PRODUCTION_URL: &str = "APPSTORE_PRODUCTION_URL";
pub const APPSTORE_SANDBOX_URL: &str = "APPSTORE_SANDBOX_URL";
pub const APPSTORE_TIMEOUT_SECS: &str = "APPSTORE_TIMEOUT_SECS";
pub const APPSTORE_SHARED_SECRET: &str = "APPSTORE_SHARED_SECRET";

/// Settings for [`crate::client::AppStoreClient::from_config`]. Missing
/// values fall back to the public App Store endpoints and a 10 second
/// timeout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppStoreConfig {
    /// When set, a 21007 from production is returned as-is instead of being
    /// retried against the sandbox.
    pub is_production: bool,
    pub production_url: String,
    pub sandbox_url: String,
    pub timeout_secs: u64,
    /// The app's shared secret, sent as `password` with every request built by
    /// [`AppStoreConfig::request`].
    pub shared_secret: Option<String>,
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            is_production: false,
            production_url: PRODUCTION_URL.to_owned(),
            sandbox_url: SANDBOX_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            shared_secret: None,
        }
    }
}

impl AppStoreConfig {
    /// Reads the `APPSTORE_*` environment variables.
    pub fn from_env() -> Result<Self, AppStoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppStoreError> {
        let mut config = Self::default();
        if let Some(value) = lookup(APPSTORE_IS_PRODUCTION) {
            config.is_production = parse_bool(APPSTORE_IS_PRODUCTION, &value)?;
        }
        if let Some(value) = lookup(APPSTORE_PRODUCTION_URL) {
            config.production_url = value;
        }
        if let Some(value) = lookup(APPSTORE_SANDBOX_URL) {
            config.sandbox_url = value;
        }
        if let Some(value) = lookup(APPSTORE_TIMEOUT_SECS) {
            config.timeout_secs = value.trim().parse().map_err(|_| {
                AppStoreError::Config(format!("{APPSTORE_TIMEOUT_SECS} is not a number: '{value}'"))
            })?;
        }
        config.shared_secret = lookup(APPSTORE_SHARED_SECRET).filter(|s| !s.is_empty());
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make every verification fail.
    pub fn validate(&self) -> Result<(), AppStoreError> {
        if self.timeout_secs == 0 {
            return Err(AppStoreError::Config(format!(
                "{APPSTORE_TIMEOUT_SECS} must be positive"
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds a request for `receipt_data` carrying the configured shared
    /// secret.
    pub fn request(&self, receipt_data: impl Into<String>) -> IapRequest {
        let request = IapRequest::new(receipt_data);
        match &self.shared_secret {
            Some(secret) => request.with_password(secret.clone()),
            None => request,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppStoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(AppStoreError::Config(format!(
            "{key} is not a boolean: '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppStoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppStoreConfig::default());
        assert_eq!(config.production_url, PRODUCTION_URL);
        assert_eq!(config.sandbox_url, SANDBOX_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.is_production);
    }

    #[test]
    fn test_overrides() {
        let config = AppStoreConfig::from_lookup(lookup(&[
            (APPSTORE_IS_PRODUCTION, "true"),
            (APPSTORE_PRODUCTION_URL, "http://127.0.0.1:9000/verifyReceipt"),
            (APPSTORE_SANDBOX_URL, "http://127.0.0.1:9001/verifyReceipt"),
            (APPSTORE_TIMEOUT_SECS, "3"),
            (APPSTORE_SHARED_SECRET, "s3cret"),
        ]))
        .unwrap();
        assert!(config.is_production);
        assert_eq!(config.production_url, "http://127.0.0.1:9000/verifyReceipt");
        assert_eq!(config.sandbox_url, "http://127.0.0.1:9001/verifyReceipt");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.request("abc123").password.as_deref(),
            Some("s3cret")
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppStoreConfig::from_lookup(lookup(&[(APPSTORE_IS_PRODUCTION, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, AppStoreError::Config(_)));
        let err = AppStoreConfig::from_lookup(lookup(&[(APPSTORE_TIMEOUT_SECS, "ten")]))
            .unwrap_err();
        assert!(matches!(err, AppStoreError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        for value in ["0", " 0 "] {
            let err = AppStoreConfig::from_lookup(lookup(&[(APPSTORE_TIMEOUT_SECS, value)]))
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid configuration: APPSTORE_TIMEOUT_SECS must be positive."
            );
        }
        let config: AppStoreConfig = serde_json::from_str(r#"{"timeout_secs":0}"#).unwrap();
        assert!(matches!(config.validate(), Err(AppStoreError::Config(_))));
        assert!(AppStoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppStoreConfig =
            serde_json::from_str(r#"{"is_production":true,"timeout_secs":5}"#).unwrap();
        assert!(config.is_production);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.sandbox_url, SANDBOX_URL);
        assert_eq!(config.request("abc123").password, None);
    }
}
