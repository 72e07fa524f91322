/// verifyReceipt endpoint of the production environment.
pub const PRODUCTION_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
/// verifyReceipt endpoint of the sandbox environment.
pub const SANDBOX_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";
/// Content type sent with every verification request.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Transport timeout used when the caller does not supply an HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Status returned by the production endpoint for receipts issued by the
/// sandbox.
///
/// https://developer.apple.com/library/archive/technotes/tn2413/_index.html
pub const SANDBOX_RECEIPT_STATUS: i64 = 21007;
