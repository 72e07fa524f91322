use thiserror::Error;

/// Failure conditions reported through the `status` field of a verifyReceipt
/// response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReceiptStatusError {
    #[error("The App Store could not read the JSON object you provided.")]
    UnreadableRequest,
    #[error("The data in the receipt-data property was malformed or missing.")]
    MalformedReceiptData,
    #[error("The receipt could not be authenticated.")]
    NotAuthenticated,
    #[error(
        "The shared secret you provided does not match the shared secret on file for your account."
    )]
    SharedSecretMismatch,
    #[error("The receipt server is not currently available.")]
    ServerUnavailable,
    #[error(
        "This receipt is from the test environment, but it was sent to the production environment for verification. Send it to the test environment instead."
    )]
    SandboxReceiptSentToProduction,
    #[error(
        "This receipt is from the production environment, but it was sent to the test environment for verification. Send it to the production environment instead."
    )]
    ProductionReceiptSentToSandbox,
    #[error(
        "This receipt could not be authorized. Treat this the same as if a purchase was never made."
    )]
    NotAuthorized,
    /// Any status in `21100..=21199`.
    #[error("Internal data access error.")]
    InternalDataAccess(i64),
    #[error("An unknown error occurred")]
    Unknown(i64),
}

impl ReceiptStatusError {
    /// The status code this error was derived from.
    pub fn code(&self) -> i64 {
        match self {
            ReceiptStatusError::UnreadableRequest => 21000,
            ReceiptStatusError::MalformedReceiptData => 21002,
            ReceiptStatusError::NotAuthenticated => 21003,
            ReceiptStatusError::SharedSecretMismatch => 21004,
            ReceiptStatusError::ServerUnavailable => 21005,
            ReceiptStatusError::SandboxReceiptSentToProduction => 21007,
            ReceiptStatusError::ProductionReceiptSentToSandbox => 21008,
            ReceiptStatusError::NotAuthorized => 21010,
            ReceiptStatusError::InternalDataAccess(code) | ReceiptStatusError::Unknown(code) => {
                *code
            }
        }
    }
}

/// Maps a verifyReceipt status code to an error, or `Ok(())` for `0`.
pub fn handle_error(status: i64) -> Result<(), ReceiptStatusError> {
    let error = match status {
        0 => return Ok(()),
        21000 => ReceiptStatusError::UnreadableRequest,
        21002 => ReceiptStatusError::MalformedReceiptData,
        21003 => ReceiptStatusError::NotAuthenticated,
        21004 => ReceiptStatusError::SharedSecretMismatch,
        21005 => ReceiptStatusError::ServerUnavailable,
        21007 => ReceiptStatusError::SandboxReceiptSentToProduction,
        21008 => ReceiptStatusError::ProductionReceiptSentToSandbox,
        21010 => ReceiptStatusError::NotAuthorized,
        21100..=21199 => ReceiptStatusError::InternalDataAccess(status),
        other => ReceiptStatusError::Unknown(other),
    };
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_success() {
        assert_eq!(handle_error(0), Ok(()));
    }

    #[test]
    fn test_documented_codes() {
        let cases = [
            (21000, "The App Store could not read the JSON object you provided."),
            (21002, "The data in the receipt-data property was malformed or missing."),
            (21003, "The receipt could not be authenticated."),
            (21004, "The shared secret you provided does not match the shared secret on file for your account."),
            (21005, "The receipt server is not currently available."),
            (21007, "This receipt is from the test environment, but it was sent to the production environment for verification. Send it to the test environment instead."),
            (21008, "This receipt is from the production environment, but it was sent to the test environment for verification. Send it to the production environment instead."),
            (21010, "This receipt could not be authorized. Treat this the same as if a purchase was never made."),
        ];
        for (code, message) in cases {
            let err = handle_error(code).unwrap_err();
            assert_eq!(err.to_string(), message, "status {code}");
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_internal_data_access_range() {
        for code in [21100, 21150, 21199] {
            let err = handle_error(code).unwrap_err();
            assert_eq!(err, ReceiptStatusError::InternalDataAccess(code));
            assert_eq!(err.to_string(), "Internal data access error.");
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [1, -1, 21001, 21006, 21009, 21099, 21200] {
            let err = handle_error(code).unwrap_err();
            assert_eq!(err, ReceiptStatusError::Unknown(code));
            assert_eq!(err.to_string(), "An unknown error occurred");
            assert_eq!(err.code(), code);
        }
    }
}
