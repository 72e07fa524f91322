pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod verify_receipt_datasource;
        pub(crate) mod utils;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod common;
            pub(crate) mod ios6_response_model;
            pub(crate) mod purchase_response_model;
            pub(crate) mod request_model;
            pub(crate) mod response_model;
            pub(crate) mod status_response_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_verifier_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod status_code;
    }
    pub mod repositories {
        pub mod receipt_verifier;
    }
}

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;

pub use client::AppStoreClient;
pub use config::AppStoreConfig;
pub use data::datasources::verify_receipt_datasource::{
    VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
};
pub use data::models::verify_receipt::{
    common::{
        CancellationDate, Environment, ExpiresDate, NumericString, OriginalPurchaseDate,
        PurchaseDate, ReceiptCreationDate, RequestDate,
    },
    ios6_response_model::{IapResponseForIos6, ReceiptForIos6},
    purchase_response_model::{PurchaseIapResponse, PurchaseReceipt},
    request_model::IapRequest,
    response_model::{IapResponse, InApp, PendingRenewalInfo, Receipt},
};
pub use domain::entities::status_code::{handle_error, ReceiptStatusError};
pub use domain::repositories::receipt_verifier::ReceiptVerifier;
pub use errors::AppStoreError;
