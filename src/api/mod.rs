// Re-export the API module components
pub use self::{
    client::ApiClient,
    errors::ApiClientError,
    models::{
        CheckedAddress, ChainStatus, VerificationCheck, VerificationRequest, VerifyResponse,
        VerifyResultEntry, METADATA_FILE,
    },
    types::VerificationResult,
};

// Module declarations
mod client;
mod errors;
mod models;
mod types;
