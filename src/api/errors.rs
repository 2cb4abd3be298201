use thiserror::Error;
use url::Url;

use crate::errors::MissingContract;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("[E010] Invalid base URL: {0}\n\nSuggestions:\n  • Provide a valid HTTP or HTTPS URL\n  • Example: https://server-verify.hashscan.io\n  • Ensure the URL includes the protocol (http:// or https://)")]
    CannotBeBase(Url),

    #[error("[E011] Request to the verification service failed: {0}\n\nSuggestions:\n  • Check your network connection\n  • Verify the service URL passed with --api-url\n  • For the local network, make sure the local verifier is running on port 8080")]
    Reqwest(#[from] reqwest::Error),

    #[error("[E012] Unexpected response from the verification service: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Contract(#[from] MissingContract),

    #[error("[E013] Failed to read source file: {0}\n\nSuggestions:\n  • Check file permissions\n  • Verify the project root passed with --root")]
    IoError(#[from] std::io::Error),
}

impl ApiClientError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CannotBeBase(_) => "E010",
            Self::Reqwest(_) => "E011",
            Self::Json(_) => "E012",
            Self::Contract(c) => c.error_code(),
            Self::IoError(_) => "E013",
        }
    }
}
