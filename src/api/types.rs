use std::fmt::{self, Display};

pub const PERFECT: &str = "perfect";
pub const PARTIAL: &str = "partial";
pub const ERROR: &str = "error";

pub const UNEXPECTED_RESPONSE: &str = "Unexpected response format from verification service";

/// Outcome of a verification attempt.
///
/// A failed match is a value, not an error: the submission reached the
/// service and the service answered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationResult {
    Perfect,
    Partial,
    Error(String),
    /// Pre-check found an existing match, carries its status.
    AlreadyVerified(String),
}

impl VerificationResult {
    /// Maps a status reported by the service.
    pub fn from_status(status: &str, message: Option<String>) -> Self {
        match status {
            PERFECT => Self::Perfect,
            PARTIAL => Self::Partial,
            ERROR => Self::Error(message.unwrap_or_else(|| UNEXPECTED_RESPONSE.to_owned())),
            other => Self::Error(
                message.unwrap_or_else(|| format!("Verification returned status '{other}'")),
            ),
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Self::Perfect => PERFECT,
            Self::Partial => PARTIAL,
            Self::Error(_) => ERROR,
            Self::AlreadyVerified(status) => status,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub const fn is_verified(&self) -> bool {
        !matches!(self, Self::Error(_))
    }
}

impl Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perfect => write!(f, "Contract verified successfully (perfect match)"),
            Self::Partial => write!(f, "Contract verified successfully (partial match)"),
            Self::Error(message) => write!(f, "Verification failed: {message}"),
            Self::AlreadyVerified(status) => {
                write!(f, "Contract is already verified with {status} match.")
            }
        }
    }
}
