use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

lazy_static! {
    static ref ADDRESS_REGEX: Result<Regex, regex::Error> = Regex::new(Address::PATTERN);
}

/// EVM contract address, `0x` followed by 40 hexadecimal digits.
///
/// The original spelling is kept: the verification service is given the
/// address as typed, only the pre-check lowercases it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("[E001] Invalid contract address format: '{0}'\n\nSuggestions:\n  • Expected format: 0x followed by 40 hexadecimal characters\n  • Example: 0x1234567890123456789012345678901234567890\n  • Check that the address starts with '0x'\n  • Copy the address from the deployment output or HashScan")]
    Format(String),
}

impl AddressError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Format(_) => "E001",
        }
    }
}

impl Address {
    const PATTERN: &'static str = r"^0x[a-fA-F0-9]{40}$";

    /// # Errors
    ///
    /// Will fail if `raw` isn't `0x` followed by exactly 40
    /// hexadecimal digits.
    pub fn new(raw: &str) -> Result<Self, AddressError> {
        if validate_address(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(AddressError::Format(raw.to_owned()))
        }
    }

    /// Form used by the `check-all-by-addresses` endpoint.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

pub fn validate_address(raw: &str) -> bool {
    ADDRESS_REGEX
        .as_ref()
        .is_ok_and(|regex| regex.is_match(raw))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
