use std::fmt;
use thiserror::Error;

const SEPARATOR: char = ':';

/// Fully qualified contract name, e.g. `contracts/Counter.sol:Counter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractIdentifier {
    pub path: String,
    pub name: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractIdError {
    #[error("[E002] Contract parameter is required\n\nSuggestions:\n  • Pass the contract with --contract path/to/Contract.sol:ContractName\n  • Example: --contract contracts/Counter.sol:Counter")]
    Missing,

    #[error("[E003] Invalid contract format: '{0}'\n\nSuggestions:\n  • Expected format: path/to/Contract.sol:ContractName\n  • Use exactly one ':' between the source path and the contract name\n  • Paths containing ':' are not supported")]
    Format(String),
}

impl ContractIdError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Missing => "E002",
            Self::Format(_) => "E003",
        }
    }
}

impl ContractIdentifier {
    /// Splits `raw` into a source path and a contract name.
    ///
    /// # Errors
    ///
    /// Fails when `raw` is empty, when it doesn't contain exactly one
    /// `:` or when either side of it is empty.
    pub fn parse(raw: &str) -> Result<Self, ContractIdError> {
        if raw.is_empty() {
            return Err(ContractIdError::Missing);
        }

        let mut parts = raw.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(path), Some(name), None) if !path.is_empty() && !name.is_empty() => Ok(Self {
                path: path.to_owned(),
                name: name.to_owned(),
            }),
            _ => Err(ContractIdError::Format(raw.to_owned())),
        }
    }
}

impl std::str::FromStr for ContractIdentifier {
    type Err = ContractIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContractIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.path, self.name)
    }
}
