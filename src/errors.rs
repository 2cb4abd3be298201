use std::fmt::{self, Formatter};
use thiserror::Error;

/// Requested contract isn't among the contracts emitted by the build.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct MissingContract {
    pub name: String,
    pub available: Vec<String>,
}

impl MissingContract {
    #[must_use]
    pub fn new(name: impl Into<String>, available: Vec<String>) -> Self {
        Self {
            name: name.into(),
            available,
        }
    }

    pub const fn error_code(&self) -> &'static str {
        "E007"
    }

    fn closest(&self) -> Option<&str> {
        self.available
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(&self.name))
            .map(String::as_str)
    }
}

impl fmt::Display for MissingContract {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "[E007] Contract {} not found in build output. Make sure the contract name matches exactly.",
            self.name
        )?;

        if let Some(closest) = self.closest() {
            write!(formatter, " Did you mean '{closest}'?")?;
        }

        if self.available.is_empty() {
            write!(formatter, "\n\nThe build output contains no contracts.")?;
        } else {
            write!(
                formatter,
                "\n\nAvailable contracts: {}",
                self.available.join(", ")
            )?;
        }

        write!(
            formatter,
            "\n\nSuggestions:\n  • Check the name after ':' in --contract\n  • Recompile your contracts with 'npx hardhat compile --force'"
        )
    }
}
