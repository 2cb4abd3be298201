use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fs};

use super::errors::ApiClientError;
use super::types::{VerificationResult, UNEXPECTED_RESPONSE};
use crate::{address::Address, artifacts::ResolvedArtifact};

/// Name the contract metadata is submitted under.
pub const METADATA_FILE: &str = "metadata.json";

/// Body of `POST /verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    pub address: String,
    #[serde(rename = "chain")]
    pub chain_id: String,
    #[serde(skip)]
    pub contract_name: String,
    pub files: BTreeMap<String, String>,
}

impl VerificationRequest {
    /// Bundles the contract metadata with every declared source that
    /// exists on disk. Sources missing from disk are left out.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the build output has no metadata for
    /// `contract_name` or if an existing source can't be read.
    pub fn from_resolved(
        address: &Address,
        chain_id: impl Into<String>,
        contract_name: &str,
        resolved: &ResolvedArtifact,
    ) -> Result<Self, ApiClientError> {
        let metadata = resolved.contract_metadata(contract_name)?;

        let mut files = BTreeMap::new();
        files.insert(METADATA_FILE.to_owned(), metadata.to_owned());

        for (name, path) in &resolved.source_paths {
            if !path.exists() {
                debug!("Skipping {name}, {path} doesn't exist");
                continue;
            }
            let content = fs::read(path)?;
            files.insert(name.clone(), String::from_utf8_lossy(&content).into_owned());
        }

        Ok(Self {
            address: address.to_string(),
            chain_id: chain_id.into(),
            contract_name: contract_name.to_owned(),
            files,
        })
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.files
            .keys()
            .map(String::as_str)
            .filter(|name| *name != METADATA_FILE)
    }
}

/// Answer of the pre-check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationCheck {
    pub is_verified: bool,
    pub status: Option<String>,
}

impl VerificationCheck {
    pub const fn not_verified() -> Self {
        Self {
            is_verified: false,
            status: None,
        }
    }

    pub fn verified(status: impl Into<String>) -> Self {
        Self {
            is_verified: true,
            status: Some(status.into()),
        }
    }

    /// Result to report instead of submitting, if there's an existing
    /// match.
    pub fn already_verified(&self) -> Option<VerificationResult> {
        self.is_verified.then(|| {
            VerificationResult::AlreadyVerified(self.status.clone().unwrap_or_default())
        })
    }
}

/// Entry of the `check-all-by-addresses` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckedAddress {
    #[serde(default)]
    pub address: String,
    #[serde(rename = "chainIds", default)]
    pub chain_ids: Vec<ChainStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainStatus {
    #[serde(rename = "chainId", deserialize_with = "chain_id_as_string")]
    pub chain_id: String,
    #[serde(default)]
    pub status: String,
}

fn chain_id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChainId {
        Text(String),
        Number(u64),
    }

    Ok(match ChainId::deserialize(deserializer)? {
        ChainId::Text(text) => text,
        ChainId::Number(number) => number.to_string(),
    })
}

/// Finds the status reported for `chain_id` in any of the entries.
pub fn find_chain_status<'a>(entries: &'a [CheckedAddress], chain_id: &str) -> Option<&'a str> {
    entries
        .iter()
        .flat_map(|entry| entry.chain_ids.iter())
        .find(|chain| chain.chain_id == chain_id)
        .map(|chain| chain.status.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyResultEntry {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// The shapes `POST /verify` answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResponse {
    ResultList(Vec<VerifyResultEntry>),
    ErrorField(String),
    Unparsable,
}

impl VerifyResponse {
    pub fn parse(body: &str) -> Self {
        let Ok(Value::Object(mut fields)) = serde_json::from_str::<Value>(body) else {
            return Self::Unparsable;
        };

        let entries = fields
            .remove("result")
            .and_then(|result| serde_json::from_value::<Vec<VerifyResultEntry>>(result).ok())
            .filter(|entries| !entries.is_empty());
        if let Some(entries) = entries {
            return Self::ResultList(entries);
        }

        // falsy values (null, false, 0, "") count as no error
        match fields.remove("error") {
            Some(Value::String(message)) if !message.is_empty() => Self::ErrorField(message),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => Self::Unparsable,
            Some(Value::Null | Value::Bool(false) | Value::String(_)) | None => Self::Unparsable,
            Some(other) => Self::ErrorField(other.to_string()),
        }
    }

    pub fn into_result(self) -> VerificationResult {
        match self {
            Self::ResultList(mut entries) => {
                let first = entries.swap_remove(0);
                VerificationResult::from_status(&first.status, first.message)
            }
            Self::ErrorField(message) => VerificationResult::Error(message),
            Self::Unparsable => VerificationResult::Error(UNEXPECTED_RESPONSE.to_owned()),
        }
    }
}
