use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use log::debug;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::{collections::BTreeMap, fs};
use thiserror::Error;

use crate::errors::MissingContract;

pub const BUILD_INFO_DIR: &str = "build-info";
pub const BUILD_INFO_SUFFIX: &str = ".output.json";
pub const CONTRACTS_DIR: &str = "contracts";
pub const SOURCE_EXT: &str = ".sol";

/// Prefix the compiler puts in front of project-local source names.
pub const PROJECT_SOURCE_PREFIX: &str = "project/";

const BUILD_INFO_ID_FIELD: &str = "buildInfoId";

#[derive(Debug, Error)]
pub enum Error {
    #[error("[E004] Could not find artifact for {contract}. Expected artifact at: {expected}\n\nLocations tried:\n{tried}\n\nSuggestions:\n  • Make sure the contract is compiled: run 'npx hardhat compile'\n  • The contract path must match exactly: use format 'contracts/File.sol:ContractName'\n  • The contract name must match the artifact name exactly", tried = .attempted.iter().map(|path| format!("  - {path}")).join("\n"))]
    ArtifactNotFound {
        contract: String,
        expected: Utf8PathBuf,
        attempted: Vec<Utf8PathBuf>,
    },

    #[error("[E005] Build info ID not found in artifact: {artifact}\n\nSuggestions:\n  • Please recompile your contracts with 'npx hardhat compile --force'")]
    MissingBuildInfoReference { artifact: Utf8PathBuf },

    #[error("[E006] Build info '{build_info_id}' not found at: {path}\n\nSuggestions:\n  • Please recompile your contracts with 'npx hardhat compile --force'\n  • Check that --artifacts points at the compiled output directory")]
    BuildInfoNotFound {
        build_info_id: String,
        path: Utf8PathBuf,
    },

    #[error("[E008] I/O error reading file '{path}': {error}\n\nSuggestions:\n  • Check file exists and is readable\n  • Verify file permissions")]
    Io { path: Utf8PathBuf, error: String },

    #[error("[E009] Failed to parse JSON file '{path}': {error}\n\nSuggestions:\n  • The file may be truncated or corrupted\n  • Please recompile your contracts with 'npx hardhat compile --force'")]
    Json { path: Utf8PathBuf, error: String },
}

impl Error {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ArtifactNotFound { .. } => "E004",
            Self::MissingBuildInfoReference { .. } => "E005",
            Self::BuildInfoNotFound { .. } => "E006",
            Self::Io { .. } => "E008",
            Self::Json { .. } => "E009",
        }
    }
}

/// Build-info document written next to the artifacts, only the parts
/// verification needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub output: BuildOutput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildOutput {
    /// Source name -> contract name -> compiler output.
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,

    #[serde(default)]
    pub sources: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractOutput {
    #[serde(default)]
    pub metadata: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub artifact_path: Utf8PathBuf,
    pub artifact: Value,
    pub build_info_path: Utf8PathBuf,
    pub build_info: BuildInfo,
    /// Logical source name -> file on disk. The file may not exist.
    pub source_paths: BTreeMap<String, Utf8PathBuf>,
}

impl ResolvedArtifact {
    /// Raw metadata string the compiler emitted for `contract_name`.
    ///
    /// Contracts are keyed by source name first, so every source is
    /// searched and the first one declaring `contract_name` wins.
    ///
    /// # Errors
    ///
    /// Fails when no source declares the contract or when its metadata
    /// is missing.
    pub fn contract_metadata(&self, contract_name: &str) -> Result<&str, MissingContract> {
        self.build_info
            .output
            .contracts
            .values()
            .find_map(|contracts| contracts.get(contract_name))
            .and_then(|contract| contract.metadata.as_deref())
            .filter(|metadata| !metadata.is_empty())
            .ok_or_else(|| MissingContract::new(contract_name, self.contract_names()))
    }

    pub fn contract_names(&self) -> Vec<String> {
        self.build_info
            .output
            .contracts
            .values()
            .flat_map(BTreeMap::keys)
            .unique()
            .cloned()
            .collect()
    }
}

type CandidateFn = fn(&Utf8Path, &str, &str) -> Utf8PathBuf;

fn artifact_file(contract_name: &str) -> String {
    format!("{contract_name}.json")
}

fn strip_extension(path: &str) -> &str {
    path.strip_suffix(SOURCE_EXT).unwrap_or(path)
}

/// Leading separators dropped so `join` keeps the base directory.
fn relative(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Artifact locations in lookup order. The first one is what a default
/// Hardhat layout produces for `contracts/File.sol:Name`.
static CANDIDATES: [CandidateFn; 4] = [
    |artifacts, path, name| artifacts.join(relative(path)).join(artifact_file(name)),
    |artifacts, path, name| {
        artifacts
            .join(strip_extension(relative(path)))
            .join(artifact_file(name))
    },
    |artifacts, path, name| {
        artifacts
            .join(CONTRACTS_DIR)
            .join(relative(path))
            .join(artifact_file(name))
    },
    |artifacts, path, name| {
        let path = relative(path);
        let rest = path
            .strip_prefix(CONTRACTS_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path);
        artifacts
            .join(CONTRACTS_DIR)
            .join(strip_extension(rest))
            .join(artifact_file(name))
    },
];

/// Locates compiled artifacts of a single project.
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    root: Utf8PathBuf,
    artifacts: Utf8PathBuf,
}

impl ArtifactResolver {
    pub fn new(root: impl Into<Utf8PathBuf>, artifacts: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            artifacts: artifacts.into(),
        }
    }

    /// Resolver using the conventional `<root>/artifacts` directory.
    pub fn for_project(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        let artifacts = root.join("artifacts");
        Self::new(root, artifacts)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn artifacts_dir(&self) -> &Utf8Path {
        &self.artifacts
    }

    pub fn candidate_paths<'a>(
        &'a self,
        contract_path: &'a str,
        contract_name: &'a str,
    ) -> impl Iterator<Item = Utf8PathBuf> + 'a {
        CANDIDATES
            .iter()
            .map(move |candidate| candidate(&self.artifacts, contract_path, contract_name))
    }

    /// # Errors
    ///
    /// Returns `Err` listing every location tried when none of them
    /// exists.
    pub fn find_artifact(
        &self,
        contract_path: &str,
        contract_name: &str,
    ) -> Result<Utf8PathBuf, Error> {
        let found = self
            .candidate_paths(contract_path, contract_name)
            .inspect(|candidate| debug!("Looking for artifact at {candidate}"))
            .find(|candidate| candidate.exists());

        if let Some(path) = found {
            debug!("Found artifact: {path}");
            return Ok(path);
        }

        let attempted: Vec<Utf8PathBuf> = self
            .candidate_paths(contract_path, contract_name)
            .unique()
            .collect();
        Err(Error::ArtifactNotFound {
            contract: contract_name.to_owned(),
            expected: CANDIDATES[0](&self.artifacts, contract_path, contract_name),
            attempted,
        })
    }

    pub fn build_info_path(&self, build_info_id: &str) -> Utf8PathBuf {
        self.artifacts
            .join(BUILD_INFO_DIR)
            .join(format!("{build_info_id}{BUILD_INFO_SUFFIX}"))
    }

    /// # Errors
    ///
    /// Fails when the artifact or its build info can't be found, or when
    /// either of them can't be read or parsed.
    pub fn resolve(
        &self,
        contract_path: &str,
        contract_name: &str,
    ) -> Result<ResolvedArtifact, Error> {
        let artifact_path = self.find_artifact(contract_path, contract_name)?;
        let artifact: Value = read_json(&artifact_path)?;

        let build_info_id = artifact
            .get(BUILD_INFO_ID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MissingBuildInfoReference {
                artifact: artifact_path.clone(),
            })?
            .to_owned();

        let build_info_path = self.build_info_path(&build_info_id);
        debug!("Build info for {contract_name}: {build_info_path}");
        if !build_info_path.exists() {
            return Err(Error::BuildInfoNotFound {
                build_info_id,
                path: build_info_path,
            });
        }

        let build_info: BuildInfo = read_json(&build_info_path)?;
        let source_paths = self.source_paths(&build_info);

        Ok(ResolvedArtifact {
            artifact_path,
            artifact,
            build_info_path,
            build_info,
            source_paths,
        })
    }

    fn source_paths(&self, build_info: &BuildInfo) -> BTreeMap<String, Utf8PathBuf> {
        build_info
            .output
            .sources
            .keys()
            .map(|source| {
                let normalized = normalize_source_name(source);
                let path = self.root.join(relative(normalized));
                (normalized.to_owned(), path)
            })
            .collect()
    }
}

/// Drops the compiler's `project/` prefix from a source name.
pub fn normalize_source_name(source: &str) -> &str {
    source.strip_prefix(PROJECT_SOURCE_PREFIX).unwrap_or(source)
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, Error> {
    let content = fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::Json {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
