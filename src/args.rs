use camino::Utf8PathBuf;
use itertools::Itertools;
use std::{env, io, path::PathBuf};
use thiserror::Error;
use url::Url;

use hashscan_verify::{
    address::Address,
    artifacts::ArtifactResolver,
    contract::ContractIdentifier,
    network::{self, NetworkDescriptor},
};

/// Secondary variable consulted when `HASHSCAN_API_URL` isn't set.
pub const SOURCIFY_API_URL_ENV: &str = "SOURCIFY_API_URL";

#[derive(Error, Debug)]
pub enum PathError {
    #[error("[E020] File system error\n\nSuggestions:\n  • Check file permissions\n  • Verify the path exists and is accessible")]
    Io(#[from] io::Error),

    #[error("[E021] Path contains invalid UTF-8 characters\n\nSuggestions:\n  • Use only UTF-8 characters in file paths\n  • Check for hidden or control characters in the path")]
    Utf8(#[from] camino::FromPathBufError),
}

pub fn absolute_path_parser(raw: &str) -> Result<Utf8PathBuf, PathError> {
    let path = PathBuf::from(raw);

    let absolute = if path.is_absolute() {
        path
    } else {
        let mut cwd = env::current_dir()?;
        cwd.push(path);
        cwd
    };

    Ok(Utf8PathBuf::try_from(absolute)?)
}

fn network_value_parser(alias: &str) -> Result<NetworkDescriptor, String> {
    network::find_by_alias(alias).ok_or_else(|| {
        format!(
            "Unknown network '{alias}'. Known networks: {}",
            network::known_aliases().join(", ")
        )
    })
}

#[derive(clap::Parser)]
#[command(name = "hashscan-verify")]
#[command(version)]
#[command(about = "Verify Hedera smart contracts on HashScan")]
#[command(long_about = "
A command-line tool for verifying Hedera EVM smart contracts on HashScan.

It reads the Hardhat build output of your project, bundles the contract
metadata with its sources and submits them to a Sourcify-compatible
verification service.

Examples:
  # Verify a contract on testnet
  hashscan-verify verify 0x1234567890123456789012345678901234567890 \\
    --network testnet \\
    --contract contracts/Counter.sol:Counter

  # Verify against a local node
  hashscan-verify verify 0x1234567890123456789012345678901234567890 \\
    --chain-id 298 \\
    --contract contracts/Counter.sol:Counter

  # Check whether an address is already verified
  hashscan-verify status 0x1234567890123456789012345678901234567890 --network mainnet
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Verify a deployed contract against its Hardhat build output
    ///
    /// Skips submission when the service already holds a match for the
    /// address. Use --dry-run to list what would be submitted.
    ///
    /// Examples:
    ///   hashscan-verify verify 0x1234567890123456789012345678901234567890 \
    ///     --network testnet --contract contracts/Counter.sol:Counter
    Verify(VerifyArgs),

    /// Check whether a contract is already verified
    ///
    /// Examples:
    ///   hashscan-verify status 0x1234567890123456789012345678901234567890 --network testnet
    Status(StatusArgs),
}

#[derive(clap::Args)]
pub struct NetworkArgs {
    /// Network to verify on (mainnet, testnet, previewnet, local)
    #[arg(
        long,
        env = "HASHSCAN_NETWORK",
        value_name = "NAME",
        value_parser = network_value_parser,
        required_unless_present = "chain_id"
    )]
    pub network: Option<NetworkDescriptor>,

    /// Chain ID of the network, takes precedence over --network
    #[arg(long = "chain-id", value_name = "ID")]
    pub chain_id: Option<u64>,

    /// Verification service URL
    #[arg(
        long = "api-url",
        env = "HASHSCAN_API_URL",
        value_name = "URL",
        value_hint = clap::ValueHint::Url,
        value_parser = Url::parse
    )]
    pub api_url: Option<Url>,
}

impl NetworkArgs {
    pub fn descriptor(&self) -> NetworkDescriptor {
        match (self.chain_id, self.network) {
            (Some(chain_id), _) => network::lookup(chain_id),
            (None, Some(descriptor)) => descriptor,
            (None, None) => network::lookup(network::TESTNET_CHAIN_ID),
        }
    }

    /// `--api-url`, then `SOURCIFY_API_URL`, then the network's own service.
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        if let Some(url) = &self.api_url {
            return Ok(url.clone());
        }

        match env::var(SOURCIFY_API_URL_ENV) {
            Ok(raw) if !raw.is_empty() => Url::parse(&raw),
            _ => Url::parse(self.descriptor().api_url),
        }
    }
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Address of the deployed contract
    #[arg(value_name = "ADDRESS", value_parser = Address::new)]
    pub address: Address,

    /// Fully qualified contract name, e.g. contracts/Counter.sol:Counter
    #[arg(long, value_name = "PATH:NAME", value_parser = ContractIdentifier::parse)]
    pub contract: ContractIdentifier,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Hardhat project root (default: current directory)
    #[arg(
        long,
        value_name = "DIR",
        value_hint = clap::ValueHint::DirPath,
        value_parser = absolute_path_parser,
        default_value = "."
    )]
    pub root: Utf8PathBuf,

    /// Compiled artifacts directory (default: <root>/artifacts)
    #[arg(
        long,
        value_name = "DIR",
        value_hint = clap::ValueHint::DirPath,
        value_parser = absolute_path_parser
    )]
    pub artifacts: Option<Utf8PathBuf>,

    /// Resolve and list the files without submitting them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl VerifyArgs {
    pub fn resolver(&self) -> ArtifactResolver {
        match &self.artifacts {
            Some(artifacts) => ArtifactResolver::new(self.root.clone(), artifacts.clone()),
            None => ArtifactResolver::for_project(self.root.clone()),
        }
    }
}

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Address of the deployed contract
    #[arg(value_name = "ADDRESS", value_parser = Address::new)]
    pub address: Address,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
