//! # HashScan contract verification
//!
//! Submits Hardhat build output of a deployed EVM contract to a
//! Sourcify-compatible verification service, the way HashScan expects it
//! for Hedera networks.
//!
//! ## Features
//!
//! - **Network registry**: chain IDs 295-298 with aliases, verification API
//!   and explorer URLs
//! - **Input validation**: contract addresses and `path:Name` identifiers
//! - **Artifact resolution**: finds artifacts and build info across the
//!   directory layouts Hardhat has used
//! - **Verification client**: pre-check and submission against the service
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hashscan_verify::{
//!     address::Address,
//!     api::ApiClient,
//!     artifacts::ArtifactResolver,
//!     contract::ContractIdentifier,
//!     network,
//!     verifier::{self, Verifier},
//! };
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let testnet = network::lookup(296);
//! let client = ApiClient::new(Url::parse(testnet.api_url)?)?;
//! let verifier = Verifier::new(client, ArtifactResolver::for_project("."), testnet);
//!
//! let address = Address::new("0x1234567890123456789012345678901234567890")?;
//! let contract = ContractIdentifier::parse("contracts/Counter.sol:Counter")?;
//!
//! let result = verifier.run(&address, &contract).await?;
//! println!("{}", verifier::headline(&result));
//! println!("{}", verifier::explorer_notice(verifier.network(), &address));
//! # Ok(())
//! # }
//! ```

/// Contract address validation
pub mod address;

/// Client and wire types for the verification service
pub mod api;

/// Hardhat artifact and build info resolution
pub mod artifacts;

/// Fully qualified contract names
pub mod contract;

/// Error types shared across modules
pub mod errors;

/// Hedera network registry
pub mod network;

/// Verification orchestration and report lines
pub mod verifier;
