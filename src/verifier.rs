//! One verification attempt: pre-check, artifact resolution, submission.
//!
//! Each [`Verifier`] owns its own client and resolver and performs its
//! network calls one after another. The pre-check decides whether the
//! submission happens at all.

use thiserror::Error;

use crate::{
    address::Address,
    api::{ApiClient, ApiClientError, VerificationCheck, VerificationRequest, VerificationResult},
    artifacts::{self, ArtifactResolver},
    contract::ContractIdentifier,
    network::NetworkDescriptor,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Artifacts(#[from] artifacts::Error),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

impl Error {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Artifacts(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Verifier {
    client: ApiClient,
    resolver: ArtifactResolver,
    network: NetworkDescriptor,
}

impl Verifier {
    pub const fn new(
        client: ApiClient,
        resolver: ArtifactResolver,
        network: NetworkDescriptor,
    ) -> Self {
        Self {
            client,
            resolver,
            network,
        }
    }

    pub const fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub const fn resolver(&self) -> &ArtifactResolver {
        &self.resolver
    }

    pub fn chain_id(&self) -> String {
        self.network.chain_id.to_string()
    }

    /// Pre-check, never fails.
    pub async fn check(&self, address: &Address) -> VerificationCheck {
        self.client
            .check_if_verified(address, &self.chain_id())
            .await
    }

    /// Resolves the contract's build output and bundles it for submission.
    ///
    /// # Errors
    ///
    /// Fails when the artifact, its build info or the contract's metadata
    /// can't be found, or when a source file can't be read.
    pub fn prepare(
        &self,
        address: &Address,
        contract: &ContractIdentifier,
    ) -> Result<VerificationRequest, Error> {
        let resolved = self.resolver.resolve(&contract.path, &contract.name)?;
        log::debug!(
            "Resolved {contract} to {} ({} declared source(s))",
            resolved.artifact_path,
            resolved.source_paths.len()
        );

        Ok(VerificationRequest::from_resolved(
            address,
            self.chain_id(),
            &contract.name,
            &resolved,
        )?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the verification service couldn't be reached.
    pub async fn submit(&self, request: &VerificationRequest) -> Result<VerificationResult, Error> {
        Ok(self.client.verify(request).await?)
    }

    /// Full attempt. An existing match short-circuits resolution and
    /// submission.
    ///
    /// # Errors
    ///
    /// See [`Verifier::prepare`] and [`Verifier::submit`].
    pub async fn run(
        &self,
        address: &Address,
        contract: &ContractIdentifier,
    ) -> Result<VerificationResult, Error> {
        if let Some(existing) = self.check(address).await.already_verified() {
            return Ok(existing);
        }

        let request = self.prepare(address, contract)?;
        self.submit(&request).await
    }
}

/// Line reported for `result`, marked with ✓ or ✗ for fresh submissions.
pub fn headline(result: &VerificationResult) -> String {
    match result {
        VerificationResult::Perfect | VerificationResult::Partial => format!("✓ {result}"),
        VerificationResult::Error(_) => format!("✗ {result}"),
        VerificationResult::AlreadyVerified(_) => result.to_string(),
    }
}

/// Where to look at the contract, or why there's nowhere to look.
pub fn explorer_notice(network: &NetworkDescriptor, address: &Address) -> String {
    network.explorer_url(address).map_or_else(
        || {
            format!(
                "Chain ID {} is not a recognized Hedera network.",
                network.chain_id
            )
        },
        |url| format!("View on HashScan: {url}"),
    )
}
