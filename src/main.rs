mod args;
use crate::args::{Args, Commands, StatusArgs, VerifyArgs};

use clap::Parser;
use hashscan_verify::{
    address::Address,
    api::{ApiClient, ApiClientError, VerificationRequest},
    artifacts, errors,
    verifier::{self, Verifier},
};
use std::{future::Future, process::ExitCode, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Artifacts(#[from] artifacts::Error),

    #[error(transparent)]
    MissingContract(#[from] errors::MissingContract),

    #[error("[E030] Invalid verification service URL: {0}\n\nSuggestions:\n  • Check --api-url, HASHSCAN_API_URL and SOURCIFY_API_URL\n  • Use absolute URLs with protocol (http:// or https://)")]
    ApiUrl(#[from] url::ParseError),

    #[error("[E031] Gave up after {0} second(s)\n\nSuggestions:\n  • Check that the verification service is reachable\n  • Increase --timeout")]
    Timeout(u64),
}

impl CliError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.error_code(),
            Self::Artifacts(e) => e.error_code(),
            Self::MissingContract(e) => e.error_code(),
            Self::ApiUrl(_) => "E030",
            Self::Timeout(_) => "E031",
        }
    }
}

impl From<verifier::Error> for CliError {
    fn from(err: verifier::Error) -> Self {
        match err {
            verifier::Error::Artifacts(e) => Self::Artifacts(e),
            verifier::Error::Api(ApiClientError::Contract(e)) => Self::MissingContract(e),
            verifier::Error::Api(e) => Self::Api(e),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let Args { command, verbose } = Args::parse();

    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let outcome = match command {
        Commands::Verify(args) => with_timeout(args.timeout, verify(&args)).await,
        Commands::Status(args) => with_timeout(args.timeout, status(&args)).await,
    };
    let code = outcome.inspect_err(|err| log::debug!("Failed with {}", err.error_code()))?;
    Ok(code)
}

async fn with_timeout<T>(
    seconds: Option<u64>,
    operation: impl Future<Output = Result<T, CliError>>,
) -> Result<T, CliError> {
    match seconds {
        Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), operation)
            .await
            .map_err(|_| CliError::Timeout(seconds))?,
        None => operation.await,
    }
}

fn verifier_for(args: &VerifyArgs) -> Result<Verifier, CliError> {
    let network = args.network.descriptor();
    let client = ApiClient::new(args.network.api_url()?)?;
    log::debug!("Using {network} with {}", client.base_url());
    Ok(Verifier::new(client, args.resolver(), network))
}

async fn verify(args: &VerifyArgs) -> Result<ExitCode, CliError> {
    let verifier = verifier_for(args)?;
    let address = &args.address;
    let contract = &args.contract;

    if args.dry_run {
        let request = verifier.prepare(address, contract)?;
        print_dry_run(&verifier, &request);
        return Ok(ExitCode::SUCCESS);
    }

    let code = if let Some(existing) = verifier.check(address).await.already_verified() {
        println!("{}", verifier::headline(&existing));
        ExitCode::SUCCESS
    } else {
        println!("Verifying {} at {address}...", contract.name);

        let request = verifier.prepare(address, contract)?;
        let result = verifier.submit(&request).await?;

        if result.is_verified() {
            println!("{}", verifier::headline(&result));
            ExitCode::SUCCESS
        } else {
            eprintln!("{}", verifier::headline(&result));
            ExitCode::FAILURE
        }
    };

    print_explorer_notice(&verifier, address);
    Ok(code)
}

async fn status(args: &StatusArgs) -> Result<ExitCode, CliError> {
    let network = args.network.descriptor();
    let client = ApiClient::new(args.network.api_url()?)?;
    log::debug!("Using {network} with {}", client.base_url());

    let check = client
        .check_if_verified(&args.address, &network.chain_id.to_string())
        .await;

    match check.already_verified() {
        Some(existing) => println!("{}", verifier::headline(&existing)),
        None => println!("Contract {} is not verified on {network}.", args.address),
    }

    println!("\n{}", verifier::explorer_notice(&network, &args.address));
    Ok(ExitCode::SUCCESS)
}

fn print_dry_run(verifier: &Verifier, request: &VerificationRequest) {
    println!(
        "Would submit {} at {} to {} on {}.",
        request.contract_name,
        request.address,
        verifier.client().base_url(),
        verifier.network()
    );
    println!("These are the files that would be sent:");
    for name in request.files.keys() {
        println!("  {name}");
    }
    println!("Nothing submitted, drop --dry-run to verify.");
}

fn print_explorer_notice(verifier: &Verifier, address: &Address) {
    println!(
        "\n{}",
        verifier::explorer_notice(verifier.network(), address)
    );
}
