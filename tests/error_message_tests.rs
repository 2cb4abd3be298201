#![allow(clippy::unwrap_used)]

use camino::Utf8PathBuf;
use hashscan_verify::address::{Address, AddressError};
use hashscan_verify::api::ApiClientError;
use hashscan_verify::artifacts::{self, ArtifactResolver};
use hashscan_verify::contract::{ContractIdError, ContractIdentifier};
use hashscan_verify::errors::MissingContract;
use url::Url;

#[test]
fn test_address_error_with_format_info() {
    let error = Address::new("0x1234").unwrap_err();
    let error_message = format!("{error}");

    assert_eq!(error, AddressError::Format("0x1234".to_owned()));
    assert_eq!(error.error_code(), "E001");
    assert!(error_message.contains("[E001]"));
    assert!(error_message.contains("0x1234"));
    assert!(error_message.contains("0x followed by 40 hexadecimal characters"));
}

#[test]
fn test_contract_identifier_errors() {
    let missing = ContractIdentifier::parse("").unwrap_err();
    assert_eq!(missing, ContractIdError::Missing);
    assert!(format!("{missing}").contains("[E002] Contract parameter is required"));

    let invalid = ContractIdentifier::parse("contracts/Counter.sol").unwrap_err();
    let error_message = format!("{invalid}");
    assert!(error_message.contains("[E003]"));
    assert!(error_message.contains("path/to/Contract.sol:ContractName"));
}

#[test]
fn test_artifact_not_found_lists_locations() {
    let resolver = ArtifactResolver::for_project("/nonexistent/project");
    let error = resolver
        .resolve("contracts/Counter.sol", "Counter")
        .unwrap_err();
    let error_message = format!("{error}");

    assert_eq!(error.error_code(), "E004");
    assert!(error_message.contains("Could not find artifact for Counter"));
    assert!(error_message.contains(
        "Expected artifact at: /nonexistent/project/artifacts/contracts/Counter.sol/Counter.json"
    ));
    assert!(error_message.contains("/nonexistent/project/artifacts/contracts/Counter/Counter.json"));
    assert!(error_message.contains("npx hardhat compile"));

    match error {
        artifacts::Error::ArtifactNotFound { attempted, .. } => {
            // the two stripped variants coincide for paths already under contracts/
            assert_eq!(attempted.len(), 3);
            assert_eq!(
                attempted[0],
                Utf8PathBuf::from("/nonexistent/project/artifacts/contracts/Counter.sol/Counter.json")
            );
        }
        other => panic!("Expected ArtifactNotFound, got {other:?}"),
    }
}

#[test]
fn test_build_info_errors_suggest_recompiling() {
    let missing_reference = artifacts::Error::MissingBuildInfoReference {
        artifact: Utf8PathBuf::from("artifacts/contracts/Counter.sol/Counter.json"),
    };
    assert!(format!("{missing_reference}").contains("npx hardhat compile --force"));
    assert_eq!(missing_reference.error_code(), "E005");

    let missing_file = artifacts::Error::BuildInfoNotFound {
        build_info_id: "abc".to_owned(),
        path: Utf8PathBuf::from("artifacts/build-info/abc.output.json"),
    };
    let error_message = format!("{missing_file}");
    assert!(error_message.contains("[E006]"));
    assert!(error_message.contains("artifacts/build-info/abc.output.json"));
    assert!(error_message.contains("npx hardhat compile --force"));
}

#[test]
fn test_missing_contract_error_with_suggestions() {
    let missing_contract = MissingContract::new(
        "counter",
        vec!["Counter".to_owned(), "Token".to_owned()],
    );

    let error_message = format!("{missing_contract}");

    assert!(error_message.contains("[E007]"));
    assert!(error_message.contains("Contract counter not found in build output"));
    assert!(error_message.contains("Available contracts: Counter, Token"));
    assert!(error_message.contains("Did you mean 'Counter'?"));
}

#[test]
fn test_api_client_error_codes() {
    let url = Url::parse("data:text/plain,hello").unwrap();
    let error = ApiClientError::CannotBeBase(url);
    assert_eq!(error.error_code(), "E010");
    assert!(format!("{error}").contains("Invalid base URL"));

    let io = ApiClientError::from(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "denied",
    ));
    assert_eq!(io.error_code(), "E013");
    assert!(format!("{io}").contains("Failed to read source file"));

    let wrapped = ApiClientError::from(MissingContract::new("Counter", vec![]));
    assert_eq!(wrapped.error_code(), "E007");
    assert!(format!("{wrapped}").starts_with("[E007]"));
}
