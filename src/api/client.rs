use reqwest::{header, Client};
use url::Url;

use crate::address::Address;

use super::errors::ApiClientError;
use super::models::{
    find_chain_status, CheckedAddress, VerificationCheck, VerificationRequest, VerifyResponse,
};
use super::types::VerificationResult;

const CHECK_ENDPOINT: &str = "check-all-by-addresses";
const VERIFY_ENDPOINT: &str = "verify";

/// Client for a Sourcify-compatible verification service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails if provided `Url` cannot be a base. We rely on that
    /// invariant in other methods.
    pub fn new(base: Url) -> Result<Self, ApiClientError> {
        Self::with_client(base, Client::new())
    }

    /// # Errors
    ///
    /// Fails if provided `Url` cannot be a base.
    pub fn with_client(base: Url, client: Client) -> Result<Self, ApiClientError> {
        if base.cannot_be_a_base() {
            Err(ApiClientError::CannotBeBase(base))
        } else {
            Ok(Self { base, client })
        }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiClientError> {
        let mut url = self.base.clone();
        let url_clone = url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::CannotBeBase(url_clone))?
            .pop_if_empty()
            .push(endpoint);
        Ok(url)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn check_url(&self, address: &Address, chain_id: &str) -> Result<Url, ApiClientError> {
        let mut url = self.endpoint_url(CHECK_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("addresses", &address.to_lowercase())
            .append_pair("chainIds", chain_id);
        Ok(url)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn verify_url(&self) -> Result<Url, ApiClientError> {
        self.endpoint_url(VERIFY_ENDPOINT)
    }

    /// Asks the service whether `address` already has a match on
    /// `chain_id`. Never fails: any transport or decoding problem is
    /// reported as not verified.
    pub async fn check_if_verified(&self, address: &Address, chain_id: &str) -> VerificationCheck {
        match self.fetch_verification_status(address, chain_id).await {
            Ok(Some(status)) => VerificationCheck::verified(status),
            Ok(None) => VerificationCheck::not_verified(),
            Err(err) => {
                log::debug!("Verification status check failed, assuming not verified: {err}");
                VerificationCheck::not_verified()
            }
        }
    }

    async fn fetch_verification_status(
        &self,
        address: &Address,
        chain_id: &str,
    ) -> Result<Option<String>, ApiClientError> {
        let url = self.check_url(address, chain_id)?;
        log::debug!("Checking verification status: {url}");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let response_text = response.text().await?;
        log::debug!("Raw API Response: {response_text}");

        let entries: Vec<CheckedAddress> = serde_json::from_str(&response_text)?;
        Ok(find_chain_status(&entries, chain_id).map(str::to_owned))
    }

    /// Submits the bundle for verification.
    ///
    /// A negative answer from the service is returned as
    /// [`VerificationResult::Error`].
    ///
    /// # Errors
    ///
    /// Will return `Err` if the request couldn't be sent or its body
    /// couldn't be read.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, ApiClientError> {
        let url = self.verify_url()?;
        log::debug!(
            "Submitting {} with {} file(s) to {url}",
            request.contract_name,
            request.files.len()
        );

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("Raw API Response ({status}): {response_text}");

        let parsed = VerifyResponse::parse(&response_text);
        if parsed == VerifyResponse::Unparsable {
            log::debug!("Unrecognized verification response: {response_text}");
        }
        Ok(parsed.into_result())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_json, header as header_matcher, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDRESS: &str = "0xABCDEF1234567890ABCDEF1234567890ABCDEF12";

    fn address() -> Address {
        Address::new(ADDRESS).unwrap()
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            address: ADDRESS.to_owned(),
            chain_id: "296".to_owned(),
            contract_name: "Counter".to_owned(),
            files: BTreeMap::from([
                ("metadata.json".to_owned(), "{}".to_owned()),
                (
                    "contracts/Counter.sol".to_owned(),
                    "contract Counter {}".to_owned(),
                ),
            ]),
        }
    }

    async fn mock_verify(server: &MockServer, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/verify"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_cannot_be_base() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        let err = ApiClient::new(url).unwrap_err();
        assert_eq!(err.error_code(), "E010");
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new(Url::parse("https://server-verify.hashscan.io").unwrap()).unwrap();
        assert_eq!(
            client.verify_url().unwrap().as_str(),
            "https://server-verify.hashscan.io/verify"
        );
        assert_eq!(
            client.check_url(&address(), "296").unwrap().as_str(),
            "https://server-verify.hashscan.io/check-all-by-addresses?addresses=0xabcdef1234567890abcdef1234567890abcdef12&chainIds=296"
        );

        let nested = ApiClient::new(Url::parse("http://localhost:8080/api/").unwrap()).unwrap();
        assert_eq!(
            nested.verify_url().unwrap().as_str(),
            "http://localhost:8080/api/verify"
        );
    }

    #[tokio::test]
    async fn test_check_verified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-all-by-addresses"))
            .and(query_param(
                "addresses",
                "0xabcdef1234567890abcdef1234567890abcdef12",
            ))
            .and(query_param("chainIds", "296"))
            .and(header_matcher("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "address": ADDRESS,
                    "chainIds": [{ "chainId": "296", "status": "perfect" }]
                }
            ])))
            .mount(&server)
            .await;

        let check = client(&server).check_if_verified(&address(), "296").await;
        assert_eq!(check, VerificationCheck::verified("perfect"));
    }

    #[tokio::test]
    async fn test_check_numeric_chain_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-all-by-addresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "address": ADDRESS, "chainIds": [{ "chainId": 295, "status": "partial" }] }
            ])))
            .mount(&server)
            .await;

        let check = client(&server).check_if_verified(&address(), "295").await;
        assert_eq!(check, VerificationCheck::verified("partial"));
    }

    #[tokio::test]
    async fn test_check_other_chain_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-all-by-addresses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "address": ADDRESS, "chainIds": [{ "chainId": "295", "status": "perfect" }] }
            ])))
            .mount(&server)
            .await;

        let check = client(&server).check_if_verified(&address(), "296").await;
        assert_eq!(check, VerificationCheck::not_verified());
    }

    #[tokio::test]
    async fn test_check_unverified_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-all-by-addresses"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "address": ADDRESS, "status": "false" }])),
            )
            .mount(&server)
            .await;

        let check = client(&server).check_if_verified(&address(), "296").await;
        assert!(!check.is_verified);
    }

    #[tokio::test]
    async fn test_check_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check-all-by-addresses"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let check = client(&server).check_if_verified(&address(), "296").await;
        assert_eq!(check, VerificationCheck::not_verified());

        let garbage = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&garbage)
            .await;
        let check = client(&garbage).check_if_verified(&address(), "296").await;
        assert_eq!(check, VerificationCheck::not_verified());
    }

    #[tokio::test]
    async fn test_check_unreachable_service() {
        let client = ApiClient::new(Url::parse("http://127.0.0.1:1").unwrap()).unwrap();
        let check = client.check_if_verified(&address(), "296").await;
        assert_eq!(check, VerificationCheck::not_verified());
    }

    #[tokio::test]
    async fn test_verify_sends_bundle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .and(body_json(json!({
                "address": ADDRESS,
                "chain": "296",
                "files": {
                    "metadata.json": "{}",
                    "contracts/Counter.sol": "contract Counter {}"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{ "address": ADDRESS, "chainId": "296", "status": "perfect" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).verify(&request()).await.unwrap();
        assert_eq!(result, VerificationResult::Perfect);
    }

    #[tokio::test]
    async fn test_verify_partial() {
        let server = MockServer::start().await;
        mock_verify(&server, 200, r#"{"result":[{"status":"partial"}]}"#).await;

        let result = client(&server).verify(&request()).await.unwrap();
        assert_eq!(result, VerificationResult::Partial);
    }

    #[tokio::test]
    async fn test_verify_error_field() {
        let server = MockServer::start().await;
        mock_verify(&server, 200, r#"{"error":"mismatch"}"#).await;

        let result = client(&server).verify(&request()).await.unwrap();
        assert_eq!(result, VerificationResult::Error("mismatch".to_owned()));
        assert_eq!(result.status(), "error");
    }

    #[tokio::test]
    async fn test_verify_bad_request_body_is_decoded() {
        let server = MockServer::start().await;
        mock_verify(
            &server,
            400,
            r#"{"error":"The deployed and recompiled bytecode don't match."}"#,
        )
        .await;

        let result = client(&server).verify(&request()).await.unwrap();
        assert_eq!(
            result.message(),
            Some("The deployed and recompiled bytecode don't match.")
        );
    }

    #[tokio::test]
    async fn test_verify_unexpected_body() {
        let server = MockServer::start().await;
        mock_verify(&server, 502, "Bad Gateway").await;

        let result = client(&server).verify(&request()).await.unwrap();
        assert_eq!(
            result,
            VerificationResult::Error(
                "Unexpected response format from verification service".to_owned()
            )
        );
    }

    #[tokio::test]
    async fn test_verify_transport_failure_propagates() {
        let client = ApiClient::new(Url::parse("http://127.0.0.1:1").unwrap()).unwrap();
        let err = client.verify(&request()).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Reqwest(_)));
        assert_eq!(err.error_code(), "E011");
    }
}
