//! Shared setup for the mock-server integration tests.

#![allow(dead_code)]

// std
use std::time::Duration;
// crates.io
use httpmock::MockServer;
// self
use moysklad_client::{
	Credential, RequesterBuilder, ReqwestRequester, http::ReqwestHttpClient,
	reqwest::blocking::Client,
};

/// Base path the mock API is served under.
pub const BASE: &str = "/api/remap/1.2/";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.timeout(Duration::from_secs(5))
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Starts a builder pointed at the mock server's API base.
pub fn mock_builder(server: &MockServer, credential: impl Into<Credential>) -> RequesterBuilder {
	RequesterBuilder::new(credential)
		.endpoint_str(&server.url(BASE))
		.expect("Mock endpoint should parse.")
}

/// Finishes a builder over the test HTTP client.
pub fn build_test_requester(builder: RequesterBuilder) -> ReqwestRequester {
	builder
		.build_with_http_client(test_reqwest_http_client())
		.expect("Requester should build against the mock server.")
}

/// Requester with default settings against the mock server.
pub fn mock_requester(server: &MockServer, credential: impl Into<Credential>) -> ReqwestRequester {
	build_test_requester(mock_builder(server, credential))
}
