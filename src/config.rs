//! Requester configuration and the builder that assembles a [`Requester`].

// std
use std::time::Duration;
// self
use crate::{
	_prelude::*,
	auth::{AuthStrategy, Credential},
	error::ConfigError,
	http::HttpClient,
	rate_limit::RateLimit,
	requester::Requester,
	transport::RateLimitedTransport,
};
#[cfg(feature = "reqwest")] use crate::{http::ReqwestHttpClient, requester::ReqwestRequester};

/// Production base endpoint of the JSON API.
pub const DEFAULT_ENDPOINT: &str = "https://api.moysklad.ru/api/remap/1.2/";

/// Settings shared by every call of one requester.
///
/// Every field has a default, so partial documents deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequesterConfig {
	/// Base URL every resource path is resolved against.
	pub endpoint: Url,
	/// Client-side admission policy.
	pub rate_limit: RateLimit,
	/// Whole-request timeout applied by the default HTTP client.
	pub timeout: Option<Duration>,
	/// `User-Agent` sent by the default HTTP client.
	pub user_agent: String,
}
impl RequesterConfig {
	/// Validates the configuration and normalizes the endpoint to end with `/`.
	pub fn validated(mut self) -> Result<Self, ConfigError> {
		self.rate_limit.validate()?;
		self.endpoint = normalize_endpoint(self.endpoint)?;

		Ok(self)
	}
}
impl Default for RequesterConfig {
	fn default() -> Self {
		Self {
			endpoint: default_endpoint(),
			rate_limit: RateLimit::default(),
			timeout: None,
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
		}
	}
}

/// Builder for [`Requester`] values.
#[derive(Debug)]
pub struct RequesterBuilder {
	/// Credential the auth strategy is derived from.
	pub credential: Credential,
	/// Configuration being assembled.
	pub config: RequesterConfig,
}
impl RequesterBuilder {
	/// Creates a builder with the default configuration.
	pub fn new(credential: impl Into<Credential>) -> Self {
		Self { credential: credential.into(), config: RequesterConfig::default() }
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: RequesterConfig) -> Self {
		self.config = config;

		self
	}

	/// Sets the base endpoint.
	pub fn endpoint(mut self, url: Url) -> Self {
		self.config.endpoint = url;

		self
	}

	/// Parses and sets the base endpoint.
	pub fn endpoint_str(self, url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(url).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Ok(self.endpoint(url))
	}

	/// Overrides the client-side rate limit.
	pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
		self.config.rate_limit = rate_limit;

		self
	}

	/// Sets the whole-request timeout used by the default HTTP client.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.config.timeout = Some(timeout);

		self
	}

	/// Overrides the `User-Agent` used by the default HTTP client.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.config.user_agent = user_agent.into();

		self
	}

	/// Validates everything and builds a requester over a caller-supplied HTTP client.
	pub fn build_with_http_client<C>(self, http_client: C) -> Result<Requester<C>, ConfigError>
	where
		C: HttpClient,
	{
		let config = self.config.validated()?;
		let auth = AuthStrategy::from_credential(self.credential)?;
		let transport = RateLimitedTransport::new(http_client, auth, config.rate_limit);

		Ok(Requester::from_parts(config.endpoint, transport))
	}

	/// Validates everything and builds a requester over the default blocking reqwest client.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<ReqwestRequester, ConfigError> {
		let mut client = ReqwestClient::builder().user_agent(self.config.user_agent.clone());

		if let Some(timeout) = self.config.timeout {
			client = client.timeout(timeout);
		}

		let http_client = ReqwestHttpClient::with_client(client.build()?);

		self.build_with_http_client(http_client)
	}
}

fn default_endpoint() -> Url {
	Url::parse(DEFAULT_ENDPOINT).expect("DEFAULT_ENDPOINT must be an absolute URL.")
}

fn normalize_endpoint(mut url: Url) -> Result<Url, ConfigError> {
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedEndpoint { url: url.to_string() });
	}

	url.set_query(None);
	url.set_fragment(None);

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}
