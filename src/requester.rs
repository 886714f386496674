//! The requester façade: verb calls over the rate-limited transport, with every decoded body
//! passed through the error classifier before it is returned.
//!
//! All verbs funnel into one internal round trip, so path resolution, quota, headers, auth, and
//! classification are applied identically whichever verb is used. `get_raw` is the one exception:
//! it skips decoding and classification and hands back the transport response untouched.
//!
//! A requester is `Send + Sync` when its [`HttpClient`] is, and may be shared across threads; the
//! quota is then shared by every thread. Calls are single round trips with no retry and no local
//! rollback.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	classify,
	config::RequesterBuilder,
	error::{ConfigError, PayloadError, TransportError},
	http::{ApiRequest, HttpClient, RawResponse, Verb},
	obs::{self, RequestOutcome, RequestSpan},
	transport::RateLimitedTransport,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Query parameters appended to a resource URL.
pub type Params = BTreeMap<String, String>;

#[cfg(feature = "reqwest")]
/// Requester specialized for the crate's default reqwest transport.
pub type ReqwestRequester = Requester<ReqwestHttpClient>;

/// Authenticated, rate-limited client bound to one base endpoint.
pub struct Requester<C>
where
	C: HttpClient,
{
	endpoint: Url,
	transport: RateLimitedTransport<C>,
}
impl<C> Requester<C>
where
	C: HttpClient,
{
	pub(crate) fn from_parts(endpoint: Url, transport: RateLimitedTransport<C>) -> Self {
		Self { endpoint, transport }
	}

	/// Creates a requester with the default configuration over a caller-supplied client.
	pub fn with_http_client(credential: impl Into<Credential>, http_client: C) -> Result<Self> {
		Ok(RequesterBuilder::new(credential).build_with_http_client(http_client)?)
	}

	/// Base endpoint every path is resolved against.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Transport shared by every verb.
	pub fn transport(&self) -> &RateLimitedTransport<C> {
		&self.transport
	}

	/// Resolves a resource path against the base endpoint.
	///
	/// Leading slashes are ignored; a path that would leave the endpoint (absolute URLs, `..`
	/// segments climbing out) is rejected.
	pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim_start_matches('/');
		let url = self
			.endpoint
			.join(relative)
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })?;

		if url.as_str().starts_with(self.endpoint.as_str()) {
			Ok(url)
		} else {
			Err(ConfigError::PathOutsideEndpoint {
				path: path.to_owned(),
				endpoint: self.endpoint.to_string(),
			})
		}
	}

	/// Issues a `GET` and returns the decoded, classified body.
	pub fn get(&self, path: &str, params: Option<&Params>) -> Result<Value> {
		self.observed(Verb::Get, path, || self.round_trip(Verb::Get, path, params, None))
	}

	/// Issues a `GET` and returns the transport response untouched.
	///
	/// Meant for non-JSON or streamed bodies: no decoding and no error classification happen,
	/// even when the body carries an `errors` field.
	pub fn get_raw(&self, path: &str, params: Option<&Params>) -> Result<C::Response> {
		self.observed(Verb::Get, path, || self.dispatch(Verb::Get, path, params, None))
	}

	/// Serializes `data` as JSON, issues a `POST`, and returns the decoded, classified body.
	pub fn post<B>(&self, path: &str, data: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.observed(Verb::Post, path, || {
			let body = encode(data)?;

			self.round_trip(Verb::Post, path, None, Some(body))
		})
	}

	/// Serializes `data` as JSON, issues a `PUT`, and returns the decoded, classified body.
	pub fn put<B>(&self, path: &str, data: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.observed(Verb::Put, path, || {
			let body = encode(data)?;

			self.round_trip(Verb::Put, path, None, Some(body))
		})
	}

	/// Issues a `DELETE` and returns the decoded, classified body (`null` when empty).
	pub fn delete(&self, path: &str) -> Result<Value> {
		self.observed(Verb::Delete, path, || self.round_trip(Verb::Delete, path, None, None))
	}

	fn observed<T, F>(&self, verb: Verb, path: &str, call: F) -> Result<T>
	where
		F: FnOnce() -> Result<T>,
	{
		let _span = RequestSpan::new(verb, path).entered();

		obs::record_request_outcome(verb, RequestOutcome::Attempt);

		let result = call();

		match &result {
			Ok(_) => obs::record_request_outcome(verb, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(verb, RequestOutcome::Failure),
		}

		result
	}

	fn round_trip(
		&self,
		verb: Verb,
		path: &str,
		params: Option<&Params>,
		body: Option<Vec<u8>>,
	) -> Result<Value> {
		let response = self.dispatch(verb, path, params, body)?;
		let status = response.status_code();
		let bytes = response.into_body().map_err(|e| TransportError::body(status, e))?;
		let payload = decode(status, &bytes)?;

		classify::classify(payload)
	}

	fn dispatch(
		&self,
		verb: Verb,
		path: &str,
		params: Option<&Params>,
		body: Option<Vec<u8>>,
	) -> Result<C::Response> {
		let mut url = self.resolve(path)?;

		if let Some(params) = params.filter(|params| !params.is_empty()) {
			url.query_pairs_mut().extend_pairs(params.iter());
		}

		let mut request = ApiRequest::new(verb, url);

		if let Some(body) = body {
			request = request.with_body(body);
		}

		self.transport.send(request)
	}
}
#[cfg(feature = "reqwest")]
impl Requester<ReqwestHttpClient> {
	/// Creates a requester with the default configuration and reqwest transport.
	pub fn new(credential: impl Into<Credential>) -> Result<Self> {
		Ok(RequesterBuilder::new(credential).build()?)
	}

	/// Starts a builder for a reqwest-backed requester.
	pub fn builder(credential: impl Into<Credential>) -> RequesterBuilder {
		RequesterBuilder::new(credential)
	}
}
impl<C> Debug for Requester<C>
where
	C: HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Requester")
			.field("endpoint", &self.endpoint.as_str())
			.field("transport", &self.transport)
			.finish()
	}
}

fn encode<B>(data: &B) -> Result<Vec<u8>, PayloadError>
where
	B: ?Sized + Serialize,
{
	serde_json::to_vec(data).map_err(PayloadError::Encode)
}

fn decode(status: u16, bytes: &[u8]) -> Result<Value, PayloadError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(bytes).map_err(|source| PayloadError::Json { status, source })
}
