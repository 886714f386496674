//! Transport primitives for API calls.
//!
//! The module exposes [`HttpClient`] and [`RawResponse`] so downstream crates can plug in a
//! custom blocking HTTP stack. Requests are described as plain [`ApiRequest`] data; the client
//! only has to execute them and hand back something that yields a status and body bytes.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "authorization";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "content-type";
/// `Accept-Encoding` header name.
pub const ACCEPT_ENCODING: &str = "accept-encoding";

/// HTTP verbs issued by the requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Verb {
	/// Returns the method token, also used as a span/metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Verb::Get => "GET",
			Verb::Post => "POST",
			Verb::Put => "PUT",
			Verb::Delete => "DELETE",
		}
	}
}
impl Display for Verb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// An outgoing request described as plain data.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP verb.
	pub verb: Verb,
	/// Absolute URL, query string included.
	pub url: Url,
	/// Header pairs; names are stored lowercase and unique.
	pub headers: Vec<(String, String)>,
	/// Serialized JSON body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request without headers or body.
	pub fn new(verb: Verb, url: Url) -> Self {
		Self { verb, url, headers: Vec::new(), body: None }
	}

	/// Attaches a serialized body.
	pub fn with_body(mut self, body: Vec<u8>) -> Self {
		self.body = Some(body);

		self
	}

	/// Sets a header, replacing any previous value under the same (case-insensitive) name.
	pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
		let name = name.to_ascii_lowercase();
		let value = value.into();

		match self.headers.iter_mut().find(|(key, _)| *key == name) {
			Some((_, slot)) => *slot = value,
			None => self.headers.push((name, value)),
		}
	}

	/// Looks up a header value by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(name, value)| {
				let shown = if name == AUTHORIZATION { "<redacted>" } else { value.as_str() };

				(name.as_str(), shown)
			})
			.collect::<Vec<_>>();

		f.debug_struct("ApiRequest")
			.field("verb", &self.verb)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Response handed back by an [`HttpClient`].
///
/// `get_raw` returns this value untouched; every other call reads the status and body.
pub trait RawResponse {
	/// Error raised while reading the body.
	type Error: 'static + Send + Sync + StdError;

	/// HTTP status code.
	fn status_code(&self) -> u16;

	/// Consumes the response and returns the (decompressed) body bytes.
	fn into_body(self) -> Result<Vec<u8>, Self::Error>;
}

/// Abstraction over blocking HTTP transports.
///
/// Implementations must be `Send + Sync + 'static` so one requester can be shared across
/// threads. They must not retry: network failures are surfaced as-is.
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;
	/// Response type returned by [`HttpClient::execute`].
	type Response: RawResponse;

	/// Executes one request.
	fn execute(&self, request: ApiRequest) -> Result<Self::Response, Self::TransportError>;
}

/// Thin wrapper around the blocking [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The client keeps one connection pool for the lifetime of the requester and decodes gzip
/// bodies transparently.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	type Response = reqwest::blocking::Response;
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> Result<Self::Response, Self::TransportError> {
		let method = match request.verb {
			Verb::Get => reqwest::Method::GET,
			Verb::Post => reqwest::Method::POST,
			Verb::Put => reqwest::Method::PUT,
			Verb::Delete => reqwest::Method::DELETE,
		};
		let mut builder = self.0.request(method, request.url);

		for (name, value) in request.headers {
			builder = builder.header(name, value);
		}
		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		builder.send()
	}
}
#[cfg(feature = "reqwest")]
impl RawResponse for reqwest::blocking::Response {
	type Error = ReqwestError;

	fn status_code(&self) -> u16 {
		self.status().as_u16()
	}

	fn into_body(self) -> Result<Vec<u8>, Self::Error> {
		Ok(self.bytes()?.to_vec())
	}
}
