//! Rate-limited, authenticated dispatch over a single [`HttpClient`].
//!
//! Every request takes exactly one admission from the limiter, receives the fixed JSON headers,
//! and is decorated by the one [`AuthStrategy`] fixed at construction. Nothing here is mutated
//! per call, so a transport can be shared across threads whenever its client can.

// self
use crate::{
	_prelude::*,
	auth::AuthStrategy,
	error::TransportError,
	http::{ACCEPT_ENCODING, ApiRequest, CONTENT_TYPE, HttpClient},
	rate_limit::{RateLimit, RateLimitPolicy, SlidingWindowLimiter},
};

/// Transport that owns the client, the auth strategy, and the quota shared by all verbs.
pub struct RateLimitedTransport<C>
where
	C: HttpClient,
{
	client: C,
	auth: AuthStrategy,
	limiter: Box<dyn RateLimitPolicy>,
}
impl<C> RateLimitedTransport<C>
where
	C: HttpClient,
{
	/// Creates a transport enforcing `rate_limit` with a sliding-window limiter.
	pub fn new(client: C, auth: AuthStrategy, rate_limit: RateLimit) -> Self {
		Self::with_policy(client, auth, SlidingWindowLimiter::new(rate_limit))
	}

	/// Creates a transport with a caller-supplied admission policy.
	pub fn with_policy(
		client: C,
		auth: AuthStrategy,
		limiter: impl 'static + RateLimitPolicy,
	) -> Self {
		Self { client, auth, limiter: Box::new(limiter) }
	}

	/// Underlying HTTP client.
	pub fn client(&self) -> &C {
		&self.client
	}

	/// Authorization strategy applied to every request.
	pub fn auth(&self) -> &AuthStrategy {
		&self.auth
	}

	/// Waits for quota, decorates the request, and executes it.
	pub fn send(&self, mut request: ApiRequest) -> Result<C::Response> {
		self.limiter.acquire();

		request.set_header(CONTENT_TYPE, "application/json");
		request.set_header(ACCEPT_ENCODING, "gzip");

		let request = self.auth.authorize(request);

		self.client.execute(request).map_err(|e| TransportError::network(e).into())
	}
}
impl<C> Debug for RateLimitedTransport<C>
where
	C: HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RateLimitedTransport").field("auth", &self.auth.scheme()).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		convert::Infallible,
		sync::Arc,
		time::{Duration, Instant},
	};
	// self
	use super::*;
	use crate::{
		http::{RawResponse, Verb},
		rate_limit::RateLimitDecision,
	};

	#[derive(Default)]
	struct EchoClient {
		seen: Mutex<Vec<ApiRequest>>,
	}
	impl HttpClient for EchoClient {
		type Response = EchoResponse;
		type TransportError = Infallible;

		fn execute(&self, request: ApiRequest) -> Result<Self::Response, Self::TransportError> {
			self.seen.lock().push(request);

			Ok(EchoResponse)
		}
	}

	struct EchoResponse;
	impl RawResponse for EchoResponse {
		type Error = Infallible;

		fn status_code(&self) -> u16 {
			200
		}

		fn into_body(self) -> Result<Vec<u8>, Self::Error> {
			Ok(Vec::new())
		}
	}

	#[derive(Default)]
	struct CountingPolicy {
		calls: Arc<Mutex<usize>>,
	}
	impl RateLimitPolicy for CountingPolicy {
		fn evaluate(&self, _now: Instant) -> RateLimitDecision {
			*self.calls.lock() += 1;

			RateLimitDecision::Allow
		}
	}

	fn url() -> Url {
		Url::parse("https://api.example.com/api/remap/1.2/entity/country")
			.expect("Fixture URL should parse.")
	}

	#[test]
	fn every_request_gets_fixed_headers_and_one_auth_header() {
		let auth = AuthStrategy::from_credential("abc123".into()).expect("Token should be valid.");
		let transport = RateLimitedTransport::new(EchoClient::default(), auth, RateLimit::default());

		transport.send(ApiRequest::new(Verb::Get, url())).expect("Echo client never fails.");

		let seen = transport.client().seen.lock();
		let request = seen.first().expect("One request should have been dispatched.");

		assert_eq!(request.header("content-type"), Some("application/json"));
		assert_eq!(request.header("accept-encoding"), Some("gzip"));
		assert_eq!(request.header("authorization"), Some("Bearer abc123"));
		assert_eq!(request.headers.len(), 3);
	}

	#[test]
	fn every_verb_draws_from_the_same_quota() {
		let calls = Arc::new(Mutex::new(0));
		let policy = CountingPolicy { calls: calls.clone() };
		let auth = AuthStrategy::from_credential(("user", "pass").into())
			.expect("Basic credential should be valid.");
		let transport = RateLimitedTransport::with_policy(EchoClient::default(), auth, policy);

		for verb in [Verb::Get, Verb::Post, Verb::Put, Verb::Delete] {
			transport.send(ApiRequest::new(verb, url())).expect("Echo client never fails.");
		}

		assert_eq!(*calls.lock(), 4);
		assert_eq!(transport.client().seen.lock().len(), 4);
	}

	#[test]
	fn over_quota_calls_are_delayed() {
		let auth = AuthStrategy::from_credential("abc123".into()).expect("Token should be valid.");
		let policy = RateLimit::new(1, Duration::from_millis(40)).expect("Policy should be valid.");
		let transport = RateLimitedTransport::new(EchoClient::default(), auth, policy);
		let start = Instant::now();

		transport.send(ApiRequest::new(Verb::Get, url())).expect("First call should pass.");
		transport.send(ApiRequest::new(Verb::Get, url())).expect("Second call should pass.");

		assert!(start.elapsed() >= Duration::from_millis(40));
		assert_eq!(transport.client().seen.lock().len(), 2);
	}
}
