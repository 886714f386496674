//! Authorization strategies that decorate outgoing requests.
//!
//! A strategy is chosen once from a [`Credential`] and never changes afterwards. Its only job is
//! to attach the `Authorization` header; it performs no I/O and holds no other state.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{Credential, Secret},
	error::ConfigError,
	http::{ApiRequest, AUTHORIZATION},
};

/// HTTP Basic authentication from a login/password pair.
#[derive(Clone, Debug)]
pub struct BasicAuth {
	login: String,
	header: Secret,
}
impl BasicAuth {
	fn new(login: String, password: &Secret) -> Self {
		let encoded = STANDARD.encode(format!("{login}:{}", password.expose()));

		Self { login, header: Secret::new(format!("Basic {encoded}")) }
	}

	/// Login the header was derived from.
	pub fn login(&self) -> &str {
		&self.login
	}
}

/// Bearer-token authentication.
#[derive(Clone, Debug)]
pub struct TokenAuth {
	header: Secret,
}
impl TokenAuth {
	fn new(token: &Secret) -> Self {
		Self { header: Secret::new(format!("Bearer {}", token.expose())) }
	}
}

/// Authorization strategy owned by a single requester.
#[derive(Clone, Debug)]
pub enum AuthStrategy {
	/// Login/password credentials.
	Basic(BasicAuth),
	/// Bearer token credentials.
	Token(TokenAuth),
}
impl AuthStrategy {
	/// Validates the credential and derives the matching strategy.
	pub fn from_credential(credential: Credential) -> Result<Self, ConfigError> {
		credential.validate()?;

		Ok(match credential {
			Credential::Basic { login, password } => Self::Basic(BasicAuth::new(login, &password)),
			Credential::Token(token) => Self::Token(TokenAuth::new(&token)),
		})
	}

	/// Returns the authorization scheme label.
	pub const fn scheme(&self) -> &'static str {
		match self {
			Self::Basic(_) => "Basic",
			Self::Token(_) => "Bearer",
		}
	}

	/// Full `Authorization` header value.
	pub fn header_value(&self) -> &Secret {
		match self {
			Self::Basic(auth) => &auth.header,
			Self::Token(auth) => &auth.header,
		}
	}

	/// Attaches the authorization header, replacing any existing one.
	pub fn authorize(&self, mut request: ApiRequest) -> ApiRequest {
		request.set_header(AUTHORIZATION, self.header_value().expose());

		request
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::Verb;

	fn request() -> ApiRequest {
		let url = Url::parse("https://api.example.com/api/remap/1.2/entity/country")
			.expect("Fixture URL should parse.");

		ApiRequest::new(Verb::Get, url)
	}

	#[test]
	fn basic_strategy_encodes_login_and_password() {
		let strategy = AuthStrategy::from_credential(("user", "pass").into())
			.expect("Basic credential should be accepted.");
		let request = strategy.authorize(request());

		assert!(matches!(strategy, AuthStrategy::Basic(ref auth) if auth.login() == "user"));
		assert_eq!(strategy.scheme(), "Basic");
		assert_eq!(request.header("authorization"), Some("Basic dXNlcjpwYXNz"));
	}

	#[test]
	fn token_strategy_sets_bearer_header() {
		let strategy =
			AuthStrategy::from_credential("abc123".into()).expect("Token should be accepted.");
		let request = strategy.authorize(request());

		assert_eq!(strategy.scheme(), "Bearer");
		assert_eq!(request.header("Authorization"), Some("Bearer abc123"));
	}

	#[test]
	fn authorize_replaces_existing_header_and_keeps_the_rest() {
		let strategy =
			AuthStrategy::from_credential("abc123".into()).expect("Token should be accepted.");
		let mut original = request();

		original.set_header("authorization", "Bearer stale");
		original.set_header("x-trace", "1");

		let request = strategy.authorize(original);

		assert_eq!(request.header("authorization"), Some("Bearer abc123"));
		assert_eq!(request.header("x-trace"), Some("1"));
		assert_eq!(request.headers.len(), 2);
		assert_eq!(request.verb, Verb::Get);
	}

	#[test]
	fn malformed_credentials_fail_fast() {
		let err = AuthStrategy::from_credential(Credential::token(""))
			.expect_err("Empty tokens must be rejected.");

		assert!(matches!(err, ConfigError::InvalidCredential { .. }));
	}
}
