//! Credential input accepted at construction time, plus a redacting secret wrapper.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted secret wrapper keeping passwords, tokens, and header values out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Credential supplied once per requester.
///
/// A `(login, password)` pair selects HTTP Basic authentication; a single string selects
/// bearer-token authentication. The variant is fixed for the lifetime of the requester.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
	/// Login/password pair sent as HTTP Basic credentials.
	Basic {
		/// Account login, usually `user@company`.
		login: String,
		/// Account password.
		password: Secret,
	},
	/// Access token sent as `Authorization: Bearer <token>`.
	Token(Secret),
}
impl Credential {
	/// Builds a login/password credential.
	pub fn basic(login: impl Into<String>, password: impl Into<String>) -> Self {
		Self::Basic { login: login.into(), password: Secret::new(password) }
	}

	/// Builds a bearer-token credential.
	pub fn token(token: impl Into<String>) -> Self {
		Self::Token(Secret::new(token))
	}

	/// Checks the credential contents before any request is built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match self {
			Self::Basic { login, password } => {
				if login.is_empty() {
					return Err(ConfigError::InvalidCredential { reason: "login is empty" });
				}
				if login.contains(':') {
					return Err(ConfigError::InvalidCredential { reason: "login contains `:`" });
				}
				if has_control(login) || has_control(password.expose()) {
					return Err(ConfigError::InvalidCredential {
						reason: "login or password contains control characters",
					});
				}
			},
			Self::Token(token) => {
				let view = token.expose();

				if view.is_empty() {
					return Err(ConfigError::InvalidCredential { reason: "token is empty" });
				}
				if view.chars().any(char::is_whitespace) || has_control(view) {
					return Err(ConfigError::InvalidCredential {
						reason: "token contains whitespace or control characters",
					});
				}
			},
		}

		Ok(())
	}
}
impl<L, P> From<(L, P)> for Credential
where
	L: Into<String>,
	P: Into<String>,
{
	fn from((login, password): (L, P)) -> Self {
		Self::basic(login, password)
	}
}
impl From<&str> for Credential {
	fn from(token: &str) -> Self {
		Self::token(token)
	}
}
impl From<String> for Credential {
	fn from(token: String) -> Self {
		Self::token(token)
	}
}

fn has_control(value: &str) -> bool {
	value.chars().any(char::is_control)
}
