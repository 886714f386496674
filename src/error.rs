//! Client-level error types shared by the transport, classifier, and requester.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request or response payload could not be encoded or decoded.
	#[error(transparent)]
	Payload(#[from] PayloadError),

	/// Server rejected the supplied credentials.
	#[error("Authentication failed: {message}")]
	Auth {
		/// Server-supplied message.
		message: String,
	},
	/// Server refused the call because its own request ceiling was hit.
	#[error("Server-side rate limit exceeded: {message}")]
	RateLimited {
		/// Server-supplied message.
		message: String,
	},
	/// Any other server-reported error.
	#[error("API error {code}: {message}")]
	Api {
		/// Server-supplied message.
		message: String,
		/// Original error code, kept as received.
		code: ErrorCode,
		/// Link to the server documentation for this error, when supplied.
		more_info: Option<String>,
		/// Request parameter the server blamed, when supplied.
		parameter: Option<String>,
	},
}
impl Error {
	/// Returns the server error code for [`Error::Api`].
	pub fn code(&self) -> Option<&ErrorCode> {
		match self {
			Self::Api { code, .. } => Some(code),
			_ => None,
		}
	}
}

/// Server error code, numeric or textual depending on the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
	/// Numeric code (the common case).
	Number(i64),
	/// Textual code.
	Text(String),
}
impl ErrorCode {
	/// Numeric view of the code; textual codes holding an integer are parsed.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Number(value) => Some(*value),
			Self::Text(value) => value.trim().parse().ok(),
		}
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Number(value) => write!(f, "{value}"),
			Self::Text(value) => f.write_str(value),
		}
	}
}
impl From<i64> for ErrorCode {
	fn from(value: i64) -> Self {
		Self::Number(value)
	}
}
impl From<&str> for ErrorCode {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base endpoint cannot be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base endpoint uses a scheme other than HTTP(S) or cannot hold relative paths.
	#[error("Endpoint `{url}` must be an http(s) base URL.")]
	UnsupportedEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Resource path cannot be joined onto the endpoint.
	#[error("Resource path `{path}` is invalid.")]
	InvalidPath {
		/// Offending resource path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Resource path resolves outside of the base endpoint.
	#[error("Resource path `{path}` escapes the endpoint `{endpoint}`.")]
	PathOutsideEndpoint {
		/// Offending resource path.
		path: String,
		/// Base endpoint the path must stay under.
		endpoint: String,
	},
	/// Credential contents are unusable.
	#[error("Credential is invalid: {reason}.")]
	InvalidCredential {
		/// Which rule was violated.
		reason: &'static str,
	},
	/// Rate limit admits nothing.
	#[error("Rate limit must admit at least one request per non-empty window.")]
	InvalidRateLimit,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Response body could not be read to completion.
	#[error("Response body could not be read (HTTP {status}).")]
	Body {
		/// HTTP status of the response whose body failed.
		status: u16,
		/// Transport-specific read error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific body read error.
	pub fn body(status: u16, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Body { status, source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Payload encoding/decoding failures.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Request body could not be serialized.
	#[error("Request body could not be serialized to JSON.")]
	Encode(#[source] serde_json::Error),
	/// Response body is not valid JSON.
	#[error("Response body is not valid JSON (HTTP {status}).")]
	Json {
		/// HTTP status of the response.
		status: u16,
		/// Parser failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response carries an `errors` field that cannot be interpreted.
	#[error("Response carries a malformed `errors` field: {reason}.")]
	MalformedErrors {
		/// What was wrong with the field.
		reason: &'static str,
	},
	/// Decoded JSON does not match the expected entity shape.
	#[error("Response does not match the `{entity}` shape.")]
	Entity {
		/// Entity path that was being decoded.
		entity: &'static str,
		/// Structured decoding failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn error_code_reads_numeric_and_textual_forms() {
		let number: ErrorCode =
			serde_json::from_str("1056").expect("Numeric code should deserialize.");
		let text: ErrorCode =
			serde_json::from_str("\"1049\"").expect("Textual code should deserialize.");
		let word: ErrorCode =
			serde_json::from_str("\"forbidden\"").expect("Word code should deserialize.");

		assert_eq!(number, ErrorCode::Number(1056));
		assert_eq!(text.as_i64(), Some(1049));
		assert_eq!(word.as_i64(), None);
		assert_eq!(word.to_string(), "forbidden");
	}

	#[test]
	fn api_error_display_keeps_code_and_message() {
		let err = Error::Api {
			message: "Unknown".into(),
			code: 9999.into(),
			more_info: None,
			parameter: None,
		};

		assert_eq!(err.to_string(), "API error 9999: Unknown");
		assert_eq!(err.code(), Some(&ErrorCode::Number(9999)));
		assert!(Error::Auth { message: "Invalid login".into() }.code().is_none());
	}
}
