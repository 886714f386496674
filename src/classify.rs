//! Detection and classification of server errors embedded in decoded response bodies.
//!
//! The API reports failures inside the JSON payload as an `errors` list of
//! `{"code": ..., "error": "..."}` objects, on a single object or on elements of an array. Only
//! the first error of the first error-bearing object is surfaced; the rest are dropped.

// self
use crate::{
	_prelude::*,
	error::{ErrorCode, PayloadError},
	obs,
};

/// Error kinds with a dedicated [`Error`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
	/// Credentials were rejected.
	Auth,
	/// The server-side request ceiling was hit.
	RateLimited,
}
impl ApiErrorKind {
	/// Looks up the kind mapped to a server code.
	pub fn for_code(code: &ErrorCode) -> Option<Self> {
		let value = code.as_i64()?;

		ERROR_CODES.iter().find(|(known, _)| *known == value).map(|(_, kind)| *kind)
	}
}

/// Fixed code table. Codes missing here surface as [`Error::Api`].
pub const ERROR_CODES: &[(i64, ApiErrorKind)] = &[
	(1001, ApiErrorKind::Auth),
	(1056, ApiErrorKind::Auth),
	(1049, ApiErrorKind::RateLimited),
	(1073, ApiErrorKind::RateLimited),
];

/// One entry of a server `errors` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
	/// Machine-readable code.
	pub code: ErrorCode,
	/// Human-readable message.
	#[serde(rename = "error")]
	pub message: String,
	/// Link to the documentation for this code.
	#[serde(default)]
	pub more_info: Option<String>,
	/// Request parameter the error refers to.
	#[serde(default)]
	pub parameter: Option<String>,
}
impl ApiErrorEntry {
	/// Converts the entry into the mapped [`Error`] variant.
	pub fn into_error(self) -> Error {
		match ApiErrorKind::for_code(&self.code) {
			Some(ApiErrorKind::Auth) => Error::Auth { message: self.message },
			Some(ApiErrorKind::RateLimited) => Error::RateLimited { message: self.message },
			None => Error::Api {
				message: self.message,
				code: self.code,
				more_info: self.more_info,
				parameter: self.parameter,
			},
		}
	}
}

/// Returns the error that should be surfaced for `body`, if any.
///
/// For arrays the first element carrying an `errors` field is used, whatever its position.
pub fn find_error(body: &Value) -> Result<Option<ApiErrorEntry>, PayloadError> {
	let carrier = match body {
		Value::Array(items) => items.iter().find(|item| carries_errors(item)),
		Value::Object(_) if carries_errors(body) => Some(body),
		_ => None,
	};
	let Some(carrier) = carrier else {
		return Ok(None);
	};
	let first = carrier
		.get("errors")
		.and_then(Value::as_array)
		.ok_or(PayloadError::MalformedErrors { reason: "`errors` is not an array" })?
		.first()
		.ok_or(PayloadError::MalformedErrors { reason: "`errors` is empty" })?;
	let entry = ApiErrorEntry::deserialize(first).map_err(|_| PayloadError::MalformedErrors {
		reason: "error entry lacks a `code` or an `error` message",
	})?;

	Ok(Some(entry))
}

/// Passes `body` through unchanged, or returns the error it carries.
pub fn classify(body: Value) -> Result<Value> {
	match find_error(&body)? {
		Some(entry) => {
			obs::record_api_error(&entry.code, &entry.message);

			Err(entry.into_error())
		},
		None => Ok(body),
	}
}

fn carries_errors(value: &Value) -> bool {
	value.get("errors").is_some_and(|errors| !errors.is_null())
}
