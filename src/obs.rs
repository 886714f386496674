//! Optional observability helpers for requester calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `moysklad.request` with the `verb` and
//!   `path` fields, plus events for rate-limit delays and server-reported errors.
//! - Enable `metrics` to increment the `moysklad_request_total` counter for every
//!   attempt/success/failure, labeled by `verb` + `outcome`, and the
//!   `moysklad_rate_limit_delay_total` counter for every delayed admission.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a verb call.
	Attempt,
	/// Payload returned to the caller.
	Success,
	/// Error propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
