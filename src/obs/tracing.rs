// self
use crate::{_prelude::*, error::ErrorCode, http::Verb};

/// A span builder used by requester calls.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the verb and resource path.
	pub fn new(verb: Verb, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("moysklad.request", verb = verb.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (verb, path);

			Self {}
		}
	}

	/// Enters the span for the duration of the blocking call.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

/// Emits a warning for a server-reported error that is about to be returned.
pub fn record_api_error(code: &ErrorCode, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%code, error_message = message, "API reported an error.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (code, message);
	}
}
