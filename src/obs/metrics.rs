// std
use std::time::Duration;
// self
use crate::{http::Verb, obs::RequestOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(verb: Verb, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"moysklad_request_total",
			"verb" => verb.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (verb, outcome);
	}
}

/// Records a delayed admission and emits a debug event (when enabled).
pub fn record_throttle(wait: Duration) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("moysklad_rate_limit_delay_total").increment(1);
	}
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limit reached; delaying call.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = wait;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_features() {
		record_request_outcome(Verb::Get, RequestOutcome::Failure);
		record_throttle(Duration::from_millis(5));
	}
}
