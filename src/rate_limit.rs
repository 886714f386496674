//! Client-side admission control for outgoing calls.
//!
//! The remote service allows a fixed number of requests within any rolling window. Calls over
//! the quota are delayed, never rejected: [`RateLimitPolicy::acquire`] blocks the calling thread
//! until a slot opens. A blocked call cannot be cancelled; wrap the requester yourself if you
//! need a deadline.

// std
use std::{
	thread,
	time::{Duration, Instant},
};
// self
use crate::{_prelude::*, error::ConfigError, obs};

/// Fixed admission rule: at most `max_requests` per rolling `window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
	/// Requests admitted per window.
	pub max_requests: u32,
	/// Rolling window length.
	pub window: Duration,
}
impl RateLimit {
	/// Ceiling documented by the remote service: 45 requests per 3 seconds.
	pub const SERVICE_DEFAULT: Self = Self { max_requests: 45, window: Duration::from_secs(3) };

	/// Creates a validated policy.
	pub fn new(max_requests: u32, window: Duration) -> Result<Self, ConfigError> {
		let policy = Self { max_requests, window };

		policy.validate()?;

		Ok(policy)
	}

	/// Rejects policies that could never admit a request.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_requests == 0 || self.window.is_zero() {
			Err(ConfigError::InvalidRateLimit)
		} else {
			Ok(())
		}
	}
}
impl Default for RateLimit {
	fn default() -> Self {
		Self::SERVICE_DEFAULT
	}
}

/// Result emitted by a [`RateLimitPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
	/// The request may proceed immediately; its slot has been recorded.
	Allow,
	/// The request must wait at least this long before asking again.
	Delay(Duration),
}

/// Strategy consulted before every outgoing call.
pub trait RateLimitPolicy
where
	Self: Send + Sync,
{
	/// Evaluates whether a call at `now` may proceed, recording the admission when it may.
	fn evaluate(&self, now: Instant) -> RateLimitDecision;

	/// Blocks the calling thread until a call is admitted and returns the total time waited.
	fn acquire(&self) -> Duration {
		let mut waited = Duration::ZERO;

		loop {
			match self.evaluate(Instant::now()) {
				RateLimitDecision::Allow => return waited,
				RateLimitDecision::Delay(wait) => {
					obs::record_throttle(wait);
					thread::sleep(wait);

					waited = waited.saturating_add(wait);
				},
			}
		}
	}
}

/// Sliding-log limiter: remembers the admission time of the last `max_requests` calls.
///
/// Shared by every verb of one requester. Waiting threads are not queued in order; whichever
/// thread asks first after a slot frees up takes it.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
	policy: RateLimit,
	admitted: Mutex<VecDeque<Instant>>,
}
impl SlidingWindowLimiter {
	/// Creates a limiter for a validated policy.
	pub fn new(policy: RateLimit) -> Self {
		Self { policy, admitted: Mutex::new(VecDeque::with_capacity(policy.max_requests as usize)) }
	}

	/// Policy enforced by this limiter.
	pub fn policy(&self) -> RateLimit {
		self.policy
	}

	/// Number of admissions still inside the window as of `now`.
	pub fn in_flight(&self, now: Instant) -> usize {
		let mut admitted = self.admitted.lock();

		self.expire(&mut admitted, now);

		admitted.len()
	}

	fn expire(&self, admitted: &mut VecDeque<Instant>, now: Instant) {
		while let Some(oldest) = admitted.front() {
			if now.saturating_duration_since(*oldest) >= self.policy.window {
				admitted.pop_front();
			} else {
				break;
			}
		}
	}
}
impl RateLimitPolicy for SlidingWindowLimiter {
	fn evaluate(&self, now: Instant) -> RateLimitDecision {
		let mut admitted = self.admitted.lock();

		self.expire(&mut admitted, now);

		if admitted.len() < self.policy.max_requests as usize {
			admitted.push_back(now);

			return RateLimitDecision::Allow;
		}

		// A window too long to add onto an `Instant` waits for the whole window.
		let wait = admitted
			.front()
			.and_then(|oldest| oldest.checked_add(self.policy.window))
			.map_or(self.policy.window, |frees_at| frees_at.saturating_duration_since(now));

		RateLimitDecision::Delay(wait)
	}
}
