//! Fixed-delay retry for calls whose answer may be valid but empty.

use std::{future::Future, time::Duration};

/// Answers that can succeed without carrying data
pub trait MaybeEmpty {
	fn is_empty_result(&self) -> bool {
		false
	}
}

impl<T> MaybeEmpty for Vec<T> {
	fn is_empty_result(&self) -> bool {
		self.is_empty()
	}
}

impl MaybeEmpty for u64 {}

/// Retry policy: up to `max_attempts` calls, `delay` apart. Errors and empty
/// answers are both retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	pub max_attempts: u32,
	pub delay: Duration,
}

/// Last answer of a retried call and the number of calls made
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
	pub result: Result<T, E>,
	pub attempts: u32,
}

impl<T: MaybeEmpty, E> RetryOutcome<T, E> {
	/// Whether the call ended with data
	pub fn succeeded(&self) -> bool {
		matches!(&self.result, Ok(value) if !value.is_empty_result())
	}
}

impl RetryPolicy {
	pub fn new(max_attempts: u32, delay: Duration) -> Self {
		Self {
			max_attempts,
			delay,
		}
	}

	/// Calls `operation` until it returns non-empty data or attempts run out
	pub async fn run<F, Fut, T, E>(&self, mut operation: F) -> RetryOutcome<T, E>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<T, E>>,
		T: MaybeEmpty,
		E: std::fmt::Display,
	{
		let max_attempts = self.max_attempts.max(1);
		let mut attempt = 0;
		loop {
			attempt += 1;
			let result = operation().await;
			match &result {
				Ok(value) if !value.is_empty_result() => {
					return RetryOutcome {
						result,
						attempts: attempt,
					}
				}
				Ok(_) => tracing::debug!(attempt, "empty answer"),
				Err(e) => tracing::debug!(attempt, error = %e, "attempt failed"),
			}

			if attempt >= max_attempts {
				return RetryOutcome {
					result,
					attempts: attempt,
				};
			}
			if !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}
		}
	}
}
