use std::time::{Duration, Instant};

/// A single pending value that becomes due after a quiet period.
///
/// Scheduling replaces whatever was pending. Time is passed in by the caller
/// so the owner decides how it is driven (event loop tick, timer, tests).
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
	delay: Duration,
	pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
		}
	}

	/// Schedule `value`. With a zero delay the value is returned right away
	/// and nothing is kept pending.
	pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
		if self.delay.is_zero() {
			self.pending = None;
			return Some(value);
		}
		self.pending = Some((now + self.delay, value));
		None
	}

	/// Drop the pending value, if any.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// When the pending value becomes due.
	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|(due, _)| *due)
	}

	/// Take the pending value once it is due.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		match &self.pending {
			Some((due, _)) if *due <= now => self.pending.take().map(|(_, value)| value),
			_ => None,
		}
	}
}
