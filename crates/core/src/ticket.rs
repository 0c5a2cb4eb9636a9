//! Correlation ids for asynchronous loads.
//!
//! Every request gets a fresh [`Ticket`]; a response is applied only when it
//! carries the ticket of the latest request.

use std::fmt;

/// Identifier of one asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Issues monotonically increasing tickets and remembers the latest one.
#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
	next: u64,
	latest: Option<Ticket>,
}

impl TicketCounter {
	/// Issue a ticket that supersedes every earlier one.
	pub fn issue(&mut self) -> Ticket {
		self.next += 1;
		let ticket = Ticket(self.next);
		self.latest = Some(ticket);
		ticket
	}

	/// Whether `ticket` is the latest issued and still outstanding.
	#[must_use]
	pub fn matches_latest(&self, ticket: Ticket) -> bool {
		self.latest == Some(ticket)
	}

	/// Mark `ticket` as answered. Returns `false` for stale tickets.
	pub fn settle(&mut self, ticket: Ticket) -> bool {
		if !self.matches_latest(ticket) {
			return false;
		}
		self.latest = None;
		true
	}

	/// Invalidate the outstanding ticket without issuing a new one.
	pub fn abandon(&mut self) {
		self.latest = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_latest_ticket_settles() {
		let mut counter = TicketCounter::default();
		let first = counter.issue();
		let second = counter.issue();
		assert!(first < second);
		assert!(!counter.settle(first));
		assert!(counter.settle(second));
		assert!(!counter.settle(second));
	}

	#[test]
	fn abandoned_ticket_is_stale() {
		let mut counter = TicketCounter::default();
		let ticket = counter.issue();
		counter.abandon();
		assert!(!counter.matches_latest(ticket));
		assert_eq!(ticket.to_string(), "#1");
	}
}
