//! Worker threads for manifest and page loads.
//!
//! Each request runs on its own short-lived thread and reports back over a
//! single channel. Responses carry the [`Ticket`] they were issued with so
//! the UI thread can drop the ones a newer request superseded.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use kbseek_core::{FetchedPage, LoadError, ManifestError, PageRecord, Ticket, parse_manifest};
use tracing::{debug, trace, warn};

use crate::host::SiteSource;

/// Response of a worker thread.
#[derive(Debug)]
pub(crate) enum LoadMessage {
	Manifest {
		ticket: Ticket,
		result: Result<Vec<PageRecord>, ManifestError>,
	},
	Page {
		ticket: Ticket,
		url: String,
		result: Result<FetchedPage, LoadError>,
	},
}

const WORKER_PANICKED: &str = "load worker panicked";

/// Sends exactly one message per worker. A worker that unwinds before
/// reporting sends the failure it was created with, so `in_flight` always
/// drops back.
struct Report {
	tx: Sender<LoadMessage>,
	fallback: Option<LoadMessage>,
}

impl Report {
	fn new(tx: Sender<LoadMessage>, fallback: LoadMessage) -> Self {
		Self {
			tx,
			fallback: Some(fallback),
		}
	}

	fn send(mut self, message: LoadMessage) {
		self.fallback = None;
		let _ = self.tx.send(message);
	}
}

impl Drop for Report {
	fn drop(&mut self) {
		if let Some(message) = self.fallback.take() {
			warn!("load worker exited without a response");
			let _ = self.tx.send(message);
		}
	}
}

/// Channel pair shared by every load worker.
pub(crate) struct LoadRuntime {
	source: Arc<dyn SiteSource>,
	tx: Sender<LoadMessage>,
	rx: Receiver<LoadMessage>,
	in_flight: usize,
}

impl LoadRuntime {
	pub(crate) fn new(source: Arc<dyn SiteSource>) -> Self {
		let (tx, rx) = mpsc::channel();
		Self {
			source,
			tx,
			rx,
			in_flight: 0,
		}
	}

	/// Fetch and decode the manifest in the background.
	pub(crate) fn spawn_manifest(&mut self, ticket: Ticket) {
		let source = Arc::clone(&self.source);
		let report = Report::new(
			self.tx.clone(),
			LoadMessage::Manifest {
				ticket,
				result: Err(ManifestError::Unavailable {
					reason: WORKER_PANICKED.to_string(),
				}),
			},
		);
		self.in_flight += 1;
		thread::spawn(move || {
			let result = source
				.manifest()
				.and_then(|bytes| parse_manifest(&bytes));
			trace!(%ticket, ok = result.is_ok(), "manifest worker finished");
			report.send(LoadMessage::Manifest { ticket, result });
		});
	}

	/// Fetch the article at `url` in the background.
	pub(crate) fn spawn_page(&mut self, ticket: Ticket, url: String) {
		let source = Arc::clone(&self.source);
		let report = Report::new(
			self.tx.clone(),
			LoadMessage::Page {
				ticket,
				url: url.clone(),
				result: Err(LoadError::Failed {
					url: url.clone(),
					reason: WORKER_PANICKED.to_string(),
				}),
			},
		);
		self.in_flight += 1;
		debug!(%ticket, url = %url, "page worker started");
		thread::spawn(move || {
			let result = source.page(&url);
			report.send(LoadMessage::Page { ticket, url, result });
		});
	}

	pub(crate) fn try_recv(&mut self) -> Result<LoadMessage, TryRecvError> {
		let message = self.rx.try_recv()?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Ok(message)
	}

	#[cfg(test)]
	pub(crate) fn recv_timeout(
		&mut self,
		timeout: std::time::Duration,
	) -> Result<LoadMessage, mpsc::RecvTimeoutError> {
		let message = self.rx.recv_timeout(timeout)?;
		self.in_flight = self.in_flight.saturating_sub(1);
		Ok(message)
	}

	/// Whether any worker has yet to report.
	pub(crate) fn is_busy(&self) -> bool {
		self.in_flight > 0
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	struct Crashing;

	impl SiteSource for Crashing {
		fn manifest(&self) -> Result<Vec<u8>, ManifestError> {
			panic!("manifest reader crashed");
		}

		fn page(&self, _url: &str) -> Result<FetchedPage, LoadError> {
			panic!("page reader crashed");
		}
	}

	#[test]
	fn crashed_page_worker_still_reports() {
		let mut runtime = LoadRuntime::new(Arc::new(Crashing));
		let mut counter = kbseek_core::ticket::TicketCounter::default();
		let ticket = counter.issue();
		runtime.spawn_page(ticket, "/k/a/".into());
		assert!(runtime.is_busy());

		match runtime.recv_timeout(Duration::from_secs(5)) {
			Ok(LoadMessage::Page {
				ticket: reported,
				url,
				result: Err(LoadError::Failed { .. }),
			}) => {
				assert_eq!(reported, ticket);
				assert_eq!(url, "/k/a/");
			}
			other => panic!("unexpected {other:?}"),
		}
		assert!(!runtime.is_busy());
	}

	#[test]
	fn crashed_manifest_worker_reports_unavailable() {
		let mut runtime = LoadRuntime::new(Arc::new(Crashing));
		let ticket = kbseek_core::ticket::TicketCounter::default().issue();
		runtime.spawn_manifest(ticket);
		assert!(matches!(
			runtime.recv_timeout(Duration::from_secs(5)),
			Ok(LoadMessage::Manifest {
				result: Err(ManifestError::Unavailable { .. }),
				..
			})
		));
		assert!(!runtime.is_busy());
	}
}
