//! In-place article replacement with stale-response protection.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::document::PageContent;
use crate::ticket::{Ticket, TicketCounter};

/// Body of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedPage {
	Article(PageContent),
	/// The response had no article to show.
	NoArticle,
}

/// Result of applying a fetch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
	/// A newer load superseded this one; nothing changed.
	Stale,
	/// The article was replaced. `title` is the new document title, when the
	/// page has a level-one heading.
	Replaced { title: Option<String> },
	/// The response carried no article; the old one stays.
	Unchanged,
	/// The load failed and the previous article is shown again.
	Restored,
}

/// Article currently shown and the load in flight, if any.
#[derive(Debug)]
pub struct ContentSwap {
	site_title: String,
	current: Option<PageContent>,
	document_title: Option<String>,
	active_url: Option<String>,
	loading: Option<(Ticket, String)>,
	tickets: TicketCounter,
	history: Vec<String>,
}

impl ContentSwap {
	#[must_use]
	pub fn new(site_title: impl Into<String>) -> Self {
		Self {
			site_title: site_title.into(),
			current: None,
			document_title: None,
			active_url: None,
			loading: None,
			tickets: TicketCounter::default(),
			history: Vec::new(),
		}
	}

	/// Start loading `url`: the loading indicator is shown and the link to
	/// `url` becomes active. The response must be passed back with the
	/// returned ticket.
	pub fn begin(&mut self, url: impl Into<String>) -> Ticket {
		let url = url.into();
		let ticket = self.tickets.issue();
		debug!(%ticket, url = %url, "content load started");
		self.active_url = Some(url.clone());
		self.loading = Some((ticket, url));
		ticket
	}

	/// Apply the response to the load identified by `ticket`.
	pub fn complete<E: Display>(
		&mut self,
		ticket: Ticket,
		response: Result<FetchedPage, E>,
	) -> SwapOutcome {
		if !self.tickets.settle(ticket) {
			debug!(%ticket, "discarding stale content response");
			return SwapOutcome::Stale;
		}
		let url = self.loading.take().map(|(_, url)| url).unwrap_or_default();
		match response {
			Ok(FetchedPage::Article(page)) => {
				let title = page.first_h1().map(|h1| self.format_title(h1));
				if title.is_some() {
					self.document_title.clone_from(&title);
				}
				self.current = Some(page);
				self.history.push(url);
				SwapOutcome::Replaced { title }
			}
			Ok(FetchedPage::NoArticle) => {
				debug!(url = %url, "response had no article");
				SwapOutcome::Unchanged
			}
			Err(error) => {
				warn!(url = %url, %error, "content load failed");
				SwapOutcome::Restored
			}
		}
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loading.is_some()
	}

	#[must_use]
	pub fn current(&self) -> Option<&PageContent> {
		self.current.as_ref()
	}

	#[must_use]
	pub fn document_title(&self) -> Option<&str> {
		self.document_title.as_deref()
	}

	#[must_use]
	pub fn active_url(&self) -> Option<&str> {
		self.active_url.as_deref()
	}

	/// URLs pushed to the history, oldest first.
	#[must_use]
	pub fn history(&self) -> &[String] {
		&self.history
	}

	fn format_title(&self, h1: &str) -> String {
		format!("{} - {}", h1.trim(), self.site_title)
	}
}
