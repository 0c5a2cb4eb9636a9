use std::sync::mpsc::TryRecvError;

use kbseek_core::{FetchedPage, LoadError, ManifestOutcome, NavTree, SwapOutcome, Ticket, TreeState};
use tracing::debug;

use super::LoadMessage;
use crate::app::state::App;

impl<'a> App<'a> {
	/// Kick off the initial manifest and article loads, and run the query
	/// the browser was opened with.
	pub fn start(&mut self) {
		self.request_manifest();
		let start_page = self.options.start_page.clone();
		self.request_page(start_page);
		if !self.search_input.text().is_empty() {
			self.query_changed(std::time::Instant::now());
		}
	}

	pub(crate) fn request_manifest(&mut self) {
		let ticket = self.controller.begin_manifest_load();
		self.loads.spawn_manifest(ticket);
	}

	/// Swap the article for the page at `url`.
	pub(crate) fn request_page(&mut self, url: String) {
		let ticket = self.content.begin(url.clone());
		if let Some(tree) = self.tree.tree_mut() {
			tree.set_active(&url);
		}
		self.loads.spawn_page(ticket, url);
	}

	/// Drain responses waiting on the load channel.
	pub(crate) fn pump_loads(&mut self) {
		loop {
			match self.loads.try_recv() {
				Ok(message) => self.handle_load(message),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
	}

	pub(crate) fn handle_load(&mut self, message: LoadMessage) {
		match message {
			LoadMessage::Manifest { ticket, result } => {
				let outcome = self.controller.manifest_loaded(ticket, result);
				self.apply_manifest_outcome(outcome);
			}
			LoadMessage::Page { ticket, url, result } => self.apply_page(ticket, &url, result),
		}
	}

	fn apply_manifest_outcome(&mut self, outcome: ManifestOutcome) {
		// A declared structure does not depend on the manifest.
		if self.options.navigation.is_some() {
			return;
		}
		match outcome {
			ManifestOutcome::Stale => {}
			ManifestOutcome::Applied => {
				let tree = NavTree::from_manifest(
					self.controller.manifest(),
					self.current_url(),
					&self.options.knowledge_prefix,
				);
				self.tree = TreeState::Ready(tree);
				self.sync_navigation();
			}
			ManifestOutcome::Failed => self.tree = TreeState::Unavailable,
		}
	}

	fn apply_page(&mut self, ticket: Ticket, url: &str, result: Result<FetchedPage, LoadError>) {
		match self.content.complete(ticket, result) {
			SwapOutcome::Replaced { title } => {
				debug!(url, ?title, "article replaced");
				if let Some(page) = self.content.current() {
					self.controller.set_page(page.clone());
				}
				self.article.reset();
				if let Some(tree) = self.tree.tree_mut() {
					tree.set_active(url);
				}
			}
			SwapOutcome::Restored | SwapOutcome::Unchanged | SwapOutcome::Stale => {}
		}
	}

	/// Feed the sidebar links to the index.
	pub(crate) fn sync_navigation(&mut self) {
		if let Some(tree) = self.tree.tree() {
			self.controller.set_navigation(tree.links());
		}
	}

	/// Path of the page on screen, or being loaded.
	pub(crate) fn current_url(&self) -> &str {
		self.content
			.active_url()
			.unwrap_or(self.options.start_page.as_str())
	}

	/// Block until the outstanding loads report, applying each response.
	#[cfg(test)]
	pub(crate) fn settle_loads(&mut self) {
		while self.loads.is_busy() {
			match self.loads.recv_timeout(std::time::Duration::from_secs(5)) {
				Ok(message) => self.handle_load(message),
				Err(_) => break,
			}
		}
	}
}
