//! The search box state machine.
//!
//! [`SearchController`] owns the index, the executed query, the result list
//! and the selection cursor. Hosts feed it input events together with the
//! current time and apply the [`Effect`]s it hands back.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::debounce::Debouncer;
use crate::document::{NavLink, PageContent};
use crate::entry::{Locator, NodeId};
use crate::error::ManifestError;
use crate::index::{IndexBuilder, IndexOptions, SearchIndex};
use crate::manifest::PageRecord;
use crate::render::DropdownView;
use crate::search::{SearchOptions, search};
use crate::selection::Selection;
use crate::ticket::{Ticket, TicketCounter};

/// Default quiet period between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);
/// How long a node jumped to from a result stays highlighted.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(2000);

/// Host elements the search box needs. A missing anchor disables the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
	pub search_input: bool,
	pub dropdown: bool,
	pub tree: bool,
}

impl Anchors {
	/// Every anchor present.
	#[must_use]
	pub const fn all() -> Self {
		Self {
			search_input: true,
			dropdown: true,
			tree: true,
		}
	}
}

/// Optional host features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
	/// The host can swap page content in place instead of navigating.
	pub navigation_hook: bool,
}

/// Behavioral knobs of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
	pub search: SearchOptions,
	pub index: IndexOptions,
	/// Zero runs every query immediately.
	pub debounce: Duration,
	pub highlight: Duration,
	/// Commit the only result on Enter even when nothing is selected.
	pub auto_select_single: bool,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			search: SearchOptions::default(),
			index: IndexOptions::default(),
			debounce: DEFAULT_DEBOUNCE,
			highlight: DEFAULT_HIGHLIGHT,
			auto_select_single: false,
		}
	}
}

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	ArrowDown,
	ArrowUp,
	Enter,
	Escape,
}

/// Side effects the host must perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
	/// Swap the article for another page through the navigation hook.
	LoadContent { url: String },
	/// Full navigation to another page.
	Navigate { url: String },
	/// Scroll the node to the middle of the viewport, smoothly.
	ScrollIntoView { node: NodeId },
	Highlight { node: NodeId },
	ClearHighlight { node: NodeId },
	/// Empty the search input.
	ClearInput,
	/// Drop keyboard focus from the search input.
	ReleaseFocus,
}

/// What became of a manifest response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestOutcome {
	/// A newer load was started; the response was dropped.
	Stale,
	/// The manifest entries are now part of the index.
	Applied,
	/// The manifest could not be used; the index keeps its other sources.
	Failed,
}

/// Content the index is built from. Kept so the index can be rebuilt
/// wholesale whenever one source changes.
#[derive(Debug, Clone, Default)]
pub struct IndexSources {
	pub navigation: Vec<NavLink>,
	pub page: Option<PageContent>,
	pub manifest: Vec<PageRecord>,
}

impl IndexSources {
	#[must_use]
	pub fn build(&self, options: IndexOptions) -> SearchIndex {
		let mut builder = IndexBuilder::new(options).navigation(&self.navigation);
		if let Some(page) = &self.page {
			builder = builder.document(page);
		}
		builder.manifest(&self.manifest).build()
	}
}

#[derive(Debug)]
pub struct SearchController {
	config: SearchConfig,
	capabilities: HostCapabilities,
	sources: IndexSources,
	index: SearchIndex,
	/// Query of the current result list; empty while hidden.
	query: String,
	results: Vec<usize>,
	selection: Selection,
	visible: bool,
	debouncer: Debouncer<String>,
	highlights: Vec<(Instant, NodeId)>,
	manifest_loads: TicketCounter,
}

impl SearchController {
	/// Attach the search box, or `None` when the host lacks the input or the
	/// dropdown.
	#[must_use]
	pub fn initialize(
		anchors: Anchors,
		capabilities: HostCapabilities,
		config: SearchConfig,
		sources: IndexSources,
	) -> Option<Self> {
		if !anchors.search_input || !anchors.dropdown {
			debug!(?anchors, "search anchors missing; search disabled");
			return None;
		}
		let index = sources.build(config.index);
		debug!(entries = index.len(), "search initialized");
		Some(Self {
			config,
			capabilities,
			sources,
			index,
			query: String::new(),
			results: Vec::new(),
			selection: Selection::default(),
			visible: false,
			debouncer: Debouncer::new(config.debounce),
			highlights: Vec::new(),
			manifest_loads: TicketCounter::default(),
		})
	}

	#[must_use]
	pub fn index(&self) -> &SearchIndex {
		&self.index
	}

	#[must_use]
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Query of the displayed results.
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Index positions of the displayed results, best first.
	#[must_use]
	pub fn results(&self) -> &[usize] {
		&self.results
	}

	#[must_use]
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	#[must_use]
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Earliest instant at which [`poll`](Self::poll) has work to do.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		let highlight = self.highlights.iter().map(|(due, _)| *due).min();
		match (self.debouncer.deadline(), highlight) {
			(Some(a), Some(b)) => Some(a.min(b)),
			(a, b) => a.or(b),
		}
	}

	/// Current dropdown view model.
	#[must_use]
	pub fn view(&self) -> DropdownView {
		if !self.visible {
			return DropdownView::Hidden;
		}
		DropdownView::build(
			&self.index,
			&self.query,
			&self.results,
			self.selection.selected(),
		)
	}

	/// Input text changed. Short queries hide the results at once; others
	/// run after the debounce delay.
	pub fn on_query_change(&mut self, text: &str, now: Instant) {
		let Some(query) = self.config.search.accept(text) else {
			self.debouncer.cancel();
			self.hide();
			return;
		};
		if let Some(query) = self.debouncer.schedule(query.to_string(), now) {
			self.execute(query);
		}
	}

	/// Run due debounced searches and expire highlights.
	pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
		if let Some(query) = self.debouncer.poll(now) {
			self.execute(query);
		}
		let mut effects = Vec::new();
		self.highlights.retain(|&(due, node)| {
			if due <= now {
				effects.push(Effect::ClearHighlight { node });
				false
			} else {
				true
			}
		});
		effects
	}

	pub fn on_key(&mut self, key: Key, now: Instant) -> Vec<Effect> {
		match key {
			Key::ArrowDown => {
				self.selection.down();
				Vec::new()
			}
			Key::ArrowUp => {
				self.selection.up();
				Vec::new()
			}
			Key::Enter => {
				let row = self.selection.selected().or_else(|| {
					(self.config.auto_select_single && self.visible && self.results.len() == 1)
						.then_some(0)
				});
				match row {
					Some(row) => self.commit(row, now),
					None => Vec::new(),
				}
			}
			Key::Escape => {
				self.debouncer.cancel();
				self.hide();
				vec![Effect::ReleaseFocus]
			}
		}
	}

	/// Pointer moved over a result row.
	pub fn on_hover(&mut self, row: usize) {
		self.selection.hover(row);
	}

	/// Result row clicked; commits it whatever the cursor says.
	pub fn on_click(&mut self, row: usize, now: Instant) -> Vec<Effect> {
		self.commit(row, now)
	}

	/// Click landed outside the search surface.
	pub fn on_outside_click(&mut self) {
		self.hide();
	}

	/// Replace the navigation links and rebuild the index.
	pub fn set_navigation(&mut self, links: Vec<NavLink>) {
		self.sources.navigation = links;
		self.rebuild();
	}

	/// A new page is on screen; rebuild the index from it.
	pub fn set_page(&mut self, page: PageContent) {
		self.sources.page = Some(page);
		// Node ids of the old page mean nothing now.
		self.highlights.clear();
		self.rebuild();
	}

	/// Start a manifest fetch; the response must come back with this ticket.
	pub fn begin_manifest_load(&mut self) -> Ticket {
		let ticket = self.manifest_loads.issue();
		trace!(%ticket, "manifest load started");
		ticket
	}

	/// Apply a manifest response. Stale responses are ignored and failures
	/// leave the index without manifest entries.
	pub fn manifest_loaded(
		&mut self,
		ticket: Ticket,
		response: Result<Vec<PageRecord>, ManifestError>,
	) -> ManifestOutcome {
		if !self.manifest_loads.settle(ticket) {
			debug!(%ticket, "discarding stale manifest response");
			return ManifestOutcome::Stale;
		}
		match response {
			Ok(pages) => {
				self.sources.manifest = pages;
				self.rebuild();
				ManifestOutcome::Applied
			}
			Err(error) => {
				warn!(%error, "manifest unavailable; searching navigation and page only");
				ManifestOutcome::Failed
			}
		}
	}

	/// Manifest pages currently indexed.
	#[must_use]
	pub fn manifest(&self) -> &[PageRecord] {
		&self.sources.manifest
	}

	/// Tear down: pending work is dropped and the dropdown hidden. Returns
	/// highlight clears that were still outstanding.
	pub fn dispose(&mut self) -> Vec<Effect> {
		self.debouncer.cancel();
		self.manifest_loads.abandon();
		self.hide();
		self.highlights
			.drain(..)
			.map(|(_, node)| Effect::ClearHighlight { node })
			.collect()
	}

	fn execute(&mut self, query: String) {
		self.results = search(&self.index, &query, &self.config.search);
		trace!(query = %query, results = self.results.len(), "search executed");
		self.selection.reset(self.results.len());
		self.query = query;
		self.visible = true;
	}

	fn hide(&mut self) {
		self.visible = false;
		self.query.clear();
		self.results.clear();
		self.selection.reset(0);
	}

	fn rebuild(&mut self) {
		self.index = self.sources.build(self.config.index);
		debug!(entries = self.index.len(), "search index rebuilt");
		if self.visible {
			let query = std::mem::take(&mut self.query);
			self.execute(query);
		}
	}

	fn commit(&mut self, row: usize, now: Instant) -> Vec<Effect> {
		let Some(entry) = self
			.results
			.get(row)
			.and_then(|&position| self.index.get(position))
		else {
			return Vec::new();
		};

		let mut effects = match entry.locator() {
			Locator::Page { url } if self.capabilities.navigation_hook => {
				vec![Effect::LoadContent { url: url.clone() }]
			}
			Locator::Page { url } => vec![Effect::Navigate { url: url.clone() }],
			Locator::Node { node, .. } => {
				let node = *node;
				self.highlights.push((now + self.config.highlight, node));
				vec![Effect::ScrollIntoView { node }, Effect::Highlight { node }]
			}
		};
		debug!(title = entry.title(), "result committed");

		effects.push(Effect::ClearInput);
		self.debouncer.cancel();
		self.hide();
		effects
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::BlockKind;

	fn page() -> PageContent {
		let mut page = PageContent::new("/experience/knowledge/net/fundamentals/");
		page.title = Some("Fundamentals".into());
		page.push(BlockKind::Heading { level: 1 }, "Fundamentals");
		page.push(BlockKind::Heading { level: 2 }, "Security Protocols");
		page
	}

	fn records() -> Vec<PageRecord> {
		vec![PageRecord {
			permalink: "/experience/knowledge/network-security/fundamentals/".into(),
			title: "Network Security Fundamentals".into(),
			section: "experience".into(),
			kind: "knowledge".into(),
			..PageRecord::default()
		}]
	}

	fn controller(config: SearchConfig, capabilities: HostCapabilities) -> SearchController {
		let sources = IndexSources {
			page: Some(page()),
			manifest: records(),
			..IndexSources::default()
		};
		SearchController::initialize(Anchors::all(), capabilities, config, sources).unwrap()
	}

	fn immediate() -> SearchConfig {
		SearchConfig {
			debounce: Duration::ZERO,
			..SearchConfig::default()
		}
	}

	fn titles(controller: &SearchController) -> Vec<String> {
		controller
			.view()
			.rows()
			.iter()
			.map(|row| row.title.plain_text())
			.collect()
	}

	#[test]
	fn missing_anchor_disables_search() {
		let anchors = Anchors {
			dropdown: false,
			..Anchors::all()
		};
		let controller = SearchController::initialize(
			anchors,
			HostCapabilities::default(),
			SearchConfig::default(),
			IndexSources::default(),
		);
		assert!(controller.is_none());
	}

	#[test]
	fn short_query_hides_and_cancels_pending_search() {
		let start = Instant::now();
		let mut controller = controller(SearchConfig::default(), HostCapabilities::default());
		controller.on_query_change("security", start);
		controller.poll(start + DEFAULT_DEBOUNCE);
		assert!(controller.is_visible());

		controller.on_query_change("securit", start + Duration::from_secs(1));
		controller.on_query_change("s", start + Duration::from_secs(1));
		assert_eq!(controller.view(), DropdownView::Hidden);
		controller.poll(start + Duration::from_secs(5));
		assert_eq!(controller.view(), DropdownView::Hidden);
		assert_eq!(controller.selection().cursor(), -1);
	}

	#[test]
	fn debounce_waits_for_quiet_period() {
		let start = Instant::now();
		let mut controller = controller(SearchConfig::default(), HostCapabilities::default());
		controller.on_query_change("sec", start);
		assert!(!controller.is_visible());
		assert_eq!(controller.next_deadline(), Some(start + DEFAULT_DEBOUNCE));
		controller.poll(start + DEFAULT_DEBOUNCE);
		assert!(controller.is_visible());
	}

	#[test]
	fn security_scenario() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("Security", now);
		assert_eq!(
			titles(&controller),
			["Security Protocols", "Network Security Fundamentals"]
		);

		controller.on_key(Key::ArrowDown, now);
		controller.on_key(Key::ArrowDown, now);
		controller.on_key(Key::ArrowDown, now);
		assert_eq!(controller.selection().cursor(), 1);

		let effects = controller.on_key(Key::Enter, now);
		assert_eq!(
			effects,
			[
				Effect::Navigate {
					url: "/experience/knowledge/network-security/fundamentals/".into()
				},
				Effect::ClearInput
			]
		);
		assert!(!controller.is_visible());
	}

	#[test]
	fn page_commit_uses_navigation_hook_when_present() {
		let now = Instant::now();
		let hooked = HostCapabilities {
			navigation_hook: true,
		};
		let mut controller = controller(immediate(), hooked);
		controller.on_query_change("network", now);
		let effects = controller.on_click(0, now);
		assert!(matches!(effects[0], Effect::LoadContent { .. }));
	}

	#[test]
	fn node_commit_scrolls_highlights_then_clears() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("protocols", now);
		controller.on_hover(0);
		let effects = controller.on_key(Key::Enter, now);
		let node = NodeId(1);
		assert_eq!(
			effects,
			[
				Effect::ScrollIntoView { node },
				Effect::Highlight { node },
				Effect::ClearInput
			]
		);
		assert!(controller.poll(now + Duration::from_millis(1999)).is_empty());
		assert_eq!(
			controller.poll(now + DEFAULT_HIGHLIGHT),
			[Effect::ClearHighlight { node }]
		);
	}

	#[test]
	fn enter_without_selection_is_a_noop_by_default() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("protocols", now);
		assert_eq!(controller.results().len(), 1);
		assert!(controller.on_key(Key::Enter, now).is_empty());
		assert!(controller.is_visible());
	}

	#[test]
	fn enter_commits_single_result_when_enabled() {
		let now = Instant::now();
		let config = SearchConfig {
			auto_select_single: true,
			..immediate()
		};
		let mut controller = controller(config, HostCapabilities::default());
		controller.on_query_change("protocols", now);
		assert_eq!(controller.on_key(Key::Enter, now).len(), 3);
	}

	#[test]
	fn escape_hides_and_releases_focus() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("security", now);
		assert_eq!(controller.on_key(Key::Escape, now), [Effect::ReleaseFocus]);
		assert_eq!(controller.view(), DropdownView::Hidden);
	}

	#[test]
	fn outside_click_hides() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("security", now);
		controller.on_outside_click();
		assert!(!controller.is_visible());
	}

	#[test]
	fn empty_query_after_query_hides_results() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("xyz", now);
		assert_eq!(controller.view(), DropdownView::NoResults { query: "xyz".into() });
		controller.on_query_change("", now);
		assert_eq!(controller.view(), DropdownView::Hidden);
	}

	#[test]
	fn new_query_resets_cursor() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("security", now);
		controller.on_key(Key::ArrowDown, now);
		controller.on_query_change("securit", now);
		assert_eq!(controller.selection().selected(), None);
	}

	#[test]
	fn manifest_failure_degrades_to_navigation_and_page() {
		let now = Instant::now();
		let sources = IndexSources {
			navigation: vec![NavLink::load(
				"Methodology",
				"/experience/knowledge/pentest/active-directory/methodology/",
			)],
			page: Some(page()),
			manifest: Vec::new(),
		};
		let mut controller = SearchController::initialize(
			Anchors::all(),
			HostCapabilities::default(),
			immediate(),
			sources,
		)
		.unwrap();
		let ticket = controller.begin_manifest_load();
		let failure = crate::manifest::parse_manifest(b"<html>").unwrap_err();
		assert_eq!(
			controller.manifest_loaded(ticket, Err(failure)),
			ManifestOutcome::Failed
		);
		assert_eq!(controller.index().len(), 3);

		controller.on_query_change("method", now);
		assert_eq!(titles(&controller), ["Methodology"]);
	}

	#[test]
	fn stale_manifest_response_is_discarded() {
		let mut controller = controller(immediate(), HostCapabilities::default());
		let stale = controller.begin_manifest_load();
		let fresh = controller.begin_manifest_load();
		assert_eq!(
			controller.manifest_loaded(stale, Ok(Vec::new())),
			ManifestOutcome::Stale
		);
		assert_eq!(controller.index().len(), 3);
		assert_eq!(
			controller.manifest_loaded(fresh, Ok(Vec::new())),
			ManifestOutcome::Applied
		);
		assert_eq!(controller.index().len(), 2);
	}

	#[test]
	fn rebuild_reruns_visible_query() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("protocols", now);
		controller.on_key(Key::ArrowDown, now);

		let mut next = PageContent::new("/other/");
		next.push(BlockKind::Heading { level: 2 }, "Routing Protocols");
		next.push(BlockKind::Heading { level: 2 }, "Protocols");
		controller.set_page(next);

		assert_eq!(titles(&controller), ["Protocols", "Routing Protocols"]);
		assert_eq!(controller.selection().selected(), None);
	}

	#[test]
	fn dispose_flushes_highlights() {
		let now = Instant::now();
		let mut controller = controller(immediate(), HostCapabilities::default());
		controller.on_query_change("protocols", now);
		controller.on_click(0, now);
		assert_eq!(
			controller.dispose(),
			[Effect::ClearHighlight { node: NodeId(1) }]
		);
		assert!(controller.poll(now + DEFAULT_HIGHLIGHT).is_empty());
	}
}
