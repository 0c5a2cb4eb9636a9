//! Core state container for the terminal front-end.
//!
//! [`App`] bundles the search controller, the article swap, the sidebar tree
//! and the UI caches needed to map mouse positions back to rows.

use std::sync::Arc;

use anyhow::{Context, Result};
use kbseek_core::{
	Anchors, ContentSwap, HostCapabilities, IndexSources, NavTree, SearchController, TreeState,
};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;

use super::loads::LoadRuntime;
use crate::components::article::ArticleState;
use crate::host::{BrowseOptions, SiteSource};
use crate::input::SearchInput;
use crate::style::StyleConfig;

/// Pane receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
	Search,
	Sidebar,
	Article,
}

impl Focus {
	/// Next pane in Tab order.
	#[must_use]
	pub fn next(self) -> Self {
		match self {
			Self::Search => Self::Sidebar,
			Self::Sidebar => Self::Article,
			Self::Article => Self::Search,
		}
	}
}

/// Screen areas recorded during the last draw.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HitAreas {
	pub input: Option<Rect>,
	/// Whole dropdown, borders included.
	pub dropdown: Option<Rect>,
	/// Rows of the dropdown.
	pub dropdown_rows: Option<Rect>,
	pub sidebar_rows: Option<Rect>,
}

/// Aggregate state shared across the terminal UI.
pub struct App<'a> {
	pub(crate) options: BrowseOptions,
	/// Text input feeding the search box and the sidebar filter.
	pub search_input: SearchInput<'a>,
	pub(crate) controller: SearchController,
	pub(crate) content: ContentSwap,
	pub(crate) tree: TreeState,
	pub(crate) sidebar: ListState,
	pub(crate) article: ArticleState,
	pub(crate) focus: Focus,
	pub(crate) hit: HitAreas,
	/// Current style and theme configuration.
	pub style: StyleConfig,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) loads: LoadRuntime,
	pub(crate) should_quit: bool,
}

impl<'a> App<'a> {
	/// Build the UI for `source`. Nothing is loaded until [`App::start`].
	pub fn new(source: Arc<dyn SiteSource>, options: BrowseOptions) -> Result<Self> {
		let tree = match &options.navigation {
			Some(structure) => TreeState::Ready(NavTree::from_structure(structure, &options.start_page)),
			None => TreeState::Loading,
		};
		let sources = IndexSources {
			navigation: tree.tree().map(NavTree::links).unwrap_or_default(),
			..IndexSources::default()
		};
		let controller = SearchController::initialize(
			Anchors::all(),
			HostCapabilities {
				navigation_hook: true,
			},
			options.search,
			sources,
		)
		.context("search box could not be attached")?;

		let mut search_input = SearchInput::new(options.initial_query.clone());
		let focus = Focus::Search;
		search_input.set_focused(true);

		Ok(Self {
			content: ContentSwap::new(options.site_title.clone()),
			style: StyleConfig::with_theme(options.theme),
			options,
			search_input,
			controller,
			tree,
			sidebar: ListState::default(),
			article: ArticleState::default(),
			focus,
			hit: HitAreas::default(),
			throbber_state: ThrobberState::default(),
			loads: LoadRuntime::new(source),
			should_quit: false,
		})
	}

	/// Move keyboard focus, keeping the input's cursor in sync.
	pub(crate) fn set_focus(&mut self, focus: Focus) {
		self.focus = focus;
		self.search_input.set_focused(focus == Focus::Search);
	}

	/// Window title: the article heading with the site name.
	#[must_use]
	pub fn document_title(&self) -> Option<&str> {
		self.content.document_title()
	}

	/// Whether a background load is still running.
	pub(crate) fn is_busy(&self) -> bool {
		self.loads.is_busy() || self.content.is_loading()
	}

	/// Label filter applied to the sidebar.
	pub(crate) fn sidebar_filter(&self) -> &str {
		self.search_input.text().trim()
	}
}
