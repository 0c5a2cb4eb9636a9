//! Core of `kbseek`: the search index, ranking, the search box state machine
//! and the sidebar navigation tree of a static knowledge-base site.
//!
//! Nothing here touches a terminal or a browser. Hosts hand in navigation
//! links, the page on screen and the manifest bytes, then draw the view
//! models and apply the [`Effect`]s that come back.

pub mod content;
pub mod controller;
pub mod debounce;
pub mod document;
pub mod entry;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod index;
pub mod manifest;
pub mod render;
pub mod search;
pub mod selection;
pub mod text;
pub mod ticket;
pub mod tree;

pub use crate::content::{ContentSwap, FetchedPage, SwapOutcome};
pub use crate::controller::{
	Anchors, Effect, HostCapabilities, IndexSources, Key, ManifestOutcome, SearchConfig,
	SearchController,
};
pub use crate::document::{NavAction, NavLink, PageContent, parse_markdown};
pub use crate::entry::{EntryKind, Locator, NodeId, NodeKind, SearchEntry};
pub use crate::error::{LoadError, ManifestError};
pub use crate::filter::TagFilter;
pub use crate::index::{IndexBuilder, IndexOptions, SearchIndex};
pub use crate::manifest::{PageRecord, parse_manifest};
pub use crate::render::{DropdownView, ResultRow};
pub use crate::search::SearchOptions;
pub use crate::ticket::Ticket;
pub use crate::tree::{NavStructure, NavTree, StructureNode, TreeItem, TreeState};
