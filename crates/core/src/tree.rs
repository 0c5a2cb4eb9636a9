//! Sidebar navigation tree.
//!
//! The tree is either derived from the manifest, nesting knowledge pages by
//! their URL segments, or read from a declared structure that lists folders
//! and pages in display order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::NavLink;
use crate::manifest::{PageRecord, knowledge_pages};
use crate::text::{contains_ignore_case, format_title, path_segments};

/// Shown in place of the tree while it cannot be displayed.
pub const TREE_PLACEHOLDER: &str = "Loading navigation...";

/// Declared navigation: labels mapped to folders or pages, in display order.
pub type NavStructure = IndexMap<String, StructureNode>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructureNode {
	Folder {
		#[serde(default)]
		children: NavStructure,
	},
	Page {
		url: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
	/// Slash-joined keys from the root, used to toggle the folder.
	pub id: String,
	pub label: String,
	pub expanded: bool,
	pub children: Vec<TreeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLink {
	pub link: NavLink,
	pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeItem {
	Folder(Folder),
	Link(TreeLink),
}

impl TreeItem {
	#[must_use]
	pub fn label(&self) -> &str {
		match self {
			Self::Folder(folder) => &folder.label,
			Self::Link(link) => &link.link.label,
		}
	}

	fn contains_active(&self) -> bool {
		match self {
			Self::Folder(folder) => folder.children.iter().any(Self::contains_active),
			Self::Link(link) => link.active,
		}
	}
}

/// One displayable line of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRow<'a> {
	pub depth: usize,
	pub item: &'a TreeItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
	items: Vec<TreeItem>,
}

/// Intermediate trie keyed by URL segment.
#[derive(Default)]
struct Branch<'a> {
	label: String,
	page: Option<&'a PageRecord>,
	children: BTreeMap<String, Branch<'a>>,
}

impl NavTree {
	/// Nest the manifest's knowledge pages by the URL segments after
	/// `prefix`. Siblings are sorted by segment.
	#[must_use]
	pub fn from_manifest(pages: &[PageRecord], current_path: &str, prefix: &str) -> Self {
		let mut root = Branch::default();
		for page in knowledge_pages(pages) {
			let relative = page.path().replacen(prefix, "", 1);
			let segments = path_segments(&relative);
			let last = segments.len().saturating_sub(1);
			let mut level = &mut root;
			for (position, segment) in segments.iter().enumerate() {
				level = level
					.children
					.entry((*segment).to_string())
					.or_insert_with(|| Branch {
						label: format_title(segment),
						..Branch::default()
					});
				if position == last && !page.title.is_empty() && level.page.is_none() {
					level.page = Some(page);
				}
			}
		}
		let items = branch_items(&root, "", current_path);
		debug!(items = items.len(), "navigation tree built from manifest");
		Self { items }
	}

	/// Build from a declared structure, keeping its order.
	#[must_use]
	pub fn from_structure(structure: &NavStructure, current_path: &str) -> Self {
		Self {
			items: structure_items(structure, "", current_path),
		}
	}

	#[must_use]
	pub fn items(&self) -> &[TreeItem] {
		&self.items
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Flip a folder open or closed. Returns `false` for unknown ids.
	pub fn toggle(&mut self, id: &str) -> bool {
		fn walk(items: &mut [TreeItem], id: &str) -> bool {
			items.iter_mut().any(|item| match item {
				TreeItem::Folder(folder) if folder.id == id => {
					folder.expanded = !folder.expanded;
					true
				}
				TreeItem::Folder(folder) => walk(&mut folder.children, id),
				TreeItem::Link(_) => false,
			})
		}
		walk(&mut self.items, id)
	}

	/// Mark the link to `url` active and every other link inactive.
	/// Returns whether a link matched.
	pub fn set_active(&mut self, url: &str) -> bool {
		fn walk(items: &mut [TreeItem], url: &str) -> bool {
			let mut found = false;
			for item in items {
				match item {
					TreeItem::Folder(folder) => found |= walk(&mut folder.children, url),
					TreeItem::Link(link) => {
						link.active = link.link.url() == url;
						found |= link.active;
					}
				}
			}
			found
		}
		walk(&mut self.items, url)
	}

	/// Every link in display order, for indexing.
	#[must_use]
	pub fn links(&self) -> Vec<NavLink> {
		fn walk(items: &[TreeItem], out: &mut Vec<NavLink>) {
			for item in items {
				match item {
					TreeItem::Folder(folder) => walk(&folder.children, out),
					TreeItem::Link(link) => out.push(link.link.clone()),
				}
			}
		}
		let mut out = Vec::new();
		walk(&self.items, &mut out);
		out
	}

	/// Rows to display for the sidebar filter `term`.
	///
	/// An empty term shows everything. Otherwise an item is shown when its
	/// label contains the term, ignoring case; a hidden folder hides its
	/// whole subtree. Children of collapsed folders are never shown.
	#[must_use]
	pub fn visible(&self, term: &str) -> Vec<TreeRow<'_>> {
		fn walk<'a>(items: &'a [TreeItem], term: &str, depth: usize, out: &mut Vec<TreeRow<'a>>) {
			for item in items {
				if !term.is_empty() && !contains_ignore_case(item.label(), term) {
					continue;
				}
				out.push(TreeRow { depth, item });
				if let TreeItem::Folder(folder) = item {
					if folder.expanded {
						walk(&folder.children, term, depth + 1, out);
					}
				}
			}
		}
		let mut out = Vec::new();
		walk(&self.items, term, 0, &mut out);
		out
	}
}

fn branch_items(branch: &Branch<'_>, parent: &str, current_path: &str) -> Vec<TreeItem> {
	branch
		.children
		.iter()
		.filter_map(|(key, child)| {
			if !child.children.is_empty() {
				let id = join_id(parent, key);
				let children = branch_items(child, &id, current_path);
				return Some(folder(id, child.label.clone(), children));
			}
			child.page.map(|page| {
				let label = if page.title.is_empty() {
					child.label.clone()
				} else {
					page.title.clone()
				};
				link(label, page.path(), current_path)
			})
		})
		.collect()
}

fn structure_items(structure: &NavStructure, parent: &str, current_path: &str) -> Vec<TreeItem> {
	structure
		.iter()
		.map(|(label, node)| match node {
			StructureNode::Folder { children } => {
				let id = join_id(parent, label);
				let children = structure_items(children, &id, current_path);
				folder(id, label.clone(), children)
			}
			StructureNode::Page { url } => link(label.clone(), url, current_path),
		})
		.collect()
}

fn folder(id: String, label: String, children: Vec<TreeItem>) -> TreeItem {
	let expanded = children.iter().any(TreeItem::contains_active);
	TreeItem::Folder(Folder {
		id,
		label,
		expanded,
		children,
	})
}

fn link(label: String, url: &str, current_path: &str) -> TreeItem {
	TreeItem::Link(TreeLink {
		active: url == current_path,
		link: NavLink::load(label, url),
	})
}

fn join_id(parent: &str, key: &str) -> String {
	if parent.is_empty() {
		key.to_string()
	} else {
		format!("{parent}/{key}")
	}
}

/// What the sidebar currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TreeState {
	#[default]
	Loading,
	Ready(NavTree),
	/// The manifest could not be loaded.
	Unavailable,
}

impl TreeState {
	#[must_use]
	pub fn tree(&self) -> Option<&NavTree> {
		match self {
			Self::Ready(tree) => Some(tree),
			Self::Loading | Self::Unavailable => None,
		}
	}

	pub fn tree_mut(&mut self) -> Option<&mut NavTree> {
		match self {
			Self::Ready(tree) => Some(tree),
			Self::Loading | Self::Unavailable => None,
		}
	}

	/// Placeholder line shown instead of the tree.
	#[must_use]
	pub fn placeholder(&self) -> Option<&'static str> {
		match self {
			Self::Ready(_) => None,
			Self::Loading | Self::Unavailable => Some(TREE_PLACEHOLDER),
		}
	}
}
