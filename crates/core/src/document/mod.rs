//! Host-facing description of the page currently on screen and of the
//! navigation links around it.
//!
//! The core never touches a live document tree. Hosts translate whatever they
//! render into a [`PageContent`] and keep a mapping from each [`NodeId`] back to
//! their own node so that scroll and highlight effects can be applied.

mod markdown;

pub use markdown::parse_markdown;

use crate::entry::NodeId;

/// Structured action bound to a navigation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
	/// Swap the article for the page at `url`.
	LoadContent { url: String },
}

/// One clickable navigation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
	pub label: String,
	pub action: NavAction,
}

impl NavLink {
	#[must_use]
	pub fn load(label: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			action: NavAction::LoadContent { url: url.into() },
		}
	}

	/// Target URL of the link.
	#[must_use]
	pub fn url(&self) -> &str {
		match &self.action {
			NavAction::LoadContent { url } => url,
		}
	}
}

/// Block-level node of the article.
///
/// Only headings and paragraphs are indexed; the other kinds are kept so the
/// article can be shown in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
	Heading { level: u8 },
	Paragraph,
	/// Tight list item. Loose items hold paragraphs instead.
	ListItem,
	/// Fenced or indented code, line breaks preserved.
	Code,
	/// Table row with cells joined by ` | `.
	TableRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
	pub node: NodeId,
	pub kind: BlockKind,
	pub text: String,
}

/// The article currently displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
	/// Path the page was loaded from.
	pub path: String,
	/// Text of the page header, if any.
	pub title: Option<String>,
	/// Blocks in document order.
	pub blocks: Vec<Block>,
}

impl PageContent {
	#[must_use]
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	/// Append a block and return the id assigned to it.
	pub fn push(&mut self, kind: BlockKind, text: impl Into<String>) -> NodeId {
		let node = NodeId(self.blocks.len());
		self.blocks.push(Block {
			node,
			kind,
			text: text.into(),
		});
		node
	}

	pub fn headings(&self) -> impl Iterator<Item = (&Block, u8)> {
		self.blocks.iter().filter_map(|block| match block.kind {
			BlockKind::Heading { level } => Some((block, level)),
			_ => None,
		})
	}

	pub fn paragraphs(&self) -> impl Iterator<Item = &Block> {
		self.blocks
			.iter()
			.filter(|block| block.kind == BlockKind::Paragraph)
	}

	/// First level-one heading, used as the document title after a swap.
	#[must_use]
	pub fn first_h1(&self) -> Option<&str> {
		self.headings()
			.find(|(_, level)| *level == 1)
			.map(|(block, _)| block.text.as_str())
	}
}
