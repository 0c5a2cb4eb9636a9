//! Searchable units and the locators that say where a result leads.

use serde::Serialize;

/// Opaque handle to a node of the currently displayed page.
///
/// Hosts assign these when they hand a page to the core and resolve them
/// again when an [`Effect`](crate::Effect) refers back to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// What kind of in-page node an entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum NodeKind {
	/// A heading element, `level` in `1..=6`.
	Heading { level: u8 },
	/// A paragraph of body text.
	Content,
}

/// Where committing a result takes the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "target")]
pub enum Locator {
	/// Another page of the site.
	Page { url: String },
	/// A node of the page currently on screen.
	Node { node: NodeId, kind: NodeKind },
}

/// Coarse entry type used by ranking and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
	Page,
	Heading,
	Content,
}

impl EntryKind {
	/// Icon shown in front of a result row.
	#[must_use]
	pub const fn icon(self) -> &'static str {
		match self {
			Self::Page => "📄",
			Self::Heading => "📍",
			Self::Content => "📝",
		}
	}

	/// Human readable type label shown in the row metadata.
	#[must_use]
	pub const fn label(self) -> &'static str {
		match self {
			Self::Page => "Page",
			Self::Heading => "Section",
			Self::Content => "Content",
		}
	}

	/// Ordering weight: pages, then headings, then content.
	pub(crate) const fn priority(self) -> u8 {
		match self {
			Self::Page => 0,
			Self::Heading => 1,
			Self::Content => 2,
		}
	}
}

/// One indexable unit. Entries never change once built; the whole index is
/// rebuilt when the page changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
	title: String,
	locator: Locator,
	category: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	full_text: Option<String>,
}

impl SearchEntry {
	/// Build an entry, returning `None` when the title is blank.
	#[must_use]
	pub fn new(
		title: impl Into<String>,
		locator: Locator,
		category: impl Into<String>,
		full_text: Option<String>,
	) -> Option<Self> {
		let title = title.into();
		if title.trim().is_empty() {
			return None;
		}
		Some(Self {
			title,
			locator,
			category: category.into(),
			full_text,
		})
	}

	/// Page-level entry pointing at `url`.
	#[must_use]
	pub fn page(
		title: impl Into<String>,
		url: impl Into<String>,
		category: impl Into<String>,
	) -> Option<Self> {
		Self::new(title, Locator::Page { url: url.into() }, category, None)
	}

	#[must_use]
	pub fn title(&self) -> &str {
		&self.title
	}

	#[must_use]
	pub fn locator(&self) -> &Locator {
		&self.locator
	}

	#[must_use]
	pub fn category(&self) -> &str {
		&self.category
	}

	#[must_use]
	pub fn full_text(&self) -> Option<&str> {
		self.full_text.as_deref()
	}

	/// Attach body text used for matching beyond the title.
	#[must_use]
	pub fn with_full_text(mut self, text: impl Into<String>) -> Self {
		self.full_text = Some(text.into());
		self
	}

	#[must_use]
	pub fn kind(&self) -> EntryKind {
		match self.locator {
			Locator::Page { .. } => EntryKind::Page,
			Locator::Node {
				kind: NodeKind::Heading { .. },
				..
			} => EntryKind::Heading,
			Locator::Node {
				kind: NodeKind::Content,
				..
			} => EntryKind::Content,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_titles_are_rejected() {
		assert!(SearchEntry::page("   ", "/a/", "A").is_none());
		assert!(SearchEntry::page("Title", "/a/", "A").is_some());
	}

	#[test]
	fn kind_follows_locator() {
		let heading = SearchEntry::new(
			"Intro",
			Locator::Node {
				node: NodeId(3),
				kind: NodeKind::Heading { level: 2 },
			},
			"Page",
			None,
		)
		.unwrap();
		assert_eq!(heading.kind(), EntryKind::Heading);
		assert_eq!(heading.kind().icon(), "📍");
		assert_eq!(heading.kind().label(), "Section");
	}
}
