//! Assemble the flat search index from navigation links, the page on screen
//! and the site manifest.
//!
//! Sources are appended in the order they are added and duplicates across
//! sources are kept; ranking is responsible for putting the best one first.

use tracing::debug;

use crate::document::{NavLink, PageContent};
use crate::entry::{Locator, NodeKind, SearchEntry};
use crate::manifest::{PageRecord, knowledge_pages};
use crate::text::{char_len, format_title, path_segments, snippet};

/// Category used when a URL is too shallow to carry one.
pub const FALLBACK_CATEGORY: &str = "Knowledge Base";
/// Category used for in-page entries when the page has no title.
pub const CURRENT_PAGE_CATEGORY: &str = "Current Page";

/// Limits applied while indexing page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
	/// Paragraph titles are cut to this many characters.
	pub snippet_chars: usize,
	/// Paragraphs must be longer than this (after trimming) to be indexed.
	pub min_paragraph_chars: usize,
}

impl Default for IndexOptions {
	fn default() -> Self {
		Self {
			snippet_chars: 100,
			min_paragraph_chars: 50,
		}
	}
}

/// Immutable list of searchable entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
	entries: Vec<SearchEntry>,
}

impl SearchIndex {
	#[must_use]
	pub fn entries(&self) -> &[SearchEntry] {
		&self.entries
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&SearchEntry> {
		self.entries.get(index)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<SearchEntry> for SearchIndex {
	fn from_iter<I: IntoIterator<Item = SearchEntry>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

/// Builder collecting entries from each available source.
#[derive(Debug, Default)]
pub struct IndexBuilder {
	options: IndexOptions,
	entries: Vec<SearchEntry>,
}

impl IndexBuilder {
	#[must_use]
	pub fn new(options: IndexOptions) -> Self {
		Self {
			options,
			entries: Vec::new(),
		}
	}

	/// Add one page entry per navigation link.
	#[must_use]
	pub fn navigation(mut self, links: &[NavLink]) -> Self {
		let before = self.entries.len();
		self.entries.extend(links.iter().filter_map(|link| {
			let url = link.url();
			SearchEntry::page(link.label.trim(), url, category_from_url(url))
		}));
		debug!(added = self.entries.len() - before, "indexed navigation links");
		self
	}

	/// Add heading entries and long-paragraph entries for the page on screen.
	#[must_use]
	pub fn document(mut self, page: &PageContent) -> Self {
		let before = self.entries.len();
		let category = page
			.title
			.as_deref()
			.map(str::trim)
			.filter(|title| !title.is_empty())
			.unwrap_or(CURRENT_PAGE_CATEGORY)
			.to_string();

		for (block, level) in page.headings() {
			let locator = Locator::Node {
				node: block.node,
				kind: NodeKind::Heading { level },
			};
			self.entries
				.extend(SearchEntry::new(block.text.trim(), locator, &category, None));
		}

		for block in page.paragraphs() {
			let text = block.text.trim();
			if char_len(text) <= self.options.min_paragraph_chars {
				continue;
			}
			let locator = Locator::Node {
				node: block.node,
				kind: NodeKind::Content,
			};
			let title = snippet(text, self.options.snippet_chars);
			self.entries.extend(SearchEntry::new(
				title,
				locator,
				&category,
				Some(text.to_string()),
			));
		}
		debug!(added = self.entries.len() - before, path = %page.path, "indexed page content");
		self
	}

	/// Add one page entry per knowledge page of the manifest.
	#[must_use]
	pub fn manifest(mut self, pages: &[PageRecord]) -> Self {
		let before = self.entries.len();
		for page in knowledge_pages(pages) {
			let category = page
				.segment(2)
				.map_or_else(|| FALLBACK_CATEGORY.to_string(), format_title);
			let item = page.segment(3).map(format_title).unwrap_or_default();
			let title = if page.title.trim().is_empty() {
				item
			} else {
				page.title.trim().to_string()
			};
			let Some(entry) = SearchEntry::page(title, page.path(), category) else {
				continue;
			};
			self.entries.push(match page.body() {
				Some(body) => entry.with_full_text(body),
				None => entry,
			});
		}
		debug!(added = self.entries.len() - before, "indexed manifest pages");
		self
	}

	#[must_use]
	pub fn build(self) -> SearchIndex {
		SearchIndex {
			entries: self.entries,
		}
	}
}

/// Category for a navigation URL: its fourth path segment, title-cased.
#[must_use]
pub fn category_from_url(url: &str) -> String {
	path_segments(url)
		.get(3)
		.map_or_else(|| FALLBACK_CATEGORY.to_string(), |segment| format_title(segment))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::BlockKind;
	use crate::entry::{EntryKind, NodeId};

	fn sample_page() -> PageContent {
		let mut page = PageContent::new("/experience/knowledge/net/fundamentals/");
		page.title = Some("Fundamentals".into());
		page.push(BlockKind::Heading { level: 1 }, "Fundamentals");
		page.push(BlockKind::Paragraph, "Too short to index.");
		page.push(BlockKind::Paragraph, "a".repeat(51));
		page.push(BlockKind::Heading { level: 3 }, "Ports");
		page.push(BlockKind::Paragraph, "b".repeat(150));
		page
	}

	#[test]
	fn navigation_links_become_page_entries() {
		let links = [
			NavLink::load(
				"  Methodology ",
				"/experience/knowledge/penetration-testing/active-directory/methodology/",
			),
			NavLink::load("Home", "/"),
		];
		let index = IndexBuilder::default().navigation(&links).build();
		assert_eq!(index.len(), 2);
		let first = index.get(0).unwrap();
		assert_eq!(first.title(), "Methodology");
		assert_eq!(first.category(), "Active Directory");
		assert_eq!(first.kind(), EntryKind::Page);
		assert_eq!(index.get(1).unwrap().category(), FALLBACK_CATEGORY);
	}

	#[test]
	fn document_indexes_headings_and_long_paragraphs() {
		let index = IndexBuilder::default().document(&sample_page()).build();
		let kinds: Vec<EntryKind> = index.entries().iter().map(SearchEntry::kind).collect();
		assert_eq!(
			kinds,
			[
				EntryKind::Heading,
				EntryKind::Heading,
				EntryKind::Content,
				EntryKind::Content
			]
		);
		assert!(index.entries().iter().all(|e| e.category() == "Fundamentals"));

		let short = &index.entries()[2];
		assert_eq!(short.title(), "a".repeat(51));
		assert_eq!(short.full_text(), Some("a".repeat(51).as_str()));

		let long = &index.entries()[3];
		assert_eq!(long.title(), format!("{}...", "b".repeat(100)));
		assert_eq!(long.full_text().map(str::len), Some(150));
		assert_eq!(
			long.locator(),
			&Locator::Node {
				node: NodeId(4),
				kind: NodeKind::Content
			}
		);
	}

	#[test]
	fn untitled_page_uses_fallback_category() {
		let mut page = PageContent::new("/x/");
		page.push(BlockKind::Heading { level: 2 }, "Setup");
		let index = IndexBuilder::default().document(&page).build();
		assert_eq!(index.get(0).unwrap().category(), CURRENT_PAGE_CATEGORY);
	}

	#[test]
	fn manifest_pages_use_path_segments() {
		let pages = vec![
			PageRecord {
				permalink: "/experience/knowledge/network-security/fundamentals/".into(),
				title: String::new(),
				summary: Some("Subnets and routing".into()),
				section: "experience".into(),
				kind: "knowledge".into(),
				..PageRecord::default()
			},
			PageRecord {
				permalink: "/posts/other/".into(),
				title: "Other".into(),
				section: "posts".into(),
				..PageRecord::default()
			},
		];
		let index = IndexBuilder::default().manifest(&pages).build();
		assert_eq!(index.len(), 1);
		let entry = index.get(0).unwrap();
		assert_eq!(entry.title(), "Fundamentals");
		assert_eq!(entry.category(), "Network Security");
		assert_eq!(entry.full_text(), Some("Subnets and routing"));
		assert_eq!(
			entry.locator(),
			&Locator::Page {
				url: "/experience/knowledge/network-security/fundamentals/".into()
			}
		);
	}

	#[test]
	fn duplicates_across_sources_are_kept() {
		let links = [NavLink::load("Fundamentals", "/experience/knowledge/net/fundamentals/")];
		let index = IndexBuilder::default()
			.navigation(&links)
			.document(&sample_page())
			.build();
		let matches = index
			.entries()
			.iter()
			.filter(|e| e.title() == "Fundamentals")
			.count();
		assert_eq!(matches, 2);
	}
}
