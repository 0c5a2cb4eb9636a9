//! The site-wide page manifest (`index.json`) produced by the static site
//! generator.

use serde::{Deserialize, Deserializer};

use crate::error::ManifestError;
use crate::text::path_segments;

/// Section and type that mark a page as part of the knowledge base.
pub const KNOWLEDGE_SECTION: &str = "experience";
pub const KNOWLEDGE_TYPE: &str = "knowledge";
const KNOWLEDGE_MARKER: &str = "/knowledge/";

/// One page record. Every field is optional in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRecord {
	#[serde(deserialize_with = "null_as_default")]
	pub permalink: String,
	#[serde(deserialize_with = "null_as_default")]
	pub title: String,
	pub content: Option<String>,
	pub summary: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub section: String,
	#[serde(rename = "type", deserialize_with = "null_as_default")]
	pub kind: String,
	pub date: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub tags: Vec<String>,
}

/// Generators emit `null` for unset front matter; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PageRecord {
	/// Whether the record belongs to the knowledge section of the site.
	#[must_use]
	pub fn is_knowledge(&self) -> bool {
		self.section == KNOWLEDGE_SECTION
			&& self.kind == KNOWLEDGE_TYPE
			&& self.permalink.contains(KNOWLEDGE_MARKER)
	}

	/// Body text used for matching: full content, or the summary.
	#[must_use]
	pub fn body(&self) -> Option<&str> {
		self.content
			.as_deref()
			.filter(|content| !content.trim().is_empty())
			.or(self.summary.as_deref())
	}

	/// Path portion of the permalink, dropping any scheme and host.
	#[must_use]
	pub fn path(&self) -> &str {
		let link = self.permalink.as_str();
		match link.split_once("://") {
			Some((_, rest)) => rest.find('/').map_or("/", |slash| &rest[slash..]),
			None => link,
		}
	}

	/// `index`-th non-empty segment of the permalink path.
	#[must_use]
	pub fn segment(&self, index: usize) -> Option<&str> {
		path_segments(self.path()).get(index).copied()
	}
}

/// Decode a manifest document.
pub fn parse_manifest(bytes: &[u8]) -> Result<Vec<PageRecord>, ManifestError> {
	Ok(serde_json::from_slice(bytes)?)
}

/// Keep only knowledge-base pages.
#[must_use]
pub fn knowledge_pages(pages: &[PageRecord]) -> Vec<&PageRecord> {
	pages.iter().filter(|page| page.is_knowledge()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	const MANIFEST: &str = r#"[
		{"permalink": "/experience/knowledge/network-security/fundamentals/", "title": "Fundamentals",
		 "content": "Packets and ports", "section": "experience", "type": "knowledge", "date": "2024-02-01"},
		{"permalink": "/posts/hello/", "title": "Hello", "section": "posts", "type": "posts"},
		{"title": "No permalink", "section": null, "tags": null}
	]"#;

	#[test]
	fn missing_fields_default() {
		let pages = parse_manifest(MANIFEST.as_bytes()).unwrap();
		assert_eq!(pages.len(), 3);
		assert_eq!(pages[2].permalink, "");
		assert!(pages[2].content.is_none());
		assert!(pages[2].tags.is_empty());
	}

	#[test]
	fn knowledge_filter_checks_section_type_and_path() {
		let pages = parse_manifest(MANIFEST.as_bytes()).unwrap();
		let knowledge = knowledge_pages(&pages);
		assert_eq!(knowledge.len(), 1);
		assert_eq!(knowledge[0].title, "Fundamentals");
	}

	#[test]
	fn malformed_manifest_is_an_error() {
		let err = parse_manifest(b"{\"not\": \"an array\"}").unwrap_err();
		assert!(matches!(err, ManifestError::Malformed(_)));
	}

	#[test]
	fn absolute_permalinks_reduce_to_paths() {
		let page = PageRecord {
			permalink: "https://example.org/experience/knowledge/a/b/".into(),
			..PageRecord::default()
		};
		assert_eq!(page.path(), "/experience/knowledge/a/b/");
		assert_eq!(page.segment(2), Some("a"));
		assert_eq!(page.segment(3), Some("b"));
		assert_eq!(page.segment(4), None);
	}

	#[test]
	fn body_prefers_content_then_summary() {
		let page = PageRecord {
			content: Some("  ".into()),
			summary: Some("sum".into()),
			..PageRecord::default()
		};
		assert_eq!(page.body(), Some("sum"));
	}
}
