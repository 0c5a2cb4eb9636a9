//! View model of the results dropdown.
//!
//! Hosts draw a [`DropdownView`] however they like; [`DropdownView::to_html`]
//! gives the markup a browser host would insert.

use std::fmt::Write as _;

use serde::Serialize;

use crate::entry::EntryKind;
use crate::highlight::{Highlighted, escape_html, highlight};
use crate::index::SearchIndex;

/// Icon of the search surface and of the empty state.
pub const SEARCH_ICON: &str = "🔍";
/// Keyboard hint shown next to the result count.
pub const NAVIGATION_HINT: &str = "Use ↑↓ to navigate";

/// One rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
	/// Position of the row in the result list.
	pub index: usize,
	pub kind: EntryKind,
	pub icon: &'static str,
	pub type_label: &'static str,
	pub title: Highlighted,
	pub category: String,
	pub selected: bool,
}

/// What the dropdown currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DropdownView {
	Hidden,
	NoResults { query: String },
	Results { rows: Vec<ResultRow> },
}

impl DropdownView {
	/// Build the view for `results` (indices into `index`) and `cursor`.
	#[must_use]
	pub fn build(index: &SearchIndex, query: &str, results: &[usize], cursor: Option<usize>) -> Self {
		if results.is_empty() {
			return Self::NoResults {
				query: query.to_string(),
			};
		}
		let rows = results
			.iter()
			.enumerate()
			.filter_map(|(position, &entry)| {
				let entry = index.get(entry)?;
				let kind = entry.kind();
				Some(ResultRow {
					index: position,
					kind,
					icon: kind.icon(),
					type_label: kind.label(),
					title: highlight(entry.title(), query),
					category: entry.category().to_string(),
					selected: cursor == Some(position),
				})
			})
			.collect();
		Self::Results { rows }
	}

	#[must_use]
	pub fn is_visible(&self) -> bool {
		!matches!(self, Self::Hidden)
	}

	#[must_use]
	pub fn rows(&self) -> &[ResultRow] {
		match self {
			Self::Results { rows } => rows,
			Self::Hidden | Self::NoResults { .. } => &[],
		}
	}

	/// Count header, or `None` when no rows are shown.
	#[must_use]
	pub fn header(&self) -> Option<String> {
		match self {
			Self::Results { rows } => Some(count_label(rows.len())),
			Self::Hidden | Self::NoResults { .. } => None,
		}
	}

	/// Dropdown markup. Hidden views render to an empty string.
	#[must_use]
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		match self {
			Self::Hidden => {}
			Self::NoResults { query } => {
				let _ = write!(
					out,
					"<div class=\"search-no-results\"><span class=\"search-icon\">{SEARCH_ICON}</span>\
					 <p>No results found for \"{}\"</p></div>",
					escape_html(query)
				);
			}
			Self::Results { rows } => {
				let _ = write!(
					out,
					"<div class=\"search-header\"><span class=\"search-count\">{}</span>\
					 <span class=\"search-hint\">{NAVIGATION_HINT}</span></div>",
					count_label(rows.len())
				);
				for row in rows {
					let class = if row.selected {
						"search-result selected"
					} else {
						"search-result"
					};
					let _ = write!(
						out,
						"<div class=\"{class}\" data-index=\"{}\">\
						 <span class=\"search-result-icon\">{}</span>\
						 <div class=\"search-result-title\">{}</div>\
						 <div class=\"search-result-meta\"><span class=\"search-result-type\">{}</span>\
						 <span class=\"search-result-category\">{}</span></div></div>",
						row.index,
						row.icon,
						row.title.to_html(),
						row.type_label,
						escape_html(&row.category)
					);
				}
			}
		}
		out
	}
}

/// `"1 result"` / `"N results"`.
#[must_use]
pub fn count_label(count: usize) -> String {
	if count == 1 {
		"1 result".to_string()
	} else {
		format!("{count} results")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entry::SearchEntry;

	fn index() -> SearchIndex {
		[
			SearchEntry::page("Firewall <rules>", "/a/", "Network & Security").unwrap(),
			SearchEntry::page("Firewall basics", "/b/", "Network").unwrap(),
		]
		.into_iter()
		.collect()
	}

	#[test]
	fn exactly_the_cursor_row_is_selected() {
		let view = DropdownView::build(&index(), "fire", &[1, 0], Some(1));
		let selected: Vec<bool> = view.rows().iter().map(|row| row.selected).collect();
		assert_eq!(selected, [false, true]);
		assert_eq!(view.rows()[0].title.plain_text(), "Firewall basics");
		assert_eq!(view.header().as_deref(), Some("2 results"));
	}

	#[test]
	fn empty_results_show_the_query() {
		let view = DropdownView::build(&index(), "zz", &[], None);
		assert_eq!(view, DropdownView::NoResults { query: "zz".into() });
		assert!(view.is_visible());
		assert!(view.header().is_none());
		assert!(view.to_html().contains("No results found for \"zz\""));
	}

	#[test]
	fn html_escapes_titles_and_categories() {
		let view = DropdownView::build(&index(), "fire", &[0], Some(0));
		let html = view.to_html();
		assert!(html.contains("1 result<"));
		assert!(html.contains("<mark>Fire</mark>wall &lt;rules&gt;"));
		assert!(html.contains("Network &amp; Security"));
		assert!(html.contains("search-result selected"));
		assert!(html.contains(NAVIGATION_HINT));
	}

	#[test]
	fn hidden_renders_nothing() {
		assert_eq!(DropdownView::Hidden.to_html(), "");
		assert!(DropdownView::Hidden.rows().is_empty());
	}
}
