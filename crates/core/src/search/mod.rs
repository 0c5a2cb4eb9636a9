//! Filtering and ranking of index entries against a query.
//!
//! A query matches an entry when it occurs, ignoring case, in the entry's
//! title, category or full text. Matches are ordered by [`compare`] and cut
//! to [`SearchOptions::max_results`].

mod rank;

pub use rank::compare;

use crate::entry::SearchEntry;
use crate::index::SearchIndex;
use crate::text::{char_len, contains_ignore_case};

/// Queries shorter than this (in characters, after trimming) hide the results.
pub const MIN_QUERY_CHARS: usize = 2;
/// Result cap of the full search box.
pub const DEFAULT_MAX_RESULTS: usize = 8;
/// Result cap of the compact search box.
pub const COMPACT_MAX_RESULTS: usize = 6;

/// Knobs for a single query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
	pub max_results: usize,
	pub min_query_chars: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			max_results: DEFAULT_MAX_RESULTS,
			min_query_chars: MIN_QUERY_CHARS,
		}
	}
}

impl SearchOptions {
	#[must_use]
	pub fn compact() -> Self {
		Self {
			max_results: COMPACT_MAX_RESULTS,
			..Self::default()
		}
	}

	/// Trim `raw` and return it when it is long enough to search for.
	#[must_use]
	pub fn accept<'q>(&self, raw: &'q str) -> Option<&'q str> {
		let query = raw.trim();
		(char_len(query) >= self.min_query_chars).then_some(query)
	}
}

/// Whether `entry` matches `query` in its title, category or full text.
#[must_use]
pub fn matches(entry: &SearchEntry, query: &str) -> bool {
	contains_ignore_case(entry.title(), query)
		|| contains_ignore_case(entry.category(), query)
		|| entry
			.full_text()
			.is_some_and(|text| contains_ignore_case(text, query))
}

/// Indices into `index` of the ranked, capped matches for `query`.
///
/// `query` is used as given; callers screen it with
/// [`SearchOptions::accept`] first.
#[must_use]
pub fn search(index: &SearchIndex, query: &str, options: &SearchOptions) -> Vec<usize> {
	let entries = index.entries();
	let mut hits: Vec<usize> = entries
		.iter()
		.enumerate()
		.filter(|(_, entry)| matches(entry, query))
		.map(|(position, _)| position)
		.collect();

	// `sort_by` is stable, so entries that tie on every rule keep index order.
	hits.sort_by(|&a, &b| compare(&entries[a], &entries[b], query));
	hits.truncate(options.max_results);
	hits
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entry::{Locator, NodeId, NodeKind};

	fn heading(title: &str, node: usize) -> SearchEntry {
		SearchEntry::new(
			title,
			Locator::Node {
				node: NodeId(node),
				kind: NodeKind::Heading { level: 2 },
			},
			"Current Page",
			None,
		)
		.unwrap()
	}

	fn content(title: &str, full: &str, node: usize) -> SearchEntry {
		SearchEntry::new(
			title,
			Locator::Node {
				node: NodeId(node),
				kind: NodeKind::Content,
			},
			"Current Page",
			Some(full.to_string()),
		)
		.unwrap()
	}

	fn page(title: &str, category: &str) -> SearchEntry {
		SearchEntry::page(title, format!("/k/{}/", title.len()), category).unwrap()
	}

	fn titles<'a>(index: &'a SearchIndex, hits: &[usize]) -> Vec<&'a str> {
		hits.iter()
			.map(|&i| index.get(i).unwrap().title())
			.collect()
	}

	#[test]
	fn accept_trims_and_enforces_minimum_length() {
		let options = SearchOptions::default();
		assert_eq!(options.accept("  ab "), Some("ab"));
		assert_eq!(options.accept(" a "), None);
		assert_eq!(options.accept(""), None);
		assert_eq!(options.accept("é"), None);
	}

	#[test]
	fn matches_title_category_or_full_text() {
		let index: SearchIndex = [
			page("Firewalls", "Network Security"),
			content("Intro...", "the kerberos ticket flow", 1),
			heading("Unrelated", 2),
		]
		.into_iter()
		.collect();

		let options = SearchOptions::default();
		assert_eq!(titles(&index, &search(&index, "fire", &options)), ["Firewalls"]);
		assert_eq!(titles(&index, &search(&index, "network", &options)), ["Firewalls"]);
		assert_eq!(titles(&index, &search(&index, "KERBEROS", &options)), ["Intro..."]);
		assert!(search(&index, "zzz", &options).is_empty());
	}

	#[test]
	fn security_scenario_prefers_prefix_match() {
		let index: SearchIndex = [
			page("Network Security Fundamentals", "Network Security"),
			heading("Security Protocols", 1),
		]
		.into_iter()
		.collect();

		let hits = search(&index, "Security", &SearchOptions::default());
		assert_eq!(
			titles(&index, &hits),
			["Security Protocols", "Network Security Fundamentals"]
		);
	}

	#[test]
	fn exact_title_ranks_first_within_its_type() {
		let index: SearchIndex = [
			heading("Kerberos delegation attacks", 1),
			heading("Abusing Kerberos", 2),
			heading("Kerberos", 3),
		]
		.into_iter()
		.collect();

		let hits = search(&index, "kerberos", &SearchOptions::default());
		assert_eq!(titles(&index, &hits)[0], "Kerberos");
	}

	#[test]
	fn results_are_capped_and_repeatable() {
		let index: SearchIndex = (0..20)
			.map(|i| heading(&format!("Layer {i}"), i))
			.chain((0..5).map(|i| page(&format!("Layer page {i}"), "Layers")))
			.collect();

		let options = SearchOptions::default();
		let first = search(&index, "layer", &options);
		let second = search(&index, "layer", &options);
		assert_eq!(first.len(), DEFAULT_MAX_RESULTS);
		assert_eq!(first, second);

		let compact = search(&index, "layer", &SearchOptions::compact());
		assert_eq!(compact.len(), COMPACT_MAX_RESULTS);
		assert_eq!(compact[..], first[..COMPACT_MAX_RESULTS]);
	}
}
