use std::cmp::Ordering;

use crate::entry::SearchEntry;
use crate::text::{char_len, starts_with_ignore_case};

/// Relevance order of two matching entries.
///
/// Rules are applied in turn until one separates the entries:
/// 1. titles starting with the query come first;
/// 2. pages before in-page entries;
/// 3. headings before paragraphs;
/// 4. shorter titles first.
#[must_use]
pub fn compare(a: &SearchEntry, b: &SearchEntry, query: &str) -> Ordering {
	let a_prefix = starts_with_ignore_case(a.title(), query);
	let b_prefix = starts_with_ignore_case(b.title(), query);

	b_prefix
		.cmp(&a_prefix)
		.then_with(|| a.kind().priority().cmp(&b.kind().priority()))
		.then_with(|| char_len(a.title()).cmp(&char_len(b.title())))
}
