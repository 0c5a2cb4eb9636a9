//! Small text helpers shared by the index builder, the ranker and the
//! highlighter.
//!
//! Matching is case-insensitive and works one `char` at a time so that byte
//! offsets reported back to callers always land on character boundaries of
//! the original string, even when lowercasing would change its length.

use std::ops::Range;

/// Marker appended to snippets that were cut short.
pub const ELLIPSIS: &str = "...";

/// Compare two characters ignoring case.
fn chars_eq(a: char, b: char) -> bool {
	a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte ranges of every non-overlapping, case-insensitive occurrence of
/// `needle` in `haystack`, scanned left to right.
#[must_use]
pub fn find_all(haystack: &str, needle: &str) -> Vec<Range<usize>> {
	let needle: Vec<char> = needle.chars().collect();
	if needle.is_empty() {
		return Vec::new();
	}

	let hay: Vec<(usize, char)> = haystack.char_indices().collect();
	let mut ranges = Vec::new();
	let mut start = 0;
	while start + needle.len() <= hay.len() {
		let matched = needle
			.iter()
			.zip(&hay[start..])
			.all(|(&n, &(_, h))| chars_eq(h, n));
		if matched {
			let end = start + needle.len();
			let end_byte = hay.get(end).map_or(haystack.len(), |&(offset, _)| offset);
			ranges.push(hay[start].0..end_byte);
			start = end;
		} else {
			start += 1;
		}
	}
	ranges
}

/// Whether `needle` occurs anywhere in `haystack`, ignoring case.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	if needle.is_empty() {
		return true;
	}
	let needle: Vec<char> = needle.chars().collect();
	let hay: Vec<char> = haystack.chars().collect();
	hay.windows(needle.len())
		.any(|window| window.iter().zip(&needle).all(|(&h, &n)| chars_eq(h, n)))
}

/// Whether `haystack` begins with `prefix`, ignoring case.
#[must_use]
pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
	let mut hay = haystack.chars();
	prefix
		.chars()
		.all(|p| hay.next().is_some_and(|h| chars_eq(h, p)))
}

/// Turn a URL slug such as `active-directory` or `red_team` into
/// `Active Directory` / `Red Team`.
#[must_use]
pub fn format_title(segment: &str) -> String {
	segment
		.replace(['-', '_'], " ")
		.split(' ')
		.map(capitalize)
		.collect::<Vec<_>>()
		.join(" ")
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Non-empty `/`-separated segments of a URL path.
#[must_use]
pub fn path_segments(url: &str) -> Vec<&str> {
	url.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Take the first `max_chars` characters of `text`, appending [`ELLIPSIS`]
/// when anything was dropped.
#[must_use]
pub fn snippet(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
		None => text.to_string(),
	}
}

/// Length of `text` in characters.
#[must_use]
pub fn char_len(text: &str) -> usize {
	text.chars().count()
}
