//! Emphasis of query occurrences inside result titles.

use std::fmt::Write as _;

use serde::Serialize;

use crate::text::find_all;

/// A run of title text, emphasized or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "lowercase")]
pub enum Segment {
	Plain(String),
	Emphasis(String),
}

impl Segment {
	#[must_use]
	pub fn text(&self) -> &str {
		match self {
			Self::Plain(text) | Self::Emphasis(text) => text,
		}
	}

	#[must_use]
	pub fn is_emphasis(&self) -> bool {
		matches!(self, Self::Emphasis(_))
	}
}

/// Title split into plain and emphasized segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Highlighted {
	segments: Vec<Segment>,
}

impl Highlighted {
	#[must_use]
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Concatenated text with emphasis removed; always equals the input title.
	#[must_use]
	pub fn plain_text(&self) -> String {
		self.segments.iter().map(Segment::text).collect()
	}

	/// Render with custom emphasis delimiters and no escaping.
	#[must_use]
	pub fn to_markup(&self, open: &str, close: &str) -> String {
		let mut out = String::new();
		for segment in &self.segments {
			match segment {
				Segment::Plain(text) => out.push_str(text),
				Segment::Emphasis(text) => {
					out.push_str(open);
					out.push_str(text);
					out.push_str(close);
				}
			}
		}
		out
	}

	/// Render as HTML, escaping text and wrapping matches in `<mark>`.
	#[must_use]
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		for segment in &self.segments {
			match segment {
				Segment::Plain(text) => out.push_str(&escape_html(text)),
				Segment::Emphasis(text) => {
					let _ = write!(out, "<mark>{}</mark>", escape_html(text));
				}
			}
		}
		out
	}
}

/// Wrap every case-insensitive occurrence of `query` in `text`.
#[must_use]
pub fn highlight(text: &str, query: &str) -> Highlighted {
	let mut segments = Vec::new();
	let mut cursor = 0;
	for range in find_all(text, query) {
		if range.start > cursor {
			segments.push(Segment::Plain(text[cursor..range.start].to_string()));
		}
		segments.push(Segment::Emphasis(text[range.clone()].to_string()));
		cursor = range.end;
	}
	if cursor < text.len() {
		segments.push(Segment::Plain(text[cursor..].to_string()));
	}
	Highlighted { segments }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			other => out.push(other),
		}
	}
	out
}
