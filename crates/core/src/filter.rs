//! Tag filter of the post listing.

use std::str::FromStr;

/// Value of the "show everything" filter button.
pub const ALL_TAGS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
	#[default]
	All,
	Tag(String),
}

impl TagFilter {
	#[must_use]
	pub fn new(value: &str) -> Self {
		if value == ALL_TAGS {
			Self::All
		} else {
			Self::Tag(value.to_string())
		}
	}

	/// Whether a post carrying `tags` stays visible. Tags must match exactly.
	#[must_use]
	pub fn shows<S: AsRef<str>>(&self, tags: &[S]) -> bool {
		match self {
			Self::All => true,
			Self::Tag(wanted) => tags.iter().any(|tag| tag.as_ref() == wanted),
		}
	}
}

impl FromStr for TagFilter {
	type Err = std::convert::Infallible;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Ok(Self::new(value))
	}
}
