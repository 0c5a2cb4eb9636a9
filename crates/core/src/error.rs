use thiserror::Error;

/// Reasons a page manifest could not be used.
///
/// None of these are fatal: callers log them and carry on with whatever
/// index they can still build.
#[derive(Debug, Error)]
pub enum ManifestError {
	/// The manifest could not be fetched at all.
	#[error("page manifest unavailable: {reason}")]
	Unavailable { reason: String },

	/// The manifest was fetched but is not a JSON array of page records.
	#[error("page manifest is malformed: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Reasons a partial page load failed.
#[derive(Debug, Error)]
pub enum LoadError {
	/// No page exists for the requested URL.
	#[error("no page found for {url}")]
	NotFound { url: String },

	/// The page exists but could not be read.
	#[error("failed to load {url}: {reason}")]
	Failed { url: String, reason: String },
}
