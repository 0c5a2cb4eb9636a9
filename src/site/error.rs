use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading a site directory.
#[derive(Debug, Error)]
pub enum SiteError {
	#[error("site root {} is not a directory", path.display())]
	NotADirectory { path: PathBuf },

	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid navigation structure in {}: {source}", path.display())]
	Navigation {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("no page found for {url}")]
	PageNotFound { url: String },
}

impl SiteError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}
