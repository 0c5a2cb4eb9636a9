//! Hugo-style site directory.
//!
//! A site keeps its markdown under `content/` and the generated page manifest
//! under `public/index.json`. Page URLs map onto the content tree the way
//! Hugo's section and leaf bundles do.

mod error;

use std::fs;
use std::path::{Component, Path, PathBuf};

use kbseek_core::{
	FetchedPage, LoadError, ManifestError, NavStructure, PageContent, PageRecord, parse_manifest,
	parse_markdown,
};
use kbseek_tui::SiteSource;
use tracing::{debug, trace};

pub use error::SiteError;

/// Where the pieces of a site live. Relative paths are taken from `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
	pub root: PathBuf,
	pub manifest: PathBuf,
	pub content_dir: PathBuf,
	/// Declared sidebar structure, if the site ships one.
	pub navigation: Option<PathBuf>,
}

impl SiteLayout {
	pub const DEFAULT_MANIFEST: &'static str = "public/index.json";
	pub const DEFAULT_CONTENT_DIR: &'static str = "content";

	/// Default layout under `root`.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			manifest: PathBuf::from(Self::DEFAULT_MANIFEST),
			content_dir: PathBuf::from(Self::DEFAULT_CONTENT_DIR),
			navigation: None,
		}
	}

	fn under_root(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.root.join(path)
		}
	}

	pub fn manifest_path(&self) -> PathBuf {
		self.under_root(&self.manifest)
	}

	pub fn content_path(&self) -> PathBuf {
		self.under_root(&self.content_dir)
	}

	pub fn navigation_path(&self) -> Option<PathBuf> {
		self.navigation.as_deref().map(|path| self.under_root(path))
	}
}

/// A site on the local filesystem.
#[derive(Debug, Clone)]
pub struct SiteDir {
	layout: SiteLayout,
}

impl SiteDir {
	pub fn open(layout: SiteLayout) -> Result<Self, SiteError> {
		if !layout.root.is_dir() {
			return Err(SiteError::NotADirectory { path: layout.root });
		}
		debug!(root = %layout.root.display(), "site opened");
		Ok(Self { layout })
	}

	pub fn read_manifest(&self) -> Result<Vec<u8>, SiteError> {
		let path = self.layout.manifest_path();
		fs::read(&path).map_err(|err| SiteError::io(path, err))
	}

	/// Read and decode the manifest.
	pub fn pages(&self) -> anyhow::Result<Vec<PageRecord>> {
		let bytes = self.read_manifest()?;
		Ok(parse_manifest(&bytes)?)
	}

	/// The declared sidebar structure, when the layout names one.
	pub fn navigation(&self) -> Result<Option<NavStructure>, SiteError> {
		let Some(path) = self.layout.navigation_path() else {
			return Ok(None);
		};
		let text = fs::read_to_string(&path).map_err(|err| SiteError::io(&path, err))?;
		toml::from_str(&text)
			.map(Some)
			.map_err(|source| SiteError::Navigation { path, source })
	}

	/// Markdown file behind `url`, if any.
	///
	/// `/a/b/` is looked up as `a/b.md`, then `a/b/index.md`, then
	/// `a/b/_index.md`; the site root only has the last two forms. URLs
	/// that try to climb out of the content directory resolve to nothing.
	pub fn resolve_page(&self, url: &str) -> Option<PathBuf> {
		let path = url.split(['?', '#']).next().unwrap_or_default();
		let relative: PathBuf = path.split('/').filter(|segment| !segment.is_empty()).collect();
		if relative
			.components()
			.any(|component| !matches!(component, Component::Normal(_)))
		{
			return None;
		}

		let base = self.layout.content_path().join(&relative);
		let mut candidates = Vec::with_capacity(3);
		if relative.components().next().is_some() {
			candidates.push(base.with_extension("md"));
		}
		candidates.push(base.join("index.md"));
		candidates.push(base.join("_index.md"));
		let found = candidates.into_iter().find(|candidate| candidate.is_file());
		trace!(url, found = ?found, "page resolved");
		found
	}

	/// Parse the page at `url`.
	pub fn load_page(&self, url: &str) -> Result<PageContent, SiteError> {
		let path = self
			.resolve_page(url)
			.ok_or_else(|| SiteError::PageNotFound { url: url.to_string() })?;
		let source = fs::read_to_string(&path).map_err(|err| SiteError::io(&path, err))?;
		Ok(parse_markdown(url, &source))
	}
}

impl SiteSource for SiteDir {
	fn manifest(&self) -> Result<Vec<u8>, ManifestError> {
		self.read_manifest().map_err(|err| ManifestError::Unavailable {
			reason: err.to_string(),
		})
	}

	fn page(&self, url: &str) -> Result<FetchedPage, LoadError> {
		match self.load_page(url) {
			Ok(page) if page.blocks.is_empty() => Ok(FetchedPage::NoArticle),
			Ok(page) => Ok(FetchedPage::Article(page)),
			Err(SiteError::PageNotFound { url }) => Err(LoadError::NotFound { url }),
			Err(err) => Err(LoadError::Failed {
				url: url.to_string(),
				reason: err.to_string(),
			}),
		}
	}
}
