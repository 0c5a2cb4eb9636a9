//! What the terminal front-end needs from the site it browses.

use kbseek_core::{FetchedPage, LoadError, ManifestError, NavStructure, SearchConfig};

use crate::style::Theme;

/// Source of site data. Calls run on worker threads.
pub trait SiteSource: Send + Sync + 'static {
	/// Raw bytes of the page manifest.
	fn manifest(&self) -> Result<Vec<u8>, ManifestError>;

	/// The article published at `url`.
	fn page(&self, url: &str) -> Result<FetchedPage, LoadError>;
}

/// Startup options of the browser.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
	pub search: SearchConfig,
	/// Appended to article headings to form the window title.
	pub site_title: String,
	/// URL prefix of knowledge pages, stripped when nesting the sidebar.
	pub knowledge_prefix: String,
	/// Declared sidebar structure; derived from the manifest when absent.
	pub navigation: Option<NavStructure>,
	pub initial_query: String,
	pub start_page: String,
	pub theme: Theme,
}

impl Default for BrowseOptions {
	fn default() -> Self {
		Self {
			search: SearchConfig::default(),
			site_title: "EM cybertrack".to_string(),
			knowledge_prefix: "/experience/knowledge/".to_string(),
			navigation: None,
			initial_query: String::new(),
			start_page: "/".to_string(),
			theme: Theme::default(),
		}
	}
}
