use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use kbseek_core::search::search;
use kbseek_core::{IndexSources, NavTree, PageRecord, TagFilter};
use kbseek_tui::{BrowseOptions, Theme, by_name};
use tracing::{debug, info, warn};

use crate::cli::{Command, SearchReport, print_posts, print_search, print_tree};
use crate::settings::ResolvedConfig;
use crate::site::SiteDir;

/// Section holding dated posts in the manifest.
const POSTS_SECTION: &str = "posts";

/// Runs one command against the configured site.
pub(crate) struct Workflow {
	config: ResolvedConfig,
	site: SiteDir,
}

impl Workflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let site = SiteDir::open(config.site.clone()).context("failed to open site")?;
		Ok(Self { config, site })
	}

	pub(crate) fn run(self, command: Command) -> Result<()> {
		match command {
			Command::Browse { .. } => self.browse(),
			Command::Search {
				query,
				page,
				format,
				..
			} => {
				let report = self.search_report(&query, page.as_deref())?;
				print_search(&report, format)
			}
			Command::Tree { current } => {
				let current = current.unwrap_or_else(|| self.config.start_page.clone());
				let tree = self.navigation_tree(&current)?;
				print_tree(&tree);
				Ok(())
			}
			Command::Posts { tag } => {
				let posts = self.posts()?;
				let filter = TagFilter::new(&tag);
				let shown: Vec<&PageRecord> =
					posts.iter().filter(|post| filter.shows(&post.tags)).collect();
				debug!(tag, total = posts.len(), shown = shown.len(), "posts filtered");
				print_posts(&shown);
				Ok(())
			}
		}
	}

	fn browse(self) -> Result<()> {
		let options = self.browse_options()?;
		info!(root = %self.config.site.root.display(), "starting browser");
		kbseek_tui::run(Arc::new(self.site), options)
	}

	fn browse_options(&self) -> Result<BrowseOptions> {
		let theme = match &self.config.theme {
			Some(name) => by_name(name).ok_or_else(|| anyhow!("unknown theme: {name}"))?,
			None => Theme::default(),
		};
		Ok(BrowseOptions {
			search: self.config.search,
			site_title: self.config.site_title.clone(),
			knowledge_prefix: self.config.knowledge_prefix.clone(),
			navigation: self.site.navigation()?,
			initial_query: self.config.initial_query.clone(),
			start_page: self.config.start_page.clone(),
			theme,
		})
	}

	/// Index the navigation, the manifest and optionally one page, then run
	/// `query` against it.
	fn search_report(&self, query: &str, page: Option<&str>) -> Result<SearchReport> {
		let options = &self.config.search;
		let accepted = options.search.accept(query).ok_or_else(|| {
			anyhow!(
				"query must be at least {} characters",
				options.search.min_query_chars
			)
		})?;

		let manifest = self.manifest_or_empty();
		let current = page.unwrap_or(&self.config.start_page);
		let navigation = self.tree_from(&manifest, current)?.links();
		let page = page
			.map(|url| self.site.load_page(url))
			.transpose()
			.context("failed to load page")?;

		let sources = IndexSources {
			navigation,
			page,
			manifest,
		};
		let index = sources.build(options.index);
		let results = search(&index, accepted, &options.search);
		debug!(entries = index.len(), results = results.len(), "query executed");
		Ok(SearchReport {
			query: accepted.to_string(),
			index,
			results,
		})
	}

	fn navigation_tree(&self, current: &str) -> Result<NavTree> {
		let manifest = self.manifest_or_empty();
		self.tree_from(&manifest, current)
	}

	/// Declared structure when the site has one, otherwise the manifest tree.
	fn tree_from(&self, manifest: &[PageRecord], current: &str) -> Result<NavTree> {
		Ok(match self.site.navigation()? {
			Some(structure) => NavTree::from_structure(&structure, current),
			None => NavTree::from_manifest(manifest, current, &self.config.knowledge_prefix),
		})
	}

	/// Manifest pages; an unusable manifest leaves the index without them.
	fn manifest_or_empty(&self) -> Vec<PageRecord> {
		self.site.pages().unwrap_or_else(|err| {
			warn!(error = %err, "manifest unavailable; continuing without it");
			Vec::new()
		})
	}

	/// Posts from the manifest, newest first.
	fn posts(&self) -> Result<Vec<PageRecord>> {
		let mut posts: Vec<PageRecord> = self
			.site
			.pages()?
			.into_iter()
			.filter(|page| page.section == POSTS_SECTION)
			.collect();
		posts.sort_by(|a, b| b.date.cmp(&a.date));
		Ok(posts)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::Path;

	use kbseek_core::SearchConfig;
	use tempfile::TempDir;

	use super::*;
	use crate::settings::SearchPreset;
	use crate::site::SiteLayout;

	const MANIFEST: &str = r#"[
		{"permalink": "https://example.org/experience/knowledge/network-security/fundamentals/",
		 "title": "Network Security Fundamentals", "content": "Firewalls and ports.",
		 "section": "experience", "type": "knowledge"},
		{"permalink": "/posts/ctf-writeup/", "title": "CTF Writeup", "section": "posts",
		 "type": "posts", "date": "2024-05-02", "tags": ["ctf", "web"]},
		{"permalink": "/posts/hello/", "title": "Hello", "section": "posts",
		 "type": "posts", "date": "2023-01-10", "tags": ["meta"]}
	]"#;

	fn fixture() -> TempDir {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path();
		fs::create_dir_all(root.join("public")).unwrap();
		fs::write(root.join("public/index.json"), MANIFEST).unwrap();
		let page = root.join("content/experience/knowledge/network-security/fundamentals");
		fs::create_dir_all(&page).unwrap();
		fs::write(
			page.join("index.md"),
			"# Fundamentals\n\n## Security Protocols\n\nTLS protects traffic in transit across untrusted networks of every kind.\n",
		)
		.unwrap();
		dir
	}

	fn workflow(root: &Path) -> Workflow {
		let config = ResolvedConfig {
			site: SiteLayout::new(root),
			site_title: "EM cybertrack".into(),
			knowledge_prefix: "/experience/knowledge/".into(),
			preset: SearchPreset::Default,
			search: SearchConfig::default(),
			theme: None,
			initial_query: String::new(),
			start_page: "/".into(),
		};
		Workflow::from_config(config).unwrap()
	}

	#[test]
	fn search_combines_manifest_navigation_and_page() {
		let dir = fixture();
		let report = workflow(dir.path())
			.search_report(
				"security",
				Some("/experience/knowledge/network-security/fundamentals/"),
			)
			.unwrap();
		let titles: Vec<&str> = report
			.results
			.iter()
			.map(|&position| report.index.get(position).unwrap().title())
			.collect();
		assert!(titles.contains(&"Network Security Fundamentals"));
		assert!(titles.contains(&"Security Protocols"));
	}

	#[test]
	fn short_queries_are_rejected() {
		let dir = fixture();
		let err = workflow(dir.path()).search_report("a", None).unwrap_err();
		assert!(err.to_string().contains("at least 2"));
	}

	#[test]
	fn tree_nests_knowledge_pages() {
		let dir = fixture();
		let tree = workflow(dir.path())
			.navigation_tree("/experience/knowledge/network-security/fundamentals/")
			.unwrap();
		let rows = tree.visible("");
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].item.label(), "Network Security");
		assert_eq!(rows[1].item.label(), "Network Security Fundamentals");
	}

	#[test]
	fn posts_are_newest_first() {
		let dir = fixture();
		let posts = workflow(dir.path()).posts().unwrap();
		let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
		assert_eq!(titles, ["CTF Writeup", "Hello"]);
	}

	#[test]
	fn missing_manifest_degrades_search() {
		let dir = fixture();
		fs::remove_file(dir.path().join("public/index.json")).unwrap();
		let report = workflow(dir.path())
			.search_report(
				"protocols",
				Some("/experience/knowledge/network-security/fundamentals/"),
			)
			.unwrap();
		assert_eq!(report.results.len(), 1);
	}
}
