use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Error, Result, ensure};
use kbseek_core::{SearchConfig, SearchOptions};
use serde::Deserialize;

use super::resolved::{ConfigSources, ResolvedConfig, SearchPreset, SettingSource};
use crate::cli::{CliArgs, Command};
use crate::site::SiteLayout;

const DEFAULT_SITE_TITLE: &str = "EM cybertrack";
const DEFAULT_KNOWLEDGE_PREFIX: &str = "/experience/knowledge/";
const DEFAULT_START_PAGE: &str = "/";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	site: SiteSection,
	search: SearchSection,
	ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SiteSection {
	pub(super) root: Option<PathBuf>,
	pub(super) manifest: Option<PathBuf>,
	pub(super) content_dir: Option<PathBuf>,
	pub(super) navigation: Option<PathBuf>,
	pub(super) title_suffix: Option<String>,
	pub(super) knowledge_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) preset: Option<String>,
	pub(super) max_results: Option<usize>,
	pub(super) min_query_len: Option<usize>,
	pub(super) debounce_ms: Option<u64>,
	pub(super) highlight_ms: Option<u64>,
	pub(super) auto_select_single: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) theme: Option<String>,
	pub(super) initial_query: Option<String>,
	pub(super) start_page: Option<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.site.root = Some(root);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
		if let Some(preset) = cli.preset {
			self.search.preset = Some(preset.as_str().to_string());
		}
		match cli.command() {
			Command::Browse { query, page } => {
				if query.is_some() {
					self.ui.initial_query = query;
				}
				if page.is_some() {
					self.ui.start_page = page;
				}
			}
			Command::Search {
				limit: Some(limit), ..
			} => self.search.max_results = Some(limit),
			Command::Search { .. } | Command::Tree { .. } | Command::Posts { .. } => {}
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let limit_flag = matches!(cli.command(), Command::Search { limit: Some(_), .. });
		let sources = ConfigSources {
			max_results: detect_source(
				limit_flag,
				self.search.max_results.is_some(),
				"KBSEEK__SEARCH__MAX_RESULTS",
				"--limit",
				"search.max_results",
			),
			min_query_len: detect_source(
				false,
				self.search.min_query_len.is_some(),
				"KBSEEK__SEARCH__MIN_QUERY_LEN",
				"",
				"search.min_query_len",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"KBSEEK__UI__THEME",
				"--theme",
				"ui.theme",
			),
			preset: detect_source(
				cli.preset.is_some(),
				self.search.preset.is_some(),
				"KBSEEK__SEARCH__PRESET",
				"--preset",
				"search.preset",
			),
			knowledge_prefix: detect_source(
				false,
				self.site.knowledge_prefix.is_some(),
				"KBSEEK__SITE__KNOWLEDGE_PREFIX",
				"",
				"site.knowledge_prefix",
			),
		};

		let site = self.site.resolve()?;
		let (preset, search) = self.search.resolve(&sources)?;

		let config = ResolvedConfig {
			site: site.layout,
			site_title: site.title_suffix,
			knowledge_prefix: site.knowledge_prefix,
			preset,
			search,
			theme: self.ui.theme,
			initial_query: self.ui.initial_query.unwrap_or_default(),
			start_page: self
				.ui
				.start_page
				.unwrap_or_else(|| DEFAULT_START_PAGE.to_string()),
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

struct SiteResolution {
	layout: SiteLayout,
	title_suffix: String,
	knowledge_prefix: String,
}

impl SiteSection {
	fn resolve(self) -> Result<SiteResolution> {
		let root = resolve_root(self.root)?;
		let mut layout = SiteLayout::new(root);
		if let Some(manifest) = self.manifest {
			layout.manifest = manifest;
		}
		if let Some(content_dir) = self.content_dir {
			layout.content_dir = content_dir;
		}
		layout.navigation = self.navigation;

		Ok(SiteResolution {
			layout,
			title_suffix: self
				.title_suffix
				.unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
			knowledge_prefix: self
				.knowledge_prefix
				.unwrap_or_else(|| DEFAULT_KNOWLEDGE_PREFIX.to_string()),
		})
	}
}

impl SearchSection {
	fn resolve(self, sources: &ConfigSources) -> Result<(SearchPreset, SearchConfig)> {
		let preset = match self.preset.as_deref() {
			None => SearchPreset::Default,
			Some(name) => SearchPreset::from_name(name).ok_or_else(|| {
				super::resolved::SettingsError::invalid(
					"search.preset",
					name,
					sources.source_for_preset(),
					"expected `default` or `compact`",
				)
			})?,
		};

		let mut search = SearchConfig {
			search: preset.options(),
			..SearchConfig::default()
		};
		if let Some(max_results) = self.max_results {
			search.search.max_results = max_results;
		}
		if let Some(min_query_len) = self.min_query_len {
			search.search.min_query_chars = min_query_len;
		}
		if let Some(debounce) = self.debounce_ms {
			search.debounce = Duration::from_millis(debounce);
		}
		if let Some(highlight) = self.highlight_ms {
			search.highlight = Duration::from_millis(highlight);
		}
		if let Some(auto_select) = self.auto_select_single {
			search.auto_select_single = auto_select;
		}
		Ok((preset, search))
	}
}

impl SearchPreset {
	fn from_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"default" => Some(Self::Default),
			"compact" => Some(Self::Compact),
			_ => None,
		}
	}

	fn options(self) -> SearchOptions {
		match self {
			Self::Default => SearchOptions::default(),
			Self::Compact => SearchOptions::compact(),
		}
	}
}

/// Resolve the site root from config, validating it exists and is a directory.
fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
	let mut root = match root {
		Some(path) => path,
		None => env::current_dir().context("failed to determine working directory")?,
	};

	if root.is_relative() {
		root = env::current_dir()
			.context("failed to resolve current directory for root")?
			.join(root);
	}

	root = fs::canonicalize(&root)
		.with_context(|| format!("failed to canonicalize site root {}", root.display()))?;
	ensure!(root.is_dir(), "site root must be a directory");

	Ok(root)
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
