use kbseek_core::SearchConfig;

use crate::site::SiteLayout;

mod errors;
mod sources;
mod summary;
mod validation;

pub use errors::SettingsError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Search box preset: how many results the dropdown shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPreset {
	Default,
	Compact,
}

impl SearchPreset {
	pub fn name(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Compact => "compact",
		}
	}
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub site: SiteLayout,
	/// Appended to article headings in the window title.
	pub site_title: String,
	pub knowledge_prefix: String,
	pub preset: SearchPreset,
	pub search: SearchConfig,
	pub theme: Option<String>,
	pub initial_query: String,
	pub start_page: String,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), SettingsError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
