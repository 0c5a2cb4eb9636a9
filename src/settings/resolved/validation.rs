use kbseek_tui::style::by_name;

use super::{ConfigSources, ResolvedConfig, SettingsError};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), SettingsError> {
	let search = &config.search.search;
	if search.max_results == 0 {
		return Err(SettingsError::invalid(
			"search.max_results",
			search.max_results.to_string(),
			sources.source_for_max_results(),
			"must be greater than zero",
		));
	}

	if search.min_query_chars == 0 {
		return Err(SettingsError::invalid(
			"search.min_query_len",
			search.min_query_chars.to_string(),
			sources.source_for_min_query_len(),
			"must be at least 1",
		));
	}

	if let Some(theme) = &config.theme
		&& by_name(theme).is_none()
	{
		return Err(SettingsError::invalid(
			"ui.theme",
			theme.clone(),
			sources.source_for_theme(),
			"unknown theme; see --list-themes",
		));
	}

	let prefix = &config.knowledge_prefix;
	if !prefix.starts_with('/') || !prefix.ends_with('/') {
		return Err(SettingsError::invalid(
			"site.knowledge_prefix",
			prefix.clone(),
			sources.source_for_knowledge_prefix(),
			"must start and end with `/`",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use kbseek_core::SearchConfig;

	use super::super::{SearchPreset, SettingSource};
	use super::*;
	use crate::site::SiteLayout;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			site: SiteLayout::new("/tmp"),
			site_title: "Site".into(),
			knowledge_prefix: "/kb/".into(),
			preset: SearchPreset::Default,
			search: SearchConfig::default(),
			theme: None,
			initial_query: String::new(),
			start_page: "/".into(),
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_results() {
		let mut config = config();
		config.search.search.max_results = 0;
		let sources = ConfigSources {
			max_results: Some(SettingSource::CliFlag("--limit")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "search.max_results");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_unknown_theme() {
		let mut config = config();
		config.theme = Some("neon".into());
		let sources = ConfigSources {
			theme: Some(SettingSource::Environment("KBSEEK__UI__THEME")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "ui.theme");
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn validation_rejects_unanchored_prefix() {
		let mut config = config();
		config.knowledge_prefix = "kb".into();
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "site.knowledge_prefix");
		assert!(err.to_string().contains("configuration key"));
	}
}
