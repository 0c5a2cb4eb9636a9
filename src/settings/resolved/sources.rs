use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, for error messages.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) max_results: Option<SettingSource>,
	pub(crate) min_query_len: Option<SettingSource>,
	pub(crate) theme: Option<SettingSource>,
	pub(crate) preset: Option<SettingSource>,
	pub(crate) knowledge_prefix: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_max_results(&self) -> SettingSource {
		self.max_results
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.max_results"))
	}

	pub(crate) fn source_for_min_query_len(&self) -> SettingSource {
		self.min_query_len
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.min_query_len"))
	}

	pub(crate) fn source_for_theme(&self) -> SettingSource {
		self.theme
			.clone()
			.unwrap_or(SettingSource::ConfigKey("ui.theme"))
	}

	pub(crate) fn source_for_preset(&self) -> SettingSource {
		self.preset
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.preset"))
	}

	pub(crate) fn source_for_knowledge_prefix(&self) -> SettingSource {
		self.knowledge_prefix
			.clone()
			.unwrap_or(SettingSource::ConfigKey("site.knowledge_prefix"))
	}
}
