use clap::ValueEnum;

/// Search box presets selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchPresetArg {
	Default,
	Compact,
}

impl SearchPresetArg {
	/// Return the preset identifier consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			SearchPresetArg::Default => "default",
			SearchPresetArg::Compact => "compact",
		}
	}
}

/// Output formats supported by the batch commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	#[default]
	Plain,
	Json,
	/// The dropdown markup the site embeds.
	Html,
}
