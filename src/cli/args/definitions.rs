use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser, Subcommand};

use super::options::{OutputFormat, SearchPresetArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `kbseek` binary.
#[derive(Parser, Debug)]
#[command(
	name = "kbseek",
	version,
	long_version = long_version(),
	about = "Search and browse a static knowledge-base site",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "KBSEEK_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		global = true,
		help = "Site directory to read (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		long,
		value_name = "THEME",
		global = true,
		help = "Select a theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		value_enum,
		global = true,
		help = "Search box preset controlling the result cap (default: default)"
	)]
	pub(crate) preset: Option<SearchPresetArg>,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

impl CliArgs {
	/// The subcommand to run; browsing when none was given.
	pub(crate) fn command(&self) -> Command {
		self.command.clone().unwrap_or_default()
	}
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	/// Browse the site interactively.
	Browse {
		#[arg(
			short = 'q',
			long,
			value_name = "QUERY",
			help = "Provide an initial search query (default: empty)"
		)]
		query: Option<String>,
		#[arg(
			long,
			value_name = "URL",
			help = "Page to open first (default: /)"
		)]
		page: Option<String>,
	},
	/// Run one query and print the ranked results.
	Search {
		query: String,
		#[arg(
			long,
			value_name = "URL",
			help = "Also index the headings and paragraphs of this page"
		)]
		page: Option<String>,
		#[arg(
			short = 'm',
			long,
			value_name = "NUM",
			help = "Cap the number of results (default: preset value)"
		)]
		limit: Option<usize>,
		#[arg(
			short = 'f',
			long,
			value_enum,
			default_value_t = OutputFormat::Plain,
			help = "Choose how to print the results"
		)]
		format: OutputFormat,
	},
	/// Print the sidebar navigation tree.
	Tree {
		#[arg(
			long,
			value_name = "URL",
			help = "Mark this page active and expand the folders around it"
		)]
		current: Option<String>,
	},
	/// List posts, optionally restricted to one tag.
	Posts {
		#[arg(
			short = 't',
			long,
			value_name = "TAG",
			default_value = "all",
			help = "Only list posts carrying this tag"
		)]
		tag: String,
	},
}

impl Default for Command {
	fn default() -> Self {
		Self::Browse {
			query: None,
			page: None,
		}
	}
}

impl Command {
	/// Whether the command takes over the terminal.
	pub(crate) fn is_interactive(&self) -> bool {
		matches!(self, Self::Browse { .. })
	}
}
