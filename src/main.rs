mod app_dirs;
mod cli;
mod logging;
mod settings;
mod site;
mod workflow;

use anyhow::Result;
use cli::parse_cli;
use logging::LogTarget;
use workflow::Workflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in kbseek_tui::style::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let command = cli.command();
	let target = if command.is_interactive() {
		LogTarget::CacheFile
	} else {
		LogTarget::Stderr
	};
	logging::initialize(target)?;

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	Workflow::from_config(resolved)?.run(command)
}
