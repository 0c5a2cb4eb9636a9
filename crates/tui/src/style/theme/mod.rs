mod loader;
mod types;

use std::sync::OnceLock;

use loader::{BUILTIN_DOCUMENTS, BuiltinThemes, load_builtin_themes};
use ratatui::style::{Color, Modifier, Style};
use tracing::error;

pub use types::{Theme, ThemeRegistration};

fn builtins() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(BUILTIN_DOCUMENTS).unwrap_or_else(|err| {
			error!("failed to load built-in themes: {err:#}");
			BuiltinThemes {
				registrations: Vec::new(),
				default_theme: fallback_theme(),
			}
		})
	})
}

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	builtins().default_theme
}

/// Return the built-in themes bundled with the application.
#[must_use]
pub fn builtin_themes() -> Vec<ThemeRegistration> {
	builtins().registrations.clone()
}

/// Look a theme up by name or alias.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	builtins()
		.registrations
		.iter()
		.find(|registration| registration.answers_to(name.trim()))
		.map(|registration| registration.theme)
}

/// Names of the built-in themes.
#[must_use]
pub fn names() -> Vec<String> {
	builtins()
		.registrations
		.iter()
		.map(|registration| registration.name.clone())
		.collect()
}

/// Plain ANSI theme used if the embedded theme documents cannot be read.
fn fallback_theme() -> Theme {
	let bold = Style::new().add_modifier(Modifier::BOLD);
	Theme {
		header: bold.fg(Color::Blue),
		row_highlight: Style::new().add_modifier(Modifier::REVERSED),
		prompt: bold.fg(Color::Magenta),
		empty: Style::new().fg(Color::DarkGray),
		highlight: bold.fg(Color::Yellow),
		active: bold.fg(Color::Green),
		heading: bold.fg(Color::Cyan),
		flash: Style::new().bg(Color::DarkGray),
	}
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}
