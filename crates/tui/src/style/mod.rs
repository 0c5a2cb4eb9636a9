//! Visual styling utilities.
//!
//! Themes are the color schemes applied to the terminal UI. They are read
//! from TOML documents compiled into the crate.

pub mod theme;

pub use theme::{Theme, ThemeRegistration, builtin_themes, by_name, default_theme, names};

/// Aggregate container for styling knobs.
#[derive(Clone, Debug, Default)]
pub struct StyleConfig {
	/// The active theme for the UI.
	pub theme: Theme,
}

impl StyleConfig {
	/// Creates a new style configuration with the given theme.
	#[must_use]
	pub fn with_theme(theme: Theme) -> Self {
		Self { theme }
	}
}
