use ratatui::style::{Color, Style};

/// A theme containing styles for various UI elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Style for borders, headers and the result count.
	pub header: Style,
	/// Style for the selected result or sidebar row.
	pub row_highlight: Style,
	/// Style for the search prompt.
	pub prompt: Style,
	/// Style for placeholders, hints and empty states.
	pub empty: Style,
	/// Style for query matches inside result titles.
	pub highlight: Style,
	/// Style for the sidebar link of the page on screen.
	pub active: Style,
	/// Style for article headings.
	pub heading: Style,
	/// Style for an article block jumped to from a result.
	pub flash: Style,
}

impl Theme {
	/// Muted style used for placeholders and progress text.
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	/// Foreground of the header style, for borders.
	#[must_use]
	pub fn border_style(&self) -> Style {
		Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
	}
}

/// Describes a theme instance that can be selected by name.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	/// Whether `name` refers to this theme, ignoring case.
	#[must_use]
	pub fn answers_to(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
			|| self
				.aliases
				.iter()
				.any(|alias| alias.eq_ignore_ascii_case(name))
	}
}
