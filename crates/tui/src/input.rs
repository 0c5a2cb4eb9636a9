//! Single-line search input backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// Query input that never grows past one line.
pub struct SearchInput<'a> {
	textarea: TextArea<'a>,
	focused: bool,
}

impl<'a> SearchInput<'a> {
	/// Create an input pre-filled with `initial`, cursor at the end.
	#[must_use]
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(CursorMove::End);
		Self {
			textarea,
			focused: true,
		}
	}

	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Feed a key press. Returns `true` when the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		// Newlines would turn the query into several lines.
		if matches!(key.code, KeyCode::Enter)
			|| (key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL))
		{
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(key);
		self.text() != before
	}

	/// Empty the input.
	pub fn clear(&mut self) {
		self.textarea = TextArea::default();
		self.textarea.set_cursor_line_style(Style::default());
	}

	#[must_use]
	pub fn is_focused(&self) -> bool {
		self.focused
	}

	pub fn set_focused(&mut self, focused: bool) {
		self.focused = focused;
	}

	/// Draw the input, hiding the cursor while unfocused.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, style: Style) {
		let cursor = if self.focused {
			Style::default().add_modifier(ratatui::style::Modifier::REVERSED)
		} else {
			Style::default()
		};
		self.textarea.set_cursor_style(cursor);
		self.textarea.set_style(style);
		frame.render_widget(&self.textarea, area);
	}
}
