use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::input::SearchInput;
use crate::style::Theme;

/// Glyph in front of the query.
pub(crate) const PROMPT_SYMBOL: &str = "🔍 ";

/// Argument bundle for rendering the input row.
pub struct InputContext<'a, 'b> {
	pub search_input: &'a mut SearchInput<'b>,
	/// Shown while the input is empty.
	pub placeholder: &'a str,
	pub area: Rect,
	pub theme: &'a Theme,
}

/// Right-aligned activity indicator.
pub struct ProgressState<'a> {
	/// Empty when nothing is going on.
	pub progress_text: &'a str,
	pub busy: bool,
	pub throbber_state: &'a ThrobberState,
}

/// Render the prompt, the input and the activity indicator on one row.
pub fn render_input(frame: &mut Frame, input: InputContext<'_, '_>, progress: ProgressState<'_>) {
	let InputContext {
		search_input,
		placeholder,
		area,
		theme,
	} = input;
	if area.width == 0 || area.height == 0 {
		return;
	}

	let [prompt_area, text_area] = Layout::horizontal([
		Constraint::Length(Line::from(PROMPT_SYMBOL).width() as u16),
		Constraint::Fill(1),
	])
	.areas(area);
	frame.render_widget(Span::styled(PROMPT_SYMBOL, theme.prompt), prompt_area);
	search_input.render(frame, text_area, ratatui::style::Style::default());

	if search_input.text().is_empty() && !placeholder.is_empty() {
		let line = Line::from(Span::styled(placeholder, theme.empty_style()));
		// Leave the first cell to the cursor.
		let offset = u16::from(search_input.is_focused()).min(text_area.width);
		frame.buffer_mut().set_line(
			text_area.x + offset,
			text_area.y,
			&line,
			text_area.width - offset,
		);
	}

	render_progress(frame, text_area, progress, theme);
}

fn render_progress(frame: &mut Frame, area: Rect, progress: ProgressState<'_>, theme: &Theme) {
	let ProgressState {
		progress_text,
		busy,
		throbber_state,
	} = progress;
	if progress_text.is_empty() {
		return;
	}

	let muted = theme.empty_style();
	let mut line = Line::default();
	if busy {
		let spinner = Throbber::default().style(muted).throbber_style(muted);
		line.spans.push(spinner.to_symbol_span(throbber_state));
	}
	line.spans.push(Span::styled(progress_text.to_string(), muted));

	let width = line.width() as u16;
	let buffer = frame.buffer_mut();
	// Keep clear of the typed text.
	let text_end = (area.left()..area.right())
		.rev()
		.find(|&x| {
			buffer
				.cell((x, area.top()))
				.is_some_and(|cell| !cell.symbol().trim().is_empty())
		})
		.map_or(area.left(), |x| x.saturating_add(3));
	let start = area.right().saturating_sub(width).max(text_end);
	if start >= area.right() {
		return;
	}
	buffer.set_line(start, area.top(), &line, area.right() - start);
}
