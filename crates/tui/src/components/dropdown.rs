//! Results dropdown drawn over the page below the search input.

use kbseek_core::highlight::Segment;
use kbseek_core::render::{NAVIGATION_HINT, SEARCH_ICON};
use kbseek_core::{DropdownView, ResultRow};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
const COLUMN_SPACING: u16 = 1;
/// Borders take one row above and one below the rows.
const BORDER_ROWS: u16 = 2;

/// Height the dropdown needs for `view`, before clamping to the screen.
#[must_use]
pub fn dropdown_height(view: &DropdownView) -> u16 {
	match view {
		DropdownView::Hidden => 0,
		DropdownView::NoResults { .. } => 1 + BORDER_ROWS,
		DropdownView::Results { rows } => u16::try_from(rows.len())
			.unwrap_or(u16::MAX)
			.saturating_add(BORDER_ROWS),
	}
}

/// Area of the first result row inside a dropdown drawn at `area`.
#[must_use]
pub fn rows_area(area: Rect) -> Rect {
	Block::default().borders(Borders::ALL).inner(area)
}

/// Draw `view` into `area`, clearing whatever was underneath.
pub fn render_dropdown(frame: &mut Frame, area: Rect, view: &DropdownView, theme: &Theme) {
	if !view.is_visible() || area.height == 0 {
		return;
	}
	frame.render_widget(Clear, area);

	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.border_style(theme.border_style());
	if let Some(header) = view.header() {
		block = block
			.title(Line::from(Span::styled(format!(" {header} "), theme.header)))
			.title_bottom(Line::from(Span::styled(format!(" {NAVIGATION_HINT} "), theme.empty_style())).right_aligned());
	}
	let inner = block.inner(area);
	frame.render_widget(block, area);

	match view {
		DropdownView::Hidden => {}
		DropdownView::NoResults { query } => {
			let message = format!("{SEARCH_ICON} No results found for \"{query}\"");
			frame.render_widget(Paragraph::new(message).style(theme.empty_style()), inner);
		}
		DropdownView::Results { rows } => {
			let type_width = rows.iter().map(|row| row.type_label.width()).max().unwrap_or(0);
			let widths = [
				Constraint::Length(2),
				Constraint::Fill(3),
				Constraint::Length(type_width as u16),
				Constraint::Fill(1),
			];
			let mut state = TableState::default();
			state.select(rows.iter().position(|row| row.selected));
			let table = Table::new(rows.iter().map(|row| result_row(row, theme)), widths)
				.column_spacing(COLUMN_SPACING)
				.highlight_spacing(HighlightSpacing::Always)
				.row_highlight_style(theme.row_highlight)
				.highlight_symbol(HIGHLIGHT_SYMBOL);
			frame.render_stateful_widget(table, inner, &mut state);
		}
	}
}

fn result_row<'a>(row: &'a ResultRow, theme: &Theme) -> Row<'a> {
	let title: Vec<Span<'a>> = row
		.title
		.segments()
		.iter()
		.map(|segment| match segment {
			Segment::Plain(text) => Span::raw(text.as_str()),
			Segment::Emphasis(text) => Span::styled(text.as_str(), theme.highlight),
		})
		.collect();
	Row::new([
		Cell::from(row.icon),
		Cell::from(Line::from(title)),
		Cell::from(Span::styled(row.type_label, theme.empty_style())),
		Cell::from(Span::styled(row.category.as_str(), Style::default().fg(theme.header.fg.unwrap_or_default()))),
	])
}
