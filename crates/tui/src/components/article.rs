//! Article pane: wraps the page on screen and keeps track of where each
//! block landed so results can scroll to it.

use std::collections::HashSet;

use kbseek_core::document::BlockKind;
use kbseek_core::{NodeId, PageContent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::scrollbar::{ScrollMetrics, render_scrollbar};
use crate::style::Theme;

/// Scroll position and transient decorations of the article.
#[derive(Debug, Default)]
pub(crate) struct ArticleState {
	pub scroll: usize,
	/// Blocks flashed after a jump from a result.
	pub highlighted: HashSet<NodeId>,
	/// Block to center on the next draw.
	pub pending_scroll: Option<NodeId>,
	pub metrics: ScrollMetrics,
	pub area: Option<Rect>,
}

impl ArticleState {
	/// Forget everything tied to the previous page.
	pub fn reset(&mut self) {
		*self = Self {
			area: self.area,
			..Self::default()
		};
	}

	pub fn scroll_by(&mut self, delta: isize) {
		self.scroll = self
			.scroll
			.saturating_add_signed(delta)
			.min(self.metrics.max_scroll);
	}
}

/// Wrapped article lines and the first line of every block.
pub(crate) struct ArticleLayout {
	pub lines: Vec<Line<'static>>,
	starts: Vec<(NodeId, usize)>,
}

impl ArticleLayout {
	pub fn build(page: &PageContent, width: usize, highlighted: &HashSet<NodeId>, theme: &Theme) -> Self {
		let mut lines = Vec::new();
		let mut starts = Vec::with_capacity(page.blocks.len());
		for block in &page.blocks {
			if !lines.is_empty() {
				lines.push(Line::default());
			}
			starts.push((block.node, lines.len()));
			let mut style = match block.kind {
				BlockKind::Heading { .. } => theme.heading,
				BlockKind::Code => theme.empty,
				_ => Style::default(),
			};
			if highlighted.contains(&block.node) {
				style = style.patch(theme.flash);
			}
			let rows = match block.kind {
				BlockKind::Heading { level } => wrap_text(
					&format!("{} {}", "#".repeat(usize::from(level)), block.text),
					width,
				),
				BlockKind::ListItem => bullet_rows(&block.text, width),
				// Code keeps its own line breaks and is clipped rather than wrapped.
				BlockKind::Code => block.text.lines().map(|line| format!("  {line}")).collect(),
				BlockKind::Paragraph | BlockKind::TableRow => wrap_text(&block.text, width),
			};
			lines.extend(rows.into_iter().map(|row| Line::from(Span::styled(row, style))));
		}
		Self { lines, starts }
	}

	/// First line of `node`, if the node is part of the page.
	pub fn line_of(&self, node: NodeId) -> Option<usize> {
		self.starts
			.iter()
			.find(|(candidate, _)| *candidate == node)
			.map(|(_, line)| *line)
	}
}

/// Wrap a list item under a bullet, continuation rows indented to match.
fn bullet_rows(text: &str, width: usize) -> Vec<String> {
	wrap_text(text, width.saturating_sub(2))
		.into_iter()
		.enumerate()
		.map(|(row, line)| if row == 0 { format!("• {line}") } else { format!("  {line}") })
		.collect()
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
	let width = width.max(1);
	let mut rows = Vec::new();
	let mut current = String::new();
	let mut current_width = 0;

	for word in text.split_whitespace() {
		let word_width = word.width();
		let needed = if current.is_empty() {
			word_width
		} else {
			current_width + 1 + word_width
		};
		if needed <= width {
			if !current.is_empty() {
				current.push(' ');
			}
			current.push_str(word);
			current_width = needed;
			continue;
		}
		if !current.is_empty() {
			rows.push(std::mem::take(&mut current));
			current_width = 0;
		}
		for ch in word.chars() {
			let ch_width = ch.width().unwrap_or(0);
			if current_width + ch_width > width && !current.is_empty() {
				rows.push(std::mem::take(&mut current));
				current_width = 0;
			}
			current.push(ch);
			current_width += ch_width;
		}
	}
	if !current.is_empty() || rows.is_empty() {
		rows.push(current);
	}
	rows
}

/// Argument bundle for drawing the article.
pub(crate) struct ArticleContext<'a> {
	pub page: Option<&'a PageContent>,
	pub title: Option<&'a str>,
	pub loading: bool,
	pub focused: bool,
	pub throbber_state: &'a ThrobberState,
	pub theme: &'a Theme,
}

pub(crate) fn render_article(
	frame: &mut Frame,
	area: Rect,
	ctx: ArticleContext<'_>,
	state: &mut ArticleState,
) {
	let ArticleContext {
		page,
		title,
		loading,
		focused,
		throbber_state,
		theme,
	} = ctx;
	state.area = Some(area);

	let border = if focused {
		theme.header
	} else {
		theme.border_style()
	};
	let mut block = Block::default().borders(Borders::TOP).border_style(border);
	if let Some(title) = title {
		block = block.title(Span::styled(format!(" {title} "), theme.header));
	}
	let inner = block.inner(area);
	frame.render_widget(block, area);

	if loading {
		let throbber = Throbber::default()
			.label("Loading...")
			.style(theme.empty_style())
			.throbber_style(theme.empty_style());
		frame.render_widget(throbber.to_line(throbber_state), inner);
		return;
	}
	let Some(page) = page else {
		return;
	};

	// Reserve a column for the scrollbar so wrapping does not depend on it.
	let text_width = usize::from(inner.width.saturating_sub(1));
	let layout = ArticleLayout::build(page, text_width, &state.highlighted, theme);
	state.metrics = ScrollMetrics::compute(layout.lines.len(), usize::from(inner.height));
	if let Some(node) = state.pending_scroll.take()
		&& let Some(line) = layout.line_of(node)
	{
		state.scroll = state.metrics.centered_on(line);
	}
	state.scroll = state.scroll.min(state.metrics.max_scroll);

	let text_area = render_scrollbar(frame, inner, state.metrics, state.scroll, theme);
	let visible: Vec<Line<'static>> = layout
		.lines
		.into_iter()
		.skip(state.scroll)
		.take(usize::from(text_area.height))
		.collect();
	frame.render_widget(Paragraph::new(visible), text_area);
}
