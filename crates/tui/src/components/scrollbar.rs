//! Scroll arithmetic and scrollbar for the article pane.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::style::Theme;

/// Scroll bounds of a viewport over `content_length` lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
	pub content_length: usize,
	pub viewport_len: usize,
	pub max_scroll: usize,
}

impl ScrollMetrics {
	#[must_use]
	pub fn compute(content_length: usize, viewport_height: usize) -> Self {
		if content_length == 0 || viewport_height == 0 {
			return Self::default();
		}
		let viewport_len = viewport_height.min(content_length);
		Self {
			content_length,
			viewport_len,
			max_scroll: content_length - viewport_len,
		}
	}

	#[must_use]
	pub fn needs_scrollbar(&self) -> bool {
		self.max_scroll > 0
	}

	/// Offset that puts `line` in the middle of the viewport.
	#[must_use]
	pub fn centered_on(&self, line: usize) -> usize {
		line.saturating_sub(self.viewport_len / 2).min(self.max_scroll)
	}
}

/// Whether the cell at (`column`, `row`) lies inside `area`.
#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	column >= area.x
		&& column < area.x.saturating_add(area.width)
		&& row >= area.y
		&& row < area.y.saturating_add(area.height)
}

/// Draw a scrollbar along the right edge of `area` and return the area left
/// for content.
pub fn render_scrollbar(
	frame: &mut Frame,
	area: Rect,
	metrics: ScrollMetrics,
	scroll: usize,
	theme: &Theme,
) -> Rect {
	if !metrics.needs_scrollbar() || area.width == 0 {
		return area;
	}
	let bar = Rect {
		x: area.right().saturating_sub(1),
		width: 1,
		..area
	};
	let mut state = ScrollbarState::new(metrics.max_scroll).position(scroll);
	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(theme.border_style());
	frame.render_stateful_widget(scrollbar, bar, &mut state);
	Rect {
		width: area.width - 1,
		..area
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn centering_is_clamped() {
		let metrics = ScrollMetrics::compute(100, 20);
		assert_eq!(metrics.centered_on(5), 0);
		assert_eq!(metrics.centered_on(50), 40);
		assert_eq!(metrics.centered_on(99), 80);
		assert!(!ScrollMetrics::compute(5, 20).needs_scrollbar());
	}

	#[test]
	fn rect_membership_excludes_far_edges() {
		let area = Rect::new(2, 3, 4, 2);
		assert!(point_in_rect(2, 3, area));
		assert!(point_in_rect(5, 4, area));
		assert!(!point_in_rect(6, 4, area));
		assert!(!point_in_rect(2, 5, area));
	}
}
