use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use super::state::{App, Focus};
use crate::components::article::{ArticleContext, render_article};
use crate::components::dropdown::rows_area;
use crate::components::{
	InputContext, ProgressState, SidebarContext, dropdown_height, render_dropdown, render_input,
	render_sidebar,
};

const PLACEHOLDER: &str = "Search the knowledge base";
const SIDEBAR_PERCENT: u16 = 30;
const SIDEBAR_MAX_WIDTH: u16 = 40;
/// Widest the dropdown grows, in cells.
const DROPDOWN_MAX_WIDTH: u16 = 100;

impl App<'_> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
			.split(area);
		let (input_area, body_area) = (layout[0], layout[2]);

		let progress_text = self.progress_text();
		let busy = self.is_busy();
		render_input(
			frame,
			InputContext {
				search_input: &mut self.search_input,
				placeholder: PLACEHOLDER,
				area: input_area,
				theme: &self.style.theme,
			},
			ProgressState {
				progress_text,
				busy,
				throbber_state: &self.throbber_state,
			},
		);
		self.hit.input = Some(input_area);

		let sidebar_width = (body_area.width * SIDEBAR_PERCENT / 100).min(SIDEBAR_MAX_WIDTH);
		let panes = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
			.split(body_area);
		self.draw_sidebar(frame, panes[0]);

		render_article(
			frame,
			panes[1],
			ArticleContext {
				page: self.content.current(),
				title: self.content.document_title(),
				loading: self.content.is_loading(),
				focused: self.focus == Focus::Article,
				throbber_state: &self.throbber_state,
				theme: &self.style.theme,
			},
			&mut self.article,
		);

		self.draw_dropdown(frame, input_area, body_area);
	}

	fn draw_sidebar(&mut self, frame: &mut Frame, area: Rect) {
		let filter = self.search_input.text().trim();
		let rows = self
			.tree
			.tree()
			.map(|tree| tree.visible(filter))
			.unwrap_or_default();
		let rows_rect = render_sidebar(
			frame,
			area,
			SidebarContext {
				tree: &self.tree,
				rows: &rows,
				focused: self.focus == Focus::Sidebar,
				theme: &self.style.theme,
			},
			&mut self.sidebar,
		);
		self.hit.sidebar_rows = self.tree.tree().map(|_| rows_rect);
	}

	/// The dropdown floats over the panes, right under the input.
	fn draw_dropdown(&mut self, frame: &mut Frame, input_area: Rect, below: Rect) {
		let view = self.controller.view();
		let height = dropdown_height(&view).min(below.height);
		if height == 0 {
			self.hit.dropdown = None;
			self.hit.dropdown_rows = None;
			return;
		}
		let area = Rect {
			x: input_area.x,
			y: input_area.bottom(),
			width: input_area.width.min(DROPDOWN_MAX_WIDTH),
			height,
		};
		render_dropdown(frame, area, &view, &self.style.theme);
		self.hit.dropdown = Some(area);
		self.hit.dropdown_rows = (!view.rows().is_empty()).then(|| rows_area(area));
	}

	fn progress_text(&self) -> &'static str {
		if self.loads.is_busy() {
			"loading"
		} else {
			""
		}
	}
}
