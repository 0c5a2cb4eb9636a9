use std::time::Instant;

use kbseek_core::tree::TreeItem;
use kbseek_core::{Effect, Key};
use ratatui::crossterm::event::{
	KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::trace;

use super::state::{App, Focus};
use crate::components::point_in_rect;

const PAGE_SCROLL: isize = 10;
const WHEEL_SCROLL: isize = 3;

impl<'a> App<'a> {
	/// Process a keyboard event.
	pub(crate) fn handle_key(&mut self, key: KeyEvent, now: Instant) {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			self.should_quit = true;
			return;
		}
		if key.code == KeyCode::Tab {
			self.set_focus(self.focus.next());
			return;
		}
		match self.focus {
			Focus::Search => self.handle_search_key(key, now),
			Focus::Sidebar => self.handle_sidebar_key(key),
			Focus::Article => self.handle_article_key(key),
		}
	}

	fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
		let mapped = match key.code {
			KeyCode::Down => Some(Key::ArrowDown),
			KeyCode::Up => Some(Key::ArrowUp),
			KeyCode::Enter => Some(Key::Enter),
			KeyCode::Esc => Some(Key::Escape),
			_ => None,
		};
		if let Some(mapped) = mapped {
			let effects = self.controller.on_key(mapped, now);
			self.apply_effects(effects);
			return;
		}
		if self.search_input.input(key) {
			self.query_changed(now);
		}
	}

	fn handle_sidebar_key(&mut self, key: KeyEvent) {
		let len = self.visible_tree_len();
		match key.code {
			KeyCode::Down | KeyCode::Char('j') if len > 0 => {
				let next = self.sidebar.selected().map_or(0, |row| (row + 1).min(len - 1));
				self.sidebar.select(Some(next));
			}
			KeyCode::Up | KeyCode::Char('k') => {
				let previous = self.sidebar.selected().map(|row| row.saturating_sub(1));
				self.sidebar.select(previous);
			}
			KeyCode::Enter | KeyCode::Char(' ') => {
				if let Some(row) = self.sidebar.selected() {
					self.activate_tree_row(row);
				}
			}
			KeyCode::Char('/') => self.set_focus(Focus::Search),
			KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
			_ => {}
		}
	}

	fn handle_article_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Down | KeyCode::Char('j') => self.article.scroll_by(1),
			KeyCode::Up | KeyCode::Char('k') => self.article.scroll_by(-1),
			KeyCode::PageDown | KeyCode::Char(' ') => self.article.scroll_by(PAGE_SCROLL),
			KeyCode::PageUp => self.article.scroll_by(-PAGE_SCROLL),
			KeyCode::Home => self.article.scroll = 0,
			KeyCode::Char('/') => self.set_focus(Focus::Search),
			KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
			_ => {}
		}
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
		let (column, row) = (mouse.column, mouse.row);
		let dropdown_row = self.hit.dropdown_rows.and_then(|area| {
			point_in_rect(column, row, area).then(|| usize::from(row - area.y))
		});

		match mouse.kind {
			MouseEventKind::Moved => {
				if let Some(index) = dropdown_row {
					self.controller.on_hover(index);
				}
			}
			MouseEventKind::Down(MouseButton::Left) => {
				if let Some(index) = dropdown_row {
					let effects = self.controller.on_click(index, now);
					self.apply_effects(effects);
					return;
				}
				let on_search_surface = [self.hit.input, self.hit.dropdown]
					.into_iter()
					.flatten()
					.any(|area| point_in_rect(column, row, area));
				if on_search_surface {
					self.set_focus(Focus::Search);
					return;
				}
				self.controller.on_outside_click();
				self.click_panes(column, row);
			}
			MouseEventKind::ScrollDown if self.over_article(column, row) => {
				self.article.scroll_by(WHEEL_SCROLL);
			}
			MouseEventKind::ScrollUp if self.over_article(column, row) => {
				self.article.scroll_by(-WHEEL_SCROLL);
			}
			_ => {}
		}
	}

	fn click_panes(&mut self, column: u16, row: u16) {
		if let Some(area) = self.hit.sidebar_rows
			&& point_in_rect(column, row, area)
		{
			self.set_focus(Focus::Sidebar);
			let index = self.sidebar.offset() + usize::from(row - area.y);
			if index < self.visible_tree_len() {
				self.sidebar.select(Some(index));
				self.activate_tree_row(index);
			}
			return;
		}
		if self.over_article(column, row) {
			self.set_focus(Focus::Article);
		}
	}

	fn over_article(&self, column: u16, row: u16) -> bool {
		self.article
			.area
			.is_some_and(|area| point_in_rect(column, row, area))
	}

	/// Re-run the search and the sidebar filter for the current input.
	pub(crate) fn query_changed(&mut self, now: Instant) {
		let text = self.search_input.text().to_string();
		self.controller.on_query_change(&text, now);
		self.sidebar.select(None);
	}

	fn visible_tree_len(&self) -> usize {
		self.tree
			.tree()
			.map_or(0, |tree| tree.visible(self.sidebar_filter()).len())
	}

	/// Toggle a folder, or load the page behind a link.
	fn activate_tree_row(&mut self, row: usize) {
		enum Target {
			Folder(String),
			Page(String),
		}
		let target = self.tree.tree().and_then(|tree| {
			tree.visible(self.sidebar_filter())
				.get(row)
				.map(|row| match row.item {
					TreeItem::Folder(folder) => Target::Folder(folder.id.clone()),
					TreeItem::Link(link) => Target::Page(link.link.url().to_string()),
				})
		});
		match target {
			Some(Target::Folder(id)) => {
				if let Some(tree) = self.tree.tree_mut() {
					tree.toggle(&id);
				}
			}
			Some(Target::Page(url)) => self.request_page(url),
			None => {}
		}
	}

	/// Advance timers: debounced searches and highlight expiry.
	pub(crate) fn tick(&mut self, now: Instant) {
		let effects = self.controller.poll(now);
		self.apply_effects(effects);
	}

	/// Carry out what the search controller asked for.
	pub(crate) fn apply_effects(&mut self, effects: Vec<Effect>) {
		for effect in effects {
			trace!(?effect, "applying effect");
			match effect {
				Effect::LoadContent { url } | Effect::Navigate { url } => self.request_page(url),
				Effect::ScrollIntoView { node } => {
					self.article.pending_scroll = Some(node);
					self.set_focus(Focus::Article);
				}
				Effect::Highlight { node } => {
					self.article.highlighted.insert(node);
				}
				Effect::ClearHighlight { node } => {
					self.article.highlighted.remove(&node);
				}
				Effect::ClearInput => {
					self.search_input.clear();
					self.sidebar.select(None);
				}
				Effect::ReleaseFocus => self.set_focus(Focus::Article),
			}
		}
	}
}
