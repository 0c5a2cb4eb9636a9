//! Sidebar navigation tree.

use kbseek_core::TreeState;
use kbseek_core::tree::{TreeItem, TreeRow};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::style::Theme;

const FOLDER_OPEN: &str = "▾ ";
const FOLDER_CLOSED: &str = "▸ ";
const LINK_MARK: &str = "  ";

/// Argument bundle for drawing the sidebar.
pub struct SidebarContext<'a> {
	pub tree: &'a TreeState,
	/// Rows after applying the label filter.
	pub rows: &'a [TreeRow<'a>],
	pub focused: bool,
	pub theme: &'a Theme,
}

/// Draw the tree, or its placeholder, into `area`. Returns the area of the
/// first row so clicks can be mapped back.
pub fn render_sidebar(
	frame: &mut Frame,
	area: Rect,
	ctx: SidebarContext<'_>,
	state: &mut ListState,
) -> Rect {
	let SidebarContext {
		tree,
		rows,
		focused,
		theme,
	} = ctx;
	let border = if focused {
		theme.header
	} else {
		theme.border_style()
	};
	let block = Block::default()
		.borders(Borders::RIGHT)
		.border_style(border);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	if let Some(placeholder) = tree.placeholder() {
		frame.render_widget(Paragraph::new(placeholder).style(theme.empty_style()), inner);
		return inner;
	}

	let items: Vec<ListItem<'_>> = rows.iter().map(|row| tree_line(row, theme)).collect();
	let mut list = List::new(items);
	if focused {
		list = list.highlight_style(theme.row_highlight);
	}
	frame.render_stateful_widget(list, inner, state);
	inner
}

fn tree_line<'a>(row: &TreeRow<'a>, theme: &Theme) -> ListItem<'a> {
	let indent = Span::raw("  ".repeat(row.depth));
	let line = match row.item {
		TreeItem::Folder(folder) => {
			let mark = if folder.expanded {
				FOLDER_OPEN
			} else {
				FOLDER_CLOSED
			};
			Line::from(vec![indent, Span::styled(mark, theme.header), Span::raw(folder.label.as_str())])
		}
		TreeItem::Link(link) => {
			let label = if link.active {
				Span::styled(link.link.label.as_str(), theme.active)
			} else {
				Span::raw(link.link.label.as_str())
			};
			Line::from(vec![indent, Span::raw(LINK_MARK), label])
		}
	};
	ListItem::new(line)
}
