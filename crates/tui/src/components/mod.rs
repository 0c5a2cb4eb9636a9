//! UI building blocks shared across rendering and state modules.

/// Article pane with block tracking.
pub(crate) mod article;
/// Results dropdown overlay.
pub mod dropdown;
/// Input prompt rendering and progress display.
pub mod prompt;
/// Scroll arithmetic and scrollbar.
pub mod scrollbar;
/// Navigation tree pane.
pub mod sidebar;

pub use dropdown::{dropdown_height, render_dropdown};
pub use prompt::{InputContext, ProgressState, render_input};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
pub use sidebar::{SidebarContext, render_sidebar};
