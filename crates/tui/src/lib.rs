//! Interactive terminal browser for a `kbseek` knowledge base.
//!
//! The crate wires the search controller from `kbseek-core` to a ratatui
//! front-end: a search input with a results dropdown, a sidebar navigation
//! tree and an article pane whose content is swapped in place.

mod app;
pub mod components;
mod host;
pub mod input;
mod runtime;
pub mod style;

pub use app::{App, Focus};
pub use host::{BrowseOptions, SiteSource};
pub use runtime::run;

pub use crate::input::SearchInput;
pub use crate::style::{StyleConfig, Theme, builtin_themes, by_name, default_theme};
