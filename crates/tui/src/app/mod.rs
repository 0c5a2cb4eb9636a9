//! Core application state and behavior for the knowledge-base browser.
//!
//! The [`App`] type aggregates the search controller, the article pane and
//! the sidebar tree. Supporting modules split the implementation into input
//! handling, background loads, and rendering.

mod actions;
mod loads;
mod render;
mod state;
#[cfg(test)]
mod tests;

pub use state::{App, Focus};
