//! Background loading of the manifest and of articles.
//!
//! This module issues loads to worker threads, then feeds the responses to
//! the search controller, the content swap and the sidebar.

mod coordination;
mod runtime;

pub(crate) use runtime::{LoadMessage, LoadRuntime};
