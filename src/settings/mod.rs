//! Configuration loading and resolution utilities.
//!
//! `load` is the primary entry point. It layers the default config files,
//! any `--config` files, `KBSEEK__*` environment variables and CLI flags, and
//! returns a validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
#[cfg(test)]
pub(crate) use resolved::SearchPreset;
