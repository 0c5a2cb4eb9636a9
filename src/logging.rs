//! Tracing initialization.
//!
//! Batch commands log to stderr. The interactive browser owns the terminal,
//! so its logs go to `kbseek.log` in the cache directory instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::app_dirs;

const LOG_FILE: &str = "kbseek.log";

static INIT: Once = Once::new();

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
	Stderr,
	/// `kbseek.log` under the cache directory.
	CacheFile,
}

/// Install the global subscriber. Later calls are ignored.
pub fn initialize(target: LogTarget) -> Result<()> {
	let mut outcome = Ok(());
	INIT.call_once(|| outcome = install(target));
	outcome
}

fn install(target: LogTarget) -> Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(false)
		.with_target(true)
		.with_span_events(FmtSpan::NONE)
		.compact();

	let result = match target {
		LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
		LogTarget::CacheFile => {
			let path = log_file_path()?;
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(&path)
				.with_context(|| format!("failed to open log file {}", path.display()))?;
			builder.with_writer(Mutex::new(file)).try_init()
		}
	};
	if let Err(err) = result {
		eprintln!("Failed to initialize tracing: {err}");
	}
	Ok(())
}

fn log_file_path() -> Result<PathBuf> {
	let dir = app_dirs::get_cache_dir()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create cache directory {}", dir.display()))?;
	Ok(dir.join(LOG_FILE))
}
