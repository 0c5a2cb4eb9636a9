//! Where `kbseek` keeps its user config and its log file.
//!
//! `KBSEEK_CONFIG_DIR` and `KBSEEK_CACHE_DIR` win over the per-user locations
//! that `directories` reports for the platform.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

#[derive(Debug, Clone, Copy)]
enum Location {
	Config,
	Cache,
}

impl Location {
	fn env_var(self) -> &'static str {
		match self {
			Self::Config => "KBSEEK_CONFIG_DIR",
			Self::Cache => "KBSEEK_CACHE_DIR",
		}
	}

	fn resolve(self) -> Result<PathBuf> {
		if let Some(dir) = override_dir(env::var_os(self.env_var())) {
			return Ok(dir);
		}
		let dirs = ProjectDirs::from("io", "albo", "kbseek")
			.ok_or_else(|| anyhow!("no home directory to place kbseek files in"))?;
		let dir = match self {
			Self::Config => dirs.config_local_dir(),
			Self::Cache => dirs.cache_dir(),
		};
		Ok(dir.to_path_buf())
	}
}

/// An exported but empty variable counts as unset.
fn override_dir(value: Option<OsString>) -> Option<PathBuf> {
	value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// Directory searched for `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	Location::Config.resolve()
}

/// Directory receiving `kbseek.log` while the browser runs.
pub fn get_cache_dir() -> Result<PathBuf> {
	Location::Cache.resolve()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_override_is_ignored() {
		assert_eq!(override_dir(None), None);
		assert_eq!(override_dir(Some(OsString::new())), None);
		assert_eq!(
			override_dir(Some(OsString::from("/tmp/kb"))),
			Some(PathBuf::from("/tmp/kb"))
		);
	}
}
