use thiserror::Error;

use super::SettingSource;

/// A configuration value that failed validation.
#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub struct SettingsError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl SettingsError {
	pub(crate) fn invalid<V, R>(key: &'static str, value: V, origin: SettingSource, reason: R) -> Self
	where
		V: Into<String>,
		R: Into<String>,
	{
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}
}
