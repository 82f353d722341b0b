//! Runner settings
//!
//! Controls how statements reach PostgreSQL (client binary, privilege wrapper,
//! users, temp directory) and how reports are prefixed.
//!
//! ## Resolution order
//!
//! Lowest to highest: built-in defaults, a TOML file, `PGOPS_*` environment
//! variables.
//!
//! ```
//! use pgops_conf::settings::{RunnerSettings, SettingsLoader};
//!
//! let settings = SettingsLoader::new().load().unwrap();
//! assert_eq!(settings, RunnerSettings::default());
//! ```

use crate::sources::{ConfigSource, EnvSource, SourceError, TomlFileSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Prefix of environment variables overriding settings
pub const ENV_PREFIX: &str = "PGOPS_";

/// Environment variable naming the settings file
pub const CONFIG_ENV_VAR: &str = "PGOPS_CONFIG";

/// Setting keys, as used in TOML files and (upper-cased) after [`ENV_PREFIX`]
pub const SETTING_KEYS: [&str; 6] = [
	"psql_path",
	"sudo_path",
	"run_as",
	"db_user",
	"temp_dir",
	"report_prefix",
];

/// How statements are executed and reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
	/// psql client binary
	pub psql_path: PathBuf,
	/// Privilege wrapper; empty runs psql directly
	pub sudo_path: PathBuf,
	/// OS user passed to `sudo -u`
	pub run_as: String,
	/// Database user passed to `psql -U`
	pub db_user: String,
	/// Directory for statement files; also the prefix of psql error locations
	pub temp_dir: PathBuf,
	/// Prefix of every report line
	pub report_prefix: String,
}

impl Default for RunnerSettings {
	fn default() -> Self {
		Self {
			psql_path: PathBuf::from("/usr/bin/psql"),
			sudo_path: PathBuf::from("/usr/bin/sudo"),
			run_as: "postgres".to_string(),
			db_user: "postgres".to_string(),
			temp_dir: PathBuf::from("/tmp"),
			report_prefix: "jojo_return_value".to_string(),
		}
	}
}

impl RunnerSettings {
	/// Whether psql is wrapped in `sudo -u run_as`
	pub fn uses_sudo(&self) -> bool {
		!self.sudo_path.as_os_str().is_empty()
	}

	/// Set one key from a source
	pub fn apply(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
		match key {
			"psql_path" => self.psql_path = PathBuf::from(value),
			"sudo_path" => self.sudo_path = PathBuf::from(value),
			"run_as" => self.run_as = value,
			"db_user" => self.db_user = value,
			"temp_dir" => self.temp_dir = PathBuf::from(value),
			"report_prefix" => self.report_prefix = value,
			_ => {
				return Err(SettingsError::UnknownKey {
					key: key.to_string(),
				});
			}
		}
		Ok(())
	}

	/// Reject settings that cannot produce a working invocation
	pub fn validate(&self) -> Result<(), SettingsError> {
		let invalid = |key: &'static str, reason: &str| SettingsError::Invalid {
			key,
			reason: reason.to_string(),
		};
		if self.psql_path.as_os_str().is_empty() {
			return Err(invalid("psql_path", "must not be empty"));
		}
		if self.uses_sudo() && self.run_as.is_empty() {
			return Err(invalid("run_as", "must not be empty when sudo_path is set"));
		}
		if self.db_user.is_empty() {
			return Err(invalid("db_user", "must not be empty"));
		}
		if self.temp_dir.as_os_str().is_empty() {
			return Err(invalid("temp_dir", "must not be empty"));
		}
		if self.report_prefix.is_empty() || self.report_prefix.contains(char::is_whitespace) {
			return Err(invalid(
				"report_prefix",
				"must be a single non-empty word",
			));
		}
		Ok(())
	}
}

/// Settings loading errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {description}: {source}")]
	Source {
		description: String,
		#[source]
		source: SourceError,
	},

	#[error("Unknown setting '{key}'")]
	UnknownKey { key: String },

	#[error("Invalid setting '{key}': {reason}")]
	Invalid { key: &'static str, reason: String },
}

/// Layers sources over [`RunnerSettings::default`]
#[derive(Default)]
pub struct SettingsLoader {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Standard layering: optional TOML file, then `PGOPS_*` overrides.
	///
	/// An explicit `config_path` wins over `PGOPS_CONFIG`.
	pub fn standard(config_path: Option<PathBuf>) -> Result<Self, SettingsError> {
		let env_path = crate::env::Env::new()
			.path(CONFIG_ENV_VAR)
			.map_err(|e| SettingsError::Source {
				description: CONFIG_ENV_VAR.to_string(),
				source: e.into(),
			})?;
		let mut loader = Self::new();
		if let Some(path) = config_path.or(env_path) {
			loader = loader.add_source(TomlFileSource::new(path));
		}
		Ok(loader.add_source(EnvSource::new(ENV_PREFIX, &SETTING_KEYS)))
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn load(&self) -> Result<RunnerSettings, SettingsError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|s| s.priority());

		let mut settings = RunnerSettings::default();
		for source in ordered {
			let values = source.load().map_err(|source_err| SettingsError::Source {
				description: source.description(),
				source: source_err,
			})?;
			debug!(source = %source.description(), keys = values.len(), "applying settings source");
			for (key, value) in values {
				settings.apply(&key, value)?;
			}
		}
		settings.validate()?;
		Ok(settings)
	}
}
