//! Configuration sources for runner settings
//!
//! Each source yields a flat map of lower-case setting keys to string values.
//! Sources are applied in ascending [`ConfigSource::priority`] order, so higher
//! priorities override lower ones.

use crate::env::{Env, EnvError};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, String>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Environment error: {0}")]
	Env(#[from] EnvError),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Setting '{key}' must be a string")]
	NotAString { key: String },
}

/// TOML file configuration source
///
/// Top-level string keys only; nested tables are rejected.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Parse TOML text into a flat string map
	pub fn parse(text: &str) -> Result<IndexMap<String, String>, SourceError> {
		let table: toml::Table = toml::from_str(text)?;
		let mut config = IndexMap::new();
		for (key, value) in table {
			match value {
				toml::Value::String(s) => {
					config.insert(key.to_lowercase(), s);
				}
				_ => return Err(SourceError::NotAString { key }),
			}
		}
		Ok(config)
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, String>, SourceError> {
		let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
			path: self.path.clone(),
			source,
		})?;
		Self::parse(&text)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// Reads exactly the listed keys under a prefix, so unrelated variables
/// sharing the prefix are never treated as settings.
pub struct EnvSource {
	env: Env,
	keys: Vec<&'static str>,
}

impl EnvSource {
	/// Read `keys` (lower-case setting names) from `{PREFIX}{KEY}` variables
	pub fn new(prefix: impl Into<String>, keys: &[&'static str]) -> Self {
		Self {
			env: Env::new().with_prefix(prefix),
			keys: keys.to_vec(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, String>, SourceError> {
		let mut config = IndexMap::new();
		for key in &self.keys {
			if let Some(value) = self.env.opt(&key.to_uppercase())? {
				config.insert(key.to_string(), value);
			}
		}
		Ok(config)
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		match &self.env.prefix {
			Some(prefix) => format!("Environment variables (prefix: {})", prefix),
			None => "Environment variables".to_string(),
		}
	}
}
