//! Environment variable handling module
//!
//! Prefixed lookups for runner settings overrides.

use std::env;
use std::path::PathBuf;

/// Environment variable reader with prefix support
#[derive(Debug, Clone, Default)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "PGOPS_")
	pub prefix: Option<String>,
}

impl Env {
	/// Create a new Env instance
	pub fn new() -> Self {
		Self { prefix: None }
	}
	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Get the full key name with prefix
	pub fn key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}
	/// Read a string value from environment
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.str_with_default(key, None)
	}
	/// Read a string value with a default
	pub fn str_with_default(&self, key: &str, default: Option<&str>) -> Result<String, EnvError> {
		let full_key = self.key_name(key);
		validate_env_var_name(&full_key)?;

		match env::var(&full_key) {
			Ok(val) => Ok(val),
			Err(env::VarError::NotUnicode(_)) => Err(EnvError::ParseError {
				key: full_key,
				error: "value is not valid unicode".to_string(),
			}),
			Err(env::VarError::NotPresent) => match default {
				Some(d) => Ok(d.to_string()),
				None => Err(EnvError::MissingVariable(full_key)),
			},
		}
	}
	/// Read an optional string value; unset yields `None`
	pub fn opt(&self, key: &str) -> Result<Option<String>, EnvError> {
		match self.str(key) {
			Ok(val) => Ok(Some(val)),
			Err(EnvError::MissingVariable(_)) => Ok(None),
			Err(e) => Err(e),
		}
	}
	/// Read an optional path value
	pub fn path(&self, key: &str) -> Result<Option<PathBuf>, EnvError> {
		Ok(self.opt(key)?.filter(|v| !v.is_empty()).map(PathBuf::from))
	}
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` character (which is used as the key-value separator).
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.escape_default().to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	/// Raised without the raw value, which may be a password
	#[error("Failed to read environment variable '{key}': {error}")]
	ParseError { key: String, error: String },

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
