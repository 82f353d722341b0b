//! Gateway parameter source
//!
//! The HTTP-to-shell gateway passes action parameters as environment
//! variables. [`ParamSource`] collects them into [`Params`], with command-line
//! `KEY=VALUE` assignments taking precedence.

use crate::env::{EnvError, validate_env_var_name};
use pgops_query::Params;
use tracing::trace;

/// Parse a `KEY=VALUE` assignment; the value may be empty or contain `=`
///
/// ```
/// use pgops_conf::params::parse_assignment;
///
/// assert_eq!(
/// 	parse_assignment("role=app=1").unwrap(),
/// 	("ROLE".to_string(), "app=1".to_string())
/// );
/// assert!(parse_assignment("novalue").is_err());
/// ```
pub fn parse_assignment(assignment: &str) -> Result<(String, String), EnvError> {
	let Some((key, value)) = assignment.split_once('=') else {
		return Err(EnvError::ParseError {
			key: assignment.escape_default().to_string(),
			error: "expected KEY=VALUE".to_string(),
		});
	};
	validate_env_var_name(key)?;
	Ok((key.to_ascii_uppercase(), value.to_string()))
}

/// Builds [`Params`] from the process environment and explicit overrides
#[derive(Debug, Clone, Default)]
pub struct ParamSource {
	include_environment: bool,
	overrides: Vec<(String, String)>,
}

impl ParamSource {
	/// Source reading the process environment
	pub fn from_environment() -> Self {
		Self {
			include_environment: true,
			overrides: Vec::new(),
		}
	}

	/// Source using only explicit assignments
	pub fn isolated() -> Self {
		Self::default()
	}

	pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.overrides.push((key.into(), value.into()));
		self
	}

	/// Add `KEY=VALUE` assignments, later ones winning
	pub fn with_assignments<I, S>(mut self, assignments: I) -> Result<Self, EnvError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for assignment in assignments {
			let (key, value) = parse_assignment(assignment.as_ref())?;
			self.overrides.push((key, value));
		}
		Ok(self)
	}

	pub fn load(&self) -> Params {
		let mut params = Params::new();
		if self.include_environment {
			// Non-unicode variables cannot be action parameters and are skipped
			for (key, value) in std::env::vars_os() {
				if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
					params.insert(key, value);
				}
			}
		}
		for (key, value) in &self.overrides {
			trace!(key = %key, "parameter override");
			params.insert(key, value.clone());
		}
		params
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[case("ROLE=x", "ROLE", "x")]
	#[case("login=", "LOGIN", "")]
	#[case("PASSWORD=a=b", "PASSWORD", "a=b")]
	fn test_parse_assignment(#[case] input: &str, #[case] key: &str, #[case] value: &str) {
		assert_eq!(
			parse_assignment(input).unwrap(),
			(key.to_string(), value.to_string())
		);
	}

	#[rstest]
	#[case("ROLE")]
	#[case("=x")]
	fn test_parse_assignment_rejects(#[case] input: &str) {
		assert!(parse_assignment(input).is_err());
	}

	#[rstest]
	fn test_isolated_source_ignores_environment() {
		let params = ParamSource::isolated()
			.with_override("role", "x")
			.load();
		assert_eq!(params.len(), 1);
		assert_eq!(params.get("ROLE"), "x");
	}

	#[rstest]
	#[serial(env)]
	fn test_environment_lowercase_keys_are_uppercased_and_overridden() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("pgops_param_test_role", "from_env");
			std::env::set_var("PGOPS_PARAM_TEST_LOGIN", "yes");
		}

		// Act
		let params = ParamSource::from_environment()
			.with_assignments(["PGOPS_PARAM_TEST_ROLE=from_cli"])
			.unwrap()
			.load();

		// Assert
		assert_eq!(params.get("PGOPS_PARAM_TEST_ROLE"), "from_cli");
		assert_eq!(params.get("PGOPS_PARAM_TEST_LOGIN"), "yes");

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("pgops_param_test_role");
			std::env::remove_var("PGOPS_PARAM_TEST_LOGIN");
		}
	}
}
