//! # pgops
//!
//! Operator-triggered administrative actions for a PostgreSQL fleet: create,
//! alter and drop roles, create databases, terminate backends, inspect
//! activity and replication lag, and reload configuration.
//!
//! Each action takes a flat set of named string parameters, validates and
//! sanitizes them, builds a statement from a fixed template, runs it through
//! `psql` and classifies what the client printed into an `ok`/`rollback`
//! report.
//!
//! ## Feature Flags
//!
//! - `conf` - settings and gateway parameter loading ([`conf`])
//! - `commands` (default) - execution, classification and reports
//!   ([`commands`]); implies `conf`
//!
//! Statement building ([`query`]) is always available.
//!
//! ## Quick Example
//!
//! ```rust
//! use pgops::prelude::*;
//!
//! let params = Params::from_iter([("DATABASE", "shop")]);
//! let statement = TerminateBackendStatement.build(&params).unwrap();
//! assert!(statement.as_str().contains("WHERE datname = 'shop'"));
//! ```

pub use pgops_query as query;

#[cfg(feature = "conf")]
pub use pgops_conf as conf;

#[cfg(feature = "commands")]
pub use pgops_commands as commands;

pub use pgops_query::{Params, Statement, StatementBuilder, ValidationError};

#[cfg(feature = "conf")]
pub use pgops_conf::{RunnerSettings, SettingsError, SettingsLoader};

#[cfg(feature = "commands")]
pub use pgops_commands::{
	ActionKind, ActionReport, ActionRunner, ExecutionStatus, Outcome, PsqlExecutor, ReasonCode,
	SqlExecutor,
};

/// Commonly used types
pub mod prelude {
	pub use pgops_query::prelude::*;

	#[cfg(feature = "conf")]
	pub use pgops_conf::{ParamSource, RunnerSettings};

	#[cfg(feature = "commands")]
	pub use pgops_commands::{
		ActionKind, ActionReport, ActionRunner, ExecutionStatus, ReasonCode, SqlExecutor,
	};
}

#[cfg(all(test, feature = "commands"))]
mod tests {
	use super::prelude::*;
	use pgops_commands::ExecutionError;
	use rstest::rstest;

	struct Silent;

	impl SqlExecutor for Silent {
		fn execute(&self, _script: &str) -> Result<String, ExecutionError> {
			Ok(String::new())
		}
	}

	#[rstest]
	fn test_facade_runs_an_action() {
		// Arrange
		let runner = ActionRunner::new(Silent, RunnerSettings::default());

		// Act
		let execution = runner.run(ActionKind::ReloadConf, &Params::new());

		// Assert
		assert_eq!(execution.exit_code(), 0);
	}
}
