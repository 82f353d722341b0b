//! Action pipeline
//!
//! validate → build → execute → classify → report. Validation failures never
//! reach the executor; executor failures and classified output both end in a
//! report.

use crate::action::ActionKind;
use crate::executor::SqlExecutor;
use crate::lag::{LAG_SENTINEL, ReplicationLag};
use crate::reason::ReasonCode;
use crate::report::{ActionReport, Outcome};
use pgops_conf::RunnerSettings;
use pgops_query::{Params, Statement, ValidationError};
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

/// Report field holding the interval as psql printed it
pub const SLAVE_DELAY_FIELD: &str = "slave_delay";

/// Report field holding the interval in seconds
pub const SLAVE_DELTA_FIELD: &str = "slave_delta_in_seconds";

/// Everything one invocation produced
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
	pub kind: ActionKind,
	pub outcome: Outcome,
	/// Client output, when the client ran
	pub client_output: Option<String>,
	/// Human-readable lines for stderr
	pub diagnostics: Vec<String>,
}

impl Execution {
	/// An invocation stopped by input validation
	pub fn rejected(kind: ActionKind, error: ValidationError) -> Self {
		warn!(action = %kind, error = %error, "input rejected");
		Self {
			kind,
			diagnostics: vec![error.to_string()],
			outcome: Outcome::from_validation(error),
			client_output: None,
		}
	}

	pub fn exit_code(&self) -> u8 {
		self.outcome.exit_code()
	}

	/// Lines for stdout: client output first, then the report
	pub fn stdout_lines(&self, prefix: &str) -> Vec<String> {
		let mut lines: Vec<String> = self
			.client_output
			.as_deref()
			.map(|output| output.lines().map(str::to_string).collect())
			.unwrap_or_default();
		lines.extend(self.outcome.lines(prefix));
		lines
	}
}

/// Runs actions against one executor
pub struct ActionRunner<E> {
	executor: E,
	settings: RunnerSettings,
}

impl<E: SqlExecutor> ActionRunner<E> {
	pub fn new(executor: E, settings: RunnerSettings) -> Self {
		Self { executor, settings }
	}

	pub fn settings(&self) -> &RunnerSettings {
		&self.settings
	}

	/// Validate `params` and build the statement without executing it
	pub fn prepare(&self, kind: ActionKind, params: &Params) -> Result<Statement, ValidationError> {
		let statement = kind.builder().build(params)?;
		debug!(
			action = %kind,
			length = statement.len(),
			statement = %statement.redacted(),
			"statement built"
		);
		Ok(statement)
	}

	pub fn run(&self, kind: ActionKind, params: &Params) -> Execution {
		info!(action = %kind, "running action");

		let statement = match self.prepare(kind, params) {
			Ok(statement) => statement,
			Err(error) => return Execution::rejected(kind, error),
		};

		let output = match self.executor.execute(statement.as_str()) {
			Ok(output) => output,
			Err(e) => {
				error!(action = %kind, error = %e, "SQL client failed");
				return Execution {
					kind,
					outcome: Outcome::Completed(ActionReport::rollback(vec![ReasonCode::Unknown])),
					client_output: None,
					diagnostics: vec![e.to_string()],
				};
			}
		};

		let classification = kind.rule_set(&self.settings).classify(&output);
		let mut reasons = classification.reasons;
		let mut fields = Vec::new();

		if kind.reports_lag() {
			match ReplicationLag::extract(&output) {
				Some(lag) => {
					fields.push((SLAVE_DELAY_FIELD.to_string(), lag.delay.clone()));
					fields.push((SLAVE_DELTA_FIELD.to_string(), lag.seconds_display()));
				}
				None => {
					reasons.push(ReasonCode::ReplicaDelaySelectWasEmpty);
					fields.push((SLAVE_DELAY_FIELD.to_string(), LAG_SENTINEL.to_string()));
					fields.push((SLAVE_DELTA_FIELD.to_string(), LAG_SENTINEL.to_string()));
				}
			}
		}

		let mut report = ActionReport::from_reasons(reasons);
		report.fields = fields;
		info!(action = %kind, status = %report.status, "action finished");

		Execution {
			kind,
			outcome: Outcome::Completed(report),
			client_output: Some(output),
			diagnostics: classification.failure_lines,
		}
	}
}
