//! Action reports and the gateway line format
//!
//! Every report line is `{prefix} key=value` on stdout. The gateway reads
//! these lines and the process exit code; nothing else on stdout is parsed.

use crate::reason::ReasonCode;
use pgops_query::ValidationError;
use serde::Serialize;
use std::fmt;

/// Exit code for an action that completed
pub const EXIT_OK: u8 = 0;

/// Exit code for an action that rolled back
pub const EXIT_ROLLBACK: u8 = 1;

/// Exit code for rejected input (a 500 status truncated to a byte)
pub const EXIT_BAD_INPUT: u8 = 244;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
	Ok,
	Rollback,
}

impl ExecutionStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			ExecutionStatus::Ok => "ok",
			ExecutionStatus::Rollback => "rollback",
		}
	}
}

impl fmt::Display for ExecutionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Result of an executed (or bailed-out) action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReport {
	pub status: ExecutionStatus,
	/// Empty when ok; never empty when rolled back
	pub reasons: Vec<ReasonCode>,
	/// Action-specific values, in output order
	pub fields: Vec<(String, String)>,
}

impl ActionReport {
	pub fn ok() -> Self {
		Self {
			status: ExecutionStatus::Ok,
			reasons: Vec::new(),
			fields: Vec::new(),
		}
	}

	/// Status follows `reasons`: none means ok
	pub fn from_reasons(reasons: Vec<ReasonCode>) -> Self {
		if reasons.is_empty() {
			Self::ok()
		} else {
			Self::rollback(reasons)
		}
	}

	/// A rollback; an empty reason list becomes `[UNKNOWN]`
	pub fn rollback(reasons: Vec<ReasonCode>) -> Self {
		let reasons = if reasons.is_empty() {
			vec![ReasonCode::Unknown]
		} else {
			reasons
		};
		Self {
			status: ExecutionStatus::Rollback,
			reasons,
			fields: Vec::new(),
		}
	}

	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.push((key.into(), value.into()));
		self
	}

	pub fn field(&self, key: &str) -> Option<&str> {
		self.fields
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn exit_code(&self) -> u8 {
		match self.status {
			ExecutionStatus::Ok => EXIT_OK,
			ExecutionStatus::Rollback => EXIT_ROLLBACK,
		}
	}

	pub fn lines(&self, prefix: &str) -> Vec<String> {
		let mut lines = vec![format!("{prefix} execution_status={}", self.status)];
		if self.status == ExecutionStatus::Rollback {
			lines.push(format!(
				"{prefix} error_reason_indicator={}",
				reason_list(&self.reasons)
			));
		}
		for (key, value) in &self.fields {
			lines.push(format!("{prefix} {key}={value}"));
		}
		lines
	}
}

fn reason_list(reasons: &[ReasonCode]) -> String {
	let names: Vec<&str> = reasons.iter().map(|r| r.as_str()).collect();
	format!("[{}]", names.join(", "))
}

/// Everything an action invocation can end in
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// Statement ran (or was refused for length) and was classified
	Completed(ActionReport),
	/// Input was rejected before any statement was built
	Rejected(ValidationError),
}

impl Outcome {
	/// Route a validation failure: length bailouts roll back, the rest are rejections
	pub fn from_validation(error: ValidationError) -> Self {
		if error.is_bailout() {
			Outcome::Completed(ActionReport::rollback(vec![ReasonCode::Unknown]))
		} else {
			Outcome::Rejected(error)
		}
	}

	pub fn exit_code(&self) -> u8 {
		match self {
			Outcome::Completed(report) => report.exit_code(),
			Outcome::Rejected(_) => EXIT_BAD_INPUT,
		}
	}

	pub fn report(&self) -> Option<&ActionReport> {
		match self {
			Outcome::Completed(report) => Some(report),
			Outcome::Rejected(_) => None,
		}
	}

	pub fn lines(&self, prefix: &str) -> Vec<String> {
		match self {
			Outcome::Completed(report) => report.lines(prefix),
			Outcome::Rejected(error) => {
				let mut lines = Vec::new();
				if let Some(name) = error.missing_parameter() {
					lines.push(format!("{prefix} missing_params=[{name}]"));
				}
				lines.push(format!(
					"{prefix} error_reason_indicator={}",
					error.indicator()
				));
				lines
			}
		}
	}
}
