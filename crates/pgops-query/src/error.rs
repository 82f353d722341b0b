//! Validation errors raised before a statement is executed

use thiserror::Error;

/// Indicator reported for a missing required parameter
pub const EXPECTED_PARAMETER_IS_NULL: &str = "EXPECTED_PARAMETER_IS_NULL";

/// Indicator reported for malformed, oversized or out-of-range input
pub const UNEXPECTED_PARAMETER_INPUT: &str = "UNEXPECTED_PARAMETER_INPUT";

/// Indicator reported when no more specific reason is known
pub const UNKNOWN: &str = "UNKNOWN";

/// Errors that abort statement construction.
///
/// None of these ever reach the SQL execution collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A required parameter was absent (empty)
	#[error("required parameter {name} is missing")]
	MissingRequiredParameter { name: String },

	/// A parameter exceeded its byte-length bound
	#[error("parameter {name} exceeds maximum length of {max_length}")]
	ParameterTooLong { name: String, max_length: usize },

	/// The requested connection limit exceeded the applicable ceiling
	#[error("connection limit exceeds ceiling of {ceiling}")]
	ConnectionLimitExceeded { ceiling: u32 },

	/// A numeric parameter could not be parsed as a non-negative integer
	#[error("parameter {name} is not a valid number")]
	InvalidNumber { name: String },

	/// Terminate-sockets was invoked without any filter criterion
	#[error(
		"no termination criterion provided (expected one of DATABASE, APPLICATION, USER, PID, CLIENT_ADDRESS)"
	)]
	NoTerminationCriterionProvided,

	/// The assembled statement exceeded the action's maximum length
	#[error("statement length {actual} exceeds maximum of {max_length}")]
	StatementTooLong { max_length: usize, actual: usize },
}

impl ValidationError {
	/// Indicator written to the `error_reason_indicator` report line
	pub fn indicator(&self) -> &'static str {
		match self {
			ValidationError::MissingRequiredParameter { .. } => EXPECTED_PARAMETER_IS_NULL,
			ValidationError::StatementTooLong { .. } => UNKNOWN,
			_ => UNEXPECTED_PARAMETER_INPUT,
		}
	}

	/// Whether this failure is a length bailout on the assembled statement.
	///
	/// Bailouts are reported as a rollback rather than as malformed input.
	pub fn is_bailout(&self) -> bool {
		matches!(self, ValidationError::StatementTooLong { .. })
	}

	/// Name of the missing parameter, if this is a missing-parameter failure
	pub fn missing_parameter(&self) -> Option<&str> {
		match self {
			ValidationError::MissingRequiredParameter { name } => Some(name),
			_ => None,
		}
	}
}
