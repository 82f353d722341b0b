//! Backend termination by a single pg_stat_activity filter

use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use crate::sanitize::Sanitizer;
use crate::statement::{Bindings, StatementBuilder};
use crate::NAMEDATA_LEN;
use tracing::warn;

const TEMPLATE: &str = "SELECT row_to_json(t) FROM (SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE {column} = '{value}') AS t;";

/// Parameter selecting which backends to terminate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationCriterion {
	Database,
	Application,
	User,
	Pid,
	ClientAddress,
}

impl TerminationCriterion {
	/// Criteria in priority order; the first one present wins
	pub const PRIORITY: [TerminationCriterion; 5] = [
		TerminationCriterion::Database,
		TerminationCriterion::Application,
		TerminationCriterion::User,
		TerminationCriterion::Pid,
		TerminationCriterion::ClientAddress,
	];

	pub fn param(self) -> &'static str {
		match self {
			TerminationCriterion::Database => "DATABASE",
			TerminationCriterion::Application => "APPLICATION",
			TerminationCriterion::User => "USER",
			TerminationCriterion::Pid => "PID",
			TerminationCriterion::ClientAddress => "CLIENT_ADDRESS",
		}
	}

	/// `pg_stat_activity` column filtered on
	pub fn column(self) -> &'static str {
		match self {
			TerminationCriterion::Database => "datname",
			TerminationCriterion::Application => "application_name",
			TerminationCriterion::User => "usename",
			TerminationCriterion::Pid => "procpid",
			TerminationCriterion::ClientAddress => "client_addr",
		}
	}

	pub fn descriptor(self) -> ParamDescriptor {
		let (description, sanitizer) = match self {
			TerminationCriterion::Database => {
				("Terminate sockets connected to this database", Sanitizer::SqlEscape)
			}
			TerminationCriterion::Application => {
				("Terminate sockets with this application_name", Sanitizer::SqlEscape)
			}
			TerminationCriterion::User => {
				("Terminate sockets logged in as this user", Sanitizer::SqlEscape)
			}
			TerminationCriterion::Pid => ("Terminate the backend with this pid", Sanitizer::AlphanumericOnly),
			TerminationCriterion::ClientAddress => {
				("Terminate sockets from this client address", Sanitizer::SqlEscape)
			}
		};
		ParamDescriptor::new(self.param())
			.describe(description)
			.max_length(NAMEDATA_LEN)
			.sanitizer(sanitizer)
	}

	/// Highest-priority criterion present in `params`
	pub fn select(params: &Params) -> Option<Self> {
		Self::PRIORITY
			.into_iter()
			.find(|criterion| params.is_present(criterion.param()))
	}
}

/// Terminates every backend matching exactly one `pg_stat_activity` filter
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminateBackendStatement;

impl StatementBuilder for TerminateBackendStatement {
	fn template(&self) -> &'static str {
		TEMPLATE
	}

	fn max_length(&self) -> usize {
		1000
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		TerminationCriterion::PRIORITY
			.map(TerminationCriterion::descriptor)
			.to_vec()
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let criterion = TerminationCriterion::select(params)
			.ok_or(ValidationError::NoTerminationCriterionProvided)?;

		let mut value = String::new();
		for candidate in TerminationCriterion::PRIORITY {
			let evaluated = candidate.descriptor().evaluate(params)?;
			if candidate == criterion {
				value = evaluated;
			} else if params.is_present(candidate.param()) {
				warn!(
					ignored = candidate.param(),
					selected = criterion.param(),
					"multiple termination criteria supplied; using the first by priority"
				);
			}
		}

		let mut bindings = Bindings::new();
		bindings.bind("column", criterion.column()).bind("value", value);
		Ok(bindings)
	}
}
