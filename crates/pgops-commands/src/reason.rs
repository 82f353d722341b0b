//! Closed taxonomy of rollback reasons

use serde::Serialize;
use std::fmt;

/// Why an executed action rolled back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
	TransactionRollback,
	SqlError,
	RoleDoesNotExist,
	RoleAlreadyExist,
	DatabaseAlreadyExist,
	FatalError,
	ClientSocketWasTerminated,
	ReplicaDelaySelectWasEmpty,
	/// Fallback when nothing more specific is known
	Unknown,
}

impl ReasonCode {
	pub fn as_str(self) -> &'static str {
		match self {
			ReasonCode::TransactionRollback => "TRANSACTION_ROLLBACK",
			ReasonCode::SqlError => "SQL_ERROR",
			ReasonCode::RoleDoesNotExist => "ROLE_DOES_NOT_EXIST",
			ReasonCode::RoleAlreadyExist => "ROLE_ALREADY_EXIST",
			ReasonCode::DatabaseAlreadyExist => "DATABASE_ALREADY_EXIST",
			ReasonCode::FatalError => "FATAL_ERROR",
			ReasonCode::ClientSocketWasTerminated => "CLIENT_SOCKET_WAS_TERMINATED",
			ReasonCode::ReplicaDelaySelectWasEmpty => "REPLICA_DELAY_SELECT_WAS_EMPTY",
			ReasonCode::Unknown => "UNKNOWN",
		}
	}
}

impl fmt::Display for ReasonCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
