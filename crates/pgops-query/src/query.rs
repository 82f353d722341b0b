//! Database, session and inspection statement builders

mod create_database;
mod inspect;
mod terminate_backend;

pub use create_database::CreateDatabaseStatement;
pub use inspect::{
	DESCRIBE_ROLES, RELOAD_CONF, REPLICATION_LAG, SLOW_QUERIES, STAT_ACTIVITY, describe_roles,
	reload_conf, replication_lag, slow_queries, stat_activity,
};
pub use terminate_backend::{TerminateBackendStatement, TerminationCriterion};
