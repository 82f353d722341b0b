//! Fixed read-only and maintenance statements

use crate::statement::FixedStatement;

const MAX_LENGTH: usize = 2000;

/// psql meta-command listing roles and their attributes
pub const DESCRIBE_ROLES: &str = "\\du";

pub const STAT_ACTIVITY: &str = "BEGIN; select * from pg_stat_activity; COMMIT;";

/// Open transactions, longest-running first
pub const SLOW_QUERIES: &str = "SELECT pid, current_timestamp - xact_start as xact_runtime, query FROM pg_stat_activity WHERE query NOT LIKE '%pg_stat_activity%' ORDER BY xact_start;";

/// Time since the last replayed transaction on a standby
pub const REPLICATION_LAG: &str = "SELECT now() - pg_last_xact_replay_timestamp() AS time_lag;";

pub const RELOAD_CONF: &str = "BEGIN; select pg_reload_conf(); COMMIT;";

pub const fn describe_roles() -> FixedStatement {
	FixedStatement::new(DESCRIBE_ROLES, MAX_LENGTH)
}

pub const fn stat_activity() -> FixedStatement {
	FixedStatement::new(STAT_ACTIVITY, MAX_LENGTH)
}

pub const fn slow_queries() -> FixedStatement {
	FixedStatement::new(SLOW_QUERIES, MAX_LENGTH)
}

pub const fn replication_lag() -> FixedStatement {
	FixedStatement::new(REPLICATION_LAG, MAX_LENGTH)
}

pub const fn reload_conf() -> FixedStatement {
	FixedStatement::new(RELOAD_CONF, MAX_LENGTH)
}
