//! Action registry
//!
//! Every administrative operation is an [`ActionKind`]. The kind knows its
//! statement builder, the classifier rules applied to the client output and
//! the metadata the gateway publishes.

use crate::classifier::{ClassifierRule, RuleSet};
use pgops_conf::RunnerSettings;
use pgops_query::query::{describe_roles, reload_conf, replication_lag, slow_queries, stat_activity};
use pgops_query::{
	AlterRoleStatement, CreateDatabaseStatement, CreateRoleHierarchyStatement, CreateRoleStatement,
	DropRoleStatement, ParamDescriptor, StatementBuilder, TerminateBackendStatement,
};
use serde::Serialize;
use std::fmt;

/// HTTP method the gateway exposes an action under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
	Get,
	Post,
}

impl HttpMethod {
	pub fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "get",
			HttpMethod::Post => "post",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
	CreateRole,
	AlterRole,
	DropRole,
	CreateDatabase,
	CreateRoleDbHierarchy,
	TerminateSockets,
	DescribeRoles,
	StatActivity,
	SlowQueries,
	SlaveDelay,
	ReloadConf,
}

impl ActionKind {
	pub const ALL: [ActionKind; 11] = [
		ActionKind::CreateRole,
		ActionKind::AlterRole,
		ActionKind::DropRole,
		ActionKind::CreateDatabase,
		ActionKind::CreateRoleDbHierarchy,
		ActionKind::TerminateSockets,
		ActionKind::DescribeRoles,
		ActionKind::StatActivity,
		ActionKind::SlowQueries,
		ActionKind::SlaveDelay,
		ActionKind::ReloadConf,
	];

	pub fn name(self) -> &'static str {
		match self {
			ActionKind::CreateRole => "create-role",
			ActionKind::AlterRole => "alter-role",
			ActionKind::DropRole => "drop-role",
			ActionKind::CreateDatabase => "create-database",
			ActionKind::CreateRoleDbHierarchy => "create-role-db-hierarchy",
			ActionKind::TerminateSockets => "terminate-sockets",
			ActionKind::DescribeRoles => "describe-roles",
			ActionKind::StatActivity => "stat-activity",
			ActionKind::SlowQueries => "slow-queries",
			ActionKind::SlaveDelay => "slave-delay",
			ActionKind::ReloadConf => "reload-conf",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			ActionKind::CreateRole => "Create a new ROLE in Postgres.",
			ActionKind::AlterRole => "Perform ALTER on a ROLE",
			ActionKind::DropRole => "Deletes a role",
			ActionKind::CreateDatabase => "Create a new DATABASE in Postgres.",
			ActionKind::CreateRoleDbHierarchy => {
				"Creates a database owned by an application super-role, plus a super_svc and svc account pair."
			}
			ActionKind::TerminateSockets => "Will terminate sockets to a user or a database.",
			ActionKind::DescribeRoles => "Retrieve a list of roles.",
			ActionKind::StatActivity => "Retrieve pg stats connection activity (whos connected)",
			ActionKind::SlowQueries => "Identify slow queries",
			ActionKind::SlaveDelay => "Show slave delay",
			ActionKind::ReloadConf => "Reload server configs without restarting",
		}
	}

	pub fn http_method(self) -> HttpMethod {
		match self {
			ActionKind::DescribeRoles
			| ActionKind::StatActivity
			| ActionKind::SlowQueries
			| ActionKind::SlaveDelay
			| ActionKind::ReloadConf => HttpMethod::Get,
			_ => HttpMethod::Post,
		}
	}

	pub fn builder(self) -> Box<dyn StatementBuilder> {
		match self {
			ActionKind::CreateRole => Box::new(CreateRoleStatement),
			ActionKind::AlterRole => Box::new(AlterRoleStatement),
			ActionKind::DropRole => Box::new(DropRoleStatement),
			ActionKind::CreateDatabase => Box::new(CreateDatabaseStatement),
			ActionKind::CreateRoleDbHierarchy => Box::new(CreateRoleHierarchyStatement),
			ActionKind::TerminateSockets => Box::new(TerminateBackendStatement),
			ActionKind::DescribeRoles => Box::new(describe_roles()),
			ActionKind::StatActivity => Box::new(stat_activity()),
			ActionKind::SlowQueries => Box::new(slow_queries()),
			ActionKind::SlaveDelay => Box::new(replication_lag()),
			ActionKind::ReloadConf => Box::new(reload_conf()),
		}
	}

	/// Whether the report carries the replication lag fields
	pub fn reports_lag(self) -> bool {
		self == ActionKind::SlaveDelay
	}

	/// Classifier rules, in reporting order.
	///
	/// The SQL error marker follows the directory statement files are written to.
	pub fn rule_set(self, settings: &RunnerSettings) -> RuleSet {
		let sql_error = || ClassifierRule::sql_error(sql_error_marker(settings));
		let rules = match self {
			ActionKind::CreateRole => vec![
				ClassifierRule::role_already_exists(),
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::fatal(),
			],
			ActionKind::AlterRole | ActionKind::DropRole => vec![
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::role_does_not_exist(),
				ClassifierRule::fatal(),
			],
			ActionKind::CreateDatabase => vec![
				ClassifierRule::database_already_exists(),
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::fatal(),
			],
			ActionKind::CreateRoleDbHierarchy => vec![
				ClassifierRule::role_already_exists(),
				ClassifierRule::database_already_exists(),
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::fatal(),
			],
			ActionKind::TerminateSockets => vec![
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::client_socket_terminated(),
				ClassifierRule::fatal(),
			],
			ActionKind::ReloadConf => vec![
				ClassifierRule::transaction_rollback(),
				sql_error(),
				ClassifierRule::fatal(),
			],
			ActionKind::DescribeRoles
			| ActionKind::StatActivity
			| ActionKind::SlowQueries
			| ActionKind::SlaveDelay => vec![sql_error(), ClassifierRule::fatal()],
		};
		RuleSet::new(rules)
	}

	pub fn metadata(self) -> ActionMetadata {
		ActionMetadata {
			name: self.name(),
			description: self.description(),
			http_method: self.http_method(),
			parameters: self.builder().parameters(),
		}
	}
}

impl fmt::Display for ActionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// `psql:{temp_dir}/`, the prefix psql puts on errors raised from a script file
pub fn sql_error_marker(settings: &RunnerSettings) -> String {
	let dir = settings.temp_dir.to_string_lossy();
	format!("psql:{}/", dir.trim_end_matches('/'))
}

/// What the gateway publishes about an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionMetadata {
	pub name: &'static str,
	pub description: &'static str,
	pub http_method: HttpMethod,
	pub parameters: Vec<ParamDescriptor>,
}
