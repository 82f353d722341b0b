//! Pipeline tests against a mocked SQL client

use super::*;
use crate::executor::{ExecutionError, MockSqlExecutor};
use crate::report::ExecutionStatus;
use rstest::rstest;
use std::path::PathBuf;

const PREFIX: &str = "jojo_return_value";

fn runner(mock: MockSqlExecutor) -> ActionRunner<MockSqlExecutor> {
	ActionRunner::new(mock, RunnerSettings::default())
}

fn replying(output: &'static str) -> MockSqlExecutor {
	let mut mock = MockSqlExecutor::new();
	mock.expect_execute()
		.times(1)
		.returning(move |_| Ok(output.to_string()));
	mock
}

fn never_called() -> MockSqlExecutor {
	let mut mock = MockSqlExecutor::new();
	mock.expect_execute().never();
	mock
}

// ============================================================================
// Successful runs
// ============================================================================

#[rstest]
fn test_create_role_end_to_end_ok() {
	// Arrange
	let mut mock = MockSqlExecutor::new();
	mock.expect_execute()
		.withf(|script| script.contains("CREATE ROLE x WITH  CONNECTION LIMIT 5 ") && script.contains("PASSWORD 'pw'"))
		.times(1)
		.returning(|_| Ok("BEGIN\nCREATE ROLE\nCOMMIT\n".to_string()));
	let params = Params::from_iter([
		("ROLE", "x"),
		("PASSWORD", "pw"),
		("LOGIN", "true"),
		("CONNECTION_LIMIT", "5"),
	]);

	// Act
	let execution = runner(mock).run(ActionKind::CreateRole, &params);

	// Assert
	assert_eq!(execution.exit_code(), 0);
	assert_eq!(
		execution.stdout_lines(PREFIX),
		vec![
			"BEGIN",
			"CREATE ROLE",
			"COMMIT",
			"jojo_return_value execution_status=ok"
		]
	);
	assert!(execution.diagnostics.is_empty());
}

#[rstest]
fn test_terminate_sockets_filters_on_database() {
	let mut mock = MockSqlExecutor::new();
	mock.expect_execute()
		.withf(|script| script.contains("WHERE datname = 'x'"))
		.times(1)
		.returning(|_| Ok(" row_to_json \n-------------\n(0 rows)\n".to_string()));

	let execution = runner(mock).run(
		ActionKind::TerminateSockets,
		&Params::from_iter([("DATABASE", "x")]),
	);

	assert_eq!(execution.exit_code(), 0);
}

#[rstest]
fn test_replication_lag_fields() {
	// Arrange
	let mock = replying("    time_lag     \n-----------------\n 00:00:05.500000\n(1 row)\n");

	// Act
	let execution = runner(mock).run(ActionKind::SlaveDelay, &Params::new());

	// Assert
	let report = execution.outcome.report().unwrap();
	assert_eq!(report.status, ExecutionStatus::Ok);
	assert_eq!(report.field(SLAVE_DELAY_FIELD), Some("00:00:05.500000"));
	assert_eq!(report.field(SLAVE_DELTA_FIELD), Some("5.5"));
	let lines = execution.stdout_lines(PREFIX);
	assert_eq!(
		&lines[lines.len() - 3..],
		&[
			"jojo_return_value execution_status=ok".to_string(),
			"jojo_return_value slave_delay=00:00:05.500000".to_string(),
			"jojo_return_value slave_delta_in_seconds=5.5".to_string(),
		]
	);
}

// ============================================================================
// Classified failures
// ============================================================================

#[rstest]
fn test_replication_lag_empty_select() {
	let mock = replying(" time_lag \n----------\n \n(1 row)\n");

	let execution = runner(mock).run(ActionKind::SlaveDelay, &Params::new());

	assert_eq!(execution.exit_code(), 1);
	let report = execution.outcome.report().unwrap();
	assert_eq!(report.reasons, vec![ReasonCode::ReplicaDelaySelectWasEmpty]);
	assert_eq!(report.field(SLAVE_DELAY_FIELD), Some(LAG_SENTINEL));
	assert_eq!(report.field(SLAVE_DELTA_FIELD), Some(LAG_SENTINEL));
}

#[rstest]
fn test_role_already_exists() {
	// Arrange
	let mock = replying(
		"BEGIN;\nBEGIN\npsql:/tmp/pgops-a1.sql:1: ERROR:  role \"x\" already exists\nEND;\nROLLBACK\n",
	);
	let params = Params::from_iter([("ROLE", "x"), ("PASSWORD", "pw")]);

	// Act
	let execution = runner(mock).run(ActionKind::CreateRole, &params);

	// Assert
	assert_eq!(execution.exit_code(), 1);
	let lines = execution.outcome.lines(PREFIX);
	assert_eq!(
		lines,
		vec![
			"jojo_return_value execution_status=rollback",
			"jojo_return_value error_reason_indicator=[ROLE_ALREADY_EXIST, TRANSACTION_ROLLBACK, SQL_ERROR]",
		]
	);
	assert_eq!(execution.diagnostics.len(), 2);
}

#[rstest]
fn test_sql_error_marker_follows_settings() {
	// Arrange
	let settings = RunnerSettings {
		temp_dir: PathBuf::from("/var/lib/pgops"),
		..RunnerSettings::default()
	};
	let mock = replying("psql:/tmp/other.sql:1: ERROR:  nope\npsql:/var/lib/pgops/a.sql:1: ERROR:  syntax error\n");

	// Act
	let execution = ActionRunner::new(mock, settings).run(ActionKind::StatActivity, &Params::new());

	// Assert
	let report = execution.outcome.report().unwrap();
	assert_eq!(report.reasons, vec![ReasonCode::SqlError]);
	assert_eq!(execution.diagnostics, vec!["psql:/var/lib/pgops/a.sql:1: ERROR:  syntax error".to_string()]);
}

#[rstest]
fn test_executor_failure_is_unknown_rollback() {
	let mut mock = MockSqlExecutor::new();
	mock.expect_execute().times(1).returning(|_| {
		Err(ExecutionError::NotFound {
			program: PathBuf::from("/usr/bin/sudo"),
		})
	});

	let execution = runner(mock).run(ActionKind::ReloadConf, &Params::new());

	assert_eq!(execution.exit_code(), 1);
	assert_eq!(execution.client_output, None);
	assert_eq!(
		execution.stdout_lines(PREFIX),
		vec![
			"jojo_return_value execution_status=rollback",
			"jojo_return_value error_reason_indicator=[UNKNOWN]",
		]
	);
	assert!(execution.diagnostics[0].contains("not found"));
}

// ============================================================================
// Validation failures never reach the client
// ============================================================================

#[rstest]
fn test_missing_role_is_rejected_without_execution() {
	// Act
	let execution = runner(never_called()).run(ActionKind::DropRole, &Params::new());

	// Assert
	assert_eq!(execution.exit_code(), 244);
	assert_eq!(
		execution.stdout_lines(PREFIX),
		vec![
			"jojo_return_value missing_params=[ROLE]",
			"jojo_return_value error_reason_indicator=EXPECTED_PARAMETER_IS_NULL",
		]
	);
}

#[rstest]
#[case(ActionKind::TerminateSockets, vec![])]
#[case(ActionKind::CreateRole, vec![("ROLE", "x"), ("PASSWORD", "pw"), ("CONNECTION_LIMIT", "26")])]
#[case(ActionKind::CreateRole, vec![("ROLE", "x"), ("PASSWORD", "pw"), ("CONNECTION_LIMIT", "ten")])]
#[case(ActionKind::AlterRole, vec![("ROLE", "x"), ("CONNECTION_LIMIT", "151"), ("CONNECTION_LIMIT_BUST", "1")])]
fn test_unexpected_input_is_rejected(
	#[case] kind: ActionKind,
	#[case] params: Vec<(&'static str, &'static str)>,
) {
	let execution = runner(never_called()).run(kind, &Params::from_iter(params));

	assert_eq!(execution.exit_code(), 244);
	assert_eq!(
		execution.stdout_lines(PREFIX),
		vec!["jojo_return_value error_reason_indicator=UNEXPECTED_PARAMETER_INPUT"]
	);
	assert_eq!(execution.diagnostics.len(), 1);
}

#[rstest]
fn test_oversized_statement_rolls_back_without_execution() {
	// Arrange
	let application = ";".repeat(64);
	let params = Params::from_iter([
		("APPLICATION", application.as_str()),
		("SUPER_PASSWORD", "a"),
		("SVC_PASSWORD", "b"),
	]);

	// Act
	let execution = runner(never_called()).run(ActionKind::CreateRoleDbHierarchy, &params);

	// Assert
	assert_eq!(execution.exit_code(), 1);
	assert_eq!(
		execution.outcome.report().unwrap().reasons,
		vec![ReasonCode::Unknown]
	);
}

#[rstest]
fn test_prepare_builds_without_executing() {
	let statement = runner(never_called())
		.prepare(ActionKind::CreateDatabase, &Params::from_iter([("DATABASE", "shop")]))
		.unwrap();
	assert_eq!(statement.as_str(), "CREATE DATABASE shop;");
}
