//! # Role Statement Tests
//!
//! Covers CreateRoleStatement, AlterRoleStatement and DropRoleStatement:
//! - Happy Path: rendered statements for typical input
//! - Error Path: missing, oversized and out-of-range parameters
//! - Edge Cases: escaping of hostile values, length bailout

use crate::dcl::{AlterRoleStatement, CreateRoleStatement, DropRoleStatement};
use crate::error::ValidationError;
use crate::param::Params;
use crate::statement::StatementBuilder;
use rstest::{fixture, rstest};

fn normalize(sql: &str) -> String {
	sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[fixture]
fn create_params() -> Params {
	Params::from_iter([
		("ROLE", "x"),
		("PASSWORD", "pw"),
		("LOGIN", "true"),
		("CONNECTION_LIMIT", "5"),
	])
}

// ============================================================================
// CREATE ROLE
// ============================================================================

#[rstest]
fn test_create_role_end_to_end(create_params: Params) {
	// Act
	let statement = CreateRoleStatement.build(&create_params).unwrap();

	// Assert
	assert_eq!(
		statement.as_str(),
		"BEGIN; CREATE ROLE x WITH  CONNECTION LIMIT 5  NOCREATEUSER  NOCREATEROLE  NOCREATEDB  NOINHERIT  LOGIN  ENCRYPTED  PASSWORD 'pw' ; END;"
	);
	assert!(normalize(statement.as_str()).contains(&normalize(
		"CREATE ROLE x WITH  CONNECTION LIMIT 5  NOCREATEUSER NOCREATEROLE NOCREATEDB NOINHERIT  LOGIN  ENCRYPTED PASSWORD 'pw'  ; END;"
	)));
}

#[rstest]
fn test_create_role_all_toggles_on() {
	let params = Params::from_iter([
		("ROLE", "admin"),
		("PASSWORD", "pw"),
		("CREATEUSER", "y"),
		("CREATEROLE", "yes"),
		("CREATEDB", "1"),
		("INHERIT", "t"),
		("LOGIN", "TRUE"),
		("ENCRYPTED", "true"),
	]);
	let sql = normalize(CreateRoleStatement.build(&params).unwrap().as_str());
	assert_eq!(
		sql,
		"BEGIN; CREATE ROLE admin WITH CONNECTION LIMIT 10 CREATEUSER CREATEROLE CREATEDB INHERIT LOGIN ENCRYPTED PASSWORD 'pw' ; END;"
	);
}

#[rstest]
fn test_create_role_unencrypted_and_membership() {
	let params = Params::from_iter([
		("ROLE", "app"),
		("PASSWORD", "pw"),
		("ENCRYPTED", "false"),
		("ROLENAME", "readers"),
		("GROUPNAME", "staff"),
	]);
	let sql = CreateRoleStatement.build(&params).unwrap().into_string();
	assert!(sql.contains(" UNENCRYPTED  PASSWORD 'pw'  IN ROLE readers  IN GROUP staff ; END;"));
}

#[rstest]
fn test_create_role_escapes_hostile_values() {
	// Arrange
	let params = Params::from_iter([
		("ROLE", "x; DROP DATABASE prod"),
		("PASSWORD", "it's"),
	]);

	// Act
	let sql = CreateRoleStatement.build(&params).unwrap().into_string();

	// Assert
	assert!(sql.contains("CREATE ROLE x\\\\; DROP DATABASE prod WITH"));
	assert!(sql.contains("PASSWORD 'it\\'s'"));
}

#[rstest]
#[case("ROLE")]
#[case("PASSWORD")]
fn test_create_role_requires(create_params: Params, #[case] name: &str) {
	let mut params = create_params;
	params.insert(name, "");
	assert_eq!(
		CreateRoleStatement.build(&params),
		Err(ValidationError::MissingRequiredParameter {
			name: name.to_string()
		})
	);
}

#[rstest]
fn test_create_role_missing_role_reported_before_password() {
	assert_eq!(
		CreateRoleStatement.build(&Params::new()),
		Err(ValidationError::MissingRequiredParameter {
			name: "ROLE".to_string()
		})
	);
}

#[rstest]
#[case("ROLE", 64, true)]
#[case("ROLE", 65, false)]
#[case("PASSWORD", 64, true)]
#[case("PASSWORD", 65, false)]
#[case("ROLENAME", 65, false)]
fn test_create_role_identifier_bounds(
	create_params: Params,
	#[case] name: &str,
	#[case] len: usize,
	#[case] ok: bool,
) {
	let mut params = create_params;
	params.insert(name, "r".repeat(len));
	let result = CreateRoleStatement.build(&params);
	if ok {
		assert!(result.is_ok());
	} else {
		assert_eq!(
			result,
			Err(ValidationError::ParameterTooLong {
				name: name.to_string(),
				max_length: 64
			})
		);
	}
}

#[rstest]
fn test_create_role_connection_limit_exceeded(create_params: Params) {
	let mut params = create_params;
	params.insert("CONNECTION_LIMIT", "26");
	assert_eq!(
		CreateRoleStatement.build(&params),
		Err(ValidationError::ConnectionLimitExceeded { ceiling: 25 })
	);
	params.insert("CONNECTION_LIMIT_BUST", "please");
	assert!(CreateRoleStatement.build(&params).is_ok());
}

#[rstest]
fn test_create_role_password_redacted_in_log_form(create_params: Params) {
	let statement = CreateRoleStatement.build(&create_params).unwrap();
	assert!(statement.redacted().contains("PASSWORD '********'"));
	assert!(!statement.redacted().contains("'pw'"));
}

#[rstest]
fn test_create_role_parameters_listed() {
	let names: Vec<_> = CreateRoleStatement
		.parameters()
		.iter()
		.map(|p| p.name())
		.collect();
	assert_eq!(
		names,
		vec![
			"ROLE",
			"PASSWORD",
			"CONNECTION_LIMIT",
			"CONNECTION_LIMIT_BUST",
			"CREATEUSER",
			"CREATEROLE",
			"CREATEDB",
			"INHERIT",
			"LOGIN",
			"ENCRYPTED",
			"ROLENAME",
			"GROUPNAME",
		]
	);
}

// ============================================================================
// ALTER ROLE
// ============================================================================

#[rstest]
fn test_alter_role_statement() {
	let params = Params::from_iter([("ROLE", "app"), ("CREATEDB", "yes"), ("INHERIT", "no")]);
	let sql = AlterRoleStatement.build(&params).unwrap().into_string();
	assert_eq!(
		sql,
		"BEGIN; ALTER ROLE app WITH  CONNECTION LIMIT 10  NOCREATEUSER  NOCREATEROLE  CREATEDB  NOINHERIT  NOLOGIN  ; END;"
	);
}

#[rstest]
fn test_alter_role_ignores_password_and_encrypted() {
	let params = Params::from_iter([("ROLE", "app"), ("PASSWORD", "pw"), ("ENCRYPTED", "t")]);
	let sql = AlterRoleStatement.build(&params).unwrap().into_string();
	assert!(!sql.contains("PASSWORD"));
	assert!(!sql.contains("ENCRYPTED"));
}

#[rstest]
fn test_alter_role_requires_role() {
	assert_eq!(
		AlterRoleStatement.build(&Params::from_iter([("LOGIN", "t")])),
		Err(ValidationError::MissingRequiredParameter {
			name: "ROLE".to_string()
		})
	);
}

#[rstest]
fn test_alter_role_bust_ceiling() {
	let params = Params::from_iter([
		("ROLE", "app"),
		("CONNECTION_LIMIT", "151"),
		("CONNECTION_LIMIT_BUST", "1"),
	]);
	assert_eq!(
		AlterRoleStatement.build(&params),
		Err(ValidationError::ConnectionLimitExceeded { ceiling: 150 })
	);
}

// ============================================================================
// DROP ROLE
// ============================================================================

#[rstest]
#[case("reporting", "BEGIN; DROP ROLE reporting; END;")]
#[case("a;b", "BEGIN; DROP ROLE a\\\\;b; END;")]
fn test_drop_role_statement(#[case] role: &str, #[case] expected: &str) {
	let params = Params::from_iter([("ROLE", role)]);
	assert_eq!(DropRoleStatement.build(&params).unwrap().as_str(), expected);
}

#[rstest]
fn test_drop_role_requires_role() {
	assert!(matches!(
		DropRoleStatement.build(&Params::new()),
		Err(ValidationError::MissingRequiredParameter { .. })
	));
}
