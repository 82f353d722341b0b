//! What escaping does to hostile input inside built statements
//!
//! `escape_sql` escapes `;` before it doubles backslashes, so a semicolon in
//! a value comes out as `\\;`: an escaped backslash followed by a live
//! terminator. Quotes always come out with an odd backslash run, so quoted
//! literals stay closed where the template closes them.

use pgops_query::prelude::*;
use proptest::prelude::*;
use rstest::rstest;

/// Occurrences of `ch` whose preceding run of backslashes has even length
fn unescaped(sql: &str, ch: u8) -> usize {
	let bytes = sql.as_bytes();
	bytes
		.iter()
		.enumerate()
		.filter(|&(i, &b)| {
			b == ch && bytes[..i].iter().rev().take_while(|&&c| c == b'\\').count() % 2 == 0
		})
		.count()
}

#[rstest]
#[case("a;b", 1)]
#[case("a\\;b", 0)]
#[case("a\\\\;b", 1)]
#[case("a\\\\\\;b", 0)]
#[case(";", 1)]
fn test_unescaped_counts_backslash_runs(#[case] sql: &str, #[case] expected: usize) {
	assert_eq!(unescaped(sql, b';'), expected);
}

#[rstest]
#[case(&CreateRoleStatement as &dyn StatementBuilder, 3)]
#[case(&AlterRoleStatement as &dyn StatementBuilder, 3)]
#[case(&DropRoleStatement as &dyn StatementBuilder, 3)]
#[case(&CreateDatabaseStatement as &dyn StatementBuilder, 1)]
fn test_template_terminators(#[case] builder: &dyn StatementBuilder, #[case] expected: usize) {
	let params = Params::from_iter([
		("ROLE", "r"),
		("PASSWORD", "p"),
		("DATABASE", "d"),
	]);
	let statement = builder.build(&params).unwrap();
	assert_eq!(unescaped(statement.as_str(), b';'), expected);
}

#[rstest]
fn test_semicolon_in_role_becomes_escaped_backslash_and_terminator() {
	// Arrange
	let params = Params::from_iter([("ROLE", "x; DROP TABLE t"), ("PASSWORD", "p")]);

	// Act
	let statement = CreateRoleStatement.build(&params).unwrap();

	// Assert
	assert!(
		statement
			.as_str()
			.starts_with("BEGIN; CREATE ROLE x\\\\; DROP TABLE t WITH ")
	);
	assert_eq!(unescaped(statement.as_str(), b';'), 4);
}

#[rstest]
fn test_alphanumeric_values_cannot_add_terminators() {
	let params = Params::from_iter([("PID", "1; SELECT 2")]);
	let statement = TerminateBackendStatement.build(&params).unwrap();
	assert!(statement.as_str().contains("= '1SELECT2'"));
	assert_eq!(unescaped(statement.as_str(), b';'), 1);
}

proptest! {
	#[test]
	fn prop_create_role_terminators_track_input_semicolons(
		role in "[^\\p{Cc}]{1,16}",
		password in "[^\\p{Cc}]{1,16}",
		group in "[^\\p{Cc}]{0,16}",
	) {
		let injected = [&role, &password, &group]
			.iter()
			.map(|value| value.matches(';').count())
			.sum::<usize>();
		let params = Params::from_iter([
			("ROLE", role),
			("PASSWORD", password),
			("GROUPNAME", group),
		]);
		let statement = CreateRoleStatement.build(&params).unwrap();
		prop_assert_eq!(unescaped(statement.as_str(), b';'), 3 + injected);
		prop_assert!(statement.as_str().ends_with("; END;"));
	}

	#[test]
	fn prop_terminate_value_stays_quoted(value in "[^\\p{Cc}]{1,16}") {
		let params = Params::from_iter([("USER", value)]);
		let statement = TerminateBackendStatement.build(&params).unwrap();
		let sql = statement.as_str();
		prop_assert!(sql.ends_with("') AS t;"));
		prop_assert_eq!(unescaped(sql, b'\''), 2);
	}
}
