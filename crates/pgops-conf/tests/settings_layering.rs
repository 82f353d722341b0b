//! Defaults, TOML file and environment overrides resolved together

use pgops_conf::settings::{CONFIG_ENV_VAR, SettingsLoader};
use pgops_conf::SettingsError;
use rstest::rstest;
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;

fn clear_env() {
	// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::remove_var(CONFIG_ENV_VAR);
		std::env::remove_var("PGOPS_RUN_AS");
		std::env::remove_var("PGOPS_TEMP_DIR");
	}
}

#[rstest]
#[serial(env)]
fn test_env_overrides_file_overrides_defaults() {
	// Arrange
	clear_env();
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "run_as = \"file_user\"").unwrap();
	writeln!(file, "temp_dir = \"/var/tmp\"").unwrap();
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::set_var("PGOPS_RUN_AS", "env_user");
	}

	// Act
	let settings = SettingsLoader::standard(Some(file.path().to_path_buf()))
		.unwrap()
		.load();

	// Assert
	clear_env();
	let settings = settings.unwrap();
	assert_eq!(settings.run_as, "env_user");
	assert_eq!(settings.temp_dir, PathBuf::from("/var/tmp"));
	assert_eq!(settings.db_user, "postgres");
}

#[rstest]
#[serial(env)]
fn test_config_path_from_environment() {
	clear_env();
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "db_user = \"ops\"").unwrap();
	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::set_var(CONFIG_ENV_VAR, file.path());
	}

	let settings = SettingsLoader::standard(None).unwrap().load();

	clear_env();
	assert_eq!(settings.unwrap().db_user, "ops");
}

#[rstest]
#[serial(env)]
fn test_missing_config_file_is_an_error() {
	clear_env();
	let dir = tempfile::tempdir().unwrap();

	let result = SettingsLoader::standard(Some(dir.path().join("missing.toml")))
		.unwrap()
		.load();

	assert!(matches!(result, Err(SettingsError::Source { .. })));
}

#[rstest]
#[serial(env)]
fn test_no_file_yields_defaults() {
	clear_env();
	let settings = SettingsLoader::standard(None).unwrap().load().unwrap();
	assert_eq!(settings.psql_path, PathBuf::from("/usr/bin/psql"));
	assert_eq!(settings.report_prefix, "jojo_return_value");
}
