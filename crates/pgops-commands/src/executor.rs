//! SQL execution collaborator
//!
//! [`PsqlExecutor`] writes the statement to a temp file and runs
//! `[sudo -u <run_as>] psql -U <db_user> -a -f <file>`, returning everything
//! the client printed. Success is never read from the exit status; the
//! classifier decides from the text.

use pgops_conf::RunnerSettings;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;

/// Runs a statement and returns the client's combined output
#[cfg_attr(test, mockall::automock)]
pub trait SqlExecutor {
	fn execute(&self, script: &str) -> Result<String, ExecutionError>;
}

/// Failures that prevented the client from producing output
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
	#[error("Failed to write statement file in {}: {source}", dir.display())]
	ScriptFile {
		dir: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("SQL client '{}' not found", program.display())]
	NotFound { program: PathBuf },

	#[error("Failed to run '{}': {source}", program.display())]
	Spawn {
		program: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// psql subprocess executor
#[derive(Debug, Clone)]
pub struct PsqlExecutor {
	settings: RunnerSettings,
}

impl PsqlExecutor {
	pub fn new(settings: RunnerSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &RunnerSettings {
		&self.settings
	}

	/// The client invocation for a script already on disk
	pub fn command(&self, script_path: &Path) -> Command {
		let settings = &self.settings;
		let mut command = if settings.uses_sudo() {
			let mut sudo = Command::new(&settings.sudo_path);
			sudo.arg("-u").arg(&settings.run_as).arg(&settings.psql_path);
			sudo
		} else {
			Command::new(&settings.psql_path)
		};
		command
			.arg("-U")
			.arg(&settings.db_user)
			.arg("-a")
			.arg("-f")
			.arg(script_path);
		command
	}

	fn program(&self) -> &Path {
		if self.settings.uses_sudo() {
			&self.settings.sudo_path
		} else {
			&self.settings.psql_path
		}
	}

	/// Write `script` to a file the `run_as` user can read; removed on drop
	fn write_script(&self, script: &str) -> Result<NamedTempFile, ExecutionError> {
		let dir = &self.settings.temp_dir;
		let to_error = |source| ExecutionError::ScriptFile {
			dir: dir.clone(),
			source,
		};

		let mut file = tempfile::Builder::new()
			.prefix("pgops-")
			.suffix(".sql")
			.tempfile_in(dir)
			.map_err(to_error)?;
		file.write_all(script.as_bytes()).map_err(to_error)?;
		file.flush().map_err(to_error)?;

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			file.as_file()
				.set_permissions(std::fs::Permissions::from_mode(0o644))
				.map_err(to_error)?;
		}

		Ok(file)
	}
}

impl SqlExecutor for PsqlExecutor {
	fn execute(&self, script: &str) -> Result<String, ExecutionError> {
		let file = self.write_script(script)?;
		let mut command = self.command(file.path());
		debug!(command = ?command, "running SQL client");

		let output = command.output().map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				ExecutionError::NotFound {
					program: self.program().to_path_buf(),
				}
			} else {
				ExecutionError::Spawn {
					program: self.program().to_path_buf(),
					source: e,
				}
			}
		})?;
		debug!(status = %output.status, "SQL client exited");

		Ok(combine_output(&output.stdout, &output.stderr))
	}
}

/// Stdout followed by stderr, with stderr starting on its own line
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
	let mut text = String::from_utf8_lossy(stdout).into_owned();
	if !stderr.is_empty() && !text.is_empty() && !text.ends_with('\n') {
		text.push('\n');
	}
	text.push_str(&String::from_utf8_lossy(stderr));
	text
}
