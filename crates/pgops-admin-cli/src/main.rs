//! pgops
//!
//! Operator-triggered PostgreSQL administrative actions, invoked by an
//! HTTP-to-shell gateway.
//!
//! ## Usage
//!
//! ```bash
//! ROLE=reporting PASSWORD=s3cret LOGIN=yes pgops create-role
//! pgops terminate-sockets --param DATABASE=shop
//! pgops create-role -p ROLE=reporting -p PASSWORD=s3cret --dry-run
//! pgops list --json
//! ```
//!
//! Report lines go to stdout; logs and diagnostics go to stderr. Exit codes:
//! `0` ok, `1` rollback, `244` rejected input.

use anyhow::Context;
use clap::Parser;
use pgops_commands::Cli;
use pgops_commands::cli::execute;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbosity);

	match run(&cli) {
		Ok(code) => ExitCode::from(code),
		Err(e) => {
			eprintln!("Error: {:#}", e);
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
	debug!(command = ?cli.command, "dispatching");
	let code = execute(cli).context("pgops could not run the command")?;
	Ok(code)
}

/// Level for a `-v` count when `RUST_LOG` is unset
fn default_level(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

fn init_logging(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(filter)
		.with_target(false)
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, "warn")]
	#[case(1, "info")]
	#[case(2, "debug")]
	#[case(3, "trace")]
	#[case(9, "trace")]
	fn test_default_level(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(default_level(verbosity), expected);
	}
}
