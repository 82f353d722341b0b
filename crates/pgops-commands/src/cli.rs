//! Command-line interface
//!
//! One subcommand per action plus `list`. Action parameters come from the
//! environment (as the gateway sets them) and `--param KEY=VALUE` overrides.
//! The gateway runs actions with a clean environment; from an operator shell,
//! `--no-env` keeps variables such as `USER` from being read as parameters.

use crate::action::{ActionKind, ActionMetadata};
use crate::executor::PsqlExecutor;
use crate::output;
use crate::pipeline::{ActionRunner, Execution};
use crate::report::EXIT_OK;
use clap::{Args, Parser, Subcommand};
use pgops_conf::{EnvError, ParamSource, RunnerSettings, SettingsError, SettingsLoader};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// pgops command line
#[derive(Debug, Parser)]
#[command(name = "pgops")]
#[command(about = "Operator-triggered PostgreSQL administrative actions", long_about = None)]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Settings file (TOML); takes precedence over PGOPS_CONFIG
	#[arg(long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	pub verbosity: u8,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
	#[command(flatten)]
	Action(ActionCommand),

	/// List available actions and their parameters
	List {
		/// Print as JSON
		#[arg(long)]
		json: bool,
	},
}

/// Options shared by every action
#[derive(Debug, Clone, Default, Args)]
pub struct ActionArgs {
	/// Parameter override, e.g. `--param ROLE=reporting` (repeatable)
	#[arg(short, long = "param", value_name = "KEY=VALUE")]
	pub params: Vec<String>,

	/// Validate and print the statement without executing it
	#[arg(long)]
	pub dry_run: bool,

	/// Read parameters only from `--param`, ignoring the environment
	#[arg(long)]
	pub no_env: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ActionCommand {
	/// Create a new role
	CreateRole(ActionArgs),
	/// Alter an existing role
	AlterRole(ActionArgs),
	/// Drop a role
	DropRole(ActionArgs),
	/// Create a database
	CreateDatabase(ActionArgs),
	/// Create an application database with its role and account hierarchy
	CreateRoleDbHierarchy(ActionArgs),
	/// Terminate backends matching one filter
	TerminateSockets(ActionArgs),
	/// List roles
	DescribeRoles(ActionArgs),
	/// Show connection activity
	StatActivity(ActionArgs),
	/// Show open transactions, longest-running first
	SlowQueries(ActionArgs),
	/// Show standby replication lag
	SlaveDelay(ActionArgs),
	/// Reload server configuration
	ReloadConf(ActionArgs),
}

impl ActionCommand {
	pub fn kind(&self) -> ActionKind {
		match self {
			ActionCommand::CreateRole(_) => ActionKind::CreateRole,
			ActionCommand::AlterRole(_) => ActionKind::AlterRole,
			ActionCommand::DropRole(_) => ActionKind::DropRole,
			ActionCommand::CreateDatabase(_) => ActionKind::CreateDatabase,
			ActionCommand::CreateRoleDbHierarchy(_) => ActionKind::CreateRoleDbHierarchy,
			ActionCommand::TerminateSockets(_) => ActionKind::TerminateSockets,
			ActionCommand::DescribeRoles(_) => ActionKind::DescribeRoles,
			ActionCommand::StatActivity(_) => ActionKind::StatActivity,
			ActionCommand::SlowQueries(_) => ActionKind::SlowQueries,
			ActionCommand::SlaveDelay(_) => ActionKind::SlaveDelay,
			ActionCommand::ReloadConf(_) => ActionKind::ReloadConf,
		}
	}

	pub fn args(&self) -> &ActionArgs {
		match self {
			ActionCommand::CreateRole(args)
			| ActionCommand::AlterRole(args)
			| ActionCommand::DropRole(args)
			| ActionCommand::CreateDatabase(args)
			| ActionCommand::CreateRoleDbHierarchy(args)
			| ActionCommand::TerminateSockets(args)
			| ActionCommand::DescribeRoles(args)
			| ActionCommand::StatActivity(args)
			| ActionCommand::SlowQueries(args)
			| ActionCommand::SlaveDelay(args)
			| ActionCommand::ReloadConf(args) => args,
		}
	}
}

/// Failures outside the action itself
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	#[error(transparent)]
	Settings(#[from] SettingsError),

	#[error("Invalid parameter: {0}")]
	Param(#[from] EnvError),

	#[error("Failed to write output: {0}")]
	Output(#[from] std::io::Error),

	#[error("Failed to serialize action list: {0}")]
	Json(#[from] serde_json::Error),
}

/// Run the parsed command line; returns the process exit code
pub fn execute(cli: &Cli) -> Result<u8, CommandError> {
	match &cli.command {
		Commands::List { json } => {
			list_actions(*json)?;
			Ok(EXIT_OK)
		}
		Commands::Action(command) => {
			let settings = SettingsLoader::standard(cli.config.clone())?.load()?;
			debug!(settings = ?settings, "settings loaded");
			let args = command.args();
			let source = if args.no_env {
				ParamSource::isolated()
			} else {
				ParamSource::from_environment()
			};
			let params = source.with_assignments(&args.params)?.load();
			run_action(command, &params, settings)
		}
	}
}

fn run_action(
	command: &ActionCommand,
	params: &pgops_query::Params,
	settings: RunnerSettings,
) -> Result<u8, CommandError> {
	let kind = command.kind();
	let prefix = settings.report_prefix.clone();
	let runner = ActionRunner::new(PsqlExecutor::new(settings.clone()), settings);

	let execution = if command.args().dry_run {
		match runner.prepare(kind, params) {
			Ok(statement) => {
				output::warning("dry run: statement not executed");
				let mut stdout = std::io::stdout().lock();
				writeln!(stdout, "{}", statement.redacted())?;
				return Ok(EXIT_OK);
			}
			Err(error) => Execution::rejected(kind, error),
		}
	} else {
		runner.run(kind, params)
	};

	emit(&execution, &prefix)?;
	Ok(execution.exit_code())
}

/// Diagnostics to stderr, client output and report to stdout
pub fn emit(execution: &Execution, prefix: &str) -> std::io::Result<()> {
	for line in &execution.diagnostics {
		output::diagnostic(line);
	}
	output::write_lines(&mut std::io::stdout().lock(), &execution.stdout_lines(prefix))
}

fn list_actions(json: bool) -> Result<(), CommandError> {
	let actions: Vec<ActionMetadata> = ActionKind::ALL.iter().map(|k| k.metadata()).collect();
	let mut stdout = std::io::stdout().lock();
	if json {
		output::write_action_json(&mut stdout, &actions)?;
	} else {
		output::write_action_list(&mut stdout, &actions)?;
	}
	Ok(())
}
