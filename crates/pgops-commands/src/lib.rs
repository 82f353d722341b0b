//! # pgops-commands
//!
//! Runs pgops actions: builds the statement, hands it to the SQL client,
//! classifies what the client printed and renders the gateway report.
//!
//! - [`action`]: the action registry and per-action classifier rules
//! - [`classifier`]: line rules mapping client output to [`ReasonCode`]s
//! - [`lag`]: replication lag extraction
//! - [`report`]: [`ActionReport`], [`Outcome`] and exit codes
//! - [`executor`]: the [`SqlExecutor`] seam and the psql implementation
//! - [`pipeline`]: [`ActionRunner`], tying the pieces together
//! - [`cli`]: clap definitions and dispatch for the `pgops` binary
//!
//! ```
//! use pgops_commands::{ActionKind, ActionRunner, ExecutionError, SqlExecutor};
//! use pgops_conf::RunnerSettings;
//! use pgops_query::Params;
//!
//! struct Canned(&'static str);
//!
//! impl SqlExecutor for Canned {
//! 	fn execute(&self, _script: &str) -> Result<String, ExecutionError> {
//! 		Ok(self.0.to_string())
//! 	}
//! }
//!
//! let runner = ActionRunner::new(Canned("BEGIN\nROLLBACK\n"), RunnerSettings::default());
//! let execution = runner.run(ActionKind::DropRole, &Params::from_iter([("ROLE", "ghost")]));
//! assert_eq!(execution.exit_code(), 1);
//! ```

pub mod action;
pub mod classifier;
pub mod cli;
pub mod executor;
pub mod lag;
pub mod output;
pub mod pipeline;
pub mod reason;
pub mod report;

pub use action::{ActionKind, ActionMetadata, HttpMethod};
pub use classifier::{Classification, ClassifierRule, LineMatcher, RuleSet};
pub use cli::{Cli, CommandError};
pub use executor::{ExecutionError, PsqlExecutor, SqlExecutor};
pub use lag::ReplicationLag;
pub use pipeline::{ActionRunner, Execution};
pub use reason::ReasonCode;
pub use report::{ActionReport, ExecutionStatus, Outcome};
