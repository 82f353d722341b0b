//! # pgops-conf
//!
//! Settings and input loading for pgops.
//!
//! - [`settings`]: [`RunnerSettings`] layered from defaults, a TOML file and
//!   `PGOPS_*` environment variables
//! - [`params`]: gateway parameters from the environment and `KEY=VALUE`
//!   overrides
//! - [`sources`]: the [`ConfigSource`](sources::ConfigSource) layers
//! - [`env`]: prefixed environment lookups

pub mod env;
pub mod params;
pub mod settings;
pub mod sources;

pub use env::{Env, EnvError};
pub use params::ParamSource;
pub use settings::{RunnerSettings, SettingsError, SettingsLoader};
