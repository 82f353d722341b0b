//! # pgops-query
//!
//! Parameter validation, sanitization and statement templates for the pgops
//! administrative actions.
//!
//! Statements are assembled by substituting validated values into a fixed,
//! per-action template. There are no bind parameters, so every free-text value
//! passes through the [`sanitize`] layer before it is interpolated.
//!
//! ## Architecture
//!
//! - [`sanitize`]: pure escaping functions
//! - [`param`]: the [`Params`] input map and [`ParamDescriptor`] validation rules
//! - [`statement`]: template rendering, the length guard and the
//!   [`StatementBuilder`] trait
//! - [`dcl`]: role statements ([`CreateRoleStatement`], [`AlterRoleStatement`],
//!   [`DropRoleStatement`], [`CreateRoleHierarchyStatement`])
//! - [`query`]: database, session and inspection statements
//!
//! ## Quick Start
//!
//! ```rust
//! use pgops_query::prelude::*;
//!
//! let params = Params::from_iter([
//! 	("ROLE", "reporting"),
//! 	("PASSWORD", "s3cret"),
//! 	("LOGIN", "yes"),
//! ]);
//!
//! let statement = CreateRoleStatement.build(&params).unwrap();
//! assert!(statement.as_str().starts_with("BEGIN; CREATE ROLE reporting WITH"));
//! assert!(statement.redacted().contains("PASSWORD '********'"));
//!
//! let missing = DropRoleStatement.build(&Params::new()).unwrap_err();
//! assert_eq!(missing.indicator(), "EXPECTED_PARAMETER_IS_NULL");
//! ```

pub mod dcl;
pub mod error;
pub mod param;
pub mod query;
pub mod sanitize;
pub mod statement;

/// Maximum identifier length accepted for names and passwords
pub const NAMEDATA_LEN: usize = 64;

pub use dcl::{
	AlterRoleStatement, CreateRoleHierarchyStatement, CreateRoleStatement, DropRoleStatement,
	RoleAttribute,
};
pub use error::ValidationError;
pub use param::{BoolCoercion, ParamDescriptor, Params, Tristate};
pub use query::{CreateDatabaseStatement, TerminateBackendStatement, TerminationCriterion};
pub use sanitize::{Sanitizer, alphanumeric_only, escape_sql};
pub use statement::{Bindings, FixedStatement, Statement, StatementBuilder};

/// Commonly used types
pub mod prelude {
	pub use crate::dcl::{
		AlterRoleStatement, CreateRoleHierarchyStatement, CreateRoleStatement, DropRoleStatement,
	};
	pub use crate::error::ValidationError;
	pub use crate::param::{ParamDescriptor, Params};
	pub use crate::query::{CreateDatabaseStatement, TerminateBackendStatement};
	pub use crate::sanitize::Sanitizer;
	pub use crate::statement::{Statement, StatementBuilder};
}
