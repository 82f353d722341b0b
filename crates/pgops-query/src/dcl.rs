//! Role-management statement builders
//!
//! Each builder implements [`StatementBuilder`](crate::statement::StatementBuilder)
//! for one fixed statement shape.
//!
//! # Examples
//!
//! ```
//! use pgops_query::dcl::DropRoleStatement;
//! use pgops_query::param::Params;
//! use pgops_query::statement::StatementBuilder;
//!
//! let params = Params::from_iter([("ROLE", "reporting")]);
//! let statement = DropRoleStatement.build(&params).unwrap();
//! assert_eq!(statement.as_str(), "BEGIN; DROP ROLE reporting; END;");
//! ```

mod alter_role;
mod connection_limit;
mod create_role;
mod drop_role;
mod role_attributes;
mod role_hierarchy;

#[cfg(test)]
mod tests;

pub use alter_role::AlterRoleStatement;
pub use connection_limit::{
	CONNECTION_LIMIT_BUST_CEILING, CONNECTION_LIMIT_CEILING, ConnectionLimit,
	DEFAULT_CONNECTION_LIMIT,
};
pub use create_role::CreateRoleStatement;
pub use drop_role::DropRoleStatement;
pub use role_attributes::RoleAttribute;
pub use role_hierarchy::CreateRoleHierarchyStatement;

pub(crate) use connection_limit::parse_count;
