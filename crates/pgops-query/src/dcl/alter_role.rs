//! ALTER ROLE statement builder

use super::connection_limit::ConnectionLimit;
use super::create_role::{bind_membership, bind_role_options, in_group, in_role, role};
use super::role_attributes::RoleAttribute;
use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use crate::statement::{Bindings, StatementBuilder};

const TEMPLATE: &str = "BEGIN; ALTER ROLE {role} WITH {connection_limit}{createuser}{createrole}{createdb}{inherit}{login} {in_role}{in_group}; END;";

/// ALTER ROLE with the CREATE ROLE toggles minus password handling
///
/// Every toggle is always emitted, so an absent toggle resets the attribute
/// to its negative form.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlterRoleStatement;

impl StatementBuilder for AlterRoleStatement {
	fn template(&self) -> &'static str {
		TEMPLATE
	}

	fn max_length(&self) -> usize {
		2000
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		let mut parameters = vec![role()];
		parameters.extend(ConnectionLimit::descriptors());
		parameters.extend(RoleAttribute::COMMON.map(RoleAttribute::descriptor));
		parameters.push(in_role());
		parameters.push(in_group());
		parameters
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let mut bindings = Bindings::new();
		bindings.bind_param("role", &role(), params)?;
		bind_role_options(&mut bindings, params)?;
		bind_membership(&mut bindings, params)?;
		Ok(bindings)
	}
}
