//! CREATE ROLE statement builder

use super::connection_limit::ConnectionLimit;
use super::role_attributes::RoleAttribute;
use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use crate::sanitize::Sanitizer;
use crate::statement::{Bindings, StatementBuilder};
use crate::NAMEDATA_LEN;

const TEMPLATE: &str = "BEGIN; CREATE ROLE {role} WITH {connection_limit}{createuser}{createrole}{createdb}{inherit}{login}{encrypted} PASSWORD '{password}' {in_role}{in_group}; END;";

pub(crate) fn role() -> ParamDescriptor {
	ParamDescriptor::new("ROLE")
		.describe("Name of the role")
		.required()
		.max_length(NAMEDATA_LEN)
		.sanitizer(Sanitizer::SqlEscape)
}

pub(crate) fn in_role() -> ParamDescriptor {
	ParamDescriptor::new("ROLENAME")
		.describe("Existing role the new role becomes a member of")
		.max_length(NAMEDATA_LEN)
		.sanitizer(Sanitizer::SqlEscape)
		.presence(" IN ROLE {value} ", "")
}

pub(crate) fn in_group() -> ParamDescriptor {
	ParamDescriptor::new("GROUPNAME")
		.describe("Existing group the new role becomes a member of")
		.max_length(NAMEDATA_LEN)
		.sanitizer(Sanitizer::SqlEscape)
		.presence(" IN GROUP {value} ", "")
}

/// Bind the connection limit, the shared toggles and membership clauses
pub(crate) fn bind_role_options(bindings: &mut Bindings, params: &Params) -> Result<(), ValidationError> {
	bindings.bind("connection_limit", ConnectionLimit::fragment(params)?);
	for attribute in RoleAttribute::COMMON {
		bindings.bind_param(attribute.placeholder(), &attribute.descriptor(), params)?;
	}
	Ok(())
}

pub(crate) fn bind_membership(bindings: &mut Bindings, params: &Params) -> Result<(), ValidationError> {
	bindings.bind_param("in_role", &in_role(), params)?;
	bindings.bind_param("in_group", &in_group(), params)?;
	Ok(())
}

/// CREATE ROLE with password, connection limit and attribute toggles
///
/// Required parameters are `ROLE` and `PASSWORD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRoleStatement;

impl CreateRoleStatement {
	fn password() -> ParamDescriptor {
		ParamDescriptor::new("PASSWORD")
			.describe("Password for the role")
			.required()
			.max_length(NAMEDATA_LEN)
			.sanitizer(Sanitizer::SqlEscape)
			.secret()
	}
}

impl StatementBuilder for CreateRoleStatement {
	fn template(&self) -> &'static str {
		TEMPLATE
	}

	fn max_length(&self) -> usize {
		2000
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		let mut parameters = vec![role(), Self::password()];
		parameters.extend(ConnectionLimit::descriptors());
		parameters.extend(RoleAttribute::COMMON.map(RoleAttribute::descriptor));
		parameters.push(RoleAttribute::Encrypted.descriptor());
		parameters.push(in_role());
		parameters.push(in_group());
		parameters
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let mut bindings = Bindings::new();
		bindings.bind_param("role", &role(), params)?;
		bindings.bind_param("password", &Self::password(), params)?;
		bind_role_options(&mut bindings, params)?;
		bindings.bind_param(
			RoleAttribute::Encrypted.placeholder(),
			&RoleAttribute::Encrypted.descriptor(),
			params,
		)?;
		bind_membership(&mut bindings, params)?;
		Ok(bindings)
	}
}
