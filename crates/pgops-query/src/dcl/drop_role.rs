//! DROP ROLE statement builder

use super::create_role::role;
use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use crate::statement::{Bindings, StatementBuilder};

/// DROP ROLE statement builder
#[derive(Debug, Clone, Copy, Default)]
pub struct DropRoleStatement;

impl StatementBuilder for DropRoleStatement {
	fn template(&self) -> &'static str {
		"BEGIN; DROP ROLE {role}; END;"
	}

	fn max_length(&self) -> usize {
		2000
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		vec![role()]
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let mut bindings = Bindings::new();
		bindings.bind_param("role", &role(), params)?;
		Ok(bindings)
	}
}
