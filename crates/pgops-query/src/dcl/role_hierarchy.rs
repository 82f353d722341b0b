//! Application role and database hierarchy
//!
//! One script creates, for an application `app`:
//!
//! - `app_super_role`, a NOLOGIN owner role
//! - database `app`, owned by `app_super_role`
//! - `app_super_svc`, a service account in `app_super_role`
//! - `app_role`, a NOLOGIN application role
//! - `app_svc`, a service account in `app_role`

use super::connection_limit::parse_count;
use crate::error::ValidationError;
use crate::param::{BoolCoercion, ParamDescriptor, Params};
use crate::sanitize::Sanitizer;
use crate::statement::{Bindings, StatementBuilder};
use crate::NAMEDATA_LEN;

const TEMPLATE: &str = "\\echo on
BEGIN;
/* Make super role */
CREATE ROLE {application}_super_role NOLOGIN;
COMMIT;

/* Make database (owned by) super role */
CREATE DATABASE {application} OWNER {application}_super_role;

BEGIN;
/* Make SUPER service account */
CREATE ROLE {application}_super_svc
  {super_login} INHERIT CONNECTION LIMIT {super_maxsock} PASSWORD '{super_password}'
    IN ROLE {application}_super_role;

/* Make ROLE for application */
CREATE ROLE {application}_role NOLOGIN;

/* Make ROLE for application service account */
CREATE ROLE {application}_svc
  {svc_login} INHERIT CONNECTION LIMIT {svc_maxsock} PASSWORD '{svc_password}'
    IN ROLE {application}_role;
COMMIT;
";

fn name_param(name: &'static str, description: &'static str) -> ParamDescriptor {
	ParamDescriptor::new(name)
		.describe(description)
		.required()
		.max_length(NAMEDATA_LEN)
		.sanitizer(Sanitizer::SqlEscape)
}

/// LOGIN unless explicitly false
fn login_param(name: &'static str, description: &'static str) -> ParamDescriptor {
	ParamDescriptor::new(name)
		.describe(description)
		.max_length(NAMEDATA_LEN)
		.bool_coercion(BoolCoercion::new("LOGIN", "NOLOGIN", "LOGIN"))
}

fn maxsock_param(
	name: &'static str,
	default: &'static str,
	description: &'static str,
) -> ParamDescriptor {
	ParamDescriptor::new(name)
		.describe(description)
		.max_length(3)
		.default_value(default)
}

/// Creates an application's roles, service accounts and database in one script
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRoleHierarchyStatement;

impl CreateRoleHierarchyStatement {
	fn application() -> ParamDescriptor {
		name_param(
			"APPLICATION",
			"Application name; roles and accounts are named after it",
		)
	}

	fn super_password() -> ParamDescriptor {
		name_param("SUPER_PASSWORD", "Password of the super service account").secret()
	}

	fn svc_password() -> ParamDescriptor {
		name_param("SVC_PASSWORD", "Password of the service account").secret()
	}

	fn super_login() -> ParamDescriptor {
		login_param("SUPER_SVC_LOGIN", "Whether the super service account may log in")
	}

	fn svc_login() -> ParamDescriptor {
		login_param("SVC_LOGIN", "Whether the service account may log in")
	}

	fn super_maxsock() -> ParamDescriptor {
		maxsock_param(
			"SUPER_MAXSOCK",
			"3",
			"Connection limit of the super service account",
		)
	}

	fn svc_maxsock() -> ParamDescriptor {
		maxsock_param("SVC_MAXSOCK", "2", "Connection limit of the service account")
	}

	fn bind_count(
		bindings: &mut Bindings,
		placeholder: &'static str,
		descriptor: &ParamDescriptor,
		params: &Params,
	) -> Result<(), ValidationError> {
		let value = descriptor.evaluate(params)?;
		parse_count(descriptor.name(), &value)?;
		bindings.bind(placeholder, value);
		Ok(())
	}
}

impl StatementBuilder for CreateRoleHierarchyStatement {
	fn template(&self) -> &'static str {
		TEMPLATE
	}

	fn max_length(&self) -> usize {
		1500
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		vec![
			Self::application(),
			Self::super_password(),
			Self::svc_password(),
			Self::super_login(),
			Self::super_maxsock(),
			Self::svc_login(),
			Self::svc_maxsock(),
		]
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let mut bindings = Bindings::new();
		bindings.bind_param("application", &Self::application(), params)?;
		bindings.bind_param("super_password", &Self::super_password(), params)?;
		bindings.bind_param("svc_password", &Self::svc_password(), params)?;
		bindings.bind_param("super_login", &Self::super_login(), params)?;
		Self::bind_count(&mut bindings, "super_maxsock", &Self::super_maxsock(), params)?;
		bindings.bind_param("svc_login", &Self::svc_login(), params)?;
		Self::bind_count(&mut bindings, "svc_maxsock", &Self::svc_maxsock(), params)?;
		Ok(bindings)
	}
}
