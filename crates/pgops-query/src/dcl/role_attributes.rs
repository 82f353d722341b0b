//! Boolean role attributes and their SQL keywords

use crate::param::{BoolCoercion, ParamDescriptor};
use crate::sanitize::Sanitizer;
use crate::NAMEDATA_LEN;

/// Role attribute toggled by a boolean parameter
///
/// # Examples
///
/// ```
/// use pgops_query::dcl::RoleAttribute;
///
/// assert_eq!(RoleAttribute::CreateDb.keyword(), "CREATEDB");
/// assert_eq!(RoleAttribute::CreateDb.negated(), "NOCREATEDB");
/// assert_eq!(RoleAttribute::Encrypted.negated(), "UNENCRYPTED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleAttribute {
	CreateUser,
	CreateRole,
	CreateDb,
	Inherit,
	Login,
	Encrypted,
}

impl RoleAttribute {
	/// Attributes shared by CREATE ROLE and ALTER ROLE, in template order
	pub const COMMON: [RoleAttribute; 5] = [
		RoleAttribute::CreateUser,
		RoleAttribute::CreateRole,
		RoleAttribute::CreateDb,
		RoleAttribute::Inherit,
		RoleAttribute::Login,
	];

	/// Input parameter name
	pub fn param(self) -> &'static str {
		self.keyword()
	}

	pub fn keyword(self) -> &'static str {
		match self {
			RoleAttribute::CreateUser => "CREATEUSER",
			RoleAttribute::CreateRole => "CREATEROLE",
			RoleAttribute::CreateDb => "CREATEDB",
			RoleAttribute::Inherit => "INHERIT",
			RoleAttribute::Login => "LOGIN",
			RoleAttribute::Encrypted => "ENCRYPTED",
		}
	}

	pub fn negated(self) -> &'static str {
		match self {
			RoleAttribute::CreateUser => "NOCREATEUSER",
			RoleAttribute::CreateRole => "NOCREATEROLE",
			RoleAttribute::CreateDb => "NOCREATEDB",
			RoleAttribute::Inherit => "NOINHERIT",
			RoleAttribute::Login => "NOLOGIN",
			RoleAttribute::Encrypted => "UNENCRYPTED",
		}
	}

	/// Template placeholder this attribute fills
	pub fn placeholder(self) -> &'static str {
		match self {
			RoleAttribute::CreateUser => "createuser",
			RoleAttribute::CreateRole => "createrole",
			RoleAttribute::CreateDb => "createdb",
			RoleAttribute::Inherit => "inherit",
			RoleAttribute::Login => "login",
			RoleAttribute::Encrypted => "encrypted",
		}
	}

	fn description(self) -> &'static str {
		match self {
			RoleAttribute::CreateUser => "Role may create users (superuser in modern PostgreSQL)",
			RoleAttribute::CreateRole => "Role may create other roles",
			RoleAttribute::CreateDb => "Role may create databases",
			RoleAttribute::Inherit => "Role inherits privileges of roles it is a member of",
			RoleAttribute::Login => "Role may log in",
			RoleAttribute::Encrypted => "Store the password encrypted (default)",
		}
	}

	/// Fragment emitted when the parameter is neither true nor false.
	///
	/// Passwords stay encrypted unless explicitly disabled; every other
	/// attribute falls back to its negative form.
	pub fn ambiguous(self) -> &'static str {
		match self {
			RoleAttribute::Encrypted => self.keyword(),
			_ => self.negated(),
		}
	}

	pub fn descriptor(self) -> ParamDescriptor {
		ParamDescriptor::new(self.param())
			.describe(self.description())
			.max_length(NAMEDATA_LEN)
			.sanitizer(Sanitizer::SqlEscape)
			.bool_coercion(BoolCoercion::new(
				format!(" {} ", self.keyword()),
				format!(" {} ", self.negated()),
				format!(" {} ", self.ambiguous()),
			))
	}
}
