//! CREATE DATABASE statement builder

use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use crate::sanitize::Sanitizer;
use crate::statement::{Bindings, StatementBuilder};
use crate::NAMEDATA_LEN;

/// CREATE DATABASE statement builder
///
/// # Examples
///
/// ```
/// use pgops_query::param::Params;
/// use pgops_query::query::CreateDatabaseStatement;
/// use pgops_query::statement::StatementBuilder;
///
/// let params = Params::from_iter([("DATABASE", "inventory")]);
/// let statement = CreateDatabaseStatement.build(&params).unwrap();
/// assert_eq!(statement.as_str(), "CREATE DATABASE inventory;");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateDatabaseStatement;

impl CreateDatabaseStatement {
	fn database() -> ParamDescriptor {
		ParamDescriptor::new("DATABASE")
			.describe("Name of the database")
			.required()
			.max_length(NAMEDATA_LEN)
			.sanitizer(Sanitizer::SqlEscape)
	}
}

impl StatementBuilder for CreateDatabaseStatement {
	fn template(&self) -> &'static str {
		"CREATE DATABASE {database};"
	}

	fn max_length(&self) -> usize {
		2000
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		vec![Self::database()]
	}

	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError> {
		let mut bindings = Bindings::new();
		bindings.bind_param("database", &Self::database(), params)?;
		Ok(bindings)
	}
}
