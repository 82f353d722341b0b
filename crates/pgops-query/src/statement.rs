//! Statement templates, bindings and the length guard
//!
//! Every action renders a fixed template whose `{name}` placeholders are
//! filled from [`Bindings`]. Rendering is a single left-to-right pass, so a
//! substituted value is never scanned for placeholders again.

use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};
use std::fmt;

/// Text written in place of secret bindings in [`Statement::redacted`]
pub const REDACTED: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
	name: &'static str,
	value: String,
	secret: bool,
}

/// Placeholder values for one template render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
	values: Vec<Binding>,
}

impl Bindings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind `name`, replacing any earlier value
	pub fn bind(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
		self.insert(name, value.into(), false)
	}

	/// Bind a value that must not appear in logs
	pub fn bind_secret(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
		self.insert(name, value.into(), true)
	}

	/// Evaluate `descriptor` and bind its output under `name`
	pub fn bind_param(
		&mut self,
		name: &'static str,
		descriptor: &ParamDescriptor,
		params: &Params,
	) -> Result<&mut Self, ValidationError> {
		let value = descriptor.evaluate(params)?;
		Ok(self.insert(name, value, descriptor.is_secret()))
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.values
			.iter()
			.find(|b| b.name == name)
			.map(|b| b.value.as_str())
	}

	fn insert(&mut self, name: &'static str, value: String, secret: bool) -> &mut Self {
		self.values.retain(|b| b.name != name);
		self.values.push(Binding {
			name,
			value,
			secret,
		});
		self
	}

	fn lookup(&self, name: &str) -> Option<&Binding> {
		self.values.iter().find(|b| b.name == name)
	}
}

/// A rendered SQL statement or script within its length bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
	sql: String,
	redacted: String,
}

impl Statement {
	/// Accept `sql` only if it is at most `max_length` bytes
	pub fn bounded(sql: impl Into<String>, max_length: usize) -> Result<Self, ValidationError> {
		let sql = sql.into();
		Self::check_length(&sql, max_length)?;
		Ok(Self {
			redacted: sql.clone(),
			sql,
		})
	}

	/// Render `template` with `bindings` and apply the length bound.
	///
	/// Unknown placeholders are left in place verbatim.
	pub fn render(
		template: &str,
		bindings: &Bindings,
		max_length: usize,
	) -> Result<Self, ValidationError> {
		let sql = substitute(template, bindings, false);
		Self::check_length(&sql, max_length)?;
		Ok(Self {
			redacted: substitute(template, bindings, true),
			sql,
		})
	}

	fn check_length(sql: &str, max_length: usize) -> Result<(), ValidationError> {
		if sql.len() > max_length {
			return Err(ValidationError::StatementTooLong {
				max_length,
				actual: sql.len(),
			});
		}
		Ok(())
	}

	pub fn as_str(&self) -> &str {
		&self.sql
	}

	/// The statement with secret bindings masked, for logging
	pub fn redacted(&self) -> &str {
		&self.redacted
	}

	pub fn len(&self) -> usize {
		self.sql.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sql.is_empty()
	}

	pub fn into_string(self) -> String {
		self.sql
	}
}

impl fmt::Display for Statement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.sql)
	}
}

impl AsRef<str> for Statement {
	fn as_ref(&self) -> &str {
		&self.sql
	}
}

fn substitute(template: &str, bindings: &Bindings, redact: bool) -> String {
	let mut out = String::with_capacity(template.len() * 2);
	let mut rest = template;
	while let Some(open) = rest.find('{') {
		out.push_str(&rest[..open]);
		let after = &rest[open + 1..];
		let close = after.find('}');
		let binding = close.and_then(|close| bindings.lookup(&after[..close]));
		match (close, binding) {
			(Some(close), Some(binding)) => {
				if redact && binding.secret {
					out.push_str(REDACTED);
				} else {
					out.push_str(&binding.value);
				}
				rest = &after[close + 1..];
			}
			_ => {
				out.push('{');
				rest = after;
			}
		}
	}
	out.push_str(rest);
	out
}

/// One action's statement shape.
///
/// Implementors declare their template, their parameters and how raw input
/// becomes [`Bindings`]; [`StatementBuilder::build`] does the rest.
pub trait StatementBuilder: Send + Sync {
	/// Template with `{name}` placeholders
	fn template(&self) -> &'static str;

	/// Maximum byte length of the rendered statement
	fn max_length(&self) -> usize;

	/// Parameters this action reads, in evaluation order
	fn parameters(&self) -> Vec<ParamDescriptor>;

	/// Validate `params` and produce placeholder values
	fn bind(&self, params: &Params) -> Result<Bindings, ValidationError>;

	fn build(&self, params: &Params) -> Result<Statement, ValidationError> {
		let bindings = self.bind(params)?;
		Statement::render(self.template(), &bindings, self.max_length())
	}
}

/// Builder for parameterless statements with fixed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStatement {
	sql: &'static str,
	max_length: usize,
}

impl FixedStatement {
	pub const fn new(sql: &'static str, max_length: usize) -> Self {
		Self { sql, max_length }
	}
}

impl StatementBuilder for FixedStatement {
	fn template(&self) -> &'static str {
		self.sql
	}

	fn max_length(&self) -> usize {
		self.max_length
	}

	fn parameters(&self) -> Vec<ParamDescriptor> {
		Vec::new()
	}

	fn bind(&self, _params: &Params) -> Result<Bindings, ValidationError> {
		Ok(Bindings::new())
	}

	fn build(&self, _params: &Params) -> Result<Statement, ValidationError> {
		Statement::bounded(self.sql, self.max_length)
	}
}
