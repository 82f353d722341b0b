//! Named input parameters and the descriptors that validate them
//!
//! A [`Params`] map is the flat, upper-case keyed view of the gateway input.
//! A missing key and an empty value are the same thing: absent.
//!
//! A [`ParamDescriptor`] is an immutable description of how one parameter is
//! validated and transformed. Evaluation is pure; the same descriptor applied
//! to the same [`Params`] always produces the same result.
//!
//! # Examples
//!
//! ```
//! use pgops_query::param::{ParamDescriptor, Params};
//! use pgops_query::sanitize::Sanitizer;
//!
//! let params = Params::from_iter([("role", "app;user")]);
//! let role = ParamDescriptor::new("ROLE")
//! 	.required()
//! 	.max_length(64)
//! 	.sanitizer(Sanitizer::SqlEscape);
//!
//! assert_eq!(role.evaluate(&params).unwrap(), "app\\\\;user");
//! ```

use crate::error::ValidationError;
use crate::sanitize::Sanitizer;
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder replaced by the sanitized value in [`Presence::when_present`]
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Flat parameter map keyed by upper-case name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	values: BTreeMap<String, String>,
}

impl Params {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set `key` (upper-cased) to `value`, replacing any earlier value
	pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
		self.values
			.insert(key.as_ref().to_ascii_uppercase(), value.into());
	}

	/// Raw value for `key`, or `""` when absent
	pub fn get(&self, key: &str) -> &str {
		self.values
			.get(&key.to_ascii_uppercase())
			.map(String::as_str)
			.unwrap_or("")
	}

	/// Whether `key` holds a non-empty value
	pub fn is_present(&self, key: &str) -> bool {
		!self.get(key).is_empty()
	}

	/// Merge `other` into `self`; values in `other` win
	pub fn extend(&mut self, other: Params) {
		self.values.extend(other.values);
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Params {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Params::new();
		for (key, value) in iter {
			params.insert(key, value);
		}
		params
	}
}

/// Result of the boolean heuristic applied to a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tristate {
	True,
	False,
	/// Present, but not recognizably true or false
	Ambiguous,
	/// Absent
	Unset,
}

impl Tristate {
	/// Classify `raw`, folding ASCII case only.
	///
	/// `t*`, `y*` and `1` are true; `f*`, `n*` and `0` are false.
	///
	/// ```
	/// use pgops_query::param::Tristate;
	///
	/// assert_eq!(Tristate::classify("Yes"), Tristate::True);
	/// assert_eq!(Tristate::classify("0"), Tristate::False);
	/// assert_eq!(Tristate::classify("maybe"), Tristate::Ambiguous);
	/// assert_eq!(Tristate::classify(""), Tristate::Unset);
	/// ```
	pub fn classify(raw: &str) -> Self {
		if raw.is_empty() {
			return Tristate::Unset;
		}
		let lowered = raw.to_ascii_lowercase();
		if lowered.starts_with('t') || lowered == "1" || lowered.starts_with('y') {
			Tristate::True
		} else if lowered.starts_with('f') || lowered == "0" || lowered.starts_with('n') {
			Tristate::False
		} else {
			Tristate::Ambiguous
		}
	}
}

/// Output values selected by [`Tristate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolCoercion {
	pub if_true: String,
	pub if_false: String,
	/// Used for both [`Tristate::Ambiguous`] and [`Tristate::Unset`]
	pub if_ambiguous: String,
}

impl BoolCoercion {
	pub fn new(
		if_true: impl Into<String>,
		if_false: impl Into<String>,
		if_ambiguous: impl Into<String>,
	) -> Self {
		Self {
			if_true: if_true.into(),
			if_false: if_false.into(),
			if_ambiguous: if_ambiguous.into(),
		}
	}

	pub fn select(&self, state: Tristate) -> &str {
		match state {
			Tristate::True => &self.if_true,
			Tristate::False => &self.if_false,
			Tristate::Ambiguous | Tristate::Unset => &self.if_ambiguous,
		}
	}
}

/// Substitution chosen by whether the parameter is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
	/// Emitted when present; [`VALUE_PLACEHOLDER`] is replaced by the sanitized value
	pub when_present: String,
	pub when_absent: String,
}

/// Immutable validation rules for one named parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
	name: &'static str,
	description: &'static str,
	required: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	max_length: Option<usize>,
	#[serde(rename = "default", skip_serializing_if = "Option::is_none")]
	default_value: Option<String>,
	#[serde(skip)]
	sanitizer: Sanitizer,
	#[serde(skip)]
	bool_coercion: Option<BoolCoercion>,
	#[serde(skip)]
	presence: Option<Presence>,
	#[serde(skip)]
	secret: bool,
}

impl ParamDescriptor {
	pub fn new(name: &'static str) -> Self {
		Self {
			name,
			description: "",
			required: false,
			max_length: None,
			default_value: None,
			sanitizer: Sanitizer::None,
			bool_coercion: None,
			presence: None,
			secret: false,
		}
	}

	pub fn describe(mut self, description: &'static str) -> Self {
		self.description = description;
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Inclusive byte-length bound on the raw value
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn default_value(mut self, value: impl Into<String>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn sanitizer(mut self, sanitizer: Sanitizer) -> Self {
		self.sanitizer = sanitizer;
		self
	}

	pub fn bool_coercion(mut self, coercion: BoolCoercion) -> Self {
		self.bool_coercion = Some(coercion);
		self
	}

	pub fn presence(mut self, when_present: impl Into<String>, when_absent: impl Into<String>) -> Self {
		self.presence = Some(Presence {
			when_present: when_present.into(),
			when_absent: when_absent.into(),
		});
		self
	}

	/// Mark the value as sensitive so it is redacted from logged statements
	pub fn secret(mut self) -> Self {
		self.secret = true;
		self
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn description(&self) -> &'static str {
		self.description
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn is_secret(&self) -> bool {
		self.secret
	}

	pub fn max_len(&self) -> Option<usize> {
		self.max_length
	}

	pub fn defaults_to(&self) -> Option<&str> {
		self.default_value.as_deref()
	}

	/// Validate and transform this parameter's value.
	///
	/// Steps run in order: required check, length bound, default, boolean
	/// coercion, presence substitution, sanitizer. A default or a boolean
	/// coercion short-circuits everything after it.
	pub fn evaluate(&self, params: &Params) -> Result<String, ValidationError> {
		let raw = params.get(self.name);
		let absent = raw.is_empty();

		if absent && self.required {
			return Err(ValidationError::MissingRequiredParameter {
				name: self.name.to_string(),
			});
		}

		if let Some(max_length) = self.max_length
			&& raw.len() > max_length
		{
			return Err(ValidationError::ParameterTooLong {
				name: self.name.to_string(),
				max_length,
			});
		}

		if absent && let Some(default) = &self.default_value {
			return Ok(default.clone());
		}

		if let Some(coercion) = &self.bool_coercion {
			return Ok(coercion.select(Tristate::classify(raw)).to_string());
		}

		if let Some(presence) = &self.presence {
			if absent {
				return Ok(presence.when_absent.clone());
			}
			let value = self.sanitizer.apply(raw);
			return Ok(presence.when_present.replace(VALUE_PLACEHOLDER, &value));
		}

		Ok(self.sanitizer.apply(raw))
	}
}
