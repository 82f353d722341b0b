//! Connection-limit fragment shared by CREATE ROLE and ALTER ROLE

use crate::error::ValidationError;
use crate::param::{ParamDescriptor, Params};

/// Limit applied when `CONNECTION_LIMIT` is absent
pub const DEFAULT_CONNECTION_LIMIT: &str = "10";

/// Highest accepted limit without `CONNECTION_LIMIT_BUST`
pub const CONNECTION_LIMIT_CEILING: u32 = 25;

/// Highest accepted limit with `CONNECTION_LIMIT_BUST` present
pub const CONNECTION_LIMIT_BUST_CEILING: u32 = 150;

const LIMIT_PARAM: &str = "CONNECTION_LIMIT";
const BUST_PARAM: &str = "CONNECTION_LIMIT_BUST";

/// Parse an unsigned decimal count, rejecting signs and whitespace
pub(crate) fn parse_count(name: &str, raw: &str) -> Result<u32, ValidationError> {
	let invalid = || ValidationError::InvalidNumber {
		name: name.to_string(),
	};
	if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid());
	}
	raw.parse::<u32>().map_err(|_| invalid())
}

/// Resolves ` CONNECTION LIMIT n ` from `CONNECTION_LIMIT` and `CONNECTION_LIMIT_BUST`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionLimit;

impl ConnectionLimit {
	pub fn descriptors() -> [ParamDescriptor; 2] {
		[Self::limit(), Self::bust()]
	}

	fn limit() -> ParamDescriptor {
		ParamDescriptor::new(LIMIT_PARAM)
			.describe("Maximum concurrent connections for the role (default 10, ceiling 25)")
			.max_length(3)
			.default_value(DEFAULT_CONNECTION_LIMIT)
	}

	fn bust() -> ParamDescriptor {
		ParamDescriptor::new(BUST_PARAM)
			.describe("Any value raises the connection-limit ceiling to 150")
			.presence(
				CONNECTION_LIMIT_BUST_CEILING.to_string(),
				CONNECTION_LIMIT_CEILING.to_string(),
			)
	}

	/// Ceiling in effect for `params`, as resolved by the bust descriptor
	pub fn ceiling(params: &Params) -> Result<u32, ValidationError> {
		parse_count(BUST_PARAM, &Self::bust().evaluate(params)?)
	}

	/// Validated limit, verbatim as supplied
	pub fn value(params: &Params) -> Result<String, ValidationError> {
		let value = Self::limit().evaluate(params)?;
		let ceiling = Self::ceiling(params)?;
		if parse_count(LIMIT_PARAM, &value)? > ceiling {
			return Err(ValidationError::ConnectionLimitExceeded { ceiling });
		}
		Ok(value)
	}

	/// Template fragment for `params`
	pub fn fragment(params: &Params) -> Result<String, ValidationError> {
		Ok(format!(" CONNECTION LIMIT {} ", Self::value(params)?))
	}
}
