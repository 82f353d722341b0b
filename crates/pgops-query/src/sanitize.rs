//! String sanitizers applied to untrusted parameter values
//!
//! Statements are assembled by template substitution rather than bind
//! parameters, so every free-text value that reaches a statement goes through
//! one of these functions first.
//!
//! # Examples
//!
//! ```
//! use pgops_query::sanitize::{alphanumeric_only, escape_sql};
//!
//! assert_eq!(escape_sql("o'neil"), "o\\'neil");
//! assert_eq!(alphanumeric_only("app-01; --"), "app01");
//! ```

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches runs of characters outside the ASCII word class `[0-9A-Za-z_]`.
static NON_WORD_RUN: LazyLock<regex::Regex> = LazyLock::new(|| {
	regex::Regex::new(r"[^0-9A-Za-z_]+").expect("static pattern is valid")
});

/// Sanitizer applied to a parameter value before it is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sanitizer {
	/// Return the value unchanged
	#[default]
	None,
	/// Apply [`escape_sql`]
	SqlEscape,
	/// Apply [`alphanumeric_only`]
	AlphanumericOnly,
}

impl Sanitizer {
	/// Apply this sanitizer to `value`
	pub fn apply(self, value: &str) -> String {
		match self {
			Sanitizer::None => value.to_string(),
			Sanitizer::SqlEscape => escape_sql(value),
			Sanitizer::AlphanumericOnly => alphanumeric_only(value),
		}
	}
}

/// Escape a string for interpolation into a semicolon-delimited SQL script.
///
/// The rules run in a fixed order and each one sees the output of the
/// previous one:
///
/// 1. `;` becomes `\;`
/// 2. `\` becomes `\\` (this includes the backslash inserted by rule 1, so a
///    lone `;` ends up as `\\;`)
/// 3. line feed becomes `\n`
/// 4. carriage return becomes `\r`
/// 5. `"` becomes `\"`
/// 6. `'` becomes `\'`
/// 7. NUL becomes the literal text `<NULL>`
///
/// The ordering of rules 1 and 2 is load-bearing for existing callers and
/// must not be swapped.
///
/// # Examples
///
/// ```
/// use pgops_query::sanitize::escape_sql;
///
/// assert_eq!(escape_sql("a;b"), "a\\\\;b");
/// assert_eq!(escape_sql("line\nbreak"), "line\\nbreak");
/// assert_eq!(escape_sql("nul\0byte"), "nul<NULL>byte");
/// ```
pub fn escape_sql(text: &str) -> String {
	text.replace(';', "\\;")
		.replace('\\', "\\\\")
		.replace('\n', "\\n")
		.replace('\r', "\\r")
		.replace('"', "\\\"")
		.replace('\'', "\\'")
		.replace('\0', "<NULL>")
}

/// Strip every character outside `[0-9A-Za-z_]`.
///
/// # Examples
///
/// ```
/// use pgops_query::sanitize::alphanumeric_only;
///
/// assert_eq!(alphanumeric_only("my_app.v2"), "my_appv2");
/// assert_eq!(alphanumeric_only("фу"), "");
/// ```
pub fn alphanumeric_only(text: &str) -> String {
	NON_WORD_RUN.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	/// Reverse of [`escape_sql`] for inputs without control characters.
	fn unescape_sql(escaped: &str) -> String {
		let mut out = String::with_capacity(escaped.len());
		let mut chars = escaped.chars();
		while let Some(ch) = chars.next() {
			if ch != '\\' {
				out.push(ch);
				continue;
			}
			match chars.next() {
				Some('\\') => out.push('\\'),
				Some('n') => out.push('\n'),
				Some('r') => out.push('\r'),
				Some('"') => out.push('"'),
				Some('\'') => out.push('\''),
				Some(other) => {
					out.push('\\');
					out.push(other);
				}
				None => out.push('\\'),
			}
		}
		out.replace("\\;", ";")
	}

	#[rstest]
	#[case("plain", "plain")]
	#[case("", "")]
	#[case("a;b", "a\\\\;b")]
	#[case("back\\slash", "back\\\\slash")]
	#[case("\\;", "\\\\\\\\;")]
	#[case("line\nfeed", "line\\nfeed")]
	#[case("carriage\rreturn", "carriage\\rreturn")]
	#[case("say \"hi\"", "say \\\"hi\\\"")]
	#[case("o'neil", "o\\'neil")]
	#[case("nul\0byte", "nul<NULL>byte")]
	#[case("фу\\бар", "фу\\\\бар")]
	fn test_escape_sql(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(escape_sql(input), expected);
	}

	#[rstest]
	fn test_escape_sql_statement_terminator_injection() {
		// Arrange
		let input = "x; DROP DATABASE postgres";

		// Act
		let escaped = escape_sql(input);

		// Assert
		assert_eq!(escaped, "x\\\\; DROP DATABASE postgres");
		assert!(!escaped.contains("x;"));
	}

	#[rstest]
	fn test_escape_sql_quote_escape_is_not_doubled() {
		// Backslashes introduced by the quote rules run after the backslash rule
		assert_eq!(escape_sql("'\""), "\\'\\\"");
	}

	#[rstest]
	#[case("abc_123", "abc_123")]
	#[case("a b\tc", "abc")]
	#[case("drop;table--", "droptable")]
	#[case("jon\0kelley", "jonkelley")]
	#[case("张明安", "")]
	#[case("", "")]
	fn test_alphanumeric_only(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(alphanumeric_only(input), expected);
	}

	#[rstest]
	#[case(Sanitizer::None, "a;b", "a;b")]
	#[case(Sanitizer::SqlEscape, "a;b", "a\\\\;b")]
	#[case(Sanitizer::AlphanumericOnly, "a;b", "ab")]
	fn test_sanitizer_apply(#[case] sanitizer: Sanitizer, #[case] input: &str, #[case] expected: &str) {
		assert_eq!(sanitizer.apply(input), expected);
	}

	proptest! {
		#[test]
		fn prop_escape_sql_round_trips_without_control_chars(input in "[^\\p{Cc}]*") {
			prop_assert_eq!(unescape_sql(&escape_sql(&input)), input);
		}

		#[test]
		fn prop_escape_sql_never_emits_nul(input in any::<String>()) {
			prop_assert!(!escape_sql(&input).contains('\0'));
		}

		#[test]
		fn prop_alphanumeric_only_output_is_word_chars(input in any::<String>()) {
			let out = alphanumeric_only(&input);
			prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
		}
	}
}
