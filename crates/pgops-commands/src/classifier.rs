//! Output classifier
//!
//! Maps the text printed by the SQL client to rollback reasons. Rules are
//! data: each [`ClassifierRule`] pairs a [`ReasonCode`] with a [`LineMatcher`]
//! tested against every output line. A line may match several rules and a
//! reason is reported once no matter how many lines match it.
//!
//! ```
//! use pgops_commands::classifier::{ClassifierRule, RuleSet};
//! use pgops_commands::reason::ReasonCode;
//!
//! let rules = RuleSet::new(vec![
//! 	ClassifierRule::transaction_rollback(),
//! 	ClassifierRule::sql_error("psql:/tmp/"),
//! ]);
//! let classification = rules.classify("BEGIN\nROLLBACK\n");
//! assert_eq!(classification.reasons, vec![ReasonCode::TransactionRollback]);
//! ```

use crate::reason::ReasonCode;
use tracing::warn;

/// Predicate over a single output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatcher {
	/// Whole line equals the text
	Equals(String),
	/// Line contains every fragment
	ContainsAll(Vec<String>),
	/// Any inner matcher matches
	Any(Vec<LineMatcher>),
}

impl LineMatcher {
	pub fn equals(text: impl Into<String>) -> Self {
		LineMatcher::Equals(text.into())
	}

	pub fn contains(fragment: impl Into<String>) -> Self {
		LineMatcher::ContainsAll(vec![fragment.into()])
	}

	pub fn contains_all<I, S>(fragments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		LineMatcher::ContainsAll(fragments.into_iter().map(Into::into).collect())
	}

	pub fn matches(&self, line: &str) -> bool {
		match self {
			LineMatcher::Equals(text) => line == text,
			LineMatcher::ContainsAll(fragments) => fragments.iter().all(|f| line.contains(f.as_str())),
			LineMatcher::Any(matchers) => matchers.iter().any(|m| m.matches(line)),
		}
	}
}

/// One pattern and the reason it signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRule {
	pub reason: ReasonCode,
	pub matcher: LineMatcher,
}

impl ClassifierRule {
	pub fn new(reason: ReasonCode, matcher: LineMatcher) -> Self {
		Self { reason, matcher }
	}

	pub fn transaction_rollback() -> Self {
		Self::new(
			ReasonCode::TransactionRollback,
			LineMatcher::Any(vec![
				LineMatcher::equals("ROLLBACK"),
				LineMatcher::contains("transaction is aborted, commands ignored"),
			]),
		)
	}

	/// psql reports statement errors as `psql:<script path>:<line>: ERROR:  ...`.
	///
	/// `marker` is the script location prefix, e.g. `psql:/tmp/`.
	pub fn sql_error(marker: impl Into<String>) -> Self {
		Self::new(
			ReasonCode::SqlError,
			LineMatcher::contains_all([marker.into(), " ERROR:  ".to_string()]),
		)
	}

	pub fn role_does_not_exist() -> Self {
		Self::new(
			ReasonCode::RoleDoesNotExist,
			LineMatcher::contains_all(["ERROR:", " role ", "does not exist"]),
		)
	}

	pub fn role_already_exists() -> Self {
		Self::new(
			ReasonCode::RoleAlreadyExist,
			LineMatcher::contains_all(["ERROR:", " role ", "already exists"]),
		)
	}

	pub fn database_already_exists() -> Self {
		Self::new(
			ReasonCode::DatabaseAlreadyExist,
			LineMatcher::contains_all(["ERROR:", " database ", "already exists"]),
		)
	}

	pub fn fatal() -> Self {
		Self::new(ReasonCode::FatalError, LineMatcher::contains(" FATAL: "))
	}

	pub fn client_socket_terminated() -> Self {
		Self::new(
			ReasonCode::ClientSocketWasTerminated,
			LineMatcher::Any(vec![
				LineMatcher::contains_all([" FATAL:  ", "terminating connection due"]),
				LineMatcher::contains("connection unexpectedly"),
				LineMatcher::contains("terminated abnormally"),
				LineMatcher::contains_all(["connection to server", "lost"]),
			]),
		)
	}
}

/// Result of classifying one client output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
	/// Matched reasons in rule order, without duplicates
	pub reasons: Vec<ReasonCode>,
	/// Lines that matched at least one rule
	pub failure_lines: Vec<String>,
}

impl Classification {
	pub fn is_ok(&self) -> bool {
		self.reasons.is_empty()
	}
}

/// Ordered rules for one action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
	rules: Vec<ClassifierRule>,
}

impl RuleSet {
	pub fn new(rules: Vec<ClassifierRule>) -> Self {
		Self { rules }
	}

	pub fn rules(&self) -> &[ClassifierRule] {
		&self.rules
	}

	/// Reasons a rule set can report, in order
	pub fn reasons(&self) -> Vec<ReasonCode> {
		self.rules.iter().map(|r| r.reason).collect()
	}

	pub fn classify(&self, output: &str) -> Classification {
		let mut hits = vec![false; self.rules.len()];
		let mut failure_lines = Vec::new();

		for line in output.lines() {
			let mut matched = false;
			for (hit, rule) in hits.iter_mut().zip(&self.rules) {
				if rule.matcher.matches(line) {
					*hit = true;
					matched = true;
				}
			}
			if matched {
				warn!(line = %line, "client output signals failure");
				failure_lines.push(line.to_string());
			}
		}

		let mut reasons: Vec<ReasonCode> = Vec::new();
		for (hit, rule) in hits.iter().zip(&self.rules) {
			if *hit && !reasons.contains(&rule.reason) {
				reasons.push(rule.reason);
			}
		}

		Classification {
			reasons,
			failure_lines,
		}
	}
}
