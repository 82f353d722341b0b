//! Replication lag extraction
//!
//! psql prints an interval column as ` HH:MM:SS.ffffff`, with a leading `-`
//! when the standby clock is ahead of the last replayed transaction.

use regex::Regex;
use std::sync::LazyLock;

/// Value reported for both lag fields when no interval was found
pub const LAG_SENTINEL: &str = "-NaN";

static INTERVAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^ ([- ]?)(\d{2}):(\d{2}):(\d{2})\.(\d+)$").expect("static pattern is valid")
});

/// Replication lag parsed from an interval line
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationLag {
	/// The interval as printed, leading blanks removed
	pub delay: String,
	/// Signed total in seconds
	pub seconds: f64,
}

impl ReplicationLag {
	/// Parse one line of client output
	///
	/// ```
	/// use pgops_commands::lag::ReplicationLag;
	///
	/// let lag = ReplicationLag::parse_line(" 00:01:05.250000").unwrap();
	/// assert_eq!(lag.delay, "00:01:05.250000");
	/// assert_eq!(lag.seconds, 65.25);
	/// ```
	pub fn parse_line(line: &str) -> Option<Self> {
		let caps = INTERVAL_LINE.captures(line)?;
		let hours: f64 = caps[2].parse().ok()?;
		let minutes: f64 = caps[3].parse().ok()?;
		let whole: f64 = caps[4].parse().ok()?;
		let fraction: f64 = format!("0.{}", &caps[5]).parse().ok()?;
		let magnitude = hours * 3600.0 + minutes * 60.0 + whole + fraction;
		let seconds = if &caps[1] == "-" { -magnitude } else { magnitude };
		Some(Self {
			delay: line.trim_start().to_string(),
			seconds,
		})
	}

	/// The last interval line in `output`, if any
	pub fn extract(output: &str) -> Option<Self> {
		output.lines().filter_map(Self::parse_line).last()
	}

	/// Seconds formatted with at least one decimal place
	pub fn seconds_display(&self) -> String {
		if self.seconds.fract() == 0.0 {
			format!("{:.1}", self.seconds)
		} else {
			format!("{}", self.seconds)
		}
	}
}
