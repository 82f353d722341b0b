//! Output formatting utilities
//!
//! stdout carries only what the gateway parses; everything for humans goes
//! to stderr.

use crate::action::ActionMetadata;
use colored::Colorize;
use std::io::{self, Write};

/// Print a diagnostic line to stderr
pub fn diagnostic(msg: &str) {
	eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning to stderr
pub fn warning(msg: &str) {
	eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
	for line in lines {
		writeln!(out, "{}", line)?;
	}
	out.flush()
}

/// Human-readable action listing
pub fn write_action_list<W: Write>(out: &mut W, actions: &[ActionMetadata]) -> io::Result<()> {
	for action in actions {
		writeln!(
			out,
			"{} [{}] {}",
			action.name.cyan().bold(),
			action.http_method.as_str(),
			action.description
		)?;
		for param in &action.parameters {
			let mut notes = Vec::new();
			if param.is_required() {
				notes.push("required".to_string());
			}
			if let Some(max) = param.max_len() {
				notes.push(format!("max {}", max));
			}
			if let Some(default) = param.defaults_to() {
				notes.push(format!("default {}", default));
			}
			let notes = if notes.is_empty() {
				String::new()
			} else {
				format!(" ({})", notes.join(", "))
			};
			writeln!(
				out,
				"    {}{} - {}",
				param.name().green(),
				notes.dimmed(),
				param.description()
			)?;
		}
	}
	out.flush()
}

/// JSON action listing
pub fn write_action_json<W: Write>(out: &mut W, actions: &[ActionMetadata]) -> serde_json::Result<()> {
	serde_json::to_writer_pretty(&mut *out, actions)?;
	writeln!(out).map_err(serde_json::Error::io)?;
	Ok(())
}
