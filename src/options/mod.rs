//! Directive options accepted by the include pipeline.
//!
//! Hosts hand over options as loose `name -> value` pairs (or a JSON object). Those are checked
//! against an explicit allow-list here, so an option from the wider literal-include family that
//! this crate does not implement fails loudly instead of being ignored.

/// Line-number list parsing shared by `lines` and `emphasize-lines`.
pub mod linespec;

use std::collections::HashSet;

use serde_json::Value;

pub use self::linespec::LineSpec;
use crate::error::{IncludeError, Result};

/// Options of the generic literal-include facility that are deliberately not implemented.
const UNSUPPORTED_OPTIONS: &[&str] = &[
	"pyobject", "encoding", "prepend", "append", "dedent", "diff", "force", "class", "name",
];

/// Which lines of the source file to extract. At most one strategy applies per inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionSpec {
	/// The whole file.
	#[default]
	Whole,
	/// Explicit 1-based inclusive bounds. A missing end means end of file.
	Lines {
		/// First line to include, defaults to 1.
		start_line: Option<usize>,
		/// Last line to include, defaults to the last line of the file.
		end_line: Option<usize>,
	},
	/// Substring markers; the matching lines themselves are excluded.
	Markers {
		/// Start after the first line containing this text.
		start_after: Option<String>,
		/// Stop before the first line containing this text.
		end_before: Option<String>,
	},
	/// A region delimited by `[START name]` / `[END name]` style marker comments.
	Block {
		/// Block name carried by the marker comments.
		name: String,
	},
	/// A line list such as `1-3,7`.
	LineSpec(LineSpec),
}

/// Options that affect how the extracted lines are presented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattingOptions {
	/// Lines to highlight, in original file numbering.
	pub emphasize_lines: Option<LineSpec>,
	/// Show line numbers.
	pub linenos: bool,
	/// Number of the first displayed line.
	pub lineno_start: Option<usize>,
	/// Number displayed lines with their line numbers in the source file.
	pub lineno_match: bool,
	/// Highlighting language; also picks the docstring convention.
	pub language: Option<String>,
	/// Caption passed through to the host.
	pub caption: Option<String>,
}

/// Complete option bundle for one inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeOptions {
	/// Line selection strategy.
	pub selection: SelectionSpec,
	/// Presentation options.
	pub formatting: FormattingOptions,
	/// Expand tabs to this width while reading the file.
	pub tab_width: Option<usize>,
}

/// Mutually exclusive selection groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
	Lines,
	Markers,
	Block,
	LineSpec,
}

/// Map a supplied option name to its canonical spelling.
fn canonical_name(name: &str) -> String {
	let name = name.trim().to_ascii_lowercase().replace('_', "-");
	match name.as_str() {
		"block-name" => "block".to_string(),
		_ => name,
	}
}

fn group_of(name: &str) -> Option<Group> {
	match name {
		"start-line" | "end-line" => Some(Group::Lines),
		"start-after" | "end-before" => Some(Group::Markers),
		"block" => Some(Group::Block),
		"lines" => Some(Group::LineSpec),
		_ => None,
	}
}

impl IncludeOptions {
	/// Build options from directive `name -> value` pairs, in the order the host supplied them.
	///
	/// Flags (`linenos`, `lineno-match`) take an empty value.
	pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut options = Self::default();
		let mut seen = HashSet::new();
		let mut claimed: Option<(Group, String)> = None;

		let mut start_line = None;
		let mut end_line = None;
		let mut start_after = None;
		let mut end_before = None;

		for (name, value) in pairs {
			let name = canonical_name(name.as_ref());
			let value = value.as_ref();

			if UNSUPPORTED_OPTIONS.contains(&name.as_str()) {
				return Err(IncludeError::UnsupportedOption { option: name });
			}
			if !seen.insert(name.clone()) {
				return Err(IncludeError::DuplicateOption { option: name });
			}

			if let Some(group) = group_of(&name) {
				if let Some((owner, first)) = &claimed
					&& *owner != group
				{
					return Err(IncludeError::ConflictingOptions {
						first: first.clone(),
						second: name,
					});
				}
				if claimed.is_none() {
					claimed = Some((group, name.clone()));
				}
			}

			match name.as_str() {
				"start-line" => start_line = Some(parse_positive(&name, value)?),
				"end-line" => end_line = Some(parse_positive(&name, value)?),
				"start-after" => start_after = Some(parse_text(&name, value)?),
				"end-before" => end_before = Some(parse_text(&name, value)?),
				"block" => {
					options.selection = SelectionSpec::Block {
						name: parse_text(&name, value)?.trim().to_string(),
					}
				}
				"lines" => options.selection = SelectionSpec::LineSpec(LineSpec::parse(&name, value)?),
				"emphasize-lines" => {
					options.formatting.emphasize_lines = Some(LineSpec::parse(&name, value)?)
				}
				"linenos" => options.formatting.linenos = parse_flag(&name, value)?,
				"lineno-start" => options.formatting.lineno_start = Some(parse_positive(&name, value)?),
				"lineno-match" => options.formatting.lineno_match = parse_flag(&name, value)?,
				"tab-width" => options.tab_width = Some(parse_positive(&name, value)?),
				"language" => options.formatting.language = Some(parse_text(&name, value)?.trim().to_string()),
				"caption" => options.formatting.caption = Some(value.to_string()),
				_ => return Err(IncludeError::UnknownOption { option: name }),
			}
		}

		match claimed.map(|(group, _)| group) {
			Some(Group::Lines) => {
				options.selection = SelectionSpec::Lines {
					start_line,
					end_line,
				}
			}
			Some(Group::Markers) => {
				options.selection = SelectionSpec::Markers {
					start_after,
					end_before,
				}
			}
			_ => {}
		}

		options.validate()?;
		Ok(options)
	}

	/// Build options from a JSON object such as `{"start-after": "# BEGIN", "linenos": true}`.
	///
	/// Numbers and strings are taken as option values; `true`, `null` and `""` set a flag, and
	/// `false` leaves the option out.
	pub fn from_json(value: &Value) -> Result<Self> {
		let Value::Object(map) = value else {
			return Err(IncludeError::invalid_value(
				"options",
				&value.to_string(),
				"expected a JSON object",
			));
		};

		let mut pairs = Vec::with_capacity(map.len());
		for (name, value) in map {
			let value = match value {
				Value::Bool(false) => continue,
				Value::Bool(true) | Value::Null => String::new(),
				Value::String(text) => text.clone(),
				Value::Number(number) => number.to_string(),
				other => {
					return Err(IncludeError::invalid_value(
						&canonical_name(name),
						&other.to_string(),
						"expected a string, number or flag",
					));
				}
			};
			pairs.push((name.clone(), value));
		}
		Self::from_pairs(pairs)
	}

	/// Replaces the line selection strategy.
	pub fn with_selection(mut self, selection: SelectionSpec) -> Self {
		self.selection = selection;
		self
	}

	/// Sets the lines to emphasise, in original file numbering.
	pub fn with_emphasize_lines(mut self, lines: LineSpec) -> Self {
		self.formatting.emphasize_lines = Some(lines);
		self
	}

	/// Sets the highlighting language, which also selects the docstring convention.
	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.formatting.language = Some(language.into());
		self
	}

	/// Enables or disables source-matching line numbers.
	pub fn with_lineno_match(mut self, enabled: bool) -> Self {
		self.formatting.lineno_match = enabled;
		self
	}

	/// Sets the tab expansion width used when reading files.
	pub fn with_tab_width(mut self, width: usize) -> Self {
		self.tab_width = Some(width);
		self
	}

	/// Check cross-option constraints that typed construction cannot rule out.
	pub fn validate(&self) -> Result<()> {
		if self.formatting.lineno_match && self.formatting.lineno_start.is_some() {
			return Err(IncludeError::ConflictingOptions {
				first: "lineno-match".to_string(),
				second: "lineno-start".to_string(),
			});
		}
		if self.tab_width == Some(0) {
			return Err(IncludeError::invalid_value("tab-width", "0", "must be at least 1"));
		}
		Ok(())
	}
}

fn parse_positive(option: &str, value: &str) -> Result<usize> {
	match value.trim().parse::<usize>() {
		Ok(0) => Err(IncludeError::invalid_value(option, value, "must be at least 1")),
		Ok(number) => Ok(number),
		Err(_) => Err(IncludeError::invalid_value(option, value, "expected a positive integer")),
	}
}

fn parse_text(option: &str, value: &str) -> Result<String> {
	if value.trim().is_empty() {
		return Err(IncludeError::invalid_value(option, value, "a value is required"));
	}
	Ok(value.to_string())
}

fn parse_flag(option: &str, value: &str) -> Result<bool> {
	if value.trim().is_empty() {
		Ok(true)
	} else {
		Err(IncludeError::invalid_value(option, value, "flag options take no value"))
	}
}
