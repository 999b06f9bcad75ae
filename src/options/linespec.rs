//! Parser for line-number lists such as `1,3-5,8-`.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{IncludeError, Result};

/// One comma separated item of a line list. A `None` end runs to the end of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineRange {
	start: usize,
	end: Option<usize>,
}

/// A parsed line list, e.g. the value of `lines` or `emphasize-lines`.
///
/// Accepted items are `N`, `N-M`, `-M` (from line 1) and `N-` (to the end of the file). Line
/// numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
	ranges: Vec<LineRange>,
	source: String,
}

impl LineSpec {
	/// Parse `spec`, reporting failures against `option`.
	pub fn parse(option: &str, spec: &str) -> Result<Self> {
		let mut ranges = Vec::new();
		for part in spec.split(',') {
			let part = part.trim();
			if part.is_empty() {
				return Err(IncludeError::invalid_value(option, spec, "empty item in line list"));
			}
			let range = match part.split_once('-') {
				None => {
					let line = parse_line(option, spec, part)?;
					LineRange {
						start: line,
						end: Some(line),
					}
				}
				Some((begin, end)) => {
					let (begin, end) = (begin.trim(), end.trim());
					if begin.is_empty() && end.is_empty() {
						return Err(IncludeError::invalid_value(option, spec, "bare `-` in line list"));
					}
					let start = if begin.is_empty() {
						1
					} else {
						parse_line(option, spec, begin)?
					};
					let end = if end.is_empty() {
						None
					} else {
						Some(parse_line(option, spec, end)?)
					};
					if let Some(end) = end
						&& start > end
					{
						return Err(IncludeError::invalid_value(
							option,
							spec,
							format!("inverted range {start}-{end}"),
						));
					}
					LineRange { start, end }
				}
			};
			ranges.push(range);
		}

		Ok(Self {
			ranges,
			source: spec.to_string(),
		})
	}

	/// Resolve against a file of `line_count` lines, rejecting any explicit bound past its end.
	pub fn resolve(&self, line_count: usize) -> Result<BTreeSet<usize>> {
		for range in &self.ranges {
			let furthest = range.end.unwrap_or(range.start);
			if furthest > line_count {
				return Err(IncludeError::LineOutOfRange {
					line: furthest,
					line_count,
				});
			}
		}
		Ok(self.expand(line_count))
	}

	/// Whether line `number` is named by the list. Open ends are unbounded.
	pub fn contains(&self, number: usize) -> bool {
		self.ranges
			.iter()
			.any(|range| number >= range.start && range.end.is_none_or(|end| number <= end))
	}

	/// Every line number named by the list; open ends stop at `open_end`. Explicit numbers past
	/// `open_end` are kept, so callers bound the list first.
	fn expand(&self, open_end: usize) -> BTreeSet<usize> {
		let mut lines = BTreeSet::new();
		for range in &self.ranges {
			let end = range.end.unwrap_or(open_end);
			lines.extend(range.start..=end);
		}
		lines
	}
}

impl fmt::Display for LineSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

fn parse_line(option: &str, spec: &str, text: &str) -> Result<usize> {
	match text.parse::<usize>() {
		Ok(0) => Err(IncludeError::invalid_value(option, spec, "line numbers start at 1")),
		Ok(line) => Ok(line),
		Err(_) => Err(IncludeError::invalid_value(
			option,
			spec,
			format!("`{text}` is not a line number"),
		)),
	}
}
