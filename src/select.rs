//! Range selection: turn a [`SelectionSpec`] into the concrete lines to extract.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::{IncludeError, Result};
use crate::options::SelectionSpec;
use crate::source::SourceDocument;

/// Opening marker of a named block: `[START name]` or `ANCHOR: name`.
static BLOCK_START: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?:\[START\s+(?P<bracket>[\w.:-]+)\s*\]|\bANCHOR:\s*(?P<anchor>[\w.:-]+))")
		.expect("valid block start regex")
});

/// Closing marker of a named block: `[END name]` or `ANCHOR_END: name`.
static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?:\[END\s+(?P<bracket>[\w.:-]+)\s*\]|\bANCHOR_END:\s*(?P<anchor>[\w.:-]+))")
		.expect("valid block end regex")
});

/// One extracted line together with its number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
	/// 1-based line number in the original document.
	pub number: usize,
	/// Line text without its terminator.
	pub text: String,
}

/// Lines pulled out of a [`SourceDocument`], in file order.
///
/// Equality compares the lines only; whether the front was already examined for a docstring is
/// bookkeeping for [`crate::docstring::strip`].
#[derive(Debug, Clone)]
pub struct ExtractedBlock {
	lines: Vec<SourceLine>,
	front_checked: bool,
}

impl ExtractedBlock {
	/// Build a block from already numbered lines.
	pub fn new(lines: Vec<SourceLine>) -> Self {
		Self {
			lines,
			front_checked: false,
		}
	}

	/// The extracted lines.
	pub fn lines(&self) -> &[SourceLine] {
		&self.lines
	}

	/// Line texts only.
	pub fn texts(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().map(|line| line.text.as_str())
	}

	/// Original number of the first line, if the block is not empty.
	pub fn first_line(&self) -> Option<usize> {
		self.lines.first().map(|line| line.number)
	}

	/// Number of lines in the block.
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Whether the block holds no lines.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Whether every line directly follows the previous one in the source file.
	pub fn is_contiguous(&self) -> bool {
		self.lines
			.windows(2)
			.all(|pair| pair[0].number + 1 == pair[1].number)
	}

	/// Whether the docstring stripper has already examined the front of this block.
	pub fn front_checked(&self) -> bool {
		self.front_checked
	}

	pub(crate) fn drop_front(mut self, count: usize) -> Self {
		self.lines.drain(..count.min(self.lines.len()));
		self.front_checked = true;
		self
	}

	pub(crate) fn mark_front_checked(mut self) -> Self {
		self.front_checked = true;
		self
	}
}

impl PartialEq for ExtractedBlock {
	fn eq(&self, other: &Self) -> bool {
		self.lines == other.lines
	}
}

impl Eq for ExtractedBlock {}

/// Extract the lines of `document` chosen by `spec`.
pub fn select(document: &SourceDocument, spec: &SelectionSpec) -> Result<ExtractedBlock> {
	let line_count = document.line_count();
	let (start, end) = match spec {
		SelectionSpec::Whole => {
			if line_count == 0 {
				return Err(IncludeError::empty("include file is empty"));
			}
			(1, line_count)
		}
		SelectionSpec::Lines {
			start_line,
			end_line,
		} => explicit_bounds(*start_line, *end_line, line_count)?,
		SelectionSpec::Markers {
			start_after,
			end_before,
		} => marker_bounds(document, start_after.as_deref(), end_before.as_deref())?,
		SelectionSpec::Block { name } => block_bounds(document, name)?,
		SelectionSpec::LineSpec(lines) => {
			let wanted = lines.resolve(line_count)?;
			if wanted.is_empty() {
				return Err(IncludeError::empty(format!("line spec `{lines}` selects nothing")));
			}
			trace!(lines = %lines, count = wanted.len(), "selected line list");
			let picked = document
				.numbered_lines()
				.filter(|(number, _)| wanted.contains(number))
				.map(to_source_line)
				.collect();
			return Ok(ExtractedBlock::new(picked));
		}
	};

	trace!(start, end, "selected line range");
	let picked = document
		.numbered_lines()
		.skip(start - 1)
		.take(end + 1 - start)
		.map(to_source_line)
		.collect();
	Ok(ExtractedBlock::new(picked))
}

fn to_source_line((number, text): (usize, &str)) -> SourceLine {
	SourceLine {
		number,
		text: text.to_string(),
	}
}

fn explicit_bounds(
	start_line: Option<usize>,
	end_line: Option<usize>,
	line_count: usize,
) -> Result<(usize, usize)> {
	let start = start_line.unwrap_or(1);
	let end = end_line.unwrap_or(line_count);

	for line in [start, end] {
		if line == 0 || line > line_count {
			return Err(IncludeError::LineOutOfRange { line, line_count });
		}
	}
	if start > end {
		return Err(IncludeError::InvertedRange { start, end });
	}
	Ok((start, end))
}

fn marker_bounds(
	document: &SourceDocument,
	start_after: Option<&str>,
	end_before: Option<&str>,
) -> Result<(usize, usize)> {
	let start = match start_after {
		Some(marker) => {
			let found = document
				.numbered_lines()
				.find(|(_, text)| text.contains(marker))
				.map(|(number, _)| number)
				.ok_or_else(|| IncludeError::MarkerNotFound {
					option: "start-after",
					marker: marker.to_string(),
				})?;
			found + 1
		}
		None => 1,
	};

	let end = match end_before {
		Some(marker) => {
			let found = document
				.numbered_lines()
				.skip(start.saturating_sub(1))
				.find(|(_, text)| text.contains(marker))
				.map(|(number, _)| number)
				.ok_or_else(|| IncludeError::MarkerNotFound {
					option: "end-before",
					marker: marker.to_string(),
				})?;
			found - 1
		}
		None => document.line_count(),
	};

	if start > end {
		return Err(IncludeError::empty(format!(
			"no lines between the markers (start-after {start_after:?}, end-before {end_before:?})"
		)));
	}
	Ok((start, end))
}

fn marker_name<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
	let caps = regex.captures(text)?;
	caps.name("bracket")
		.or_else(|| caps.name("anchor"))
		.map(|m| m.as_str())
}

fn block_bounds(document: &SourceDocument, name: &str) -> Result<(usize, usize)> {
	let opening = document
		.numbered_lines()
		.find(|(_, text)| marker_name(&BLOCK_START, text) == Some(name))
		.map(|(number, _)| number)
		.ok_or_else(|| IncludeError::BlockNotFound {
			name: name.to_string(),
			reason: "not found",
		})?;

	let closing = document
		.numbered_lines()
		.skip(opening)
		.find(|(_, text)| marker_name(&BLOCK_END, text) == Some(name))
		.map(|(number, _)| number)
		.ok_or_else(|| IncludeError::BlockNotFound {
			name: name.to_string(),
			reason: "is not terminated",
		})?;

	if closing == opening + 1 {
		return Err(IncludeError::empty(format!("block {name:?} is empty")));
	}
	Ok((opening + 1, closing - 1))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::error::ErrorKind;
	use crate::options::LineSpec;

	fn numbered(count: usize) -> SourceDocument {
		let text: Vec<String> = (1..=count).map(|n| format!("line {n}")).collect();
		SourceDocument::from_text(&text.join("\n"))
	}

	fn numbers(block: &ExtractedBlock) -> Vec<usize> {
		block.lines().iter().map(|line| line.number).collect()
	}

	#[test]
	fn whole_document_by_default() {
		let block = select(&numbered(4), &SelectionSpec::Whole).unwrap();
		assert_eq!(numbers(&block), vec![1, 2, 3, 4]);
		assert_eq!(block.first_line(), Some(1));
	}

	#[test]
	fn explicit_range_is_inclusive() {
		let doc = numbered(10);
		for (start, end) in [(1, 1), (2, 5), (10, 10), (1, 10)] {
			let spec = SelectionSpec::Lines {
				start_line: Some(start),
				end_line: Some(end),
			};
			let block = select(&doc, &spec).unwrap();
			assert_eq!(numbers(&block), (start..=end).collect::<Vec<_>>());
			assert_eq!(block.texts().next(), Some(format!("line {start}").as_str()));
		}
	}

	#[test]
	fn missing_end_line_runs_to_end_of_file() {
		let spec = SelectionSpec::Lines {
			start_line: Some(3),
			end_line: None,
		};
		let block = select(&numbered(5), &spec).unwrap();
		assert_eq!(numbers(&block), vec![3, 4, 5]);
	}

	#[test]
	fn inverted_range_is_a_range_error() {
		let spec = SelectionSpec::Lines {
			start_line: Some(3),
			end_line: Some(1),
		};
		let err = select(&numbered(5), &spec).unwrap_err();
		assert!(matches!(err, IncludeError::InvertedRange { start: 3, end: 1 }));
		assert_eq!(err.kind(), ErrorKind::Range);
	}

	#[test]
	fn out_of_bounds_lines_are_range_errors() {
		let spec = SelectionSpec::Lines {
			start_line: Some(2),
			end_line: Some(9),
		};
		let err = select(&numbered(5), &spec).unwrap_err();
		assert!(matches!(err, IncludeError::LineOutOfRange { line: 9, .. }));
	}

	#[test]
	fn markers_exclude_the_marker_lines() {
		let doc = SourceDocument::from_text("a\n# BEGIN\nb\nc\nd\ne\nf\n# END\ng");
		let spec = SelectionSpec::Markers {
			start_after: Some("# BEGIN".into()),
			end_before: Some("# END".into()),
		};
		let block = select(&doc, &spec).unwrap();
		assert_eq!(numbers(&block), vec![3, 4, 5, 6, 7]);
	}

	#[test]
	fn end_marker_is_searched_from_the_start() {
		let doc = SourceDocument::from_text("# END early\n# BEGIN\nbody\n# END");
		let spec = SelectionSpec::Markers {
			start_after: Some("# BEGIN".into()),
			end_before: Some("# END".into()),
		};
		let block = select(&doc, &spec).unwrap();
		assert_eq!(block.texts().collect::<Vec<_>>(), vec!["body"]);
	}

	#[test]
	fn missing_marker_is_named() {
		let spec = SelectionSpec::Markers {
			start_after: None,
			end_before: Some("# STOP".into()),
		};
		let err = select(&numbered(3), &spec).unwrap_err();
		assert!(matches!(
			err,
			IncludeError::MarkerNotFound { option: "end-before", ref marker } if marker == "# STOP"
		));
		assert_eq!(err.kind(), ErrorKind::MarkerNotFound);
	}

	#[test]
	fn adjacent_markers_select_nothing() {
		let doc = SourceDocument::from_text("# BEGIN\n# END");
		let spec = SelectionSpec::Markers {
			start_after: Some("# BEGIN".into()),
			end_before: Some("# END".into()),
		};
		let err = select(&doc, &spec).unwrap_err();
		assert!(matches!(err, IncludeError::EmptySelection { .. }));
	}

	#[test]
	fn named_block_between_markers() {
		let doc = SourceDocument::from_text(
			"import os\n# [START example]\nx = 1\ny = 2\n# [END example]\n# ANCHOR: other\nz = 3\n# ANCHOR_END: other",
		);
		let block = select(&doc, &SelectionSpec::Block { name: "example".into() }).unwrap();
		assert_eq!(block.texts().collect::<Vec<_>>(), vec!["x = 1", "y = 2"]);
		assert_eq!(block.first_line(), Some(3));

		let block = select(&doc, &SelectionSpec::Block { name: "other".into() }).unwrap();
		assert_eq!(block.texts().collect::<Vec<_>>(), vec!["z = 3"]);
	}

	#[test]
	fn block_names_must_match_exactly() {
		let doc = SourceDocument::from_text("// [START example_two]\nx\n// [END example_two]");
		let err = select(&doc, &SelectionSpec::Block { name: "example".into() }).unwrap_err();
		assert!(matches!(err, IncludeError::BlockNotFound { ref name, reason: "not found" } if name == "example"));
	}

	#[test]
	fn unterminated_block_is_block_not_found() {
		let doc = SourceDocument::from_text("# [START example]\nx = 1\n# [END other]");
		let err = select(&doc, &SelectionSpec::Block { name: "example".into() }).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::BlockNotFound);
		assert!(err.to_string().contains("example"));
	}

	#[test]
	fn line_spec_keeps_original_numbers() {
		let spec = SelectionSpec::LineSpec(LineSpec::parse("lines", "2,4-5").unwrap());
		let block = select(&numbered(6), &spec).unwrap();
		assert_eq!(numbers(&block), vec![2, 4, 5]);
		assert!(!block.is_contiguous());
	}

	#[test]
	fn empty_document_pulls_no_lines() {
		let err = select(&SourceDocument::from_text(""), &SelectionSpec::Whole).unwrap_err();
		assert!(matches!(err, IncludeError::EmptySelection { .. }));
	}
}
