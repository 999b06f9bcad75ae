//! Removal of the documentation comment at the front of an extracted block.

/// Language-specific docstring delimiters.
pub mod convention;

use tracing::debug;

pub use self::convention::{DocstringConvention, DocstringStyle};
use crate::select::{ExtractedBlock, SourceLine};

/// Outcome of looking for a docstring at one position.
#[derive(Debug, PartialEq, Eq)]
enum Scan {
	/// A docstring ends just before this index.
	Closed(usize),
	/// An opener was found but never closed.
	Unclosed,
	/// Nothing docstring-like starts here.
	Absent,
}

/// Remove a docstring at the front of `block`, plus one blank line after it.
///
/// Leading blank lines are skipped when looking for the opener and are removed along with the
/// docstring. A docstring that is opened but never closed leaves the block untouched.
pub fn strip(block: ExtractedBlock, convention: &DocstringConvention) -> ExtractedBlock {
	if block.front_checked() {
		return block;
	}

	let lines = block.lines();
	let Some(first) = lines.iter().position(|line| !is_blank(&line.text)) else {
		return block.mark_front_checked();
	};

	let mut end = None;
	for style in convention.styles {
		match scan(lines, first, *style, convention.string_prefixes) {
			Scan::Closed(stop) => {
				end = Some(stop);
				break;
			}
			Scan::Unclosed => {
				debug!(
					line = lines[first].number,
					convention = convention.name,
					"docstring opener is never closed; leaving block unchanged"
				);
				return block.mark_front_checked();
			}
			Scan::Absent => {}
		}
	}

	let Some(mut end) = end else {
		return block.mark_front_checked();
	};
	if lines.get(end).is_some_and(|line| is_blank(&line.text)) {
		end += 1;
	}

	debug!(
		from = lines[0].number,
		to = lines[end - 1].number,
		convention = convention.name,
		"stripping leading docstring"
	);
	block.drop_front(end)
}

fn is_blank(text: &str) -> bool {
	text.trim().is_empty()
}

fn scan(lines: &[SourceLine], first: usize, style: DocstringStyle, prefixes: &str) -> Scan {
	let opener = lines[first].text.trim_start();
	match style {
		DocstringStyle::Delimited { open, close } => {
			let unprefixed = opener.trim_start_matches(|c: char| prefixes.contains(c));
			let Some(rest) = unprefixed.strip_prefix(open) else {
				return Scan::Absent;
			};
			// `/**/` is an empty plain comment: its opener and closer share the `*`.
			let (shared, close_tail) = close.split_at(1);
			if open != close && open.ends_with(shared) && rest.starts_with(close_tail) {
				return Scan::Absent;
			}
			if rest.contains(close) {
				return Scan::Closed(first + 1);
			}
			lines[first + 1..]
				.iter()
				.position(|line| line.text.trim_end().ends_with(close))
				.map_or(Scan::Unclosed, |offset| Scan::Closed(first + offset + 2))
		}
		DocstringStyle::LinePrefix(prefix) => {
			if !has_line_prefix(opener, prefix) {
				return Scan::Absent;
			}
			let run = lines[first..]
				.iter()
				.take_while(|line| has_line_prefix(line.text.trim_start(), prefix))
				.count();
			Scan::Closed(first + run)
		}
	}
}

/// `////` and longer runs of slashes are ordinary comments, not `///` doc lines.
fn has_line_prefix(text: &str, prefix: &str) -> bool {
	text.strip_prefix(prefix)
		.is_some_and(|rest| !(prefix.ends_with('/') && rest.starts_with('/')))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::convention::{DOC_BLOCK, NONE, PYTHON, RUST};
	use super::*;

	fn block(text: &str) -> ExtractedBlock {
		block_from(1, text)
	}

	fn block_from(first: usize, text: &str) -> ExtractedBlock {
		ExtractedBlock::new(
			text.lines()
				.enumerate()
				.map(|(idx, line)| SourceLine {
					number: first + idx,
					text: line.to_string(),
				})
				.collect(),
		)
	}

	fn texts(block: &ExtractedBlock) -> Vec<&str> {
		block.texts().collect()
	}

	#[test]
	fn strips_multi_line_docstring_and_separator() {
		let stripped = strip(
			block("\"\"\"\nModule docs.\n\"\"\"\n\nimport os\nprint(os)"),
			&PYTHON,
		);
		assert_eq!(texts(&stripped), vec!["import os", "print(os)"]);
		assert_eq!(stripped.first_line(), Some(5));
	}

	#[test]
	fn strips_only_one_blank_separator() {
		let stripped = strip(block("\"\"\"Doc.\"\"\"\n\n\nx = 1"), &PYTHON);
		assert_eq!(texts(&stripped), vec!["", "x = 1"]);
		assert_eq!(stripped.first_line(), Some(3));
	}

	#[test]
	fn one_line_docstring() {
		let stripped = strip(block("    '''Return one.'''\n    return 1"), &PYTHON);
		assert_eq!(texts(&stripped), vec!["    return 1"]);
	}

	#[test]
	fn closing_delimiter_may_trail_text() {
		let stripped = strip(
			block("    r\"\"\"Summary.\n\n    Details here.\"\"\"\n    return x"),
			&PYTHON,
		);
		assert_eq!(texts(&stripped), vec!["    return x"]);
	}

	#[test]
	fn leading_blank_lines_go_with_the_docstring() {
		let stripped = strip(block("\n\"\"\"Doc.\"\"\"\nx = 1"), &PYTHON);
		assert_eq!(texts(&stripped), vec!["x = 1"]);
	}

	#[test]
	fn non_docstring_start_is_untouched() {
		let original = block("x = \"\"\"not a docstring\"\"\"\ny = 2");
		let stripped = strip(original.clone(), &PYTHON);
		assert_eq!(stripped, original);
	}

	#[test]
	fn mid_block_docstrings_are_ignored() {
		let original = block("def f():\n    \"\"\"Doc.\"\"\"\n    return 1");
		assert_eq!(strip(original.clone(), &PYTHON), original);
	}

	#[test]
	fn unclosed_docstring_fails_open() {
		let original = block("\"\"\"\nnever closed\nx = 1");
		let stripped = strip(original.clone(), &PYTHON);
		assert_eq!(stripped, original);
		assert!(stripped.front_checked());
	}

	#[test]
	fn stripping_twice_is_a_no_op() {
		let cases = [
			"\"\"\"One.\"\"\"\n\"\"\"Two.\"\"\"\nx = 1",
			"\"\"\"\nDoc\n\"\"\"\n\n\ncode",
			"plain\ncode",
			"\"\"\"\nopen",
			"",
		];
		for case in cases {
			let once = strip(block(case), &PYTHON);
			let twice = strip(once.clone(), &PYTHON);
			assert_eq!(twice, once, "not idempotent for {case:?}");
		}
	}

	#[test]
	fn doc_block_comments() {
		let stripped = strip(
			block_from(10, "/**\n * Adds things.\n */\npublic int add(int a, int b) {"),
			&DOC_BLOCK,
		);
		assert_eq!(texts(&stripped), vec!["public int add(int a, int b) {"]);
		assert_eq!(stripped.first_line(), Some(13));

		let original = block("/* plain comment */\nint x;");
		assert_eq!(strip(original.clone(), &DOC_BLOCK), original);
	}

	#[test]
	fn rust_line_doc_comments() {
		let stripped = strip(
			block("//! Crate docs.\n//! More.\n\nuse std::fmt;"),
			&RUST,
		);
		assert_eq!(texts(&stripped), vec!["use std::fmt;"]);

		let stripped = strip(block("/// Adds.\npub fn add() {}"), &RUST);
		assert_eq!(texts(&stripped), vec!["pub fn add() {}"]);
	}

	#[test]
	fn empty_block_comment_is_not_an_opener() {
		let original = block("/**/\nint x = 1; /* one */\nint y = 2;");
		assert_eq!(strip(original.clone(), &DOC_BLOCK), original);

		let original = block("/**/ fn main() {}\n/* two */\nfn other() {}");
		assert_eq!(strip(original.clone(), &RUST), original);

		let stripped = strip(block("/**\n * Doc.\n */\nint z;"), &DOC_BLOCK);
		assert_eq!(texts(&stripped), vec!["int z;"]);
	}

	#[test]
	fn four_slashes_are_a_plain_comment() {
		let original = block("//// banner\nfn main() {}");
		assert_eq!(strip(original.clone(), &RUST), original);

		let stripped = strip(block("/// Doc.\n//// not doc\nfn main() {}"), &RUST);
		assert_eq!(texts(&stripped), vec!["//// not doc", "fn main() {}"]);

		let stripped = strip(block("//!! still inner docs\nuse std::fmt;"), &RUST);
		assert_eq!(texts(&stripped), vec!["use std::fmt;"]);
	}

	#[test]
	fn none_convention_never_strips() {
		let original = block("\"\"\"Doc.\"\"\"\nx = 1");
		assert_eq!(strip(original.clone(), &NONE), original);
	}

	#[test]
	fn whole_block_docstring_leaves_nothing() {
		let stripped = strip(block("\"\"\"Only docs.\"\"\"\n"), &PYTHON);
		assert!(stripped.is_empty());
	}
}
