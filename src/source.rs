use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IncludeError, Result};

/// Full text of one include file, addressed by 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
	path: Option<PathBuf>,
	lines: Vec<String>,
}

impl SourceDocument {
	/// Wrap text the host has already loaded.
	pub fn from_text(text: &str) -> Self {
		Self {
			path: None,
			lines: text.lines().map(str::to_string).collect(),
		}
	}

	/// Read a UTF-8 file, expanding tabs when `tab_width` is given.
	pub fn read(path: impl AsRef<Path>, tab_width: Option<usize>) -> Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| IncludeError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let text = match tab_width {
			Some(width) => expand_tabs(&text, width),
			None => text,
		};

		Ok(Self::from_text(&text).with_path(path))
	}

	/// Attach the path the text came from; its extension selects the docstring convention.
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Path the document was read from, if known.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Number of lines in the document.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Text of 1-based line `number`.
	pub fn line(&self, number: usize) -> Option<&str> {
		number
			.checked_sub(1)
			.and_then(|idx| self.lines.get(idx))
			.map(String::as_str)
	}

	/// Iterate `(line number, text)` pairs in file order.
	pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
		self.lines
			.iter()
			.enumerate()
			.map(|(idx, line)| (idx + 1, line.as_str()))
	}
}

/// Replace tabs with spaces up to the next multiple of `width`, tracking the column per line.
pub fn expand_tabs(text: &str, width: usize) -> String {
	if width == 0 || !text.contains('\t') {
		return text.to_string();
	}

	let mut expanded = String::with_capacity(text.len() + text.len() / 4);
	let mut column = 0usize;
	for ch in text.chars() {
		match ch {
			'\t' => {
				let pad = width - column % width;
				expanded.extend(std::iter::repeat_n(' ', pad));
				column += pad;
			}
			'\n' | '\r' => {
				expanded.push(ch);
				column = 0;
			}
			_ => {
				expanded.push(ch);
				column += 1;
			}
		}
	}
	expanded
}
