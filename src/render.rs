//! Translate line-number options into positions within the rendered block.

use serde::Serialize;
use tracing::debug;

use crate::error::{IncludeError, Result};
use crate::options::FormattingOptions;
use crate::select::ExtractedBlock;

/// Final output handed back to the host for verbatim rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderableLines {
	/// Lines to render, without terminators.
	pub lines: Vec<String>,
	/// 1-based positions within `lines` to emphasise.
	pub emphasize_lines: Vec<usize>,
	/// Whether line numbers should be shown.
	pub linenos: bool,
	/// Number displayed next to the first rendered line.
	pub lineno_start: usize,
	/// Highlighting language, if one was requested.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Caption for the rendered block.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub caption: Option<String>,
}

impl RenderableLines {
	/// Rendered lines joined with `\n`, with a trailing newline.
	pub fn text(&self) -> String {
		let mut text = self.lines.join("\n");
		if !self.lines.is_empty() {
			text.push('\n');
		}
		text
	}
}

/// Build [`RenderableLines`] from a (possibly stripped) block.
///
/// `original_start_line` is where the selection began in the source file, before any docstring
/// was removed. Emphasised lines are given in source file numbering; lines that are no longer in
/// the block are dropped.
pub fn adjust(
	block: &ExtractedBlock,
	original_start_line: usize,
	formatting: &FormattingOptions,
) -> Result<RenderableLines> {
	let lines = block.lines();
	let shift = block
		.first_line()
		.map_or(0, |first| first.saturating_sub(original_start_line));

	let mut emphasize_lines = Vec::new();
	if let Some(spec) = &formatting.emphasize_lines {
		emphasize_lines.extend(
			lines
				.iter()
				.enumerate()
				.filter(|(_, line)| spec.contains(line.number))
				.map(|(idx, _)| idx + 1),
		);
		debug!(
			spec = %spec,
			shift,
			kept = emphasize_lines.len(),
			"emphasized lines outside the rendered block are dropped"
		);
	}

	let lineno_start = if formatting.lineno_match {
		if !block.is_contiguous() {
			return Err(IncludeError::DisjointLines);
		}
		block.first_line().unwrap_or(original_start_line)
	} else {
		formatting.lineno_start.unwrap_or(1)
	};

	Ok(RenderableLines {
		lines: block.texts().map(str::to_string).collect(),
		emphasize_lines,
		linenos: formatting.linenos || formatting.lineno_match || formatting.lineno_start.is_some(),
		lineno_start,
		language: formatting.language.clone(),
		caption: formatting.caption.clone(),
	})
}
