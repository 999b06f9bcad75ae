use std::path::Path;

use tracing::debug;

use crate::docstring::{self, DocstringConvention};
use crate::error::{IncludeError, Result};
use crate::options::IncludeOptions;
use crate::render::{self, RenderableLines};
use crate::select;
use crate::source::{self, SourceDocument};

/// Run select, strip and adjust over an already loaded document.
pub fn include_document(document: &SourceDocument, options: &IncludeOptions) -> Result<RenderableLines> {
	options.validate()?;

	let block = select::select(document, &options.selection)?;
	let original_start = block.first_line().unwrap_or(1);

	let convention =
		DocstringConvention::resolve(options.formatting.language.as_deref(), document.path());
	let block = docstring::strip(block, convention);
	if block.is_empty() {
		return Err(IncludeError::empty(
			"the selection contains nothing but a docstring",
		));
	}

	let rendered = render::adjust(&block, original_start, &options.formatting)?;
	debug!(
		path = ?document.path(),
		lines = rendered.lines.len(),
		removed = block.first_line().unwrap_or(original_start) - original_start,
		"include resolved"
	);
	Ok(rendered)
}

/// Include from text the host has already read. `tab-width` is applied here as it would be
/// when reading a file.
pub fn include_text(text: &str, options: &IncludeOptions) -> Result<RenderableLines> {
	let document = match options.tab_width {
		Some(width) => SourceDocument::from_text(&source::expand_tabs(text, width)),
		None => SourceDocument::from_text(text),
	};
	include_document(&document, options)
}

/// Read `path` and include from it. The extension picks the docstring convention unless the
/// `language` option overrides it.
pub fn include_file(path: impl AsRef<Path>, options: &IncludeOptions) -> Result<RenderableLines> {
	let document = SourceDocument::read(path, options.tab_width)?;
	include_document(&document, options)
}
