//! Literal source inclusion for documentation builds.
//!
//! A documentation host hands over a file and a bundle of `literalinclude`-style options. This
//! crate picks the requested lines, removes the docstring at the front of the excerpt so it does
//! not duplicate the surrounding prose, and renumbers line-based options against what is
//! actually rendered.
//!
//! ```no_run
//! use undocinclude::{IncludeOptions, include_file};
//!
//! let options = IncludeOptions::from_pairs([("start-after", "# BEGIN"), ("end-before", "# END")])?;
//! let rendered = include_file("src/example.py", &options)?;
//! print!("{}", rendered.text());
//! # Ok::<(), undocinclude::IncludeError>(())
//! ```

/// Errors and their taxonomy.
pub mod error;

/// Directive option parsing and validation.
pub mod options;

/// Source file loading.
pub mod source;

/// Range selection over a source document.
pub mod select;

/// Leading docstring removal.
pub mod docstring;

/// Line renumbering for rendering.
pub mod render;

mod include;

pub use crate::docstring::{DocstringConvention, DocstringStyle, strip};
pub use crate::error::{ErrorKind, IncludeError, Result};
pub use crate::include::{include_document, include_file, include_text};
pub use crate::options::{FormattingOptions, IncludeOptions, LineSpec, SelectionSpec};
pub use crate::render::{RenderableLines, adjust};
pub use crate::select::{ExtractedBlock, SourceLine, select};
pub use crate::source::SourceDocument;
