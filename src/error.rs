use std::path::PathBuf;

use thiserror::Error;

/// Broad category of an [`IncludeError`], used by hosts to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The option bundle was malformed or asked for something unsupported.
	Configuration,
	/// Explicit line bounds were out of range, inverted, or selected nothing.
	Range,
	/// A `start-after` / `end-before` marker did not occur in the file.
	MarkerNotFound,
	/// A named block was missing or unterminated.
	BlockNotFound,
	/// The source file could not be read.
	Io,
}

/// Errors produced while turning a source file into renderable lines.
#[derive(Debug, Error)]
pub enum IncludeError {
	/// The option name is not part of the literal-include option set at all.
	#[error("unknown option `{option}`")]
	UnknownOption {
		/// Offending option name as supplied.
		option: String,
	},
	/// The option exists on the generic literal-include facility but is not supported here.
	#[error("option `{option}` is not supported by undocinclude")]
	UnsupportedOption {
		/// Offending option name as supplied.
		option: String,
	},
	/// Two options that cannot be combined were both supplied.
	#[error("cannot use both `{first}` and `{second}` options")]
	ConflictingOptions {
		/// The option that claimed the slot first.
		first: String,
		/// The option that collided with it.
		second: String,
	},
	/// The same option was supplied twice.
	#[error("option `{option}` given more than once")]
	DuplicateOption {
		/// Offending option name.
		option: String,
	},
	/// The option value could not be parsed.
	#[error("invalid value {value:?} for option `{option}`: {reason}")]
	InvalidOptionValue {
		/// Offending option name.
		option: String,
		/// Raw value as supplied.
		value: String,
		/// Why the value was rejected.
		reason: String,
	},
	/// `lineno-match` was requested for lines that are not contiguous in the source.
	#[error("cannot use `lineno-match` with a disjoint set of lines")]
	DisjointLines,
	/// A requested line number lies outside the file.
	#[error("line {line} is out of range (file has {line_count} lines)")]
	LineOutOfRange {
		/// Requested 1-based line number.
		line: usize,
		/// Number of lines in the file.
		line_count: usize,
	},
	/// `start-line` is greater than `end-line`.
	#[error("line range is inverted: start ({start}) > end ({end})")]
	InvertedRange {
		/// Requested start line.
		start: usize,
		/// Requested end line.
		end: usize,
	},
	/// The selection resolved to no lines.
	#[error("no lines pulled from include file: {reason}")]
	EmptySelection {
		/// What made the selection empty.
		reason: String,
	},
	/// A textual marker was not found.
	#[error("marker {marker:?} for option `{option}` not found in include file")]
	MarkerNotFound {
		/// `start-after` or `end-before`.
		option: &'static str,
		/// The marker text that was searched for.
		marker: String,
	},
	/// A named block was not found or never closed.
	#[error("block {name:?} {reason}")]
	BlockNotFound {
		/// Requested block name.
		name: String,
		/// `not found` or `is not terminated`.
		reason: &'static str,
	},
	/// The include file could not be read.
	#[error("include file {} not found or reading it failed: {source}", path.display())]
	Io {
		/// Path that was being read.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
}

impl IncludeError {
	/// Classify this error into the broad taxonomy hosts report on.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnknownOption { .. }
			| Self::UnsupportedOption { .. }
			| Self::ConflictingOptions { .. }
			| Self::DuplicateOption { .. }
			| Self::InvalidOptionValue { .. }
			| Self::DisjointLines => ErrorKind::Configuration,
			Self::LineOutOfRange { .. } | Self::InvertedRange { .. } | Self::EmptySelection { .. } => {
				ErrorKind::Range
			}
			Self::MarkerNotFound { .. } => ErrorKind::MarkerNotFound,
			Self::BlockNotFound { .. } => ErrorKind::BlockNotFound,
			Self::Io { .. } => ErrorKind::Io,
		}
	}

	pub(crate) fn invalid_value(option: &str, value: &str, reason: impl Into<String>) -> Self {
		Self::InvalidOptionValue {
			option: option.to_string(),
			value: value.to_string(),
			reason: reason.into(),
		}
	}

	pub(crate) fn empty(reason: impl Into<String>) -> Self {
		Self::EmptySelection {
			reason: reason.into(),
		}
	}
}

/// Result type returned by the undocinclude library.
pub type Result<T> = std::result::Result<T, IncludeError>;
