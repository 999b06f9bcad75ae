use std::path::Path;

/// How a single documentation-comment form is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocstringStyle {
	/// A block opened and closed by delimiters, e.g. `"""` ... `"""` or `/**` ... `*/`.
	Delimited {
		/// Opening delimiter, matched at the start of the (unindented) line.
		open: &'static str,
		/// Closing delimiter.
		close: &'static str,
	},
	/// A run of lines that each start with a marker, e.g. `//!`.
	LinePrefix(&'static str),
}

/// A named set of docstring forms for one family of languages.
#[derive(Debug, PartialEq, Eq)]
pub struct DocstringConvention {
	/// Convention name, used in logs.
	pub name: &'static str,
	/// Recognized forms, tried in order.
	pub styles: &'static [DocstringStyle],
	/// Characters allowed as a string-literal prefix before the opener (`r"""`).
	pub string_prefixes: &'static str,
}

/// Python triple-quoted docstrings.
pub static PYTHON: DocstringConvention = DocstringConvention {
	name: "python",
	styles: &[
		DocstringStyle::Delimited {
			open: "\"\"\"",
			close: "\"\"\"",
		},
		DocstringStyle::Delimited {
			open: "'''",
			close: "'''",
		},
	],
	string_prefixes: "rRuU",
};

/// `/** ... */` documentation blocks (Javadoc, JSDoc, Doxygen, KDoc, ...).
pub static DOC_BLOCK: DocstringConvention = DocstringConvention {
	name: "doc-block",
	styles: &[DocstringStyle::Delimited {
		open: "/**",
		close: "*/",
	}],
	string_prefixes: "",
};

/// Rust doc comments.
pub static RUST: DocstringConvention = DocstringConvention {
	name: "rust",
	styles: &[
		DocstringStyle::LinePrefix("//!"),
		DocstringStyle::LinePrefix("///"),
		DocstringStyle::Delimited {
			open: "/*!",
			close: "*/",
		},
		DocstringStyle::Delimited {
			open: "/**",
			close: "*/",
		},
	],
	string_prefixes: "",
};

/// Recognizes nothing, so stripping never removes lines.
pub static NONE: DocstringConvention = DocstringConvention {
	name: "none",
	styles: &[],
	string_prefixes: "",
};

/// Language names and file extensions mapped to conventions.
static TABLE: &[(&str, &DocstringConvention)] = &[
	("python", &PYTHON),
	("python3", &PYTHON),
	("py", &PYTHON),
	("py3", &PYTHON),
	("pyi", &PYTHON),
	("pyw", &PYTHON),
	("rust", &RUST),
	("rs", &RUST),
	("c", &DOC_BLOCK),
	("h", &DOC_BLOCK),
	("cpp", &DOC_BLOCK),
	("c++", &DOC_BLOCK),
	("cc", &DOC_BLOCK),
	("hpp", &DOC_BLOCK),
	("java", &DOC_BLOCK),
	("javascript", &DOC_BLOCK),
	("js", &DOC_BLOCK),
	("mjs", &DOC_BLOCK),
	("typescript", &DOC_BLOCK),
	("ts", &DOC_BLOCK),
	("kotlin", &DOC_BLOCK),
	("kt", &DOC_BLOCK),
	("scala", &DOC_BLOCK),
	("swift", &DOC_BLOCK),
	("php", &DOC_BLOCK),
	("go", &DOC_BLOCK),
	("csharp", &DOC_BLOCK),
	("cs", &DOC_BLOCK),
	("none", &NONE),
];

impl DocstringConvention {
	/// Look up a convention by language name or file extension (case-insensitive).
	pub fn lookup(key: &str) -> Option<&'static DocstringConvention> {
		let key = key.trim().to_ascii_lowercase();
		TABLE
			.iter()
			.find(|(name, _)| *name == key)
			.map(|(_, convention)| *convention)
	}

	/// Pick the convention for an inclusion: explicit language first, then the file extension,
	/// then Python.
	pub fn resolve(language: Option<&str>, path: Option<&Path>) -> &'static DocstringConvention {
		language
			.and_then(Self::lookup)
			.or_else(|| {
				path.and_then(|p| p.extension())
					.and_then(|ext| ext.to_str())
					.and_then(Self::lookup)
			})
			.unwrap_or(&PYTHON)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_language_wins_over_extension() {
		let convention = DocstringConvention::resolve(Some("rust"), Some(Path::new("lib.py")));
		assert_eq!(convention.name, "rust");
	}

	#[test]
	fn extension_used_when_language_unknown() {
		let convention = DocstringConvention::resolve(Some("text"), Some(Path::new("src/Main.java")));
		assert_eq!(convention.name, "doc-block");
	}

	#[test]
	fn falls_back_to_python() {
		assert_eq!(DocstringConvention::resolve(None, None).name, "python");
		assert_eq!(
			DocstringConvention::resolve(None, Some(Path::new("notes.txt"))).name,
			"python"
		);
	}

	#[test]
	fn none_disables_stripping() {
		let convention = DocstringConvention::resolve(Some("None"), Some(Path::new("a.py")));
		assert!(convention.styles.is_empty());
	}
}
