//! Load-time error types.
//!
//! All configuration problems are reported when the keymap is compiled;
//! resolution itself never fails.

use strand_keymap_parser::ParseError;
use thiserror::Error;

/// Errors produced while compiling a keymap document.
///
/// Every structural variant carries the zero-based index of the offending
/// binding table and the raw text that failed, for diagnostics.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not syntactically valid JSON.
	#[error("keymap document is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// A key-chord pattern in a binding table could not be parsed.
	#[error("table {table}: invalid key pattern \"{pattern}\": {source}")]
	Chord {
		/// Index of the table containing the pattern.
		table: usize,
		/// The raw pattern text.
		pattern: String,
		/// The underlying chord parse error.
		source: ParseError,
	},

	/// A context predicate uses syntax or operators the engine cannot interpret.
	#[error("table {table}: invalid context predicate \"{predicate}\": {source}")]
	Predicate {
		/// Index of the table carrying the predicate.
		table: usize,
		/// The raw predicate text.
		predicate: String,
		/// The underlying predicate parse error.
		source: ParseError,
	},
}

/// Result type for keymap compilation.
pub type Result<T> = std::result::Result<T, ConfigError>;
