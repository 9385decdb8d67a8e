//! The keymap wire format.
//!
//! A keymap document is an ordered JSON array of binding tables:
//!
//! ```text
//! [
//!     {
//!         "bindings": {
//!             "ctrl-g": "menu::Cancel" // trailing comments are tolerated
//!         }
//!     },
//!     {
//!         "context": "Editor",
//!         "bindings": {
//!             "ctrl-g": "editor::Cancel",
//!             "ctrl-shift-p": ["command_palette::Toggle", { "query": "" }],
//!             "ctrl-q": null
//!         }
//!     }
//! ]
//! ```
//!
//! A binding value is a bare action name, a 2-element `[name, options]`
//! array, or `null` for an explicit unbind. Later tables take precedence
//! over earlier ones.

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::Result;

/// One binding-table entry of a keymap document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeymapFileSection {
	/// Context predicate scoping this table, absent for global tables.
	#[serde(default)]
	pub context: Option<String>,
	/// The table's bindings, in document order.
	pub bindings: Bindings,
}

/// The right-hand side of one binding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BindingValue {
	/// `null`: explicitly unbind the pattern, suppressing lower-precedence
	/// bindings for the same sequence.
	Unbind,
	/// A bare action name.
	Action(String),
	/// An action name with an options record.
	ActionWithOptions(String, Map<String, Value>),
}

/// The bindings of one table, in document order.
///
/// Deserialized entry-by-entry rather than into a map so that duplicate
/// patterns survive to compilation, where the last one wins with a logged
/// warning.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
	entries: Vec<(String, BindingValue)>,
}

impl Bindings {
	/// The entries in document order.
	pub fn entries(&self) -> &[(String, BindingValue)] {
		&self.entries
	}

	/// Number of entries, counting duplicates.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the table binds nothing.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(String, BindingValue)> for Bindings {
	fn from_iter<I: IntoIterator<Item = (String, BindingValue)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl<'de> Deserialize<'de> for Bindings {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct BindingsVisitor;

		impl<'de> Visitor<'de> for BindingsVisitor {
			type Value = Bindings;

			fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str("a map from key patterns to actions")
			}

			fn visit_map<A>(self, mut map: A) -> std::result::Result<Bindings, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some(entry) = map.next_entry::<String, BindingValue>()? {
					entries.push(entry);
				}
				Ok(Bindings { entries })
			}
		}

		deserializer.deserialize_map(BindingsVisitor)
	}
}

/// Parses a keymap document into its binding tables.
///
/// Trailing `//` line comments are stripped before JSON parsing.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Json`] if the document is structurally
/// malformed.
pub fn parse_document(text: &str) -> Result<Vec<KeymapFileSection>> {
	let stripped = strip_line_comments(text);
	let sections = serde_json::from_str(&stripped)?;
	Ok(sections)
}

/// Removes `//` line comments outside of JSON strings.
///
/// Comment bytes are replaced with spaces rather than removed, so byte
/// offsets in JSON error messages still point into the original text.
fn strip_line_comments(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut chars = text.chars().peekable();
	let mut in_string = false;
	let mut escaped = false;

	while let Some(ch) = chars.next() {
		if in_string {
			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}
			result.push(ch);
			continue;
		}

		match ch {
			'"' => {
				in_string = true;
				result.push(ch);
			}
			'/' if chars.peek() == Some(&'/') => {
				while let Some(&next) = chars.peek() {
					if next == '\n' {
						break;
					}
					chars.next();
					result.push(' ');
				}
				result.push(' ');
			}
			_ => result.push(ch),
		}
	}

	result
}
