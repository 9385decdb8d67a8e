//! Plain-text key-chord parsing.
//!
//! Turns pattern strings such as `"ctrl-b"`, `"shift-tab"`, or the
//! multi-chord sequence `"ctrl-x b"` into structured [`Node`] values that a
//! keymap engine can index and match against incoming key events.

pub use node::{KEY_SEP, Key, Modifier, Node};
pub use parser::{ParseError, parse, parse_seq};

mod node;
mod parser;
