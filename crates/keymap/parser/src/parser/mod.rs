//! Recursive-descent parser for key-chord patterns.
//!
//! Accepts chords such as `"ctrl-alt-f1"` and whitespace-separated sequences
//! such as `"ctrl-x b"`.
//!
//! ## Supported syntax
//!
//! ```text
//! node      = modifiers* key
//! modifiers = modifier "-"
//! modifier  = "ctrl" | "cmd" | "alt" | "shift"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "esc" | "enter" | "pageup" | ...
//! char      = ascii-char
//! ```

use std::str::FromStr;

use crate::node::{KEY_SEP, Key, Modifier, Node};

#[cfg(test)]
mod tests;

/// An error produced while parsing a key pattern.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
	/// Human-readable description of what went wrong.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

/// Parser state for a single pattern string.
struct Parser<'a> {
	/// Remaining unparsed input.
	input: &'a str,
	/// Byte offset of `input` within the original string.
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	/// Peeks at the next character without consuming it.
	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	/// Peeks at the character `n` positions ahead.
	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	/// Consumes and returns the next character.
	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	/// Consumes the next character if it equals `expected`.
	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Runs `f`, restoring the parser state if it yields `None` or an error.
	fn try_parse<T, F>(&mut self, f: F) -> Option<T>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self) {
			Ok(Some(value)) => Some(value),
			Ok(None) | Err(_) => {
				(self.input, self.position) = snapshot;
				None
			}
		}
	}

	/// Consumes and returns the longest prefix whose characters satisfy `predicate`.
	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();
		while let Some(ch) = self.peek()
			&& predicate(ch)
		{
			result.push(ch);
			self.next();
		}
		result
	}

	fn error(&self, message: impl Into<String>) -> ParseError {
		ParseError {
			message: message.into(),
			position: self.position,
		}
	}
}

/// Parses a single chord expression into a [`Node`].
///
/// Accepts strings like `"ctrl-b"`, `"shift-tab"`, or `"f12"`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input does not match the chord grammar or
/// leaves trailing characters.
pub fn parse(s: &str) -> Result<Node, ParseError> {
	let mut parser = Parser::new(s);
	let node = parse_node(&mut parser)?;

	if !parser.is_end() {
		let trailing = parser.peek().unwrap();
		return Err(parser.error(format!("expected end of input, found '{trailing}'")));
	}

	Ok(node)
}

/// Parses a whitespace-separated sequence of chords.
///
/// # Errors
///
/// Returns a [`ParseError`] if any segment fails to parse, or if the input
/// contains no chords at all.
pub fn parse_seq(s: &str) -> Result<Vec<Node>, ParseError> {
	let nodes: Vec<Node> = s.split_whitespace().map(parse).collect::<Result<_, _>>()?;
	if nodes.is_empty() {
		return Err(ParseError {
			message: "empty key sequence".to_string(),
			position: 0,
		});
	}
	Ok(nodes)
}

/// Grammar: `node = modifiers* key`.
fn parse_node(parser: &mut Parser) -> Result<Node, ParseError> {
	let mut modifiers = 0u8;

	for _ in 0..Modifier::ALL.len() {
		match try_parse_modifier(parser) {
			Some(modifier) => modifiers |= modifier as u8,
			None => break,
		}
	}

	let key = parse_key(parser)?;
	Ok(Node::new(modifiers, key))
}

/// A modifier name followed by the `-` separator, or `None`.
fn try_parse_modifier(parser: &mut Parser) -> Option<Modifier> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		let Ok(modifier) = name.parse::<Modifier>() else {
			return Ok(None);
		};
		p.take(KEY_SEP)?;
		Ok(Some(modifier))
	})
}

fn parse_key(parser: &mut Parser) -> Result<Key, ParseError> {
	if let Some(key) = try_parse_fn_key(parser)? {
		return Ok(key);
	}
	if let Some(key) = try_parse_named_key(parser) {
		return Ok(key);
	}
	match parser.peek() {
		Some(ch) if ch.is_ascii() && !ch.is_whitespace() => {
			parser.next();
			Ok(Key::Char(ch))
		}
		Some(ch) => Err(parser.error(format!("'{ch}' is not a valid key"))),
		None => Err(parser.error("expected a key")),
	}
}

/// A function key, `f1` through `f35`.
///
/// Only activates when the input starts with `f` followed by a digit. Once
/// activated, the digits must form a number in range or the whole pattern is
/// rejected (no silent degradation to a char key).
fn try_parse_fn_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	if parser.peek() != Some('f') {
		return Ok(None);
	}
	if !matches!(parser.peek_at(1), Some(ch) if ch.is_ascii_digit()) {
		return Ok(None);
	}

	parser.take('f')?;
	let digits = parser.take_while(|ch| ch.is_ascii_digit());

	match digits.parse::<u8>() {
		Ok(n) if (1..=35).contains(&n) => Ok(Some(Key::F(n))),
		_ => Err(parser.error("invalid function key number (must be 1-35)")),
	}
}

/// A named key such as `"esc"`, `"enter"`, or `"pageup"`.
///
/// Single letters never name a key, so bare chars like `"b"` fall through to
/// the char alternative.
fn try_parse_named_key(parser: &mut Parser) -> Option<Key> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		if name.len() < 2 {
			return Ok(None);
		}
		Ok(name.parse::<Key>().ok())
	})
}

impl FromStr for Node {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
