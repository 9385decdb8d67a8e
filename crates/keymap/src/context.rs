//! UI context stacks and context predicates.
//!
//! The hosting shell owns a stack of named context frames (outermost first,
//! innermost last), each carrying boolean attributes such as
//! `selection_mode`. Binding tables scope themselves with predicates over
//! that stack, e.g. `"Editor && selection_mode"` or
//! `"BufferSearchBar > Editor"`.
//!
//! Predicates are parsed once at load time into a [`Predicate`] tree and
//! evaluated structurally per resolve; the raw string is never re-parsed.

use std::collections::HashSet;

use strand_keymap_parser::ParseError;

/// One active UI scope: a name plus boolean attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextFrame {
	/// The scope name, e.g. `Editor` or `Terminal`.
	pub name: String,
	/// Attributes that currently hold in this scope.
	pub attributes: HashSet<String>,
}

impl ContextFrame {
	/// Creates a frame with the given name and no attributes.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: HashSet::new(),
		}
	}

	/// Adds an attribute to this frame.
	pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
		self.attributes.insert(attr.into());
		self
	}

	/// Returns true if `ident` names this frame or one of its attributes.
	pub fn has(&self, ident: &str) -> bool {
		self.name == ident || self.attributes.contains(ident)
	}
}

/// The ordered set of active context frames, innermost last.
///
/// Owned and mutated by the hosting shell; the resolver only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextStack {
	frames: Vec<ContextFrame>,
}

impl ContextStack {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a stack of attribute-free frames from outermost to innermost.
	pub fn from_names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			frames: names.into_iter().map(ContextFrame::new).collect(),
		}
	}

	/// Pushes a frame as the new innermost scope.
	pub fn push(&mut self, frame: ContextFrame) {
		self.frames.push(frame);
	}

	/// Pops the innermost frame.
	pub fn pop(&mut self) -> Option<ContextFrame> {
		self.frames.pop()
	}

	/// The frames, outermost first.
	pub fn frames(&self) -> &[ContextFrame] {
		&self.frames
	}

	/// Returns true if no frames are active.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

/// A parsed context predicate.
///
/// Grammar, with `>` the lowest-precedence operator and left-associative:
///
/// ```text
/// predicate = conjunction ( ">" conjunction )*
/// conjunction = primary ( "&&" primary )*
/// primary   = ident | "(" predicate ")"
/// ident     = [A-Za-z_] [A-Za-z0-9_-]*
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
	/// Matches a frame whose name or attribute set contains the identifier.
	Name(String),
	/// Both sides must match at the same frame.
	And(Box<Predicate>, Box<Predicate>),
	/// The descendant side must match at a frame strictly deeper than one
	/// where the ancestor side matches.
	Descendant {
		/// Must match at a shallower (outer) frame.
		ancestor: Box<Predicate>,
		/// Must match at a deeper (inner) frame.
		descendant: Box<Predicate>,
	},
}

impl Predicate {
	/// Parses a predicate expression.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] for unknown operators (`||`, `!`, `==`, a
	/// single `&`), unbalanced parentheses, or an empty expression.
	pub fn parse(s: &str) -> Result<Self, ParseError> {
		let mut parser = PredicateParser::new(s);
		let predicate = parser.parse_predicate()?;
		parser.skip_whitespace();
		if !parser.is_end() {
			return Err(parser.error("unexpected trailing input"));
		}
		Ok(predicate)
	}

	/// Evaluates this predicate against a context stack.
	///
	/// The predicate holds if it matches at some frame, checked from the
	/// innermost frame outward.
	pub fn eval(&self, stack: &ContextStack) -> bool {
		let frames = stack.frames();
		(0..frames.len()).rev().any(|at| self.matches_at(frames, at))
	}

	fn matches_at(&self, frames: &[ContextFrame], at: usize) -> bool {
		match self {
			Predicate::Name(ident) => frames[at].has(ident),
			Predicate::And(left, right) => {
				left.matches_at(frames, at) && right.matches_at(frames, at)
			}
			Predicate::Descendant { ancestor, descendant } => {
				descendant.matches_at(frames, at)
					&& (0..at).any(|outer| ancestor.matches_at(frames, outer))
			}
		}
	}
}

/// Recursive-descent parser over a predicate expression.
struct PredicateParser<'a> {
	input: &'a str,
	position: usize,
}

impl<'a> PredicateParser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	fn skip_whitespace(&mut self) {
		while let Some(ch) = self.peek()
			&& ch.is_whitespace()
		{
			self.next();
		}
	}

	fn error(&self, message: impl Into<String>) -> ParseError {
		ParseError {
			message: message.into(),
			position: self.position,
		}
	}

	/// `predicate = conjunction ( ">" conjunction )*`
	fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
		let mut predicate = self.parse_conjunction()?;

		loop {
			self.skip_whitespace();
			if self.peek() == Some('>') {
				self.next();
				let descendant = self.parse_conjunction()?;
				predicate = Predicate::Descendant {
					ancestor: Box::new(predicate),
					descendant: Box::new(descendant),
				};
			} else {
				break;
			}
		}

		Ok(predicate)
	}

	/// `conjunction = primary ( "&&" primary )*`
	fn parse_conjunction(&mut self) -> Result<Predicate, ParseError> {
		let mut predicate = self.parse_primary()?;

		loop {
			self.skip_whitespace();
			if self.peek() == Some('&') {
				self.next();
				if self.peek() == Some('&') {
					self.next();
				} else {
					return Err(self.error("single '&' is not an operator (use '&&')"));
				}
				let right = self.parse_primary()?;
				predicate = Predicate::And(Box::new(predicate), Box::new(right));
			} else {
				break;
			}
		}

		Ok(predicate)
	}

	/// `primary = ident | "(" predicate ")"`
	fn parse_primary(&mut self) -> Result<Predicate, ParseError> {
		self.skip_whitespace();

		match self.peek() {
			Some('(') => {
				self.next();
				let inner = self.parse_predicate()?;
				self.skip_whitespace();
				if self.next() != Some(')') {
					return Err(self.error("expected ')'"));
				}
				Ok(inner)
			}
			Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
				let mut ident = String::new();
				while let Some(ch) = self.peek()
					&& (ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
				{
					ident.push(ch);
					self.next();
				}
				Ok(Predicate::Name(ident))
			}
			Some(ch) => Err(self.error(format!("unsupported operator or token '{ch}'"))),
			None => Err(self.error("expected an identifier")),
		}
	}
}
