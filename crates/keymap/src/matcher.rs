//! Trie matching for chord sequences.
//!
//! One [`Matcher`] indexes the bindings of a single table by their chord
//! sequence. Lookup distinguishes a complete match, a strict prefix of a
//! longer binding, and no match at all.

use std::collections::HashMap;

use strand_keymap_parser::Node;

/// Result of looking up a chord sequence.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchResult<'a, T> {
	/// The sequence ends on a bound entry.
	Complete(&'a T),
	/// The sequence is a strict prefix of at least one longer binding.
	Partial,
	/// The sequence matches nothing.
	None,
}

/// Kind of continuation reachable one chord past a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
	/// The next chord completes a binding.
	Leaf,
	/// The next chord leads to further chords.
	Branch,
}

/// One continuation reachable from a prefix, for which-key style UI.
#[derive(Debug)]
pub struct ContinuationEntry<'a, T> {
	/// The chord that extends the prefix.
	pub key: &'a Node,
	/// Whether the chord completes a binding or opens a longer sequence.
	pub kind: ContinuationKind,
	/// The bound value, if the chord completes a binding.
	pub value: Option<&'a T>,
}

/// A trie over chord sequences.
#[derive(Debug)]
pub struct Matcher<T> {
	root: TrieNode<T>,
}

#[derive(Debug)]
struct TrieNode<T> {
	value: Option<T>,
	children: HashMap<Node, TrieNode<T>>,
}

impl<T> Default for TrieNode<T> {
	fn default() -> Self {
		Self {
			value: None,
			children: HashMap::new(),
		}
	}
}

impl<T> Default for Matcher<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Matcher<T> {
	/// Creates an empty matcher.
	pub fn new() -> Self {
		Self {
			root: TrieNode::default(),
		}
	}

	/// Adds a binding for the given chord sequence.
	///
	/// Returns the previously bound value if the sequence was already
	/// present (last add wins).
	pub fn add(&mut self, keys: impl IntoIterator<Item = Node>, value: T) -> Option<T> {
		let mut node = &mut self.root;
		for key in keys {
			node = node.children.entry(key).or_default();
		}
		node.value.replace(value)
	}

	/// Looks up a chord sequence.
	///
	/// A node holding both a value and children reports
	/// [`MatchResult::Complete`]: the bound entry fires immediately rather
	/// than waiting out the longer sequence.
	pub fn lookup(&self, keys: &[Node]) -> MatchResult<'_, T> {
		let mut node = &self.root;
		for key in keys {
			match node.children.get(key) {
				Some(child) => node = child,
				None => return MatchResult::None,
			}
		}

		match &node.value {
			Some(value) => MatchResult::Complete(value),
			None if !node.children.is_empty() => MatchResult::Partial,
			None => MatchResult::None,
		}
	}

	/// Lists the entries reachable one chord past `prefix`.
	///
	/// Returns an empty list if the prefix matches no trie node.
	pub fn continuations(&self, prefix: &[Node]) -> Vec<ContinuationEntry<'_, T>> {
		let mut node = &self.root;
		for key in prefix {
			match node.children.get(key) {
				Some(child) => node = child,
				None => return Vec::new(),
			}
		}

		node.children
			.iter()
			.map(|(key, child)| ContinuationEntry {
				key,
				kind: if child.children.is_empty() {
					ContinuationKind::Leaf
				} else {
					ContinuationKind::Branch
				},
				value: child.value.as_ref(),
			})
			.collect()
	}

	/// Returns true if no bindings were added.
	pub fn is_empty(&self) -> bool {
		self.root.value.is_none() && self.root.children.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use strand_keymap_parser::parse_seq;

	use super::*;

	fn seq(s: &str) -> Vec<Node> {
		parse_seq(s).unwrap()
	}

	#[test]
	fn single_chord_match() {
		let mut matcher = Matcher::new();
		matcher.add(seq("ctrl-g"), "cancel");

		assert_eq!(matcher.lookup(&seq("ctrl-g")), MatchResult::Complete(&"cancel"));
		assert_eq!(matcher.lookup(&seq("ctrl-h")), MatchResult::None);
	}

	#[test]
	fn prefix_of_longer_binding_is_partial() {
		let mut matcher = Matcher::new();
		matcher.add(seq("ctrl-x b"), "switch");

		assert_eq!(matcher.lookup(&seq("ctrl-x")), MatchResult::Partial);
		assert_eq!(matcher.lookup(&seq("ctrl-x b")), MatchResult::Complete(&"switch"));
		assert_eq!(matcher.lookup(&seq("ctrl-x c")), MatchResult::None);
	}

	#[test]
	fn value_on_internal_node_completes() {
		let mut matcher = Matcher::new();
		matcher.add(seq("g"), "goto");
		matcher.add(seq("g g"), "goto_top");

		assert_eq!(matcher.lookup(&seq("g")), MatchResult::Complete(&"goto"));
		assert_eq!(matcher.lookup(&seq("g g")), MatchResult::Complete(&"goto_top"));
	}

	#[test]
	fn last_add_wins_and_reports_displacement() {
		let mut matcher = Matcher::new();
		assert_eq!(matcher.add(seq("q"), "first"), None);
		assert_eq!(matcher.add(seq("q"), "second"), Some("first"));
		assert_eq!(matcher.lookup(&seq("q")), MatchResult::Complete(&"second"));
	}

	#[test]
	fn continuations_from_prefix() {
		let mut matcher = Matcher::new();
		matcher.add(seq("ctrl-x b"), "switch");
		matcher.add(seq("ctrl-x ctrl-c c"), "chain");

		let mut entries = matcher.continuations(&seq("ctrl-x"));
		entries.sort_by_key(|e| e.key.to_string());

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].kind, ContinuationKind::Leaf);
		assert_eq!(entries[0].value, Some(&"switch"));
		assert_eq!(entries[1].kind, ContinuationKind::Branch);
		assert_eq!(entries[1].value, None);
	}

	#[test]
	fn continuations_of_unknown_prefix_are_empty() {
		let matcher: Matcher<&str> = Matcher::new();
		assert!(matcher.continuations(&seq("z")).is_empty());
	}

	#[test]
	fn empty_matcher() {
		let matcher: Matcher<&str> = Matcher::new();
		assert!(matcher.is_empty());
		assert_eq!(matcher.lookup(&seq("a")), MatchResult::None);
	}
}
