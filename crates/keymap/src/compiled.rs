//! Compilation of binding tables and resolution of key events.

use std::sync::Arc;

use serde_json::{Map, Value};
use strand_keymap_parser::{Node, parse_seq};
use tracing::warn;

use crate::config::{BindingValue, KeymapFileSection};
use crate::context::{ContextStack, Predicate};
use crate::error::{ConfigError, Result};
use crate::key::KeyEvent;
use crate::matcher::{ContinuationEntry, MatchResult, Matcher};

/// An action to dispatch, with its options record.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	/// Opaque action identifier, e.g. `editor::MoveRight`.
	pub action: String,
	/// Structured options attached to the binding, empty when none were given.
	pub options: Map<String, Value>,
}

impl Binding {
	/// Creates a binding with no options.
	pub fn new(action: impl Into<String>) -> Self {
		Self {
			action: action.into(),
			options: Map::new(),
		}
	}
}

/// Outcome of resolving one key event.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
	/// The key is not bound; any pending prefix should be cleared.
	NoMatch,
	/// The chord extends a known multi-chord prefix; the caller should
	/// buffer it and wait for the next chord (or a timeout it manages).
	PrefixPending,
	/// A binding fired.
	Fire(Arc<Binding>),
}

/// One compiled binding table.
///
/// Trie values are `None` for explicit `null` unbinds. An unbind still
/// counts as a match during resolution, so it suppresses lower-precedence
/// tables instead of falling through to them.
#[derive(Debug)]
struct CompiledTable {
	predicate: Option<Predicate>,
	matcher: Matcher<Option<Arc<Binding>>>,
	source_index: usize,
}

impl CompiledTable {
	fn applies(&self, stack: &ContextStack) -> bool {
		match &self.predicate {
			Some(predicate) => predicate.eval(stack),
			None => true,
		}
	}
}

/// An immutable, compiled set of binding tables.
///
/// Construction validates every chord pattern and context predicate;
/// resolution afterwards never fails. The structure is never mutated, so
/// shared references can be read from multiple dispatch threads.
#[derive(Debug)]
pub struct CompiledKeymap {
	/// Tables in document order; precedence is reverse iteration.
	tables: Vec<CompiledTable>,
}

impl CompiledKeymap {
	/// Compiles binding tables, preserving their document order.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] naming the offending table index and raw
	/// text if a chord pattern or context predicate is malformed. Duplicate
	/// patterns within one table are not an error; the last one wins and the
	/// shadowed entry is logged.
	pub fn load(sections: &[KeymapFileSection]) -> Result<Self> {
		let mut tables = Vec::with_capacity(sections.len());

		for (index, section) in sections.iter().enumerate() {
			let predicate = match &section.context {
				Some(raw) => Some(Predicate::parse(raw).map_err(|source| ConfigError::Predicate {
					table: index,
					predicate: raw.clone(),
					source,
				})?),
				None => None,
			};

			let mut matcher = Matcher::new();
			for (pattern, value) in section.bindings.entries() {
				let keys = parse_seq(pattern).map_err(|source| ConfigError::Chord {
					table: index,
					pattern: pattern.clone(),
					source,
				})?;

				let entry = match value {
					BindingValue::Unbind => None,
					BindingValue::Action(action) => Some(Arc::new(Binding::new(action.clone()))),
					BindingValue::ActionWithOptions(action, options) => Some(Arc::new(Binding {
						action: action.clone(),
						options: options.clone(),
					})),
				};

				if matcher.add(keys, entry).is_some() {
					warn!(table = index, pattern = %pattern, "duplicate key pattern, keeping the later binding");
				}
			}

			tables.push(CompiledTable {
				predicate,
				matcher,
				source_index: index,
			});
		}

		Ok(Self { tables })
	}

	/// Parses and compiles a keymap document in one step.
	///
	/// # Errors
	///
	/// Returns a [`ConfigError`] for malformed JSON, chord patterns, or
	/// context predicates.
	pub fn compile(document: &str) -> Result<Self> {
		let sections = crate::config::parse_document(document)?;
		Self::load(&sections)
	}

	/// Resolves a key event against the current context stack.
	///
	/// `pending` is the prefix of chords the caller has buffered from
	/// earlier [`ResolveOutcome::PrefixPending`] outcomes; sequence timing
	/// is entirely the caller's concern.
	///
	/// Tables are searched from last-defined to first-defined, skipping
	/// tables whose predicate the stack does not satisfy. The first table
	/// with any entry for the typed sequence decides the outcome; an
	/// explicit unbind resolves to [`ResolveOutcome::NoMatch`] without
	/// falling through to lower-precedence tables.
	pub fn resolve(
		&self,
		pending: &[Node],
		event: KeyEvent,
		stack: &ContextStack,
	) -> ResolveOutcome {
		let mut keys = Vec::with_capacity(pending.len() + 1);
		keys.extend_from_slice(pending);
		keys.push(event.to_node());

		for table in self.tables.iter().rev() {
			if !table.applies(stack) {
				continue;
			}

			match table.matcher.lookup(&keys) {
				MatchResult::Complete(Some(binding)) => {
					return ResolveOutcome::Fire(Arc::clone(binding));
				}
				MatchResult::Complete(None) => return ResolveOutcome::NoMatch,
				MatchResult::Partial => return ResolveOutcome::PrefixPending,
				MatchResult::None => {}
			}
		}

		ResolveOutcome::NoMatch
	}

	/// Resolves a key event with no pending prefix.
	pub fn resolve_key(&self, event: KeyEvent, stack: &ContextStack) -> ResolveOutcome {
		self.resolve(&[], event, stack)
	}

	/// Lists the bindings reachable one chord past `pending`, for which-key
	/// style UI surfaces.
	///
	/// Walks tables in precedence order and reports each table's
	/// continuations together with the table's document index; entries from
	/// higher-precedence tables come first.
	pub fn continuations(
		&self,
		pending: &[Node],
		stack: &ContextStack,
	) -> Vec<(usize, ContinuationEntry<'_, Option<Arc<Binding>>>)> {
		let mut entries = Vec::new();
		for table in self.tables.iter().rev() {
			if !table.applies(stack) {
				continue;
			}
			for entry in table.matcher.continuations(pending) {
				entries.push((table.source_index, entry));
			}
		}
		entries
	}

	/// Number of compiled tables.
	pub fn table_count(&self) -> usize {
		self.tables.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_document;
	use crate::context::ContextFrame;

	fn compile(doc: &str) -> CompiledKeymap {
		CompiledKeymap::compile(doc).unwrap()
	}

	fn editor_stack() -> ContextStack {
		ContextStack::from_names(["Editor"])
	}

	#[test]
	fn load_rejects_bad_chord_with_table_index() {
		let doc = r#"[
			{ "bindings": { "ctrl-g": "menu::Cancel" } },
			{ "bindings": { "ctrl-f99": "broken::Binding" } }
		]"#;
		let err = CompiledKeymap::compile(doc).unwrap_err();
		let ConfigError::Chord { table, pattern, .. } = err else {
			panic!("expected a chord error, got {err}");
		};
		assert_eq!(table, 1);
		assert_eq!(pattern, "ctrl-f99");
	}

	#[test]
	fn load_rejects_bad_predicate_with_table_index() {
		let doc = r#"[{ "context": "Editor || Terminal", "bindings": {} }]"#;
		let err = CompiledKeymap::compile(doc).unwrap_err();
		let ConfigError::Predicate { table, predicate, .. } = err else {
			panic!("expected a predicate error, got {err}");
		};
		assert_eq!(table, 0);
		assert_eq!(predicate, "Editor || Terminal");
	}

	#[test]
	fn load_rejects_empty_pattern() {
		let sections = parse_document(r#"[{ "bindings": { "": "x" } }]"#).unwrap();
		assert!(CompiledKeymap::load(&sections).is_err());
	}

	#[test]
	fn load_from_programmatic_sections() {
		let sections = vec![KeymapFileSection {
			context: None,
			bindings: [("ctrl-g".to_string(), BindingValue::Action("menu::Cancel".into()))]
				.into_iter()
				.collect(),
		}];
		let keymap = CompiledKeymap::load(&sections).unwrap();

		assert_eq!(keymap.table_count(), 1);
		assert!(matches!(
			keymap.resolve_key(KeyEvent::ctrl('g'), &ContextStack::new()),
			ResolveOutcome::Fire(_)
		));
	}

	#[test]
	fn fire_carries_options() {
		let keymap = compile(
			r#"[{ "bindings": { "ctrl-k": ["editor::MoveUp", { "stop_at_soft_wraps": false }] } }]"#,
		);
		let outcome = keymap.resolve_key(KeyEvent::ctrl('k'), &ContextStack::new());
		let ResolveOutcome::Fire(binding) = outcome else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "editor::MoveUp");
		assert_eq!(binding.options.get("stop_at_soft_wraps"), Some(&Value::Bool(false)));
	}

	#[test]
	fn context_scoped_table_needs_a_matching_frame() {
		let keymap = compile(r#"[{ "context": "Editor", "bindings": { "ctrl-g": "editor::Cancel" } }]"#);

		assert_eq!(
			keymap.resolve_key(KeyEvent::ctrl('g'), &ContextStack::new()),
			ResolveOutcome::NoMatch
		);
		assert!(matches!(
			keymap.resolve_key(KeyEvent::ctrl('g'), &editor_stack()),
			ResolveOutcome::Fire(_)
		));
	}

	#[test]
	fn attribute_scoped_binding() {
		let keymap = compile(
			r#"[{ "context": "Editor && selection_mode", "bindings": { "y": "editor::Copy" } }]"#,
		);

		assert_eq!(
			keymap.resolve_key(KeyEvent::char('y'), &editor_stack()),
			ResolveOutcome::NoMatch
		);

		let mut stack = ContextStack::new();
		stack.push(ContextFrame::new("Editor").with_attr("selection_mode"));
		assert!(matches!(
			keymap.resolve_key(KeyEvent::char('y'), &stack),
			ResolveOutcome::Fire(_)
		));
	}

	#[test]
	fn later_table_wins() {
		let keymap = compile(
			r#"[
				{ "bindings": { "ctrl-g": "menu::Cancel" } },
				{ "context": "Editor", "bindings": { "ctrl-g": "editor::Cancel" } }
			]"#,
		);

		let ResolveOutcome::Fire(binding) = keymap.resolve_key(KeyEvent::ctrl('g'), &editor_stack())
		else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "editor::Cancel");

		let ResolveOutcome::Fire(binding) =
			keymap.resolve_key(KeyEvent::ctrl('g'), &ContextStack::new())
		else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "menu::Cancel");
	}

	#[test]
	fn null_unbind_suppresses_earlier_tables() {
		let keymap = compile(
			r#"[
				{ "bindings": { "ctrl-x ctrl-c": "app::Quit" } },
				{ "context": "Terminal", "bindings": { "ctrl-x ctrl-c": null } }
			]"#,
		);

		let terminal = ContextStack::from_names(["Terminal"]);
		let pending = [KeyEvent::ctrl('x').to_node()];

		// The unbind wins inside the terminal; elsewhere the global binding fires.
		assert_eq!(
			keymap.resolve(&pending, KeyEvent::ctrl('c'), &terminal),
			ResolveOutcome::NoMatch
		);
		assert!(matches!(
			keymap.resolve(&pending, KeyEvent::ctrl('c'), &ContextStack::new()),
			ResolveOutcome::Fire(_)
		));
	}

	#[test]
	fn multi_chord_prefix_is_pending() {
		let keymap = compile(r#"[{ "bindings": { "ctrl-x b": "tab_switcher::Toggle" } }]"#);
		let stack = ContextStack::new();

		assert_eq!(
			keymap.resolve_key(KeyEvent::ctrl('x'), &stack),
			ResolveOutcome::PrefixPending
		);

		let pending = [KeyEvent::ctrl('x').to_node()];
		let ResolveOutcome::Fire(binding) = keymap.resolve(&pending, KeyEvent::char('b'), &stack)
		else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "tab_switcher::Toggle");
	}

	#[test]
	fn prefix_in_higher_table_blocks_complete_match_below() {
		// The later table knows "ctrl-x" as a prefix, so it decides the
		// outcome even though the earlier table binds "ctrl-x" directly.
		let keymap = compile(
			r#"[
				{ "bindings": { "ctrl-x": "older::Action" } },
				{ "bindings": { "ctrl-x b": "newer::Action" } }
			]"#,
		);

		assert_eq!(
			keymap.resolve_key(KeyEvent::ctrl('x'), &ContextStack::new()),
			ResolveOutcome::PrefixPending
		);
	}

	#[test]
	fn unsatisfied_context_falls_through_to_earlier_tables() {
		let keymap = compile(
			r#"[
				{ "bindings": { "ctrl-g": "menu::Cancel" } },
				{ "context": "Terminal", "bindings": { "ctrl-g": "terminal::Interrupt" } }
			]"#,
		);

		let ResolveOutcome::Fire(binding) = keymap.resolve_key(KeyEvent::ctrl('g'), &editor_stack())
		else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "menu::Cancel");
	}

	#[test]
	fn unknown_key_resolves_to_no_match() {
		let keymap = compile(r#"[{ "bindings": { "a": "x" } }]"#);
		assert_eq!(
			keymap.resolve_key(KeyEvent::ctrl('z'), &ContextStack::new()),
			ResolveOutcome::NoMatch
		);
	}

	#[test]
	fn duplicate_pattern_in_one_table_last_wins() {
		let keymap = compile(r#"[{ "bindings": { "q": "first::Action", "q": "second::Action" } }]"#);
		let ResolveOutcome::Fire(binding) = keymap.resolve_key(KeyEvent::char('q'), &ContextStack::new())
		else {
			panic!("expected a fire outcome");
		};
		assert_eq!(binding.action, "second::Action");
	}

	#[test]
	fn continuations_reflect_precedence_order() {
		let keymap = compile(
			r#"[
				{ "bindings": { "ctrl-x o": "older::Other" } },
				{ "bindings": { "ctrl-x b": "tab_switcher::Toggle" } }
			]"#,
		);
		let pending = [KeyEvent::ctrl('x').to_node()];
		let entries = keymap.continuations(&pending, &ContextStack::new());

		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].0, 1);
		assert_eq!(entries[1].0, 0);
	}
}
