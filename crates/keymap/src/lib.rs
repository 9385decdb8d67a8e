//! Context-aware keymap compilation and key-event resolution.
//!
//! Compiles declarative binding tables (an ordered JSON document mapping
//! key-chord patterns to actions, each table optionally scoped by a context
//! predicate) into an immutable lookup structure, then resolves incoming key
//! events against the hosting shell's context stack:
//!
//! - Later tables override earlier ones; the first table with any entry for
//!   the typed sequence decides the outcome, with no fallthrough past it.
//! - A `null` binding is an explicit unbind that suppresses lower-precedence
//!   bindings for the same sequence.
//! - Multi-chord sequences report [`ResolveOutcome::PrefixPending`] so the
//!   caller can buffer the prefix and wait for the next chord.
//!
//! The compiled keymap never mutates after load; live replacement goes
//! through [`KeymapHandle`], which swaps the whole structure atomically.

pub use compiled::{Binding, CompiledKeymap, ResolveOutcome};
pub use config::{BindingValue, Bindings, KeymapFileSection, parse_document};
pub use context::{ContextFrame, ContextStack, Predicate};
pub use error::{ConfigError, Result};
pub use handle::KeymapHandle;
pub use key::{KeyCode, KeyEvent, Modifiers};
pub use matcher::{ContinuationEntry, ContinuationKind, MatchResult, Matcher};
pub use strand_keymap_parser as parser;

mod compiled;
mod config;
mod context;
mod error;
mod handle;
mod key;
mod matcher;
