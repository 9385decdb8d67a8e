//! Live keymap replacement.
//!
//! Reload replaces the whole compiled structure through an atomic reference
//! swap, so concurrent resolvers always see either the old keymap or the new
//! one, never a partially updated table set. A failed reload keeps the
//! previously active keymap in effect.

use std::sync::Arc;

use arc_swap::ArcSwap;
use strand_keymap_parser::Node;
use tracing::{debug, warn};

use crate::compiled::{CompiledKeymap, ResolveOutcome};
use crate::context::ContextStack;
use crate::error::Result;
use crate::key::KeyEvent;

/// Shared handle to the active compiled keymap.
pub struct KeymapHandle {
	active: ArcSwap<CompiledKeymap>,
}

impl KeymapHandle {
	/// Creates a handle with the given keymap active.
	pub fn new(keymap: CompiledKeymap) -> Self {
		Self {
			active: ArcSwap::from_pointee(keymap),
		}
	}

	/// Compiles a keymap document and makes it the initial active keymap.
	///
	/// # Errors
	///
	/// Returns a [`crate::ConfigError`] if the document does not compile.
	pub fn compile(document: &str) -> Result<Self> {
		Ok(Self::new(CompiledKeymap::compile(document)?))
	}

	/// The currently active keymap snapshot.
	pub fn current(&self) -> Arc<CompiledKeymap> {
		self.active.load_full()
	}

	/// Makes an already-compiled keymap active.
	pub fn install(&self, keymap: CompiledKeymap) {
		self.active.store(Arc::new(keymap));
	}

	/// Compiles `document` and swaps it in atomically.
	///
	/// # Errors
	///
	/// Returns the compile error and leaves the previously active keymap in
	/// effect; the engine is never left without bindings.
	pub fn reload(&self, document: &str) -> Result<()> {
		match CompiledKeymap::compile(document) {
			Ok(keymap) => {
				debug!(tables = keymap.table_count(), "keymap reloaded");
				self.install(keymap);
				Ok(())
			}
			Err(err) => {
				warn!(%err, "keymap reload failed, keeping the active keymap");
				Err(err)
			}
		}
	}

	/// Resolves against the currently active keymap.
	pub fn resolve(
		&self,
		pending: &[Node],
		event: KeyEvent,
		stack: &ContextStack,
	) -> ResolveOutcome {
		self.active.load().resolve(pending, event, stack)
	}

	/// Resolves a key event with no pending prefix.
	pub fn resolve_key(&self, event: KeyEvent, stack: &ContextStack) -> ResolveOutcome {
		self.active.load().resolve_key(event, stack)
	}
}

impl std::fmt::Debug for KeymapHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeymapHandle")
			.field("tables", &self.active.load().table_count())
			.finish()
	}
}
