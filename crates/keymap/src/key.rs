//! Runtime key-event types and conversion to the pattern representation.
//!
//! [`KeyEvent`] is what the hosting shell feeds into resolution; conversion
//! to a parser [`Node`] lets events be matched against compiled patterns.

use strand_keymap_parser::{Key, Modifier, Node};

/// Key modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Cmd (Super) is held.
	pub cmd: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		cmd: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
		cmd: false,
	};

	/// Only Alt pressed.
	pub const ALT: Self = Self {
		ctrl: false,
		alt: true,
		shift: false,
		cmd: false,
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
		cmd: false,
	};

	/// Only Cmd pressed.
	pub const CMD: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		cmd: true,
	};

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Cmd added.
	pub fn cmd(self) -> Self {
		Self { cmd: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.cmd
	}
}

/// The key pressed in a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character key.
	Char(char),
	/// A function key.
	F(u8),
	Esc,
	Enter,
	Tab,
	BackTab,
	Backspace,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
}

/// One key press delivered by the hosting shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
	/// The key pressed.
	pub code: KeyCode,
	/// Modifiers held during the press.
	pub modifiers: Modifiers,
}

impl KeyEvent {
	/// Creates an event with no modifiers.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// A bare character press.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Ctrl plus a character.
	pub const fn ctrl(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::CTRL,
		}
	}

	/// Alt plus a character.
	pub const fn alt(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::ALT,
		}
	}

	/// Returns a copy with Shift added.
	pub fn with_shift(mut self) -> Self {
		self.modifiers.shift = true;
		self
	}

	/// Converts this event into the pattern representation used for matching.
	///
	/// `Char(' ')` normalizes to the named `space` key so events match
	/// patterns written either way.
	pub fn to_node(self) -> Node {
		let key = match self.code {
			KeyCode::Char(' ') => Key::Space,
			KeyCode::Char(c) => Key::Char(c),
			KeyCode::F(n) => Key::F(n),
			KeyCode::Esc => Key::Esc,
			KeyCode::Enter => Key::Enter,
			KeyCode::Tab => Key::Tab,
			KeyCode::BackTab => Key::BackTab,
			KeyCode::Backspace => Key::Backspace,
			KeyCode::Delete => Key::Delete,
			KeyCode::Insert => Key::Insert,
			KeyCode::Home => Key::Home,
			KeyCode::End => Key::End,
			KeyCode::PageUp => Key::PageUp,
			KeyCode::PageDown => Key::PageDown,
			KeyCode::Up => Key::Up,
			KeyCode::Down => Key::Down,
			KeyCode::Left => Key::Left,
			KeyCode::Right => Key::Right,
		};

		Node::new(modifier_bits(self.modifiers), key)
	}
}

impl From<KeyEvent> for Node {
	fn from(event: KeyEvent) -> Self {
		event.to_node()
	}
}

/// Packs runtime modifiers into the parser's bitset representation.
fn modifier_bits(mods: Modifiers) -> u8 {
	let mut bits = 0u8;
	if mods.ctrl {
		bits |= Modifier::Ctrl as u8;
	}
	if mods.alt {
		bits |= Modifier::Alt as u8;
	}
	if mods.shift {
		bits |= Modifier::Shift as u8;
	}
	if mods.cmd {
		bits |= Modifier::Cmd as u8;
	}
	bits
}

#[cfg(test)]
mod tests {
	use strand_keymap_parser::parse;

	use super::*;

	#[test]
	fn simple_char_event() {
		let node = KeyEvent::char('a').to_node();
		assert_eq!(node, parse("a").unwrap());
	}

	#[test]
	fn ctrl_event_matches_parsed_pattern() {
		let node = KeyEvent::ctrl('g').to_node();
		assert_eq!(node, parse("ctrl-g").unwrap());
	}

	#[test]
	fn alt_and_shift_builders() {
		let node = KeyEvent::alt('x').with_shift().to_node();
		assert_eq!(node, parse("alt-shift-x").unwrap());
	}

	#[test]
	fn space_normalizes_to_named_key() {
		let node = KeyEvent::char(' ').to_node();
		assert_eq!(node, parse("space").unwrap());
	}

	#[test]
	fn all_modifier_bits_carry_over() {
		let event = KeyEvent {
			code: KeyCode::Char('x'),
			modifiers: Modifiers::NONE.ctrl().alt().shift().cmd(),
		};
		let node = event.to_node();
		assert_eq!(node, parse("ctrl-cmd-alt-shift-x").unwrap());
	}

	#[test]
	fn special_keys_convert() {
		for (event, pattern) in [
			(KeyEvent::new(KeyCode::Esc), "esc"),
			(KeyEvent::new(KeyCode::Enter), "enter"),
			(KeyEvent::new(KeyCode::PageDown), "pagedown"),
			(KeyEvent::new(KeyCode::F(5)), "f5"),
		] {
			assert_eq!(event.to_node(), parse(pattern).unwrap());
		}
	}
}
