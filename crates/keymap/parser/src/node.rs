//! Structured representation of a single key chord.

use std::fmt;
use std::str::FromStr;

/// Separator between modifier names and the key, as in `ctrl-x`.
pub const KEY_SEP: char = '-';

/// Modifier keys, with bit values for packing into [`Node::modifiers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modifier {
	Ctrl = 0b0001,
	Cmd = 0b0010,
	Alt = 0b0100,
	Shift = 0b1000,
}

impl Modifier {
	/// All modifiers, in the canonical display order.
	pub const ALL: [Modifier; 4] = [Modifier::Ctrl, Modifier::Cmd, Modifier::Alt, Modifier::Shift];

	/// The lowercase spelling used in pattern strings.
	pub fn name(self) -> &'static str {
		match self {
			Modifier::Ctrl => "ctrl",
			Modifier::Cmd => "cmd",
			Modifier::Alt => "alt",
			Modifier::Shift => "shift",
		}
	}
}

impl FromStr for Modifier {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ctrl" => Ok(Modifier::Ctrl),
			"cmd" => Ok(Modifier::Cmd),
			"alt" => Ok(Modifier::Alt),
			"shift" => Ok(Modifier::Shift),
			_ => Err(()),
		}
	}
}

impl fmt::Display for Modifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A key identifier: a printable character, a function key, or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	/// A printable ASCII character key.
	Char(char),
	/// A function key, `f1` through `f35`.
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
	Space,
}

impl FromStr for Key {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"esc" | "escape" => Ok(Key::Esc),
			"enter" | "return" => Ok(Key::Enter),
			"tab" => Ok(Key::Tab),
			"backtab" => Ok(Key::BackTab),
			"backspace" => Ok(Key::Backspace),
			"del" | "delete" => Ok(Key::Delete),
			"ins" | "insert" => Ok(Key::Insert),
			"home" => Ok(Key::Home),
			"end" => Ok(Key::End),
			"pageup" | "pgup" => Ok(Key::PageUp),
			"pagedown" | "pgdown" => Ok(Key::PageDown),
			"up" => Ok(Key::Up),
			"down" => Ok(Key::Down),
			"left" => Ok(Key::Left),
			"right" => Ok(Key::Right),
			"space" => Ok(Key::Space),
			_ => Err(()),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Char(c) => write!(f, "{c}"),
			Key::F(n) => write!(f, "f{n}"),
			Key::Esc => f.write_str("esc"),
			Key::Enter => f.write_str("enter"),
			Key::Tab => f.write_str("tab"),
			Key::BackTab => f.write_str("backtab"),
			Key::Backspace => f.write_str("backspace"),
			Key::Delete => f.write_str("del"),
			Key::Insert => f.write_str("insert"),
			Key::Home => f.write_str("home"),
			Key::End => f.write_str("end"),
			Key::PageUp => f.write_str("pageup"),
			Key::PageDown => f.write_str("pagedown"),
			Key::Up => f.write_str("up"),
			Key::Down => f.write_str("down"),
			Key::Left => f.write_str("left"),
			Key::Right => f.write_str("right"),
			Key::Space => f.write_str("space"),
		}
	}
}

/// One parsed chord: a modifier bitset plus a key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
	/// Bitwise OR of [`Modifier`] values.
	pub modifiers: u8,
	/// The key pressed together with the modifiers.
	pub key: Key,
}

impl Node {
	/// Creates a chord from a modifier bitset and a key.
	pub const fn new(modifiers: u8, key: Key) -> Self {
		Self { modifiers, key }
	}

	/// Returns true if the given modifier is part of this chord.
	pub fn has(&self, modifier: Modifier) -> bool {
		self.modifiers & modifier as u8 != 0
	}
}

impl From<Key> for Node {
	fn from(key: Key) -> Self {
		Self::new(0, key)
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for modifier in Modifier::ALL {
			if self.has(modifier) {
				write!(f, "{modifier}{KEY_SEP}")?;
			}
		}
		write!(f, "{}", self.key)
	}
}
