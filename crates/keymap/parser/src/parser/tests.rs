use super::*;

#[test]
fn bare_char() {
	assert_eq!(parse("a"), Ok(Node::from(Key::Char('a'))));
	assert_eq!(parse("B"), Ok(Node::from(Key::Char('B'))));
	assert_eq!(parse(";"), Ok(Node::from(Key::Char(';'))));
}

#[test]
fn single_modifier() {
	assert_eq!(parse("ctrl-a"), Ok(Node::new(Modifier::Ctrl as u8, Key::Char('a'))));
	assert_eq!(parse("alt-x"), Ok(Node::new(Modifier::Alt as u8, Key::Char('x'))));
}

#[test]
fn stacked_modifiers() {
	let node = parse("ctrl-alt-shift-p").unwrap();
	assert!(node.has(Modifier::Ctrl));
	assert!(node.has(Modifier::Alt));
	assert!(node.has(Modifier::Shift));
	assert!(!node.has(Modifier::Cmd));
	assert_eq!(node.key, Key::Char('p'));
}

#[test]
fn named_keys() {
	assert_eq!(parse("esc"), Ok(Node::from(Key::Esc)));
	assert_eq!(parse("enter"), Ok(Node::from(Key::Enter)));
	assert_eq!(parse("shift-tab"), Ok(Node::new(Modifier::Shift as u8, Key::Tab)));
	assert_eq!(parse("pageup"), Ok(Node::from(Key::PageUp)));
}

#[test]
fn fn_keys() {
	assert_eq!(parse("f1"), Ok(Node::from(Key::F(1))));
	assert_eq!(parse("f35"), Ok(Node::from(Key::F(35))));
	assert_eq!(parse("ctrl-f12"), Ok(Node::new(Modifier::Ctrl as u8, Key::F(12))));
}

#[test]
fn fn_key_out_of_range() {
	assert!(parse("f0").is_err());
	assert!(parse("f36").is_err());
	assert!(parse("f99").is_err());
}

#[test]
fn hyphen_key_itself() {
	// "-" is a plain char key, and "ctrl--" binds ctrl plus the hyphen.
	assert_eq!(parse("-"), Ok(Node::from(Key::Char('-'))));
	assert_eq!(parse("ctrl--"), Ok(Node::new(Modifier::Ctrl as u8, Key::Char('-'))));
}

#[test]
fn rejects_trailing_garbage() {
	let err = parse("ctrl-ab").unwrap_err();
	assert!(err.message.contains("expected end of input"), "{}", err.message);
}

#[test]
fn rejects_unknown_modifier() {
	// "hyper-" is not a modifier; "hyper" is also not a named key, so the
	// leading 'h' is taken as a char and the rest is trailing garbage.
	assert!(parse("hyper-x").is_err());
}

#[test]
fn rejects_empty_input() {
	let err = parse("").unwrap_err();
	assert_eq!(err.position, 0);
}

#[test]
fn rejects_non_ascii() {
	assert!(parse("é").is_err());
}

#[test]
fn sequence_of_chords() {
	let seq = parse_seq("ctrl-x b").unwrap();
	assert_eq!(
		seq,
		vec![
			Node::new(Modifier::Ctrl as u8, Key::Char('x')),
			Node::from(Key::Char('b')),
		]
	);
}

#[test]
fn sequence_tolerates_extra_whitespace() {
	let seq = parse_seq("  g   g  ").unwrap();
	assert_eq!(seq.len(), 2);
}

#[test]
fn empty_sequence_is_an_error() {
	assert!(parse_seq("").is_err());
	assert!(parse_seq("   ").is_err());
}

#[test]
fn sequence_propagates_chord_errors() {
	assert!(parse_seq("ctrl-x f99").is_err());
}

#[test]
fn from_str_impl() {
	let node: Node = "cmd-enter".parse().unwrap();
	assert!(node.has(Modifier::Cmd));
	assert_eq!(node.key, Key::Enter);
}
