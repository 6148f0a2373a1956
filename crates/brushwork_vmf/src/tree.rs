//! # Generic Key/Value Tree
//!
//! The map format is a tree of `key "value"` pairs and `key { ... }`
//! blocks. Keys repeat freely (`solid`, `side`, `entity`), so a block is
//! an ordered multimap: every entry is kept in source order and lookups
//! either take the first match or all of them.
//!
//! Key comparison is ASCII case-insensitive.

use crate::error::{Diagnostic, ParseError, Parsed};
use crate::tokenizer::{tokenize, TokenKind};

/// The value side of an entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A quoted or bare string.
    Text(String),
    /// A nested block.
    Block(Block),
}

/// One `key value` or `key { ... }` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Key as written.
    pub key: String,
    /// Value.
    pub value: Value,
    /// Line the key appeared on.
    pub line: usize,
}

/// A `{ ... }` scope (or the document root).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    /// Entries in source order.
    pub entries: Vec<Entry>,
}

impl Block {
    /// Appends an entry.
    pub fn push(&mut self, key: impl Into<String>, value: Value, line: usize) {
        self.entries.push(Entry {
            key: key.into(),
            value,
            line,
        });
    }

    /// Every entry with `key`, in source order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.key.eq_ignore_ascii_case(key))
    }

    /// First entry with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key.eq_ignore_ascii_case(key))
    }

    /// First text value for `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.text_with_line(key).map(|(s, _)| s)
    }

    /// First text value for `key` with its line.
    #[must_use]
    pub fn text_with_line(&self, key: &str) -> Option<(&str, usize)> {
        self.entries.iter().find_map(|e| match &e.value {
            Value::Text(s) if e.key.eq_ignore_ascii_case(key) => Some((s.as_str(), e.line)),
            _ => None,
        })
    }

    /// Every child block named `key`, in source order.
    ///
    /// A key that appears once and a key that appears many times are
    /// handled the same way.
    pub fn blocks<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a Block, usize)> + 'a {
        self.get_all(key).filter_map(|e| match &e.value {
            Value::Block(b) => Some((b, e.line)),
            Value::Text(_) => None,
        })
    }

    /// First child block named `key`.
    #[must_use]
    pub fn block(&self, key: &str) -> Option<&Block> {
        self.entries.iter().find_map(|e| match &e.value {
            Value::Block(b) if e.key.eq_ignore_ascii_case(key) => Some(b),
            _ => None,
        })
    }

    /// Every `key "value"` pair in this block (nested blocks skipped).
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.value {
            Value::Text(s) => Some((e.key.as_str(), s.as_str())),
            Value::Block(_) => None,
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the block has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An open block waiting for its `}`.
struct Frame {
    key: String,
    line: usize,
    block: Block,
}

/// Parses map text into a tree.
///
/// Never fails: unbalanced braces and stray tokens are reported and the
/// tree built so far is returned.
#[must_use]
pub fn parse(source: &str) -> Parsed<Block> {
    let (tokens, mut diagnostics) = tokenize(source);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Block::default();
    let mut pending: Option<(String, usize)> = None;

    for token in tokens {
        let line = token.line;
        match token.kind {
            TokenKind::Text(text) => match pending.take() {
                None => pending = Some((text, line)),
                Some((key, key_line)) => {
                    current(&mut stack, &mut root).push(key, Value::Text(text), key_line);
                }
            },
            TokenKind::Open => {
                let (key, key_line) = pending.take().unwrap_or_else(|| {
                    diagnostics.push(Diagnostic::new(line, ParseError::AnonymousBlock));
                    (String::new(), line)
                });
                stack.push(Frame {
                    key,
                    line: key_line,
                    block: Block::default(),
                });
            }
            TokenKind::Close => {
                if let Some((key, key_line)) = pending.take() {
                    diagnostics.push(Diagnostic::new(key_line, ParseError::DanglingKey { key }));
                }
                match stack.pop() {
                    Some(frame) => {
                        current(&mut stack, &mut root).push(
                            frame.key,
                            Value::Block(frame.block),
                            frame.line,
                        );
                    }
                    None => {
                        diagnostics.push(Diagnostic::new(line, ParseError::UnexpectedCloseBrace));
                    }
                }
            }
        }
    }

    if let Some((key, key_line)) = pending {
        diagnostics.push(Diagnostic::new(key_line, ParseError::DanglingKey { key }));
    }

    // Close whatever is still open so the partial tree is kept
    while let Some(frame) = stack.pop() {
        diagnostics.push(Diagnostic::new(
            frame.line,
            ParseError::UnclosedBlock {
                key: frame.key.clone(),
                opened_at: frame.line,
            },
        ));
        current(&mut stack, &mut root).push(frame.key, Value::Block(frame.block), frame.line);
    }

    if !diagnostics.is_empty() {
        tracing::debug!("key/value parse finished with {} diagnostics", diagnostics.len());
    }

    Parsed {
        value: root,
        diagnostics,
    }
}

fn current<'a>(stack: &'a mut [Frame], root: &'a mut Block) -> &'a mut Block {
    match stack.last_mut() {
        Some(frame) => &mut frame.block,
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
versioninfo
{
    "mapversion" "3"
}
world
{
    "classname" "worldspawn"
    solid
    {
        "id" "1"
        side { "id" "1" }
        side { "id" "2" }
    }
    solid
    {
        "id" "2"
    }
}
entity
{
    "classname" "info_player_start"
}
"#;

    #[test]
    fn test_repeated_keys_are_preserved_in_order() {
        let parsed = parse(SAMPLE);
        assert!(parsed.is_clean(), "{:?}", parsed.diagnostics);

        let world = parsed.value.block("world").unwrap();
        let ids: Vec<&str> = world
            .blocks("solid")
            .map(|(b, _)| b.text("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        let first_solid = world.block("solid").unwrap();
        assert_eq!(first_solid.blocks("side").count(), 2);
    }

    #[test]
    fn test_single_occurrence_is_a_list_of_one() {
        let parsed = parse(SAMPLE);
        assert_eq!(parsed.value.blocks("entity").count(), 1);
        assert_eq!(parsed.value.blocks("missing").count(), 0);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let parsed = parse("\"ClassName\" \"light\"");
        assert_eq!(parsed.value.text("classname"), Some("light"));
    }

    #[test]
    fn test_unclosed_block_keeps_partial_tree() {
        let parsed = parse("world\n{\n\"classname\" \"worldspawn\"\nsolid\n{\n\"id\" \"7\"\n");
        let world = parsed.value.block("world").unwrap();
        assert_eq!(world.text("classname"), Some("worldspawn"));
        assert_eq!(world.block("solid").unwrap().text("id"), Some("7"));

        let errors: Vec<&ParseError> = parsed.diagnostics.iter().map(|d| &d.error).collect();
        assert_eq!(
            errors,
            vec![
                &ParseError::UnclosedBlock { key: "solid".into(), opened_at: 4 },
                &ParseError::UnclosedBlock { key: "world".into(), opened_at: 1 },
            ]
        );
        assert!(parsed.has_structural_errors());
    }

    #[test]
    fn test_stray_close_brace_is_reported() {
        let parsed = parse("}\n\"a\" \"b\"");
        assert_eq!(parsed.value.text("a"), Some("b"));
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(1, ParseError::UnexpectedCloseBrace)]
        );
    }

    #[test]
    fn test_dangling_key_is_reported() {
        let parsed = parse("world\n{\n\"orphan\"\n}");
        assert!(parsed.value.block("world").unwrap().is_empty());
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::new(3, ParseError::DanglingKey { key: "orphan".into() })]
        );
    }

    #[test]
    fn test_anonymous_block_is_reported() {
        let parsed = parse("{ \"a\" \"b\" }");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].error, ParseError::AnonymousBlock);
        assert_eq!(parsed.value.len(), 1);
    }
}
