//! Block Abstract Syntax Tree
//!
//! This module defines the nodes of a flat rich-text document: an ordered
//! list of blocks, each holding an ordered list of spans. Every node carries a
//! generated key because the destination format requires one per node.

use std::collections::BTreeSet;

use crate::keys::KeyGenerator;

/// Inline formatting applied to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    /// Strong emphasis (bold)
    Strong,
}

impl Mark {
    /// Name of the mark in Portable Text
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
        }
    }
}

/// One run of inline text with uniform formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub key: String,
    pub text: String,
    pub marks: BTreeSet<Mark>,
}

impl Span {
    /// Create an unmarked span
    pub fn plain(key: String, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    /// Create a bold span
    pub fn strong(key: String, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
            marks: BTreeSet::from([Mark::Strong]),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.marks.contains(&Mark::Strong)
    }

    fn eq_ignoring_keys(&self, other: &Span) -> bool {
        self.text == other.text && self.marks == other.marks
    }
}

/// Marker of a list item block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Bullet,
    Number,
}

impl ListKind {
    /// Name of the list item kind in Portable Text
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Bullet => "bullet",
            ListKind::Number => "number",
        }
    }
}

/// What a block represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading with level (1-4)
    Heading(u8),
    /// One independent list item; items are not grouped into a container
    ListItem(ListKind),
}

/// Style tag a block maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    Normal,
    H1,
    H2,
    H3,
    H4,
}

impl BlockStyle {
    /// Style for a heading level. Levels outside 1-4 fall back to `H2`.
    pub fn heading(level: u8) -> Self {
        match level {
            1 => BlockStyle::H1,
            2 => BlockStyle::H2,
            3 => BlockStyle::H3,
            4 => BlockStyle::H4,
            _ => BlockStyle::H2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStyle::Normal => "normal",
            BlockStyle::H1 => "h1",
            BlockStyle::H2 => "h2",
            BlockStyle::H3 => "h3",
            BlockStyle::H4 => "h4",
        }
    }

    /// Parse a Portable Text style name
    pub fn parse(style: &str) -> Option<Self> {
        match style {
            "normal" => Some(BlockStyle::Normal),
            "h1" => Some(BlockStyle::H1),
            "h2" => Some(BlockStyle::H2),
            "h3" => Some(BlockStyle::H3),
            "h4" => Some(BlockStyle::H4),
            _ => None,
        }
    }

    /// Heading level of this style, if it is a heading
    pub fn level(&self) -> Option<u8> {
        match self {
            BlockStyle::Normal => None,
            BlockStyle::H1 => Some(1),
            BlockStyle::H2 => Some(2),
            BlockStyle::H3 => Some(3),
            BlockStyle::H4 => Some(4),
        }
    }
}

/// A paragraph-, heading- or list-item-level unit of rich text.
///
/// `children` is never empty: a block without text holds one empty span.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: String,
    pub kind: BlockKind,
    children: Vec<Span>,
}

impl Block {
    /// Create a block, inserting an empty span if `children` is empty
    pub fn new(kind: BlockKind, mut children: Vec<Span>, keys: &mut dyn KeyGenerator) -> Self {
        let key = keys.next_key();
        if children.is_empty() {
            children.push(Span::plain(keys.next_key(), ""));
        }
        Self {
            key,
            kind,
            children,
        }
    }

    /// Create a block with an explicit key
    pub fn with_key(
        key: String,
        kind: BlockKind,
        mut children: Vec<Span>,
        keys: &mut dyn KeyGenerator,
    ) -> Self {
        if children.is_empty() {
            children.push(Span::plain(keys.next_key(), ""));
        }
        Self {
            key,
            kind,
            children,
        }
    }

    pub fn children(&self) -> &[Span] {
        &self.children
    }

    /// Style tag of this block
    pub fn style(&self) -> BlockStyle {
        match self.kind {
            BlockKind::Heading(level) => BlockStyle::heading(level),
            BlockKind::Paragraph | BlockKind::ListItem(_) => BlockStyle::Normal,
        }
    }

    /// Concatenated text of all spans
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if this block has no visible text
    pub fn is_blank(&self) -> bool {
        self.children.iter().all(|s| s.text.trim().is_empty())
    }

    /// Compare kind and spans, skipping generated keys
    pub fn eq_ignoring_keys(&self, other: &Block) -> bool {
        self.kind == other.kind
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.eq_ignoring_keys(b))
    }
}

/// Ordered sequence of blocks produced for one input text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Compare two documents, skipping generated keys
    pub fn eq_ignoring_keys(&self, other: &Document) -> bool {
        self.blocks.len() == other.blocks.len()
            && self
                .blocks
                .iter()
                .zip(&other.blocks)
                .all(|(a, b)| a.eq_ignoring_keys(b))
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
