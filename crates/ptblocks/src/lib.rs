//! # ptblocks
//!
//! Convert lightweight markdown text into Portable Text blocks.
//!
//! The input grammar is line oriented: `#` to `####` headings, `-`/`*` bullet
//! items, paragraphs of consecutive lines separated by blank lines, and
//! `**bold**` spans inside any of them. The output is a flat
//! [`Document`] of blocks ready to be stored in a Sanity rich-text field.
//!
//! Conversion never fails: every string, including the empty one, yields a
//! document.
//!
//! ## Example
//!
//! ```rust
//! use ptblocks::{BlockConverter, BlockKind};
//!
//! let converter = BlockConverter::new();
//! let document = converter.convert("# Title\n\nSome **bold** text\n- a\n- b");
//!
//! assert_eq!(document.len(), 4);
//! assert_eq!(document.blocks[0].kind, BlockKind::Heading(1));
//! assert!(document.blocks[1].children()[1].is_strong());
//! ```
//!
//! ## Custom rules
//!
//! ```rust
//! use ptblocks::{BlockConverter, Filter, Line, Rule};
//!
//! let mut converter = BlockConverter::new();
//! converter.add_rule(
//!     "plus-bullets",
//!     Rule::new(Filter::prefix("+ "), |line| Line::ListItem {
//!         kind: ptblocks::ListKind::Bullet,
//!         text: line[2..].to_string(),
//!     }),
//! );
//! assert_eq!(converter.convert("+ one\n+ two").len(), 2);
//! ```

mod inline;
mod rules;
mod service;
mod utilities;

pub use inline::parse_spans;
pub use ptblocks_core::{
    Block, BlockKind, BlockStyle, Document, KeyGenerator, ListKind, Mark, Options, RandomKeys,
    SequentialKeys, Span,
};
pub use rules::{markdown_rules, numbered_list_rule, ClassifyFn, Filter, Line, Rule, Rules};
pub use service::BlockConverter;
pub use utilities::*;

/// Error type for ptblocks operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Convert text with the default converter and random keys
pub fn text_to_blocks(text: &str) -> Document {
    BlockConverter::new().convert(text)
}

/// Plugin enabling `1. item` numbered list lines
pub fn numbered_lists(converter: &mut BlockConverter) {
    converter.add_rule("numbered-list", numbered_list_rule());
}
