//! ptblocks-core - block AST and Portable Text serialization
//!
//! This crate provides the core data structures for a flat rich-text document
//! and their serialization. It is used by `ptblocks` (the text converter) and
//! `ptblocks-seed` (which stores converted documents in Sanity).
//!
//! # Architecture
//!
//! ```text
//! Text ──ptblocks──▶ ┌──────────┐ ──▶ Portable Text JSON
//!                    │ Document │
//!                    └──────────┘ ──▶ Markdown / plain text preview
//! ```
//!
//! # Example
//!
//! ```rust
//! use ptblocks_core::{Block, BlockKind, Document, KeyGenerator, Options, SequentialKeys, Span};
//!
//! let mut keys = SequentialKeys::new("k");
//! let title = Block::new(
//!     BlockKind::Heading(1),
//!     vec![Span::plain(keys.next_key(), "Hello World")],
//!     &mut keys,
//! );
//! let body = Block::new(
//!     BlockKind::Paragraph,
//!     vec![
//!         Span::plain(keys.next_key(), "This is "),
//!         Span::strong(keys.next_key(), "bold"),
//!     ],
//!     &mut keys,
//! );
//! let document = Document::new(vec![title, body]);
//!
//! let markdown = ptblocks_core::serialize(&document, &Options::default());
//! assert_eq!(markdown, "# Hello World\n\nThis is **bold**");
//! ```

mod ast;
mod keys;
mod options;
mod portable;
mod serialize;

pub use ast::{Block, BlockKind, BlockStyle, Document, ListKind, Mark, Span};
pub use keys::{KeyGenerator, RandomKeys, SequentialKeys, KEY_LENGTH};
pub use options::Options;
pub use portable::{
    from_json_str, to_json_string, PortableBlock, PortableSpan, PortableTextError, Result,
};
pub use serialize::{serialize, to_plain_text};
