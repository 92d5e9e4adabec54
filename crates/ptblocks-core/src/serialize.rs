//! Preview serialization
//!
//! Renders a block document back into the lightweight markdown it was
//! converted from, or into plain text.

use crate::ast::{Block, BlockKind, Document, ListKind, Span};
use crate::options::Options;

/// Serialize a document to lightweight markdown
pub fn serialize(document: &Document, options: &Options) -> String {
    let mut output = String::with_capacity(4096);
    let mut number = 0usize;

    for (i, block) in document.blocks.iter().enumerate() {
        let next_is_item = matches!(
            document.blocks.get(i + 1).map(|b| b.kind),
            Some(BlockKind::ListItem(_))
        );

        match block.kind {
            BlockKind::Heading(level) => {
                number = 0;
                serialize_heading(level, block, options, &mut output);
            }
            BlockKind::Paragraph => {
                number = 0;
                let start_len = output.len();
                serialize_spans(block.children(), options, &mut output);
                if output[start_len..].trim().is_empty() {
                    output.truncate(start_len);
                    continue;
                }
            }
            BlockKind::ListItem(kind) => {
                match kind {
                    ListKind::Bullet => {
                        output.push(options.bullet_list_marker);
                        output.push(' ');
                    }
                    ListKind::Number => {
                        number += 1;
                        output.push_str(&number.to_string());
                        output.push_str(". ");
                    }
                }
                serialize_spans(block.children(), options, &mut output);
                if next_is_item {
                    output.push('\n');
                    continue;
                }
                number = 0;
            }
        }
        output.push_str("\n\n");
    }

    collapse_and_trim(&mut output);
    output
}

fn serialize_heading(level: u8, block: &Block, options: &Options, out: &mut String) {
    for _ in 0..level.clamp(1, 4) {
        out.push('#');
    }
    out.push(' ');
    serialize_spans(block.children(), options, out);
}

fn serialize_spans(spans: &[Span], options: &Options, out: &mut String) {
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        if span.is_strong() {
            out.push_str(&options.strong_delimiter);
            out.push_str(&span.text);
            out.push_str(&options.strong_delimiter);
        } else {
            out.push_str(&span.text);
        }
    }
}

/// Plain text of a document: one block per paragraph, separated by blank lines
pub fn to_plain_text(document: &Document) -> String {
    document
        .blocks
        .iter()
        .map(Block::plain_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collapse runs of newlines to at most two and trim leading/trailing newlines
fn collapse_and_trim(s: &mut String) {
    let mut result = String::with_capacity(s.len());
    let mut newline_count = 0;

    for c in s.trim_matches('\n').chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push(c);
            }
        } else {
            newline_count = 0;
            result.push(c);
        }
    }

    *s = result;
}
