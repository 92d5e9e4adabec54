//! Bold-span parsing.

use ptblocks_core::{KeyGenerator, Span};

/// Split `text` into spans, toggling bold at every `delimiter`.
///
/// Delimiters are consumed and never appear in span text. Empty runs produce
/// no span; if nothing is produced, the result is one empty unmarked span.
/// An unterminated bold run stays bold to the end of the text.
pub fn parse_spans(text: &str, delimiter: &str, keys: &mut dyn KeyGenerator) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut buffer = String::with_capacity(text.len());
    let mut bold = false;

    if delimiter.is_empty() {
        buffer.push_str(text);
    } else {
        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            if rest.starts_with(delimiter) {
                push_run(&mut spans, &mut buffer, bold, keys);
                bold = !bold;
                rest = &rest[delimiter.len()..];
            } else {
                buffer.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    push_run(&mut spans, &mut buffer, bold, keys);

    if spans.is_empty() {
        spans.push(Span::plain(keys.next_key(), ""));
    }

    spans
}

fn push_run(spans: &mut Vec<Span>, buffer: &mut String, bold: bool, keys: &mut dyn KeyGenerator) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    let span = if bold {
        Span::strong(keys.next_key(), text)
    } else {
        Span::plain(keys.next_key(), text)
    };
    spans.push(span);
}
