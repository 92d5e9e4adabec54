//! BlockConverter - the main entry point for text to block conversion.

use ptblocks_core::{
    Block, BlockKind, Document, KeyGenerator, ListKind, Options, RandomKeys,
};

use crate::inline::parse_spans;
use crate::rules::{Line, Rule, Rules};
use crate::utilities::{is_blank, join_fragments};

/// The main service for converting text to blocks
pub struct BlockConverter {
    options: Options,
    rules: Rules,
}

impl BlockConverter {
    /// Create a new BlockConverter with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            rules: Rules::new(),
        }
    }

    /// Create a BlockConverter with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert text to a document with random node keys
    pub fn convert(&self, text: &str) -> Document {
        self.convert_with_keys(text, &mut RandomKeys)
    }

    /// Convert text to a document, drawing node keys from `keys`.
    ///
    /// A leading byte order mark is ignored.
    pub fn convert_with_keys(&self, text: &str, keys: &mut dyn KeyGenerator) -> Document {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut builder = DocumentBuilder::new(&self.options, keys);

        for raw in text.split('\n') {
            if is_blank(raw) {
                builder.flush_paragraph();
                builder.flush_list();
                continue;
            }

            match self.rules.classify(raw.trim()) {
                Line::Heading { level, text } => {
                    builder.flush_paragraph();
                    builder.flush_list();
                    builder.push_block(BlockKind::Heading(level), &text);
                }
                Line::ListItem { kind, text } => {
                    builder.flush_paragraph();
                    builder.list.push((kind, text));
                }
                Line::Text(text) => {
                    builder.flush_list();
                    builder.paragraph.push(text);
                }
            }
        }

        builder.finish()
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove a custom rule
    pub fn remove_rule(&mut self, key: &str) -> &mut Self {
        self.rules.remove(key);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Get the rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

impl Default for BlockConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates pending paragraph lines and list items for one conversion
struct DocumentBuilder<'a> {
    options: &'a Options,
    keys: &'a mut dyn KeyGenerator,
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Vec<(ListKind, String)>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(options: &'a Options, keys: &'a mut dyn KeyGenerator) -> Self {
        Self {
            options,
            keys,
            blocks: Vec::new(),
            paragraph: Vec::new(),
            list: Vec::new(),
        }
    }

    fn push_block(&mut self, kind: BlockKind, text: &str) {
        let children = parse_spans(text, &self.options.strong_delimiter, &mut *self.keys);
        let block = Block::new(kind, children, &mut *self.keys);
        self.blocks.push(block);
    }

    /// Emit the pending paragraph, unless it joins to nothing
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let fragments = std::mem::take(&mut self.paragraph);
        let text = join_fragments(&fragments, &self.options.line_joiner);
        if !text.is_empty() {
            self.push_block(BlockKind::Paragraph, &text);
        }
    }

    /// Emit one block per pending list item, in order
    fn flush_list(&mut self) {
        for (kind, text) in std::mem::take(&mut self.list) {
            self.push_block(BlockKind::ListItem(kind), &text);
        }
    }

    fn finish(mut self) -> Document {
        self.flush_paragraph();
        self.flush_list();
        Document::new(self.blocks)
    }
}
