//! Portable Text JSON
//!
//! Maps the block AST to and from the JSON shape stored in a Sanity rich-text
//! field: an array of `block` objects, each with `span` children.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::ast::{Block, BlockKind, BlockStyle, Document, ListKind, Mark, Span};
use crate::keys::{KeyGenerator, RandomKeys};

/// Error type for Portable Text parsing
#[derive(Debug, thiserror::Error)]
pub enum PortableTextError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected node of type `{expected}`, found `{found}`")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },

    #[error("Unsupported block style: {0}")]
    UnsupportedStyle(String),

    #[error("Unsupported list item kind: {0}")]
    UnsupportedListItem(String),

    #[error("Unsupported mark: {0}")]
    UnsupportedMark(String),
}

pub type Result<T> = std::result::Result<T, PortableTextError>;

/// A `block` object as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortableBlock {
    #[serde(rename = "_type")]
    pub node_type: String,
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub mark_defs: Vec<serde_json::Value>,
    #[serde(default)]
    pub children: Vec<PortableSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

/// A `span` object as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortableSpan {
    #[serde(rename = "_type")]
    pub node_type: String,
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

fn default_style() -> String {
    BlockStyle::Normal.as_str().to_string()
}

impl From<&Span> for PortableSpan {
    fn from(span: &Span) -> Self {
        Self {
            node_type: "span".to_string(),
            key: span.key.clone(),
            text: span.text.clone(),
            marks: span.marks.iter().map(|m| m.as_str().to_string()).collect(),
        }
    }
}

impl From<&Block> for PortableBlock {
    fn from(block: &Block) -> Self {
        let (list_item, level) = match block.kind {
            BlockKind::ListItem(kind) => (Some(kind.as_str().to_string()), Some(1)),
            BlockKind::Paragraph | BlockKind::Heading(_) => (None, None),
        };

        Self {
            node_type: "block".to_string(),
            key: block.key.clone(),
            style: block.style().as_str().to_string(),
            mark_defs: Vec::new(),
            children: block.children().iter().map(PortableSpan::from).collect(),
            list_item,
            level,
        }
    }
}

impl PortableSpan {
    fn into_span(self, keys: &mut dyn KeyGenerator) -> Result<Span> {
        if self.node_type != "span" {
            return Err(PortableTextError::UnexpectedType {
                expected: "span",
                found: self.node_type,
            });
        }

        let mut marks = BTreeSet::new();
        for mark in self.marks {
            match mark.as_str() {
                "strong" => {
                    marks.insert(Mark::Strong);
                }
                _ => return Err(PortableTextError::UnsupportedMark(mark)),
            }
        }

        let key = if self.key.is_empty() {
            keys.next_key()
        } else {
            self.key
        };

        Ok(Span {
            key,
            text: self.text,
            marks,
        })
    }
}

impl PortableBlock {
    /// Convert into an AST block. Missing keys are generated.
    ///
    /// A list item keeps its list kind even when it also carries a heading
    /// style, since the block model is flat.
    pub fn into_block(self, keys: &mut dyn KeyGenerator) -> Result<Block> {
        if self.node_type != "block" {
            return Err(PortableTextError::UnexpectedType {
                expected: "block",
                found: self.node_type,
            });
        }

        let style = BlockStyle::parse(&self.style)
            .ok_or_else(|| PortableTextError::UnsupportedStyle(self.style.clone()))?;

        let kind = match self.list_item.as_deref() {
            Some("bullet") => BlockKind::ListItem(ListKind::Bullet),
            Some("number") => BlockKind::ListItem(ListKind::Number),
            Some(other) => return Err(PortableTextError::UnsupportedListItem(other.to_string())),
            None => match style.level() {
                Some(level) => BlockKind::Heading(level),
                None => BlockKind::Paragraph,
            },
        };

        let children = self
            .children
            .into_iter()
            .map(|span| span.into_span(keys))
            .collect::<Result<Vec<_>>>()?;

        let key = if self.key.is_empty() {
            keys.next_key()
        } else {
            self.key
        };

        Ok(Block::with_key(key, kind, children, keys))
    }
}

impl Document {
    /// Wire representation of every block
    pub fn to_portable(&self) -> Vec<PortableBlock> {
        self.blocks.iter().map(PortableBlock::from).collect()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PortableBlock::from(self).serialize(serializer)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.blocks.iter().map(PortableBlock::from))
    }
}

/// Serialize a document to a Portable Text JSON array
pub fn to_json_string(document: &Document, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Parse a Portable Text JSON array into a document
pub fn from_json_str(json: &str) -> Result<Document> {
    let blocks: Vec<PortableBlock> = serde_json::from_str(json)?;
    let mut keys = RandomKeys;
    let blocks = blocks
        .into_iter()
        .map(|block| block.into_block(&mut keys))
        .collect::<Result<Vec<_>>>()?;
    Ok(Document::new(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SequentialKeys;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Document {
        let mut keys = SequentialKeys::new("k");
        let heading = Block::new(
            BlockKind::Heading(1),
            vec![Span::plain(keys.next_key(), "Title")],
            &mut keys,
        );
        let paragraph = Block::new(
            BlockKind::Paragraph,
            vec![
                Span::plain(keys.next_key(), "Some "),
                Span::strong(keys.next_key(), "bold"),
            ],
            &mut keys,
        );
        let item = Block::new(
            BlockKind::ListItem(ListKind::Bullet),
            vec![Span::plain(keys.next_key(), "item")],
            &mut keys,
        );
        Document::new(vec![heading, paragraph, item])
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "_type": "block",
                    "_key": "k1",
                    "style": "h1",
                    "markDefs": [],
                    "children": [
                        {"_type": "span", "_key": "k0", "text": "Title", "marks": []}
                    ]
                },
                {
                    "_type": "block",
                    "_key": "k4",
                    "style": "normal",
                    "markDefs": [],
                    "children": [
                        {"_type": "span", "_key": "k2", "text": "Some ", "marks": []},
                        {"_type": "span", "_key": "k3", "text": "bold", "marks": ["strong"]}
                    ]
                },
                {
                    "_type": "block",
                    "_key": "k6",
                    "style": "normal",
                    "markDefs": [],
                    "children": [
                        {"_type": "span", "_key": "k5", "text": "item", "marks": []}
                    ],
                    "listItem": "bullet",
                    "level": 1
                }
            ])
        );
    }

    #[test]
    fn test_to_portable_matches_serialized_form() {
        let document = sample();
        let portable = document.to_portable();
        assert_eq!(portable.len(), 3);
        assert_eq!(portable[0].style, "h1");
        assert_eq!(portable[2].list_item.as_deref(), Some("bullet"));
        assert_eq!(portable[2].level, Some(1));
        assert_eq!(
            serde_json::to_value(&portable).unwrap(),
            serde_json::to_value(&document).unwrap()
        );
    }

    #[test]
    fn test_parse_keeps_keys() {
        let json = to_json_string(&sample(), false).unwrap();
        let parsed = from_json_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_generates_missing_keys() {
        let parsed = from_json_str(
            r#"[{"_type":"block","children":[{"_type":"span","text":"hi"}]}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.blocks[0].kind, BlockKind::Paragraph);
        assert!(!parsed.blocks[0].key.is_empty());
        assert!(!parsed.blocks[0].children()[0].key.is_empty());
    }

    #[test]
    fn test_parse_block_without_children() {
        let parsed = from_json_str(r#"[{"_type":"block","_key":"a","style":"h3"}]"#).unwrap();
        let block = &parsed.blocks[0];
        assert_eq!(block.kind, BlockKind::Heading(3));
        assert_eq!(block.children().len(), 1);
        assert_eq!(block.children()[0].text, "");
    }

    #[test]
    fn test_parse_rejects_unknown_style() {
        let err = from_json_str(r#"[{"_type":"block","style":"blockquote","children":[]}]"#)
            .unwrap_err();
        assert!(matches!(err, PortableTextError::UnsupportedStyle(s) if s == "blockquote"));
    }

    #[test]
    fn test_parse_rejects_link_marks() {
        let err = from_json_str(
            r#"[{"_type":"block","children":[{"_type":"span","text":"x","marks":["abc123"]}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, PortableTextError::UnsupportedMark(_)));
    }

    #[test]
    fn test_parse_rejects_non_block() {
        let err = from_json_str(r#"[{"_type":"image","_key":"i"}]"#).unwrap_err();
        assert!(matches!(
            err,
            PortableTextError::UnexpectedType { expected: "block", .. }
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            from_json_str("{not json"),
            Err(PortableTextError::Json(_))
        ));
    }
}
