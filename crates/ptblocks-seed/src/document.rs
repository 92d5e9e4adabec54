//! CMS documents built from posts.

use ptblocks_core::Document;
use serde::Serialize;
use serde_json::{json, Value};

use crate::manifest::{LocalizedPost, Post};

/// Field holding the reference to the other-language version of a post
pub const TRANSLATION_FIELD: &str = "translation";

/// Sanity slug object
#[derive(Debug, Clone, Serialize)]
pub struct Slug<'a> {
    #[serde(rename = "_type")]
    pub node_type: &'static str,
    pub current: &'a str,
}

/// One language version of a post, shaped as a Sanity document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument<'a> {
    #[serde(rename = "_type")]
    pub document_type: &'a str,
    pub title: &'a str,
    pub slug: Slug<'a>,
    pub language: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<&'a str>,
    pub body: &'a Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
}

impl<'a> PostDocument<'a> {
    pub fn new(
        document_type: &'a str,
        post: &'a Post,
        localized: &'a LocalizedPost,
        body: &'a Document,
    ) -> Self {
        Self {
            document_type,
            title: &localized.title,
            slug: Slug {
                node_type: "slug",
                current: &localized.slug,
            },
            language: localized.locale.code(),
            excerpt: localized.excerpt.as_deref(),
            body,
            published_at: post.published_at.as_deref(),
            author: post.author.as_deref(),
            category: post.category.as_deref(),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A strong reference to another document
pub fn reference(id: &str) -> Value {
    json!({ "_type": "reference", "_ref": id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Locale;
    use pretty_assertions::assert_eq;
    use ptblocks::BlockConverter;
    use ptblocks_core::SequentialKeys;

    fn post() -> Post {
        Post {
            slug: "flood-cover".to_string(),
            published_at: Some("2024-06-01T09:00:00Z".to_string()),
            category: None,
            author: Some("Ana".to_string()),
            en: LocalizedPost {
                locale: Locale::En,
                title: "Flood cover".to_string(),
                slug: "flood-cover".to_string(),
                excerpt: None,
                body: "Stay **dry**".to_string(),
            },
            es: LocalizedPost {
                locale: Locale::Es,
                title: "Cobertura de inundación".to_string(),
                slug: "flood-cover-es".to_string(),
                excerpt: Some("Resumen".to_string()),
                body: "Manténgase **seco**".to_string(),
            },
        }
    }

    #[test]
    fn test_document_shape() {
        let post = post();
        let body =
            BlockConverter::new().convert_with_keys(&post.en.body, &mut SequentialKeys::new("k"));
        let value = PostDocument::new("post", &post, &post.en, &body).to_value().unwrap();

        assert_eq!(
            value,
            json!({
                "_type": "post",
                "title": "Flood cover",
                "slug": {"_type": "slug", "current": "flood-cover"},
                "language": "en",
                "body": [{
                    "_type": "block",
                    "_key": "k2",
                    "style": "normal",
                    "markDefs": [],
                    "children": [
                        {"_type": "span", "_key": "k0", "text": "Stay ", "marks": []},
                        {"_type": "span", "_key": "k1", "text": "dry", "marks": ["strong"]}
                    ]
                }],
                "publishedAt": "2024-06-01T09:00:00Z",
                "author": "Ana"
            })
        );
    }

    #[test]
    fn test_spanish_document_language_and_excerpt() {
        let post = post();
        let body = BlockConverter::new().convert(&post.es.body);
        let value = PostDocument::new("post", &post, &post.es, &body).to_value().unwrap();
        assert_eq!(value["language"], "es");
        assert_eq!(value["excerpt"], "Resumen");
        assert_eq!(value["slug"]["current"], "flood-cover-es");
        assert_eq!(value["body"][0]["children"][1]["text"], "seco");
    }

    #[test]
    fn test_reference() {
        assert_eq!(
            reference("abc"),
            json!({"_type": "reference", "_ref": "abc"})
        );
    }
}
