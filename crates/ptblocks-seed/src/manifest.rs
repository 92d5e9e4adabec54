//! Post manifest: the list of bilingual posts to seed.
//!
//! A manifest is a TOML file with optional `[defaults]` and one `[[post]]`
//! table per post. Each post has an `en` and an `es` table carrying the
//! localized title, optional slug and excerpt, and the body given inline
//! (`body`) or as a path relative to the manifest (`body_file`).

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// Language of one half of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default, rename = "post")]
    posts: Vec<RawPost>,
}

/// Values applied to every post that does not set its own
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub document_type: String,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            document_type: "post".to_string(),
            author: None,
            category: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPost {
    slug: String,
    published_at: Option<String>,
    category: Option<String>,
    author: Option<String>,
    en: RawLocalized,
    es: RawLocalized,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLocalized {
    title: String,
    slug: Option<String>,
    excerpt: Option<String>,
    body: Option<String>,
    body_file: Option<PathBuf>,
}

/// A loaded manifest with every body resolved to text
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub document_type: String,
    pub posts: Vec<Post>,
}

/// One post in both languages
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub published_at: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub en: LocalizedPost,
    pub es: LocalizedPost,
}

impl Post {
    pub fn localized(&self, locale: Locale) -> &LocalizedPost {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

/// One language version of a post
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedPost {
    pub locale: Locale,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
}

impl Manifest {
    /// Read and resolve a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&source, path, base_dir)
    }

    /// Parse manifest text. `body_file` paths resolve against `base_dir`.
    pub fn parse(source: &str, path: &Path, base_dir: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(source).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.posts.is_empty() {
            return Err(ManifestError::Empty(path.to_path_buf()));
        }

        let mut seen = HashSet::new();
        let mut posts = Vec::with_capacity(raw.posts.len());

        for post in raw.posts {
            if !seen.insert(post.slug.clone()) {
                return Err(ManifestError::DuplicateSlug(post.slug));
            }

            let en = resolve(post.en, Locale::En, &post.slug, base_dir)?;
            let es = resolve(post.es, Locale::Es, &post.slug, base_dir)?;

            posts.push(Post {
                category: post.category.or_else(|| raw.defaults.category.clone()),
                author: post.author.or_else(|| raw.defaults.author.clone()),
                published_at: post.published_at,
                slug: post.slug,
                en,
                es,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            document_type: raw.defaults.document_type,
            posts,
        })
    }

    /// Posts whose slug is listed in `only`, in manifest order. An empty
    /// `only` selects every post.
    pub fn select(&self, only: &[String]) -> Result<Vec<&Post>, ManifestError> {
        if let Some(unknown) = only
            .iter()
            .find(|slug| !self.posts.iter().any(|post| &post.slug == *slug))
        {
            return Err(ManifestError::UnknownSlug(unknown.clone()));
        }
        Ok(self
            .posts
            .iter()
            .filter(|post| only.is_empty() || only.contains(&post.slug))
            .collect())
    }
}

fn resolve(
    raw: RawLocalized,
    locale: Locale,
    slug: &str,
    base_dir: &Path,
) -> Result<LocalizedPost, ManifestError> {
    let body = match (raw.body, raw.body_file) {
        (Some(body), None) => body,
        (None, Some(file)) => {
            let path = base_dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|source| ManifestError::Read { path, source })?
        }
        _ => {
            return Err(ManifestError::BodySource {
                slug: slug.to_string(),
                locale: locale.code(),
            })
        }
    };

    let slug = raw.slug.unwrap_or_else(|| match locale {
        Locale::En => slug.to_string(),
        Locale::Es => format!("{slug}-es"),
    });

    Ok(LocalizedPost {
        locale,
        title: raw.title,
        slug,
        excerpt: raw.excerpt,
        body,
    })
}
