//! Error types for seeding.

use std::path::PathBuf;

use crate::seed::SeedReport;

/// Missing or invalid CMS configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: set {0}")]
    Missing(&'static str),
}

/// Problems loading a post manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Post `{slug}` ({locale}) needs exactly one of `body` or `body_file`")]
    BodySource { slug: String, locale: &'static str },

    #[error("Duplicate post slug `{0}`")]
    DuplicateSlug(String),

    #[error("No post with slug `{0}` in the manifest")]
    UnknownSlug(String),

    #[error("Manifest {0} lists no posts")]
    Empty(PathBuf),
}

/// Error type for seeding operations
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS rejected the request ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("CMS response for a create did not include a document id")]
    MissingDocumentId,

    #[error("No document with id `{0}`")]
    UnknownDocument(String),

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),

    /// A post failed; `completed` lists the posts seeded before it
    #[error("Seeding post `{slug}` failed: {source}")]
    Post {
        slug: String,
        #[source]
        source: Box<SeedError>,
        completed: SeedReport,
    },
}

pub type Result<T> = std::result::Result<T, SeedError>;
