//! # ptblocks-seed
//!
//! Seed a Sanity dataset with bilingual blog posts.
//!
//! Each post in a [`Manifest`] has an English and a Spanish version. For
//! every post the [`Seeder`] converts both markdown bodies to Portable Text,
//! creates one document per language and then patches each document with a
//! reference to the other.
//!
//! ```rust
//! use std::path::Path;
//! use ptblocks_seed::{Manifest, MemoryStore, Seeder};
//!
//! let manifest = Manifest::parse(
//!     r#"
//! [[post]]
//! slug = "hello"
//! [post.en]
//! title = "Hello"
//! body = "Hi **there**"
//! [post.es]
//! title = "Hola"
//! body = "Hola **amigo**"
//! "#,
//!     Path::new("posts.toml"),
//!     Path::new("."),
//! )
//! .unwrap();
//!
//! let mut seeder = Seeder::new(MemoryStore::new(), &manifest.document_type);
//! let report = seeder.seed_all(&manifest.posts).unwrap();
//! assert_eq!(report.seeded.len(), 1);
//! assert_eq!(seeder.store().len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod manifest;
pub mod seed;
pub mod store;

pub use config::SanityConfig;
pub use document::{reference, PostDocument, TRANSLATION_FIELD};
pub use error::{ConfigError, ManifestError, Result, SeedError};
pub use manifest::{Defaults, Locale, LocalizedPost, Manifest, Post};
pub use seed::{SeedReport, SeededPost, Seeder};
pub use store::{ContentStore, HttpStore, MemoryStore, Patch, PatchBuilder};
