//! Seeding flow: convert both bodies, create both documents, link them.
//!
//! Steps run one after the other with no retry and no rollback. A failure
//! after the English document exists leaves it in the CMS unlinked; the run
//! logs the orphaned id and stops.

use ptblocks::BlockConverter;
use tracing::{info, warn};

use crate::document::{reference, PostDocument, TRANSLATION_FIELD};
use crate::error::{Result, SeedError};
use crate::manifest::{LocalizedPost, Post};
use crate::store::ContentStore;

/// Ids of the two documents created for one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededPost {
    pub slug: String,
    pub en_id: String,
    pub es_id: String,
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<SeededPost>,
}

pub struct Seeder<S: ContentStore> {
    store: S,
    converter: BlockConverter,
    document_type: String,
}

impl<S: ContentStore> Seeder<S> {
    pub fn new(store: S, document_type: impl Into<String>) -> Self {
        Self {
            store,
            converter: BlockConverter::new(),
            document_type: document_type.into(),
        }
    }

    /// Replace the converter used for post bodies
    pub fn with_converter(mut self, converter: BlockConverter) -> Self {
        self.converter = converter;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seed one post: English document, Spanish document, then the two
    /// cross-reference patches.
    pub fn seed_post(&mut self, post: &Post) -> Result<SeededPost> {
        let en_id = self.create(post, &post.en)?;

        let es_id = match self.create(post, &post.es) {
            Ok(id) => id,
            Err(err) => {
                warn!(slug = %post.slug, id = %en_id, "English document left without translation");
                return Err(err);
            }
        };

        if let Err(err) = self.link(&en_id, &es_id).and_then(|_| self.link(&es_id, &en_id)) {
            warn!(
                slug = %post.slug,
                en_id = %en_id,
                es_id = %es_id,
                "documents created but not fully linked"
            );
            return Err(err);
        }

        info!(slug = %post.slug, en_id = %en_id, es_id = %es_id, "linked translations");
        Ok(SeededPost {
            slug: post.slug.clone(),
            en_id,
            es_id,
        })
    }

    /// Seed posts in order, stopping at the first failure. The error carries
    /// the report of the posts seeded before it.
    pub fn seed_all<'p, I>(&mut self, posts: I) -> Result<SeedReport>
    where
        I: IntoIterator<Item = &'p Post>,
    {
        let mut report = SeedReport::default();
        for post in posts {
            match self.seed_post(post) {
                Ok(seeded) => report.seeded.push(seeded),
                Err(source) => {
                    return Err(SeedError::Post {
                        slug: post.slug.clone(),
                        source: Box::new(source),
                        completed: report,
                    })
                }
            }
        }
        Ok(report)
    }

    fn create(&mut self, post: &Post, localized: &LocalizedPost) -> Result<String> {
        let body = self.converter.convert(&localized.body);
        let document =
            PostDocument::new(&self.document_type, post, localized, &body).to_value()?;
        let id = self.store.create(document)?;
        info!(
            slug = %localized.slug,
            language = %localized.locale,
            blocks = body.len(),
            id = %id,
            "created document"
        );
        Ok(id)
    }

    fn link(&mut self, id: &str, translation_id: &str) -> Result<()> {
        self.store
            .patch(id)
            .set(TRANSLATION_FIELD, reference(translation_id))
            .commit()
    }
}
