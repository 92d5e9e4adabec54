//! `ptblocks seed`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ptblocks::BlockConverter;
use ptblocks_seed::{
    ContentStore, HttpStore, Manifest, MemoryStore, SanityConfig, SeedError, SeedReport,
    Seeder,
};
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Post manifest (TOML)
    pub manifest: PathBuf,

    /// Convert and build documents without contacting the CMS
    #[arg(long)]
    pub dry_run: bool,

    /// Seed only the post with this slug (repeatable)
    #[arg(long = "only", value_name = "SLUG")]
    pub only: Vec<String>,

    /// Treat `1. item` lines in post bodies as numbered list items
    #[arg(long)]
    pub numbered_lists: bool,
}

pub fn execute(args: SeedArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let posts = manifest.select(&args.only)?;
    info!(
        manifest = %manifest.path.display(),
        posts = posts.len(),
        dry_run = args.dry_run,
        "seeding"
    );

    if args.dry_run {
        let mut seeder = build_seeder(MemoryStore::new(), &manifest.document_type, &args);
        let result = seeder.seed_all(posts);
        for (id, document) in seeder.store().documents() {
            debug!(%id, document = %document, "dry run document");
        }
        finish(result, true)
    } else {
        let config = SanityConfig::from_env();
        debug!(?config, "loaded CMS configuration");
        let store = HttpStore::new(&config).context("Cannot write to the CMS")?;
        let result = build_seeder(store, &manifest.document_type, &args).seed_all(posts);
        finish(result, false)
    }
}

fn build_seeder<S: ContentStore>(store: S, document_type: &str, args: &SeedArgs) -> Seeder<S> {
    let mut converter = BlockConverter::new();
    if args.numbered_lists {
        converter.use_plugin(ptblocks::numbered_lists);
    }
    Seeder::new(store, document_type).with_converter(converter)
}

/// Print what was seeded, including the posts completed before a failure
fn finish(result: ptblocks_seed::Result<SeedReport>, dry_run: bool) -> Result<()> {
    match result {
        Ok(report) => {
            print_summary(&report, dry_run);
            Ok(())
        }
        Err(err) => {
            if let SeedError::Post { completed, .. } = &err {
                print_summary(completed, dry_run);
            }
            Err(err.into())
        }
    }
}

fn summary(report: &SeedReport, dry_run: bool) -> String {
    let verb = if dry_run { "Would seed" } else { "Seeded" };
    let mut out = format!("{verb} {} post(s)", report.seeded.len());
    for post in &report.seeded {
        out.push_str(&format!("\n  {}  en={}  es={}", post.slug, post.en_id, post.es_id));
    }
    out
}

fn print_summary(report: &SeedReport, dry_run: bool) {
    println!("{}", summary(report, dry_run));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptblocks_seed::SeededPost;

    const MANIFEST: &str = r#"
[[post]]
slug = "hello"

[post.en]
title = "Hello"
body = "Hi **there**"

[post.es]
title = "Hola"
body = "Hola **amigo**"
"#;

    fn write_manifest(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("posts.toml");
        std::fs::write(&path, MANIFEST).unwrap();
        path
    }

    fn args(manifest: PathBuf) -> SeedArgs {
        SeedArgs {
            manifest,
            dry_run: true,
            only: Vec::new(),
            numbered_lists: false,
        }
    }

    #[test]
    fn test_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        execute(args(write_manifest(dir.path()))).unwrap();
    }

    #[test]
    fn test_unknown_only_slug() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(write_manifest(dir.path()));
        args.only = vec!["missing".to_string()];
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_seeder_with_numbered_lists() {
        let manifest = Manifest::parse(
            &MANIFEST.replace("Hi **there**", "1. one\\n2. two"),
            std::path::Path::new("posts.toml"),
            std::path::Path::new("."),
        )
        .unwrap();
        let mut args = args(PathBuf::from("posts.toml"));
        args.numbered_lists = true;

        let mut seeder = build_seeder(MemoryStore::new(), "post", &args);
        let report = seeder.seed_all(&manifest.posts).unwrap();
        let en = seeder.store().get(&report.seeded[0].en_id).unwrap();
        assert_eq!(en["body"][0]["listItem"], "number");
        assert_eq!(en["body"][1]["children"][0]["text"], "two");
    }

    #[test]
    fn test_summary_lists_ids() {
        let report = SeedReport {
            seeded: vec![SeededPost {
                slug: "hello".to_string(),
                en_id: "a1".to_string(),
                es_id: "b2".to_string(),
            }],
        };
        assert_eq!(summary(&report, false), "Seeded 1 post(s)\n  hello  en=a1  es=b2");
        assert!(summary(&report, true).starts_with("Would seed 1 post(s)"));
    }

    #[test]
    fn test_finish_keeps_error_after_partial_run() {
        let err = SeedError::Post {
            slug: "second".to_string(),
            source: Box::new(SeedError::MissingDocumentId),
            completed: SeedReport::default(),
        };
        let err = finish(Err(err), false).unwrap_err();
        assert!(err.to_string().contains("second"));
    }
}
