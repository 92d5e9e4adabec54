//! ptblocks CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::convert::ConvertArgs;
use commands::seed::SeedArgs;

#[derive(Parser)]
#[command(name = "ptblocks")]
#[command(version)]
#[command(about = "Convert markdown to Portable Text and seed Sanity posts", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown text to Portable Text blocks
    Convert(ConvertArgs),

    /// Create bilingual posts from a manifest and link the translations
    Seed(SeedArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "ptblocks=debug,ptblocks_seed=debug"
    } else {
        "ptblocks=info,ptblocks_seed=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Seed(args) => commands::seed::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_only() {
        let cli = Cli::parse_from([
            "ptblocks", "-v", "seed", "posts.toml", "--dry-run", "--only", "a", "--only", "b",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Seed(args) => {
                assert!(args.dry_run);
                assert_eq!(args.only, ["a", "b"]);
            }
            Commands::Convert(_) => panic!("expected seed"),
        }
    }
}
