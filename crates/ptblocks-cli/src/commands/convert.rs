//! `ptblocks convert`

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ptblocks::{BlockConverter, SequentialKeys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Portable Text JSON
    PortableText,
    /// Markdown rendered back from the blocks
    Markdown,
    /// Plain text, one block per paragraph
    Text,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input file ('-' or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::PortableText)]
    pub format: Format,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Use sequential keys (k0, k1, ...) instead of random ones
    #[arg(long)]
    pub stable_keys: bool,

    /// Treat `1. item` lines as numbered list items
    #[arg(long)]
    pub numbered_lists: bool,
}

pub fn execute(args: ConvertArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let output = render(&text, &args)?;
    println!("{output}");
    Ok(())
}

fn read_input(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn render(text: &str, args: &ConvertArgs) -> Result<String> {
    let mut converter = BlockConverter::new();
    if args.numbered_lists {
        converter.use_plugin(ptblocks::numbered_lists);
    }

    let document = if args.stable_keys {
        converter.convert_with_keys(text, &mut SequentialKeys::default())
    } else {
        converter.convert(text)
    };

    Ok(match args.format {
        Format::PortableText => ptblocks_core::to_json_string(&document, !args.compact)
            .context("Failed to serialize blocks")?,
        Format::Markdown => ptblocks_core::serialize(&document, converter.options()),
        Format::Text => ptblocks_core::to_plain_text(&document),
    })
}
