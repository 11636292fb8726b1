use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use menukit_dom::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// HTML document (or bare fragment) to normalize
    pub input: PathBuf,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse and re-serialize a document: the output is exactly what the editor
/// would send in a sync message for this input.
pub fn render(args: RenderArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let html = Document::parse(&source).serialize();

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!("{} {}", "✓".green(), path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}
