use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use menukit_dom::{Document, OutlineConfig, OutlineNode};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// HTML document to outline
    pub input: PathBuf,

    /// Maximum outline depth
    #[arg(long, default_value = "6")]
    pub depth: usize,

    /// Emit the outline as JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

pub fn outline(args: OutlineArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;
    let document = Document::parse(&source);

    let config = OutlineConfig {
        max_depth: args.depth,
        ..OutlineConfig::default()
    };
    let nodes = menukit_dom::build_outline(&document, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    if nodes.is_empty() {
        println!("{}", "(empty document)".yellow());
        return Ok(());
    }
    for node in &nodes {
        print_node(node);
    }
    Ok(())
}

fn print_node(node: &OutlineNode) {
    let indent = "  ".repeat(node.depth);
    let text = if node.text.is_empty() {
        String::new()
    } else {
        format!(" {}", node.text.dimmed())
    };
    let path: Vec<String> = node.path.indices().iter().map(usize::to_string).collect();
    println!(
        "{}{}{} {}",
        indent,
        node.label.bold(),
        text,
        format!("[{}]", path.join(".")).cyan()
    );
    for child in &node.children {
        print_node(child);
    }
}
