mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{outline, render, repl, OutlineArgs, RenderArgs, ReplArgs};

/// Menukit CLI - inspect and drive menu documents from the terminal
#[derive(Parser, Debug)]
#[command(name = "menukit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the structural outline of a menu document
    Outline(OutlineArgs),

    /// Parse a document and print its normalized markup
    Render(RenderArgs),

    /// Drive an editor session over JSON lines on stdin/stdout
    Repl(ReplArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Outline(args) => outline(args),
        Command::Render(args) => render(args),
        Command::Repl(args) => repl(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
