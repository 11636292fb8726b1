use anyhow::{Context, Result};
use clap::Args;
use menukit_bridge::MessageChannel;
use menukit_dom::Document;
use menukit_editor::{BlockLayout, EditorRuntime, Viewport};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReplArgs {
    /// Document to load into the session (empty page when omitted)
    pub input: Option<PathBuf>,

    /// Milliseconds of editor time advanced after each message, so
    /// debounced reports fire between lines
    #[arg(long, default_value = "50")]
    pub tick: u64,

    /// Layout page width in px
    #[arg(long, default_value = "794")]
    pub page_width: f64,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "800x600")]
    pub viewport: String,
}

/// One host message per stdin line, one editor message per stdout line.
/// The protocol is the same JSON the embedder speaks; this exists for
/// scripting and for poking at sessions by hand.
pub fn repl(args: ReplArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        None => String::new(),
    };
    let (width, height) = parse_viewport(&args.viewport)?;

    let runtime = EditorRuntime::new(
        Document::parse(&source),
        BlockLayout::new(args.page_width),
        Viewport::new(width, height),
    );
    let mut channel = MessageChannel::new(runtime);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    // Flush the initial height report before the first message.
    for message in channel.tick(args.tick) {
        writeln!(stdout, "{}", serde_json::to_string(&message)?)?;
    }

    for line in stdin.lock().lines() {
        let line = line.context("Cannot read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(raw) => channel.post(raw),
            Err(error) => {
                eprintln!("invalid json: {error}");
                continue;
            }
        }
        let mut responses = channel.pump();
        responses.extend(channel.tick(args.tick));
        for message in responses {
            writeln!(stdout, "{}", serde_json::to_string(&message)?)?;
        }
        stdout.flush()?;
    }
    Ok(())
}

fn parse_viewport(value: &str) -> Result<(f64, f64)> {
    let (w, h) = value
        .split_once('x')
        .with_context(|| format!("Invalid viewport: {value}. Use WIDTHxHEIGHT"))?;
    Ok((
        w.parse().with_context(|| format!("Invalid width: {w}"))?,
        h.parse().with_context(|| format!("Invalid height: {h}"))?,
    ))
}
