use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use wordmatch::{FormRecord, MatchConfig, MatchMap, pattern_match, presets};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transcribed text to match; read from stdin when absent
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// JSON file with the pattern tree and forms (built-in forms otherwise)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also route the matches to a form and print its row
    #[arg(short = 'r', long)]
    route: bool,

    /// Pretty-print the JSON output
    #[arg(short = 'p', long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    text: &'a str,
    matches: Option<&'a MatchMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Option<FormRecord>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MatchConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => presets::default_config(),
    };
    let pattern = config.build_pattern().context("building pattern tree")?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            text
        }
    };

    let matches = pattern_match(&pattern, &text);

    let record = args.route.then(|| {
        let matches = matches.as_ref()?;
        config
            .forms
            .record(matches, &chrono::Local::now())
            .inspect_err(|err| warn!("not routed: {err}"))
            .ok()
    });

    let output = Output {
        text: text.trim(),
        matches: matches.as_ref(),
        record,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
