use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use deepquill::config::Config;
use deepquill::document::node::Value;
use deepquill::file::loader::{load_file, load_file_as, load_stdin, Format};
use deepquill::search::{search, Kind};

/// DeepQuill - deep structural search for nested data
#[derive(Parser)]
#[command(name = "deepquill")]
#[command(version)]
#[command(about = "Search nested data structurally, reporting matches as paths", long_about = None)]
struct Cli {
    /// Text to search for (matches keys and values by containment)
    target: String,

    /// Document to search: JSON, JSONL or YAML, optionally gzipped.
    /// Use '-' or omit to read from stdin
    file: Option<String>,

    /// Report the values found at matched paths, not just the paths
    #[arg(short, long)]
    verbose: bool,

    /// Path to skip, subtree and all (repeatable), e.g. "root['password']"
    #[arg(long = "exclude-path", value_name = "PATH")]
    exclude_paths: Vec<String>,

    /// Kind to skip wherever it occurs (repeatable): null, bool, number,
    /// text, list, set, map, record or object
    #[arg(long = "exclude-kind", value_name = "KIND")]
    exclude_kinds: Vec<String>,

    /// Input format, overriding filename detection: json, jsonl or yaml
    #[arg(short, long)]
    format: Option<String>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    // Log to stderr so stdout stays clean for the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load()?;

    // Config supplies the baseline; command-line flags add to it
    let mut options = config.search_options();
    if cli.verbose {
        options.verbose_level = 2;
    }
    for path in &cli.exclude_paths {
        options.exclude_paths.insert(path.clone());
    }
    for label in &cli.exclude_kinds {
        options.exclude_kinds.insert(label.parse::<Kind>()?);
    }

    let format: Option<Format> = cli.format.as_deref().map(str::parse).transpose()?;
    let value = match cli.file.as_deref() {
        Some("-") => load_stdin(format)?,
        Some(path) => match format {
            Some(explicit) => load_file_as(path, explicit)?,
            None => load_file(path)?,
        },
        None => {
            if io::stdin().is_terminal() {
                anyhow::bail!("No input: provide a file or pipe a document to stdin");
            }
            load_stdin(format)?
        }
    };

    let target = Value::from(cli.target.as_str());
    let report = search(&value, &target, &options)?;

    let rendered = if config.pretty && !cli.compact {
        report.render()?
    } else {
        serde_json::to_string(&report.to_json())?
    };
    println!("{}", rendered);

    // grep convention: 0 when something matched, 1 when nothing did
    Ok(if report.has_matches() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
