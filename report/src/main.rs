//! FILENAME: report/src/main.rs
//! `pivot-report`: builds a report page from persisted API responses and
//! prints it as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use report::logging::init_logger;
use report::{build_page, log_error, log_info, DataSource, FileSource, ReportConfig, Result};

/// Build report tables from API responses
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report configuration (JSON). Built-in presets are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data source as name=preset:path (repeatable)
    #[arg(short, long = "source", value_name = "NAME=PRESET:PATH", required = true)]
    sources: Vec<FileSource>,

    /// Pretty-print the page JSON
    #[arg(long)]
    pretty: bool,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Returns whether every table was built.
fn run(cli: &Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => {
            log_info!("CLI", "loading config {}", path.display());
            ReportConfig::load(path)?
        }
        None => ReportConfig::default(),
    };

    let sources: Vec<Box<dyn DataSource>> = cli
        .sources
        .iter()
        .cloned()
        .map(|source| Box::new(source) as Box<dyn DataSource>)
        .collect();

    let page = build_page(&sources, &config);
    for (name, error) in page.failures() {
        log_error!("CLI", "{}: {}", name, error);
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&page)?
    } else {
        serde_json::to_string(&page)?
    };
    println!("{}", json);

    Ok(page.is_complete())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log_error!("CLI", "{}", e);
            ExitCode::FAILURE
        }
    }
}
