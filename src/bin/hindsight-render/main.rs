use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;
use spdlog::info;

use hindsight::config::open_config;
use hindsight::logger::configure_logger;
use hindsight::report::render_report;

/// Converts a local markdown letter into an HTML report without making any
/// API calls. Useful to check template or formatting changes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the input markdown file
    input: PathBuf,

    /// Path to the output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Subreddit name for the title
    #[arg(short, long)]
    subreddit: Option<String>,

    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match open_config(args.config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run hindsight-render --help");
            std::process::exit(1);
        }
    };

    if let Err(err) = configure_logger(&config, false) {
        eprintln!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    if !args.input.exists() {
        bail!("Input file '{}' not found", args.input.to_str().unwrap());
    }
    let content = fs::read_to_string(&args.input)?;

    let subreddit = args
        .subreddit
        .unwrap_or_else(|| config.reddit.subreddit.clone());

    info!("Rendering report for r/{}...", subreddit);
    let html = render_report(&content, &subreddit, &config.paths.template_dir)?;

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "summary_{}.html",
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    fs::write(&output, html)?;
    info!("HTML report saved to {}", output.to_str().unwrap());

    Ok(())
}
