use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::info;

use hindsight::config::open_config;
use hindsight::logger::configure_logger;
use hindsight::site::SiteBuilder;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match open_config(args.config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run hindsight-site --help");
            std::process::exit(1);
        }
    };

    if let Err(err) = configure_logger(&config, args.verbose) {
        eprintln!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting site generation...");
    let count = SiteBuilder::new(&config).build()?;
    info!(
        "Site generation complete. {} letters rendered to {}",
        count,
        config.paths.output_dir.to_str().unwrap()
    );

    Ok(())
}
