use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use marquee::core::config::{self, CliOverrides};
use marquee::tui;

#[derive(Parser)]
#[command(name = "marquee", about = "Browse TMDB movies from the terminal")]
struct Args {
    /// Initial search query (overrides config and MARQUEE_QUERY)
    #[arg(short, long)]
    query: Option<String>,

    /// TMDB response language, e.g. "en-US"
    #[arg(short, long)]
    language: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "marquee.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("warning: {e}; using defaults");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            query: args.query.as_deref(),
            language: args.language.as_deref(),
        },
    );

    log::info!(
        "Marquee starting up (initial query {:?}, base url {})",
        resolved.initial_query,
        resolved.tmdb_base_url
    );

    if let Err(e) = tui::run(resolved) {
        log::error!("Exiting with error: {}", e);
        eprintln!("marquee: {e}");
        std::process::exit(1);
    }
    Ok(())
}
