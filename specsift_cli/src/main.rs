mod cli;
mod config;
mod errors;
mod processing;

use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

fn main() -> std::result::Result<(), errors::CliError> {
    // Initialize logging; the match table may claim stdout, so logs go to
    // stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments and merge them over the config file
    let args = Cli::parse();
    let config = Config::with_cli_args(args)?;
    info!("Parsed configuration: {:#?}", config);

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| errors::CliError::Config {
                source: format!("could not build the worker pool: {}", e),
            })?;
    }

    processing::run_screen(&config)
}
