mod app;
mod classifier;
mod cli;
mod config;
mod domain;
mod infrastructure;
mod intake;
mod render;
mod submission;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let config = config::load_config();
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    if config.classifier.base_url.is_none() {
        tracing::warn!(
            target: "app",
            "CLASSIFIER_API_URL is not set; submissions will fail until it is configured"
        );
    }

    app::run(config, cli).await
}
