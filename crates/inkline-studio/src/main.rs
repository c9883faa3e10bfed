mod cli;
mod sketch;

use anyhow::{Context, Result};
use clap::Parser;
use inkline_engine::logging::{init_logging, LoggingConfig};
use inkline_engine::window::{Runtime, RuntimeConfig};

use cli::Cli;
use sketch::SketchApp;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(match &cli.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let config = cli.draw_config()?;
    log::info!(
        "drawing with widths {}..{} px, {} points per stroke",
        config.min_width,
        config.max_width,
        config.max_points
    );

    let app = SketchApp::new(config).context("invalid drawing configuration")?;

    Runtime::run(
        RuntimeConfig {
            title: "inkline sketch".to_string(),
            ..RuntimeConfig::default()
        },
        app,
    )
}
