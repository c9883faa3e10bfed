use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inkline_engine::draw::DrawConfig;

/// Freehand sketch pad.
///
/// Keys: 0-4 pick white, black, red, green, yellow; Esc, Delete or C clears;
/// Q quits.
#[derive(Debug, Parser)]
#[command(name = "inkline-studio", version)]
pub struct Cli {
    /// TOML file with drawing settings (widths, point cap, speed scale, ...).
    #[arg(short, long, env = "INKLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore mouse input.
    #[arg(long)]
    pub no_mouse: bool,

    /// Ignore touch input.
    #[arg(long)]
    pub no_touch: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn draw_config(&self) -> Result<DrawConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                toml::from_str::<DrawConfig>(&text).with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => DrawConfig::default(),
        };

        if self.no_mouse {
            config.mouse_input_enabled = false;
        }
        if self.no_touch {
            config.touch_input_enabled = false;
        }
        Ok(config)
    }
}
