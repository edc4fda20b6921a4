//! Command line and configuration file.
//!
//! Values come from the defaults, then the TOML file named by `--config`,
//! then individual command-line flags, later sources winning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_WIDTH: i32 = 40;
pub const MIN_HEIGHT: i32 = 10;

#[derive(Debug, Parser)]
#[command(name = "deanwaringdev")]
#[command(version, about = "The DeanWaringDev site in your terminal")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "DEANWARINGDEV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial screen width, used until the terminal reports its size
    #[arg(long)]
    pub width: Option<i32>,

    /// Initial screen height
    #[arg(long)]
    pub height: Option<i32>,

    /// Minimum width that shows the full navigation bar instead of the menu button
    #[arg(long)]
    pub breakpoint: Option<i32>,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `sitekit_ui=trace`
    #[arg(long, env = "DEANWARINGDEV_LOG")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("screen size {width}x{height} is below the minimum of {MIN_WIDTH}x{MIN_HEIGHT}")]
    TooSmall { width: i32, height: i32 },

    #[error("breakpoint must be at least 1, got {0}")]
    Breakpoint(i32),
}

/// Resolved settings of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub width: i32,
    pub height: i32,
    /// Screens at least this wide get the desktop navigation bar.
    pub breakpoint: i32,
    pub mouse: bool,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            breakpoint: 100,
            mouse: true,
            log_file: PathBuf::from("deanwaringdev.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Read a configuration file. Missing keys take their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Combine the defaults, the configuration file, and the flags.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(width) = cli.width {
            config.width = width;
        }
        if let Some(height) = cli.height {
            config.height = height;
        }
        if let Some(breakpoint) = cli.breakpoint {
            config.breakpoint = breakpoint;
        }
        if cli.no_mouse {
            config.mouse = false;
        }
        if let Some(log_file) = &cli.log_file {
            config.log_file = log_file.clone();
        }
        if let Some(filter) = &cli.log_filter {
            config.log_filter = filter.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.breakpoint < 1 {
            return Err(ConfigError::Breakpoint(self.breakpoint));
        }
        Ok(())
    }
}
