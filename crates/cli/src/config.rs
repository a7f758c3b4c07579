//! Configuration management for the CLI
//!
//! Defaults come from an optional JSON file and `RIGHTSIZE_*` environment
//! variables. Command-line flags override both.

use anyhow::{Context, Result};
use clap::ValueEnum;
use rightsize_lib::suggest::DEFAULT_BUFFER_PERCENT;
use rightsize_lib::{validate_buffer_percent, ScanSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Values read from the config file and environment
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Default buffer percentage for limits
    pub buffer_percent: Option<i64>,
    /// Default namespace
    pub namespace: Option<String>,
    /// Default output format
    pub format: Option<String>,
    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

/// Values given on the command line; None means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub buffer_percent: Option<i64>,
    pub namespace: Option<String>,
    pub format: Option<OutputFormat>,
    pub inplace_update: bool,
}

/// Fully merged options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub scan: ScanSettings,
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration from `path` (if it exists) and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Json)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("RIGHTSIZE").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("kube-rightsize")
            .join("config.json"))
    }

    /// Merge command-line overrides on top of this configuration
    pub fn merge(&self, overrides: Overrides) -> Result<RunOptions> {
        let buffer_percent = overrides
            .buffer_percent
            .or(self.buffer_percent)
            .unwrap_or(DEFAULT_BUFFER_PERCENT);
        let buffer_percent = validate_buffer_percent(buffer_percent)
            .context("--buffer-percent must be between 0 and 100")?;

        let format = match (overrides.format, self.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format '{}': {}", name, e))?,
            (None, None) => OutputFormat::default(),
        };

        Ok(RunOptions {
            scan: ScanSettings {
                namespace: overrides.namespace.or_else(|| self.namespace.clone()),
                buffer_percent,
                inplace_update: overrides.inplace_update,
            },
            format,
        })
    }
}
