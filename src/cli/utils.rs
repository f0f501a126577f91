//! Shared CLI arguments.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use log_analyzer_client::{ClientOptions, OptionOverrides};

/// Where to find the log analyzer config and service.
#[derive(Args, Debug)]
pub struct OptionArgs {
    /// Log analyzer config file (.properties or .xml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Validation endpoint used when the config file does not set one
    #[arg(short = 'u', long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Client options file (.toml, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,
}

impl OptionArgs {
    /// Load options from the working directory and environment, then apply
    /// these flags on top.
    pub fn resolve(
        &self,
        timeout_secs: Option<u64>,
        require_active: bool,
    ) -> Result<ClientOptions> {
        let cwd = std::env::current_dir().context("Failed reading current directory")?;
        let options = ClientOptions::load(&cwd, self.options.as_deref())?;
        let options = options.with_overrides(OptionOverrides {
            config_path: self.config.clone(),
            service_url: self.service_url.clone(),
            timeout_secs,
            require_active,
        })?;
        tracing::debug!("Client options: {:?}", options);
        Ok(options)
    }
}
