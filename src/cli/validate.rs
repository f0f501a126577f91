//! Validate command implementation

use anyhow::Result;
use clap::Args;

use super::utils::OptionArgs;
use log_analyzer_client::initialize;
use log_analyzer_client::redact::describe_secret;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Request timeout for the validation call (seconds)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Reject API keys the analyzer reports as inactive
    #[arg(long)]
    pub require_active: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let options = args.options.resolve(args.timeout, args.require_active)?;

    let settings = match initialize(&options) {
        Ok(Some(settings)) => settings,
        Ok(None) => return Ok(()),
        Err(err) => {
            tracing::error!(
                "Log analyzer startup check failed ({:?}). Shutting down application.",
                err.kind()
            );
            return Err(err.into());
        }
    };

    println!(
        "API key valid: app={} org={} topic={} key={}",
        settings.app_name,
        settings.org_name,
        settings.kafka_topic,
        describe_secret(&settings.api_key)
    );
    Ok(())
}
