//! Show command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::utils::OptionArgs;
use log_analyzer_client::redact::{describe_secret, mask_secret};
use log_analyzer_client::utils::hashing::key_fingerprint;
use log_analyzer_client::{load_settings, ConfigFormat, Settings, SettingsField};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Settings as printed; the API key only ever appears masked.
#[derive(Serialize)]
struct SettingsView<'a> {
    config_path: String,
    format: Option<&'static str>,
    app_name: &'a str,
    org_name: &'a str,
    api_key: String,
    api_key_fingerprint: String,
    kafka_topic: &'a str,
    log_analyzer_url: &'a str,
    missing: Vec<&'static str>,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let options = args.options.resolve(None, false)?;
    let Some(settings) = load_settings(&options.config_path, &options.service_url)? else {
        println!("No log analyzer config at {}", options.config_path.display());
        return Ok(());
    };

    let format = ConfigFormat::from_path(&options.config_path).map(|f| match f {
        ConfigFormat::Properties => "properties",
        ConfigFormat::Xml => "xml",
    });

    match args.format {
        OutputFormat::Json => {
            let view = SettingsView {
                config_path: options.config_path.display().to_string(),
                format,
                app_name: &settings.app_name,
                org_name: &settings.org_name,
                api_key: mask_secret(&settings.api_key),
                api_key_fingerprint: key_fingerprint(&settings.api_key),
                kafka_topic: &settings.kafka_topic,
                log_analyzer_url: &settings.log_analyzer_url,
                missing: missing_fields(&settings),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => {
            println!(
                "Config: {} ({})",
                options.config_path.display(),
                format.unwrap_or("unsupported")
            );
            println!("  Application: {}", settings.app_name);
            println!("  Organization: {}", settings.org_name);
            println!("  API key: {}", describe_secret(&settings.api_key));
            println!("  Kafka topic: {}", settings.kafka_topic);
            println!("  Analyzer URL: {}", settings.log_analyzer_url);
            let missing = missing_fields(&settings);
            if !missing.is_empty() {
                println!("  Missing: {}", missing.join(", "));
            }
        }
    }

    Ok(())
}

fn missing_fields(settings: &Settings) -> Vec<&'static str> {
    SettingsField::ALL
        .into_iter()
        .filter(|field| settings.get(*field).is_empty())
        .map(|field| field.as_str())
        .collect()
}
