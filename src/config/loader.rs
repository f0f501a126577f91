//! Config file loading

use std::fs;
use std::path::Path;

use crate::config::keys::extract_settings;
use crate::config::properties::parse_properties;
use crate::config::xml::PropertyTable;
use crate::config::ConfigFormat;
use crate::domain::Settings;
use crate::error::BootError;
use crate::utils::encoding::decode_config_bytes;

/// Load [`Settings`] from `config_path`.
///
/// - Missing file: warns and returns `Ok(None)`; the host carries on
///   without log analyzer settings.
/// - Unrecognised extension: logs an error and returns settings holding
///   only `fallback_url`, which validation will then reject.
/// - Unreadable or malformed file: `Err`, startup must stop.
///
/// `log_analyzer_url` falls back to `fallback_url` unless the file sets it.
pub fn load_settings(config_path: &Path, fallback_url: &str) -> Result<Option<Settings>, BootError> {
    if !config_path.exists() {
        tracing::warn!("Log config file not found at: {}. Skipping.", config_path.display());
        return Ok(None);
    }

    let mut settings = match ConfigFormat::from_path(config_path) {
        Some(format) => parse_config_file(config_path, format)?,
        None => {
            tracing::error!("Unsupported log configuration format: {}", config_path.display());
            Settings::default()
        }
    };

    if settings.log_analyzer_url.is_empty() {
        settings.log_analyzer_url = fallback_url.to_string();
    }

    tracing::info!(
        "Log analyzer config loaded: app={}, org={}, topic={}",
        settings.app_name,
        settings.org_name,
        settings.kafka_topic
    );
    Ok(Some(settings))
}

fn parse_config_file(path: &Path, format: ConfigFormat) -> Result<Settings, BootError> {
    let bytes =
        fs::read(path).map_err(|source| BootError::Io { path: path.to_path_buf(), source })?;
    let content = decode_config_bytes(&bytes);

    match format {
        ConfigFormat::Properties => {
            let props = parse_properties(&content)
                .map_err(|source| BootError::Properties { path: path.to_path_buf(), source })?;
            tracing::debug!("Parsed {} properties from {}", props.len(), path.display());
            Ok(extract_settings(format, |key| props.get(key).cloned()))
        }
        ConfigFormat::Xml => {
            let table = PropertyTable::parse(&content)
                .map_err(|source| BootError::Xml { path: path.to_path_buf(), source })?;
            if table.is_empty() {
                tracing::warn!("No Property elements found in {}", path.display());
            } else {
                tracing::debug!("Found {} Property elements in {}", table.len(), path.display());
            }
            Ok(extract_settings(format, |key| table.get(key)))
        }
    }
}
