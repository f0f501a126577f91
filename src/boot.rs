//! Startup sequence: load the config file, then validate the API key

use std::path::Path;

use crate::config::{load_settings, ClientOptions};
use crate::domain::Settings;
use crate::error::BootError;
use crate::validate::ApiKeyValidator;

/// Run the startup gate with `options`.
///
/// Returns `Ok(None)` when the config file does not exist; the host may
/// continue without log analyzer settings. Every other failure is an `Err`
/// the host must treat as fatal.
pub fn initialize(options: &ClientOptions) -> Result<Option<Settings>, BootError> {
    let validator = ApiKeyValidator::new(options.timeout(), options.active_policy)?;
    initialize_with(&options.config_path, &options.service_url, &validator)
}

/// [`initialize`] with an explicit path, fallback URL and validator.
pub fn initialize_with(
    config_path: &Path,
    fallback_url: &str,
    validator: &ApiKeyValidator,
) -> Result<Option<Settings>, BootError> {
    let Some(settings) = load_settings(config_path, fallback_url)? else {
        return Ok(None);
    };

    let response = validator.validate(&settings)?;
    tracing::debug!(
        "Analyzer identity: index={}, active={}, policy={:?}",
        response.elastic_index,
        response.active,
        validator.policy()
    );

    tracing::info!(
        "Log analyzer client ready: app={}, org={}, topic={}",
        settings.app_name,
        settings.org_name,
        settings.kafka_topic
    );
    Ok(Some(settings))
}
