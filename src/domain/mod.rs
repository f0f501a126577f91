//! Core settings and validation types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::redact::mask_secret;

/// Identity and routing settings loaded from the log analyzer config file.
///
/// Produced once by [`crate::initialize`] and handed to the rest of the
/// process by reference. Nothing mutates it after validation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub org_name: String,
    pub api_key: String,
    pub kafka_topic: String,
    pub log_analyzer_url: String,
}

impl Settings {
    /// Returns the value stored for `field`.
    pub fn get(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::AppName => &self.app_name,
            SettingsField::OrgName => &self.org_name,
            SettingsField::ApiKey => &self.api_key,
            SettingsField::KafkaTopic => &self.kafka_topic,
            SettingsField::LogAnalyzerUrl => &self.log_analyzer_url,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: String) {
        let slot = match field {
            SettingsField::AppName => &mut self.app_name,
            SettingsField::OrgName => &mut self.org_name,
            SettingsField::ApiKey => &mut self.api_key,
            SettingsField::KafkaTopic => &mut self.kafka_topic,
            SettingsField::LogAnalyzerUrl => &mut self.log_analyzer_url,
        };
        *slot = value;
    }

    /// First field (in [`SettingsField::ALL`] order) that is still empty.
    pub fn first_empty(&self) -> Option<SettingsField> {
        SettingsField::ALL.into_iter().find(|field| self.get(*field).is_empty())
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("org_name", &self.org_name)
            .field("api_key", &mask_secret(&self.api_key))
            .field("kafka_topic", &self.kafka_topic)
            .field("log_analyzer_url", &self.log_analyzer_url)
            .finish()
    }
}

/// Names a single [`Settings`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    LogAnalyzerUrl,
    AppName,
    OrgName,
    ApiKey,
    KafkaTopic,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::LogAnalyzerUrl,
        SettingsField::AppName,
        SettingsField::OrgName,
        SettingsField::ApiKey,
        SettingsField::KafkaTopic,
    ];

    /// Fields the remote authority echoes back, in comparison order.
    pub const IDENTITY: [SettingsField; 4] = [
        SettingsField::ApiKey,
        SettingsField::AppName,
        SettingsField::OrgName,
        SettingsField::KafkaTopic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingsField::LogAnalyzerUrl => "logAnalyzerUrl",
            SettingsField::AppName => "appName",
            SettingsField::OrgName => "orgName",
            SettingsField::ApiKey => "apiKey",
            SettingsField::KafkaTopic => "kafkaTopic",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body returned by the analyzer's API key endpoint.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResponse {
    pub organization_name: String,
    pub application_name: String,
    pub api_key: String,
    pub kafka_topic: String,
    pub elastic_index: String,
    pub active: bool,
}

impl ValidationResponse {
    /// The authoritative value for an identity field.
    ///
    /// Returns `None` for [`SettingsField::LogAnalyzerUrl`], which the
    /// analyzer does not echo back.
    pub fn get(&self, field: SettingsField) -> Option<&str> {
        match field {
            SettingsField::AppName => Some(&self.application_name),
            SettingsField::OrgName => Some(&self.organization_name),
            SettingsField::ApiKey => Some(&self.api_key),
            SettingsField::KafkaTopic => Some(&self.kafka_topic),
            SettingsField::LogAnalyzerUrl => None,
        }
    }
}

impl fmt::Debug for ValidationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResponse")
            .field("organization_name", &self.organization_name)
            .field("application_name", &self.application_name)
            .field("api_key", &mask_secret(&self.api_key))
            .field("kafka_topic", &self.kafka_topic)
            .field("elastic_index", &self.elastic_index)
            .field("active", &self.active)
            .finish()
    }
}

/// What to do with the `active` flag of a matching validation response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePolicy {
    /// Log the flag but accept inactive keys.
    #[default]
    Ignore,
    /// Reject keys the analyzer reports as inactive.
    Require,
}
