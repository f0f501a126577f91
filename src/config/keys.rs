//! Key tables mapping config file keys to settings fields
//!
//! One table per format. Each field lists the keys it accepts, highest
//! priority first; the first key present in the file wins.

use crate::config::ConfigFormat;
use crate::domain::{Settings, SettingsField};

pub struct KeyMapping {
    pub field: SettingsField,
    pub keys: &'static [&'static str],
}

pub const PROPERTIES_KEYS: &[KeyMapping] = &[
    KeyMapping { field: SettingsField::LogAnalyzerUrl, keys: &["log.analyzer.api.url"] },
    KeyMapping { field: SettingsField::AppName, keys: &["appName", "application.name"] },
    KeyMapping { field: SettingsField::OrgName, keys: &["orgName", "organization.name"] },
    KeyMapping { field: SettingsField::ApiKey, keys: &["apiKey"] },
    KeyMapping { field: SettingsField::KafkaTopic, keys: &["topic", "kafka.topic"] },
];

pub const XML_KEYS: &[KeyMapping] = &[
    KeyMapping { field: SettingsField::LogAnalyzerUrl, keys: &["log.analyzer.api.url"] },
    KeyMapping { field: SettingsField::AppName, keys: &["application.name"] },
    KeyMapping { field: SettingsField::OrgName, keys: &["organization.name"] },
    KeyMapping { field: SettingsField::ApiKey, keys: &["apiKey"] },
    KeyMapping { field: SettingsField::KafkaTopic, keys: &["default.kafka.topic", "kafka.topic"] },
];

pub fn key_table(format: ConfigFormat) -> &'static [KeyMapping] {
    match format {
        ConfigFormat::Properties => PROPERTIES_KEYS,
        ConfigFormat::Xml => XML_KEYS,
    }
}

/// Build [`Settings`] from a key lookup. Fields with no key present stay
/// empty.
pub fn extract_settings<F>(format: ConfigFormat, mut lookup: F) -> Settings
where
    F: FnMut(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    for mapping in key_table(format) {
        if let Some(value) = mapping.keys.iter().find_map(|key| lookup(key)) {
            settings.set(mapping.field, value);
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl FnMut(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn every_field_has_keys_in_both_tables() {
        for format in [ConfigFormat::Properties, ConfigFormat::Xml] {
            for field in SettingsField::ALL {
                assert!(
                    key_table(format).iter().any(|m| m.field == field && !m.keys.is_empty()),
                    "{format:?} has no key for {field}"
                );
            }
        }
    }

    #[test]
    fn short_properties_keys() {
        let map = HashMap::from([
            ("appName", "billing"),
            ("orgName", "acme"),
            ("apiKey", "XYZ"),
            ("topic", "logs.billing"),
        ]);
        let settings = extract_settings(ConfigFormat::Properties, lookup_in(&map));
        assert_eq!(settings.app_name, "billing");
        assert_eq!(settings.org_name, "acme");
        assert_eq!(settings.api_key, "XYZ");
        assert_eq!(settings.kafka_topic, "logs.billing");
        assert_eq!(settings.log_analyzer_url, "");
    }

    #[test]
    fn dotted_properties_keys() {
        let map = HashMap::from([
            ("application.name", "billing"),
            ("organization.name", "acme"),
            ("kafka.topic", "logs.billing"),
            ("log.analyzer.api.url", "http://analyzer/validate"),
        ]);
        let settings = extract_settings(ConfigFormat::Properties, lookup_in(&map));
        assert_eq!(settings.app_name, "billing");
        assert_eq!(settings.org_name, "acme");
        assert_eq!(settings.kafka_topic, "logs.billing");
        assert_eq!(settings.log_analyzer_url, "http://analyzer/validate");
        assert_eq!(settings.api_key, "");
    }

    #[test]
    fn short_key_wins_over_dotted_alias() {
        let map = HashMap::from([("appName", "short"), ("application.name", "dotted")]);
        let settings = extract_settings(ConfigFormat::Properties, lookup_in(&map));
        assert_eq!(settings.app_name, "short");
    }

    #[test]
    fn xml_keys_prefer_default_topic() {
        let map = HashMap::from([("default.kafka.topic", "a"), ("kafka.topic", "b")]);
        let settings = extract_settings(ConfigFormat::Xml, lookup_in(&map));
        assert_eq!(settings.kafka_topic, "a");
    }
}
