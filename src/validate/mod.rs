//! API key validation against the log analyzer service
//!
//! One blocking GET, no retries. Any failure is returned as a
//! [`BootError`] for the host to act on.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use url::Url;

use crate::domain::{ActivePolicy, Settings, SettingsField, ValidationResponse};
use crate::error::BootError;
use crate::redact::describe_secret;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the analyzer's API key endpoint.
#[derive(Debug, Clone)]
pub struct ApiKeyValidator {
    http: Client,
    policy: ActivePolicy,
}

impl ApiKeyValidator {
    pub fn new(timeout: Duration, policy: ActivePolicy) -> Result<Self, BootError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("log-analyzer-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BootError::Client)?;
        Ok(Self { http, policy })
    }

    pub fn policy(&self) -> ActivePolicy {
        self.policy
    }

    /// Ask the analyzer whether `settings` carries a valid API key for its
    /// application and organization, then check the echoed identity.
    ///
    /// Returns the analyzer's response on success.
    pub fn validate(&self, settings: &Settings) -> Result<ValidationResponse, BootError> {
        if let Some(field) = settings.first_empty() {
            return Err(BootError::IncompleteSettings { field });
        }

        let url = build_validation_url(settings)?;
        tracing::debug!(
            "Validating API key {} for app {} against {}",
            describe_secret(&settings.api_key),
            settings.app_name,
            settings.log_analyzer_url
        );

        // The request URL carries the key; keep it out of error messages.
        let transport = |source: reqwest::Error| BootError::Transport {
            url: settings.log_analyzer_url.clone(),
            source: source.without_url(),
        };

        let response =
            self.http.get(url).header(ACCEPT, "application/json").send().map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(BootError::Rejected { status: status.as_u16(), body });
        }

        let body: ValidationResponse = response.json().map_err(transport)?;
        check_identity(settings, &body, self.policy)?;

        tracing::info!("API Key is valid for app: {}", settings.app_name);
        Ok(body)
    }
}

/// `<log_analyzer_url>?apiKey=..&appName=..&orgName=..`, keeping any query
/// the base URL already has.
pub fn build_validation_url(settings: &Settings) -> Result<Url, BootError> {
    let mut url = Url::parse(&settings.log_analyzer_url).map_err(|source| BootError::InvalidUrl {
        url: settings.log_analyzer_url.clone(),
        source,
    })?;
    url.query_pairs_mut()
        .append_pair("apiKey", &settings.api_key)
        .append_pair("appName", &settings.app_name)
        .append_pair("orgName", &settings.org_name);
    Ok(url)
}

/// Compare the analyzer's view of the key with the loaded settings.
///
/// Fields are checked in [`SettingsField::IDENTITY`] order and the first
/// mismatch is reported. The `active` flag is only enforced under
/// [`ActivePolicy::Require`].
pub fn check_identity(
    settings: &Settings,
    response: &ValidationResponse,
    policy: ActivePolicy,
) -> Result<(), BootError> {
    for field in SettingsField::IDENTITY {
        if response.get(field) != Some(settings.get(field)) {
            tracing::error!("API key validation failed: {} mismatch", field);
            return Err(BootError::Mismatch { field });
        }
    }

    if !response.active {
        match policy {
            ActivePolicy::Require => {
                return Err(BootError::Inactive { app_name: settings.app_name.clone() });
            }
            ActivePolicy::Ignore => {
                tracing::warn!(
                    "Log analyzer reports the API key for app {} as inactive; accepting it",
                    settings.app_name
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const VALIDATE_PATH: &str = "/api/keys/validate";

    fn billing_settings(base_url: &str) -> Settings {
        Settings {
            app_name: "billing".into(),
            org_name: "acme".into(),
            api_key: "XYZ".into(),
            kafka_topic: "logs.billing".into(),
            log_analyzer_url: format!("{base_url}{VALIDATE_PATH}"),
        }
    }

    fn billing_body() -> serde_json::Value {
        json!({
            "organizationName": "acme",
            "applicationName": "billing",
            "apiKey": "XYZ",
            "kafkaTopic": "logs.billing",
            "elasticIndex": "billing-logs",
            "active": true
        })
    }

    fn validator(policy: ActivePolicy) -> ApiKeyValidator {
        ApiKeyValidator::new(Duration::from_secs(5), policy).expect("client")
    }

    fn identity_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("apiKey".into(), "XYZ".into()),
            Matcher::UrlEncoded("appName".into(), "billing".into()),
            Matcher::UrlEncoded("orgName".into(), "acme".into()),
        ])
    }

    #[test]
    fn test_matching_response_is_accepted() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", VALIDATE_PATH)
            .match_query(identity_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(billing_body().to_string())
            .create();

        let response = validator(ActivePolicy::Ignore)
            .validate(&billing_settings(&server.url()))
            .expect("valid");
        assert_eq!(response.elastic_index, "billing-logs");
        assert!(response.active);
        mock.assert();
    }

    #[test]
    fn test_api_key_mismatch_names_field() {
        let mut server = Server::new();
        let mut body = billing_body();
        body["apiKey"] = json!("DIFFERENT");
        let _mock = server
            .mock("GET", VALIDATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let err = validator(ActivePolicy::Ignore)
            .validate(&billing_settings(&server.url()))
            .expect_err("mismatch");
        assert!(matches!(err, BootError::Mismatch { field: SettingsField::ApiKey }));
        assert!(err.to_string().contains("apiKey"));
    }

    #[test]
    fn test_any_single_field_mismatch_is_fatal() {
        for (json_field, expected) in [
            ("applicationName", SettingsField::AppName),
            ("organizationName", SettingsField::OrgName),
            ("kafkaTopic", SettingsField::KafkaTopic),
        ] {
            let mut server = Server::new();
            let mut body = billing_body();
            body[json_field] = json!("other");
            let _mock = server
                .mock("GET", VALIDATE_PATH)
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(body.to_string())
                .create();

            let err = validator(ActivePolicy::Ignore)
                .validate(&billing_settings(&server.url()))
                .expect_err("mismatch");
            assert_eq!(err.field(), Some(expected), "{json_field}");
        }
    }

    #[test]
    fn test_non_success_status_is_rejected_regardless_of_body() {
        for status in [401, 403, 404, 500] {
            let mut server = Server::new();
            let _mock = server
                .mock("GET", VALIDATE_PATH)
                .match_query(Matcher::Any)
                .with_status(status)
                .with_body(billing_body().to_string())
                .create();

            let err = validator(ActivePolicy::Ignore)
                .validate(&billing_settings(&server.url()))
                .expect_err("rejected");
            match err {
                BootError::Rejected { status: got, ref body } => {
                    assert_eq!(got, status as u16);
                    assert!(body.contains("billing"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_undecodable_body_is_transport_failure() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", VALIDATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create();

        let err = validator(ActivePolicy::Ignore)
            .validate(&billing_settings(&server.url()))
            .expect_err("bad body");
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn test_unreachable_service_is_transport_failure() {
        let settings = billing_settings("http://127.0.0.1:1");
        let err = validator(ActivePolicy::Ignore).validate(&settings).expect_err("unreachable");
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(!format!("{err:?}").contains("apiKey=XYZ"));
    }

    #[test]
    fn test_inactive_key_depends_on_policy() {
        let mut server = Server::new();
        let mut body = billing_body();
        body["active"] = json!(false);
        let _mock = server
            .mock("GET", VALIDATE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .expect(2)
            .create();
        let settings = billing_settings(&server.url());

        assert!(validator(ActivePolicy::Ignore).validate(&settings).is_ok());
        let err = validator(ActivePolicy::Require).validate(&settings).expect_err("inactive");
        assert!(matches!(err, BootError::Inactive { .. }));
    }

    #[test]
    fn test_validator_reports_its_policy() {
        assert_eq!(validator(ActivePolicy::Ignore).policy(), ActivePolicy::Ignore);
        assert_eq!(validator(ActivePolicy::Require).policy(), ActivePolicy::Require);
    }

    #[test]
    fn test_incomplete_settings_never_reach_network() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        let mut settings = billing_settings(&server.url());
        settings.kafka_topic.clear();
        let err = validator(ActivePolicy::Ignore).validate(&settings).expect_err("incomplete");
        assert!(matches!(err, BootError::IncompleteSettings { field: SettingsField::KafkaTopic }));
        mock.assert();
    }

    #[test]
    fn test_invalid_base_url() {
        let mut settings = billing_settings("");
        settings.log_analyzer_url = "not a url".into();
        let err = build_validation_url(&settings).expect_err("invalid");
        assert!(matches!(err, BootError::InvalidUrl { .. }));
        assert_eq!(err.kind(), ErrorKind::ValidationRejected);
    }

    #[test]
    fn test_query_round_trip_matches_identity() {
        let mut settings = billing_settings("https://analyzer.example.com");
        settings.app_name = "billing & co".into();
        settings.org_name = "acme/emea".into();
        settings.api_key = "k=1+2?".into();
        settings.log_analyzer_url.push_str("?region=eu");

        let url = build_validation_url(&settings).expect("url");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("region".to_string(), "eu".to_string()));

        let lookup = |name: &str| {
            pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone()).unwrap_or_default()
        };
        let echoed = ValidationResponse {
            api_key: lookup("apiKey"),
            application_name: lookup("appName"),
            organization_name: lookup("orgName"),
            kafka_topic: settings.kafka_topic.clone(),
            elastic_index: String::new(),
            active: true,
        };
        check_identity(&settings, &echoed, ActivePolicy::Require).expect("round trip");
    }
}
