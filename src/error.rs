//! Startup error types

use std::path::PathBuf;
use thiserror::Error;

use crate::config::properties::PropertiesError;
use crate::domain::SettingsField;

/// Broad classification of what went wrong during startup.
///
/// `MissingConfig` and `UnsupportedFormat` are never returned as errors; they
/// are logged and startup continues. They exist so hosts can match on the
/// full taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingConfig,
    UnsupportedFormat,
    ParseFailure,
    ValidationRejected,
    TransportFailure,
}

impl ErrorKind {
    /// Whether the host must stop starting up.
    pub fn is_fatal(self) -> bool {
        !matches!(self, ErrorKind::MissingConfig | ErrorKind::UnsupportedFormat)
    }
}

/// Fatal startup failure. The host decides how to terminate.
#[derive(Error, Debug)]
pub enum BootError {
    #[error("Failed reading log analyzer config {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed properties file {}", path.display())]
    Properties {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },

    #[error("Malformed XML config {}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Required setting `{field}` is empty")]
    IncompleteSettings { field: SettingsField },

    #[error("Invalid log analyzer URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid API key! Log analyzer answered HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("API key validation failed! {field} mismatch")]
    Mismatch { field: SettingsField },

    #[error("API key for app '{app_name}' is not active")]
    Inactive { app_name: String },

    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed calling log analyzer at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl BootError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BootError::Io { .. } | BootError::Properties { .. } | BootError::Xml { .. } => {
                ErrorKind::ParseFailure
            }
            BootError::IncompleteSettings { .. }
            | BootError::InvalidUrl { .. }
            | BootError::Rejected { .. }
            | BootError::Mismatch { .. }
            | BootError::Inactive { .. } => ErrorKind::ValidationRejected,
            BootError::Client(_) | BootError::Transport { .. } => ErrorKind::TransportFailure,
        }
    }

    /// The mismatched or missing field, when the failure is about one.
    pub fn field(&self) -> Option<SettingsField> {
        match self {
            BootError::IncompleteSettings { field } | BootError::Mismatch { field } => Some(*field),
            _ => None,
        }
    }
}
