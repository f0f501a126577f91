//! Log analyzer config loading
//!
//! Reads the identity settings from a `.properties` or `.xml` file, and the
//! client's own options (where that file lives, which service to call) from
//! defaults, an options file and the environment.

pub mod keys;
pub mod loader;
pub mod options;
pub mod properties;
pub mod xml;

use std::path::Path;

pub use loader::load_settings;
pub use options::{ClientOptions, OptionOverrides, OptionsError};

/// Config file format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Properties,
    Xml,
}

impl ConfigFormat {
    /// Format for `path`, or `None` when the extension is not recognised.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "properties" => Some(ConfigFormat::Properties),
            "xml" => Some(ConfigFormat::Xml),
            _ => None,
        }
    }
}
