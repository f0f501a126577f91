//! log-analyzer-client: startup gate for applications that ship logs to a
//! log analyzer service.
//!
//! Loads the application's identity (name, organization, API key, Kafka
//! topic, service URL) from a `.properties` or `.xml` file and confirms the
//! API key with the analyzer before the host starts serving.
//!
//! ```no_run
//! use log_analyzer_client::{initialize, ClientOptions};
//!
//! let options = ClientOptions::default();
//! match initialize(&options) {
//!     Ok(Some(settings)) => println!("reporting as {}", settings.app_name),
//!     Ok(None) => println!("no log analyzer config, skipping"),
//!     Err(err) => {
//!         eprintln!("{err}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod boot;
pub mod config;
pub mod domain;
pub mod error;
pub mod redact;
pub mod utils;
pub mod validate;

pub use boot::{initialize, initialize_with};
pub use config::{load_settings, ClientOptions, ConfigFormat, OptionOverrides, OptionsError};
pub use domain::{ActivePolicy, Settings, SettingsField, ValidationResponse};
pub use error::{BootError, ErrorKind};
pub use validate::ApiKeyValidator;
