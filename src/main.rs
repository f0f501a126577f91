//! log-analyzer-client: validate log analyzer settings before startup
//!
//! Loads the application's log analyzer identity and confirms the API key
//! with the analyzer service. Exits non-zero when the key is rejected.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
