//! Configuration loading
//!
//! The console configuration is compiled in from console.toml (validated
//! by build.rs) and parsed at boot with the core's no_std parser.

use defmt::*;
use replio_core::config::parse_config;
use replio_core::ConsoleConfig;

/// Embedded configuration (compiled into firmware)
/// Edit console.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../console.toml");

/// Parse the embedded configuration
///
/// Falls back to defaults if parsing fails, which build.rs should have
/// made impossible.
pub fn load_config() -> ConsoleConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default console configuration");
            ConsoleConfig::default()
        }
    }
}
