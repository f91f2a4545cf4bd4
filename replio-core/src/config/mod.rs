//! Console configuration
//!
//! Runtime settings for the console and a parser for the TOML subset the
//! firmware embeds.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::ConsoleConfig;
