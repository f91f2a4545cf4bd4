//! Simple TOML parser for console configuration
//!
//! Handles only the subset the console needs, without allocation:
//!
//! - `[console]` and `[uart]` section headers
//! - `key = value` pairs (integer, boolean, string)
//! - Comments (`# ...`), including trailing comments
//!
//! ```toml
//! [console]
//! poll_quantum_us = 1
//! watchdog = false
//! event_driven_repl = false
//! task_overflow = "drop_newest"   # or "drop_oldest"
//! interrupt_char = 3              # -1 disables
//!
//! [uart]
//! baudrate = 115200
//! data_bits = 8
//! parity = "none"                 # "even", "odd"
//! stop_bits = 1
//! ```

use replio_hal::serial::{DataBits, Parity, StopBits};

use super::types::ConsoleConfig;
use crate::task::OverflowPolicy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    InvalidKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    MissingEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Console,
    Uart,
}

/// Parse TOML configuration into a ConsoleConfig
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<ConsoleConfig, ParseError> {
    let mut config = ConsoleConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::MissingEquals)?;
        let key = key.trim();
        let value = value.trim();

        match section {
            Section::Root => return Err(ParseError::InvalidKey),
            Section::Console => parse_console_key(&mut config, key, value)?,
            Section::Uart => parse_uart_key(&mut config, key, value)?,
        }
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "console" => Ok(Section::Console),
        "uart" => Ok(Section::Uart),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_console_key(config: &mut ConsoleConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "poll_quantum_us" => config.poll_quantum_us = parse_u32(value)?,
        "watchdog" => config.watchdog_enabled = parse_bool(value)?,
        "event_driven_repl" => config.event_driven_repl = parse_bool(value)?,
        "task_overflow" => {
            config.task_overflow = match parse_string(value)? {
                "drop_newest" => OverflowPolicy::DropNewest,
                "drop_oldest" => OverflowPolicy::DropOldest,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "interrupt_char" => {
            let c = parse_i32(value)?;
            config.interrupt_char = match c {
                -1 => None,
                0..=255 => Some(c as u8),
                _ => return Err(ParseError::InvalidValue),
            };
        }
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

fn parse_uart_key(config: &mut ConsoleConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "baudrate" => {
            let baud = parse_u32(value)?;
            if baud == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.uart.baudrate = baud;
        }
        "data_bits" => {
            config.uart.data_bits = match parse_u32(value)? {
                7 => DataBits::Seven,
                8 => DataBits::Eight,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "parity" => {
            config.uart.parity = match parse_string(value)? {
                "none" => Parity::None,
                "even" => Parity::Even,
                "odd" => Parity::Odd,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        "stop_bits" => {
            config.uart.stop_bits = match parse_u32(value)? {
                1 => StopBits::One,
                2 => StopBits::Two,
                _ => return Err(ParseError::InvalidValue),
            }
        }
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

/// Cut a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Decimal integer, `_` separators allowed (`115_200`)
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

fn parse_i32(value: &str) -> Result<i32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}
