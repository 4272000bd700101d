//! Simple TOML parser for chain configuration
//!
//! Handles only the subset needed for a chain description. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - A single `[chain]` section
//! - Comments (# ...), full-line and trailing
//!
//! ```toml
//! [chain]
//! device_count = 4
//! intensity = 8        # 0-15
//! start_active = true
//! ```

use super::types::ChainConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header other than `[chain]`, or malformed brackets
    InvalidSection,
    /// Key not recognized in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Chain,
}

/// Parse TOML configuration into a ChainConfig
///
/// Keys missing from the input keep their [`ChainConfig::default`] values.
pub fn parse_config(input: &str) -> Result<ChainConfig, ParseError> {
    let mut config = ChainConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "chain" => Ok(Section::Chain),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ChainConfig,
) -> Result<(), ParseError> {
    if section != Section::Chain {
        return Err(ParseError::UnknownKey);
    }

    match key {
        "device_count" => {
            let count: u8 = parse_int(value)?;
            if !(1..=8).contains(&count) {
                return Err(ParseError::InvalidValue);
            }
            config.device_count = count;
        }
        "intensity" => {
            let level: u8 = parse_int(value)?;
            if level > 15 {
                return Err(ParseError::InvalidValue);
            }
            config.intensity = Some(level);
        }
        "start_active" => config.start_active = parse_bool(value)?,
        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}
