//! Configuration types
//!
//! Board-agnostic chain configuration and a small TOML reader for it.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
