//! Board-agnostic core logic for cascaded LED matrix drivers
//!
//! This crate contains everything that does not touch a pin:
//!
//! - Shadow bitmap of every row/segment byte written to the chain
//! - 7-segment glyph tables (feature `glyphs`)
//! - The bus abstraction a transport implements
//! - Chain configuration and its TOML subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
#[cfg(feature = "glyphs")]
pub mod glyph;
pub mod shadow;
pub mod traits;

pub use shadow::ShadowBitmap;
pub use traits::FrameBus;
