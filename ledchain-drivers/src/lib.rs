//! Hardware driver implementations
//!
//! This crate provides the chain controller and concrete implementations
//! of the [`FrameBus`](ledchain_core::FrameBus) trait from ledchain-core:
//!
//! - Bit-banged 3-wire bus over `embedded-hal` output pins
//! - Hardware SPI bus over an `embedded-hal` `SpiDevice`
//! - [`LedChain`], the shadow-backed controller for up to eight chips

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod chain;

#[cfg(test)]
mod mock;

pub use bus::{BitBangBus, BusError, SpiFrameBus};
pub use chain::LedChain;
