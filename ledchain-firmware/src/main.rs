//! Ledchain - MAX7219 LED matrix chain demo firmware
//!
//! Drives a cascade of MAX7219 modules from an RP2040 by bit-banging
//! three GPIOs. The chain layout is compiled in from chain.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use {defmt_rtt as _, panic_probe as _};

use ledchain_core::config::{parse_config, ChainConfig};
use ledchain_drivers::{BitBangBus, LedChain};

mod demo;

/// Embedded chain configuration (compiled into firmware)
/// Edit chain.toml and rebuild to customize
const CHAIN_CONFIG: &str = include_str!("../chain.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Ledchain firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = load_config();
    info!(
        "Chain: {} device(s), intensity {:?}, start active: {}",
        config.clamped_device_count(),
        config.intensity,
        config.start_active
    );

    // Wiring: DIN=GPIO19, CLK=GPIO18, CS=GPIO17
    let data = Output::new(p.PIN_19, Level::Low);
    let clock = Output::new(p.PIN_18, Level::Low);
    let select = Output::new(p.PIN_17, Level::High);

    let bus = match BitBangBus::new(data, clock, select) {
        Ok(bus) => bus,
        Err(e) => {
            error!("Failed to set up chain bus: {:?}", e);
            return;
        }
    };

    let mut chain = match LedChain::new(bus, config) {
        Ok(chain) => chain,
        Err(e) => {
            error!("Chain init failed: {:?}", e);
            return;
        }
    };

    info!("Chain initialized");

    if let Err(e) = demo::run(&mut chain).await {
        error!("Demo stopped on bus error: {:?}", e);
    }
}

/// Parse the embedded chain.toml, falling back to a single device
fn load_config() -> ChainConfig {
    match parse_config(CHAIN_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default configuration");
            ChainConfig::default().active()
        }
    }
}
