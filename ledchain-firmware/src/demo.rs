//! Demo animation
//!
//! Sweeps a lit column across every device, then counts in hex on the
//! digit rows when glyph support is built in.

use defmt::*;
use embassy_time::{Duration, Timer};

use ledchain_core::FrameBus;
use ledchain_drivers::LedChain;

const SWEEP_STEP: Duration = Duration::from_millis(60);
const COUNT_STEP: Duration = Duration::from_millis(250);

/// Run the demo forever; returns only on a bus error
pub async fn run<B: FrameBus>(chain: &mut LedChain<B>) -> Result<(), B::Error> {
    let mut pass: u32 = 0;

    loop {
        pass = pass.wrapping_add(1);
        debug!("Demo pass {}", pass);

        sweep(chain).await?;

        #[cfg(feature = "glyphs")]
        count(chain).await?;

        chain.clear_all()?;
    }
}

/// Light one full column at a time, left to right across the chain
async fn sweep<B: FrameBus>(chain: &mut LedChain<B>) -> Result<(), B::Error> {
    for device in 0..chain.device_count() {
        for column in 0..8 {
            chain.set_column(device, column, 0xFF)?;
            Timer::after(SWEEP_STEP).await;
            chain.set_column(device, column, 0x00)?;
        }
    }
    Ok(())
}

/// Count 0x00-0xFF on the first two digits of every device
#[cfg(feature = "glyphs")]
async fn count<B: FrameBus>(chain: &mut LedChain<B>) -> Result<(), B::Error> {
    for value in 0..=u8::MAX {
        for device in 0..chain.device_count() {
            chain.set_digit(device, 0, value >> 4, false)?;
            // Decimal point blinks on odd counts
            chain.set_digit(device, 1, value & 0x0F, value & 1 == 1)?;
        }
        Timer::after(COUNT_STEP).await;
    }
    Ok(())
}
