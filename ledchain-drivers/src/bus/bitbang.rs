//! Bit-banged 3-wire bus
//!
//! Drives the chain with three GPIO outputs:
//! - DIN: data, sampled by the chips on the clock rising edge
//! - CLK: clock, idles low
//! - CS/LOAD: select, idles high; the chips latch on its rising edge

use embedded_hal::digital::{OutputPin, PinState};
use ledchain_core::FrameBus;
use ledchain_protocol::Frame;

use super::BusError;

/// Bit-banged transport over three output pins
pub struct BitBangBus<DIN, CLK, CS> {
    data: DIN,
    clock: CLK,
    select: CS,
}

impl<DIN, CLK, CS> BitBangBus<DIN, CLK, CS>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    /// Create a new bus and drive the lines to their idle levels
    ///
    /// # Arguments
    /// - `data`: DIN line of the first chip
    /// - `clock`: CLK line shared by every chip
    /// - `select`: CS/LOAD line shared by every chip
    pub fn new(data: DIN, clock: CLK, select: CS) -> Result<Self, BusError> {
        let mut bus = Self {
            data,
            clock,
            select,
        };
        bus.select.set_high().map_err(|_| BusError::Select)?;
        bus.clock.set_low().map_err(|_| BusError::Clock)?;
        Ok(bus)
    }

    /// Release the pins
    pub fn release(self) -> (DIN, CLK, CS) {
        (self.data, self.clock, self.select)
    }

    /// Shift one byte out, MSB first
    fn shift_out(&mut self, byte: u8) -> Result<(), BusError> {
        for bit in (0..8).rev() {
            let level = PinState::from(byte & (1 << bit) != 0);
            self.data.set_state(level).map_err(|_| BusError::Data)?;
            self.clock.set_high().map_err(|_| BusError::Clock)?;
            self.clock.set_low().map_err(|_| BusError::Clock)?;
        }
        Ok(())
    }
}

impl<DIN, CLK, CS> FrameBus for BitBangBus<DIN, CLK, CS>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    type Error = BusError;

    fn write_frame(&mut self, frame: &Frame) -> Result<(), BusError> {
        self.select.set_low().map_err(|_| BusError::Select)?;
        let shifted = frame
            .transmit_order()
            .try_for_each(|byte| self.shift_out(byte));
        if shifted.is_err() {
            // Best effort: leave the clock idle before releasing select
            let _ = self.clock.set_low();
        }
        // Rising edge latches every chip's shift register. Select is
        // released after a failed shift too, so the bus returns to idle.
        let latched = self.select.set_high().map_err(|_| BusError::Select);
        shifted.and(latched)
    }
}
