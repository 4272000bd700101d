//! Hardware SPI bus
//!
//! The chips accept SPI mode 0 at up to 10 MHz, so a hardware SPI
//! peripheral can stand in for the bit-banged lines. The `SpiDevice`
//! implementation owns the CS/LOAD pin and raises it after the transaction,
//! which is what latches the frame.

use embedded_hal::spi::SpiDevice;
use ledchain_core::FrameBus;
use ledchain_protocol::{Frame, MAX_FRAME_SIZE};

use super::BusError;

/// Frame transport over an SPI device
pub struct SpiFrameBus<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiFrameBus<SPI> {
    /// Create a new SPI bus
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> FrameBus for SpiFrameBus<SPI> {
    type Error = BusError;

    fn write_frame(&mut self, frame: &Frame) -> Result<(), BusError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        // A frame never exceeds MAX_FRAME_SIZE bytes
        let len = frame.encode(&mut buffer).map_err(|_| BusError::Spi)?;
        self.spi.write(&buffer[..len]).map_err(|_| BusError::Spi)
    }
}
