//! Bus transports
//!
//! Both transports shift the frame out last byte first, MSB first, and
//! latch on the select rising edge. Neither can tell whether any chip
//! actually received the data.

pub mod bitbang;
pub mod spi;

pub use bitbang::BitBangBus;
pub use spi::SpiFrameBus;

/// Bus errors
///
/// Only reports which line or peripheral the HAL refused to drive; the
/// chain itself never acknowledges anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Data (DIN) pin error
    Data,
    /// Clock (CLK) pin error
    Clock,
    /// Select/latch (CS/LOAD) pin error
    Select,
    /// SPI peripheral error
    Spi,
}
