//! Chain controller for cascaded MAX7219-class drivers
//!
//! The controller provides:
//! - A shadow of every digit/row register, since the chips cannot be read
//! - Per-LED, per-row and per-column updates through that shadow
//! - Brightness, scan limit, shutdown and display-test control
//! - 7-segment glyph rendering (feature `glyphs`)
//!
//! # Addressing
//!
//! Every operation takes a device index (0 = the chip wired to the
//! controller). Indices outside the chain, and rows, columns, digits or
//! levels outside their documented ranges, turn the call into a no-op that
//! returns `Ok(())`. Only bus failures produce an error.
//!
//! ```ignore
//! let bus = BitBangBus::new(din, clk, cs)?;
//! let mut chain = LedChain::new(bus, ChainConfig::new(4).with_intensity(8))?;
//! chain.set_shutdown(0, false)?;
//! chain.set_led(0, 3, 4, true)?;
//! chain.set_row(1, 0, 0b1010_1010)?;
//! ```

use ledchain_core::config::ChainConfig;
#[cfg(feature = "glyphs")]
use ledchain_core::glyph::Glyph;
use ledchain_core::{FrameBus, ShadowBitmap};
use ledchain_protocol::{Frame, Register, MAX_INTENSITY, MAX_SCAN_LIMIT, ROWS_PER_DEVICE};

/// Diagnostic for a call dropped because an index was out of range
#[cfg(feature = "defmt")]
macro_rules! ignored {
    ($($arg:tt)*) => {
        defmt::trace!($($arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! ignored {
    ($($arg:tt)*) => {};
}

/// Controller for a chain of up to eight chips
///
/// Exclusively owns the bus, the shadow bitmap and the transmit frame.
/// Callers sharing a chain between tasks must serialize access themselves.
pub struct LedChain<B> {
    bus: B,
    shadow: ShadowBitmap,
    frame: Frame,
}

impl<B: FrameBus> LedChain<B> {
    /// Build a chain and run the power-on sequence on every device
    ///
    /// For each device in turn: display test off, scan limit 7, decode mode
    /// off, all rows cleared, shutdown engaged. Afterwards the optional
    /// start-up intensity is written and, if `start_active` is set, every
    /// device leaves shutdown.
    pub fn new(bus: B, config: ChainConfig) -> Result<Self, B::Error> {
        let device_count = config.clamped_device_count();
        let mut chain = Self {
            bus,
            shadow: ShadowBitmap::new(device_count),
            frame: Frame::empty(device_count),
        };

        for device in 0..device_count {
            chain.write(device, Register::DisplayTest, 0)?;
            chain.set_scan_limit(device, MAX_SCAN_LIMIT)?;
            // Glyphs are rendered here, never by the chip's BCD decoder
            chain.write(device, Register::DecodeMode, 0)?;
            chain.clear_device(device)?;
            chain.set_shutdown(device, true)?;
        }

        if let Some(level) = config.valid_intensity() {
            chain.set_intensity_all(level)?;
        }
        if config.start_active {
            chain.set_shutdown_all(false)?;
        }

        Ok(chain)
    }

    /// Number of devices in the chain (1-8)
    pub fn device_count(&self) -> u8 {
        self.shadow.device_count()
    }

    /// Shadow of every digit/row register
    pub fn shadow(&self) -> &ShadowBitmap {
        &self.shadow
    }

    /// Last byte written to `(device, row)`
    pub fn row(&self, device: u8, row: u8) -> Option<u8> {
        self.shadow.row(device, row)
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Enter (`true`) or leave (`false`) low-power shutdown mode
    ///
    /// The shutdown register is active-low: 0 shuts the device down, 1
    /// resumes normal operation. Register contents survive shutdown.
    pub fn set_shutdown(&mut self, device: u8, shutdown: bool) -> Result<(), B::Error> {
        self.write(device, Register::Shutdown, if shutdown { 0 } else { 1 })
    }

    /// Number of scanned digits/rows minus one (0-7)
    pub fn set_scan_limit(&mut self, device: u8, limit: u8) -> Result<(), B::Error> {
        if limit > MAX_SCAN_LIMIT {
            ignored!("scan limit {} out of range", limit);
            return Ok(());
        }
        self.write(device, Register::ScanLimit, limit)
    }

    /// Brightness (0-15); out-of-range levels are dropped, not clamped
    pub fn set_intensity(&mut self, device: u8, level: u8) -> Result<(), B::Error> {
        if level > MAX_INTENSITY {
            ignored!("intensity {} out of range", level);
            return Ok(());
        }
        self.write(device, Register::Intensity, level)
    }

    /// Light every segment regardless of the digit registers
    pub fn set_display_test(&mut self, device: u8, on: bool) -> Result<(), B::Error> {
        self.write(device, Register::DisplayTest, on as u8)
    }

    /// Blank a device, writing all eight rows
    ///
    /// Each shadow row is zeroed once its write went out, so a bus error
    /// part way through leaves the remaining rows as they were.
    pub fn clear_device(&mut self, device: u8) -> Result<(), B::Error> {
        if device >= self.device_count() {
            ignored!("clear: device {} not in chain", device);
            return Ok(());
        }
        for row in 0..ROWS_PER_DEVICE as u8 {
            self.store_row(device, row, 0)?;
        }
        Ok(())
    }

    /// Turn a single LED on or off
    ///
    /// Column 0 is the row byte's most significant bit. The rest of the row
    /// comes from the shadow.
    pub fn set_led(&mut self, device: u8, row: u8, column: u8, on: bool) -> Result<(), B::Error> {
        match self.shadow.with_bit(device, row, column, on) {
            Some(value) => self.store_row(device, row, value),
            None => {
                ignored!("led ({}, {}, {}) out of range", device, row, column);
                Ok(())
            }
        }
    }

    /// Replace a whole row
    pub fn set_row(&mut self, device: u8, row: u8, value: u8) -> Result<(), B::Error> {
        if self.shadow.offset(device, row).is_none() {
            ignored!("row ({}, {}) out of range", device, row);
            return Ok(());
        }
        self.store_row(device, row, value)
    }

    /// Set one column from a bitmask; bit 7 is row 0
    ///
    /// Goes through [`set_led`](Self::set_led) for each row, so this always
    /// costs eight bus transactions.
    pub fn set_column(&mut self, device: u8, column: u8, bitmask: u8) -> Result<(), B::Error> {
        if device >= self.device_count() || column as usize >= ROWS_PER_DEVICE {
            ignored!("column ({}, {}) out of range", device, column);
            return Ok(());
        }
        for row in 0..ROWS_PER_DEVICE as u8 {
            let on = (bitmask >> (7 - row)) & 0x01 != 0;
            self.set_led(device, row, column, on)?;
        }
        Ok(())
    }

    /// Render a glyph on one 7-segment digit, optionally with its decimal point
    ///
    /// A hex value above 15 makes the call a no-op; ASCII codes of 128 and
    /// above render as a space.
    #[cfg(feature = "glyphs")]
    pub fn set_glyph(
        &mut self,
        device: u8,
        digit: u8,
        glyph: Glyph,
        decimal_point: bool,
    ) -> Result<(), B::Error> {
        if self.shadow.offset(device, digit).is_none() {
            ignored!("digit ({}, {}) out of range", device, digit);
            return Ok(());
        }
        let Some(segments) = glyph.segments(decimal_point) else {
            ignored!("glyph {} has no segments", glyph);
            return Ok(());
        };
        self.set_row(device, digit, segments)
    }

    /// Show a hex digit (0-15)
    #[cfg(feature = "glyphs")]
    pub fn set_digit(
        &mut self,
        device: u8,
        digit: u8,
        value: u8,
        decimal_point: bool,
    ) -> Result<(), B::Error> {
        self.set_glyph(device, digit, Glyph::Hex(value), decimal_point)
    }

    /// Show a character; anything outside ASCII renders as a space
    #[cfg(feature = "glyphs")]
    pub fn set_char(
        &mut self,
        device: u8,
        digit: u8,
        ch: char,
        decimal_point: bool,
    ) -> Result<(), B::Error> {
        let code = u8::try_from(ch).unwrap_or(u8::MAX);
        self.set_glyph(device, digit, Glyph::Char(code), decimal_point)
    }

    /// Blank every device
    pub fn clear_all(&mut self) -> Result<(), B::Error> {
        for device in 0..self.device_count() {
            self.clear_device(device)?;
        }
        Ok(())
    }

    /// Enter or leave shutdown on every device
    pub fn set_shutdown_all(&mut self, shutdown: bool) -> Result<(), B::Error> {
        for device in 0..self.device_count() {
            self.set_shutdown(device, shutdown)?;
        }
        Ok(())
    }

    /// Same brightness on every device
    pub fn set_intensity_all(&mut self, level: u8) -> Result<(), B::Error> {
        for device in 0..self.device_count() {
            self.set_intensity(device, level)?;
        }
        Ok(())
    }

    /// Write a row, then record it in the shadow once the bus accepted it
    fn store_row(&mut self, device: u8, row: u8, value: u8) -> Result<(), B::Error> {
        let Some(register) = Register::digit(row) else {
            return Ok(());
        };
        self.write(device, register, value)?;
        self.shadow.set_row(device, row, value);
        Ok(())
    }

    /// One addressed register write: frame it and push it onto the bus
    fn write(&mut self, device: u8, register: Register, data: u8) -> Result<(), B::Error> {
        if self.frame.address(device, register, data).is_err() {
            ignored!("device {} not in chain", device);
            return Ok(());
        }
        self.bus.write_frame(&self.frame)
    }
}
