//! MAX7219/MAX7221 register addresses
//!
//! The chip decodes bits D11-D8 of each latched 16-bit word as the register
//! address and D7-D0 as the data. Addresses 0x0D and 0x0E are unused.

/// Hardware ceiling on the number of chips in one chain
pub const MAX_DEVICES: usize = 8;

/// Digit/row registers per chip
pub const ROWS_PER_DEVICE: usize = 8;

/// Highest valid intensity level (duty cycle 31/32)
pub const MAX_INTENSITY: u8 = 15;

/// Highest valid scan limit (all eight digits scanned)
pub const MAX_SCAN_LIMIT: u8 = 7;

/// Register address (opcode) of a single write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// No-operation; sent to every device that is not being addressed
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    /// BCD code-B decode enable, one bit per digit
    DecodeMode = 0x09,
    /// Display brightness, 0-15
    Intensity = 0x0A,
    /// Number of scanned digits minus one, 0-7
    ScanLimit = 0x0B,
    /// 0 = shutdown, 1 = normal operation
    Shutdown = 0x0C,
    /// 1 = all segments on, 0 = normal operation
    DisplayTest = 0x0F,
}

impl Register {
    const DIGITS: [Register; ROWS_PER_DEVICE] = [
        Register::Digit0,
        Register::Digit1,
        Register::Digit2,
        Register::Digit3,
        Register::Digit4,
        Register::Digit5,
        Register::Digit6,
        Register::Digit7,
    ];

    /// Digit/row register for `row` (0-7)
    pub fn digit(row: u8) -> Option<Self> {
        Self::DIGITS.get(row as usize).copied()
    }

    /// Raw register address
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Decode a register address as the chip does (only D11-D8 matter)
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr & 0x0F {
            0x00 => Some(Register::NoOp),
            a @ 0x01..=0x08 => Self::digit(a - 1),
            0x09 => Some(Register::DecodeMode),
            0x0A => Some(Register::Intensity),
            0x0B => Some(Register::ScanLimit),
            0x0C => Some(Register::Shutdown),
            0x0F => Some(Register::DisplayTest),
            _ => None,
        }
    }

    /// Row index if this is a digit register
    pub fn row(self) -> Option<u8> {
        match self.addr() {
            a @ 0x01..=0x08 => Some(a - 1),
            _ => None,
        }
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register.addr()
    }
}
