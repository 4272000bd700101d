//! Software model of a chip cascade
//!
//! Mirrors what the hardware does with the bit stream: each chip holds a
//! 16-bit shift register, bits enter device 0 on every clock rising edge
//! and the bit falling out of device `i` feeds device `i + 1`. When select
//! rises, every chip decodes its shift register and applies the write.
//!
//! Used on the host to check the driver against the chain it talks to.

use heapless::Vec;

use crate::frame::{Frame, MAX_FRAME_SIZE};
use crate::registers::{Register, MAX_DEVICES, ROWS_PER_DEVICE};

/// Register state of one chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Digit/row registers 1-8
    pub digits: [u8; ROWS_PER_DEVICE],
    pub decode_mode: u8,
    pub intensity: u8,
    pub scan_limit: u8,
    /// Raw shutdown register (0 = shutdown, 1 = normal operation)
    pub shutdown_reg: u8,
    pub display_test: u8,
    /// Number of writes latched with a non-no-op opcode
    pub writes: u32,
}

impl DeviceState {
    /// Power-on register state from the datasheet
    pub const POWER_ON: Self = Self {
        digits: [0; ROWS_PER_DEVICE],
        decode_mode: 0,
        intensity: 0,
        scan_limit: 0,
        shutdown_reg: 0,
        display_test: 0,
        writes: 0,
    };

    /// True while the shutdown register holds 0
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_reg & 0x01 == 0
    }

    fn apply(&mut self, word: u16) {
        let opcode = (word >> 8) as u8;
        let data = word as u8;

        let Some(register) = Register::from_addr(opcode) else {
            return;
        };

        match register {
            Register::NoOp => return,
            Register::DecodeMode => self.decode_mode = data,
            Register::Intensity => self.intensity = data & 0x0F,
            Register::ScanLimit => self.scan_limit = data & 0x07,
            Register::Shutdown => self.shutdown_reg = data,
            Register::DisplayTest => self.display_test = data,
            digit => {
                if let Some(row) = digit.row() {
                    self.digits[row as usize] = data;
                }
            }
        }
        self.writes += 1;
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::POWER_ON
    }
}

/// A cascade of up to eight chips sharing one bit stream
#[derive(Debug, Clone)]
pub struct ChainModel {
    devices: Vec<DeviceState, MAX_DEVICES>,
    /// Per-device 16-bit shift registers
    shift: [u16; MAX_DEVICES],
    /// Bits clocked since select last fell
    bits_clocked: u32,
    /// Whether select is currently low (bus open)
    selected: bool,
    latched: Option<Frame>,
    frames: u32,
}

impl ChainModel {
    /// Create a model with `device_count` chips (clamped to 1..=8)
    pub fn new(device_count: u8) -> Self {
        let count = (device_count as usize).clamp(1, MAX_DEVICES);
        let mut devices = Vec::new();
        for _ in 0..count {
            let _ = devices.push(DeviceState::POWER_ON);
        }

        Self {
            devices,
            shift: [0; MAX_DEVICES],
            bits_clocked: 0,
            selected: false,
            latched: None,
            frames: 0,
        }
    }

    /// Number of chips in the model
    pub fn device_count(&self) -> u8 {
        self.devices.len() as u8
    }

    /// Register state of `device`
    pub fn device(&self, device: u8) -> Option<&DeviceState> {
        self.devices.get(device as usize)
    }

    /// All device states, device 0 first
    pub fn devices(&self) -> &[DeviceState] {
        &self.devices
    }

    /// Select line fell: the chips start listening
    pub fn select(&mut self) {
        self.selected = true;
        self.bits_clocked = 0;
    }

    /// Clock rising edge with the data line at `bit`
    pub fn clock_in(&mut self, bit: bool) {
        let mut carry = bit;
        for reg in self.shift.iter_mut().take(self.devices.len()) {
            let out = *reg & 0x8000 != 0;
            *reg = (*reg << 1) | carry as u16;
            carry = out;
        }
        self.bits_clocked += 1;
    }

    /// Select line rose: every chip applies its shift register
    ///
    /// Returns the frame that was latched, or `None` when select was not
    /// open or the clocked bit count was not a whole frame.
    pub fn latch(&mut self) -> Option<&Frame> {
        let was_selected = self.selected;
        self.selected = false;

        let count = self.devices.len();
        let expected_bits = (count * 16) as u32;

        // The chips latch whatever is in their shift registers regardless
        for (state, &word) in self.devices.iter_mut().zip(self.shift.iter()) {
            state.apply(word);
        }

        if !was_selected || self.bits_clocked != expected_bits {
            self.latched = None;
            return None;
        }

        // Device count-1 received its slot first; device 0 last
        let mut wire: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
        for word in self.shift[..count].iter().rev() {
            let _ = wire.push((word >> 8) as u8);
            let _ = wire.push(*word as u8);
        }

        self.frames += 1;
        self.latched = Frame::from_transmitted(&wire).ok();
        self.latched.as_ref()
    }

    /// Frame applied by the most recent complete latch
    pub fn last_frame(&self) -> Option<&Frame> {
        self.latched.as_ref()
    }

    /// Number of complete frames latched so far
    pub fn frames_latched(&self) -> u32 {
        self.frames
    }

    /// Clock a whole byte, MSB first
    pub fn clock_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.clock_in(byte & (1 << bit) != 0);
        }
    }

    /// Shift out and latch `frame` exactly as a bus transport would
    pub fn transfer(&mut self, frame: &Frame) -> Option<&Frame> {
        self.select();
        for byte in frame.transmit_order() {
            self.clock_byte(byte);
        }
        self.latch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let model = ChainModel::new(2);
        assert_eq!(model.device_count(), 2);
        for state in model.devices() {
            assert!(state.is_shutdown());
            assert_eq!(state.digits, [0; 8]);
            assert_eq!(state.writes, 0);
        }
    }

    #[test]
    fn test_device_count_clamped() {
        assert_eq!(ChainModel::new(0).device_count(), 1);
        assert_eq!(ChainModel::new(12).device_count(), 8);
    }

    #[test]
    fn test_transfer_reaches_addressed_device_only() {
        let mut model = ChainModel::new(3);
        let frame = Frame::new(3, 1, Register::Digit4, 0xA5).unwrap();

        let latched = model.transfer(&frame).cloned();
        assert_eq!(latched, Some(frame));

        assert_eq!(model.device(1).unwrap().digits[4], 0xA5);
        assert_eq!(model.device(1).unwrap().writes, 1);
        assert_eq!(model.device(0).unwrap().writes, 0);
        assert_eq!(model.device(2).unwrap().writes, 0);
        assert_eq!(model.frames_latched(), 1);
    }

    #[test]
    fn test_wrong_direction_misaddresses() {
        let mut model = ChainModel::new(3);
        let frame = Frame::new(3, 0, Register::Intensity, 5).unwrap();

        // Shift in buffer order instead of reverse
        model.select();
        for &byte in frame.as_bytes() {
            model.clock_byte(byte);
        }
        model.latch();

        assert_eq!(model.device(0).unwrap().intensity, 0);
        assert_ne!(model.device(2).unwrap().writes, 0);
    }

    #[test]
    fn test_partial_frame_not_reported() {
        let mut model = ChainModel::new(2);
        model.select();
        model.clock_byte(0x0C);
        assert!(model.latch().is_none());
        assert!(model.last_frame().is_none());
        assert_eq!(model.frames_latched(), 0);
    }

    #[test]
    fn test_shutdown_register_polarity() {
        let mut model = ChainModel::new(1);
        model.transfer(&Frame::new(1, 0, Register::Shutdown, 1).unwrap());
        assert!(!model.device(0).unwrap().is_shutdown());

        model.transfer(&Frame::new(1, 0, Register::Shutdown, 0).unwrap());
        assert!(model.device(0).unwrap().is_shutdown());
    }
}
