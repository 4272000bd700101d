//! Frame encoding for a daisy-chained bus.
//!
//! Frame format (buffer order, `n` devices):
//! - byte `2*i`: DATA for device `i`
//! - byte `2*i + 1`: OPCODE for device `i`
//!
//! All slots except the addressed one carry opcode 0 (no-op). The buffer is
//! shifted out from the last byte to the first, MSB first within each byte,
//! so the device furthest from the controller receives its slot first.

use heapless::Vec;

use crate::registers::{Register, MAX_DEVICES};

/// Bytes in one device slot (opcode + data)
pub const BYTES_PER_DEVICE: usize = 2;

/// Maximum complete frame size (eight devices)
pub const MAX_FRAME_SIZE: usize = MAX_DEVICES * BYTES_PER_DEVICE;

/// Errors that can occur when building or decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Wire bytes span no device or more than eight
    InvalidDeviceCount,
    /// Addressed device is not part of the chain
    DeviceOutOfRange,
    /// Byte count is not a whole number of device slots
    Incomplete,
}

/// One bus transaction for the whole chain
///
/// The buffer is sized once for the chain's device count and rewritten in
/// place by [`Frame::address`] for every register write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl Frame {
    /// Create an all-no-op frame for a chain of `device_count` devices
    ///
    /// The count is clamped to 1..=8.
    pub fn empty(device_count: u8) -> Self {
        let devices = (device_count as usize).clamp(1, MAX_DEVICES);

        let mut bytes = Vec::new();
        // Never exceeds MAX_FRAME_SIZE after clamping
        let _ = bytes.resize(devices * BYTES_PER_DEVICE, 0);

        Self { bytes }
    }

    /// Create a frame addressing a single device
    pub fn new(
        device_count: u8,
        device: u8,
        register: Register,
        data: u8,
    ) -> Result<Self, FrameError> {
        let mut frame = Self::empty(device_count);
        frame.address(device, register, data)?;
        Ok(frame)
    }

    /// Rebuild a frame from bytes in wire order (first transmitted first)
    pub fn from_transmitted(wire: &[u8]) -> Result<Self, FrameError> {
        if wire.len() % BYTES_PER_DEVICE != 0 {
            return Err(FrameError::Incomplete);
        }
        let devices = wire.len() / BYTES_PER_DEVICE;
        if devices == 0 || devices > MAX_DEVICES {
            return Err(FrameError::InvalidDeviceCount);
        }

        let mut bytes = Vec::new();
        for &byte in wire.iter().rev() {
            // Capacity checked above
            let _ = bytes.push(byte);
        }
        Ok(Self { bytes })
    }

    /// Reset every slot to no-op and place `(register, data)` in `device`'s slot
    pub fn address(&mut self, device: u8, register: Register, data: u8) -> Result<(), FrameError> {
        let offset = device as usize * BYTES_PER_DEVICE;
        if offset >= self.bytes.len() {
            return Err(FrameError::DeviceOutOfRange);
        }

        self.bytes.fill(0);
        self.bytes[offset] = data;
        self.bytes[offset + 1] = register.addr();
        Ok(())
    }

    /// Number of devices this frame spans
    pub fn device_count(&self) -> u8 {
        (self.bytes.len() / BYTES_PER_DEVICE) as u8
    }

    /// Frame bytes in buffer order (device 0's data byte first)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame bytes in the order they go out on the wire
    pub fn transmit_order(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().rev().copied()
    }

    /// Copy the wire-order bytes into `buffer`, returning the number written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.bytes.len();
        if buffer.len() < len {
            return Err(FrameError::Incomplete);
        }
        for (dst, src) in buffer.iter_mut().zip(self.transmit_order()) {
            *dst = src;
        }
        Ok(len)
    }

    /// `(opcode, data)` carried in `device`'s slot
    pub fn slot(&self, device: u8) -> Option<(u8, u8)> {
        let offset = device as usize * BYTES_PER_DEVICE;
        let data = *self.bytes.get(offset)?;
        let opcode = *self.bytes.get(offset + 1)?;
        Some((opcode, data))
    }

    /// First slot carrying something other than a no-op, as `(device, opcode, data)`
    pub fn target(&self) -> Option<(u8, u8, u8)> {
        (0..self.device_count()).find_map(|device| match self.slot(device) {
            Some((opcode, data)) if opcode != Register::NoOp.addr() => Some((device, opcode, data)),
            _ => None,
        })
    }
}
