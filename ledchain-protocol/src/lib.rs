//! Register map and framing for cascaded MAX7219-class LED drivers
//!
//! Up to eight driver chips share one 3-wire bus (data, clock, select).
//! Every chip sees the same clocked bit stream; each one keeps the 16 bits
//! that end up in its own shift register when select rises.
//!
//! # Frame Layout
//!
//! A frame carries one two-byte slot per device. Only the addressed slot
//! holds a real register write; every other slot is a no-op (opcode 0):
//!
//! ```text
//!  buffer index:   0      1       2      3       ...  2n-2     2n-1
//!               ┌──────┬────────┬──────┬────────┬───┬────────┬──────────┐
//!               │ DATA │ OPCODE │ DATA │ OPCODE │...│ DATA   │ OPCODE   │
//!               │ dev0 │ dev0   │ dev1 │ dev1   │   │ dev n-1│ dev n-1  │
//!               └──────┴────────┴──────┴────────┴───┴────────┴──────────┘
//!  wire order:  ◄─────────────── shifted out last-byte-first, MSB first
//! ```
//!
//! The device nearest the controller (index 0) receives its slot last.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod model;
pub mod registers;

pub use frame::{Frame, FrameError, BYTES_PER_DEVICE, MAX_FRAME_SIZE};
pub use model::{ChainModel, DeviceState};
pub use registers::{Register, MAX_DEVICES, MAX_INTENSITY, MAX_SCAN_LIMIT, ROWS_PER_DEVICE};
