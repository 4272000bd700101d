//! Test doubles: output pins wired to a chain model, and a recording SPI device

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use embedded_hal::digital::{self, ErrorKind, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};
use ledchain_protocol::{ChainModel, Frame};

/// Bus line a mock pin drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Select,
}

impl Line {
    fn index(self) -> usize {
        match self {
            Line::Data => 0,
            Line::Clock => 1,
            Line::Select => 2,
        }
    }
}

struct WireState {
    levels: [bool; 3],
    log: Vec<(Line, bool)>,
    bits: Vec<bool>,
    model: ChainModel,
    frames: Vec<Frame>,
    failing: Option<Line>,
}

/// The three bus lines, feeding a [`ChainModel`] as the real chips would
#[derive(Clone)]
pub struct Wire {
    state: Rc<RefCell<WireState>>,
}

impl Wire {
    pub fn new(device_count: u8) -> Self {
        Self {
            state: Rc::new(RefCell::new(WireState {
                levels: [false; 3],
                log: Vec::new(),
                bits: Vec::new(),
                model: ChainModel::new(device_count),
                frames: Vec::new(),
                failing: None,
            })),
        }
    }

    /// (data, clock, select) pins
    pub fn pins(&self) -> (MockPin, MockPin, MockPin) {
        (
            MockPin::new(self, Line::Data),
            MockPin::new(self, Line::Clock),
            MockPin::new(self, Line::Select),
        )
    }

    /// Make every further write to `line` fail
    pub fn fail(&self, line: Line) {
        self.state.borrow_mut().failing = Some(line);
    }

    pub fn level(&self, line: Line) -> bool {
        self.state.borrow().levels[line.index()]
    }

    pub fn log(&self) -> Vec<(Line, bool)> {
        self.state.borrow().log.clone()
    }

    /// Forget pin history and captured frames (the model keeps its state)
    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.log.clear();
        state.bits.clear();
        state.frames.clear();
    }

    /// Data level sampled at every clock rising edge
    pub fn clocked_bits(&self) -> Vec<bool> {
        self.state.borrow().bits.clone()
    }

    /// Sampled bits packed MSB first
    pub fn clocked_bytes(&self) -> Vec<u8> {
        self.state
            .borrow()
            .bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }

    /// Frames latched by the model
    pub fn frames(&self) -> Vec<Frame> {
        self.state.borrow().frames.clone()
    }

    pub fn model(&self) -> Ref<'_, ChainModel> {
        Ref::map(self.state.borrow(), |state| &state.model)
    }

    fn drive(&self, line: Line, level: bool) -> Result<(), ErrorKind> {
        let mut state = self.state.borrow_mut();
        if state.failing == Some(line) {
            return Err(ErrorKind::Other);
        }

        state.log.push((line, level));
        let previous = state.levels[line.index()];
        state.levels[line.index()] = level;

        match line {
            Line::Data => {}
            Line::Clock => {
                if !previous && level {
                    let bit = state.levels[Line::Data.index()];
                    state.bits.push(bit);
                    state.model.clock_in(bit);
                }
            }
            Line::Select => {
                if previous && !level {
                    state.model.select();
                } else if !previous && level {
                    let latched = state.model.latch().cloned();
                    if let Some(frame) = latched {
                        state.frames.push(frame);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Output pin driving one line of a [`Wire`]
pub struct MockPin {
    wire: Wire,
    line: Line,
}

impl MockPin {
    fn new(wire: &Wire, line: Line) -> Self {
        Self {
            wire: wire.clone(),
            line,
        }
    }
}

impl digital::ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.drive(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.drive(self.line, true)
    }
}

/// SPI device that records every write transaction
#[derive(Default)]
pub struct MockSpi {
    pub transactions: Vec<Vec<u8>>,
    pub fail: bool,
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(spi::ErrorKind::Other);
        }

        let mut written = Vec::new();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                written.extend_from_slice(bytes);
            }
        }
        self.transactions.push(written);
        Ok(())
    }
}
