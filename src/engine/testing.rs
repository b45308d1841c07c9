//! In-crate test doubles shared by the engine and router unit tests.

use embedded_hal::digital::PinState;

use crate::app::events::Frame;
use crate::app::ports::{PinPort, ResponseSink};
use crate::pins::{ANALOG_CHANNEL_COUNT, PIN_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    InputPullup(u8),
    Output(u8),
    Read(u8),
    Write(u8, bool),
    Pwm(u8, u8),
}

/// Pins whose levels are set by the test; every call is recorded.
pub struct FakePins {
    levels: [bool; PIN_COUNT],
    pub analog: [u16; ANALOG_CHANNEL_COUNT],
    pub ops: Vec<PinOp>,
}

impl FakePins {
    pub fn new() -> Self {
        Self {
            levels: [false; PIN_COUNT],
            analog: [0; ANALOG_CHANNEL_COUNT],
            ops: Vec::new(),
        }
    }

    pub fn set_level(&mut self, pin: u8, high: bool) {
        self.levels[usize::from(pin)] = high;
    }

    /// Recorded ops other than reads.
    pub fn effects(&self) -> Vec<PinOp> {
        self.ops
            .iter()
            .copied()
            .filter(|op| !matches!(op, PinOp::Read(_)))
            .collect()
    }
}

impl PinPort for FakePins {
    fn set_input_pullup(&mut self, pin: u8) {
        self.ops.push(PinOp::InputPullup(pin));
    }

    fn set_output(&mut self, pin: u8) {
        self.ops.push(PinOp::Output(pin));
    }

    fn read_level(&mut self, pin: u8) -> PinState {
        self.ops.push(PinOp::Read(pin));
        PinState::from(self.levels[usize::from(pin)])
    }

    fn write_level(&mut self, pin: u8, state: PinState) {
        self.ops.push(PinOp::Write(pin, state == PinState::High));
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        self.analog[usize::from(channel)]
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) {
        self.ops.push(PinOp::Pwm(pin, duty));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl ResponseSink for RecordingSink {
    fn emit(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
