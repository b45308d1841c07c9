//! Mock adapters for integration tests.
//!
//! [`SimPins`] records every pin call so tests can assert on hardware side
//! effects, [`ByteLink`] is an in-memory serial line and [`Bench`] wires
//! both to a [`BridgeService`] behind a real [`SerialLink`].

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::PinState;
use pinbridge::app::ports::{ClockPort, PinPort};
use pinbridge::app::service::BridgeService;
use pinbridge::config::BridgeConfig;
use pinbridge::protocol::link::SerialLink;
use pinbridge::protocol::transport::Transport;

// ── Pin call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PinCall {
    InputPullup(u8),
    Output(u8),
    Write(u8, bool),
    Pwm(u8, u8),
}

// ── SimPins ───────────────────────────────────────────────────

pub struct SimPins {
    levels: [bool; 14],
    pub analog: [u16; 6],
    pub calls: Vec<PinCall>,
}

#[allow(dead_code)]
impl SimPins {
    pub fn new() -> Self {
        Self {
            levels: [false; 14],
            analog: [0; 6],
            calls: Vec::new(),
        }
    }

    pub fn set_level(&mut self, pin: u8, high: bool) {
        self.levels[usize::from(pin)] = high;
    }

    pub fn level(&self, pin: u8) -> bool {
        self.levels[usize::from(pin)]
    }

    /// Calls that changed output state (writes and PWM).
    pub fn writes(&self) -> Vec<PinCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, PinCall::Write(..) | PinCall::Pwm(..)))
            .cloned()
            .collect()
    }
}

impl Default for SimPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinPort for SimPins {
    fn set_input_pullup(&mut self, pin: u8) {
        self.calls.push(PinCall::InputPullup(pin));
    }

    fn set_output(&mut self, pin: u8) {
        self.calls.push(PinCall::Output(pin));
    }

    fn read_level(&mut self, pin: u8) -> PinState {
        PinState::from(self.levels[usize::from(pin)])
    }

    fn write_level(&mut self, pin: u8, state: PinState) {
        let high = state == PinState::High;
        self.levels[usize::from(pin)] = high;
        self.calls.push(PinCall::Write(pin, high));
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        self.analog[usize::from(channel)]
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) {
        self.calls.push(PinCall::Pwm(pin, duty));
    }
}

// ── ManualClock ───────────────────────────────────────────────

#[derive(Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

// ── ByteLink ──────────────────────────────────────────────────

/// In-memory serial line: tests push host bytes in, read device bytes out.
#[derive(Default)]
pub struct ByteLink {
    pub inbound: VecDeque<u8>,
    pub outbound: Vec<u8>,
}

impl Transport for ByteLink {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = buf.len().min(self.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(self.inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.outbound.extend_from_slice(data);
        Ok(())
    }
}

// ── Bench ─────────────────────────────────────────────────────

pub struct Bench {
    pub service: BridgeService,
    pub link: SerialLink<ByteLink>,
    pub pins: SimPins,
    pub clock: ManualClock,
}

#[allow(dead_code)]
impl Bench {
    /// A started bridge with the `23,Reset` banner already drained.
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        let mut bench = Self {
            service: BridgeService::new(config),
            link: SerialLink::new(ByteLink::default()),
            pins: SimPins::new(),
            clock: ManualClock::default(),
        };
        bench.service.start(&mut bench.link);
        bench.take_output();
        bench
    }

    pub fn send(&mut self, bytes: &str) {
        self.link.transport_mut().inbound.extend(bytes.bytes());
    }

    /// Run one update tick at `now_ms` and return everything the device sent.
    pub fn tick(&mut self, now_ms: u32) -> String {
        self.clock.set(now_ms);
        self.service.update(&mut self.link, &mut self.pins, &self.clock);
        self.take_output()
    }

    /// Send `bytes`, run one tick at the current clock and return the reply.
    pub fn exchange(&mut self, bytes: &str) -> String {
        self.send(bytes);
        let now = self.clock.now_ms();
        self.tick(now)
    }

    pub fn take_output(&mut self) -> String {
        let out = std::mem::take(&mut self.link.transport_mut().outbound);
        String::from_utf8(out).unwrap_or_default()
    }
}
