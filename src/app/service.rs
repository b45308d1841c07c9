//! Bridge service — the single owner of all bridge state.
//!
//! [`BridgeService`] owns the pin engine, control-value store, change
//! scanner and command router. Hardware, time and the link are injected at
//! call sites through port traits, so one tick is fully reproducible in
//! tests.
//!
//! ```text
//!  CommandSource ──▶ ┌──────────────────────────┐ ──▶ ResponseSink
//!                    │      BridgeService       │
//!        PinPort ◀──▶│ Router · Engine · Scanner│◀── ClockPort
//!                    └──────────────────────────┘
//! ```
//!
//! All mutation happens inside [`BridgeService::dispatch`] or
//! [`BridgeService::scan`], one at a time. A concurrent port must keep that
//! property by funnelling every call through one task.

use log::info;

use crate::config::BridgeConfig;
use crate::engine::{ChangeScanner, ControlValueStore, PinStateEngine};

use super::commands::{CommandCode, CommandFrame};
use super::events::{EventCode, Field, Frame};
use super::ports::{ClockPort, PinPort, ResponseSink};
use super::router::{CommandRouter, HandlerContext};

/// Where the service pulls complete commands from during a tick.
pub trait CommandSource {
    /// Next complete command buffered by the framing layer, if any.
    fn next_command(&mut self) -> Option<CommandFrame>;
}

pub struct BridgeService {
    config: BridgeConfig,
    router: CommandRouter,
    engine: PinStateEngine,
    controls: ControlValueStore,
    scanner: ChangeScanner,
    commands_handled: u64,
}

impl BridgeService {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            router: CommandRouter::new(&config),
            engine: PinStateEngine::new(config.debounce_ms),
            controls: ControlValueStore::new(),
            scanner: ChangeScanner::new(),
            commands_handled: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the (re)start to the host.
    pub fn start(&mut self, sink: &mut impl ResponseSink) {
        if self.config.announce_reset {
            sink.emit(&Frame::event(EventCode::Started).with(Field::Text("Reset")));
        }
        info!(
            "BridgeService started (protocol v{:.2}, debounce {} ms)",
            self.config.protocol_version, self.config.debounce_ms
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One update tick: dispatch every command the link has buffered, then
    /// run one scan pass.
    pub fn update<L>(&mut self, link: &mut L, hw: &mut impl PinPort, clock: &impl ClockPort)
    where
        L: CommandSource + ResponseSink,
    {
        while let Some(frame) = link.next_command() {
            self.dispatch(&frame, hw, link);
        }
        self.scan(hw, clock.now_ms(), link);
    }

    /// Dispatch one command and emit its response.
    pub fn dispatch(
        &mut self,
        frame: &CommandFrame,
        hw: &mut impl PinPort,
        sink: &mut impl ResponseSink,
    ) -> Option<CommandCode> {
        self.commands_handled += 1;
        let ctx = HandlerContext {
            engine: &mut self.engine,
            controls: &mut self.controls,
        };
        self.router.dispatch(frame, ctx, hw, sink)
    }

    /// One change-scan pass at `now_ms`. Returns the snapshot if reported.
    pub fn scan(
        &mut self,
        hw: &mut impl PinPort,
        now_ms: u32,
        sink: &mut impl ResponseSink,
    ) -> Option<u16> {
        self.scanner.scan(&mut self.engine, hw, now_ms, sink)
    }

    /// Publish a value computed by application logic as `21,<channel>,<value>`.
    pub fn report_custom_value(&self, channel: i16, value: f32, sink: &mut impl ResponseSink) {
        sink.emit(
            &Frame::event(EventCode::CustomValueChanged)
                .with(channel)
                .with(Field::Float(value)),
        );
    }

    // ── Queries ───────────────────────────────────────────────

    /// Scratch value set by the host, for application logic. Not reachable
    /// from any command.
    pub fn control_value(&self, channel: i16) -> Option<u16> {
        self.controls.get(channel)
    }

    pub fn input_mask(&self) -> u16 {
        self.engine.input_mask()
    }

    pub fn last_reported_inputs(&self) -> u16 {
        self.scanner.last_reported()
    }

    /// Commands dispatched since startup, unknown codes included.
    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }
}
