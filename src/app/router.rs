//! Command router — maps command codes to handlers.
//!
//! The code → [`CommandCode`] table is built once in [`CommandRouter::new`];
//! dispatch is a table lookup followed by a match on the tag. Each handler
//! reads its fixed argument list from an [`ArgCursor`] and always emits
//! exactly one frame. Codes with no entry answer `99`.

use heapless::FnvIndexMap;
use log::{debug, warn};

use crate::config::BridgeConfig;
use crate::engine::{ControlValueStore, PinStateEngine};

use super::commands::{ArgCursor, CommandCode, CommandFrame};
use super::events::{EventCode, Field, Frame};
use super::ports::{PinPort, ResponseSink};

/// Mutable state the handlers operate on.
pub struct HandlerContext<'a> {
    pub engine: &'a mut PinStateEngine,
    pub controls: &'a mut ControlValueStore,
}

pub struct CommandRouter {
    table: FnvIndexMap<i16, CommandCode, 8>,
    protocol_version: f32,
    analog_channels: u8,
}

impl CommandRouter {
    pub fn new(config: &BridgeConfig) -> Self {
        let mut table = FnvIndexMap::new();
        for cmd in CommandCode::ALL {
            // Capacity 8 holds every command code.
            let _ = table.insert(cmd.code(), cmd);
        }
        Self {
            table,
            protocol_version: config.protocol_version,
            analog_channels: config.analog_channels,
        }
    }

    /// Handler registered for `code`, if any.
    pub fn lookup(&self, code: i16) -> Option<CommandCode> {
        self.table.get(&code).copied()
    }

    /// Run the handler for `frame`, or the unknown-command fallback.
    /// Returns the command that ran.
    pub fn dispatch(
        &self,
        frame: &CommandFrame,
        ctx: HandlerContext<'_>,
        hw: &mut impl PinPort,
        sink: &mut impl ResponseSink,
    ) -> Option<CommandCode> {
        let Some(cmd) = frame.code.and_then(|code| self.lookup(code)) else {
            warn!("unknown command {:?}", frame.code);
            sink.emit(&Frame::event(EventCode::UnknownCommand));
            return None;
        };

        let mut args = frame.cursor();
        debug!("dispatch {:?} args={:?}", cmd, frame.args.as_slice());
        match cmd {
            CommandCode::Version => self.version(sink),
            CommandCode::ReadAnalog => self.read_analog(hw, sink),
            CommandCode::ReadInputs => read_inputs(&mut args, ctx, hw, sink),
            CommandCode::WriteAnalog => write_analog(&mut args, ctx, hw, sink),
            CommandCode::WriteOutput => write_output(&mut args, ctx, hw, sink),
            CommandCode::WriteOutputs => write_outputs(&mut args, ctx, hw, sink),
            CommandCode::SetControlValue => set_control_value(&mut args, ctx, sink),
        }
        let received = frame.args.len();
        debug_assert_eq!(received - args.remaining(), cmd.arity().min(received));
        if received < cmd.arity() {
            debug!("{:?}: {} of {} args, rest read as 0", cmd, received, cmd.arity());
        } else if args.remaining() > 0 {
            debug!("{:?}: {} trailing args ignored", cmd, args.remaining());
        }
        Some(cmd)
    }

    // ── Handlers ──────────────────────────────────────────────

    fn version(&self, sink: &mut impl ResponseSink) {
        let version = Field::Float(self.protocol_version);
        sink.emit(&Frame::new(CommandCode::Version.code()).with(version));
    }

    fn read_analog(&self, hw: &mut impl PinPort, sink: &mut impl ResponseSink) {
        let mut frame = Frame::new(CommandCode::ReadAnalog.code());
        for channel in 0..self.analog_channels {
            frame.push(hw.read_analog(channel));
        }
        sink.emit(&frame);
    }
}

fn read_inputs(
    args: &mut ArgCursor<'_>,
    ctx: HandlerContext<'_>,
    hw: &mut impl PinPort,
    sink: &mut impl ResponseSink,
) {
    let mask = args.read_u16();
    ctx.engine.read_inputs(mask, hw, sink);
}

fn write_analog(
    args: &mut ArgCursor<'_>,
    ctx: HandlerContext<'_>,
    hw: &mut impl PinPort,
    sink: &mut impl ResponseSink,
) {
    let pin = args.read_i16();
    let duty = args.read_i16();
    ctx.engine.write_analog(pin, duty, hw, sink);
}

fn write_output(
    args: &mut ArgCursor<'_>,
    ctx: HandlerContext<'_>,
    hw: &mut impl PinPort,
    sink: &mut impl ResponseSink,
) {
    let pin = args.read_i16();
    let state = args.read_i16();
    ctx.engine.write_output(pin, state, hw, sink);
}

fn write_outputs(
    args: &mut ArgCursor<'_>,
    ctx: HandlerContext<'_>,
    hw: &mut impl PinPort,
    sink: &mut impl ResponseSink,
) {
    let type_mask = args.read_i16();
    let value_mask = args.read_i16();
    ctx.engine.write_outputs(type_mask, value_mask, hw, sink);
}

fn set_control_value(
    args: &mut ArgCursor<'_>,
    ctx: HandlerContext<'_>,
    sink: &mut impl ResponseSink,
) {
    let channel = args.read_i16();
    let value = args.read_u16();
    ctx.controls.set(channel, value, sink);
}
