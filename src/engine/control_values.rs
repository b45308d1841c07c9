//! Ten-slot scratch register bank set by the host.
//!
//! The bridge never interprets these values; they exist for application
//! logic layered on top (see [`BridgeService::control_value`]).
//!
//! [`BridgeService::control_value`]: crate::app::service::BridgeService::control_value

use log::debug;

use crate::app::commands::CommandCode;
use crate::app::events::Frame;
use crate::app::ports::ResponseSink;

pub const CONTROL_VALUE_SLOTS: usize = 10;

#[derive(Debug, Default)]
pub struct ControlValueStore {
    values: [u16; CONTROL_VALUE_SLOTS],
}

impl ControlValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` when `channel` is in range, then echo `(channel, value)`
    /// as received either way. Returns `true` if a slot was written.
    pub fn set(&mut self, channel: i16, value: u16, sink: &mut impl ResponseSink) -> bool {
        let slot = usize::try_from(channel)
            .ok()
            .and_then(|i| self.values.get_mut(i));
        let stored = match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                debug!("control value channel {} out of range", channel);
                false
            }
        };
        sink.emit(
            &Frame::new(CommandCode::SetControlValue.code())
                .with(channel)
                .with(value),
        );
        stored
    }

    pub fn get(&self, channel: i16) -> Option<u16> {
        usize::try_from(channel)
            .ok()
            .and_then(|i| self.values.get(i))
            .copied()
    }
}
