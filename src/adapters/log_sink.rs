//! Frame-logging decorator.
//!
//! [`LogMirror`] wraps any link that is both a [`CommandSource`] and a
//! [`ResponseSink`] and mirrors traffic to the ESP-IDF logger at debug
//! level. The console runs on USB-JTAG, so mirrored lines never interleave
//! with the host protocol on the link UART.

use core::fmt::Write;

use log::{debug, log_enabled, Level};

use crate::app::commands::CommandFrame;
use crate::app::events::{Field, Frame};
use crate::app::ports::ResponseSink;
use crate::app::service::CommandSource;

pub struct LogMirror<L> {
    inner: L,
}

impl<L> LogMirror<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }
}

impl<L: CommandSource> CommandSource for LogMirror<L> {
    fn next_command(&mut self) -> Option<CommandFrame> {
        let frame = self.inner.next_command()?;
        match frame.code {
            Some(code) => debug!("RX | {} {:?}", code, frame.args.as_slice()),
            None => debug!("RX | <no code> {:?}", frame.args.as_slice()),
        }
        Some(frame)
    }
}

impl<L: ResponseSink> ResponseSink for LogMirror<L> {
    fn emit(&mut self, frame: &Frame) {
        if log_enabled!(Level::Debug) {
            let mut line: heapless::String<96> = heapless::String::new();
            for field in &frame.fields {
                // A truncated log line is fine; the link copy is unaffected.
                let _ = match field {
                    Field::Int(v) => write!(line, " {}", v),
                    Field::Float(v) => write!(line, " {:.2}", v),
                    Field::Text(s) => write!(line, " {}", s),
                };
            }
            debug!("TX | {}{}", frame.code, line);
        }
        self.inner.emit(frame);
    }
}
