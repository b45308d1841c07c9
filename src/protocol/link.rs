//! Serial link — a [`Transport`] plus the command decoder and response
//! encoder.
//!
//! The link is both the [`CommandSource`] and the [`ResponseSink`] handed
//! to [`BridgeService::update`](crate::app::service::BridgeService::update):
//! commands are pulled from the transport on demand, responses are encoded
//! and written straight back. Write failures are logged and the frame is
//! dropped; nothing is retried.

use log::warn;

use crate::app::commands::CommandFrame;
use crate::app::events::Frame;
use crate::app::ports::ResponseSink;
use crate::app::service::CommandSource;

use super::codec::{CommandDecoder, encode_frame};
use super::transport::Transport;

/// Bytes pulled from the transport per read.
const RX_CHUNK: usize = 64;

pub struct SerialLink<T: Transport> {
    transport: T,
    decoder: CommandDecoder,
    rx_buf: [u8; RX_CHUNK],
    rx_len: usize,
    rx_pos: usize,
    frames_sent: u32,
    frames_dropped: u32,
}

impl<T: Transport> SerialLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: CommandDecoder::new(),
            rx_buf: [0; RX_CHUNK],
            rx_len: 0,
            rx_pos: 0,
            frames_sent: 0,
            frames_dropped: 0,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Response frames written successfully.
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Response frames lost to encode or write errors.
    pub fn frames_dropped(&self) -> u32 {
        self.frames_dropped
    }

    /// Drop buffered input and any partial command (e.g. after a UART reset).
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.rx_len = 0;
        self.rx_pos = 0;
    }

    fn refill(&mut self) -> bool {
        match self.transport.read(&mut self.rx_buf) {
            Ok(n) => {
                self.rx_len = n.min(RX_CHUNK);
                self.rx_pos = 0;
                n > 0
            }
            Err(e) => {
                warn!("link read failed: {:?}", e);
                false
            }
        }
    }
}

impl<T: Transport> CommandSource for SerialLink<T> {
    fn next_command(&mut self) -> Option<CommandFrame> {
        loop {
            while self.rx_pos < self.rx_len {
                let byte = self.rx_buf[self.rx_pos];
                self.rx_pos += 1;
                match self.decoder.push(byte) {
                    Some(Ok(frame)) => return Some(frame),
                    Some(Err(e)) => warn!("command dropped: {}", e),
                    None => {}
                }
            }
            if !self.refill() {
                return None;
            }
        }
    }
}

impl<T: Transport> ResponseSink for SerialLink<T> {
    fn emit(&mut self, frame: &Frame) {
        let encoded = match encode_frame(frame) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("frame {} not encoded: {}", frame.code, e);
                self.frames_dropped += 1;
                return;
            }
        };
        match self.transport.write_all(encoded.as_bytes()) {
            Ok(()) => self.frames_sent += 1,
            Err(e) => {
                warn!("frame {} not written: {:?}", frame.code, e);
                self.frames_dropped += 1;
            }
        }
    }
}
