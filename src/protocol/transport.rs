//! Transport abstraction — any non-blocking byte channel.
//!
//! The device uses a UART (`adapters::uart::UartTransport`);
//! tests and simulation plug in in-memory channels. [`SerialLink`](super::link::SerialLink)
//! is generic over `Transport`, so the command path never sees the difference.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Queue all of `data` for transmission. Returns once the bytes are
    /// buffered; never waits for them to leave the wire.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}
