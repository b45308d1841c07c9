//! Fuzz target: whole command path
//!
//! Feeds arbitrary bytes through `SerialLink` into a `BridgeService` backed
//! by the host-simulated `HardwareAdapter`. Every response must fit the
//! encoder's buffer and end in `\r`.
//!
//! cargo fuzz run fuzz_bridge_session

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinbridge::adapters::hardware::HardwareAdapter;
use pinbridge::app::ports::ClockPort;
use pinbridge::app::service::BridgeService;
use pinbridge::config::BridgeConfig;
use pinbridge::protocol::codec::MAX_RESPONSE_LEN;
use pinbridge::protocol::link::SerialLink;
use pinbridge::protocol::transport::Transport;

#[derive(Default)]
struct Wire {
    rx: Vec<u8>,
    tx: Vec<u8>,
}

impl Transport for Wire {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.rx.len());
        buf[..n].copy_from_slice(&self.rx[..n]);
        self.rx.drain(..n);
        Ok(n)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        assert!(data.len() <= MAX_RESPONSE_LEN);
        assert_eq!(data.last(), Some(&b'\r'));
        self.tx.extend_from_slice(data);
        Ok(())
    }
}

struct Fixed(u32);

impl ClockPort for Fixed {
    fn now_ms(&self) -> u32 {
        self.0
    }
}

fuzz_target!(|data: &[u8]| {
    let mut service = BridgeService::new(BridgeConfig::default());
    let mut link = SerialLink::new(Wire::default());
    let mut hw = HardwareAdapter::new();

    service.start(&mut link);
    for (i, chunk) in data.chunks(32).enumerate() {
        link.transport_mut().rx.extend_from_slice(chunk);
        service.update(&mut link, &mut hw, &Fixed(i as u32 * 7));
    }
});
