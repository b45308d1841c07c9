//! pinbridge firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  UartTransport ─▶ SerialLink ─▶ LogMirror                │
//! │  HardwareAdapter (PinPort)   Esp32TimeAdapter (ClockPort)│
//! │                                                          │
//! │  ─────────────── Port trait boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │          BridgeService (pure logic)                │  │
//! │  │  Router · PinStateEngine · Controls · Scanner      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use pinbridge::adapters::hardware::HardwareAdapter;
use pinbridge::adapters::log_sink::LogMirror;
use pinbridge::adapters::time::Esp32TimeAdapter;
use pinbridge::adapters::uart::UartTransport;
use pinbridge::app::service::BridgeService;
use pinbridge::config::BridgeConfig;
use pinbridge::drivers::hw_init;
use pinbridge::protocol::link::SerialLink;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  pinbridge v{:<25}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (no persistence: always defaults) ───────────
    let config = BridgeConfig::default();
    config.validate()?;
    let snapshot = config.snapshot()?;
    info!("config: {:?} ({} bytes: {:02x?})", config, snapshot.len(), snapshot);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(pinbridge::Error::from)?;
    let peripherals = Peripherals::take()?;
    let transport = UartTransport::new(
        peripherals.uart1,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        config.baud_rate,
    )?;

    let mut link = LogMirror::new(SerialLink::new(transport));
    let mut hw = HardwareAdapter::new();
    let clock = Esp32TimeAdapter::new();

    // ── 4. Service ────────────────────────────────────────────
    let interval_ms = config.update_interval_ms;
    let mut service = BridgeService::new(config);
    service.start(&mut link);

    // ── 5. Update loop ────────────────────────────────────────
    loop {
        service.update(&mut link, &mut hw, &clock);
        FreeRtos::delay_ms(interval_ms);
    }
}
