//! Host simulation: the production adapters wired the way `main()` wires
//! them, with a manual clock in place of the hardware timer.

use embedded_hal::digital::PinState;
use pinbridge::adapters::hardware::{HardwareAdapter, PinMode};
use pinbridge::adapters::log_sink::LogMirror;
use pinbridge::app::ports::PinPort;
use pinbridge::app::service::BridgeService;
use pinbridge::config::BridgeConfig;
use pinbridge::protocol::link::SerialLink;

use super::mock_hw::{ByteLink, ManualClock};

struct Sim {
    service: BridgeService,
    link: LogMirror<SerialLink<ByteLink>>,
    hw: HardwareAdapter,
    clock: ManualClock,
}

impl Sim {
    fn new(config: BridgeConfig) -> Self {
        let mut sim = Self {
            service: BridgeService::new(config),
            link: LogMirror::new(SerialLink::new(ByteLink::default())),
            hw: HardwareAdapter::new(),
            clock: ManualClock::default(),
        };
        sim.service.start(&mut sim.link);
        sim
    }

    fn exchange(&mut self, now_ms: u32, bytes: &str) -> String {
        self.link.inner_mut().transport_mut().inbound.extend(bytes.bytes());
        self.clock.set(now_ms);
        self.service.update(&mut self.link, &mut self.hw, &self.clock);
        let out = std::mem::take(&mut self.link.inner_mut().transport_mut().outbound);
        String::from_utf8(out).unwrap_or_default()
    }
}

#[test]
fn banner_then_commands_through_production_adapters() {
    let mut sim = Sim::new(BridgeConfig::default());
    assert_eq!(sim.exchange(0, "1;"), "23,Reset\r1,1.10\r");

    assert_eq!(sim.exchange(1, "5,4,1;"), "5,4,1\r");
    assert_eq!(sim.hw.mode(4), PinMode::Output);
    assert_eq!(sim.hw.read_level(4), PinState::High);

    assert_eq!(sim.exchange(2, "4,5,128;"), "4,5,128\r");
    assert_eq!(sim.hw.mode(5), PinMode::Pwm(0));
    assert_eq!(sim.hw.duty(5), 128);

    // A digital write takes the pin back from LEDC.
    assert_eq!(sim.exchange(3, "5,5,0;"), "5,5,0\r");
    assert_eq!(sim.hw.mode(5), PinMode::Output);
}

#[test]
fn masked_input_is_pulled_up_and_reported() {
    let mut sim = Sim::new(BridgeConfig::default());
    sim.exchange(0, "");

    assert_eq!(sim.exchange(0, "3,8;"), "3,0,0,0,0,0,0,0,0,0,0,0,0,0,0\r");
    assert_eq!(sim.hw.mode(3), PinMode::InputPullup);

    sim.hw.sim_set_level(3, true);
    assert_eq!(sim.exchange(10, ""), "");
    assert_eq!(sim.exchange(70, ""), "20,8\r");

    assert_eq!(sim.exchange(80, "5,3,0;"), "5,3,0\r");
    assert_eq!(sim.hw.mode(3), PinMode::InputPullup);
}

#[test]
fn json_config_changes_version_and_analog_bank() {
    let config = BridgeConfig::from_json(
        r#"{"protocol_version": 2.5, "analog_channels": 2, "announce_reset": false}"#,
    )
    .expect("valid config");
    let mut sim = Sim::new(config);
    sim.hw.sim_set_analog(0, 11);
    sim.hw.sim_set_analog(1, 22);

    assert_eq!(sim.exchange(0, "1;2;"), "1,2.50\r2,11,22\r");
}

#[test]
fn custom_value_event_reaches_the_link() {
    let mut sim = Sim::new(BridgeConfig::default());
    sim.exchange(0, "");
    sim.service.report_custom_value(2, 3.5, &mut sim.link);
    let out = std::mem::take(&mut sim.link.inner_mut().transport_mut().outbound);
    assert_eq!(out, b"21,2,3.50\r");
}
