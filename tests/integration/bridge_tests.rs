//! End-to-end command tests: host bytes in, device bytes out.
//!
//! Every test drives a started [`BridgeService`] through a real
//! [`SerialLink`] over the in-memory [`ByteLink`](super::mock_hw::ByteLink).

use super::mock_hw::{Bench, PinCall};

/// Tick every `step` ms over `[from, to]`, collecting all output.
fn run(bench: &mut Bench, from: u32, to: u32, step: u32) -> String {
    let mut out = String::new();
    let mut t = from;
    while t <= to {
        out.push_str(&bench.tick(t));
        t += step;
    }
    out
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_announces_reset_once() {
    let mut bench = Bench::new();
    // Bench::new drains the first banner; a restart announces again.
    bench.service.start(&mut bench.link);
    assert_eq!(bench.take_output(), "23,Reset\r");
    assert_eq!(bench.tick(0), "");
}

// ── Query commands ────────────────────────────────────────────

#[test]
fn version_is_stable_across_calls() {
    let mut bench = Bench::new();
    for _ in 0..3 {
        assert_eq!(bench.exchange("1;"), "1,1.10\r");
    }
}

#[test]
fn analog_read_reports_six_channels() {
    let mut bench = Bench::new();
    bench.pins.analog = [10, 20, 30, 40, 50, 4095];
    assert_eq!(bench.exchange("2;"), "2,10,20,30,40,50,4095\r");
}

#[test]
fn unknown_code_gets_99_and_no_hardware_effect() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("42;"), "99\r");
    assert_eq!(bench.exchange("8,1,2;"), "99\r");
    assert!(bench.pins.calls.is_empty());
}

#[test]
fn several_commands_in_one_burst_answer_in_order() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("1;5,4,1;7,0,3;"), "1,1.10\r5,4,1\r7,0,3\r");
}

#[test]
fn command_split_across_ticks_is_reassembled() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("5,4"), "");
    assert_eq!(bench.exchange(",1;"), "5,4,1\r");
}

// ── Writes ────────────────────────────────────────────────────

#[test]
fn write_to_link_pin_is_echoed_without_effect() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("5,0,1;"), "5,0,1\r");
    assert_eq!(bench.exchange("5,1,1;"), "5,1,1\r");
    assert!(bench.pins.writes().is_empty());
}

#[test]
fn write_out_of_range_pin_is_echoed_without_effect() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("5,14,1;"), "5,14,1\r");
    assert_eq!(bench.exchange("5,-3,1;"), "5,-3,1\r");
    assert_eq!(bench.exchange("4,20,100;"), "4,20,100\r");
    assert!(bench.pins.writes().is_empty());
}

#[test]
fn write_output_drives_pin() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("5,4,1;"), "5,4,1\r");
    assert_eq!(bench.exchange("5,4,0;"), "5,4,0\r");
    assert_eq!(
        bench.pins.writes(),
        vec![PinCall::Write(4, true), PinCall::Write(4, false)]
    );
}

#[test]
fn pwm_duty_is_clamped_but_echoed_raw() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("4,5,300;"), "4,5,300\r");
    assert_eq!(bench.exchange("4,6,-4;"), "4,6,-4\r");
    assert_eq!(
        bench.pins.writes(),
        vec![PinCall::Pwm(5, 255), PinCall::Pwm(6, 0)]
    );
}

#[test]
fn bulk_write_with_empty_type_mask_echoes_zero_values() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("6,0,5;"), "6,0,0\r");
    assert!(bench.pins.writes().is_empty());
}

#[test]
fn bulk_write_drives_selected_pins() {
    let mut bench = Bench::new();
    // type: pins 2,3 · value: pin 3 high
    assert_eq!(bench.exchange("6,12,8;"), "6,12,8\r");
    assert_eq!(
        bench.pins.writes(),
        vec![PinCall::Write(2, false), PinCall::Write(3, true)]
    );
}

#[test]
fn bulk_write_skips_inputs_and_link_pins() {
    let mut bench = Bench::new();
    bench.exchange("3,4;");
    // type: pins 0,2,3 · value: pins 0,2,3
    assert_eq!(bench.exchange("6,13,13;"), "6,9,9\r");
    assert_eq!(bench.pins.writes(), vec![PinCall::Write(3, true)]);
}

#[test]
fn input_pins_refuse_single_writes() {
    let mut bench = Bench::new();
    bench.exchange("3,8;");
    assert_eq!(bench.exchange("5,3,1;"), "5,3,1\r");
    assert_eq!(bench.exchange("4,3,99;"), "4,3,99\r");
    assert!(bench.pins.writes().is_empty());
}

// ── Control values ────────────────────────────────────────────

#[test]
fn control_value_out_of_range_is_echoed_not_stored() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("7,15,9;"), "7,15,9\r");
    for ch in 0..10 {
        assert_eq!(bench.service.control_value(ch), Some(0));
    }
    assert_eq!(bench.service.control_value(15), None);
}

#[test]
fn control_value_in_range_is_stored() {
    let mut bench = Bench::new();
    assert_eq!(bench.exchange("7,3,42;"), "7,3,42\r");
    assert_eq!(bench.service.control_value(3), Some(42));
}

// ── Masked read and change events ─────────────────────────────

#[test]
fn masked_read_reports_fourteen_levels() {
    let mut bench = Bench::new();
    bench.pins.set_level(2, true);
    bench.pins.set_level(5, true);
    assert_eq!(
        bench.exchange("3,4;"),
        "3,0,0,1,0,0,0,0,0,0,0,0,0,0,0\r"
    );
    assert_eq!(bench.service.input_mask(), 4);
    assert!(bench.pins.calls.contains(&PinCall::InputPullup(2)));
    assert!(!bench.pins.calls.contains(&PinCall::InputPullup(5)));
}

#[test]
fn masked_read_never_samples_link_pins() {
    let mut bench = Bench::new();
    bench.pins.set_level(0, true);
    bench.pins.set_level(1, true);
    assert_eq!(
        bench.exchange("3,3;"),
        "3,0,0,0,0,0,0,0,0,0,0,0,0,0,0\r"
    );
    assert!(bench.pins.calls.is_empty());
}

#[test]
fn stable_toggle_reports_one_event_per_change() {
    let mut bench = Bench::new();
    bench.exchange("3,4;");
    assert_eq!(run(&mut bench, 0, 90, 10), "");

    bench.pins.set_level(2, true);
    assert_eq!(run(&mut bench, 100, 300, 10), "20,4\r");

    bench.pins.set_level(2, false);
    assert_eq!(run(&mut bench, 310, 500, 10), "20,0\r");
    assert_eq!(bench.service.last_reported_inputs(), 0);
}

#[test]
fn bounces_below_threshold_are_silent() {
    let mut bench = Bench::new();
    bench.exchange("3,4;");
    run(&mut bench, 0, 90, 10);

    let mut out = String::new();
    for (i, t) in (100..400).step_by(10).enumerate() {
        // flip every 40 ms, never stable for longer than the window
        bench.pins.set_level(2, (i / 4) % 2 == 0);
        out.push_str(&bench.tick(t));
    }
    assert_eq!(out, "");
}

#[test]
fn two_pins_share_one_snapshot() {
    let mut bench = Bench::new();
    bench.exchange("3,4100;"); // pins 2 and 12
    run(&mut bench, 0, 90, 10);

    bench.pins.set_level(12, true);
    assert_eq!(run(&mut bench, 100, 200, 10), "20,4096\r");
    bench.pins.set_level(2, true);
    assert_eq!(run(&mut bench, 210, 300, 10), "20,4100\r");
}

#[test]
fn debounce_resolves_across_clock_rollover() {
    let mut bench = Bench::new();
    let start = u32::MAX - 100;
    bench.tick(start);
    bench.exchange("3,4;");
    bench.tick(start.wrapping_add(10));

    bench.pins.set_level(2, true);
    let t0 = u32::MAX - 20;
    assert_eq!(bench.tick(t0), "");
    assert_eq!(bench.tick(t0.wrapping_add(30)), "");
    assert_eq!(bench.tick(t0.wrapping_add(51)), "20,4\r");
    assert_eq!(bench.tick(t0.wrapping_add(200)), "");
}

#[test]
fn clearing_the_mask_stops_scanning() {
    let mut bench = Bench::new();
    bench.exchange("3,4;");
    bench.exchange("3,0;");
    bench.pins.calls.clear();

    bench.pins.set_level(2, true);
    assert_eq!(run(&mut bench, 0, 500, 10), "");
    assert!(bench.pins.calls.is_empty());
}
