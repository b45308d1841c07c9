//! Hardware adapter — the [`PinPort`] over real GPIO, ADC1 and LEDC.
//!
//! Logical pins are translated through [`pins::DIGITAL_GPIO`]. PWM outputs
//! take an LEDC channel on first use; once all channels are taken a pin
//! falls back to digital output, high for duty ≥ 128.
//!
//! On non-espidf targets the adapter simulates the header in memory:
//! outputs latch their level, inputs return whatever the simulation set.

use embedded_hal::digital::PinState;
use log::warn;

use crate::app::ports::PinPort;
use crate::drivers::hw_init::{self, LEDC_CHANNELS};
use crate::pins::{self, ANALOG_CHANNEL_COUNT, PIN_COUNT};

/// Current electrical role of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Unconfigured,
    InputPullup,
    Output,
    /// Driven by the given LEDC channel.
    Pwm(u8),
}

pub struct HardwareAdapter {
    modes: [PinMode; PIN_COUNT],
    ledc_owner: [Option<u8>; LEDC_CHANNELS as usize],
    duties: [u8; PIN_COUNT],
    #[cfg(not(target_os = "espidf"))]
    levels: [bool; PIN_COUNT],
    #[cfg(not(target_os = "espidf"))]
    analog: [u16; ANALOG_CHANNEL_COUNT],
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            modes: [PinMode::Unconfigured; PIN_COUNT],
            ledc_owner: [None; LEDC_CHANNELS as usize],
            duties: [0; PIN_COUNT],
            #[cfg(not(target_os = "espidf"))]
            levels: [false; PIN_COUNT],
            #[cfg(not(target_os = "espidf"))]
            analog: [0; ANALOG_CHANNEL_COUNT],
        }
    }

    pub fn mode(&self, pin: u8) -> PinMode {
        self.modes[usize::from(pin)]
    }

    /// Last duty written to `pin` (0 when never driven as PWM).
    pub fn duty(&self, pin: u8) -> u8 {
        self.duties[usize::from(pin)]
    }

    /// Simulated external level on `pin` (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_level(&mut self, pin: u8, high: bool) {
        self.levels[usize::from(pin)] = high;
    }

    /// Simulated ADC reading on `channel` (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_analog(&mut self, channel: u8, value: u16) {
        self.analog[usize::from(channel)] = value;
    }

    fn gpio(pin: u8) -> i32 {
        pins::DIGITAL_GPIO[usize::from(pin)]
    }

    fn claim_ledc(&mut self, pin: u8) -> Option<u8> {
        if let Some(ch) = self.ledc_owner.iter().position(|o| *o == Some(pin)) {
            return Some(ch as u8);
        }
        let free = self.ledc_owner.iter().position(Option::is_none)?;
        self.ledc_owner[free] = Some(pin);
        Some(free as u8)
    }

    fn release_ledc(&mut self, pin: u8) {
        for owner in &mut self.ledc_owner {
            if *owner == Some(pin) {
                *owner = None;
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn sample(&mut self, pin: u8) -> bool {
        hw_init::gpio_read(Self::gpio(pin))
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&mut self, pin: u8) -> bool {
        self.levels[usize::from(pin)]
    }

    #[cfg(target_os = "espidf")]
    fn sample_analog(&mut self, channel: u8) -> u16 {
        hw_init::adc1_read(pins::ADC1_CHANNEL[usize::from(channel)])
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample_analog(&mut self, channel: u8) -> u16 {
        self.analog[usize::from(channel)]
    }
}

impl PinPort for HardwareAdapter {
    fn set_input_pullup(&mut self, pin: u8) {
        if let PinMode::Pwm(_) = self.mode(pin) {
            self.release_ledc(pin);
        }
        if let Err(e) = hw_init::gpio_set_input_pullup(Self::gpio(pin)) {
            warn!("pin {}: {}", pin, e);
            return;
        }
        self.modes[usize::from(pin)] = PinMode::InputPullup;
    }

    fn set_output(&mut self, pin: u8) {
        // A PWM pin keeps its channel until a digital write detaches it.
        match self.mode(pin) {
            PinMode::Output | PinMode::Pwm(_) => {}
            _ => {
                if let Err(e) = hw_init::gpio_set_output(Self::gpio(pin)) {
                    warn!("pin {}: {}", pin, e);
                    return;
                }
                self.modes[usize::from(pin)] = PinMode::Output;
            }
        }
    }

    fn read_level(&mut self, pin: u8) -> PinState {
        PinState::from(self.sample(pin))
    }

    fn write_level(&mut self, pin: u8, state: PinState) {
        if let PinMode::Pwm(_) = self.mode(pin) {
            self.release_ledc(pin);
            self.duties[usize::from(pin)] = 0;
            if let Err(e) = hw_init::gpio_set_output(Self::gpio(pin)) {
                warn!("pin {}: {}", pin, e);
            }
            self.modes[usize::from(pin)] = PinMode::Output;
        }
        let high = state == PinState::High;
        hw_init::gpio_write(Self::gpio(pin), high);
        #[cfg(not(target_os = "espidf"))]
        {
            self.levels[usize::from(pin)] = high;
        }
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        if usize::from(channel) >= ANALOG_CHANNEL_COUNT {
            return 0;
        }
        self.sample_analog(channel)
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) {
        let channel = match self.mode(pin) {
            PinMode::Pwm(ch) => Some(ch),
            _ => self.claim_ledc(pin),
        };
        let Some(channel) = channel else {
            warn!("pin {}: no LEDC channel free, driving digital", pin);
            self.write_level(pin, PinState::from(duty >= 128));
            return;
        };

        if self.mode(pin) == PinMode::Pwm(channel) {
            hw_init::ledc_set(channel, duty);
        } else if let Err(e) = hw_init::ledc_attach(channel, Self::gpio(pin), duty) {
            warn!("pin {}: {}", pin, e);
            self.release_ledc(pin);
            return;
        }
        self.modes[usize::from(pin)] = PinMode::Pwm(channel);
        self.duties[usize::from(pin)] = duty;
    }
}
