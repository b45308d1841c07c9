//! Bridge configuration parameters
//!
//! Tunables for the command link and the input scanner. The device has no
//! persistent storage, so it always boots with [`BridgeConfig::default`];
//! a JSON override is accepted for simulation and bench setups.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Core bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Inputs ---
    /// Minimum time (ms) a raw level must hold before it is accepted.
    pub debounce_ms: u32,

    // --- Protocol ---
    /// Reported by the version command; bump whenever a command format changes.
    pub protocol_version: f32,
    /// Number of analog channels sampled by the bulk ADC read.
    pub analog_channels: u8,
    /// Announce `23,Reset` on the link when the service starts.
    pub announce_reset: bool,

    // --- Link ---
    /// UART baud rate.
    pub baud_rate: u32,
    /// Main loop period (milliseconds).
    pub update_interval_ms: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,

            protocol_version: 1.1,
            analog_channels: pins::ANALOG_CHANNEL_COUNT as u8,
            announce_reset: true,

            baud_rate: 115_200,
            update_interval_ms: 1,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Compact binary snapshot, logged at boot for diagnostics.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("snapshot encode failed"))
    }

    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("malformed snapshot"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the bridge cannot honour. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if usize::from(self.analog_channels) > pins::ANALOG_CHANNEL_COUNT {
            return Err(Error::Config("analog_channels exceeds ADC bank"));
        }
        if !self.protocol_version.is_finite() {
            return Err(Error::Config("protocol_version must be finite"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        Ok(())
    }
}
