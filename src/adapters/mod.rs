//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements                  | Connects to                 |
//! |-------------|-----------------------------|-----------------------------|
//! | `hardware`  | PinPort                     | ESP32 GPIO, ADC1, LEDC      |
//! | `time`      | ClockPort                   | ESP32 high-resolution timer |
//! | `uart`      | Transport                   | UART1 host link             |
//! | `log_sink`  | CommandSource, ResponseSink | Console log (decorator)     |

pub mod hardware;
pub mod log_sink;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart;
