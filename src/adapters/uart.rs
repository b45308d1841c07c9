//! UART transport — the host link on the device.
//!
//! Wraps an `esp_idf_hal` [`UartDriver`] on UART1 (GPIO43 TX, GPIO44 RX).
//! Reads never block. Writes return once the bytes sit in the driver's TX
//! ring; nothing waits for the line to drain. Console logging stays on
//! USB-JTAG.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::uart::{self, UartDriver};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::{EspError, ESP_ERR_TIMEOUT};
use log::{error, info};

use crate::error::{Error, HardwareError};
use crate::pins;
use crate::protocol::transport::Transport;

pub struct UartTransport<'d> {
    driver: UartDriver<'d>,
}

impl<'d> UartTransport<'d> {
    pub fn new(
        uart: impl Peripheral<P = impl uart::Uart> + 'd,
        tx: impl Peripheral<P = impl esp_idf_hal::gpio::OutputPin> + 'd,
        rx: impl Peripheral<P = impl esp_idf_hal::gpio::InputPin> + 'd,
        baud_rate: u32,
    ) -> Result<Self, Error> {
        let config = uart::config::Config::default().baudrate(Hertz(baud_rate));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|e| {
            error!("uart{}: driver install failed: {}", pins::UART_PORT, e);
            HardwareError::UartConfig
        })?;
        info!(
            "uart{}: {} baud (tx=GPIO{}, rx=GPIO{})",
            pins::UART_PORT,
            baud_rate,
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO
        );
        Ok(Self { driver })
    }
}

fn log_driver_error(op: &str, e: EspError) {
    error!("uart{}: {} failed: {}", pins::UART_PORT, op, e);
}

impl Transport for UartTransport<'_> {
    type Error = HardwareError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, HardwareError> {
        match self.driver.read(buf, NON_BLOCK) {
            Ok(n) => Ok(n),
            // A drained RX ring reports a timeout: nothing yet.
            Err(e) if e.code() == ESP_ERR_TIMEOUT as i32 => Ok(0),
            Err(e) => {
                log_driver_error("read", e);
                Err(HardwareError::UartRead)
            }
        }
    }

    fn write_all(&mut self, mut data: &[u8]) -> Result<(), HardwareError> {
        while !data.is_empty() {
            let n = self.driver.write(data).map_err(|e| {
                log_driver_error("write", e);
                HardwareError::UartWrite
            })?;
            data = &data[n..];
        }
        Ok(())
    }
}
