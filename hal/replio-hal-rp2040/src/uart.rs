//! UART configuration conversion

use embassy_rp::uart::{
    Config as RpUartConfig, DataBits as RpDataBits, Parity as RpParity, StopBits as RpStopBits,
};
use replio_hal::serial::{DataBits, Parity, StopBits, UartConfig};

/// Convert console UART settings to the embassy-rp configuration
pub fn to_rp_config(config: &UartConfig) -> RpUartConfig {
    let mut cfg = RpUartConfig::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    cfg
}
