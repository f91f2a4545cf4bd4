//! replio - serial console firmware
//!
//! Brings up the console on an RP2040: UART0 as the primary console,
//! UART1 attached as a duplicated terminal, the hardware watchdog, and
//! the embassy time driver as the clock. A line echo loop stands in for
//! the interpreter.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use replio_core::{Console, DEFAULT_RING_SIZE, DEFAULT_TASK_QUEUE_DEPTH};
use replio_hal_rp2040::clock::EmbassyClock;
use replio_hal_rp2040::serial::{Rp2040Serial, UartDupterm};
use replio_hal_rp2040::uart::to_rp_config;
use replio_hal_rp2040::watchdog::Rp2040Watchdog;

mod config;
mod repl;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// Watchdog period when enabled in console.toml
const WATCHDOG_PERIOD: Duration = Duration::from_secs(5);

type BoardConsole = Console<
    Rp2040Serial,
    Rp2040Watchdog,
    EmbassyClock,
    UartDupterm,
    DEFAULT_RING_SIZE,
    DEFAULT_TASK_QUEUE_DEPTH,
>;

// Static cells for UART buffers (must live forever)
static CONSOLE_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DUPTERM_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DUPTERM_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("replio firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load_config();

    // Primary console: UART0 on GPIO0 (TX) / GPIO1 (RX)
    let console_uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        CONSOLE_TX_BUF.init([0u8; 256]),
        CONSOLE_RX_BUF.init([0u8; 256]),
        to_rp_config(&config.uart),
    );

    // Duplicated terminal: UART1 on GPIO4 (TX) / GPIO5 (RX)
    let dupterm_uart = BufferedUart::new(
        p.UART1,
        p.PIN_4,
        p.PIN_5,
        Irqs,
        DUPTERM_TX_BUF.init([0u8; 256]),
        DUPTERM_RX_BUF.init([0u8; 256]),
        to_rp_config(&config.uart),
    );
    info!("UARTs initialized at {} baud", config.uart.baudrate);

    let watchdog = Rp2040Watchdog::new(Watchdog::new(p.WATCHDOG), WATCHDOG_PERIOD);

    let mut console: BoardConsole = Console::new(
        Rp2040Serial::new(console_uart),
        watchdog,
        EmbassyClock,
        config,
    );
    console.attach_dupterm(UartDupterm::new(dupterm_uart));

    info!("Console ready, entering echo loop");
    console.write_cooked(b"replio console ready\n");

    // The echo loop blocks by polling the console's own event loop;
    // nothing else runs on this executor
    repl::run(&mut console)
}
