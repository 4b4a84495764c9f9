//! Serial console relay switch: `on` energizes the relay and lights the LED,
//! `off` releases both. Anything else is ignored.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::hal::{gpio::PinDriver, prelude::Peripherals};
    use relaykit::{config, esp, peripheral, LineCommandLoop, RelayBoard};

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    let peripherals = Peripherals::take()?;

    // typed pins must match config::RELAY_GPIO and config::LED_GPIO
    log::info!(
        "Relay on GPIO{}, LED on GPIO{}",
        config::RELAY_GPIO,
        config::LED_GPIO
    );
    let relay_pin = PinDriver::output(peripherals.pins.gpio15)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio2)?;

    let mut out = std::io::stdout();
    let board = RelayBoard::new(relay_pin, led_pin, config::RELAY_POLARITY, &mut out)?;
    peripheral::write_banner(&mut out)?;

    esp::log_heap();

    LineCommandLoop::new(esp::UartConsole::new(), out, board).run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("relay must be built for an ESP-IDF target");
    std::process::exit(1);
}
