//! List nearby networks, ask which one to join and try once.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::{
        eventloop::EspSystemEventLoop, hal::prelude::Peripherals, nvs::EspDefaultNvsPartition,
    };
    use relaykit::{esp, scan_and_connect, ConnectPolicy, Flavor};

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let partition = EspDefaultNvsPartition::take()?;

    let mut radio = esp::EspRadio::station(peripherals.modem, sysloop, Some(partition))?;
    esp::log_heap();

    let mut console = esp::UartConsole::new();
    let mut out = std::io::stdout();
    let ip = scan_and_connect(
        &mut radio,
        &mut console,
        &mut out,
        Flavor::Interactive,
        &ConnectPolicy::default(),
    )?;
    log::info!("Scan and connect finished: {:?}", ip);

    // dropping the radio would tear the association down again
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("wifi_scan must be built for an ESP-IDF target");
    std::process::exit(1);
}
