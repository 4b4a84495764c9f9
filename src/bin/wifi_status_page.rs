//! Join a network interactively, then serve a device info page on port 80.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::net::{Ipv4Addr, SocketAddr};

    use esp_idf_svc::{
        eventloop::EspSystemEventLoop, hal::prelude::Peripherals, nvs::EspDefaultNvsPartition,
    };
    use relaykit::{
        config, esp, scan_and_connect, status_page, ConnectPolicy, Flavor, StatusPageServer,
    };

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
        Flavor::StatusPage,
        &ConnectPolicy::default(),
    )?;

    // only serve when we actually have an address
    let Some(ip) = ip else {
        log::info!("No address, not starting the web server");
        return Ok(());
    };

    let info = esp::device_info();
    log::info!("Device info: {:?}", info);
    let page = status_page::render(&info);

    let port = config::status_page_port();
    let b = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    b.block_on(async move {
        let server =
            StatusPageServer::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)), page)?;
        println!("Web server is listening on port {}...", port);
        log::info!("Serving http://{}:{}/", ip, port);
        esp::log_heap();

        server.run().await;
        Ok::<(), anyhow::Error>(())
    })
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("wifi_status_page must be built for an ESP-IDF target");
    std::process::exit(1);
}
