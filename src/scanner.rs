use std::io::Write;
use std::net::Ipv4Addr;

use crate::console::LineSource;
use crate::network::{self, ConnectOutcome, ConnectPolicy, Radio};
use crate::prompt::prompt_credentials;

const SEPARATOR: &str = "--------------------------";

/// Message wording. The standalone scanner is chattier than the status page
/// variant, which hands the address straight on to the web server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Interactive,
    StatusPage,
}

impl Flavor {
    fn no_networks(self) -> &'static str {
        match self {
            Flavor::Interactive => "No networks found. Please check your location and try again.",
            Flavor::StatusPage => "No networks found.",
        }
    }

    fn ssid_prompt(self) -> &'static str {
        match self {
            Flavor::Interactive => "Enter the Wi-Fi name (SSID) you want to connect to: ",
            Flavor::StatusPage => "Enter the Wi-Fi name (SSID): ",
        }
    }

    fn cancelled(self) -> &'static str {
        match self {
            Flavor::Interactive => "Operation cancelled by user.",
            Flavor::StatusPage => "Operation cancelled.",
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Flavor::Interactive => "Wi-Fi connection failed. Please check the SSID and password.",
            Flavor::StatusPage => "Wi-Fi connection failed.",
        }
    }
}

/// Scan, list, prompt, connect.
///
/// Returns the station address on success. Every failure (empty scan,
/// cancelled prompt, failed association) is reported on `out` and yields
/// `Ok(None)`; only I/O and radio driver errors are returned as `Err`.
pub fn scan_and_connect(
    radio: &mut dyn Radio,
    input: &mut dyn LineSource,
    out: &mut dyn Write,
    flavor: Flavor,
    policy: &ConnectPolicy,
) -> anyhow::Result<Option<Ipv4Addr>> {
    writeln!(out, "Scanning for Wi-Fi networks...")?;
    let networks = radio.scan()?;

    if networks.is_empty() {
        writeln!(out, "{}", flavor.no_networks())?;
        return Ok(None);
    }

    writeln!(out, "--- Available Networks ---")?;
    for (i, ap) in networks.iter().enumerate() {
        log::debug!(
            "{} bssid={} ch={} rssi={} auth={} hidden={}",
            ap.ssid,
            ap.bssid_string(),
            ap.channel,
            ap.rssi,
            ap.auth,
            ap.hidden
        );
        writeln!(out, "{}: {}", i + 1, ap.ssid)?;
    }
    writeln!(out, "{}", SEPARATOR)?;

    let Some(credentials) = prompt_credentials(input, out, flavor.ssid_prompt())? else {
        writeln!(out)?;
        writeln!(out, "{}", flavor.cancelled())?;
        return Ok(None);
    };

    match network::connect(radio, &credentials, policy, out)? {
        ConnectOutcome::Connected(ip) => {
            writeln!(out, "{}", SEPARATOR)?;
            writeln!(out, "✅ Success! Connected to Wi-Fi.")?;
            writeln!(out, "   IP Address: {}", ip)?;
            writeln!(out, "{}", SEPARATOR)?;
            Ok(Some(ip))
        }
        ConnectOutcome::Failed(status) => {
            log::debug!("final status code {}", status.code());
            writeln!(out, "{}", flavor.failed())?;
            Ok(None)
        }
    }
}
