//! Station mode radio on top of `EspWifi`

use std::net::Ipv4Addr;

use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::modem::Modem,
    nvs::EspDefaultNvsPartition,
    sys::EspError,
    wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi},
};

use crate::network::{AccessPoint, Credentials, LinkStatus, Radio};

pub struct EspRadio<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
    joining: bool,
}

impl<'a> EspRadio<'a> {
    /// Bring the radio up as a station with no network configured yet.
    pub fn station(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
    ) -> anyhow::Result<Self> {
        let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), nvs)?, sysloop)?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))?;
        wifi.start()?;
        log::info!("Wifi started in station mode");

        Ok(Self {
            wifi,
            joining: false,
        })
    }

    fn error_status(e: EspError) -> LinkStatus {
        log::warn!("Wifi driver error: {:?}", e);
        LinkStatus::from_code(-e.code().abs())
    }
}

impl Radio for EspRadio<'_> {
    fn scan(&mut self) -> anyhow::Result<Vec<AccessPoint>> {
        let found = self.wifi.scan()?;
        log::info!("Scan found {} access points", found.len());

        Ok(found
            .into_iter()
            .map(|ap| AccessPoint {
                hidden: ap.ssid.is_empty(),
                ssid: ap.ssid.to_string(),
                bssid: ap.bssid,
                channel: ap.channel,
                rssi: ap.signal_strength,
                auth: ap
                    .auth_method
                    .map(|a| format!("{:?}", a))
                    .unwrap_or_else(|| "unknown".to_string()),
            })
            .collect())
    }

    fn is_connected(&mut self) -> anyhow::Result<bool> {
        Ok(self.wifi.is_connected()?)
    }

    fn begin_connect(&mut self, credentials: &Credentials) -> anyhow::Result<()> {
        let auth_method = if credentials.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let config = ClientConfiguration {
            ssid: credentials
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("SSID too long: {:?}", credentials.ssid))?,
            password: credentials
                .password
                .as_str()
                .try_into()
                .map_err(|_| anyhow::anyhow!("Password too long"))?,
            auth_method,
            ..Default::default()
        };

        self.wifi.set_configuration(&Configuration::Client(config))?;
        // non-blocking: the caller polls `status`
        self.wifi.wifi_mut().connect()?;
        self.joining = true;
        Ok(())
    }

    fn status(&mut self) -> LinkStatus {
        let connected = match self.wifi.is_connected() {
            Ok(c) => c,
            Err(e) => return Self::error_status(e),
        };
        if !connected {
            return if self.joining {
                LinkStatus::Joining
            } else {
                LinkStatus::Down
            };
        }

        match self.wifi.wifi().is_up() {
            Ok(true) => {
                self.joining = false;
                LinkStatus::Up
            }
            Ok(false) => LinkStatus::NoIp,
            Err(e) => Self::error_status(e),
        }
    }

    fn ip_address(&mut self) -> anyhow::Result<Ipv4Addr> {
        let info = self.wifi.wifi().sta_netif().get_ip_info()?;
        Ok(Ipv4Addr::from(info.ip.octets()))
    }
}
