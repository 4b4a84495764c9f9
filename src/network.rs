//! Station mode association, seen through the [`Radio`] trait.
//!
//! Scanning, association and DHCP belong to the radio firmware. This module
//! only sequences them: request a join, poll the link status on a fixed
//! budget and classify the result.

use std::io::Write;
use std::net::Ipv4Addr;
use std::time::Duration;

use crate::config::{CONNECT_MAX_POLLS, CONNECT_POLL_INTERVAL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String,
    pub bssid: [u8; 6],
    pub channel: u8,
    pub rssi: i8,
    pub auth: String,
    pub hidden: bool,
}

impl AccessPoint {
    pub fn named(ssid: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            bssid: [0; 6],
            channel: 0,
            rssi: 0,
            auth: String::new(),
            hidden: ssid.is_empty(),
        }
    }

    pub fn bssid_string(&self) -> String {
        let b = self.bssid;
        format!(
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl Credentials {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Credentials {{ ssid: {:?}, password: [{} chars] }}",
            self.ssid,
            self.password.chars().count()
        )
    }
}

/// Station link state, numbered like the classic WLAN status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Down,
    Joining,
    NoIp,
    Up,
    /// Negative codes are driver errors (wrong password, no AP, ...).
    Failed(i32),
}

impl LinkStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            c if c < 0 => LinkStatus::Failed(c),
            0 => LinkStatus::Down,
            1 => LinkStatus::Joining,
            2 => LinkStatus::NoIp,
            _ => LinkStatus::Up,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            LinkStatus::Down => 0,
            LinkStatus::Joining => 1,
            LinkStatus::NoIp => 2,
            LinkStatus::Up => 3,
            LinkStatus::Failed(c) => c,
        }
    }

    /// Polling stops on either of these.
    pub fn is_terminal(self) -> bool {
        matches!(self, LinkStatus::Up | LinkStatus::Failed(_))
    }
}

/// The radio/IP collaborator.
pub trait Radio {
    fn scan(&mut self) -> anyhow::Result<Vec<AccessPoint>>;

    fn is_connected(&mut self) -> anyhow::Result<bool>;

    /// Start joining `credentials.ssid`. Must not wait for the result.
    fn begin_connect(&mut self, credentials: &Credentials) -> anyhow::Result<()>;

    fn status(&mut self) -> LinkStatus;

    fn ip_address(&mut self) -> anyhow::Result<Ipv4Addr>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectPolicy {
    pub max_polls: u32,
    pub interval: Duration,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            max_polls: CONNECT_MAX_POLLS,
            interval: CONNECT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Ipv4Addr),
    Failed(LinkStatus),
}

impl ConnectOutcome {
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self {
            ConnectOutcome::Connected(ip) => Some(*ip),
            ConnectOutcome::Failed(_) => None,
        }
    }
}

/// One association attempt with a bounded wait.
///
/// An already connected radio skips the join entirely. The outcome is decided
/// by the status read after polling, not by whether the budget ran out.
pub fn connect(
    radio: &mut dyn Radio,
    credentials: &Credentials,
    policy: &ConnectPolicy,
    out: &mut dyn Write,
) -> anyhow::Result<ConnectOutcome> {
    if radio.is_connected()? {
        log::info!("Already connected, skipping association");
    } else {
        writeln!(out, "Connecting to '{}'...", credentials.ssid)?;
        log::info!("Joining {:?}", credentials);
        radio.begin_connect(credentials)?;

        let mut remaining = policy.max_polls;
        while remaining > 0 {
            let status = radio.status();
            log::debug!("link status {:?}, {} polls left", status, remaining);
            if status.is_terminal() {
                break;
            }
            remaining -= 1;
            write!(out, ".")?;
            out.flush()?;
            if !policy.interval.is_zero() {
                std::thread::sleep(policy.interval);
            }
        }
        writeln!(out)?;
    }

    let status = radio.status();
    if status != LinkStatus::Up {
        log::warn!("Association failed with status {:?}", status);
        return Ok(ConnectOutcome::Failed(status));
    }

    let ip = radio.ip_address()?;
    log::info!("Connected, address {}", ip);
    Ok(ConnectOutcome::Connected(ip))
}
