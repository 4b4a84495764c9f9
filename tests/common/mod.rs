//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::rc::Rc;

use relaykit::{AccessPoint, Credentials, DigitalOutput, LinkStatus, Radio};

/// Output pin that records every level written to it.
#[derive(Clone, Default)]
pub struct RecordingPin {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }

    pub fn writes(&self) -> usize {
        self.levels.borrow().len()
    }
}

impl DigitalOutput for RecordingPin {
    fn set_level(&mut self, high: bool) -> anyhow::Result<()> {
        self.levels.borrow_mut().push(high);
        Ok(())
    }
}

/// Pin whose writes always fail.
pub struct BrokenPin;

impl DigitalOutput for BrokenPin {
    fn set_level(&mut self, _high: bool) -> anyhow::Result<()> {
        anyhow::bail!("gpio write failed")
    }
}

/// Radio that replays a fixed status sequence. The last status repeats
/// once the sequence runs out.
pub struct ScriptedRadio {
    pub networks: Vec<AccessPoint>,
    pub connected: bool,
    pub statuses: VecDeque<LinkStatus>,
    pub ip: Ipv4Addr,
    pub scans: usize,
    pub status_polls: usize,
    pub joined: Vec<Credentials>,
}

impl ScriptedRadio {
    pub fn new(statuses: &[LinkStatus]) -> Self {
        Self {
            networks: vec![AccessPoint::named("HomeNet"), AccessPoint::named("Office")],
            connected: false,
            statuses: statuses.iter().copied().collect(),
            ip: Ipv4Addr::new(192, 168, 1, 42),
            scans: 0,
            status_polls: 0,
            joined: Vec::new(),
        }
    }

    pub fn with_networks(mut self, networks: Vec<AccessPoint>) -> Self {
        self.networks = networks;
        self
    }

    pub fn already_connected(mut self) -> Self {
        self.connected = true;
        self
    }
}

impl Radio for ScriptedRadio {
    fn scan(&mut self) -> anyhow::Result<Vec<AccessPoint>> {
        self.scans += 1;
        Ok(self.networks.clone())
    }

    fn is_connected(&mut self) -> anyhow::Result<bool> {
        Ok(self.connected)
    }

    fn begin_connect(&mut self, credentials: &Credentials) -> anyhow::Result<()> {
        self.joined.push(credentials.clone());
        Ok(())
    }

    fn status(&mut self) -> LinkStatus {
        self.status_polls += 1;
        if self.statuses.len() > 1 {
            self.statuses.pop_front().unwrap()
        } else {
            self.statuses.front().copied().unwrap_or(LinkStatus::Down)
        }
    }

    fn ip_address(&mut self) -> anyhow::Result<Ipv4Addr> {
        Ok(self.ip)
    }
}

pub fn output_text(out: &[u8]) -> String {
    String::from_utf8(out.to_vec()).unwrap()
}
