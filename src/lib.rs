//! Serial relay control, Wi-Fi scan/connect and a static status page for
//! ESP-IDF boards.
//!
//! Everything in here builds on the host. The board bindings live in [`esp`],
//! which only exists when compiling for `target_os = "espidf"`.

pub mod command;
pub mod config;
pub mod console;
pub mod network;
pub mod peripheral;
pub mod prompt;
pub mod scanner;
pub mod status_page;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use command::RelayCommand;
pub use console::{CommandHandler, LineCommandLoop, LineSource};
pub use network::{AccessPoint, ConnectOutcome, ConnectPolicy, Credentials, LinkStatus, Radio};
pub use peripheral::{DigitalOutput, Indicator, Polarity, Relay, RelayBoard};
pub use scanner::{scan_and_connect, Flavor};
pub use status_page::{DeviceInfo, StatusPageServer};
