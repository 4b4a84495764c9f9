//! Compile-time settings.
//!
//! Nothing is read from flash or the environment at runtime; the few knobs
//! that exist are constants or `option_env!` values baked in at build time.

use std::time::Duration;

use crate::peripheral::Polarity;

/// GPIO wired to the relay module's IN pin.
pub const RELAY_GPIO: u8 = 15;
/// Onboard status LED.
pub const LED_GPIO: u8 = 2;

#[cfg(not(feature = "active-high"))]
pub const RELAY_POLARITY: Polarity = Polarity::ActiveLow;
#[cfg(feature = "active-high")]
pub const RELAY_POLARITY: Polarity = Polarity::ActiveHigh;

/// Pause between two reads of the command console.
pub const COMMAND_LOOP_PAUSE: Duration = Duration::from_millis(100);

pub const CONNECT_MAX_POLLS: u32 = 15;
pub const CONNECT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Bytes read (and discarded) from each status page client.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

pub const DEFAULT_STATUS_PAGE_PORT: u16 = 80;

pub fn status_page_port() -> u16 {
    static STATUS_PAGE_PORT: Option<&str> = std::option_env!("STATUS_PAGE_PORT");

    STATUS_PAGE_PORT
        .and_then(|p| {
            p.parse::<u16>()
                .map_err(|e| log::error!("Invalid STATUS_PAGE_PORT {:?}: {}", p, e))
                .ok()
        })
        .unwrap_or(DEFAULT_STATUS_PAGE_PORT)
}
