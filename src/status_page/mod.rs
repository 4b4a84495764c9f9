//! Static device info page served over plain HTTP.
//!
//! One client at a time, no routing: every request gets the same page.

mod html;
mod server;

pub use html::{render, DeviceInfo};
pub use server::{handle_client, response_head, StatusPageServer};
