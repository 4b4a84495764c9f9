//! ESP-IDF bindings for the board-independent traits.

mod console;
mod gpio;
mod wifi;

pub use console::UartConsole;
pub use wifi::EspRadio;

use crate::status_page::DeviceInfo;

pub fn log_heap() {
    unsafe {
        use esp_idf_svc::sys::{esp_get_free_heap_size, heap_caps_get_free_size, MALLOC_CAP_INTERNAL};

        log::info!("Free heap size: {}KB", esp_get_free_heap_size() / 1024);
        log::info!(
            "Free INTERNAL heap size: {}KB",
            heap_caps_get_free_size(MALLOC_CAP_INTERNAL) / 1024
        );
    }
}

/// Chip name and firmware versions shown on the status page.
pub fn device_info() -> DeviceInfo {
    let board = std::str::from_utf8(esp_idf_svc::sys::CONFIG_IDF_TARGET)
        .unwrap_or("esp32")
        .trim_end_matches('\0')
        .to_string();

    let idf_version = unsafe { std::ffi::CStr::from_ptr(esp_idf_svc::sys::esp_get_idf_version()) }
        .to_string_lossy()
        .into_owned();

    DeviceInfo::new(
        board,
        format!("relaykit {} (ESP-IDF {})", env!("CARGO_PKG_VERSION"), idf_version),
    )
}
