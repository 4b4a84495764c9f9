use std::io::{BufRead, ErrorKind, Stdin};
use std::time::Duration;

use crate::console::LineSource;

const IDLE_POLL: Duration = Duration::from_millis(20);

/// Blocking line reader over the UART console.
///
/// The VFS console reports "no data yet" as `WouldBlock` or a zero-length
/// read, so a partial line is kept as raw bytes until its terminator arrives
/// and only then decoded. This source is never exhausted.
pub struct UartConsole {
    stdin: Stdin,
    pending: Vec<u8>,
}

impl UartConsole {
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            pending: Vec::new(),
        }
    }
}

impl Default for UartConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for UartConsole {
    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            // bytes read before a WouldBlock stay in `pending`
            match self.stdin.lock().read_until(b'\n', &mut self.pending) {
                // Ctrl-C arrives without a terminator
                Ok(_) if matches!(self.pending.last(), Some(b'\n' | b'\r' | 0x03)) => {
                    let line = String::from_utf8_lossy(&self.pending).into_owned();
                    self.pending.clear();
                    return Ok(Some(line));
                }
                Ok(_) => {}
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {}
                Err(e) => return Err(e.into()),
            }
            std::thread::sleep(IDLE_POLL);
        }
    }
}
