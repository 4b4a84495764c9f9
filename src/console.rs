//! Line oriented command console.
//!
//! Reads one line at a time, decodes it into a handler specific command and
//! runs it. Lines that do not decode are dropped without any output.

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::command::normalize;

/// Where console lines come from.
///
/// `Ok(None)` means the source is exhausted and the loop should stop. The
/// UART console on the board never reports that; injected test input does.
pub trait LineSource {
    fn next_line(&mut self) -> anyhow::Result<Option<String>>;
}

/// Bytes that are not UTF-8 (line noise) are replaced, so such a line simply
/// fails to decode instead of ending the loop.
impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = Vec::new();
        if self.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

pub trait CommandHandler {
    type Command;

    fn decode(&self, token: &str) -> Option<Self::Command>;

    /// Perform the side effect and write the acknowledgment.
    fn execute(&mut self, command: Self::Command, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub struct LineCommandLoop<S, W, H> {
    input: S,
    out: W,
    handler: H,
    pause: Duration,
}

impl<S: LineSource, W: Write, H: CommandHandler> LineCommandLoop<S, W, H> {
    pub fn new(input: S, out: W, handler: H) -> Self {
        Self {
            input,
            out,
            handler,
            pause: crate::config::COMMAND_LOOP_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Handle one line. Returns `false` once the input is exhausted.
    pub fn step(&mut self) -> anyhow::Result<bool> {
        let Some(line) = self.input.next_line()? else {
            return Ok(false);
        };

        let token = normalize(&line);
        match self.handler.decode(&token) {
            Some(command) => {
                if let Err(e) = self.handler.execute(command, &mut self.out) {
                    log::error!("Command {:?} failed: {:?}", token, e);
                }
                self.out.flush()?;
            }
            None => log::trace!("Ignoring input {:?}", token),
        }
        Ok(true)
    }

    /// Runs until the input is exhausted, sleeping `pause` between lines.
    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.step()? {
            if !self.pause.is_zero() {
                std::thread::sleep(self.pause);
            }
        }
        log::info!("Console input closed");
        Ok(())
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_parts(self) -> (S, W, H) {
        (self.input, self.out, self.handler)
    }
}
