use std::io::Write;

use anyhow::Context;

use crate::command::RelayCommand;
use crate::console::CommandHandler;

/// A single push-pull output line.
pub trait DigitalOutput {
    fn set_level(&mut self, high: bool) -> anyhow::Result<()>;
}

/// Which logic level energizes the relay coil.
///
/// Most cheap relay modules are active-low: pulling IN to 0V closes the
/// contact, 3.3V releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub fn level_for(self, energized: bool) -> bool {
        match self {
            Polarity::ActiveLow => !energized,
            Polarity::ActiveHigh => energized,
        }
    }
}

pub struct Relay<P> {
    pin: P,
    polarity: Polarity,
    energized: bool,
}

impl<P: DigitalOutput> Relay<P> {
    /// Wraps `pin` and immediately drives it to the released level.
    pub fn new(mut pin: P, polarity: Polarity) -> anyhow::Result<Self> {
        pin.set_level(polarity.level_for(false))
            .context("Failed to release relay")?;
        Ok(Self {
            pin,
            polarity,
            energized: false,
        })
    }

    fn set(&mut self, energized: bool) -> anyhow::Result<()> {
        self.pin.set_level(self.polarity.level_for(energized))?;
        self.energized = energized;
        Ok(())
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }
}

/// Status LED, lit on high.
pub struct Indicator<P> {
    pin: P,
    lit: bool,
}

impl<P: DigitalOutput> Indicator<P> {
    pub fn new(mut pin: P) -> anyhow::Result<Self> {
        pin.set_level(false).context("Failed to turn off indicator")?;
        Ok(Self { pin, lit: false })
    }

    pub fn light(&mut self) -> anyhow::Result<()> {
        self.pin.set_level(true)?;
        self.lit = true;
        Ok(())
    }

    pub fn extinguish(&mut self) -> anyhow::Result<()> {
        self.pin.set_level(false)?;
        self.lit = false;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

/// Hardware context owned by the relay console: the relay and the LED that
/// mirrors it.
pub struct RelayBoard<R, L> {
    relay: Relay<R>,
    indicator: Indicator<L>,
}

impl<R: DigitalOutput, L: DigitalOutput> RelayBoard<R, L> {
    /// Brings both outputs to the off state before any command is accepted.
    pub fn new(
        relay_pin: R,
        led_pin: L,
        polarity: Polarity,
        out: &mut dyn Write,
    ) -> anyhow::Result<Self> {
        writeln!(out, "Setting initial state: Relay OFF")?;
        let relay = Relay::new(relay_pin, polarity)?;
        let indicator = Indicator::new(led_pin)?;
        log::info!("Relay board ready, polarity {:?}", polarity);
        Ok(Self { relay, indicator })
    }

    /// Drive relay and LED together. If the LED write fails the relay is put
    /// back where it was, so the two never disagree.
    pub fn apply(&mut self, command: RelayCommand) -> anyhow::Result<()> {
        let was_energized = self.relay.is_energized();
        self.relay.set(command.energizes())?;

        let lit = if command.energizes() {
            self.indicator.light()
        } else {
            self.indicator.extinguish()
        };
        if let Err(e) = lit {
            if let Err(rollback) = self.relay.set(was_energized) {
                log::error!("Failed to restore relay: {:?}", rollback);
            }
            return Err(e.context("Failed to drive indicator"));
        }

        log::debug!(
            "relay energized={} indicator lit={}",
            self.relay.is_energized(),
            self.indicator.is_lit()
        );
        Ok(())
    }

    pub fn relay(&self) -> &Relay<R> {
        &self.relay
    }

    pub fn indicator(&self) -> &Indicator<L> {
        &self.indicator
    }
}

/// Printed once the board is initialized, before the first command is read.
pub fn write_banner(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "--------------------------")?;
    writeln!(out, "Relay Control is Ready!")?;
    writeln!(out, "Enter 'on' or 'off' and press Enter.")?;
    writeln!(out, "--------------------------")
}

impl<R: DigitalOutput, L: DigitalOutput> CommandHandler for RelayBoard<R, L> {
    type Command = RelayCommand;

    fn decode(&self, token: &str) -> Option<RelayCommand> {
        RelayCommand::decode(token)
    }

    fn execute(&mut self, command: RelayCommand, out: &mut dyn Write) -> anyhow::Result<()> {
        self.apply(command)?;
        writeln!(out, "Received command: {}", command)?;
        Ok(())
    }
}
