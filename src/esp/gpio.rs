use esp_idf_svc::hal::gpio::{Output, OutputPin, PinDriver};

use crate::peripheral::DigitalOutput;

impl<'d, T: OutputPin> DigitalOutput for PinDriver<'d, T, Output> {
    fn set_level(&mut self, high: bool) -> anyhow::Result<()> {
        if high {
            self.set_high()?;
        } else {
            self.set_low()?;
        }
        Ok(())
    }
}
