use std::io::Write;

use crate::console::LineSource;
use crate::network::Credentials;

/// Ctrl-C as it arrives over a serial console.
const ETX: char = '\u{3}';

/// Ask for an SSID and a password.
///
/// Returns `Ok(None)` when the user interrupts either prompt (Ctrl-C or end
/// of input). Nothing is masked and no length limits are applied.
pub fn prompt_credentials(
    input: &mut dyn LineSource,
    out: &mut dyn Write,
    ssid_prompt: &str,
) -> anyhow::Result<Option<Credentials>> {
    write!(out, "{}", ssid_prompt)?;
    out.flush()?;
    let Some(ssid) = read_answer(input)? else {
        return Ok(None);
    };

    write!(out, "Enter the password for '{}': ", ssid)?;
    out.flush()?;
    let Some(password) = read_answer(input)? else {
        return Ok(None);
    };

    Ok(Some(Credentials::new(ssid, password)))
}

fn read_answer(input: &mut dyn LineSource) -> anyhow::Result<Option<String>> {
    match input.next_line()? {
        Some(line) if line.contains(ETX) => {
            log::debug!("Prompt interrupted");
            Ok(None)
        }
        Some(line) => Ok(Some(line.trim().to_string())),
        None => Ok(None),
    }
}
