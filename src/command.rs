use std::fmt::Display;

/// Commands accepted by the relay console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    On,
    Off,
}

impl RelayCommand {
    /// Decode an already normalized token. Unknown tokens yield `None` and
    /// are ignored by the caller.
    pub fn decode(token: &str) -> Option<Self> {
        match token {
            "on" => Some(RelayCommand::On),
            "off" => Some(RelayCommand::Off),
            _ => None,
        }
    }

    pub fn energizes(self) -> bool {
        self == RelayCommand::On
    }
}

impl Display for RelayCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayCommand::On => write!(f, "ON"),
            RelayCommand::Off => write!(f, "OFF"),
        }
    }
}

/// Trim surrounding whitespace (including the line terminator) and lowercase.
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}
