use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of session the countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Focus,
    Break,
    LongBreak,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
            Mode::LongBreak => "long_break",
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Mode::Break | Mode::LongBreak)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Mode::Focus),
            "break" => Ok(Mode::Break),
            "long_break" | "long-break" => Ok(Mode::LongBreak),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// Run status of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Stopped,
    Running,
    Paused,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_string_roundtrip() {
        for mode in [Mode::Focus, Mode::Break, Mode::LongBreak] {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn mode_accepts_hyphenated_long_break() {
        assert_eq!("long-break".parse::<Mode>().unwrap(), Mode::LongBreak);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("lunch".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Mode::LongBreak).unwrap();
        assert_eq!(json, "\"long_break\"");
    }
}
