use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Assistant tone. Sent with every chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Friendly,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Friendly => "friendly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus Mode",
            Mode::Friendly => "Friendly Mode",
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Focus => Mode::Friendly,
            Mode::Friendly => Mode::Focus,
        }
    }

    pub fn welcome_message(&self) -> &'static str {
        match self {
            Mode::Focus => {
                "Focus Mode activated. I'm here to help you learn efficiently. What would you like to work on today?"
            }
            Mode::Friendly => {
                "Welcome to your learning journey! 🎉 I'm excited to help you achieve your goals. What would you like to learn today?"
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(Mode::Focus),
            "friendly" => Ok(Mode::Friendly),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected 'focus' or 'friendly', got '{other}'"),
            }),
        }
    }
}

/// UI preferences, persisted under the `preferences` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Keep the selected mode across restarts.
    #[serde(default = "default_true")]
    pub remember_mode: bool,
    #[serde(default = "default_true")]
    pub show_welcome: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            remember_mode: true,
            show_welcome: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_toggle() {
        assert_eq!("Focus".parse::<Mode>().unwrap(), Mode::Focus);
        assert_eq!(" friendly ".parse::<Mode>().unwrap(), Mode::Friendly);
        assert!("zen".parse::<Mode>().is_err());
        assert_eq!(Mode::Focus.toggled(), Mode::Friendly);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Focus).unwrap(), "\"focus\"");
    }
}
