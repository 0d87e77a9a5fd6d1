use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Open or add to a long position
    Buy,
    /// Open or add to a short position
    Sell,
    /// Flatten the current position
    Exit,
}

impl Action {
    /// Entry actions open a position and go through the order builder;
    /// exits pass the original document through.
    pub fn is_entry(&self) -> bool {
        matches!(self, Action::Buy | Action::Sell)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Action::Exit)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "buy"),
            Action::Sell => write!(f, "sell"),
            Action::Exit => write!(f, "exit"),
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "buy" => Ok(Action::Buy),
            "sell" => Ok(Action::Sell),
            "exit" => Ok(Action::Exit),
            _ => Err("Invalid action: must be buy, sell or exit"),
        }
    }
}
