//! UI mode

use serde::{Deserialize, Serialize};

/// Planning composes the list; Market shops at one named store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Planning,
    Market,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Planning => "planning",
            Mode::Market => "market",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
