//! Block explorer preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External web service used to inspect chain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockExplorer {
    #[default]
    Neotracker,
    Neoscan,
    Antchain,
}

impl BlockExplorer {
    pub const ALL: [BlockExplorer; 3] = [
        BlockExplorer::Neotracker,
        BlockExplorer::Neoscan,
        BlockExplorer::Antchain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockExplorer::Neotracker => "Neotracker",
            BlockExplorer::Neoscan => "Neoscan",
            BlockExplorer::Antchain => "Antchain",
        }
    }
}

impl fmt::Display for BlockExplorer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the same names serde does, ignoring surrounding whitespace.
impl FromStr for BlockExplorer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .find(|e| e.as_str() == name)
            .copied()
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(BlockExplorer::as_str).collect();
                format!("unknown block explorer: {} (expected one of {})", name, known.join(", "))
            })
    }
}
