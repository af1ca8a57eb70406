//! Core types used throughout parley

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a negotiating party (player)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a colony in the session registry
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColonyId(pub String);

impl fmt::Display for ColonyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a unit in the session registry
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a goods type (e.g. "furs", "tools")
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GoodsId(pub String);

impl fmt::Display for GoodsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a trade offer
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The symmetric diplomatic relationship between two parties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    War,
    CeaseFire,
    Peace,
    Alliance,
}

impl Stance {
    /// Decimal wire code of this stance
    pub fn code(self) -> i32 {
        match self {
            Stance::War => 0,
            Stance::CeaseFire => 1,
            Stance::Peace => 2,
            Stance::Alliance => 3,
        }
    }

    /// Look up a stance by wire code. Codes outside the enumerated
    /// range yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Stance::War),
            1 => Some(Stance::CeaseFire),
            2 => Some(Stance::Peace),
            3 => Some(Stance::Alliance),
            _ => None,
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Stance::War => "war",
            Stance::CeaseFire => "cease-fire",
            Stance::Peace => "peace",
            Stance::Alliance => "alliance",
        };
        write!(f, "{}", word)
    }
}
