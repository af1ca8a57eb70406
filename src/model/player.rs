//! Parties and the holdings they can put on the table

use crate::types::{GoodsId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A negotiating party: treasury plus goods stocks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub gold: u64,
    #[serde(default)]
    pub goods: BTreeMap<GoodsId, u32>,
}

impl Player {
    /// Create a party with an empty treasury and no goods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gold: 0,
            goods: BTreeMap::new(),
        }
    }

    pub fn with_gold(mut self, gold: u64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_goods(mut self, goods: GoodsId, amount: u32) -> Self {
        self.goods.insert(goods, amount);
        self
    }

    /// Stock of one goods type, zero when the party holds none
    pub fn stock(&self, goods: &GoodsId) -> u32 {
        self.goods.get(goods).copied().unwrap_or(0)
    }
}

/// A settlement that can change hands in a negotiation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Colony {
    pub name: String,
    pub owner: PlayerId,
}

/// A unit that can change hands in a negotiation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub kind: String,
    pub owner: PlayerId,
}
