//! Game session: party registries and the shared stance ledger

use crate::error::{ParleyError, Result};
use crate::types::{ColonyId, GoodsId, PlayerId, Stance, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::player::{Colony, Player, Unit};

/// Canonically ordered pair of parties identifying one stance edge
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartyPair {
    first: PlayerId,
    second: PlayerId,
}

impl PartyPair {
    /// Build the canonical pair; argument order does not matter
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }
}

/// One serialized stance edge
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StanceEntry {
    pub first: PlayerId,
    pub second: PlayerId,
    pub stance: Stance,
}

/// Shared symmetric relation store for party stances.
///
/// Each unordered party pair owns exactly one edge, so both parties
/// always observe the same stance. All writes go through
/// [`Session::set_mutual_stance`], which keeps the update a single
/// operation rather than two per-party ones.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<StanceEntry>", from = "Vec<StanceEntry>")]
pub struct StanceLedger {
    edges: BTreeMap<PartyPair, Stance>,
}

impl StanceLedger {
    /// The stance between two parties, in either orientation
    pub fn get(&self, a: &PlayerId, b: &PlayerId) -> Option<Stance> {
        self.edges
            .get(&PartyPair::new(a.clone(), b.clone()))
            .copied()
    }

    fn set(&mut self, a: PlayerId, b: PlayerId, stance: Stance) {
        self.edges.insert(PartyPair::new(a, b), stance);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate all edges as serializable entries
    pub fn entries(&self) -> impl Iterator<Item = StanceEntry> + '_ {
        self.edges.iter().map(|(pair, stance)| StanceEntry {
            first: pair.first.clone(),
            second: pair.second.clone(),
            stance: *stance,
        })
    }
}

impl From<StanceLedger> for Vec<StanceEntry> {
    fn from(ledger: StanceLedger) -> Self {
        ledger
            .edges
            .into_iter()
            .map(|(pair, stance)| StanceEntry {
                first: pair.first,
                second: pair.second,
                stance,
            })
            .collect()
    }
}

impl From<Vec<StanceEntry>> for StanceLedger {
    fn from(entries: Vec<StanceEntry>) -> Self {
        let mut ledger = StanceLedger::default();
        for entry in entries {
            ledger.set(entry.first, entry.second, entry.stance);
        }
        ledger
    }
}

/// The owning game context.
///
/// Trade items refer to parties, colonies and units by identifier and
/// resolve them against these registries; nothing outside the session
/// holds a direct reference to a party.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    turn: u32,
    players: BTreeMap<PlayerId, Player>,
    #[serde(default)]
    colonies: BTreeMap<ColonyId, Colony>,
    #[serde(default)]
    units: BTreeMap<UnitId, Unit>,
    #[serde(default)]
    stances: StanceLedger,
}

impl Session {
    pub fn new() -> Self {
        Self {
            turn: 1,
            players: BTreeMap::new(),
            colonies: BTreeMap::new(),
            units: BTreeMap::new(),
            stances: StanceLedger::default(),
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    pub fn add_player(&mut self, id: PlayerId, player: Player) {
        self.players.insert(id, player);
    }

    pub fn add_colony(&mut self, id: ColonyId, colony: Colony) {
        self.colonies.insert(id, colony);
    }

    pub fn add_unit(&mut self, id: UnitId, unit: Unit) {
        self.units.insert(id, unit);
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn colony(&self, id: &ColonyId) -> Option<&Colony> {
        self.colonies.get(id)
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn players(&self) -> &BTreeMap<PlayerId, Player> {
        &self.players
    }

    pub fn colonies(&self) -> &BTreeMap<ColonyId, Colony> {
        &self.colonies
    }

    pub fn units(&self) -> &BTreeMap<UnitId, Unit> {
        &self.units
    }

    pub fn stances(&self) -> &StanceLedger {
        &self.stances
    }

    /// The stance between two parties, in either orientation
    pub fn stance_between(&self, a: &PlayerId, b: &PlayerId) -> Option<Stance> {
        self.stances.get(a, b)
    }

    /// Set the stance edge between two parties in one operation.
    ///
    /// Both parties observe the new stance at the same moment; there is
    /// no intermediate state in which only one side has been updated.
    pub fn set_mutual_stance(
        &mut self,
        a: &PlayerId,
        b: &PlayerId,
        stance: Stance,
    ) -> Result<()> {
        if a == b {
            return Err(ParleyError::SelfNegotiation(a.to_string()));
        }
        if self.player(a).is_none() {
            return Err(ParleyError::UnknownParty(a.to_string()));
        }
        if self.player(b).is_none() {
            return Err(ParleyError::UnknownParty(b.to_string()));
        }

        self.stances.set(a.clone(), b.clone(), stance);
        Ok(())
    }

    /// Move gold from one treasury to another
    pub fn transfer_gold(&mut self, from: &PlayerId, to: &PlayerId, amount: u64) -> Result<()> {
        let available = self
            .player(from)
            .ok_or_else(|| ParleyError::UnknownParty(from.to_string()))?
            .gold;
        if available < amount {
            return Err(ParleyError::InsufficientGold {
                required: amount,
                available,
            });
        }
        if self.player(to).is_none() {
            return Err(ParleyError::UnknownParty(to.to_string()));
        }

        if let Some(payer) = self.players.get_mut(from) {
            payer.gold -= amount;
        }
        if let Some(payee) = self.players.get_mut(to) {
            payee.gold += amount;
        }
        Ok(())
    }

    /// Move a quantity of one goods type between parties
    pub fn transfer_goods(
        &mut self,
        from: &PlayerId,
        to: &PlayerId,
        goods: &GoodsId,
        amount: u32,
    ) -> Result<()> {
        let available = self
            .player(from)
            .ok_or_else(|| ParleyError::UnknownParty(from.to_string()))?
            .stock(goods);
        if available < amount {
            return Err(ParleyError::InsufficientGoods {
                goods: goods.to_string(),
                required: amount,
                available,
            });
        }
        if self.player(to).is_none() {
            return Err(ParleyError::UnknownParty(to.to_string()));
        }

        if let Some(giver) = self.players.get_mut(from) {
            let remaining = available - amount;
            if remaining == 0 {
                giver.goods.remove(goods);
            } else {
                giver.goods.insert(goods.clone(), remaining);
            }
        }
        if let Some(taker) = self.players.get_mut(to) {
            let stock = taker.stock(goods);
            taker.goods.insert(goods.clone(), stock + amount);
        }
        Ok(())
    }

    /// Hand a colony over to a new owner
    pub fn transfer_colony(
        &mut self,
        colony_id: &ColonyId,
        from: &PlayerId,
        to: &PlayerId,
    ) -> Result<()> {
        if self.player(to).is_none() {
            return Err(ParleyError::UnknownParty(to.to_string()));
        }
        let colony = self
            .colonies
            .get_mut(colony_id)
            .ok_or_else(|| ParleyError::UnknownColony(colony_id.to_string()))?;
        if &colony.owner != from {
            return Err(ParleyError::ColonyNotOwned {
                colony: colony_id.to_string(),
                party: from.to_string(),
            });
        }

        colony.owner = to.clone();
        Ok(())
    }

    /// Hand a unit over to a new owner
    pub fn transfer_unit(
        &mut self,
        unit_id: &UnitId,
        from: &PlayerId,
        to: &PlayerId,
    ) -> Result<()> {
        if self.player(to).is_none() {
            return Err(ParleyError::UnknownParty(to.to_string()));
        }
        let unit = self
            .units
            .get_mut(unit_id)
            .ok_or_else(|| ParleyError::UnknownUnit(unit_id.to_string()))?;
        if &unit.owner != from {
            return Err(ParleyError::UnitNotOwned {
                unit: unit_id.to_string(),
                party: from.to_string(),
            });
        }

        unit.owner = to.clone();
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
