//! Application glue: the engine driven over documents on disk

use crate::diplomacy::{NegotiationEngine, TradeOffer};
use crate::error::Result;
use crate::model::Session;
use crate::record::Record;
use crate::types::{OfferId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Offer document as stored on disk: header fields plus one record per
/// item, in proposal order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferDocument {
    pub id: OfferId,
    pub sender: PlayerId,
    pub recipient: PlayerId,
    pub items: Vec<Record>,
}

/// CLI application wrapping one loaded session
pub struct ParleyApp {
    session: Session,
}

impl ParleyApp {
    /// Load a session document
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let session = serde_json::from_str(&raw)?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Decode an offer document against the loaded session
    pub fn load_offer(&self, path: &Path) -> Result<TradeOffer> {
        let raw = fs::read_to_string(path)?;
        let document: OfferDocument = serde_json::from_str(&raw)?;
        TradeOffer::from_records(
            document.id,
            document.sender,
            document.recipient,
            &self.session,
            &document.items,
        )
    }

    /// Check an offer without touching the session
    pub fn validate_offer(&self, offer: &TradeOffer) -> Result<()> {
        let engine = NegotiationEngine::new();
        engine.evaluate(offer, &self.session)
    }

    /// Accept the offer and mutate the loaded session
    pub fn apply_offer(&mut self, offer: TradeOffer) -> Result<()> {
        let mut engine = NegotiationEngine::new();
        let id = offer.id().clone();
        engine.propose(offer)?;
        engine.accept(&id, &mut self.session)
    }

    /// Write the session back to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.session)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Print parties, holdings and stances
    pub fn print_summary(&self) {
        println!("turn {}", self.session.turn());

        println!("parties:");
        for (id, player) in self.session.players() {
            println!("  {} ({}): {} gold", id, player.name, player.gold);
            for (goods, amount) in &player.goods {
                println!("      {} x{}", goods, amount);
            }
        }

        if !self.session.colonies().is_empty() {
            println!("colonies:");
            for (id, colony) in self.session.colonies() {
                println!("  {} ({}) owned by {}", id, colony.name, colony.owner);
            }
        }

        if !self.session.units().is_empty() {
            println!("units:");
            for (id, unit) in self.session.units() {
                println!("  {} ({}) owned by {}", id, unit.kind, unit.owner);
            }
        }

        if !self.session.stances().is_empty() {
            println!("stances:");
            for entry in self.session.stances().entries() {
                println!("  {} / {}: {}", entry.first, entry.second, entry.stance);
            }
        }
    }

    /// Print a per-item verdict for an offer
    pub fn print_items(&self, offer: &TradeOffer) {
        println!(
            "offer {}: {} -> {}",
            offer.id(),
            offer.sender(),
            offer.recipient()
        );
        for (index, item) in offer.items().iter().enumerate() {
            let verdict = if item.is_valid(&self.session) {
                "ok"
            } else {
                "invalid"
            };
            println!(
                "  {:>2}. {:<18} {} -> {}  [{}]",
                index + 1,
                item.label(),
                item.source(),
                item.destination(),
                verdict
            );
        }
    }
}
