//! Diplomacy: trade items, offers and the negotiation engine

pub mod engine;
pub mod item;
pub mod offer;

pub use engine::{AnyTransition, NegotiationEngine, StancePolicy};
pub use item::{TradeItem, TradeItemKind};
pub use offer::{OfferState, TradeOffer};
