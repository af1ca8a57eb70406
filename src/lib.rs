//! Parley: diplomatic negotiation core for turn-based strategy sessions
//!
//! Two parties exchange trade offers whose items change their mutual
//! stance or move gold, goods, colonies and units between them. This
//! crate provides:
//! - the closed trade-item family with per-kind validity, uniqueness,
//!   commit behavior and record codec
//! - the offer aggregate and its lifecycle
//! - the negotiation engine that validates accepted offers and applies
//!   them atomically to a session

pub mod cli;
pub mod diplomacy;
pub mod error;
pub mod model;
pub mod record;
pub mod types;

// Re-export commonly used types
pub use diplomacy::{
    AnyTransition, NegotiationEngine, OfferState, StancePolicy, TradeItem, TradeItemKind,
    TradeOffer,
};
pub use error::{ParleyError, Result};
pub use model::{Colony, Player, Session, StanceLedger, Unit};
pub use record::Record;
pub use types::{ColonyId, GoodsId, OfferId, PlayerId, Stance, UnitId};
