//! Game model: session, parties and holdings

pub mod player;
pub mod session;

pub use player::{Colony, Player, Unit};
pub use session::{PartyPair, Session, StanceEntry, StanceLedger};
