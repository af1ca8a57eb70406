//! Error types for parley

use thiserror::Error;

/// Main error type for parley
#[derive(Error, Debug)]
pub enum ParleyError {
    // Registry errors
    #[error("Unknown party: {0}")]
    UnknownParty(String),

    #[error("Unknown colony: {0}")]
    UnknownColony(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Party {0} cannot negotiate with itself")]
    SelfNegotiation(String),

    // Holdings errors
    #[error("Insufficient gold: required {required}, available {available}")]
    InsufficientGold { required: u64, available: u64 },

    #[error("Insufficient {goods}: required {required}, available {available}")]
    InsufficientGoods {
        goods: String,
        required: u32,
        available: u32,
    },

    #[error("Colony {colony} is not owned by {party}")]
    ColonyNotOwned { colony: String, party: String },

    #[error("Unit {unit} is not owned by {party}")]
    UnitNotOwned { unit: String, party: String },

    // Trade item errors
    #[error("Stance code {0} is not a known stance")]
    InvalidStanceCode(i32),

    #[error("Gold amount {0} is negative")]
    NegativeGold(i64),

    // Offer and negotiation errors
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("Offer already exists: {0}")]
    OfferAlreadyExists(String),

    #[error("Offer {0} is closed")]
    OfferClosed(String),

    #[error("Item parties do not match the parties of offer {offer}")]
    ItemPartyMismatch { offer: String },

    #[error("Offer carries more than one {0} item")]
    DuplicateUniqueItem(String),

    #[error("Invalid trade item at position {index}: {label}")]
    InvalidTradeItem { index: usize, label: String },

    #[error("Stance change rejected by policy: {0}")]
    StanceChangeRejected(String),

    // Codec errors
    #[error("Unknown record tag: {0}")]
    UnknownRecordTag(String),

    #[error("Missing attribute {attribute} on {tag}")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Malformed attribute {attribute}: {value}")]
    MalformedAttribute { attribute: String, value: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;
