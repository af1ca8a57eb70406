//! Trade offers: the ordered aggregate of items between two parties

use crate::error::{ParleyError, Result};
use crate::model::Session;
use crate::record::Record;
use crate::types::{OfferId, PlayerId};
use serde::{Deserialize, Serialize};

use super::item::TradeItem;

/// Lifecycle of a trade offer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferState {
    /// On the table awaiting a verdict
    Proposed,
    /// Accepted and committed
    Accepted,
    /// Turned down by the recipient
    Declined { reason: String },
    /// Taken back by the sender before a verdict
    Withdrawn,
}

impl OfferState {
    /// Whether this offer can no longer change
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OfferState::Proposed)
    }

    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

/// An ordered collection of trade items exchanged between exactly two
/// parties.
///
/// The offer owns its items; items hold only party identifiers. Until
/// the offer reaches a terminal state it has no effect on the session,
/// so discarding it is always side-effect free.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TradeOffer {
    id: OfferId,
    sender: PlayerId,
    recipient: PlayerId,
    items: Vec<TradeItem>,
    state: OfferState,
}

impl TradeOffer {
    pub fn new(id: OfferId, sender: PlayerId, recipient: PlayerId) -> Self {
        Self {
            id,
            sender,
            recipient,
            items: Vec::new(),
            state: OfferState::Proposed,
        }
    }

    pub fn id(&self) -> &OfferId {
        &self.id
    }

    pub fn sender(&self) -> &PlayerId {
        &self.sender
    }

    pub fn recipient(&self) -> &PlayerId {
        &self.recipient
    }

    pub fn items(&self) -> &[TradeItem] {
        &self.items
    }

    pub fn state(&self) -> &OfferState {
        &self.state
    }

    /// Append an item.
    ///
    /// Items may flow in either direction but must stay between the
    /// offer's two parties. Uniqueness is not enforced here: a
    /// duplicate unique kind is detected by [`validate`] before commit,
    /// so an over-full offer can still be inspected.
    ///
    /// [`validate`]: TradeOffer::validate
    pub fn add_item(&mut self, item: TradeItem) -> Result<()> {
        if self.state.is_terminal() {
            return Err(ParleyError::OfferClosed(self.id.to_string()));
        }
        let forward =
            item.source() == &self.sender && item.destination() == &self.recipient;
        let backward =
            item.source() == &self.recipient && item.destination() == &self.sender;
        if !forward && !backward {
            return Err(ParleyError::ItemPartyMismatch {
                offer: self.id.to_string(),
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Check the aggregate against the session: the global uniqueness
    /// rule first, then each item's own validity. Performs no mutation.
    pub fn validate(&self, session: &Session) -> Result<()> {
        let mut seen: Vec<&'static str> = Vec::new();
        for item in &self.items {
            if item.is_unique() {
                if seen.contains(&item.tag()) {
                    return Err(ParleyError::DuplicateUniqueItem(item.label().to_string()));
                }
                seen.push(item.tag());
            }
        }

        for (index, item) in self.items.iter().enumerate() {
            if !item.is_valid(session) {
                return Err(ParleyError::InvalidTradeItem {
                    index,
                    label: item.label().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Turn the offer down with a reason
    pub fn decline(&mut self, reason: String) -> Result<()> {
        if self.state.is_terminal() {
            return Err(ParleyError::OfferClosed(self.id.to_string()));
        }
        self.state = OfferState::Declined { reason };
        Ok(())
    }

    /// Take the offer back before a verdict
    pub fn withdraw(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(ParleyError::OfferClosed(self.id.to_string()));
        }
        self.state = OfferState::Withdrawn;
        Ok(())
    }

    /// Mark accepted. Only the engine calls this, after every item has
    /// been committed.
    pub(crate) fn mark_accepted(&mut self) {
        self.state = OfferState::Accepted;
    }

    /// Encode every item as a record, in order
    pub fn to_records(&self) -> Vec<Record> {
        self.items.iter().map(TradeItem::to_record).collect()
    }

    /// Rebuild an offer from records, resolving parties against the
    /// session registry
    pub fn from_records(
        id: OfferId,
        sender: PlayerId,
        recipient: PlayerId,
        session: &Session,
        records: &[Record],
    ) -> Result<Self> {
        let mut offer = TradeOffer::new(id, sender, recipient);
        for record in records {
            offer.add_item(TradeItem::from_record(session, record)?)?;
        }
        Ok(offer)
    }
}
