//! Trade items: the closed family of negotiable proposals

use crate::error::{ParleyError, Result};
use crate::model::Session;
use crate::record::Record;
use crate::types::{ColonyId, GoodsId, PlayerId, Stance, UnitId};
use serde::{Deserialize, Serialize};

/// Record tag for stance items
pub const STANCE_TAG: &str = "stanceTradeItem";
/// Record tag for gold items
pub const GOLD_TAG: &str = "goldTradeItem";
/// Record tag for goods items
pub const GOODS_TAG: &str = "goodsTradeItem";
/// Record tag for colony items
pub const COLONY_TAG: &str = "colonyTradeItem";
/// Record tag for unit items
pub const UNIT_TAG: &str = "unitTradeItem";

/// Payload of a trade item, one variant per negotiable kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeItemKind {
    /// Change of the mutual stance between the two parties. The code is
    /// kept raw so an out-of-range value survives decoding and is
    /// rejected by validity, not by the codec.
    Stance { code: i32 },
    /// Gold from the source treasury to the destination. Signed for the
    /// same reason: a negative amount decodes and fails validity.
    Gold { amount: i64 },
    /// A quantity of one goods type
    Goods { goods: GoodsId, amount: u32 },
    /// Ownership of a colony
    Colony { colony: ColonyId },
    /// Ownership of a unit
    Unit { unit: UnitId },
}

/// One proposed change within a negotiation between two parties.
///
/// Items are independent of each other; the offer aggregate enforces
/// cross-item rules such as uniqueness. An item never mutates anything
/// until [`TradeItem::apply`] commits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeItem {
    source: PlayerId,
    destination: PlayerId,
    kind: TradeItemKind,
}

impl TradeItem {
    pub fn new(source: PlayerId, destination: PlayerId, kind: TradeItemKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    /// Stance item from an enumerated stance
    pub fn stance(source: PlayerId, destination: PlayerId, stance: Stance) -> Self {
        Self::new(
            source,
            destination,
            TradeItemKind::Stance {
                code: stance.code(),
            },
        )
    }

    pub fn gold(source: PlayerId, destination: PlayerId, amount: i64) -> Self {
        Self::new(source, destination, TradeItemKind::Gold { amount })
    }

    pub fn goods(source: PlayerId, destination: PlayerId, goods: GoodsId, amount: u32) -> Self {
        Self::new(source, destination, TradeItemKind::Goods { goods, amount })
    }

    pub fn colony(source: PlayerId, destination: PlayerId, colony: ColonyId) -> Self {
        Self::new(source, destination, TradeItemKind::Colony { colony })
    }

    pub fn unit(source: PlayerId, destination: PlayerId, unit: UnitId) -> Self {
        Self::new(source, destination, TradeItemKind::Unit { unit })
    }

    pub fn source(&self) -> &PlayerId {
        &self.source
    }

    pub fn destination(&self) -> &PlayerId {
        &self.destination
    }

    pub fn kind(&self) -> &TradeItemKind {
        &self.kind
    }

    /// Replace the payload. Only meaningful before the owning offer is
    /// concluded; a committed offer never exposes its items mutably.
    pub fn set_kind(&mut self, kind: TradeItemKind) {
        self.kind = kind;
    }

    /// Message key for this kind of item
    pub fn label(&self) -> &'static str {
        match self.kind {
            TradeItemKind::Stance { .. } => "tradeItem.stance",
            TradeItemKind::Gold { .. } => "tradeItem.gold",
            TradeItemKind::Goods { .. } => "tradeItem.goods",
            TradeItemKind::Colony { .. } => "tradeItem.colony",
            TradeItemKind::Unit { .. } => "tradeItem.unit",
        }
    }

    /// Record element tag for this kind of item
    pub fn tag(&self) -> &'static str {
        match self.kind {
            TradeItemKind::Stance { .. } => STANCE_TAG,
            TradeItemKind::Gold { .. } => GOLD_TAG,
            TradeItemKind::Goods { .. } => GOODS_TAG,
            TradeItemKind::Colony { .. } => COLONY_TAG,
            TradeItemKind::Unit { .. } => UNIT_TAG,
        }
    }

    /// Whether at most one item of this kind may appear in an offer.
    /// True for stance and gold items, false for all others.
    pub fn is_unique(&self) -> bool {
        matches!(
            self.kind,
            TradeItemKind::Stance { .. } | TradeItemKind::Gold { .. }
        )
    }

    /// Whether this item could be committed against the session as it
    /// stands. A pure predicate: business rules are reported here, never
    /// as errors.
    pub fn is_valid(&self, session: &Session) -> bool {
        if self.source == self.destination {
            return false;
        }
        let giver = match session.player(&self.source) {
            Some(player) => player,
            None => return false,
        };
        if session.player(&self.destination).is_none() {
            return false;
        }

        match &self.kind {
            TradeItemKind::Stance { code } => Stance::from_code(*code).is_some(),
            TradeItemKind::Gold { amount } => *amount >= 0 && (*amount as u64) <= giver.gold,
            TradeItemKind::Goods { goods, amount } => {
                *amount > 0 && giver.stock(goods) >= *amount
            }
            TradeItemKind::Colony { colony } => session
                .colony(colony)
                .map_or(false, |c| c.owner == self.source),
            TradeItemKind::Unit { unit } => session
                .unit(unit)
                .map_or(false, |u| u.owner == self.source),
        }
    }

    /// Commit this item's effect to both parties' state.
    ///
    /// Callers validate first; the session mutators still verify their
    /// own preconditions and return an error rather than leaving a
    /// half-applied transfer behind.
    pub fn apply(&self, session: &mut Session) -> Result<()> {
        match &self.kind {
            TradeItemKind::Stance { code } => {
                let stance =
                    Stance::from_code(*code).ok_or(ParleyError::InvalidStanceCode(*code))?;
                session.set_mutual_stance(&self.source, &self.destination, stance)
            }
            TradeItemKind::Gold { amount } => {
                let amount =
                    u64::try_from(*amount).map_err(|_| ParleyError::NegativeGold(*amount))?;
                session.transfer_gold(&self.source, &self.destination, amount)
            }
            TradeItemKind::Goods { goods, amount } => {
                session.transfer_goods(&self.source, &self.destination, goods, *amount)
            }
            TradeItemKind::Colony { colony } => {
                session.transfer_colony(colony, &self.source, &self.destination)
            }
            TradeItemKind::Unit { unit } => {
                session.transfer_unit(unit, &self.source, &self.destination)
            }
        }
    }

    /// Encode this item as a tagged, attributed record
    pub fn to_record(&self) -> Record {
        let record = Record::new(self.tag())
            .with("source", &self.source)
            .with("destination", &self.destination);

        match &self.kind {
            TradeItemKind::Stance { code } => record.with("stance", code),
            TradeItemKind::Gold { amount } => record.with("amount", amount),
            TradeItemKind::Goods { goods, amount } => {
                record.with("goods", goods).with("amount", amount)
            }
            TradeItemKind::Colony { colony } => record.with("colony", colony),
            TradeItemKind::Unit { unit } => record.with("unit", unit),
        }
    }

    /// Decode a record, resolving party references against the session
    /// registry. Structural problems (unknown tag, missing attribute,
    /// malformed number, unresolvable party) are hard errors; an
    /// out-of-range stance or negative gold amount decodes fine and is
    /// left for [`TradeItem::is_valid`].
    pub fn from_record(session: &Session, record: &Record) -> Result<TradeItem> {
        let source = resolve_party(session, record, "source")?;
        let destination = resolve_party(session, record, "destination")?;

        let kind = match record.tag.as_str() {
            STANCE_TAG => TradeItemKind::Stance {
                code: record.parse_attr("stance")?,
            },
            GOLD_TAG => TradeItemKind::Gold {
                amount: record.parse_attr("amount")?,
            },
            GOODS_TAG => TradeItemKind::Goods {
                goods: GoodsId(record.attr("goods")?.to_string()),
                amount: record.parse_attr("amount")?,
            },
            COLONY_TAG => TradeItemKind::Colony {
                colony: ColonyId(record.attr("colony")?.to_string()),
            },
            UNIT_TAG => TradeItemKind::Unit {
                unit: UnitId(record.attr("unit")?.to_string()),
            },
            other => return Err(ParleyError::UnknownRecordTag(other.to_string())),
        };

        Ok(TradeItem {
            source,
            destination,
            kind,
        })
    }
}

fn resolve_party(session: &Session, record: &Record, attribute: &str) -> Result<PlayerId> {
    let id = PlayerId(record.attr(attribute)?.to_string());
    if session.player(&id).is_none() {
        return Err(ParleyError::UnknownParty(id.0));
    }
    Ok(id)
}
