//! Negotiation engine: offer registry and the commit step

use crate::error::{ParleyError, Result};
use crate::model::Session;
use crate::types::{OfferId, Stance};
use std::collections::HashMap;

use super::item::TradeItemKind;
use super::offer::TradeOffer;

/// Cross-stance-transition legality, supplied by the negotiation layer
/// rather than hard-coded in the items.
pub trait StancePolicy {
    /// Whether moving from `current` (`None` when no stance has been
    /// recorded yet) to `proposed` is allowed.
    fn permits(&self, current: Option<Stance>, proposed: Stance) -> bool;
}

/// Default policy: every transition is allowed
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyTransition;

impl StancePolicy for AnyTransition {
    fn permits(&self, _current: Option<Stance>, _proposed: Stance) -> bool {
        true
    }
}

/// Negotiation engine manages the offers on the table and applies the
/// accepted ones to the session.
///
/// Construction, validation and commitment all happen within one
/// turn-processing step; the engine takes `&mut Session` for the commit
/// so no observer can see a partially applied offer.
pub struct NegotiationEngine {
    offers: HashMap<OfferId, TradeOffer>,
    policy: Box<dyn StancePolicy>,
}

impl NegotiationEngine {
    pub fn new() -> Self {
        Self {
            offers: HashMap::new(),
            policy: Box::new(AnyTransition),
        }
    }

    /// Engine with a caller-supplied stance transition policy
    pub fn with_policy(policy: Box<dyn StancePolicy>) -> Self {
        Self {
            offers: HashMap::new(),
            policy,
        }
    }

    /// Put an offer on the table
    pub fn propose(&mut self, offer: TradeOffer) -> Result<()> {
        if self.offers.contains_key(offer.id()) {
            return Err(ParleyError::OfferAlreadyExists(offer.id().to_string()));
        }

        tracing::info!(
            "Offer {} proposed: {} -> {}, {} item(s)",
            offer.id(),
            offer.sender(),
            offer.recipient(),
            offer.items().len()
        );
        self.offers.insert(offer.id().clone(), offer);
        Ok(())
    }

    pub fn offer(&self, id: &OfferId) -> Option<&TradeOffer> {
        self.offers.get(id)
    }

    pub fn offers(&self) -> &HashMap<OfferId, TradeOffer> {
        &self.offers
    }

    /// Offers still awaiting a verdict
    pub fn open_offers(&self) -> impl Iterator<Item = &TradeOffer> {
        self.offers.values().filter(|offer| offer.state().is_open())
    }

    /// Check an offer against the session and the stance policy without
    /// committing anything.
    pub fn evaluate(&self, offer: &TradeOffer, session: &Session) -> Result<()> {
        offer.validate(session)?;

        for item in offer.items() {
            if let TradeItemKind::Stance { code } = item.kind() {
                // validate() already rejected unknown codes
                if let Some(proposed) = Stance::from_code(*code) {
                    let current = session.stance_between(item.source(), item.destination());
                    if !self.policy.permits(current, proposed) {
                        let from = current
                            .map(|stance| stance.to_string())
                            .unwrap_or_else(|| "unset".to_string());
                        return Err(ParleyError::StanceChangeRejected(format!(
                            "{} to {}",
                            from, proposed
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Accept an offer: validate everything, then commit every item in
    /// sequence. Nothing is committed when any check fails, so a
    /// rejected offer leaves both parties untouched.
    pub fn accept(&mut self, id: &OfferId, session: &mut Session) -> Result<()> {
        let offer = self
            .offers
            .get(id)
            .ok_or_else(|| ParleyError::OfferNotFound(id.to_string()))?;
        if offer.state().is_terminal() {
            return Err(ParleyError::OfferClosed(id.to_string()));
        }

        self.evaluate(offer, session)?;

        let offer = self
            .offers
            .get_mut(id)
            .ok_or_else(|| ParleyError::OfferNotFound(id.to_string()))?;
        for item in offer.items() {
            item.apply(session)?;
        }
        offer.mark_accepted();

        tracing::info!("Offer {} accepted on turn {}", id, session.turn());
        Ok(())
    }

    /// Turn an offer down; no side effects on the session
    pub fn decline(&mut self, id: &OfferId, reason: String) -> Result<()> {
        let offer = self
            .offers
            .get_mut(id)
            .ok_or_else(|| ParleyError::OfferNotFound(id.to_string()))?;
        offer.decline(reason)?;

        tracing::info!("Offer {} declined", id);
        Ok(())
    }

    /// Take an offer back; no side effects on the session
    pub fn withdraw(&mut self, id: &OfferId) -> Result<()> {
        let offer = self
            .offers
            .get_mut(id)
            .ok_or_else(|| ParleyError::OfferNotFound(id.to_string()))?;
        offer.withdraw()?;

        tracing::info!("Offer {} withdrawn", id);
        Ok(())
    }
}

impl Default for NegotiationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diplomacy::item::TradeItem;
    use crate::diplomacy::offer::OfferState;
    use crate::model::{Colony, Player, Unit};
    use crate::types::{ColonyId, GoodsId, PlayerId, UnitId};

    fn session() -> (Session, PlayerId, PlayerId) {
        let mut session = Session::new();
        let dutch = PlayerId::new("dutch");
        let french = PlayerId::new("french");
        session.add_player(
            dutch.clone(),
            Player::new("Dutch")
                .with_gold(500)
                .with_goods(GoodsId("furs".to_string()), 40),
        );
        session.add_player(french.clone(), Player::new("French").with_gold(300));
        session.add_colony(
            ColonyId("new-amsterdam".to_string()),
            Colony {
                name: "New Amsterdam".to_string(),
                owner: dutch.clone(),
            },
        );
        session.add_unit(
            UnitId("frigate-1".to_string()),
            Unit {
                kind: "frigate".to_string(),
                owner: dutch.clone(),
            },
        );
        (session, dutch, french)
    }

    fn offer_id() -> OfferId {
        OfferId("offer-1".to_string())
    }

    #[test]
    fn test_full_negotiation_flow() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::stance(dutch.clone(), french.clone(), Stance::Peace))
            .unwrap();
        offer
            .add_item(TradeItem::gold(dutch.clone(), french.clone(), 200))
            .unwrap();
        offer
            .add_item(TradeItem::goods(
                dutch.clone(),
                french.clone(),
                GoodsId("furs".to_string()),
                15,
            ))
            .unwrap();
        offer
            .add_item(TradeItem::colony(
                dutch.clone(),
                french.clone(),
                ColonyId("new-amsterdam".to_string()),
            ))
            .unwrap();
        offer
            .add_item(TradeItem::unit(
                dutch.clone(),
                french.clone(),
                UnitId("frigate-1".to_string()),
            ))
            .unwrap();

        engine.propose(offer).unwrap();
        engine.accept(&offer_id(), &mut session).unwrap();

        assert_eq!(session.stance_between(&dutch, &french), Some(Stance::Peace));
        assert_eq!(session.player(&dutch).unwrap().gold, 300);
        assert_eq!(session.player(&french).unwrap().gold, 500);
        assert_eq!(
            session
                .player(&french)
                .unwrap()
                .stock(&GoodsId("furs".to_string())),
            15
        );
        assert_eq!(
            session
                .colony(&ColonyId("new-amsterdam".to_string()))
                .unwrap()
                .owner,
            french
        );
        assert_eq!(
            session.unit(&UnitId("frigate-1".to_string())).unwrap().owner,
            french
        );
        assert_eq!(
            engine.offer(&offer_id()).unwrap().state(),
            &OfferState::Accepted
        );
    }

    #[test]
    fn test_duplicate_unique_kind_commits_nothing() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::stance(dutch.clone(), french.clone(), Stance::Peace))
            .unwrap();
        offer
            .add_item(TradeItem::stance(dutch.clone(), french.clone(), Stance::War))
            .unwrap();
        engine.propose(offer).unwrap();

        let result = engine.accept(&offer_id(), &mut session);
        assert!(matches!(
            result,
            Err(ParleyError::DuplicateUniqueItem(_))
        ));

        // Neither stance item took effect
        assert_eq!(session.stance_between(&dutch, &french), None);
        assert_eq!(
            engine.offer(&offer_id()).unwrap().state(),
            &OfferState::Proposed
        );
    }

    #[test]
    fn test_invalid_item_commits_nothing() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::gold(dutch.clone(), french.clone(), 200))
            .unwrap();
        offer
            .add_item(TradeItem::gold(french.clone(), dutch.clone(), 9000))
            .unwrap();
        engine.propose(offer).unwrap();

        let result = engine.accept(&offer_id(), &mut session);
        // Two gold items trip the uniqueness rule before validity
        assert!(result.is_err());
        assert_eq!(session.player(&dutch).unwrap().gold, 500);
        assert_eq!(session.player(&french).unwrap().gold, 300);
    }

    #[test]
    fn test_accept_unknown_offer() {
        let (mut session, _, _) = session();
        let mut engine = NegotiationEngine::new();

        let result = engine.accept(&offer_id(), &mut session);
        assert!(matches!(result, Err(ParleyError::OfferNotFound(_))));
    }

    #[test]
    fn test_accept_twice_fails() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::gold(dutch, french, 100))
            .unwrap();
        engine.propose(offer).unwrap();

        engine.accept(&offer_id(), &mut session).unwrap();
        let result = engine.accept(&offer_id(), &mut session);
        assert!(matches!(result, Err(ParleyError::OfferClosed(_))));
    }

    #[test]
    fn test_declined_offer_cannot_be_accepted() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::gold(dutch.clone(), french.clone(), 100))
            .unwrap();
        engine.propose(offer).unwrap();

        engine
            .decline(&offer_id(), "terms too steep".to_string())
            .unwrap();
        let result = engine.accept(&offer_id(), &mut session);
        assert!(matches!(result, Err(ParleyError::OfferClosed(_))));

        // Declining left the treasuries alone
        assert_eq!(session.player(&dutch).unwrap().gold, 500);
        assert_eq!(session.player(&french).unwrap().gold, 300);
    }

    #[test]
    fn test_withdraw_leaves_session_untouched() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::stance(dutch.clone(), french.clone(), Stance::Alliance))
            .unwrap();
        engine.propose(offer).unwrap();

        engine.withdraw(&offer_id()).unwrap();

        assert_eq!(session.stance_between(&dutch, &french), None);
        assert_eq!(
            engine.offer(&offer_id()).unwrap().state(),
            &OfferState::Withdrawn
        );
        assert_eq!(engine.open_offers().count(), 0);
    }

    #[test]
    fn test_duplicate_offer_id_rejected() {
        let (_, dutch, french) = session();
        let mut engine = NegotiationEngine::new();

        engine
            .propose(TradeOffer::new(offer_id(), dutch.clone(), french.clone()))
            .unwrap();
        let result = engine.propose(TradeOffer::new(offer_id(), dutch, french));
        assert!(matches!(result, Err(ParleyError::OfferAlreadyExists(_))));
    }

    /// Alliances only out of an existing peace; everything else goes
    struct AllianceNeedsPeace;

    impl StancePolicy for AllianceNeedsPeace {
        fn permits(&self, current: Option<Stance>, proposed: Stance) -> bool {
            match proposed {
                Stance::Alliance => current == Some(Stance::Peace),
                _ => true,
            }
        }
    }

    #[test]
    fn test_policy_blocks_commit_entirely() {
        let (mut session, dutch, french) = session();
        let mut engine = NegotiationEngine::with_policy(Box::new(AllianceNeedsPeace));

        let mut offer = TradeOffer::new(offer_id(), dutch.clone(), french.clone());
        offer
            .add_item(TradeItem::stance(dutch.clone(), french.clone(), Stance::Alliance))
            .unwrap();
        offer
            .add_item(TradeItem::gold(dutch.clone(), french.clone(), 100))
            .unwrap();
        engine.propose(offer).unwrap();

        let result = engine.accept(&offer_id(), &mut session);
        assert!(matches!(
            result,
            Err(ParleyError::StanceChangeRejected(_))
        ));
        // The gold item was not committed either
        assert_eq!(session.player(&dutch).unwrap().gold, 500);

        // Establish peace first, then the same offer goes through
        session
            .set_mutual_stance(&dutch, &french, Stance::Peace)
            .unwrap();
        engine.accept(&offer_id(), &mut session).unwrap();
        assert_eq!(
            session.stance_between(&dutch, &french),
            Some(Stance::Alliance)
        );
        assert_eq!(session.player(&dutch).unwrap().gold, 400);
    }
}
