//! Card zones: draw pile, hand, discard and exhaust.

use crate::error::{ErrorSeverity, GameError};
use crate::rng::{PcgRng, shuffle};

use super::CardId;

/// Zone a card can be moved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardZone {
    DrawPile,
    Hand,
    Discard,
    Exhaust,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("{card} is not in the {zone} zone")]
    NotInZone { card: CardId, zone: CardZone },
}

impl GameError for DeckError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInZone { .. } => "DECK_NOT_IN_ZONE",
        }
    }
}

/// The player's cards for one run.
///
/// The top of the draw pile is the end of `draw_pile`. Duplicate card ids are
/// allowed; zone moves act on the first matching copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    draw_pile: Vec<CardId>,
    hand: Vec<CardId>,
    discard: Vec<CardId>,
    exhaust: Vec<CardId>,
    seed: u64,
    shuffles: u64,
}

impl Deck {
    /// Builds a deck from a card list and shuffles it once.
    pub fn new(cards: impl IntoIterator<Item = CardId>, seed: u64) -> Self {
        let mut deck = Self {
            draw_pile: cards.into_iter().collect(),
            seed,
            ..Self::default()
        };
        deck.shuffle_draw_pile();
        deck
    }

    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    pub fn draw_pile(&self) -> &[CardId] {
        &self.draw_pile
    }

    pub fn discard(&self) -> &[CardId] {
        &self.discard
    }

    pub fn exhaust(&self) -> &[CardId] {
        &self.exhaust
    }

    pub fn in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Draws up to `count` cards into the hand.
    ///
    /// When the draw pile runs out the discard pile is shuffled back in once
    /// per call. Drawing stops early if both are empty. Returns the drawn
    /// cards in draw order.
    pub fn draw(&mut self, count: u32) -> Vec<CardId> {
        let mut drawn = Vec::new();
        let mut reshuffled = false;

        for _ in 0..count {
            if self.draw_pile.is_empty() && !reshuffled {
                self.reshuffle_discard();
                reshuffled = true;
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            self.hand.push(card);
            drawn.push(card);
        }

        drawn
    }

    /// Moves the first copy of `card` from `from` into `to`.
    pub fn move_card(&mut self, card: CardId, from: CardZone, to: CardZone) -> Result<(), DeckError> {
        let source = self.zone_mut(from);
        let index = source
            .iter()
            .position(|candidate| *candidate == card)
            .ok_or(DeckError::NotInZone { card, zone: from })?;
        source.remove(index);
        self.zone_mut(to).push(card);
        Ok(())
    }

    /// Moves a card out of the hand into `zone`.
    pub fn move_to_zone(&mut self, card: CardId, zone: CardZone) -> Result<(), DeckError> {
        self.move_card(card, CardZone::Hand, zone)
    }

    /// Moves every card in hand to the discard pile.
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    fn reshuffle_discard(&mut self) {
        self.draw_pile.append(&mut self.discard);
        self.shuffle_draw_pile();
    }

    fn shuffle_draw_pile(&mut self) {
        self.shuffles += 1;
        shuffle(&mut self.draw_pile, &PcgRng, self.seed, self.shuffles);
    }

    fn zone_mut(&mut self, zone: CardZone) -> &mut Vec<CardId> {
        match zone {
            CardZone::DrawPile => &mut self.draw_pile,
            CardZone::Hand => &mut self.hand,
            CardZone::Discard => &mut self.discard,
            CardZone::Exhaust => &mut self.exhaust,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(size: u32) -> Deck {
        Deck::new((0..size).map(CardId), 99)
    }

    #[test]
    fn draw_moves_cards_into_hand() {
        let mut deck = deck(5);
        let drawn = deck.draw(3);
        assert_eq!(drawn.len(), 3);
        assert_eq!(deck.hand(), drawn.as_slice());
        assert_eq!(deck.draw_pile().len(), 2);
    }

    #[test]
    fn empty_draw_pile_reshuffles_discard() {
        let mut deck = deck(2);
        let first = deck.draw(2);
        for card in &first {
            deck.move_to_zone(*card, CardZone::Discard).unwrap();
        }

        let second = deck.draw(1);
        assert_eq!(second.len(), 1);
        assert_eq!(deck.discard().len(), 0);
        assert_eq!(deck.draw_pile().len(), 1);
    }

    #[test]
    fn draw_stops_when_everything_is_empty() {
        let mut deck = deck(1);
        assert_eq!(deck.draw(4).len(), 1);
        assert!(deck.draw(1).is_empty());
    }

    #[test]
    fn moving_missing_card_is_rejected() {
        let mut deck = deck(3);
        let result = deck.move_to_zone(CardId(1), CardZone::Discard);
        assert_eq!(
            result,
            Err(DeckError::NotInZone {
                card: CardId(1),
                zone: CardZone::Hand
            })
        );
    }

    #[test]
    fn discard_hand_empties_hand() {
        let mut deck = deck(4);
        deck.draw(3);
        deck.discard_hand();
        assert!(deck.hand().is_empty());
        assert_eq!(deck.discard().len(), 3);
    }

    #[test]
    fn same_seed_gives_same_draws() {
        assert_eq!(deck(10).draw(10), deck(10).draw(10));
    }
}
