//! Staging area for the outcomes of a played card side.

use super::{CardData, CardSide, EffectKind};

/// Pending effects of the card side being resolved.
///
/// Damage and range are *set* by each `Attack` entry, so only the last attack
/// on a side survives. Movement, healing and block *accumulate* across every
/// entry of the side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectCache {
    damage: u32,
    range: u32,
    movement: u32,
    heal: u32,
    block: u32,
}

impl EffectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages the effects of one side of `card`, in list order.
    ///
    /// Kinds other than attack, move, heal and block are ignored here; they
    /// are resolved as "always" effects by the turn controller.
    pub fn cache_card_effect(&mut self, card: &CardData, side: CardSide) {
        for effect in card.side(side) {
            match effect.kind {
                EffectKind::Attack => {
                    self.damage = effect.value;
                    self.range = effect.range;
                }
                EffectKind::Move => self.movement += effect.value,
                EffectKind::Heal => self.heal += effect.value,
                EffectKind::Block => self.block += effect.value,
                EffectKind::Draw
                | EffectKind::GainAction
                | EffectKind::GainBlock
                | EffectKind::Poison
                | EffectKind::Stun => {}
            }
        }
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn movement(&self) -> u32 {
        self.movement
    }

    pub fn heal(&self) -> u32 {
        self.heal
    }

    pub fn block(&self) -> u32 {
        self.block
    }

    /// Clears the staged attack (damage and range together).
    pub fn consume_damage(&mut self) {
        self.damage = 0;
        self.range = 0;
    }

    pub fn consume_movement(&mut self) {
        self.movement = 0;
    }

    pub fn consume_heal(&mut self) {
        self.heal = 0;
    }

    pub fn consume_block(&mut self) {
        self.block = 0;
    }

    /// Spends part of the staged movement, flooring at zero.
    pub fn use_movement(&mut self, amount: u32) {
        self.movement = self.movement.saturating_sub(amount);
    }

    pub fn clear_for_new_turn(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardEffect, CardId};

    fn card(left: Vec<CardEffect>) -> CardData {
        CardData::new(CardId(1), "test").with_left(left)
    }

    #[test]
    fn last_attack_overwrites_earlier_ones() {
        let mut cache = EffectCache::new();
        cache.cache_card_effect(
            &card(vec![CardEffect::attack(3, 2), CardEffect::attack(5, 1)]),
            CardSide::Left,
        );
        assert_eq!(cache.damage(), 5);
        assert_eq!(cache.range(), 1);
    }

    #[test]
    fn blocks_accumulate() {
        let mut cache = EffectCache::new();
        cache.cache_card_effect(
            &card(vec![
                CardEffect::new(EffectKind::Block, 2),
                CardEffect::new(EffectKind::Block, 3),
            ]),
            CardSide::Left,
        );
        assert_eq!(cache.block(), 5);
    }

    #[test]
    fn only_chosen_side_is_cached() {
        let data = CardData::new(CardId(2), "split")
            .with_left([CardEffect::new(EffectKind::Heal, 4)])
            .with_right([CardEffect::new(EffectKind::Move, 3)]);
        let mut cache = EffectCache::new();
        cache.cache_card_effect(&data, CardSide::Right);

        assert_eq!(cache.heal(), 0);
        assert_eq!(cache.movement(), 3);
    }

    #[test]
    fn always_kinds_are_ignored() {
        let mut cache = EffectCache::new();
        cache.cache_card_effect(
            &card(vec![
                CardEffect::new(EffectKind::Draw, 2),
                CardEffect::new(EffectKind::GainBlock, 4),
            ]),
            CardSide::Left,
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn components_are_consumed_independently() {
        let mut cache = EffectCache::new();
        cache.cache_card_effect(
            &card(vec![
                CardEffect::attack(4, 1),
                CardEffect::new(EffectKind::Move, 2),
                CardEffect::new(EffectKind::Heal, 1),
            ]),
            CardSide::Left,
        );

        cache.consume_heal();
        assert_eq!((cache.heal(), cache.damage(), cache.movement()), (0, 4, 2));

        cache.use_movement(5);
        assert_eq!(cache.movement(), 0);
        assert_eq!(cache.damage(), 4);

        cache.clear_for_new_turn();
        assert!(cache.is_empty());
    }
}
