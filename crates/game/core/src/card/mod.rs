//! Card data, the effect cache and deck zones.

pub mod cache;
pub mod deck;

pub use cache::EffectCache;
pub use deck::{CardZone, Deck, DeckError};

use std::fmt;

/// Identifier of a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Which half of a card the player chose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardSide {
    Left,
    Right,
}

/// What a single card effect does.
///
/// `Attack`, `Move`, `Heal` and `Block` appear on card sides and go through
/// the [`EffectCache`]. The remaining kinds are "always" effects resolved the
/// moment the card is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Attack,
    Move,
    Heal,
    Block,
    /// Draw `value` cards.
    Draw,
    /// Gain `value` action points.
    GainAction,
    /// Gain `value` shield immediately.
    GainBlock,
    /// Poison the attacked enemy for `value` enemy turns.
    Poison,
    /// Stun the attacked enemy for `value` enemy turns.
    Stun,
}

/// One effect entry on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardEffect {
    pub kind: EffectKind,
    pub value: u32,
    /// Only meaningful for `Attack`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: u32,
}

impl CardEffect {
    pub const fn new(kind: EffectKind, value: u32) -> Self {
        Self {
            kind,
            value,
            range: 0,
        }
    }

    pub const fn attack(value: u32, range: u32) -> Self {
        Self {
            kind: EffectKind::Attack,
            value,
            range,
        }
    }
}

/// Static definition of a playable card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    /// Shown in the deck builder; combat ignores it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub left: Vec<CardEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub right: Vec<CardEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub always: Vec<CardEffect>,
}

impl CardData {
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mana_cost: 0,
            left: Vec::new(),
            right: Vec::new(),
            always: Vec::new(),
        }
    }

    pub fn with_left(mut self, effects: impl IntoIterator<Item = CardEffect>) -> Self {
        self.left.extend(effects);
        self
    }

    pub fn with_right(mut self, effects: impl IntoIterator<Item = CardEffect>) -> Self {
        self.right.extend(effects);
        self
    }

    pub fn with_always(mut self, effects: impl IntoIterator<Item = CardEffect>) -> Self {
        self.always.extend(effects);
        self
    }

    pub fn side(&self, side: CardSide) -> &[CardEffect] {
        match side {
            CardSide::Left => &self.left,
            CardSide::Right => &self.right,
        }
    }
}
