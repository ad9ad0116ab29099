//! Turn-counted status effects carried by enemies.
//!
//! Durations are counted in enemy turns: each enemy turn ticks poison once and
//! consumes one turn of stun.

/// Stun and poison counters for one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    /// Remaining enemy turns the unit skips.
    pub stun_turns: u32,
    /// Remaining enemy turns the unit takes poison damage.
    pub poison_turns: u32,
}

/// Status rider attached to an armed attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusRider {
    Poison { turns: u32 },
    Stun { turns: u32 },
}

/// What the status step decided for this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Poison damage to apply this turn.
    pub poison_damage: u32,
    /// The unit loses this turn.
    pub stunned: bool,
}

impl StatusEffects {
    /// Adds a rider. Durations of the same kind stack.
    pub fn apply(&mut self, rider: StatusRider) {
        match rider {
            StatusRider::Poison { turns } => self.poison_turns += turns,
            StatusRider::Stun { turns } => self.stun_turns += turns,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_turns > 0
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison_turns > 0
    }

    /// Counts down both effects for one turn.
    pub fn tick(&mut self, poison_damage: u32) -> StatusTick {
        let mut outcome = StatusTick::default();
        if self.poison_turns > 0 {
            self.poison_turns -= 1;
            outcome.poison_damage = poison_damage;
        }
        if self.stun_turns > 0 {
            self.stun_turns -= 1;
            outcome.stunned = true;
        }
        outcome
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
