//! Damage and healing against the shield/health pools.

use crate::unit::CombatUnit;

/// Breakdown of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage soaked by shields.
    pub absorbed: u32,
    /// Damage that reached health.
    pub dealt: u32,
    pub remaining_health: u32,
    /// Health reached zero with this hit.
    pub killed: bool,
}

/// Applies damage shields-first.
///
/// # Formula
///
/// ```text
/// absorbed = min(amount, shield)
/// shield  -= absorbed
/// health   = max(0, health - (amount - absorbed))
/// ```
///
/// Death handling is left to the caller; `killed` only reports that health
/// dropped to zero on this hit.
pub fn apply_damage(unit: &mut CombatUnit, amount: u32) -> DamageOutcome {
    let absorbed = amount.min(unit.shield);
    unit.shield -= absorbed;

    let remainder = amount - absorbed;
    let before = unit.health;
    unit.health = unit.health.saturating_sub(remainder);

    DamageOutcome {
        absorbed,
        dealt: before - unit.health,
        remaining_health: unit.health,
        killed: before > 0 && unit.health == 0,
    }
}

/// Heals up to `max_health`. Overflow is discarded, never banked.
///
/// Returns the amount actually restored.
pub fn apply_heal(unit: &mut CombatUnit, amount: u32, max_health: u32) -> u32 {
    let before = unit.health;
    unit.health = unit.health.saturating_add(amount).min(max_health).max(before);
    unit.health - before
}

/// Reduces shields by `amount`, flooring at zero.
pub fn decay_shield(unit: &mut CombatUnit, amount: u32) -> u32 {
    let before = unit.shield;
    unit.shield = unit.shield.saturating_sub(amount);
    before - unit.shield
}
