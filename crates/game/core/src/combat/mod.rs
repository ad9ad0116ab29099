//! Combat resolution.
//!
//! Pure functions over [`crate::unit::CombatUnit`]:
//!
//! - `apply_damage`: shields absorb first, remainder hits health (floored at 0)
//! - `apply_heal`: heal capped at the unit's current max health
//! - `decay_shield`: end-of-round shield loss
//!
//! Death is reported, not handled, here; the turn controller decides what a
//! kill means for the player or an enemy.

pub mod damage;
pub mod status;

pub use damage::{DamageOutcome, apply_damage, apply_heal, decay_shield};
pub use status::{StatusEffects, StatusRider, StatusTick};
