use crate::hex::{HexLayout, TerrainCosts};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Action points granted at the start of every player turn.
    pub base_action_points: u32,
    /// Upper bound on action points, including gains and carry-over.
    pub action_point_slots: u32,
    /// Unspent points kept across a turn boundary.
    pub carry_over_cap: u32,
    /// Shield removed from every unit when the enemy turn ends.
    pub shield_decay: u32,
    /// Cards drawn at the start of the first player turn.
    pub initial_hand_size: u32,
    /// Player max health before extra slots and equipment.
    pub base_max_health: u32,
    /// Max health added per unlocked extra health slot.
    pub health_per_slot: u32,
    /// Damage dealt by each poison tick.
    pub poison_damage: u32,
    pub terrain_costs: TerrainCosts,
    pub layout: HexLayout,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Neighbors per hex cell.
    pub const HEX_DIRECTIONS: usize = 6;
    /// Equipment slots (head, torso, shoes, weapon).
    pub const EQUIPMENT_SLOTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ACTION_POINTS: u32 = 2;
    pub const DEFAULT_ACTION_POINT_SLOTS: u32 = 4;
    pub const DEFAULT_CARRY_OVER_CAP: u32 = 1;
    pub const DEFAULT_SHIELD_DECAY: u32 = 100;
    pub const DEFAULT_INITIAL_HAND_SIZE: u32 = 5;
    pub const DEFAULT_BASE_MAX_HEALTH: u32 = 20;
    pub const DEFAULT_HEALTH_PER_SLOT: u32 = 5;
    pub const DEFAULT_POISON_DAMAGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            base_action_points: Self::DEFAULT_BASE_ACTION_POINTS,
            action_point_slots: Self::DEFAULT_ACTION_POINT_SLOTS,
            carry_over_cap: Self::DEFAULT_CARRY_OVER_CAP,
            shield_decay: Self::DEFAULT_SHIELD_DECAY,
            initial_hand_size: Self::DEFAULT_INITIAL_HAND_SIZE,
            base_max_health: Self::DEFAULT_BASE_MAX_HEALTH,
            health_per_slot: Self::DEFAULT_HEALTH_PER_SLOT,
            poison_damage: Self::DEFAULT_POISON_DAMAGE,
            terrain_costs: TerrainCosts::DEFAULT,
            layout: HexLayout::DEFAULT,
        }
    }

    pub fn with_initial_hand_size(mut self, initial_hand_size: u32) -> Self {
        self.initial_hand_size = initial_hand_size;
        self
    }

    pub fn with_base_max_health(mut self, base_max_health: u32) -> Self {
        self.base_max_health = base_max_health;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
