//! The [`GameCore`] aggregate.
//!
//! One value owns every piece of mutable rules state: the grid, the units,
//! the deck, the effect cache, the equipment and the turn phase. Every turn
//! transition is a method here, grouped by who drives it:
//!
//! - `player`: card play, attack resolution, movement, ending the turn
//! - `enemy`: the enemy routine, closing the enemy turn, player death
//!
//! Transitions either succeed and return a report, or fail with a
//! [`TurnError`] and leave the core exactly as it was.

mod builder;
mod enemy;
mod player;

pub use builder::{GameCoreBuilder, SetupError};

use std::collections::{HashMap, HashSet};

use crate::card::{CardData, CardId, Deck, EffectCache};
use crate::combat::decay_shield;
use crate::config::GameConfig;
use crate::equipment::{EquipmentSet, EquipmentSlot, ItemDefinition, ItemId, StatKind};
use crate::hex::{HexGrid, RoomId};
use crate::save::SaveData;
use crate::search::{RangeResult, compute_range};
use crate::turn::{ActionPoints, ArmedAttack, PlayerPhase, TurnError, TurnPhase, TurnStart};
use crate::unit::{CombatUnit, UnitFlags, UnitId};

/// Rules state for one level of a run.
#[derive(Clone, Debug)]
pub struct GameCore {
    config: GameConfig,
    grid: HexGrid,
    player: CombatUnit,
    /// Enemies in registration order; this is the order they act in.
    enemies: Vec<CombatUnit>,
    cards: HashMap<CardId, CardData>,
    items: HashMap<ItemId, ItemDefinition>,
    deck: Deck,
    cache: EffectCache,
    equipment: EquipmentSet,
    action_points: ActionPoints,
    carried_action_points: u32,
    pending_attack: Option<ArmedAttack>,
    highlighted: HashSet<UnitId>,
    phase: TurnPhase,
    turn: u32,
    extra_health_slots: u32,
    exhaustion: u32,
}

impl GameCore {
    pub fn builder(config: GameConfig) -> GameCoreBuilder {
        GameCoreBuilder::new(config)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// 1-based number of the current (or last) player turn.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &CombatUnit {
        &self.player
    }

    pub fn enemies(&self) -> &[CombatUnit] {
        &self.enemies
    }

    pub fn enemy(&self, id: UnitId) -> Option<&CombatUnit> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&CombatUnit> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.enemy(id)
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> &[CardId] {
        self.deck.hand()
    }

    pub fn card(&self, id: CardId) -> Option<&CardData> {
        self.cards.get(&id)
    }

    pub fn effect_cache(&self) -> &EffectCache {
        &self.cache
    }

    pub fn equipment(&self) -> &EquipmentSet {
        &self.equipment
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    pub fn action_points(&self) -> &ActionPoints {
        &self.action_points
    }

    pub fn pending_attack(&self) -> Option<&ArmedAttack> {
        self.pending_attack.as_ref()
    }

    /// Enemies the armed attack may target, sorted by id.
    pub fn highlighted(&self) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self.highlighted.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_highlighted(&self, id: UnitId) -> bool {
        self.highlighted.contains(&id)
    }

    pub fn extra_health_slots(&self) -> u32 {
        self.extra_health_slots
    }

    pub fn exhaustion(&self) -> u32 {
        self.exhaustion
    }

    /// Sum of equipment bonuses for `stat` for the player's class.
    pub fn equipment_bonus(&self, stat: StatKind) -> i32 {
        self.equipment.total_bonus(stat, self.player.class)
    }

    /// Base health plus unlocked slots plus equipment, never below 1.
    pub fn player_max_health(&self) -> u32 {
        let slots = self.extra_health_slots * self.config.health_per_slot;
        let total = (self.player.base_max_health + slots) as i64
            + self.equipment_bonus(StatKind::MaxHealth) as i64;
        total.clamp(1, u32::MAX as i64) as u32
    }

    /// Cells the player can reach with the movement points they hold.
    pub fn movement_range(&self) -> RangeResult {
        compute_range(&self.grid, self.player.position, self.player.movement)
    }

    /// Living, awake enemies in registration order.
    pub fn enemy_order(&self) -> Vec<UnitId> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_active())
            .map(|enemy| enemy.id)
            .collect()
    }

    /// Equips `item`, returning whatever occupied its slot.
    ///
    /// Health is clamped if the new max is lower.
    pub fn equip(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        let replaced = self.equipment.equip(item);
        self.clamp_player_health();
        replaced
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemDefinition> {
        let removed = self.equipment.unequip(slot);
        self.clamp_player_health();
        removed
    }

    /// Unlocks one extra health slot. The new slot arrives full.
    pub fn unlock_health_slot(&mut self) -> u32 {
        self.extra_health_slots += 1;
        self.player.health += self.config.health_per_slot;
        self.clamp_player_health();
        self.player_max_health()
    }

    pub fn add_exhaustion(&mut self, stacks: u32) {
        self.exhaustion = self.exhaustion.saturating_add(stacks);
    }

    /// Progress to persist between levels.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            current_health: self.player.health,
            extra_health_slots: self.extra_health_slots,
            exhaustion: self.exhaustion,
            equipped: self.equipment.loadout(),
        }
    }

    fn clamp_player_health(&mut self) {
        let max = self.player_max_health();
        self.player.health = self.player.health.min(max);
    }

    fn enemy_mut(&mut self, id: UnitId) -> Option<&mut CombatUnit> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    fn ensure_not_over(&self) -> Result<(), TurnError> {
        if self.phase.is_game_over() {
            return Err(TurnError::GameOver);
        }
        Ok(())
    }

    /// Wakes every sleeping enemy of `room`. Returns the ids woken.
    fn activate_room(&mut self, room: RoomId) -> Vec<UnitId> {
        self.enemies
            .iter_mut()
            .filter(|enemy| enemy.room == room && enemy.is_alive() && !enemy.is_active())
            .map(|enemy| {
                enemy.flags.insert(UnitFlags::ACTIVE);
                enemy.id
            })
            .collect()
    }

    fn clear_highlights(&mut self) {
        for id in self.highlighted.drain() {
            if let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id == id) {
                enemy.flags.remove(UnitFlags::HIGHLIGHTED);
            }
        }
    }

    /// Drops the armed attack without resolving it.
    fn disarm(&mut self) -> Option<ArmedAttack> {
        self.clear_highlights();
        self.cache.consume_damage();
        self.pending_attack.take()
    }

    fn kill_enemy(&mut self, id: UnitId) {
        let Some(enemy) = self.enemy_mut(id) else {
            return;
        };
        enemy.flags.remove(UnitFlags::ALIVE | UnitFlags::ACTIVE | UnitFlags::HIGHLIGHTED);
        enemy.status.clear();
        let position = enemy.position;
        self.grid.vacate(position, id);
        self.highlighted.remove(&id);
    }

    /// Opens a player turn: fresh budget, empty cache, opening hand on turn 1.
    fn begin_player_turn(&mut self) -> TurnStart {
        self.turn += 1;

        let bonus = self.equipment_bonus(StatKind::MaxActionPoints).max(0) as u32;
        let budget = self.config.base_action_points + bonus + self.carried_action_points;
        self.action_points.reset(budget);
        self.carried_action_points = 0;

        self.cache.clear_for_new_turn();
        self.player.movement = 0;

        let drawn = if self.turn == 1 {
            self.deck.draw(self.config.initial_hand_size)
        } else {
            Vec::new()
        };

        self.phase = TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction);

        TurnStart {
            turn: self.turn,
            shields_decayed: Vec::new(),
            action_points: self.action_points.current(),
            drawn,
        }
    }

    /// Removes up to `shield_decay` shield from every living unit.
    fn decay_all_shields(&mut self) -> Vec<(UnitId, u32)> {
        let amount = self.config.shield_decay;
        std::iter::once(&mut self.player)
            .chain(self.enemies.iter_mut())
            .filter(|unit| unit.is_alive())
            .filter_map(|unit| {
                let removed = decay_shield(unit, amount);
                (removed > 0).then_some((unit.id, removed))
            })
            .collect()
    }
}
