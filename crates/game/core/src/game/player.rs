//! Player-driven transitions.

use crate::card::{CardId, CardSide, CardZone, EffectKind};
use crate::combat::{StatusRider, apply_damage, apply_heal};
use crate::equipment::StatKind;
use crate::hex::HexCoord;
use crate::search::enemies_in_range;
use crate::turn::{
    ArmedAttack, AttackOutcome, EndTurnOutcome, MoveOutcome, PlayOutcome, PlayerPhase, TurnError,
    TurnPhase,
};
use crate::unit::{UnitFlags, UnitId};

use super::GameCore;

/// Adds a signed equipment bonus to a cached amount, flooring at zero.
fn with_bonus(amount: u32, bonus: i32) -> u32 {
    (amount as i64 + bonus as i64).max(0) as u32
}

impl GameCore {
    /// Plays one side of a card from the hand.
    ///
    /// Order of resolution:
    /// 1. the side's effects are staged in the effect cache
    /// 2. "always" effects resolve at once (draw, gain action, gain block) and
    ///    status riders are collected
    /// 3. staged block, heal and movement are applied with their equipment
    ///    bonuses and cleared from the cache
    /// 4. staged damage arms an attack and highlights the reachable enemies
    /// 5. the card goes to the discard pile and one action point is spent
    ///
    /// Riders only stick when the same card armed an attack.
    pub fn process_played_card(
        &mut self,
        card: CardId,
        side: CardSide,
    ) -> Result<PlayOutcome, TurnError> {
        self.ensure_not_over()?;
        if self.phase != TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction) {
            return Err(TurnError::NotAwaitingAction(self.phase));
        }
        if self.action_points.is_empty() {
            return Err(TurnError::NoActionPoints);
        }
        let data = self
            .cards
            .get(&card)
            .cloned()
            .ok_or(TurnError::UnknownCard(card))?;
        if !self.deck.in_hand(card) {
            return Err(TurnError::CardNotInHand(card));
        }

        self.cache.cache_card_effect(&data, side);

        let mut drawn = Vec::new();
        let mut action_points_gained = 0;
        let mut shield_gained = 0;
        let mut riders = Vec::new();
        for effect in &data.always {
            match effect.kind {
                EffectKind::Draw => drawn.extend(self.deck.draw(effect.value)),
                EffectKind::GainAction => {
                    action_points_gained += self.action_points.gain(effect.value)
                }
                EffectKind::GainBlock => {
                    self.player.shield += effect.value;
                    shield_gained += effect.value;
                }
                EffectKind::Poison => riders.push(StatusRider::Poison {
                    turns: effect.value,
                }),
                EffectKind::Stun => riders.push(StatusRider::Stun {
                    turns: effect.value,
                }),
                // Side-only kinds have no meaning in the always list.
                EffectKind::Attack | EffectKind::Move | EffectKind::Heal | EffectKind::Block => {}
            }
        }

        if self.cache.block() > 0 {
            let block = with_bonus(self.cache.block(), self.equipment_bonus(StatKind::Defense));
            self.player.shield += block;
            shield_gained += block;
            self.cache.consume_block();
        }

        let mut healed = 0;
        if self.cache.heal() > 0 {
            let heal = with_bonus(self.cache.heal(), self.equipment_bonus(StatKind::Heal));
            let max_health = self.player_max_health();
            healed = apply_heal(&mut self.player, heal, max_health);
            self.cache.consume_heal();
        }

        let mut movement_gained = 0;
        if self.cache.movement() > 0 {
            movement_gained = with_bonus(
                self.cache.movement(),
                self.equipment_bonus(StatKind::MovementSpeed),
            );
            self.player.movement += movement_gained;
            self.cache.consume_movement();
        }

        let armed = (self.cache.damage() > 0).then(|| self.arm_attack(riders));

        self.deck.move_to_zone(card, CardZone::Discard)?;
        self.action_points.spend();

        Ok(PlayOutcome {
            card,
            side,
            drawn,
            action_points_gained,
            shield_gained,
            healed,
            movement_gained,
            armed,
            highlighted: self.highlighted(),
            action_points: self.action_points.current(),
        })
    }

    /// Resolves the armed attack against a highlighted enemy.
    pub fn handle_enemy_click(&mut self, target: UnitId) -> Result<AttackOutcome, TurnError> {
        self.ensure_not_over()?;
        if self.phase != TurnPhase::PlayerTurn(PlayerPhase::AwaitingAttackResolution) {
            return Err(TurnError::NoAttackArmed);
        }
        let Some(attack) = self.pending_attack.clone() else {
            return Err(TurnError::NoAttackArmed);
        };
        if !self.highlighted.contains(&target) {
            return Err(TurnError::TargetNotHighlighted(target));
        }
        let enemy = self
            .enemy_mut(target)
            .ok_or(TurnError::UnknownUnit(target))?;

        let damage = apply_damage(enemy, attack.damage);
        let riders = if damage.killed {
            Vec::new()
        } else {
            for rider in &attack.riders {
                enemy.status.apply(*rider);
            }
            attack.riders
        };
        if damage.killed {
            self.kill_enemy(target);
        }

        self.disarm();
        self.phase = TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction);

        Ok(AttackOutcome {
            target,
            damage,
            riders,
        })
    }

    /// Drops the armed attack without spending it.
    pub fn cancel_attack(&mut self) -> Result<ArmedAttack, TurnError> {
        self.ensure_not_over()?;
        if self.phase != TurnPhase::PlayerTurn(PlayerPhase::AwaitingAttackResolution) {
            return Err(TurnError::NoAttackArmed);
        }
        let attack = self.disarm().ok_or(TurnError::NoAttackArmed)?;
        self.phase = TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction);
        Ok(attack)
    }

    /// Walks the player to `destination` along the cheapest route found by
    /// [`GameCore::movement_range`], paying its cost in movement points.
    ///
    /// Stepping into a new room wakes that room's enemies.
    pub fn move_player(&mut self, destination: HexCoord) -> Result<MoveOutcome, TurnError> {
        self.ensure_not_over()?;
        if self.phase != TurnPhase::PlayerTurn(PlayerPhase::AwaitingAction) {
            return Err(TurnError::NotAwaitingAction(self.phase));
        }
        let range = self.movement_range();
        let cost = range
            .cost_to(destination)
            .filter(|_| range.contains(destination))
            .ok_or(TurnError::DestinationUnreachable(destination))?;
        let path = range.path_to(destination);

        self.grid.place_unit(destination, UnitId::PLAYER)?;
        self.grid.vacate(self.player.position, UnitId::PLAYER);
        self.player.position = destination;
        self.player.spend_movement(cost);

        let mut activated = Vec::new();
        if let Some(room) = self.grid.tile(destination).map(|tile| tile.room)
            && room != self.player.room
        {
            self.player.room = room;
            activated = self.activate_room(room);
        }

        let world_path = path.iter().map(|step| self.grid.world_of(*step)).collect();
        Ok(MoveOutcome {
            path,
            world_path,
            cost,
            remaining_movement: self.player.movement,
            activated,
        })
    }

    /// Ends the player's turn and hands control to the enemies.
    ///
    /// A still-armed attack is forfeited, not resolved. At most
    /// `carry_over_cap` unspent points survive into the next turn.
    pub fn end_player_turn(&mut self) -> Result<EndTurnOutcome, TurnError> {
        self.ensure_not_over()?;
        if !self.phase.is_player_turn() {
            return Err(TurnError::NotPlayerTurn(self.phase));
        }

        let forfeited = self.disarm();
        self.carried_action_points = self.action_points.carry_over(self.config.carry_over_cap);
        self.cache.clear_for_new_turn();
        self.phase = TurnPhase::EnemyTurn;

        Ok(EndTurnOutcome {
            forfeited,
            carried_action_points: self.carried_action_points,
            save: self.snapshot(),
        })
    }

    fn arm_attack(&mut self, riders: Vec<StatusRider>) -> ArmedAttack {
        let damage = with_bonus(self.cache.damage(), self.equipment_bonus(StatKind::Damage));
        let range = (self.cache.range() + self.equipment.weapon_range()).saturating_sub(1);

        let enemies = &self.enemies;
        let targets = enemies_in_range(&self.grid, self.player.position, range, |id| {
            enemies
                .iter()
                .any(|enemy| enemy.id == id && enemy.is_active())
        });
        for enemy in self.enemies.iter_mut() {
            if targets.contains(&enemy.id) {
                enemy.flags.insert(UnitFlags::HIGHLIGHTED);
            }
        }
        self.highlighted = targets;

        let attack = ArmedAttack {
            damage,
            range,
            riders,
        };
        self.pending_attack = Some(attack.clone());
        self.phase = TurnPhase::PlayerTurn(PlayerPhase::AwaitingAttackResolution);
        attack
    }
}
