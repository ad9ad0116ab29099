//! Enemy-turn transitions and the end of the run.
//!
//! The caller drives the enemy turn one enemy at a time:
//!
//! ```text
//! end_player_turn()
//! for id in enemy_order() { run_enemy_action(id) }   // pacing is up to the caller
//! finish_enemy_turn()
//! ```

use crate::combat::apply_damage;
use crate::search::compute_path;
use crate::turn::{EnemyActionReport, TurnError, TurnPhase, TurnStart};
use crate::unit::UnitId;

use super::GameCore;

impl GameCore {
    /// Runs one enemy's routine to completion.
    ///
    /// 1. poison ticks (and may kill the enemy)
    /// 2. a stunned enemy loses the rest of its turn
    /// 3. an enemy within attack range strikes the player
    /// 4. otherwise it walks toward the player, stopping once in range or out
    ///    of movement, and strikes if it got close enough
    ///
    /// A killing blow on the player ends the run.
    pub fn run_enemy_action(&mut self, id: UnitId) -> Result<EnemyActionReport, TurnError> {
        self.ensure_not_over()?;
        if !self.phase.is_enemy_turn() {
            return Err(TurnError::NotEnemyTurn(self.phase));
        }
        let poison_damage = self.config.poison_damage;
        let enemy = self.enemy_mut(id).ok_or(TurnError::UnknownUnit(id))?;
        if !enemy.is_active() {
            return Err(TurnError::EnemyNotActive(id));
        }

        let mut report = EnemyActionReport::new(id);
        let tick = enemy.status.tick(poison_damage);
        if tick.poison_damage > 0 {
            let poison = apply_damage(enemy, tick.poison_damage);
            report.poison = Some(poison);
            if poison.killed {
                self.kill_enemy(id);
                report.died = true;
                return Ok(report);
            }
        }
        if tick.stunned {
            report.stunned = true;
            return Ok(report);
        }

        let profile = enemy.profile.unwrap_or_default();
        let start = enemy.position;
        let target = self.player.position;

        let mut position = start;
        if position.distance(target) > profile.attack_range {
            let route = compute_path(&self.grid, start, target).unwrap_or_default();
            for step in route.into_iter().take(profile.movement as usize) {
                report.path.push(step);
                if step.distance(target) <= profile.attack_range {
                    break;
                }
            }
            if let Some(&end) = report.path.last() {
                self.grid.place_enemy(end, id)?;
                self.grid.vacate(start, id);
                if let Some(enemy) = self.enemy_mut(id) {
                    enemy.position = end;
                }
                position = end;
            }
            report.world_path = report
                .path
                .iter()
                .map(|step| self.grid.world_of(*step))
                .collect();
        }

        if position.distance(target) <= profile.attack_range {
            let hit = apply_damage(&mut self.player, profile.damage);
            report.attack = Some(hit);
            if hit.killed {
                self.enter_game_over();
                report.player_killed = true;
            }
        }

        Ok(report)
    }

    /// Closes the enemy turn: every shield decays, then the next player turn
    /// opens with a fresh action point budget.
    pub fn finish_enemy_turn(&mut self) -> Result<TurnStart, TurnError> {
        self.ensure_not_over()?;
        if !self.phase.is_enemy_turn() {
            return Err(TurnError::NotEnemyTurn(self.phase));
        }

        let shields_decayed = self.decay_all_shields();
        let mut start = self.begin_player_turn();
        start.shields_decayed = shields_decayed;
        Ok(start)
    }

    /// Ends the run from any phase. Once over, every transition is rejected.
    pub fn handle_player_death(&mut self) -> Result<(), TurnError> {
        self.ensure_not_over()?;
        self.enter_game_over();
        Ok(())
    }

    fn enter_game_over(&mut self) {
        self.disarm();
        self.phase = TurnPhase::GameOver;
    }
}
