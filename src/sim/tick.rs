//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically: the same seed
//! and the same input sequence always produce the same run.

use glam::Vec2;

use super::boomerang::Targets;
use super::entity::{Updatable, World};
use super::player::PlayerIntent;
use super::state::{GameEvent, GamePhase, Session};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Throw the boomerang at this arena point (click/tap)
    pub throw_at: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn intent(&self) -> PlayerIntent {
        PlayerIntent {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the session by one fixed tick
///
/// Order: throw request, player, enemies, boomerang, non-finite recovery,
/// then player/enemy contact.
pub fn tick(state: &mut Session, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
        log::debug!("Phase -> {:?}", state.phase);
    }

    if state.phase == GamePhase::Paused || state.player.dead {
        return;
    }

    state.time_ticks += 1;

    if let Some(target) = input.throw_at {
        let hand = state.player.hand();
        if state.boomerang.throw(hand, target, state.tuning.boomerang_speed) {
            log::debug!("Boomerang thrown toward ({:.0}, {:.0})", target.x, target.y);
            state.events.push(GameEvent::BoomerangThrown);
        }
    }

    let world = World {
        arena: state.arena,
        platforms: &state.platforms,
        tuning: &state.tuning,
    };

    state.player.update(&world, input.intent());
    for enemy in &mut state.enemies {
        enemy.update(&world, &mut state.rng);
    }
    let report = state.boomerang.update(
        &world,
        Targets {
            player: &state.player,
            enemies: &mut state.enemies,
        },
    );

    if report.bounced {
        state.events.push(GameEvent::BoomerangBounced);
    }
    if report.caught {
        state.events.push(GameEvent::BoomerangCaught);
    }
    if let Some(index) = report.killed {
        log::debug!("Enemy {} killed, {} left", index, state.alive_enemies());
        state.events.push(GameEvent::EnemyKilled { index });
    }

    recover_non_finite(state);
    resolve_player_hits(state);
}

/// Put back any entity whose position or velocity stopped being a number
fn recover_non_finite(state: &mut Session) {
    if !state.player.body.is_finite() {
        log::warn!("Player state went non-finite; respawning");
        state.player.respawn(state.spawn);
    }
    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        if enemy.alive && !enemy.body.is_finite() {
            log::warn!("Enemy {} state went non-finite; retiring it", i);
            enemy.kill();
        }
    }
    if !state.boomerang.body.is_finite() {
        log::warn!("Boomerang state went non-finite; recalling");
        state.boomerang.recall();
        state.boomerang.follow(state.player.hand());
    }
}

/// Touching a live enemy costs a life
///
/// There is no invulnerability window: an enemy still overlapping the spawn
/// point on the next tick takes another life.
fn resolve_player_hits(state: &mut Session) {
    for i in 0..state.enemies.len() {
        let enemy = &state.enemies[i];
        if !enemy.alive || !enemy.body.rect().overlaps(&state.player.body.rect()) {
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        log::debug!("Player hit by enemy {}, {} lives left", i, state.lives);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });

        if state.lives == 0 {
            state.player.dead = true;
            log::info!("Game over after {} ticks", state.time_ticks);
            state.events.push(GameEvent::GameOver);
            state.reset();
            return;
        }
        state.player.respawn(state.spawn);
    }
}
