//! Session state and core simulation types
//!
//! A [`Session`] owns every mutable piece of a run. Reseeding on reset keeps
//! restarts reproducible: two resets in a row produce identical snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boomerang::Boomerang;
use super::enemy::Enemy;
use super::entity::{Drawable, Sprite};
use super::layout::{EnemyPlacement, LayoutPreset, Platform};
use super::player::Player;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Game is paused
    Paused,
}

/// Something the host may want to react to (sound, HUD, prompts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BoomerangThrown,
    BoomerangBounced,
    BoomerangCaught,
    EnemyKilled { index: usize },
    LifeLost { remaining: u8 },
    /// Last life lost; the session has already been reset when this is read
    GameOver,
    SessionReset,
}

/// Comparable copy of all entity state at one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boomerang: Boomerang,
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG restarts from on every reset
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub layout: LayoutPreset,
    /// Arena width and height
    pub arena: Vec2,
    pub platforms: Vec<Platform>,
    pub spawn: Vec2,
    placement: EnemyPlacement,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boomerang: Boomerang,
    pub lives: u8,
    pub phase: GamePhase,
    /// Ticks since the last reset
    pub time_ticks: u64,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Create a session on the given layout
    ///
    /// Rejects tuning the simulation cannot run with (empty random ranges,
    /// probabilities outside `[0, 1]`, bodies as large as the arena).
    pub fn new(seed: u64, layout: LayoutPreset, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, layout, tuning))
    }

    /// Default layout and tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, LayoutPreset::default(), Tuning::default())
    }

    /// Assemble a session from already validated tuning
    fn build(seed: u64, layout: LayoutPreset, tuning: Tuning) -> Self {
        let built = layout.build();
        let player = Player::new(built.spawn, &tuning);
        let boomerang = Boomerang::new(player.hand(), &tuning);
        let enemies = (0..built.enemies.count()).map(|_| Enemy::new(&tuning)).collect();

        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.starting_lives,
            tuning,
            layout,
            arena: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            platforms: built.platforms,
            spawn: built.spawn,
            placement: built.enemies,
            player,
            enemies,
            boomerang,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        };
        session.restore();
        session
    }

    /// Start the run over: entities, lives and RNG back to their initial state
    pub fn reset(&mut self) {
        self.restore();
        self.events.push(GameEvent::SessionReset);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Switch to a new seed and reset
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Reinitialize every entity in place
    fn restore(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;

        self.player.respawn(self.spawn);
        self.player.dead = false;
        self.boomerang.recall();
        self.boomerang.follow(self.player.hand());

        let max_x = self.arena.x - self.tuning.enemy_width;
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            let pos = match &self.placement {
                EnemyPlacement::Fixed(points) => points[i],
                EnemyPlacement::Scattered { y, .. } => Vec2::new(self.rng.random_range(0.0..max_x), *y),
            };
            enemy.respawn(pos, &mut self.rng, &self.tuning);
        }
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything to draw this frame, back to front
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(self.platforms.len() + self.enemies.len() + 2);
        sprites.extend(self.platforms.iter().filter_map(Drawable::sprite));
        sprites.extend(self.player.sprite());
        sprites.extend(self.boomerang.sprite());
        sprites.extend(self.enemies.iter().filter_map(Drawable::sprite));
        sprites
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            lives: self.lives,
            phase: self.phase,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            boomerang: self.boomerang.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::SpriteKind;

    #[test]
    fn test_new_session() {
        let session = Session::with_seed(12345);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.body.pos, Vec2::new(50.0, 400.0));
        assert_eq!(session.enemies.len(), 5);
        assert_eq!(session.alive_enemies(), 5);
        assert!(!session.boomerang.is_active());
        assert_eq!(session.boomerang.body.center(), session.player.hand());
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = Session::new(77, LayoutPreset::Ledges, Tuning::default()).unwrap();
        session.reset();
        let first = session.snapshot();
        session.reset();
        assert_eq!(session.snapshot(), first);
    }

    #[test]
    fn test_reset_matches_fresh_session() {
        let fresh = Session::new(5, LayoutPreset::Ledges, Tuning::default()).unwrap();
        let mut session = fresh.clone();
        session.lives = 1;
        session.enemies[2].kill();
        session.player.body.pos = Vec2::new(600.0, 10.0);
        session.player.dead = true;
        session.boomerang.throw(session.player.hand(), Vec2::new(0.0, 0.0), 10.0);
        session.reset();
        assert_eq!(session.snapshot(), fresh.snapshot());
        assert_eq!(session.events, vec![GameEvent::SessionReset]);
    }

    #[test]
    fn test_reset_keeps_collections() {
        let mut session = Session::with_seed(3);
        let ptr = session.enemies.as_ptr();
        session.reset();
        assert_eq!(session.enemies.as_ptr(), ptr);
        assert_eq!(session.enemies.len(), 5);
    }

    #[test]
    fn test_scattered_enemies_inside_arena() {
        let session = Session::new(99, LayoutPreset::Ledges, Tuning::default()).unwrap();
        for enemy in &session.enemies {
            assert!(enemy.alive);
            assert!(enemy.body.pos.x >= 0.0);
            assert!(enemy.body.rect().right() <= ARENA_WIDTH);
            assert_eq!(enemy.body.pos.y, 0.0);
        }
    }

    #[test]
    fn test_different_seeds_scatter_differently() {
        let a = Session::new(1, LayoutPreset::Ledges, Tuning::default()).unwrap();
        let b = Session::new(2, LayoutPreset::Ledges, Tuning::default()).unwrap();
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_sprites_skip_dead_enemies() {
        let mut session = Session::with_seed(1);
        let all = session.sprites();
        assert_eq!(all.len(), 4 + 1 + 1 + 5);
        assert_eq!(all[0].kind, SpriteKind::Platform);

        session.enemies[0].kill();
        let sprites = session.sprites();
        assert_eq!(sprites.len(), all.len() - 1);
        assert_eq!(
            sprites.iter().filter(|s| s.kind == SpriteKind::Enemy).count(),
            4
        );
    }

    #[test]
    fn test_rejects_enemy_as_wide_as_arena() {
        let tuning = Tuning {
            enemy_width: ARENA_WIDTH,
            ..Tuning::default()
        };
        let err = Session::new(1, LayoutPreset::Ledges, tuning).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy_width",
                ..
            }
        ));

        // Just inside the arena still leaves a scatter range
        let tuning = Tuning {
            enemy_width: ARENA_WIDTH - 1.0,
            ..Tuning::default()
        };
        let session = Session::new(1, LayoutPreset::Ledges, tuning).unwrap();
        for enemy in &session.enemies {
            assert!(enemy.body.pos.x >= 0.0 && enemy.body.pos.x < 1.0);
        }
    }

    #[test]
    fn test_rejects_impossible_probability() {
        let tuning = Tuning {
            enemy_jump_chance: 2.0,
            ..Tuning::default()
        };
        let err = Session::new(1, LayoutPreset::Rooftops, tuning).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "enemy_jump_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_reseed_changes_scatter_deterministically() {
        let original = Session::new(1, LayoutPreset::Ledges, Tuning::default()).unwrap();
        let mut session = original.clone();
        session.reseed(2);

        assert_eq!(session.seed, 2);
        assert_ne!(session.snapshot(), original.snapshot());
        let fresh = Session::new(2, LayoutPreset::Ledges, Tuning::default()).unwrap();
        assert_eq!(session.snapshot(), fresh.snapshot());
        assert_eq!(session.drain_events(), vec![GameEvent::SessionReset]);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut session = Session::with_seed(1);
        session.reset();
        assert_eq!(session.drain_events(), vec![GameEvent::SessionReset]);
        assert!(session.drain_events().is_empty());
    }
}
