//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::map::GridMap;
use crate::consts::*;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, not started yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Simulation halted, rendering continues
    Paused,
    /// Run over
    Ended(Outcome),
}

impl SessionPhase {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionPhase::Playing)
    }
}

/// Notable things that happened during a tick, drained by the session each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyHit { enemy_id: u32, health: i32 },
    EnemyKilled { enemy_id: u32 },
    PlayerDamaged { health: i32 },
    Won { score: u32 },
    Lost { score: u32 },
}

/// The player camera/body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing (radians, kept in (-π, π])
    pub angle: f32,
    /// Horizontal field of view (radians)
    pub fov: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    /// Radians per pixel of pointer delta
    pub look_sensitivity: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            angle: PLAYER_START_ANGLE,
            fov: PLAYER_FOV,
            move_speed: PLAYER_MOVE_SPEED,
            rotate_speed: PLAYER_ROTATE_SPEED,
            look_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

/// A wandering enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: i32,
    /// Billboard size relative to a wall
    pub size: f32,
    pub active: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            health: ENEMY_HEALTH,
            size: ENEMY_SIZE,
            active: true,
        }
    }

    /// Apply damage, flooring health at zero. Returns true if this hit killed it.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.active {
            return false;
        }
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Remaining health as 0..=1, for the health bar overlay
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / ENEMY_HEALTH as f32).clamp(0.0, 1.0)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Static map, shared read-only by movement and rendering
    pub map: GridMap,
    pub phase: SessionPhase,
    pub player: Player,
    /// Enemies in spawn order (iteration order is the shot tie-break)
    pub enemies: Vec<Enemy>,
    pub health: i32,
    pub ammo: u32,
    pub score: u32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Enemies spawned on each reset
    pub enemy_count: usize,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Idle state on `map`. Nothing is spawned until [`GameState::reset`].
    pub fn new(map: GridMap, seed: u64, enemy_count: usize) -> Self {
        Self {
            map,
            phase: SessionPhase::Idle,
            player: Player::default(),
            enemies: Vec::new(),
            health: MAX_HEALTH,
            ammo: MAX_AMMO,
            score: 0,
            time_ticks: 0,
            enemy_count,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh run: player back at spawn, full health/ammo, score cleared and
    /// enemies respawned. Player tuning (fov, sensitivity) carries over.
    pub fn reset(&mut self) {
        self.player = Player {
            pos: self.player_spawn(),
            angle: PLAYER_START_ANGLE,
            ..self.player.clone()
        };
        self.health = MAX_HEALTH;
        self.ammo = MAX_AMMO;
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.spawn_enemies(self.enemy_count);
    }

    /// Fixed start position, or the first open cell on maps where it is solid
    fn player_spawn(&self) -> Vec2 {
        let start = Vec2::new(PLAYER_START.0, PLAYER_START.1);
        if !self.map.is_blocked_at(start) {
            return start;
        }
        match self.map.first_empty_cell() {
            Some((cx, cy)) => Vec2::new(cx as f32 + 0.5, cy as f32 + 0.5),
            None => start,
        }
    }

    /// Replace the enemy collection with `count` enemies at random interior cells
    pub fn spawn_enemies(&mut self, count: usize) {
        self.enemies.clear();
        for _ in 0..count {
            let Some((cx, cy)) = self.map.random_empty_cell(&mut self.rng, true) else {
                log::warn!("No empty cell to spawn enemy into");
                break;
            };
            let id = self.next_entity_id();
            let pos = Vec2::new(cx as f32 + 0.5, cy as f32 + 0.5);
            self.enemies.push(Enemy::new(id, pos));
        }
        log::debug!("Spawned {} enemies", self.enemies.len());
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }

    /// Lose health, flooring at zero. Returns true if this crossed into death.
    pub fn damage_player(&mut self, amount: i32) -> bool {
        if self.health <= 0 {
            return false;
        }
        self.health = (self.health - amount).max(0);
        self.events.push(GameEvent::PlayerDamaged {
            health: self.health,
        });
        self.health == 0
    }

    /// Move into `Ended` and record the outcome event
    pub fn end(&mut self, outcome: Outcome) {
        if matches!(self.phase, SessionPhase::Ended(_)) {
            return;
        }
        self.phase = SessionPhase::Ended(outcome);
        let score = self.score;
        self.events.push(match outcome {
            Outcome::Won => GameEvent::Won { score },
            Outcome::Lost => GameEvent::Lost { score },
        });
        log::info!("Run ended: {:?}, score {}", outcome, score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
