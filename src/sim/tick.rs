//! Fixed-step simulation tick and shooting
//!
//! One call to [`tick`] per frame. Pause and fire are edge events carried in
//! the same [`TickInput`] snapshot as the held movement keys.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::state::{GameEvent, GameState, Outcome, SessionPhase};
use crate::consts::*;
use crate::{angle_to_vector, normalize_angle};

/// Input snapshot for a single frame, produced by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    /// Fire trigger (edge)
    pub fire: bool,
    /// Horizontal pointer movement since last frame (pixels)
    pub look_delta: f32,
    /// Pause toggle (edge)
    pub pause: bool,
}

impl TickInput {
    /// Clear edge events and the pointer delta once a frame has used them.
    /// Held movement flags persist.
    pub fn consume_one_shots(&mut self) {
        self.fire = false;
        self.pause = false;
        self.look_delta = 0.0;
    }
}

/// What a call to [`fire`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    /// Session not playing; nothing consumed
    Inactive,
    /// Out of ammo; nothing consumed
    NoAmmo,
    /// Ammo spent, nothing in the crosshair
    Miss,
    Hit { enemy_id: u32, health: i32 },
    Kill { enemy_id: u32 },
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            SessionPhase::Playing => {
                state.phase = SessionPhase::Paused;
                log::info!("Paused");
                return;
            }
            SessionPhase::Paused => {
                state.phase = SessionPhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if !state.phase.is_playing() {
        return;
    }

    if input.fire {
        fire(state);
        if !state.phase.is_playing() {
            return;
        }
    }

    state.time_ticks += 1;

    // Look
    if input.look_delta != 0.0 {
        let player = &mut state.player;
        player.angle = normalize_angle(player.angle + input.look_delta * player.look_sensitivity);
    }

    // Move (diagonals are intentionally not normalized)
    let velocity = movement_vector(state.player.angle, state.player.move_speed, input);
    if velocity != Vec2::ZERO {
        let candidate = state.player.pos + velocity;
        if !state.map.is_blocked_at(candidate) {
            state.player.pos = candidate;
        }
    }

    update_enemies(state);
}

/// Velocity implied by the held movement flags
pub fn movement_vector(angle: f32, speed: f32, input: &TickInput) -> Vec2 {
    let mut v = Vec2::ZERO;
    if input.forward {
        v += angle_to_vector(angle) * speed;
    }
    if input.back {
        v -= angle_to_vector(angle) * speed;
    }
    if input.strafe_left {
        v += angle_to_vector(angle - FRAC_PI_2) * speed;
    }
    if input.strafe_right {
        v += angle_to_vector(angle + FRAC_PI_2) * speed;
    }
    v
}

/// Chase the player and roll for melee damage
fn update_enemies(state: &mut GameState) {
    let player_pos = state.player.pos;

    for i in 0..state.enemies.len() {
        let enemy = &mut state.enemies[i];
        if !enemy.active {
            continue;
        }

        let to_player = player_pos - enemy.pos;
        let distance = to_player.length();

        if distance > ENEMY_STOP_DISTANCE {
            let candidate = enemy.pos + to_player / distance * ENEMY_SPEED;
            if !state.map.is_blocked_at(candidate) {
                enemy.pos = candidate;
            }
        }

        if distance < ENEMY_MELEE_RANGE && state.rng.random::<f32>() < ENEMY_MELEE_CHANCE {
            let died = state.damage_player(ENEMY_MELEE_DAMAGE);
            log::debug!("Player hit, health {}", state.health);
            if died {
                state.end(Outcome::Lost);
                return;
            }
        }
    }
}

/// Fire one shot along the player's facing.
///
/// At most one enemy is hit: the first active one, in collection order, that
/// sits within [`SHOT_TOLERANCE`] of the crosshair and closer than
/// [`SHOT_RANGE`].
pub fn fire(state: &mut GameState) -> ShotResult {
    if !state.phase.is_playing() {
        return ShotResult::Inactive;
    }
    if state.ammo == 0 {
        return ShotResult::NoAmmo;
    }
    state.ammo -= 1;

    let player = &state.player;
    let target = state.enemies.iter_mut().find(|enemy| {
        if !enemy.active {
            return false;
        }
        let to_enemy = enemy.pos - player.pos;
        let angle_diff = normalize_angle(to_enemy.y.atan2(to_enemy.x) - player.angle);
        angle_diff.abs() < SHOT_TOLERANCE && to_enemy.length() < SHOT_RANGE
    });

    let Some(enemy) = target else {
        return ShotResult::Miss;
    };

    let enemy_id = enemy.id;
    if !enemy.take_damage(SHOT_DAMAGE) {
        let health = enemy.health;
        log::debug!("Enemy {} hit, health {}", enemy_id, health);
        state.events.push(GameEvent::EnemyHit { enemy_id, health });
        return ShotResult::Hit { enemy_id, health };
    }

    state.score += KILL_SCORE;
    state.events.push(GameEvent::EnemyKilled { enemy_id });
    log::debug!("Enemy {} killed, score {}", enemy_id, state.score);

    if state.active_enemy_count() == 0 {
        state.end(Outcome::Won);
    }
    ShotResult::Kill { enemy_id }
}
