//! Grid Raider - a grid-map raycasting shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid map, raycaster, entities, tick, session)
//! - `renderer`: Column/billboard projection into host-agnostic draw commands
//! - `settings`: Data-driven configuration
//!
//! Window creation, raw input plumbing and presentation belong to the host.
//! The host produces a [`sim::TickInput`] per frame, calls
//! [`sim::GameSession::run_frame`] and draws what it receives.

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::GameSession;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Player spawn position (cell units)
    pub const PLAYER_START: (f32, f32) = (5.0, 5.0);
    /// Player spawn facing (radians, +x)
    pub const PLAYER_START_ANGLE: f32 = 0.0;
    /// Horizontal field of view
    pub const PLAYER_FOV: f32 = PI / 3.0;
    /// Accepted field-of-view range; outside it projection degenerates
    pub const MIN_FOV: f32 = 0.1;
    pub const MAX_FOV: f32 = PI - 0.1;
    /// Distance travelled per tick per held movement key
    pub const PLAYER_MOVE_SPEED: f32 = 0.05;
    /// Keyboard turn rate (radians per tick), for hosts that bind turning
    pub const PLAYER_ROTATE_SPEED: f32 = 0.03;
    /// Radians of rotation per pixel of pointer delta
    pub const MOUSE_SENSITIVITY: f32 = 0.002;

    pub const MAX_HEALTH: i32 = 100;
    pub const MAX_AMMO: u32 = 30;

    /// Enemies spawned on every start/restart
    pub const ENEMY_COUNT: usize = 10;
    pub const ENEMY_HEALTH: i32 = 100;
    /// Billboard size relative to a wall (1.0 = full cell height)
    pub const ENEMY_SIZE: f32 = 0.3;
    /// Distance an enemy covers per tick while chasing
    pub const ENEMY_SPEED: f32 = 0.01;
    /// Enemies stop advancing inside this distance
    pub const ENEMY_STOP_DISTANCE: f32 = 0.5;
    /// Enemies can hurt the player inside this distance
    pub const ENEMY_MELEE_RANGE: f32 = 0.6;
    /// Per-tick chance of a melee hit while in range
    pub const ENEMY_MELEE_CHANCE: f32 = 0.02;
    pub const ENEMY_MELEE_DAMAGE: i32 = 1;

    /// Damage dealt per shot (three shots kill a fresh enemy)
    pub const SHOT_DAMAGE: i32 = 34;
    /// Crosshair half-width (radians)
    pub const SHOT_TOLERANCE: f32 = 0.1;
    pub const SHOT_RANGE: f32 = 10.0;
    pub const KILL_SCORE: u32 = 100;

    /// Ray march increment (cell units)
    pub const RAY_STEP: f32 = 0.05;
    /// Smallest increment a raycaster will march with
    pub const MIN_RAY_STEP: f32 = 0.001;
    pub const RAY_MAX_DISTANCE: f32 = 20.0;

    /// Extra angle past the FOV edge at which sprites are still projected
    pub const SPRITE_VIEW_MARGIN: f32 = 0.5;

    /// Rejection-sampling cap for spawn placement
    pub const SPAWN_MAX_ATTEMPTS: u32 = 1000;

    pub const DEFAULT_VIEWPORT: (u32, u32) = (800, 600);
}

/// Normalized angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Unit vector for a heading
#[inline]
pub fn angle_to_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
