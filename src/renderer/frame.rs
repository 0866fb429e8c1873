//! Per-frame projection of the grid and enemies
//!
//! Reads the simulation, never mutates it. Walls are one ray per screen
//! column; enemies are camera-facing billboards ordered back to front.

use serde::{Deserialize, Serialize};

use super::commands::{HudUpdate, Rect, SpriteCommand, WallStrip};
use crate::consts::{MAX_FOV, MIN_FOV, SPRITE_VIEW_MARGIN};
use crate::normalize_angle;
use crate::sim::{GameEvent, GameState, Raycaster};

/// Grey level of a wall at distance 0 (of 255)
const WALL_BRIGHTNESS_MAX: f32 = 255.0;
/// Darkest a wall gets (of 255)
const WALL_BRIGHTNESS_MIN: f32 = 50.0;
/// Brightness lost per unit of distance (of 255)
const WALL_FALLOFF: f32 = 20.0;
/// Sprites closer than this are sized as if at this distance
const MIN_SPRITE_DISTANCE: f32 = 0.1;

/// Output surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything the host needs to draw one frame.
///
/// Paint order: `sky` in [`colors::SKY`](super::colors::SKY), `floor` in
/// [`colors::FLOOR`](super::colors::FLOOR), then `walls`, then `sprites`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Top half of the viewport
    pub sky: Rect,
    /// Bottom half of the viewport
    pub floor: Rect,
    pub walls: Vec<WallStrip>,
    /// Farthest first
    pub sprites: Vec<SpriteCommand>,
}

/// Receives draw output from the session once per frame
pub trait PresentationSink {
    fn draw(&mut self, viewport: Viewport, frame: &Frame);

    /// Called only on frames where health, ammo or score changed
    fn hud(&mut self, hud: HudUpdate);

    fn event(&mut self, _event: &GameEvent) {}
}

/// Field of view used for projection; a zero or straight-angle FOV degenerates
fn projection_fov(fov: f32) -> f32 {
    fov.clamp(MIN_FOV, MAX_FOV)
}

/// Wall brightness (0..=1) for a corrected distance
pub fn wall_brightness(distance: f32) -> f32 {
    (WALL_BRIGHTNESS_MAX - distance * WALL_FALLOFF).max(WALL_BRIGHTNESS_MIN) / WALL_BRIGHTNESS_MAX
}

/// Project walls for every column of `viewport`
pub fn render_walls(state: &GameState, caster: &Raycaster, viewport: Viewport) -> Vec<WallStrip> {
    let player = &state.player;
    let width = viewport.width.max(1);
    let screen_h = viewport.height as f32;
    let fov = projection_fov(player.fov);
    let ray_step = fov / width as f32;

    let mut strips = Vec::with_capacity(width as usize);
    for column in 0..viewport.width {
        let ray_angle = player.angle - fov / 2.0 + ray_step * column as f32;
        let hit = caster.cast(&state.map, player.pos, ray_angle);
        if !hit.is_wall() {
            continue;
        }

        let corrected = hit.distance * (ray_angle - player.angle).cos();
        let height = screen_h / corrected;
        strips.push(WallStrip {
            column,
            top: screen_h / 2.0 - height / 2.0,
            height,
            brightness: wall_brightness(corrected),
            depth: corrected,
        });
    }
    strips
}

/// Project active enemies as billboards, farthest first
pub fn render_sprites(state: &GameState, viewport: Viewport) -> Vec<SpriteCommand> {
    let player = &state.player;
    let screen_w = viewport.width as f32;
    let screen_h = viewport.height as f32;
    let fov = projection_fov(player.fov);
    let half_fov = fov / 2.0;

    let mut sprites: Vec<SpriteCommand> = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .filter_map(|enemy| {
            let to_enemy = enemy.pos - player.pos;
            let distance = to_enemy.length();
            let angle_diff = normalize_angle(to_enemy.y.atan2(to_enemy.x) - player.angle);
            if angle_diff.abs() >= half_fov + SPRITE_VIEW_MARGIN {
                return None;
            }

            let size = screen_h / distance.max(MIN_SPRITE_DISTANCE) * enemy.size;
            Some(SpriteCommand {
                enemy_id: enemy.id,
                center_x: (angle_diff + half_fov) / fov * screen_w,
                size,
                top: screen_h / 2.0 - size,
                depth: distance,
                health_fraction: enemy.health_fraction(),
            })
        })
        .collect();

    // Stable, so equal depths keep collection order
    sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    sprites
}

/// Build the full frame
pub fn render_frame(state: &GameState, caster: &Raycaster, viewport: Viewport) -> Frame {
    let w = viewport.width as f32;
    let half_h = viewport.height as f32 / 2.0;
    Frame {
        sky: Rect::new(0.0, 0.0, w, half_h),
        floor: Rect::new(0.0, half_h, w, half_h),
        walls: render_walls(state, caster, viewport),
        sprites: render_sprites(state, viewport),
    }
}
