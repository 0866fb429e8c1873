//! Draw command types handed to the presentation host
//!
//! Plain `#[repr(C)]` values so a GPU host can upload them as instance data
//! and a JS host can take them as JSON.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle (pixels, origin top-left)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// One projected wall column
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct WallStrip {
    /// Screen column (0..width)
    pub column: u32,
    /// Top edge, may be negative when the wall is taller than the screen
    pub top: f32,
    pub height: f32,
    /// Grey level 0..=1
    pub brightness: f32,
    /// Fisheye-corrected distance, usable as a depth buffer
    pub depth: f32,
}

impl WallStrip {
    pub fn color(&self) -> [f32; 4] {
        let b = self.brightness;
        [b, b, b, 1.0]
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.column as f32, self.top, 1.0, self.height)
    }
}

/// One enemy billboard
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SpriteCommand {
    pub enemy_id: u32,
    /// Horizontal center on screen
    pub center_x: f32,
    /// Projected size; the body is `size` wide and `2 * size` tall
    pub size: f32,
    /// Top edge of the body
    pub top: f32,
    /// Distance from the player
    pub depth: f32,
    /// Remaining health 0..=1
    pub health_fraction: f32,
}

/// Health bar height and its gap above the sprite (pixels)
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
pub const HEALTH_BAR_OFFSET: f32 = 10.0;

impl SpriteCommand {
    pub fn body(&self) -> Rect {
        Rect::new(
            self.center_x - self.size / 2.0,
            self.top,
            self.size,
            self.size * 2.0,
        )
    }

    /// Full-width bar background
    pub fn health_bar_back(&self) -> Rect {
        Rect::new(
            self.center_x - self.size / 2.0,
            self.top - HEALTH_BAR_OFFSET,
            self.size,
            HEALTH_BAR_HEIGHT,
        )
    }

    /// Filled part of the bar
    pub fn health_bar_fill(&self) -> Rect {
        Rect {
            w: self.size * self.health_fraction,
            ..self.health_bar_back()
        }
    }
}

/// HUD scalars, sent only when one of them changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudUpdate {
    pub health: i32,
    pub ammo: u32,
    pub score: u32,
}

/// Colors for scene elements
pub mod colors {
    /// #87CEEB
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    /// #3a9d23
    pub const FLOOR: [f32; 4] = [0.227, 0.616, 0.137, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_BACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_FILL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}
