//! Raycast rendering module
//!
//! Turns simulation state into column and billboard draw commands. Actual
//! pixels are the host's job.

pub mod commands;
pub mod frame;

pub use commands::{HudUpdate, Rect, SpriteCommand, WallStrip, colors};
pub use frame::{Frame, PresentationSink, Viewport, render_frame, render_sprites, render_walls};
