//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, driven by an explicit input snapshot
//! - Seeded RNG only (spawns, melee rolls)
//! - Stable iteration order (enemy spawn order)
//! - No rendering or platform dependencies

pub mod map;
pub mod raycast;
pub mod session;
pub mod state;
pub mod tick;

pub use map::{Cell, GridMap, MapError};
pub use raycast::{HitKind, RayHit, Raycaster};
pub use session::GameSession;
pub use state::{Enemy, GameEvent, GameState, Outcome, Player, SessionPhase};
pub use tick::{ShotResult, TickInput, fire, movement_vector, tick};
