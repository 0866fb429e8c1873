//! Fixed-step ray marching through the occupancy grid

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::map::GridMap;
use crate::angle_to_vector;
use crate::consts::{MIN_RAY_STEP, RAY_MAX_DISTANCE, RAY_STEP};

/// What a ray ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    Wall,
    None,
}

/// Result of a single cast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance travelled along the ray (0 < distance <= max)
    pub distance: f32,
    pub kind: HitKind,
}

impl RayHit {
    #[inline]
    pub fn is_wall(&self) -> bool {
        self.kind == HitKind::Wall
    }
}

/// Ray marcher with a fixed increment.
///
/// The step must stay well under one cell so a ray cannot skip a
/// single-cell-thick wall. Casting marches with the step clamped to
/// [`MIN_RAY_STEP`, 1] and a finite, non-negative reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    pub step: f32,
    pub max_distance: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            step: RAY_STEP,
            max_distance: RAY_MAX_DISTANCE,
        }
    }
}

impl Raycaster {
    pub fn new(step: f32, max_distance: f32) -> Self {
        let caster = Self { step, max_distance };
        let (clamped_step, clamped_max) = caster.bounds();
        if clamped_step != step || clamped_max != max_distance {
            log::warn!(
                "Raycaster step {} / reach {} adjusted to {} / {}",
                step,
                max_distance,
                clamped_step,
                clamped_max
            );
        }
        Self {
            step: clamped_step,
            max_distance: clamped_max,
        }
    }

    /// Step and reach actually used for marching
    fn bounds(&self) -> (f32, f32) {
        let step = if self.step.is_nan() {
            RAY_STEP
        } else {
            self.step.clamp(MIN_RAY_STEP, 1.0)
        };
        let max_distance = if self.max_distance.is_finite() {
            self.max_distance.max(0.0)
        } else {
            RAY_MAX_DISTANCE
        };
        (step, max_distance)
    }

    /// Cast from `origin` along `angle`.
    ///
    /// The first sample is one step out, so a ray starting on a wall edge
    /// reports `distance == step`. Distances are `i * step` rather than an
    /// accumulated sum to keep them exact and monotonic.
    pub fn cast(&self, map: &GridMap, origin: Vec2, angle: f32) -> RayHit {
        let dir = angle_to_vector(angle);
        let (step, max_distance) = self.bounds();
        let steps = (max_distance / step).ceil() as u32;

        for i in 1..=steps {
            let distance = (i as f32 * step).min(max_distance);
            let p = origin + dir * distance;
            if map.is_blocked_at(p) {
                return RayHit {
                    distance,
                    kind: HitKind::Wall,
                };
            }
        }

        RayHit {
            distance: max_distance,
            kind: HitKind::None,
        }
    }
}
