//! Game settings
//!
//! Loaded from a JSON file by native hosts; a web host can pass the same JSON
//! string to [`Settings::from_json`]. Missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::sim::{GridMap, MapError};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: u32,
    pub viewport_height: u32,

    // === Controls ===
    /// Radians per pixel of horizontal pointer movement
    pub mouse_sensitivity: f32,
    /// Horizontal field of view (radians)
    pub fov: f32,

    // === Run ===
    /// Enemies spawned per start/restart
    pub enemy_count: usize,
    /// RNG seed for spawns and melee rolls
    pub seed: u64,
    /// Custom map rows (`#` wall, `.` floor); built-in room when absent
    pub map: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            fov: PLAYER_FOV,
            enemy_count: ENEMY_COUNT,
            seed: 0x5eed,
            map: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Field of view clamped to [`MIN_FOV`, `MAX_FOV`]; non-finite values use the default
    pub fn clamped_fov(&self) -> f32 {
        if !self.fov.is_finite() {
            log::warn!("Field of view {} is not finite, using {}", self.fov, PLAYER_FOV);
            return PLAYER_FOV;
        }
        let fov = self.fov.clamp(MIN_FOV, MAX_FOV);
        if fov != self.fov {
            log::warn!("Field of view {} out of range, clamped to {}", self.fov, fov);
        }
        fov
    }

    /// Map described by these settings
    pub fn build_map(&self) -> Result<GridMap, MapError> {
        match &self.map {
            Some(rows) => GridMap::parse(rows.as_slice()),
            None => Ok(GridMap::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_count": 3, "seed": 7 }"#).unwrap();
        assert_eq!(settings.enemy_count, 3);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.viewport_width, DEFAULT_VIEWPORT.0);
        assert_eq!(settings.fov, PLAYER_FOV);
        assert!(settings.map.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            map: Some(vec!["###".into(), "#.#".into(), "###".into()]),
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json(r#"{ "enemy_count": "many" }"#).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/nonexistent/grid-raider.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_fov_clamped_into_range() {
        let wide = Settings::from_json(r#"{ "fov": 3.5 }"#).unwrap();
        assert_eq!(wide.clamped_fov(), MAX_FOV);
        let zero = Settings {
            fov: 0.0,
            ..Settings::default()
        };
        assert_eq!(zero.clamped_fov(), MIN_FOV);
        let nan = Settings {
            fov: f32::NAN,
            ..Settings::default()
        };
        assert_eq!(nan.clamped_fov(), PLAYER_FOV);
        assert_eq!(Settings::default().clamped_fov(), PLAYER_FOV);
    }

    #[test]
    fn test_build_map() {
        assert_eq!(Settings::default().build_map().unwrap(), GridMap::default());
        let settings = Settings {
            map: Some(vec!["#.#".into()]),
            ..Settings::default()
        };
        assert!(matches!(
            settings.build_map(),
            Err(MapError::OpenBorder { .. })
        ));
    }
}
