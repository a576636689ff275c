//! Data-driven game balance
//!
//! Every rate and speed the simulation consumes lives here, so the feel of
//! the game can be adjusted from a JSON file without recompiling. Geometry
//! that never changes stays in [`crate::consts`].

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Canvas extent; off-screen culling and spawn bounds derive from these
    pub canvas_width: f32,
    pub canvas_height: f32,

    /// Player movement, pixels per tick
    pub player_speed: f32,
    pub player_bullet_speed: f32,
    /// Baseline fire cooldown
    pub base_fire_rate_ms: u64,
    /// Fire cooldown while rapid fire is active
    pub rapid_fire_rate_ms: u64,
    /// How long timed powerups last
    pub powerup_duration_ms: u64,

    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_fire_rate_ms: u64,
    /// Starting enemy spawn interval
    pub enemy_spawn_ms: u64,
    /// How much the interval shrinks per difficulty step
    pub enemy_spawn_step_ms: u64,
    /// The interval never drops below this
    pub enemy_spawn_floor_ms: u64,

    pub powerup_spawn_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            player_speed: 3.0,
            player_bullet_speed: 5.0,
            base_fire_rate_ms: 200,
            rapid_fire_rate_ms: 100,
            powerup_duration_ms: 5000,
            enemy_speed: 2.0,
            enemy_bullet_speed: 3.0,
            enemy_fire_rate_ms: 1000,
            enemy_spawn_ms: 3000,
            enemy_spawn_step_ms: 200,
            enemy_spawn_floor_ms: 1000,
            powerup_spawn_ms: 10000,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults with a logged
    /// reason if the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("ignoring malformed tuning file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("could not read tuning file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write the current tuning as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
