//! Tank Arena - a top-down arcade tank shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, scoring)
//! - `platform`: Clock abstraction for the host loop
//! - `tuning`: Data-driven game balance
//!
//! Rendering and raw input handling belong to the host: the simulation
//! consumes one [`sim::TickInput`] intent snapshot per tick and exposes the
//! full [`sim::Session`] for read-only drawing afterwards.

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Fixed game constants
///
/// Geometry and scoring rules that never change at runtime. Balance knobs
/// (speeds, rates, canvas size) live in [`crate::tuning::Tuning`] instead.
pub mod consts {
    /// Player tank extent (square)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player spawn position (top-left corner)
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    /// Health cap, also the starting value
    pub const MAX_HEALTH: u8 = 3;

    /// Bullet extent across the travel axis
    pub const BULLET_WIDTH: f32 = 5.0;
    /// Bullet extent along the travel axis
    pub const BULLET_LENGTH: f32 = 10.0;

    /// Enemy tank extent (square)
    pub const ENEMY_SIZE: f32 = 40.0;
    /// Per-tick chance that an enemy reverses its lateral direction
    pub const ENEMY_TURN_CHANCE: f64 = 0.01;

    /// Powerup pickup extent (square)
    pub const POWERUP_SIZE: f32 = 30.0;

    /// Points awarded per destroyed enemy
    pub const SCORE_PER_KILL: u64 = 100;
    /// Score interval at which the enemy spawn interval shrinks
    pub const DIFFICULTY_SCORE_STEP: u64 = 1000;
}
