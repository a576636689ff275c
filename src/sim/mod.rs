//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps are supplied by the host, never read internally
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    Bullet, Color, Direction, EffectKind, Enemy, Player, Powerup, PowerupKind, Session,
    TimedEffect, Wall,
};
pub use tick::{TickInput, tick};
