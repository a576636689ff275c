//! Session state and entity models
//!
//! The [`Session`] aggregate owns every entity and counter for one run. All
//! fields are public and serde-serializable so the renderer can consume the
//! whole thing as a read-only snapshot after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Cardinal travel/aim direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in canvas coordinates (y grows downward).
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Entity tint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Green,
    Gold,
    Red,
    Cyan,
    Lime,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Gold => "gold",
            Color::Red => "red",
            Color::Cyan => "cyan",
            Color::Lime => "lime",
        }
    }
}

/// An immutable arena wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }
}

/// The player tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub color: Color,
    pub speed: f32,
    /// 0 to [`MAX_HEALTH`]; reaching 0 latches the session game-over flag.
    pub health: u8,
    /// Aim direction; the last movement intent applied, even if the move
    /// itself was rejected by a wall.
    pub facing: Direction,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
            color: Color::Green,
            speed,
            health: MAX_HEALTH,
            facing: Direction::Up,
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: f32,
    pub dir: Direction,
}

impl Bullet {
    /// Spawn a bullet at the shooter's muzzle: centered across the firing
    /// axis, flush with the leading edge. Horizontal shots swap the extents.
    pub fn fired_from(shooter: &Rect, dir: Direction, speed: f32) -> Self {
        let center = shooter.center();
        let rect = match dir {
            Direction::Up => Rect::new(
                center.x - BULLET_WIDTH / 2.0,
                shooter.top(),
                BULLET_WIDTH,
                BULLET_LENGTH,
            ),
            Direction::Down => Rect::new(
                center.x - BULLET_WIDTH / 2.0,
                shooter.bottom(),
                BULLET_WIDTH,
                BULLET_LENGTH,
            ),
            Direction::Left => Rect::new(
                shooter.left() - BULLET_LENGTH,
                center.y - BULLET_WIDTH / 2.0,
                BULLET_LENGTH,
                BULLET_WIDTH,
            ),
            Direction::Right => Rect::new(
                shooter.right(),
                center.y - BULLET_WIDTH / 2.0,
                BULLET_LENGTH,
                BULLET_WIDTH,
            ),
        };
        Self { rect, speed, dir }
    }
}

/// An enemy tank drifting laterally across the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub color: Color,
    pub speed: f32,
    /// Lateral random-walk direction; only ever Left or Right.
    pub dir: Direction,
    pub last_shot: Option<u64>,
    pub fire_rate: u64,
}

impl Enemy {
    pub fn new(pos: Vec2, dir: Direction, tuning: &Tuning) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::splat(ENEMY_SIZE),
            },
            color: Color::Red,
            speed: tuning.enemy_speed,
            dir,
            last_shot: None,
            fire_rate: tuning.enemy_fire_rate_ms,
        }
    }
}

/// Powerup variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    RapidFire,
    Invincible,
    Health,
}

impl PowerupKind {
    /// Tint the renderer draws this pickup with.
    pub fn color(self) -> Color {
        match self {
            PowerupKind::RapidFire => Color::Cyan,
            PowerupKind::Invincible => Color::Gold,
            PowerupKind::Health => Color::Lime,
        }
    }
}

/// A collectible pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Powerup {
    pub rect: Rect,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::splat(POWERUP_SIZE),
            },
            kind,
        }
    }
}

/// What a deferred timed effect restores when it expires.
///
/// The restore value is captured when the effect is scheduled. Overlapping
/// pickups each schedule their own restore and never cancel or extend one
/// another, so an earlier restore can cut a later pickup's window short.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    RestoreFireRate(u64),
    RestoreColor(Color),
}

/// A scheduled one-shot restore, applied at the start of the first tick
/// where `now >= expires_at`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimedEffect {
    pub expires_at: u64,
    pub kind: EffectKind,
}

/// True once the cooldown for a rate-limited action has elapsed.
///
/// `None` means the action has never happened and is immediately due. A delta
/// exactly equal to the cooldown is rejected.
#[inline]
pub fn cooldown_elapsed(last: Option<u64>, now: u64, cooldown_ms: u64) -> bool {
    match last {
        None => true,
        Some(t) => now.saturating_sub(t) > cooldown_ms,
    }
}

/// Everything owned by one run of the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance knobs this session was built from (kept for reset)
    pub tuning: Tuning,
    /// Canvas extent; off-screen culling and spawn bounds derive from this
    pub canvas: Vec2,

    pub player: Player,
    pub walls: Vec<Wall>,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    /// Pending timed restores from powerup pickups
    pub effects: Vec<TimedEffect>,

    /// Monotonically non-decreasing, in increments of [`SCORE_PER_KILL`]
    pub score: u64,
    /// One-way latch; once true, ticks no longer mutate gameplay state
    pub game_over: bool,

    /// Player fire cooldown state. The rate is mutable (rapid fire).
    pub last_shot: Option<u64>,
    pub fire_rate: u64,

    pub last_enemy_spawn: Option<u64>,
    /// Shrinks as the score climbs, floored by the tuning
    pub enemy_spawn_rate: u64,
    pub last_powerup_spawn: Option<u64>,
    pub powerup_spawn_rate: u64,

    pub rng: Pcg32,
}

impl Session {
    /// Create a fresh session from a seed and balance knobs.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("new session, seed {seed}");
        Self {
            seed,
            canvas: Vec2::new(tuning.canvas_width, tuning.canvas_height),
            player: Player::new(tuning.player_speed),
            walls: default_walls(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            effects: Vec::new(),
            score: 0,
            game_over: false,
            last_shot: None,
            fire_rate: tuning.base_fire_rate_ms,
            last_enemy_spawn: None,
            enemy_spawn_rate: tuning.enemy_spawn_ms,
            last_powerup_spawn: None,
            powerup_spawn_rate: tuning.powerup_spawn_ms,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Reinitialize to defaults, keeping the seed and tuning.
    pub fn reset(&mut self) {
        *self = Session::new(self.seed, self.tuning.clone());
    }
}

/// Fixed arena layout: two vertical pillars flanking a central bar.
fn default_walls() -> Vec<Wall> {
    vec![
        Wall::new(100.0, 100.0, 40.0, 200.0),
        Wall::new(300.0, 300.0, 200.0, 40.0),
        Wall::new(500.0, 100.0, 40.0, 200.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let s = Session::new(7, Tuning::default());
        assert_eq!(s.player.health, MAX_HEALTH);
        assert_eq!(s.player.rect, Rect::new(400.0, 500.0, 40.0, 40.0));
        assert_eq!(s.player.color, Color::Green);
        assert_eq!(s.player.facing, Direction::Up);
        assert_eq!(s.score, 0);
        assert!(!s.game_over);
        assert_eq!(s.fire_rate, 200);
        assert_eq!(s.enemy_spawn_rate, 3000);
        assert!(s.bullets.is_empty());
        assert!(s.enemies.is_empty());
        assert!(s.powerups.is_empty());
        assert!(s.effects.is_empty());
        assert_eq!(s.walls.len(), 3);
        assert_eq!(s.walls[0].rect, Rect::new(100.0, 100.0, 40.0, 200.0));
        assert_eq!(s.walls[1].rect, Rect::new(300.0, 300.0, 200.0, 40.0));
        assert_eq!(s.walls[2].rect, Rect::new(500.0, 100.0, 40.0, 200.0));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut s = Session::new(7, Tuning::default());
        s.score = 1500;
        s.player.health = 1;
        s.game_over = true;
        s.enemy_spawn_rate = 1000;
        s.enemies.push(Enemy::new(
            Vec2::new(10.0, 0.0),
            Direction::Left,
            &s.tuning.clone(),
        ));

        s.reset();
        assert_eq!(s.seed, 7);
        assert_eq!(s.score, 0);
        assert_eq!(s.player.health, MAX_HEALTH);
        assert!(!s.game_over);
        assert_eq!(s.enemy_spawn_rate, 3000);
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_cooldown_elapsed() {
        // Never happened: immediately due
        assert!(cooldown_elapsed(None, 0, 200));
        // Exact tie is rejected
        assert!(!cooldown_elapsed(Some(100), 300, 200));
        assert!(cooldown_elapsed(Some(100), 301, 200));
        // Still inside the window
        assert!(!cooldown_elapsed(Some(100), 150, 200));
    }

    #[test]
    fn test_muzzle_placement() {
        let shooter = Rect::new(400.0, 500.0, 40.0, 40.0);

        let up = Bullet::fired_from(&shooter, Direction::Up, 5.0);
        assert_eq!(up.rect, Rect::new(417.5, 500.0, 5.0, 10.0));

        let down = Bullet::fired_from(&shooter, Direction::Down, 3.0);
        assert_eq!(down.rect, Rect::new(417.5, 540.0, 5.0, 10.0));

        // Horizontal shots swap the extents
        let left = Bullet::fired_from(&shooter, Direction::Left, 5.0);
        assert_eq!(left.rect, Rect::new(390.0, 517.5, 10.0, 5.0));

        let right = Bullet::fired_from(&shooter, Direction::Right, 5.0);
        assert_eq!(right.rect, Rect::new(440.0, 517.5, 10.0, 5.0));
    }

    #[test]
    fn test_powerup_colors() {
        assert_eq!(PowerupKind::RapidFire.color(), Color::Cyan);
        assert_eq!(PowerupKind::Invincible.color(), Color::Gold);
        assert_eq!(PowerupKind::Health.color(), Color::Lime);
    }
}
