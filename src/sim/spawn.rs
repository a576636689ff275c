//! Time-gated entity spawners
//!
//! Enemies and powerups appear on wall-clock intervals, independent of frame
//! rate. A fresh session has never spawned anything, so both spawners fire on
//! the first tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Direction, Enemy, Powerup, PowerupKind, Session, cooldown_elapsed};
use crate::consts::POWERUP_SIZE;

/// Spawn one enemy at the top edge if the spawn interval has elapsed.
pub fn maybe_spawn_enemy(state: &mut Session, now: u64) {
    if !cooldown_elapsed(state.last_enemy_spawn, now, state.enemy_spawn_rate) {
        return;
    }
    let x = state.rng.random_range(0.0..state.canvas.x);
    let dir = if state.rng.random_bool(0.5) {
        Direction::Left
    } else {
        Direction::Right
    };
    state
        .enemies
        .push(Enemy::new(Vec2::new(x, 0.0), dir, &state.tuning));
    state.last_enemy_spawn = Some(now);
    log::debug!("enemy spawned at x={x:.1}, {} live", state.enemies.len());
}

/// Spawn one powerup at a random in-bounds position if the interval elapsed.
pub fn maybe_spawn_powerup(state: &mut Session, now: u64) {
    if !cooldown_elapsed(state.last_powerup_spawn, now, state.powerup_spawn_rate) {
        return;
    }
    let x = state.rng.random_range(0.0..state.canvas.x - POWERUP_SIZE);
    let y = state.rng.random_range(0.0..state.canvas.y - POWERUP_SIZE);
    let kind = match state.rng.random_range(0..3) {
        0 => PowerupKind::RapidFire,
        1 => PowerupKind::Invincible,
        _ => PowerupKind::Health,
    };
    state.powerups.push(Powerup::new(Vec2::new(x, y), kind));
    state.last_powerup_spawn = Some(now);
    log::debug!("powerup {kind:?} spawned at ({x:.1}, {y:.1})");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_first_enemy_spawns_immediately() {
        let mut s = Session::new(7, Tuning::default());
        maybe_spawn_enemy(&mut s, 0);
        assert_eq!(s.enemies.len(), 1);
        let e = &s.enemies[0];
        assert_eq!(e.rect.pos.y, 0.0);
        assert!(e.rect.pos.x >= 0.0 && e.rect.pos.x < s.canvas.x);
        assert!(e.dir.is_horizontal());
        assert_eq!(s.last_enemy_spawn, Some(0));
    }

    #[test]
    fn test_enemy_spawn_respects_interval() {
        let mut s = Session::new(7, Tuning::default());
        maybe_spawn_enemy(&mut s, 0);
        // Interval (3000ms) not elapsed; tie is rejected too
        maybe_spawn_enemy(&mut s, 100);
        maybe_spawn_enemy(&mut s, 3000);
        assert_eq!(s.enemies.len(), 1);
        maybe_spawn_enemy(&mut s, 3001);
        assert_eq!(s.enemies.len(), 2);
        assert_eq!(s.last_enemy_spawn, Some(3001));
    }

    #[test]
    fn test_powerup_spawns_in_bounds() {
        let mut s = Session::new(99, Tuning::default());
        let mut now = 0;
        for _ in 0..50 {
            maybe_spawn_powerup(&mut s, now);
            now += s.powerup_spawn_rate + 1;
        }
        assert_eq!(s.powerups.len(), 50);
        for p in &s.powerups {
            assert!(p.rect.pos.x >= 0.0);
            assert!(p.rect.pos.y >= 0.0);
            assert!(p.rect.right() <= s.canvas.x);
            assert!(p.rect.bottom() <= s.canvas.y);
        }
    }

    #[test]
    fn test_spawners_are_deterministic() {
        let mut a = Session::new(1234, Tuning::default());
        let mut b = Session::new(1234, Tuning::default());
        for now in [0, 4000, 8000, 12000] {
            maybe_spawn_enemy(&mut a, now);
            maybe_spawn_enemy(&mut b, now);
        }
        let xs_a: Vec<f32> = a.enemies.iter().map(|e| e.rect.pos.x).collect();
        let xs_b: Vec<f32> = b.enemies.iter().map(|e| e.rect.pos.x).collect();
        assert_eq!(xs_a, xs_b);
    }
}
