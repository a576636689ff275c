//! Per-frame simulation step
//!
//! One [`tick`] advances the whole session: expired powerup restores, player
//! movement with wall gating, bullet lifecycle, firing, spawning, enemy AI,
//! hit detection, pickups, and the game-over latch. The host calls it once
//! per rendered frame with the current wall-clock timestamp.

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{
    Bullet, Color, Direction, EffectKind, PowerupKind, Session, cooldown_elapsed,
};
use crate::consts::*;

/// Held input intents for a single tick.
///
/// The host translates raw input events into this map and the sim reads it
/// once per tick, never mutating it.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the session by one frame.
///
/// `now` is a monotonically non-decreasing millisecond timestamp from the
/// host clock; all cooldown and spawn gating compares against it. A tick on
/// a game-over session is a no-op.
pub fn tick(state: &mut Session, input: &TickInput, now: u64) {
    if state.game_over {
        return;
    }

    apply_due_effects(state, now);
    move_player(state, input);

    // Bullets advance before firing so a shot spawned this tick is first
    // drawn at its muzzle position and moves next tick.
    advance_bullets(state);
    if input.fire {
        try_fire(state, now);
    }

    spawn::maybe_spawn_enemy(state, now);
    update_enemies(state, now);
    resolve_enemy_hits(state);
    resolve_player_hits(state);

    spawn::maybe_spawn_powerup(state, now);
    collect_powerups(state, now);
}

/// Drain scheduled restores whose expiry has passed, in insertion order.
fn apply_due_effects(state: &mut Session, now: u64) {
    let mut i = 0;
    while i < state.effects.len() {
        if now >= state.effects[i].expires_at {
            let effect = state.effects.remove(i);
            match effect.kind {
                EffectKind::RestoreFireRate(rate) => {
                    state.fire_rate = rate;
                    log::debug!("rapid fire expired, fire rate back to {rate}ms");
                }
                EffectKind::RestoreColor(color) => state.player.color = color,
            }
        } else {
            i += 1;
        }
    }
}

/// Apply held movement intents, gated by the walls.
///
/// All held directions combine into one candidate displacement; if the
/// candidate box overlaps any wall the whole move is rejected for this tick,
/// both axes. Facing still updates on a rejected move.
fn move_player(state: &mut Session, input: &TickInput) {
    let mut delta = Vec2::ZERO;
    let speed = state.player.speed;
    let intents = [
        (input.up, Direction::Up),
        (input.down, Direction::Down),
        (input.left, Direction::Left),
        (input.right, Direction::Right),
    ];
    for (held, dir) in intents {
        if held {
            delta += dir.unit() * speed;
            state.player.facing = dir;
        }
    }
    if delta == Vec2::ZERO {
        return;
    }

    let candidate = state.player.rect.translated(delta);
    if state.walls.iter().any(|w| candidate.overlaps(&w.rect)) {
        return;
    }
    state.player.rect = candidate;
}

/// Fire one bullet in the facing direction if the cooldown has elapsed.
///
/// The check reads the current fire rate, which rapid fire may have lowered.
fn try_fire(state: &mut Session, now: u64) {
    if !cooldown_elapsed(state.last_shot, now, state.fire_rate) {
        return;
    }
    state.bullets.push(Bullet::fired_from(
        &state.player.rect,
        state.player.facing,
        state.tuning.player_bullet_speed,
    ));
    state.last_shot = Some(now);
}

/// Move every bullet along its axis, culling off-canvas and wall impacts.
fn advance_bullets(state: &mut Session) {
    let canvas = state.canvas;
    let walls = &state.walls;
    state.bullets.retain_mut(|bullet| {
        bullet.rect.pos += bullet.dir.unit() * bullet.speed;
        let on_canvas = bullet.rect.pos.x >= 0.0
            && bullet.rect.pos.y >= 0.0
            && bullet.rect.pos.x <= canvas.x
            && bullet.rect.pos.y <= canvas.y;
        on_canvas && !walls.iter().any(|w| bullet.rect.overlaps(&w.rect))
    });
}

/// Per-tick autonomous enemy update: lateral drift, random direction flips,
/// cooldown-gated downward fire.
///
/// Enemies are not clamped to the canvas; ones that wander off stay live and
/// keep shooting. Only scoring hits remove them.
fn update_enemies(state: &mut Session, now: u64) {
    let mut shots: Vec<Bullet> = Vec::new();
    for enemy in &mut state.enemies {
        enemy.rect.pos += enemy.dir.unit() * enemy.speed;
        if state.rng.random_bool(ENEMY_TURN_CHANCE) {
            enemy.dir = enemy.dir.flipped();
        }
        if cooldown_elapsed(enemy.last_shot, now, enemy.fire_rate) {
            shots.push(Bullet::fired_from(
                &enemy.rect,
                Direction::Down,
                state.tuning.enemy_bullet_speed,
            ));
            enemy.last_shot = Some(now);
        }
    }
    state.bullets.extend(shots);
}

/// Destroy enemies overlapped by upward bullets; each kill consumes the
/// bullet and scores.
fn resolve_enemy_hits(state: &mut Session) {
    let mut e = 0;
    while e < state.enemies.len() {
        let hit = state
            .bullets
            .iter()
            .position(|b| b.dir == Direction::Up && b.rect.overlaps(&state.enemies[e].rect));
        if let Some(bullet_idx) = hit {
            state.bullets.remove(bullet_idx);
            state.enemies.remove(e);
            award_kill(state);
        } else {
            e += 1;
        }
    }
}

/// Score a kill and ramp difficulty when the score crosses a step boundary.
fn award_kill(state: &mut Session) {
    state.score += SCORE_PER_KILL;
    log::debug!("enemy destroyed, score {}", state.score);
    if state.score.is_multiple_of(DIFFICULTY_SCORE_STEP) {
        let ramped = state
            .enemy_spawn_rate
            .saturating_sub(state.tuning.enemy_spawn_step_ms)
            .max(state.tuning.enemy_spawn_floor_ms);
        if ramped != state.enemy_spawn_rate {
            log::info!(
                "score {}: enemy spawn interval {} -> {}ms",
                state.score,
                state.enemy_spawn_rate,
                ramped
            );
        }
        state.enemy_spawn_rate = ramped;
    }
}

/// Apply damage from downward bullets overlapping the player.
///
/// Every overlapping bullet decrements health independently; there is no
/// one-hit-per-tick guard. Health saturates at 0 and latches game over.
fn resolve_player_hits(state: &mut Session) {
    let player_rect = state.player.rect;
    for bullet in &state.bullets {
        if bullet.dir == Direction::Down && bullet.rect.overlaps(&player_rect) {
            state.player.health = state.player.health.saturating_sub(1);
            if state.player.health == 0 {
                state.game_over = true;
            }
        }
    }
    if state.game_over {
        log::info!("game over, final score {}", state.score);
    }
}

/// Collect powerups overlapping the player and apply their effects.
fn collect_powerups(state: &mut Session, now: u64) {
    let mut i = 0;
    while i < state.powerups.len() {
        if state.powerups[i].rect.overlaps(&state.player.rect) {
            let powerup = state.powerups.remove(i);
            apply_powerup(state, powerup.kind, now);
        } else {
            i += 1;
        }
    }
}

fn apply_powerup(state: &mut Session, kind: PowerupKind, now: u64) {
    log::debug!("powerup {kind:?} collected");
    match kind {
        PowerupKind::RapidFire => {
            state.fire_rate = state.tuning.rapid_fire_rate_ms;
            state.effects.push(super::state::TimedEffect {
                expires_at: now + state.tuning.powerup_duration_ms,
                kind: EffectKind::RestoreFireRate(state.tuning.base_fire_rate_ms),
            });
        }
        PowerupKind::Invincible => {
            state.player.color = Color::Gold;
            state.effects.push(super::state::TimedEffect {
                expires_at: now + state.tuning.powerup_duration_ms,
                kind: EffectKind::RestoreColor(Color::Green),
            });
        }
        PowerupKind::Health => {
            state.player.health = (state.player.health + 1).min(MAX_HEALTH);
        }
    }
}
