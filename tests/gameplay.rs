//! End-to-end gameplay scenarios through the public API.

use tank_arena::consts::{MAX_HEALTH, SCORE_PER_KILL};
use tank_arena::sim::{Direction, Rect, Session, TickInput, tick};
use tank_arena::tuning::Tuning;

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..Default::default()
    }
}

#[test]
fn first_shot_from_a_fresh_session() {
    let mut session = Session::new(42, Tuning::default());

    // Fire on the very first tick at t=0: no cooldown has ever run
    tick(&mut session, &fire(), 0);
    let bullet = session
        .bullets
        .iter()
        .find(|b| b.dir == Direction::Up)
        .expect("player bullet should exist");
    assert_eq!(bullet.rect, Rect::new(417.5, 500.0, 5.0, 10.0));
    assert_eq!(bullet.speed, 5.0);
    assert_eq!(session.score, 0);

    // One tick later the bullet has advanced upward by its speed
    tick(&mut session, &TickInput::default(), 16);
    let bullet = session
        .bullets
        .iter()
        .find(|b| b.dir == Direction::Up)
        .expect("player bullet should still be in flight");
    assert_eq!(bullet.rect.pos.y, 495.0);
}

#[test]
fn fresh_session_spawns_an_enemy_immediately() {
    let mut session = Session::new(42, Tuning::default());
    tick(&mut session, &TickInput::default(), 0);
    assert_eq!(session.enemies.len(), 1);
    assert_eq!(session.enemies[0].rect.pos.y, 0.0);
}

#[test]
fn identical_seeds_and_inputs_replay_identically() {
    let mut a = Session::new(99, Tuning::default());
    let mut b = Session::new(99, Tuning::default());

    let mut now = 0;
    for i in 0..2000u64 {
        let input = TickInput {
            left: i % 7 < 3,
            right: i % 11 < 4,
            fire: true,
            ..Default::default()
        };
        tick(&mut a, &input, now);
        tick(&mut b, &input, now);
        now += 16;
    }

    let snap_a = serde_json::to_string(&a).unwrap();
    let snap_b = serde_json::to_string(&b).unwrap();
    assert_eq!(snap_a, snap_b);
}

#[test]
fn long_run_preserves_invariants() {
    let mut session = Session::new(7, Tuning::default());
    let mut last_score = 0;
    let mut seen_game_over = false;
    let mut now = 0;

    for _ in 0..10_000u64 {
        tick(&mut session, &fire(), now);
        now += 16;

        // Score only climbs, in fixed increments
        assert!(session.score >= last_score);
        assert!(session.score.is_multiple_of(SCORE_PER_KILL));
        last_score = session.score;

        assert!(session.player.health <= MAX_HEALTH);
        // Spawn ramp never goes below its floor
        assert!(session.enemy_spawn_rate >= session.tuning.enemy_spawn_floor_ms);
        // Walls are fixed for the whole session
        assert_eq!(session.walls.len(), 3);
        // The latch never clears
        if seen_game_over {
            assert!(session.game_over);
        }
        seen_game_over = session.game_over;
    }
}

#[test]
fn reset_starts_a_clean_session() {
    let mut session = Session::new(5, Tuning::default());
    let mut now = 0;
    for _ in 0..500u64 {
        tick(&mut session, &fire(), now);
        now += 16;
    }
    session.game_over = true;

    session.reset();
    assert_eq!(session.seed, 5);
    assert!(!session.game_over);
    assert_eq!(session.score, 0);
    assert_eq!(session.player.health, MAX_HEALTH);
    assert!(session.bullets.is_empty());
    assert!(session.enemies.is_empty());
    assert!(session.powerups.is_empty());
    assert!(session.effects.is_empty());

    // And the reborn session ticks normally
    tick(&mut session, &fire(), now);
    assert!(session.bullets.iter().any(|b| b.dir == Direction::Up));
}
