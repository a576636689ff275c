//! Tank Arena entry point
//!
//! Headless demo host: runs the simulation at a fixed cadence with an
//! autopilot standing in for the input collaborator, and a periodic HUD log
//! line standing in for the renderer. Pass a seed as the first argument for
//! a reproducible run.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tank_arena::consts::PLAYER_SIZE;
use tank_arena::platform::{Clock, SystemClock};
use tank_arena::sim::{Direction, Session, TickInput, tick};
use tank_arena::tuning::Tuning;

/// Frame cadence of the demo loop.
const FRAME_MS: u64 = 16;
/// Hard stop for the demo (~5 minutes at 60fps).
const MAX_DEMO_FRAMES: u64 = 18_000;
/// Default location of the balance file.
const TUNING_PATH: &str = "tank-arena.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let tuning = Tuning::load(TUNING_PATH);
    let mut session = Session::new(seed, tuning);
    let clock = SystemClock::new();

    let mut frames: u64 = 0;
    while !session.game_over && frames < MAX_DEMO_FRAMES {
        let now = clock.now_ms();
        let input = autopilot(&session);
        tick(&mut session, &input, now);

        if frames % 120 == 0 {
            log::info!(
                "score {} | health {} | enemies {} | bullets {} | powerups {}",
                session.score,
                session.player.health,
                session.enemies.len(),
                session.bullets.len(),
                session.powerups.len(),
            );
        }
        frames += 1;
        thread::sleep(Duration::from_millis(FRAME_MS));
    }

    log::info!("run finished after {frames} frames, final score {}", session.score);
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&session) {
            Ok(json) => log::debug!("final session: {json}"),
            Err(e) => log::warn!("could not serialize final session: {e}"),
        }
    }
}

/// Demo-mode input synthesis: dodge incoming fire, line up under the nearest
/// enemy, square the aim upward, and hold the trigger.
fn autopilot(session: &Session) -> TickInput {
    let mut input = TickInput::default();
    let player = &session.player;
    let center = player.rect.center();

    // Incoming fire in our column takes priority
    let threatened = session.bullets.iter().any(|b| {
        b.dir == Direction::Down
            && b.rect.pos.y < player.rect.pos.y
            && (b.rect.center().x - center.x).abs() < PLAYER_SIZE
    });
    if threatened {
        if center.x < session.canvas.x / 2.0 {
            input.right = true;
        } else {
            input.left = true;
        }
        return input;
    }

    let nearest = session.enemies.iter().min_by(|a, b| {
        let da = (a.rect.center().x - center.x).abs();
        let db = (b.rect.center().x - center.x).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(enemy) = nearest {
        let dx = enemy.rect.center().x - center.x;
        if dx < -player.speed {
            input.left = true;
        } else if dx > player.speed {
            input.right = true;
        } else if player.facing != Direction::Up {
            // Lined up but aiming sideways from the last strafe
            input.up = true;
        } else {
            input.fire = true;
        }
    } else if player.facing == Direction::Up {
        input.fire = true;
    }

    input
}
