//! Headless autopilot driver
//!
//! Plays one session at a fixed 60 Hz step with a simple gap-following
//! pilot, then feeds the summary into a progression record.
//!
//! Usage: `flapstorm [easy|hard|crazy] [seed] [profile.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use flapstorm::sim::{GameState, SessionStatus, TickInput, tick};
use flapstorm::{Difficulty, DifficultyProfile, GameError, Progress};

/// Fixed simulation step
const STEP: f32 = 1.0 / 60.0;
/// Give up after this many simulated seconds
const MAX_SECONDS: f32 = 300.0;
/// Aim this far below the gap centre before flapping
const AIM_OFFSET: f32 = 20.0;

fn main() -> Result<(), GameError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty: Difficulty = match args.next() {
        Some(name) => name.parse()?,
        None => Difficulty::default(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().map_err(|_| GameError::InvalidSeed(raw))?,
        None => 1,
    };
    let profile = match args.next() {
        Some(path) => DifficultyProfile::from_json(&std::fs::read_to_string(path)?)?,
        None => difficulty.profile(),
    };

    log::info!("Flapstorm autopilot: {} (seed {})", difficulty, seed);
    let mut state = GameState::new(profile, seed);
    let mut elapsed = 0.0;

    tick(
        &mut state,
        &TickInput {
            jump: true,
            ..Default::default()
        },
        STEP,
    );
    while state.status == SessionStatus::Playing && elapsed < MAX_SECONDS {
        let input = TickInput {
            jump: should_flap(&state),
            ..Default::default()
        };
        tick(&mut state, &input, STEP);
        // No audio or HUD listening
        state.drain_events();
        elapsed += STEP;
    }

    let Some(summary) = state.take_summary() else {
        log::info!("Pilot survived {:.0}s, stopping", elapsed);
        println!("survived: score {}", state.totals.score);
        return Ok(());
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    let mut progress = Progress::new();
    let outcome = progress.record_session(difficulty, &summary, timestamp);

    println!(
        "score {} | coins {} | kills {} | rank {:?} | unlocked {:?}",
        summary.final_score,
        summary.coins_collected,
        summary.kill_count,
        outcome.rank,
        outcome.unlocked.iter().map(|a| a.id).collect::<Vec<_>>()
    );
    println!("{}", progress.to_json()?);
    Ok(())
}

/// Flap when falling below the next gap's centre
fn should_flap(state: &GameState) -> bool {
    let avatar = &state.avatar;
    let target = state
        .obstacles
        .iter()
        .find(|o| o.right() > avatar.pos.x - avatar.size.x / 2.0)
        .map(|o| o.top_height + o.gap / 2.0)
        .unwrap_or(state.field.y / 2.0);
    avatar.velocity > 0.0 && avatar.pos.y > target + AIM_OFFSET
}
