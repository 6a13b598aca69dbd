//! End-to-end sessions driven through the public API

use flapstorm::sim::pickups::apply_pickup;
use flapstorm::sim::{
    GameEvent, GameState, PickupKind, SessionStatus, ShieldLevel, SpriteKind, TickInput, tick,
};
use flapstorm::{Difficulty, DifficultyProfile, Progress};

const FRAME: f32 = 1.0 / 60.0;

fn start(profile: DifficultyProfile, seed: u64) -> GameState {
    let mut state = GameState::new(profile, seed);
    tick(
        &mut state,
        &TickInput {
            jump: true,
            ..Default::default()
        },
        0.0,
    );
    state
}

#[test]
fn jump_impulse_and_first_step() {
    let profile = DifficultyProfile {
        gravity: 1200.0,
        jump_impulse: -380.0,
        ..DifficultyProfile::easy()
    };
    let mut state = start(profile, 1);
    assert_eq!(state.status, SessionStatus::Playing);
    assert_eq!(state.avatar.velocity, -380.0);

    let gravity = state.profile().gravity;
    let max_fall = state.profile().max_fall_speed;
    state.avatar.integrate(0.1, gravity, max_fall);
    assert!((state.avatar.velocity + 260.0).abs() < 1e-3);
}

#[test]
fn weapon_pickups_level_and_pool_ammo() {
    let mut state = start(DifficultyProfile::hard(), 2);
    apply_pickup(&mut state, PickupKind::Weapon { ammo: 10 });
    assert_eq!(state.avatar.weapon_level, 1);
    assert_eq!(state.avatar.weapon_ammo, 10);
    apply_pickup(&mut state, PickupKind::Weapon { ammo: 8 });
    assert_eq!(state.avatar.weapon_level, 2);
    assert_eq!(state.avatar.weapon_ammo, 18);
}

#[test]
fn enhanced_shield_absorbs_three_ground_contacts() {
    let mut state = start(DifficultyProfile::easy(), 3);
    apply_pickup(&mut state, PickupKind::Shield);
    apply_pickup(&mut state, PickupKind::Shield);
    assert_eq!(state.avatar.shield, ShieldLevel::Enhanced);

    // Dive into the ground three times, then a fourth
    for remaining in [2, 1, 0] {
        state.avatar.pos.y = state.ground_y();
        state.update(FRAME);
        assert_eq!(state.status, SessionStatus::Playing);
        assert_eq!(state.avatar.shield_hits, remaining);
    }
    state.avatar.pos.y = state.ground_y();
    state.update(FRAME);
    assert_eq!(state.status, SessionStatus::GameOver);
}

#[test]
fn full_session_feeds_progression() {
    let mut state = start(Difficulty::Hard.profile(), 11);
    for _ in 0..60 * 60 {
        if state.status != SessionStatus::Playing {
            break;
        }
        state.update(FRAME);
    }
    assert_eq!(state.status, SessionStatus::GameOver);

    let events = state.drain_events();
    assert_eq!(events.first(), Some(&GameEvent::Started));
    let Some(GameEvent::GameOver(from_event)) = events.last().copied() else {
        panic!("last event should be game over, got {:?}", events.last());
    };
    let summary = state.take_summary().expect("summary");
    assert_eq!(summary, from_event);

    let mut progress = Progress::new();
    let outcome = progress.record_session(Difficulty::Hard, &summary, 0.0);
    assert_eq!(progress.achievements.games_played, 1);
    assert_eq!(outcome.rank.is_some(), summary.final_score > 0);

    let reloaded = Progress::from_json(&progress.to_json().expect("json")).expect("parse");
    assert_eq!(reloaded, progress);
}

#[test]
fn reset_returns_to_idle_snapshot() {
    let fresh = GameState::new(Difficulty::Crazy.profile(), 9).snapshot();
    let mut state = start(Difficulty::Crazy.profile(), 9);
    for _ in 0..120 {
        state.update(FRAME);
    }
    state.reset();
    state.reset();
    assert_eq!(state.snapshot(), fresh);
    assert!(matches!(
        state.snapshot().sprites.last().map(|s| s.kind),
        Some(SpriteKind::Avatar { .. })
    ));
}
