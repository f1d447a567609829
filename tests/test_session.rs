use compliance_runner::collision::Rect;
use compliance_runner::entities::*;
use compliance_runner::events::GameEvent;
use compliance_runner::input::{FrameInput, HitBoxes};
use compliance_runner::menu::ClickOutcome;
use compliance_runner::session::*;
use compliance_runner::storage::{ScoreStore, SoundSettings};
use compliance_runner::tuning::RESTART_COOLDOWN_MS;

use tempfile::TempDir;

fn session_in(dir: &TempDir) -> Session {
    Session::new(SessionOptions {
        data_dir: dir.path().to_path_buf(),
        seed: Some(99),
        ..SessionOptions::default()
    })
}

/// Drop the player to one life with `score` on the board, then let a finding
/// land on the ship.
fn lose_last_life(session: &mut Session, score: u32, now: u64) -> Vec<GameEvent> {
    let state = session.state_mut();
    state.enemies.clear();
    state.schedule.clear();
    state.score = score;
    state.lives = 1;
    let (x, y) = (state.player.x + 10.0, state.player.y + 5.0);
    let id = state.ids.next_finding();
    state.findings.push(Finding { id, x, y, speed: 0.0, kind: FindingKind::Incident });
    session.frame(&FrameInput::default(), now)
}

#[test]
fn menu_flow_starts_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    assert_eq!(session.state().status, GameStatus::Idle);

    session.command(Command::Confirm, 0);
    assert_eq!(session.state().menu.screen, MenuScreen::Difficulty);
    assert_eq!(session.state().menu.cursor, Difficulty::Normal.index());

    session.command(Command::Down, 0);
    session.command(Command::Confirm, 0);
    assert_eq!(session.state().status, GameStatus::Playing);
    assert_eq!(session.state().difficulty, Difficulty::Hard);
}

#[test]
fn back_leaves_difficulty_screen() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.command(Command::Confirm, 0);
    session.command(Command::Back, 0);
    assert_eq!(session.state().menu, MenuState::default());
    assert_eq!(session.state().status, GameStatus::Idle);
}

#[test]
fn preferred_difficulty_is_preselected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(SessionOptions {
        data_dir: dir.path().to_path_buf(),
        difficulty: Difficulty::Easy,
        seed: Some(1),
        ..SessionOptions::default()
    });
    session.command(Command::Confirm, 0);
    assert_eq!(session.state().menu.cursor, Difficulty::Easy.index());
}

#[test]
fn game_over_persists_high_score() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Hard, 0);
    let events = lose_last_life(&mut session, 420, 100);

    assert!(events.contains(&GameEvent::GameOver { score: 420, wave: 1, difficulty: Difficulty::Hard }));
    assert_eq!(session.state().status, GameStatus::GameOver);
    let store = ScoreStore::in_dir(dir.path());
    assert_eq!(store.load_high_score(Difficulty::Hard), 420);
    assert_eq!(store.load_legacy_high_score(), 420);
    assert_eq!(store.load_high_score(Difficulty::Normal), 0);

    // A worse run never lowers it, and the next run starts from the stored best.
    session.command(Command::Confirm, 100 + RESTART_COOLDOWN_MS);
    session.start_run(Difficulty::Hard, 10_000);
    assert_eq!(session.state().high_score, 420);
    lose_last_life(&mut session, 100, 10_100);
    assert_eq!(store.load_high_score(Difficulty::Hard), 420);
}

#[test]
fn main_menu_carries_overall_best() {
    let dir = tempfile::tempdir().unwrap();
    ScoreStore::in_dir(dir.path()).save_high_score_if_better(Difficulty::Hard, 900);

    let mut session = session_in(&dir);
    assert_eq!(session.state().status, GameStatus::Idle);
    assert_eq!(session.state().high_score, 0); // normal has no record yet
    assert_eq!(session.state().best_overall, 900);

    // A normal run keeps the overall best and raises it once beaten.
    session.start_run(Difficulty::Normal, 0);
    assert_eq!(session.state().best_overall, 900);
    lose_last_life(&mut session, 1_200, 100);
    session.command(Command::Confirm, 100 + RESTART_COOLDOWN_MS);
    assert_eq!(session.state().menu, MenuState::default());
    assert_eq!(session.state().best_overall, 1_200);
    assert_eq!(session.store().load_legacy_high_score(), 1_200);

    let reopened = session_in(&dir);
    assert_eq!(reopened.state().best_overall, 1_200);
}

#[test]
fn restart_waits_for_cooldown() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Normal, 0);
    lose_last_life(&mut session, 0, 1_000);

    session.command(Command::Confirm, 1_000 + RESTART_COOLDOWN_MS - 1);
    assert_eq!(session.state().status, GameStatus::GameOver);
    session.command(Command::Confirm, 1_000 + RESTART_COOLDOWN_MS);
    assert_eq!(session.state().status, GameStatus::Idle);
    assert_eq!(session.state().menu, MenuState::default());
}

#[test]
fn share_flow_exports_scorecard() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Normal, 0);
    lose_last_life(&mut session, 4200, 500);

    session.command(Command::Share, 600); // still cooling down
    assert!(session.share_prompt().is_none());

    let ready = 500 + RESTART_COOLDOWN_MS;
    session.command(Command::Share, ready);
    assert_eq!(session.share_prompt(), Some(""));
    for ch in "ada".chars() {
        session.share_type(ch);
    }
    session.share_type('\n'); // control characters are ignored
    session.share_type('x');
    session.share_backspace();
    assert_eq!(session.share_prompt(), Some("ada"));

    // The prompt swallows Confirm; it must not leave the game-over screen.
    session.command(Command::Confirm, ready);
    assert!(session.share_prompt().is_none());
    assert_eq!(session.state().status, GameStatus::GameOver);

    let path = session.last_export().expect("scorecard written").to_path_buf();
    assert_eq!(path, dir.path().join("compliance-runner-4200-wave1.png"));
    assert!(path.exists());
    assert_eq!(session.scorecard("ada").name, "ADA");
    assert!(session.scorecard("ada").new_high_score);
}

#[test]
fn share_prompt_limits_name_length() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Normal, 0);
    lose_last_life(&mut session, 10, 0);
    session.command(Command::Share, RESTART_COOLDOWN_MS);
    for _ in 0..40 {
        session.share_type('z');
    }
    assert_eq!(session.share_prompt().map(|n| n.chars().count()), Some(16));
    session.command(Command::Back, RESTART_COOLDOWN_MS);
    assert!(session.share_prompt().is_none());
    assert!(session.last_export().is_none());
}

#[test]
fn click_share_button_opens_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Normal, 0);
    lose_last_life(&mut session, 10, 0);
    session.set_hit_boxes(HitBoxes {
        menu_items: Vec::new(),
        share_button: Some(Rect::new(300.0, 400.0, 200.0, 40.0)),
    });
    assert_eq!(session.click(400.0, 420.0, RESTART_COOLDOWN_MS), ClickOutcome::OpenShare);
    assert_eq!(session.share_prompt(), Some(""));
    assert_eq!(session.click(10.0, 10.0, RESTART_COOLDOWN_MS), ClickOutcome::Ignored);
}

#[test]
fn sound_settings_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.command(Command::ToggleMute, 0);
    assert!(!session.sound().enabled());
    session.command(Command::VolumeUp, 0);

    let stored = ScoreStore::in_dir(dir.path()).load_sound_settings();
    assert!(!stored.enabled);
    assert!((stored.volume - (0.3 + VOLUME_STEP)).abs() < 1e-6);

    let reopened = session_in(&dir);
    assert!(!reopened.sound().enabled());
}

#[test]
fn cli_overrides_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    ScoreStore::in_dir(dir.path()).save_sound_settings(SoundSettings { enabled: true, volume: 0.8 });
    let session = Session::new(SessionOptions {
        data_dir: dir.path().to_path_buf(),
        mute: true,
        volume: Some(0.1),
        ..SessionOptions::default()
    });
    assert!(!session.sound().enabled());
    assert!((session.sound().volume() - 0.1).abs() < 1e-6);
    let stored = session.store().load_sound_settings();
    assert_eq!(stored, SoundSettings { enabled: true, volume: 0.8 });
}

#[test]
fn muted_session_plays_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(SessionOptions {
        data_dir: dir.path().to_path_buf(),
        mute: true,
        seed: Some(3),
        ..SessionOptions::default()
    });
    session.start_run(Difficulty::Normal, 0);
    session.frame(&FrameInput { shoot: true, ..FrameInput::default() }, 16);
    assert_eq!(session.sound().played(), 0);
}

#[test]
fn events_trigger_cues() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session.start_run(Difficulty::Normal, 0);
    let events = session.frame(&FrameInput { shoot: true, ..FrameInput::default() }, 16);
    assert!(events.contains(&GameEvent::Shot { bullets: 1 }));
    assert!(session.sound().played() >= 1);
}
