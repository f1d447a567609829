use compliance_runner::collision::Rect;
use compliance_runner::entities::*;
use compliance_runner::input::HitBoxes;
use compliance_runner::menu::*;
use compliance_runner::tuning::RESTART_COOLDOWN_MS;

fn game_over_at(at: u64) -> RunState {
    RunState {
        status: GameStatus::GameOver,
        game_over_at: at,
        ..RunState::default()
    }
}

fn three_items() -> HitBoxes {
    HitBoxes {
        menu_items: vec![
            Rect::new(300.0, 200.0, 200.0, 30.0),
            Rect::new(300.0, 250.0, 200.0, 30.0),
            Rect::new(300.0, 300.0, 200.0, 30.0),
        ],
        share_button: None,
    }
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[test]
fn cursor_wraps_on_difficulty_screen() {
    let mut menu = MenuState { screen: MenuScreen::Difficulty, cursor: 0 };
    cursor_up(&mut menu);
    assert_eq!(menu.cursor, 2);
    cursor_down(&mut menu);
    assert_eq!(menu.cursor, 0);
    cursor_down(&mut menu);
    assert_eq!(menu.cursor, 1);
}

#[test]
fn main_screen_has_one_item() {
    let mut menu = MenuState::default();
    cursor_down(&mut menu);
    assert_eq!(menu.cursor, 0);
    cursor_up(&mut menu);
    assert_eq!(menu.cursor, 0);
}

#[test]
fn out_of_range_cursor_is_pulled_back() {
    let mut menu = MenuState { screen: MenuScreen::Difficulty, cursor: 9 };
    cursor_down(&mut menu);
    assert!(menu.cursor < item_count(MenuScreen::Difficulty));
    let mut menu = MenuState { screen: MenuScreen::Difficulty, cursor: 9 };
    assert_eq!(select(&mut menu, Difficulty::Easy), Some(Difficulty::Normal));
}

#[test]
fn select_walks_main_then_difficulty() {
    let mut menu = MenuState::default();
    assert_eq!(select(&mut menu, Difficulty::Hard), None);
    assert_eq!(menu.screen, MenuScreen::Difficulty);
    assert_eq!(menu.cursor, Difficulty::Hard.index());
    cursor_up(&mut menu);
    assert_eq!(select(&mut menu, Difficulty::Hard), Some(Difficulty::Normal));
}

#[test]
fn back_returns_to_main() {
    let mut menu = MenuState { screen: MenuScreen::Difficulty, cursor: 2 };
    back(&mut menu);
    assert_eq!(menu, MenuState::default());
    back(&mut menu);
    assert_eq!(menu, MenuState::default());
}

// ── Restart gating ────────────────────────────────────────────────────────────

#[test]
fn restart_blocked_during_cooldown() {
    let mut s = game_over_at(10_000);
    assert!(!can_restart(&s, 10_000 + RESTART_COOLDOWN_MS - 1));
    assert_eq!(restart_remaining_ms(&s, 10_500), RESTART_COOLDOWN_MS - 500);
    assert!(!return_to_menu(&mut s, 11_000));
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn restart_allowed_after_cooldown() {
    let mut s = game_over_at(10_000);
    s.menu = MenuState { screen: MenuScreen::Difficulty, cursor: 2 };
    assert!(can_restart(&s, 10_000 + RESTART_COOLDOWN_MS));
    assert_eq!(restart_remaining_ms(&s, 20_000), 0);
    assert!(return_to_menu(&mut s, 12_000));
    assert_eq!(s.status, GameStatus::Idle);
    assert_eq!(s.menu, MenuState::default());
}

#[test]
fn cannot_restart_while_playing() {
    let s = RunState { status: GameStatus::Playing, ..RunState::default() };
    assert!(!can_restart(&s, u64::MAX));
}

// ── Clicks ────────────────────────────────────────────────────────────────────

#[test]
fn click_on_main_item_navigates() {
    let mut s = RunState { difficulty: Difficulty::Easy, ..RunState::default() };
    let boxes = HitBoxes { menu_items: vec![Rect::new(300.0, 250.0, 200.0, 30.0)], share_button: None };
    assert_eq!(click(&mut s, &boxes, 400.0, 260.0, 0), ClickOutcome::Navigated);
    assert_eq!(s.menu.screen, MenuScreen::Difficulty);
    assert_eq!(s.menu.cursor, 0);
}

#[test]
fn click_on_difficulty_item_starts() {
    let mut s = RunState {
        menu: MenuState { screen: MenuScreen::Difficulty, cursor: 1 },
        ..RunState::default()
    };
    assert_eq!(click(&mut s, &three_items(), 310.0, 310.0, 0), ClickOutcome::Start(Difficulty::Hard));
    assert_eq!(click(&mut s, &three_items(), 10.0, 10.0, 0), ClickOutcome::Ignored);
}

#[test]
fn click_during_play_is_ignored() {
    let mut s = RunState { status: GameStatus::Playing, ..RunState::default() };
    assert_eq!(click(&mut s, &three_items(), 310.0, 210.0, 0), ClickOutcome::Ignored);
}

#[test]
fn game_over_click_respects_cooldown_and_share_button() {
    let boxes = HitBoxes { menu_items: Vec::new(), share_button: Some(Rect::new(350.0, 400.0, 100.0, 30.0)) };
    let mut s = game_over_at(0);
    assert_eq!(click(&mut s, &boxes, 400.0, 410.0, 1_000), ClickOutcome::Ignored);
    assert_eq!(click(&mut s, &boxes, 400.0, 410.0, 2_000), ClickOutcome::OpenShare);
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(click(&mut s, &boxes, 10.0, 10.0, 2_000), ClickOutcome::ReturnedToMenu);
    assert_eq!(s.status, GameStatus::Idle);
}
