//! Idle-screen menu navigation and game-over gating.
//!
//! The menu is two screens: `Main` (a single "start" entry) and
//! `Difficulty` (easy / normal / hard). The cursor always stays inside the
//! current screen's item range.

use crate::entities::{Difficulty, GameStatus, MenuScreen, MenuState, RunState};
use crate::input::{HitBoxes, UiTarget};
use crate::tuning::RESTART_COOLDOWN_MS;

pub fn item_count(screen: MenuScreen) -> usize {
    match screen {
        MenuScreen::Main => 1,
        MenuScreen::Difficulty => Difficulty::ALL.len(),
    }
}

pub fn cursor_up(menu: &mut MenuState) {
    let n = item_count(menu.screen);
    menu.cursor = (menu.cursor.min(n - 1) + n - 1) % n;
}

pub fn cursor_down(menu: &mut MenuState) {
    let n = item_count(menu.screen);
    menu.cursor = (menu.cursor.min(n - 1) + 1) % n;
}

/// Confirm the highlighted entry. From the main screen this opens the
/// difficulty screen with `preferred` highlighted; on the difficulty screen
/// it returns the difficulty to start (out-of-range cursors mean `Normal`).
pub fn select(menu: &mut MenuState, preferred: Difficulty) -> Option<Difficulty> {
    match menu.screen {
        MenuScreen::Main => {
            menu.screen = MenuScreen::Difficulty;
            menu.cursor = preferred.index();
            None
        }
        MenuScreen::Difficulty => Some(Difficulty::from_index(menu.cursor)),
    }
}

/// Escape: difficulty screen → main screen. No-op on the main screen.
pub fn back(menu: &mut MenuState) {
    if menu.screen == MenuScreen::Difficulty {
        *menu = MenuState::default();
    }
}

/// True once the post-game-over cooldown has elapsed.
pub fn can_restart(state: &RunState, now: u64) -> bool {
    state.status == GameStatus::GameOver
        && now.saturating_sub(state.game_over_at) >= RESTART_COOLDOWN_MS
}

/// Milliseconds left before a restart input is honoured.
pub fn restart_remaining_ms(state: &RunState, now: u64) -> u64 {
    RESTART_COOLDOWN_MS.saturating_sub(now.saturating_sub(state.game_over_at))
}

/// Game over → idle main menu, gated by the restart cooldown.
pub fn return_to_menu(state: &mut RunState, now: u64) -> bool {
    if !can_restart(state, now) {
        return false;
    }
    state.status = GameStatus::Idle;
    state.menu = MenuState::default();
    state.schedule.clear();
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// Moved to another menu screen.
    Navigated,
    Start(Difficulty),
    OpenShare,
    ReturnedToMenu,
}

/// Pointer click at logical (`x`, `y`) against the last frame's hit-boxes.
/// Clicks during play are ignored; so are clicks during the restart cooldown.
pub fn click(state: &mut RunState, boxes: &HitBoxes, x: f32, y: f32, now: u64) -> ClickOutcome {
    match state.status {
        GameStatus::Playing => ClickOutcome::Ignored,
        GameStatus::Idle => match boxes.target_at(x, y) {
            Some(UiTarget::MenuItem(index)) if index < item_count(state.menu.screen) => {
                state.menu.cursor = index;
                match select(&mut state.menu, state.difficulty) {
                    Some(difficulty) => ClickOutcome::Start(difficulty),
                    None => ClickOutcome::Navigated,
                }
            }
            _ => ClickOutcome::Ignored,
        },
        GameStatus::GameOver => {
            if !can_restart(state, now) {
                return ClickOutcome::Ignored;
            }
            if boxes.target_at(x, y) == Some(UiTarget::ShareButton) {
                return ClickOutcome::OpenShare;
            }
            return_to_menu(state, now);
            ClickOutcome::ReturnedToMenu
        }
    }
}
