//! Input sampling.
//!
//! Event handlers only ever record intent here (held keys, touch zones); the
//! frame loop samples one `FrameInput` per tick. The module also owns the
//! mapping between terminal cells and the logical playfield, and the UI
//! hit-boxes the renderer records for pointer clicks.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::collision::Rect;
use crate::entities::{GameStatus, MenuScreen};
use crate::session::Command;
use crate::tuning::{GAME_HEIGHT, GAME_WIDTH};

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Covers terminals that never report key releases: OS key-repeat
/// (≥ 15 Hz) refreshes the key well before 8 frames (≈ 133 ms at 60 FPS).
pub const HOLD_WINDOW: u64 = 8;

pub const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
pub const SHOOT_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

// ── Keyboard ─────────────────────────────────────────────────────────────────

/// Maps each held key to the frame it was last seen (press or repeat).
#[derive(Clone, Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    /// Record a press or repeat.
    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(code, frame);
    }

    /// Keyboard-enhanced terminals report releases; drop the key at once.
    pub fn release(&mut self, code: &KeyCode) {
        self.key_frame.remove(code);
    }

    pub fn is_held(&self, code: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(code)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|c| self.is_held(c, frame))
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
    }
}

/// What a discrete key press asks for outside the share prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Command(Command),
}

/// Discrete key bindings. Letters match in either case; `s` moves the menu
/// cursor while idle and opens the share prompt elsewhere. Escape backs out of
/// the difficulty screen and quits from everywhere else.
pub fn key_action(code: KeyCode, status: GameStatus, screen: MenuScreen) -> Option<KeyAction> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(KeyAction::Quit),
        KeyCode::Esc => {
            if status == GameStatus::Idle && screen == MenuScreen::Difficulty {
                Command::Back
            } else {
                return Some(KeyAction::Quit);
            }
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') if status == GameStatus::Idle => Command::Down,
        KeyCode::Char('s') | KeyCode::Char('S') => Command::Share,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Char(' ') if status != GameStatus::Playing => Command::Confirm,
        KeyCode::Char('m') | KeyCode::Char('M') => Command::ToggleMute,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::VolumeUp,
        KeyCode::Char('-') | KeyCode::Char('_') => Command::VolumeDown,
        KeyCode::Char('t') | KeyCode::Char('T') => Command::TestSound,
        _ => return None,
    };
    Some(KeyAction::Command(command))
}

// ── Touch / pointer zones ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchZone {
    Left,
    Shoot,
    Right,
}

/// Left third moves left, right third moves right, the middle shoots.
pub fn zone_at(x: f32) -> TouchZone {
    if x < GAME_WIDTH / 3.0 {
        TouchZone::Left
    } else if x > GAME_WIDTH * 2.0 / 3.0 {
        TouchZone::Right
    } else {
        TouchZone::Shoot
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchZones {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl TouchZones {
    /// A press (or drag) at logical `x` replaces the active zone.
    pub fn press_at(&mut self, x: f32) {
        *self = TouchZones::default();
        self.set(zone_at(x), true);
    }

    pub fn set(&mut self, zone: TouchZone, down: bool) {
        match zone {
            TouchZone::Left => self.left = down,
            TouchZone::Right => self.right = down,
            TouchZone::Shoot => self.shoot = down,
        }
    }

    pub fn release_all(&mut self) {
        *self = TouchZones::default();
    }
}

// ── Per-frame intent ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// Union of keyboard and touch intent for one frame.
pub fn sample(keys: &KeyTracker, touch: &TouchZones, frame: u64) -> FrameInput {
    FrameInput {
        left: keys.any_held(&LEFT_KEYS, frame) || touch.left,
        right: keys.any_held(&RIGHT_KEYS, frame) || touch.right,
        shoot: keys.any_held(&SHOOT_KEYS, frame) || touch.shoot,
    }
}

// ── Viewport ─────────────────────────────────────────────────────────────────

/// Current canvas size in terminal cells.
///
/// Row 0 is the HUD, row 1 and `rows - 2` are borders, `rows - 1` is the
/// hint line; the playfield fills the rest, inside the side walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn field_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn field_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Logical point → cell, or `None` when it lies outside the playfield.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..GAME_WIDTH).contains(&x) || !(0.0..GAME_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / GAME_WIDTH * self.field_cols()) as u16;
        let row = 2 + (y / GAME_HEIGHT * self.field_rows()) as u16;
        Some((col, row))
    }

    /// Cell → logical point at the cell's centre. Cells outside the field
    /// clamp to its edge.
    pub fn to_logical(&self, col: u16, row: u16) -> (f32, f32) {
        let fc = (col.saturating_sub(1) as f32 + 0.5).min(self.field_cols());
        let fr = (row.saturating_sub(2) as f32 + 0.5).min(self.field_rows());
        (fc / self.field_cols() * GAME_WIDTH, fr / self.field_rows() * GAME_HEIGHT)
    }

    /// Width of one cell in logical pixels.
    pub fn cell_width(&self) -> f32 {
        GAME_WIDTH / self.field_cols()
    }

    pub fn cell_height(&self) -> f32 {
        GAME_HEIGHT / self.field_rows()
    }
}

// ── UI hit-boxes ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiTarget {
    MenuItem(usize),
    ShareButton,
}

/// Clickable areas drawn by the last render pass, in logical coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitBoxes {
    pub menu_items: Vec<Rect>,
    pub share_button: Option<Rect>,
}

impl HitBoxes {
    pub fn target_at(&self, x: f32, y: f32) -> Option<UiTarget> {
        if let Some(index) = self.menu_items.iter().position(|r| r.contains(x, y)) {
            return Some(UiTarget::MenuItem(index));
        }
        match self.share_button {
            Some(rect) if rect.contains(x, y) => Some(UiTarget::ShareButton),
            _ => None,
        }
    }
}
