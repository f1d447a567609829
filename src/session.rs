//! The mount point: one `Session` owns the run state, the sound engine, the
//! score store and the RNG, and is driven by the frame loop.
//!
//! The host feeds it commands (menu keys, clicks, text for the share prompt)
//! and one `FrameInput` per frame together with a millisecond clock. It never
//! reads a real clock itself.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::compute;
use crate::entities::{Difficulty, GameStatus, RunState};
use crate::events::GameEvent;
use crate::input::{FrameInput, HitBoxes};
use crate::menu::{self, ClickOutcome};
use crate::scorecard::{export_scorecard, Scorecard, MAX_NAME_LEN};
use crate::sound::{SoundEngine, SoundKind};
use crate::storage::{ScoreStore, SoundSettings};

pub const VOLUME_STEP: f32 = 0.1;

/// Discrete, non-movement inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    /// Enter / Space: menu select, or leave the game-over screen.
    Confirm,
    /// Escape on the menu; closes the share prompt.
    Back,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    TestSound,
    /// Open the share prompt on the game-over screen.
    Share,
}

#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    pub data_dir: PathBuf,
    pub mute: bool,
    pub volume: Option<f32>,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
}

pub struct Session {
    state: RunState,
    sound: SoundEngine,
    store: ScoreStore,
    rng: StdRng,
    data_dir: PathBuf,
    hit_boxes: HitBoxes,
    /// Nickname being typed while the share prompt is open.
    share_name: Option<String>,
    last_export: Option<PathBuf>,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        let store = ScoreStore::in_dir(&options.data_dir);
        let saved = store.load_sound_settings();
        let mut sound = SoundEngine::new(saved.enabled && !options.mute, saved.volume);
        if let Some(volume) = options.volume {
            sound.set_volume(volume);
        }

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = compute::new_state();
        state.difficulty = options.difficulty;
        state.high_score = store.load_high_score(options.difficulty);
        state.best_overall = store.load_legacy_high_score().max(state.high_score);

        Session {
            state,
            sound,
            store,
            rng,
            data_dir: options.data_dir,
            hit_boxes: HitBoxes::default(),
            share_name: None,
            last_export: None,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Direct access for hosts and tests that set up a scripted position.
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn sound(&self) -> &SoundEngine {
        &self.sound
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn share_prompt(&self) -> Option<&str> {
        self.share_name.as_deref()
    }

    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    /// Hit-boxes recorded by the renderer for the frame just drawn.
    pub fn set_hit_boxes(&mut self, boxes: HitBoxes) {
        self.hit_boxes = boxes;
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    pub fn frame(&mut self, input: &FrameInput, now: u64) -> Vec<GameEvent> {
        let events = compute::tick(&mut self.state, input, now, &mut self.rng);
        self.dispatch(&events);
        events
    }

    pub fn start_run(&mut self, difficulty: Difficulty, now: u64) -> Vec<GameEvent> {
        let high_score = self.store.load_high_score(difficulty);
        self.share_name = None;
        self.last_export = None;
        let events = compute::start_game(&mut self.state, difficulty, high_score, now, &mut self.rng);
        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(kind) = event.sound() {
                self.sound.play(kind);
            }
            if let GameEvent::GameOver { score, wave, difficulty } = *event {
                if self.store.save_high_score_if_better(difficulty, score) {
                    info!(score, wave, ?difficulty, "new high score");
                }
            }
        }
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn command(&mut self, command: Command, now: u64) {
        match command {
            Command::ToggleMute => {
                self.sound.set_enabled(!self.sound.enabled());
                self.persist_sound();
                return;
            }
            Command::VolumeUp | Command::VolumeDown => {
                let step = if command == Command::VolumeUp { VOLUME_STEP } else { -VOLUME_STEP };
                self.sound.set_volume(self.sound.volume() + step);
                self.persist_sound();
                self.sound.play(SoundKind::Shoot);
                return;
            }
            Command::TestSound => {
                self.sound.play(SoundKind::PowerUp);
                return;
            }
            _ => {}
        }

        if self.share_name.is_some() {
            match command {
                Command::Confirm => {
                    self.confirm_share();
                }
                Command::Back => self.share_name = None,
                _ => {}
            }
            return;
        }

        match self.state.status {
            GameStatus::Idle => match command {
                Command::Up => menu::cursor_up(&mut self.state.menu),
                Command::Down => menu::cursor_down(&mut self.state.menu),
                Command::Confirm => {
                    if let Some(difficulty) = menu::select(&mut self.state.menu, self.state.difficulty) {
                        self.start_run(difficulty, now);
                    }
                }
                Command::Back => menu::back(&mut self.state.menu),
                _ => {}
            },
            GameStatus::GameOver => match command {
                Command::Confirm => {
                    menu::return_to_menu(&mut self.state, now);
                }
                Command::Share if menu::can_restart(&self.state, now) => {
                    self.share_name = Some(String::new());
                }
                _ => {}
            },
            GameStatus::Playing => {}
        }
    }

    pub fn click(&mut self, x: f32, y: f32, now: u64) -> ClickOutcome {
        if self.share_name.is_some() {
            return ClickOutcome::Ignored;
        }
        let outcome = menu::click(&mut self.state, &self.hit_boxes, x, y, now);
        match outcome {
            ClickOutcome::Start(difficulty) => {
                self.start_run(difficulty, now);
            }
            ClickOutcome::OpenShare => self.share_name = Some(String::new()),
            _ => {}
        }
        outcome
    }

    // ── Share prompt ─────────────────────────────────────────────────────────

    pub fn share_type(&mut self, ch: char) {
        if let Some(name) = self.share_name.as_mut() {
            if !ch.is_control() && name.chars().count() < MAX_NAME_LEN {
                name.push(ch);
            }
        }
    }

    pub fn share_backspace(&mut self) {
        if let Some(name) = self.share_name.as_mut() {
            name.pop();
        }
    }

    /// Write the scorecard for the finished run and close the prompt.
    pub fn confirm_share(&mut self) -> Option<PathBuf> {
        let name = self.share_name.take()?;
        let card = self.scorecard(&name);
        match export_scorecard(&self.data_dir, &card) {
            Ok(path) => {
                info!(path = %path.display(), "scorecard exported");
                self.last_export = Some(path.clone());
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "scorecard export failed");
                None
            }
        }
    }

    pub fn scorecard(&self, name: &str) -> Scorecard {
        let mut card = Scorecard::new(name, self.state.score, self.state.wave, self.state.difficulty);
        card.new_high_score = self.state.score > 0 && self.state.score >= self.state.high_score;
        card
    }

    fn persist_sound(&self) {
        self.store.save_sound_settings(SoundSettings {
            enabled: self.sound.enabled(),
            volume: self.sound.volume(),
        });
    }
}
