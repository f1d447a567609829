//! All game entity types: pure data, no simulation logic.

use crate::schedule::SpawnQueue;
use crate::tuning::{PLAYER_START_X, PLAYER_Y, STARTING_LIVES};

// ── Enumerations ─────────────────────────────────────────────────────────────

/// Enemy class, weakest first. `Risk` is the weak grunt, `Threat` the tough one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Risk,
    Vulnerability,
    Threat,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePattern {
    /// Descend to a cruising altitude, then drift in a sine.
    Swoop,
    /// Fast drop, slow wobbling mid-band, then pull back up.
    Dive,
    /// Orbit the playfield centre.
    Circle,
    /// Constant descent with a horizontal sine; wraps to the top.
    Zigzag,
    /// Descend to an anchor, then sweep and attack.
    Boss,
}

/// Cosmetic subtype of a falling hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FindingKind {
    Gap,
    Incident,
    Finding,
}

impl FindingKind {
    pub const ALL: [FindingKind; 3] = [FindingKind::Gap, FindingKind::Incident, FindingKind::Finding];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Each level absorbs one hit.
    Shield,
    /// Each level shortens the fire cooldown.
    RapidFire,
    /// Level N fires 2N+1 bullets per shot.
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::RapidFire, PowerUpKind::MultiShot];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Menu index → difficulty; anything out of range falls back to `Normal`.
    pub fn from_index(index: usize) -> Difficulty {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Parse a user-supplied name; unknown names fall back to `Normal`.
    pub fn from_name(name: &str) -> Difficulty {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }

    /// Stable lowercase key used for persistence.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Difficulty,
}

/// A named rule altering how a wave spawns or looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveModifier {
    /// Visibility shrinks to a halo around the player.
    ShadowAudit,
    /// Enemies come from a scripted mission stage.
    MissionStage,
    /// A mid-strength boss replaces the formation.
    BossRush,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Left edge of the ship.
    pub x: f32,
    /// Top edge of the ship (constant).
    pub y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Player { x: PLAYER_START_X, y: PLAYER_Y }
    }
}

// ── Enemies & projectiles ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub pattern: MovePattern,
    /// Seconds since this enemy started its pattern.
    pub pattern_time: f32,
    pub start_x: f32,
    pub start_y: f32,
    /// Orbit angle (circle pattern only).
    pub angle: f32,
    pub speed: f32,
    /// Boss only: reached its anchor altitude and is attacking.
    pub anchored: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Radians off vertical; zero for the centre shot.
    pub angle: f32,
}

/// A falling hazard dropped by enemies.
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub kind: FindingKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Visual-only debris. Never read by gameplay.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// 1.0 at birth, pruned at 0.
    pub life: f32,
    pub color: [u8; 3],
    pub size: f32,
}

// ── Power-up stacks ──────────────────────────────────────────────────────────

/// One stacking power-up: level 0..=5 and the wall-clock expiry in ms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerStack {
    pub level: u8,
    pub expires_at: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Powers {
    pub shield: PowerStack,
    pub rapid: PowerStack,
    pub multi: PowerStack,
}

impl Powers {
    pub fn get(&self, kind: PowerUpKind) -> &PowerStack {
        match kind {
            PowerUpKind::Shield => &self.shield,
            PowerUpKind::RapidFire => &self.rapid,
            PowerUpKind::MultiShot => &self.multi,
        }
    }

    pub fn get_mut(&mut self, kind: PowerUpKind) -> &mut PowerStack {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::RapidFire => &mut self.rapid,
            PowerUpKind::MultiShot => &mut self.multi,
        }
    }
}

// ── Menu ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuState {
    pub screen: MenuScreen,
    pub cursor: usize,
}

impl Default for MenuState {
    fn default() -> Self {
        MenuState { screen: MenuScreen::Main, cursor: 0 }
    }
}

// ── Id counters ──────────────────────────────────────────────────────────────

/// Monotonic id sources; never reset, so ids stay unique across runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdCounters {
    pub enemy: u32,
    pub bullet: u32,
    pub finding: u32,
    pub power_up: u32,
}

impl IdCounters {
    pub fn next_enemy(&mut self) -> u32 {
        let id = self.enemy;
        self.enemy += 1;
        id
    }

    pub fn next_bullet(&mut self) -> u32 {
        let id = self.bullet;
        self.bullet += 1;
        id
    }

    pub fn next_finding(&mut self) -> u32 {
        let id = self.finding;
        self.finding += 1;
        id
    }

    pub fn next_power_up(&mut self) -> u32 {
        let id = self.power_up;
        self.power_up += 1;
        id
    }
}

// ── Master run state ─────────────────────────────────────────────────────────

/// The entire game state, owned by the frame loop.
#[derive(Clone, Debug)]
pub struct RunState {
    pub status: GameStatus,
    pub menu: MenuState,
    pub difficulty: Difficulty,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub findings: Vec<Finding>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,

    pub score: u32,
    /// Best score for the active difficulty, loaded at run start.
    pub high_score: u32,
    /// Best score across every difficulty, shown on the main menu.
    pub best_overall: u32,
    pub lives: u32,
    pub wave: u32,
    pub powers: Powers,

    pub boss_wave: bool,
    pub wave_spawned: u32,
    pub wave_killed: u32,
    pub wave_target: u32,
    pub modifier: Option<WaveModifier>,
    /// HUD text for the active modifier, e.g. "DORA: Incident Reporting".
    pub modifier_label: String,
    /// Set while a post-boss reward wave is raining power-ups.
    pub reward_wave_until: Option<u64>,
    /// Halo radius drawn during shadow-audit waves.
    pub darkness_radius: f32,

    pub invincible_until: u64,
    pub game_over_at: u64,
    pub last_shot_at: Option<u64>,

    pub frame: u64,
    /// Bumped on every run start; deferred spawns from older runs are dropped.
    pub run_id: u64,
    pub schedule: SpawnQueue,
    pub ids: IdCounters,
}

impl Default for RunState {
    fn default() -> Self {
        RunState {
            status: GameStatus::Idle,
            menu: MenuState::default(),
            difficulty: Difficulty::Normal,
            player: Player::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            findings: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            best_overall: 0,
            lives: STARTING_LIVES,
            wave: 1,
            powers: Powers::default(),
            boss_wave: false,
            wave_spawned: 0,
            wave_killed: 0,
            wave_target: 0,
            modifier: None,
            modifier_label: String::new(),
            reward_wave_until: None,
            darkness_radius: 130.0,
            invincible_until: 0,
            game_over_at: 0,
            last_shot_at: None,
            frame: 0,
            run_id: 0,
            schedule: SpawnQueue::default(),
            ids: IdCounters::default(),
        }
    }
}

impl RunState {
    pub fn is_invincible(&self, now: u64) -> bool {
        now < self.invincible_until
    }

    pub fn reward_wave_active(&self) -> bool {
        self.reward_wave_until.is_some()
    }
}
