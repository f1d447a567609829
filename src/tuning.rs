//! Tuning values: geometry, speeds, timers, drop chances, score table.
//!
//! Everything here is a knob. The simulation only relies on the orderings
//! documented next to each group.

use crate::entities::{Difficulty, EnemyKind, PowerUpKind};

// ── Playfield & sprite geometry (logical pixels) ─────────────────────────────

pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 600.0;

pub const PLAYER_WIDTH: f32 = 56.0;
pub const PLAYER_HEIGHT: f32 = 42.0;
/// Top edge of the player sprite; the ship never moves vertically.
pub const PLAYER_Y: f32 = GAME_HEIGHT - 65.0;
pub const PLAYER_START_X: f32 = GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 36.0;
pub const BOSS_SCALE: f32 = 2.5;

pub const BULLET_WIDTH: f32 = 6.0;
pub const BULLET_HEIGHT: f32 = 14.0;
/// Muzzle height: bullets appear slightly above the ship's nose.
pub const BULLET_SPAWN_Y: f32 = GAME_HEIGHT - 70.0;

pub const FINDING_SIZE: f32 = 16.0;
pub const POWER_UP_SIZE: f32 = 24.0;

// ── Per-frame motion ─────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 5.0;
pub const BULLET_SPEED: f32 = 12.0;
pub const POWER_UP_FALL_SPEED: f32 = 2.0;
/// Pattern clock advance per frame (seconds at 60 FPS).
pub const PATTERN_DT: f32 = 0.016;

// ── Weapons ──────────────────────────────────────────────────────────────────

pub const MAX_POWER_LEVEL: u8 = 5;
/// Milliseconds between shots, indexed by rapid-fire level 0..=5.
/// Strictly decreasing; the last entry is the floor.
pub const RAPID_FIRE_RATES: [u64; 6] = [200, 150, 120, 90, 70, 50];
/// Angle step (radians) between successive multi-shot pairs.
pub const SPREAD_STEP: f32 = 0.12;
/// Horizontal muzzle offset between successive multi-shot pairs.
pub const SPREAD_OFFSET: f32 = 6.0;

// ── Timers (milliseconds) ────────────────────────────────────────────────────

pub const POWER_UP_DURATION_MS: f64 = 8000.0;
pub const INVINCIBILITY_MS: u64 = 1500;
pub const RESTART_COOLDOWN_MS: u64 = 2000;
pub const SPAWN_STAGGER_MS: u64 = 150;
pub const REWARD_WAVE_MS: u64 = 3000;
pub const REWARD_DROP_STAGGER_MS: u64 = 300;
pub const REWARD_DROP_COUNT: usize = 8;
/// Delay before the wave after a boss spawns its enemies (after the reward wave).
pub const POST_REWARD_SPAWN_MS: u64 = 3200;

// ── Run ──────────────────────────────────────────────────────────────────────

pub const STARTING_LIVES: u32 = 3;
pub const WAVE_CLEAR_BONUS: u32 = 100;
pub const BOSS_WAVE_INTERVAL: u32 = 5;
/// Reinforcements only arrive from this wave onwards.
pub const REINFORCE_FROM_WAVE: u32 = 3;
/// Reinforce when fewer than this many enemies are alive (or pending).
pub const REINFORCE_BELOW_LIVE: usize = 2;
/// …and more than this many kills are still required.
pub const REINFORCE_REMAINING_KILLS: i64 = 3;

// ── Drops ────────────────────────────────────────────────────────────────────

pub const ENEMY_FINDING_BASE_CHANCE: f64 = 0.001;
pub const ENEMY_FINDING_WAVE_CHANCE: f64 = 0.0003;
pub const BOSS_FINDING_BASE_CHANCE: f64 = 0.008;
pub const BOSS_FINDING_WAVE_CHANCE: f64 = 0.002;
pub const POWER_UP_DROP_CHANCE: f64 = 0.1;

// ── Particles ────────────────────────────────────────────────────────────────

pub const HIT_PARTICLES: usize = 5;
pub const DEATH_PARTICLES: usize = 15;
pub const DAMAGE_PARTICLES: usize = 15;
pub const PARTICLE_DECAY: f32 = 0.02;
pub const PARTICLE_GRAVITY: f32 = 0.1;

// ── Difficulty table ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyConfig {
    pub label: &'static str,
    pub speed_mult: f32,
    pub health_mult: f32,
    pub drop_mult: f64,
    pub power_up_duration_mult: f64,
}

pub fn difficulty_config(difficulty: Difficulty) -> DifficultyConfig {
    match difficulty {
        Difficulty::Easy => DifficultyConfig {
            label: "EASY",
            speed_mult: 0.7,
            health_mult: 0.8,
            drop_mult: 0.7,
            power_up_duration_mult: 1.3,
        },
        Difficulty::Normal => DifficultyConfig {
            label: "NORMAL",
            speed_mult: 1.0,
            health_mult: 1.0,
            drop_mult: 1.0,
            power_up_duration_mult: 1.0,
        },
        Difficulty::Hard => DifficultyConfig {
            label: "HARD",
            speed_mult: 1.4,
            health_mult: 1.5,
            drop_mult: 1.3,
            power_up_duration_mult: 0.7,
        },
    }
}

// ── Deterministic scaling formulas ───────────────────────────────────────────

/// Score awarded per enemy destroyed. Boss > threat > vulnerability > risk.
pub fn score_for(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Boss => 500,
        EnemyKind::Threat => 30,
        EnemyKind::Vulnerability => 20,
        EnemyKind::Risk => 10,
    }
}

pub fn wave_clear_bonus(wave: u32) -> u32 {
    WAVE_CLEAR_BONUS * wave
}

/// Health of a regular (non-boss) enemy; never below 1.
pub fn enemy_health(kind: EnemyKind, difficulty: Difficulty) -> i32 {
    let base = if kind == EnemyKind::Threat { 2.0 } else { 1.0 };
    let scaled = (base * difficulty_config(difficulty).health_mult).round() as i32;
    scaled.max(1)
}

/// Boss health for a wave; `override_base` replaces the wave-scaled base.
pub fn boss_health(wave: u32, difficulty: Difficulty, override_base: Option<u32>) -> i32 {
    let base = override_base.unwrap_or(15 + wave * 3) as f32;
    ((base * difficulty_config(difficulty).health_mult).round() as i32).max(1)
}

/// Base health used by boss-rush waves.
pub fn boss_rush_health(wave: u32) -> u32 {
    20 + (wave / 5) * 8
}

pub fn enemy_speed(wave: u32, difficulty: Difficulty) -> f32 {
    (0.5 + wave as f32 * 0.08) * difficulty_config(difficulty).speed_mult
}

pub fn boss_speed(wave: u32, difficulty: Difficulty) -> f32 {
    (0.8 + wave as f32 * 0.05) * difficulty_config(difficulty).speed_mult
}

/// Milliseconds between shots at a given rapid-fire level (clamped to 0..=5).
pub fn fire_cooldown_ms(rapid_level: u8) -> u64 {
    RAPID_FIRE_RATES[rapid_level.min(MAX_POWER_LEVEL) as usize]
}

pub fn power_up_duration_ms(difficulty: Difficulty) -> u64 {
    (POWER_UP_DURATION_MS * difficulty_config(difficulty).power_up_duration_mult).round() as u64
}

/// Per-frame chance that a living regular enemy drops a finding.
pub fn enemy_finding_chance(wave: u32, difficulty: Difficulty) -> f64 {
    (ENEMY_FINDING_BASE_CHANCE + wave as f64 * ENEMY_FINDING_WAVE_CHANCE)
        * difficulty_config(difficulty).drop_mult
}

/// Per-frame chance that an anchored boss drops a finding.
pub fn boss_finding_chance(wave: u32, difficulty: Difficulty) -> f64 {
    (BOSS_FINDING_BASE_CHANCE + wave as f64 * BOSS_FINDING_WAVE_CHANCE)
        * difficulty_config(difficulty).drop_mult
}

pub fn power_up_drop_chance(kind: EnemyKind) -> f64 {
    if kind == EnemyKind::Boss {
        1.0
    } else {
        POWER_UP_DROP_CHANCE
    }
}

// ── Palette (RGB) ────────────────────────────────────────────────────────────

pub const COLOR_BACKGROUND: [u8; 3] = [0x0a, 0x19, 0x29];
pub const COLOR_BACKGROUND_MID: [u8; 3] = [0x0f, 0x26, 0x3e];
pub const COLOR_BACKGROUND_LIGHT: [u8; 3] = [0x1a, 0x3a, 0x5c];
pub const COLOR_ACCENT: [u8; 3] = [0x22, 0xd3, 0xee];
pub const COLOR_FINDING: [u8; 3] = [0xfb, 0xbf, 0x24];
pub const COLOR_RAPID: [u8; 3] = [0x22, 0xc5, 0x5e];
pub const COLOR_TEXT: [u8; 3] = [0xff, 0xff, 0xff];
pub const COLOR_TEXT_MUTED: [u8; 3] = [0x94, 0xa3, 0xb8];
pub const COLOR_DAMAGE: [u8; 3] = [0xef, 0x44, 0x44];

pub fn enemy_color(kind: EnemyKind) -> [u8; 3] {
    match kind {
        EnemyKind::Threat => [0xa8, 0x55, 0xf7],
        EnemyKind::Vulnerability => [0xf9, 0x73, 0x16],
        EnemyKind::Risk => [0xef, 0x44, 0x44],
        EnemyKind::Boss => [0xec, 0x48, 0x99],
    }
}

pub fn power_up_color(kind: PowerUpKind) -> [u8; 3] {
    match kind {
        PowerUpKind::Shield => COLOR_ACCENT,
        PowerUpKind::RapidFire => COLOR_RAPID,
        PowerUpKind::MultiShot => [0xa8, 0x55, 0xf7],
    }
}
