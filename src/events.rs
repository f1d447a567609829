//! Observable side effects of a frame.
//!
//! `tick` returns these instead of calling into audio or storage, so the
//! simulation stays a plain function of (state, input, clock, rng).

use crate::entities::{Difficulty, EnemyKind, PowerUpKind};
use crate::sound::SoundKind;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RunStarted { difficulty: Difficulty },
    Shot { bullets: usize },
    EnemyHit { id: u32, kind: EnemyKind },
    EnemyKilled { id: u32, kind: EnemyKind, points: u32 },
    ShieldAbsorbed { shield_left: u8 },
    PlayerDamaged { lives_left: u32 },
    PowerUpCollected { kind: PowerUpKind, level: u8 },
    WaveCleared { wave: u32, bonus: u32 },
    BossAppeared { wave: u32 },
    RewardWaveStarted { wave: u32 },
    GameOver { score: u32, wave: u32, difficulty: Difficulty },
}

impl GameEvent {
    /// The sound cue for this event, if it has one.
    pub fn sound(&self) -> Option<SoundKind> {
        match self {
            GameEvent::Shot { .. } => Some(SoundKind::Shoot),
            GameEvent::EnemyHit { .. } => Some(SoundKind::Hit),
            GameEvent::EnemyKilled { kind: EnemyKind::Boss, .. } => Some(SoundKind::Victory),
            GameEvent::EnemyKilled { .. } => Some(SoundKind::Explode),
            GameEvent::PlayerDamaged { .. } => Some(SoundKind::Damage),
            GameEvent::PowerUpCollected { .. } => Some(SoundKind::PowerUp),
            GameEvent::WaveCleared { .. } => Some(SoundKind::Wave),
            GameEvent::BossAppeared { .. } => Some(SoundKind::Boss),
            GameEvent::GameOver { .. } => Some(SoundKind::GameOver),
            GameEvent::RunStarted { .. }
            | GameEvent::ShieldAbsorbed { .. }
            | GameEvent::RewardWaveStarted { .. } => None,
        }
    }
}
