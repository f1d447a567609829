//! Deferred spawns on a virtual clock.
//!
//! Staggered formation entries, reward-wave drops and the delayed start of a
//! post-boss wave are queued here instead of running on real timers. The
//! simulation drains due entries once per tick, and every entry carries the
//! run and wave it was scheduled for, so a restart or a wave change turns
//! stale entries into no-ops.

use crate::entities::{EnemyKind, MovePattern, PowerUpKind, WaveModifier};
use crate::formation::MissionStage;

/// What a due entry does once released.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    /// Put one enemy on the field.
    Enemy {
        x: f32,
        y: f32,
        start_y: f32,
        kind: EnemyKind,
        pattern: MovePattern,
    },
    /// Drop one reward-wave power-up.
    PowerUp { x: f32, y: f32, kind: PowerUpKind },
    /// Spawn the content of a wave whose start was postponed.
    WaveContent {
        modifier: Option<WaveModifier>,
        stage: Option<&'static MissionStage>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledSpawn {
    pub due_at: u64,
    pub run_id: u64,
    pub wave: u32,
    pub action: Deferred,
}

impl ScheduledSpawn {
    /// Validity predicate checked at release time.
    pub fn is_current(&self, run_id: u64, wave: u32) -> bool {
        self.run_id == run_id && self.wave == wave
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnQueue {
    entries: Vec<ScheduledSpawn>,
}

impl SpawnQueue {
    pub fn push(&mut self, entry: ScheduledSpawn) {
        self.entries.push(entry);
    }

    /// Remove and return every entry due at `now`, oldest deadline first.
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledSpawn> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due_at <= now);
        self.entries = pending;
        due.sort_by_key(|e| e.due_at);
        due
    }

    /// Enemies (or whole waves) still waiting to arrive.
    pub fn pending_enemies(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.action, Deferred::Enemy { .. } | Deferred::WaveContent { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
