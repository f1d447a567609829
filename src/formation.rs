//! Wave content generators: formations, the mission catalog and the wave
//! modifier policy.
//!
//! Counts and positions are pure functions of the wave number and slot index.
//! Randomness only enters through archetype / mission / stage selection.

use std::f32::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{EnemyKind, MovePattern, WaveModifier};
use crate::tuning::{BOSS_WAVE_INTERVAL, GAME_WIDTH};

// ── Formations ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Archetype {
    VShape,
    Wave,
    Ring,
    Zigzag,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [Archetype::VShape, Archetype::Wave, Archetype::Ring, Archetype::Zigzag];

    /// Largest formation this archetype ever produces.
    pub fn cap(self) -> usize {
        match self {
            Archetype::VShape => 7,
            Archetype::Wave => 10,
            Archetype::Ring => 8,
            Archetype::Zigzag => 6,
        }
    }

    /// Enemy count for a wave; non-decreasing in `wave`, never above `cap()`.
    pub fn count(self, wave: u32) -> usize {
        let grown = match self {
            Archetype::VShape => 3 + wave as usize / 2,
            Archetype::Wave => 4 + (wave as f32 * 0.8).floor() as usize,
            Archetype::Ring => 4 + wave as usize / 2,
            Archetype::Zigzag => 2 + wave as usize / 2,
        };
        grown.min(self.cap())
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::VShape => "V-Formation",
            Archetype::Wave => "Wave",
            Archetype::Ring => "Circle",
            Archetype::Zigzag => "Zigzag",
        }
    }
}

/// One enemy slot in a formation, before it is turned into a live enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationSlot {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub pattern: MovePattern,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub archetype: Archetype,
    pub slots: Vec<FormationSlot>,
}

impl Formation {
    pub fn name(&self) -> &'static str {
        self.archetype.name()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Pick a random archetype and lay it out for `wave`.
pub fn create_formation(wave: u32, rng: &mut impl Rng) -> Formation {
    let archetype = Archetype::ALL[rng.gen_range(0..Archetype::ALL.len())];
    formation_for(archetype, wave)
}

/// Deterministic layout of one archetype.
pub fn formation_for(archetype: Archetype, wave: u32) -> Formation {
    let count = archetype.count(wave);
    let slots = (0..count).map(|i| slot(archetype, i, count)).collect();
    Formation { archetype, slots }
}

fn slot(archetype: Archetype, i: usize, count: usize) -> FormationSlot {
    let fi = i as f32;
    let fc = count as f32;
    match archetype {
        Archetype::VShape => {
            let mid = count / 2;
            let row = i.abs_diff(mid);
            let kind = if i == mid { EnemyKind::Threat } else { EnemyKind::Risk };
            FormationSlot {
                x: GAME_WIDTH / 2.0 + (fi - fc / 2.0) * 65.0,
                y: -50.0 - row as f32 * 45.0,
                kind,
                pattern: MovePattern::Swoop,
            }
        }
        Archetype::Wave => FormationSlot {
            x: 60.0 + fi * (GAME_WIDTH - 120.0) / fc,
            y: -50.0 - (i % 2) as f32 * 35.0,
            kind: match i % 3 {
                0 => EnemyKind::Threat,
                1 => EnemyKind::Vulnerability,
                _ => EnemyKind::Risk,
            },
            pattern: MovePattern::Dive,
        },
        Archetype::Ring => {
            let angle = fi / fc * PI * 2.0;
            FormationSlot {
                x: GAME_WIDTH / 2.0 + angle.cos() * 110.0,
                y: -100.0 + angle.sin() * 50.0,
                kind: if i % 2 == 0 { EnemyKind::Vulnerability } else { EnemyKind::Risk },
                pattern: MovePattern::Circle,
            }
        }
        Archetype::Zigzag => FormationSlot {
            x: 120.0 + fi * (GAME_WIDTH - 240.0) / (fc - 1.0).max(1.0),
            y: -50.0 - fi * 25.0,
            kind: EnemyKind::Threat,
            pattern: MovePattern::Zigzag,
        },
    }
}

// ── Mission catalog ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyGroup {
    pub kind: EnemyKind,
    pub count: u32,
    pub pattern: MovePattern,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MissionStage {
    pub name: &'static str,
    pub groups: &'static [EnemyGroup],
    /// Boss stages carry a fixed boss health base instead of enemy groups.
    pub boss_health: Option<u32>,
}

impl MissionStage {
    pub fn is_boss(&self) -> bool {
        self.boss_health.is_some()
    }

    pub fn enemy_count(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mission {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub stages: &'static [MissionStage],
}

const fn group(kind: EnemyKind, count: u32, pattern: MovePattern) -> EnemyGroup {
    EnemyGroup { kind, count, pattern }
}

const fn stage(name: &'static str, groups: &'static [EnemyGroup]) -> MissionStage {
    MissionStage { name, groups, boss_health: None }
}

const fn boss_stage(name: &'static str, health: u32) -> MissionStage {
    MissionStage { name, groups: &[], boss_health: Some(health) }
}

use EnemyKind::{Risk, Threat, Vulnerability};
use MovePattern::{Circle, Dive, Swoop, Zigzag};

pub static MISSIONS: [Mission; 3] = [
    Mission {
        id: "iso27001",
        name: "ISO 27001",
        description: "Information Security Audit",
        stages: &[
            stage("Scope Definition", &[group(Risk, 5, Swoop)]),
            stage("Risk Assessment", &[group(Risk, 4, Dive), group(Vulnerability, 3, Zigzag)]),
            stage("Control Selection", &[group(Threat, 3, Circle), group(Vulnerability, 4, Swoop)]),
            stage("Implementation Review", &[group(Threat, 5, Zigzag), group(Risk, 3, Dive)]),
            boss_stage("The Certification Audit", 30),
        ],
    },
    Mission {
        id: "dora",
        name: "DORA",
        description: "Digital Operational Resilience",
        stages: &[
            stage("ICT Risk Management", &[group(Risk, 4, Swoop)]),
            stage("Incident Reporting", &[group(Vulnerability, 5, Dive)]),
            stage("Resilience Testing", &[group(Threat, 3, Zigzag), group(Risk, 3, Circle)]),
            stage("Third-Party Risk", &[group(Vulnerability, 4, Swoop), group(Threat, 2, Dive)]),
            stage("Information Sharing", &[group(Risk, 6, Zigzag)]),
            stage("Governance Review", &[group(Threat, 4, Circle), group(Vulnerability, 3, Swoop)]),
            stage("Compliance Verification", &[group(Threat, 5, Dive), group(Risk, 4, Zigzag)]),
            boss_stage("The Supervisory Exam", 45),
        ],
    },
    Mission {
        id: "nis2",
        name: "NIS2",
        description: "Network & Information Security",
        stages: &[
            stage("Asset Inventory", &[group(Risk, 5, Swoop)]),
            stage("Supply Chain Audit", &[group(Vulnerability, 4, Dive), group(Risk, 3, Zigzag)]),
            stage("Access Controls", &[group(Threat, 4, Circle)]),
            stage("Encryption Review", &[group(Vulnerability, 5, Swoop), group(Threat, 2, Dive)]),
            stage("Incident Response", &[group(Risk, 4, Zigzag), group(Vulnerability, 4, Circle)]),
            stage("Business Continuity", &[group(Threat, 5, Swoop), group(Risk, 3, Dive)]),
            stage("Vulnerability Mgmt", &[group(Vulnerability, 6, Zigzag), group(Threat, 2, Circle)]),
            stage(
                "Cross-Border Ops",
                &[group(Threat, 4, Dive), group(Risk, 4, Swoop), group(Vulnerability, 3, Zigzag)],
            ),
            stage("Reporting Obligations", &[group(Threat, 6, Circle), group(Vulnerability, 4, Dive)]),
            boss_stage("The EU Regulator", 60),
        ],
    },
];

/// Grid position of the `index`-th enemy of a mission stage: rows of eight.
pub fn mission_slot_position(index: usize) -> (f32, f32) {
    let spread = GAME_WIDTH - 120.0;
    let x = 60.0 + (index % 8) as f32 * (spread / 8.0);
    let y = -50.0 - (index / 8) as f32 * 45.0;
    (x, y)
}

// ── Wave modifiers ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ModifierPick {
    pub modifier: Option<WaveModifier>,
    pub label: String,
    pub stage: Option<&'static MissionStage>,
}

impl ModifierPick {
    fn plain() -> Self {
        ModifierPick { modifier: None, label: String::new(), stage: None }
    }
}

/// Modifier for a wave. Boss waves and the first two waves never get one;
/// beyond that a 7-wave cycle places shadow audits on 3, mission stages on 5
/// and (past wave 8) boss rushes on 6.
pub fn pick_wave_modifier(wave: u32, rng: &mut impl Rng) -> ModifierPick {
    if wave % BOSS_WAVE_INTERVAL == 0 || wave <= 2 {
        return ModifierPick::plain();
    }
    match wave % 7 {
        3 => ModifierPick {
            modifier: Some(WaveModifier::ShadowAudit),
            label: "SHADOW AUDIT".to_string(),
            stage: None,
        },
        5 => {
            let Some(mission) = MISSIONS.choose(rng) else {
                return ModifierPick::plain();
            };
            let regular: Vec<&'static MissionStage> =
                mission.stages.iter().filter(|s| !s.is_boss()).collect();
            match regular.choose(rng) {
                Some(stage) => ModifierPick {
                    modifier: Some(WaveModifier::MissionStage),
                    label: format!("{}: {}", mission.name, stage.name),
                    stage: Some(*stage),
                },
                None => ModifierPick::plain(),
            }
        }
        6 if wave > 8 => ModifierPick {
            modifier: Some(WaveModifier::BossRush),
            label: "BOSS RUSH".to_string(),
            stage: None,
        },
        _ => ModifierPick::plain(),
    }
}
