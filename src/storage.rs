//! Local key-value persistence: per-difficulty high scores, the legacy
//! aggregate high score and the sound settings record.
//!
//! Everything lives in one JSON object on disk (`scores.json` in the data
//! directory), keyed by stable namespaced keys. The game-facing helpers never
//! fail: unreadable storage reads as defaults and write errors are logged and
//! dropped.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::entities::Difficulty;
use crate::sound::DEFAULT_VOLUME;

pub const STORE_FILE: &str = "scores.json";
pub const KEY_PREFIX: &str = "compliance-runner";
pub const LEGACY_HIGH_SCORE_KEY: &str = "compliance-runner.highscore";
pub const SOUND_SETTINGS_KEY: &str = "compliance-runner.sound";

pub fn high_score_key(difficulty: Difficulty) -> String {
    format!("{KEY_PREFIX}.hs.{}", difficulty.key())
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    /// The file parsed, but not as a JSON object.
    NotAnObject { path: PathBuf },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "store I/O error at {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "store at {} is not valid JSON: {source}", path.display())
            }
            Self::NotAnObject { path } => {
                write!(f, "store at {} is not a JSON object", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NotAnObject { .. } => None,
        }
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        SoundSettings { enabled: true, volume: DEFAULT_VOLUME }
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// A store backed by `<dir>/scores.json`. Nothing is touched until the
    /// first read or write.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        ScoreStore { path: dir.as_ref().join(STORE_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries. A missing file is an empty store.
    pub fn read_all(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };
        let value: Value = serde_json::from_str(&text)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(StoreError::NotAnObject { path: self.path.clone() }),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Read-modify-write of the whole file. Writes go to a sibling temp file
    /// first, then rename over the store.
    pub fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        for (key, value) in entries {
            all.insert((*key).to_string(), value.clone());
        }
        let io_err = |source: io::Error| StoreError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let text = serde_json::to_string_pretty(&all)
            .map_err(|source| StoreError::Json { path: self.path.clone(), source })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    // ── Game-facing helpers (infallible) ─────────────────────────────────────

    /// Best score for `difficulty`; 0 when missing or unreadable.
    pub fn load_high_score(&self, difficulty: Difficulty) -> u32 {
        self.read_score(&high_score_key(difficulty))
    }

    pub fn load_legacy_high_score(&self) -> u32 {
        self.read_score(LEGACY_HIGH_SCORE_KEY)
    }

    /// Persist `score` for `difficulty` (and the legacy aggregate) if it beats
    /// the stored value. Returns whether the per-difficulty slot improved.
    /// Never lowers a stored value.
    pub fn save_high_score_if_better(&self, difficulty: Difficulty, score: u32) -> bool {
        let all = match self.read_all() {
            Ok(all) => all,
            Err(e) => {
                warn!(error = %e, "high score not saved: store unreadable");
                return false;
            }
        };
        let key = high_score_key(difficulty);
        let current = all.get(&key).and_then(score_value).unwrap_or(0);
        let legacy = all.get(LEGACY_HIGH_SCORE_KEY).and_then(score_value).unwrap_or(0);

        let mut updates: Vec<(&str, Value)> = Vec::with_capacity(2);
        if score > current {
            updates.push((key.as_str(), Value::from(score)));
        }
        if score > legacy {
            updates.push((LEGACY_HIGH_SCORE_KEY, Value::from(score)));
        }
        if updates.is_empty() {
            return false;
        }
        match self.set_many(&updates) {
            Ok(()) => score > current,
            Err(e) => {
                warn!(error = %e, "high score not saved");
                false
            }
        }
    }

    pub fn load_sound_settings(&self) -> SoundSettings {
        let stored = match self.get(SOUND_SETTINGS_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "sound settings unreadable; using defaults");
                None
            }
        };
        let mut settings: SoundSettings = stored
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        if !settings.volume.is_finite() {
            settings.volume = DEFAULT_VOLUME;
        }
        settings.volume = settings.volume.clamp(0.0, 1.0);
        settings
    }

    pub fn save_sound_settings(&self, settings: SoundSettings) {
        let value = match serde_json::to_value(settings) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "sound settings not saved");
                return;
            }
        };
        if let Err(e) = self.set(SOUND_SETTINGS_KEY, value) {
            warn!(error = %e, "sound settings not saved");
        }
    }

    fn read_score(&self, key: &str) -> u32 {
        match self.get(key) {
            Ok(value) => value.as_ref().and_then(score_value).unwrap_or(0),
            Err(e) => {
                warn!(error = %e, key, "high score unreadable; using 0");
                0
            }
        }
    }
}

/// Scores are stored as numbers; strings of digits are accepted too.
fn score_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n.min(u32::MAX as u64) as u32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
