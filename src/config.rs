//! Command-line and environment configuration.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::entities::Difficulty;

pub const ENV_DATA_DIR: &str = "COMPLIANCE_RUNNER_DATA_DIR";
pub const ENV_VOLUME: &str = "COMPLIANCE_RUNNER_VOLUME";
pub const DATA_DIR_NAME: &str = ".compliance_runner";
pub const LOG_FILE_NAME: &str = "compliance_runner.log";
pub const DEFAULT_LOG_FILTER: &str = "compliance_runner=info";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "compliance_runner")]
#[command(about = "Survive waves of compliance-themed enemies in your terminal")]
pub struct Args {
    /// Directory for high scores, settings, logs and exported scorecards
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file (defaults to <data dir>/compliance_runner.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start with sound muted (not persisted)
    #[arg(long)]
    pub mute: bool,

    /// Sound volume for this session, 0.0 to 1.0
    #[arg(long)]
    pub volume: Option<f32>,

    /// Difficulty highlighted when the difficulty menu opens
    #[arg(long, default_value = "normal")]
    pub difficulty: String,

    /// Seed the game RNG for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Resolved settings, after environment overrides and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub mute: bool,
    pub volume: Option<f32>,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let data_dir = args
            .data_dir
            .or_else(|| read_env_path(ENV_DATA_DIR))
            .unwrap_or_else(default_data_dir);
        let log_file = args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        let volume = args
            .volume
            .and_then(|v| validate_volume("--volume", v))
            .or_else(|| read_env_volume(ENV_VOLUME));

        Config {
            data_dir,
            log_file,
            mute: args.mute,
            volume,
            difficulty: Difficulty::from_name(&args.difficulty),
            seed: args.seed,
        }
    }
}

/// `$HOME/.compliance_runner`, or `./.compliance_runner` without a home.
pub fn default_data_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DATA_DIR_NAME)
}

pub(crate) fn read_env_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn read_env_volume(name: &str) -> Option<f32> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<f32>() {
        Ok(value) => validate_volume(name, value),
        Err(_) => {
            warn!("{} ({:?}) is not a number. Ignoring it.", name, raw);
            None
        }
    }
}

fn validate_volume(source: &str, value: f32) -> Option<f32> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Some(value)
    } else {
        warn!("{} ({}) is outside 0.0..=1.0. Ignoring it.", source, value);
        None
    }
}
