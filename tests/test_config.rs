use std::path::PathBuf;

use clap::Parser;
use compliance_runner::config::*;
use compliance_runner::entities::Difficulty;

#[test]
fn defaults_from_command_line() {
    let args = Args::parse_from(["compliance_runner", "--data-dir", "/tmp/cr"]);
    let config = Config::from_args(args);
    assert_eq!(config.data_dir, PathBuf::from("/tmp/cr"));
    assert_eq!(config.log_file, PathBuf::from("/tmp/cr").join(LOG_FILE_NAME));
    assert_eq!(config.difficulty, Difficulty::Normal);
    assert!(!config.mute);
    assert_eq!(config.seed, None);
}

#[test]
fn explicit_flags() {
    let args = Args::parse_from([
        "compliance_runner",
        "--data-dir",
        "/tmp/cr",
        "--log-file",
        "/tmp/run.log",
        "--mute",
        "--volume",
        "0.25",
        "--difficulty",
        "hard",
        "--seed",
        "12",
    ]);
    let config = Config::from_args(args);
    assert_eq!(config.log_file, PathBuf::from("/tmp/run.log"));
    assert!(config.mute);
    assert_eq!(config.volume, Some(0.25));
    assert_eq!(config.difficulty, Difficulty::Hard);
    assert_eq!(config.seed, Some(12));
}

#[test]
fn unknown_difficulty_falls_back_to_normal() {
    let args = Args::parse_from(["compliance_runner", "--data-dir", ".", "--difficulty", "insane"]);
    assert_eq!(Config::from_args(args).difficulty, Difficulty::Normal);
}

#[test]
fn out_of_range_volume_is_ignored() {
    let args = Args { data_dir: Some(PathBuf::from(".")), volume: Some(7.5), ..Args::default() };
    let config = Config::from_args(args);
    if std::env::var(ENV_VOLUME).is_err() {
        assert_eq!(config.volume, None);
    }
}

#[test]
fn default_data_dir_is_named() {
    assert!(default_data_dir().ends_with(DATA_DIR_NAME));
}
