//! Compliance Runner: a wave-based terminal shooter.
//!
//! The library holds the whole game minus the terminal: entity model,
//! simulation, generators, input sampling, sound, persistence and the
//! scorecard export. The binary in `main.rs` wires it to crossterm.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod events;
pub mod formation;
pub mod input;
pub mod menu;
pub mod patterns;
pub mod schedule;
pub mod scorecard;
pub mod session;
pub mod sound;
pub mod storage;
pub mod tuning;
