//! Enemy movement patterns.
//!
//! One pure step per `MovePattern` variant. Each step advances the pattern
//! clock by one frame and returns the enemy at its new position; nothing here
//! touches randomness or the rest of the run.

use crate::entities::{Enemy, MovePattern};
use crate::tuning::{GAME_WIDTH, PATTERN_DT};

const SWOOP_ALTITUDE: f32 = 120.0;
const DIVE_FAST_UNTIL: f32 = 80.0;
const DIVE_SLOW_UNTIL: f32 = 350.0;
const CIRCLE_CENTER_Y: f32 = 140.0;
const ZIGZAG_WRAP_Y: f32 = 420.0;
const ZIGZAG_RESTART_Y: f32 = -50.0;
const BOSS_DESCENT_SPEED: f32 = 0.8;
/// Boss sweep centre (left edge of a boss sprite centred on the field).
pub const BOSS_HOME_X: f32 = GAME_WIDTH / 2.0 - 50.0;
pub const BOSS_ANCHOR_Y: f32 = 60.0;

/// Advance `enemy` by one frame of its movement pattern.
pub fn advance(enemy: &Enemy, wave: u32) -> Enemy {
    let mut next = enemy.clone();
    next.pattern_time += PATTERN_DT;
    match next.pattern {
        MovePattern::Swoop => swoop(&mut next),
        MovePattern::Dive => dive(&mut next),
        MovePattern::Circle => circle(&mut next, wave),
        MovePattern::Zigzag => zigzag(&mut next),
        MovePattern::Boss => boss(&mut next, wave),
    }
    next
}

/// Bosses only drop findings once they have settled into their sweep.
pub fn is_attacking(enemy: &Enemy) -> bool {
    enemy.pattern == MovePattern::Boss && enemy.anchored
}

fn swoop(e: &mut Enemy) {
    let t = e.pattern_time;
    if e.y < SWOOP_ALTITUDE {
        e.y += e.speed * 1.2;
    } else {
        e.x = e.start_x + (t * 1.2).sin() * 60.0;
        e.y = SWOOP_ALTITUDE + (t * 0.8).sin() * 25.0;
    }
}

fn dive(e: &mut Enemy) {
    let t = e.pattern_time;
    if e.y < DIVE_FAST_UNTIL {
        e.y += e.speed * 1.5;
    } else if e.y < DIVE_SLOW_UNTIL {
        e.y += e.speed * 0.6;
        e.x += (t * 2.0).sin() * 1.5;
    } else {
        e.y -= e.speed * 0.4;
        e.start_y = e.y;
    }
}

fn circle(e: &mut Enemy, wave: u32) {
    let t = e.pattern_time;
    e.angle += 0.012 + wave as f32 * 0.001;
    let phase = e.angle + e.id as f32 * 0.5;
    let radius = 140.0 + (t * 0.5).sin() * 20.0;
    e.x = GAME_WIDTH / 2.0 + phase.cos() * radius;
    e.y = CIRCLE_CENTER_Y + phase.sin() * 60.0;
}

fn zigzag(e: &mut Enemy) {
    e.y += e.speed * 0.5;
    e.x = e.start_x + (e.pattern_time * 2.5).sin() * 80.0;
    if e.y > ZIGZAG_WRAP_Y {
        e.y = ZIGZAG_RESTART_Y;
        e.pattern_time = 0.0;
    }
}

fn boss(e: &mut Enemy, wave: u32) {
    if !e.anchored && e.y < e.start_y {
        e.y += BOSS_DESCENT_SPEED;
        return;
    }
    e.anchored = true;
    let sweep = 0.4 + wave as f32 * 0.03;
    let t = e.pattern_time;
    e.x = BOSS_HOME_X + (t * sweep).sin() * 180.0;
    e.y = e.start_y + (t * sweep * 0.6).sin() * 25.0;
}
