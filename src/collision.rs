//! Axis-aligned bounding boxes for every entity that takes part in a hit test.

use crate::entities::{Bullet, Enemy, EnemyKind, Finding, Player, PowerUp};
use crate::tuning::{
    BOSS_SCALE, BULLET_HEIGHT, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH, FINDING_SIZE,
    PLAYER_HEIGHT, PLAYER_WIDTH, POWER_UP_SIZE,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Inclusive point test, used for clicks on UI hit-boxes.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Sprite size of an enemy; bosses are scaled up.
pub fn enemy_size(kind: EnemyKind) -> (f32, f32) {
    if kind == EnemyKind::Boss {
        (ENEMY_WIDTH * BOSS_SCALE, ENEMY_HEIGHT * BOSS_SCALE)
    } else {
        (ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

pub fn player_box(player: &Player) -> Rect {
    Rect::new(player.x, player.y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

pub fn enemy_box(enemy: &Enemy) -> Rect {
    let (w, h) = enemy_size(enemy.kind);
    Rect::new(enemy.x, enemy.y, w, h)
}

pub fn bullet_box(bullet: &Bullet) -> Rect {
    Rect::new(bullet.x, bullet.y, BULLET_WIDTH, BULLET_HEIGHT)
}

pub fn finding_box(finding: &Finding) -> Rect {
    Rect::new(finding.x, finding.y, FINDING_SIZE, FINDING_SIZE)
}

pub fn power_up_box(power_up: &PowerUp) -> Rect {
    Rect::new(power_up.x, power_up.y, POWER_UP_SIZE, POWER_UP_SIZE)
}
