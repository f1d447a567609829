//! Game-logic functions.
//!
//! Everything operates on one `RunState` passed by `&mut`, plus the frame's
//! input, a millisecond clock value and an injected RNG. Nothing here reads a
//! real clock, touches audio or storage: side effects come back to the caller
//! as `GameEvent`s.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{bullet_box, enemy_box, enemy_size, finding_box, player_box, power_up_box};
use crate::entities::{
    Bullet, Difficulty, Enemy, EnemyKind, Finding, FindingKind, GameStatus, MovePattern, Particle,
    Player, PowerUp, PowerUpKind, RunState, WaveModifier,
};
use crate::events::GameEvent;
use crate::formation::{create_formation, mission_slot_position, pick_wave_modifier, MissionStage};
use crate::input::FrameInput;
use crate::patterns::{self, BOSS_ANCHOR_Y, BOSS_HOME_X};
use crate::schedule::{Deferred, ScheduledSpawn};
use crate::tuning::{
    boss_finding_chance, boss_health, boss_rush_health, boss_speed, enemy_color, enemy_finding_chance,
    enemy_health, enemy_speed, fire_cooldown_ms, power_up_drop_chance, power_up_duration_ms,
    score_for, wave_clear_bonus, BOSS_WAVE_INTERVAL, BULLET_HEIGHT, BULLET_SPAWN_Y, BULLET_SPEED,
    BULLET_WIDTH, COLOR_ACCENT, COLOR_DAMAGE, DAMAGE_PARTICLES, DEATH_PARTICLES,
    ENEMY_HEIGHT, ENEMY_WIDTH, GAME_HEIGHT, GAME_WIDTH, HIT_PARTICLES, INVINCIBILITY_MS,
    MAX_POWER_LEVEL, PARTICLE_DECAY, PARTICLE_GRAVITY, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH,
    POST_REWARD_SPAWN_MS, POWER_UP_FALL_SPEED, REINFORCE_BELOW_LIVE, REINFORCE_FROM_WAVE,
    REINFORCE_REMAINING_KILLS, REWARD_DROP_COUNT, REWARD_DROP_STAGGER_MS, REWARD_WAVE_MS,
    SPAWN_STAGGER_MS, SPREAD_OFFSET, SPREAD_STEP, STARTING_LIVES,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Idle state shown before the first run.
pub fn new_state() -> RunState {
    RunState::default()
}

/// Reset `state` for a fresh run and queue the wave-1 formation.
///
/// Menu, id counters and the frame counter survive; everything else is
/// reinitialised. Bumping `run_id` invalidates any deferred spawn left over
/// from a previous run.
pub fn start_game(
    state: &mut RunState,
    difficulty: Difficulty,
    high_score: u32,
    now: u64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let run_id = state.run_id + 1;
    let fresh = RunState {
        status: GameStatus::Playing,
        menu: state.menu,
        difficulty,
        high_score,
        best_overall: state.best_overall.max(high_score),
        lives: STARTING_LIVES,
        wave: 1,
        frame: state.frame,
        run_id,
        ids: state.ids,
        ..RunState::default()
    };
    *state = fresh;

    let spawned = spawn_formation(state, now, rng);
    state.wave_target = spawned as u32;
    info!(?difficulty, run = run_id, high_score, "run started");
    vec![GameEvent::RunStarted { difficulty }]
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one frame of horizontal intent and clamp to the playfield.
pub fn move_player(state: &mut RunState, input: &FrameInput) {
    let mut x = state.player.x;
    if input.left {
        x -= PLAYER_SPEED;
    }
    if input.right {
        x += PLAYER_SPEED;
    }
    state.player.x = x.clamp(0.0, GAME_WIDTH - PLAYER_WIDTH);
}

/// Fire if the cooldown for the current rapid-fire level has elapsed.
/// Returns the number of bullets emitted (0 while cooling down).
pub fn player_shoot(state: &mut RunState, now: u64) -> usize {
    let cooldown = fire_cooldown_ms(state.powers.rapid.level);
    let ready = match state.last_shot_at {
        None => true,
        Some(at) => now.saturating_sub(at) > cooldown,
    };
    if !ready {
        return 0;
    }
    state.last_shot_at = Some(now);

    let x = state.player.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0;
    let y = BULLET_SPAWN_Y;
    let before = state.bullets.len();
    let id = state.ids.next_bullet();
    state.bullets.push(Bullet { id, x, y, angle: 0.0 });

    // Level N adds N symmetric pairs, each wider than the last.
    for pair in 1..=state.powers.multi.level.min(MAX_POWER_LEVEL) {
        let angle = SPREAD_STEP * pair as f32;
        let offset = SPREAD_OFFSET * pair as f32;
        let left = state.ids.next_bullet();
        state.bullets.push(Bullet { id: left, x: x - offset, y, angle: -angle });
        let right = state.ids.next_bullet();
        state.bullets.push(Bullet { id: right, x: x + offset, y, angle });
    }
    state.bullets.len() - before
}

/// Pick up one power-up: level +1 (capped) and expiry reset to now + duration.
pub fn collect_power_up(state: &mut RunState, kind: PowerUpKind, now: u64) -> u8 {
    let duration = power_up_duration_ms(state.difficulty);
    let stack = state.powers.get_mut(kind);
    stack.level = (stack.level + 1).min(MAX_POWER_LEVEL);
    stack.expires_at = now + duration;
    stack.level
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, or no lives left to take.
    Ignored,
    ShieldAbsorbed,
    LifeLost,
}

/// Shared damage rule for findings and enemy bodies. Shield charges take
/// precedence over lives; losing a life starts the invincibility window.
pub fn apply_damage(state: &mut RunState, now: u64) -> DamageOutcome {
    if state.is_invincible(now) {
        return DamageOutcome::Ignored;
    }
    if state.powers.shield.level > 0 {
        state.powers.shield.level -= 1;
        return DamageOutcome::ShieldAbsorbed;
    }
    if state.lives == 0 {
        return DamageOutcome::Ignored;
    }
    state.lives -= 1;
    state.invincible_until = now + INVINCIBILITY_MS;
    DamageOutcome::LifeLost
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &mut RunState, input: &FrameInput, now: u64, rng: &mut impl Rng) -> Vec<GameEvent> {
    state.frame += 1;
    match state.status {
        GameStatus::Playing => play_tick(state, input, now, rng),
        GameStatus::Idle | GameStatus::GameOver => {
            idle_tick(state);
            Vec::new()
        }
    }
}

/// Idle and game-over screens: only cosmetic particles keep moving.
pub fn idle_tick(state: &mut RunState) {
    advance_particles(state);
}

// ── Title screen ─────────────────────────────────────────────────────────────

/// Start point, kind and pattern of each enemy bobbing behind the menu.
const DEMO_LINEUP: [(f32, f32, EnemyKind, MovePattern); 3] = [
    (200.0, 120.0, EnemyKind::Threat, MovePattern::Swoop),
    (350.0, 140.0, EnemyKind::Vulnerability, MovePattern::Circle),
    (500.0, 120.0, EnemyKind::Risk, MovePattern::Zigzag),
];

/// The title-screen enemies posed for `frame`. They are purely cosmetic and
/// never enter `state.enemies`.
pub fn demo_enemies(frame: u64) -> [Enemy; 3] {
    let t = frame as f32;
    std::array::from_fn(|i| {
        let (start_x, start_y, kind, pattern) = DEMO_LINEUP[i];
        let id = i as u32 + 1;
        let phase = id as f32;
        let health = enemy_health(kind, Difficulty::Normal);
        Enemy {
            id,
            x: start_x + (t * 0.03 + phase).sin() * 30.0,
            y: start_y + (t * 0.02 + phase).cos() * 15.0,
            kind,
            health,
            max_health: health,
            pattern,
            pattern_time: t * 0.016,
            start_x,
            start_y,
            angle: 0.0,
            speed: 1.0,
            anchored: false,
        }
    })
}

/// Where the ship idles on the title screen.
pub fn demo_ship() -> Player {
    Player { x: GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, y: GAME_HEIGHT - 100.0 }
}

fn play_tick(state: &mut RunState, input: &FrameInput, now: u64, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // ── 0. Release deferred spawns that are due ──────────────────────────────
    release_due(state, now, rng, &mut events);

    // ── 1. Expire power-ups ──────────────────────────────────────────────────
    for kind in PowerUpKind::ALL {
        let stack = state.powers.get_mut(kind);
        if stack.level > 0 && now > stack.expires_at {
            stack.level = 0;
        }
    }

    // ── 2–3. Move & clamp the player ─────────────────────────────────────────
    move_player(state, input);

    // ── 4. Fire ──────────────────────────────────────────────────────────────
    if input.shoot {
        let bullets = player_shoot(state, now);
        if bullets > 0 {
            events.push(GameEvent::Shot { bullets });
        }
    }

    // ── 5. Move bullets ──────────────────────────────────────────────────────
    state.bullets.retain_mut(|b| {
        b.x += b.angle.sin() * BULLET_SPEED * 0.5;
        b.y -= BULLET_SPEED;
        b.y > -BULLET_HEIGHT && b.x > 0.0 && b.x < GAME_WIDTH
    });

    // ── 6. Move enemies, roll finding drops ──────────────────────────────────
    advance_enemies(state, rng);

    // ── 7. Move findings & power-ups ─────────────────────────────────────────
    state.findings.retain_mut(|f| {
        f.y += f.speed;
        f.y < GAME_HEIGHT + 20.0
    });
    state.power_ups.retain_mut(|p| {
        p.y += POWER_UP_FALL_SPEED;
        p.y < GAME_HEIGHT + 30.0
    });

    // ── 8. Particles ─────────────────────────────────────────────────────────
    advance_particles(state);
    if state.modifier == Some(WaveModifier::ShadowAudit) {
        state.darkness_radius = 120.0 + (state.frame as f32 * 0.03).sin() * 10.0;
    }

    // ── 9. Bullets ↔ enemies ─────────────────────────────────────────────────
    resolve_bullet_hits(state, rng, &mut events);

    // ── 10–11. Findings / enemy bodies ↔ player (one resolution per frame) ──
    resolve_player_damage(state, now, rng, &mut events);

    // ── 12. Power-up pickups ─────────────────────────────────────────────────
    let hull = player_box(&state.player);
    let (caught, falling): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| power_up_box(p).overlaps(&hull));
    state.power_ups = falling;
    for p in caught {
        let level = collect_power_up(state, p.kind, now);
        events.push(GameEvent::PowerUpCollected { kind: p.kind, level });
    }

    // ── 13. Reward wave expiry & wave completion ─────────────────────────────
    if let Some(until) = state.reward_wave_until {
        if now > until {
            state.reward_wave_until = None;
        }
    }
    if wave_complete(state) {
        advance_wave(state, now, rng, &mut events);
    }

    // ── 14. Mid-wave reinforcement ───────────────────────────────────────────
    if needs_reinforcement(state) {
        let added = spawn_formation(state, now, rng);
        debug!(wave = state.wave, added, "reinforcements queued");
    }

    // ── 15. Game over ────────────────────────────────────────────────────────
    if state.lives == 0 {
        end_run(state, now, &mut events);
    }

    events
}

// ── Movement helpers ─────────────────────────────────────────────────────────

fn advance_enemies(state: &mut RunState, rng: &mut impl Rng) {
    let wave = state.wave;
    let difficulty = state.difficulty;
    let enemy_chance = enemy_finding_chance(wave, difficulty);
    let boss_chance = boss_finding_chance(wave, difficulty);

    let mut drops: Vec<(f32, f32, f32)> = Vec::new();
    for enemy in state.enemies.iter_mut() {
        *enemy = patterns::advance(enemy, wave);
        if enemy.kind == EnemyKind::Boss {
            if patterns::is_attacking(enemy) && rng.gen::<f64>() < boss_chance {
                let x = enemy.x + 40.0 + rng.gen::<f32>() * 20.0;
                let speed = 1.5 + rng.gen::<f32>() + wave as f32 * 0.1;
                drops.push((x, enemy.y + 80.0, speed));
            }
        } else if rng.gen::<f64>() < enemy_chance {
            let speed = 1.2 + rng.gen::<f32>() * 0.8 + wave as f32 * 0.08;
            drops.push((enemy.x + ENEMY_WIDTH / 2.0, enemy.y + ENEMY_HEIGHT, speed));
        }
    }
    for (x, y, speed) in drops {
        let kind = FindingKind::ALL[rng.gen_range(0..FindingKind::ALL.len())];
        let id = state.ids.next_finding();
        state.findings.push(Finding { id, x, y, speed, kind });
    }
}

fn advance_particles(state: &mut RunState) {
    state.particles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= PARTICLE_DECAY;
        p.vy += PARTICLE_GRAVITY;
        p.life > 0.0
    });
}

fn burst(state: &mut RunState, x: f32, y: f32, color: [u8; 3], count: usize, speed: f32, rng: &mut impl Rng) {
    for _ in 0..count {
        state.particles.push(Particle {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * speed,
            vy: (rng.gen::<f32>() - 0.5) * speed,
            life: 1.0,
            color,
            size: rng.gen::<f32>() * 4.0 + 2.0,
        });
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Each bullet hits at most the first living enemy it overlaps. A kill is
/// scored and removed immediately, so no later bullet can score it again.
fn resolve_bullet_hits(state: &mut RunState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut surviving = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        let shot = bullet_box(&bullet);
        let target = state
            .enemies
            .iter()
            .position(|e| e.health > 0 && shot.overlaps(&enemy_box(e)));
        let Some(index) = target else {
            surviving.push(bullet);
            continue;
        };

        let enemy = &mut state.enemies[index];
        enemy.health -= 1;
        let (id, kind, health) = (enemy.id, enemy.kind, enemy.health);
        let (cx, cy) = enemy_box(enemy).center();
        events.push(GameEvent::EnemyHit { id, kind });
        burst(state, bullet.x, bullet.y, COLOR_ACCENT, HIT_PARTICLES, 4.0, rng);

        if health <= 0 {
            let dead = state.enemies.remove(index);
            kill_enemy(state, &dead, cx, cy, rng, events);
        }
    }
    state.bullets = surviving;
}

fn kill_enemy(
    state: &mut RunState,
    dead: &Enemy,
    cx: f32,
    cy: f32,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let points = score_for(dead.kind);
    state.score += points;
    state.wave_killed += 1;
    events.push(GameEvent::EnemyKilled { id: dead.id, kind: dead.kind, points });
    burst(state, cx, cy, enemy_color(dead.kind), DEATH_PARTICLES, 8.0, rng);

    if rng.gen::<f64>() < power_up_drop_chance(dead.kind) {
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        let id = state.ids.next_power_up();
        state.power_ups.push(PowerUp { id, x: cx - 12.0, y: cy, kind });
    }
    if dead.kind == EnemyKind::Boss {
        info!(wave = state.wave, "boss defeated");
    }
}

/// Findings touching the player are always consumed; the damage rule runs at
/// most once per frame across findings and enemy bodies together.
fn resolve_player_damage(state: &mut RunState, now: u64, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let hull = player_box(&state.player);
    let before = state.findings.len();
    state.findings.retain(|f| !finding_box(f).overlaps(&hull));
    let finding_contact = state.findings.len() < before;
    let body_contact = state.enemies.iter().any(|e| enemy_box(e).overlaps(&hull));

    if !finding_contact && !body_contact {
        return;
    }
    match apply_damage(state, now) {
        DamageOutcome::Ignored => {}
        DamageOutcome::ShieldAbsorbed => {
            events.push(GameEvent::ShieldAbsorbed { shield_left: state.powers.shield.level });
        }
        DamageOutcome::LifeLost => {
            let (cx, cy) = hull.center();
            burst(state, cx, cy, COLOR_DAMAGE, DAMAGE_PARTICLES, 6.0, rng);
            events.push(GameEvent::PlayerDamaged { lives_left: state.lives });
        }
    }
}

// ── Wave orchestration ───────────────────────────────────────────────────────

fn wave_complete(state: &RunState) -> bool {
    !state.reward_wave_active()
        && state.wave_target > 0
        && state.wave_killed >= state.wave_target
        && state.enemies.is_empty()
        && state.schedule.pending_enemies() == 0
}

fn needs_reinforcement(state: &RunState) -> bool {
    let scripted = matches!(
        state.modifier,
        Some(WaveModifier::MissionStage) | Some(WaveModifier::BossRush)
    );
    let live = state.enemies.len() + state.schedule.pending_enemies();
    let remaining = state.wave_target as i64 - state.wave_killed as i64;
    !state.boss_wave
        && !scripted
        && !state.reward_wave_active()
        && state.wave >= REINFORCE_FROM_WAVE
        && live < REINFORCE_BELOW_LIVE
        && remaining > REINFORCE_REMAINING_KILLS
}

fn advance_wave(state: &mut RunState, now: u64, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let cleared = state.wave;
    let bonus = wave_clear_bonus(cleared);
    state.score += bonus;
    events.push(GameEvent::WaveCleared { wave: cleared, bonus });

    state.wave += 1;
    state.wave_spawned = 0;
    state.wave_killed = 0;
    state.wave_target = 0;
    state.boss_wave = false;
    state.modifier = None;
    state.modifier_label.clear();
    info!(wave = state.wave, score = state.score, "wave advanced");

    if state.wave % BOSS_WAVE_INTERVAL == 0 {
        spawn_boss(state, None);
        events.push(GameEvent::BossAppeared { wave: state.wave });
        return;
    }

    let pick = pick_wave_modifier(state.wave, rng);
    if pick.modifier.is_some() {
        debug!(wave = state.wave, label = %pick.label, "wave modifier");
    }
    state.modifier = pick.modifier;
    state.modifier_label = pick.label;

    // The wave right after a boss opens with a reward wave; its own content
    // arrives once the drops are over.
    if state.wave > 1 && (state.wave - 1) % BOSS_WAVE_INTERVAL == 0 {
        start_reward_wave(state, now, rng);
        events.push(GameEvent::RewardWaveStarted { wave: state.wave });
        let entry = ScheduledSpawn {
            due_at: now + POST_REWARD_SPAWN_MS,
            run_id: state.run_id,
            wave: state.wave,
            action: Deferred::WaveContent { modifier: pick.modifier, stage: pick.stage },
        };
        state.schedule.push(entry);
    } else {
        spawn_wave_content(state, pick.modifier, pick.stage, now, rng, events);
    }
}

fn spawn_wave_content(
    state: &mut RunState,
    modifier: Option<WaveModifier>,
    stage: Option<&'static MissionStage>,
    now: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    match (modifier, stage) {
        (Some(WaveModifier::MissionStage), Some(stage)) => spawn_mission_stage(state, stage, now),
        (Some(WaveModifier::BossRush), _) => {
            spawn_boss(state, Some(boss_rush_health(state.wave)));
            events.push(GameEvent::BossAppeared { wave: state.wave });
        }
        _ => {
            let spawned = spawn_formation(state, now, rng);
            state.wave_target = spawned as u32;
        }
    }
}

fn end_run(state: &mut RunState, now: u64, events: &mut Vec<GameEvent>) {
    state.status = GameStatus::GameOver;
    state.game_over_at = now;
    state.schedule.clear();
    state.high_score = state.high_score.max(state.score);
    state.best_overall = state.best_overall.max(state.score);
    info!(score = state.score, wave = state.wave, difficulty = ?state.difficulty, "game over");
    events.push(GameEvent::GameOver {
        score: state.score,
        wave: state.wave,
        difficulty: state.difficulty,
    });
}

// ── Spawners ─────────────────────────────────────────────────────────────────

/// Queue a random formation for the current wave, one enemy every 150 ms
/// (the first one due immediately). Returns the formation size.
pub fn spawn_formation(state: &mut RunState, now: u64, rng: &mut impl Rng) -> usize {
    let formation = create_formation(state.wave, rng);
    debug!(wave = state.wave, formation = formation.name(), size = formation.len(), "formation");
    for (i, slot) in formation.slots.iter().enumerate() {
        let entry = ScheduledSpawn {
            due_at: now + i as u64 * SPAWN_STAGGER_MS,
            run_id: state.run_id,
            wave: state.wave,
            action: Deferred::Enemy {
                x: slot.x,
                y: slot.y,
                start_y: slot.y,
                kind: slot.kind,
                pattern: slot.pattern,
            },
        };
        state.schedule.push(entry);
    }
    formation.len()
}

/// Queue every group of a scripted mission stage on the row-of-eight grid.
pub fn spawn_mission_stage(state: &mut RunState, stage: &MissionStage, now: u64) {
    let mut index = 0usize;
    for group in stage.groups {
        for _ in 0..group.count {
            let (x, y) = mission_slot_position(index);
            let entry = ScheduledSpawn {
                due_at: now + index as u64 * SPAWN_STAGGER_MS,
                run_id: state.run_id,
                wave: state.wave,
                action: Deferred::Enemy { x, y, start_y: -50.0, kind: group.kind, pattern: group.pattern },
            };
            state.schedule.push(entry);
            index += 1;
        }
    }
    state.wave_target = stage.enemy_count();
    debug!(wave = state.wave, stage = stage.name, enemies = index, "mission stage");
}

/// Put a boss on the field immediately. `override_base` replaces the
/// wave-scaled health base (boss-rush and mission boss stages).
pub fn spawn_boss(state: &mut RunState, override_base: Option<u32>) {
    let health = boss_health(state.wave, state.difficulty, override_base);
    let (w, _) = enemy_size(EnemyKind::Boss);
    let id = state.ids.next_enemy();
    state.enemies.push(Enemy {
        id,
        x: BOSS_HOME_X.min(GAME_WIDTH - w),
        y: -100.0,
        kind: EnemyKind::Boss,
        health,
        max_health: health,
        pattern: MovePattern::Boss,
        pattern_time: 0.0,
        start_x: BOSS_HOME_X,
        start_y: BOSS_ANCHOR_Y,
        angle: 0.0,
        speed: boss_speed(state.wave, state.difficulty),
        anchored: false,
    });
    state.boss_wave = true;
    state.wave_spawned += 1;
    state.wave_target = 1;
    info!(wave = state.wave, health, "boss spawned");
}

/// Open the post-boss reward window and queue eight staggered power-up drops.
pub fn start_reward_wave(state: &mut RunState, now: u64, rng: &mut impl Rng) {
    state.reward_wave_until = Some(now + REWARD_WAVE_MS);
    let lane = (GAME_WIDTH - 80.0) / REWARD_DROP_COUNT as f32;
    for i in 0..REWARD_DROP_COUNT {
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        let entry = ScheduledSpawn {
            due_at: now + i as u64 * REWARD_DROP_STAGGER_MS,
            run_id: state.run_id,
            wave: state.wave,
            action: Deferred::PowerUp {
                x: 40.0 + i as f32 * lane + rng.gen::<f32>() * 30.0,
                y: -20.0 - rng.gen::<f32>() * 40.0,
                kind,
            },
        };
        state.schedule.push(entry);
    }
}

/// Drain due entries. Entries from another run or wave, or arriving after
/// the run left `Playing`, are dropped without touching the state.
fn release_due(state: &mut RunState, now: u64, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    for entry in state.schedule.take_due(now) {
        if state.status != GameStatus::Playing || !entry.is_current(state.run_id, state.wave) {
            debug!(run = entry.run_id, wave = entry.wave, "dropping stale deferred spawn");
            continue;
        }
        match entry.action {
            Deferred::Enemy { x, y, start_y, kind, pattern } => {
                let health = enemy_health(kind, state.difficulty);
                let id = state.ids.next_enemy();
                state.enemies.push(Enemy {
                    id,
                    x,
                    y,
                    kind,
                    health,
                    max_health: health,
                    pattern,
                    pattern_time: 0.0,
                    start_x: x,
                    start_y,
                    angle: 0.0,
                    speed: enemy_speed(state.wave, state.difficulty),
                    anchored: false,
                });
                state.wave_spawned += 1;
            }
            Deferred::PowerUp { x, y, kind } => {
                let id = state.ids.next_power_up();
                state.power_ups.push(PowerUp { id, x, y, kind });
            }
            Deferred::WaveContent { modifier, stage } => {
                spawn_wave_content(state, modifier, stage, now, rng, events);
            }
        }
    }
}

/// Centre of the ship; the shadow-audit halo is drawn around it.
pub fn player_center(state: &RunState) -> (f32, f32) {
    (state.player.x + PLAYER_WIDTH / 2.0, state.player.y + PLAYER_HEIGHT / 2.0)
}
