//! Rendering layer: all terminal output lives here.
//!
//! `render` reads the session and draws one frame; it never mutates game
//! state. The only thing it hands back is the set of clickable hit-boxes it
//! drew (menu entries, share button), in logical playfield coordinates.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use compliance_runner::collision::{enemy_size, Rect};
use compliance_runner::compute::{demo_enemies, demo_ship, player_center};
use compliance_runner::entities::{
    Bullet, Difficulty, Enemy, EnemyKind, Finding, GameStatus, MenuScreen, PowerUp, PowerUpKind, RunState,
    WaveModifier,
};
use compliance_runner::input::{HitBoxes, Viewport};
use compliance_runner::menu::restart_remaining_ms;
use compliance_runner::session::Session;
use compliance_runner::tuning::{
    difficulty_config, enemy_color, power_up_color, COLOR_ACCENT, COLOR_FINDING, MAX_POWER_LEVEL,
    PLAYER_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_SELECTED: Color = Color::Yellow;

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb { r: c[0], g: c[1], b: c[2] }
}

fn difficulty_color(label: &str) -> Color {
    match label {
        "EASY" => Color::Green,
        "HARD" => Color::Red,
        _ => Color::Yellow,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame and return the hit-boxes drawn in it.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    view: Viewport,
    now: u64,
) -> std::io::Result<HitBoxes> {
    let state = session.state();
    let mut boxes = HitBoxes::default();

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, view)?;

    match state.status {
        GameStatus::Idle => {
            draw_menu(out, state, view, &mut boxes)?;
        }
        GameStatus::Playing | GameStatus::GameOver => {
            draw_hud(out, state, view)?;
            draw_field(out, state, view)?;
        }
    }

    if state.status == GameStatus::GameOver {
        draw_game_over(out, session, view, now, &mut boxes)?;
    }
    draw_controls_hint(out, session, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(boxes)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn print_at<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Print `text` centred on `row`; returns the starting column.
fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<u16> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    print_at(out, col, row, color, text)?;
    Ok(col)
}

/// Logical rectangle covered by `width` cells starting at (`col`, `row`).
fn cell_rect(view: Viewport, col: u16, row: u16, width: u16) -> Rect {
    let cw = view.cell_width();
    let ch = view.cell_height();
    Rect::new(
        col.saturating_sub(1) as f32 * cw,
        row.saturating_sub(2) as f32 * ch,
        width as f32 * cw,
        ch,
    )
}

/// True when the cell lies inside the playfield walls.
fn in_field(view: Viewport, col: u16, row: u16) -> bool {
    col >= 1 && col + 1 < view.cols && row >= 2 && row + 2 < view.rows
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &RunState, view: Viewport) -> std::io::Result<()> {
    // Score, wave and modifier on the left
    let left = format!("Score:{:>6}  Wave:{:>2}", state.score, state.wave);
    print_at(out, 1, 0, C_HUD_SCORE, &left)?;
    let mut col = 1 + left.chars().count() as u16 + 2;
    if state.reward_wave_active() {
        print_at(out, col, 0, rgb(COLOR_FINDING), "REWARD WAVE!")?;
        col += 14;
    } else if !state.modifier_label.is_empty() {
        let color = match state.modifier {
            Some(WaveModifier::ShadowAudit) => Color::DarkMagenta,
            Some(WaveModifier::BossRush) => Color::Red,
            _ => Color::Cyan,
        };
        print_at(out, col, 0, color, &state.modifier_label)?;
        col += state.modifier_label.chars().count() as u16 + 2;
    }

    // High score and difficulty badge
    let label = difficulty_config(state.difficulty).label;
    let hi = format!("Hi:{:>6} ", state.high_score.max(state.score));
    print_at(out, col, 0, C_HINT, &hi)?;
    print_at(out, col + hi.chars().count() as u16, 0, difficulty_color(label), &format!("[{label}]"))?;

    // Power-up meters + lives, right-aligned
    let mut right: Vec<(String, Color)> = Vec::new();
    for kind in PowerUpKind::ALL {
        let level = state.powers.get(kind).level;
        if level == 0 {
            continue;
        }
        let tag = match kind {
            PowerUpKind::Shield => "SHD",
            PowerUpKind::RapidFire => "RPD",
            PowerUpKind::MultiShot => "MLT",
        };
        let meter: String = (0..MAX_POWER_LEVEL).map(|i| if i < level { '▮' } else { '▯' }).collect();
        let extra = if kind == PowerUpKind::MultiShot {
            format!(" x{}", 1 + 2 * level as u32)
        } else {
            String::new()
        };
        right.push((format!("{tag}{meter}{extra} "), rgb(power_up_color(kind))));
    }
    right.push((format!("Lives:{}", "♥".repeat(state.lives as usize)), C_HUD_LIVES));

    let width: usize = right.iter().map(|(s, _)| s.chars().count()).sum();
    let mut rx = view.cols.saturating_sub(width as u16 + 1);
    for (text, color) in &right {
        print_at(out, rx, 0, *color, text)?;
        rx += text.chars().count() as u16;
    }
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, state: &RunState, view: Viewport) -> std::io::Result<()> {
    // Shadow audit: only things inside the halo around the ship are drawn.
    let (pcx, pcy) = player_center(state);
    let halo = state.darkness_radius;
    let shadow = state.modifier == Some(WaveModifier::ShadowAudit) && !state.reward_wave_active();
    let visible = |x: f32, y: f32| !shadow || ((x - pcx).powi(2) + (y - pcy).powi(2)).sqrt() <= halo;

    for p in &state.particles {
        if !visible(p.x, p.y) {
            continue;
        }
        if let Some((col, row)) = view.to_cell(p.x, p.y) {
            let glyph = if p.life > 0.5 { "*" } else { "·" };
            print_at(out, col, row, rgb(p.color), glyph)?;
        }
    }
    for power_up in &state.power_ups {
        draw_power_up(out, view, power_up)?;
    }
    for finding in &state.findings {
        if visible(finding.x, finding.y) {
            draw_finding(out, view, finding)?;
        }
    }
    for enemy in &state.enemies {
        let (w, h) = enemy_size(enemy.kind);
        if enemy.kind == EnemyKind::Boss || visible(enemy.x + w / 2.0, enemy.y + h / 2.0) {
            draw_enemy(out, view, enemy)?;
        }
    }
    for bullet in &state.bullets {
        draw_bullet(out, view, bullet)?;
    }
    draw_player(out, state, view)?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &RunState, view: Viewport) -> std::io::Result<()> {
    let (cx, _) = player_center(state);
    draw_ship(out, view, cx, state.player.y, state.powers.shield.level > 0)
}

fn draw_ship<W: Write>(out: &mut W, view: Viewport, cx: f32, top: f32, shielded: bool) -> std::io::Result<()> {
    //   ▲      ← nose
    //  /█\     ← fuselage + wings
    let Some((col, row)) = view.to_cell(cx, top) else {
        return Ok(());
    };
    let color = if shielded { rgb(COLOR_ACCENT) } else { C_PLAYER };
    print_at(out, col, row, color, "▲")?;
    if in_field(view, col, row + 1) {
        let body = if shielded { "(█)" } else { "/█\\" };
        print_at(out, col.saturating_sub(1).max(1), row + 1, color, body)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (w, _) = enemy_size(enemy.kind);
    let Some((col, row)) = view.to_cell(enemy.x + w / 2.0, enemy.y) else {
        return Ok(());
    };
    let color = rgb(enemy_color(enemy.kind));
    let lx = col.saturating_sub(1).max(1);
    match enemy.kind {
        EnemyKind::Risk => print_at(out, lx, row, color, "«▼»")?,
        EnemyKind::Vulnerability => print_at(out, lx, row, color, "(◎)")?,
        EnemyKind::Threat => {
            print_at(out, lx, row, color, "<Ж>")?;
            if enemy.health < enemy.max_health && in_field(view, lx, row + 1) {
                print_at(out, lx, row + 1, color, " ˙ ")?;
            }
        }
        EnemyKind::Boss => {
            // Health bar over a 7-wide hull.
            let bx = col.saturating_sub(3).max(1);
            let filled = if enemy.max_health > 0 {
                ((enemy.health.max(0) as f32 / enemy.max_health as f32) * 7.0).ceil() as usize
            } else {
                0
            };
            let bar: String = (0..7).map(|i| if i < filled { '█' } else { '░' }).collect();
            if row > 2 {
                print_at(out, bx, row - 1, Color::Red, &bar)?;
            }
            print_at(out, bx, row, color, "╔═════╗")?;
            if in_field(view, bx, row + 1) {
                print_at(out, bx, row + 1, color, "║◉ ▼ ◉║")?;
            }
            if in_field(view, bx, row + 2) {
                print_at(out, bx, row + 2, color, "╚╦═╦═╝")?;
            }
        }
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: Viewport, bullet: &Bullet) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(bullet.x, bullet.y) {
        let glyph = if bullet.angle < -0.01 {
            "╲"
        } else if bullet.angle > 0.01 {
            "╱"
        } else {
            "║"
        };
        print_at(out, col, row, rgb(COLOR_ACCENT), glyph)?;
    }
    Ok(())
}

fn draw_finding<W: Write>(out: &mut W, view: Viewport, finding: &Finding) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(finding.x, finding.y) {
        print_at(out, col, row, rgb(COLOR_FINDING), "◆")?;
    }
    Ok(())
}

/// Falling power-ups:
///   S  shield: absorbs one hit per level
///   R  rapid-fire: shorter fire cooldown
///   M  multi-shot: one extra bullet pair per level
fn draw_power_up<W: Write>(out: &mut W, view: Viewport, power_up: &PowerUp) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(power_up.x, power_up.y) {
        let glyph = match power_up.kind {
            PowerUpKind::Shield => "S",
            PowerUpKind::RapidFire => "R",
            PowerUpKind::MultiShot => "M",
        };
        print_at(out, col, row, rgb(power_up_color(power_up.kind)), glyph)?;
    }
    Ok(())
}

// ── Menu (idle) ───────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(
    out: &mut W,
    state: &RunState,
    view: Viewport,
    boxes: &mut HitBoxes,
) -> std::io::Result<()> {
    for enemy in &demo_enemies(state.frame) {
        draw_enemy(out, view, enemy)?;
    }
    let ship = demo_ship();
    draw_ship(out, view, ship.x + PLAYER_WIDTH / 2.0, ship.y, false)?;

    let cy = view.rows / 2;
    print_centered(out, view, cy.saturating_sub(6), C_TITLE, "★  COMPLIANCE  RUNNER  ★")?;
    print_centered(out, view, cy.saturating_sub(5), C_HINT, "Survive the audit. Shoot the findings.")?;
    let mut best = Vec::with_capacity(2);
    if state.high_score > 0 {
        best.push(format!("Best ({}): {}", difficulty_config(state.difficulty).label, state.high_score));
    }
    if state.best_overall > 0 {
        best.push(format!("Overall: {}", state.best_overall));
    }
    if !best.is_empty() {
        print_centered(out, view, cy.saturating_sub(4), C_HUD_SCORE, &best.join("   "))?;
    }

    let items: Vec<(String, Color)> = match state.menu.screen {
        MenuScreen::Main => vec![("START GAME".to_string(), Color::White)],
        MenuScreen::Difficulty => Difficulty::ALL
            .iter()
            .map(|d| {
                let label = difficulty_config(*d).label;
                (label.to_string(), difficulty_color(label))
            })
            .collect(),
    };
    if state.menu.screen == MenuScreen::Difficulty {
        print_centered(out, view, cy.saturating_sub(2), Color::White, "Select difficulty:")?;
    }

    for (i, (label, color)) in items.iter().enumerate() {
        let row = cy + i as u16 * 2;
        let selected = state.menu.cursor == i;
        let text = if selected { format!("▶ {label} ◀") } else { format!("  {label}  ") };
        let col = print_centered(out, view, row, if selected { C_SELECTED } else { *color }, &text)?;
        boxes.menu_items.push(cell_rect(view, col, row, text.chars().count() as u16));
    }

    let legend_row = cy + items.len() as u16 * 2 + 1;
    let legend: &[(&str, [u8; 3], &str)] = &[
        ("S", power_up_color(PowerUpKind::Shield), " Shield: absorbs a hit per level"),
        ("R", power_up_color(PowerUpKind::RapidFire), " Rapid fire: shorter cooldown"),
        ("M", power_up_color(PowerUpKind::MultiShot), " Multi-shot: wider spread"),
        ("◆", COLOR_FINDING, " Finding: costs a life, dodge it"),
    ];
    let lx = (view.cols / 2).saturating_sub(17);
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = legend_row + i as u16;
        if !in_field(view, lx, row) {
            break;
        }
        print_at(out, lx, row, rgb(*color), sym)?;
        print_at(out, lx + 1, row, C_HINT, desc)?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &Session,
    view: Viewport,
    now: u64,
    boxes: &mut HitBoxes,
) -> std::io::Result<()> {
    let state = session.state();
    let new_best = state.score >= state.high_score && state.score > 0;
    let cy = view.rows / 2;
    let top = cy.saturating_sub(5);

    print_centered(out, view, top, Color::Red, "╔════════════════════╗")?;
    print_centered(out, view, top + 1, Color::Red, "║  AUDIT  FAILED     ║")?;
    print_centered(out, view, top + 2, Color::Red, "╚════════════════════╝")?;
    print_centered(
        out,
        view,
        top + 3,
        C_HUD_SCORE,
        &format!("Final Score: {:>6}   Wave {}", state.score, state.wave),
    )?;
    let best = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };
    print_centered(out, view, top + 4, if new_best { Color::Yellow } else { C_HINT }, &best)?;

    if let Some(name) = session.share_prompt() {
        print_centered(out, view, top + 6, Color::White, &format!("Nickname: {name}_"))?;
        print_centered(out, view, top + 7, C_HINT, "ENTER - Save scorecard   ESC - Cancel")?;
        return Ok(());
    }

    let remaining = restart_remaining_ms(state, now);
    if remaining > 0 {
        let wait = format!("Continue in {}s…", remaining.div_ceil(1000));
        print_centered(out, view, top + 6, C_HINT, &wait)?;
    } else {
        let button = "[ SHARE SCORE ]";
        let row = top + 6;
        let col = print_centered(out, view, row, rgb(COLOR_ACCENT), button)?;
        boxes.share_button = Some(cell_rect(view, col, row, button.chars().count() as u16));
        print_centered(out, view, top + 7, Color::White, "SPACE/ENTER - Menu   S - Share   Q - Quit")?;
    }
    if let Some(path) = session.last_export() {
        print_centered(out, view, top + 8, Color::Green, &format!("Saved {}", path.display()))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, session: &Session, view: Viewport) -> std::io::Result<()> {
    let sound = session.sound();
    let audio = if sound.enabled() {
        format!("♪ {:>3}%", (sound.volume() * 100.0).round() as u32)
    } else {
        "♪ off".to_string()
    };
    let keys = match session.state().status {
        GameStatus::Idle => "↑ ↓ : Select   ENTER : Confirm   ESC : Back   Q : Quit",
        _ => "← → / A D : Move   SPACE : Shoot   Q : Quit",
    };
    print_at(
        out,
        1,
        view.rows.saturating_sub(1),
        C_HINT,
        &format!("{keys}   M : Mute  +/- : Volume  T : Test  [{audio}]"),
    )?;
    Ok(())
}
