//! Shareable scorecard image.
//!
//! `render_scorecard` is a pure function of the run summary: a 600×400 RGBA
//! card with title, difficulty, nickname, zero-padded score, wave and a few
//! decorative enemies, lettered in a built-in 5×7 bitmap font.
//! `export_scorecard` writes it as a PNG.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{Difficulty, EnemyKind};
use crate::tuning::{
    difficulty_config, enemy_color, COLOR_ACCENT, COLOR_BACKGROUND, COLOR_BACKGROUND_LIGHT,
    COLOR_BACKGROUND_MID, COLOR_FINDING, COLOR_TEXT, COLOR_TEXT_MUTED,
};

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 400;
pub const MAX_NAME_LEN: usize = 16;
pub const ANONYMOUS: &str = "ANONYMOUS";

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

#[derive(Debug)]
pub enum ScorecardError {
    Io { path: PathBuf, source: io::Error },
    Encode { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for ScorecardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot write scorecard to {}: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "cannot encode scorecard {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScorecardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scorecard {
    pub name: String,
    pub score: u32,
    pub wave: u32,
    pub difficulty: Difficulty,
    pub new_high_score: bool,
}

impl Scorecard {
    pub fn new(name: &str, score: u32, wave: u32, difficulty: Difficulty) -> Self {
        Scorecard {
            name: display_name(name),
            score,
            wave,
            difficulty,
            new_high_score: false,
        }
    }

    pub fn file_name(&self) -> String {
        scorecard_file_name(self.score, self.wave)
    }
}

/// Trimmed, upper-cased, at most 16 characters; blank becomes "ANONYMOUS".
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ANONYMOUS.to_string();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect::<String>().to_uppercase()
}

pub fn scorecard_file_name(score: u32, wave: u32) -> String {
    format!("compliance-runner-{score}-wave{wave}.png")
}

/// Shorthand for a card without the high-score banner.
pub fn render_scorecard(name: &str, score: u32, wave: u32, difficulty: Difficulty) -> RgbaImage {
    render(&Scorecard::new(name, score, wave, difficulty))
}

pub fn render(card: &Scorecard) -> RgbaImage {
    let w = CARD_WIDTH;
    let h = CARD_HEIGHT;
    let mut img = RgbaImage::new(w, h);

    // Background: three-stop vertical gradient.
    for y in 0..h {
        let t = y as f32 / (h - 1) as f32;
        let color = if t < 0.5 {
            lerp(COLOR_BACKGROUND, COLOR_BACKGROUND_MID, t * 2.0)
        } else {
            lerp(COLOR_BACKGROUND_MID, COLOR_BACKGROUND_LIGHT, (t - 0.5) * 2.0)
        };
        for x in 0..w {
            img.put_pixel(x, y, rgba(color));
        }
    }

    // Stars, seeded from the run so the card is reproducible.
    let mut rng = StdRng::seed_from_u64(card.score as u64 ^ ((card.wave as u64) << 32));
    for _ in 0..40 {
        let sx = rng.gen_range(0..w) as i32;
        let sy = rng.gen_range(0..h) as i32;
        let size = if rng.gen_bool(0.3) { 2 } else { 1 };
        let shade = rng.gen_range(90u8..180);
        fill_rect(&mut img, sx, sy, size, size, [shade, shade, shade]);
    }

    // Borders.
    stroke_rect(&mut img, 10, 10, w as i32 - 20, h as i32 - 20, 4, COLOR_ACCENT);
    let glow = lerp(COLOR_BACKGROUND_MID, COLOR_ACCENT, 0.25);
    stroke_rect(&mut img, 16, 16, w as i32 - 32, h as i32 - 32, 2, glow);

    let cx = w as i32 / 2;
    draw_text_centered(&mut img, "COMPLIANCE RUNNER", cx, 50, 4, COLOR_ACCENT);
    draw_text_centered(
        &mut img,
        difficulty_config(card.difficulty).label,
        cx,
        84,
        2,
        COLOR_TEXT_MUTED,
    );
    draw_text_centered(&mut img, &card.name, cx, 128, 3, COLOR_TEXT);

    // Score box.
    let box_fill = lerp(COLOR_BACKGROUND_MID, COLOR_ACCENT, 0.12);
    fill_rect(&mut img, cx - 140, 160, 280, 80, box_fill);
    stroke_rect(&mut img, cx - 140, 160, 280, 80, 2, COLOR_ACCENT);
    draw_text_centered(&mut img, &format!("{:06}", card.score), cx, 194, 6, COLOR_ACCENT);
    draw_text_centered(&mut img, "FINAL SCORE", cx, 227, 1, COLOR_TEXT_MUTED);

    if card.new_high_score {
        draw_text_centered(&mut img, &format!("WAVE {}", card.wave), cx - 120, 280, 2, COLOR_TEXT);
        draw_text_centered(&mut img, "NEW HIGH SCORE!", cx + 100, 280, 2, COLOR_FINDING);
    } else {
        draw_text_centered(&mut img, &format!("WAVE {}", card.wave), cx, 280, 2, COLOR_TEXT);
    }

    // Decorative enemies.
    let kinds = [EnemyKind::Threat, EnemyKind::Vulnerability, EnemyKind::Risk];
    for (i, kind) in kinds.iter().enumerate() {
        let ex = cx - 100 + i as i32 * 100;
        let color = enemy_color(*kind);
        fill_rect(&mut img, ex - 12, 320, 24, 8, color);
        fill_rect(&mut img, ex - 16, 328, 32, 12, color);
        fill_rect(&mut img, ex - 10, 330, 4, 4, COLOR_TEXT);
        fill_rect(&mut img, ex + 6, 330, 4, 4, COLOR_TEXT);
    }

    draw_text_centered(&mut img, "SURVIVE THE AUDIT", cx, 368, 1, COLOR_TEXT_MUTED);
    img
}

/// Render `card` and write it as `<dir>/compliance-runner-<score>-wave<wave>.png`.
pub fn export_scorecard(dir: &Path, card: &Scorecard) -> Result<PathBuf, ScorecardError> {
    std::fs::create_dir_all(dir)
        .map_err(|source| ScorecardError::Io { path: dir.to_path_buf(), source })?;
    let path = dir.join(card.file_name());
    render(card)
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ScorecardError::Encode { path: path.clone(), source })?;
    Ok(path)
}

// ── Raster helpers ───────────────────────────────────────────────────────────

fn rgba(c: [u8; 3]) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Fill, clipped to the image.
fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, color: [u8; 3]) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w).min(img.width() as i32);
    let y1 = (y + h).min(img.height() as i32);
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px as u32, py as u32, rgba(color));
        }
    }
}

fn stroke_rect(img: &mut RgbaImage, x: i32, y: i32, w: i32, h: i32, t: i32, color: [u8; 3]) {
    fill_rect(img, x, y, w, t, color);
    fill_rect(img, x, y + h - t, w, t, color);
    fill_rect(img, x, y, t, h, color);
    fill_rect(img, x + w - t, y, t, h, color);
}

/// Pixel width of `text` at `scale`, one blank column between glyphs.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_W + 1) - 1) * scale
}

/// Draw `text` centred on (`cx`, `cy`).
fn draw_text_centered(img: &mut RgbaImage, text: &str, cx: i32, cy: i32, scale: u32, color: [u8; 3]) {
    let left = cx - text_width(text, scale) as i32 / 2;
    let top = cy - (GLYPH_H * scale) as i32 / 2;
    let step = ((GLYPH_W + 1) * scale) as i32;
    for (i, ch) in text.chars().enumerate() {
        let rows = glyph(ch);
        let gx = left + i as i32 * step;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    fill_rect(
                        img,
                        gx + (col * scale) as i32,
                        top + (row as u32 * scale) as i32,
                        scale as i32,
                        scale as i32,
                        color,
                    );
                }
            }
        }
    }
}

fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
