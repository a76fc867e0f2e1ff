//! Terminal rasterization; all draw I/O lives here.
//!
//! Translates abstract draw requests into colored cells. No game logic is
//! performed; this module only maps pixel-space state onto the cell grid and
//! paints the HUD and overlays around it.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use neon_strike::HighScores;
use neon_strike::render::{DrawRequest, Shape};
use neon_strike::sim::{AudioSink, GamePhase, GameState, SoundCue, UiSink, WeaponMode};

/// Game pixels per terminal cell. Cells are roughly twice as tall as wide,
/// so the vertical scale doubles the horizontal one.
pub const PX_PER_COL: f32 = 10.0;
pub const PX_PER_ROW: f32 = 20.0;

/// Rows reserved for the HUD (top) and the controls hint (bottom).
const TOP_ROWS: u16 = 1;
const BOTTOM_ROWS: u16 = 1;

/// The simulation viewport corresponding to a terminal of this size.
pub fn viewport_for(cols: u16, rows: u16) -> Vec2 {
    let play_rows = rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS).max(4);
    Vec2::new(
        cols.max(20) as f32 * PX_PER_COL,
        play_rows as f32 * PX_PER_ROW,
    )
}

/// Mirror of the score/health display values, fed by simulation
/// notifications.
#[derive(Debug, Default)]
pub struct Hud {
    pub score: u32,
    pub hp_pct: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            score: 0,
            hp_pct: 100.0,
        }
    }
}

impl UiSink for Hud {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }
    fn health_changed(&mut self, pct: f32) {
        self.hp_pct = pct;
    }
}

/// Audio surface of a terminal: the bell. Shoot cues are dropped (a bell per
/// volley would be unbearable); explosions and game over ring once per frame.
#[derive(Debug, Default)]
pub struct Bell {
    pub pending: bool,
}

impl AudioSink for Bell {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Explosion | SoundCue::GameOver => self.pending = true,
            SoundCue::Shoot | SoundCue::PowerUp => {}
        }
    }
}

fn rgb(packed: u32) -> Color {
    Color::Rgb {
        r: (packed >> 16) as u8,
        g: (packed >> 8) as u8,
        b: packed as u8,
    }
}

/// Map a game position to a cell, offset below the HUD row.
fn cell_of(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / PX_PER_COL).round() as i32,
        (pos.y / PX_PER_ROW).round() as i32 + TOP_ROWS as i32,
    )
}

/// Queue `text` at (col, row) if it lies inside the paintable area.
fn put<W: Write>(
    out: &mut W,
    (cols, rows): (u16, u16),
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row < TOP_ROWS as i32 || row >= rows.saturating_sub(BOTTOM_ROWS) as i32 {
        return Ok(());
    }
    if col < 0 || col >= cols as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_request<W: Write>(
    out: &mut W,
    size: (u16, u16),
    request: &DrawRequest,
) -> std::io::Result<()> {
    let (col, row) = cell_of(request.pos);
    let color = if request.opacity < 0.34 {
        Color::DarkGrey
    } else {
        rgb(request.color)
    };

    match &request.shape {
        Shape::Star => put(out, size, col, row, "·", Color::DarkGrey)?,
        Shape::Capsule(kind) => {
            let badge = format!("({})", kind.glyph());
            put(out, size, col, row, &badge, color)?;
        }
        Shape::Bolt => {
            let glyph = if request.rotation > 0.05 {
                "/"
            } else if request.rotation < -0.05 {
                "\\"
            } else {
                "│"
            };
            put(out, size, col, row, glyph, color)?;
        }
        Shape::Hull => {
            put(out, size, col, row, "◢██◣", color)?;
            put(out, size, col, row + 1, "◥██◤", color)?;
        }
        Shape::Spark => {
            let glyph = if request.size.x >= 4.0 {
                "●"
            } else if request.size.x >= 2.0 {
                "•"
            } else {
                "·"
            };
            put(out, size, col, row, glyph, color)?;
        }
        Shape::Text(value) => put(out, size, col, row, value, color)?,
        Shape::Ship => {
            put(out, size, col + 2, row, "▲", color)?;
            put(out, size, col + 1, row + 1, "╱█╲", color)?;
            put(out, size, col, row + 2, "╱═╩═╲", color)?;
        }
        Shape::Pod => put(out, size, col, row, "◉", color)?,
    }
    Ok(())
}

fn weapon_tag(state: &GameState) -> String {
    let mode = match state.ship.weapon {
        WeaponMode::Normal => "NORMAL",
        WeaponMode::Rapid => "RAPID",
        WeaponMode::Spread => "SPREAD",
    };
    if state.ship.has_wingman {
        format!("{mode} +WING")
    } else {
        mode.to_string()
    }
}

fn draw_hud<W: Write>(
    out: &mut W,
    (cols, _rows): (u16, u16),
    state: &GameState,
    hud: &Hud,
    fps: Option<u32>,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(format!("SCORE {:>6}", hud.score)))?;

    if state.phase == GamePhase::Playing {
        let tag = weapon_tag(state);
        let cx = (cols / 2).saturating_sub(tag.len() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(rgb(neon_strike::palette::SHIP)))?;
        out.queue(Print(tag))?;
    }

    if let Some(fps) = fps {
        out.queue(cursor::MoveTo(cols.saturating_sub(34), 0))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("{fps:>3} fps")))?;
    }

    // Health bar, right-aligned, red below 30%
    const BAR: u16 = 20;
    let filled = ((hud.hp_pct / 100.0 * BAR as f32).round() as u16).min(BAR);
    let bar_color = if hud.hp_pct < 30.0 {
        rgb(neon_strike::palette::ENEMY_RED)
    } else {
        rgb(neon_strike::palette::HEALTH)
    };
    out.queue(cursor::MoveTo(cols.saturating_sub(BAR + 5), 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("HP "))?;
    out.queue(style::SetForegroundColor(bar_color))?;
    out.queue(Print("█".repeat(filled as usize)))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("░".repeat((BAR - filled) as usize)))?;
    Ok(())
}

fn draw_centered_lines<W: Write>(
    out: &mut W,
    (cols, rows): (u16, u16),
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let start = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn draw_idle_screen<W: Write>(
    out: &mut W,
    size: (u16, u16),
    board: &HighScores,
) -> std::io::Result<()> {
    let cyan = rgb(neon_strike::palette::SHIP);
    let mut lines = vec![
        ("★  N E O N   S T R I K E  ★".to_string(), cyan),
        (String::new(), Color::White),
    ];
    if let Some(best) = board.top_score() {
        lines.push((format!("Best Score: {best}"), Color::Yellow));
        lines.push((String::new(), Color::White));
    }
    lines.push(("PRESS SPACE TO START".to_string(), Color::White));
    lines.push((String::new(), Color::White));
    lines.push((
        "(R) rapid   (S) spread   (W) wingman   (+) repair".to_string(),
        Color::DarkGrey,
    ));
    draw_centered_lines(out, size, &lines)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    size: (u16, u16),
    state: &GameState,
    board: &HighScores,
) -> std::io::Result<()> {
    let red = rgb(neon_strike::palette::ENEMY_RED);
    let mut lines = vec![
        ("╔══════════════════╗".to_string(), red),
        ("║    GAME  OVER    ║".to_string(), red),
        ("╚══════════════════╝".to_string(), red),
        (format!("Final Score: {}", state.score), Color::Yellow),
    ];
    if board.top_score().is_some_and(|best| best > state.score) {
        lines.push((format!("Best: {}", board.top_score().unwrap()), Color::DarkGrey));
    } else if state.score > 0 {
        lines.push(("NEW BEST!".to_string(), Color::Yellow));
    }
    lines.push((
        "R - Play Again   ESC - Menu   Q - Quit".to_string(),
        Color::White,
    ));
    draw_centered_lines(out, size, &lines)
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    requests: &[DrawRequest],
    hud: &Hud,
    board: &HighScores,
    fps: Option<u32>,
    size: (u16, u16),
    ring: bool,
) -> std::io::Result<()> {
    let rows = size.1;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for request in requests {
        draw_request(out, size, request)?;
    }

    draw_hud(out, size, state, hud, fps)?;

    match state.phase {
        GamePhase::Idle => draw_idle_screen(out, size, board)?,
        GamePhase::GameOver => draw_game_over(out, size, state, board)?,
        GamePhase::Playing => {}
    }

    // Controls hint on the last row
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("←→↑↓ / WASD : Move   SPACE : Fire   Q : Quit"))?;

    if ring {
        out.queue(Print("\x07"))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
