//! Neon Strike entry point
//!
//! Owns the terminal, the input thread, and the frame loop; everything the
//! simulation needs arrives through its collaborator traits.

mod tui;

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use neon_strike::render::{self, DrawRequest, Shape, Starfield};
use neon_strike::sim::{self, Context, GamePhase, GameState, InputSnapshot};
use neon_strike::{HighScores, Settings};
use tui::{Bell, Hud};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads, sending them through a
    // channel so the frame loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(out: &mut BufWriter<Stdout>, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let settings = Settings::load();
    let mut board = HighScores::load();

    let mut term_size = terminal::size()?;
    let viewport = tui::viewport_for(term_size.0, term_size.1);

    let seed = unix_ms();
    let mut state = GameState::new(seed, viewport);
    let mut field = Starfield::new(viewport, seed.rotate_left(17));
    let mut hud = Hud::new();
    let mut bell = Bell::default();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame_no: u64 = 0;
    let mut run_recorded = false;

    let t0 = Instant::now();
    let mut last_loop = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame_no += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame_no);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') if state.phase == GamePhase::Idle => {
                                let mut ctx = Context {
                                    audio: &mut bell,
                                    ui: &mut hud,
                                };
                                sim::start(&mut state, &mut ctx);
                                run_recorded = false;
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.phase == GamePhase::GameOver =>
                            {
                                let mut ctx = Context {
                                    audio: &mut bell,
                                    ui: &mut hud,
                                };
                                sim::restart(&mut state, &mut ctx);
                                run_recorded = false;
                            }
                            KeyCode::Esc => match state.phase {
                                GamePhase::GameOver => {
                                    let mut ctx = Context {
                                        audio: &mut bell,
                                        ui: &mut hud,
                                    };
                                    sim::reset_to_idle(&mut state, &mut ctx);
                                }
                                GamePhase::Idle => return Ok(()),
                                GamePhase::Playing => {}
                            },
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so the key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame_no);
                    }
                    // Release: remove immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => {
                    term_size = (cols, rows);
                    let vp = tui::viewport_for(cols, rows);
                    state.resize(vp.x, vp.y);
                }
                _ => {}
            }
        }

        // ── Snapshot held actions ─────────────────────────────────────────
        let input = InputSnapshot {
            up: is_held(&key_frame, KeyCode::Up, frame_no)
                || is_held(&key_frame, KeyCode::Char('w'), frame_no)
                || is_held(&key_frame, KeyCode::Char('W'), frame_no),
            down: is_held(&key_frame, KeyCode::Down, frame_no)
                || is_held(&key_frame, KeyCode::Char('s'), frame_no)
                || is_held(&key_frame, KeyCode::Char('S'), frame_no),
            left: is_held(&key_frame, KeyCode::Left, frame_no)
                || is_held(&key_frame, KeyCode::Char('a'), frame_no)
                || is_held(&key_frame, KeyCode::Char('A'), frame_no),
            right: is_held(&key_frame, KeyCode::Right, frame_no)
                || is_held(&key_frame, KeyCode::Char('d'), frame_no)
                || is_held(&key_frame, KeyCode::Char('D'), frame_no),
            fire: is_held(&key_frame, KeyCode::Char(' '), frame_no),
        };

        // ── Advance the simulation; the frame drive stops on game over ────
        if state.phase != GamePhase::GameOver {
            let now_ms = t0.elapsed().as_secs_f64() * 1000.0;
            let mut ctx = Context {
                audio: &mut bell,
                ui: &mut hud,
            };
            sim::frame(&mut state, now_ms, &input, &mut ctx);
            field.scroll(state.viewport);
        }

        // Record the finished run once, the moment it ends
        if state.phase == GamePhase::GameOver && !run_recorded {
            run_recorded = true;
            if let Some(rank) = board.record(state.score, unix_ms()) {
                log::info!("score {} entered the board at rank {rank}", state.score);
            }
            board.save();
        }

        // ── Draw ──────────────────────────────────────────────────────────
        let mut requests: Vec<DrawRequest> = Vec::new();
        if settings.starfield {
            field.emit(&mut requests);
        }
        render::draw(&state, &mut requests);
        if !settings.particles {
            requests.retain(|r| r.shape != Shape::Spark);
        }

        let fps = if settings.show_fps {
            let elapsed = last_loop.elapsed().as_secs_f64() * 1000.0;
            last_loop = Instant::now();
            Some((1000.0 / elapsed.max(1.0)).round() as u32)
        } else {
            None
        };

        let ring = settings.bell && std::mem::take(&mut bell.pending);
        tui::render(out, &state, &requests, &hud, &board, fps, term_size, ring)?;

        // ── Pace ──────────────────────────────────────────────────────────
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
