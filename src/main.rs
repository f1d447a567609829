mod display;

use std::fs::{self, OpenOptions};
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info};
use tracing_subscriber::filter::EnvFilter;

use compliance_runner::config::{Args, Config, DEFAULT_LOG_FILTER};
use compliance_runner::entities::GameStatus;
use compliance_runner::input::{key_action, sample, KeyAction, KeyTracker, TouchZones, Viewport};
use compliance_runner::session::{Command, Session, SessionOptions};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode while the game runs, so logs
/// go to a file instead of stderr.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input routing ─────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

/// Keys only record intent: held keys go to the tracker, discrete keys become
/// session commands. Nothing here touches entities.
fn handle_key(
    session: &mut Session,
    keys: &mut KeyTracker,
    key: KeyEvent,
    frame: u64,
    now: u64,
) -> Flow {
    let KeyEvent { code, kind, modifiers, .. } = key;
    match kind {
        KeyEventKind::Release => {
            keys.release(&code);
            return Flow::Continue;
        }
        KeyEventKind::Repeat => {
            keys.press(code, frame);
            return Flow::Continue;
        }
        KeyEventKind::Press => keys.press(code, frame),
    }

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    // The share prompt swallows text input.
    if session.share_prompt().is_some() {
        match code {
            KeyCode::Enter => session.command(Command::Confirm, now),
            KeyCode::Esc => session.command(Command::Back, now),
            KeyCode::Backspace => session.share_backspace(),
            KeyCode::Char(ch) => session.share_type(ch),
            _ => {}
        }
        return Flow::Continue;
    }

    let state = session.state();
    match key_action(code, state.status, state.menu.screen) {
        Some(KeyAction::Quit) => return Flow::Quit,
        Some(KeyAction::Command(command)) => session.command(command, now),
        None => {}
    }
    Flow::Continue
}

/// Left-button presses and drags act as touches during play and as clicks
/// on the menu / game-over screens.
fn handle_mouse(
    session: &mut Session,
    touch: &mut TouchZones,
    view: Viewport,
    mouse: MouseEvent,
    now: u64,
) {
    let (x, y) = view.to_logical(mouse.column, mouse.row);
    let playing = session.state().status == GameStatus::Playing;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if playing => touch.press_at(x),
        MouseEventKind::Drag(MouseButton::Left) if playing => touch.press_at(x),
        MouseEventKind::Down(MouseButton::Left) => {
            session.click(x, y, now);
        }
        MouseEventKind::Up(MouseButton::Left) => touch.release_all(),
        _ => {}
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `KeyTracker` that records the frame of the last press/repeat for every
/// key. Each frame we sample which keys are still "fresh" and apply all
/// their effects simultaneously, so Space + A/D can be held together.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, mut session: Session) -> anyhow::Result<()> {
    let start = Instant::now();
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows);
    let mut keys = KeyTracker::default();
    let mut touch = TouchZones::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now = start.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if let Flow::Quit = handle_key(&mut session, &mut keys, key, frame, now) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&mut session, &mut touch, view, mouse, now),
                Event::Resize(c, r) => view = Viewport::new(c, r),
                _ => {}
            }
        }
        if session.state().status != GameStatus::Playing {
            touch.release_all();
        }

        // ── Simulate & draw ───────────────────────────────────────────────────
        let input = sample(&keys, &touch, frame);
        session.frame(&input, now);
        let boxes = display::render(out, &session, view, now)?;
        session.set_hit_boxes(boxes);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse());
    init_logging(&config)?;
    info!(data_dir = %config.data_dir.display(), "starting");

    let session = Session::new(SessionOptions {
        data_dir: config.data_dir.clone(),
        mute: config.mute,
        volume: config.volume,
        difficulty: config.difficulty,
        seed: config.seed,
    });

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, session);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!(error = %e, "exiting after error");
    }
    info!("bye");
    result
}
