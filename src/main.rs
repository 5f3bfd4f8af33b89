mod display;

use std::cell::Cell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sharkie::audio::{Audio, AudioSink, SoundCue};
use sharkie::input::InputState;
use sharkie::level::level_one;
use sharkie::{GameConfig, GameEndListener, GameError, GameResult, World};

use display::TerminalSurface;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Environment variable overriding the log file location.
const LOG_FILE_ENV: &str = "SHARKIE_LOG_FILE";

// ── Held-key input model ──────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    InputState {
        left: held(&[KeyCode::Left]),
        right: held(&[KeyCode::Right]),
        up: held(&[KeyCode::Up]),
        down: held(&[KeyCode::Down]),
        primary_fire: held(&[KeyCode::Char('d'), KeyCode::Char('D')]),
        secondary_fire: held(&[KeyCode::Char(' ')]),
    }
}

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Rings the terminal bell for hurt and pickup cues. Music cues are ignored.
struct TerminalBell;

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) -> sharkie::Result<()> {
        if matches!(cue, SoundCue::Bgm | SoundCue::StopBgm) {
            return Ok(());
        }
        let mut out = stdout();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| GameError::Audio(e.to_string()))
    }
}

/// Hands the final result back to the game loop.
struct EndSignal(Rc<Cell<Option<GameResult>>>);

impl GameEndListener for EndSignal {
    fn notify_game_end(&mut self, result: GameResult) {
        self.0.set(Some(result));
    }
}

fn init_logging() {
    let path = std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| "sharkie.log".to_string());
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn new_world(config: &GameConfig, ended: &Rc<Cell<Option<GameResult>>>) -> std::io::Result<World> {
    let mut rng = StdRng::from_entropy();
    let level = level_one(config, &mut rng);
    let mut world = World::new(level, config.clone(), rng)
        .map_err(std::io::Error::other)?
        .with_audio(Audio::new(Some(Box::new(TerminalBell))))
        .with_end_listener(Box::new(EndSignal(Rc::clone(ended))));
    world.start();
    Ok(world)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → restart.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the keys that are still "fresh" (within
/// `HOLD_WINDOW` frames) become the world's input state, so arrows and fire
/// keys can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    ended: &Rc<Cell<Option<GameResult>>>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut surface = TerminalSurface::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if ended.get().is_some() => {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f64() * 1000.0;
        last = now;

        world.set_input(sample_input(&key_frame, frame));
        world.advance(dt_ms);
        world.render(dt_ms, &mut surface);
        display::render(out, &surface, world)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let config = GameConfig::from_env();
    config.validate().map_err(std::io::Error::other)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, config: &GameConfig, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        let ended = Rc::new(Cell::new(None));
        let mut world = new_world(config, &ended)?;
        let quit = game_loop(out, &mut world, &ended, rx)?;
        if quit {
            info!("quit");
            break;
        }
        info!("restarting");
    }
    Ok(())
}
