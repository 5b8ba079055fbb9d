mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::assets::SpriteTable;
use space_invaders::clock::MonotonicClock;
use space_invaders::config::GameConfig;
use space_invaders::error::GameError;
use space_invaders::game_loop::{FrameLoop, LoopSignal};
use space_invaders::player::InputSnapshot;

use display::{GlyphAtlas, TerminalScreen};

/// A key counts as held if its last press/repeat event arrived within this
/// many frames.  Covers terminals that never report key releases.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "space_invaders", about = "Defend the barriers from the descending formation")]
struct Args {
    /// TOML file overriding the default rules.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output goes; the terminal itself is busy drawing the game.
    #[arg(long, default_value = "space_invaders.log")]
    log_file: PathBuf,

    /// Seed for the enemy shooter choice, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn init_logging(path: &Path) -> Result<(), GameError> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the simulation until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame turns the keys that are
/// still fresh into one `InputSnapshot`.  The core turns a held fire key into
/// a single shot, so holding Space does not spray bullets.
fn game_loop<W: Write>(
    out: &mut W,
    frame_loop: &mut FrameLoop<MonotonicClock, StdRng>,
    screen: &mut TerminalScreen,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let frame_time = frame_loop.state().config.frame_duration();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut signal = frame_loop.signal();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if signal != LoopSignal::Continue =>
                            {
                                frame_loop.restart();
                                key_frame.clear();
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => screen.resize(cols, rows),
                _ => {}
            }
        }

        let input = InputSnapshot {
            move_left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            move_right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        signal = frame_loop.step(&input, screen);
        let state = frame_loop.state();
        screen.draw_hud(state.score, state.player.lives);
        screen.draw_banner(signal, state.score);
        screen.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut atlas = GlyphAtlas::new();
    let sprites = SpriteTable::resolve(&mut atlas);
    let mut screen = TerminalScreen::new(atlas, config.screen.width, config.screen.height)?;
    let mut frame_loop = FrameLoop::new(config, sprites, MonotonicClock::new(), rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without the kitty protocol fall
    // back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    info!("terminal ready, starting game loop");
    let result = game_loop(&mut out, &mut frame_loop, &mut screen, &rx);
    if let Err(e) = &result {
        error!("game loop failed: {e}");
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
