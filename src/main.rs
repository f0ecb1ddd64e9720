mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_defenders::assets::{data_dir, SpriteSet};
use space_defenders::compute::{init_state, tick, Controls};
use space_defenders::constants::{FRAME, GAME_OVER_PAUSE};
use space_defenders::entities::{GameState, GameStatus};
use space_defenders::error::GameError;
use space_defenders::score::ScoreDisplay;
use space_defenders::sound::{Mixer, SoundBank};

use display::Renderer;

const LOG_FILE: &str = "space_defenders.log";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 10 frames (≈143 ms at 70 FPS) is
/// refreshed before it expires.
const HOLD_WINDOW: u64 = 10;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    GameOver,
}

/// Run frames until the ship dies or the player quits.
///
/// Input model: every press/repeat event stamps its key with the current
/// frame number, and a release event (on terminals that report them) drops
/// it. Each frame the still-fresh keys are combined into one `Controls`, so
/// moving and firing work at the same time.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    sprites: &SpriteSet,
    sounds: &mut SoundBank,
    rx: &mpsc::Receiver<Event>,
) -> Result<Outcome, GameError> {
    let mut rng = thread_rng();
    let mut renderer = Renderer::new(out)?;
    let mut score = ScoreDisplay::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(&code, modifiers) {
                            log::info!("game quit by user");
                            return Ok(Outcome::Quit);
                        }
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => renderer.resize(out, cols, rows)?,
                _ => {}
            }
        }

        let controls = Controls::from_keys(
            is_any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            is_any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            is_held(&key_frame, &KeyCode::Char(' '), frame),
        );

        renderer.erase(out)?;
        tick(state, controls, &mut rng);

        for cue in state.take_sound_cues() {
            sounds.play(cue);
        }
        score.update(state.score);
        renderer.draw(out, state, sprites, &score, sounds.take_bells())?;

        if state.status == GameStatus::GameOver {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }

    renderer.fade_out(out)?;
    thread::sleep(GAME_OVER_PAUSE);
    Ok(Outcome::GameOver)
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Send log records to a file; the terminal belongs to the game.
fn init_logging() {
    let path = std::env::temp_dir().join(LOG_FILE);
    match std::fs::File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning, logging disabled ({}: {})", path.display(), e),
    }
}

fn main() -> ExitCode {
    init_logging();
    log::info!("starting Space Defenders");

    let dir = data_dir();
    let sprites = match SpriteSet::load(&dir) {
        Ok(sprites) => sprites,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mixer = Mixer::init().unwrap_or_else(|e| {
        log::warn!("{}", e);
        eprintln!("Warning, no sound ({})", e);
        Mixer::silent()
    });
    let mut sounds = SoundBank::load(mixer, &dir);

    let mut state = init_state(sprites.sizes(), &mut thread_rng());

    match run(&mut state, &sprites, &mut sounds) {
        Ok(Outcome::Quit) => ExitCode::SUCCESS,
        Ok(Outcome::GameOver) => {
            let kills = &state.kills;
            println!(
                "Game over. Score: {} (small {}, medium {}, big {})",
                state.score, kills.small, kills.medium, kills.big
            );
            log::info!("game over after {} frames, score {}", state.frame, state.score);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Own the terminal for the length of one game and always hand it back.
fn run(
    state: &mut GameState,
    sprites: &SpriteSet,
    sounds: &mut SoundBank,
) -> Result<Outcome, GameError> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("SPACE DEFENDERS"))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
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

    let result = game_loop(&mut out, state, sprites, sounds, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
