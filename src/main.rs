//! Shape Motion entry point
//!
//! Runs the game headless on host doubles: a framebuffer stands in for
//! the panel, a latched timer for the tick interrupt and a seeded
//! autopilot for the buttons. Usage: `shape-motion [settings.json] [seed]`.

use shape_motion::Settings;
use shape_motion::game::{Game, GameError};
use shape_motion::platform::host::{Autopilot, FrameBuffer, HostTimer, ToneLog};

/// Foreground frames before giving up on a result
const MAX_FRAMES: u32 = 20_000;
/// Raw ticks delivered per foreground frame
const TICKS_PER_FRAME: u32 = 4;
/// Seed when none is given
const DEFAULT_SEED: u64 = 0x5EED;

fn main() {
    env_logger::init();
    log::info!("Shape Motion (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut game = Game::new(settings)?;
    let mut display = FrameBuffer::default();
    let mut tone = ToneLog::default();
    let mut timer = HostTimer::new();
    let mut input = Autopilot::new(seed);

    game.start(&mut display);

    let mut frames = 0;
    let mut pixels = 0;
    while frames < MAX_FRAMES && !game.is_over() {
        for _ in 0..TICKS_PER_FRAME {
            if timer.raise() {
                game.on_tick(&mut tone);
            }
        }
        pixels += game.frame(&mut display, &mut input, &mut timer).pixels;
        for _ in 0..timer.take_pending() {
            game.on_tick(&mut tone);
        }
        frames += 1;
    }
    // Final frame paints the end-of-game message
    game.frame(&mut display, &mut input, &mut timer);

    log::info!(
        "Finished after {frames} frames: {:?}, score {}, {} hit blips, {pixels} pixels redrawn",
        game.phase(),
        game.score(),
        tone.blips()
    );
    println!("{}", display.ascii_preview(4, game.settings.background));
    Ok(())
}
