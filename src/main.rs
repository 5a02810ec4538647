//! Pico Platformer headless runner
//!
//! Drives the game the way the handheld does, one `update`/`draw` pair per
//! tick, with the autopilot on the buttons. Usage:
//!
//! ```text
//! pico-platformer [settings.json] [screenshot.ppm] [easy|normal|hard]
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::ops::ControlFlow;
use std::path::Path;

use pico_platformer::audio::Speaker;
use pico_platformer::renderer::Framebuffer;
use pico_platformer::{Buttons, Difficulty, Game, Settings};

/// Tone sink that only logs
struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn tone(&mut self, freq_hz: u32, duration_ms: u32, volume: f32) {
        log::trace!("tone {} Hz for {} ms at {:.2}", freq_hz, duration_ms, volume);
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let screenshot = args.next();

    if let Some(name) = args.next() {
        match Difficulty::from_str(&name) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => log::warn!("Unknown difficulty '{}', keeping {}", name, settings.difficulty.as_str()),
        }
    }

    if settings.auto_quit_ticks.is_none() {
        log::warn!("No auto quit configured for a headless run, stopping after 1000 ticks");
        settings.auto_quit_ticks = Some(pico_platformer::consts::AUTO_QUIT_TICKS);
    }

    log::info!("Pico Platformer (headless) starting...");
    log::debug!("Settings: {}", settings.to_json());

    let mut game = Game::new(settings);
    game.idle_mode = true;

    let mut framebuffer = Framebuffer::default();
    let mut speaker = LogSpeaker;
    let mut tick = 0u64;

    loop {
        let flow = game.update(tick, Buttons::default());
        game.play_sounds(&mut speaker);
        for event in &game.state.events {
            log::debug!("tick {}: {:?}", tick, event);
        }
        game.draw(tick, &mut framebuffer);

        if tick % 100 == 0 {
            log::info!(
                "tick {}: level {} '{}', score {}, lives {}, progress {}%",
                tick,
                game.state.level_index,
                game.state.level_name,
                game.state.score,
                game.state.lives,
                game.state.progress_percent()
            );
        }

        if let ControlFlow::Break(()) = flow {
            break;
        }
        tick += 1;
    }

    log::info!(
        "Finished after {} ticks: level {}, score {}, lives {}",
        tick,
        game.state.level_index,
        game.state.score,
        game.state.lives
    );

    if let Some(path) = screenshot {
        let result = File::create(&path).and_then(|file| framebuffer.write_ppm(BufWriter::new(file)));
        match result {
            Ok(()) => log::info!("Wrote last frame to {}", path),
            Err(e) => log::error!("Failed to write {}: {}", path, e),
        }
    }
}
