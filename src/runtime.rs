//! Host callback contract
//!
//! The handheld calls `update(tick)` and `draw(tick)` once per frame and
//! reports which buttons are held. `Game` turns held state into per-tick
//! commands, runs the simulation and renders it.

use std::ops::ControlFlow;

use crate::audio::{AudioManager, Speaker};
use crate::renderer::{self, Canvas, DrawOptions};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Raw button state as reported by the host (true = held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    /// Jump
    pub a: bool,
    /// Next level
    pub b: bool,
    /// Restart
    pub x: bool,
    /// Pause
    pub y: bool,
}

impl Buttons {
    /// Buttons held now that were not held last frame
    pub fn pressed_since(self, prev: Buttons) -> Buttons {
        Buttons {
            left: self.left && !prev.left,
            right: self.right && !prev.right,
            a: self.a && !prev.a,
            b: self.b && !prev.b,
            x: self.x && !prev.x,
            y: self.y && !prev.y,
        }
    }
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub audio: AudioManager,
    /// Let the autopilot play
    pub idle_mode: bool,
    prev: Buttons,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let mut state = GameState::new(settings.seed, settings.physics(), settings.start_level);
        state.particles_enabled = settings.particles;

        let audio = AudioManager::new(settings.effective_volume());

        log::info!(
            "Starting on {} difficulty, level {} (seed {:#x})",
            settings.difficulty.as_str(),
            state.level_index,
            settings.seed
        );

        Self {
            state,
            settings,
            audio,
            idle_mode: false,
            prev: Buttons::default(),
        }
    }

    /// Advance one frame. Breaks once the configured tick limit has passed.
    pub fn update(&mut self, tick_count: u64, buttons: Buttons) -> ControlFlow<()> {
        let pressed = buttons.pressed_since(self.prev);
        self.prev = buttons;

        let input = TickInput {
            left: buttons.left,
            right: buttons.right,
            jump: pressed.a,
            restart: pressed.x,
            advance: pressed.b,
            pause: pressed.y,
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input);

        match self.settings.auto_quit_ticks {
            Some(limit) if tick_count > limit => {
                log::info!("Auto quit after {} ticks (score {})", tick_count, self.state.score);
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    /// Sound cues for whatever happened during the last update
    pub fn play_sounds<S: Speaker + ?Sized>(&self, speaker: &mut S) {
        self.audio.play_events(&self.state.events, speaker);
    }

    pub fn draw<C: Canvas + ?Sized>(&self, _tick: u64, canvas: &mut C) {
        let options = DrawOptions {
            show_progress: self.settings.show_progress,
        };
        renderer::draw(&self.state, canvas, options);
    }
}
