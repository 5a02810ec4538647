//! Sound cues
//!
//! The device can only beep: one square tone at a time with a pitch, a
//! duration and a volume. Each effect is a short sequence of such tones,
//! queued on the host's `Speaker`.

use crate::sim::{GameEvent, PowerUpKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Collectible picked up
    Collect,
    /// Power-up picked up
    PowerUp(PowerUpKind),
    /// Touched an enemy
    Hurt,
    /// Fell below the level
    Fall,
    /// All collectibles gathered
    LevelComplete,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Collected => Some(SoundEffect::Collect),
            GameEvent::PoweredUp(kind) => Some(SoundEffect::PowerUp(kind)),
            GameEvent::Damaged => Some(SoundEffect::Hurt),
            GameEvent::FellOff => Some(SoundEffect::Fall),
            GameEvent::LevelComplete | GameEvent::RunComplete => Some(SoundEffect::LevelComplete),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::LevelRestarted | GameEvent::LevelLoaded(_) => None,
        }
    }

    /// (frequency Hz, duration ms, relative gain) for each note
    pub fn notes(self) -> &'static [(u32, u32, f32)] {
        match self {
            SoundEffect::Jump => &[(440, 100, 0.5)],
            SoundEffect::Collect => &[(880, 100, 0.5)],
            SoundEffect::PowerUp(PowerUpKind::Speed) => &[(660, 60, 0.4), (990, 60, 0.4)],
            SoundEffect::PowerUp(PowerUpKind::Jump) => &[(523, 60, 0.4), (784, 80, 0.4)],
            SoundEffect::PowerUp(PowerUpKind::Invincible) => {
                &[(523, 60, 0.4), (659, 60, 0.4), (784, 60, 0.4), (1047, 120, 0.4)]
            }
            SoundEffect::Hurt => &[(220, 80, 0.6), (150, 120, 0.6)],
            SoundEffect::Fall => &[(330, 100, 0.5), (220, 100, 0.5), (110, 200, 0.5)],
            SoundEffect::LevelComplete => {
                &[(400, 100, 0.5), (500, 100, 0.5), (600, 100, 0.5), (800, 250, 0.5)]
            }
            SoundEffect::GameOver => {
                &[(400, 200, 0.5), (350, 200, 0.5), (300, 200, 0.5), (200, 400, 0.5)]
            }
        }
    }
}

/// Tone output provided by the host
pub trait Speaker {
    /// Queue a square tone after anything already playing
    fn tone(&mut self, freq_hz: u32, duration_ms: u32, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl AudioManager {
    /// Volume 0.0 - 1.0; zero silences every cue
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play a sound effect
    pub fn play<S: Speaker + ?Sized>(&self, effect: SoundEffect, speaker: &mut S) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        for &(freq, duration, gain) in effect.notes() {
            speaker.tone(freq, duration, vol * gain);
        }
    }

    /// Play the cue for every event raised by the last tick
    pub fn play_events<S: Speaker + ?Sized>(&self, events: &[GameEvent], speaker: &mut S) {
        for effect in events.iter().copied().filter_map(SoundEffect::for_event) {
            self.play(effect, speaker);
        }
    }
}
