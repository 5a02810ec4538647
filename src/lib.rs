//! Pico Platformer - A side-scrolling platformer for a 120x120 handheld
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Drawing through the host's pen/rect/pixel/text API
//! - `runtime`: The host's `update(tick)` / `draw(tick)` callback contract
//! - `audio`: Sound cues for simulation events
//! - `settings`: Difficulty presets and JSON configuration

pub mod audio;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;

pub use runtime::{Buttons, Game};
pub use settings::{Difficulty, Physics, Settings};

/// Game configuration constants
pub mod consts {
    /// Framebuffer dimensions
    pub const SCREEN_WIDTH: u32 = 120;
    pub const SCREEN_HEIGHT: u32 = 120;

    /// Normal-difficulty physics (see `settings::Difficulty` for presets)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = -8.0;
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const PLAYER_LIVES: u8 = 3;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 8.0;
    pub const PLAYER_HEIGHT: f32 = 8.0;

    /// Camera follow
    pub const CAMERA_FOLLOW_SPEED: f32 = 0.1;
    /// Player position relative to the left edge of the screen
    pub const CAMERA_OFFSET: f32 = 40.0;
    /// Background hills scroll at this fraction of camera speed
    pub const PARALLAX_FACTOR: f32 = 0.3;

    /// Falling below this y restarts the level
    pub const FALL_LIMIT: f32 = SCREEN_HEIGHT as f32 + 20.0;

    /// Points per collectible
    pub const COLLECTIBLE_POINTS: u64 = 10;
    pub const COLLECTIBLE_SIZE: f32 = 6.0;
    pub const COLLECTIBLE_BOB_SPEED: f32 = 0.1;
    pub const COLLECTIBLE_BOB_HEIGHT: f32 = 2.0;

    pub const POWERUP_SIZE: f32 = 8.0;
    pub const POWERUP_BOB_SPEED: f32 = 0.25;
    pub const POWERUP_BOB_HEIGHT: f32 = 3.0;
    /// Power-ups blink: visible for the first 15 ticks of every 20
    pub const POWERUP_FLASH_PERIOD: u32 = 20;
    pub const POWERUP_FLASH_VISIBLE: u32 = 15;

    /// Boost durations in ticks (60 Hz)
    pub const SPEED_BOOST_TICKS: u32 = 300;
    pub const JUMP_BOOST_TICKS: u32 = 300;
    pub const INVINCIBLE_POWERUP_TICKS: u32 = 600;
    /// Mercy invincibility after taking a hit
    pub const DAMAGE_INVINCIBLE_TICKS: u32 = 120;

    pub const SPEED_BOOST_FACTOR: f32 = 2.0;
    pub const JUMP_BOOST_FACTOR: f32 = 1.5;

    pub const ENEMY_SIZE: f32 = 8.0;

    /// Particle tuning
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const MAX_PARTICLES: usize = 256;

    /// Host quits after this many ticks unless configured otherwise
    pub const AUTO_QUIT_TICKS: u64 = 1000;
}
