//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per host frame
//! - Seeded RNG only
//! - Stable iteration order (entity lists are never reordered)
//! - No rendering or host dependencies

pub mod aabb;
pub mod camera;
pub mod level;
pub mod state;
pub mod tick;

pub use aabb::Rect;
pub use camera::Camera;
pub use level::{LEVEL_COUNT, LevelDef};
pub use state::{
    Collectible, Enemy, GameEvent, GamePhase, GameState, Oscillation, Particle, ParticleKind,
    Platform, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, resolve_platforms, tick};
