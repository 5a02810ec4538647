//! Game state and core simulation types
//!
//! Entities are plain structs mutated in place every tick. Restarting a level
//! resets their fields; only loading a different level rebuilds the lists.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::aabb::Rect;
use super::camera::Camera;
use super::level::{self, LevelDef};
use crate::consts::*;
use crate::settings::Physics;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every collectible in the level has been gathered
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// Something that happened during a tick (drives sound cues and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Jumped,
    Collected,
    PoweredUp(PowerUpKind),
    Damaged,
    FellOff,
    LevelRestarted,
    LevelComplete,
    LevelLoaded(usize),
    /// Finished the last level and wrapped back to the first
    RunComplete,
    GameOver,
}

/// Linear back-and-forth motion along x
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oscillation {
    pub start_x: f32,
    pub range: f32,
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub direction: f32,
}

impl Oscillation {
    pub fn new(start_x: f32, range: f32, speed: f32) -> Self {
        Self {
            start_x,
            range,
            speed,
            direction: 1.0,
        }
    }

    /// Advance `x` one tick, reversing at either end. Returns the displacement.
    pub fn step(&mut self, x: &mut f32) -> f32 {
        let dx = self.speed * self.direction;
        *x += dx;
        if *x <= self.start_x {
            self.direction = 1.0;
        } else if *x >= self.start_x + self.range {
            self.direction = -1.0;
        }
        dx
    }

    pub fn reset(&mut self) {
        self.direction = 1.0;
    }
}

/// The player character
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub spawn: Vec2,
    /// Ticks of doubled run speed remaining
    pub speed_boost: u32,
    /// Ticks of boosted jump remaining
    pub jump_boost: u32,
    /// Ticks of immunity to enemies remaining
    pub invincible: u32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            on_ground: false,
            spawn,
            speed_boost: 0,
            jump_boost: 0,
            invincible: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Count down every active effect timer
    pub fn tick_timers(&mut self) {
        self.speed_boost = self.speed_boost.saturating_sub(1);
        self.jump_boost = self.jump_boost.saturating_sub(1);
        self.invincible = self.invincible.saturating_sub(1);
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Speed => self.speed_boost = SPEED_BOOST_TICKS,
            PowerUpKind::Jump => self.jump_boost = JUMP_BOOST_TICKS,
            PowerUpKind::Invincible => self.invincible = INVINCIBLE_POWERUP_TICKS,
        }
    }

    /// Back to the spawn point with no momentum or effects
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.speed_boost = 0;
        self.jump_boost = 0;
        self.invincible = 0;
    }
}

/// Static or oscillating geometry the player can stand on
#[derive(Debug, Clone, Serialize)]
pub struct Platform {
    pub rect: Rect,
    pub motion: Option<Oscillation>,
    /// Horizontal displacement during the last update
    pub last_dx: f32,
}

impl Platform {
    pub fn fixed(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            motion: None,
            last_dx: 0.0,
        }
    }

    pub fn moving(x: f32, y: f32, w: f32, h: f32, range: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            motion: Some(Oscillation::new(x, range, speed)),
            last_dx: 0.0,
        }
    }

    /// Move one tick; returns the horizontal displacement (0 for fixed platforms)
    pub fn update(&mut self) -> f32 {
        self.last_dx = match self.motion.as_mut() {
            Some(motion) => motion.step(&mut self.rect.x),
            None => 0.0,
        };
        self.last_dx
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn reset(&mut self) {
        self.last_dx = 0.0;
        if let Some(motion) = self.motion.as_mut() {
            self.rect.x = motion.start_x;
            motion.reset();
        }
    }
}

/// A coin-like item worth points
#[derive(Debug, Clone, Serialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
    pub bob_offset: f32,
    pub ticks: u32,
}

impl Collectible {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: COLLECTIBLE_SIZE,
            collected: false,
            bob_offset: 0.0,
            ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.bob_offset = (self.ticks as f32 * COLLECTIBLE_BOB_SPEED).sin() * COLLECTIBLE_BOB_HEIGHT;
    }

    /// Collision box, following the bob animation
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size).offset_y(self.bob_offset)
    }

    pub fn reset(&mut self) {
        self.collected = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    Speed,
    Jump,
    Invincible,
}

/// A pickup granting a temporary ability
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub bob_offset: f32,
    pub ticks: u32,
    pub flash_timer: u32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            collected: false,
            bob_offset: 0.0,
            ticks: 0,
            flash_timer: 0,
        }
    }

    pub fn update(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.bob_offset = (self.ticks as f32 * POWERUP_BOB_SPEED).sin() * POWERUP_BOB_HEIGHT;
        self.flash_timer = (self.flash_timer + 1) % POWERUP_FLASH_PERIOD;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE).offset_y(self.bob_offset)
    }

    /// Blink phase
    pub fn visible(&self) -> bool {
        !self.collected && self.flash_timer < POWERUP_FLASH_VISIBLE
    }

    pub fn reset(&mut self) {
        self.collected = false;
        self.flash_timer = 0;
    }
}

/// A patrolling hazard
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub patrol: Oscillation,
}

impl Enemy {
    pub fn new(x: f32, y: f32, range: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            patrol: Oscillation::new(x, range, speed),
        }
    }

    pub fn update(&mut self) {
        self.patrol.step(&mut self.pos.x);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_SIZE, ENEMY_SIZE)
    }

    pub fn reset(&mut self) {
        self.pos.x = self.patrol.start_x;
        self.patrol.reset();
    }
}

/// Particle palette tags (the renderer owns the actual colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleKind {
    /// Kicked up when jumping
    Dust,
    /// Burst when taking damage
    Hurt,
    /// Shine when grabbing a collectible
    Sparkle,
}

/// A single cosmetic pixel
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Integrate one tick. Returns false once expired.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Remaining life in 0..=1
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    /// Tuning selected by difficulty
    pub physics: Physics,
    /// Index into the built-in level list
    pub level_index: usize,
    pub level_name: &'static str,
    /// World width in units (camera clamp and player bounds)
    pub level_width: f32,
    pub phase: GamePhase,
    /// Points gathered in the current attempt
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Whether particles are spawned at all
    pub particles_enabled: bool,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run at the given level
    pub fn new(seed: u64, physics: Physics, start_level: usize) -> Self {
        let level_index = start_level % level::LEVEL_COUNT;
        let def = level::builtin(level_index);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            physics,
            level_index,
            level_name: def.name,
            level_width: def.width,
            phase: GamePhase::Playing,
            score: 0,
            lives: physics.lives,
            time_ticks: 0,
            player: Player::new(def.spawn),
            camera: Camera::new(),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            particles_enabled: true,
            events: Vec::new(),
        };
        state.load_def(&def);
        state
    }

    /// Replace the entity lists with a level layout
    fn load_def(&mut self, def: &LevelDef) {
        self.level_name = def.name;
        self.level_width = def.width;
        self.player = Player::new(def.spawn);
        self.platforms = def.platforms.clone();
        self.collectibles = def.collectibles.clone();
        self.power_ups = def.power_ups.clone();
        self.enemies = def.enemies.clone();
        self.particles.clear();
        self.camera.snap();
        self.score = 0;
        self.phase = GamePhase::Playing;
        log::info!(
            "Loaded level {} '{}': {} platforms, {} collectibles, {} power-ups, {} enemies",
            self.level_index,
            def.name,
            self.platforms.len(),
            self.collectibles.len(),
            self.power_ups.len(),
            self.enemies.len()
        );
    }

    /// Switch to another built-in level (wraps around)
    pub fn load_level(&mut self, index: usize) {
        self.level_index = index % level::LEVEL_COUNT;
        let def = level::builtin(self.level_index);
        self.load_def(&def);
        self.events.push(GameEvent::LevelLoaded(self.level_index));
    }

    /// Start the current level over without rebuilding any entity
    pub fn restart_level(&mut self) {
        self.player.reset();
        self.camera.snap();
        self.score = 0;
        for platform in &mut self.platforms {
            platform.reset();
        }
        for collectible in &mut self.collectibles {
            collectible.reset();
        }
        for power_up in &mut self.power_ups {
            power_up.reset();
        }
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelRestarted);
        log::info!("Restarted level {} (lives: {})", self.level_index, self.lives);
    }

    /// Fresh run from the first level with full lives
    pub fn new_run(&mut self) {
        self.lives = self.physics.lives;
        self.load_level(0);
    }

    pub fn all_collected(&self) -> bool {
        self.collectibles.iter().all(|c| c.collected)
    }

    /// How far through the level the player is, 0..=100
    pub fn progress_percent(&self) -> u32 {
        if self.level_width <= 0.0 {
            return 0;
        }
        ((self.player.pos.x / self.level_width) * 100.0).clamp(0.0, 100.0) as u32
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= level::LEVEL_COUNT
    }

    /// Add a particle, respecting the global cap and the settings toggle
    pub fn spawn_particle(&mut self, pos: Vec2, vel: Vec2, kind: ParticleKind, life: u32) {
        if !self.particles_enabled || self.particles.len() >= MAX_PARTICLES {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            kind,
            life,
            max_life: life,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillation_reverses_at_bounds() {
        let mut osc = Oscillation::new(10.0, 4.0, 1.0);
        let mut x = 10.0;
        let mut seen = Vec::new();
        for _ in 0..10 {
            osc.step(&mut x);
            seen.push(x);
        }
        assert_eq!(seen, vec![11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 11.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_player_timers_count_down_to_zero() {
        let mut player = Player::new(Vec2::ZERO);
        player.apply_powerup(PowerUpKind::Speed);
        player.invincible = 1;
        player.tick_timers();
        assert_eq!(player.speed_boost, SPEED_BOOST_TICKS - 1);
        assert_eq!(player.invincible, 0);
        player.tick_timers();
        assert_eq!(player.invincible, 0);
    }

    #[test]
    fn test_powerup_durations() {
        let mut player = Player::new(Vec2::ZERO);
        player.apply_powerup(PowerUpKind::Jump);
        player.apply_powerup(PowerUpKind::Invincible);
        assert_eq!(player.jump_boost, JUMP_BOOST_TICKS);
        assert_eq!(player.invincible, INVINCIBLE_POWERUP_TICKS);
    }

    #[test]
    fn test_collectible_rect_follows_bob() {
        let mut c = Collectible::new(35.0, 82.0);
        for _ in 0..15 {
            c.update();
        }
        let rect = c.rect();
        assert_eq!(rect.x, 35.0);
        assert!((rect.y - (82.0 + c.bob_offset)).abs() < f32::EPSILON);
        assert!(c.bob_offset.abs() <= COLLECTIBLE_BOB_HEIGHT);
    }

    #[test]
    fn test_powerup_blinks() {
        let mut p = PowerUp::new(0.0, 0.0, PowerUpKind::Jump);
        let visible: usize = (0..POWERUP_FLASH_PERIOD)
            .filter(|_| {
                p.update();
                p.visible()
            })
            .count();
        assert_eq!(visible, POWERUP_FLASH_VISIBLE as usize);
    }

    #[test]
    fn test_particle_expires() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            kind: ParticleKind::Dust,
            life: 2,
            max_life: 2,
        };
        assert!(p.update());
        assert!((p.alpha() - 0.5).abs() < f32::EPSILON);
        assert!(!p.update());
        assert_eq!(p.pos.x, 2.0);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1, Physics::default(), 0);
        for _ in 0..MAX_PARTICLES + 10 {
            state.spawn_particle(Vec2::ZERO, Vec2::ZERO, ParticleKind::Dust, 10);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);

        state.particles.clear();
        state.particles_enabled = false;
        state.spawn_particle(Vec2::ZERO, Vec2::ZERO, ParticleKind::Dust, 10);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_restart_resets_in_place() {
        let mut state = GameState::new(7, Physics::default(), 0);
        let counts = (
            state.platforms.len(),
            state.collectibles.len(),
            state.power_ups.len(),
            state.enemies.len(),
        );

        state.player.pos = Vec2::new(300.0, 10.0);
        state.player.vel = Vec2::new(2.0, 3.0);
        state.score = 70;
        state.camera.x = 150.0;
        for c in state.collectibles.iter_mut().take(3) {
            c.collected = true;
        }

        state.restart_level();

        assert_eq!(state.player.pos, state.player.spawn);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.score, 0);
        assert_eq!(state.camera, Camera::default());
        assert!(state.collectibles.iter().all(|c| !c.collected));
        assert_eq!(
            counts,
            (
                state.platforms.len(),
                state.collectibles.len(),
                state.power_ups.len(),
                state.enemies.len(),
            )
        );
        assert_eq!(state.events.last(), Some(&GameEvent::LevelRestarted));
    }

    #[test]
    fn test_restart_rewinds_oscillators_and_effects() {
        use crate::sim::tick::{TickInput, tick};

        let mut state = GameState::new(11, Physics::default(), 2);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.platforms.iter().any(|p| p.motion.is_some_and(|m| p.rect.x != m.start_x)));
        assert!(state.enemies.iter().any(|e| e.pos.x != e.patrol.start_x));

        for power_up in &mut state.power_ups {
            power_up.collected = true;
        }
        state.player.apply_powerup(PowerUpKind::Speed);
        state.player.apply_powerup(PowerUpKind::Jump);
        state.player.invincible = 50;
        state.spawn_particle(Vec2::ZERO, Vec2::ONE, ParticleKind::Sparkle, 10);

        state.restart_level();

        for platform in &state.platforms {
            if let Some(motion) = platform.motion {
                assert_eq!(platform.rect.x, motion.start_x);
                assert_eq!(motion.direction, 1.0);
                assert_eq!(platform.last_dx, 0.0);
            }
        }
        for enemy in &state.enemies {
            assert_eq!(enemy.pos.x, enemy.patrol.start_x);
            assert_eq!(enemy.patrol.direction, 1.0);
        }
        assert!(state.power_ups.iter().all(|p| !p.collected && p.flash_timer == 0));
        assert_eq!(state.player.speed_boost, 0);
        assert_eq!(state.player.jump_boost, 0);
        assert_eq!(state.player.invincible, 0);
        assert!(state.particles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3, Physics::default(), 2);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["level_name"], "Gauntlet");
        assert_eq!(json["lives"], PLAYER_LIVES);
        assert!(json.get("rng").is_none());
        assert_eq!(json["enemies"].as_array().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_progress_percent() {
        let mut state = GameState::new(1, Physics::default(), 0);
        state.player.pos.x = state.level_width / 2.0;
        assert_eq!(state.progress_percent(), 50);
        state.player.pos.x = state.level_width * 2.0;
        assert_eq!(state.progress_percent(), 100);
    }
}
