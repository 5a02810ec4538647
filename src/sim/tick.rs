//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one host frame
//! per call.

use glam::Vec2;
use rand::Rng;

use super::aabb::Rect;
use super::state::{GameEvent, GamePhase, GameState, ParticleKind, Platform, Player};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (pressed this tick)
    pub jump: bool,
    /// Restart the level, or start a new run after game over (pressed)
    pub restart: bool,
    /// Continue to the next level once complete (pressed)
    pub advance: bool,
    /// Pause toggle (pressed)
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    if input.restart {
        match state.phase {
            GamePhase::GameOver => {
                log::info!("Starting a new run");
                state.new_run();
            }
            _ => state.restart_level(),
        }
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::LevelComplete => {
            if input.advance {
                advance_level(state);
            } else {
                update_particles(state);
                animate_items(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    for platform in &mut state.platforms {
        platform.update();
    }

    step_player(state, &input);
    if state.phase == GamePhase::GameOver {
        return;
    }

    for enemy in &mut state.enemies {
        enemy.update();
    }

    collect_items(state);
    update_particles(state);

    state.camera.update(state.player.pos.x, state.level_width);

    // Fell out of the world
    if state.player.pos.y > FALL_LIMIT {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::FellOff);
        if state.lives == 0 {
            game_over(state);
        } else {
            state.restart_level();
        }
        return;
    }

    if !state.collectibles.is_empty() && state.all_collected() {
        state.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete);
        log::info!(
            "Level {} '{}' complete with score {}",
            state.level_index,
            state.level_name,
            state.score
        );
    }
}

/// Input, gravity, integration, platform resolution, enemy contact, bounds
fn step_player(state: &mut GameState, input: &TickInput) {
    let physics = state.physics;
    let player = &mut state.player;

    player.tick_timers();

    let speed = if player.speed_boost > 0 {
        physics.player_speed * SPEED_BOOST_FACTOR
    } else {
        physics.player_speed
    };
    player.vel.x = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };

    let jumped = input.jump && player.on_ground;
    let take_off = player.pos;
    if jumped {
        player.vel.y = if player.jump_boost > 0 {
            physics.jump_strength * JUMP_BOOST_FACTOR
        } else {
            physics.jump_strength
        };
        player.on_ground = false;
    }

    player.vel.y += physics.gravity;
    player.pos += player.vel;

    resolve_platforms(player, &state.platforms);

    if jumped {
        state.events.push(GameEvent::Jumped);
        let size = state.player.size;
        for _ in 0..3 {
            let pos = Vec2::new(take_off.x + state.rng.random_range(0.0..=size.x), take_off.y + size.y);
            let vel = Vec2::new(
                state.rng.random_range(-1.0..=1.0),
                state.rng.random_range(-2.0..=0.0),
            );
            state.spawn_particle(pos, vel, ParticleKind::Dust, 15);
        }
    }

    if state.player.invincible == 0 {
        let player_rect = state.player.rect();
        if state.enemies.iter().any(|e| e.rect().overlaps(&player_rect)) {
            take_damage(state);
        }
    }

    let max_x = (state.level_width - state.player.size.x).max(0.0);
    state.player.pos.x = state.player.pos.x.clamp(0.0, max_x);
}

/// Vertical-only separation against every overlapping platform
///
/// Riders of a moving platform are carried by its displacement this tick.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) {
    player.on_ground = false;

    for platform in platforms {
        if !player.rect().overlaps(&platform.rect) {
            continue;
        }

        player.pos.x += platform.last_dx;

        if player.vel.y > 0.0 {
            // Falling: land on top
            if player.pos.y < platform.rect.y {
                player.pos.y = platform.rect.y - player.size.y;
                player.vel.y = 0.0;
                player.on_ground = true;
            }
        } else if player.vel.y < 0.0 {
            // Rising: bump the underside
            if player.pos.y > platform.rect.y {
                player.pos.y = platform.rect.bottom();
                player.vel.y = 0.0;
            }
        }
    }
}

fn take_damage(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.player.invincible = DAMAGE_INVINCIBLE_TICKS;
    state.events.push(GameEvent::Damaged);
    log::debug!("Player hit, {} lives left", state.lives);

    let center = state.player.rect().center();
    for _ in 0..10 {
        let vel = Vec2::new(
            state.rng.random_range(-3.0..=3.0),
            state.rng.random_range(-3.0..=1.0),
        );
        state.spawn_particle(center, vel, ParticleKind::Hurt, 30);
    }

    if state.lives == 0 {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver);
    log::info!(
        "Game over on level {} '{}' with score {}",
        state.level_index,
        state.level_name,
        state.score
    );
}

/// Animate collectibles and power-ups and pick up anything the player touches
fn collect_items(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut sparkles: Vec<Vec2> = Vec::new();

    for collectible in &mut state.collectibles {
        collectible.update();
        if !collectible.collected && player_rect.overlaps(&collectible.rect()) {
            collectible.collected = true;
            state.score += COLLECTIBLE_POINTS;
            state.events.push(GameEvent::Collected);
            sparkles.push(collectible.rect().center());
        }
    }

    for power_up in &mut state.power_ups {
        power_up.update();
        if !power_up.collected && player_rect.overlaps(&power_up.rect()) {
            power_up.collected = true;
            state.player.apply_powerup(power_up.kind);
            state.events.push(GameEvent::PoweredUp(power_up.kind));
            log::debug!("Picked up {:?}", power_up.kind);
        }
    }

    for center in sparkles {
        for i in 0..4 {
            let angle = i as f32 * std::f32::consts::FRAC_PI_2 + state.rng.random_range(0.0..0.5);
            let vel = Vec2::new(angle.cos(), angle.sin() - 1.0);
            state.spawn_particle(center, vel, ParticleKind::Sparkle, 12);
        }
    }
}

/// Keep pickups bobbing while nothing else moves
fn animate_items(state: &mut GameState) {
    for collectible in &mut state.collectibles {
        collectible.update();
    }
    for power_up in &mut state.power_ups {
        power_up.update();
    }
}

fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| p.update());
}

fn advance_level(state: &mut GameState) {
    if state.is_last_level() {
        state.events.push(GameEvent::RunComplete);
        log::info!("All levels cleared");
        state.load_level(0);
    } else {
        state.load_level(state.level_index + 1);
    }
}

/// Demo player: walk toward the nearest uncollected item and hop when needed
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    match state.phase {
        GamePhase::LevelComplete => {
            input.advance = true;
            return input;
        }
        GamePhase::GameOver => {
            input.restart = true;
            return input;
        }
        _ => {}
    }

    let player = &state.player;
    let center = player.rect().center();

    let target = state
        .collectibles
        .iter()
        .filter(|c| !c.collected)
        .map(|c| c.rect().center())
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return input;
    };

    // Vary the approach a little over time to avoid perfect loops
    let wobble = (state.time_ticks as f32 * 0.05).sin() * 2.0;
    let dx = target.x + wobble - center.x;
    input.left = dx < -1.0;
    input.right = dx > 1.0;

    let feet = player.pos.y + player.size.y;
    let probe_x = if input.right {
        player.pos.x + player.size.x + 2.0
    } else if input.left {
        player.pos.x - 2.0
    } else {
        center.x
    };
    let probe = Rect::new(probe_x, feet, 1.0, 4.0);
    let ground_ahead = state.platforms.iter().any(|p| p.rect.overlaps(&probe));
    let target_above = target.y < player.pos.y - 2.0 && dx.abs() < 24.0;

    input.jump = player.on_ground && (target_above || !ground_ahead);
    input
}
