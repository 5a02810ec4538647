//! Rendering module
//!
//! Paints a `GameState` through the host's `Canvas` each frame, in a fixed
//! order: background, platforms, items, enemies, particles, player, HUD.
//! World positions go through the camera; the HUD is screen-fixed.

pub mod canvas;
pub mod framebuffer;

pub use canvas::{Canvas, Color, colors};
pub use framebuffer::{Framebuffer, Rgb8, TextRun};

use glam::Vec2;

use crate::consts::{PARALLAX_FACTOR, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{
    Camera, Collectible, Enemy, GamePhase, GameState, Particle, ParticleKind, Platform, Player,
    PowerUp, PowerUpKind,
};

/// HUD toggles
#[derive(Debug, Clone, Copy)]
pub struct DrawOptions {
    pub show_progress: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// Draw one complete frame
pub fn draw<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C, options: DrawOptions) {
    let camera = &state.camera;

    canvas.pen(colors::BLACK);
    canvas.clear();

    draw_background(state, canvas);

    for platform in &state.platforms {
        draw_platform(platform, camera, canvas);
    }
    for collectible in &state.collectibles {
        draw_collectible(collectible, camera, canvas);
    }
    for power_up in &state.power_ups {
        draw_power_up(power_up, camera, canvas);
    }
    for enemy in &state.enemies {
        draw_enemy(enemy, camera, canvas);
    }
    for particle in &state.particles {
        draw_particle(particle, camera, canvas);
    }

    draw_player(&state.player, camera, canvas);
    draw_ui(state, canvas, options);
}

fn screen(camera: &Camera, world: Vec2) -> (i32, i32) {
    let s = camera.world_to_screen(world);
    (s.x as i32, s.y as i32)
}

/// Distant hills that scroll slower than the camera
fn draw_background<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    canvas.pen(colors::HILLS);
    let step = 80;
    let mut i = 0;
    while (i as f32) < state.level_width {
        let bg_x = i as f32 - state.camera.x * PARALLAX_FACTOR;
        if bg_x > -20.0 && bg_x < SCREEN_WIDTH as f32 + 20.0 {
            for y in 0..5 {
                canvas.hline(bg_x as i32 + 10 - y, 80 + y, y * 2);
            }
        }
        i += step;
    }
}

fn draw_platform<C: Canvas + ?Sized>(platform: &Platform, camera: &Camera, canvas: &mut C) {
    let rect = platform.rect;
    if !camera.is_on_screen(rect.x, rect.w) {
        return;
    }
    let (x, y) = screen(camera, Vec2::new(rect.x, rect.y));
    let (w, h) = (rect.w as i32, rect.h as i32);

    canvas.pen(if platform.is_moving() { colors::GRAY } else { colors::BROWN });
    canvas.frect(x, y, w, h);

    // Top edge detail
    canvas.pen(colors::DARK_BROWN);
    canvas.hline(x, y, w);
    if h > 4 {
        canvas.pen(colors::LIGHT_BROWN);
        canvas.hline(x, y + 1, w);
    }

    // Direction arrow on moving platforms
    if let Some(motion) = platform.motion {
        canvas.pen(colors::WHITE);
        let cx = x + w / 2;
        let cy = y + h / 2;
        if motion.direction > 0.0 {
            canvas.pixel(cx + 1, cy);
        } else {
            canvas.pixel(cx - 1, cy);
        }
    }
}

fn draw_collectible<C: Canvas + ?Sized>(collectible: &Collectible, camera: &Camera, canvas: &mut C) {
    if collectible.collected || !camera.is_on_screen(collectible.pos.x, collectible.size) {
        return;
    }
    let (x, y) = screen(camera, collectible.pos + Vec2::new(0.0, collectible.bob_offset));
    let size = collectible.size as i32;

    canvas.pen(colors::YELLOW);
    canvas.frect(x, y, size, size);

    // Shine
    canvas.pen(colors::WHITE);
    canvas.pixel(x + 1, y + 1);
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Speed => colors::GREEN,
        PowerUpKind::Jump => colors::PURPLE,
        PowerUpKind::Invincible => colors::ORANGE,
    }
}

fn draw_power_up<C: Canvas + ?Sized>(power_up: &PowerUp, camera: &Camera, canvas: &mut C) {
    let rect = power_up.rect();
    if !power_up.visible() || !camera.is_on_screen(rect.x, rect.w) {
        return;
    }
    let (x, y) = screen(camera, Vec2::new(rect.x, rect.y));
    let size = rect.w as i32;

    canvas.pen(power_up_color(power_up.kind));
    canvas.frect(x, y, size, size);

    canvas.pen(colors::WHITE);
    let cx = x + size / 2;
    let cy = y + size / 2;
    match power_up.kind {
        PowerUpKind::Speed => {
            canvas.pixel(cx - 1, cy);
            canvas.pixel(cx + 1, cy);
        }
        PowerUpKind::Jump => {
            canvas.pixel(cx, cy - 1);
            canvas.pixel(cx, cy + 1);
        }
        PowerUpKind::Invincible => canvas.pixel(cx, cy),
    }
}

fn draw_enemy<C: Canvas + ?Sized>(enemy: &Enemy, camera: &Camera, canvas: &mut C) {
    let rect = enemy.rect();
    if !camera.is_on_screen(rect.x, rect.w) {
        return;
    }
    let (x, y) = screen(camera, enemy.pos);

    canvas.pen(colors::RED);
    canvas.frect(x, y, rect.w as i32, rect.h as i32);

    // Angry eyes
    canvas.pen(colors::WHITE);
    canvas.pixel(x + 2, y + 2);
    canvas.pixel(x + 5, y + 2);
}

fn draw_particle<C: Canvas + ?Sized>(particle: &Particle, camera: &Camera, canvas: &mut C) {
    if particle.alpha() <= 0.0 {
        return;
    }
    let color = match particle.kind {
        ParticleKind::Dust => colors::WHITE,
        ParticleKind::Hurt => colors::RED,
        ParticleKind::Sparkle => colors::YELLOW,
    };
    canvas.pen(color);
    let (x, y) = screen(camera, particle.pos);
    canvas.pixel(x, y);
}

/// Player color reflects the strongest active effect
pub fn player_color(player: &Player) -> Color {
    if player.speed_boost > 0 {
        colors::GREEN
    } else if player.jump_boost > 0 {
        colors::PURPLE
    } else if player.invincible > 0 {
        colors::ORANGE
    } else {
        colors::BLUE
    }
}

fn draw_player<C: Canvas + ?Sized>(player: &Player, camera: &Camera, canvas: &mut C) {
    // Blink while invincible
    if player.invincible > 0 && (player.invincible / 5) % 2 == 1 {
        return;
    }
    if !camera.is_on_screen(player.pos.x, player.size.x) {
        return;
    }
    let (x, y) = screen(camera, player.pos);

    canvas.pen(player_color(player));
    canvas.frect(x, y, player.size.x as i32, player.size.y as i32);

    // Eyes
    canvas.pen(colors::WHITE);
    canvas.pixel(x + 2, y + 2);
    canvas.pixel(x + 5, y + 2);
}

fn draw_ui<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C, options: DrawOptions) {
    canvas.pen(colors::WHITE);
    canvas.text(&format!("Score: {}", state.score), 2, 2);
    if options.show_progress {
        canvas.text(&format!("Progress: {}%", state.progress_percent()), 2, 12);
    }
    canvas.text(&format!("Lives: {}", state.lives), 80, 2);
    canvas.text("X: Restart", 2, SCREEN_HEIGHT as i32 - 10);

    match state.phase {
        GamePhase::LevelComplete => {
            canvas.pen(colors::GREEN);
            canvas.text("Level Complete!", 25, 60);
            if state.is_last_level() {
                canvas.text("B: Play again", 20, 70);
            } else {
                canvas.text("B: Next level", 20, 70);
            }
            canvas.text("X: Restart", 30, 80);
        }
        GamePhase::GameOver => {
            canvas.pen(colors::RED);
            canvas.text("Game Over", 35, 60);
            canvas.text("Press X to restart", 15, 70);
        }
        GamePhase::Paused => {
            canvas.pen(colors::YELLOW);
            canvas.text("Paused", 42, 60);
        }
        GamePhase::Playing => {}
    }
}
