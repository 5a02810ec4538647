//! Horizontal scrolling camera
//!
//! Follows the player with exponential smoothing toward a clamped target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_FOLLOW_SPEED, CAMERA_OFFSET, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Left edge of the view in world units
    pub x: f32,
    /// Where the camera is easing toward
    pub target_x: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest valid camera x for a level of the given width
    pub fn max_x(level_width: f32) -> f32 {
        (level_width - SCREEN_WIDTH as f32).max(0.0)
    }

    /// Ease toward the player, keeping the target inside the level
    pub fn update(&mut self, player_x: f32, level_width: f32) {
        self.target_x = (player_x - CAMERA_OFFSET).clamp(0.0, Self::max_x(level_width));
        self.x += (self.target_x - self.x) * CAMERA_FOLLOW_SPEED;
    }

    /// Jump back to the start of the level
    pub fn snap(&mut self) {
        self.x = 0.0;
        self.target_x = 0.0;
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y)
    }

    /// Whether a span `[world_x, world_x + width]` touches the view
    pub fn is_on_screen(&self, world_x: f32, width: f32) -> bool {
        world_x + width >= self.x && world_x <= self.x + SCREEN_WIDTH as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_camera_eases_toward_target() {
        let mut cam = Camera::new();
        cam.update(240.0, 480.0);
        assert_eq!(cam.target_x, 200.0);
        assert!((cam.x - 20.0).abs() < 0.001);

        for _ in 0..200 {
            cam.update(240.0, 480.0);
        }
        assert!((cam.x - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_camera_clamps_at_level_edges() {
        let mut cam = Camera::new();
        cam.update(10.0, 480.0);
        assert_eq!(cam.target_x, 0.0);

        cam.update(479.0, 480.0);
        assert_eq!(cam.target_x, 360.0);
    }

    #[test]
    fn test_single_screen_level_never_scrolls() {
        let mut cam = Camera::new();
        for _ in 0..50 {
            cam.update(110.0, 120.0);
        }
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn test_world_to_screen_and_visibility() {
        let cam = Camera { x: 100.0, target_x: 100.0 };
        assert_eq!(cam.world_to_screen(Vec2::new(130.0, 50.0)), Vec2::new(30.0, 50.0));
        assert!(cam.is_on_screen(95.0, 10.0));
        assert!(cam.is_on_screen(220.0, 8.0));
        assert!(!cam.is_on_screen(80.0, 10.0));
        assert!(!cam.is_on_screen(221.0, 8.0));
    }

    #[test]
    fn test_snap() {
        let mut cam = Camera { x: 57.0, target_x: 80.0 };
        cam.snap();
        assert_eq!(cam, Camera::default());
    }

    proptest! {
        #[test]
        fn camera_stays_within_level(
            xs in proptest::collection::vec(-100.0f32..600.0, 1..200),
            level_width in prop_oneof![Just(120.0f32), Just(240.0), Just(480.0)],
        ) {
            let mut cam = Camera::new();
            let max_x = Camera::max_x(level_width);
            for player_x in xs {
                cam.update(player_x, level_width);
                prop_assert!(cam.target_x >= 0.0 && cam.target_x <= max_x);
                prop_assert!(cam.x >= 0.0 && cam.x <= max_x + 1e-3);
            }
        }
    }
}
