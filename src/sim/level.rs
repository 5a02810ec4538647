//! Built-in level layouts
//!
//! Each layout is plain data: world width, spawn point and the entity lists a
//! `GameState` is populated from. Coordinates are world units, y down.

use glam::Vec2;

use super::state::{Collectible, Enemy, Platform, PowerUp, PowerUpKind};
use crate::consts::SCREEN_WIDTH;

/// Number of built-in levels
pub const LEVEL_COUNT: usize = 3;

/// Width of the scrolling level (four screens)
pub const HILLS_WIDTH: f32 = 480.0;

/// A level layout
#[derive(Debug, Clone)]
pub struct LevelDef {
    pub name: &'static str,
    pub width: f32,
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
}

/// Look up a built-in level (indices wrap)
pub fn builtin(index: usize) -> LevelDef {
    match index % LEVEL_COUNT {
        0 => hills(),
        1 => tower(),
        _ => gauntlet(),
    }
}

fn fixed(rects: &[(f32, f32, f32, f32)]) -> impl Iterator<Item = Platform> + '_ {
    rects.iter().map(|&(x, y, w, h)| Platform::fixed(x, y, w, h))
}

fn coins(points: &[(f32, f32)]) -> Vec<Collectible> {
    points.iter().map(|&(x, y)| Collectible::new(x, y)).collect()
}

/// Four screens of rolling ledges over a continuous floor
fn hills() -> LevelDef {
    let mut platforms: Vec<Platform> = (0..HILLS_WIDTH as u32)
        .step_by(60)
        .map(|x| Platform::fixed(x as f32, 110.0, 60.0, 10.0))
        .collect();

    platforms.extend(fixed(&[
        // Starting area
        (30.0, 90.0, 20.0, 8.0),
        (70.0, 80.0, 25.0, 8.0),
        // Section 1
        (120.0, 95.0, 30.0, 8.0),
        (170.0, 85.0, 20.0, 8.0),
        (210.0, 75.0, 25.0, 8.0),
        (160.0, 65.0, 15.0, 8.0),
        (250.0, 90.0, 30.0, 8.0),
        // Section 2, higher up
        (300.0, 100.0, 25.0, 8.0),
        (340.0, 85.0, 20.0, 8.0),
        (280.0, 70.0, 15.0, 8.0),
        (320.0, 55.0, 20.0, 8.0),
        (370.0, 70.0, 25.0, 8.0),
        (410.0, 55.0, 20.0, 8.0),
        // Section 3, the climb
        (450.0, 95.0, 15.0, 8.0),
        (420.0, 80.0, 15.0, 8.0),
        (390.0, 65.0, 15.0, 8.0),
        (360.0, 50.0, 15.0, 8.0),
        (330.0, 35.0, 15.0, 8.0),
        (370.0, 25.0, 30.0, 8.0),
        // Floating
        (100.0, 50.0, 15.0, 6.0),
        (180.0, 45.0, 15.0, 6.0),
        (260.0, 40.0, 15.0, 6.0),
        (340.0, 35.0, 15.0, 6.0),
    ]));

    let collectibles = coins(&[
        (35.0, 82.0),
        (125.0, 87.0),
        (175.0, 77.0),
        (215.0, 67.0),
        (265.0, 82.0),
        (305.0, 92.0),
        (285.0, 62.0),
        (325.0, 47.0),
        (375.0, 62.0),
        (415.0, 47.0),
        (395.0, 57.0),
        (365.0, 42.0),
        (335.0, 27.0),
        (385.0, 17.0),
        (80.0, 42.0),
        (185.0, 37.0),
        (265.0, 32.0),
        (345.0, 27.0),
        (455.0, 87.0),
        (425.0, 72.0),
    ]);

    LevelDef {
        name: "Hills",
        width: HILLS_WIDTH,
        spawn: Vec2::new(50.0, 80.0),
        platforms,
        collectibles,
        power_ups: Vec::new(),
        enemies: Vec::new(),
    }
}

/// A single-screen climb with a shuttle over the floor gap
fn tower() -> LevelDef {
    let mut platforms: Vec<Platform> = fixed(&[
        // Ground, split by a gap
        (0.0, 110.0, 40.0, 10.0),
        (60.0, 110.0, 60.0, 10.0),
        // Middle
        (30.0, 90.0, 20.0, 8.0),
        (70.0, 80.0, 25.0, 8.0),
        (15.0, 70.0, 20.0, 8.0),
        (80.0, 60.0, 30.0, 8.0),
        // Upper
        (10.0, 50.0, 25.0, 8.0),
        (50.0, 40.0, 30.0, 8.0),
        (90.0, 30.0, 25.0, 8.0),
        // Top
        (40.0, 20.0, 40.0, 8.0),
    ])
    .collect();
    platforms.push(Platform::moving(40.0, 110.0, 12.0, 4.0, 8.0, 0.5));

    LevelDef {
        name: "Tower",
        width: SCREEN_WIDTH as f32,
        spawn: Vec2::new(10.0, 90.0),
        platforms,
        collectibles: coins(&[
            (35.0, 82.0),
            (78.0, 72.0),
            (20.0, 62.0),
            (88.0, 52.0),
            (20.0, 42.0),
            (65.0, 32.0),
            (98.0, 22.0),
            (55.0, 12.0),
        ]),
        power_ups: vec![PowerUp::new(100.0, 98.0, PowerUpKind::Jump)],
        enemies: Vec::new(),
    }
}

/// Sparse stepping stones guarded by patrollers
fn gauntlet() -> LevelDef {
    let mut platforms: Vec<Platform> = fixed(&[
        // Ground islands
        (0.0, 110.0, 20.0, 10.0),
        (100.0, 110.0, 20.0, 10.0),
        // Scattered
        (40.0, 100.0, 15.0, 8.0),
        (20.0, 85.0, 15.0, 8.0),
        (80.0, 85.0, 15.0, 8.0),
        (50.0, 70.0, 15.0, 8.0),
        (10.0, 55.0, 15.0, 8.0),
        (90.0, 55.0, 15.0, 8.0),
        (35.0, 40.0, 15.0, 8.0),
        (70.0, 40.0, 15.0, 8.0),
        (55.0, 25.0, 15.0, 8.0),
    ])
    .collect();
    platforms.push(Platform::moving(20.0, 112.0, 16.0, 6.0, 64.0, 0.75));

    LevelDef {
        name: "Gauntlet",
        width: SCREEN_WIDTH as f32,
        spawn: Vec2::new(5.0, 90.0),
        platforms,
        collectibles: coins(&[
            (45.0, 92.0),
            (25.0, 77.0),
            (85.0, 77.0),
            (55.0, 62.0),
            (15.0, 47.0),
            (95.0, 47.0),
            (40.0, 32.0),
            (75.0, 32.0),
            (60.0, 17.0),
        ]),
        power_ups: vec![
            PowerUp::new(25.0, 72.0, PowerUpKind::Speed),
            PowerUp::new(85.0, 72.0, PowerUpKind::Invincible),
        ],
        enemies: vec![
            Enemy::new(100.0, 102.0, 12.0, 0.5),
            Enemy::new(50.0, 62.0, 7.0, 0.25),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hills_layout() {
        let def = builtin(0);
        assert_eq!(def.name, "Hills");
        // 8 ground strips + 23 ledges
        assert_eq!(def.platforms.len(), 31);
        assert_eq!(def.collectibles.len(), 20);
        assert!(def.enemies.is_empty());
    }

    #[test]
    fn test_builtin_wraps() {
        assert_eq!(builtin(LEVEL_COUNT).name, builtin(0).name);
        assert_eq!(builtin(LEVEL_COUNT + 2).name, "Gauntlet");
    }

    #[test]
    fn test_everything_inside_level_bounds() {
        for i in 0..LEVEL_COUNT {
            let def = builtin(i);
            for p in &def.platforms {
                let reach = p.motion.map(|m| m.range).unwrap_or(0.0);
                assert!(p.rect.x >= 0.0 && p.rect.right() + reach <= def.width, "{}: {:?}", def.name, p.rect);
            }
            for c in &def.collectibles {
                assert!(c.pos.x >= 0.0 && c.pos.x + c.size <= def.width);
            }
            assert!(def.spawn.x >= 0.0 && def.spawn.x < def.width);
        }
    }
}
