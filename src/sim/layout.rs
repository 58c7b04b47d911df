//! Level layouts: platforms, player spawn and enemy placement

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geom::Rect;

/// A static platform. Only its top surface is solid for walkers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// Available level layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutPreset {
    /// Thick ground slab, three wide ledges, enemies dropped at fixed points
    #[default]
    Rooftops,
    /// Thin ground strip, five narrow ledges, enemies scattered along the top
    Ledges,
}

impl LayoutPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPreset::Rooftops => "Rooftops",
            LayoutPreset::Ledges => "Ledges",
        }
    }

    /// Build the layout this preset describes
    pub fn build(&self) -> Layout {
        match self {
            LayoutPreset::Rooftops => Layout {
                platforms: vec![
                    Platform::new(0.0, 450.0, 800.0, 50.0),
                    Platform::new(100.0, 350.0, 150.0, 20.0),
                    Platform::new(300.0, 280.0, 150.0, 20.0),
                    Platform::new(550.0, 380.0, 200.0, 20.0),
                ],
                spawn: Vec2::new(50.0, 400.0),
                enemies: EnemyPlacement::Fixed(vec![
                    Vec2::new(200.0, 200.0),
                    Vec2::new(300.0, 100.0),
                    Vec2::new(500.0, 300.0),
                    Vec2::new(600.0, 150.0),
                    Vec2::new(400.0, 250.0),
                ]),
            },
            LayoutPreset::Ledges => Layout {
                platforms: vec![
                    Platform::new(0.0, 480.0, 800.0, 20.0),
                    Platform::new(150.0, 380.0, 100.0, 15.0),
                    Platform::new(300.0, 300.0, 120.0, 15.0),
                    Platform::new(500.0, 350.0, 150.0, 15.0),
                    Platform::new(700.0, 270.0, 80.0, 15.0),
                ],
                spawn: Vec2::new(100.0, 0.0),
                enemies: EnemyPlacement::Scattered { count: 5, y: 0.0 },
            },
        }
    }
}

/// Layout name that matches no preset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout preset `{0}`")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutPreset {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rooftops" | "roof" => Ok(LayoutPreset::Rooftops),
            "ledges" => Ok(LayoutPreset::Ledges),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}

/// Where enemies start on every reset
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyPlacement {
    /// One enemy per listed top-left position
    Fixed(Vec<Vec2>),
    /// `count` enemies at random x along row `y`
    Scattered { count: usize, y: f32 },
}

impl EnemyPlacement {
    pub fn count(&self) -> usize {
        match self {
            EnemyPlacement::Fixed(points) => points.len(),
            EnemyPlacement::Scattered { count, .. } => *count,
        }
    }
}

/// A fully built level
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub platforms: Vec<Platform>,
    /// Player top-left spawn point, also the respawn point after a hit
    pub spawn: Vec2,
    pub enemies: EnemyPlacement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

    #[test]
    fn test_preset_names_round_trip() {
        for preset in [LayoutPreset::Rooftops, LayoutPreset::Ledges] {
            assert_eq!(preset.as_str().parse(), Ok(preset));
        }
        assert_eq!(
            "castle".parse::<LayoutPreset>(),
            Err(UnknownLayout("castle".to_string()))
        );
    }

    #[test]
    fn test_platforms_fit_arena() {
        for preset in [LayoutPreset::Rooftops, LayoutPreset::Ledges] {
            let layout = preset.build();
            assert_eq!(layout.enemies.count(), 5);
            for platform in &layout.platforms {
                let r = platform.rect;
                assert!(r.w > 0.0 && r.h > 0.0);
                assert!(r.x >= 0.0 && r.right() <= ARENA_WIDTH);
                assert!(r.y >= 0.0 && r.bottom() <= ARENA_HEIGHT);
            }
        }
    }
}
