//! World-space transforms.

use glam::Vec2;

use crate::types::DEFAULT_TILE_DEPTH;

/// Position, rotation, scale and depth of something placed in the world.
///
/// World y grows upward; the rendering layer flips it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
    /// Local point that ends up at `position`.
    pub pivot: Vec2,
    /// 0.0 (back) to 1.0 (front).
    pub depth: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Map a point from local space into world space.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let scaled = (local - self.pivot) * self.scale;
        self.position + Vec2::from_angle(self.rotation).rotate(scaled)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            pivot: Vec2::ZERO,
            depth: DEFAULT_TILE_DEPTH,
        }
    }
}
