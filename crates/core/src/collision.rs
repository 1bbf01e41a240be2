//! Collision module - convex polygons with separating-axis overlap tests
//!
//! A [`CollisionVolume`] keeps its local footprint and the world-space vertices
//! computed from the last transform. World vertices are recomputed from
//! scratch on every [`CollisionVolume::transform`] call; nothing is patched
//! incrementally.
//!
//! Overlap uses an exclusive convention: polygons that only touch along an
//! edge or at a corner do not overlap. Degenerate polygons (fewer than three
//! vertices, or no area relative to their extent) never overlap anything.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::error::{CoreError, Result};
use crate::geometry::Transform;
use crate::types::TILE_SPACING;

/// Maximum vertices in a collision polygon
pub const MAX_VERTICES: usize = 8;

type Vertices = ArrayVec<Vec2, MAX_VERTICES>;

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionVolume {
    local: Vertices,
    world: Vertices,
}

impl CollisionVolume {
    /// Build a volume from convex local-space vertices in winding order.
    ///
    /// The world vertices start equal to the local ones (identity transform).
    pub fn from_vertices(vertices: &[Vec2]) -> Result<Self> {
        if vertices.len() > MAX_VERTICES {
            return Err(CoreError::InvalidPolygon("more than 8 vertices"));
        }
        if !is_convex(vertices) {
            return Err(CoreError::InvalidPolygon("not convex"));
        }
        let local: Vertices = vertices.iter().copied().collect();
        Ok(Self {
            world: local.clone(),
            local,
        })
    }

    /// Axis-aligned rectangle centred on the local origin.
    pub fn rect(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::from_corners(Vec2::new(-hw, -hh), Vec2::new(hw, hh))
    }

    /// Footprint of one board tile: the square from `(0, 0)` to
    /// `(TILE_SPACING, -TILE_SPACING)`, matching how tiles step down in y.
    pub fn tile_footprint() -> Self {
        Self::from_corners(
            Vec2::new(0.0, -TILE_SPACING),
            Vec2::new(TILE_SPACING, 0.0),
        )
    }

    fn from_corners(min: Vec2, max: Vec2) -> Self {
        let local: Vertices = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
        .into_iter()
        .collect();
        Self {
            world: local.clone(),
            local,
        }
    }

    /// Recompute world vertices from the local footprint.
    pub fn transform(&mut self, transform: &Transform) {
        self.world.clear();
        for &v in &self.local {
            self.world.push(transform.apply(v));
        }
    }

    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local
    }

    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world
    }

    /// Unsigned world-space area (shoelace formula).
    pub fn area(&self) -> f32 {
        let n = self.world.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.world[i];
            let b = self.world[(i + 1) % n];
            twice += a.perp_dot(b);
        }
        (twice / 2.0).abs()
    }

    /// Fewer than three vertices, or an area that vanishes relative to the
    /// polygon's own extent.
    pub fn is_degenerate(&self) -> bool {
        if self.world.len() < 3 {
            return true;
        }
        let (lo, hi) = self.world.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        );
        let extent = (hi - lo).max_element();
        self.area() <= f32::EPSILON * extent * extent
    }

    /// Separating-axis test against another volume.
    pub fn overlaps(&self, other: &CollisionVolume) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        for axis in self.axes().chain(other.axes()) {
            let (min_a, max_a) = project(&self.world, axis);
            let (min_b, max_b) = project(&other.world, axis);
            if max_a <= min_b || max_b <= min_a {
                return false;
            }
        }
        true
    }

    /// Edge normals (unnormalised); zero-length edges are skipped.
    fn axes(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.world.len();
        (0..n).filter_map(move |i| {
            let edge = self.world[(i + 1) % n] - self.world[i];
            if edge == Vec2::ZERO {
                None
            } else {
                Some(edge.perp())
            }
        })
    }
}

/// Convex in either winding, or flat. Flat input (every turn collinear) is
/// accepted and later treated as degenerate.
fn is_convex(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    let edges: Vertices = (0..n)
        .map(|i| vertices[(i + 1) % n] - vertices[i])
        .filter(|e| *e != Vec2::ZERO)
        .collect();
    if edges.len() < 3 {
        return true;
    }

    let mut sign = 0.0f32;
    let mut reversals = false;
    let mut turning = 0.0f32;
    for (i, &a) in edges.iter().enumerate() {
        let b = edges[(i + 1) % edges.len()];
        let cross = a.perp_dot(b);
        if cross == 0.0 {
            reversals |= a.dot(b) < 0.0;
            continue;
        }
        if sign != 0.0 && cross.signum() != sign {
            return false;
        }
        sign = cross.signum();
        turning += cross.atan2(a.dot(b));
    }
    if sign == 0.0 {
        return true;
    }
    // A star winds around more than once without ever changing turn direction.
    !reversals && (turning.abs() - std::f32::consts::TAU).abs() < 0.5
}

fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for v in vertices {
        let p = v.dot(axis);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}
