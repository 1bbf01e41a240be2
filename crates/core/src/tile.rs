//! Tile definitions, animation scripts and tile instances.
//!
//! A [`TileDefinition`] is an immutable catalog entry. A [`Tile`] is one placed
//! instance: it refers back to its definition by [`TileId`] and owns its
//! transform and (optionally) a collision volume.

use std::time::Duration;

use glam::Vec2;

use crate::collision::CollisionVolume;
use crate::draw::DrawRequest;
use crate::error::{CoreError, Result};
use crate::geometry::Transform;
use crate::types::{Rect, TileType, Tint, VisualSource};

/// Index of a definition inside a [`crate::TileCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub(crate) usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Frame offset inside an animation strip, in frame-size units.
pub type FrameOffset = (u32, u32);

/// Cyclic filmstrip animation.
///
/// Frame selection is a pure function of elapsed time: there is no cursor to
/// advance, so the same elapsed time always picks the same frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationScript {
    frames: Vec<FrameOffset>,
    cycle: Duration,
}

impl AnimationScript {
    pub fn new(frames: Vec<FrameOffset>, cycle: Duration) -> Result<Self> {
        if frames.is_empty() {
            return Err(CoreError::InvalidAnimation("no frames"));
        }
        if cycle.is_zero() {
            return Err(CoreError::InvalidAnimation("zero cycle duration"));
        }
        Ok(Self { frames, cycle })
    }

    pub fn frames(&self) -> &[FrameOffset] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// `floor(elapsed * frame_count / cycle) mod frame_count`
    pub fn frame_index(&self, elapsed: Duration) -> usize {
        let n = self.frames.len() as u128;
        let cycle = self.cycle.as_nanos();
        // Reducing to the position inside one cycle keeps the product small.
        let into_cycle = elapsed.as_nanos() % cycle;
        (into_cycle.saturating_mul(n) / cycle) as usize
    }

    /// Whether every frame of a strip starting at `base` stays inside `u32`
    /// pixel space.
    pub fn fits(&self, base: Rect) -> bool {
        base.x.checked_add(base.width).is_some() && base.y.checked_add(base.height).is_some()
    }

    /// Sub-rectangle of `base` showing the frame for `elapsed`.
    ///
    /// `base` covers the whole strip; the frame size is the strip divided by
    /// the number of columns/rows the offsets span.
    pub fn frame_region(&self, base: Rect, elapsed: Duration) -> Rect {
        let cols = self.frames.iter().map(|f| f.0).max().unwrap_or(0).saturating_add(1);
        let rows = self.frames.iter().map(|f| f.1).max().unwrap_or(0).saturating_add(1);
        let w = base.width / cols;
        let h = base.height / rows;
        let (fx, fy) = self.frames[self.frame_index(elapsed)];
        Rect::new(
            base.x.saturating_add(fx.saturating_mul(w)),
            base.y.saturating_add(fy.saturating_mul(h)),
            w,
            h,
        )
    }
}

/// Immutable tile archetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefinition {
    pub source: VisualSource,
    pub region: Rect,
    pub kind: TileType,
    pub animation: Option<AnimationScript>,
    /// Whether instances carry a collision volume.
    pub collides: bool,
}

impl TileDefinition {
    /// Static definition on the environment sheet.
    pub fn new(region: Rect, kind: TileType) -> Self {
        Self {
            source: VisualSource::ENVIRONMENT,
            region,
            kind,
            animation: None,
            collides: kind.collides_by_default(),
        }
    }

    pub fn animated(region: Rect, kind: TileType, animation: AnimationScript) -> Self {
        Self {
            animation: Some(animation),
            ..Self::new(region, kind)
        }
    }

    pub fn with_source(mut self, source: VisualSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_collision(mut self, collides: bool) -> Self {
        self.collides = collides;
        self
    }

    /// Region to draw at `elapsed` (current animation frame, if any).
    pub fn region_at(&self, elapsed: Duration) -> Rect {
        match &self.animation {
            Some(anim) => anim.frame_region(self.region, elapsed),
            None => self.region,
        }
    }

    pub fn frame_at(&self, elapsed: Duration) -> usize {
        self.animation
            .as_ref()
            .map_or(0, |anim| anim.frame_index(elapsed))
    }
}

/// A placed tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    kind: TileType,
    transform: Transform,
    collider: Option<CollisionVolume>,
}

impl Tile {
    pub fn new(id: TileId, definition: &TileDefinition) -> Self {
        let transform = Transform::default();
        let collider = definition.collides.then(|| {
            let mut volume = CollisionVolume::tile_footprint();
            volume.transform(&transform);
            volume
        });
        Self {
            id,
            kind: definition.kind,
            transform,
            collider,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> TileType {
        self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn collider(&self) -> Option<&CollisionVolume> {
        self.collider.as_ref()
    }

    pub fn has_collider(&self) -> bool {
        self.collider.is_some()
    }

    /// Replace the transform and refresh the collider.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh_collider();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
        self.refresh_collider();
    }

    fn refresh_collider(&mut self) {
        if let Some(volume) = &mut self.collider {
            volume.transform(&self.transform);
        }
    }

    /// Whether this tile's collider overlaps `volume`.
    ///
    /// Tiles without a collider never overlap.
    pub fn overlaps(&self, volume: &CollisionVolume) -> bool {
        self.collider
            .as_ref()
            .is_some_and(|own| own.overlaps(volume))
    }

    pub(crate) fn draw_request(
        &self,
        definition: &TileDefinition,
        elapsed: Duration,
        tint: Tint,
    ) -> DrawRequest {
        DrawRequest {
            source: definition.source,
            region: definition.region_at(elapsed),
            frame: definition.frame_at(elapsed),
            kind: self.kind,
            transform: self.transform,
            tint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blink() -> AnimationScript {
        AnimationScript::new(vec![(0, 0), (1, 0)], Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn frame_index_follows_elapsed_time() {
        let anim = blink();
        assert_eq!(anim.frame_index(Duration::ZERO), 0);
        assert_eq!(anim.frame_index(Duration::from_millis(499)), 0);
        assert_eq!(anim.frame_index(Duration::from_millis(500)), 1);
        assert_eq!(anim.frame_index(Duration::from_millis(999)), 1);
        assert_eq!(anim.frame_index(Duration::from_millis(1000)), 0);
        assert_eq!(anim.frame_index(Duration::from_millis(12_750)), 1);
    }

    #[test]
    fn frame_region_slices_the_strip() {
        let anim = blink();
        let strip = Rect::new(24, 0, 48, 24);
        assert_eq!(anim.frame_region(strip, Duration::ZERO), Rect::new(24, 0, 24, 24));
        assert_eq!(
            anim.frame_region(strip, Duration::from_millis(600)),
            Rect::new(48, 0, 24, 24)
        );
    }

    #[test]
    fn animation_rejects_empty_or_instant_cycles() {
        assert!(AnimationScript::new(vec![], Duration::from_secs(1)).is_err());
        assert!(AnimationScript::new(vec![(0, 0)], Duration::ZERO).is_err());
    }

    #[test]
    fn tiny_cycles_do_not_divide_by_zero() {
        let anim = AnimationScript::new(vec![(0, 0), (1, 0), (2, 0)], Duration::from_nanos(1)).unwrap();
        assert!(anim.frame_index(Duration::from_millis(5)) < 3);
    }

    #[test]
    fn uneven_cycle_keeps_last_frame_until_wrap() {
        let anim = AnimationScript::new(vec![(0, 0), (1, 0), (2, 0)], Duration::from_secs(1)).unwrap();
        assert_eq!(anim.frame_index(Duration::from_nanos(333_333_333)), 0);
        assert_eq!(anim.frame_index(Duration::from_nanos(333_333_334)), 1);
        assert_eq!(anim.frame_index(Duration::from_nanos(999_999_999)), 2);
        assert_eq!(anim.frame_index(Duration::from_secs(1)), 0);
        assert_eq!(anim.frame_index(Duration::from_nanos(100_000_000_000_000 - 1)), 2);
    }

    #[test]
    fn strip_near_u32_edge_does_not_overflow() {
        let anim = blink();
        let base = Rect::new(u32::MAX - 5, 0, 48, 24);
        assert!(!anim.fits(base));
        assert!(anim.fits(Rect::new(0, 0, 48, 24)));
        let region = anim.frame_region(base, Duration::from_millis(600));
        assert_eq!(region.x, u32::MAX);
        assert_eq!(region.width, 24);

        let far = AnimationScript::new(vec![(0, 0), (u32::MAX, 0)], Duration::from_secs(1)).unwrap();
        let region = far.frame_region(Rect::new(10, 0, 48, 24), Duration::from_millis(600));
        assert_eq!(region.width, 0);
    }

    #[test]
    fn collider_follows_definition_capability() {
        let wall = TileDefinition::new(Rect::new(0, 0, 24, 24), TileType::Wall);
        let floor = TileDefinition::new(Rect::new(0, 0, 24, 24), TileType::Floor);
        assert!(Tile::new(TileId(0), &wall).has_collider());
        assert!(!Tile::new(TileId(1), &floor).has_collider());
        assert!(Tile::new(TileId(1), &floor.with_collision(true)).has_collider());
    }

    #[test]
    fn moving_a_tile_moves_its_collider() {
        let wall = TileDefinition::new(Rect::new(0, 0, 24, 24), TileType::Wall);
        let mut tile = Tile::new(TileId(0), &wall);
        tile.set_position(Vec2::new(48.0, 24.0));

        let collider = tile.collider().unwrap();
        assert!(collider.world_vertices().contains(&Vec2::new(48.0, 0.0)));
        assert!(collider.world_vertices().contains(&Vec2::new(72.0, 24.0)));

        let mut probe = CollisionVolume::rect(2.0, 2.0);
        probe.transform(&Transform::at(Vec2::new(60.0, 12.0)));
        assert!(tile.overlaps(&probe));
        probe.transform(&Transform::at(Vec2::new(0.0, 12.0)));
        assert!(!tile.overlaps(&probe));
    }

    #[test]
    fn static_definition_draws_its_region() {
        let def = TileDefinition::new(Rect::new(120, 0, 24, 24), TileType::Floor);
        assert_eq!(def.region_at(Duration::from_secs(9)), def.region);
        assert_eq!(def.frame_at(Duration::from_secs(9)), 0);
    }
}
