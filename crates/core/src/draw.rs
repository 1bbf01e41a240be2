//! Draw contract between the board and whatever rasterizes it.
//!
//! The core computes every field of a [`DrawRequest`]; a [`Paint`]
//! implementation only turns requests into pixels (or terminal cells).

use crate::geometry::Transform;
use crate::rng::fnv1a64;
use crate::types::{Rect, TileType, Tint, VisualSource};

/// One tile draw, fully resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub source: VisualSource,
    /// Sub-region of the source (already the current animation frame).
    pub region: Rect,
    /// Animation frame index, 0 for static tiles.
    pub frame: usize,
    pub kind: TileType,
    /// World transform; `transform.depth` orders paint within a layer.
    pub transform: Transform,
    pub tint: Tint,
}

/// Paint capability handed to the board each frame.
pub trait Paint {
    fn paint(&mut self, request: &DrawRequest);
}

impl<P: Paint + ?Sized> Paint for &mut P {
    fn paint(&mut self, request: &DrawRequest) {
        (**self).paint(request);
    }
}

/// Painter that records requests in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    requests: Vec<DrawRequest>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[DrawRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// FNV-1a hash over the ordered requests.
    ///
    /// Two frames with the same paint order, regions, kinds and positions hash
    /// equal, which is what visual regression checks compare.
    pub fn hash(&self) -> u64 {
        let bytes = self.requests.iter().flat_map(|r| {
            let mut buf = [0u8; 27];
            buf[0..2].copy_from_slice(&r.source.0.to_le_bytes());
            buf[2..6].copy_from_slice(&r.region.x.to_le_bytes());
            buf[6..10].copy_from_slice(&r.region.y.to_le_bytes());
            buf[10..14].copy_from_slice(&r.region.width.to_le_bytes());
            buf[14..18].copy_from_slice(&r.region.height.to_le_bytes());
            buf[18] = r.kind.code();
            buf[19..23].copy_from_slice(&r.transform.position.x.to_bits().to_le_bytes());
            buf[23..27].copy_from_slice(&r.transform.position.y.to_bits().to_le_bytes());
            buf
        });
        fnv1a64(bytes)
    }
}

impl Paint for DrawList {
    fn paint(&mut self, request: &DrawRequest) {
        self.requests.push(*request);
    }
}
