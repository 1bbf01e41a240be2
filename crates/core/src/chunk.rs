//! Chunk module - a 4x4 block of tiles with a rotation
//!
//! Tiles live in an unrotated, row-major backing array (`y * 4 + x`). The
//! rotation is metadata: [`Chunk::get`] and [`Chunk::set`] remap logical
//! coordinates through [`Rotation::remap`] before touching the array, and
//! [`Chunk::rotate`] only changes that metadata.
//!
//! Because `set` goes through the rotated view, a chunk is always populated
//! at rotation North via [`Chunk::from_tiles`]; writing through `set` after a
//! rotation lands wherever the rotation maps the logical slot.

use std::fmt;
use std::time::Duration;

use glam::Vec2;

use crate::catalog::TileCatalog;
use crate::draw::Paint;
use crate::error::{CoreError, Result};
use crate::tile::Tile;
use crate::types::{Direction, Rotation, Tint, CHUNK_CELLS, CHUNK_SIZE, TILE_SPACING};

#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Row-major, unrotated (y * CHUNK_SIZE + x)
    tiles: [Tile; CHUNK_CELLS],
    position: Vec2,
    rotation: Rotation,
}

impl Chunk {
    /// Build a chunk at rotation North from raster-ordered tiles.
    pub fn from_tiles(tiles: [Tile; CHUNK_CELLS]) -> Self {
        Self {
            tiles,
            position: Vec2::ZERO,
            rotation: Rotation::North,
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= CHUNK_SIZE || y >= CHUNK_SIZE {
            return Err(CoreError::out_of_range(x, y, CHUNK_SIZE, CHUNK_SIZE));
        }
        let (px, py) = self.rotation.remap(x, y);
        Ok(py * CHUNK_SIZE + px)
    }

    /// Tile at logical `(x, y)` under the current rotation
    pub fn get(&self, x: usize, y: usize) -> Result<&Tile> {
        let idx = self.index(x, y)?;
        Ok(&self.tiles[idx])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Tile> {
        let idx = self.index(x, y)?;
        Ok(&mut self.tiles[idx])
    }

    /// Replace the tile at logical `(x, y)`, returning the previous one
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) -> Result<Tile> {
        let idx = self.index(x, y)?;
        Ok(std::mem::replace(&mut self.tiles[idx], tile))
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Quarter-turn the chunk. Tile data stays where it is.
    pub fn rotate(&mut self, direction: Direction) {
        self.rotation = self.rotation.rotate(direction);
        tracing::trace!(rotation = self.rotation.as_str(), "chunk rotated");
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Tiles in backing-array order (independent of rotation)
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Recompute every tile's world position (and collider).
    ///
    /// Iterates logical slots and writes through the rotated view, so the
    /// chunk's content appears rotated while iteration stays logical.
    pub fn update(&mut self) {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let (px, py) = self.rotation.remap(x, y);
                let offset = Vec2::new(TILE_SPACING * x as f32, -TILE_SPACING * y as f32);
                self.tiles[py * CHUNK_SIZE + px].set_position(self.position + offset);
            }
        }
    }

    /// Issue one draw request per tile, in backing-array order.
    pub fn draw(&self, catalog: &TileCatalog, elapsed: Duration, tint: Tint, mut painter: impl Paint) {
        for tile in &self.tiles {
            let request = tile.draw_request(&catalog[tile.id()], elapsed, tint);
            painter.paint(&request);
        }
    }

    /// Textual dump using the catalog regions (logical raster order).
    pub fn display<'a>(&'a self, catalog: &'a TileCatalog) -> ChunkDisplay<'a> {
        ChunkDisplay {
            chunk: self,
            catalog,
        }
    }
}

/// [`fmt::Display`] adapter from [`Chunk::display`]
pub struct ChunkDisplay<'a> {
    chunk: &'a Chunk,
    catalog: &'a TileCatalog,
}

impl fmt::Display for ChunkDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let idx = self.chunk.index(x, y).map_err(|_| fmt::Error)?;
                let region = self.catalog[self.chunk.tiles[idx].id()].region;
                write!(f, "{},{}\t", region.x, region.y)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{TileDefinition, TileId};
    use crate::types::{Rect, TileType};

    /// One definition per cell so every tile is distinguishable by id.
    fn numbered() -> (TileCatalog, Chunk) {
        let defs: Vec<TileDefinition> = (0..CHUNK_CELLS as u32)
            .map(|i| TileDefinition::new(Rect::new(i * 24, 0, 24, 24), TileType::Wall))
            .collect();
        let catalog = TileCatalog::new(defs);
        let tiles = std::array::from_fn(|i| Tile::new(TileId(i), &catalog[TileId(i)]));
        (catalog, Chunk::from_tiles(tiles))
    }

    fn id_at(chunk: &Chunk, x: usize, y: usize) -> usize {
        chunk.get(x, y).unwrap().id().0
    }

    #[test]
    fn unrotated_access_is_raster_order() {
        let (_, chunk) = numbered();
        assert_eq!(id_at(&chunk, 0, 0), 0);
        assert_eq!(id_at(&chunk, 3, 0), 3);
        assert_eq!(id_at(&chunk, 0, 1), 4);
        assert_eq!(id_at(&chunk, 3, 3), 15);
    }

    #[test]
    fn rotation_remaps_reads() {
        let (_, mut chunk) = numbered();
        chunk.rotate(Direction::Clockwise);
        // (0,0) -> physical (0,3) -> index 12
        assert_eq!(id_at(&chunk, 0, 0), 12);
        chunk.rotate(Direction::Clockwise);
        // (0,0) -> physical (3,3)
        assert_eq!(id_at(&chunk, 0, 0), 15);
        chunk.rotate(Direction::Clockwise);
        // (0,0) -> physical (3,0)
        assert_eq!(id_at(&chunk, 0, 0), 3);
    }

    #[test]
    fn rotate_never_moves_tiles() {
        let (_, mut chunk) = numbered();
        let before: Vec<TileId> = chunk.tiles().iter().map(|t| t.id()).collect();
        chunk.rotate(Direction::CounterClockwise);
        let after: Vec<TileId> = chunk.tiles().iter().map(|t| t.id()).collect();
        assert_eq!(before, after);
        assert_eq!(chunk.rotation(), Rotation::West);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let (catalog, mut chunk) = numbered();
        assert!(matches!(chunk.get(4, 0), Err(CoreError::IndexOutOfRange { .. })));
        assert!(matches!(chunk.get(0, 4), Err(CoreError::IndexOutOfRange { .. })));
        let tile = Tile::new(TileId(0), &catalog[TileId(0)]);
        assert!(chunk.set(7, 7, tile).is_err());
    }

    #[test]
    fn set_writes_through_rotated_view() {
        let (catalog, mut chunk) = numbered();
        chunk.rotate(Direction::Clockwise);
        let replacement = Tile::new(TileId(9), &catalog[TileId(9)]);
        let old = chunk.set(0, 0, replacement).unwrap();
        assert_eq!(old.id(), TileId(12));
        // Physical slot (0, 3) was written, not (0, 0).
        assert_eq!(chunk.tiles()[12].id(), TileId(9));
        assert_eq!(chunk.tiles()[0].id(), TileId(0));
    }

    #[test]
    fn update_places_tiles_on_the_logical_grid() {
        let (_, mut chunk) = numbered();
        chunk.set_position(Vec2::new(100.0, 50.0));
        chunk.update();
        assert_eq!(chunk.get(0, 0).unwrap().transform().position, Vec2::new(100.0, 50.0));
        assert_eq!(chunk.get(2, 1).unwrap().transform().position, Vec2::new(148.0, 26.0));

        chunk.rotate(Direction::Clockwise);
        chunk.update();
        // The tile from physical (0, 3) now sits at the logical origin.
        assert_eq!(chunk.tiles()[12].transform().position, Vec2::new(100.0, 50.0));
        assert_eq!(chunk.get(3, 3).unwrap().transform().position, Vec2::new(172.0, -22.0));
    }

    #[test]
    fn update_refreshes_colliders() {
        let (_, mut chunk) = numbered();
        chunk.set_position(Vec2::new(0.0, 0.0));
        chunk.update();
        let tile = chunk.get(1, 1).unwrap();
        let verts = tile.collider().unwrap().world_vertices();
        assert!(verts.contains(&Vec2::new(24.0, -24.0)));
        assert!(verts.contains(&Vec2::new(48.0, -48.0)));
    }

    #[test]
    fn display_lists_regions_in_logical_order() {
        let (catalog, chunk) = numbered();
        let text = chunk.display(&catalog).to_string();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "0,0\t24,0\t48,0\t72,0\t");
        assert_eq!(text.lines().count(), 4);
    }
}
