//! Board module - a rectangular grid of chunks
//!
//! Cells are addressed `(i, j)`: `i` runs along x (left to right), `j` along
//! world y, which points up. Cell storage is row-major (`j * width + i`) and
//! every traversal (update, draw, snapshot hashing) visits `j` outer, `i`
//! inner, so paint order is stable across frames.
//!
//! Chunk `(i, j)` is anchored at
//! `position + (i * chunk_edge * unit, j * chunk_edge * unit)`.
//! Inside a chunk, tile rows step down in y, so the top of the screen is the
//! highest `j`. The logical tile grid used by [`GameBoard::tile_at`] and
//! friends follows the screen: row 0 is the top row of chunk row
//! `height - 1`.

use std::ops::Index;
use std::time::Duration;

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::catalog::TileCatalog;
use crate::chunk::Chunk;
use crate::collision::CollisionVolume;
use crate::config::BoardConfig;
use crate::draw::Paint;
use crate::error::{CoreError, Result};
use crate::generator::ChunkTemplateGenerator;
use crate::rng::cell_seed;
use crate::snapshot::BoardSnapshot;
use crate::tile::Tile;
use crate::types::{Direction, Tint, CHUNK_SIZE, TILE_SPACING};

#[derive(Debug, Clone, PartialEq)]
pub struct GameBoard {
    width: usize,
    height: usize,
    chunk_edge: usize,
    unit: f32,
    position: Vec2,
    tint: Tint,
    /// Row-major (j * width + i); `None` until assigned
    cells: Vec<Option<Chunk>>,
}

impl GameBoard {
    /// Empty board; every cell starts unassigned.
    pub fn new(width: usize, height: usize, chunk_edge: usize) -> Self {
        Self {
            width,
            height,
            chunk_edge,
            unit: TILE_SPACING,
            position: Vec2::ZERO,
            tint: Tint::WHITE,
            cells: vec![None; width * height],
        }
    }

    /// Build a ready board, one generated chunk per cell.
    ///
    /// Cell `(i, j)` is generated from `cell_seed(board_seed, i, j)`. The
    /// first failing cell aborts assembly; no partial board is returned.
    pub fn generate(
        config: &BoardConfig,
        generator: &ChunkTemplateGenerator<'_>,
        board_seed: u64,
    ) -> Result<Self> {
        let mut board = Self::new(config.width, config.height, config.chunk_edge);
        board.position = config.origin;
        board.unit = config.unit;

        for j in 0..board.height {
            for i in 0..board.width {
                let chunk = generator.generate(cell_seed(board_seed, i, j))?;
                board.assign(i, j, chunk)?;
            }
        }
        board.update()?;

        tracing::info!(
            board_seed,
            width = board.width,
            height = board.height,
            "board assembled"
        );
        Ok(board)
    }

    #[inline(always)]
    fn index(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.width || j >= self.height {
            return Err(CoreError::out_of_range(i, j, self.width, self.height));
        }
        Ok(j * self.width + i)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn chunk_edge(&self) -> usize {
        self.chunk_edge
    }

    /// Put `chunk` at `(i, j)`, returning whatever was there before.
    pub fn assign(&mut self, i: usize, j: usize, chunk: Chunk) -> Result<Option<Chunk>> {
        let idx = self.index(i, j)?;
        Ok(self.cells[idx].replace(chunk))
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&Chunk> {
        let idx = self.index(i, j)?;
        self.cells[idx]
            .as_ref()
            .ok_or(CoreError::CellNotInitialized { i, j })
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut Chunk> {
        let idx = self.index(i, j)?;
        self.cells[idx]
            .as_mut()
            .ok_or(CoreError::CellNotInitialized { i, j })
    }

    /// Every cell has a chunk.
    pub fn is_ready(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.cells.iter().position(Option::is_none) {
            Some(idx) => Err(CoreError::CellNotInitialized {
                i: idx % self.width,
                j: idx / self.width,
            }),
            None => Ok(()),
        }
    }

    pub fn chunk_origin(&self, i: usize, j: usize) -> Vec2 {
        let step = self.chunk_edge as f32 * self.unit;
        self.position + Vec2::new(i as f32 * step, j as f32 * step)
    }

    /// Move every chunk to its origin and reposition its tiles.
    pub fn update(&mut self) -> Result<()> {
        self.ensure_ready()?;
        for j in 0..self.height {
            for i in 0..self.width {
                let origin = self.chunk_origin(i, j);
                let chunk = self.get_mut(i, j)?;
                chunk.set_position(origin);
                chunk.update();
            }
        }
        Ok(())
    }

    /// Issue draw requests for every tile, chunk by chunk.
    pub fn draw(&self, catalog: &TileCatalog, elapsed: Duration, mut painter: impl Paint) -> Result<()> {
        self.ensure_ready()?;
        for j in 0..self.height {
            for i in 0..self.width {
                self.get(i, j)?.draw(catalog, elapsed, self.tint, &mut painter);
            }
        }
        Ok(())
    }

    /// Rotate one chunk and re-place its tiles so colliders stay current.
    pub fn rotate_chunk(&mut self, i: usize, j: usize, direction: Direction) -> Result<()> {
        let origin = self.chunk_origin(i, j);
        let chunk = self.get_mut(i, j)?;
        chunk.rotate(direction);
        chunk.set_position(origin);
        chunk.update();
        Ok(())
    }

    /// Assigned chunks with their cell coordinates, `j` outer, `i` inner.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Chunk)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|c| ((idx % width, idx / width), c)))
    }

    pub fn tile_columns(&self) -> usize {
        self.width * CHUNK_SIZE
    }

    pub fn tile_rows(&self) -> usize {
        self.height * CHUNK_SIZE
    }

    /// Resolve a tile-grid coordinate to `((i, j), (x, y))`: the chunk cell
    /// and the logical slot inside it.
    pub fn locate(&self, column: usize, row: usize) -> Result<((usize, usize), (usize, usize))> {
        if column >= self.tile_columns() || row >= self.tile_rows() {
            return Err(CoreError::out_of_range(
                column,
                row,
                self.tile_columns(),
                self.tile_rows(),
            ));
        }
        let i = column / CHUNK_SIZE;
        let j = self.height - 1 - row / CHUNK_SIZE;
        Ok(((i, j), (column % CHUNK_SIZE, row % CHUNK_SIZE)))
    }

    pub fn tile_at(&self, column: usize, row: usize) -> Result<&Tile> {
        let ((i, j), (x, y)) = self.locate(column, row)?;
        self.get(i, j)?.get(x, y)
    }

    /// In-bounds 4-connected neighbours, ordered north, east, south, west.
    pub fn neighbors(&self, column: usize, row: usize) -> Result<ArrayVec<(usize, usize), 4>> {
        self.locate(column, row)?;
        let mut out = ArrayVec::new();
        if row > 0 {
            out.push((column, row - 1));
        }
        if column + 1 < self.tile_columns() {
            out.push((column + 1, row));
        }
        if row + 1 < self.tile_rows() {
            out.push((column, row + 1));
        }
        if column > 0 {
            out.push((column - 1, row));
        }
        Ok(out)
    }

    /// Tile-grid coordinates of every tile whose collider overlaps `volume`.
    ///
    /// Unassigned cells contribute nothing.
    pub fn overlapping(&self, volume: &CollisionVolume) -> Vec<(usize, usize)> {
        let mut hits = Vec::new();
        for row in 0..self.tile_rows() {
            for column in 0..self.tile_columns() {
                if let Ok(tile) = self.tile_at(column, row) {
                    if tile.overlaps(volume) {
                        hits.push((column, row));
                    }
                }
            }
        }
        hits
    }

    pub fn layout(&self) -> BoardLayout {
        let chunk_px = self.chunk_edge as f32 * self.unit;
        let top = self.position.y + self.height.saturating_sub(1) as f32 * chunk_px;
        BoardLayout {
            origin: Vec2::new(self.position.x, top),
            chunk_px,
            tile_px: TILE_SPACING,
            chunks_wide: self.width,
            chunks_high: self.height,
        }
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot> {
        self.ensure_ready()?;
        let mut kinds = Vec::with_capacity(self.tile_columns() * self.tile_rows());
        for row in 0..self.tile_rows() {
            for column in 0..self.tile_columns() {
                kinds.push(self.tile_at(column, row)?.kind());
            }
        }
        let rotations = self.iter().map(|(_, chunk)| chunk.rotation()).collect();
        Ok(BoardSnapshot::new(
            self.tile_columns(),
            self.tile_rows(),
            kinds,
            rotations,
        ))
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the board. Takes effect on the next [`GameBoard::update`].
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn set_unit(&mut self, unit: f32) {
        self.unit = unit;
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }
}

impl Index<(usize, usize)> for GameBoard {
    type Output = Chunk;

    fn index(&self, (i, j): (usize, usize)) -> &Chunk {
        match self.get(i, j) {
            Ok(chunk) => chunk,
            Err(err) => panic!("{}", err),
        }
    }
}

/// World-to-screen mapping for renderers.
///
/// `origin` is the top-left corner of the board in world space (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin: Vec2,
    /// Distance between chunk origins
    pub chunk_px: f32,
    /// Distance between tiles inside a chunk
    pub tile_px: f32,
    pub chunks_wide: usize,
    pub chunks_high: usize,
}

impl BoardLayout {
    pub fn columns(&self) -> usize {
        self.chunks_wide * CHUNK_SIZE
    }

    pub fn rows(&self) -> usize {
        self.chunks_high * CHUNK_SIZE
    }

    /// Tile-grid `(column, row)` whose cell contains the world point, if any.
    ///
    /// Points in the gap between chunks (when `chunk_px` exceeds four tiles)
    /// map to nothing.
    pub fn screen_cell(&self, world: Vec2) -> Option<(usize, usize)> {
        let column = Self::axis(world.x - self.origin.x, self.chunk_px, self.tile_px)?;
        let row = Self::axis(self.origin.y - world.y, self.chunk_px, self.tile_px)?;
        (column < self.columns() && row < self.rows()).then_some((column, row))
    }

    fn axis(offset: f32, chunk_px: f32, tile_px: f32) -> Option<usize> {
        if !offset.is_finite() || offset < 0.0 || chunk_px <= 0.0 || tile_px <= 0.0 {
            return None;
        }
        let chunk = (offset / chunk_px).floor();
        let within = ((offset - chunk * chunk_px) / tile_px).floor() as usize;
        (within < CHUNK_SIZE).then(|| chunk as usize * CHUNK_SIZE + within)
    }
}
