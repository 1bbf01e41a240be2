//! Board snapshot - a plain-data picture of a ready board
//!
//! Renderers, tests and the viewer's side panel read snapshots instead of
//! walking chunks. The hash covers dimensions, every tile kind and every chunk
//! rotation, so two boards built from the same seed hash equal.

use crate::rng::fnv1a64;
use crate::types::{Rotation, TileType};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    /// Tile columns (chunks wide x 4)
    pub columns: usize,
    /// Tile rows (chunks high x 4)
    pub rows: usize,
    /// Tile kinds in screen raster order, row 0 at the top
    pub kinds: Vec<TileType>,
    /// Chunk rotations, `j` outer, `i` inner
    pub rotations: Vec<Rotation>,
    pub hash: u64,
}

impl BoardSnapshot {
    pub(crate) fn new(
        columns: usize,
        rows: usize,
        kinds: Vec<TileType>,
        rotations: Vec<Rotation>,
    ) -> Self {
        let hash = Self::compute_hash(columns, rows, &kinds, &rotations);
        Self {
            columns,
            rows,
            kinds,
            rotations,
            hash,
        }
    }

    fn compute_hash(columns: usize, rows: usize, kinds: &[TileType], rotations: &[Rotation]) -> u64 {
        let dims = (columns as u32)
            .to_le_bytes()
            .into_iter()
            .chain((rows as u32).to_le_bytes());
        let kinds = kinds.iter().map(|k| k.code());
        let rotations = rotations.iter().map(|r| r.quarter_turns());
        fnv1a64(dims.chain(kinds).chain(rotations))
    }

    pub fn kind_at(&self, column: usize, row: usize) -> Option<TileType> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.kinds.get(row * self.columns + column).copied()
    }

    /// One row of tile kinds, top row first
    pub fn row(&self, row: usize) -> Option<&[TileType]> {
        let start = row.checked_mul(self.columns)?;
        self.kinds.get(start..start + self.columns)
    }

    pub fn count(&self, kind: TileType) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }
}
