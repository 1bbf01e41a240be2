//! Error taxonomy for board construction and queries.
//!
//! Every variant is a construction-time or precondition failure. Nothing here
//! is transient, so there is no retry story: callers stop assembling the board.

use thiserror::Error;

use crate::generator::SlotClass;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no definition eligible for a template slot.
    #[error("catalog has no tile eligible for {slot} slot at ({x}, {y})")]
    CatalogExhausted { x: usize, y: usize, slot: SlotClass },

    /// A board cell was read before a chunk was assigned to it.
    #[error("board cell ({i}, {j}) has no chunk assigned")]
    CellNotInitialized { i: usize, j: usize },

    /// Chunk, board or tile-grid coordinates outside the valid range.
    #[error("index ({x}, {y}) out of range for {width}x{height} grid")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid animation: {0}")]
    InvalidAnimation(&'static str),

    #[error("invalid polygon: {0}")]
    InvalidPolygon(&'static str),

    #[error("invalid tile catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn out_of_range(x: usize, y: usize, width: usize, height: usize) -> Self {
        CoreError::IndexOutOfRange {
            x,
            y,
            width,
            height,
        }
    }
}
