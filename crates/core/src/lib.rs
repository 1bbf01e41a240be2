//! Core dungeon model - pure, deterministic, and testable
//!
//! This crate holds the chunked dungeon: tile catalogs, rotatable 4x4 chunks,
//! the seeded template generator, the board that places chunks in the world,
//! and per-tile convex collision volumes. It has **no dependencies** on a
//! terminal, a clock, or any rendering backend:
//!
//! - **Deterministic**: the same catalog and seed always produce the same board
//! - **Testable**: every module carries its own unit tests
//! - **Portable**: drawing goes through the [`Paint`] trait, so any renderer
//!   (terminal, GPU, a recording list in tests) can consume a frame
//!
//! # Module Structure
//!
//! - [`catalog`]: tile definitions, the built-in Oryx catalog, JSON loading
//! - [`tile`]: tile definitions, animation scripts and placed tiles
//! - [`chunk`]: 4x4 tile blocks with rotation-aware indexing
//! - [`generator`]: slot templates and the seeded chunk generator
//! - [`board`]: chunk grid, placement, tile-grid queries, world-to-screen layout
//! - [`collision`]: convex polygons and separating-axis overlap tests
//! - [`draw`]: the draw request contract and a recording painter
//! - [`snapshot`]: plain-data board snapshots with a reproducibility hash
//! - [`config`]: environment-driven board configuration
//! - [`rng`]: seeded LCG and per-cell seed derivation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tetrogue_core::{BoardConfig, ChunkTemplateGenerator, DrawList, GameBoard, TileCatalog};
//! use tetrogue_core::types::Direction;
//!
//! let catalog = TileCatalog::oryx();
//! let generator = ChunkTemplateGenerator::new(&catalog);
//! let mut board = GameBoard::generate(&BoardConfig::default(), &generator, 42).unwrap();
//!
//! board.rotate_chunk(0, 0, Direction::Clockwise).unwrap();
//! board.update().unwrap();
//!
//! let mut frame = DrawList::new();
//! board.draw(&catalog, Duration::from_millis(16), &mut frame).unwrap();
//! assert_eq!(frame.len(), 6 * 8 * 16);
//! ```
//!
//! # Frame loop
//!
//! Callers drive the board once per frame: [`GameBoard::update`] to place
//! tiles, then [`GameBoard::draw`] with the elapsed time since startup.
//! Animation frames are a pure function of that elapsed time.

pub mod board;
pub mod catalog;
pub mod chunk;
pub mod collision;
pub mod config;
pub mod draw;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use glam::Vec2;
pub use tetrogue_types as types;

// Re-export commonly used types for convenience
pub use board::{BoardLayout, GameBoard};
pub use catalog::{oryx_region, TileCatalog};
pub use chunk::Chunk;
pub use collision::CollisionVolume;
pub use config::BoardConfig;
pub use draw::{DrawList, DrawRequest, Paint};
pub use error::{CoreError, Result};
pub use generator::{ChunkTemplateGenerator, SlotClass};
pub use geometry::Transform;
pub use rng::{cell_seed, SimpleRng};
pub use snapshot::BoardSnapshot;
pub use tile::{AnimationScript, Tile, TileDefinition, TileId};
