//! Viewer state: the board being shown plus cursor and overlay flags.

use anyhow::{Context, Result};

use tetrogue::core::{BoardConfig, ChunkTemplateGenerator, GameBoard, TileCatalog};
use tetrogue::term::ViewStatus;
use tetrogue::types::{BoardAction, Direction};

pub struct Viewer<'a> {
    catalog: &'a TileCatalog,
    config: BoardConfig,
    board: GameBoard,
    seed: u64,
    cursor: (usize, usize),
    show_colliders: bool,
    hash: u64,
}

impl<'a> Viewer<'a> {
    pub fn new(catalog: &'a TileCatalog, config: BoardConfig, seed: u64) -> Result<Self> {
        let board = build(catalog, &config, seed)?;
        let hash = board.snapshot()?.hash;
        Ok(Self {
            catalog,
            config,
            board,
            seed,
            cursor: (0, config.height.saturating_sub(1)),
            show_colliders: false,
            hash,
        })
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut GameBoard {
        &mut self.board
    }

    pub fn status(&self) -> ViewStatus {
        ViewStatus {
            seed: self.seed,
            cursor: self.cursor,
            show_colliders: self.show_colliders,
            hash: self.hash,
        }
    }

    pub fn apply(&mut self, action: BoardAction) -> Result<()> {
        let (i, j) = self.cursor;
        let max_i = self.board.width().saturating_sub(1);
        let max_j = self.board.height().saturating_sub(1);
        match action {
            BoardAction::CursorLeft => self.cursor.0 = i.saturating_sub(1),
            BoardAction::CursorRight => self.cursor.0 = (i + 1).min(max_i),
            // Up the screen is up in world space: higher j.
            BoardAction::CursorUp => self.cursor.1 = (j + 1).min(max_j),
            BoardAction::CursorDown => self.cursor.1 = j.saturating_sub(1),
            BoardAction::RotateCw => self.rotate(Direction::Clockwise)?,
            BoardAction::RotateCcw => self.rotate(Direction::CounterClockwise)?,
            BoardAction::Regenerate => {
                let seed = self.seed.wrapping_add(1);
                self.board = build(self.catalog, &self.config, seed)?;
                self.seed = seed;
                self.hash = self.board.snapshot()?.hash;
            }
            BoardAction::ToggleColliders => self.show_colliders = !self.show_colliders,
        }
        Ok(())
    }

    fn rotate(&mut self, direction: Direction) -> Result<()> {
        let (i, j) = self.cursor;
        self.board.rotate_chunk(i, j, direction)?;
        self.hash = self.board.snapshot()?.hash;
        tracing::debug!(i, j, ?direction, "rotated chunk");
        Ok(())
    }
}

fn build(catalog: &TileCatalog, config: &BoardConfig, seed: u64) -> Result<GameBoard> {
    GameBoard::generate(config, &ChunkTemplateGenerator::new(catalog), seed)
        .with_context(|| format!("generate board from seed {seed}"))
}
