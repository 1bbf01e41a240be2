//! BoardView: paints a `core::GameBoard` into a terminal framebuffer.
//!
//! The view is the board's [`Paint`] collaborator: every draw request is
//! mapped through the board's [`BoardLayout`] to a tile-grid cell, then to a
//! glyph. Tiles are `cell_w` columns wide to compensate for the glyph aspect
//! ratio. Boards taller than the terminal scroll so the cursor chunk stays
//! visible.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use crate::core::{BoardLayout, DrawRequest, GameBoard, Paint, Result, TileCatalog};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{TileType, CHUNK_SIZE};

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);
const CURSOR_BG: Rgb = Rgb::new(40, 60, 110);
const COLLIDER_BG: Rgb = Rgb::new(90, 30, 30);
const PANEL_W: u16 = 24;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Viewer state shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewStatus {
    pub seed: u64,
    /// Selected chunk `(i, j)`
    pub cursor: (usize, usize),
    pub show_colliders: bool,
    /// Snapshot hash of the current board
    pub hash: u64,
}

/// Where the board landed in the framebuffer for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewGeometry {
    /// Terminal column of tile column 0
    pub inner_x: u16,
    /// Terminal row of the first visible tile row
    pub inner_y: u16,
    /// Tile rows scrolled off the top
    pub scroll: usize,
    pub visible_rows: usize,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl ViewGeometry {
    /// Terminal position of tile `(column, row)`, if it is on screen.
    pub fn cell_origin(&self, column: usize, row: usize, cell_w: u16) -> Option<(u16, u16)> {
        let visible = row.checked_sub(self.scroll).filter(|&r| r < self.visible_rows)?;
        let x = u16::try_from(column).ok()?.checked_mul(cell_w)?.checked_add(self.inner_x)?;
        let y = u16::try_from(visible).ok()?.checked_add(self.inner_y)?;
        Some((x, y))
    }
}

/// Terminal renderer for a chunked board.
pub struct BoardView {
    /// Tile width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Placement of the board for the given viewport and cursor.
    pub fn geometry(&self, board: &GameBoard, status: &ViewStatus, viewport: Viewport) -> ViewGeometry {
        let layout = board.layout();
        let rows = layout.rows();
        let visible_rows = rows.min(viewport.height.saturating_sub(2) as usize);

        let frame_w = (layout.columns() as u16).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = (visible_rows as u16).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w.saturating_add(PANEL_W)) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let scroll = if rows <= visible_rows {
            0
        } else {
            let j = status.cursor.1.min(board.height().saturating_sub(1));
            let cursor_top = (board.height() - 1 - j) * CHUNK_SIZE;
            (cursor_top + CHUNK_SIZE / 2)
                .saturating_sub(visible_rows / 2)
                .min(rows - visible_rows)
        };

        ViewGeometry {
            inner_x: start_x + 1,
            inner_y: start_y + 1,
            scroll,
            visible_rows,
            frame_w,
            frame_h,
        }
    }

    /// Render the board into an existing framebuffer.
    ///
    /// Fails only when the board is not ready.
    pub fn render_into(
        &self,
        board: &GameBoard,
        catalog: &TileCatalog,
        elapsed: Duration,
        status: &ViewStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Result<()> {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let geo = self.geometry(board, status, viewport);
        let layout = board.layout();

        let inner_w = geo.frame_w.saturating_sub(2);
        fb.fill_rect(
            geo.inner_x,
            geo.inner_y,
            inner_w,
            geo.visible_rows as u16,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(
            fb,
            geo.inner_x - 1,
            geo.inner_y - 1,
            geo.frame_w,
            geo.frame_h,
            CellStyle::default(),
        );

        let mut painter = TilePainter {
            fb: &mut *fb,
            layout,
            geo,
            cell_w: self.cell_w,
        };
        board.draw(catalog, elapsed, &mut painter)?;

        if status.show_colliders {
            for row in 0..layout.rows() {
                for column in 0..layout.columns() {
                    if board.tile_at(column, row)?.has_collider() {
                        self.shade(fb, &geo, column, row, COLLIDER_BG);
                    }
                }
            }
        }

        let (ci, cj) = status.cursor;
        if ci < board.width() && cj < board.height() {
            let top = (board.height() - 1 - cj) * CHUNK_SIZE;
            for row in top..top + CHUNK_SIZE {
                for column in ci * CHUNK_SIZE..(ci + 1) * CHUNK_SIZE {
                    self.shade(fb, &geo, column, row, CURSOR_BG);
                }
            }
        }

        self.draw_side_panel(fb, board, status, viewport, &geo)?;
        Ok(())
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        board: &GameBoard,
        catalog: &TileCatalog,
        elapsed: Duration,
        status: &ViewStatus,
        viewport: Viewport,
    ) -> Result<FrameBuffer> {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, catalog, elapsed, status, viewport, &mut fb)?;
        Ok(fb)
    }

    fn shade(&self, fb: &mut FrameBuffer, geo: &ViewGeometry, column: usize, row: usize, bg: Rgb) {
        if let Some((x, y)) = geo.cell_origin(column, row, self.cell_w) {
            for dx in 0..self.cell_w {
                fb.set_bg(x.saturating_add(dx), y, bg);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        board: &GameBoard,
        status: &ViewStatus,
        viewport: Viewport,
        geo: &ViewGeometry,
    ) -> Result<()> {
        let panel_x = (geo.inner_x - 1).saturating_add(geo.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return Ok(());
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = value.dim();

        let mut y = geo.inner_y - 1;
        fb.put_str(panel_x, y, "TETROGUE v0.1", label);
        y += 2;

        fb.put_str(panel_x, y, "SEED", label);
        fb.put_u64(panel_x + 10, y, status.seed, value);
        y += 1;

        let (ci, cj) = status.cursor;
        fb.put_str(panel_x, y, "CURSOR", label);
        let x = fb.put_u64(panel_x + 10, y, ci as u64, value);
        let x = fb.put_str(x, y, ",", value);
        fb.put_u64(x, y, cj as u64, value);
        y += 1;

        fb.put_str(panel_x, y, "ROTATION", label);
        if ci < board.width() && cj < board.height() {
            fb.put_str(panel_x + 10, y, board.get(ci, cj)?.rotation().as_str(), value);
        } else {
            fb.put_str(panel_x + 10, y, "-", value);
        }
        y += 1;

        fb.put_str(panel_x, y, "COLLIDERS", label);
        fb.put_str(panel_x + 10, y, if status.show_colliders { "on" } else { "off" }, value);
        y += 1;

        fb.put_str(panel_x, y, "HASH", label);
        y += 1;
        fb.put_hex(panel_x, y, status.hash, value);
        y += 2;

        for line in [
            "arrows/hjkl  cursor",
            "r/e   rotate cw",
            "z/y   rotate ccw",
            "n     regenerate",
            "c     colliders",
            "q     quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
        Ok(())
    }
}

/// [`Paint`] implementation that writes tiles into the framebuffer.
struct TilePainter<'a> {
    fb: &'a mut FrameBuffer,
    layout: BoardLayout,
    geo: ViewGeometry,
    cell_w: u16,
}

impl Paint for TilePainter<'_> {
    fn paint(&mut self, request: &DrawRequest) {
        let Some((column, row)) = self.layout.screen_cell(request.transform.position) else {
            return;
        };
        let Some((x, y)) = self.geo.cell_origin(column, row, self.cell_w) else {
            return;
        };
        let (ch, fill, fg) = glyph(request.kind, request.frame);
        let style = CellStyle::new(fg.tinted(request.tint), BOARD_BG);
        for dx in 0..self.cell_w {
            let c = if dx == 0 || fill { ch } else { ' ' };
            self.fb.put_char(x.saturating_add(dx), y, c, style);
        }
    }
}

/// Glyph, whether it fills the whole tile width, and its colour.
///
/// Animated walls alternate between two shades.
pub fn glyph(kind: TileType, frame: usize) -> (char, bool, Rgb) {
    match kind {
        TileType::Rock => ('▓', true, Rgb::new(120, 100, 80)),
        TileType::Wall if frame % 2 == 1 => ('█', true, Rgb::new(125, 125, 140)),
        TileType::Wall => ('█', true, Rgb::new(160, 160, 170)),
        TileType::Floor => ('·', false, Rgb::new(90, 90, 100)),
        TileType::StairsUp => ('<', false, Rgb::new(240, 220, 80)),
        TileType::StairsDown => ('>', false, Rgb::new(240, 220, 80)),
        TileType::Pit => ('O', false, Rgb::new(110, 110, 230)),
        TileType::TrapDoorClosed => ('=', false, Rgb::new(190, 140, 70)),
        TileType::TrapDoorOpen => ('^', false, Rgb::new(220, 80, 80)),
        TileType::Threshold => ('+', false, Rgb::new(200, 160, 90)),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
