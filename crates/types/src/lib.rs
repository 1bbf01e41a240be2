//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared by the dungeon core, the terminal
//! view and the input layer. Nothing here has behaviour beyond parsing,
//! printing and small pure helpers, so every crate can depend on it.
//!
//! # Dungeon Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CHUNK_SIZE` | 4 | Tiles per chunk edge |
//! | `TILE_SPACING` | 24.0 | World distance between neighbouring tiles |
//! | `DEFAULT_BOARD_WIDTH` | 6 | Chunks per board row |
//! | `DEFAULT_BOARD_HEIGHT` | 8 | Chunks per board column |
//! | `DEFAULT_CHUNK_EDGE` | 4 | Chunk placement spacing, in tiles |
//!
//! # Examples
//!
//! ```
//! use tetrogue_types::{Direction, Rotation, TileType, CHUNK_SIZE};
//!
//! // Parse a tile type (case-insensitive)
//! assert_eq!(TileType::from_str("stairsUp"), Some(TileType::StairsUp));
//!
//! // Rotate
//! let rotation = Rotation::North.rotate(Direction::Clockwise);
//! assert_eq!(rotation, Rotation::East);
//!
//! // Logical (0, 0) lives in physical (0, 3) once rotated 90 degrees
//! assert_eq!(rotation.remap(0, 0), (0, 3));
//! assert_eq!(CHUNK_SIZE, 4);
//! ```

use serde::{Deserialize, Serialize};

/// Tiles along one edge of a chunk
pub const CHUNK_SIZE: usize = 4;

/// Number of tiles in a chunk
pub const CHUNK_CELLS: usize = CHUNK_SIZE * CHUNK_SIZE;

/// World-space distance between neighbouring tiles (one 24px Oryx tile)
pub const TILE_SPACING: f32 = 24.0;

/// Default board width in chunks
pub const DEFAULT_BOARD_WIDTH: usize = 6;

/// Default board height in chunks
pub const DEFAULT_BOARD_HEIGHT: usize = 8;

/// Default chunk placement spacing in tiles
pub const DEFAULT_CHUNK_EDGE: usize = 4;

/// Depth assigned to board tiles (0.0 = back, 1.0 = front)
pub const DEFAULT_TILE_DEPTH: f32 = 0.5;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Semantic category of a tile
///
/// Pure classification. Passability, triggers and the like are decided by
/// whoever consumes the board; the only rule attached here is which kinds
/// carry a collision volume by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileType {
    Rock,
    Wall,
    Floor,
    StairsUp,
    StairsDown,
    Pit,
    TrapDoorClosed,
    TrapDoorOpen,
    Threshold,
}

impl TileType {
    /// Every tile type, in declaration order
    pub const ALL: [TileType; 9] = [
        TileType::Rock,
        TileType::Wall,
        TileType::Floor,
        TileType::StairsUp,
        TileType::StairsDown,
        TileType::Pit,
        TileType::TrapDoorClosed,
        TileType::TrapDoorOpen,
        TileType::Threshold,
    ];

    /// Parse tile type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogue_types::TileType;
    ///
    /// assert_eq!(TileType::from_str("wall"), Some(TileType::Wall));
    /// assert_eq!(TileType::from_str("TrapDoorOpen"), Some(TileType::TrapDoorOpen));
    /// assert_eq!(TileType::from_str("lava"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rock" => Some(TileType::Rock),
            "wall" => Some(TileType::Wall),
            "floor" => Some(TileType::Floor),
            "stairsup" => Some(TileType::StairsUp),
            "stairsdown" => Some(TileType::StairsDown),
            "pit" => Some(TileType::Pit),
            "trapdoorclosed" => Some(TileType::TrapDoorClosed),
            "trapdooropen" => Some(TileType::TrapDoorOpen),
            "threshold" => Some(TileType::Threshold),
            _ => None,
        }
    }

    /// Convert to camelCase string (same spelling as catalog files)
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Rock => "rock",
            TileType::Wall => "wall",
            TileType::Floor => "floor",
            TileType::StairsUp => "stairsUp",
            TileType::StairsDown => "stairsDown",
            TileType::Pit => "pit",
            TileType::TrapDoorClosed => "trapDoorClosed",
            TileType::TrapDoorOpen => "trapDoorOpen",
            TileType::Threshold => "threshold",
        }
    }

    /// Stable one-byte code used by snapshots and hashes
    pub fn code(&self) -> u8 {
        match self {
            TileType::Rock => 1,
            TileType::Wall => 2,
            TileType::Floor => 3,
            TileType::StairsUp => 4,
            TileType::StairsDown => 5,
            TileType::Pit => 6,
            TileType::TrapDoorClosed => 7,
            TileType::TrapDoorOpen => 8,
            TileType::Threshold => 9,
        }
    }

    /// Whether tiles of this kind get a collision volume unless the catalog
    /// entry says otherwise
    pub fn collides_by_default(&self) -> bool {
        matches!(self, TileType::Rock | TileType::Wall)
    }
}

/// Direction of a quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Chunk orientation
///
/// - **North**: Generated orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise (90° counter-clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// All rotations in clockwise order starting at North
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogue_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogue_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate one quarter turn in the given direction
    pub fn rotate(&self, direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => self.rotate_cw(),
            Direction::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Number of clockwise quarter turns from North (0..4)
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Clockwise angle in degrees
    pub fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Map a logical chunk coordinate to its physical (storage) coordinate
    ///
    /// Both inputs must be in `0..CHUNK_SIZE`; callers bounds-check first.
    pub fn remap(&self, x: usize, y: usize) -> (usize, usize) {
        const LAST: usize = CHUNK_SIZE - 1;
        match self {
            Rotation::North => (x, y),
            Rotation::East => (y, LAST - x),
            Rotation::South => (LAST - x, LAST - y),
            Rotation::West => (LAST - y, x),
        }
    }

    /// Inverse of [`Rotation::remap`]: physical coordinate back to logical
    pub fn unmap(&self, x: usize, y: usize) -> (usize, usize) {
        const LAST: usize = CHUNK_SIZE - 1;
        match self {
            Rotation::North => (x, y),
            Rotation::East => (LAST - y, x),
            Rotation::South => (LAST - x, LAST - y),
            Rotation::West => (y, LAST - x),
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Axis-aligned rectangle in sprite-sheet pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Opaque handle to a sprite sheet owned by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VisualSource(pub u16);

impl VisualSource {
    /// The environment sheet (walls, floors, stairs)
    pub const ENVIRONMENT: VisualSource = VisualSource(0);
    /// The character sheet
    pub const CHARACTERS: VisualSource = VisualSource(1);
}

/// RGBA tint applied to a draw request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White tint with the given opacity, from 0.0 (invisible) to 1.0 (opaque)
    pub fn with_lucency(lucency: f32) -> Self {
        let a = (lucency.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(255, 255, 255, a)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

/// Viewer actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    /// Move the chunk cursor one chunk left
    CursorLeft,
    /// Move the chunk cursor one chunk right
    CursorRight,
    /// Move the chunk cursor one chunk up the screen
    CursorUp,
    /// Move the chunk cursor one chunk down the screen
    CursorDown,
    /// Rotate the selected chunk 90° clockwise
    RotateCw,
    /// Rotate the selected chunk 90° counter-clockwise
    RotateCcw,
    /// Rebuild the board from the next board seed
    Regenerate,
    /// Show or hide the collider overlay
    ToggleColliders,
}

impl BoardAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogue_types::BoardAction;
    ///
    /// assert_eq!(BoardAction::from_str("rotateCw"), Some(BoardAction::RotateCw));
    /// assert_eq!(BoardAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(BoardAction::CursorLeft),
            "cursorright" => Some(BoardAction::CursorRight),
            "cursorup" => Some(BoardAction::CursorUp),
            "cursordown" => Some(BoardAction::CursorDown),
            "rotatecw" => Some(BoardAction::RotateCw),
            "rotateccw" => Some(BoardAction::RotateCcw),
            "regenerate" => Some(BoardAction::Regenerate),
            "togglecolliders" => Some(BoardAction::ToggleColliders),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::CursorLeft => "cursorLeft",
            BoardAction::CursorRight => "cursorRight",
            BoardAction::CursorUp => "cursorUp",
            BoardAction::CursorDown => "cursorDown",
            BoardAction::RotateCw => "rotateCw",
            BoardAction::RotateCcw => "rotateCcw",
            BoardAction::Regenerate => "regenerate",
            BoardAction::ToggleColliders => "toggleColliders",
        }
    }
}
