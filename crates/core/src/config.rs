//! Board configuration
//!
//! Read from environment variables; anything missing or unparsable falls back
//! to the default.

use glam::Vec2;

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CHUNK_EDGE, TILE_SPACING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    /// Chunks per row
    pub width: usize,
    /// Chunks per column
    pub height: usize,
    /// Tiles along one chunk edge, used for chunk placement
    pub chunk_edge: usize,
    /// World units per tile
    pub unit: f32,
    /// World position of chunk (0, 0)
    pub origin: Vec2,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            chunk_edge: DEFAULT_CHUNK_EDGE,
            unit: TILE_SPACING,
            origin: Vec2::new(20.0, 20.0),
        }
    }
}

impl BoardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BoardConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<usize>().ok());

        let width = parse("TETROGUE_BOARD_WIDTH")
            .filter(|&w| w > 0)
            .unwrap_or(defaults.width);
        let height = parse("TETROGUE_BOARD_HEIGHT")
            .filter(|&h| h > 0)
            .unwrap_or(defaults.height);
        let chunk_edge = parse("TETROGUE_CHUNK_EDGE")
            .filter(|&e| e > 0)
            .unwrap_or(defaults.chunk_edge);
        let unit = lookup("TETROGUE_UNIT")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|u| u.is_finite() && *u > 0.0)
            .unwrap_or(defaults.unit);

        Self {
            width,
            height,
            chunk_edge,
            unit,
            origin: defaults.origin,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = BoardConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.chunk_count(), 48);
    }

    #[test]
    fn reads_overrides() {
        let config = BoardConfig::from_lookup(lookup(&[
            ("TETROGUE_BOARD_WIDTH", "3"),
            ("TETROGUE_BOARD_HEIGHT", " 2 "),
            ("TETROGUE_CHUNK_EDGE", "5"),
            ("TETROGUE_UNIT", "16.5"),
        ]));
        assert_eq!(config.width, 3);
        assert_eq!(config.height, 2);
        assert_eq!(config.chunk_edge, 5);
        assert_eq!(config.unit, 16.5);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = BoardConfig::from_lookup(lookup(&[
            ("TETROGUE_BOARD_WIDTH", "wide"),
            ("TETROGUE_BOARD_HEIGHT", "0"),
            ("TETROGUE_UNIT", "NaN"),
        ]));
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn non_positive_spacing_falls_back_to_defaults() {
        for (edge, unit) in [("0", "0"), ("-3", "-3"), ("0", "-0.5")] {
            let config = BoardConfig::from_lookup(lookup(&[
                ("TETROGUE_CHUNK_EDGE", edge),
                ("TETROGUE_UNIT", unit),
            ]));
            assert_eq!(config, BoardConfig::default());
        }
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = BoardConfig::from_env();
    }
}
