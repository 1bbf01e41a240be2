//! Tile catalog - the immutable set of tile archetypes
//!
//! Catalogs come from three places:
//!
//! - built in code with [`TileCatalog::new`]
//! - the Oryx environment sheet shipped with the game ([`TileCatalog::oryx`])
//! - JSON data ([`TileCatalog::from_json_str`] / [`TileCatalog::from_reader`])
//!
//! # JSON format
//!
//! ```json
//! [
//!   { "kind": "wall", "region": [0, 0, 24, 24] },
//!   { "kind": "wall", "region": [24, 0, 48, 24], "frames": [[0, 0], [1, 0]], "cycleMs": 1000 },
//!   { "kind": "floor", "region": [120, 0, 24, 24], "source": 0, "collides": false }
//! ]
//! ```

use std::io::Read;
use std::ops::Index;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CoreError, Result};
use crate::tile::{AnimationScript, FrameOffset, TileDefinition, TileId};
use crate::types::{Rect, TileType, VisualSource};

/// Pixel size of one cell on the Oryx sheets before scaling
pub const ORYX_CELL_PX: u32 = 8;

/// Scale the Oryx sheets are blown up by at load time
pub const ORYX_SCALE: u32 = 3;

/// Sub-rectangle on an Oryx sheet, in scaled pixels.
///
/// `left`/`top` are cell coordinates; `width`/`height` are in cells.
pub fn oryx_region(left: u32, top: u32, width: u32, height: u32) -> Rect {
    let cell = ORYX_CELL_PX * ORYX_SCALE;
    Rect::new(left * cell, top * cell, width * cell, height * cell)
}

/// Ordered, immutable list of tile definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileCatalog {
    definitions: Vec<TileDefinition>,
}

impl TileCatalog {
    pub fn new(definitions: Vec<TileDefinition>) -> Self {
        Self { definitions }
    }

    /// The environment catalog from the Oryx sheet.
    pub fn oryx() -> Self {
        let single = |left, top, kind| TileDefinition::new(oryx_region(left, top, 1, 1), kind);
        // Two-frame strip, one second per cycle.
        let blink = |left, top| TileDefinition {
            animation: AnimationScript::new(vec![(0, 0), (1, 0)], Duration::from_secs(1)).ok(),
            ..TileDefinition::new(oryx_region(left, top, 2, 1), TileType::Wall)
        };

        Self::new(vec![
            single(3, 0, TileType::Rock),
            single(3, 11, TileType::Rock),
            single(7, 11, TileType::Rock),
            // gray unfinished
            single(0, 0, TileType::Wall),
            blink(1, 0),
            single(3, 0, TileType::Wall),
            // gray w/brown box
            single(0, 11, TileType::Wall),
            blink(1, 11),
            single(3, 11, TileType::Wall),
            // gray w/gray box
            single(4, 11, TileType::Wall),
            single(7, 11, TileType::Wall),
            single(5, 0, TileType::Floor),
            single(6, 0, TileType::Floor),
            single(7, 0, TileType::StairsUp),
            single(8, 0, TileType::StairsDown),
            single(9, 0, TileType::Pit),
            single(10, 0, TileType::TrapDoorClosed),
            single(11, 0, TileType::TrapDoorOpen),
            single(12, 0, TileType::Threshold),
            single(0, 5, TileType::Threshold),
            single(1, 5, TileType::Threshold),
            single(1, 6, TileType::Threshold),
        ])
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        let definitions = entries
            .into_iter()
            .map(CatalogEntry::into_definition)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(definitions))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&TileDefinition> {
        self.definitions.get(id.index())
    }

    /// Definitions with their ids, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (TileId(i), def))
    }

    /// Ids of every definition of the given kind, in catalog order.
    pub fn ids_of(&self, kind: TileType) -> impl Iterator<Item = TileId> + '_ {
        self.iter()
            .filter(move |(_, def)| def.kind == kind)
            .map(|(id, _)| id)
    }

    pub fn contains_kind(&self, kind: TileType) -> bool {
        self.definitions.iter().any(|def| def.kind == kind)
    }
}

impl Index<TileId> for TileCatalog {
    type Output = TileDefinition;

    fn index(&self, id: TileId) -> &TileDefinition {
        &self.definitions[id.index()]
    }
}

/// One entry of a JSON catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CatalogEntry {
    kind: TileType,
    region: [u32; 4],
    #[serde(default)]
    source: u16,
    #[serde(default)]
    frames: Option<Vec<FrameOffset>>,
    #[serde(default)]
    cycle_ms: Option<u64>,
    #[serde(default)]
    collides: Option<bool>,
}

impl CatalogEntry {
    fn into_definition(self) -> Result<TileDefinition> {
        let [x, y, w, h] = self.region;
        let mut def = TileDefinition::new(Rect::new(x, y, w, h), self.kind)
            .with_source(VisualSource(self.source));

        match (self.frames, self.cycle_ms) {
            (Some(frames), Some(ms)) => {
                let anim = AnimationScript::new(frames, Duration::from_millis(ms))?;
                if !anim.fits(def.region) {
                    return Err(CoreError::InvalidAnimation("strip exceeds sheet bounds"));
                }
                def.animation = Some(anim);
            }
            (None, None) => {}
            (Some(_), None) => return Err(CoreError::InvalidAnimation("frames without cycleMs")),
            (None, Some(_)) => return Err(CoreError::InvalidAnimation("cycleMs without frames")),
        }

        if let Some(collides) = self.collides {
            def.collides = collides;
        }
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oryx_region_scales_cells() {
        assert_eq!(oryx_region(0, 0, 1, 1), Rect::new(0, 0, 24, 24));
        assert_eq!(oryx_region(1, 11, 2, 1), Rect::new(24, 264, 48, 24));
    }

    #[test]
    fn oryx_catalog_covers_every_kind() {
        let catalog = TileCatalog::oryx();
        assert_eq!(catalog.len(), 22);
        for kind in TileType::ALL {
            assert!(catalog.contains_kind(kind), "missing {:?}", kind);
        }
        assert_eq!(catalog.ids_of(TileType::Wall).count(), 8);
        assert_eq!(catalog.ids_of(TileType::Threshold).count(), 4);
        let animated = catalog.iter().filter(|(_, d)| d.animation.is_some()).count();
        assert_eq!(animated, 2);
    }

    #[test]
    fn parses_json_entries() {
        let json = r#"[
            { "kind": "wall", "region": [0, 0, 24, 24] },
            { "kind": "wall", "region": [24, 0, 48, 24], "frames": [[0, 0], [1, 0]], "cycleMs": 1000 },
            { "kind": "stairsDown", "region": [192, 0, 24, 24], "source": 1, "collides": true }
        ]"#;
        let catalog = TileCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 3);

        let first = TileId(0);
        assert_eq!(catalog[first].kind, TileType::Wall);
        assert!(catalog[first].collides);

        let animated = &catalog[TileId(1)];
        let anim = animated.animation.as_ref().unwrap();
        assert_eq!(anim.frame_count(), 2);
        assert_eq!(anim.cycle(), Duration::from_secs(1));

        let stairs = &catalog[TileId(2)];
        assert_eq!(stairs.source, VisualSource::CHARACTERS);
        assert!(stairs.collides);
    }

    #[test]
    fn rejects_half_specified_animation() {
        let json = r#"[{ "kind": "wall", "region": [0, 0, 24, 24], "frames": [[0, 0]] }]"#;
        assert!(matches!(
            TileCatalog::from_json_str(json),
            Err(CoreError::InvalidAnimation(_))
        ));
    }

    #[test]
    fn rejects_strip_past_u32_edge() {
        let json = r#"[{ "kind": "wall", "region": [4294967290, 0, 48, 24],
                        "frames": [[0, 0], [1, 0]], "cycleMs": 1000 }]"#;
        assert!(matches!(
            TileCatalog::from_json_str(json),
            Err(CoreError::InvalidAnimation(_))
        ));
    }

    #[test]
    fn ids_stay_distinct_past_u16() {
        let mut defs = vec![TileDefinition::new(Rect::new(0, 0, 24, 24), TileType::Floor); 65_536];
        defs.push(TileDefinition::new(Rect::new(24, 0, 24, 24), TileType::Wall));
        let catalog = TileCatalog::new(defs);
        let (last, def) = catalog.iter().last().unwrap();
        assert_eq!(last.index(), 65_536);
        assert_eq!(def.kind, TileType::Wall);
        assert_eq!(catalog[last].kind, TileType::Wall);
        assert_eq!(catalog.ids_of(TileType::Wall).collect::<Vec<_>>(), vec![last]);
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"[{ "kind": "lava", "region": [0, 0, 24, 24] }]"#;
        assert!(matches!(
            TileCatalog::from_json_str(json),
            Err(CoreError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let catalog = TileCatalog::new(vec![]);
        assert!(catalog.get(TileId(0)).is_none());
        assert!(catalog.is_empty());
    }
}
