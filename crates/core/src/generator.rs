//! Chunk template generator - deterministic procedural fill
//!
//! `generate(seed)` is a pure function of the catalog and the seed:
//!
//! 1. A [`SimpleRng`] seeded with `seed` picks one of [`TEMPLATES`].
//! 2. Every template cell names a [`SlotClass`]:
//!    `#` solid, `.` open, `+` doorway, `*` feature.
//! 3. Each slot class weights a set of tile types (see [`SlotClass::weights`]).
//!    The eligible definitions for a cell are every catalog entry of those
//!    types, weighted by their type's weight; one is drawn from the stream.
//! 4. A cell with no eligible definition fails the whole call with
//!    [`CoreError::CatalogExhausted`].
//!
//! Cells are visited in raster order (y outer, x inner) and the chunk is
//! built at rotation North, so the raster layout of the template is exactly
//! the unrotated layout of the chunk.

use std::fmt;

use arrayvec::ArrayVec;

use crate::catalog::TileCatalog;
use crate::chunk::Chunk;
use crate::error::{CoreError, Result};
use crate::rng::SimpleRng;
use crate::tile::{Tile, TileId};
use crate::types::{TileType, CHUNK_CELLS, CHUNK_SIZE};

/// Eligibility class of a template cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotClass {
    Solid,
    Open,
    Doorway,
    Feature,
}

impl SlotClass {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(SlotClass::Solid),
            '.' => Some(SlotClass::Open),
            '+' => Some(SlotClass::Doorway),
            '*' => Some(SlotClass::Feature),
            _ => None,
        }
    }

    /// Tile types this slot accepts, with their relative weights
    pub fn weights(&self) -> &'static [(TileType, u32)] {
        match self {
            SlotClass::Solid => &[(TileType::Wall, 5), (TileType::Rock, 2)],
            SlotClass::Open => &[(TileType::Floor, 1)],
            SlotClass::Doorway => &[(TileType::Threshold, 3), (TileType::Floor, 1)],
            SlotClass::Feature => &[
                (TileType::Pit, 3),
                (TileType::TrapDoorClosed, 2),
                (TileType::TrapDoorOpen, 1),
                (TileType::StairsUp, 1),
                (TileType::StairsDown, 1),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotClass::Solid => "solid",
            SlotClass::Open => "open",
            SlotClass::Doorway => "doorway",
            SlotClass::Feature => "feature",
        }
    }
}

impl fmt::Display for SlotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named 4x4 layout of slot classes, rows top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkTemplate {
    pub name: &'static str,
    pub rows: [&'static str; CHUNK_SIZE],
}

impl ChunkTemplate {
    /// Slot class at `(x, y)`. Unknown characters read as solid.
    pub fn slot(&self, x: usize, y: usize) -> SlotClass {
        self.rows[y]
            .as_bytes()
            .get(x)
            .and_then(|&b| SlotClass::from_char(b as char))
            .unwrap_or(SlotClass::Solid)
    }
}

/// Built-in templates. Every one keeps walls along most of its border.
pub const TEMPLATES: [ChunkTemplate; 7] = [
    ChunkTemplate {
        name: "room",
        rows: ["####", "#..#", "#.*#", "##+#"],
    },
    ChunkTemplate {
        name: "hall_horizontal",
        rows: ["####", "+..+", "....", "####"],
    },
    ChunkTemplate {
        name: "hall_vertical",
        rows: ["#+.#", "#..#", "#..#", "#.+#"],
    },
    ChunkTemplate {
        name: "corner",
        rows: ["####", "#..+", "#.*.", "#..#"],
    },
    ChunkTemplate {
        name: "crossing",
        rows: ["#+.#", "+..+", "..*.", "#..#"],
    },
    ChunkTemplate {
        name: "vault",
        rows: ["####", "#**#", "#..#", "##+#"],
    },
    ChunkTemplate {
        name: "cave",
        rows: ["####", "##.#", "#..#", "#.##"],
    },
];

/// Stateless generator over a borrowed catalog
#[derive(Debug, Clone, Copy)]
pub struct ChunkTemplateGenerator<'a> {
    catalog: &'a TileCatalog,
}

impl<'a> ChunkTemplateGenerator<'a> {
    pub fn new(catalog: &'a TileCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a TileCatalog {
        self.catalog
    }

    /// Generate one fully populated chunk at rotation North
    pub fn generate(&self, seed: u64) -> Result<Chunk> {
        let mut rng = SimpleRng::new(seed);
        let template = &TEMPLATES[rng.next_range(TEMPLATES.len() as u32) as usize];

        let mut ids = [TileId(0); CHUNK_CELLS];
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let slot = template.slot(x, y);
                ids[y * CHUNK_SIZE + x] = self.pick(&mut rng, slot).ok_or_else(|| {
                    tracing::warn!(seed, x, y, slot = slot.as_str(), "catalog exhausted");
                    CoreError::CatalogExhausted { x, y, slot }
                })?;
            }
        }

        tracing::debug!(seed, template = template.name, "generated chunk");
        let tiles = std::array::from_fn(|i| Tile::new(ids[i], &self.catalog[ids[i]]));
        Ok(Chunk::from_tiles(tiles))
    }

    /// Weighted draw among the catalog entries eligible for `slot`
    fn pick(&self, rng: &mut SimpleRng, slot: SlotClass) -> Option<TileId> {
        let mut candidates: Vec<TileId> = Vec::new();
        let mut weights: Vec<u32> = Vec::new();
        for (id, def) in self.catalog.iter() {
            if let Some(&(_, w)) = slot.weights().iter().find(|(kind, _)| *kind == def.kind) {
                candidates.push(id);
                weights.push(w);
            }
        }
        rng.pick_weighted(&weights).map(|i| candidates[i])
    }

    /// Slot classes the catalog cannot satisfy
    pub fn unsatisfiable_slots(&self) -> ArrayVec<SlotClass, 4> {
        [
            SlotClass::Solid,
            SlotClass::Open,
            SlotClass::Doorway,
            SlotClass::Feature,
        ]
        .into_iter()
        .filter(|slot| {
            !slot
                .weights()
                .iter()
                .any(|(kind, _)| self.catalog.contains_kind(*kind))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::oryx_region;
    use crate::tile::TileDefinition;

    fn catalog_of(kinds: &[TileType]) -> TileCatalog {
        TileCatalog::new(
            kinds
                .iter()
                .enumerate()
                .map(|(i, &k)| TileDefinition::new(oryx_region(i as u32, 0, 1, 1), k))
                .collect(),
        )
    }

    #[test]
    fn templates_are_well_formed() {
        for template in TEMPLATES {
            for row in template.rows {
                assert_eq!(row.len(), CHUNK_SIZE, "{}", template.name);
                assert!(row.chars().all(|c| SlotClass::from_char(c).is_some()));
            }
            let solid = (0..CHUNK_SIZE)
                .flat_map(|y| (0..CHUNK_SIZE).map(move |x| (x, y)))
                .filter(|&(x, y)| template.slot(x, y) == SlotClass::Solid)
                .count();
            assert!(solid > 0, "{} has no solid cell", template.name);
        }
    }

    #[test]
    fn same_seed_same_chunk() {
        let catalog = TileCatalog::oryx();
        let generator = ChunkTemplateGenerator::new(&catalog);
        for seed in [0, 1, 42, u64::MAX] {
            assert_eq!(generator.generate(seed).unwrap(), generator.generate(seed).unwrap());
        }
    }

    #[test]
    fn generated_kinds_respect_slot_classes() {
        let catalog = TileCatalog::oryx();
        let generator = ChunkTemplateGenerator::new(&catalog);
        for seed in 0..50u64 {
            let chunk = generator.generate(seed).unwrap();
            // Recover the template the same way generate() does.
            let mut rng = SimpleRng::new(seed);
            let template = TEMPLATES[rng.next_range(TEMPLATES.len() as u32) as usize];
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let kind = chunk.get(x, y).unwrap().kind();
                    let slot = template.slot(x, y);
                    assert!(
                        slot.weights().iter().any(|(k, _)| *k == kind),
                        "seed {} cell ({}, {}) {:?} not allowed in {} slot",
                        seed,
                        x,
                        y,
                        kind,
                        slot
                    );
                }
            }
        }
    }

    #[test]
    fn kinds_with_more_definitions_are_drawn_more_often() {
        // Wall weighs 5 and Rock 2, but five Rock entries carry 10 between them.
        let catalog = catalog_of(&[
            TileType::Wall,
            TileType::Rock,
            TileType::Rock,
            TileType::Rock,
            TileType::Rock,
            TileType::Rock,
        ]);
        let generator = ChunkTemplateGenerator::new(&catalog);
        let mut rng = SimpleRng::new(7);
        let draws = 3000;
        let walls = (0..draws)
            .filter_map(|_| generator.pick(&mut rng, SlotClass::Solid))
            .filter(|&id| catalog[id].kind == TileType::Wall)
            .count();
        let share = walls as f64 / draws as f64;
        assert!((0.25..0.42).contains(&share), "wall share {share}");
    }

    #[test]
    fn missing_solid_tiles_exhaust_the_catalog() {
        let catalog = catalog_of(&[TileType::Floor, TileType::Pit]);
        let generator = ChunkTemplateGenerator::new(&catalog);
        let err = generator.generate(7).unwrap_err();
        // Every template starts with a solid cell at (0, 0).
        assert!(matches!(
            err,
            CoreError::CatalogExhausted {
                x: 0,
                y: 0,
                slot: SlotClass::Solid
            }
        ));
        assert_eq!(generator.unsatisfiable_slots().as_slice(), &[SlotClass::Solid]);
    }

    #[test]
    fn empty_catalog_fails_every_seed() {
        let catalog = TileCatalog::default();
        let generator = ChunkTemplateGenerator::new(&catalog);
        for seed in 0..10 {
            assert!(generator.generate(seed).is_err());
        }
        assert_eq!(generator.unsatisfiable_slots().len(), 4);
    }

    #[test]
    fn wall_floor_pit_catalog_satisfies_every_template() {
        let catalog = catalog_of(&[TileType::Wall, TileType::Floor, TileType::Pit]);
        let generator = ChunkTemplateGenerator::new(&catalog);
        assert!(generator.unsatisfiable_slots().is_empty());
        for seed in 0..200 {
            assert!(generator.generate(seed).is_ok());
        }
    }
}
