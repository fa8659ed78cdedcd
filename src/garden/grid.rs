//! Grid types for the garden: tiles, crops, and board generation.

use serde::{Deserialize, Serialize};

use crate::catalog::SeedKind;
use crate::clock::secs_to_ticks;

pub const GRID_W: usize = 11;
pub const GRID_H: usize = 7;

/// Centre of the 3×3 decorative tree. Tiles under it cannot be worked.
pub const TREE_CENTER: (usize, usize) = (5, 3);

/// Highest growth stage; a crop at this stage is mature.
pub const MAX_STAGE: u8 = 3;

/// Seconds of watered growth represented by one catalog growth-time unit.
pub const SECS_PER_GROWTH_UNIT: u64 = 10;

/// Simultaneously growing crops needed for the full-garden stat.
pub const FULL_GARDEN_CROPS: usize = 9;

/// Ground cover of a tile. Watered soil is its own kind so the renderer can
/// darken it, mirroring the separate watered-soil sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileKind {
    Grass,
    Path,
    Tilled,
    TilledWatered,
}

impl TileKind {
    /// Tilled in either moisture state.
    pub fn is_tilled(&self) -> bool {
        matches!(self, TileKind::Tilled | TileKind::TilledWatered)
    }
}

/// A planted crop. `planted_tick` may be negative after a reload: saves store
/// elapsed growth, and the loader back-dates the stamp relative to tick zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crop {
    pub seed: SeedKind,
    pub stage: u8,
    pub watered: bool,
    pub harvestable: bool,
    pub planted_tick: i64,
}

impl Crop {
    pub fn new(seed: SeedKind, now: u64) -> Self {
        Self {
            seed,
            stage: 0,
            watered: false,
            harvestable: false,
            planted_tick: now as i64,
        }
    }

    /// Ticks of growth accumulated by `now`.
    pub fn elapsed(&self, now: u64) -> u64 {
        (now as i64 - self.planted_tick).max(0) as u64
    }

    /// Ticks from planting to maturity for this crop's seed.
    pub fn ticks_to_mature(&self) -> u64 {
        self.seed.growth_time() as u64 * secs_to_ticks(SECS_PER_GROWTH_UNIT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub flowers: bool,
    pub crop: Option<Crop>,
}

impl Tile {
    fn new(kind: TileKind, flowers: bool) -> Self {
        Self {
            kind,
            flowers,
            crop: None,
        }
    }
}

/// Small LCG for decorative rolls (flower placement). Deterministic so a
/// fresh board is reproducible in tests.
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state >> 16
    }

    /// True with roughly `percent` in 100 odds.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next() % 100 < percent
    }
}

/// The 11×7 garden board.
#[derive(Clone, Debug, PartialEq)]
pub struct Garden {
    tiles: Vec<Tile>,
}

impl Garden {
    /// Lay out a fresh board: a horizontal path through the middle row, two
    /// vertical paths, grass elsewhere, flowers rolled onto ~30% of grass.
    pub fn generate(seed: u32) -> Self {
        let mut rng = Lcg::new(seed);
        let mut tiles = Vec::with_capacity(GRID_W * GRID_H);

        for y in 0..GRID_H {
            for x in 0..GRID_W {
                let on_path = y == GRID_H / 2 || x == 2 || x == GRID_W - 3;
                let kind = if on_path { TileKind::Path } else { TileKind::Grass };
                let flowers = kind == TileKind::Grass && rng.chance(30);
                tiles.push(Tile::new(kind, flowers));
            }
        }

        Self { tiles }
    }

    /// Rebuild from persisted tiles. The caller guarantees the length.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < GRID_W && y < GRID_H
    }

    /// Is this tile under the 3×3 tree?
    pub fn in_tree_area(x: usize, y: usize) -> bool {
        let (tx, ty) = TREE_CENTER;
        x + 1 >= tx && x <= tx + 1 && y + 1 >= ty && y <= ty + 1
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        if Garden::in_bounds(x, y) {
            self.tiles.get(y * GRID_W + x)
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if Garden::in_bounds(x, y) {
            self.tiles.get_mut(y * GRID_W + x)
        } else {
            None
        }
    }

    pub fn crops_mut(&mut self) -> impl Iterator<Item = &mut Crop> {
        self.tiles.iter_mut().filter_map(|t| t.crop.as_mut())
    }

    /// Number of tiles currently holding a crop.
    pub fn planted_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.crop.is_some()).count()
    }
}
