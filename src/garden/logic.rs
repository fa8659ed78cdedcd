//! Garden rules: tilling, planting, watering, harvesting, and the growth
//! clock.
//!
//! Every operation validates its preconditions and returns a
//! [`GardenError`] naming the exact reason on rejection; rejected calls
//! leave the board and inventories untouched. Growth is recomputed from each
//! crop's planting timestamp rather than counted incrementally, so a missed
//! tick can never desync a plant.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::SeedKind;

use super::grid::{Crop, Garden, TileKind, MAX_STAGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GardenError {
    #[error("Nothing there!")]
    OutOfBounds,
    #[error("Can't interact with the tree!")]
    TreeInWay,
    #[error("There's already a plant here!")]
    PlotOccupied,
    #[error("Can only till grass!")]
    NotGrass,
    #[error("You need to till the soil first!")]
    NotTilled,
    #[error("You don't have any {} seeds!", .0.name())]
    OutOfSeeds(SeedKind),
    #[error("No plant here!")]
    NothingPlanted,
    #[error("This plant is already watered!")]
    AlreadyWatered,
    #[error("This plant is ready to harvest!")]
    ReadyToHarvest,
    #[error("Plant is not ready to harvest yet!")]
    NotReady,
}

fn workable_tile<'a>(
    garden: &'a mut Garden,
    x: usize,
    y: usize,
) -> Result<&'a mut super::grid::Tile, GardenError> {
    if !Garden::in_bounds(x, y) {
        return Err(GardenError::OutOfBounds);
    }
    if Garden::in_tree_area(x, y) {
        return Err(GardenError::TreeInWay);
    }
    garden.tile_mut(x, y).ok_or(GardenError::OutOfBounds)
}

/// Till a grass tile into soil.
pub fn till(garden: &mut Garden, x: usize, y: usize) -> Result<(), GardenError> {
    let tile = workable_tile(garden, x, y)?;
    if tile.crop.is_some() {
        return Err(GardenError::PlotOccupied);
    }
    if tile.kind != TileKind::Grass {
        return Err(GardenError::NotGrass);
    }
    tile.kind = TileKind::Tilled;
    tile.flowers = false;
    Ok(())
}

/// Plant a seed on tilled soil, debiting exactly one from the seed
/// inventory. Returns the number of that seed left.
pub fn plant(
    garden: &mut Garden,
    seeds: &mut BTreeMap<SeedKind, u32>,
    x: usize,
    y: usize,
    seed: SeedKind,
    now: u64,
) -> Result<u32, GardenError> {
    let tile = workable_tile(garden, x, y)?;
    if !tile.kind.is_tilled() {
        return Err(GardenError::NotTilled);
    }
    if tile.crop.is_some() {
        return Err(GardenError::PlotOccupied);
    }
    let count = seeds.get(&seed).copied().unwrap_or(0);
    if count == 0 {
        return Err(GardenError::OutOfSeeds(seed));
    }

    seeds.insert(seed, count - 1);
    tile.crop = Some(Crop::new(seed, now));
    Ok(count - 1)
}

/// Water a growing crop. Each crop is watered once per growth cycle.
pub fn water(garden: &mut Garden, x: usize, y: usize) -> Result<(), GardenError> {
    let tile = workable_tile(garden, x, y)?;
    let crop = tile.crop.as_mut().ok_or(GardenError::NothingPlanted)?;
    if crop.harvestable {
        return Err(GardenError::ReadyToHarvest);
    }
    if crop.watered {
        return Err(GardenError::AlreadyWatered);
    }
    crop.watered = true;
    tile.kind = TileKind::TilledWatered;
    Ok(())
}

/// Harvest a mature crop into the herb inventory. The soil stays tilled.
pub fn harvest(
    garden: &mut Garden,
    herbs: &mut BTreeMap<SeedKind, u32>,
    x: usize,
    y: usize,
) -> Result<SeedKind, GardenError> {
    let tile = workable_tile(garden, x, y)?;
    let crop = tile.crop.as_ref().ok_or(GardenError::NothingPlanted)?;
    if !crop.harvestable {
        return Err(GardenError::NotReady);
    }
    let seed = crop.seed;
    *herbs.entry(seed).or_insert(0) += 1;
    tile.crop = None;
    Ok(seed)
}

/// Growth clock pass: recompute the stage of every watered, non-harvestable
/// crop from elapsed time. Returns whether anything changed. Touches only
/// the board.
pub fn advance_growth(garden: &mut Garden, now: u64) -> bool {
    let mut changed = false;
    for crop in garden.crops_mut() {
        if !crop.watered || crop.harvestable {
            continue;
        }
        let per_stage = crop.ticks_to_mature() / MAX_STAGE as u64;
        let stage = (crop.elapsed(now) / per_stage).min(MAX_STAGE as u64) as u8;
        if stage != crop.stage {
            crop.stage = stage;
            if stage == MAX_STAGE {
                crop.harvestable = true;
                crop.watered = false;
            }
            changed = true;
        }
    }
    changed
}
