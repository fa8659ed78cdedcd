//! The garden: an 11×7 tile board worked with till/plant/water/harvest.

pub mod grid;
pub mod logic;
pub mod render;

pub use grid::{Garden, Tile, TileKind, FULL_GARDEN_CROPS, GRID_H, GRID_W, MAX_STAGE};
pub use logic::GardenError;

use crate::app::ScreenEvent;
use crate::catalog::SeedKind;
use crate::input::InputEvent;
use crate::state::Action;

// Action ids owned by this screen.
pub const TILE_BASE: u16 = 100; // one per tile, row-major
pub const ACT_TILL: u16 = 180;
pub const ACT_PLANT: u16 = 181;
pub const ACT_WATER: u16 = 182;
pub const ACT_HARVEST: u16 = 183;
pub const SEED_BASE: u16 = 190; // one per seed kind in the picker
pub const ACT_CLOSE_SEEDS: u16 = 199;

/// View state for the garden screen: a tile cursor plus the seed picker.
pub struct GardenScreen {
    pub cursor: (usize, usize),
    pub seed_menu: bool,
}

impl GardenScreen {
    pub fn new() -> Self {
        Self {
            cursor: (0, 0),
            seed_menu: false,
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let (x, y) = self.cursor;
        let nx = x.saturating_add_signed(dx).min(GRID_W - 1);
        let ny = y.saturating_add_signed(dy).min(GRID_H - 1);
        self.cursor = (nx, ny);
    }

    fn plant_at_cursor(&mut self, seed: SeedKind) -> ScreenEvent {
        self.seed_menu = false;
        ScreenEvent::Act(Action::Plant {
            x: self.cursor.0,
            y: self.cursor.1,
            seed,
        })
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> ScreenEvent {
        if self.seed_menu {
            return match event {
                InputEvent::Esc | InputEvent::Key('q') => {
                    self.seed_menu = false;
                    ScreenEvent::Consumed
                }
                InputEvent::Key(c @ '1'..='8') => {
                    let idx = *c as usize - '1' as usize;
                    self.plant_at_cursor(SeedKind::all()[idx])
                }
                InputEvent::Click(id)
                    if (SEED_BASE..SEED_BASE + SeedKind::all().len() as u16).contains(id) =>
                {
                    self.plant_at_cursor(SeedKind::all()[(id - SEED_BASE) as usize])
                }
                InputEvent::Click(ACT_CLOSE_SEEDS) => {
                    self.seed_menu = false;
                    ScreenEvent::Consumed
                }
                // The picker is modal; swallow everything else.
                _ => ScreenEvent::Consumed,
            };
        }

        let (x, y) = self.cursor;
        match event {
            InputEvent::Up => {
                self.move_cursor(0, -1);
                ScreenEvent::Consumed
            }
            InputEvent::Down => {
                self.move_cursor(0, 1);
                ScreenEvent::Consumed
            }
            InputEvent::Left => {
                self.move_cursor(-1, 0);
                ScreenEvent::Consumed
            }
            InputEvent::Right => {
                self.move_cursor(1, 0);
                ScreenEvent::Consumed
            }
            InputEvent::Key('t') | InputEvent::Click(ACT_TILL) => {
                ScreenEvent::Act(Action::Till { x, y })
            }
            InputEvent::Key('w') | InputEvent::Click(ACT_WATER) => {
                ScreenEvent::Act(Action::Water { x, y })
            }
            InputEvent::Key('h') | InputEvent::Click(ACT_HARVEST) => {
                ScreenEvent::Act(Action::Harvest { x, y })
            }
            InputEvent::Key('p') | InputEvent::Click(ACT_PLANT) => {
                self.seed_menu = true;
                ScreenEvent::Consumed
            }
            InputEvent::Click(id)
                if (TILE_BASE..TILE_BASE + (GRID_W * GRID_H) as u16).contains(id) =>
            {
                let idx = (id - TILE_BASE) as usize;
                self.cursor = (idx % GRID_W, idx / GRID_W);
                ScreenEvent::Consumed
            }
            _ => ScreenEvent::Ignored,
        }
    }
}
