//! The focus timer screen and its countdown/economy state machine.

pub mod logic;
pub mod render;
pub mod state;

pub use logic::{Completion, TimerError, BASE_REWARD};
pub use state::{RunState, TimerMode, TimerState, EFFECT_BANNER_TICKS};

use crate::app::ScreenEvent;
use crate::catalog::RecipeKind;
use crate::input::InputEvent;
use crate::state::{Action, GameState};

// Action ids owned by this screen.
pub const ACT_TOGGLE: u16 = 210;
pub const ACT_RESET: u16 = 211;
pub const ACT_SKIP: u16 = 212;
pub const ACT_DRINKS: u16 = 213;
pub const ACT_CLOSE_DRINKS: u16 = 214;
pub const DRINK_BASE: u16 = 220; // one per owned drink in the picker

/// Drinks currently in the cupboard, in recipe-book order.
pub fn owned_drinks(game: &GameState) -> Vec<(RecipeKind, u32)> {
    game.drinks
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(recipe, count)| (*recipe, *count))
        .collect()
}

/// View state for the timer screen: just the drink picker.
pub struct TimerScreen {
    pub drink_menu: bool,
}

impl TimerScreen {
    pub fn new() -> Self {
        Self { drink_menu: false }
    }

    fn pick_drink(&mut self, game: &GameState, index: usize) -> ScreenEvent {
        match owned_drinks(game).get(index) {
            Some((recipe, _)) => {
                self.drink_menu = false;
                ScreenEvent::Act(Action::ActivateDrink(*recipe))
            }
            None => ScreenEvent::Consumed,
        }
    }

    pub fn handle_input(&mut self, game: &GameState, event: &InputEvent) -> ScreenEvent {
        if self.drink_menu {
            return match event {
                InputEvent::Esc | InputEvent::Key('q') => {
                    self.drink_menu = false;
                    ScreenEvent::Consumed
                }
                InputEvent::Key(c @ '1'..='9') => {
                    self.pick_drink(game, *c as usize - '1' as usize)
                }
                InputEvent::Click(ACT_CLOSE_DRINKS) => {
                    self.drink_menu = false;
                    ScreenEvent::Consumed
                }
                InputEvent::Click(id) if *id >= DRINK_BASE => {
                    self.pick_drink(game, (id - DRINK_BASE) as usize)
                }
                _ => ScreenEvent::Consumed,
            };
        }

        match event {
            InputEvent::Key(' ') | InputEvent::Enter | InputEvent::Click(ACT_TOGGLE) => {
                ScreenEvent::Act(Action::ToggleTimer)
            }
            InputEvent::Key('r') | InputEvent::Click(ACT_RESET) => {
                ScreenEvent::Act(Action::ResetTimer)
            }
            InputEvent::Key('s') | InputEvent::Click(ACT_SKIP) => {
                ScreenEvent::Act(Action::SkipBreak)
            }
            InputEvent::Key('d') | InputEvent::Click(ACT_DRINKS) => {
                self.drink_menu = true;
                ScreenEvent::Consumed
            }
            _ => ScreenEvent::Ignored,
        }
    }
}
