//! The kitchen: brew herbs into drinks with session bonuses.

pub mod logic;
pub mod render;
pub mod state;

pub use logic::BrewError;
pub use state::{BrewProcess, BrewStep};

use crate::app::ScreenEvent;
use crate::catalog::RecipeKind;
use crate::input::InputEvent;
use crate::state::Action;

// Action ids owned by this screen.
pub const RECIPE_BASE: u16 = 300; // one per recipe, book order
pub const ACT_CANCEL: u16 = 390;

/// The kitchen screen is stateless: recipes map to fixed letter keys.
pub struct KitchenScreen;

impl KitchenScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> ScreenEvent {
        match event {
            InputEvent::Key(c @ 'a'..='k') => {
                let idx = *c as usize - 'a' as usize;
                ScreenEvent::Act(Action::StartBrew(RecipeKind::all()[idx]))
            }
            InputEvent::Key('x') | InputEvent::Click(ACT_CANCEL) => {
                ScreenEvent::Act(Action::CancelBrew)
            }
            InputEvent::Click(id)
                if (RECIPE_BASE..RECIPE_BASE + RecipeKind::all().len() as u16).contains(id) =>
            {
                ScreenEvent::Act(Action::StartBrew(
                    RecipeKind::all()[(id - RECIPE_BASE) as usize],
                ))
            }
            _ => ScreenEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_to_recipes() {
        let mut screen = KitchenScreen::new();
        match screen.handle_input(&InputEvent::Key('a')) {
            ScreenEvent::Act(Action::StartBrew(RecipeKind::MintTea)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match screen.handle_input(&InputEvent::Key('k')) {
            ScreenEvent::Act(Action::StartBrew(RecipeKind::MasterBrew)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn x_cancels() {
        let mut screen = KitchenScreen::new();
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('x')),
            ScreenEvent::Act(Action::CancelBrew)
        ));
    }

    #[test]
    fn other_keys_fall_through() {
        let mut screen = KitchenScreen::new();
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('1')),
            ScreenEvent::Ignored
        ));
    }
}
