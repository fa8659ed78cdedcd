//! The seed shop.

pub mod render;

use crate::app::ScreenEvent;
use crate::catalog::SeedKind;
use crate::input::InputEvent;
use crate::state::Action;

// Action ids owned by this screen.
pub const SEED_BASE: u16 = 400; // one per seed, shop order

/// The shop screen is stateless: seeds map to fixed letter keys.
pub struct ShopScreen;

impl ShopScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> ScreenEvent {
        match event {
            InputEvent::Key(c @ 'a'..='h') => {
                let idx = *c as usize - 'a' as usize;
                ScreenEvent::Act(Action::BuySeed(SeedKind::all()[idx]))
            }
            InputEvent::Click(id)
                if (SEED_BASE..SEED_BASE + SeedKind::all().len() as u16).contains(id) =>
            {
                ScreenEvent::Act(Action::BuySeed(SeedKind::all()[(id - SEED_BASE) as usize]))
            }
            _ => ScreenEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_to_seeds() {
        let mut screen = ShopScreen::new();
        match screen.handle_input(&InputEvent::Key('a')) {
            ScreenEvent::Act(Action::BuySeed(SeedKind::Mint)) => {}
            other => panic!("unexpected {:?}", other),
        }
        match screen.handle_input(&InputEvent::Key('h')) {
            ScreenEvent::Act(Action::BuySeed(SeedKind::LemonBalm)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn clicks_map_to_seeds() {
        let mut screen = ShopScreen::new();
        match screen.handle_input(&InputEvent::Click(SEED_BASE + 2)) {
            ScreenEvent::Act(Action::BuySeed(SeedKind::Basil)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn digits_fall_through_for_tab_switching() {
        let mut screen = ShopScreen::new();
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('2')),
            ScreenEvent::Ignored
        ));
    }
}
