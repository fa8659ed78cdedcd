//! User-adjustable settings: session lengths, sound, auto-start.

pub mod render;

use serde::{Deserialize, Serialize};

use crate::app::ScreenEvent;
use crate::input::InputEvent;
use crate::state::Action;

/// Selectable focus lengths, in minutes.
pub const FOCUS_CHOICES: &[u32] = &[15, 25, 45, 60];
/// Selectable break lengths, in minutes.
pub const BREAK_CHOICES: &[u32] = &[5, 10, 15];

pub const DEFAULT_FOCUS: u32 = 25;
pub const DEFAULT_BREAK: u32 = 5;

// Action ids owned by this screen.
pub const ACT_FOCUS: u16 = 500;
pub const ACT_BREAK: u16 = 501;
pub const ACT_SOUND: u16 = 502;
pub const ACT_AUTO_START: u16 = 503;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub focus_length: u32,
    pub break_length: u32,
    pub sound_enabled: bool,
    pub auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_length: DEFAULT_FOCUS,
            break_length: DEFAULT_BREAK,
            sound_enabled: true,
            auto_start: false,
        }
    }
}

fn next_choice(choices: &[u32], current: u32) -> u32 {
    match choices.iter().position(|c| *c == current) {
        Some(idx) => choices[(idx + 1) % choices.len()],
        None => choices[0],
    }
}

impl Settings {
    /// Advance to the next focus-length choice.
    pub fn cycle_focus(&mut self) {
        self.focus_length = next_choice(FOCUS_CHOICES, self.focus_length);
    }

    /// Advance to the next break-length choice.
    pub fn cycle_break(&mut self) {
        self.break_length = next_choice(BREAK_CHOICES, self.break_length);
    }
}

/// A focus length read from persistence is only honoured if it is one of
/// the offered choices.
pub fn valid_focus(minutes: u32) -> bool {
    FOCUS_CHOICES.contains(&minutes)
}

pub fn valid_break(minutes: u32) -> bool {
    BREAK_CHOICES.contains(&minutes)
}

/// The settings screen is stateless.
pub struct SettingsScreen;

impl SettingsScreen {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> ScreenEvent {
        match event {
            InputEvent::Key('f') | InputEvent::Click(ACT_FOCUS) => {
                ScreenEvent::Act(Action::CycleFocusLength)
            }
            InputEvent::Key('b') | InputEvent::Click(ACT_BREAK) => {
                ScreenEvent::Act(Action::CycleBreakLength)
            }
            InputEvent::Key('s') | InputEvent::Click(ACT_SOUND) => {
                ScreenEvent::Act(Action::ToggleSound)
            }
            InputEvent::Key('a') | InputEvent::Click(ACT_AUTO_START) => {
                ScreenEvent::Act(Action::ToggleAutoStart)
            }
            _ => ScreenEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original() {
        let s = Settings::default();
        assert_eq!(s.focus_length, 25);
        assert_eq!(s.break_length, 5);
        assert!(s.sound_enabled);
        assert!(!s.auto_start);
    }

    #[test]
    fn cycling_walks_the_choices_and_wraps() {
        let mut s = Settings::default();
        s.cycle_focus();
        assert_eq!(s.focus_length, 45);
        s.cycle_focus();
        assert_eq!(s.focus_length, 60);
        s.cycle_focus();
        assert_eq!(s.focus_length, 15);
        s.cycle_focus();
        assert_eq!(s.focus_length, 25);

        s.cycle_break();
        assert_eq!(s.break_length, 10);
        s.cycle_break();
        assert_eq!(s.break_length, 15);
        s.cycle_break();
        assert_eq!(s.break_length, 5);
    }

    #[test]
    fn cycling_from_an_unknown_value_recovers() {
        let mut s = Settings {
            focus_length: 33,
            ..Settings::default()
        };
        s.cycle_focus();
        assert_eq!(s.focus_length, FOCUS_CHOICES[0]);
    }

    #[test]
    fn validation_accepts_only_offered_choices() {
        assert!(valid_focus(25));
        assert!(!valid_focus(26));
        assert!(valid_break(15));
        assert!(!valid_break(20));
    }

    #[test]
    fn keys_emit_setting_actions() {
        let mut screen = SettingsScreen::new();
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('f')),
            ScreenEvent::Act(Action::CycleFocusLength)
        ));
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('a')),
            ScreenEvent::Act(Action::ToggleAutoStart)
        ));
        assert!(matches!(
            screen.handle_input(&InputEvent::Key('z')),
            ScreenEvent::Ignored
        ));
    }
}
