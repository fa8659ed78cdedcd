//! Focus timer state.
//!
//! Four logical states: focus/break × running/paused. A running countdown
//! holds an absolute deadline tick; the remaining time is always derived by
//! subtraction, never decremented, so pauses, resumes and missed frames
//! cannot drift the clock.

use crate::catalog::RecipeKind;
use crate::clock::minutes_to_ticks;
use crate::settings::Settings;

/// How long the drink-effect banner stays up after activation.
pub const EFFECT_BANNER_TICKS: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    Break,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Paused { remaining_ticks: u64 },
    Running { deadline_tick: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub mode: TimerMode,
    pub run: RunState,
    /// Sessions finished since this page load; the persistent total lives in
    /// the stats aggregate.
    pub sessions_completed: u32,
    /// Drink whose bonus applies to the next completed focus session.
    pub active_drink: Option<RecipeKind>,
    /// Transient "effect active" banner: recipe + ticks left to show it.
    pub effect_banner: Option<(RecipeKind, u32)>,
}

impl TimerState {
    /// Fresh timer: paused at the start of a focus session.
    pub fn new(settings: &Settings) -> Self {
        Self {
            mode: TimerMode::Focus,
            run: RunState::Paused {
                remaining_ticks: minutes_to_ticks(settings.focus_length as u64),
            },
            sessions_completed: 0,
            active_drink: None,
            effect_banner: None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    pub fn in_focus(&self) -> bool {
        self.mode == TimerMode::Focus
    }

    /// Ticks left on the countdown at `now`.
    pub fn remaining_ticks(&self, now: u64) -> u64 {
        match self.run {
            RunState::Paused { remaining_ticks } => remaining_ticks,
            RunState::Running { deadline_tick } => deadline_tick.saturating_sub(now),
        }
    }

    /// Configured length of the current mode, in ticks.
    pub fn mode_length_ticks(&self, settings: &Settings) -> u64 {
        match self.mode {
            TimerMode::Focus => minutes_to_ticks(settings.focus_length as u64),
            TimerMode::Break => minutes_to_ticks(settings.break_length as u64),
        }
    }
}
