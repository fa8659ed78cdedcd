//! Focus timer transitions and reward arithmetic.

use thiserror::Error;

use crate::catalog::RecipeKind;
use crate::settings::Settings;

use super::state::{RunState, TimerMode, TimerState};

/// Coins for completing a focus session, before any drink bonus.
pub const BASE_REWARD: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("You can only skip during a break!")]
    NotInBreak,
}

/// A countdown that reached zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A focus session finished; carries the drink consumed by it, if any.
    Focus { drink: Option<RecipeKind> },
    /// A break finished.
    Break,
}

/// Start/pause toggle within the current mode. Returns true if now running.
pub fn toggle(timer: &mut TimerState, now: u64) -> bool {
    timer.run = match timer.run {
        RunState::Paused { remaining_ticks } => RunState::Running {
            deadline_tick: now + remaining_ticks,
        },
        RunState::Running { deadline_tick } => RunState::Paused {
            remaining_ticks: deadline_tick.saturating_sub(now),
        },
    };
    timer.is_running()
}

/// Re-arm the current mode at its full configured length, paused.
pub fn reset(timer: &mut TimerState, settings: &Settings) {
    timer.run = RunState::Paused {
        remaining_ticks: timer.mode_length_ticks(settings),
    };
}

/// Abandon a break and line up the next focus session, paused. The skipped
/// break time is simply discarded.
pub fn skip_break(timer: &mut TimerState, settings: &Settings) -> Result<(), TimerError> {
    if timer.mode != TimerMode::Break {
        return Err(TimerError::NotInBreak);
    }
    timer.mode = TimerMode::Focus;
    reset(timer, settings);
    Ok(())
}

/// Coin reward for a completed focus session: base plus the floored
/// percentage bonus of the consumed drink.
pub fn session_reward(drink: Option<RecipeKind>) -> (u64, u64) {
    let bonus = match drink {
        Some(recipe) => BASE_REWARD * recipe.bonus_percent() as u64 / 100,
        None => 0,
    };
    (BASE_REWARD + bonus, bonus)
}

/// Advance the countdown to `now`, collecting every completion that
/// occurred. Chained completions (possible under a large tick delta with
/// auto-start on) re-arm from the previous deadline rather than from `now`,
/// so the schedule never drifts. Also ages the effect banner by `delta`.
pub fn advance(
    timer: &mut TimerState,
    now: u64,
    delta: u32,
    settings: &Settings,
) -> Vec<Completion> {
    let mut completions = Vec::new();

    while let RunState::Running { deadline_tick } = timer.run {
        if now < deadline_tick {
            break;
        }
        match timer.mode {
            TimerMode::Focus => {
                let drink = timer.active_drink.take();
                timer.sessions_completed += 1;
                timer.mode = TimerMode::Break;
                completions.push(Completion::Focus { drink });
            }
            TimerMode::Break => {
                timer.mode = TimerMode::Focus;
                completions.push(Completion::Break);
            }
        }
        let next_len = timer.mode_length_ticks(settings);
        timer.run = if settings.auto_start {
            RunState::Running {
                deadline_tick: deadline_tick + next_len,
            }
        } else {
            RunState::Paused {
                remaining_ticks: next_len,
            }
        };
    }

    if let Some((_, ticks_left)) = &mut timer.effect_banner {
        *ticks_left = ticks_left.saturating_sub(delta);
        if *ticks_left == 0 {
            timer.effect_banner = None;
        }
    }

    completions
}
