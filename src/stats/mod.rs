//! Play statistics: persisted accumulation plus the derived view that
//! drives achievements.

pub mod render;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{AchievementKind, RecipeKind, SeedKind};

/// Persisted counters and latches. Counters only ever grow; `max_coins` and
/// `full_garden_achieved` are latched and never regress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_planted: u32,
    pub total_harvested: u32,
    pub total_brewed: u32,
    pub max_coins: u64,
    pub full_garden_achieved: bool,
    /// Every herb kind ever harvested.
    pub herbs_harvested: BTreeSet<SeedKind>,
    /// Every recipe ever brewed.
    pub recipes_brewed: BTreeSet<RecipeKind>,
}

/// The flattened, derived view achievement predicates read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsView {
    pub total_sessions: u32,
    pub total_planted: u32,
    pub total_harvested: u32,
    pub total_brewed: u32,
    pub max_coins: u64,
    pub unique_recipes: u32,
    pub unique_herbs_harvested: u32,
    pub full_garden_achieved: bool,
}

/// Build the derived view. Total sessions are derived from accumulated
/// focus minutes and the configured session length.
pub fn view(stats: &Stats, total_focus_minutes: u32, focus_length: u32) -> StatsView {
    StatsView {
        total_sessions: total_focus_minutes / focus_length.max(1),
        total_planted: stats.total_planted,
        total_harvested: stats.total_harvested,
        total_brewed: stats.total_brewed,
        max_coins: stats.max_coins,
        unique_recipes: stats.recipes_brewed.len() as u32,
        unique_herbs_harvested: stats.herbs_harvested.len() as u32,
        full_garden_achieved: stats.full_garden_achieved,
    }
}

/// Pure achievement evaluation: which achievements qualify now but are not
/// yet unlocked. The caller merges the result into the append-only unlocked
/// set and handles notification.
pub fn newly_unlocked(
    view: &StatsView,
    unlocked: &BTreeSet<AchievementKind>,
) -> Vec<AchievementKind> {
    AchievementKind::all()
        .iter()
        .copied()
        .filter(|a| !unlocked.contains(a) && a.check(view))
        .collect()
}
