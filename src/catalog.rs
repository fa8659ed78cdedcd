//! Static game data: seeds, drink recipes, and achievements.
//!
//! Everything here is a closed enumeration with a stable string id. Ids only
//! exist at the persistence boundary (save keys, export bundles); inside the
//! engine the enums themselves are used, so an unknown id is a decode error
//! at the edge rather than a silent `None` deep in game logic.

use serde::{Deserialize, Serialize};

use crate::stats::StatsView;

// ── Seeds ──────────────────────────────────────────────────────

/// The eight plantable herbs. A seed and its harvested herb share a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeedKind {
    Mint,
    Lavender,
    Basil,
    Rosemary,
    Chamomile,
    Thyme,
    Sage,
    LemonBalm,
}

impl SeedKind {
    /// All seed kinds in shop display order.
    pub fn all() -> &'static [SeedKind] {
        &[
            SeedKind::Mint,
            SeedKind::Lavender,
            SeedKind::Basil,
            SeedKind::Rosemary,
            SeedKind::Chamomile,
            SeedKind::Thyme,
            SeedKind::Sage,
            SeedKind::LemonBalm,
        ]
    }

    /// Stable string id, used in saves and export bundles.
    pub fn id(&self) -> &'static str {
        match self {
            SeedKind::Mint => "mint",
            SeedKind::Lavender => "lavender",
            SeedKind::Basil => "basil",
            SeedKind::Rosemary => "rosemary",
            SeedKind::Chamomile => "chamomile",
            SeedKind::Thyme => "thyme",
            SeedKind::Sage => "sage",
            SeedKind::LemonBalm => "lemonBalm",
        }
    }

    /// Resolve a string id. Unknown ids fail explicitly.
    pub fn from_id(id: &str) -> Option<SeedKind> {
        SeedKind::all().iter().copied().find(|s| s.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SeedKind::Mint => "Mint",
            SeedKind::Lavender => "Lavender",
            SeedKind::Basil => "Basil",
            SeedKind::Rosemary => "Rosemary",
            SeedKind::Chamomile => "Chamomile",
            SeedKind::Thyme => "Thyme",
            SeedKind::Sage => "Sage",
            SeedKind::LemonBalm => "Lemon Balm",
        }
    }

    /// Shop price in coins.
    pub fn price(&self) -> u64 {
        match self {
            SeedKind::Mint => 15,
            SeedKind::Lavender => 20,
            SeedKind::Basil => 12,
            SeedKind::Rosemary => 18,
            SeedKind::Chamomile => 16,
            SeedKind::Thyme => 14,
            SeedKind::Sage => 22,
            SeedKind::LemonBalm => 17,
        }
    }

    /// Growth time in abstract units; one unit is ten seconds of watered
    /// growth on the grid.
    pub fn growth_time(&self) -> u32 {
        match self {
            SeedKind::Mint => 3,
            SeedKind::Lavender => 4,
            SeedKind::Basil => 2,
            SeedKind::Rosemary => 3,
            SeedKind::Chamomile => 3,
            SeedKind::Thyme => 2,
            SeedKind::Sage => 4,
            SeedKind::LemonBalm => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SeedKind::Mint => "Fresh and cooling",
            SeedKind::Lavender => "Calming and aromatic",
            SeedKind::Basil => "Perfect for cooking",
            SeedKind::Rosemary => "Woody and fragrant",
            SeedKind::Chamomile => "Soothing and gentle",
            SeedKind::Thyme => "Earthy and savory",
            SeedKind::Sage => "Wise and powerful",
            SeedKind::LemonBalm => "Citrusy and bright",
        }
    }
}

// ── Recipes ────────────────────────────────────────────────────

/// The eleven brewable drinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecipeKind {
    MintTea,
    LavenderLatte,
    BasilBoost,
    HerbalBlend,
    GardenElixir,
    ChamomileDream,
    RosemaryFocus,
    ThymePotion,
    SageWisdom,
    CitrusZing,
    MasterBrew,
}

impl RecipeKind {
    /// All recipes in recipe-book order.
    pub fn all() -> &'static [RecipeKind] {
        &[
            RecipeKind::MintTea,
            RecipeKind::LavenderLatte,
            RecipeKind::BasilBoost,
            RecipeKind::HerbalBlend,
            RecipeKind::GardenElixir,
            RecipeKind::ChamomileDream,
            RecipeKind::RosemaryFocus,
            RecipeKind::ThymePotion,
            RecipeKind::SageWisdom,
            RecipeKind::CitrusZing,
            RecipeKind::MasterBrew,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            RecipeKind::MintTea => "mintTea",
            RecipeKind::LavenderLatte => "lavenderLatte",
            RecipeKind::BasilBoost => "basilBoost",
            RecipeKind::HerbalBlend => "herbalBlend",
            RecipeKind::GardenElixir => "gardenElixir",
            RecipeKind::ChamomileDream => "chamomileDream",
            RecipeKind::RosemaryFocus => "rosemaryFocus",
            RecipeKind::ThymePotion => "thymePotion",
            RecipeKind::SageWisdom => "sageWisdom",
            RecipeKind::CitrusZing => "citrusZing",
            RecipeKind::MasterBrew => "masterBrew",
        }
    }

    pub fn from_id(id: &str) -> Option<RecipeKind> {
        RecipeKind::all().iter().copied().find(|r| r.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecipeKind::MintTea => "Mint Tea",
            RecipeKind::LavenderLatte => "Lavender Latte",
            RecipeKind::BasilBoost => "Basil Boost",
            RecipeKind::HerbalBlend => "Herbal Blend",
            RecipeKind::GardenElixir => "Garden Elixir",
            RecipeKind::ChamomileDream => "Chamomile Dream",
            RecipeKind::RosemaryFocus => "Rosemary Focus",
            RecipeKind::ThymePotion => "Thyme Potion",
            RecipeKind::SageWisdom => "Sage Wisdom",
            RecipeKind::CitrusZing => "Citrus Zing",
            RecipeKind::MasterBrew => "Master Brew",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RecipeKind::MintTea => "Refreshing and soothing",
            RecipeKind::LavenderLatte => "Calming and aromatic",
            RecipeKind::BasilBoost => "Energizing herbal drink",
            RecipeKind::HerbalBlend => "Perfect harmony of herbs",
            RecipeKind::GardenElixir => "The ultimate brew",
            RecipeKind::ChamomileDream => "Sleep-inducing blend",
            RecipeKind::RosemaryFocus => "Memory enhancement",
            RecipeKind::ThymePotion => "Time management elixir",
            RecipeKind::SageWisdom => "Ancient knowledge",
            RecipeKind::CitrusZing => "Energizing burst",
            RecipeKind::MasterBrew => "Ultimate creation",
        }
    }

    /// Required herbs and amounts.
    pub fn ingredients(&self) -> &'static [(SeedKind, u32)] {
        match self {
            RecipeKind::MintTea => &[(SeedKind::Mint, 2)],
            RecipeKind::LavenderLatte => &[(SeedKind::Lavender, 2)],
            RecipeKind::BasilBoost => &[(SeedKind::Basil, 3)],
            RecipeKind::HerbalBlend => &[
                (SeedKind::Mint, 1),
                (SeedKind::Lavender, 1),
                (SeedKind::Basil, 1),
            ],
            RecipeKind::GardenElixir => &[
                (SeedKind::Mint, 2),
                (SeedKind::Lavender, 2),
                (SeedKind::Basil, 2),
            ],
            RecipeKind::ChamomileDream => &[(SeedKind::Chamomile, 2), (SeedKind::Lavender, 1)],
            RecipeKind::RosemaryFocus => &[(SeedKind::Rosemary, 2), (SeedKind::Sage, 1)],
            RecipeKind::ThymePotion => &[(SeedKind::Thyme, 3)],
            RecipeKind::SageWisdom => &[(SeedKind::Sage, 2), (SeedKind::Rosemary, 1)],
            RecipeKind::CitrusZing => &[(SeedKind::LemonBalm, 2), (SeedKind::Mint, 1)],
            RecipeKind::MasterBrew => &[
                (SeedKind::Mint, 1),
                (SeedKind::Lavender, 1),
                (SeedKind::Basil, 1),
                (SeedKind::Rosemary, 1),
                (SeedKind::Chamomile, 1),
                (SeedKind::Thyme, 1),
                (SeedKind::Sage, 1),
                (SeedKind::LemonBalm, 1),
            ],
        }
    }

    /// Human-readable effect descriptor. Always contains a `+<integer>%`
    /// bonus; see [`parse_bonus_percent`].
    pub fn effect(&self) -> &'static str {
        match self {
            RecipeKind::MintTea => "Clarity +10%",
            RecipeKind::LavenderLatte => "Relaxation +15%",
            RecipeKind::BasilBoost => "Energy +20%",
            RecipeKind::HerbalBlend => "Balance +25%",
            RecipeKind::GardenElixir => "Mastery +50%",
            RecipeKind::ChamomileDream => "Rest +20%",
            RecipeKind::RosemaryFocus => "Focus +30%",
            RecipeKind::ThymePotion => "Efficiency +15%",
            RecipeKind::SageWisdom => "Wisdom +35%",
            RecipeKind::CitrusZing => "Energy +25%",
            RecipeKind::MasterBrew => "Perfection +100%",
        }
    }

    /// The coin bonus percentage encoded in this recipe's effect.
    pub fn bonus_percent(&self) -> u32 {
        parse_bonus_percent(self.effect()).unwrap_or(0)
    }
}

/// Extract the integer from a `+<integer>%` bonus descriptor.
pub fn parse_bonus_percent(effect: &str) -> Option<u32> {
    let rest = &effect[effect.find('+')? + 1..];
    let end = rest.find('%')?;
    rest[..end].parse().ok()
}

// ── Achievements ───────────────────────────────────────────────

/// The ten achievements, each a pure predicate over the stats view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementKind {
    FirstPlant,
    FirstHarvest,
    TenSessions,
    FirstBrew,
    RichGardener,
    MarathonWorker,
    HerbCollector,
    RecipeExplorer,
    FullGarden,
    MasterGardener,
}

impl AchievementKind {
    pub fn all() -> &'static [AchievementKind] {
        &[
            AchievementKind::FirstPlant,
            AchievementKind::FirstHarvest,
            AchievementKind::TenSessions,
            AchievementKind::FirstBrew,
            AchievementKind::RichGardener,
            AchievementKind::MarathonWorker,
            AchievementKind::HerbCollector,
            AchievementKind::RecipeExplorer,
            AchievementKind::FullGarden,
            AchievementKind::MasterGardener,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementKind::FirstPlant => "Green Thumb",
            AchievementKind::FirstHarvest => "First Harvest",
            AchievementKind::TenSessions => "Dedicated Worker",
            AchievementKind::FirstBrew => "Master Brewer",
            AchievementKind::RichGardener => "Rich Gardener",
            AchievementKind::MarathonWorker => "Marathon Worker",
            AchievementKind::HerbCollector => "Herb Collector",
            AchievementKind::RecipeExplorer => "Recipe Explorer",
            AchievementKind::FullGarden => "Full Garden",
            AchievementKind::MasterGardener => "Master Gardener",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementKind::FirstPlant => "Plant your first seed",
            AchievementKind::FirstHarvest => "Harvest your first herb",
            AchievementKind::TenSessions => "Complete 10 focus sessions",
            AchievementKind::FirstBrew => "Brew your first drink",
            AchievementKind::RichGardener => "Accumulate 100 coins",
            AchievementKind::MarathonWorker => "Complete 50 focus sessions",
            AchievementKind::HerbCollector => "Harvest 50 herbs total",
            AchievementKind::RecipeExplorer => "Brew 5 different recipes",
            AchievementKind::FullGarden => "Have 9 plants growing at once",
            AchievementKind::MasterGardener => "Harvest all herb types",
        }
    }

    /// Does the given stats view qualify for this achievement?
    pub fn check(&self, stats: &StatsView) -> bool {
        match self {
            AchievementKind::FirstPlant => stats.total_planted >= 1,
            AchievementKind::FirstHarvest => stats.total_harvested >= 1,
            AchievementKind::TenSessions => stats.total_sessions >= 10,
            AchievementKind::FirstBrew => stats.total_brewed >= 1,
            AchievementKind::RichGardener => stats.max_coins >= 100,
            AchievementKind::MarathonWorker => stats.total_sessions >= 50,
            AchievementKind::HerbCollector => stats.total_harvested >= 50,
            AchievementKind::RecipeExplorer => stats.unique_recipes >= 5,
            AchievementKind::FullGarden => stats.full_garden_achieved,
            AchievementKind::MasterGardener => stats.unique_herbs_harvested >= 8,
        }
    }
}
