//! The game-state aggregate and its reducer.
//!
//! Every mutation flows through [`GameState::apply`] (user actions) or
//! [`GameState::tick`] (the periodic tasks: countdown, growth clock, brew
//! pacing). Both return the [`Event`]s produced so the UI can toast them
//! and persistence can snapshot after the fact; rejected actions return a
//! [`Rejection`] carrying the user-facing reason and leave the state
//! untouched.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::catalog::{AchievementKind, RecipeKind, SeedKind};
use crate::garden::grid::FULL_GARDEN_CROPS;
use crate::garden::{logic as garden, Garden, GardenError};
use crate::kitchen::state::BrewProcess;
use crate::kitchen::{logic as kitchen, BrewError};
use crate::settings::Settings;
use crate::stats::{self, Stats, StatsView};
use crate::timer::state::EFFECT_BANNER_TICKS;
use crate::timer::{logic as timer, Completion, TimerError, TimerState};

/// Starting balance for a fresh save.
pub const DEFAULT_COINS: u64 = 250;

/// Seed for laying out a fresh board's decorations.
pub const BOARD_SEED: u32 = 42;

#[derive(Debug)]
pub struct GameState {
    /// Engine time; monotonic within a session, starts at zero on load.
    pub now_ticks: u64,
    pub coins: u64,
    pub total_focus_minutes: u32,
    pub seeds: BTreeMap<SeedKind, u32>,
    pub herbs: BTreeMap<SeedKind, u32>,
    pub drinks: BTreeMap<RecipeKind, u32>,
    pub garden: Garden,
    pub brew: Option<BrewProcess>,
    pub timer: TimerState,
    pub settings: Settings,
    pub stats: Stats,
    pub unlocked: BTreeSet<AchievementKind>,
}

/// Everything a user can do to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    BuySeed(SeedKind),
    Till { x: usize, y: usize },
    Plant { x: usize, y: usize, seed: SeedKind },
    Water { x: usize, y: usize },
    Harvest { x: usize, y: usize },
    StartBrew(RecipeKind),
    CancelBrew,
    ToggleTimer,
    ResetTimer,
    SkipBreak,
    ActivateDrink(RecipeKind),
    CycleFocusLength,
    CycleBreakLength,
    ToggleSound,
    ToggleAutoStart,
}

/// State changes worth telling the user about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    SeedBought { seed: SeedKind, coins_left: u64 },
    SoilTilled,
    Planted { seed: SeedKind, seeds_left: u32 },
    Watered,
    Harvested { seed: SeedKind },
    BrewStarted(RecipeKind),
    BrewCancelled(RecipeKind),
    BrewFinished(RecipeKind),
    SessionComplete {
        reward: u64,
        bonus: u64,
        drink: Option<RecipeKind>,
    },
    BreakOver,
    BreakSkipped,
    TimerStarted,
    TimerPaused,
    TimerReset,
    DrinkActivated(RecipeKind),
    SettingsChanged,
    AchievementUnlocked(AchievementKind),
}

/// A rejected action, with the user-facing reason as its display form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Garden(#[from] GardenError),
    #[error(transparent)]
    Brew(#[from] BrewError),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("Not enough coins!")]
    NotEnoughCoins,
    #[error("You don't have that drink!")]
    NoDrinkAvailable,
    #[error("Drinks only help during a focus session!")]
    DrinkOutsideFocus,
}

impl GameState {
    /// A fresh save: starting coins, empty inventories, a new board.
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            now_ticks: 0,
            coins: DEFAULT_COINS,
            total_focus_minutes: 0,
            seeds: BTreeMap::new(),
            herbs: BTreeMap::new(),
            drinks: BTreeMap::new(),
            garden: Garden::generate(BOARD_SEED),
            brew: None,
            timer: TimerState::new(&settings),
            settings,
            stats: Stats::default(),
            unlocked: BTreeSet::new(),
        }
    }

    pub fn stats_view(&self) -> StatsView {
        stats::view(
            &self.stats,
            self.total_focus_minutes,
            self.settings.focus_length,
        )
    }

    /// Run the post-load pass: latch derived stats and evaluate
    /// achievements against the freshly loaded state.
    pub fn bootstrap(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.refresh(&mut events);
        events
    }

    /// Apply one user action. On success the full effect is applied and the
    /// resulting events returned; on rejection nothing changes.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Event>, Rejection> {
        let mut events = Vec::new();

        match action {
            Action::BuySeed(seed) => {
                if self.coins < seed.price() {
                    return Err(Rejection::NotEnoughCoins);
                }
                self.coins -= seed.price();
                *self.seeds.entry(seed).or_insert(0) += 1;
                events.push(Event::SeedBought {
                    seed,
                    coins_left: self.coins,
                });
            }
            Action::Till { x, y } => {
                garden::till(&mut self.garden, x, y)?;
                events.push(Event::SoilTilled);
            }
            Action::Plant { x, y, seed } => {
                let seeds_left =
                    garden::plant(&mut self.garden, &mut self.seeds, x, y, seed, self.now_ticks)?;
                self.stats.total_planted += 1;
                events.push(Event::Planted { seed, seeds_left });
            }
            Action::Water { x, y } => {
                garden::water(&mut self.garden, x, y)?;
                events.push(Event::Watered);
            }
            Action::Harvest { x, y } => {
                let seed = garden::harvest(&mut self.garden, &mut self.herbs, x, y)?;
                self.stats.total_harvested += 1;
                self.stats.herbs_harvested.insert(seed);
                events.push(Event::Harvested { seed });
            }
            Action::StartBrew(recipe) => {
                kitchen::start(&mut self.brew, recipe, &self.herbs)?;
                events.push(Event::BrewStarted(recipe));
            }
            Action::CancelBrew => {
                let recipe = kitchen::cancel(&mut self.brew)?;
                events.push(Event::BrewCancelled(recipe));
            }
            Action::ToggleTimer => {
                if timer::toggle(&mut self.timer, self.now_ticks) {
                    events.push(Event::TimerStarted);
                } else {
                    events.push(Event::TimerPaused);
                }
            }
            Action::ResetTimer => {
                timer::reset(&mut self.timer, &self.settings);
                events.push(Event::TimerReset);
            }
            Action::SkipBreak => {
                timer::skip_break(&mut self.timer, &self.settings)?;
                events.push(Event::BreakSkipped);
            }
            Action::ActivateDrink(recipe) => {
                if !self.timer.in_focus() {
                    return Err(Rejection::DrinkOutsideFocus);
                }
                let count = self.drinks.get(&recipe).copied().unwrap_or(0);
                if count == 0 {
                    return Err(Rejection::NoDrinkAvailable);
                }
                self.drinks.insert(recipe, count - 1);
                self.timer.active_drink = Some(recipe);
                self.timer.effect_banner = Some((recipe, EFFECT_BANNER_TICKS));
                events.push(Event::DrinkActivated(recipe));
            }
            Action::CycleFocusLength => {
                self.settings.cycle_focus();
                events.push(Event::SettingsChanged);
            }
            Action::CycleBreakLength => {
                self.settings.cycle_break();
                events.push(Event::SettingsChanged);
            }
            Action::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                events.push(Event::SettingsChanged);
            }
            Action::ToggleAutoStart => {
                self.settings.auto_start = !self.settings.auto_start;
                events.push(Event::SettingsChanged);
            }
        }

        self.refresh(&mut events);
        Ok(events)
    }

    /// Advance the periodic tasks by `delta` ticks: the focus countdown, the
    /// brew pipeline, and the growth clock.
    pub fn tick(&mut self, delta: u32) -> Vec<Event> {
        if delta == 0 {
            return Vec::new();
        }
        self.now_ticks += delta as u64;
        let mut events = Vec::new();

        for completion in timer::advance(&mut self.timer, self.now_ticks, delta, &self.settings) {
            match completion {
                Completion::Focus { drink } => {
                    let (reward, bonus) = timer::session_reward(drink);
                    self.coins += reward;
                    self.total_focus_minutes += self.settings.focus_length;
                    events.push(Event::SessionComplete {
                        reward,
                        bonus,
                        drink,
                    });
                }
                Completion::Break => events.push(Event::BreakOver),
            }
        }

        if let Some(recipe) = kitchen::tick(&mut self.brew, delta) {
            self.commit_brew(recipe, &mut events);
        }

        let grew = garden::advance_growth(&mut self.garden, self.now_ticks);

        if grew || !events.is_empty() {
            self.refresh(&mut events);
        }
        events
    }

    /// Commit a finished brew: debit every ingredient and credit the drink,
    /// atomically with respect to the up-front validation.
    fn commit_brew(&mut self, recipe: RecipeKind, events: &mut Vec<Event>) {
        if !kitchen::debit_ingredients(recipe, &mut self.herbs) {
            return;
        }
        *self.drinks.entry(recipe).or_insert(0) += 1;
        self.stats.total_brewed += 1;
        self.stats.recipes_brewed.insert(recipe);
        events.push(Event::BrewFinished(recipe));
    }

    /// Latch the derived stats and evaluate achievements. Runs after every
    /// state change.
    fn refresh(&mut self, events: &mut Vec<Event>) {
        self.stats.max_coins = self.stats.max_coins.max(self.coins);
        if self.garden.planted_count() >= FULL_GARDEN_CROPS {
            self.stats.full_garden_achieved = true;
        }
        let view = self.stats_view();
        for achievement in stats::newly_unlocked(&view, &self.unlocked) {
            self.unlocked.insert(achievement);
            events.push(Event::AchievementUnlocked(achievement));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::minutes_to_ticks;
    use crate::garden::MAX_STAGE;

    /// A grass tile on the fresh board (outside paths and the tree).
    const PLOT: (usize, usize) = (0, 0);
    const PLOT2: (usize, usize) = (1, 0);

    fn game() -> GameState {
        let mut game = GameState::new();
        game.bootstrap();
        game
    }

    /// Run one full watered growth cycle on a freshly planted plot.
    fn grow_out(game: &mut GameState, (x, y): (usize, usize)) {
        game.apply(Action::Water { x, y }).unwrap();
        let mature = game
            .garden
            .tile(x, y)
            .and_then(|t| t.crop)
            .map(|c| c.ticks_to_mature())
            .unwrap_or(0);
        game.tick(mature as u32);
    }

    #[test]
    fn fresh_game_defaults() {
        let game = GameState::new();
        assert_eq!(game.coins, DEFAULT_COINS);
        assert_eq!(game.total_focus_minutes, 0);
        assert!(game.seeds.is_empty());
        assert!(game.brew.is_none());
        assert!(!game.timer.is_running());
    }

    #[test]
    fn bootstrap_latches_max_coins_and_unlocks() {
        let mut game = GameState::new();
        let events = game.bootstrap();
        assert_eq!(game.stats.max_coins, DEFAULT_COINS);
        // 250 starting coins already clear the rich-gardener bar.
        assert!(events.contains(&Event::AchievementUnlocked(AchievementKind::RichGardener)));
        assert!(game.unlocked.contains(&AchievementKind::RichGardener));
    }

    #[test]
    fn buy_seed_debits_wallet_and_credits_inventory() {
        let mut game = game();
        let events = game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        assert_eq!(game.coins, 235);
        assert_eq!(game.seeds[&SeedKind::Mint], 1);
        assert!(events.contains(&Event::SeedBought {
            seed: SeedKind::Mint,
            coins_left: 235
        }));
    }

    #[test]
    fn purchase_above_balance_is_rejected_unchanged() {
        let mut game = game();
        game.coins = 10;
        let err = game.apply(Action::BuySeed(SeedKind::Mint)).unwrap_err();
        assert_eq!(err, Rejection::NotEnoughCoins);
        assert_eq!(err.to_string(), "Not enough coins!");
        assert_eq!(game.coins, 10);
        assert!(game.seeds.is_empty());
    }

    #[test]
    fn spending_never_lowers_max_coins() {
        let mut game = game();
        assert_eq!(game.stats.max_coins, 250);
        for _ in 0..5 {
            game.apply(Action::BuySeed(SeedKind::Basil)).unwrap();
        }
        assert!(game.coins < 250);
        assert_eq!(game.stats.max_coins, 250);
    }

    #[test]
    fn focus_session_pays_base_reward() {
        let mut game = game();
        game.apply(Action::ToggleTimer).unwrap();
        let events = game.tick(minutes_to_ticks(25) as u32);
        assert!(events.contains(&Event::SessionComplete {
            reward: 10,
            bonus: 0,
            drink: None
        }));
        assert_eq!(game.coins, 260);
        assert_eq!(game.total_focus_minutes, 25);
        assert_eq!(game.stats_view().total_sessions, 1);
        assert_eq!(game.timer.sessions_completed, 1);
    }

    #[test]
    fn active_drink_boosts_reward_and_is_consumed() {
        let mut game = game();
        game.drinks.insert(RecipeKind::BasilBoost, 1);
        game.apply(Action::ActivateDrink(RecipeKind::BasilBoost))
            .unwrap();
        assert_eq!(game.drinks[&RecipeKind::BasilBoost], 0);

        game.apply(Action::ToggleTimer).unwrap();
        let events = game.tick(minutes_to_ticks(25) as u32);
        // Energy +20%: 10 + floor(10 * 0.20) = 12.
        assert!(events.contains(&Event::SessionComplete {
            reward: 12,
            bonus: 2,
            drink: Some(RecipeKind::BasilBoost)
        }));
        assert_eq!(game.coins, 262);
        assert_eq!(game.timer.active_drink, None);
    }

    #[test]
    fn drink_activation_requires_focus_and_stock() {
        let mut game = game();
        assert_eq!(
            game.apply(Action::ActivateDrink(RecipeKind::MintTea)),
            Err(Rejection::NoDrinkAvailable)
        );

        game.drinks.insert(RecipeKind::MintTea, 1);
        game.timer.mode = crate::timer::TimerMode::Break;
        assert_eq!(
            game.apply(Action::ActivateDrink(RecipeKind::MintTea)),
            Err(Rejection::DrinkOutsideFocus)
        );
        assert_eq!(game.drinks[&RecipeKind::MintTea], 1);
    }

    #[test]
    fn paused_timer_earns_nothing() {
        let mut game = game();
        let before = game.coins;
        game.tick(minutes_to_ticks(60) as u32);
        assert_eq!(game.coins, before);
        assert_eq!(game.timer.sessions_completed, 0);
    }

    #[test]
    fn skip_break_returns_to_paused_focus() {
        let mut game = game();
        game.apply(Action::ToggleTimer).unwrap();
        game.tick(minutes_to_ticks(25) as u32);
        assert!(!game.timer.in_focus());

        game.apply(Action::SkipBreak).unwrap();
        assert!(game.timer.in_focus());
        assert!(!game.timer.is_running());

        // Skipping outside a break is refused.
        assert_eq!(
            game.apply(Action::SkipBreak),
            Err(Rejection::Timer(TimerError::NotInBreak))
        );
    }

    #[test]
    fn brew_commits_exact_amounts() {
        let mut game = game();
        game.herbs.insert(SeedKind::Mint, 3);
        game.apply(Action::StartBrew(RecipeKind::MintTea)).unwrap();

        // Walk the staged process to completion.
        let mut finished = false;
        for _ in 0..10 {
            let events = game.tick(30);
            if events.contains(&Event::BrewFinished(RecipeKind::MintTea)) {
                finished = true;
                break;
            }
        }
        assert!(finished);
        assert_eq!(game.herbs.get(&SeedKind::Mint), Some(&1));
        assert_eq!(game.drinks[&RecipeKind::MintTea], 1);
        assert_eq!(game.stats.total_brewed, 1);
        assert!(game.stats.recipes_brewed.contains(&RecipeKind::MintTea));
    }

    #[test]
    fn brew_cancel_restores_pre_brew_inventories() {
        let mut game = game();
        game.herbs.insert(SeedKind::Mint, 2);
        let herbs_before = game.herbs.clone();
        let drinks_before = game.drinks.clone();

        game.apply(Action::StartBrew(RecipeKind::MintTea)).unwrap();
        game.tick(10);
        game.apply(Action::CancelBrew).unwrap();

        assert_eq!(game.herbs, herbs_before);
        assert_eq!(game.drinks, drinks_before);
        assert!(game.brew.is_none());
        assert_eq!(game.stats.total_brewed, 0);
    }

    #[test]
    fn brew_rejections_leave_no_process() {
        let mut game = game();
        assert_eq!(
            game.apply(Action::StartBrew(RecipeKind::MintTea)),
            Err(Rejection::Brew(BrewError::MissingIngredients))
        );
        assert_eq!(
            game.apply(Action::CancelBrew),
            Err(Rejection::Brew(BrewError::NothingBrewing))
        );
    }

    #[test]
    fn first_plant_unlocks_green_thumb_once() {
        let mut game = game();
        game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        game.apply(Action::Till { x: PLOT.0, y: PLOT.1 }).unwrap();
        let events = game
            .apply(Action::Plant {
                x: PLOT.0,
                y: PLOT.1,
                seed: SeedKind::Mint,
            })
            .unwrap();
        assert!(events.contains(&Event::AchievementUnlocked(AchievementKind::FirstPlant)));

        // A second plant does not re-unlock it.
        game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        game.apply(Action::Till { x: PLOT2.0, y: PLOT2.1 }).unwrap();
        let events = game
            .apply(Action::Plant {
                x: PLOT2.0,
                y: PLOT2.1,
                seed: SeedKind::Mint,
            })
            .unwrap();
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::AchievementUnlocked(AchievementKind::FirstPlant))));
    }

    #[test]
    fn garden_rejections_surface_reason_strings() {
        let mut game = game();
        let err = game
            .apply(Action::Plant {
                x: PLOT.0,
                y: PLOT.1,
                seed: SeedKind::Mint,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "You need to till the soil first!");
    }

    #[test]
    fn end_to_end_economy_walk() {
        let mut game = game();
        assert_eq!(game.coins, 250);

        // Buy a mint seed at 15.
        game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        assert_eq!(game.coins, 235);
        assert_eq!(game.seeds[&SeedKind::Mint], 1);

        // Plant it on a tilled plot.
        game.apply(Action::Till { x: PLOT.0, y: PLOT.1 }).unwrap();
        game.apply(Action::Plant {
            x: PLOT.0,
            y: PLOT.1,
            seed: SeedKind::Mint,
        })
        .unwrap();
        assert_eq!(game.seeds[&SeedKind::Mint], 0);
        let crop = game.garden.tile(PLOT.0, PLOT.1).unwrap().crop.unwrap();
        assert_eq!(crop.seed, SeedKind::Mint);

        // Water and wait out the growth clock.
        grow_out(&mut game, PLOT);
        let crop = game.garden.tile(PLOT.0, PLOT.1).unwrap().crop.unwrap();
        assert!(crop.harvestable);
        assert_eq!(crop.stage, MAX_STAGE);

        // Harvest: one mint in the pantry, plot empty again.
        game.apply(Action::Harvest { x: PLOT.0, y: PLOT.1 }).unwrap();
        assert_eq!(game.herbs[&SeedKind::Mint], 1);
        assert!(game.garden.tile(PLOT.0, PLOT.1).unwrap().crop.is_none());

        // Mint tea needs mint x2: one harvest is not enough.
        assert!(!kitchen::can_brew(RecipeKind::MintTea, &game.herbs));
        assert_eq!(
            game.apply(Action::StartBrew(RecipeKind::MintTea)),
            Err(Rejection::Brew(BrewError::MissingIngredients))
        );

        // Second cycle on the same (still tilled) plot.
        game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        game.apply(Action::Plant {
            x: PLOT.0,
            y: PLOT.1,
            seed: SeedKind::Mint,
        })
        .unwrap();
        grow_out(&mut game, PLOT);
        game.apply(Action::Harvest { x: PLOT.0, y: PLOT.1 }).unwrap();
        assert_eq!(game.herbs[&SeedKind::Mint], 2);
        assert!(kitchen::can_brew(RecipeKind::MintTea, &game.herbs));
    }

    #[test]
    fn settings_actions_flip_and_cycle() {
        let mut game = game();
        game.apply(Action::CycleFocusLength).unwrap();
        assert_eq!(game.settings.focus_length, 45);
        game.apply(Action::ToggleAutoStart).unwrap();
        assert!(game.settings.auto_start);
        game.apply(Action::ToggleSound).unwrap();
        assert!(!game.settings.sound_enabled);
    }
}
