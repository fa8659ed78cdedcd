//! Top-level application: screen navigation, event-to-toast plumbing, and
//! the dispatch→persist cycle.
//!
//! Screens translate raw input into [`Action`]s; the app applies them to
//! the game state, toasts the resulting events, and snapshots the save
//! after every successful mutation. Persistence subscribes to state
//! changes; it never participates in the rules.

use ratzilla::ratatui::layout::{Constraint, Direction, Layout};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::garden::GardenScreen;
use crate::input::{ClickState, InputEvent};
use crate::kitchen::KitchenScreen;
use crate::save::render::{ACT_CLEAR, ACT_EXPORT, ACT_IMPORT};
use crate::save::{self, Store, KEY_BACKUP};
use crate::settings::SettingsScreen;
use crate::shop::ShopScreen;
use crate::state::{Action, Event, GameState};
use crate::timer::TimerScreen;

/// How long a toast stays visible.
const TOAST_TICKS: u32 = 50;
const MAX_TOASTS: usize = 4;
/// Fallback snapshot cadence for changes that produce no events (growth).
const AUTOSAVE_TICKS: u32 = 300;

/// What a screen did with an input event.
#[derive(Debug)]
pub enum ScreenEvent {
    /// Not interesting to this screen; the app may use it globally.
    Ignored,
    /// Handled by view state alone.
    Consumed,
    /// Dispatch this action against the game state.
    Act(Action),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Timer,
    Shop,
    Garden,
    Kitchen,
    Stats,
    Settings,
    Data,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Timer,
            Screen::Shop,
            Screen::Garden,
            Screen::Kitchen,
            Screen::Stats,
            Screen::Settings,
            Screen::Data,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Timer => "Timer",
            Screen::Shop => "Shop",
            Screen::Garden => "Garden",
            Screen::Kitchen => "Kitchen",
            Screen::Stats => "Stats",
            Screen::Settings => "Settings",
            Screen::Data => "Data",
        }
    }

    fn index(&self) -> usize {
        Screen::all().iter().position(|s| s == self).unwrap_or(0)
    }
}

struct Toast {
    text: String,
    ticks_left: u32,
}

pub struct App<S: Store> {
    pub game: GameState,
    pub screen: Screen,
    pub garden_view: GardenScreen,
    pub timer_view: TimerScreen,
    pub kitchen_view: KitchenScreen,
    pub shop_view: ShopScreen,
    pub settings_view: SettingsScreen,
    store: S,
    toasts: Vec<Toast>,
    ticks_since_save: u32,
}

impl<S: Store> App<S> {
    pub fn new(store: S) -> Self {
        let mut game = save::load(&store);
        let boot_events = game.bootstrap();
        let mut app = Self {
            game,
            screen: Screen::Timer,
            garden_view: GardenScreen::new(),
            timer_view: TimerScreen::new(),
            kitchen_view: KitchenScreen::new(),
            shop_view: ShopScreen::new(),
            settings_view: SettingsScreen::new(),
            store,
            toasts: Vec::new(),
            ticks_since_save: 0,
        };
        app.toast_events(&boot_events);
        app.persist();
        app
    }

    fn toast(&mut self, text: String) {
        self.toasts.push(Toast {
            text,
            ticks_left: TOAST_TICKS,
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    fn toast_events(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SessionComplete {
                    reward,
                    bonus,
                    drink,
                } => {
                    self.toast(format!(
                        "Focus session complete! You earned {} coins!",
                        reward
                    ));
                    if let (Some(drink), true) = (drink, *bonus > 0) {
                        self.toast(format!("{} bonus: +{} extra coins!", drink.name(), bonus));
                    }
                }
                other => {
                    if let Some(text) = message_for(other) {
                        self.toast(text);
                    }
                }
            }
        }
    }

    fn persist(&mut self) {
        save::persist(&mut self.store, &self.game);
        self.ticks_since_save = 0;
    }

    /// Apply a user action; toast the outcome either way.
    pub fn dispatch(&mut self, action: Action) {
        match self.game.apply(action) {
            Ok(events) => {
                self.toast_events(&events);
                self.persist();
            }
            Err(rejection) => self.toast(rejection.to_string()),
        }
    }

    /// Advance the engine by `delta` ticks from the frame clock.
    pub fn tick(&mut self, delta: u32) {
        if delta == 0 {
            return;
        }
        let events = self.game.tick(delta);
        self.toast_events(&events);

        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(delta);
        }
        self.toasts.retain(|t| t.ticks_left > 0);

        self.ticks_since_save += delta;
        if !events.is_empty() || self.ticks_since_save >= AUTOSAVE_TICKS {
            self.persist();
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        if self.screen == Screen::Data && self.handle_data_input(event) {
            return;
        }

        let response = match self.screen {
            Screen::Timer => self.timer_view.handle_input(&self.game, event),
            Screen::Shop => self.shop_view.handle_input(event),
            Screen::Garden => self.garden_view.handle_input(event),
            Screen::Kitchen => self.kitchen_view.handle_input(event),
            Screen::Settings => self.settings_view.handle_input(event),
            Screen::Stats | Screen::Data => ScreenEvent::Ignored,
        };

        match response {
            ScreenEvent::Act(action) => self.dispatch(action),
            ScreenEvent::Consumed => {}
            ScreenEvent::Ignored => self.handle_global(event),
        }
    }

    fn handle_global(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key(c @ '1'..='7') => {
                let idx = *c as usize - '1' as usize;
                self.screen = Screen::all()[idx];
            }
            InputEvent::Click(id) if (1..=7).contains(id) => {
                self.screen = Screen::all()[(*id - 1) as usize];
            }
            InputEvent::Tab => {
                let next = (self.screen.index() + 1) % Screen::all().len();
                self.screen = Screen::all()[next];
            }
            _ => {}
        }
    }

    /// Export/import/clear live outside the reducer: they talk to the store
    /// itself. Returns true when the event was handled.
    fn handle_data_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('e') | InputEvent::Click(ACT_EXPORT) => {
                let bundle = save::export(&self.game);
                self.store.set(KEY_BACKUP, &bundle);
                #[cfg(target_arch = "wasm32")]
                web_sys::console::log_1(&bundle.as_str().into());
                self.toast(String::from("Save exported to the backup key!"));
                true
            }
            InputEvent::Key('i') | InputEvent::Click(ACT_IMPORT) => {
                match self.store.get(KEY_BACKUP) {
                    None => self.toast(String::from("No backup found to import.")),
                    Some(raw) => match save::import(&mut self.store, &raw) {
                        Ok(game) => {
                            self.game = game;
                            let events = self.game.bootstrap();
                            self.toast_events(&events);
                            self.toast(String::from("Data imported!"));
                        }
                        Err(err) => self.toast(err.to_string()),
                    },
                }
                true
            }
            InputEvent::Key('c') | InputEvent::Click(ACT_CLEAR) => {
                self.game = save::clear(&mut self.store);
                self.game.bootstrap();
                self.garden_view = GardenScreen::new();
                self.timer_view = TimerScreen::new();
                self.persist();
                self.toast(String::from("All data cleared. Fresh start!"));
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, cs: &mut ClickState) {
        let size = f.area();
        cs.clear();
        cs.terminal_cols = size.width;
        cs.terminal_rows = size.height;

        let toast_rows = self.toasts.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(toast_rows),
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        self.render_tabs(f, chunks[1], cs);

        match self.screen {
            Screen::Timer => {
                crate::timer::render::render(&self.timer_view, &self.game, f, chunks[2], cs)
            }
            Screen::Shop => crate::shop::render::render(&self.game, f, chunks[2], cs),
            Screen::Garden => {
                crate::garden::render::render(&self.garden_view, &self.game, f, chunks[2], cs)
            }
            Screen::Kitchen => crate::kitchen::render::render(&self.game, f, chunks[2], cs),
            Screen::Stats => crate::stats::render::render(&self.game, f, chunks[2]),
            Screen::Settings => crate::settings::render::render(&self.game, f, chunks[2], cs),
            Screen::Data => crate::save::render::render(f, chunks[2], cs),
        }

        self.render_toasts(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame, area: ratzilla::ratatui::layout::Rect) {
        let line = Line::from(vec![
            Span::styled(
                " Brew & Bloom ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} coins", self.game.coins),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  {} sessions", self.game.timer.sessions_completed),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("  {}m focused", self.game.total_focus_minutes),
                Style::default().fg(Color::Gray),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_tabs(
        &self,
        f: &mut Frame,
        area: ratzilla::ratatui::layout::Rect,
        cs: &mut ClickState,
    ) {
        let mut bar = crate::widgets::TabBar::new(self.screen.index());
        let labels: Vec<String> = Screen::all()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("[{}] {}", i + 1, s.title()))
            .collect();
        // TabBar borrows its labels; keep them alive for the render call.
        for (i, label) in labels.iter().enumerate() {
            bar = bar.tab(label, (i + 1) as u16);
        }
        bar.render(f, area, cs);
    }

    fn render_toasts(&self, f: &mut Frame, area: ratzilla::ratatui::layout::Rect) {
        if self.toasts.is_empty() {
            return;
        }
        let lines: Vec<Line> = self
            .toasts
            .iter()
            .map(|t| {
                Line::from(Span::styled(
                    format!(" {} ", t.text),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

/// One-line toast for an event, if it warrants one.
fn message_for(event: &Event) -> Option<String> {
    match event {
        Event::SeedBought { seed, coins_left } => Some(format!(
            "{} seeds purchased! {} coins left.",
            seed.name(),
            coins_left
        )),
        Event::SoilTilled => Some(String::from("Soil tilled!")),
        Event::Planted { seed, seeds_left } => Some(if *seeds_left > 0 {
            format!(
                "{} planted! You have {} seeds left.",
                seed.name(),
                seeds_left
            )
        } else {
            format!("{} planted! That was your last one.", seed.name())
        }),
        Event::Watered => Some(String::from("Watered!")),
        Event::Harvested { seed } => Some(format!("Harvested {}!", seed.name())),
        Event::BrewStarted(recipe) => Some(format!("Brewing {}...", recipe.name())),
        Event::BrewCancelled(recipe) => Some(format!("Cancelled the {}.", recipe.name())),
        Event::BrewFinished(recipe) => {
            Some(format!("Brewed {}! {}", recipe.name(), recipe.effect()))
        }
        Event::BreakOver => Some(String::from(
            "Break time over! Ready for another focus session?",
        )),
        Event::BreakSkipped => Some(String::from("Break skipped. Back to work!")),
        Event::DrinkActivated(recipe) => {
            Some(format!("{} active! {}", recipe.name(), recipe.effect()))
        }
        Event::AchievementUnlocked(achievement) => {
            Some(format!("Achievement Unlocked: {}!", achievement.name()))
        }
        Event::SessionComplete { .. }
        | Event::TimerStarted
        | Event::TimerPaused
        | Event::TimerReset
        | Event::SettingsChanged => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeedKind;
    use crate::save::{MemoryStore, KEY_COINS};

    fn app() -> App<MemoryStore> {
        App::new(MemoryStore::new())
    }

    #[test]
    fn new_app_persists_the_initial_snapshot() {
        let app = app();
        assert_eq!(app.store.get(KEY_COINS).as_deref(), Some("250"));
        // The rich-gardener bootstrap unlock produced a toast.
        assert!(app.toasts.iter().any(|t| t.text.contains("Rich Gardener")));
    }

    #[test]
    fn dispatch_persists_successful_actions() {
        let mut app = app();
        app.dispatch(Action::BuySeed(SeedKind::Mint));
        assert_eq!(app.store.get(KEY_COINS).as_deref(), Some("235"));
        assert!(app.toasts.iter().any(|t| t.text.contains("Mint seeds")));
    }

    #[test]
    fn rejections_toast_without_persisting() {
        let mut app = app();
        app.game.coins = 3;
        app.dispatch(Action::BuySeed(SeedKind::Mint));
        assert!(app.toasts.iter().any(|t| t.text == "Not enough coins!"));
        // The last snapshot still holds the bootstrap value.
        assert_eq!(app.store.get(KEY_COINS).as_deref(), Some("250"));
    }

    #[test]
    fn digits_switch_screens_when_unclaimed() {
        let mut app = app();
        app.handle_input(&InputEvent::Key('3'));
        assert_eq!(app.screen, Screen::Garden);
        app.handle_input(&InputEvent::Tab);
        assert_eq!(app.screen, Screen::Kitchen);
        app.handle_input(&InputEvent::Click(1));
        assert_eq!(app.screen, Screen::Timer);
    }

    #[test]
    fn shop_letters_buy_instead_of_switching() {
        let mut app = app();
        app.screen = Screen::Shop;
        app.handle_input(&InputEvent::Key('a'));
        assert_eq!(app.game.seeds.get(&SeedKind::Mint), Some(&1));
        // Digits still reach the tab bar from the shop.
        app.handle_input(&InputEvent::Key('5'));
        assert_eq!(app.screen, Screen::Stats);
    }

    #[test]
    fn toasts_age_out() {
        let mut app = app();
        app.toasts.clear();
        app.toast(String::from("hello"));
        app.tick(TOAST_TICKS - 1);
        assert_eq!(app.toasts.len(), 1);
        app.tick(1);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn autosave_kicks_in_after_idle_growth() {
        let mut app = app();
        app.store.remove(KEY_COINS);
        app.tick(AUTOSAVE_TICKS);
        assert!(app.store.get(KEY_COINS).is_some());
    }

    #[test]
    fn export_then_clear_then_import_restores() {
        let mut app = app();
        app.dispatch(Action::BuySeed(SeedKind::Basil));
        let coins_after_buy = app.game.coins;

        app.screen = Screen::Data;
        app.handle_input(&InputEvent::Key('e'));
        app.handle_input(&InputEvent::Key('c'));
        assert_eq!(app.game.coins, crate::state::DEFAULT_COINS);

        app.handle_input(&InputEvent::Key('i'));
        assert_eq!(app.game.coins, coins_after_buy);
        assert_eq!(app.game.seeds.get(&SeedKind::Basil), Some(&1));
    }

    #[test]
    fn import_without_backup_toasts() {
        let mut app = app();
        app.screen = Screen::Data;
        app.handle_input(&InputEvent::Key('i'));
        assert!(app
            .toasts
            .iter()
            .any(|t| t.text.contains("No backup found")));
    }
}
