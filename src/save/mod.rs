//! Persistence: the flat key→string save contract, localStorage access,
//! and the export/import bundle.
//!
//! Key names are fixed and every value is a string: numerics as decimal
//! text, flags as "true"/"false", composites as JSON. Loading falls back to
//! each key's documented default when a value is missing or malformed, so a
//! single corrupt key never takes the whole save down. Importing is the
//! opposite: the bundle is validated field-by-field up front and rejected
//! wholesale on any failure, with nothing written.

pub mod render;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{AchievementKind, RecipeKind, SeedKind};
use crate::garden::grid::{Crop, Garden, Tile, TileKind, GRID_H, GRID_W, MAX_STAGE};
use crate::settings;
use crate::state::GameState;
use crate::stats::Stats;
use crate::timer::TimerState;

pub const KEY_COINS: &str = "brewBloomCoins";
pub const KEY_FOCUS_TIME: &str = "brewBloomFocusTime";
pub const KEY_GARDEN: &str = "brewBloomGarden";
pub const KEY_INVENTORY: &str = "brewBloomInventory";
pub const KEY_BREWED: &str = "brewBloomBrewedDrinks";
pub const KEY_SEEDS: &str = "brewBloomSeedInventory";
pub const KEY_STATS: &str = "brewBloomStats";
pub const KEY_ACHIEVEMENTS: &str = "brewBloomAchievements";
pub const KEY_FOCUS_LENGTH: &str = "brewBloomFocusLength";
pub const KEY_BREAK_LENGTH: &str = "brewBloomBreakLength";
pub const KEY_SOUND: &str = "brewBloomSoundEnabled";
pub const KEY_AUTO_START: &str = "brewBloomAutoStart";
/// Staging key for export/import bundles.
pub const KEY_BACKUP: &str = "brewBloomBackup";

/// Every key holding save data (the backup staging key is separate).
pub const SAVE_KEYS: [&str; 12] = [
    KEY_COINS,
    KEY_FOCUS_TIME,
    KEY_GARDEN,
    KEY_INVENTORY,
    KEY_BREWED,
    KEY_SEEDS,
    KEY_STATS,
    KEY_ACHIEVEMENTS,
    KEY_FOCUS_LENGTH,
    KEY_BREAK_LENGTH,
    KEY_SOUND,
    KEY_AUTO_START,
];

/// A flat string key-value store: localStorage in the browser, an in-memory
/// map in tests.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store used by tests (and as a harmless fallback when
/// localStorage is unavailable).
#[derive(Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Browser localStorage. Writes that fail (quota, private browsing) are
/// logged and dropped; the in-memory game state stays authoritative.
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl Store for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            web_sys::console::warn_1(&format!("save failed for {key}: {err:?}").into());
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

/// The store a session runs against: localStorage when the browser offers
/// it, an in-memory map otherwise (native test harnesses, storage-less
/// browsing contexts).
pub enum SessionStore {
    #[cfg(target_arch = "wasm32")]
    Local(LocalStore),
    Memory(MemoryStore),
}

impl SessionStore {
    pub fn open() -> Self {
        #[cfg(target_arch = "wasm32")]
        if let Some(local) = LocalStore::open() {
            return SessionStore::Local(local);
        }
        SessionStore::Memory(MemoryStore::new())
    }
}

impl Store for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            #[cfg(target_arch = "wasm32")]
            SessionStore::Local(store) => store.get(key),
            SessionStore::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            #[cfg(target_arch = "wasm32")]
            SessionStore::Local(store) => store.set(key, value),
            SessionStore::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) {
        match self {
            #[cfg(target_arch = "wasm32")]
            SessionStore::Local(store) => store.remove(key),
            SessionStore::Memory(store) => store.remove(key),
        }
    }
}

// ── Per-key codecs ─────────────────────────────────────────────

fn decode_u64(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn decode_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn decode_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn decode_seed_map(raw: &str) -> Option<BTreeMap<SeedKind, u32>> {
    serde_json::from_str(raw).ok()
}

fn decode_drink_map(raw: &str) -> Option<BTreeMap<RecipeKind, u32>> {
    serde_json::from_str(raw).ok()
}

fn decode_stats(raw: &str) -> Option<Stats> {
    serde_json::from_str(raw).ok()
}

fn decode_achievements(raw: &str) -> Option<BTreeSet<AchievementKind>> {
    serde_json::from_str(raw).ok()
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedCrop {
    seed: SeedKind,
    stage: u8,
    watered: bool,
    harvestable: bool,
    /// Growth already accumulated; the loader back-dates the planting stamp
    /// by this much so growth resumes where it left off.
    elapsed_ticks: u64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedTile {
    kind: TileKind,
    flowers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crop: Option<SavedCrop>,
}

fn encode_garden(garden: &Garden, now: u64) -> String {
    let tiles: Vec<SavedTile> = garden
        .tiles()
        .iter()
        .map(|tile| SavedTile {
            kind: tile.kind,
            flowers: tile.flowers,
            crop: tile.crop.as_ref().map(|crop| SavedCrop {
                seed: crop.seed,
                stage: crop.stage,
                watered: crop.watered,
                harvestable: crop.harvestable,
                elapsed_ticks: crop.elapsed(now),
            }),
        })
        .collect();
    serde_json::to_string(&tiles).unwrap_or_default()
}

fn decode_garden(raw: &str) -> Option<Garden> {
    let tiles: Vec<SavedTile> = serde_json::from_str(raw).ok()?;
    if tiles.len() != GRID_W * GRID_H {
        return None;
    }
    let tiles = tiles
        .into_iter()
        .map(|saved| Tile {
            kind: saved.kind,
            flowers: saved.flowers,
            crop: saved.crop.map(|crop| Crop {
                seed: crop.seed,
                stage: crop.stage.min(MAX_STAGE),
                watered: crop.watered,
                harvestable: crop.harvestable,
                planted_tick: -(crop.elapsed_ticks as i64),
            }),
        })
        .collect();
    Some(Garden::from_tiles(tiles))
}

// ── Load / persist ─────────────────────────────────────────────

/// Rebuild the game from the store, falling back to the documented default
/// for every missing or malformed key.
pub fn load(store: &impl Store) -> GameState {
    let mut game = GameState::new();

    if let Some(coins) = store.get(KEY_COINS).as_deref().and_then(decode_u64) {
        game.coins = coins;
    }
    if let Some(minutes) = store.get(KEY_FOCUS_TIME).as_deref().and_then(decode_u32) {
        game.total_focus_minutes = minutes;
    }
    if let Some(garden) = store.get(KEY_GARDEN).as_deref().and_then(decode_garden) {
        game.garden = garden;
    }
    if let Some(herbs) = store.get(KEY_INVENTORY).as_deref().and_then(decode_seed_map) {
        game.herbs = herbs;
    }
    if let Some(drinks) = store.get(KEY_BREWED).as_deref().and_then(decode_drink_map) {
        game.drinks = drinks;
    }
    if let Some(seeds) = store.get(KEY_SEEDS).as_deref().and_then(decode_seed_map) {
        game.seeds = seeds;
    }
    if let Some(stats) = store.get(KEY_STATS).as_deref().and_then(decode_stats) {
        game.stats = stats;
    }
    if let Some(unlocked) = store
        .get(KEY_ACHIEVEMENTS)
        .as_deref()
        .and_then(decode_achievements)
    {
        game.unlocked = unlocked;
    }
    if let Some(minutes) = store
        .get(KEY_FOCUS_LENGTH)
        .as_deref()
        .and_then(decode_u32)
        .filter(|m| settings::valid_focus(*m))
    {
        game.settings.focus_length = minutes;
    }
    if let Some(minutes) = store
        .get(KEY_BREAK_LENGTH)
        .as_deref()
        .and_then(decode_u32)
        .filter(|m| settings::valid_break(*m))
    {
        game.settings.break_length = minutes;
    }
    if let Some(sound) = store.get(KEY_SOUND).as_deref().and_then(decode_bool) {
        game.settings.sound_enabled = sound;
    }
    if let Some(auto) = store.get(KEY_AUTO_START).as_deref().and_then(decode_bool) {
        game.settings.auto_start = auto;
    }

    // The countdown itself is ephemeral; re-arm it for the loaded settings.
    game.timer = TimerState::new(&game.settings);
    game
}

/// Snapshot the whole game into the store, one key at a time.
pub fn persist(store: &mut impl Store, game: &GameState) {
    store.set(KEY_COINS, &game.coins.to_string());
    store.set(KEY_FOCUS_TIME, &game.total_focus_minutes.to_string());
    store.set(KEY_GARDEN, &encode_garden(&game.garden, game.now_ticks));
    store.set(
        KEY_INVENTORY,
        &serde_json::to_string(&game.herbs).unwrap_or_default(),
    );
    store.set(
        KEY_BREWED,
        &serde_json::to_string(&game.drinks).unwrap_or_default(),
    );
    store.set(
        KEY_SEEDS,
        &serde_json::to_string(&game.seeds).unwrap_or_default(),
    );
    store.set(
        KEY_STATS,
        &serde_json::to_string(&game.stats).unwrap_or_default(),
    );
    store.set(
        KEY_ACHIEVEMENTS,
        &serde_json::to_string(&game.unlocked).unwrap_or_default(),
    );
    store.set(KEY_FOCUS_LENGTH, &game.settings.focus_length.to_string());
    store.set(KEY_BREAK_LENGTH, &game.settings.break_length.to_string());
    store.set(KEY_SOUND, &game.settings.sound_enabled.to_string());
    store.set(KEY_AUTO_START, &game.settings.auto_start.to_string());
}

/// Remove every save key and hand back a fresh game.
pub fn clear(store: &mut impl Store) -> GameState {
    for key in SAVE_KEYS {
        store.remove(key);
    }
    GameState::new()
}

// ── Export / import ────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupSettings {
    focus_length: String,
    break_length: String,
    sound_enabled: String,
    auto_start: String,
}

/// One JSON document bundling every persisted key's stored string.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    coins: String,
    focus_time: String,
    garden: String,
    inventory: String,
    brewed_drinks: String,
    seed_inventory: String,
    stats: String,
    achievements: String,
    settings: BackupSettings,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("That backup isn't valid JSON.")]
    Malformed(#[from] serde_json::Error),
    #[error("Backup field '{0}' is invalid.")]
    BadField(&'static str),
}

/// Bundle the current game into a backup document.
pub fn export(game: &GameState) -> String {
    let backup = Backup {
        coins: game.coins.to_string(),
        focus_time: game.total_focus_minutes.to_string(),
        garden: encode_garden(&game.garden, game.now_ticks),
        inventory: serde_json::to_string(&game.herbs).unwrap_or_default(),
        brewed_drinks: serde_json::to_string(&game.drinks).unwrap_or_default(),
        seed_inventory: serde_json::to_string(&game.seeds).unwrap_or_default(),
        stats: serde_json::to_string(&game.stats).unwrap_or_default(),
        achievements: serde_json::to_string(&game.unlocked).unwrap_or_default(),
        settings: BackupSettings {
            focus_length: game.settings.focus_length.to_string(),
            break_length: game.settings.break_length.to_string(),
            sound_enabled: game.settings.sound_enabled.to_string(),
            auto_start: game.settings.auto_start.to_string(),
        },
    };
    serde_json::to_string_pretty(&backup).unwrap_or_default()
}

/// Validate a backup document and, only if every field decodes, write it
/// through to the store and reload. A bad bundle leaves the store exactly
/// as it was.
pub fn import(store: &mut impl Store, raw: &str) -> Result<GameState, ImportError> {
    let backup: Backup = serde_json::from_str(raw)?;

    decode_u64(&backup.coins).ok_or(ImportError::BadField("coins"))?;
    decode_u32(&backup.focus_time).ok_or(ImportError::BadField("focusTime"))?;
    decode_garden(&backup.garden).ok_or(ImportError::BadField("garden"))?;
    decode_seed_map(&backup.inventory).ok_or(ImportError::BadField("inventory"))?;
    decode_drink_map(&backup.brewed_drinks).ok_or(ImportError::BadField("brewedDrinks"))?;
    decode_seed_map(&backup.seed_inventory).ok_or(ImportError::BadField("seedInventory"))?;
    decode_stats(&backup.stats).ok_or(ImportError::BadField("stats"))?;
    decode_achievements(&backup.achievements).ok_or(ImportError::BadField("achievements"))?;
    decode_u32(&backup.settings.focus_length)
        .filter(|m| settings::valid_focus(*m))
        .ok_or(ImportError::BadField("settings.focusLength"))?;
    decode_u32(&backup.settings.break_length)
        .filter(|m| settings::valid_break(*m))
        .ok_or(ImportError::BadField("settings.breakLength"))?;
    decode_bool(&backup.settings.sound_enabled)
        .ok_or(ImportError::BadField("settings.soundEnabled"))?;
    decode_bool(&backup.settings.auto_start)
        .ok_or(ImportError::BadField("settings.autoStart"))?;

    store.set(KEY_COINS, &backup.coins);
    store.set(KEY_FOCUS_TIME, &backup.focus_time);
    store.set(KEY_GARDEN, &backup.garden);
    store.set(KEY_INVENTORY, &backup.inventory);
    store.set(KEY_BREWED, &backup.brewed_drinks);
    store.set(KEY_SEEDS, &backup.seed_inventory);
    store.set(KEY_STATS, &backup.stats);
    store.set(KEY_ACHIEVEMENTS, &backup.achievements);
    store.set(KEY_FOCUS_LENGTH, &backup.settings.focus_length);
    store.set(KEY_BREAK_LENGTH, &backup.settings.break_length);
    store.set(KEY_SOUND, &backup.settings.sound_enabled);
    store.set(KEY_AUTO_START, &backup.settings.auto_start);

    Ok(load(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::state::{Action, DEFAULT_COINS};

    fn played_game() -> GameState {
        let mut game = GameState::new();
        game.bootstrap();
        game.apply(Action::BuySeed(SeedKind::Mint)).unwrap();
        game.apply(Action::BuySeed(SeedKind::Basil)).unwrap();
        game.apply(Action::Till { x: 0, y: 0 }).unwrap();
        game.apply(Action::Plant {
            x: 0,
            y: 0,
            seed: SeedKind::Mint,
        })
        .unwrap();
        game.apply(Action::Water { x: 0, y: 0 }).unwrap();
        game.herbs.insert(SeedKind::Basil, 4);
        game.drinks.insert(RecipeKind::BasilBoost, 2);
        game.tick(150);
        game
    }

    #[test]
    fn empty_store_loads_defaults() {
        let store = MemoryStore::new();
        let game = load(&store);
        assert_eq!(game.coins, DEFAULT_COINS);
        assert_eq!(game.total_focus_minutes, 0);
        assert_eq!(game.settings, Settings::default());
        assert!(game.seeds.is_empty());
        assert_eq!(game.garden.planted_count(), 0);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let game = played_game();
        persist(&mut store, &game);

        let loaded = load(&store);
        assert_eq!(loaded.coins, game.coins);
        assert_eq!(loaded.total_focus_minutes, game.total_focus_minutes);
        assert_eq!(loaded.seeds, game.seeds);
        assert_eq!(loaded.herbs, game.herbs);
        assert_eq!(loaded.drinks, game.drinks);
        assert_eq!(loaded.stats, game.stats);
        assert_eq!(loaded.unlocked, game.unlocked);
        assert_eq!(loaded.settings, game.settings);
        assert_eq!(loaded.garden.planted_count(), 1);
    }

    #[test]
    fn numeric_values_are_decimal_strings() {
        let mut store = MemoryStore::new();
        let game = played_game();
        persist(&mut store, &game);
        assert_eq!(store.get(KEY_COINS).as_deref(), Some("223"));
        assert_eq!(store.get(KEY_FOCUS_LENGTH).as_deref(), Some("25"));
        assert_eq!(store.get(KEY_SOUND).as_deref(), Some("true"));
    }

    #[test]
    fn crop_growth_survives_reload() {
        let mut store = MemoryStore::new();
        let game = played_game(); // mint watered, 150 of 300 ticks grown
        persist(&mut store, &game);

        let mut loaded = load(&store);
        let crop = loaded.garden.tile(0, 0).unwrap().crop.unwrap();
        assert!(crop.watered);
        assert_eq!(crop.elapsed(0), 150);

        // The remaining half of the growth finishes after reload.
        loaded.tick(150);
        assert!(loaded.garden.tile(0, 0).unwrap().crop.unwrap().harvestable);
    }

    #[test]
    fn malformed_keys_fall_back_per_key() {
        let mut store = MemoryStore::new();
        persist(&mut store, &played_game());
        store.set(KEY_COINS, "not a number");
        store.set(KEY_GARDEN, "{ broken json");
        store.set(KEY_FOCUS_LENGTH, "26"); // not an offered choice

        let game = load(&store);
        assert_eq!(game.coins, DEFAULT_COINS);
        assert_eq!(game.garden.planted_count(), 0);
        assert_eq!(game.settings.focus_length, 25);
        // Undamaged keys still load.
        assert_eq!(game.herbs.get(&SeedKind::Basil), Some(&4));
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = MemoryStore::new();
        persist(&mut store, &played_game());
        let game = clear(&mut store);
        assert_eq!(game.coins, DEFAULT_COINS);
        for key in SAVE_KEYS {
            assert!(store.get(key).is_none(), "{key} survived clear");
        }
    }

    #[test]
    fn export_import_round_trips() {
        let game = played_game();
        let bundle = export(&game);

        let mut store = MemoryStore::new();
        let imported = import(&mut store, &bundle).unwrap();
        assert_eq!(imported.coins, game.coins);
        assert_eq!(imported.herbs, game.herbs);
        assert_eq!(imported.drinks, game.drinks);
        assert_eq!(imported.stats, game.stats);
        assert_eq!(imported.settings, game.settings);
        assert_eq!(imported.garden.planted_count(), 1);
    }

    #[test]
    fn import_rejects_garbage_wholesale() {
        let mut store = MemoryStore::new();
        store.set(KEY_COINS, "999");

        assert!(matches!(
            import(&mut store, "not json at all"),
            Err(ImportError::Malformed(_))
        ));
        // Nothing was touched.
        assert_eq!(store.get(KEY_COINS).as_deref(), Some("999"));
        assert!(store.get(KEY_GARDEN).is_none());
    }

    #[test]
    fn import_rejects_bad_fields_without_partial_writes() {
        let game = played_game();
        let bundle = export(&game);

        // Corrupt a single field inside an otherwise valid bundle.
        let mut value: serde_json::Value = serde_json::from_str(&bundle).unwrap();
        value["coins"] = serde_json::Value::String(String::from("plenty"));
        let corrupt = serde_json::to_string(&value).unwrap();

        let mut store = MemoryStore::new();
        let err = import(&mut store, &corrupt).unwrap_err();
        assert!(matches!(err, ImportError::BadField("coins")));
        for key in SAVE_KEYS {
            assert!(store.get(key).is_none(), "{key} was partially written");
        }
    }

    #[test]
    fn import_validates_settings_choices() {
        let game = played_game();
        let bundle = export(&game);
        let mut value: serde_json::Value = serde_json::from_str(&bundle).unwrap();
        value["settings"]["focusLength"] = serde_json::Value::String(String::from("26"));
        let corrupt = serde_json::to_string(&value).unwrap();

        let mut store = MemoryStore::new();
        assert!(matches!(
            import(&mut store, &corrupt),
            Err(ImportError::BadField("settings.focusLength"))
        ));
    }

    #[test]
    fn garden_codec_rejects_wrong_tile_count() {
        assert!(decode_garden("[]").is_none());
        assert!(decode_garden("[1,2,3]").is_none());
    }
}
