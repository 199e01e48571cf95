// Lexora – A word game
// Copyright (C) 2024  The Lexora developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use wasm_bindgen::prelude::*;
use web_sys::console;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use super::catalog::StaticCatalog;
use super::config::GameConfig;
use super::progression::{Ledger, Settings};
use super::session::{Phase, SessionController};
use super::store::{self, Store};

const SAVE_STATE_KEY: &'static str = "lexora-progression";

fn get_local_storage() -> Option<web_sys::Storage> {
    let Some(window) = web_sys::window()
    else {
        console::log_1(&"Failed to get window".into());
        return None;
    };

    match window.local_storage() {
        Ok(Some(local_storage)) => Some(local_storage),
        Ok(None) => {
            console::log_1(&"Local storage is None".into());
            None
        },
        Err(_) => {
            console::log_1(&"Error getting local storage".into());
            None
        },
    }
}

/// Keeps the progression blob under a single `localStorage` key.
struct LocalStorageStore {
    local_storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    fn new() -> LocalStorageStore {
        LocalStorageStore {
            local_storage: get_local_storage(),
        }
    }

    fn storage(&self) -> Result<&web_sys::Storage, store::Error> {
        self.local_storage.as_ref().ok_or_else(|| {
            store::Error::Unavailable("no local storage".to_string())
        })
    }
}

impl Store for LocalStorageStore {
    fn load(&mut self) -> Result<Option<String>, store::Error> {
        self.storage()?.get_item(SAVE_STATE_KEY).map_err(|_| {
            console::log_1(&"Error getting save state".into());
            store::Error::Unavailable("get_item failed".to_string())
        })
    }

    fn save(&mut self, blob: &str) -> Result<(), store::Error> {
        self.storage()?.set_item(SAVE_STATE_KEY, blob).map_err(|_| {
            console::log_1(&"Error saving state".into());
            store::Error::Unavailable("set_item failed".to_string())
        })
    }

    fn clear(&mut self) -> Result<(), store::Error> {
        self.storage()?.remove_item(SAVE_STATE_KEY).map_err(|_| {
            console::log_1(&"Error removing save state".into());
            store::Error::Unavailable("remove_item failed".to_string())
        })
    }
}

fn today() -> Result<NaiveDate, JsValue> {
    let date = js_sys::Date::new_0();

    NaiveDate::from_ymd_opt(
        date.get_utc_full_year() as i32,
        date.get_utc_month() + 1,
        date.get_utc_date(),
    ).ok_or_else(|| JsValue::from_str("invalid date"))
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(s) => s,
        Err(e) => {
            console::log_1(&format!("Error serializing: {}", e).into());
            "null".to_string()
        },
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    phase: Phase,
    puzzle_id: u32,
    is_daily: bool,
    letters: &'a [char],
    selected: &'a [usize],
    current_word: String,
    found_words: Vec<&'a str>,
    n_targets: usize,
    remaining_seconds: u32,
}

/// The game as seen from JavaScript. The page drives it with input
/// and a one second timer, and pulls the resulting events as JSON.
#[wasm_bindgen]
pub struct Lexora {
    controller: SessionController<StaticCatalog>,
    ledger: Ledger<LocalStorageStore>,
    rng: StdRng,
}

#[wasm_bindgen]
impl Lexora {
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<Lexora, JsValue> {
        let config = match config_json {
            Some(s) => GameConfig::from_json(&s).map_err(|e| {
                JsValue::from_str(&format!("config: {}", e))
            })?,
            None => GameConfig::default(),
        };

        let catalog = match catalog_json {
            Some(s) => StaticCatalog::from_json(&s).map_err(|e| {
                JsValue::from_str(&format!("catalog: {}", e))
            })?,
            None => StaticCatalog::builtin(),
        };

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

        Ok(Lexora {
            ledger: Ledger::load(LocalStorageStore::new(), config.clone()),
            controller: SessionController::new(catalog, config),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn start_level(&mut self, id: u32) -> Result<(), JsValue> {
        self.controller.start_level(id, today()?)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn start_current_level(&mut self) -> Result<(), JsValue> {
        self.start_level(self.ledger.current_level())
    }

    pub fn start_daily(&mut self) -> Result<(), JsValue> {
        self.controller.start_daily(today()?)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns true if the tap completed a word.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.controller.toggle(index, &mut self.ledger).is_some()
    }

    pub fn clear_selection(&mut self) {
        self.controller.clear_selection();
    }

    /// Returns true if the word was accepted.
    pub fn submit(&mut self) -> bool {
        self.controller.submit(&mut self.ledger)
            .map_or(false, |outcome| outcome.is_accepted())
    }

    pub fn tick(&mut self) {
        self.controller.tick();
    }

    /// Commits the rewards once the completion screen is dismissed.
    pub fn settle(&mut self) -> bool {
        self.controller.settle(&mut self.ledger).is_some()
    }

    pub fn abandon(&mut self) {
        self.controller.abandon();
    }

    pub fn use_hint(&mut self) -> Option<String> {
        self.controller.use_hint(&mut self.ledger).map(String::from)
    }

    pub fn shuffle(&mut self) {
        self.controller.shuffle(&mut self.rng);
    }

    pub fn is_dictionary_word(&self, word: &str) -> bool {
        self.controller.is_dictionary_word(word)
    }

    pub fn purchase_hints(&mut self, count: u32, cost: u32) -> bool {
        self.ledger.purchase_hints(count, cost)
    }

    pub fn spend_currency(&mut self, amount: u32) -> bool {
        self.ledger.spend_currency(amount)
    }

    pub fn update_settings(&mut self, settings_json: &str) -> Result<(), JsValue> {
        let settings = serde_json::from_str::<Settings>(settings_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.ledger.update_settings(settings);

        Ok(())
    }

    pub fn reset_progression(&mut self) {
        self.controller.abandon();
        self.ledger.reset();
    }

    /// JSON array of everything that happened since the last call.
    pub fn take_events(&mut self) -> String {
        to_json(&self.controller.take_events())
    }

    pub fn progression(&self) -> String {
        to_json(self.ledger.state())
    }

    pub fn session(&self) -> String {
        let Some(session) = self.controller.session()
        else {
            return "null".to_string();
        };

        to_json(&SessionView {
            phase: self.controller.phase(),
            puzzle_id: session.puzzle().id(),
            is_daily: session.is_daily(),
            letters: session.letters(),
            selected: session.selected_indices(),
            current_word: session.current_word(),
            found_words: session.found_words().iter().collect(),
            n_targets: session.puzzle().target_words().len(),
            remaining_seconds: session.remaining_seconds(),
        })
    }

    pub fn completion(&self) -> String {
        match self.controller.completion() {
            Some(completion) => to_json(completion),
            None => "null".to_string(),
        }
    }
}

#[wasm_bindgen]
pub fn init_lexora() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}
