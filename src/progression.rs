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

use std::collections::BTreeSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::config::GameConfig;
use super::resolver::WordAward;
use super::save_state;
use super::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            sound_enabled: true,
            vibration_enabled: true,
            notifications_enabled: true,
            dark_mode: true,
            language: "az".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    pub coins: u32,
    pub hints: u32,
    pub current_level: u32,
    pub total_score: u32,
    pub streak: u32,
    pub daily_streak: u32,
    pub daily_completed_dates: BTreeSet<NaiveDate>,
    pub last_played_date: Option<NaiveDate>,
    pub settings: Settings,
}

impl ProgressionState {
    pub fn new(config: &GameConfig) -> ProgressionState {
        ProgressionState {
            coins: config.starting_coins,
            hints: config.starting_hints,
            current_level: 1,
            total_score: 0,
            streak: 0,
            daily_streak: 0,
            daily_completed_dates: BTreeSet::new(),
            last_played_date: None,
            settings: Settings::default(),
        }
    }
}

impl Default for ProgressionState {
    fn default() -> ProgressionState {
        ProgressionState::new(&GameConfig::default())
    }
}

/// Owner of the player’s progression. Every mutation goes through
/// one of the methods below and is written to the store straight
/// away. A failed write is logged and otherwise ignored; the copy in
/// memory stays authoritative.
pub struct Ledger<S> {
    state: ProgressionState,
    store: S,
    config: GameConfig,
}

impl<S: Store> Ledger<S> {
    /// Loads the saved state, falling back to the defaults if there
    /// isn’t one or it can’t be read.
    pub fn load(mut store: S, config: GameConfig) -> Ledger<S> {
        let defaults = ProgressionState::new(&config);

        let state = match store.load() {
            Ok(Some(blob)) => match save_state::read(&blob, &defaults) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("error parsing save state: {}", e);
                    defaults
                },
            },
            Ok(None) => defaults,
            Err(e) => {
                tracing::warn!("error loading save state: {}", e);
                defaults
            },
        };

        Ledger { state, store, config }
    }

    fn flush(&mut self) {
        let blob = save_state::write(&self.state);

        if let Err(e) = self.store.save(&blob) {
            tracing::warn!("error saving state: {}", e);
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn snapshot(&self) -> ProgressionState {
        self.state.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn coins(&self) -> u32 {
        self.state.coins
    }

    pub fn hints(&self) -> u32 {
        self.state.hints
    }

    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn is_day_completed(&self, date: NaiveDate) -> bool {
        self.state.daily_completed_dates.contains(&date)
    }

    pub fn award_word(&mut self, award: WordAward) {
        self.state.coins = self.state.coins.saturating_add(award.coins);
        self.state.total_score =
            self.state.total_score.saturating_add(award.score);
        self.flush();
    }

    pub fn award_level_completion(
        &mut self,
        stars: u32,
        coins: u32,
        xp: u32,
        date: NaiveDate,
    ) {
        tracing::info!(
            level = self.state.current_level,
            stars,
            coins,
            xp,
            "level completed",
        );

        self.state.coins = self.state.coins.saturating_add(coins);
        self.state.total_score = self.state.total_score.saturating_add(xp);
        self.state.streak = self.state.streak.saturating_add(1);
        self.state.current_level = self.state.current_level.saturating_add(1);
        self.state.last_played_date = Some(date);
        self.flush();
    }

    /// Credits a session that didn’t advance the level pointer.
    pub fn award_session_reward(&mut self, coins: u32, xp: u32, date: NaiveDate) {
        self.state.coins = self.state.coins.saturating_add(coins);
        self.state.total_score = self.state.total_score.saturating_add(xp);
        self.state.last_played_date = Some(date);
        self.flush();
    }

    /// Returns false if the bonus for `date` was already given.
    pub fn award_daily_completion(&mut self, date: NaiveDate) -> bool {
        if !self.state.daily_completed_dates.insert(date) {
            return false;
        }

        tracing::info!(%date, "daily challenge completed");

        self.state.coins =
            self.state.coins.saturating_add(self.config.daily_bonus_coins);
        self.state.total_score =
            self.state.total_score.saturating_add(self.config.daily_bonus_score);
        self.state.daily_streak = self.state.daily_streak.saturating_add(1);
        self.flush();

        true
    }

    pub fn spend_currency(&mut self, amount: u32) -> bool {
        if self.state.coins < amount {
            return false;
        }

        self.state.coins -= amount;
        self.flush();

        true
    }

    pub fn purchase_hints(&mut self, count: u32, cost: u32) -> bool {
        if self.state.coins < cost {
            return false;
        }

        self.state.coins -= cost;
        self.state.hints = self.state.hints.saturating_add(count);
        self.flush();

        true
    }

    pub fn consume_hint(&mut self) -> bool {
        if self.state.hints == 0 {
            return false;
        }

        self.state.hints -= 1;
        self.flush();

        true
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        self.flush();
    }

    /// Goes back to the starting values but keeps the settings.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("error clearing save state: {}", e);
        }

        let settings = std::mem::take(&mut self.state.settings);

        self.state = ProgressionState {
            settings,
            ..ProgressionState::new(&self.config)
        };

        self.flush();
    }
}
