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

use serde::Deserialize;
use super::puzzle_data::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyPreset {
    pub time: u32,
    pub letters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DifficultyPresets {
    pub easy: DifficultyPreset,
    pub medium: DifficultyPreset,
    pub hard: DifficultyPreset,
    pub expert: DifficultyPreset,
}

impl Default for DifficultyPresets {
    fn default() -> DifficultyPresets {
        DifficultyPresets {
            easy: DifficultyPreset { time: 180, letters: 4 },
            medium: DifficultyPreset { time: 120, letters: 5 },
            hard: DifficultyPreset { time: 90, letters: 6 },
            expert: DifficultyPreset { time: 60, letters: 7 },
        }
    }
}

impl DifficultyPresets {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyPreset {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }
}

/// Reward rules and starting values. Every field can be overridden
/// from a JSON file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub coins_per_word: u32,
    pub score_per_letter: u32,
    pub coins_per_level: u32,
    pub level_xp: u32,
    pub speed_bonus_xp: u32,
    /// A full clear with strictly more seconds left than this earns
    /// the speed bonus.
    pub speed_bonus_threshold: u32,
    pub timeout_coins_per_word: u32,
    pub timeout_xp_per_word: u32,
    pub daily_bonus_coins: u32,
    pub daily_bonus_score: u32,
    pub starting_coins: u32,
    pub starting_hints: u32,
    pub levels: DifficultyPresets,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            coins_per_word: 50,
            score_per_letter: 10,
            coins_per_level: 150,
            level_xp: 100,
            speed_bonus_xp: 50,
            speed_bonus_threshold: 60,
            timeout_coins_per_word: 50,
            timeout_xp_per_word: 30,
            daily_bonus_coins: 500,
            daily_bonus_score: 500,
            starting_coins: 1250,
            starting_hints: 5,
            levels: DifficultyPresets::default(),
        }
    }
}

impl GameConfig {
    /// Only a JSON object is accepted. Without this check serde would
    /// fill the fields from an array by position.
    pub fn from_json(s: &str) -> Result<GameConfig, serde_json::Error> {
        let value = serde_json::from_str::<serde_json::Value>(s)?;

        if !value.is_object() {
            return Err(serde::de::Error::custom("config is not an object"));
        }

        serde_json::from_value(value)
    }

    pub fn default_time(&self, difficulty: Difficulty) -> u32 {
        self.levels.get(difficulty).time
    }
}
