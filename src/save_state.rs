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

//! Reading and writing of the persisted progression blob.
//!
//! The reader goes through the blob one field at a time. A missing
//! field takes its default, a field of the wrong shape takes its
//! default with a warning, and fields that aren’t known are dropped.

use std::fmt;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use super::progression::{ProgressionState, Settings};

pub const FORMAT_VERSION: u64 = 1;

#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    NotAnObject,
    UnsupportedVersion(u64),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Json(e) => e.fmt(f),
            Error::NotAnObject => write!(f, "save state is not an object"),
            Error::UnsupportedVersion(v) => {
                write!(f, "unsupported save state version {}", v)
            },
        }
    }
}

impl std::error::Error for Error {}

struct Reader<'a> {
    object: &'a Map<String, Value>,
    section: &'static str,
}

impl<'a> Reader<'a> {
    fn field<T, F>(&self, key: &str, default: T, convert: F) -> T
        where F: FnOnce(&Value) -> Option<T>
    {
        let Some(value) = self.object.get(key)
        else {
            return default;
        };

        match convert(value) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    section = self.section,
                    field = key,
                    "invalid value in save state, using default",
                );
                default
            },
        }
    }

    fn counter(&self, key: &str, default: u32) -> u32 {
        self.field(key, default, |v| {
            v.as_u64().and_then(|n| u32::try_from(n).ok())
        })
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.field(key, default, Value::as_bool)
    }
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    value.as_str()?.parse::<NaiveDate>().ok()
}

fn read_settings(value: Option<&Value>, defaults: &Settings) -> Settings {
    let Some(object) = value.and_then(Value::as_object)
    else {
        if value.is_some() {
            tracing::warn!("settings in save state is not an object");
        }
        return defaults.clone();
    };

    let reader = Reader { object, section: "settings" };

    Settings {
        sound_enabled: reader.flag("soundEnabled", defaults.sound_enabled),
        vibration_enabled: reader.flag(
            "vibrationEnabled",
            defaults.vibration_enabled,
        ),
        notifications_enabled: reader.flag(
            "notificationsEnabled",
            defaults.notifications_enabled,
        ),
        dark_mode: reader.flag("darkMode", defaults.dark_mode),
        language: reader.field(
            "language",
            defaults.language.clone(),
            |v| v.as_str().filter(|s| !s.is_empty()).map(str::to_string),
        ),
    }
}

pub fn read(
    blob: &str,
    defaults: &ProgressionState,
) -> Result<ProgressionState, Error> {
    let value = serde_json::from_str::<Value>(blob)?;

    let Some(object) = value.as_object()
    else {
        return Err(Error::NotAnObject);
    };

    if let Some(version) = object.get("version").and_then(Value::as_u64) {
        if version > FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
    }

    let reader = Reader { object, section: "progression" };

    let current_level = match reader.counter(
        "currentLevel",
        defaults.current_level,
    ) {
        0 => {
            tracing::warn!("current level of zero in save state");
            defaults.current_level
        },
        level => level,
    };

    let daily_completed_dates = reader.field(
        "dailyCompletedDates",
        defaults.daily_completed_dates.clone(),
        |v| {
            let dates = v.as_array()?;

            Some(dates.iter().filter_map(|date| {
                let parsed = parse_date(date);

                if parsed.is_none() {
                    tracing::warn!(%date, "dropping invalid completed date");
                }

                parsed
            }).collect())
        },
    );

    let last_played_date = reader.field(
        "lastPlayedDate",
        defaults.last_played_date,
        |v| if v.is_null() { Some(None) } else { parse_date(v).map(Some) },
    );

    Ok(ProgressionState {
        coins: reader.counter("coins", defaults.coins),
        hints: reader.counter("hints", defaults.hints),
        current_level,
        total_score: reader.counter("totalScore", defaults.total_score),
        streak: reader.counter("streak", defaults.streak),
        daily_streak: reader.counter("dailyStreak", defaults.daily_streak),
        daily_completed_dates,
        last_played_date,
        settings: read_settings(object.get("settings"), &defaults.settings),
    })
}

pub fn write(state: &ProgressionState) -> String {
    let value = json!({
        "version": FORMAT_VERSION,
        "coins": state.coins,
        "hints": state.hints,
        "currentLevel": state.current_level,
        "totalScore": state.total_score,
        "streak": state.streak,
        "dailyStreak": state.daily_streak,
        "dailyCompletedDates": state.daily_completed_dates.iter()
            .map(NaiveDate::to_string)
            .collect::<Vec<_>>(),
        "lastPlayedDate": state.last_played_date.map(|d| d.to_string()),
        "settings": {
            "soundEnabled": state.settings.sound_enabled,
            "vibrationEnabled": state.settings.vibration_enabled,
            "notificationsEnabled": state.settings.notifications_enabled,
            "darkMode": state.settings.dark_mode,
            "language": state.settings.language,
        },
    });

    value.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse::<NaiveDate>().unwrap()
    }

    #[test]
    fn write_then_read() {
        let mut state = ProgressionState::default();
        state.coins = 42;
        state.current_level = 7;
        state.daily_completed_dates.insert(date("2024-06-02"));
        state.daily_completed_dates.insert(date("2024-05-30"));
        state.last_played_date = Some(date("2024-06-02"));
        state.settings.dark_mode = false;
        state.settings.language = "en".to_string();

        let blob = write(&state);

        assert_eq!(read(&blob, &ProgressionState::default()).unwrap(), state);
    }

    #[test]
    fn missing_fields() {
        let defaults = ProgressionState::default();

        assert_eq!(read("{}", &defaults).unwrap(), defaults);

        let state = read(
            "{\"coins\": 10, \"settings\": {\"soundEnabled\": false}}",
            &defaults,
        ).unwrap();

        assert_eq!(state.coins, 10);
        assert_eq!(state.hints, defaults.hints);
        assert!(!state.settings.sound_enabled);
        assert!(state.settings.vibration_enabled);
        assert_eq!(&state.settings.language, "az");
    }

    #[test]
    fn invalid_fields() {
        let defaults = ProgressionState::default();

        let state = read(
            "{\"coins\": -5, \
              \"hints\": \"lots\", \
              \"currentLevel\": 0, \
              \"streak\": 4294967296, \
              \"totalScore\": 12, \
              \"dailyCompletedDates\": [\"2024-06-02\", \"soon\", 3, \
                                        \"2024-06-02\"], \
              \"lastPlayedDate\": \"yesterday\", \
              \"settings\": [], \
              \"isPlaying\": true, \
              \"completedDays\": [1, 2]}",
            &defaults,
        ).unwrap();

        assert_eq!(state.coins, defaults.coins);
        assert_eq!(state.hints, defaults.hints);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.streak, defaults.streak);
        assert_eq!(state.total_score, 12);
        assert_eq!(
            state.daily_completed_dates.iter().cloned().collect::<Vec<_>>(),
            [date("2024-06-02")],
        );
        assert!(state.last_played_date.is_none());
        assert_eq!(state.settings, defaults.settings);
    }

    #[test]
    fn null_last_played() {
        let mut defaults = ProgressionState::default();
        defaults.last_played_date = Some(date("2024-01-01"));

        let state = read("{\"lastPlayedDate\": null}", &defaults).unwrap();
        assert!(state.last_played_date.is_none());
    }

    #[test]
    fn read_error() {
        let defaults = ProgressionState::default();

        assert_eq!(
            &read("[]", &defaults).unwrap_err().to_string(),
            "save state is not an object",
        );
        assert_eq!(
            &read("{\"version\": 2}", &defaults).unwrap_err().to_string(),
            "unsupported save state version 2",
        );
        assert!(matches!(read("{", &defaults), Err(Error::Json(_))));
    }
}
