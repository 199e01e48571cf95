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

use std::fmt;
use serde::Serialize;
use super::config::GameConfig;
use super::puzzle_data::{PuzzleDefinition, MIN_WORD_LENGTH};
use super::session::SessionState;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    TooShort,
    AlreadyFound,
    NotInList,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Rejection::TooShort => "Too short",
            Rejection::AlreadyFound => "Already found",
            Rejection::NotInList => "Not in list",
        };

        write!(f, "{}", text)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize)]
pub struct WordAward {
    pub coins: u32,
    pub score: u32,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum WordOutcome {
    Accepted { word: String, award: WordAward },
    Rejected { word: String, reason: Rejection },
}

impl WordOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WordOutcome::Accepted { .. })
    }
}

/// Words found so far in a session, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundWords {
    words: Vec<String>,
}

impl FoundWords {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    fn insert(&mut self, word: String) -> bool {
        if self.contains(&word) {
            false
        } else {
            self.words.push(word);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn covers(&self, puzzle: &PuzzleDefinition) -> bool {
        puzzle.target_words().iter().all(|w| self.contains(w))
    }
}

pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

/// The acceptance predicate shared by manual and automatic
/// submission.
pub fn check_word(
    word: &str,
    puzzle: &PuzzleDefinition,
    found: &FoundWords,
) -> Result<(), Rejection> {
    if word_length(word) < MIN_WORD_LENGTH {
        Err(Rejection::TooShort)
    } else if !puzzle.is_target(word) {
        Err(Rejection::NotInList)
    } else if found.contains(word) {
        Err(Rejection::AlreadyFound)
    } else {
        Ok(())
    }
}

pub fn word_award(word: &str, config: &GameConfig) -> WordAward {
    WordAward {
        coins: config.coins_per_word,
        score: (word_length(word) as u32).saturating_mul(config.score_per_letter),
    }
}

/// Accepts `word` into the session if it passes the predicate. On
/// acceptance the selection is cleared. A rejection leaves the
/// session untouched.
pub fn try_complete(
    word: &str,
    session: &mut SessionState,
    config: &GameConfig,
) -> WordOutcome {
    if let Err(reason) = check_word(word, &session.puzzle, &session.found) {
        return WordOutcome::Rejected { word: word.to_string(), reason };
    }

    session.found.insert(word.to_string());
    session.selection.clear();

    WordOutcome::Accepted {
        word: word.to_string(),
        award: word_award(word, config),
    }
}

/// Explicit submit press. Skips the auto-submit guard and always
/// leaves the selection empty.
pub fn submit(session: &mut SessionState, config: &GameConfig) -> WordOutcome {
    let word = session.current_word();
    let outcome = try_complete(&word, session, config);

    session.selection.clear();

    outcome
}

/// Checked after every change to the selection. Only fires when the
/// spelled word is acceptable and isn’t the one that fired last time.
pub fn auto_submit(
    session: &mut SessionState,
    config: &GameConfig,
) -> Option<WordOutcome> {
    let word = session.current_word();

    if session.last_auto_submitted.as_deref() == Some(word.as_str()) ||
        check_word(&word, &session.puzzle, &session.found).is_err()
    {
        return None;
    }

    let outcome = try_complete(&word, session, config);

    session.last_auto_submitted = Some(word);

    Some(outcome)
}
