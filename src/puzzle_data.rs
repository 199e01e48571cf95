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
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::config::DifficultyPresets;

pub const MIN_WORD_LENGTH: usize = 2;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };

        write!(f, "{}", text)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Difficulty, Error> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(Error::InvalidDifficulty),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PuzzleRecord", into = "PuzzleRecord")]
pub struct PuzzleDefinition {
    id: u32,
    letters: Vec<char>,
    target_words: Vec<String>,
    time_limit: u32,
    difficulty: Difficulty,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidId,
    InvalidDifficulty,
    InvalidTime,
    MissingField,
    TrailingText,
    EmptyLetters,
    InvalidLetter(String),
    NoWords,
    ShortWord(String),
    LowercaseWord(String),
    DuplicateWord(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidId => write!(f, "invalid id"),
            Error::InvalidDifficulty => write!(f, "invalid difficulty"),
            Error::InvalidTime => write!(f, "invalid time limit"),
            Error::MissingField => write!(f, "missing field"),
            Error::TrailingText => write!(f, "trailing text"),
            Error::EmptyLetters => write!(f, "empty letters"),
            Error::InvalidLetter(l) => write!(f, "invalid letter “{}”", l),
            Error::NoWords => write!(f, "no target words"),
            Error::ShortWord(w) => write!(f, "word too short: {}", w),
            Error::LowercaseWord(w) => write!(f, "word not uppercase: {}", w),
            Error::DuplicateWord(w) => write!(f, "duplicate word: {}", w),
        }
    }
}

impl std::error::Error for Error {}

impl PuzzleDefinition {
    pub fn new<I, T>(
        id: u32,
        letters: Vec<char>,
        target_words: I,
        time_limit: u32,
        difficulty: Difficulty,
    ) -> Result<PuzzleDefinition, Error>
        where I: IntoIterator<Item = T>,
              T: Into<String>
    {
        if letters.is_empty() {
            return Err(Error::EmptyLetters);
        }

        if time_limit == 0 {
            return Err(Error::InvalidTime);
        }

        let mut words: Vec<String> = Vec::new();

        for word in target_words {
            let word = word.into();

            if word.chars().count() < MIN_WORD_LENGTH {
                return Err(Error::ShortWord(word));
            }

            if word.chars().any(char::is_lowercase) {
                return Err(Error::LowercaseWord(word));
            }

            if words.contains(&word) {
                return Err(Error::DuplicateWord(word));
            }

            words.push(word);
        }

        if words.is_empty() {
            return Err(Error::NoWords);
        }

        Ok(PuzzleDefinition {
            id,
            letters,
            target_words: words,
            time_limit,
            difficulty,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    pub fn is_target(&self, word: &str) -> bool {
        self.target_words.iter().any(|w| w == word)
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Parses the `id:difficulty:time:LETTERS:WORD,WORD` line format.
    /// An empty or `-` time takes the time from the difficulty preset.
    pub fn parse_line(
        s: &str,
        presets: &DifficultyPresets,
    ) -> Result<PuzzleDefinition, Error> {
        let mut parts = s.trim().split(':');

        let Some(id) = parts.next()
            .and_then(|p| p.parse::<u32>().ok())
        else {
            return Err(Error::InvalidId);
        };

        let difficulty = parts.next()
            .ok_or(Error::MissingField)?
            .parse::<Difficulty>()?;

        let time_limit = match parts.next() {
            None => return Err(Error::MissingField),
            Some("") | Some("-") => presets.get(difficulty).time,
            Some(t) => t.parse::<u32>().map_err(|_| Error::InvalidTime)?,
        };

        let letters = parts.next()
            .ok_or(Error::MissingField)?
            .chars()
            .collect::<Vec<char>>();

        let words = parts.next().ok_or(Error::MissingField)?;

        if parts.next().is_some() {
            return Err(Error::TrailingText);
        }

        PuzzleDefinition::new(
            id,
            letters,
            words.split(',').filter(|w| !w.is_empty()),
            time_limit,
            difficulty,
        )
    }
}

impl FromStr for PuzzleDefinition {
    type Err = Error;

    fn from_str(s: &str) -> Result<PuzzleDefinition, Error> {
        PuzzleDefinition::parse_line(s, &DifficultyPresets::default())
    }
}

impl fmt::Display for PuzzleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}:", self.id, self.difficulty, self.time_limit)?;

        for letter in self.letters.iter() {
            write!(f, "{}", letter)?;
        }

        write!(f, ":{}", self.target_words.join(","))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PuzzleRecord {
    id: u32,
    letters: Vec<String>,
    target_words: Vec<String>,
    difficulty: Difficulty,
    time_limit: u32,
}

impl TryFrom<PuzzleRecord> for PuzzleDefinition {
    type Error = Error;

    fn try_from(record: PuzzleRecord) -> Result<PuzzleDefinition, Error> {
        let mut letters = Vec::with_capacity(record.letters.len());

        for letter in record.letters.into_iter() {
            let mut chars = letter.chars();

            match (chars.next(), chars.next()) {
                (Some(ch), None) => letters.push(ch),
                _ => return Err(Error::InvalidLetter(letter)),
            }
        }

        PuzzleDefinition::new(
            record.id,
            letters,
            record.target_words,
            record.time_limit,
            record.difficulty,
        )
    }
}

impl From<PuzzleDefinition> for PuzzleRecord {
    fn from(puzzle: PuzzleDefinition) -> PuzzleRecord {
        PuzzleRecord {
            id: puzzle.id,
            letters: puzzle.letters.iter().map(char::to_string).collect(),
            target_words: puzzle.target_words,
            difficulty: puzzle.difficulty,
            time_limit: puzzle.time_limit,
        }
    }
}
