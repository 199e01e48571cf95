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
use std::collections::HashSet;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use super::puzzle_data::PuzzleDefinition;
use super::dictionary::Dictionary;

static BUILTIN_LEVELS: [&str; 20] = [
    "1:easy:180:ALMA:ALMA,ALA,MAL",
    "2:easy:180:GÖZƏL:GÖZƏL,GÖZ,ÖZ",
    "3:easy:180:KİTAB:KİTAB,KAB,TAK",
    "4:medium:150:ŞƏKİL:ŞƏKİL,ŞƏK,KİL",
    "5:medium:150:DƏNİZ:DƏNİZ,DƏN,İZ",
    "6:medium:150:GÜNƏŞ:GÜNƏŞ,GÜN,ŞƏN",
    "7:medium:120:SƏHƏR:SƏHƏR,SƏR,HƏR",
    "8:medium:120:BAHAR:BAHAR,BAR,AH",
    "9:hard:100:TORPAQ:TORPAQ,TOP,RAQ",
    "10:hard:100:SEVGİ:SEVGİ,SEV,GİV",
    "11:medium:120:ÜRƏK:ÜRƏK,RƏK",
    "12:hard:90:ƏSİLŞƏKİL:ƏSİL,ŞƏKİL,İŞ",
    "13:medium:120:VƏTƏN:VƏTƏN,VƏT,TƏN",
    "14:expert:90:DOSTLUQ:DOSTLUQ,DOST,SOT",
    "15:easy:180:AİLƏ:AİLƏ,ALİ,İL",
    "16:medium:120:ZAMAN:ZAMAN,ZAM,MAN",
    "17:medium:120:HƏYAT:HƏYAT,HAY,YAT",
    "18:medium:120:İNSAN:İNSAN,SAN,AN",
    "19:expert:75:GÖZƏLLİK:GÖZƏLLİK,GÖZƏL,GÖZ",
    "20:hard:90:ƏDALƏT:ƏDALƏT,ƏDA,LƏT",
];

static BUILTIN_DAILY: [&str; 7] = [
    "101:expert:120:QƏLƏM:QƏLƏM,QƏL,ƏL",
    "102:expert:120:ULDUZ:ULDUZ,ULD,DUZ",
    "103:expert:120:PAYIZ:PAYIZ,PAY,YAZ",
    "104:expert:120:BULUD:BULUD,BUL,DUL",
    "105:expert:120:MƏKTƏB:MƏKTƏB,MƏK,TƏB",
    "106:expert:120:ÖMÜR:ÖMÜR,ÖM,MÜR",
    "107:expert:120:KÖNÜL:KÖNÜL,KÖN,ÜL",
];

/// Source of puzzle definitions for the session controller.
pub trait Catalog {
    /// Looks up an ordinary level. Daily puzzles are only reachable
    /// through [`Catalog::daily_puzzle`].
    fn puzzle_by_id(&self, id: u32) -> Option<&PuzzleDefinition>;

    /// Must return the same puzzle for the same calendar day.
    fn daily_puzzle(&self, date: NaiveDate) -> Option<&PuzzleDefinition>;

    fn is_dictionary_word(&self, _word: &str) -> bool {
        false
    }
}

#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    DuplicateId(u32),
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
            Error::DuplicateId(id) => write!(f, "duplicate puzzle id {}", id),
        }
    }
}

impl std::error::Error for Error {}

/// On-disk layout of a catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub levels: Vec<PuzzleDefinition>,
    #[serde(default)]
    pub daily: Vec<PuzzleDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,
}

#[derive(Debug)]
pub struct StaticCatalog {
    levels: Vec<PuzzleDefinition>,
    daily: Vec<PuzzleDefinition>,
    dictionary: Dictionary,
}

impl StaticCatalog {
    pub fn new(
        levels: Vec<PuzzleDefinition>,
        daily: Vec<PuzzleDefinition>,
        mut dictionary: Dictionary,
    ) -> Result<StaticCatalog, Error> {
        let mut ids = HashSet::new();

        for puzzle in levels.iter().chain(daily.iter()) {
            if !ids.insert(puzzle.id()) {
                return Err(Error::DuplicateId(puzzle.id()));
            }

            dictionary.extend(puzzle.target_words());
        }

        Ok(StaticCatalog { levels, daily, dictionary })
    }

    pub fn builtin() -> StaticCatalog {
        StaticCatalog {
            levels: parse_builtin(&BUILTIN_LEVELS),
            daily: parse_builtin(&BUILTIN_DAILY),
            dictionary: Dictionary::builtin(),
        }.with_target_words()
    }

    pub fn from_json(s: &str) -> Result<StaticCatalog, Error> {
        let file = serde_json::from_str::<CatalogFile>(s)?;

        let dictionary = if file.words.is_empty() {
            Dictionary::builtin()
        } else {
            Dictionary::new(file.words.iter())
        };

        StaticCatalog::new(file.levels, file.daily, dictionary)
    }

    fn with_target_words(mut self) -> StaticCatalog {
        for puzzle in self.levels.iter().chain(self.daily.iter()) {
            self.dictionary.extend(puzzle.target_words());
        }

        self
    }

    pub fn levels(&self) -> &[PuzzleDefinition] {
        &self.levels
    }

    pub fn daily(&self) -> &[PuzzleDefinition] {
        &self.daily
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

fn parse_builtin(lines: &[&str]) -> Vec<PuzzleDefinition> {
    lines.iter().filter_map(|line| {
        match line.parse::<PuzzleDefinition>() {
            Ok(puzzle) => Some(puzzle),
            Err(e) => {
                tracing::warn!(line, "skipping built-in puzzle: {}", e);
                None
            },
        }
    }).collect()
}

/// Index of the daily puzzle for a date. Sunday is day zero.
pub fn daily_index(date: NaiveDate, n_puzzles: usize) -> Option<usize> {
    if n_puzzles == 0 {
        None
    } else {
        Some(date.weekday().num_days_from_sunday() as usize % n_puzzles)
    }
}

impl Catalog for StaticCatalog {
    fn puzzle_by_id(&self, id: u32) -> Option<&PuzzleDefinition> {
        self.levels.iter().find(|puzzle| puzzle.id() == id)
    }

    fn daily_puzzle(&self, date: NaiveDate) -> Option<&PuzzleDefinition> {
        daily_index(date, self.daily.len()).map(|i| &self.daily[i])
    }

    fn is_dictionary_word(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }
}
