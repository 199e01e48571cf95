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

//! General word list. Membership here never decides whether a word
//! scores in a session; only the puzzle's target list does that.

use std::collections::HashSet;

pub static BUILTIN_WORDS: [&str; 106] = [
    "ANA", "ATA", "BAŞ", "GÖZ", "ƏL", "QIZ", "OĞL", "EV", "SU", "OD",
    "YER", "GÜN", "AY", "İL", "YOL", "DAĞ", "DƏM", "SAZ", "QAR", "YAZ",
    "ALMA", "ARMUD", "BAĞÇA", "ÇÖRƏK", "DƏNIZ", "GÜNƏŞ", "HƏYAT", "İŞIQ",
    "KITAB", "MEYVƏ", "NƏĞMƏ", "ÖMÜR", "PAYIZ", "QƏLƏM", "RƏNG", "SƏHƏR",
    "ULDUZ", "VƏTƏN", "YAŞIL", "ZƏFƏR", "ŞƏKIL", "ƏSIL", "GÖZƏL", "QAPI",
    "BABA", "NƏNƏ", "QARDAŞ", "BACI", "DOST", "YUXU", "AYNA", "BULUD",
    "AZƏRI", "BAHAR", "CAHAN", "DÜNYA", "ƏBƏDI", "FƏSIL", "GECƏ", "HƏFTƏ",
    "İNSAN", "KÖNÜL", "LƏZZƏT", "MƏHƏBBƏT", "NƏSIL", "OCAQ", "PƏNCƏRƏ",
    "QONAQ", "RƏHBƏR", "SƏRVƏT", "TƏBII", "ÜRƏK", "VÜQAR", "YADDAŞ",
    "ZAMAN", "ŞƏRƏF", "ƏDALƏT", "TORPAQ", "KƏND", "ŞƏHƏR", "AILƏ", "SEVGI",
    "AZƏRBAYCAN", "BABALAR", "CƏSARƏT", "DOSTLUQ", "ƏZIZIM", "FƏXARƏT",
    "GÖZƏLLIK", "HƏQIQƏT", "İRADƏ", "KAINAT", "LƏTAFƏT", "MƏRIFƏT",
    "NƏCIBLIK", "OCAQLAR", "PARLAQ", "QÜDRƏT", "RƏHMƏT", "SƏADƏT",
    "TƏVAZÖ", "ÜMIDLI", "VƏFALI", "YENILIK", "ZƏHMƏT", "ŞÜCAƏT",
];

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn new<I, T>(words: I) -> Dictionary
        where I: IntoIterator<Item = T>,
              T: AsRef<str>
    {
        let mut dictionary = Dictionary::default();
        dictionary.extend(words);
        dictionary
    }

    pub fn builtin() -> Dictionary {
        Dictionary::new(BUILTIN_WORDS.iter())
    }

    /// Parses a word list with one word per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_word_list(s: &str) -> Dictionary {
        Dictionary::new(
            s.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
        )
    }

    pub fn extend<I, T>(&mut self, words: I)
        where I: IntoIterator<Item = T>,
              T: AsRef<str>
    {
        for word in words {
            self.words.insert(upper_case(word.as_ref()));
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&upper_case(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words in upper case, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn upper_case(word: &str) -> String {
    word.chars().flat_map(char::to_uppercase).collect()
}
