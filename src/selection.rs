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

/// Ordered set of letter positions chosen on the wheel. The word
/// depends on the order of the taps so this can’t be a plain set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Appends `index` if it isn’t selected, otherwise removes it and
    /// keeps the remaining positions in their order. Indices outside
    /// of `0..n_letters` are ignored. Returns whether anything changed.
    pub fn toggle(&mut self, index: usize, n_letters: usize) -> bool {
        if index >= n_letters {
            return false;
        }

        if let Some(pos) = self.indices.iter().position(|&i| i == index) {
            self.indices.remove(pos);
        } else {
            self.indices.push(index);
        }

        true
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn current_word(&self, letters: &[char]) -> String {
        self.indices.iter()
            .filter_map(|&i| letters.get(i))
            .flat_map(|ch| ch.to_uppercase())
            .collect()
    }
}
