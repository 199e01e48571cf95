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

#[cfg(target_arch = "wasm32")]
mod wasm_game;

pub mod config;
pub mod puzzle_data;
pub mod dictionary;
pub mod catalog;
pub mod selection;
pub mod clock;
pub mod resolver;
pub mod store;
pub mod save_state;
pub mod progression;
pub mod session;
