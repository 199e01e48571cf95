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

use std::path::Path;
use std::io::{BufReader, BufRead};
use std::{fs, process::ExitCode, ffi::OsString};
use clap::Parser;
use lexora::catalog::{CatalogFile, StaticCatalog};
use lexora::clock::format_time;
use lexora::config::GameConfig;
use lexora::dictionary::Dictionary;
use lexora::puzzle_data::PuzzleDefinition;

#[derive(Parser)]
#[command(name = "build-catalog")]
struct Cli {
    #[arg(required = true, value_name = "PUZZLES")]
    levels: Vec<OsString>,
    #[arg(short = 'D', long, value_name = "PUZZLES")]
    daily: Vec<OsString>,
    #[arg(short, long, value_name = "FILE")]
    dictionary: Vec<OsString>,
    #[arg(short, long, value_name = "FILE")]
    config: Option<OsString>,
    #[arg(short = 'H', long)]
    human_readable: bool,
}

fn read_puzzles<P: AsRef<Path>>(
    filename: P,
    config: &GameConfig,
    puzzles: &mut Vec<PuzzleDefinition>,
) -> Result<(), String> {
    let filename = filename.as_ref();
    let file = fs::File::open(filename)
        .map_err(|e| format!("{}: {}", filename.to_string_lossy(), e))?;

    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            format!("{}: {}", filename.to_string_lossy(), e)
        })?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let puzzle = PuzzleDefinition::parse_line(line, &config.levels)
            .map_err(|e| {
                format!(
                    "{}:{}: {}",
                    filename.to_string_lossy(),
                    line_num + 1,
                    e,
                )
            })?;

        puzzles.push(puzzle);
    }

    Ok(())
}

fn read_word_list<I, P>(
    filenames: I,
) -> Result<Dictionary, std::io::Error>
    where I: IntoIterator<Item = P>,
          P: AsRef<Path>,
{
    let mut words = Dictionary::default();

    for filename in filenames {
        let contents = fs::read_to_string(&filename).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("{}: {}", filename.as_ref().to_string_lossy(), e),
            )
        })?;

        words.extend(Dictionary::from_word_list(&contents).iter());
    }

    Ok(words)
}

fn print_puzzle(puzzle: &PuzzleDefinition, dictionary: Option<&Dictionary>) {
    println!(
        "\n{} ({}, {})\n",
        puzzle.id(),
        puzzle.difficulty(),
        format_time(puzzle.time_limit()),
    );

    for (i, letter) in puzzle.letters().iter().enumerate() {
        if i > 0 {
            print!(" ");
        }
        print!("{}", letter);
    }

    println!("\n");

    for word in puzzle.target_words().iter() {
        let missing = dictionary.map_or(false, |d| !d.contains(word));

        if missing {
            println!("{} *", word);
        } else {
            println!("{}", word);
        }
    }
}

fn print_human_readable(
    levels: &[PuzzleDefinition],
    daily: &[PuzzleDefinition],
    dictionary: Option<&Dictionary>,
) {
    println!("Levels");

    for puzzle in levels.iter() {
        print_puzzle(puzzle, dictionary);
    }

    if !daily.is_empty() {
        println!("\nDaily puzzles");

        for puzzle in daily.iter() {
            print_puzzle(puzzle, dictionary);
        }
    }

    if dictionary.is_some() {
        println!("\n* not in the word list");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref filename) => {
            let result = fs::read_to_string(filename)
                .map_err(|e| e.to_string())
                .and_then(|s| GameConfig::from_json(&s).map_err(|e| e.to_string()));

            match result {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}: {}", filename.to_string_lossy(), e);
                    return ExitCode::FAILURE;
                },
            }
        },
        None => GameConfig::default(),
    };

    let words = match read_word_list(cli.dictionary.iter()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let mut levels = Vec::new();
    let mut daily = Vec::new();

    for (filenames, puzzles) in [
        (&cli.levels, &mut levels),
        (&cli.daily, &mut daily),
    ] {
        for filename in filenames.iter() {
            if let Err(e) = read_puzzles(filename, &config, puzzles) {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    // Checks the ids before anything is written
    if let Err(e) = StaticCatalog::new(
        levels.clone(),
        daily.clone(),
        Dictionary::default(),
    ) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cli.human_readable {
        let dictionary = (!words.is_empty()).then_some(&words);

        print_human_readable(&levels, &daily, dictionary);
    } else {
        let mut words = words.iter().map(str::to_string).collect::<Vec<_>>();
        words.sort_unstable();

        let catalog = CatalogFile { levels, daily, words };

        match serde_json::to_string_pretty(&catalog) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
