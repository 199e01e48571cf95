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

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use std::{fs, process::ExitCode};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use lexora::catalog::{Catalog, StaticCatalog};
use lexora::clock::format_time;
use lexora::config::GameConfig;
use lexora::progression::Ledger;
use lexora::resolver::Rejection;
use lexora::session::{Event, Phase, SessionController};
use lexora::store::FileStore;

#[derive(Parser)]
#[command(name = "lexora", version, about = "A timed word puzzle game")]
struct Cli {
    /// JSON file overriding the reward rules
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// JSON puzzle catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
    /// Where the progression is kept
    #[arg(short, long, value_name = "FILE", default_value = "lexora-save.json")]
    save: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a level. Defaults to the current level.
    Play {
        level: Option<u32>,
    },
    /// Play today’s daily challenge
    Daily,
    /// Show the saved progression
    Progress,
    /// Forget all progression except the settings
    Reset,
    /// Exchange coins for hints
    BuyHints {
        #[arg(default_value_t = 1)]
        count: u32,
        #[arg(long, value_name = "COINS", default_value_t = 100)]
        cost_per_hint: u32,
    },
    /// List the puzzles in the catalog
    Levels,
}

fn today() -> NaiveDate {
    DateTime::<Utc>::from(SystemTime::now()).date_naive()
}

fn load_config(path: Option<&Path>) -> Result<GameConfig, String> {
    let Some(path) = path
    else {
        return Ok(GameConfig::default());
    };

    fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| GameConfig::from_json(&s).map_err(|e| e.to_string()))
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog, String> {
    let Some(path) = path
    else {
        return Ok(StaticCatalog::builtin());
    };

    fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| StaticCatalog::from_json(&s).map_err(|e| e.to_string()))
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn print_events(events: Vec<Event>) {
    for event in events.into_iter() {
        match event {
            Event::SessionStarted { puzzle_id, is_daily, time_limit, .. } => {
                if is_daily {
                    println!("Daily challenge {}", puzzle_id);
                } else {
                    println!("Level {}", puzzle_id);
                }
                println!("You have {}", format_time(time_limit));
            },
            Event::WordAccepted { word, coins, score, .. } => {
                println!("✓ {}  +{} coins  +{} points", word, coins, score);
            },
            Event::WordRejected { word, reason, in_dictionary } => {
                if reason == Rejection::NotInList && in_dictionary {
                    println!("✗ {}: {} (but it is a real word)", word, reason);
                } else {
                    println!("✗ {}: {}", word, reason);
                }
            },
            Event::SessionCompleted(completion) => {
                if completion.is_timeout {
                    println!("\nTime’s up!");
                } else {
                    println!("\nAll words found!");
                }

                println!(
                    "{}  {} coins  {} XP  in {}",
                    "★".repeat(completion.stars as usize),
                    completion.coins,
                    completion.xp,
                    format_time(completion.time_used),
                );
            },
            Event::DailyBonusAwarded { coins, score, .. } => {
                println!("Daily bonus: +{} coins  +{} points", coins, score);
            },
            Event::ProgressionChanged(_) => (),
        }
    }
}

fn print_board(controller: &SessionController<StaticCatalog>) {
    let Some(session) = controller.session()
    else {
        return;
    };

    println!();

    for (i, letter) in session.letters().iter().enumerate() {
        let marker = if session.selected_indices().contains(&i) {
            '*'
        } else {
            ' '
        };
        print!(" {}{}{}", i + 1, letter, marker);
    }

    println!();

    let found = session.found_words().iter().collect::<Vec<_>>();

    println!(
        "{}  {}/{} words  {}  {}",
        format_time(session.remaining_seconds()),
        found.len(),
        session.puzzle().target_words().len(),
        found.join(" "),
        session.current_word(),
    );
}

fn run_session(
    controller: &mut SessionController<StaticCatalog>,
    ledger: &mut Ledger<FileStore>,
) -> ExitCode {
    let seed = SystemTime::now().duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);

    println!(
        "Type letter numbers to select them, “s” to submit, “c” to clear, \
         “h” for a hint, “x” to shuffle or “q” to give up."
    );

    print_events(controller.take_events());
    print_board(controller);

    let mut last_tick = Instant::now();

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin: {}", e);
                return ExitCode::FAILURE;
            },
        };

        let seconds = last_tick.elapsed().as_secs();

        for _ in 0..seconds {
            controller.tick();
        }

        last_tick += Duration::from_secs(seconds);

        if controller.phase() == Phase::Active {
            match line.trim() {
                "" => (),
                "s" => {
                    controller.submit(ledger);
                },
                "c" => controller.clear_selection(),
                "h" => match controller.use_hint(ledger) {
                    Some(letter) => println!("A word starts with {}", letter),
                    None => println!("No hint available"),
                },
                "x" => controller.shuffle(&mut rng),
                "q" => {
                    controller.abandon();
                    return ExitCode::SUCCESS;
                },
                other => for part in other.split_whitespace() {
                    match part.parse::<usize>() {
                        Ok(n) if n >= 1 => {
                            controller.toggle(n - 1, ledger);
                        },
                        _ => println!("unknown command: {}", part),
                    }
                },
            }
        }

        print_events(controller.take_events());

        if controller.settle(ledger).is_some() {
            print_events(controller.take_events());
            return ExitCode::SUCCESS;
        }

        print_board(controller);
    }

    controller.abandon();

    ExitCode::SUCCESS
}

fn print_progress(ledger: &Ledger<FileStore>) {
    let state = ledger.state();

    println!("Level:        {}", state.current_level);
    println!("Coins:        {}", state.coins);
    println!("Hints:        {}", state.hints);
    println!("Score:        {}", state.total_score);
    println!("Streak:       {}", state.streak);
    println!("Daily streak: {}", state.daily_streak);
    println!("Daily wins:   {}", state.daily_completed_dates.len());

    match state.last_played_date {
        Some(date) => println!("Last played:  {}", date),
        None => println!("Last played:  never"),
    }
}

fn print_levels(catalog: &StaticCatalog, ledger: &Ledger<FileStore>) {
    for puzzle in catalog.levels().iter() {
        let marker = if puzzle.id() < ledger.current_level() {
            "✓"
        } else if puzzle.id() == ledger.current_level() {
            "→"
        } else {
            " "
        };

        println!(
            "{} {:>3}  {:<7} {}  {} letters, {} words",
            marker,
            puzzle.id(),
            puzzle.difficulty(),
            format_time(puzzle.time_limit()),
            puzzle.letters().len(),
            puzzle.target_words().len(),
        );
    }

    let today = today();

    if let Some(daily) = catalog.daily_puzzle(today) {
        let marker = if ledger.is_day_completed(today) { "✓" } else { " " };

        println!("\n{} Daily challenge for {}: {}", marker, today, daily.id());
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let catalog = match load_catalog(cli.catalog.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let mut ledger = Ledger::load(FileStore::new(&cli.save), config.clone());

    match cli.command {
        Command::Progress => {
            print_progress(&ledger);
            ExitCode::SUCCESS
        },
        Command::Reset => {
            ledger.reset();
            println!("Progression reset");
            ExitCode::SUCCESS
        },
        Command::BuyHints { count, cost_per_hint } => {
            let cost = count.saturating_mul(cost_per_hint);

            if ledger.purchase_hints(count, cost) {
                println!(
                    "Bought {} hints for {} coins. You now have {}.",
                    count,
                    cost,
                    ledger.hints(),
                );
                ExitCode::SUCCESS
            } else {
                eprintln!(
                    "{} coins needed but you only have {}",
                    cost,
                    ledger.coins(),
                );
                ExitCode::FAILURE
            }
        },
        Command::Levels => {
            print_levels(&catalog, &ledger);
            ExitCode::SUCCESS
        },
        Command::Play { level } => {
            let level = level.unwrap_or_else(|| ledger.current_level());
            let mut controller = SessionController::new(catalog, config);

            if let Err(e) = controller.start_level(level, today()) {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }

            run_session(&mut controller, &mut ledger)
        },
        Command::Daily => {
            let mut controller = SessionController::new(catalog, config);

            if let Err(e) = controller.start_daily(today()) {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }

            run_session(&mut controller, &mut ledger)
        },
    }
}
