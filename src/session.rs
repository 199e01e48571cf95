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
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use super::catalog::Catalog;
use super::clock::SessionClock;
use super::config::GameConfig;
use super::progression::{Ledger, ProgressionState};
use super::puzzle_data::PuzzleDefinition;
use super::resolver::{self, FoundWords, Rejection, WordOutcome};
use super::selection::Selection;
use super::store::Store;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Active,
    Completing,
    Settled,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UnknownPuzzle(u32),
    NoDailyPuzzle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownPuzzle(id) => write!(f, "unknown puzzle {}", id),
            Error::NoDailyPuzzle => write!(f, "no daily puzzle available"),
        }
    }
}

impl std::error::Error for Error {}

/// Everything about one attempt at a puzzle. Dropped when the
/// attempt ends and never saved.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) puzzle: PuzzleDefinition,
    letters: Vec<char>,
    pub(crate) selection: Selection,
    pub(crate) found: FoundWords,
    clock: SessionClock,
    is_daily: bool,
    date: NaiveDate,
    pub(crate) last_auto_submitted: Option<String>,
}

impl SessionState {
    pub fn new(
        puzzle: PuzzleDefinition,
        is_daily: bool,
        date: NaiveDate,
    ) -> SessionState {
        SessionState {
            letters: puzzle.letters().to_vec(),
            clock: SessionClock::new(puzzle.time_limit()),
            puzzle,
            selection: Selection::new(),
            found: FoundWords::default(),
            is_daily,
            date,
            last_auto_submitted: None,
        }
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    /// The letters in their current order on the wheel.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn selected_indices(&self) -> &[usize] {
        self.selection.indices()
    }

    pub fn current_word(&self) -> String {
        self.selection.current_word(&self.letters)
    }

    pub fn found_words(&self) -> &FoundWords {
        &self.found
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn is_daily(&self) -> bool {
        self.is_daily
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn last_auto_submitted(&self) -> Option<&str> {
        self.last_auto_submitted.as_deref()
    }

    pub fn is_full_clear(&self) -> bool {
        self.found.covers(&self.puzzle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub puzzle_id: u32,
    pub stars: u32,
    pub coins: u32,
    pub xp: u32,
    pub time_bonus: u32,
    pub time_used: u32,
    pub words_found: usize,
    pub is_timeout: bool,
    pub is_daily: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
)]
pub enum Event {
    SessionStarted {
        puzzle_id: u32,
        is_daily: bool,
        time_limit: u32,
        letters: Vec<char>,
    },
    WordAccepted {
        word: String,
        coins: u32,
        score: u32,
        automatic: bool,
    },
    WordRejected {
        word: String,
        reason: Rejection,
        in_dictionary: bool,
    },
    SessionCompleted(Completion),
    DailyBonusAwarded {
        date: NaiveDate,
        coins: u32,
        score: u32,
    },
    ProgressionChanged(ProgressionState),
}

/// Three tiers counted in words, not as a fraction of the puzzle.
pub fn star_rating(n_found: usize, n_targets: usize) -> u32 {
    if n_found >= n_targets {
        3
    } else if n_found >= 2 {
        2
    } else {
        1
    }
}

fn full_clear_completion(
    session: &SessionState,
    config: &GameConfig,
) -> Completion {
    let stars = star_rating(
        session.found.len(),
        session.puzzle.target_words().len(),
    );

    let time_bonus = if session.remaining_seconds() > config.speed_bonus_threshold {
        config.speed_bonus_xp
    } else {
        0
    };

    Completion {
        puzzle_id: session.puzzle.id(),
        stars,
        coins: config.coins_per_level.saturating_mul(stars),
        xp: config.level_xp.saturating_add(time_bonus),
        time_bonus,
        time_used: session.clock.elapsed(),
        words_found: session.found.len(),
        is_timeout: false,
        is_daily: session.is_daily,
    }
}

fn timeout_completion(
    session: &SessionState,
    config: &GameConfig,
) -> Completion {
    let n_found = u32::try_from(session.found.len()).unwrap_or(u32::MAX);

    Completion {
        puzzle_id: session.puzzle.id(),
        stars: n_found.max(1),
        coins: n_found.saturating_mul(config.timeout_coins_per_word),
        xp: n_found.saturating_mul(config.timeout_xp_per_word),
        time_bonus: 0,
        time_used: session.clock.time_limit(),
        words_found: session.found.len(),
        is_timeout: true,
        is_daily: session.is_daily,
    }
}

/// Runs one puzzle attempt at a time:
/// `Idle → Active → Completing → Settled`.
///
/// Anything that changes the player’s progression takes the ledger
/// as an argument. Events for the presentation layer pile up until
/// they are collected with [`SessionController::take_events`].
pub struct SessionController<C> {
    catalog: C,
    config: GameConfig,
    phase: Phase,
    session: Option<SessionState>,
    completion: Option<Completion>,
    events: Vec<Event>,
}

impl<C: Catalog> SessionController<C> {
    pub fn new(catalog: C, config: GameConfig) -> SessionController<C> {
        SessionController {
            catalog,
            config,
            phase: Phase::Idle,
            session: None,
            completion: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// The result of the attempt once it has reached `Completing`.
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn is_dictionary_word(&self, word: &str) -> bool {
        self.catalog.is_dictionary_word(word)
    }

    pub fn start_level(&mut self, id: u32, today: NaiveDate) -> Result<(), Error> {
        let Some(puzzle) = self.catalog.puzzle_by_id(id)
        else {
            return Err(Error::UnknownPuzzle(id));
        };

        let puzzle = puzzle.clone();
        self.begin(puzzle, false, today);

        Ok(())
    }

    pub fn start_daily(&mut self, today: NaiveDate) -> Result<(), Error> {
        let Some(puzzle) = self.catalog.daily_puzzle(today)
        else {
            return Err(Error::NoDailyPuzzle);
        };

        let puzzle = puzzle.clone();
        self.begin(puzzle, true, today);

        Ok(())
    }

    fn begin(&mut self, puzzle: PuzzleDefinition, is_daily: bool, today: NaiveDate) {
        if self.session.is_some() {
            tracing::debug!("abandoning unfinished session");
        }

        tracing::info!(
            puzzle = puzzle.id(),
            is_daily,
            time_limit = puzzle.time_limit(),
            "session started",
        );

        self.events.push(Event::SessionStarted {
            puzzle_id: puzzle.id(),
            is_daily,
            time_limit: puzzle.time_limit(),
            letters: puzzle.letters().to_vec(),
        });

        self.session = Some(SessionState::new(puzzle, is_daily, today));
        self.completion = None;
        self.phase = Phase::Active;
    }

    /// Drops the current attempt without touching the progression.
    pub fn abandon(&mut self) {
        self.session = None;
        self.completion = None;
        self.phase = Phase::Idle;
    }

    fn active_session(&mut self) -> Option<&mut SessionState> {
        if self.phase == Phase::Active {
            self.session.as_mut()
        } else {
            None
        }
    }

    /// Taps the letter at `index`. Returns the outcome if the new
    /// selection spelled an unfound target word and it was accepted
    /// automatically.
    pub fn toggle<S: Store>(
        &mut self,
        index: usize,
        ledger: &mut Ledger<S>,
    ) -> Option<WordOutcome> {
        if self.phase != Phase::Active {
            return None;
        }

        let config = &self.config;
        let session = self.session.as_mut()?;

        if !session.selection.toggle(index, session.letters.len()) {
            return None;
        }

        tracing::debug!(
            index,
            word = %session.current_word(),
            "selection changed",
        );

        let outcome = resolver::auto_submit(session, config)?;

        self.record_outcome(&outcome, true, ledger);

        Some(outcome)
    }

    pub fn clear_selection(&mut self) {
        if let Some(session) = self.active_session() {
            session.selection.clear();
        }
    }

    /// Explicit submit of the current selection.
    pub fn submit<S: Store>(
        &mut self,
        ledger: &mut Ledger<S>,
    ) -> Option<WordOutcome> {
        if self.phase != Phase::Active {
            return None;
        }

        let config = &self.config;
        let session = self.session.as_mut()?;

        let outcome = resolver::submit(session, config);

        self.record_outcome(&outcome, false, ledger);

        Some(outcome)
    }

    fn record_outcome<S: Store>(
        &mut self,
        outcome: &WordOutcome,
        automatic: bool,
        ledger: &mut Ledger<S>,
    ) {
        match outcome {
            WordOutcome::Accepted { word, award } => {
                tracing::debug!(%word, automatic, "word accepted");

                ledger.award_word(*award);

                self.events.push(Event::WordAccepted {
                    word: word.clone(),
                    coins: award.coins,
                    score: award.score,
                    automatic,
                });
                self.events.push(Event::ProgressionChanged(ledger.snapshot()));

                if self.session.as_ref().map_or(false, |s| s.is_full_clear()) {
                    self.begin_completion(false);
                }
            },
            WordOutcome::Rejected { word, reason } => {
                tracing::debug!(%word, %reason, "word rejected");

                self.events.push(Event::WordRejected {
                    word: word.clone(),
                    reason: *reason,
                    in_dictionary: self.catalog.is_dictionary_word(word),
                });
            },
        }
    }

    /// One second of play. Reaching zero ends the attempt.
    pub fn tick(&mut self) {
        let Some(session) = self.active_session()
        else {
            return;
        };

        session.clock.tick();

        tracing::debug!(remaining = session.remaining_seconds(), "tick");

        if session.clock.is_expired() {
            self.begin_completion(true);
        }
    }

    fn begin_completion(&mut self, is_timeout: bool) {
        let Some(session) = self.session.as_ref()
        else {
            return;
        };

        let completion = if is_timeout {
            timeout_completion(session, &self.config)
        } else {
            full_clear_completion(session, &self.config)
        };

        tracing::info!(
            puzzle = completion.puzzle_id,
            stars = completion.stars,
            coins = completion.coins,
            xp = completion.xp,
            is_timeout,
            "session completed",
        );

        self.events.push(Event::SessionCompleted(completion.clone()));
        self.completion = Some(completion);
        self.phase = Phase::Completing;
    }

    /// Commits the rewards of a completed attempt to the ledger and
    /// discards the session.
    pub fn settle<S: Store>(
        &mut self,
        ledger: &mut Ledger<S>,
    ) -> Option<Completion> {
        if self.phase != Phase::Completing {
            return None;
        }

        let session = self.session.take()?;
        let completion = self.completion.clone()?;
        let date = session.date;

        let daily_bonus_due = if completion.is_timeout {
            ledger.award_session_reward(completion.coins, completion.xp, date);
            session.is_daily && !session.found.is_empty()
        } else if session.is_daily {
            ledger.award_session_reward(completion.coins, completion.xp, date);
            true
        } else {
            ledger.award_level_completion(
                completion.stars,
                completion.coins,
                completion.xp,
                date,
            );
            false
        };

        if daily_bonus_due && ledger.award_daily_completion(date) {
            self.events.push(Event::DailyBonusAwarded {
                date,
                coins: self.config.daily_bonus_coins,
                score: self.config.daily_bonus_score,
            });
        }

        self.events.push(Event::ProgressionChanged(ledger.snapshot()));
        self.phase = Phase::Settled;

        tracing::info!(puzzle = completion.puzzle_id, "session settled");

        Some(completion)
    }

    /// Spends a hint to reveal the first letter of the first target
    /// word that hasn’t been found yet.
    pub fn use_hint<S: Store>(&mut self, ledger: &mut Ledger<S>) -> Option<char> {
        if self.phase != Phase::Active {
            return None;
        }

        let session = self.session.as_ref()?;

        let letter = session.puzzle.target_words().iter()
            .find(|word| !session.found.contains(word))?
            .chars()
            .next()?;

        if !ledger.consume_hint() {
            return None;
        }

        self.events.push(Event::ProgressionChanged(ledger.snapshot()));

        Some(letter)
    }

    /// Rearranges the letters on the wheel. The selection refers to
    /// positions so it is cleared as well.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(session) = self.active_session() {
            session.letters.shuffle(rng);
            session.selection.clear();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::catalog::StaticCatalog;
    use super::super::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(s: &str) -> NaiveDate {
        s.parse::<NaiveDate>().unwrap()
    }

    // A Monday, so the daily puzzle is 102 (ULDUZ)
    fn monday() -> NaiveDate {
        date("2024-06-03")
    }

    fn controller() -> SessionController<StaticCatalog> {
        SessionController::new(StaticCatalog::builtin(), GameConfig::default())
    }

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::load(MemoryStore::new(), GameConfig::default())
    }

    fn spell(
        controller: &mut SessionController<StaticCatalog>,
        ledger: &mut Ledger<MemoryStore>,
        word: &str,
    ) -> Option<WordOutcome> {
        controller.clear_selection();

        let mut outcome = None;

        for ch in word.chars() {
            let session = controller.session().unwrap();
            let selected = session.selected_indices();
            let index = session.letters().iter().enumerate()
                .position(|(i, &l)| l == ch && !selected.contains(&i))
                .unwrap();

            outcome = controller.toggle(index, ledger);
        }

        outcome
    }

    fn ticks(controller: &mut SessionController<StaticCatalog>, n: u32) {
        for _ in 0..n {
            controller.tick();
        }
    }

    #[test]
    fn full_clear() {
        let mut controller = controller();
        let mut ledger = ledger();

        assert_eq!(controller.phase(), Phase::Idle);

        controller.start_level(1, monday()).unwrap();
        assert_eq!(controller.phase(), Phase::Active);
        assert_eq!(controller.session().unwrap().remaining_seconds(), 180);

        ticks(&mut controller, 30);

        for word in ["MAL", "ALMA"] {
            let outcome = spell(&mut controller, &mut ledger, word).unwrap();
            assert!(outcome.is_accepted());
            assert_eq!(controller.phase(), Phase::Active);
        }

        let outcome = spell(&mut controller, &mut ledger, "ALA").unwrap();
        assert_eq!(
            outcome,
            WordOutcome::Accepted {
                word: "ALA".to_string(),
                award: resolver::WordAward { coins: 50, score: 30 },
            },
        );

        assert_eq!(controller.phase(), Phase::Completing);
        assert_eq!(
            controller.completion().unwrap(),
            &Completion {
                puzzle_id: 1,
                stars: 3,
                coins: 450,
                xp: 150,
                time_bonus: 50,
                time_used: 30,
                words_found: 3,
                is_timeout: false,
                is_daily: false,
            },
        );

        // Word rewards are already in the ledger
        assert_eq!(ledger.coins(), 1250 + 150);
        assert_eq!(ledger.state().total_score, 30 + 40 + 30);

        // Completing ignores further input
        ticks(&mut controller, 200);
        assert!(controller.toggle(0, &mut ledger).is_none());
        assert!(controller.submit(&mut ledger).is_none());
        assert_eq!(controller.phase(), Phase::Completing);
        assert!(!controller.completion().unwrap().is_timeout);

        let completion = controller.settle(&mut ledger).unwrap();
        assert_eq!(completion.coins, 450);
        assert_eq!(controller.phase(), Phase::Settled);
        assert!(controller.session().is_none());

        assert_eq!(ledger.coins(), 1250 + 150 + 450);
        assert_eq!(ledger.state().total_score, 100 + 150);
        assert_eq!(ledger.current_level(), 2);
        assert_eq!(ledger.state().streak, 1);
        assert_eq!(ledger.state().last_played_date, Some(monday()));

        assert!(controller.settle(&mut ledger).is_none());
        assert_eq!(ledger.current_level(), 2);
    }

    #[test]
    fn no_speed_bonus() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        ticks(&mut controller, 120);

        for word in ["ALMA", "ALA", "MAL"] {
            spell(&mut controller, &mut ledger, word);
        }

        let completion = controller.completion().unwrap();
        assert_eq!(completion.xp, 100);
        assert_eq!(completion.time_bonus, 0);
    }

    #[test]
    fn timeout() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        spell(&mut controller, &mut ledger, "ALA");
        ticks(&mut controller, 179);
        assert_eq!(controller.phase(), Phase::Active);

        controller.tick();
        assert_eq!(controller.phase(), Phase::Completing);

        let completion = controller.completion().unwrap().clone();
        assert!(completion.is_timeout);
        assert_eq!(completion.stars, 1);
        assert_eq!(completion.coins, 50);
        assert_eq!(completion.xp, 30);
        assert_eq!(completion.time_used, 180);

        // A word spelled after the timeout doesn’t count
        assert!(spell_ignored(&mut controller, &mut ledger));

        controller.settle(&mut ledger).unwrap();

        assert_eq!(ledger.coins(), 1250 + 50 + 50);
        assert_eq!(ledger.state().total_score, 30 + 30);
        assert_eq!(ledger.current_level(), 1);
        assert_eq!(ledger.state().streak, 0);
    }

    fn spell_ignored(
        controller: &mut SessionController<StaticCatalog>,
        ledger: &mut Ledger<MemoryStore>,
    ) -> bool {
        (0..4).all(|i| controller.toggle(i, ledger).is_none())
    }

    #[test]
    fn timeout_with_nothing_found() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        ticks(&mut controller, 180);

        let completion = controller.settle(&mut ledger).unwrap();
        assert_eq!(completion.stars, 1);
        assert_eq!(completion.coins, 0);
        assert_eq!(completion.xp, 0);
        assert_eq!(ledger.coins(), 1250);
    }

    #[test]
    fn star_tiers() {
        assert_eq!(star_rating(3, 3), 3);
        assert_eq!(star_rating(5, 3), 3);
        assert_eq!(star_rating(2, 3), 2);
        assert_eq!(star_rating(2, 10), 2);
        assert_eq!(star_rating(1, 3), 1);
        assert_eq!(star_rating(0, 3), 1);
    }

    #[test]
    fn rejection_changes_nothing() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        controller.take_events();

        // “LAMA” is not a target
        for i in [1, 0, 2, 3] {
            assert!(controller.toggle(i, &mut ledger).is_none());
        }

        let before = ledger.snapshot();
        let outcome = controller.submit(&mut ledger).unwrap();

        assert_eq!(
            outcome,
            WordOutcome::Rejected {
                word: "LAMA".to_string(),
                reason: Rejection::NotInList,
            },
        );
        assert_eq!(ledger.state(), &before);
        assert!(controller.session().unwrap().found_words().is_empty());
        assert!(controller.session().unwrap().selected_indices().is_empty());

        assert_eq!(
            controller.take_events(),
            [Event::WordRejected {
                word: "LAMA".to_string(),
                reason: Rejection::NotInList,
                in_dictionary: false,
            }],
        );
    }

    #[test]
    fn rejection_in_dictionary() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        controller.take_events();

        // “ALMA” is found automatically, then spelled and submitted
        // again by hand
        spell(&mut controller, &mut ledger, "ALMA");
        controller.take_events();

        for i in [0, 1, 2, 3] {
            controller.toggle(i, &mut ledger);
        }

        let outcome = controller.submit(&mut ledger).unwrap();
        assert!(!outcome.is_accepted());

        assert_eq!(
            controller.take_events(),
            [Event::WordRejected {
                word: "ALMA".to_string(),
                reason: Rejection::AlreadyFound,
                in_dictionary: true,
            }],
        );
    }

    #[test]
    fn short_submit() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        controller.toggle(0, &mut ledger);

        let outcome = controller.submit(&mut ledger).unwrap();
        assert!(matches!(
            outcome,
            WordOutcome::Rejected { reason: Rejection::TooShort, .. },
        ));
        assert!(controller.session().unwrap().selected_indices().is_empty());
    }

    #[test]
    fn events() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        spell(&mut controller, &mut ledger, "MAL");

        let events = controller.take_events();

        assert_eq!(
            events[0],
            Event::SessionStarted {
                puzzle_id: 1,
                is_daily: false,
                time_limit: 180,
                letters: vec!['A', 'L', 'M', 'A'],
            },
        );
        assert_eq!(
            events[1],
            Event::WordAccepted {
                word: "MAL".to_string(),
                coins: 50,
                score: 30,
                automatic: true,
            },
        );
        assert!(matches!(
            &events[2],
            Event::ProgressionChanged(state) if state.coins == 1300,
        ));
        assert_eq!(events.len(), 3);
        assert!(controller.take_events().is_empty());

        let json = serde_json::to_value(&events[1]).unwrap();
        assert_eq!(json["type"], "wordAccepted");
        assert_eq!(json["coins"], 50);
        assert_eq!(json["automatic"], true);
    }

    #[test]
    fn completion_json() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        spell(&mut controller, &mut ledger, "ALA");
        ticks(&mut controller, 180);

        let events = controller.take_events();
        let completed = events.iter()
            .find(|e| matches!(e, Event::SessionCompleted(_)))
            .unwrap();

        let json = serde_json::to_value(completed).unwrap();
        assert_eq!(json["type"], "sessionCompleted");
        assert_eq!(json["isTimeout"], true);
        assert_eq!(json["isDaily"], false);
        assert_eq!(json["timeUsed"], 180);
        assert_eq!(json["coins"], 50);
        assert_eq!(json["xp"], 30);
        assert_eq!(json["stars"], 1);
        assert_eq!(json["puzzleId"], 1);
    }

    #[test]
    fn progression_json() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_daily(monday()).unwrap();
        for word in ["ULD", "ULDUZ", "DUZ"] {
            spell(&mut controller, &mut ledger, word);
        }
        controller.settle(&mut ledger).unwrap();

        let events = controller.take_events();
        let Some(Event::ProgressionChanged(state)) = events.last()
        else {
            panic!("settling should end with the new progression");
        };

        let json = serde_json::to_value(events.last().unwrap()).unwrap();
        assert_eq!(json["type"], "progressionChanged");
        assert_eq!(json["coins"], state.coins);
        assert_eq!(json["dailyStreak"], 1);
        assert_eq!(json["currentLevel"], 1);
        assert_eq!(
            json["dailyCompletedDates"],
            serde_json::json!(["2024-06-03"]),
        );
        assert_eq!(json["lastPlayedDate"], "2024-06-03");
        assert_eq!(json["settings"]["language"], "az");

        let bonus = events.iter()
            .find(|e| matches!(e, Event::DailyBonusAwarded { .. }))
            .unwrap();
        let json = serde_json::to_value(bonus).unwrap();
        assert_eq!(json["type"], "dailyBonusAwarded");
        assert_eq!(json["date"], "2024-06-03");
    }

    #[test]
    fn daily_id_is_not_a_level() {
        let mut controller = controller();
        let mut ledger = ledger();

        assert_eq!(
            controller.start_level(101, monday()),
            Err(Error::UnknownPuzzle(101)),
        );
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.session().is_none());

        // The same puzzle still works as the daily challenge
        controller.start_daily(date("2024-06-02")).unwrap();
        let session = controller.session().unwrap();
        assert_eq!(session.puzzle().id(), 101);
        assert!(session.is_daily());

        for word in ["QƏL", "ƏL", "QƏLƏM"] {
            spell(&mut controller, &mut ledger, word);
        }
        controller.settle(&mut ledger).unwrap();

        assert_eq!(ledger.current_level(), 1);
        assert!(ledger.is_day_completed(date("2024-06-02")));
    }

    #[test]
    fn unknown_puzzle() {
        let mut controller = controller();

        assert_eq!(
            controller.start_level(999, monday()),
            Err(Error::UnknownPuzzle(999)),
        );
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.session().is_none());
        assert!(controller.take_events().is_empty());

        controller.start_level(2, monday()).unwrap();
        assert!(controller.start_level(0, monday()).is_err());
        assert_eq!(controller.phase(), Phase::Active);
        assert_eq!(controller.session().unwrap().puzzle().id(), 2);

        let mut controller = SessionController::new(
            StaticCatalog::new(Vec::new(), Vec::new(), Default::default())
                .unwrap(),
            GameConfig::default(),
        );
        assert_eq!(
            &controller.start_daily(monday()).unwrap_err().to_string(),
            "no daily puzzle available",
        );
    }

    #[test]
    fn daily_replay() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_daily(monday()).unwrap();
        assert_eq!(controller.session().unwrap().puzzle().id(), 102);
        assert!(controller.session().unwrap().is_daily());

        // ULD is a prefix of ULDUZ so it has to be found first
        for word in ["ULD", "ULDUZ", "DUZ"] {
            spell(&mut controller, &mut ledger, word);
        }

        let completion = controller.settle(&mut ledger).unwrap();
        assert!(completion.is_daily);
        assert_eq!(completion.stars, 3);

        let events = controller.take_events();
        assert!(events.contains(&Event::DailyBonusAwarded {
            date: monday(),
            coins: 500,
            score: 500,
        }));

        let words_coins = 3 * 50;
        let after_first = 1250 + words_coins + completion.coins + 500;
        assert_eq!(ledger.coins(), after_first);
        assert_eq!(ledger.state().daily_streak, 1);
        assert!(ledger.is_day_completed(monday()));
        // Daily puzzles don’t move the level pointer
        assert_eq!(ledger.current_level(), 1);

        controller.start_daily(monday()).unwrap();

        for word in ["DUZ", "ULD", "ULDUZ"] {
            spell(&mut controller, &mut ledger, word);
        }

        let completion = controller.settle(&mut ledger).unwrap();

        assert_eq!(
            ledger.coins(),
            after_first + words_coins + completion.coins,
        );
        assert_eq!(ledger.state().daily_streak, 1);
        assert_eq!(ledger.state().daily_completed_dates.len(), 1);
        assert!(!controller.take_events().iter().any(|e| {
            matches!(e, Event::DailyBonusAwarded { .. })
        }));
    }

    #[test]
    fn daily_timeout() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_daily(monday()).unwrap();
        ticks(&mut controller, 120);
        controller.settle(&mut ledger).unwrap();

        // Nothing found so no daily bonus
        assert!(!ledger.is_day_completed(monday()));

        controller.start_daily(monday()).unwrap();
        spell(&mut controller, &mut ledger, "DUZ");
        ticks(&mut controller, 120);
        controller.settle(&mut ledger).unwrap();

        assert!(ledger.is_day_completed(monday()));
        assert_eq!(ledger.state().daily_streak, 1);
    }

    #[test]
    fn abandon() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        for word in ["ALMA", "ALA", "MAL"] {
            spell(&mut controller, &mut ledger, word);
        }
        assert_eq!(controller.phase(), Phase::Completing);

        let saves = ledger.store().n_saves();

        controller.abandon();

        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.settle(&mut ledger).is_none());
        assert_eq!(ledger.current_level(), 1);
        assert_eq!(ledger.store().n_saves(), saves);
    }

    #[test]
    fn hints() {
        let mut controller = controller();
        let mut ledger = ledger();

        assert!(controller.use_hint(&mut ledger).is_none());

        controller.start_level(2, monday()).unwrap();

        assert_eq!(controller.use_hint(&mut ledger), Some('G'));
        assert_eq!(ledger.hints(), 4);

        spell(&mut controller, &mut ledger, "GÖZ");
        spell(&mut controller, &mut ledger, "GÖZƏL");

        assert_eq!(controller.use_hint(&mut ledger), Some('Ö'));
        assert_eq!(ledger.hints(), 3);

        for _ in 0..3 {
            assert!(ledger.consume_hint());
        }

        assert!(controller.use_hint(&mut ledger).is_none());
        assert_eq!(ledger.hints(), 0);
    }

    #[test]
    fn shuffle() {
        let mut controller = controller();
        let mut ledger = ledger();
        let mut rng = StdRng::seed_from_u64(7);

        controller.start_level(19, monday()).unwrap();
        controller.toggle(0, &mut ledger);
        controller.shuffle(&mut rng);

        let session = controller.session().unwrap();
        assert!(session.selected_indices().is_empty());

        let mut letters = session.letters().to_vec();
        let mut puzzle_letters = session.puzzle().letters().to_vec();
        letters.sort();
        puzzle_letters.sort();
        assert_eq!(letters, puzzle_letters);

        // Words are still found after the wheel moves
        let outcome = spell(&mut controller, &mut ledger, "GÖZ").unwrap();
        assert!(outcome.is_accepted());
    }

    #[test]
    fn restart_discards_session() {
        let mut controller = controller();
        let mut ledger = ledger();

        controller.start_level(1, monday()).unwrap();
        spell(&mut controller, &mut ledger, "MAL");
        ticks(&mut controller, 10);

        controller.start_level(1, monday()).unwrap();

        let session = controller.session().unwrap();
        assert!(session.found_words().is_empty());
        assert_eq!(session.remaining_seconds(), 180);
        assert!(session.last_auto_submitted().is_none());
    }
}
