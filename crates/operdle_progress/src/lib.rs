//! Database of completed puzzles.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, SubsecRound, Utc};
use eyre::{Context, Result};
use operdle_core::{GAME_START_DATE, OperationId, Puzzle, PuzzleDate, is_playable};
use serde::{Deserialize, Serialize};

mod calendar;

pub use calendar::CalendarDay;

/// Saves the progress file, overwriting the existing one.
pub fn save(progress: &ProgressDb) -> Result<()> {
    save_to(&operdle_paths::progress_file()?, progress)
}

/// Saves progress to a specific file, overwriting it.
pub fn save_to(path: &Path, progress: &ProgressDb) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    std::fs::write(path, progress.serialize())
        .wrap_err_with(|| format!("error writing {}", path.display()))?;
    Ok(())
}

/// Loads the progress file, backing it up if it could not be read.
pub fn load() -> ProgressDb {
    match operdle_paths::progress_file() {
        Ok(path) => load_from(&path),
        Err(e) => {
            log::error!("error locating progress file: {e}");
            ProgressDb::default()
        }
    }
}

/// Loads progress from a specific file. A missing file is empty progress; an
/// unreadable or corrupt one is logged, backed up, and treated as empty
/// progress.
pub fn load_from(path: &Path) -> ProgressDb {
    let result = match std::fs::read_to_string(path) {
        Ok(file_contents) => ProgressDb::deserialize(&file_contents).map_err(eyre::Report::from),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ProgressDb::default(),
        Err(e) => Err(e.into()),
    };
    result.unwrap_or_else(|e| {
        log::error!("error loading progress from {}: {e}", path.display());
        operdle_paths::move_to_backup_file(path);
        ProgressDb::default()
    })
}

/// Completion history: which dates were solved and what was submitted.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ProgressDb {
    /// Dates whose puzzle was solved correctly.
    #[serde(default)]
    completed_dates: BTreeSet<PuzzleDate>,
    /// Submission for each attempted date.
    #[serde(default)]
    results: BTreeMap<PuzzleDate, DateResult>,
}

/// Submission for one date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DateResult {
    /// Whether the puzzle was solved.
    pub completed: bool,
    /// Number of attempts, which is always 1.
    pub attempts: u32,
    /// When the answer was submitted, to the millisecond.
    pub solved_at: DateTime<Utc>,
    /// Operation IDs in the order submitted.
    #[serde(default)]
    pub submitted_solution: Vec<OperationId>,
    /// Whether the submission reached the target.
    pub is_correct: bool,
}

/// Aggregate statistics over a [`ProgressDb`].
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct CompletionStats {
    /// Number of dates solved.
    pub total_completed: usize,
    /// Number of attempts over all dates.
    pub total_attempts: u64,
    /// Attempts per solved date, rounded to 2 decimal places.
    pub average_attempts: f64,
    /// Fraction of days since the game started that were solved, rounded to 2
    /// decimal places.
    pub completion_rate: f64,
}

/// Error recording a submission.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SubmissionError {
    #[error("an answer for {0} was already submitted")]
    AlreadySubmitted(PuzzleDate),
    #[error("the puzzle for {0} is not available yet")]
    NotPlayable(PuzzleDate),
}

impl ProgressDb {
    /// Constructs an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the database to a string.
    pub fn serialize(&self) -> String {
        // Only string keys and plain values, so this cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
    /// Deserializes the database from a string.
    pub fn deserialize(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Evaluates and records the one submission allowed for `puzzle`.
    ///
    /// The date is marked completed only if the submission is correct.
    pub fn record_submission(
        &mut self,
        puzzle: &Puzzle,
        submitted: Vec<OperationId>,
        today: PuzzleDate,
        at: DateTime<Utc>,
    ) -> Result<&DateResult, SubmissionError> {
        let date = puzzle.date;
        if !is_playable(date, today) {
            return Err(SubmissionError::NotPlayable(date));
        }
        if self.results.contains_key(&date) {
            return Err(SubmissionError::AlreadySubmitted(date));
        }

        let is_correct = puzzle.evaluate(&submitted).correct;
        if is_correct {
            self.completed_dates.insert(date);
        }
        let verdict = if is_correct { "correct" } else { "incorrect" };
        log::info!("recorded {verdict} submission for {date}");
        Ok(self.results.entry(date).or_insert(DateResult {
            completed: is_correct,
            attempts: 1,
            solved_at: at.trunc_subsecs(3),
            submitted_solution: submitted,
            is_correct,
        }))
    }

    /// Returns whether the puzzle for `date` was solved.
    pub fn is_completed(&self, date: PuzzleDate) -> bool {
        self.completed_dates.contains(&date)
    }
    /// Returns the submission for `date`, if any.
    pub fn result(&self, date: PuzzleDate) -> Option<&DateResult> {
        self.results.get(&date)
    }
    /// Returns the number of solved dates.
    pub fn completed_count(&self) -> usize {
        self.completed_dates.len()
    }
    /// Returns all solved dates in order.
    pub fn completed_dates(&self) -> impl Iterator<Item = PuzzleDate> + '_ {
        self.completed_dates.iter().copied()
    }
    /// Forgets all progress.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns aggregate statistics as of `today`.
    pub fn stats(&self, today: PuzzleDate) -> CompletionStats {
        let total_completed = self.completed_count();
        let total_attempts: u64 = self.results.values().map(|r| u64::from(r.attempts)).sum();
        let average_attempts = match total_completed {
            0 => 0.0,
            n => total_attempts as f64 / n as f64,
        };
        let days_since_start = (GAME_START_DATE.days_until(today) + 1).max(1);
        let completion_rate = total_completed as f64 / days_since_start as f64;
        CompletionStats {
            total_completed,
            total_attempts,
            average_attempts: operdle_core::util::round_to_hundredths(average_attempts),
            completion_rate: operdle_core::util::round_to_hundredths(completion_rate),
        }
    }
}
