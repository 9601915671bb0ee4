use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::random::Seed;

lazy_static! {
    /// First date with a playable puzzle.
    pub static ref GAME_START_DATE: PuzzleDate =
        PuzzleDate::from_ymd(2024, 1, 1).expect("invalid game start date");
}

/// Calendar day that identifies a puzzle.
///
/// The only accepted string form is the canonical `YYYY-MM-DD`, and
/// [`Display`](fmt::Display) produces the same string back, so the string can
/// be used as a stable key.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct PuzzleDate(NaiveDate);

impl fmt::Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for PuzzleDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_canonical_shape = s.len() == 10
            && s.char_indices().all(|(i, c)| match i {
                4 | 7 => c == '-',
                _ => c.is_ascii_digit(),
            });
        if !is_canonical_shape {
            return Err(DateParseError::Malformed(s.to_owned()));
        }

        // All-digit fields, so these parses cannot fail.
        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().unwrap_or_default();
        let year = field(0..4) as i32;
        Self::from_ymd(year, field(5..7), field(8..10))
            .ok_or_else(|| DateParseError::NoSuchDay(s.to_owned()))
    }
}

impl TryFrom<String> for PuzzleDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PuzzleDate> for String {
    fn from(value: PuzzleDate) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for PuzzleDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl PuzzleDate {
    /// Constructs a date from its components, or returns `None` if there is
    /// no such calendar day or the year cannot be written with four digits.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns today's date according to the local system clock.
    ///
    /// Puzzle generation never calls this; it is only for choosing which
    /// puzzle to show.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// Returns the underlying [`NaiveDate`].
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.0.year()
    }
    /// Returns the month, starting from 1.
    pub fn month(self) -> u32 {
        self.0.month()
    }
    /// Returns the day of the month, starting from 1.
    pub fn day(self) -> u32 {
        self.0.day()
    }
    /// Returns the number of days since the preceding Monday.
    pub fn days_from_monday(self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    /// Returns the following day, if it has a four-digit year.
    pub fn succ(self) -> Option<Self> {
        let next = self.0.succ_opt()?;
        Self::from_ymd(next.year(), next.month(), next.day())
    }
    /// Returns the preceding day, if it has a four-digit year.
    pub fn pred(self) -> Option<Self> {
        let prev = self.0.pred_opt()?;
        Self::from_ymd(prev.year(), prev.month(), prev.day())
    }

    /// Returns the number of days from `self` to `other`, which is negative
    /// if `other` comes first.
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the generation seed for this date: the sum of the year, month,
    /// and day as plain integers.
    ///
    /// **Changing this will change every puzzle.**
    pub fn seed(self) -> Seed {
        Seed::from(self.0.year().unsigned_abs()) + Seed::from(self.month()) + Seed::from(self.day())
    }
}

/// Returns whether the puzzle for `date` can be played on `today`.
pub fn is_playable(date: PuzzleDate, today: PuzzleDate) -> bool {
    *GAME_START_DATE <= date && date <= today
}

/// Error parsing a [`PuzzleDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DateParseError {
    #[error("malformed date {0:?}; expected YYYY-MM-DD")]
    Malformed(String),
    #[error("no such calendar day: {0:?}")]
    NoSuchDay(String),
}
