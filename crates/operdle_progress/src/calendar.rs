use operdle_core::{GAME_START_DATE, PuzzleDate};
use serde::Serialize;

use crate::ProgressDb;

/// Day in a month view of the puzzle calendar.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    /// Date of the puzzle.
    pub date: PuzzleDate,
    /// Whether the puzzle was solved.
    pub is_completed: bool,
    /// Whether this is today.
    pub is_today: bool,
    /// Whether this is a playable day before today.
    pub is_past: bool,
    /// Whether the puzzle can't be played yet. Days before the game started
    /// also count.
    pub is_future: bool,
}

impl ProgressDb {
    /// Returns every day of a month, or `None` if there is no such month.
    pub fn calendar_month(
        &self,
        year: i32,
        month: u32,
        today: PuzzleDate,
    ) -> Option<Vec<CalendarDay>> {
        let first = PuzzleDate::from_ymd(year, month, 1)?;
        let days = std::iter::successors(Some(first), |d| d.succ())
            .take_while(|d| d.month() == month)
            .map(|date| {
                let before_start = date < *GAME_START_DATE;
                CalendarDay {
                    date,
                    is_completed: self.is_completed(date),
                    is_today: date == today,
                    is_past: date < today && !before_start,
                    is_future: date > today || before_start,
                }
            });
        Some(days.collect())
    }
}
