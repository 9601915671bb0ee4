//! Plain-text rendering of command output.

use std::fmt::Write;

use itertools::Itertools;
use operdle_core::util::format_number;
use operdle_core::{Evaluation, Puzzle};
use operdle_progress::{CalendarDay, CompletionStats};

/// Renders a puzzle, optionally including its solution.
pub fn puzzle(puzzle: &Puzzle, spoil: bool) -> String {
    let mut s = String::new();
    let id_width = puzzle
        .operations
        .iter()
        .map(|op| op.id().as_ref().len())
        .max()
        .unwrap_or(0);

    _ = writeln!(s, "Puzzle for {}", puzzle.date);
    _ = writeln!(s, "Start:  {}", puzzle.starting_number);
    _ = writeln!(s, "Target: {}", format_number(puzzle.target_number));
    _ = writeln!(s, "Operations:");
    for op in &puzzle.operations {
        _ = writeln!(s, "  {:id_width$}  {}", op.id().to_string(), op.label());
    }
    if spoil {
        _ = writeln!(s, "Solution: {}", solution(puzzle));
    }
    s
}

/// Renders the canonical solution of a puzzle as labels.
pub fn solution(puzzle: &Puzzle) -> String {
    puzzle
        .resolve(&puzzle.solution)
        .iter()
        .map(|op| op.label())
        .join(" ")
}

/// Renders the result of evaluating an ordering.
pub fn evaluation(puzzle: &Puzzle, evaluation: &Evaluation) -> String {
    let result = format_number(evaluation.result);
    if evaluation.correct {
        format!("Result: {result} (correct)")
    } else {
        let target = format_number(puzzle.target_number);
        format!("Result: {result} (incorrect; the target is {target})")
    }
}

/// Renders completion statistics.
pub fn stats(stats: &CompletionStats) -> String {
    let CompletionStats {
        total_completed,
        total_attempts,
        average_attempts,
        completion_rate,
    } = stats;
    [
        format!("Completed:        {total_completed}"),
        format!("Attempts:         {total_attempts}"),
        format!("Average attempts: {}", format_number(*average_attempts)),
        format!("Completion rate:  {}%", format_number(completion_rate * 100.0)),
    ]
    .join("\n")
}

/// Renders a month as a grid with weeks starting on Monday.
///
/// Solved days are marked `*`, today is marked `<`, and days that can't be
/// played are shown as `.`.
pub fn calendar(days: &[CalendarDay]) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };
    let mut s = format!("{}-{:02}\n", first.date.year(), first.date.month());
    s += "Mo  Tu  We  Th  Fr  Sa  Su\n";

    let leading_blanks = first.date.days_from_monday() as usize;
    let cells = std::iter::repeat_n("    ".to_string(), leading_blanks).chain(days.iter().map(|d| {
        if d.is_future {
            return " .  ".to_string();
        }
        let marker = if d.is_completed {
            '*'
        } else if d.is_today {
            '<'
        } else {
            ' '
        };
        format!("{:>2}{marker} ", d.date.day())
    }));
    for week in &cells.chunks(7) {
        s += week.collect::<String>().trim_end();
        s += "\n";
    }
    s
}
