use std::io::Read;

use eyre::{Context, Result, bail, eyre};
use itertools::Itertools;
use operdle_core::{Action, DateParseError, OperationId, Puzzle, PuzzleDate};
use operdle_progress::ProgressDb;
use serde::Serialize;

use crate::prefs::{OutputFormat, Preferences};
use crate::render;

/// Operdle command-line interface
///
/// Reach the target number by applying every operation exactly once. If no
/// subcommand is specified, then today's puzzle is printed.
///
/// Operations may be named by ID (such as `multiply-3-1`) or by label (such
/// as `×3` or `sqrt`).
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,

    /// Print output as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the puzzle for a date.
    Puzzle {
        /// Date as YYYY-MM-DD, or `today`.
        #[arg(value_parser = parse_date, default_value = "today")]
        date: PuzzleDate,
        /// Also print the solution.
        #[arg(long)]
        spoil: bool,
    },
    /// Evaluate an ordering of operations without recording it.
    Eval {
        /// Date as YYYY-MM-DD, or `today`.
        #[arg(value_parser = parse_date)]
        date: PuzzleDate,
        /// Operations in the order to apply them.
        #[arg(allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Submit the one answer allowed for a date.
    Submit {
        /// Date as YYYY-MM-DD, or `today`.
        #[arg(value_parser = parse_date)]
        date: PuzzleDate,
        /// Operations in the order to apply them.
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Print a hint for a partial ordering.
    Hint {
        /// Date as YYYY-MM-DD, or `today`.
        #[arg(value_parser = parse_date)]
        date: PuzzleDate,
        /// Operations placed so far.
        #[arg(allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Print completion statistics.
    Progress,
    /// Print a month of the puzzle calendar.
    Calendar {
        /// Month as YYYY-MM. Defaults to the current month.
        #[arg(value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
    /// Print the progress file as JSON.
    Export,
    /// Replace all progress with the contents of a file.
    Import {
        /// Progress file to import, use '-' for stdin.
        #[arg(value_parser)]
        file: clio::Input,
    },
    /// Forget all progress.
    Clear {
        /// Don't ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the effective preferences.
    Prefs {
        /// Write the effective preferences to the preferences file.
        #[arg(long)]
        write: bool,
    },
}

fn parse_date(s: &str) -> Result<PuzzleDate, DateParseError> {
    match s {
        "today" => Ok(PuzzleDate::today()),
        _ => s.parse(),
    }
}

fn parse_month(s: &str) -> Result<(i32, u32), DateParseError> {
    let date: PuzzleDate = format!("{s}-01")
        .parse()
        .map_err(|_| DateParseError::Malformed(s.to_owned()))?;
    Ok((date.year(), date.month()))
}

pub(crate) fn exec(args: Args, prefs: &Preferences) -> Result<()> {
    let format = match args.json {
        true => OutputFormat::Json,
        false => prefs.output,
    };
    log::debug!("using {format} output");

    let subcommand = args.subcommand.unwrap_or(Subcommand::Puzzle {
        date: PuzzleDate::today(),
        spoil: false,
    });
    let today = PuzzleDate::today();

    match subcommand {
        Subcommand::Puzzle { date, spoil } => {
            let puzzle = Puzzle::for_date(date);
            match format {
                OutputFormat::Text => print!("{}", render::puzzle(&puzzle, spoil)),
                OutputFormat::Json => {
                    let mut value = serde_json::to_value(&puzzle)?;
                    if !spoil && let Some(fields) = value.as_object_mut() {
                        fields.remove("solution");
                    }
                    write_json_output(&value)?;
                }
            }
            Ok(())
        }

        Subcommand::Eval { date, ops } => {
            let puzzle = Puzzle::for_date(date);
            let ids = resolve_tokens(&puzzle, &ops, false)?;
            let evaluation = puzzle.evaluate(&ids);
            match format {
                OutputFormat::Text => println!("{}", render::evaluation(&puzzle, &evaluation)),
                OutputFormat::Json => write_json_output(&evaluation)?,
            }
            Ok(())
        }

        Subcommand::Submit { date, ops } => {
            let puzzle = Puzzle::for_date(date);
            let ids = resolve_tokens(&puzzle, &ops, true)?;
            let evaluation = puzzle.evaluate(&ids);

            let mut progress = operdle_progress::load();
            let result = progress
                .record_submission(&puzzle, ids, today, chrono::Utc::now())?
                .clone();
            operdle_progress::save(&progress).context("error saving progress")?;

            match format {
                OutputFormat::Text => {
                    println!("{}", render::evaluation(&puzzle, &evaluation));
                    if prefs.reveal_after_submit {
                        println!("Solution: {}", render::solution(&puzzle));
                    }
                }
                OutputFormat::Json => write_json_output(&result)?,
            }
            Ok(())
        }

        Subcommand::Hint { date, ops } => {
            if !prefs.hints {
                bail!("hints are disabled in preferences");
            }
            let puzzle = Puzzle::for_date(date);
            let ids = resolve_tokens(&puzzle, &ops, false)?;
            let hint = puzzle.hint(&ids);
            match format {
                OutputFormat::Text => match &hint {
                    Some(hint) => println!("{hint}"),
                    None => println!("Every operation is placed."),
                },
                OutputFormat::Json => write_json_output(&hint)?,
            }
            Ok(())
        }

        Subcommand::Progress => {
            let stats = operdle_progress::load().stats(today);
            match format {
                OutputFormat::Text => println!("{}", render::stats(&stats)),
                OutputFormat::Json => write_json_output(&stats)?,
            }
            Ok(())
        }

        Subcommand::Calendar { month } => {
            let (year, month) = month.unwrap_or((today.year(), today.month()));
            let days = operdle_progress::load()
                .calendar_month(year, month, today)
                .ok_or_else(|| eyre!("no such month: {year}-{month:02}"))?;
            match format {
                OutputFormat::Text => print!("{}", render::calendar(&days)),
                OutputFormat::Json => write_json_output(&days)?,
            }
            Ok(())
        }

        Subcommand::Export => {
            println!("{}", operdle_progress::load().serialize());
            Ok(())
        }

        Subcommand::Import { mut file } => {
            let mut buffer = String::new();
            file.read_to_string(&mut buffer)
                .context("error reading progress file")?;
            let progress =
                ProgressDb::deserialize(&buffer).context("error deserializing progress file")?;
            operdle_progress::save(&progress).context("error saving progress")?;
            log::info!("imported {} completed puzzles", progress.completed_count());
            Ok(())
        }

        Subcommand::Clear { yes } => {
            if !yes && !confirm("Forget all progress?")? {
                return Ok(());
            }
            let mut progress = operdle_progress::load();
            progress.clear();
            operdle_progress::save(&progress).context("error saving progress")
        }

        Subcommand::Prefs { write } => {
            if write {
                prefs.save().context("error saving preferences")?;
            }
            match format {
                OutputFormat::Text => print!("{}", prefs.to_yaml()?),
                OutputFormat::Json => write_json_output(prefs)?,
            }
            Ok(())
        }
    }
}

/// Converts command-line tokens to operation IDs. Each token is either the ID
/// of an operation in `puzzle` or the label of an operation not yet used.
///
/// Tokens that match nothing are kept as-is, so they make the ordering
/// incorrect, unless `strict` is set, in which case they are an error.
fn resolve_tokens(puzzle: &Puzzle, tokens: &[String], strict: bool) -> Result<Vec<OperationId>> {
    let mut ids: Vec<OperationId> = vec![];
    for token in tokens {
        if let Some(op) = puzzle.operation(token) {
            ids.push(op.id().clone());
            continue;
        }
        let unused_match = match token.parse::<Action>() {
            Ok(action) => puzzle
                .operations
                .iter()
                .find(|op| op.action() == action && !ids.contains(op.id())),
            Err(e) => {
                log::debug!("{token:?} is not an operation label: {e}");
                None
            }
        };
        match unused_match {
            Some(op) => ids.push(op.id().clone()),
            None if strict => bail!(
                "no operation {token:?} in the puzzle for {}; expected one of {}",
                puzzle.date,
                puzzle.operations.iter().map(|op| op.id()).join(", "),
            ),
            None => {
                log::warn!("no operation {token:?} in the puzzle for {}", puzzle.date);
                ids.push(OperationId::from(token.as_str()));
            }
        }
    }
    Ok(ids)
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("error reading from stdin")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn write_json_output<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
