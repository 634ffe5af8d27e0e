//! Interactive review driver
//!
//! Shows the front, waits for Enter, shows the back and reads a grade until
//! the session drains or the user types `:q`. Generic over the reader and
//! writer so tests can drive it from a buffer.

use std::io::{BufRead, Write};

use colored::Colorize;

use clnki_core::{Deck, Grade, ParameterSet, ReviewSession, SchedulerError, SessionState};

/// Typed at any prompt to leave the session early
pub const QUIT: &str = ":q";

/// How the review loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEnd {
    /// Every card passed
    Finished,
    /// `:q` or end of input; graded cards keep their new state
    Stopped,
}

/// Read one line, `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn grade_menu() -> String {
    Grade::ALL
        .iter()
        .map(|g| format!("{} ({})", g.label(), g.value()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Drive `session` over `deck` until it finishes or the user stops
pub fn run<R: BufRead, W: Write>(
    deck: &mut Deck,
    params: &ParameterSet,
    session: &mut ReviewSession,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<ReviewEnd> {
    let menu = grade_menu();

    while let SessionState::Active { card } = session.state() {
        let record = deck
            .card(card)
            .ok_or(SchedulerError::InconsistentDueSet(card))?;
        let front = record.front.clone();
        let back = record.back.clone();

        writeln!(out)?;
        writeln!(
            out,
            "{} | Cards remaining: {}",
            "Review in session".cyan().bold(),
            session.remaining()
        )?;
        writeln!(out, "{} {}", "Front:".bold(), front)?;
        write!(out, "{}", "Press Enter to show the back...".dimmed())?;
        out.flush()?;

        match read_line(input)? {
            Some(line) if line == QUIT => return Ok(ReviewEnd::Stopped),
            None => return Ok(ReviewEnd::Stopped),
            Some(_) => {}
        }

        writeln!(out, "{} {}", "Back:".bold(), back)?;
        writeln!(out, "{}", menu)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(ReviewEnd::Stopped);
            };
            if line == QUIT {
                return Ok(ReviewEnd::Stopped);
            }

            let Ok(value) = line.parse::<i64>() else {
                writeln!(out, "{}", "Invalid input. Please enter 1, 2, 3, or 4.".yellow())?;
                continue;
            };

            match session.step(deck, params, value) {
                Ok(outcome) => {
                    if outcome.passed {
                        writeln!(out, "{}", "Passed.".green())?;
                    } else {
                        writeln!(out, "{}", "Card stays in the session.".yellow())?;
                    }
                    break;
                }
                Err(SchedulerError::InvalidGrade(_)) => {
                    writeln!(out, "{}", "Invalid input. Please enter 1, 2, 3, or 4.".yellow())?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(ReviewEnd::Finished)
}
