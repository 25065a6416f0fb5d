//! Turn loop: enter the room, report what happened, ask where to go next.
//!
//! Written against `BufRead`/`Write` so tests can script a whole game.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crawler_core::{GameError, RandomSource, RoomId, Session, SessionStatus};
use tracing::{debug, warn};

use crate::ui_text::{
    INVALID_INPUT_TEXT, MOVE_PROMPT, completion_text, exits_line, outcome_lines, room_header,
    save_prompt,
};

/// How the interactive loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCompletion {
    Victory,
    Defeated,
    SavedAndQuit(PathBuf),
    /// Input reached end of file; nothing was saved.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Move(RoomId),
    SaveAndQuit,
}

/// `-1` asks to save and quit; any other non-negative integer names a room.
pub fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().parse::<i64>().ok()? {
        -1 => Some(Choice::SaveAndQuit),
        id => RoomId::try_from(id).ok().map(Choice::Move),
    }
}

enum TurnEnd {
    Moved,
    Finished(AppCompletion),
}

pub fn run<R, I, O>(
    session: &mut Session<R>,
    input: &mut I,
    output: &mut O,
    default_save_path: &Path,
) -> Result<AppCompletion>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    let completion = loop {
        if let Some(completion) = finished(session.status()) {
            break completion;
        }
        writeln!(output, "{}", room_header(session.player().location))?;
        let outcome = session.enter_current_room().context("failed to enter room")?;
        for line in outcome_lines(&outcome) {
            writeln!(output, "{line}")?;
        }
        if let Some(completion) = finished(session.status()) {
            break completion;
        }
        match next_move(session, input, output, default_save_path)? {
            TurnEnd::Moved => {}
            TurnEnd::Finished(completion) => break completion,
        }
    };
    writeln!(output, "{}", completion_text(&completion))?;
    output.flush()?;
    Ok(completion)
}

fn finished(status: SessionStatus) -> Option<AppCompletion> {
    match status {
        SessionStatus::InProgress => None,
        SessionStatus::Victory => Some(AppCompletion::Victory),
        SessionStatus::Defeated => Some(AppCompletion::Defeated),
    }
}

fn next_move<R, I, O>(
    session: &mut Session<R>,
    input: &mut I,
    output: &mut O,
    default_save_path: &Path,
) -> Result<TurnEnd>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    loop {
        writeln!(output, "{}", exits_line(session.exits()))?;
        write!(output, "{MOVE_PROMPT}")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(TurnEnd::Finished(AppCompletion::InputClosed));
        };
        match parse_choice(&line) {
            Some(Choice::Move(destination)) => match session.move_to(destination) {
                Ok(()) => return Ok(TurnEnd::Moved),
                Err(GameError::InvalidChoice { .. }) => {
                    debug!(destination, "rejected move");
                    writeln!(output, "{INVALID_INPUT_TEXT}")?;
                }
                Err(error) => return Err(error.into()),
            },
            Some(Choice::SaveAndQuit) => {
                write!(output, "{}", save_prompt(default_save_path))?;
                output.flush()?;
                let path = match read_line(input)? {
                    Some(line) if !line.trim().is_empty() => PathBuf::from(line.trim()),
                    _ => default_save_path.to_path_buf(),
                };
                match session.save(&path) {
                    Ok(()) => return Ok(TurnEnd::Finished(AppCompletion::SavedAndQuit(path))),
                    Err(error) => {
                        warn!(path = %path.display(), %error, "save failed");
                        writeln!(output, "Could not save to {}: {error}", path.display())?;
                    }
                }
            }
            None => writeln!(output, "{INVALID_INPUT_TEXT}")?,
        }
    }
}

fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    Ok((read > 0).then_some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_save_request() {
        assert_eq!(parse_choice("3\n"), Some(Choice::Move(3)));
        assert_eq!(parse_choice("  0 "), Some(Choice::Move(0)));
        assert_eq!(parse_choice("-1"), Some(Choice::SaveAndQuit));
    }

    #[test]
    fn rejects_garbage_and_other_negatives() {
        assert_eq!(parse_choice("north"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("-2"), None);
        assert_eq!(parse_choice("1.5"), None);
    }
}
