//! Parsing of player input lines into engine commands.

use hue_hunt_core::{CellIndex, Command};
use thiserror::Error;

/// Action requested by a single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerInput {
    /// Forward the command to the session.
    Command(Command),
    /// Print the controls.
    Help,
    /// Leave the program.
    Quit,
}

/// Reasons a line of input could not be understood.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The line was empty or contained only whitespace.
    #[error("nothing was entered")]
    Empty,
    /// The line matched no command and did not look like a cell.
    #[error("unknown command `{0}`, type h for help")]
    Unknown(String),
    /// The line looked like a cell reference but could not be read as one.
    #[error("`{0}` is not a cell, use a letter and a number like c4")]
    MalformedCell(String),
    /// The referenced cell lies outside the grid.
    #[error("cell `{0}` is not on the {1}x{1} grid")]
    OutOfRange(String, u32),
}

/// Parses one line of input for a grid `grid_size` cells wide.
///
/// Cells may be written as column letter and row number (`c4`), as row and
/// column numbers (`4 3`), or as a 1-based ordinal counted row by row (`18`).
pub(crate) fn parse(line: &str, grid_size: u32) -> Result<PlayerInput, InputError> {
    let trimmed = line.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "" => return Err(InputError::Empty),
        "s" | "start" => return Ok(PlayerInput::Command(Command::Start)),
        "a" | "abandon" => return Ok(PlayerInput::Command(Command::Abandon)),
        "h" | "help" | "?" => return Ok(PlayerInput::Help),
        "q" | "quit" | "exit" => return Ok(PlayerInput::Quit),
        _ => {}
    }

    let cell = parse_cell(&trimmed, grid_size)?;
    Ok(PlayerInput::Command(Command::Select { cell }))
}

fn parse_cell(text: &str, grid_size: u32) -> Result<CellIndex, InputError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let out_of_range = || InputError::OutOfRange(text.to_owned(), grid_size);

    match tokens.as_slice() {
        [row, column] => {
            let (Ok(row), Ok(column)) = (row.parse::<u32>(), column.parse::<u32>()) else {
                return Err(InputError::MalformedCell(text.to_owned()));
            };
            let row = one_based(row, grid_size).ok_or_else(out_of_range)?;
            let column = one_based(column, grid_size).ok_or_else(out_of_range)?;
            Ok(CellIndex::from_row_column(row, column, grid_size))
        }
        [single] if single.chars().all(|c| c.is_ascii_digit()) => {
            let ordinal = single.parse::<u32>().map_err(|_| out_of_range())?;
            let index = one_based(ordinal, grid_size * grid_size).ok_or_else(out_of_range)?;
            Ok(CellIndex::new(index))
        }
        [single] if single.starts_with(|c: char| c.is_ascii_alphabetic()) => {
            let mut chars = single.chars();
            let letter = chars.next().map_or(0, |c| u32::from(c) - u32::from('a'));
            let row = chars
                .as_str()
                .parse::<u32>()
                .map_err(|_| InputError::MalformedCell(text.to_owned()))?;
            if letter >= grid_size {
                return Err(out_of_range());
            }
            let row = one_based(row, grid_size).ok_or_else(out_of_range)?;
            Ok(CellIndex::from_row_column(row, letter, grid_size))
        }
        _ => Err(InputError::Unknown(text.to_owned())),
    }
}

fn one_based(value: u32, limit: u32) -> Option<u32> {
    (1..=limit).contains(&value).then(|| value - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(index: u32) -> Result<PlayerInput, InputError> {
        Ok(PlayerInput::Command(Command::Select {
            cell: CellIndex::new(index),
        }))
    }

    #[test]
    fn recognises_control_words() {
        assert_eq!(parse(" S ", 5), Ok(PlayerInput::Command(Command::Start)));
        assert_eq!(parse("abandon", 5), Ok(PlayerInput::Command(Command::Abandon)));
        assert_eq!(parse("?", 5), Ok(PlayerInput::Help));
        assert_eq!(parse("quit", 5), Ok(PlayerInput::Quit));
    }

    #[test]
    fn reads_every_cell_notation() {
        assert_eq!(parse("c4", 5), select(17));
        assert_eq!(parse("C4", 5), select(17));
        assert_eq!(parse("4 3", 5), select(17));
        assert_eq!(parse("18", 5), select(17));
        assert_eq!(parse("a1", 5), select(0));
        assert_eq!(parse("25", 5), select(24));
    }

    #[test]
    fn rejects_cells_off_the_grid() {
        assert_eq!(
            parse("f1", 5),
            Err(InputError::OutOfRange("f1".to_owned(), 5))
        );
        assert_eq!(parse("26", 5), Err(InputError::OutOfRange("26".to_owned(), 5)));
        assert_eq!(parse("0", 5), Err(InputError::OutOfRange("0".to_owned(), 5)));
        assert_eq!(
            parse("6 1", 5),
            Err(InputError::OutOfRange("6 1".to_owned(), 5))
        );
        assert_eq!(
            parse("99999999999", 5),
            Err(InputError::OutOfRange("99999999999".to_owned(), 5))
        );
    }

    #[test]
    fn reports_garbage_input() {
        assert_eq!(parse("   ", 5), Err(InputError::Empty));
        assert_eq!(parse("cx", 5), Err(InputError::MalformedCell("cx".to_owned())));
        assert_eq!(parse("2 b", 5), Err(InputError::MalformedCell("2 b".to_owned())));
        assert_eq!(parse("#!", 5), Err(InputError::Unknown("#!".to_owned())));
        assert_eq!(
            parse("one two three", 5),
            Err(InputError::Unknown("one two three".to_owned()))
        );
    }
}
