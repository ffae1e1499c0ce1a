//! Error types for board construction and puzzle-file loading.
//!
//! Conditions that the search treats as ordinary outcomes (an illegal blank move,
//! an unknown algorithm name, a cancelled search) are not errors and never
//! appear here.

use std::io;
use thiserror::Error;

/// Returned when a digit string does not describe a valid 3x3 board.
///
/// A valid string has exactly nine characters and is a permutation of the
/// digits `0` through `8`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoardError {
    #[error("expected 9 digits, found {0} characters")]
    WrongLength(usize),
    #[error("unrecognized character '{ch}' at position {position} (expected a digit 0-8)")]
    InvalidCharacter { ch: char, position: usize },
    #[error("digit '{0}' appears more than once")]
    DuplicateDigit(char),
}

/// Failure while reading a file of puzzles, one digit string per line.
#[derive(Error, Debug)]
pub enum PuzzleFileError {
    #[error("I/O error reading puzzle file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid puzzle on line {line}: {source}")]
    InvalidPuzzle {
        line: usize,
        #[source]
        source: InvalidBoardError,
    },
}

/// Returned when parsing a move token other than `up`, `down`, `left` or `right`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction '{0}'")]
pub struct UnknownDirection(pub String);
