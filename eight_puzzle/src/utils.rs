use crate::engine::Board;
use crate::error::PuzzleFileError;
use crate::solver::SearchOutcome;
use std::fmt;
use std::fs;
use std::path::Path;

/// Parses puzzle text containing one digit string per line into boards.
///
/// Surrounding whitespace is trimmed from every line and blank lines are skipped.
///
/// # Arguments
/// * `text`: The puzzle text, e.g. the contents of a puzzle file.
///
/// # Returns
/// * `Ok(Vec<Board>)` with one board per non-blank line, in file order.
/// * `Err(PuzzleFileError::InvalidPuzzle)` for the first line that is not a valid board,
///   carrying its 1-based line number.
///
/// # Examples
/// ```
/// use eight_puzzle::utils::puzzles_from_str;
///
/// let boards = puzzles_from_str("142658730\n\n123405678\n").unwrap();
/// assert_eq!(boards.len(), 2);
/// assert_eq!(boards[1].digit_string(), "123405678");
///
/// assert!(puzzles_from_str("12345678\n").is_err());
/// ```
pub fn puzzles_from_str(text: &str) -> Result<Vec<Board>, PuzzleFileError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| {
            Board::new(line).map_err(|source| PuzzleFileError::InvalidPuzzle {
                line: line_number,
                source,
            })
        })
        .collect()
}

/// Reads and parses a puzzle file. See [`puzzles_from_str`] for the format.
pub fn load_puzzles<P: AsRef<Path>>(path: P) -> Result<Vec<Board>, PuzzleFileError> {
    let text = fs::read_to_string(path)?;
    puzzles_from_str(&text)
}

/// Running totals over a batch of searches that all use the same configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    num_puzzles: usize,
    num_solved: usize,
    num_cancelled: usize,
    total_moves: u64,
    total_tested: u64,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one puzzle's result. `num_tested` is the searcher's tested count for
    /// that puzzle, which counts towards the averages whatever the outcome.
    pub fn record(&mut self, outcome: &SearchOutcome, num_tested: u64) {
        self.num_puzzles += 1;
        self.total_tested += num_tested;
        match outcome {
            SearchOutcome::Solved(solution) => {
                self.num_solved += 1;
                self.total_moves += u64::from(solution.num_moves());
            }
            SearchOutcome::Cancelled => self.num_cancelled += 1,
            SearchOutcome::Exhausted => {}
        }
    }

    pub fn num_puzzles(&self) -> usize {
        self.num_puzzles
    }

    pub fn num_solved(&self) -> usize {
        self.num_solved
    }

    pub fn num_cancelled(&self) -> usize {
        self.num_cancelled
    }

    /// Average solution length over the solved puzzles, `None` if nothing was solved.
    pub fn average_moves(&self) -> Option<f64> {
        if self.num_solved == 0 {
            None
        } else {
            Some(self.total_moves as f64 / self.num_solved as f64)
        }
    }

    /// Average number of states tested over every puzzle, solved or not.
    pub fn average_tested(&self) -> Option<f64> {
        if self.num_puzzles == 0 {
            None
        } else {
            Some(self.total_tested as f64 / self.num_puzzles as f64)
        }
    }
}

impl fmt::Display for BatchReport {
    /// The batch summary: the solved count, then the averages when anything was solved.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solved {} puzzles", self.num_solved)?;
        if let (Some(moves), Some(tested)) = (self.average_moves(), self.average_tested()) {
            write!(f, "\naverages: {} moves, {} states tested", moves, tested)?;
        }
        Ok(())
    }
}
