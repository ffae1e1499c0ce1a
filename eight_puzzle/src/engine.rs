//! Core puzzle model for the Eight Puzzle.
//!
//! This module defines the pieces every searcher operates over:
//! - `Direction`: One of the four ways the blank cell can move.
//! - `Board`: A 3x3 grid of tiles labelled `0`-`8` (`0` is the blank), with blank
//!   movement, serialization to and from a digit string, and two misplacement measures.
//! - `State`: A node in the search tree wrapping a `Board`, a shared link to its
//!   predecessor, the move that produced it and the number of moves from the root.
use crate::error::{InvalidBoardError, UnknownDirection};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;
use std::str::FromStr;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, and the length of a board's digit string.
pub const NUM_TILES: usize = BOARD_SIZE * BOARD_SIZE;

/// The tile layout of the goal configuration, blank in the top-left corner.
pub const GOAL_TILES: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// Label of the blank cell.
pub const BLANK: u8 = 0;

/// A direction in which the blank cell can be moved.
///
/// Moving the blank `Up` swaps it with the tile currently above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order successors are generated.
    ///
    /// Breadth-first and depth-first search are deterministic only because this
    /// order is fixed.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction that undoes this one.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::Direction;
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The lowercase token for this direction (`"up"`, `"down"`, `"left"`, `"right"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    // (row delta, column delta) of the blank for this move.
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// An Eight Puzzle board.
///
/// The grid always holds each label `0`-`8` exactly once, and the cached blank
/// coordinates always point at the cell holding `0`. Both invariants are established
/// by [`Board::new`] and preserved by [`Board::move_blank`], the only mutator.
///
/// `Clone` produces a fully independent deep copy; successor states each receive
/// their own clone so a board is never shared between two states.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [[u8; BOARD_SIZE]; BOARD_SIZE],
    blank_r: usize,
    blank_c: usize,
}

impl Board {
    /// Creates a board from a row-major string of nine digits.
    ///
    /// # Arguments
    /// * `digits`: A permutation of the characters `'0'`-`'8'`; `'0'` marks the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if `digits` is exactly nine characters and contains every digit
    ///   `0`-`8` once.
    /// * `Err(InvalidBoardError)` otherwise. No partially-initialized board is ever
    ///   produced.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::Board;
    /// let board = Board::new("142358067").unwrap();
    /// assert_eq!(board.blank_position(), (2, 0));
    /// assert_eq!(board.digit_string(), "142358067");
    ///
    /// assert!(Board::new("12345678").is_err()); // too short
    /// assert!(Board::new("112345678").is_err()); // duplicate digit
    /// assert!(Board::new("12345678x").is_err()); // not a digit
    /// ```
    pub fn new(digits: &str) -> Result<Self, InvalidBoardError> {
        let len = digits.chars().count();
        if len != NUM_TILES {
            return Err(InvalidBoardError::WrongLength(len));
        }

        let mut tiles = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        let mut seen = [false; NUM_TILES];
        let mut blank = (0, 0);

        for (position, ch) in digits.chars().enumerate() {
            let label = match ch.to_digit(10) {
                Some(d) if (d as usize) < NUM_TILES => d as u8,
                _ => return Err(InvalidBoardError::InvalidCharacter { ch, position }),
            };
            if seen[label as usize] {
                return Err(InvalidBoardError::DuplicateDigit(ch));
            }
            seen[label as usize] = true;

            let (r, c) = (position / BOARD_SIZE, position % BOARD_SIZE);
            tiles[r][c] = label;
            if label == BLANK {
                blank = (r, c);
            }
        }

        Ok(Board {
            tiles,
            blank_r: blank.0,
            blank_c: blank.1,
        })
    }

    /// Returns the goal configuration (`012345678`).
    pub fn goal() -> Self {
        Board {
            tiles: GOAL_TILES,
            blank_r: 0,
            blank_c: 0,
        }
    }

    /// Creates a reproducible, solvable board by making `num_moves` random blank moves
    /// starting from the goal configuration.
    ///
    /// The same `seed` and `num_moves` always yield the same board. Because every board
    /// is reached by legal moves from the goal, it is always solvable in at most
    /// `num_moves` moves.
    ///
    /// # Arguments
    /// * `seed`: Seed for the random number generator.
    /// * `num_moves`: Number of successful blank moves to apply.
    pub fn scrambled_with_seed(seed: u64, num_moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal();
        let mut made = 0;
        while made < num_moves {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            if board.move_blank(direction) {
                made += 1;
            }
        }
        board
    }

    /// Returns the tile label at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not less than `BOARD_SIZE`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.tiles[r][c]
    }

    /// Returns the `(row, column)` of the blank cell.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank_r, self.blank_c)
    }

    /// Returns `true` if this board is the goal configuration.
    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Attempts to move the blank one cell in `direction`.
    ///
    /// The blank exchanges places with the neighbouring tile in that direction.
    ///
    /// # Returns
    /// * `true` if the move was made; the tiles and the cached blank position are updated.
    /// * `false` if the move would leave the board. The board is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::engine::{Board, Direction};
    /// let mut board = Board::new("312045678").unwrap();
    /// assert!(!board.move_blank(Direction::Left)); // blank is in column 0
    /// assert!(board.move_blank(Direction::Up));
    /// assert_eq!(board, Board::goal());
    /// ```
    pub fn move_blank(&mut self, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        let new_r = self.blank_r as isize + dr;
        let new_c = self.blank_c as isize + dc;
        if new_r < 0 || new_r >= BOARD_SIZE as isize || new_c < 0 || new_c >= BOARD_SIZE as isize {
            return false;
        }

        let (new_r, new_c) = (new_r as usize, new_c as usize);
        self.tiles[self.blank_r][self.blank_c] = self.tiles[new_r][new_c];
        self.tiles[new_r][new_c] = BLANK;
        self.blank_r = new_r;
        self.blank_c = new_c;
        true
    }

    /// Attempts to move the blank in the direction named by `token`.
    ///
    /// Accepts the tokens `"up"`, `"down"`, `"left"` and `"right"`. An unrecognized
    /// token is a failed move, just like an out-of-bounds one: it returns `false` and
    /// leaves the board unchanged.
    pub fn move_blank_named(&mut self, token: &str) -> bool {
        match token.parse::<Direction>() {
            Ok(direction) => self.move_blank(direction),
            Err(_) => false,
        }
    }

    /// Serializes the grid row-major into a nine-character digit string.
    ///
    /// This is the inverse of [`Board::new`].
    pub fn digit_string(&self) -> String {
        self.tiles
            .iter()
            .flatten()
            .map(|&label| char::from(b'0' + label))
            .collect()
    }

    /// Counts the non-blank tiles that are not in their goal position.
    ///
    /// Every misplaced tile needs at least one move, so this never overestimates
    /// the remaining number of moves.
    pub fn num_misplaced(&self) -> u32 {
        let mut count = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let label = self.tiles[r][c];
                if label != BLANK && label != GOAL_TILES[r][c] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Sums, over the non-blank tiles, the straight-line (Euclidean) distance between
    /// each tile's current cell and its goal cell.
    ///
    /// A tile moves one cell per move, so the straight-line distance never exceeds
    /// the number of moves the tile still needs.
    pub fn distance_misplaced(&self) -> f64 {
        let mut distance = 0.0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let label = self.tiles[r][c];
                if label == BLANK || label == GOAL_TILES[r][c] {
                    continue;
                }
                let (goal_r, goal_c) = goal_position(label);
                let dr = goal_r as f64 - r as f64;
                let dc = goal_c as f64 - c as f64;
                distance += (dr * dr + dc * dc).sqrt();
            }
        }
        distance
    }
}

// Where `label` sits in GOAL_TILES.
fn goal_position(label: u8) -> (usize, usize) {
    for (r, row) in GOAL_TILES.iter().enumerate() {
        if let Some(c) = row.iter().position(|&goal_label| goal_label == label) {
            return (r, c);
        }
    }
    unreachable!("every label 0-8 appears in GOAL_TILES")
}

impl FromStr for Board {
    type Err = InvalidBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::new(s)
    }
}

impl fmt::Display for Board {
    /// Formats the board one row per line, tiles separated by spaces, `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for &label in row {
                if label == BLANK {
                    write!(f, "_ ")?;
                } else {
                    write!(f, "{} ", label)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.digit_string()).finish()
    }
}

/// A node in the search tree.
///
/// A state owns its board and holds a shared reference to the state it was generated
/// from. Predecessor links form a tree rooted at the initial state: many successors may
/// share one predecessor, and a state is never modified after it is created. The chain
/// is acyclic by construction because successors only ever point at existing states.
pub struct State {
    board: Board,
    predecessor: Option<Rc<State>>,
    last_move: Option<Direction>,
    num_moves: u32,
}

impl State {
    /// Creates the root of a search tree. The root has no predecessor and zero moves.
    pub fn new_root(board: Board) -> Rc<Self> {
        Rc::new(State {
            board,
            predecessor: None,
            last_move: None,
            num_moves: 0,
        })
    }

    fn new_successor(board: Board, predecessor: &Rc<State>, direction: Direction) -> Rc<Self> {
        Rc::new(State {
            board,
            num_moves: predecessor.num_moves + 1,
            predecessor: Some(Rc::clone(predecessor)),
            last_move: Some(direction),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The state this one was generated from, or `None` for the root.
    pub fn predecessor(&self) -> Option<&State> {
        self.predecessor.as_deref()
    }

    /// The move that produced this state, or `None` for the root.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Number of moves from the root; always equal to the length of the lineage minus one.
    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    /// Returns `true` if this state's board is the goal configuration.
    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }

    /// Generates every state reachable from this one by a single blank move.
    ///
    /// Successors are produced in `Direction::ALL` order (up, down, left, right),
    /// skipping moves that would leave the board, so between two and four states are
    /// returned. Each successor gets its own copy of the board and a move count one
    /// higher than this state's.
    pub fn generate_successors(self: &Rc<Self>) -> Vec<Rc<State>> {
        let mut successors = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            let mut board = self.board.clone();
            if board.move_blank(direction) {
                successors.push(State::new_successor(board, self, direction));
            }
        }
        successors
    }

    /// Returns `true` if some ancestor of this state has an identical board.
    ///
    /// Only the path back to the root is checked, not every state ever generated:
    /// two different paths may reach the same board and both are explored. The root
    /// never creates a cycle.
    pub fn creates_cycle(&self) -> bool {
        self.lineage().skip(1).any(|ancestor| ancestor.board == self.board)
    }

    /// Iterates from this state back to the root, starting with this state.
    pub fn lineage(&self) -> impl Iterator<Item = &State> {
        std::iter::successors(Some(self), |state| state.predecessor())
    }

    /// The moves leading from the root to this state, in the order they are made.
    pub fn moves(&self) -> Vec<Direction> {
        let mut moves: Vec<Direction> = self.lineage().filter_map(State::last_move).collect();
        moves.reverse();
        moves
    }

    /// Writes the path from the root to this state.
    ///
    /// The root is written as `initial state:` followed by its board; every later step
    /// as `move the blank <direction>:` followed by the resulting board.
    pub fn write_moves_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut path: Vec<&State> = self.lineage().collect();
        path.reverse();
        for state in path {
            match state.last_move {
                None => writeln!(out, "initial state:")?,
                Some(direction) => writeln!(out, "move the blank {}:", direction)?,
            }
            writeln!(out, "{}", state.board)?;
        }
        Ok(())
    }

    /// Prints the path from the root to this state on standard output.
    pub fn print_moves_to(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_moves_to(&mut handle)
    }
}

impl fmt::Display for State {
    /// Formats the state as `<digits>-<move>-<num_moves>`; the root's move is `init`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.last_move.map_or("init", Direction::as_str);
        write!(f, "{}-{}-{}", self.board.digit_string(), label, self.num_moves)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("board", &self.board)
            .field("last_move", &self.last_move)
            .field("num_moves", &self.num_moves)
            .finish()
    }
}

impl Drop for State {
    // Unlinks the predecessor chain iteratively; the default recursive drop would
    // overflow the stack on the very long chains an unbounded depth-first search builds.
    fn drop(&mut self) {
        let mut next = self.predecessor.take();
        while let Some(state) = next {
            match Rc::try_unwrap(state) {
                Ok(mut owned) => next = owned.predecessor.take(),
                Err(_) => break,
            }
        }
    }
}
