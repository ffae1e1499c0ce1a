//! # Eight Puzzle Library
//!
//! This library provides the board model for the Eight Puzzle (a 3x3 sliding-tile
//! puzzle with one blank cell) and a family of state-space searchers that solve it:
//! random, breadth-first, depth-first, greedy best-first and A*.
//!
//! It is used by two binaries:
//! - `solve_puzzle`: Solves a single puzzle and reports the time taken, the number of
//!   states tested and, optionally, the sequence of moves.
//! - `process_file`: Solves every puzzle in a file with the same search configuration
//!   and reports aggregate statistics.
//!
//! ## Modules
//! - `engine`: The board (`Board`), blank moves (`Direction`) and search-tree nodes
//!   (`State`) linked to their predecessors.
//! - `heuristics`: The named heuristic functions `H0`, `H1` and `H2` used by the
//!   informed searchers.
//! - `solver`: The `Searcher` with its per-algorithm frontier, and `create_searcher`
//!   for building one from an algorithm name and parameter.
//! - `utils`: Puzzle-file parsing and batch aggregation (`BatchReport`).
//! - `error`: Error types for board construction and puzzle-file loading.
//!
//! ## Example
//! ```
//! use eight_puzzle::engine::{Board, State};
//! use eight_puzzle::solver::{DepthLimit, Searcher};
//!
//! let init = State::new_root(Board::new("125340678").unwrap());
//! let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited);
//! let outcome = searcher.find_solution(init);
//! assert_eq!(outcome.solution().unwrap().num_moves(), 3);
//! ```

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;
