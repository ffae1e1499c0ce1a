//! Heuristic functions for the informed searchers.
//!
//! A heuristic estimates how many more moves a state needs to reach the goal. The
//! informed searchers take one as configuration, so heuristics are plain named
//! function values rather than methods on a searcher type.
//!
//! All three heuristics provided here are non-negative and admissible for the Eight
//! Puzzle (they never overestimate the remaining number of moves), which is what A*
//! needs to return a shortest solution. Admissibility is not checked at run time.
use crate::engine::State;
use std::fmt;

/// Signature shared by every heuristic.
pub type HeuristicFn = fn(&State) -> f64;

/// A heuristic function paired with the name it is selected and reported by.
#[derive(Clone, Copy)]
pub struct Heuristic {
    name: &'static str,
    func: HeuristicFn,
}

/// Always estimates zero. Greedy search with `H0` degenerates to insertion-order
/// search and A* with `H0` to uniform-cost search.
pub const H0: Heuristic = Heuristic::new("h0", h0);

/// Number of misplaced tiles. See [`crate::engine::Board::num_misplaced`].
pub const H1: Heuristic = Heuristic::new("h1", h1);

/// Sum of straight-line distances of misplaced tiles. See
/// [`crate::engine::Board::distance_misplaced`].
pub const H2: Heuristic = Heuristic::new("h2", h2);

/// Every built-in heuristic, in order of increasing informedness.
pub const ALL_HEURISTICS: [Heuristic; 3] = [H0, H1, H2];

impl Heuristic {
    /// Wraps a custom heuristic function under the given name.
    pub const fn new(name: &'static str, func: HeuristicFn) -> Self {
        Heuristic { name, func }
    }

    /// Looks up a built-in heuristic by name (`"h0"`, `"h1"` or `"h2"`).
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle::heuristics::Heuristic;
    /// assert_eq!(Heuristic::by_name("h2").unwrap().name(), "h2");
    /// assert!(Heuristic::by_name("manhattan").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<Heuristic> {
        ALL_HEURISTICS.into_iter().find(|h| h.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Estimates the number of moves remaining from `state` to the goal.
    pub fn estimate(&self, state: &State) -> f64 {
        (self.func)(state)
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Heuristic").field(&self.name).finish()
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Heuristics are identified by name; comparing function pointers is unreliable.
impl PartialEq for Heuristic {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Heuristic {}

pub fn h0(_state: &State) -> f64 {
    0.0
}

pub fn h1(state: &State) -> f64 {
    f64::from(state.board().num_misplaced())
}

pub fn h2(state: &State) -> f64 {
    state.board().distance_misplaced()
}
