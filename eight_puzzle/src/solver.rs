//! State-space search over Eight Puzzle states.
//!
//! A [`Searcher`] owns a frontier of untested states and repeatedly removes one, tests
//! whether it is the goal and, if not, admits its successors into the frontier. The
//! five algorithms differ only in which state is removed next:
//!
//! | Algorithm | Depth limit | Next state |
//! |---|---|---|
//! | random | configurable | uniformly random |
//! | BFS | configurable | earliest inserted |
//! | DFS | configurable | most recently inserted |
//! | Greedy | unlimited | highest priority, `-h(state)` |
//! | A* | unlimited | highest priority, `-(h(state) + num_moves)` |
//!
//! Informed searchers break priority ties in favour of the earliest-inserted state.
use crate::engine::State;
use crate::heuristics::Heuristic;
use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering as CmpOrdering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How deep a searcher may go before it stops admitting states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthLimit {
    Unlimited,
    /// States with more than this many moves are rejected.
    Limited(u32),
}

impl DepthLimit {
    /// Converts a numeric depth parameter; any negative value (conventionally `-1`)
    /// means no limit.
    pub fn from_param(limit: i64) -> Self {
        if limit < 0 {
            DepthLimit::Unlimited
        } else {
            DepthLimit::Limited(u32::try_from(limit).unwrap_or(u32::MAX))
        }
    }

    /// Returns `true` if a state `num_moves` from the root is within the limit.
    pub fn allows(self, num_moves: u32) -> bool {
        match self {
            DepthLimit::Unlimited => true,
            DepthLimit::Limited(limit) => num_moves <= limit,
        }
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Unlimited => write!(f, "no depth limit"),
            DepthLimit::Limited(limit) => write!(f, "depth limit = {}", limit),
        }
    }
}

/// The search algorithm a [`Searcher`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Random,
    BreadthFirst,
    DepthFirst,
    Greedy(Heuristic),
    AStar(Heuristic),
}

impl Algorithm {
    /// The name the algorithm is selected and reported by.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::BreadthFirst => "BFS",
            Algorithm::DepthFirst => "DFS",
            Algorithm::Greedy(_) => "Greedy",
            Algorithm::AStar(_) => "A*",
        }
    }

    /// The heuristic of an informed algorithm, `None` for the uninformed ones.
    pub fn heuristic(&self) -> Option<Heuristic> {
        match self {
            Algorithm::Greedy(h) | Algorithm::AStar(h) => Some(*h),
            _ => None,
        }
    }
}

/// Result of [`Searcher::find_solution`].
#[derive(Debug)]
pub enum SearchOutcome {
    /// A goal state was found.
    Solved(Rc<State>),
    /// The frontier ran out without reaching the goal.
    Exhausted,
    /// The cancel flag was raised before the search finished.
    Cancelled,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Rc<State>> {
        match self {
            SearchOutcome::Solved(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn was_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled)
    }
}

// A frontier entry for the informed searchers. Greater entries are removed first:
// higher priority wins, then the lower (earlier) insertion sequence.
struct PriorityEntry {
    priority: f64,
    seq: u64,
    state: Rc<State>,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// The untested states, stored the way each algorithm needs to remove them.
enum Frontier {
    Random {
        states: Vec<Rc<State>>,
        rng: SmallRng,
    },
    Fifo(VecDeque<Rc<State>>),
    Lifo(Vec<Rc<State>>),
    Priority {
        heap: BinaryHeap<PriorityEntry>,
        next_seq: u64,
        heuristic: Heuristic,
        include_path_cost: bool,
    },
}

impl Frontier {
    fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Random => Frontier::Random {
                states: Vec::new(),
                rng: SmallRng::from_entropy(),
            },
            Algorithm::BreadthFirst => Frontier::Fifo(VecDeque::new()),
            Algorithm::DepthFirst => Frontier::Lifo(Vec::new()),
            Algorithm::Greedy(heuristic) => Frontier::priority(heuristic, false),
            Algorithm::AStar(heuristic) => Frontier::priority(heuristic, true),
        }
    }

    fn priority(heuristic: Heuristic, include_path_cost: bool) -> Self {
        Frontier::Priority {
            heap: BinaryHeap::new(),
            next_seq: 0,
            heuristic,
            include_path_cost,
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Random { states, .. } => states.len(),
            Frontier::Fifo(states) => states.len(),
            Frontier::Lifo(states) => states.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, state: Rc<State>) {
        match self {
            Frontier::Random { states, .. } => states.push(state),
            Frontier::Fifo(states) => states.push_back(state),
            Frontier::Lifo(states) => states.push(state),
            Frontier::Priority {
                heap,
                next_seq,
                heuristic,
                include_path_cost,
            } => {
                let mut cost = heuristic.estimate(&state);
                if *include_path_cost {
                    cost += f64::from(state.num_moves());
                }
                heap.push(PriorityEntry {
                    priority: -cost,
                    seq: *next_seq,
                    state,
                });
                *next_seq += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<Rc<State>> {
        match self {
            Frontier::Random { states, rng } => {
                if states.is_empty() {
                    return None;
                }
                let index = rng.gen_range(0..states.len());
                Some(states.swap_remove(index))
            }
            Frontier::Fifo(states) => states.pop_front(),
            Frontier::Lifo(states) => states.pop(),
            Frontier::Priority { heap, .. } => heap.pop().map(|entry| entry.state),
        }
    }
}

/// Performs state-space search on Eight Puzzle states.
///
/// # Examples
/// ```
/// use eight_puzzle::engine::{Board, State};
/// use eight_puzzle::heuristics::H2;
/// use eight_puzzle::solver::Searcher;
///
/// let init = State::new_root(Board::new("142658730").unwrap());
/// let mut searcher = Searcher::a_star(H2);
/// let outcome = searcher.find_solution(init);
/// assert_eq!(outcome.solution().unwrap().num_moves(), 8);
/// println!("{}", searcher); // A*: 10 untested, 11 tested, heuristic h2
/// ```
pub struct Searcher {
    algorithm: Algorithm,
    depth_limit: DepthLimit,
    frontier: Frontier,
    num_tested: u64,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Searcher {
    /// Creates a searcher for `algorithm`.
    ///
    /// Greedy and A* always search without a depth limit; `depth_limit` is ignored
    /// for them.
    pub fn new(algorithm: Algorithm, depth_limit: DepthLimit) -> Self {
        let depth_limit = match algorithm {
            Algorithm::Greedy(_) | Algorithm::AStar(_) => DepthLimit::Unlimited,
            _ => depth_limit,
        };
        Searcher {
            algorithm,
            depth_limit,
            frontier: Frontier::for_algorithm(algorithm),
            num_tested: 0,
            cancel_flag: None,
        }
    }

    pub fn random(depth_limit: DepthLimit) -> Self {
        Searcher::new(Algorithm::Random, depth_limit)
    }

    pub fn breadth_first(depth_limit: DepthLimit) -> Self {
        Searcher::new(Algorithm::BreadthFirst, depth_limit)
    }

    pub fn depth_first(depth_limit: DepthLimit) -> Self {
        Searcher::new(Algorithm::DepthFirst, depth_limit)
    }

    pub fn greedy(heuristic: Heuristic) -> Self {
        Searcher::new(Algorithm::Greedy(heuristic), DepthLimit::Unlimited)
    }

    pub fn a_star(heuristic: Heuristic) -> Self {
        Searcher::new(Algorithm::AStar(heuristic), DepthLimit::Unlimited)
    }

    /// Seeds the random number generator so random search is reproducible.
    /// Has no effect on the other algorithms.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if let Frontier::Random { rng, .. } = &mut self.frontier {
            *rng = SmallRng::seed_from_u64(seed);
        }
        self
    }

    /// Attaches a flag that, once set, makes [`Searcher::find_solution`] stop before
    /// removing its next state and return [`SearchOutcome::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }

    /// Number of states removed from the frontier and tested so far.
    pub fn num_tested(&self) -> u64 {
        self.num_tested
    }

    /// Number of states currently waiting in the frontier.
    pub fn num_untested(&self) -> usize {
        self.frontier.len()
    }

    /// Returns `true` if `state` may enter the frontier: it must be within the depth
    /// limit and must not repeat a board from its own path.
    pub fn should_add(&self, state: &State) -> bool {
        self.depth_limit.allows(state.num_moves()) && !state.creates_cycle()
    }

    /// Inserts `state` into the frontier unconditionally.
    pub fn add_state(&mut self, state: Rc<State>) {
        self.frontier.push(state);
    }

    /// Inserts the states that pass [`Searcher::should_add`], in the given order.
    pub fn add_states<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = Rc<State>>,
    {
        for state in states {
            if self.should_add(&state) {
                self.add_state(state);
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::SeqCst))
    }

    /// Searches from `init_state` until a goal state is found, the frontier is
    /// exhausted, or the cancel flag is raised.
    ///
    /// `init_state` is added without admission checks. The tested and untested counts
    /// stay valid whatever the outcome.
    pub fn find_solution(&mut self, init_state: Rc<State>) -> SearchOutcome {
        debug!(
            "Starting {} search from {} ({})",
            self.algorithm.name(),
            init_state,
            self.describe_parameter()
        );
        self.add_state(init_state);

        loop {
            if self.is_cancelled() {
                warn!(
                    "{} search cancelled after testing {} states",
                    self.algorithm.name(),
                    self.num_tested
                );
                return SearchOutcome::Cancelled;
            }

            let state = match self.frontier.pop() {
                Some(state) => state,
                None => break,
            };
            self.num_tested += 1;

            if state.is_goal() {
                debug!(
                    "{} search found a {}-move solution after testing {} states ({} untested)",
                    self.algorithm.name(),
                    state.num_moves(),
                    self.num_tested,
                    self.frontier.len()
                );
                return SearchOutcome::Solved(state);
            }

            trace!("Expanding {}", state);
            let successors = state.generate_successors();
            self.add_states(successors);
        }

        debug!(
            "{} search exhausted its frontier after testing {} states",
            self.algorithm.name(),
            self.num_tested
        );
        SearchOutcome::Exhausted
    }

    fn describe_parameter(&self) -> String {
        match self.algorithm.heuristic() {
            Some(heuristic) => format!("heuristic {}", heuristic),
            None => self.depth_limit.to_string(),
        }
    }
}

impl fmt::Display for Searcher {
    /// Summary for reporting, e.g. `BFS: 12 untested, 30 tested, depth limit = 5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} untested, {} tested, {}",
            self.algorithm.name(),
            self.num_untested(),
            self.num_tested,
            self.describe_parameter()
        )
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("algorithm", &self.algorithm)
            .field("depth_limit", &self.depth_limit)
            .field("num_untested", &self.num_untested())
            .field("num_tested", &self.num_tested)
            .finish()
    }
}

/// Creates a searcher from an algorithm name and its parameter.
///
/// # Arguments
/// * `algorithm`: One of `"random"`, `"BFS"`, `"DFS"`, `"Greedy"` or `"A*"`.
/// * `param`: For random, BFS and DFS an integer depth limit (`-1` for no limit); for
///   Greedy and A* a heuristic name (`"h0"`, `"h1"` or `"h2"`).
///
/// # Returns
/// `None` if the algorithm name is unknown or the parameter does not fit it. The
/// reason is logged as a warning.
///
/// # Examples
/// ```
/// use eight_puzzle::solver::create_searcher;
/// assert!(create_searcher("BFS", "-1").is_some());
/// assert!(create_searcher("A*", "h1").is_some());
/// assert!(create_searcher("IDA*", "h1").is_none());
/// assert!(create_searcher("Greedy", "5").is_none());
/// ```
pub fn create_searcher(algorithm: &str, param: &str) -> Option<Searcher> {
    match algorithm {
        "random" => parse_depth_limit(param).map(Searcher::random),
        "BFS" => parse_depth_limit(param).map(Searcher::breadth_first),
        "DFS" => parse_depth_limit(param).map(Searcher::depth_first),
        "Greedy" => parse_heuristic(param).map(Searcher::greedy),
        "A*" => parse_heuristic(param).map(Searcher::a_star),
        other => {
            warn!("unknown algorithm: {}", other);
            None
        }
    }
}

fn parse_depth_limit(param: &str) -> Option<DepthLimit> {
    match param.trim().parse::<i64>() {
        Ok(limit) => Some(DepthLimit::from_param(limit)),
        Err(_) => {
            warn!("invalid depth limit '{}': expected an integer (-1 for none)", param);
            None
        }
    }
}

fn parse_heuristic(param: &str) -> Option<Heuristic> {
    let heuristic = Heuristic::by_name(param.trim());
    if heuristic.is_none() {
        warn!("unknown heuristic '{}': expected h0, h1 or h2", param);
    }
    heuristic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Board, Direction};
    use crate::heuristics::{H0, H1, H2};
    use std::thread;
    use std::time::Duration;

    fn root(digits: &str) -> Rc<State> {
        State::new_root(Board::new(digits).unwrap())
    }

    fn solve(searcher: &mut Searcher, digits: &str) -> SearchOutcome {
        searcher.find_solution(root(digits))
    }

    fn assert_valid_solution(solution: &State, digits: &str) {
        assert!(solution.is_goal());
        let mut board = Board::new(digits).unwrap();
        for direction in solution.moves() {
            assert!(board.move_blank(direction));
        }
        assert!(board.is_goal(), "replaying the moves must reach the goal");
        assert_eq!(solution.moves().len() as u32, solution.num_moves());
    }

    #[test]
    fn test_depth_limit_from_param() {
        assert_eq!(DepthLimit::from_param(-1), DepthLimit::Unlimited);
        assert_eq!(DepthLimit::from_param(-20), DepthLimit::Unlimited);
        assert_eq!(DepthLimit::from_param(0), DepthLimit::Limited(0));
        assert_eq!(DepthLimit::from_param(25), DepthLimit::Limited(25));
        assert!(DepthLimit::Limited(3).allows(3));
        assert!(!DepthLimit::Limited(3).allows(4));
        assert!(DepthLimit::Unlimited.allows(u32::MAX));
    }

    #[test]
    fn test_already_solved() {
        let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited);
        let outcome = solve(&mut searcher, "012345678");
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.num_moves(), 0);
        assert_eq!(searcher.num_tested(), 1);
        assert_eq!(searcher.num_untested(), 0, "root must not be expanded");
    }

    #[test]
    fn test_bfs_shallow_puzzles() {
        for (digits, moves, tested) in [
            ("312045678", 1, 2),
            ("142305678", 2, 6),
            ("125340678", 3, 11),
        ] {
            let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited);
            let outcome = solve(&mut searcher, digits);
            let solution = outcome.solution().unwrap();
            assert_valid_solution(solution, digits);
            assert_eq!(solution.num_moves(), moves, "{}", digits);
            assert_eq!(searcher.num_tested(), tested, "{}", digits);
        }
    }

    #[test]
    fn test_bfs_first_move_is_up() {
        let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited);
        let outcome = solve(&mut searcher, "312045678");
        assert_eq!(outcome.solution().unwrap().moves(), vec![Direction::Up]);
    }

    #[test]
    fn test_bfs_regression_fixture() {
        // Blank in the centre; 14 moves from the goal.
        let mut searcher = Searcher::breadth_first(DepthLimit::from_param(-1));
        let outcome = solve(&mut searcher, "123405678");
        let solution = outcome.solution().unwrap();
        assert_valid_solution(solution, "123405678");
        assert_eq!(solution.num_moves(), 14);
        assert_eq!(searcher.num_tested(), 8645);
    }

    #[test]
    fn test_bfs_eight_moves() {
        let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited);
        let outcome = solve(&mut searcher, "142658730");
        assert_eq!(outcome.solution().unwrap().num_moves(), 8);
        assert_eq!(searcher.num_tested(), 198);
        assert_eq!(searcher.num_untested(), 155);
    }

    #[test]
    fn test_bfs_depth_limit_too_small() {
        let mut searcher = Searcher::breadth_first(DepthLimit::Limited(7));
        let outcome = solve(&mut searcher, "142658730");
        assert!(matches!(outcome, SearchOutcome::Exhausted));
        assert!(!outcome.was_cancelled());
        assert_eq!(searcher.num_tested(), 159);
        assert_eq!(searcher.num_untested(), 0);
    }

    #[test]
    fn test_depth_limit_zero_yields_no_solution() {
        for mut searcher in [
            Searcher::random(DepthLimit::Limited(0)).with_seed(1),
            Searcher::breadth_first(DepthLimit::Limited(0)),
            Searcher::depth_first(DepthLimit::Limited(0)),
        ] {
            let outcome = solve(&mut searcher, "125340678");
            assert!(!outcome.is_solved());
            assert!(!outcome.was_cancelled());
            assert_eq!(searcher.num_tested(), 1);
        }
    }

    #[test]
    fn test_dfs_finds_solution_within_limit() {
        let mut searcher = Searcher::depth_first(DepthLimit::Limited(8));
        let outcome = solve(&mut searcher, "142658730");
        let solution = outcome.solution().unwrap();
        assert_valid_solution(solution, "142658730");
        assert_eq!(solution.num_moves(), 8);
        assert_eq!(searcher.num_tested(), 212);

        let mut searcher = Searcher::depth_first(DepthLimit::Limited(10));
        let outcome = solve(&mut searcher, "142658730");
        let solution = outcome.solution().unwrap();
        assert_valid_solution(solution, "142658730");
        assert!(solution.num_moves() <= 10);
    }

    #[test]
    fn test_random_search_within_depth_limit() {
        for seed in 0..10 {
            let mut searcher = Searcher::random(DepthLimit::Limited(3)).with_seed(seed);
            let outcome = solve(&mut searcher, "125340678");
            let solution = outcome.solution().unwrap();
            assert_valid_solution(solution, "125340678");
            // The puzzle is exactly 3 moves from the goal.
            assert_eq!(solution.num_moves(), 3);
        }
    }

    #[test]
    fn test_random_search_is_reproducible_with_seed() {
        let run = |seed| {
            let mut searcher = Searcher::random(DepthLimit::Limited(5)).with_seed(seed);
            let outcome = solve(&mut searcher, "142305678");
            (outcome.solution().map(|s| s.to_string()), searcher.num_tested())
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_a_star_is_optimal_with_every_heuristic() {
        for (heuristic, tested) in [(H0, 8645), (H1, 404), (H2, 154)] {
            let mut searcher = Searcher::a_star(heuristic);
            let outcome = solve(&mut searcher, "123405678");
            let solution = outcome.solution().unwrap();
            assert_valid_solution(solution, "123405678");
            assert_eq!(solution.num_moves(), 14, "A* with {}", heuristic);
            assert_eq!(searcher.num_tested(), tested, "A* with {}", heuristic);
        }
    }

    #[test]
    fn test_a_star_matches_bfs_on_scrambled_boards() {
        for seed in 0..10 {
            let board = Board::scrambled_with_seed(seed, 9);
            let digits = board.digit_string();

            let mut bfs = Searcher::breadth_first(DepthLimit::Unlimited);
            let bfs_moves = solve(&mut bfs, &digits).solution().unwrap().num_moves();

            let mut a_star = Searcher::a_star(H2);
            let a_star_moves = solve(&mut a_star, &digits).solution().unwrap().num_moves();

            assert_eq!(a_star_moves, bfs_moves, "board {}", digits);
            assert!(bfs_moves <= 9);
        }
    }

    #[test]
    fn test_greedy_finds_a_solution() {
        for heuristic in [H1, H2] {
            let mut searcher = Searcher::greedy(heuristic);
            let outcome = solve(&mut searcher, "123405678");
            let solution = outcome.solution().unwrap();
            assert_valid_solution(solution, "123405678");
            assert!(solution.num_moves() >= 14);
        }
    }

    #[test]
    fn test_equal_priorities_are_deterministic() {
        // With h0 every Greedy priority is equal, so the order is decided entirely by
        // the tie-break. Earliest-inserted wins, which reproduces breadth-first order.
        let run = || {
            let mut searcher = Searcher::greedy(H0);
            let outcome = solve(&mut searcher, "142658730");
            (outcome.solution().unwrap().num_moves(), searcher.num_tested())
        };
        assert_eq!(run(), run());
        assert_eq!(run(), (8, 198));
    }

    #[test]
    fn test_priority_entry_order() {
        let state = root("012345678");
        let entry = |priority, seq| PriorityEntry {
            priority,
            seq,
            state: Rc::clone(&state),
        };
        let mut heap = BinaryHeap::new();
        heap.push(entry(-3.0, 0));
        heap.push(entry(-1.0, 1));
        heap.push(entry(-1.0, 2));
        heap.push(entry(-2.5, 3));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.seq)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_should_add() {
        let searcher = Searcher::breadth_first(DepthLimit::Limited(1));
        let start = root("123405678");
        let children = start.generate_successors();
        assert!(children.iter().all(|child| searcher.should_add(child)));

        let grandchildren = children[0].generate_successors();
        assert!(grandchildren.iter().all(|g| !searcher.should_add(g)), "too deep");

        let unlimited = Searcher::depth_first(DepthLimit::Unlimited);
        let back = grandchildren
            .iter()
            .find(|g| g.last_move() == Some(Direction::Down))
            .unwrap();
        assert!(back.creates_cycle());
        assert!(!unlimited.should_add(back), "cycles are always rejected");
        assert!(grandchildren
            .iter()
            .filter(|g| !g.creates_cycle())
            .all(|g| unlimited.should_add(g)));
    }

    #[test]
    fn test_add_states_filters_batch() {
        let mut searcher = Searcher::depth_first(DepthLimit::Unlimited);
        let start = root("123405678");
        let up = start.generate_successors().remove(0);
        // From `up`, moving the blank down returns to the start.
        searcher.add_states(up.generate_successors());
        assert_eq!(searcher.num_untested(), up.generate_successors().len() - 1);
    }

    #[test]
    fn test_informed_searchers_ignore_depth_limit() {
        let searcher = Searcher::new(Algorithm::AStar(H1), DepthLimit::Limited(3));
        assert_eq!(searcher.depth_limit(), DepthLimit::Unlimited);
        let searcher = Searcher::new(Algorithm::Greedy(H1), DepthLimit::Limited(3));
        assert_eq!(searcher.depth_limit(), DepthLimit::Unlimited);
    }

    #[test]
    fn test_cancel_before_start() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut searcher = Searcher::breadth_first(DepthLimit::Unlimited).with_cancel_flag(flag);
        let outcome = solve(&mut searcher, "123405678");
        assert!(outcome.was_cancelled());
        assert!(outcome.solution().is_none());
        assert_eq!(searcher.num_tested(), 0);
        assert_eq!(searcher.num_untested(), 1);
    }

    #[test]
    fn test_cancel_during_search() {
        // 30 moves from the goal: breadth-first search cannot finish before the flag
        // is raised.
        let flag = Arc::new(AtomicBool::new(false));
        let setter = {
            let flag = Arc::clone(&flag);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                flag.store(true, Ordering::SeqCst);
            })
        };
        let mut searcher =
            Searcher::breadth_first(DepthLimit::Unlimited).with_cancel_flag(Arc::clone(&flag));
        let outcome = solve(&mut searcher, "876543210");
        setter.join().unwrap();

        assert!(outcome.was_cancelled());
        assert!(searcher.num_tested() > 0);
        assert!(searcher.num_untested() > 0);
    }

    #[test]
    fn test_create_searcher() {
        let cases = [
            ("random", "-1", "random"),
            ("BFS", "5", "BFS"),
            ("DFS", " 10 ", "DFS"),
            ("Greedy", "h1", "Greedy"),
            ("A*", "h2", "A*"),
        ];
        for (name, param, expected) in cases {
            let searcher = create_searcher(name, param).unwrap();
            assert_eq!(searcher.algorithm().name(), expected);
        }
        assert_eq!(
            create_searcher("DFS", "10").unwrap().depth_limit(),
            DepthLimit::Limited(10)
        );
        assert_eq!(
            create_searcher("A*", "h2").unwrap().algorithm(),
            Algorithm::AStar(H2)
        );
    }

    #[test]
    fn test_create_searcher_rejects_bad_input() {
        assert!(create_searcher("bfs", "5").is_none());
        assert!(create_searcher("IDA*", "h1").is_none());
        assert!(create_searcher("BFS", "h1").is_none());
        assert!(create_searcher("BFS", "").is_none());
        assert!(create_searcher("A*", "-1").is_none());
        assert!(create_searcher("Greedy", "h3").is_none());
    }

    #[test]
    fn test_searcher_summary() {
        let mut bfs = Searcher::breadth_first(DepthLimit::Limited(5));
        assert_eq!(bfs.to_string(), "BFS: 0 untested, 0 tested, depth limit = 5");
        solve(&mut bfs, "312045678");
        assert_eq!(bfs.to_string(), "BFS: 2 untested, 2 tested, depth limit = 5");

        let random = Searcher::random(DepthLimit::Unlimited);
        assert_eq!(random.to_string(), "random: 0 untested, 0 tested, no depth limit");

        let mut a_star = Searcher::a_star(H2);
        solve(&mut a_star, "142658730");
        assert_eq!(a_star.to_string(), "A*: 10 untested, 11 tested, heuristic h2");
    }
}
