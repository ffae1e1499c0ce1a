use anyhow::{bail, Context, Result};
use clap::Parser;
use eight_puzzle::engine::State;
use eight_puzzle::solver::{create_searcher, SearchOutcome};
use eight_puzzle::utils::{load_puzzles, BatchReport};
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve every Eight Puzzle in a file", long_about = None)]
struct Args {
    /// Path to the puzzle file (one nine-digit puzzle per line)
    puzzle_file: PathBuf,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    #[clap(short, long, default_value = "A*")]
    algorithm: String,

    /// Depth limit (-1 for none) for random/BFS/DFS, or heuristic (h0, h1, h2) for Greedy/A*
    #[clap(short, long, default_value = "h2", allow_hyphen_values = true)]
    param: String,

    /// Seed for the random searcher; puzzle i uses seed + i
    #[clap(long)]
    seed: Option<u64>,

    /// Log search progress at debug level
    #[clap(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    let mut builder = Builder::from_env(env);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let boards = load_puzzles(&args.puzzle_file)
        .with_context(|| format!("Failed to load puzzles from {}", args.puzzle_file.display()))?;
    log::debug!(
        "Loaded {} puzzles from {}",
        boards.len(),
        args.puzzle_file.display()
    );

    // A Ctrl-C ends the current search only; the flag is cleared before the next puzzle.
    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let cancel_flag = Arc::clone(&cancel_flag);
        ctrlc::set_handler(move || cancel_flag.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }

    let mut report = BatchReport::new();
    for (index, board) in boards.into_iter().enumerate() {
        let mut searcher = match create_searcher(&args.algorithm, &args.param) {
            Some(searcher) => searcher,
            None => bail!(
                "Cannot create a {} searcher with parameter '{}'",
                args.algorithm,
                args.param
            ),
        };
        if let Some(seed) = args.seed {
            searcher = searcher.with_seed(seed.wrapping_add(index as u64));
        }
        cancel_flag.store(false, Ordering::SeqCst);
        let mut searcher = searcher.with_cancel_flag(Arc::clone(&cancel_flag));

        print!("{}: ", board.digit_string());
        let outcome = searcher.find_solution(State::new_root(board));
        if outcome.was_cancelled() {
            print!("search terminated, ");
        }
        match &outcome {
            SearchOutcome::Solved(solution) => println!(
                "{} moves, {} states tested",
                solution.num_moves(),
                searcher.num_tested()
            ),
            SearchOutcome::Exhausted | SearchOutcome::Cancelled => println!("no solution"),
        }
        report.record(&outcome, searcher.num_tested());
    }

    println!();
    println!("{}", report);
    Ok(())
}
