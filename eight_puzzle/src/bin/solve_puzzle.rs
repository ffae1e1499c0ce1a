use anyhow::{bail, Context, Result};
use clap::Parser;
use eight_puzzle::engine::{Board, State};
use eight_puzzle::solver::{create_searcher, SearchOutcome};
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve a single Eight Puzzle", long_about = None)]
struct Args {
    /// Initial board as nine digits with 0 for the blank, e.g. 142658730
    #[clap(required_unless_present = "scramble", conflicts_with = "scramble")]
    puzzle: Option<String>,

    /// Start from a board this many random blank moves away from the goal
    #[clap(long, value_name = "N")]
    scramble: Option<usize>,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    #[clap(short, long, default_value = "A*")]
    algorithm: String,

    /// Depth limit (-1 for none) for random/BFS/DFS, or heuristic (h0, h1, h2) for Greedy/A*
    #[clap(short, long, default_value = "h2", allow_hyphen_values = true)]
    param: String,

    /// Seed for the random searcher and for --scramble
    #[clap(long)]
    seed: Option<u64>,

    /// Print the moves of a solution without asking
    #[clap(long)]
    show_moves: bool,

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

fn initial_board(args: &Args) -> Result<Board> {
    match (&args.puzzle, args.scramble) {
        (Some(digits), _) => Board::new(digits.trim())
            .with_context(|| format!("Invalid puzzle '{}'", digits)),
        (None, Some(num_moves)) => {
            let seed = args.seed.unwrap_or_else(rand::random);
            log::debug!("Scrambling {} moves from the goal with seed {}", num_moves, seed);
            Ok(Board::scrambled_with_seed(seed, num_moves))
        }
        (None, None) => bail!("either a puzzle or --scramble is required"),
    }
}

fn ask_to_show_moves() -> Result<bool> {
    print!("Show the moves (y/n)? ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read answer")?;
    Ok(input.trim() == "y")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let board = initial_board(&args)?;
    println!("Initial board ({}):\n{}", board.digit_string(), board);

    let mut searcher = match create_searcher(&args.algorithm, &args.param) {
        Some(searcher) => searcher,
        None => bail!(
            "Cannot create a {} searcher with parameter '{}'",
            args.algorithm,
            args.param
        ),
    };
    if let Some(seed) = args.seed {
        searcher = searcher.with_seed(seed);
    }

    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let cancel_flag = Arc::clone(&cancel_flag);
        ctrlc::set_handler(move || cancel_flag.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }
    let mut searcher = searcher.with_cancel_flag(cancel_flag);

    let start = Instant::now();
    let outcome = searcher.find_solution(State::new_root(board));
    let elapsed = start.elapsed();

    if outcome.was_cancelled() {
        println!("Search terminated.");
    }
    println!(
        "{}: {:.3} seconds, {} states",
        args.algorithm,
        elapsed.as_secs_f64(),
        searcher.num_tested()
    );
    log::debug!("{}", searcher);

    match outcome {
        SearchOutcome::Solved(solution) => {
            println!("Found a solution requiring {} moves.", solution.num_moves());
            if args.show_moves || ask_to_show_moves()? {
                solution.print_moves_to()?;
            }
        }
        SearchOutcome::Exhausted | SearchOutcome::Cancelled => {
            println!("Failed to find a solution.");
        }
    }

    Ok(())
}
