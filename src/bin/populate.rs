use clap::Parser;
use npuzzle_solver::engine::{Dims, Grid, SearchTree};
use npuzzle_solver::scramble::pseudo_random_scramble;
use npuzzle_solver::solver::{replay, solve_bfs};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of puzzle instances to generate and solve
    #[clap(short, long, default_value_t = 5)]
    count: usize,

    /// Scramble distance (upper bound on the shortest solution)
    #[clap(short, long, default_value_t = 12)]
    moves: usize,

    /// Grid width (tiles per row)
    #[clap(long, default_value_t = 4)]
    width: usize,

    /// Grid height (number of rows)
    #[clap(long, default_value_t = 4)]
    height: usize,

    /// Base RNG seed; instance i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Directory to write one report file per instance into
    #[clap(short, long, default_value = "puzzles")]
    out_dir: PathBuf,
}

fn solve_instance(dims: Dims, num_moves: usize, seed: u64) -> Result<String, String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut tree = SearchTree::new(dims);
    let root = pseudo_random_scramble(&mut tree, num_moves, &mut rng);
    let goal = Grid::goal(dims);

    let start = Instant::now();
    let solution = solve_bfs(&mut tree, root, &goal).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    let trace = replay(&tree, solution.terminal);
    let mut report = String::new();
    writeln!(report, "Seed: {}", seed).unwrap();
    writeln!(report, "Scramble distance: {}", num_moves).unwrap();
    writeln!(report, "Moves: {}", trace.path_len).unwrap();
    writeln!(report, "Visited states: {}", solution.visited_count).unwrap();
    writeln!(report, "Elapsed: {:.3?}", elapsed).unwrap();
    writeln!(report).unwrap();
    writeln!(report, "{}", trace.to_report()).unwrap();
    Ok(report)
}

fn main() {
    let args = Args::parse();

    let dims = match Dims::new(args.width, args.height) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = fs::create_dir_all(&args.out_dir) {
        eprintln!("Failed to create {}: {}", args.out_dir.display(), e);
        std::process::exit(1);
    }

    println!(
        "Generating and solving {} instance(s) of the {}x{} puzzle...",
        args.count, args.width, args.height
    );

    let mut solved = 0;
    for index in 0..args.count {
        let seed = args.seed + index as u64;

        // One bad instance must not abort the rest of the batch.
        let report = match solve_instance(dims, args.moves, seed) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Instance {} (seed {}) failed: {}", index, seed, e);
                continue;
            }
        };

        let path = args.out_dir.join(format!("puzzle_{:03}.txt", index));
        match fs::write(&path, &report) {
            Ok(()) => {
                solved += 1;
                println!("Instance {} written to {}", index, path.display());
            }
            Err(e) => {
                eprintln!("Failed to write {}: {}", path.display(), e);
            }
        }
    }

    println!("Done: {} of {} instance(s) solved.", solved, args.count);
}
