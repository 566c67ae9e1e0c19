use clap::Parser;
use npuzzle_solver::engine::{Dims, Grid, SearchTree};
use npuzzle_solver::solver::{replay, solve_bfs};
use npuzzle_solver::utils::grid_from_str;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Grid width (tiles per row)
    #[clap(long, default_value_t = 4)]
    width: usize,

    /// Grid height (number of rows)
    #[clap(long, default_value_t = 4)]
    height: usize,

    /// Also write the report to this file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Path to the board file (whitespace-separated tile labels, 0 is the blank)
    board_file: PathBuf,
}

fn solve_to_report(args: &Args) -> Result<String, String> {
    let dims = Dims::new(args.width, args.height).map_err(|e| e.to_string())?;

    let text = fs::read_to_string(&args.board_file)
        .map_err(|e| format!("Failed to read {}: {}", args.board_file.display(), e))?;
    let grid = grid_from_str(&text, dims).map_err(|e| format!("Invalid board: {}", e))?;

    // A 4x4 in the wrong parity class would make BFS enumerate its entire
    // half of the permutation space before reporting failure; the parity
    // test answers the same question immediately.
    if !grid.is_solvable() {
        return Err("Board is unsolvable: the goal arrangement is not reachable".to_string());
    }

    let goal = Grid::goal(dims);
    let mut tree = SearchTree::new(dims);
    let root = tree.insert_root(grid);

    let start = Instant::now();
    let solution = solve_bfs(&mut tree, root, &goal).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    let trace = replay(&tree, solution.terminal);
    let mut report = String::new();
    writeln!(report, "Moves: {}", trace.path_len).unwrap();
    writeln!(report, "Visited states: {}", solution.visited_count).unwrap();
    writeln!(report, "Elapsed: {:.3?}", elapsed).unwrap();
    writeln!(report).unwrap();
    writeln!(report, "{}", trace.to_report()).unwrap();
    Ok(report)
}

fn main() {
    let args = Args::parse();

    match solve_to_report(&args) {
        Ok(report) => {
            println!("{}", report);
            if let Some(path) = &args.output {
                if let Err(e) = fs::write(path, &report) {
                    eprintln!("Failed to write {}: {}", path.display(), e);
                    std::process::exit(1);
                }
                println!("Report written to {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
