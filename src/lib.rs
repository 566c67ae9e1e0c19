//! # N-Puzzle Solver Library
//!
//! This library provides the core state-space machinery for the sliding-tile
//! ("N-puzzle") problem and a Breadth First Search (BFS) solver that is
//! guaranteed to return a shortest solution.
//!
//! It is used by two binaries:
//! - `solve_board`: Reads an explicit board from a file and prints/writes a
//!   solution report (visited states, move count, elapsed time, full trace).
//! - `populate`: Generates a batch of solvable scrambled boards, solves each
//!   one and writes a report file per instance.
//!
//! ## Modules
//! - `engine`: Contains the grid representation (`Grid`, `Dims`), the move
//!   rules (`Move`), and the arena of search states (`SearchTree`) with
//!   parent links used for path reconstruction.
//! - `solver`: Provides the `solve_bfs` function together with the `Replay`
//!   formatter that turns a terminal state into a printable move-by-move
//!   trace.
//! - `scramble`: Builds solvable puzzle instances, either by a bounded number
//!   of random reverse moves from the goal or by a full shuffle.
//! - `utils`: Parsing of whitespace-separated board text, as read by the
//!   binaries and produced by `Grid::render`.

pub mod engine;
pub mod scramble;
pub mod solver;
pub mod utils;
