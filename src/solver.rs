//! Breadth First Search over the space of reachable arrangements.
//!
//! The solver explores states in non-decreasing distance from the root, so
//! the first time the goal arrangement is dequeued its path length is
//! minimal. Deduplication uses a single visited set shared across the whole
//! search (not just each node's ancestor chain), which is what makes the
//! shortest-path guarantee hold across sibling branches.

use crate::engine::{Grid, Move, NodeId, SearchTree};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Error returned when the frontier empties before the goal is dequeued.
///
/// For roots produced by legal moves from the goal (every scramble and
/// shuffle this crate generates) this cannot happen; it is the honest answer
/// for an explicitly supplied arrangement in the wrong parity class.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no sequence of legal moves reaches the goal arrangement")]
pub struct UnsolvableError;

/// Represents a solution found by the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// The state at which the goal arrangement was first dequeued. Its
    /// parent chain is the shortest move sequence from the root.
    pub terminal: NodeId,
    /// The number of distinct arrangements ever enqueued, the root included.
    pub visited_count: usize,
}

/// Solves the puzzle by BFS from `root` to the `goal` arrangement.
///
/// Maintains a FIFO frontier of states and a set of every arrangement ever
/// enqueued. Each dequeued state is tested against the goal; otherwise its
/// four candidate moves are tried in the fixed [`Move::ALL`] order, skipping
/// out-of-bounds slides and arrangements already in the visited set. New
/// arrangements are marked visited before they are enqueued, so no
/// arrangement is ever enqueued twice.
///
/// # Arguments
/// * `tree`: The arena holding `root`; child states are allocated into it.
/// * `root`: The starting state.
/// * `goal`: The goal arrangement for `tree`'s dimensions.
///
/// # Returns
/// * `Ok(Solution)` with the terminal state and the visited-state count.
/// * `Err(UnsolvableError)` if the reachable space is exhausted without
///   finding the goal.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Dims, Grid, SearchTree};
/// use npuzzle_solver::solver::solve_bfs;
///
/// let dims = Dims::new(3, 3).unwrap();
/// let mut tree = SearchTree::new(dims);
/// let root = tree.insert_root(Grid::goal(dims));
/// let solution = solve_bfs(&mut tree, root, &Grid::goal(dims)).unwrap();
/// assert_eq!(solution.visited_count, 1);
/// assert_eq!(solution.terminal, root);
/// ```
pub fn solve_bfs(
    tree: &mut SearchTree,
    root: NodeId,
    goal: &Grid,
) -> Result<Solution, UnsolvableError> {
    let mut visited: HashSet<Vec<u16>> = HashSet::new();
    visited.insert(tree.grid(root).contents().to_vec());

    let mut frontier = VecDeque::new();
    frontier.push_back(root);

    while let Some(current) = frontier.pop_front() {
        if tree.grid(current) == goal {
            return Ok(Solution {
                terminal: current,
                visited_count: visited.len(),
            });
        }

        for mv in Move::ALL {
            if let Some((contents, blank)) = tree.slide(current, mv) {
                if visited.contains(&contents) {
                    continue;
                }
                visited.insert(contents.clone());
                let child = tree.insert_child(current, contents, blank);
                frontier.push_back(child);
            }
        }
    }

    // The state space is finite and every enqueue grows the visited set, so
    // reaching this point means the goal's parity class is unreachable.
    Err(UnsolvableError)
}

/// An ordered, printable reconstruction of a solution path.
#[derive(Clone, Debug)]
pub struct Replay {
    /// Rendered grids from the root to the terminal state, in move order.
    pub frames: Vec<String>,
    /// The number of moves, i.e. frame count minus one.
    pub path_len: usize,
}

impl Replay {
    /// Joins the frames with blank lines into the audit listing the report
    /// files carry.
    pub fn to_report(&self) -> String {
        self.frames.join("\n\n")
    }
}

/// Reconstructs the move replay ending at `terminal`.
///
/// Walks the parent chain back to the root, rendering each grid, and returns
/// the frames in root-to-terminal order together with the path length.
pub fn replay(tree: &SearchTree, terminal: NodeId) -> Replay {
    let path = tree.path_from_root(terminal);
    let frames: Vec<String> = path.iter().map(|&id| tree.grid(id).render()).collect();
    let path_len = frames.len() - 1;
    Replay { frames, path_len }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Dims;

    fn solve_contents(contents: Vec<u16>, dims: Dims) -> (SearchTree, Solution) {
        let mut tree = SearchTree::new(dims);
        let root = tree.insert_root(Grid::new(contents, dims).unwrap());
        let goal = Grid::goal(dims);
        let solution = solve_bfs(&mut tree, root, &goal).unwrap();
        (tree, solution)
    }

    #[test]
    fn test_solve_goal_root_is_trivial() {
        let dims = Dims::new(4, 4).unwrap();
        let (tree, solution) = solve_contents(dims.goal_contents(), dims);
        assert_eq!(solution.visited_count, 1);
        let trace = replay(&tree, solution.terminal);
        assert_eq!(trace.path_len, 0);
        assert_eq!(trace.frames.len(), 1);
    }

    #[test]
    fn test_solve_4x4_three_move_instance() {
        let dims = Dims::new(4, 4).unwrap();
        let (tree, solution) = solve_contents(
            vec![1, 2, 3, 4, 5, 6, 0, 8, 9, 10, 7, 12, 13, 14, 11, 15],
            dims,
        );
        assert_eq!(tree.grid(solution.terminal), &Grid::goal(dims));
        let trace = replay(&tree, solution.terminal);
        assert_eq!(trace.path_len, 3, "shortest solution takes exactly 3 moves");
        assert_eq!(trace.frames.len(), 4);
        assert!(solution.visited_count >= 4);
    }

    #[test]
    fn test_visited_count_is_distinct_arrangements() {
        // One move from the 3x3 goal. Expanding the root's other children
        // regenerates the root (up-then-down, left-then-right cycles), so
        // without global deduplication the count would exceed 8.
        //
        // By hand: root + its 3 children, then the up-child adds 3 (its down
        // move is the visited root), then the left-child adds 1 (down and
        // left are off-grid, right is the visited root), then the goal child
        // is dequeued. 1 + 3 + 3 + 1 = 8.
        let dims = Dims::new(3, 3).unwrap();
        let (tree, solution) = solve_contents(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], dims);
        let trace = replay(&tree, solution.terminal);
        assert_eq!(trace.path_len, 1);
        assert_eq!(solution.visited_count, 8);
    }

    #[test]
    fn test_unsolvable_grid_reports_error() {
        // Two adjacent tiles swapped: the opposite parity class on a 3x3,
        // small enough for BFS to exhaust all 181440 reachable states.
        let dims = Dims::new(3, 3).unwrap();
        let mut tree = SearchTree::new(dims);
        let root = tree.insert_root(Grid::new(vec![2, 1, 3, 4, 5, 6, 7, 8, 0], dims).unwrap());
        let goal = Grid::goal(dims);
        assert_eq!(solve_bfs(&mut tree, root, &goal), Err(UnsolvableError));
    }

    #[test]
    fn test_replay_frames_are_root_first() {
        let dims = Dims::new(3, 3).unwrap();
        let root_contents = vec![1, 2, 3, 4, 5, 6, 7, 0, 8];
        let (tree, solution) = solve_contents(root_contents.clone(), dims);
        let trace = replay(&tree, solution.terminal);
        let root_render = Grid::new(root_contents, dims).unwrap().render();
        assert_eq!(trace.frames.first().unwrap(), &root_render);
        assert_eq!(trace.frames.last().unwrap(), &Grid::goal(dims).render());
        let report = trace.to_report();
        assert!(report.contains("\n\n"));
    }
}
