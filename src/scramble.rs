//! Generation of solvable puzzle instances.
//!
//! Two strategies: a bounded walk of random reverse moves away from the goal
//! (difficulty capped by the move count), and a full shuffle retried until
//! the parity test admits a solution.

use crate::engine::{Grid, Move, NodeId, SearchTree};
use rand::seq::SliceRandom;
use rand::Rng;

/// Scrambles the goal arrangement by `num_moves` random legal slides.
///
/// Each step picks uniformly among the blank's legal moves and accepts the
/// result unconditionally; revisiting an earlier arrangement is harmless
/// because only the final one matters. The resulting state is detached from
/// the chain that produced it and returned as an independent root, so the
/// solver cannot see the scramble path.
///
/// Because each step is undone by its opposite move, the shortest solution
/// of the returned instance is at most `num_moves` long (it is often
/// shorter). With `num_moves == 0` the root is the goal itself.
///
/// # Panics
/// Panics if a state ever has zero legal moves. `Dims::new` rejects any side
/// of 2 or less, which guarantees at least two legal moves everywhere, so
/// hitting this indicates a broken upstream invariant rather than bad input.
pub fn pseudo_random_scramble(
    tree: &mut SearchTree,
    num_moves: usize,
    rng: &mut impl Rng,
) -> NodeId {
    let dims = tree.dims();
    let mut current = tree.insert_root(Grid::goal(dims));

    for _ in 0..num_moves {
        let legal: Vec<(Vec<u16>, usize)> = Move::ALL
            .iter()
            .filter_map(|&mv| tree.slide(current, mv))
            .collect();
        current = match legal.choose(rng) {
            Some((contents, blank)) => tree.insert_child(current, contents.clone(), *blank),
            None => unreachable!("a blank on a grid wider and taller than 2 always has a legal move"),
        };
    }

    tree.detach(current);
    current
}

/// Shuffles the full tile set and inserts the result as a root.
///
/// A uniform shuffle lands in the unsolvable parity class half the time, so
/// the shuffle is retried until `Grid::is_solvable` accepts it. The returned
/// root therefore always admits a solution, unlike an explicitly supplied
/// arrangement.
pub fn random_shuffle(tree: &mut SearchTree, rng: &mut impl Rng) -> NodeId {
    let dims = tree.dims();
    let mut contents = dims.goal_contents();
    loop {
        contents.shuffle(rng);
        let grid = Grid::new(contents.clone(), dims)
            .expect("shuffling permutes a valid tile set");
        if grid.is_solvable() {
            return tree.insert_root(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Dims;
    use crate::solver::{replay, solve_bfs};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_scramble_zero_moves_is_goal() {
        let dims = Dims::new(4, 4).unwrap();
        let mut tree = SearchTree::new(dims);
        let mut rng = SmallRng::seed_from_u64(7);
        let root = pseudo_random_scramble(&mut tree, 0, &mut rng);
        assert_eq!(tree.grid(root), &Grid::goal(dims));

        let solution = solve_bfs(&mut tree, root, &Grid::goal(dims)).unwrap();
        assert_eq!(solution.visited_count, 1);
        assert_eq!(replay(&tree, solution.terminal).path_len, 0);
    }

    #[test]
    fn test_scramble_returns_detached_root() {
        let dims = Dims::new(3, 3).unwrap();
        let mut tree = SearchTree::new(dims);
        let mut rng = SmallRng::seed_from_u64(11);
        let root = pseudo_random_scramble(&mut tree, 6, &mut rng);
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.path_from_root(root), vec![root]);
    }

    #[test]
    fn test_scramble_distance_bounds_solution_length() {
        let dims = Dims::new(3, 3).unwrap();
        let goal = Grid::goal(dims);
        for num_moves in [1, 2, 5, 8, 12] {
            for seed in 0..4 {
                let mut tree = SearchTree::new(dims);
                let mut rng = SmallRng::seed_from_u64(seed);
                let root = pseudo_random_scramble(&mut tree, num_moves, &mut rng);
                let solution = solve_bfs(&mut tree, root, &goal)
                    .expect("scrambles are solvable by construction");
                let trace = replay(&tree, solution.terminal);
                assert!(
                    trace.path_len <= num_moves,
                    "scramble of {} moves solved in {} moves",
                    num_moves,
                    trace.path_len
                );
            }
        }
    }

    #[test]
    fn test_scramble_is_deterministic_per_seed() {
        let dims = Dims::new(4, 4).unwrap();
        let mut tree_a = SearchTree::new(dims);
        let mut tree_b = SearchTree::new(dims);
        let root_a =
            pseudo_random_scramble(&mut tree_a, 20, &mut SmallRng::seed_from_u64(99));
        let root_b =
            pseudo_random_scramble(&mut tree_b, 20, &mut SmallRng::seed_from_u64(99));
        assert_eq!(tree_a.grid(root_a), tree_b.grid(root_b));
    }

    #[test]
    fn test_random_shuffle_is_solvable() {
        let dims = Dims::new(3, 3).unwrap();
        for seed in 0..8 {
            let mut tree = SearchTree::new(dims);
            let mut rng = SmallRng::seed_from_u64(seed);
            let root = random_shuffle(&mut tree, &mut rng);
            assert!(tree.grid(root).is_solvable());
            assert_eq!(tree.parent(root), None);
        }
    }
}
