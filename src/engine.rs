//! Core state engine for the sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Dims`: Validated grid dimensions and the goal arrangement derived from
//!   them.
//! - `Move`: The four blank-tile slides, their fixed candidate order and
//!   flat-index arithmetic.
//! - `Grid`: An immutable tile arrangement with validation, rendering and a
//!   permutation-parity solvability test.
//! - `SearchTree`: An index-addressed arena of search states, each holding a
//!   grid, the blank's flat position and an optional parent link used for
//!   path reconstruction.

use std::fmt;
use thiserror::Error;

/// Error raised when a grid's content invariant is violated at construction.
///
/// A valid grid of area `n` holds exactly the values `0..n`, each once, where
/// `0` is the blank. Both dimensions must exceed 2 so that the blank always
/// has at least two legal moves.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidGridError {
    /// One or both dimensions are 2 or smaller.
    #[error("grid dimensions {width}x{height} too small; both sides must exceed 2")]
    DimensionTooSmall { width: usize, height: usize },
    /// The content list does not match the grid area.
    #[error("grid has {found} tiles, expected {expected}")]
    WrongLength { expected: usize, found: usize },
    /// No `0` tile present.
    #[error("grid has no blank (0) tile")]
    MissingBlank,
    /// The same label appears more than once.
    #[error("tile {0} appears more than once")]
    DuplicateTile(u16),
    /// A label outside `0..area`.
    #[error("tile {tile} is outside the valid range 0..={max}")]
    TileOutOfRange { tile: u16, max: u16 },
}

/// Validated grid dimensions.
///
/// `Dims` is the single configuration value threaded through every search,
/// scramble and render call; the goal arrangement is derived from it rather
/// than kept in ambient state.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Dims;
/// let dims = Dims::new(4, 4).unwrap();
/// assert_eq!(dims.area(), 16);
/// assert!(Dims::new(2, 5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    width: usize,
    height: usize,
}

impl Dims {
    /// Creates dimensions, rejecting any side of 2 or less.
    ///
    /// The lower bound is what makes the scramble generator total: on a grid
    /// wider and taller than 2 the blank always has at least two legal moves.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidGridError> {
        if width <= 2 || height <= 2 {
            return Err(InvalidGridError::DimensionTooSmall { width, height });
        }
        Ok(Dims { width, height })
    }

    /// Returns the grid width (tiles per row).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the total number of cells, `width * height`.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns the canonical goal contents `[1, 2, .., area-1, 0]`.
    pub fn goal_contents(&self) -> Vec<u16> {
        let area = self.area();
        (1..area as u16).chain(std::iter::once(0)).collect()
    }
}

/// One of the four blank-tile slides.
///
/// A move names the direction the blank travels; the displaced tile moves the
/// opposite way. Candidate moves are always evaluated in the fixed order
/// [`Move::ALL`], which pins down which of several equal-length solutions the
/// solver returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order the solver and scrambler try them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the move that undoes this one.
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable tile arrangement.
///
/// Equality and hashing consider only the contents (dimensions are fixed for
/// a run), which is exactly the visited-set key the solver needs: two move
/// sequences reaching the same arrangement collapse to one state.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Dims, Grid};
/// let dims = Dims::new(3, 3).unwrap();
/// let grid = Grid::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 0], dims).unwrap();
/// assert_eq!(grid.blank_index(), 8);
/// assert_eq!(grid, Grid::goal(dims));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    dims: Dims,
    contents: Vec<u16>,
}

impl Grid {
    /// Creates a grid from a content list, validating that the values are
    /// exactly `{0, 1, .., area-1}`.
    ///
    /// # Arguments
    /// * `contents`: Flat row-major tile labels; `0` is the blank.
    /// * `dims`: The grid dimensions the contents must fill.
    ///
    /// # Returns
    /// * `Ok(Grid)` when the contents are a permutation of `0..area`.
    /// * `Err(InvalidGridError)` on a length mismatch, a missing blank, a
    ///   duplicated label or a label out of range.
    pub fn new(contents: Vec<u16>, dims: Dims) -> Result<Self, InvalidGridError> {
        let area = dims.area();
        if contents.len() != area {
            return Err(InvalidGridError::WrongLength {
                expected: area,
                found: contents.len(),
            });
        }
        if !contents.contains(&0) {
            return Err(InvalidGridError::MissingBlank);
        }
        let mut seen = vec![false; area];
        for &tile in &contents {
            if tile as usize >= area {
                return Err(InvalidGridError::TileOutOfRange {
                    tile,
                    max: (area - 1) as u16,
                });
            }
            if seen[tile as usize] {
                return Err(InvalidGridError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
        }
        Ok(Grid { dims, contents })
    }

    /// Returns the canonical sorted arrangement for the given dimensions.
    pub fn goal(dims: Dims) -> Self {
        Grid {
            dims,
            contents: dims.goal_contents(),
        }
    }

    /// Returns the grid's dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Returns the flat row-major contents.
    pub fn contents(&self) -> &[u16] {
        &self.contents
    }

    /// Returns the flat index of the blank (`0`) tile.
    pub fn blank_index(&self) -> usize {
        self.contents
            .iter()
            .position(|&t| t == 0)
            .expect("grid invariant: exactly one blank tile")
    }

    /// Tests whether the goal arrangement is reachable from this one.
    ///
    /// Uses the permutation-parity argument: a horizontal slide changes
    /// neither the inversion count nor the blank's row; a vertical slide
    /// moves one tile past `width - 1` others. For odd widths the inversion
    /// parity is therefore invariant, and for even widths the parity of
    /// `inversions + blank_row` is. The arrangement is solvable iff the
    /// invariant matches the goal's.
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.contents);
        if self.dims.width % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_row = self.blank_index() / self.dims.width;
            (inversions + blank_row) % 2 == (self.dims.height - 1) % 2
        }
    }

    /// Renders the grid as `height` lines of left-aligned labels.
    ///
    /// Columns are sized from the largest label so grids beyond 10x10 stay
    /// aligned; trailing whitespace is trimmed from every line. The output
    /// parses back through `utils::grid_from_str`.
    pub fn render(&self) -> String {
        let col = (self.dims.area() - 1).to_string().len();
        self.contents
            .chunks(self.dims.width)
            .map(|row| {
                row.iter()
                    .map(|t| format!("{:<col$}", t))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    /// Formats the grid via [`Grid::render`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Counts ordered pairs of non-blank labels that appear out of order.
fn count_inversions(contents: &[u16]) -> usize {
    let mut inversions = 0;
    for (i, &a) in contents.iter().enumerate() {
        if a == 0 {
            continue;
        }
        for &b in &contents[i + 1..] {
            if b != 0 && b < a {
                inversions += 1;
            }
        }
    }
    inversions
}

/// Index of a state inside a [`SearchTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    grid: Grid,
    blank: usize,
    parent: Option<NodeId>,
}

/// An arena of search states with parent back-links.
///
/// States form a tree: every node records the node that produced it by one
/// move (roots record none). Storing nodes in a flat `Vec` and linking by
/// index avoids ownership cycles and makes path reconstruction a cheap walk
/// of parent indices.
///
/// The tree is local to one search or scramble; concurrent solves each own a
/// fresh tree.
#[derive(Clone, Debug)]
pub struct SearchTree {
    dims: Dims,
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Creates an empty arena for grids of the given dimensions.
    pub fn new(dims: Dims) -> Self {
        SearchTree {
            dims,
            nodes: Vec::new(),
        }
    }

    /// Returns the dimensions every grid in this tree has.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Returns the number of states allocated in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no state has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a grid as a parentless root state.
    pub fn insert_root(&mut self, grid: Grid) -> NodeId {
        let blank = grid.blank_index();
        self.push(Node {
            grid,
            blank,
            parent: None,
        })
    }

    /// Computes the arrangement produced by sliding the blank, without
    /// allocating a node.
    ///
    /// Returns `None` (not an error) when the blank sits on the edge the
    /// move would cross:
    /// - up: blank in the top row (`blank < width`)
    /// - down: blank in the bottom row (`blank >= area - width`)
    /// - left: blank in the left column (`blank % width == 0`)
    /// - right: blank in the right column (`blank % width == width - 1`)
    ///
    /// Otherwise returns the child contents (blank and target swapped) and
    /// the blank's new flat index. The split from [`SearchTree::insert_child`]
    /// lets the solver consult its visited set before allocating.
    pub fn slide(&self, id: NodeId, mv: Move) -> Option<(Vec<u16>, usize)> {
        let node = &self.nodes[id.0];
        let width = self.dims.width;
        let area = self.dims.area();
        let blank = node.blank;
        let target = match mv {
            Move::Up if blank >= width => blank - width,
            Move::Down if blank < area - width => blank + width,
            Move::Left if blank % width != 0 => blank - 1,
            Move::Right if blank % width != width - 1 => blank + 1,
            _ => return None,
        };
        let mut contents = node.grid.contents.clone();
        contents.swap(blank, target);
        Some((contents, target))
    }

    /// Inserts an arrangement produced by [`SearchTree::slide`] as a child of
    /// `parent`.
    ///
    /// `contents` must come from a `slide` on this tree; the grid invariant
    /// is preserved by the swap, so no re-validation happens here.
    pub fn insert_child(&mut self, parent: NodeId, contents: Vec<u16>, blank: usize) -> NodeId {
        let grid = Grid {
            dims: self.dims,
            contents,
        };
        self.push(Node {
            grid,
            blank,
            parent: Some(parent),
        })
    }

    /// Slides the blank and records the resulting state in one step.
    ///
    /// Returns `None` when the move is out of bounds. This is the scrambler's
    /// entry point; the solver uses the `slide`/`insert_child` pair instead
    /// so duplicate arrangements never reach the arena.
    pub fn apply(&mut self, id: NodeId, mv: Move) -> Option<NodeId> {
        let (contents, blank) = self.slide(id, mv)?;
        Some(self.insert_child(id, contents, blank))
    }

    /// Returns the grid of a state.
    pub fn grid(&self, id: NodeId) -> &Grid {
        &self.nodes[id.0].grid
    }

    /// Returns the blank's flat index in a state.
    pub fn blank(&self, id: NodeId) -> usize {
        self.nodes[id.0].blank
    }

    /// Returns the state that produced `id`, or `None` for roots.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Clears a state's parent link, making it a root.
    ///
    /// The scrambler uses this to hand a generated arrangement to the solver
    /// without the reverse-move chain that produced it.
    pub fn detach(&mut self, id: NodeId) {
        self.nodes[id.0].parent = None;
    }

    /// Returns the path of states from the root down to `id`, inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}
