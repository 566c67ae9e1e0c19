use crate::engine::{Dims, Grid, InvalidGridError};
use thiserror::Error;

/// Error raised while parsing board text into a [`Grid`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseGridError {
    /// A token that is not a non-negative integer tile label.
    #[error("unrecognized tile label {0:?}")]
    BadToken(String),
    /// The labels parsed but violate the grid content invariant.
    #[error(transparent)]
    Grid(#[from] InvalidGridError),
}

/// Parses whitespace-separated tile labels into a validated `Grid`.
///
/// Labels are read in row-major order; any line layout works, so both the
/// one-line form `1 2 3 4 5 6 7 8 0` and the output of [`Grid::render`]
/// parse. The blank is written as `0`.
///
/// # Arguments
/// * `text`: The board text, e.g. the contents of a board file.
/// * `dims`: The dimensions the parsed contents must fill.
///
/// # Returns
/// * `Ok(Grid)` when every token parses and the contents satisfy the grid
///   invariant for `dims`.
/// * `Err(ParseGridError)` on the first malformed token, or on a length,
///   blank, duplicate or range violation.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::{Dims, Grid};
/// use npuzzle_solver::utils::grid_from_str;
///
/// let dims = Dims::new(3, 3).unwrap();
/// let grid = grid_from_str("1 2 3\n4 5 6\n7 8 0", dims).unwrap();
/// assert_eq!(grid, Grid::goal(dims));
/// assert!(grid_from_str("1 2 x", dims).is_err());
/// ```
pub fn grid_from_str(text: &str, dims: Dims) -> Result<Grid, ParseGridError> {
    let mut contents = Vec::with_capacity(dims.area());
    for token in text.split_whitespace() {
        let tile: u16 = token
            .parse()
            .map_err(|_| ParseGridError::BadToken(token.to_string()))?;
        contents.push(tile);
    }
    Ok(Grid::new(contents, dims)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_valid() {
        let dims = Dims::new(3, 3).unwrap();
        let grid = grid_from_str("1 2 3 4 5 6 7 8 0", dims).unwrap();
        assert_eq!(grid, Grid::goal(dims));
    }

    #[test]
    fn test_grid_from_str_round_trips_render() {
        let dims = Dims::new(4, 4).unwrap();
        let grid = Grid::new(
            vec![1, 2, 3, 4, 5, 6, 0, 8, 9, 10, 7, 12, 13, 14, 11, 15],
            dims,
        )
        .unwrap();
        let reparsed = grid_from_str(&grid.render(), dims).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_grid_from_str_bad_token() {
        let dims = Dims::new(3, 3).unwrap();
        let result = grid_from_str("1 2 3 4 x 6 7 8 0", dims);
        assert_eq!(result, Err(ParseGridError::BadToken("x".to_string())));
    }

    #[test]
    fn test_grid_from_str_negative_label_is_rejected() {
        let dims = Dims::new(3, 3).unwrap();
        // u16 labels: a sign makes the token unparseable, not a range error.
        let result = grid_from_str("-1 2 3 4 5 6 7 8 0", dims);
        assert_eq!(result, Err(ParseGridError::BadToken("-1".to_string())));
    }

    #[test]
    fn test_grid_from_str_invariant_violations_propagate() {
        let dims = Dims::new(3, 3).unwrap();
        assert_eq!(
            grid_from_str("1 2 3", dims),
            Err(ParseGridError::Grid(InvalidGridError::WrongLength {
                expected: 9,
                found: 3
            }))
        );
        assert_eq!(
            grid_from_str("1 1 3 4 5 6 7 8 0", dims),
            Err(ParseGridError::Grid(InvalidGridError::DuplicateTile(1)))
        );
    }
}
