//! Goal grid model: coordinates, bounds and cell labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MegaverseError, Result};
use crate::shape::{Shape, ShapeKind};

/// Label of an empty cell.
pub const SPACE_LABEL: &str = "space";

/// Separator between attribute and kind in composite labels (`blue_soloon`).
pub const LABEL_SEPARATOR: char = '_';

/// A (row, column) position. Signed so that invalid input can be represented
/// and rejected by [`GridBounds::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i64,
    pub column: i64,
}

impl Coordinate {
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row={}, column={}", self.row, self.column)
    }
}

/// Dimensions of the grid currently being drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: usize,
    pub columns: usize,
}

impl GridBounds {
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// `0 <= row < rows` and `0 <= column < columns`.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let in_range = |value: i64, limit: usize| usize::try_from(value).is_ok_and(|v| v < limit);
        in_range(coordinate.row, self.rows) && in_range(coordinate.column, self.columns)
    }

    pub fn check(&self, coordinate: Coordinate) -> Result<()> {
        if self.contains(coordinate) {
            Ok(())
        } else {
            Err(MegaverseError::out_of_bounds(
                coordinate.row,
                coordinate.column,
                self.rows,
                self.columns,
            ))
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(11, 11)
    }
}

/// Classification of a single goal-map label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Space,
    Shape(Shape),
    /// A label whose kind token is neither `soloon` nor `cometh`, or which
    /// does not split into exactly `<attribute>_<kind>`.
    Unrecognized(String),
}

impl Cell {
    /// Classify a label. Matching is case-insensitive and attribute values
    /// are returned lower-cased.
    pub fn parse(label: &str) -> Self {
        let lower = label.trim().to_ascii_lowercase();
        if lower == SPACE_LABEL {
            return Self::Space;
        }
        if lower == ShapeKind::Polyanet.label_token() {
            return Self::Shape(Shape::Polyanet);
        }

        let parts: Vec<&str> = lower.split(LABEL_SEPARATOR).collect();
        match parts.as_slice() {
            [attribute, kind] if !attribute.is_empty() => {
                if *kind == ShapeKind::Soloon.label_token() {
                    Self::Shape(Shape::soloon(*attribute))
                } else if *kind == ShapeKind::Cometh.label_token() {
                    Self::Shape(Shape::cometh(*attribute))
                } else {
                    Self::Unrecognized(lower)
                }
            }
            _ => Self::Unrecognized(lower),
        }
    }
}

/// Wire format of `GET /api/map/{candidateId}/goal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalMap {
    pub goal: Vec<Vec<String>>,
}

/// Rectangular grid of cell labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid, rejecting rows whose length differs from the first row.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, found)) = rows
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|(_, len)| *len != expected)
            {
                return Err(MegaverseError::RaggedGrid {
                    row,
                    expected,
                    found,
                });
            }
        }
        Ok(Self { rows })
    }

    /// Rows = outer length, columns = length of the first row.
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<&str> {
        let row = usize::try_from(coordinate.row).ok()?;
        let column = usize::try_from(coordinate.column).ok()?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &str)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, label)| (Coordinate::new(r as i64, c as i64), label.as_str()))
        })
    }
}

impl TryFrom<GoalMap> for Grid {
    type Error = MegaverseError;

    fn try_from(map: GoalMap) -> Result<Self> {
        Self::from_rows(map.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = GridBounds::new(3, 4);
        assert!(bounds.contains(Coordinate::new(0, 0)));
        assert!(bounds.contains(Coordinate::new(2, 3)));
        assert!(!bounds.contains(Coordinate::new(3, 0)));
        assert!(!bounds.contains(Coordinate::new(0, 4)));
        assert!(!bounds.contains(Coordinate::new(-1, 0)));
        assert!(!bounds.contains(Coordinate::new(0, -1)));
        assert!(!GridBounds::new(0, 0).contains(Coordinate::new(0, 0)));
    }

    #[test]
    fn test_parse_cells() {
        assert_eq!(Cell::parse("SPACE"), Cell::Space);
        assert_eq!(Cell::parse("POLYANET"), Cell::Shape(Shape::Polyanet));
        assert_eq!(Cell::parse("BLUE_SOLOON"), Cell::Shape(Shape::soloon("blue")));
        assert_eq!(Cell::parse("north_cometh"), Cell::Shape(Shape::cometh("north")));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(
            Cell::parse("green_moon"),
            Cell::Unrecognized("green_moon".into())
        );
        assert!(matches!(Cell::parse("saturn"), Cell::Unrecognized(_)));
        assert!(matches!(Cell::parse("_soloon"), Cell::Unrecognized(_)));
        assert!(matches!(Cell::parse("big_red_soloon"), Cell::Unrecognized(_)));
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let err = Grid::from_rows(grid(&[&["space", "space"], &["space"]])).unwrap_err();
        assert!(matches!(
            err,
            MegaverseError::RaggedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_cells_row_major() {
        let g = Grid::from_rows(grid(&[&["a", "b"], &["c", "d"]])).unwrap();
        assert_eq!(g.bounds(), GridBounds::new(2, 2));
        let order: Vec<&str> = g.cells().map(|(_, label)| label).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
        assert_eq!(g.get(Coordinate::new(1, 0)), Some("c"));
        assert_eq!(g.get(Coordinate::new(-1, 0)), None);
    }

    #[test]
    fn test_empty_grid() {
        let g = Grid::from_rows(Vec::new()).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.bounds(), GridBounds::new(0, 0));
    }
}
