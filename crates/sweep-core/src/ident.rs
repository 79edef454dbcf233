// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for grid cells and references.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Canonical 256-bit digest used for snapshot hashing.
pub type Hash = [u8; 32];

/// Coordinate identifier of a single grid cell.
///
/// A cell's id is its `(row, col)` position, so the id is permanent for the
/// session; only the node's kind, root flag and status change over time.
/// Ordering is row-major, which gives deterministic iteration in maps.
///
/// With the `serde` feature the id serializes as its `row-col` string, so it
/// can key a JSON object.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct CellId {
    /// Zero-based row.
    pub row: u16,
    /// Zero-based column.
    pub col: u16,
}

/// Produces the stable id for the cell at `(row, col)`.
pub fn coordinate_id(row: u16, col: u16) -> CellId {
    CellId { row, col }
}

impl CellId {
    /// Row-major linear index of this cell in a `grid_size × grid_size` grid.
    pub fn index(self, grid_size: usize) -> usize {
        usize::from(self.row) * grid_size + usize::from(self.col)
    }

    /// Inverse of [`CellId::index`]. Returns `None` when `index` lies outside
    /// the grid.
    pub fn from_index(index: usize, grid_size: usize) -> Option<Self> {
        if grid_size == 0 || index >= grid_size * grid_size {
            return None;
        }
        let row = u16::try_from(index / grid_size).ok()?;
        let col = u16::try_from(index % grid_size).ok()?;
        Some(Self { row, col })
    }

    /// Returns `true` when both coordinates lie in `[0, grid_size)`.
    pub fn in_bounds(self, grid_size: usize) -> bool {
        usize::from(self.row) < grid_size && usize::from(self.col) < grid_size
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error returned when a `row-col` string cannot be parsed into a [`CellId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell id {0:?}: expected `row-col`")]
pub struct ParseCellIdError(pub String);

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellIdError(s.to_owned());
        let (row, col) = s.trim().split_once('-').ok_or_else(err)?;
        let row = row.parse::<u16>().map_err(|_| err())?;
        let col = col.parse::<u16>().map_err(|_| err())?;
        Ok(Self { row, col })
    }
}

impl From<CellId> for String {
    fn from(id: CellId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CellId {
    type Error = ParseCellIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Identifier for a directed reference.
///
/// Allocated monotonically by [`crate::HeapGraph`]; never reused within a
/// session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn index_round_trips_over_whole_grid() {
        for i in 0..36 {
            let id = CellId::from_index(i, 6).unwrap();
            assert_eq!(id.index(6), i);
            assert!(id.in_bounds(6));
        }
        assert_eq!(CellId::from_index(36, 6), None);
    }

    #[test]
    fn display_and_parse_use_row_dash_col() {
        let id = coordinate_id(2, 5);
        assert_eq!(id.to_string(), "2-5");
        assert_eq!("2-5".parse::<CellId>(), Ok(id));
        assert!("2:5".parse::<CellId>().is_err());
        assert!("-5".parse::<CellId>().is_err());
        assert_eq!(CellId::try_from(String::from(id)), Ok(id));
    }
}
