//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Cell address on the board, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Apply toroidal wrapping for arbitrary integers.
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            row: self.row.rem_euclid(height),
            col: self.col.rem_euclid(width),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Offsets of the eight cells surrounding a position.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(&self) -> bool {
        matches!(self, CellState::Alive)
    }

    pub fn flipped(&self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }

    /// B3/S23: survive on 2 or 3 live neighbors, birth on exactly 3.
    pub fn next(&self, live_neighbors: u8) -> Self {
        match (self, live_neighbors) {
            (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
            (CellState::Dead, 3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }
}

/// Coordinates whose alive/dead state changed during one engine call.
pub type ChangedSet = BTreeSet<Coord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_wrap() {
        let coord = Coord::new(5, 5);
        assert_eq!(coord.wrap(10, 10), Coord::new(5, 5));

        let coord = Coord::new(-1, -1);
        assert_eq!(coord.wrap(10, 10), Coord::new(9, 9));

        let coord = Coord::new(10, 10);
        assert_eq!(coord.wrap(10, 10), Coord::new(0, 0));

        // Far out of range, rows follow height and columns follow width
        let coord = Coord::new(-23, 47);
        assert_eq!(coord.wrap(20, 5), Coord::new(2, 7));
    }

    #[test]
    fn test_neighbor_offsets_exclude_center() {
        assert!(!NEIGHBOR_OFFSETS.contains(&(0, 0)));
        let unique: BTreeSet<_> = NEIGHBOR_OFFSETS.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_transition_table() {
        for n in 0..=8u8 {
            let from_alive = CellState::Alive.next(n);
            let from_dead = CellState::Dead.next(n);
            assert_eq!(from_alive.is_alive(), n == 2 || n == 3, "alive with {n}");
            assert_eq!(from_dead.is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_flip() {
        assert_eq!(CellState::Dead.flipped(), CellState::Alive);
        assert_eq!(CellState::Alive.flipped().flipped(), CellState::Alive);
        assert_eq!(CellState::default(), CellState::Dead);
    }

    #[test]
    fn test_changed_set_is_row_major() {
        let set: ChangedSet = [Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)]
            .into_iter()
            .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]
        );
    }
}
