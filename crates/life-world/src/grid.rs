//! Dense 2D grid of cell states.

use life_core::{CellState, Coord, Error, Result, NEIGHBOR_OFFSETS};

/// Wrap a coordinate that is at most one step outside `[0, upper)`.
///
/// Only valid for `-1 <= n <= upper`, which covers every 3x3 neighborhood
/// lookup around an in-range cell. Arbitrary input goes through
/// [`Coord::wrap`] instead.
#[inline]
pub fn wrap(n: i32, upper: i32) -> i32 {
    debug_assert!(upper > 0 && n >= -1 && n <= upper, "wrap({n}, {upper})");
    if n < 0 {
        n + upper
    } else if n >= upper {
        n - upper
    } else {
        n
    }
}

/// A 2D toroidal grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; size],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bring any coordinate onto the board.
    pub fn normalize(&self, coord: Coord) -> Coord {
        coord.wrap(self.width, self.height)
    }

    /// Neighbor of an in-range coordinate, wrapped across the edges.
    #[inline]
    pub fn offset(&self, coord: Coord, drow: i32, dcol: i32) -> Coord {
        Coord::new(
            wrap(coord.row + drow, self.height),
            wrap(coord.col + dcol, self.width),
        )
    }

    /// Shift any coordinate by any offset and land on the board.
    pub fn translate(&self, coord: Coord, drow: i32, dcol: i32) -> Coord {
        let row = (coord.row as i64 + drow as i64).rem_euclid(self.height as i64);
        let col = (coord.col as i64 + dcol as i64).rem_euclid(self.width as i64);
        Coord::new(row as i32, col as i32)
    }

    /// The wrapped 3x3 block centered on `coord`, center included.
    pub fn neighborhood(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        (-1..=1).flat_map(move |drow| (-1..=1).map(move |dcol| self.offset(coord, drow, dcol)))
    }

    /// The eight wrapped cells surrounding `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(drow, dcol)| self.offset(coord, drow, dcol))
    }

    /// Number of live cells among the eight neighbors of an in-range coordinate.
    pub fn alive_neighbor_count(&self, coord: Coord) -> u8 {
        self.neighbors(coord)
            .filter(|&n| self.get(n).is_alive())
            .count() as u8
    }

    /// State at an in-range coordinate
    #[inline]
    pub fn get(&self, coord: Coord) -> CellState {
        self.cells[self.coord_to_index(coord)]
    }

    /// Set the state at an in-range coordinate, returning the previous state
    #[inline]
    pub fn set(&mut self, coord: Coord, state: CellState) -> CellState {
        let index = self.coord_to_index(coord);
        std::mem::replace(&mut self.cells[index], state)
    }

    /// Mark every cell dead.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    fn coord_to_index(&self, coord: Coord) -> usize {
        debug_assert!(
            (0..self.height).contains(&coord.row) && (0..self.width).contains(&coord.col),
            "coordinate {coord} outside {}x{}",
            self.width,
            self.height
        );
        (coord.row * self.width + coord.col) as usize
    }

    /// Get coordinate from index
    pub fn index_to_coord(&self, index: usize) -> Coord {
        let row = (index as i32) / self.width;
        let col = (index as i32) % self.width;
        Coord::new(row, col)
    }

    /// Iterator over all cells with coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (self.index_to_coord(i), state))
    }

    /// Iterator over live coordinates, row-major
    pub fn alive(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|(_, state)| state.is_alive())
            .map(|(coord, _)| coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_single_step() {
        assert_eq!(wrap(-1, 7), 6);
        assert_eq!(wrap(7, 7), 0);
        assert_eq!(wrap(0, 7), 0);
        assert_eq!(wrap(3, 7), 3);
        assert_eq!(wrap(-1, 1), 0);
        assert_eq!(wrap(1, 1), 0);
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 4).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.len(), 40);
        assert_eq!(grid.alive().count(), 0);
    }

    #[test]
    fn test_grid_rejects_empty_dimensions() {
        assert!(matches!(Grid::new(0, 5), Err(Error::InvalidConfig(_))));
        assert!(matches!(Grid::new(5, -2), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_toroidal_neighbors() {
        let grid = Grid::new(10, 10).unwrap();
        let corner: Vec<_> = grid.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(corner.len(), 8);
        assert!(corner.contains(&Coord::new(9, 9)));
        assert!(corner.contains(&Coord::new(0, 9)));
        assert!(corner.contains(&Coord::new(9, 0)));
        assert!(corner.contains(&Coord::new(1, 1)));
        assert!(!corner.contains(&Coord::new(0, 0)));

        let block: Vec<_> = grid.neighborhood(Coord::new(9, 9)).collect();
        assert_eq!(block.len(), 9);
        assert!(block.contains(&Coord::new(9, 9)));
        assert!(block.contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_alive_neighbor_count_wraps() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(Coord::new(4, 4), CellState::Alive);
        grid.set(Coord::new(0, 4), CellState::Alive);
        grid.set(Coord::new(1, 1), CellState::Alive);

        assert_eq!(grid.alive_neighbor_count(Coord::new(0, 0)), 3);
        // Never counts the cell itself
        assert_eq!(grid.alive_neighbor_count(Coord::new(4, 4)), 1);
        assert_eq!(grid.alive_neighbor_count(Coord::new(2, 2)), 1);
    }

    #[test]
    fn test_translate_extreme_values() {
        let grid = Grid::new(50, 25).unwrap();
        assert_eq!(grid.translate(Coord::new(i32::MAX, 0), 0, 0), Coord::new(22, 0));
        assert_eq!(grid.translate(Coord::new(i32::MAX, 0), 2, 0), Coord::new(24, 0));
        assert_eq!(grid.translate(Coord::new(0, i32::MIN), 0, -1), Coord::new(0, 1));
        assert_eq!(grid.translate(Coord::new(3, 4), -4, 47), Coord::new(24, 1));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut grid = Grid::new(3, 3).unwrap();
        let c = Coord::new(1, 2);
        assert_eq!(grid.set(c, CellState::Alive), CellState::Dead);
        assert_eq!(grid.set(c, CellState::Alive), CellState::Alive);
        assert_eq!(grid.index_to_coord(5), c);
        grid.clear();
        assert_eq!(grid.get(c), CellState::Dead);
    }
}
