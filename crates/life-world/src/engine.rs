//! Incremental Game of Life engine on a toroidal grid.
//!
//! Alongside the dense grid the engine keeps an active set: every live cell
//! plus every cell with at least one live neighbor. Only those cells can
//! change on the next generation, so [`GridEngine::step`] visits the active
//! set instead of the full board.

use crate::grid::Grid;
use crate::pattern::Pattern;
use life_core::{CellState, ChangedSet, Coord, GridConfig, Result, SeedConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, instrument, trace};

/// Game of Life board that only re-examines cells near live ones each step.
pub struct GridEngine {
    grid: Grid,
    active: HashSet<Coord>,
    generation: u64,
}

/// Serializable view of the board for display layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    pub generation: u64,
    pub population: usize,
    pub alive: Vec<Coord>,
}

impl GridEngine {
    /// Create an all-dead board. Fails if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let grid = Grid::new(width, height)?;
        debug!(width, height, "Created engine");
        Ok(Self {
            grid,
            active: HashSet::new(),
            generation: 0,
        })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn population(&self) -> usize {
        self.grid.alive().count()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Whether `coord` will be examined by the next step
    pub fn is_active(&self, coord: Coord) -> bool {
        self.active.contains(&self.grid.normalize(coord))
    }

    /// State of the cell at `(row, col)`, wrapped onto the board
    pub fn state_of(&self, row: i32, col: i32) -> CellState {
        self.grid.get(self.grid.normalize(Coord::new(row, col)))
    }

    /// Live cells among the eight wrapped neighbors of `(row, col)`
    pub fn alive_neighbor_count(&self, row: i32, col: i32) -> u8 {
        self.grid
            .alive_neighbor_count(self.grid.normalize(Coord::new(row, col)))
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.grid.alive()
    }

    /// Kill every cell. Returns the cells that were alive.
    pub fn reset(&mut self) -> ChangedSet {
        let changed: ChangedSet = self.grid.alive().collect();
        self.grid.clear();
        self.active.clear();
        self.generation = 0;
        debug!(cleared = changed.len(), "Board reset");
        changed
    }

    /// Flip one cell. Coordinates outside the board wrap around.
    pub fn toggle(&mut self, row: i32, col: i32) -> ChangedSet {
        let target = self.grid.normalize(Coord::new(row, col));
        if self.grid.get(target).is_alive() {
            self.kill(target);
        } else {
            self.revive(target);
        }
        trace!(%target, state = ?self.grid.get(target), "Toggled cell");
        ChangedSet::from([target])
    }

    /// Advance one generation. Returns the cells whose state changed.
    #[instrument(skip(self), fields(generation = self.generation, active = self.active.len()))]
    pub fn step(&mut self) -> ChangedSet {
        let mut pending = Vec::new();
        let mut next_active = HashSet::with_capacity(self.active.len());

        // Every count is taken against the previous generation; nothing is
        // written to the grid until the scan is complete.
        for &coord in &self.active {
            let neighbors = self.grid.alive_neighbor_count(coord);
            let current = self.grid.get(coord);
            let next = current.next(neighbors);
            if next != current {
                pending.push((coord, next));
            }
            if neighbors != 0 {
                next_active.extend(self.grid.neighborhood(coord));
            }
        }

        let mut changed = ChangedSet::new();
        for (coord, state) in pending {
            self.grid.set(coord, state);
            changed.insert(coord);
        }

        self.active = next_active;
        self.generation += 1;

        debug!(
            changed = changed.len(),
            next_active = self.active.len(),
            "Generation {} complete",
            self.generation
        );
        changed
    }

    /// Clear the board and seed each cell alive with probability `density`.
    ///
    /// Returns every cell whose state differs from before the call.
    pub fn randomize(&mut self, seed: &SeedConfig) -> Result<ChangedSet> {
        seed.validate()?;

        let before: BTreeSet<Coord> = self.grid.alive().collect();
        self.grid.clear();
        self.active.clear();
        self.generation = 0;

        let mut rng = ChaCha8Rng::seed_from_u64(seed.seed);
        for index in 0..self.grid.len() {
            if rng.gen_bool(seed.density) {
                let coord = self.grid.index_to_coord(index);
                self.revive(coord);
            }
        }

        let after: BTreeSet<Coord> = self.grid.alive().collect();
        info!(
            seed = seed.seed,
            density = seed.density,
            population = after.len(),
            "Randomized board"
        );
        Ok(before.symmetric_difference(&after).copied().collect())
    }

    /// Stamp a pattern with its top-left corner at `origin`. Cells already
    /// alive are left alone; returns the cells that were brought to life.
    pub fn load_pattern(&mut self, pattern: &Pattern, origin: Coord) -> ChangedSet {
        let mut changed = ChangedSet::new();
        for cell in &pattern.cells {
            let coord = self.grid.translate(origin, cell.row, cell.col);
            if !self.grid.get(coord).is_alive() {
                self.revive(coord);
                changed.insert(coord);
            }
        }
        debug!(pattern = %pattern.name, %origin, added = changed.len(), "Loaded pattern");
        changed
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let alive: Vec<Coord> = self.grid.alive().collect();
        GridSnapshot {
            width: self.width(),
            height: self.height(),
            generation: self.generation,
            population: alive.len(),
            alive,
        }
    }

    /// Next generation computed over every cell, ignoring the active set.
    pub fn full_scan_next(&self) -> Grid {
        let mut next = self.grid.clone();
        for (coord, state) in self.grid.iter() {
            next.set(coord, state.next(self.grid.alive_neighbor_count(coord)));
        }
        next
    }

    /// Dead -> alive. The whole 3x3 block gains a live neighbor (or is the
    /// new cell), so all of it must be examined next step.
    fn revive(&mut self, target: Coord) {
        self.grid.set(target, CellState::Alive);
        self.active.extend(self.grid.neighborhood(target));
    }

    /// Alive -> dead. Neighbors left dead with no live neighbors cannot
    /// change next step and are dropped from the active set. The target
    /// itself stays; the next step discards it if it is still idle.
    fn kill(&mut self, target: Coord) {
        self.grid.set(target, CellState::Dead);
        for neighbor in self.grid.neighbors(target) {
            if neighbor != target
                && !self.grid.get(neighbor).is_alive()
                && self.grid.alive_neighbor_count(neighbor) == 0
            {
                self.active.remove(&neighbor);
            }
        }
    }
}
