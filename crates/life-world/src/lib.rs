//! Simulation engine for the toroidal board.
//!
//! [`GridEngine`] owns the cell grid together with the set of cells that need
//! to be examined on the next generation, so a step only visits the
//! neighborhood of live cells instead of the whole board.

pub mod grid;
pub mod engine;
pub mod pattern;

pub use grid::{wrap, Grid};
pub use engine::{GridEngine, GridSnapshot};
pub use pattern::Pattern;
