//! Shared board state and play/pause control.

use life_core::{CellState, ChangedSet, Coord, Result, SeedConfig, ServerConfig};
use life_world::{GridEngine, GridSnapshot, Pattern};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// A changed cell paired with its new state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub row: i32,
    pub col: i32,
    pub state: CellState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeReport {
    pub generation: u64,
    pub changed: Vec<CellChange>,
}

impl ChangeReport {
    fn new(engine: &GridEngine, changed: ChangedSet) -> Self {
        let changed = changed
            .into_iter()
            .map(|coord| CellChange {
                row: coord.row,
                col: coord.col,
                state: engine.state_of(coord.row, coord.col),
            })
            .collect();
        Self {
            generation: engine.generation(),
            changed,
        }
    }
}

/// One board shared by the HTTP handlers and the player task.
///
/// The engine lock is only ever held for a single engine call, never
/// across an `.await`.
pub struct Session {
    engine: Mutex<GridEngine>,
    playing: watch::Sender<bool>,
    seed: SeedConfig,
}

impl Session {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let engine = GridEngine::from_config(&config.grid)?;
        let (playing, _) = watch::channel(false);

        Ok(Self {
            engine: Mutex::new(engine),
            playing,
            seed: config.seed.clone(),
        })
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.engine.lock().snapshot()
    }

    pub fn state_of(&self, row: i32, col: i32) -> CellChange {
        let engine = self.engine.lock();
        let coord = Coord::new(row, col).wrap(engine.width(), engine.height());
        CellChange {
            row: coord.row,
            col: coord.col,
            state: engine.state_of(coord.row, coord.col),
        }
    }

    pub fn toggle(&self, row: i32, col: i32) -> ChangeReport {
        let mut engine = self.engine.lock();
        let changed = engine.toggle(row, col);
        ChangeReport::new(&engine, changed)
    }

    #[instrument(skip(self))]
    pub fn step(&self) -> ChangeReport {
        let mut engine = self.engine.lock();
        let changed = engine.step();
        ChangeReport::new(&engine, changed)
    }

    pub fn reset(&self) -> ChangeReport {
        let mut engine = self.engine.lock();
        let changed = engine.reset();
        ChangeReport::new(&engine, changed)
    }

    /// Reseed the board. Unset fields fall back to the configured density
    /// and a fresh random seed.
    pub fn randomize(&self, seed: Option<u64>, density: Option<f64>) -> Result<ChangeReport> {
        let seed = SeedConfig {
            seed: seed.unwrap_or_else(rand::random),
            density: density.unwrap_or(self.seed.density),
        };
        self.randomize_with(&seed)
    }

    pub fn randomize_with(&self, seed: &SeedConfig) -> Result<ChangeReport> {
        let mut engine = self.engine.lock();
        let changed = engine.randomize(seed)?;
        Ok(ChangeReport::new(&engine, changed))
    }

    pub fn load_pattern(&self, name: &str, origin: Coord) -> Result<ChangeReport> {
        let pattern = Pattern::preset(name)?;
        let mut engine = self.engine.lock();
        let changed = engine.load_pattern(&pattern, origin);
        Ok(ChangeReport::new(&engine, changed))
    }

    pub fn is_playing(&self) -> bool {
        *self.playing.borrow()
    }

    /// Start or stop auto-advance. Returns the new state.
    pub fn set_playing(&self, playing: bool) -> bool {
        let changed = self.playing.send_if_modified(|current| {
            let modified = *current != playing;
            *current = playing;
            modified
        });
        if changed {
            info!(playing, "Playback state changed");
        } else {
            debug!(playing, "Playback state unchanged");
        }
        playing
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.playing.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_session() -> Session {
        let mut config = ServerConfig::default();
        config.grid.width = 6;
        config.grid.height = 6;
        Session::new(&config).unwrap()
    }

    #[test]
    fn test_toggle_report_carries_new_state() {
        let session = small_session();
        let report = session.toggle(7, -1);
        assert_eq!(
            report.changed,
            vec![CellChange {
                row: 1,
                col: 5,
                state: CellState::Alive
            }]
        );

        let report = session.toggle(1, 5);
        assert_eq!(report.changed[0].state, CellState::Dead);
    }

    #[test]
    fn test_step_report() {
        let session = small_session();
        session.load_pattern("blinker", Coord::new(2, 1)).unwrap();
        let report = session.step();
        assert_eq!(report.generation, 1);
        assert_eq!(report.changed.len(), 4);
        let born = report
            .changed
            .iter()
            .filter(|c| c.state == CellState::Alive)
            .count();
        assert_eq!(born, 2);
    }

    #[test]
    fn test_state_of_wraps() {
        let session = small_session();
        session.toggle(0, 0);
        let cell = session.state_of(-6, 12);
        assert_eq!((cell.row, cell.col), (0, 0));
        assert_eq!(cell.state, CellState::Alive);
    }

    #[test]
    fn test_play_pause() {
        let session = small_session();
        let rx = session.subscribe();
        assert!(!session.is_playing());
        assert!(session.set_playing(true));
        assert!(session.is_playing());
        assert!(*rx.borrow());
        assert!(!session.set_playing(false));
    }

    #[test]
    fn test_randomize_then_reset() {
        let session = small_session();
        let seeded = session.randomize(Some(3), Some(0.5)).unwrap();
        let population = session.snapshot().population;
        assert_eq!(seeded.changed.len(), population);

        let cleared = session.reset();
        assert_eq!(cleared.changed.len(), population);
        assert!(cleared.changed.iter().all(|c| c.state == CellState::Dead));
        assert!(session.randomize(None, Some(2.0)).is_err());
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let mut config = ServerConfig::default();
        config.grid.width = 0;
        assert!(Session::new(&config).is_err());
    }
}
