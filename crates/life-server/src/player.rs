//! Timer-driven auto-advance.

use crate::session::Session;
use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Step the board every `tick` while the session is playing.
///
/// Returns only when the session's playback channel closes.
pub async fn run_player(session: Arc<Session>, tick: Duration) {
    let mut playing = session.subscribe();
    info!("Player started with {:?} tick interval", tick);

    loop {
        // Idle until playback starts
        loop {
            let is_playing = *playing.borrow_and_update();
            if is_playing {
                break;
            }
            if playing.changed().await.is_err() {
                return;
            }
        }

        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut settled = false;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = session.step();
                    crate::record_counter!("generations", 1);
                    if report.changed.is_empty() {
                        if !settled {
                            info!(generation = report.generation, "Board settled");
                            settled = true;
                        }
                    } else {
                        settled = false;
                        debug!(
                            generation = report.generation,
                            changed = report.changed.len(),
                            "Auto-advanced"
                        );
                    }
                }
                res = playing.changed() => {
                    if res.is_err() {
                        return;
                    }
                    let is_playing = *playing.borrow_and_update();
                    if !is_playing {
                        let population = session.snapshot().population;
                        crate::record_gauge!("population", population);
                        info!("Player paused");
                        break;
                    }
                }
            }
        }
    }
}
