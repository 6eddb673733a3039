//! Periodic background ingestion.

use std::{sync::Arc, time::Duration};

use chuckle_core::{FetchOutcome, JokeStore};
use tokio::{
  sync::watch,
  task::JoinHandle,
  time::{Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{ingest::Ingestor, source::JokeSource};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Runs [`Ingestor::fetch_and_persist`] once per period until told to stop.
///
/// The first run happens one full period after start. A run that fails is
/// logged and forgotten; it never ends the loop. Runs never overlap: if one
/// takes longer than the period, the next starts as soon as it finishes.
pub struct Scheduler<S, P> {
  ingestor: Arc<Ingestor<S, P>>,
  period:   Duration,
}

impl<S, P> Scheduler<S, P>
where
  S: JokeStore + 'static,
  P: JokeSource + 'static,
{
  /// Build a scheduler. `period` is clamped to at least one millisecond.
  pub fn new(ingestor: Arc<Ingestor<S, P>>, period: Duration) -> Self {
    Self { ingestor, period: period.max(MIN_PERIOD) }
  }

  pub fn period(&self) -> Duration { self.period }

  /// Run the loop on its own tokio task.
  pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(self.run(shutdown))
  }

  /// Main loop. Returns once `shutdown` holds `true` or its sender is
  /// dropped. A run already in progress is allowed to finish first.
  pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
    if *shutdown.borrow_and_update() {
      return;
    }
    info!(period = ?self.period, "background scheduler started");

    let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      tokio::select! {
        _ = interval.tick() => self.tick().await,
        changed = shutdown.changed() => {
          if changed.is_err() || *shutdown.borrow_and_update() {
            break;
          }
        }
      }
    }
    info!("background scheduler stopped");
  }

  async fn tick(&self) {
    match self.ingestor.fetch_and_persist().await {
      FetchOutcome::Success { .. } => debug!("scheduled fetch succeeded"),
      FetchOutcome::Error { error } => debug!(%error, "scheduled fetch failed"),
    }
  }
}
