//! Orchestrator module for the hotel indexer.
//!
//! Runs the job worker in the background and schedules catalog syncs until
//! shutdown is requested.

use std::future::Future;
use std::sync::Arc;

use hotels_pipeline::{JobReceiver, Queue, Worker};
use hotels_shared::Job;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info, instrument};

use crate::config::SyncSchedule;
use crate::errors::IndexingError;

/// Orchestrator that owns the worker lifecycle and the sync schedule.
pub struct Orchestrator {
    worker: Arc<Worker>,
    queue: Queue,
    receiver: JobReceiver,
    schedule: SyncSchedule,
    shutdown_tx: broadcast::Sender<()>,
}

impl Orchestrator {
    /// Create a new orchestrator. `receiver` must belong to `queue`.
    pub fn new(
        worker: Worker,
        queue: Queue,
        receiver: JobReceiver,
        schedule: SyncSchedule,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            worker: Arc::new(worker),
            queue,
            receiver,
            schedule,
            shutdown_tx,
        }
    }

    /// Producer handle of the job queue the worker consumes.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> Result<(), IndexingError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for the shutdown signal");
            }
        })
        .await
    }

    /// Run until `shutdown` completes, then stop the worker and wait for the
    /// jobs it is still handling.
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), IndexingError>
    where
        F: Future<Output = ()>,
    {
        info!(
            initial_sync = self.schedule.initial,
            sync_interval = ?self.schedule.interval,
            "Starting hotel indexer orchestrator"
        );

        let worker_handle = tokio::spawn(
            self.worker
                .clone()
                .run(self.receiver, self.shutdown_tx.subscribe()),
        );

        if self.schedule.initial {
            info!("Scheduling initial catalog sync");
            self.queue.enqueue(Job::sync_all());
        }

        let mut ticker = self.schedule.interval.map(|period| {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = next_tick(&mut ticker) => {
                    info!("Scheduling periodic catalog sync");
                    self.queue.enqueue(Job::sync_all());
                }
            }
        }

        // The worker may already be gone, in which case nobody listens.
        let _ = self.shutdown_tx.send(());
        worker_handle
            .await
            .map_err(|e| IndexingError::runtime(format!("worker task failed: {e}")))?;

        info!("Hotel indexer orchestrator stopped");
        Ok(())
    }
}

/// Completes on the next tick, or never without a periodic schedule.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
