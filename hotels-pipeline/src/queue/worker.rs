use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use hotels_shared::{Job, JobKind};
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinSet;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, error, info, warn};

use crate::errors::QueueError;
use crate::log_by_kind;
use crate::queue::{JobHandler, JobReceiver, Queue};

/// Upper bound of the delay before a re-delivery.
pub const MAX_REDELIVERY_DELAY: Duration = Duration::from_secs(3600);

/// Tuning of the worker loop.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum number of jobs handled at the same time.
    pub concurrency: usize,
    /// Maximum number of deliveries of one job, the first one included.
    pub max_attempts: u32,
    /// Delay before the first re-delivery. Doubles with every attempt.
    pub retry_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Dispatches queued jobs to their registered handlers.
pub struct Worker {
    handler_registry: HashMap<JobKind, Arc<dyn JobHandler>>,
    queue: Queue,
    config: WorkerConfig,
}

impl Worker {
    /// Creates a worker with an empty registry. `queue` is used for re-delivery.
    pub fn new(queue: Queue, config: WorkerConfig) -> Self {
        Self {
            handler_registry: HashMap::new(),
            queue,
            config,
        }
    }

    /// Binds the handler for one job kind.
    ///
    /// # Returns
    ///
    /// * `Err(QueueError::HandlerAlreadyRegistered)` - `kind` already has a handler
    pub fn register(
        &mut self,
        kind: JobKind,
        handler: Arc<dyn JobHandler>,
    ) -> Result<(), QueueError> {
        if self.handler_registry.contains_key(&kind) {
            return Err(QueueError::HandlerAlreadyRegistered(kind));
        }
        self.handler_registry.insert(kind, handler);
        Ok(())
    }

    pub fn is_registered(&self, kind: JobKind) -> bool {
        self.handler_registry.contains_key(&kind)
    }

    /// Runs the handler of `job` once.
    pub async fn dispatch(&self, job: &Job) -> Result<(), QueueError> {
        let handler = self
            .handler_registry
            .get(&job.kind)
            .ok_or(QueueError::UnregisteredJobKind(job.kind))?;
        handler.handle(job.payload.clone()).await?;
        Ok(())
    }

    /// Consumes jobs until `shutdown` fires, then waits for in-flight jobs.
    pub async fn run(
        self: Arc<Self>,
        mut receiver: JobReceiver,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let limiter = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();
        info!(concurrency = self.config.concurrency, "Worker started");

        loop {
            tokio::select! {
                job = receiver.recv() => {
                    let Some(job) = job else {
                        info!("Job channel closed");
                        break;
                    };
                    let permit = match limiter.clone().acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            error!(error = %e, "Worker limiter closed");
                            break;
                        }
                    };
                    let worker = self.clone();
                    tasks.spawn(async move {
                        worker.process(job).await;
                        drop(permit);
                    });
                }
                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = result {
                        error!(error = %e, "Job task panicked");
                    }
                }
                _ = shutdown.recv() => {
                    info!("Worker received shutdown signal");
                    break;
                }
            }
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Job task panicked");
            }
        }
        info!("Worker stopped");
    }

    /// Dispatches a job and schedules its re-delivery when it failed retryably.
    async fn process(&self, job: Job) {
        let error = match self.dispatch(&job).await {
            Ok(()) => {
                debug!(job_type = %job.kind, attempt = job.attempt, "Job done");
                return;
            }
            Err(e) => e,
        };

        log_by_kind!(
            error.kind(),
            job_type = %job.kind,
            hotel_address = ?job.payload.hotel_address,
            attempt = job.attempt,
            error = %error,
            "Job failed"
        );

        if !error.is_retryable() {
            return;
        }
        if job.attempt + 1 >= self.config.max_attempts {
            warn!(
                job_type = %job.kind,
                hotel_address = ?job.payload.hotel_address,
                attempts = job.attempt + 1,
                "Giving up on job"
            );
            return;
        }

        let delay = self.redelivery_delay(job.attempt);
        let queue = self.queue.clone();
        let next = job.redelivery();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            queue.enqueue(next);
        });
    }

    /// `retry_delay · 2^attempt`, capped at [`MAX_REDELIVERY_DELAY`].
    fn redelivery_delay(&self, attempt: u32) -> Duration {
        let retry_delay = self.config.retry_delay.min(MAX_REDELIVERY_DELAY);
        let millis = u64::try_from(retry_delay.as_millis()).unwrap_or(u64::MAX);
        let doubling = ExponentialBackoff::from_millis(2)
            .factor(millis)
            .max_delay(MAX_REDELIVERY_DELAY);
        std::iter::once(retry_delay)
            .chain(doubling)
            .nth(attempt as usize)
            .unwrap_or(MAX_REDELIVERY_DELAY)
    }
}
