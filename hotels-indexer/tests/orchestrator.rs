//! Integration tests for the orchestrator's sync schedule and shutdown.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hotels_indexer::config::SyncSchedule;
use hotels_indexer::orchestrator::Orchestrator;
use hotels_pipeline::errors::JobError;
use hotels_pipeline::{JobHandler, Queue, Worker, WorkerConfig};
use hotels_shared::{Job, JobKind, JobPayload};
use tokio::sync::Notify;

/// Counts `syncAll` jobs and signals every call.
struct RecordingHandler {
    calls: AtomicU32,
    called: Notify,
}

impl RecordingHandler {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            called: Notify::new(),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobHandler for RecordingHandler {
    async fn handle(&self, _payload: JobPayload) -> Result<(), JobError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        Ok(())
    }
}

fn orchestrator(handler: Arc<RecordingHandler>, schedule: SyncSchedule) -> Orchestrator {
    let (queue, receiver) = Queue::new();
    let mut worker = Worker::new(queue.clone(), WorkerConfig::default());
    worker.register(JobKind::SyncAll, handler).unwrap();
    Orchestrator::new(worker, queue, receiver, schedule)
}

#[tokio::test]
async fn test_initial_sync_is_scheduled() {
    let handler = RecordingHandler::new();
    let orchestrator = orchestrator(
        handler.clone(),
        SyncSchedule {
            initial: true,
            interval: None,
        },
    );

    let signal = handler.clone();
    orchestrator
        .run_until(async move { signal.called.notified().await })
        .await
        .unwrap();

    assert_eq!(handler.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_periodic_sync_is_scheduled() {
    let handler = RecordingHandler::new();
    let orchestrator = orchestrator(
        handler.clone(),
        SyncSchedule {
            initial: false,
            interval: Some(Duration::from_secs(60)),
        },
    );

    let signal = handler.clone();
    orchestrator
        .run_until(async move {
            signal.called.notified().await;
            signal.called.notified().await;
        })
        .await
        .unwrap();

    assert!(handler.calls() >= 2);
}

#[tokio::test]
async fn test_shutdown_without_schedule_runs_nothing() {
    let handler = RecordingHandler::new();
    let orchestrator = orchestrator(handler.clone(), SyncSchedule::default());

    orchestrator.run_until(async {}).await.unwrap();

    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_jobs_enqueued_through_the_handle_are_processed() {
    let handler = RecordingHandler::new();
    let orchestrator = orchestrator(handler.clone(), SyncSchedule::default());
    orchestrator.queue().enqueue(Job::sync_all());

    let signal = handler.clone();
    orchestrator
        .run_until(async move { signal.called.notified().await })
        .await
        .unwrap();

    assert_eq!(handler.calls(), 1);
}
