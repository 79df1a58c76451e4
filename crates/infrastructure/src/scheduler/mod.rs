//! Interval-based task scheduler for recurring tasks
//!
//! Runs the forecast refresh on a fixed interval chosen at startup. Every run
//! is timed and counted, and a [`TaskEvent`] is published per run.
//!
//! Uses `tokio-cron-scheduler` repeated jobs.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info, instrument};

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The repeat interval is zero
    #[error("Invalid interval for task {0}: must be greater than zero")]
    InvalidInterval(String),

    /// A task with this name is already scheduled
    #[error("Task already scheduled: {0}")]
    DuplicateTask(String),

    /// Internal scheduler error
    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl From<JobSchedulerError> for SchedulerError {
    fn from(err: JobSchedulerError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Statistics for a scheduled task
#[derive(Debug, Clone)]
pub struct TaskStats {
    /// Task name
    pub name: String,
    /// Repeat interval
    pub interval: Duration,
    /// Number of successful executions
    pub success_count: u64,
    /// Number of failed executions
    pub failure_count: u64,
    /// Last execution time
    pub last_run: Option<DateTime<Utc>>,
    /// Last successful execution time
    pub last_success: Option<DateTime<Utc>>,
    /// Last failure time
    pub last_failure: Option<DateTime<Utc>>,
    /// Last error message
    pub last_error: Option<String>,
    /// Average execution duration in milliseconds
    pub avg_duration_ms: u64,
}

/// Internal task metadata
struct TaskMetadata {
    name: String,
    interval: Duration,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_run: RwLock<Option<DateTime<Utc>>>,
    last_success: RwLock<Option<DateTime<Utc>>>,
    last_failure: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
    total_duration_ms: AtomicU64,
}

impl TaskMetadata {
    fn new(name: String, interval: Duration) -> Self {
        Self {
            name,
            interval,
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            last_run: RwLock::new(None),
            last_success: RwLock::new(None),
            last_failure: RwLock::new(None),
            last_error: RwLock::new(None),
            total_duration_ms: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> TaskStats {
        let success = self.success_count.load(Ordering::Relaxed);
        let failure = self.failure_count.load(Ordering::Relaxed);
        let total = success + failure;
        let avg_duration = if total > 0 {
            self.total_duration_ms.load(Ordering::Relaxed) / total
        } else {
            0
        };

        TaskStats {
            name: self.name.clone(),
            interval: self.interval,
            success_count: success,
            failure_count: failure,
            last_run: *self.last_run.read(),
            last_success: *self.last_success.read(),
            last_failure: *self.last_failure.read(),
            last_error: self.last_error.read().clone(),
            avg_duration_ms: avg_duration,
        }
    }

    fn record_success(&self, duration_ms: u64) {
        let now = Utc::now();
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(now);
        *self.last_success.write() = Some(now);
    }

    fn record_failure(&self, error: String, duration_ms: u64) {
        let now = Utc::now();
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(now);
        *self.last_failure.write() = Some(now);
        *self.last_error.write() = Some(error);
    }
}

/// Task completion event sent to the event channel
#[derive(Debug, Clone)]
pub struct TaskEvent {
    /// Task name
    pub task_name: String,
    /// Whether the task succeeded
    pub success: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
    /// When the task completed
    pub completed_at: DateTime<Utc>,
}

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Whether to start the scheduler immediately
    pub auto_start: bool,
    /// Task event buffer size
    pub event_buffer_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            event_buffer_size: 100,
        }
    }
}

/// Task scheduler for recurring background tasks
pub struct TaskScheduler {
    scheduler: AsyncMutex<JobScheduler>,
    tasks: Arc<RwLock<HashMap<String, Arc<TaskMetadata>>>>,
    running: Arc<AtomicBool>,
    event_tx: mpsc::Sender<TaskEvent>,
    event_rx: Arc<RwLock<Option<mpsc::Receiver<TaskEvent>>>>,
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("running", &self.running.load(Ordering::Relaxed))
            .field("task_count", &self.tasks.read().len())
            .finish_non_exhaustive()
    }
}

impl TaskScheduler {
    /// Create a new task scheduler
    #[instrument(skip_all)]
    pub async fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let scheduler = JobScheduler::new().await?;
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer_size);

        let instance = Self {
            scheduler: AsyncMutex::new(scheduler),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
            event_tx,
            event_rx: Arc::new(RwLock::new(Some(event_rx))),
        };

        if config.auto_start {
            instance.start().await?;
        }

        info!("Task scheduler initialized");
        Ok(instance)
    }

    /// Start the scheduler
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), SchedulerError> {
        if self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already running");
            return Ok(());
        }

        self.scheduler.lock().await.start().await?;
        self.running.store(true, Ordering::Relaxed);
        info!("Task scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        if !self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already stopped");
            return Ok(());
        }

        self.scheduler.lock().await.shutdown().await?;
        self.running.store(false, Ordering::Relaxed);
        info!("Task scheduler stopped");
        Ok(())
    }

    /// Check if the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Take the event receiver (can only be called once)
    pub fn take_event_receiver(&self) -> Option<mpsc::Receiver<TaskEvent>> {
        self.event_rx.write().take()
    }

    /// Add a task that runs every `interval`
    ///
    /// The first run happens one interval after scheduling; callers that need
    /// an immediate run perform it themselves before adding the task.
    ///
    /// # Arguments
    /// * `name` - Unique task name
    /// * `interval` - Time between runs
    /// * `task` - Async task function
    #[instrument(skip(self, task))]
    pub async fn add_repeated_task<F, Fut>(
        &self,
        name: &str,
        interval: Duration,
        task: F,
    ) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), String>> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval(name.to_string()));
        }
        if self.tasks.read().contains_key(name) {
            return Err(SchedulerError::DuplicateTask(name.to_string()));
        }

        let name_clone = name.to_string();
        let tasks = Arc::clone(&self.tasks);
        let event_tx = self.event_tx.clone();

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let name = name_clone.clone();
            let tasks = Arc::clone(&tasks);
            let event_tx = event_tx.clone();
            let task_future = task();

            Box::pin(async move {
                debug!(task = %name, "Starting scheduled task");
                let start = std::time::Instant::now();
                let result = task_future.await;
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                let metadata = tasks.read().get(&name).cloned();
                let (success, error) = match result {
                    Ok(()) => {
                        if let Some(metadata) = &metadata {
                            metadata.record_success(duration_ms);
                        }
                        info!(task = %name, duration_ms, "Task completed successfully");
                        (true, None)
                    },
                    Err(e) => {
                        if let Some(metadata) = &metadata {
                            metadata.record_failure(e.clone(), duration_ms);
                        }
                        error!(task = %name, error = %e, duration_ms, "Task failed");
                        (false, Some(e))
                    },
                };

                let event = TaskEvent {
                    task_name: name,
                    success,
                    error,
                    duration_ms,
                    completed_at: Utc::now(),
                };
                if event_tx.try_send(event).is_err() {
                    debug!("Task event dropped, no receiver or buffer full");
                }
            })
        })?;

        // Metadata goes in first so the earliest run always finds it.
        let metadata = Arc::new(TaskMetadata::new(name.to_string(), interval));
        self.tasks.write().insert(name.to_string(), metadata);

        if let Err(e) = self.scheduler.lock().await.add(job).await {
            self.tasks.write().remove(name);
            return Err(e.into());
        }

        info!(task = %name, interval_secs = interval.as_secs(), "Task scheduled");
        Ok(())
    }

    /// Get statistics for a specific task
    #[must_use]
    pub fn get_task_stats(&self, name: &str) -> Option<TaskStats> {
        self.tasks.read().get(name).map(|m| m.to_stats())
    }
}
