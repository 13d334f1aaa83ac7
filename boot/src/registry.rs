//! Static registry of queues, workers and cron jobs.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

type InitFn<H> = Box<dyn Fn(H) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;
type StartFn = Box<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// A named background job queue.
///
/// The initializer receives a clone of the broker connection handle
/// obtained in the broker-connect step.
pub struct QueueDescriptor<H> {
    name: String,
    init: InitFn<H>,
}

impl<H> QueueDescriptor<H> {
    /// Create a queue descriptor.
    pub fn new<F, Fut>(name: impl Into<String>, init: F) -> Self
    where
        F: Fn(H) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            init: Box::new(move |handle| Box::pin(init(handle))),
        }
    }

    /// Queue name, used in log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initialize the queue over the broker handle.
    ///
    /// # Errors
    ///
    /// Propagates the initializer's failure; the caller treats it as a
    /// required-step failure.
    pub fn init(&self, handle: H) -> BoxFuture<'static, anyhow::Result<()>> {
        (self.init)(handle)
    }
}

impl<H> fmt::Debug for QueueDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named background worker.
///
/// `start` must be non-blocking: the worker spawns its own processing
/// loop and returns once it is running.
pub struct WorkerDescriptor<H> {
    name: String,
    start: InitFn<H>,
}

impl<H> WorkerDescriptor<H> {
    /// Create a worker descriptor.
    pub fn new<F, Fut>(name: impl Into<String>, start: F) -> Self
    where
        F: Fn(H) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            start: Box::new(move |handle| Box::pin(start(handle))),
        }
    }

    /// Worker name, used in log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start the worker over the broker handle.
    ///
    /// # Errors
    ///
    /// Propagates the start failure; the caller treats it as a
    /// required-step failure.
    pub fn start(&self, handle: H) -> BoxFuture<'static, anyhow::Result<()>> {
        (self.start)(handle)
    }
}

impl<H> fmt::Debug for WorkerDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named time-triggered job.
///
/// `start` is fire-and-forget: it schedules the job (typically by
/// spawning an interval loop) and returns without waiting for the
/// job's first execution.
pub struct CronDescriptor {
    name: String,
    start: StartFn,
}

impl CronDescriptor {
    /// Create a cron descriptor.
    pub fn new<F>(name: impl Into<String>, start: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            start: Box::new(start),
        }
    }

    /// Job name, used in log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schedule the job.
    ///
    /// # Errors
    ///
    /// Propagates the scheduling failure; the caller treats it as a
    /// required-step failure. Failures of individual job *runs* stay
    /// inside the job and never reach the boot sequence.
    pub fn start(&self) -> anyhow::Result<()> {
        (self.start)()
    }
}

impl fmt::Debug for CronDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CronDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Static, ordered registry of the subsystems the service supports.
///
/// Constructed once at process start. Iteration order is insertion
/// order and affects only log-line ordering.
#[derive(Debug)]
pub struct SubsystemRegistry<H> {
    queues: Vec<QueueDescriptor<H>>,
    workers: Vec<WorkerDescriptor<H>>,
    crons: Vec<CronDescriptor>,
}

impl<H> SubsystemRegistry<H> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queues: Vec::new(),
            workers: Vec::new(),
            crons: Vec::new(),
        }
    }

    /// Register a queue.
    #[must_use]
    pub fn with_queue(mut self, queue: QueueDescriptor<H>) -> Self {
        self.queues.push(queue);
        self
    }

    /// Register a worker.
    #[must_use]
    pub fn with_worker(mut self, worker: WorkerDescriptor<H>) -> Self {
        self.workers.push(worker);
        self
    }

    /// Register a cron job.
    #[must_use]
    pub fn with_cron(mut self, cron: CronDescriptor) -> Self {
        self.crons.push(cron);
        self
    }

    /// Registered queues, in insertion order.
    #[must_use]
    pub fn queues(&self) -> &[QueueDescriptor<H>] {
        &self.queues
    }

    /// Registered workers, in insertion order.
    #[must_use]
    pub fn workers(&self) -> &[WorkerDescriptor<H>] {
        &self.workers
    }

    /// Registered cron jobs, in insertion order.
    #[must_use]
    pub fn crons(&self) -> &[CronDescriptor] {
        &self.crons
    }

    /// Queue names joined for a log line.
    #[must_use]
    pub fn queue_names(&self) -> String {
        Self::join(self.queues.iter().map(QueueDescriptor::name))
    }

    /// Worker names joined for a log line.
    #[must_use]
    pub fn worker_names(&self) -> String {
        Self::join(self.workers.iter().map(WorkerDescriptor::name))
    }

    fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
        names.collect::<Vec<_>>().join(", ")
    }
}

impl<H> Default for SubsystemRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
