//! Background execution of rebase jobs.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use parking_lot::Mutex;
use tokio::{runtime::Handle, sync::mpsc, task};

use crate::{executor::ExecutorError, models::RebaseStatus};

/// What a job returns to its completion callback.
pub type JobOutcome = Result<RebaseStatus, ExecutorError>;

/// Blocking work run off the caller's thread.
pub type Job = Box<dyn FnOnce() -> JobOutcome + Send + 'static>;

/// Called once with the job's outcome.
pub type Completion = Box<dyn FnOnce(JobOutcome) + Send + 'static>;

/// Jobs sharing a key never run concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExclusivityKey(PathBuf);

impl ExclusivityKey {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ExclusivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Runs jobs in the background and reports their outcome.
///
/// Jobs with the same [`ExclusivityKey`] run one at a time in submission
/// order. A panicking job completes with [`ExecutorError::Panicked`].
pub trait Scheduler: Send + Sync {
    fn schedule(&self, key: &ExclusivityKey, job: Job, on_complete: Completion);
}

struct Task {
    job: Job,
    on_complete: Completion,
}

/// [`Scheduler`] on a tokio runtime: one lane task per key feeding jobs to
/// the blocking pool in order.
pub struct TokioScheduler {
    handle: Handle,
    lanes: Mutex<HashMap<ExclusivityKey, mpsc::UnboundedSender<Task>>>,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Scheduler on the runtime the caller is running in.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    fn spawn_lane(&self, key: ExclusivityKey) -> mpsc::UnboundedSender<Task> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Task>();
        self.handle.spawn(async move {
            while let Some(Task { job, on_complete }) = receiver.recv().await {
                debug!("Running job for {key}");
                let outcome = match task::spawn_blocking(job).await {
                    Ok(outcome) => outcome,
                    Err(e) if e.is_panic() => Err(ExecutorError::Panicked {
                        message: panic_message(e.into_panic().as_ref()),
                    }),
                    Err(e) => Err(ExecutorError::Panicked {
                        message: e.to_string(),
                    }),
                };
                on_complete(outcome);
            }
        });
        sender
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, key: &ExclusivityKey, job: Job, on_complete: Completion) {
        let mut lanes = self.lanes.lock();
        let task = Task { job, on_complete };
        let task = match lanes.get(key) {
            Some(sender) => match sender.send(task) {
                Ok(()) => return,
                Err(mpsc::error::SendError(task)) => {
                    warn!("Job lane for {key} stopped, starting a new one");
                    task
                }
            },
            None => task,
        };

        let sender = self.spawn_lane(key.clone());
        if let Err(mpsc::error::SendError(task)) = sender.send(task) {
            (task.on_complete)(Err(ExecutorError::Internal {
                message: format!("Job lane for {key} is not running"),
            }));
            return;
        }
        lanes.insert(key.clone(), sender);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            mpsc as std_mpsc, Arc,
        },
        thread,
        time::Duration,
    };

    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to build runtime")
    }

    #[test]
    fn test_same_key_runs_in_order_and_never_overlaps() {
        let runtime = runtime();
        let scheduler = TokioScheduler::new(runtime.handle().clone());
        let key = ExclusivityKey::new("/repo/.git");
        let running = Arc::new(AtomicUsize::new(0));
        let (done_tx, done_rx) = std_mpsc::channel();

        for i in 0..5 {
            let running = Arc::clone(&running);
            let done_tx = done_tx.clone();
            scheduler.schedule(
                &key,
                Box::new(move || {
                    assert_eq!(running.fetch_add(1, Ordering::SeqCst), 0);
                    thread::sleep(Duration::from_millis(10));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(RebaseStatus::Ok)
                }),
                Box::new(move |outcome| {
                    assert!(outcome.is_ok());
                    done_tx.send(i).unwrap();
                }),
            );
        }

        let order: Vec<i32> = (0..5)
            .map(|_| done_rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_different_keys_run_concurrently() {
        let runtime = runtime();
        let scheduler = TokioScheduler::new(runtime.handle().clone());
        let (first_started_tx, first_started_rx) = std_mpsc::channel::<()>();
        let (release_tx, release_rx) = std_mpsc::channel::<()>();
        let (done_tx, done_rx) = std_mpsc::channel();

        let done = done_tx.clone();
        scheduler.schedule(
            &ExclusivityKey::new("/one/.git"),
            Box::new(move || {
                first_started_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                Ok(RebaseStatus::Ok)
            }),
            Box::new(move |_| done.send("one").unwrap()),
        );
        first_started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        scheduler.schedule(
            &ExclusivityKey::new("/two/.git"),
            Box::new(|| Ok(RebaseStatus::Stopped)),
            Box::new(move |_| done_tx.send("two").unwrap()),
        );
        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap(), "two");

        release_tx.send(()).unwrap();
        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap(), "one");
    }

    #[test]
    fn test_panicking_job_reports_panicked() {
        let runtime = runtime();
        let scheduler = TokioScheduler::new(runtime.handle().clone());
        let (done_tx, done_rx) = std_mpsc::channel();

        scheduler.schedule(
            &ExclusivityKey::new("/repo/.git"),
            Box::new(|| -> JobOutcome { panic!("executor blew up") }),
            Box::new(move |outcome| done_tx.send(outcome).unwrap()),
        );

        match done_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Err(ExecutorError::Panicked { message }) => assert_eq!(message, "executor blew up"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
