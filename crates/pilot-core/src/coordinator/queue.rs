//! Results produced by background jobs, waiting for the interactive side.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::models::InteractiveResult;

#[derive(Default)]
struct QueueState {
    results: VecDeque<InteractiveResult>,
    active_jobs: usize,
}

/// FIFO of [`InteractiveResult`]s with a count of jobs that may still add to it.
///
/// [`next`](Self::next) blocks while the queue is empty and a job is active,
/// and returns `None` once the queue is drained and no job is left.
#[derive(Default)]
pub struct ResultQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl ResultQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: InteractiveResult) {
        let mut state = self.state.lock();
        state.results.push_back(result);
        self.available.notify_all();
    }

    /// Record a job that will eventually push its terminal result.
    pub fn job_started(&self) {
        self.state.lock().active_jobs += 1;
    }

    pub fn job_finished(&self) {
        let mut state = self.state.lock();
        state.active_jobs = state.active_jobs.saturating_sub(1);
        self.available.notify_all();
    }

    /// Push the last result of a job and mark it finished in one step.
    pub fn finish_job(&self, result: InteractiveResult) {
        let mut state = self.state.lock();
        state.results.push_back(result);
        state.active_jobs = state.active_jobs.saturating_sub(1);
        self.available.notify_all();
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().active_jobs > 0
    }

    /// Take the oldest result without waiting.
    pub fn try_next(&self) -> Option<InteractiveResult> {
        self.state.lock().results.pop_front()
    }

    /// Take the oldest result, waiting while a job may still produce one.
    pub fn next(&self) -> Option<InteractiveResult> {
        let mut state = self.state.lock();
        loop {
            if let Some(result) = state.results.pop_front() {
                return Some(result);
            }
            if state.active_jobs == 0 {
                return None;
            }
            self.available.wait(&mut state);
        }
    }
}
