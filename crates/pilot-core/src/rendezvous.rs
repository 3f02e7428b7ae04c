//! One-slot handshake between the rebase worker and the interactive side.
//!
//! The worker deposits a request and blocks; the interactive side observes
//! the request on the [`ResultQueue`], decides, and releases the worker. A
//! release that arrives before the worker blocks is kept, so the worker's
//! next deposit passes straight through.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::{Condvar, Mutex};

use crate::{
    coordinator::ResultQueue,
    error::{PilotError, Result},
    models::{same_decisions, InteractiveResult, Step},
};

#[derive(Default)]
struct Slot {
    outstanding: bool,
    permit: bool,
}

pub struct RendezvousChannel {
    queue: Arc<ResultQueue>,
    slot: Mutex<Slot>,
    released: Condvar,
}

impl RendezvousChannel {
    pub fn new(queue: Arc<ResultQueue>) -> Self {
        Self {
            queue,
            slot: Mutex::new(Slot::default()),
            released: Condvar::new(),
        }
    }

    /// Publish `request` and block the calling worker until released.
    ///
    /// The request becomes observable on the queue only after the slot is
    /// marked outstanding, so an observer can always release it.
    pub fn deposit(&self, request: InteractiveResult) {
        let mut slot = self.slot.lock();
        if slot.outstanding {
            warn!("Deposit while another request is still outstanding");
        }
        slot.outstanding = true;
        self.queue.push(request);

        while !slot.permit {
            self.released.wait(&mut slot);
        }
        slot.permit = false;
        slot.outstanding = false;
        debug!("Worker released");
    }

    /// Let the blocked worker resume. Returns whether a worker was waiting;
    /// otherwise the release is kept for the next deposit.
    pub fn release(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.permit = true;
        self.released.notify_one();
        slot.outstanding
    }

    /// Release only if `current` still carries the decisions of `expected`.
    pub fn release_with_conflict_check(
        &self,
        current: &[Step],
        expected: &[Step],
    ) -> Result<bool> {
        if !same_decisions(current, expected) {
            return Err(PilotError::StepListChanged {
                steps: current.to_vec(),
            });
        }
        Ok(self.release())
    }

    /// Whether a worker is blocked in [`deposit`](Self::deposit).
    pub fn is_waiting(&self) -> bool {
        self.slot.lock().outstanding
    }

    /// Drop a kept release that no worker consumed.
    pub fn reset(&self) {
        let mut slot = self.slot.lock();
        if !slot.outstanding {
            slot.permit = false;
        }
    }
}
