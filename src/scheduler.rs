//! Frame scheduling for deferred collection.
//!
//! The marshal never talks to the host's animation loop directly. It hands a
//! task to a [`FrameScheduler`] and keeps the returned [`FrameHandle`] so it
//! can cancel the task if the drag ends first.
//!
//! [`ManualScheduler`] is the in-process implementation: the host calls
//! [`ManualScheduler::flush`] once per animation frame, and tests call it to
//! advance time by one frame.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::{Cell, RefCell};
use std::fmt;

/// Work deferred to the next frame.
pub type FrameTask = Box<dyn FnOnce()>;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Runs tasks on the next tick of the host's frame loop.
pub trait FrameScheduler {
    /// Queue `task` to run once on the next frame.
    ///
    /// Must not run `task` before returning.
    fn schedule_once(&self, task: FrameTask) -> FrameHandle;

    /// Drop a queued task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: FrameHandle);
}

/// Frame scheduler driven explicitly by its owner.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(FrameHandle, FrameTask)>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every task queued before this call. Returns how many ran.
    ///
    /// Tasks scheduled while flushing wait for the next flush, matching how
    /// an animation frame callback that requests another frame is deferred.
    pub fn flush(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let count = due.len();
        for (_, task) in due {
            task();
        }
        count
    }

    /// Number of tasks waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_once(&self, task: FrameTask) -> FrameHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handle = FrameHandle(id);
        self.queue.borrow_mut().push((handle, task));
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(queued, _)| *queued != handle);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler").field("pending", &self.pending()).finish()
    }
}
