//! The animation driver: a single frame subscription with idempotent
//! start and synchronous cancel.
//!
//! The host owns the actual refresh cadence; the driver only tracks which
//! scheduled frame id is still live. A frame id issued before `stop` or a
//! restart is stale and gets rejected, so a late callback can never touch
//! state that has since been discarded.

/// Identifier of one scheduled frame callback.
pub type FrameId = u64;

/// The host side of request/cancel-animation-frame.
pub trait FrameScheduler {
    /// Ask for one callback at the next display refresh.
    fn schedule(&mut self) -> FrameId;
    /// Revoke a previously scheduled callback before it fires.
    fn cancel(&mut self, id: FrameId);
}

/// Scheduler for the macroquad deployment: the main loop polls
/// `pending_frame` and fires it once per `next_frame`, so scheduling is
/// just id allocation.
#[derive(Debug, Default)]
pub struct LoopScheduler {
    next: FrameId,
}

impl FrameScheduler for LoopScheduler {
    fn schedule(&mut self) -> FrameId {
        self.next += 1;
        self.next
    }

    fn cancel(&mut self, _id: FrameId) {}
}

/// At most one live subscription at a time.
#[derive(Debug)]
pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameId>,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Subscribe to frame callbacks. Idempotent: calling while already
    /// subscribed never creates a second concurrent loop.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    /// Cancel the pending frame. After this returns, no frame id issued
    /// earlier will be accepted.
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    pub const fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// The id the host should fire next, if any.
    pub const fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Accept a fired frame. Returns `false` for stale ids. On success
    /// the driver immediately re-arms for the next refresh.
    pub fn accept(&mut self, id: FrameId) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = Some(self.scheduler.schedule());
        true
    }
}

impl<S: FrameScheduler> Drop for FrameDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Schedule/cancel history, shared so tests can keep inspecting it
    /// after the driver takes ownership of the scheduler.
    #[derive(Default)]
    pub struct SchedulerLog {
        pub scheduled: Vec<FrameId>,
        pub cancelled: Vec<FrameId>,
    }

    /// Records schedule/cancel calls so tests can assert on subscription
    /// bookkeeping.
    #[derive(Default)]
    pub struct RecordingScheduler {
        next: FrameId,
        pub log: Rc<RefCell<SchedulerLog>>,
    }

    impl RecordingScheduler {
        pub fn with_log(log: Rc<RefCell<SchedulerLog>>) -> Self {
            Self { next: 0, log }
        }
    }

    impl FrameScheduler for RecordingScheduler {
        fn schedule(&mut self) -> FrameId {
            self.next += 1;
            self.log.borrow_mut().scheduled.push(self.next);
            self.next
        }

        fn cancel(&mut self, id: FrameId) {
            self.log.borrow_mut().cancelled.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingScheduler;
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut driver = FrameDriver::new(RecordingScheduler::default());
        driver.start();
        let first = driver.pending();
        driver.start();
        assert_eq!(driver.pending(), first);
        assert_eq!(driver.scheduler.log.borrow().scheduled.len(), 1);
    }

    #[test]
    fn stop_cancels_the_pending_frame() {
        let mut driver = FrameDriver::new(RecordingScheduler::default());
        driver.start();
        let id = driver.pending().unwrap();
        driver.stop();
        assert!(!driver.is_active());
        assert_eq!(driver.scheduler.log.borrow().cancelled, vec![id]);
        // The cancelled id can never fire.
        assert!(!driver.accept(id));
    }

    #[test]
    fn accept_rearms_for_the_next_refresh() {
        let mut driver = FrameDriver::new(RecordingScheduler::default());
        driver.start();
        let first = driver.pending().unwrap();
        assert!(driver.accept(first));
        let second = driver.pending().unwrap();
        assert_ne!(first, second);
        // The consumed id is stale now.
        assert!(!driver.accept(first));
    }

    #[test]
    fn restart_invalidates_earlier_ids() {
        let mut driver = FrameDriver::new(RecordingScheduler::default());
        driver.start();
        let stale = driver.pending().unwrap();
        driver.stop();
        driver.start();
        assert!(!driver.accept(stale));
        assert!(driver.accept(driver.pending().unwrap()));
    }

    #[test]
    fn n_ticks_accept_exactly_n_frames() {
        let mut driver = FrameDriver::new(RecordingScheduler::default());
        driver.start();
        let mut accepted = 0;
        for _ in 0..10 {
            if driver.accept(driver.pending().unwrap()) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 10);
    }

    #[test]
    fn drop_cancels_subscription() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let log = Rc::new(RefCell::new(super::testing::SchedulerLog::default()));
        let mut driver = FrameDriver::new(RecordingScheduler::with_log(log.clone()));
        driver.start();
        let id = driver.pending().unwrap();
        drop(driver);
        assert_eq!(log.borrow().cancelled, vec![id]);
    }
}
