//! Start/stop state of a running hero's animation loop.
//!
//! [`FrameLoop`] owns the running flag, the pending frame id and every
//! event listener the hero registered. The host side (`requestAnimationFrame`
//! and `removeEventListener` in the browser) sits behind [`FrameHost`], so
//! the loop can be started, stepped and halted deterministically in tests.

use std::cell::{Cell, RefCell};

use crate::error::HorizonError;

/// Host services the animation loop needs.
pub trait FrameHost {
    /// A registered event listener, kept until the loop stops.
    type Listener;

    /// Schedule the frame callback for the next display refresh. Returns
    /// the request id, or `None` if scheduling failed.
    fn request_frame(&self) -> Option<i32>;

    /// Cancel a previously requested frame.
    fn cancel_frame(&self, id: i32);

    /// Unregister `listener` from its event target.
    fn remove_listener(&self, listener: Self::Listener);
}

/// A self-rescheduling frame loop that can be halted at any point.
///
/// Shared by reference between the host's frame callback and the handle
/// the page holds, hence the interior mutability.
pub struct FrameLoop<H: FrameHost> {
    host: H,
    running: Cell<bool>,
    pending: Cell<Option<i32>>,
    listeners: RefCell<Vec<H::Listener>>,
}

impl<H: FrameHost> FrameLoop<H> {
    /// A stopped loop with no listeners.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            running: Cell::new(false),
            pending: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// The host services.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether another frame will run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Id of the frame currently requested from the host.
    #[must_use]
    pub fn pending_frame(&self) -> Option<i32> {
        self.pending.get()
    }

    /// Number of listeners still registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Keep `listener` until [`stop`](Self::stop) removes it.
    pub fn add_listener(&self, listener: H::Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Request the first frame.
    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.schedule();
    }

    /// Body of the host's frame callback: run `frame` and request the next
    /// one. A callback arriving after [`stop`](Self::stop) does nothing; a
    /// failing frame stops the loop.
    pub fn tick(&self, frame: impl FnOnce() -> Result<(), HorizonError>) {
        let _ = self.pending.take();
        if !self.running.get() {
            return;
        }
        if let Err(e) = frame() {
            log::error!("hero frame failed, stopping: {e}");
            self.stop();
            return;
        }
        if self.running.get() {
            self.schedule();
        }
    }

    /// Cancel the pending frame and remove every listener. Idempotent.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
        }
        let listeners = self.listeners.take();
        let removed = listeners.len();
        for listener in listeners {
            self.host.remove_listener(listener);
        }
        if removed > 0 {
            log::debug!("hero stopped, {removed} listeners removed");
        }
    }

    fn schedule(&self) {
        match self.host.request_frame() {
            Some(id) => self.pending.set(Some(id)),
            None => {
                log::error!("frame request failed, stopping");
                self.running.set(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records requests, cancellations and removals.
    #[derive(Default)]
    struct FakeHost {
        next_id: Cell<i32>,
        requested: RefCell<Vec<i32>>,
        cancelled: RefCell<Vec<i32>>,
        removed: RefCell<Vec<&'static str>>,
        refuse: Cell<bool>,
    }

    impl FrameHost for FakeHost {
        type Listener = &'static str;

        fn request_frame(&self) -> Option<i32> {
            if self.refuse.get() {
                return None;
            }
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            self.requested.borrow_mut().push(id);
            Some(id)
        }

        fn cancel_frame(&self, id: i32) {
            self.cancelled.borrow_mut().push(id);
        }

        fn remove_listener(&self, listener: Self::Listener) {
            self.removed.borrow_mut().push(listener);
        }
    }

    fn running_loop() -> FrameLoop<FakeHost> {
        let frame_loop = FrameLoop::new(FakeHost::default());
        frame_loop.add_listener("pointermove");
        frame_loop.add_listener("resize");
        frame_loop.start();
        frame_loop
    }

    #[test]
    fn start_requests_one_frame() {
        let frame_loop = running_loop();
        assert!(frame_loop.is_running());
        assert_eq!(frame_loop.pending_frame(), Some(1));
        assert_eq!(*frame_loop.host().requested.borrow(), vec![1]);

        // Starting twice does not double-schedule.
        frame_loop.start();
        assert_eq!(frame_loop.host().requested.borrow().len(), 1);
    }

    #[test]
    fn tick_runs_frame_and_reschedules() {
        let frame_loop = running_loop();
        let frames = Cell::new(0);
        for _ in 0..3 {
            frame_loop.tick(|| {
                frames.set(frames.get() + 1);
                Ok(())
            });
        }
        assert_eq!(frames.get(), 3);
        assert_eq!(frame_loop.pending_frame(), Some(4));
    }

    #[test]
    fn stop_cancels_pending_frame_and_removes_listeners() {
        let frame_loop = running_loop();
        frame_loop.tick(|| Ok(()));
        frame_loop.stop();

        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.pending_frame(), None);
        assert_eq!(*frame_loop.host().cancelled.borrow(), vec![2]);
        assert_eq!(
            *frame_loop.host().removed.borrow(),
            vec!["pointermove", "resize"]
        );
        assert_eq!(frame_loop.listener_count(), 0);

        frame_loop.stop();
        assert_eq!(frame_loop.host().cancelled.borrow().len(), 1);
        assert_eq!(frame_loop.host().removed.borrow().len(), 2);
    }

    #[test]
    fn late_callback_after_stop_does_not_reschedule() {
        let frame_loop = running_loop();
        frame_loop.stop();

        let ran = Cell::new(false);
        frame_loop.tick(|| {
            ran.set(true);
            Ok(())
        });
        assert!(!ran.get());
        assert_eq!(frame_loop.pending_frame(), None);
        assert_eq!(frame_loop.host().requested.borrow().len(), 1);
    }

    #[test]
    fn stop_from_inside_a_frame_halts_the_loop() {
        let frame_loop = running_loop();
        frame_loop.tick(|| {
            frame_loop.stop();
            Ok(())
        });
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.pending_frame(), None);
        assert_eq!(frame_loop.host().requested.borrow().len(), 1);
    }

    #[test]
    fn failing_frame_stops_the_loop() {
        let frame_loop = running_loop();
        frame_loop.tick(|| Err(HorizonError::Shader("boom".into())));
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.listener_count(), 0);
        assert_eq!(frame_loop.host().requested.borrow().len(), 1);
    }

    #[test]
    fn refused_request_stops_the_loop() {
        let frame_loop = FrameLoop::new(FakeHost::default());
        frame_loop.host().refuse.set(true);
        frame_loop.start();
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.pending_frame(), None);
    }
}
