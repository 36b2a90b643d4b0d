//! Continuous tick scheduling for the drift field.
//!
//! The scheduler is cooperatively driven: the host calls [`AnimationScheduler::run_frame`]
//! once per display-refresh callback. Every tick advances the field by exactly
//! one simulation unit and then renders; no wall-clock delta is measured.

use std::cell::Cell;
use std::rc::Rc;

use crate::field::ParticleField;
use crate::scene::{RenderError, SceneManager};

/// Cancellation handle returned by [`AnimationScheduler::start`].
///
/// Shares the scheduler's cancellation flag, so a refresh callback the host has
/// already queued delivers into a no-op once the handle is cancelled.
#[derive(Clone)]
pub struct FrameHandle {
    cancelled: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// Whether the loop this handle belongs to has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Drives the continuous update-then-render loop.
pub struct AnimationScheduler {
    /// Shared cancellation flag for the active loop, if started.
    active: Option<Rc<Cell<bool>>>,
    /// Ticks delivered so far.
    ticks: u64,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationScheduler {
    /// Create a scheduler with no active loop.
    pub fn new() -> Self {
        Self {
            active: None,
            ticks: 0,
        }
    }

    /// Arm the loop and return its cancellation handle.
    ///
    /// Starting an already-running scheduler is a no-op that returns a handle
    /// to the existing loop.
    pub fn start(&mut self) -> FrameHandle {
        if let Some(flag) = &self.active {
            if !flag.get() {
                return FrameHandle {
                    cancelled: Rc::clone(flag),
                };
            }
        }

        let flag = Rc::new(Cell::new(false));
        self.active = Some(Rc::clone(&flag));
        log::debug!("animation loop started");
        FrameHandle { cancelled: flag }
    }

    /// Stop further ticks. Idempotent and safe before any tick has fired.
    pub fn cancel(&mut self, handle: &FrameHandle) {
        if !handle.cancelled.replace(true) {
            log::debug!("animation loop cancelled after {} ticks", self.ticks);
        }
    }

    /// Whether the loop is armed and not cancelled.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|flag| !flag.get())
    }

    /// Ticks delivered since the scheduler was created.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Deliver one tick: advance the field, then render it.
    ///
    /// Called by the host once per display-refresh callback. Returns `Ok(false)`
    /// without touching any state when the loop is cancelled or was never
    /// started, so late deliveries cannot reach disposed state.
    pub fn run_frame(
        &mut self,
        field: &mut ParticleField,
        scene: &mut SceneManager,
    ) -> Result<bool, RenderError> {
        if !self.is_running() {
            return Ok(false);
        }

        // Update strictly precedes render within a tick.
        field.update();
        scene.render(field.particles())?;
        self.ticks += 1;
        Ok(true)
    }

    /// Deliver one tick through caller-supplied phases, with the same gate and
    /// ordering as [`run_frame`](Self::run_frame).
    pub fn run_frame_with<U, R>(&mut self, update: U, render: R) -> bool
    where
        U: FnOnce(),
        R: FnOnce(),
    {
        if !self.is_running() {
            return false;
        }

        update();
        render();
        self.ticks += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_until_started() {
        let scheduler = AnimationScheduler::new();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_cancel_before_any_tick() {
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.start();
        scheduler.cancel(&handle);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.ticks(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.start();
        scheduler.cancel(&handle);
        scheduler.cancel(&handle);
        assert!(handle.is_cancelled());
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_update_precedes_render_every_tick() {
        let mut scheduler = AnimationScheduler::new();
        let _handle = scheduler.start();

        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        for _ in 0..10 {
            let o1 = Rc::clone(&order);
            let o2 = Rc::clone(&order);
            let ran = scheduler.run_frame_with(
                move || o1.borrow_mut().push("update"),
                move || o2.borrow_mut().push("render"),
            );
            assert!(ran);
        }

        let order = order.borrow();
        assert_eq!(order.len(), 20);
        for pair in order.chunks(2) {
            assert_eq!(pair, ["update", "render"]);
        }
        assert_eq!(scheduler.ticks(), 10);
    }

    #[test]
    fn test_pending_delivery_after_cancel_is_noop() {
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.start();
        assert!(scheduler.run_frame_with(|| {}, || {}));

        scheduler.cancel(&handle);

        // A callback the host already queued still arrives; it must do nothing.
        let ran = scheduler.run_frame_with(
            || panic!("update after cancel"),
            || panic!("render after cancel"),
        );
        assert!(!ran);
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn test_start_twice_shares_one_loop() {
        let mut scheduler = AnimationScheduler::new();
        let first = scheduler.start();
        let second = scheduler.start();
        scheduler.cancel(&second);
        assert!(first.is_cancelled());
        assert!(!scheduler.is_running());
    }
}
