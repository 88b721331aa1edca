//! Frame loop scheduling state machine.
//!
//! The loop does not know how frames are delivered. A [`Scheduler`] arranges
//! for the next tick (requestAnimationFrame, a winit redraw, or a test pump)
//! and the driver calls [`FrameLoop::tick`] when it arrives.

use crate::app::AppState;
use crate::camera::CameraRig;
use crate::clock::{Clock, TimeSource};
use crate::scene::SceneState;
use std::fmt::Debug;

pub trait Scheduler {
    type Handle: Copy + Debug;

    /// Ask for one more tick. `None` means the request could not be made.
    fn schedule(&mut self) -> Option<Self::Handle>;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Consumer of one finished frame.
pub trait RenderSink {
    fn render(&mut self, scene: &SceneState, camera: &CameraRig) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct FrameLoop<S: Scheduler, T: TimeSource> {
    scheduler: S,
    clock: Clock<T>,
    state: LoopState,
    pending: Option<S::Handle>,
    ticks: u64,
}

impl<S: Scheduler, T: TimeSource> FrameLoop<S, T> {
    pub fn new(scheduler: S, time: T) -> Self {
        Self {
            scheduler,
            clock: Clock::new(time),
            state: LoopState::Idle,
            pending: None,
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending(&self) -> Option<S::Handle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Idle -> Running. Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        self.pending = self.scheduler.schedule();
        log::info!("[loop] running");
    }

    /// Run one frame: reschedule, sample time, animate, ease camera, render.
    ///
    /// Returns the sampled time, or `None` when the loop is not running.
    /// A failed render is logged and does not stop the loop.
    pub fn tick(&mut self, app: &mut AppState, sink: &mut impl RenderSink) -> Option<f64> {
        if self.state != LoopState::Running {
            return None;
        }
        self.pending = self.scheduler.schedule();
        if self.pending.is_none() {
            log::warn!("[loop] could not schedule next frame");
        }
        let t = self.clock.sample();
        app.update(t);
        if let Err(e) = sink.render(&app.scene, &app.camera) {
            log::warn!("[loop] render failed: {e:#}");
        }
        self.ticks += 1;
        Some(t)
    }

    /// Teardown: cancel the pending frame and refuse further ticks.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel(h);
        }
        self.state = LoopState::Stopped;
        log::info!("[loop] stopped after {} ticks", self.ticks);
    }

    /// Page is being hidden. A `persisted` page goes to the back/forward
    /// cache and may come back, so only a non-persisted hide tears down.
    pub fn page_hidden(&mut self, persisted: bool) {
        if persisted {
            log::debug!("[loop] page cached; still running");
            return;
        }
        self.stop();
    }
}

/// Scheduler that only records requests; the caller pumps ticks by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u32,
    pub scheduled: Vec<u32>,
    pub cancelled: Vec<u32>,
}

impl Scheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(&mut self) -> Option<u32> {
        self.next += 1;
        self.scheduled.push(self.next);
        Some(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}
