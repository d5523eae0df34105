//! Deterministic, manually advanced clock for driving a [`Player`] without
//! real waits.

use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    foundation::error::{FlipbookError, FlipbookResult},
    playback::{
        clock::{ClockEvent, FrameClock, RepaintHandle, TimerHandle, next_refresh},
        player::Player,
        sink::PlayerSink,
    },
};

/// Upper bound on events delivered by one [`Player::advance`] call.
pub const MAX_EVENTS_PER_ADVANCE: usize = 100_000;

#[derive(Clone, Copy, Debug)]
struct VirtualTimer {
    handle: TimerHandle,
    deadline: Duration,
}

#[derive(Clone, Copy, Debug)]
struct VirtualRepaint {
    handle: RepaintHandle,
    /// `None` while waiting for a manual trigger.
    due: Option<Duration>,
}

#[derive(Debug, Default)]
struct VirtualState {
    now: Duration,
    next_id: u64,
    timers: Vec<VirtualTimer>,
    repaints: Vec<VirtualRepaint>,
    refresh_interval: Duration,
    manual_repaint: bool,
    scheduled: Vec<Duration>,
}

impl VirtualState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Virtual time source implementing [`FrameClock`].
///
/// Cloning yields another handle onto the same clock, so a test sink can
/// [`spend`](Self::spend) time while the player is rendering.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<VirtualState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align repaints to multiples of `interval` (zero: repaint immediately).
    pub fn with_refresh_interval(self, interval: Duration) -> Self {
        self.state.borrow_mut().refresh_interval = interval;
        self
    }

    /// Hold repaint requests until [`trigger_repaints`](Self::trigger_repaints).
    pub fn with_manual_repaint(self) -> Self {
        self.state.borrow_mut().manual_repaint = true;
        self
    }

    /// Move time forward without delivering anything.
    pub fn spend(&self, by: Duration) {
        let mut state = self.state.borrow_mut();
        state.now += by;
    }

    /// Every delay passed to `schedule_after`, in call order.
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.state.borrow().scheduled.clone()
    }

    /// Deadlines of outstanding timers, earliest first.
    pub fn pending_timers(&self) -> Vec<Duration> {
        let mut deadlines: Vec<_> = self
            .state
            .borrow()
            .timers
            .iter()
            .map(|t| t.deadline)
            .collect();
        deadlines.sort();
        deadlines
    }

    pub fn pending_repaints(&self) -> usize {
        self.state.borrow().repaints.len()
    }

    pub fn is_idle(&self) -> bool {
        let state = self.state.borrow();
        state.timers.is_empty() && state.repaints.is_empty()
    }

    /// Make every held repaint due at the current instant.
    pub fn trigger_repaints(&self) {
        let mut state = self.state.borrow_mut();
        let now = state.now;
        for r in state.repaints.iter_mut().filter(|r| r.due.is_none()) {
            r.due = Some(now);
        }
    }

    /// Remove and return the earliest event due at or before `limit`,
    /// moving the clock to its due time.
    pub fn pop_due(&self, limit: Duration) -> Option<ClockEvent> {
        let mut state = self.state.borrow_mut();

        let timer = state
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.deadline, t.handle.0))
            .map(|(i, t)| (t.deadline, t.handle.0, i));
        let repaint = state
            .repaints
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.due.map(|due| (due, r.handle.0, i)))
            .min();

        let pick_timer = match (timer, repaint) {
            (Some(t), Some(r)) => (t.0, t.1) <= (r.0, r.1),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        let event = if pick_timer {
            let (due, _, i) = timer?;
            if due > limit {
                return None;
            }
            let t = state.timers.remove(i);
            state.now = state.now.max(due);
            ClockEvent::Timer(t.handle)
        } else {
            let (due, _, i) = repaint?;
            if due > limit {
                return None;
            }
            let r = state.repaints.remove(i);
            state.now = state.now.max(due);
            ClockEvent::Repaint(r.handle)
        };
        Some(event)
    }

    fn settle(&self, at: Duration) {
        let mut state = self.state.borrow_mut();
        state.now = state.now.max(at);
    }
}

impl FrameClock for VirtualClock {
    fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let handle = TimerHandle(state.next_id());
        let deadline = state.now + delay;
        state.timers.push(VirtualTimer { handle, deadline });
        state.scheduled.push(delay);
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.state
            .borrow_mut()
            .timers
            .retain(|t| t.handle != handle);
    }

    fn request_repaint(&mut self) -> RepaintHandle {
        let mut state = self.state.borrow_mut();
        let handle = RepaintHandle(state.next_id());
        let due = (!state.manual_repaint).then(|| next_refresh(state.now, state.refresh_interval));
        state.repaints.push(VirtualRepaint { handle, due });
        handle
    }

    fn cancel_repaint(&mut self, handle: RepaintHandle) {
        self.state
            .borrow_mut()
            .repaints
            .retain(|r| r.handle != handle);
    }
}

impl<S: PlayerSink> Player<VirtualClock, S> {
    /// Advance virtual time by `by`, delivering every event that falls due
    /// in time order. Returns the number of events delivered.
    pub fn advance(&mut self, by: Duration) -> FlipbookResult<usize> {
        let target = self.clock().now().saturating_add(by);
        let mut delivered = 0usize;
        while let Some(event) = self.clock().pop_due(target) {
            self.handle(event)?;
            delivered += 1;
            if delivered >= MAX_EVENTS_PER_ADVANCE {
                return Err(FlipbookError::stalled(format!(
                    "{delivered} events without reaching {target:?}"
                )));
            }
        }
        self.clock().settle(target);
        Ok(delivered)
    }

    /// Deliver the single earliest pending event, whenever it is due.
    pub fn step(&mut self) -> FlipbookResult<Option<ClockEvent>> {
        let Some(event) = self.clock().pop_due(Duration::MAX) else {
            return Ok(None);
        };
        self.handle(event)?;
        Ok(Some(event))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/virtual_clock.rs"]
mod tests;
