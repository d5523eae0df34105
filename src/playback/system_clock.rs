use std::time::{Duration, Instant};

use crate::{
    foundation::error::FlipbookResult,
    playback::{
        clock::{ClockEvent, FrameClock, RepaintHandle, TimerHandle, next_refresh},
        player::Player,
        sink::PlayerSink,
    },
};

/// Default emulated display refresh (60 Hz).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_micros(16_667);

/// Wall-clock [`FrameClock`] backed by [`Instant`].
///
/// There is no display to synchronize with, so repaints are emulated on a
/// fixed refresh grid anchored at the clock's origin.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    next_id: u64,
    timers: Vec<(TimerHandle, Duration)>,
    repaints: Vec<RepaintHandle>,
    refresh_interval: Duration,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_id: 0,
            timers: Vec::new(),
            repaints: Vec::new(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.repaints.is_empty()
    }

    /// Block until the next event is due and return it.
    ///
    /// Returns `None` when nothing is pending, or once `stop_at` passes
    /// before the next event would fire.
    pub fn wait_next(&mut self, stop_at: Option<Duration>) -> Option<ClockEvent> {
        let now = self.now();
        let repaint_due = (!self.repaints.is_empty()).then(|| next_refresh(now, self.refresh_interval));
        let timer = self
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, (h, deadline))| (*deadline, h.0))
            .map(|(i, (_, deadline))| (i, *deadline));

        let (due, event) = match (timer, repaint_due) {
            (Some((i, deadline)), Some(rdue)) if deadline < rdue => {
                (deadline, ClockEvent::Timer(self.timers[i].0))
            }
            (_, Some(rdue)) => (rdue, ClockEvent::Repaint(self.repaints[0])),
            (Some((i, deadline)), None) => (deadline, ClockEvent::Timer(self.timers[i].0)),
            (None, None) => return None,
        };

        if let Some(stop) = stop_at.filter(|stop| due > *stop) {
            sleep_until(self.origin, stop);
            return None;
        }
        sleep_until(self.origin, due);

        match event {
            ClockEvent::Timer(h) => self.cancel_timer(h),
            ClockEvent::Repaint(h) => self.cancel_repaint(h),
        }
        Some(event)
    }
}

fn sleep_until(origin: Instant, at: Duration) {
    let elapsed = origin.elapsed();
    if at > elapsed {
        std::thread::sleep(at - elapsed);
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push((handle, self.now() + delay));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }

    fn request_repaint(&mut self) -> RepaintHandle {
        self.next_id += 1;
        let handle = RepaintHandle(self.next_id);
        self.repaints.push(handle);
        handle
    }

    fn cancel_repaint(&mut self, handle: RepaintHandle) {
        self.repaints.retain(|h| *h != handle);
    }
}

impl<S: PlayerSink> Player<SystemClock, S> {
    /// Drive playback in real time on the calling thread.
    ///
    /// Returns once playback pauses with nothing pending, or after `limit`
    /// has elapsed. The result is the number of events delivered.
    pub fn run(&mut self, limit: Option<Duration>) -> FlipbookResult<usize> {
        let stop_at = limit.map(|l| self.clock().now().saturating_add(l));
        let mut delivered = 0usize;
        while let Some(event) = self.clock_mut().wait_next(stop_at) {
            self.handle(event)?;
            delivered += 1;
        }
        tracing::debug!(delivered, playing = self.is_playing(), "run finished");
        Ok(delivered)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/system_clock.rs"]
mod tests;
