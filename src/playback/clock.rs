use std::time::Duration;

/// Handle for a pending "schedule after" timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Handle for a pending "before next repaint" callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepaintHandle(pub u64);

/// A fired scheduling primitive, delivered by the host to [`crate::Player::handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockEvent {
    Timer(TimerHandle),
    Repaint(RepaintHandle),
}

/// The two scheduling primitives the player needs from its host.
///
/// Implementations never call back into the player. They hand out handles,
/// and the host later feeds fired handles to [`crate::Player::handle`].
/// `now` must be monotonic.
pub trait FrameClock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;

    /// Arm a one-shot timeout firing `delay` from now.
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    fn cancel_timer(&mut self, handle: TimerHandle);

    /// Ask for a callback aligned with the next display refresh.
    fn request_repaint(&mut self) -> RepaintHandle;

    fn cancel_repaint(&mut self, handle: RepaintHandle);
}

/// Next refresh boundary at or after `now` for a fixed refresh interval.
///
/// A zero interval means repaints are due immediately.
pub(crate) fn next_refresh(now: Duration, interval: Duration) -> Duration {
    if interval.is_zero() {
        return now;
    }
    let interval_ns = interval.as_nanos();
    let now_ns = now.as_nanos();
    let ticks = now_ns.div_ceil(interval_ns);
    let due_ns = ticks * interval_ns;
    Duration::from_nanos(u64::try_from(due_ns).unwrap_or(u64::MAX))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
