use super::*;

#[test]
fn idle_clock_returns_immediately() {
    let mut clock = SystemClock::new();
    assert!(clock.is_idle());
    assert_eq!(clock.wait_next(None), None);
}

#[test]
fn short_timer_fires_and_is_removed() {
    let mut clock = SystemClock::new().with_refresh_interval(Duration::ZERO);
    let h = clock.schedule_after(Duration::from_millis(2));
    assert_eq!(clock.wait_next(None), Some(ClockEvent::Timer(h)));
    assert!(clock.now() >= Duration::from_millis(2));
    assert!(clock.is_idle());
}

#[test]
fn stop_limit_returns_none_before_far_timer() {
    let mut clock = SystemClock::new();
    clock.schedule_after(Duration::from_secs(60));
    let stop = clock.now() + Duration::from_millis(1);
    assert_eq!(clock.wait_next(Some(stop)), None);
    assert!(!clock.is_idle());
}

#[test]
fn repaint_is_served_with_zero_interval() {
    let mut clock = SystemClock::new().with_refresh_interval(Duration::ZERO);
    let r = clock.request_repaint();
    assert_eq!(clock.wait_next(None), Some(ClockEvent::Repaint(r)));
}
