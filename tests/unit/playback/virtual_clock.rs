use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn timers_pop_in_deadline_order_and_move_time() {
    let mut clock = VirtualClock::new();
    let late = clock.schedule_after(ms(50));
    let early = clock.schedule_after(ms(20));

    assert_eq!(clock.pop_due(ms(10)), None);
    assert_eq!(clock.pop_due(ms(100)), Some(ClockEvent::Timer(early)));
    assert_eq!(clock.now(), ms(20));
    assert_eq!(clock.pop_due(ms(100)), Some(ClockEvent::Timer(late)));
    assert_eq!(clock.now(), ms(50));
    assert!(clock.is_idle());
}

#[test]
fn cancelled_timer_never_fires() {
    let mut clock = VirtualClock::new();
    let h = clock.schedule_after(ms(5));
    clock.cancel_timer(h);
    assert_eq!(clock.pop_due(ms(100)), None);
    assert_eq!(clock.scheduled_delays(), vec![ms(5)]);
}

#[test]
fn spend_moves_time_without_firing() {
    let mut clock = VirtualClock::new();
    clock.schedule_after(ms(10));
    clock.spend(ms(30));
    assert_eq!(clock.now(), ms(30));
    assert_eq!(clock.pending_timers(), vec![ms(10)]);
}

#[test]
fn repaint_aligns_to_refresh_interval() {
    let mut clock = VirtualClock::new().with_refresh_interval(ms(16));
    clock.spend(ms(5));
    let r = clock.request_repaint();
    assert_eq!(clock.pop_due(ms(15)), None);
    assert_eq!(clock.pop_due(ms(16)), Some(ClockEvent::Repaint(r)));
    assert_eq!(clock.now(), ms(16));
}

#[test]
fn manual_repaints_wait_for_trigger() {
    let mut clock = VirtualClock::new().with_manual_repaint();
    let r = clock.request_repaint();
    assert_eq!(clock.pop_due(Duration::MAX), None);
    assert_eq!(clock.pending_repaints(), 1);

    clock.trigger_repaints();
    assert_eq!(clock.pop_due(clock.now()), Some(ClockEvent::Repaint(r)));
}

#[test]
fn clones_share_one_timeline() {
    let clock = VirtualClock::new();
    let other = clock.clone();
    other.spend(ms(7));
    assert_eq!(clock.now(), ms(7));
}
