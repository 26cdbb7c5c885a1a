use super::*;

#[test]
fn starts_idle() {
    let s = RedrawScheduler::new();
    assert!(!s.is_pending());
    assert!(!s.take_due());
}

#[test]
fn due_requests_fire_once() {
    let s = RedrawScheduler::new();
    s.request(Duration::ZERO);
    assert!(s.is_pending());
    assert!(s.take_due());
    assert!(!s.is_pending());
    assert!(!s.take_due());
}

#[test]
fn future_requests_are_not_due_yet() {
    let s = RedrawScheduler::new();
    s.request(Duration::from_secs(60));
    assert!(s.is_pending());
    assert!(!s.take_due());
    assert!(s.is_pending());
}

#[test]
fn rescheduling_replaces_the_deadline() {
    let s = RedrawScheduler::new();
    s.request(Duration::from_secs(60));
    s.request(Duration::ZERO);
    assert!(s.take_due());
}

#[test]
fn cancel_clears_pending() {
    let s = RedrawScheduler::new();
    s.request(Duration::ZERO);
    s.cancel();
    assert!(!s.is_pending());
    assert!(!s.take_due());
}
