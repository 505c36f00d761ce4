use super::*;

#[test]
fn manual_clock_is_shared_between_clones() {
    let a = ManualClock::new();
    let b = a.clone();
    a.advance(Millis(250));
    assert_eq!(b.now(), Millis(250));
    b.set(Millis(1000));
    assert_eq!(a.now(), Millis(1000));
}

#[test]
fn manual_clock_never_goes_back() {
    let c = ManualClock::starting_at(Millis(500));
    c.set(Millis(100));
    assert_eq!(c.now(), Millis(500));
}

#[test]
fn system_clock_is_monotonic() {
    let c = SystemClock::new();
    let a = c.now();
    let b = c.now();
    assert!(b >= a);
}
