use super::*;

use crate::bridge::channel::MessageSink;
use crate::bridge::protocol::{Envelope, Origin, encode};

fn sample() -> Config {
    Config::from_json_str(include_str!("../../data/sample_reel.json")).unwrap()
}

fn at_tracks(p: &mut Preview) {
    p.pump();
    assert!(p.send(Command::Play));
    p.pump();
    p.advance(Millis(2000));
    assert_eq!(p.host().view().current_slide_id.as_deref(), Some("tracks"));
}

#[test]
fn host_becomes_ready_after_first_pump() {
    let mut p = Preview::new(&sample(), AssetTable::default()).unwrap();
    assert_eq!(p.session(), 1);
    assert!(!p.send(Command::Play));
    let events = p.pump();
    assert!(matches!(events.as_slice(), [Event::Ready { slide_count: 4, .. }]));
    assert!(p.host().is_ready());
    assert!(p.send(Command::Play));
}

#[test]
fn countdown_is_driven_by_the_shared_clock() {
    let mut p = Preview::new(&sample(), AssetTable::default()).unwrap();
    at_tracks(&mut p);
    assert_eq!(p.now(), Millis(2000));
    assert_eq!(p.surface().controller().current_index(), 1);
    assert!(p.host().view().is_playing);
}

#[test]
fn reload_restores_selection_by_id() {
    let mut p = Preview::new(&sample(), AssetTable::default()).unwrap();
    at_tracks(&mut p);

    let mut cfg = sample();
    cfg.slides.reverse();
    p.reload(&cfg).unwrap();
    assert_eq!(p.session(), 2);
    assert!(!p.host().is_ready());

    let events = p.pump();
    assert!(matches!(events.first(), Some(Event::Ready { .. })));
    assert_eq!(p.surface().controller().current_index(), 2);
    assert_eq!(p.host().view().current_slide_id.as_deref(), Some("tracks"));
    assert!(!p.host().view().is_playing);
}

#[test]
fn reload_without_the_selected_slide_starts_at_zero() {
    let mut p = Preview::new(&sample(), AssetTable::default()).unwrap();
    at_tracks(&mut p);

    let mut cfg = sample();
    cfg.slides.retain(|s| s.id != "tracks");
    p.reload(&cfg).unwrap();
    p.pump();
    assert_eq!(p.surface().controller().current_index(), 0);
    assert_eq!(p.host().view().slide_count, 3);
    assert_eq!(p.host().view().current_slide_id, None);
}

#[test]
fn events_from_a_previous_session_are_dropped() {
    let mut p = Preview::new(&sample(), AssetTable::default()).unwrap();
    p.pump();
    p.reload(&sample()).unwrap();
    p.pump();

    let stale = encode(&Envelope::new(
        Origin::Surface(1),
        Event::SlideChanged {
            index: 3,
            slide_id: "signup".into(),
        },
    ))
    .unwrap();
    p.host_outbox.send(stale);
    assert!(p.pump().is_empty());
    assert_eq!(p.host().view().current_index, 0);
    assert_eq!(p.host().view().current_slide_id, None);
}

#[test]
fn empty_reel_reports_ready_with_no_slides() {
    let mut cfg = sample();
    cfg.slides.clear();
    let mut p = Preview::new(&cfg, AssetTable::default()).unwrap();
    let events = p.pump();
    assert!(matches!(events.as_slice(), [Event::Ready { slide_count: 0, .. }]));
    assert!(p.send(Command::Next));
    assert!(p.pump().is_empty());
}
