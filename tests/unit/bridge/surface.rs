use super::*;

use crate::bridge::channel::{ChannelSink, channel};
use crate::config::model::Config;
use crate::generate::document::{GenerateOpts, generate_with};
use crate::playback::clock::ManualClock;
use crate::playback::controller::PlaybackState;

fn sample() -> Config {
    Config::from_json_str(include_str!("../../data/sample_reel.json")).unwrap()
}

fn loaded(
    config: &Config,
    session: u64,
) -> (Surface<ManualClock>, ChannelSink<String>, ChannelSource<String>, ManualClock) {
    let opts = GenerateOpts {
        session,
        ..GenerateOpts::default()
    };
    let art = generate_with(config, &Default::default(), &opts);
    let (to_surface, inbound) = channel();
    let (outbound, from_surface) = channel();
    let clock = ManualClock::new();
    let surface = Surface::load(&art, clock.clone(), inbound, Box::new(outbound)).unwrap();
    (surface, to_surface, from_surface, clock)
}

fn host_send(tx: &mut ChannelSink<String>, cmd: Command) {
    tx.send(encode(&Envelope::new(Origin::Host, cmd)).unwrap());
}

fn events(rx: &ChannelSource<String>) -> Vec<Envelope<Event>> {
    rx.drain().iter().map(|w| decode(w).unwrap()).collect()
}

#[test]
fn ready_is_stamped_with_the_session_origin() {
    let (mut s, _tx, rx, _clock) = loaded(&sample(), 9);
    assert_eq!(s.session(), 9);
    s.initialize();
    let got = events(&rx);
    assert_eq!(
        got,
        vec![Envelope::new(
            Origin::Surface(9),
            Event::Ready {
                slide_count: 4,
                current_index: 0
            }
        )]
    );
}

#[test]
fn commands_before_initialize_are_dropped() {
    let (mut s, mut tx, rx, _clock) = loaded(&sample(), 1);
    host_send(&mut tx, Command::GoToSlide { index: 2 });
    s.pump();
    assert_eq!(s.controller().state(), PlaybackState::Idle);
    s.initialize();
    s.pump();
    assert_eq!(s.controller().current_index(), 0);
    assert_eq!(events(&rx).len(), 1);
}

#[test]
fn foreign_and_garbled_messages_are_dropped() {
    let (mut s, mut tx, rx, _clock) = loaded(&sample(), 1);
    s.initialize();
    rx.drain();
    tx.send(encode(&Envelope::new(Origin::Surface(1), Command::Next)).unwrap());
    tx.send("{not json".into());
    tx.send(r#"{"origin":"host","message":{"type":"launch"}}"#.into());
    s.pump();
    assert_eq!(s.controller().current_index(), 0);
    assert!(events(&rx).is_empty());
}

#[test]
fn pump_applies_commands_then_ticks() {
    let (mut s, mut tx, rx, clock) = loaded(&sample(), 2);
    s.initialize();
    rx.drain();
    host_send(&mut tx, Command::Play);
    s.pump();
    clock.advance(Millis(2000));
    s.pump();
    assert_eq!(s.controller().current_index(), 1);
    let got = events(&rx);
    assert!(got.iter().all(|e| e.origin == Origin::Surface(2)));
    assert!(got.iter().any(|e| matches!(
        &e.message,
        Event::SlideChanged { index: 1, slide_id } if slide_id == "tracks"
    )));
}

#[test]
fn loads_empty_artifacts_as_degenerate() {
    let mut cfg = sample();
    cfg.slides.clear();
    let (mut s, _tx, rx, _clock) = loaded(&cfg, 4);
    s.initialize();
    assert_eq!(s.controller().state(), PlaybackState::Degenerate);
    assert_eq!(events(&rx).len(), 1);
}

#[test]
fn fault_artifacts_are_rejected() {
    let art = Artifact {
        html: String::new(),
        slide_ids: Vec::new(),
        fingerprint: 0,
        kind: ArtifactKind::Fault,
    };
    let (_tx, inbound) = channel();
    let res = Surface::load(&art, ManualClock::new(), inbound, Box::new(Vec::<String>::new()));
    assert!(res.is_err());
}

#[test]
fn tick_interval_comes_from_the_runtime_block() {
    let opts = GenerateOpts {
        tick_interval_ms: 20,
        ..GenerateOpts::default()
    };
    let art = generate_with(&sample(), &Default::default(), &opts);
    let (_to_surface, inbound) = channel();
    let (outbound, _from_surface) = channel::<String>();
    let s = Surface::load(&art, ManualClock::new(), inbound, Box::new(outbound)).unwrap();
    assert_eq!(s.tick_interval(), Millis(20));

    let (s, _tx, _rx, _clock) = loaded(&sample(), 1);
    assert_eq!(s.tick_interval(), Millis(50));
}
