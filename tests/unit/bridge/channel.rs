use super::*;

#[test]
fn delivers_in_order() {
    let (mut tx, rx) = channel();
    tx.send(1);
    tx.send(2);
    let mut other = tx.clone();
    other.send(3);
    assert_eq!(rx.drain(), vec![1, 2, 3]);
    assert!(rx.drain().is_empty());
}

#[test]
fn sending_to_a_dropped_receiver_is_ignored() {
    let (mut tx, rx) = channel::<String>();
    drop(rx);
    tx.send("lost".into());
}

#[test]
fn vec_is_a_sink() {
    let mut out: Vec<&str> = Vec::new();
    MessageSink::send(&mut out, "a");
    assert_eq!(out, vec!["a"]);
}
