use std::sync::mpsc;

/// Fire-and-forget send primitive between Host and surface.
///
/// Delivery is best effort: a send towards a torn-down receiver is silently dropped.
pub trait MessageSink<M> {
    /// Queue `message` for the other side.
    fn send(&mut self, message: M);
}

impl<M> MessageSink<M> for Vec<M> {
    fn send(&mut self, message: M) {
        self.push(message);
    }
}

/// Sending half of an in-process channel.
#[derive(Debug)]
pub struct ChannelSink<M> {
    tx: mpsc::Sender<M>,
}

impl<M> Clone for ChannelSink<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M> MessageSink<M> for ChannelSink<M> {
    fn send(&mut self, message: M) {
        if self.tx.send(message).is_err() {
            tracing::debug!("receiver gone; message dropped");
        }
    }
}

/// Receiving half of an in-process channel.
#[derive(Debug)]
pub struct ChannelSource<M> {
    rx: mpsc::Receiver<M>,
}

impl<M> ChannelSource<M> {
    /// Every queued message, in send order.
    pub fn drain(&self) -> Vec<M> {
        self.rx.try_iter().collect()
    }
}

/// Build a connected in-process pair. Messages arrive in send order.
pub fn channel<M>() -> (ChannelSink<M>, ChannelSource<M>) {
    let (tx, rx) = mpsc::channel();
    (ChannelSink { tx }, ChannelSource { rx })
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/channel.rs"]
mod tests;
