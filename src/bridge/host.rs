use crate::bridge::channel::MessageSink;
use crate::bridge::protocol::{Command, Envelope, Event, Origin, decode, encode};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The Host's mirror of the remote controller's state.
pub struct PlaybackView {
    /// Number of slides in the loaded artifact.
    pub slide_count: usize,
    /// Last reported active slide.
    pub current_index: usize,
    /// Last reported playback flag.
    pub is_playing: bool,
    /// Id of the last reported active slide, once a `slideChanged` arrived.
    pub current_slide_id: Option<String>,
}

/// Host side of the bridge: tracks one surface session at a time.
pub struct HostSession<S: MessageSink<String>> {
    outbound: Option<S>,
    expected_origin: Option<Origin>,
    ready: bool,
    view: PlaybackView,
    resume: Option<usize>,
}

impl<S: MessageSink<String>> Default for HostSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MessageSink<String>> HostSession<S> {
    /// A session tracker with no surface attached.
    pub fn new() -> Self {
        Self {
            outbound: None,
            expected_origin: None,
            ready: false,
            view: PlaybackView::default(),
            resume: None,
        }
    }

    /// Attach to a freshly loaded surface, discarding all state of the previous one.
    ///
    /// `resume`, if given, is sent as `goToSlide` as soon as the new surface is ready.
    pub fn begin_session(&mut self, session: u64, outbound: S, resume: Option<usize>) {
        tracing::info!(session, ?resume, "host session started");
        self.outbound = Some(outbound);
        self.expected_origin = Some(Origin::Surface(session));
        self.ready = false;
        self.view = PlaybackView::default();
        self.resume = resume;
    }

    /// Origin accepted for incoming events.
    pub fn expected_origin(&self) -> Option<Origin> {
        self.expected_origin
    }

    /// Whether the current surface announced `ready`.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Mirrored controller state.
    pub fn view(&self) -> &PlaybackView {
        &self.view
    }

    /// Send a command to the surface. Returns `false` (and drops it) until `ready`.
    pub fn send(&mut self, command: Command) -> bool {
        if !self.ready {
            tracing::debug!(?command, "surface not ready; command dropped");
            return false;
        }
        let Some(outbound) = self.outbound.as_mut() else {
            return false;
        };
        match encode(&Envelope::new(Origin::Host, command)) {
            Ok(wire) => {
                outbound.send(wire);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode command");
                false
            }
        }
    }

    /// Decode and handle one wire message. Returns the event if it was accepted.
    pub fn handle_wire(&mut self, wire: &str) -> Option<Event> {
        match decode::<Event>(wire) {
            Ok(env) => {
                let event = env.message.clone();
                self.handle(env).then_some(event)
            }
            Err(err) => {
                tracing::debug!(error = %err, "dropping undecodable event");
                None
            }
        }
    }

    /// Update the mirror from an event envelope. Returns `false` if it was dropped.
    pub fn handle(&mut self, envelope: Envelope<Event>) -> bool {
        if Some(envelope.origin) != self.expected_origin {
            tracing::debug!(origin = %envelope.origin, "dropping event from unexpected origin");
            return false;
        }
        match envelope.message {
            Event::Ready {
                slide_count,
                current_index,
            } => {
                if self.ready {
                    tracing::debug!("duplicate ready ignored");
                    return false;
                }
                self.ready = true;
                self.view.slide_count = slide_count;
                self.view.current_index = current_index;
                if let Some(index) = self.resume.take() {
                    self.send(Command::GoToSlide {
                        index: i64::try_from(index).unwrap_or(i64::MAX),
                    });
                }
            }
            Event::Status {
                is_playing,
                current_index,
                slide_count,
                ..
            } => {
                self.view.is_playing = is_playing;
                self.view.current_index = current_index;
                self.view.slide_count = slide_count;
            }
            Event::SlideChanged { index, slide_id } => {
                self.view.current_index = index;
                self.view.current_slide_id = Some(slide_id);
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/host.rs"]
mod tests;
