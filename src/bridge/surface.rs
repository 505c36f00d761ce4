use crate::bridge::channel::{ChannelSource, MessageSink};
use crate::bridge::protocol::{Command, Envelope, Event, Origin, decode, encode};
use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};
use crate::generate::document::{
    Artifact, ArtifactKind, extract_assets, extract_config, extract_runtime,
};
use crate::playback::clock::Clock;
use crate::playback::controller::{Controller, ControllerOpts, EventSink};

/// Controller side of a session: a loaded artifact plus its two message queues.
pub struct Surface<C: Clock> {
    session: u64,
    controller: Controller<C>,
    inbound: ChannelSource<String>,
    outbound: Box<dyn MessageSink<String>>,
    initialized: bool,
}

impl<C: Clock> Surface<C> {
    /// Load `artifact` the way a fresh rendering surface would.
    ///
    /// Config, assets, session number and timing come from the artifact's data blocks. Fault
    /// artifacts carry no controller and are rejected.
    pub fn load(
        artifact: &Artifact,
        clock: C,
        inbound: ChannelSource<String>,
        outbound: Box<dyn MessageSink<String>>,
    ) -> ReelResult<Self> {
        if artifact.kind == ArtifactKind::Fault {
            return Err(ReelError::generation(
                "artifact is an error panel and has no controller",
            ));
        }
        let config = extract_config(&artifact.html)?;
        let assets = extract_assets(&artifact.html)?;
        let runtime = extract_runtime(&artifact.html)?;
        let opts = ControllerOpts {
            fallback_duration: Millis(runtime.fallback_duration),
            tick_interval: Millis(runtime.tick_interval),
        };
        Ok(Self {
            session: runtime.session,
            controller: Controller::with_opts(config, assets, clock, opts),
            inbound,
            outbound,
            initialized: false,
        })
    }

    /// Session number this surface stamps on its envelopes.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// How often the embedding should pump this surface, from the artifact's runtime block.
    pub fn tick_interval(&self) -> Millis {
        self.controller.opts().tick_interval
    }

    /// The controller driven by this surface.
    pub fn controller(&self) -> &Controller<C> {
        &self.controller
    }

    /// Initialize the controller, announcing `ready` to the Host.
    pub fn initialize(&mut self) {
        self.initialized = true;
        let mut out = Outbox::new(self.session, self.outbound.as_mut());
        self.controller.initialize(&mut out);
    }

    /// Apply every queued Host command, then advance the countdown.
    ///
    /// Commands that arrive before [`Surface::initialize`], fail to decode, or claim a
    /// non-Host origin are dropped.
    pub fn pump(&mut self) {
        let mut out = Outbox::new(self.session, self.outbound.as_mut());
        for wire in self.inbound.drain() {
            let env: Envelope<Command> = match decode(&wire) {
                Ok(env) => env,
                Err(err) => {
                    tracing::debug!(session = self.session, error = %err, "dropping undecodable command");
                    continue;
                }
            };
            if env.origin != Origin::Host {
                tracing::debug!(session = self.session, origin = %env.origin, "dropping command from foreign origin");
                continue;
            }
            if !self.initialized {
                tracing::debug!(session = self.session, "dropping command received before initialize");
                continue;
            }
            self.controller.apply(env.message, &mut out);
        }
        self.controller.tick(&mut out);
    }
}

struct Outbox<'a> {
    origin: Origin,
    sink: &'a mut dyn MessageSink<String>,
}

impl<'a> Outbox<'a> {
    fn new(session: u64, sink: &'a mut dyn MessageSink<String>) -> Self {
        Self {
            origin: Origin::Surface(session),
            sink,
        }
    }
}

impl EventSink for Outbox<'_> {
    fn emit(&mut self, event: Event) {
        match encode(&Envelope::new(self.origin, event)) {
            Ok(wire) => self.sink.send(wire),
            Err(err) => tracing::warn!(error = %err, "failed to encode event"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/surface.rs"]
mod tests;
