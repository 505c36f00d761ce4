//! In-process preview: a Host session and a surface joined by channels over a shared
//! [`ManualClock`].

use crate::bridge::channel::{ChannelSink, ChannelSource, channel};
use crate::bridge::host::HostSession;
use crate::bridge::protocol::{Command, Event};
use crate::bridge::surface::Surface;
use crate::config::model::{AssetTable, Config};
use crate::foundation::core::Millis;
use crate::foundation::error::ReelResult;
use crate::generate::document::{Artifact, GenerateOpts, generate_with};
use crate::playback::clock::{Clock, ManualClock};

/// Host, surface and clock wired together for previews, simulations and tests.
pub struct Preview {
    clock: ManualClock,
    assets: AssetTable,
    opts: GenerateOpts,
    session: u64,
    artifact: Artifact,
    host: HostSession<ChannelSink<String>>,
    host_inbox: ChannelSource<String>,
    host_outbox: ChannelSink<String>,
    surface: Surface<ManualClock>,
}

impl Preview {
    /// Generate `config` and load it into a fresh surface (session 1).
    pub fn new(config: &Config, assets: AssetTable) -> ReelResult<Self> {
        Self::with_opts(config, assets, GenerateOpts::default())
    }

    /// Like [`Preview::new`] with explicit generation options. `opts.session` is ignored.
    pub fn with_opts(config: &Config, assets: AssetTable, opts: GenerateOpts) -> ReelResult<Self> {
        let clock = ManualClock::new();
        let (host_outbox, host_inbox) = channel();
        let (artifact, surface, host) =
            Self::open(config, &assets, &opts, 1, &clock, &host_outbox, None)?;
        Ok(Self {
            clock,
            assets,
            opts,
            session: 1,
            artifact,
            host,
            host_inbox,
            host_outbox,
            surface,
        })
    }

    fn open(
        config: &Config,
        assets: &AssetTable,
        opts: &GenerateOpts,
        session: u64,
        clock: &ManualClock,
        host_outbox: &ChannelSink<String>,
        resume: Option<usize>,
    ) -> ReelResult<(Artifact, Surface<ManualClock>, HostSession<ChannelSink<String>>)> {
        let opts = GenerateOpts {
            session,
            ..opts.clone()
        };
        let artifact = generate_with(config, assets, &opts);
        let (to_surface, surface_inbox) = channel();
        let mut surface = Surface::load(
            &artifact,
            clock.clone(),
            surface_inbox,
            Box::new(host_outbox.clone()),
        )?;
        let mut host = HostSession::new();
        host.begin_session(session, to_surface, resume);
        surface.initialize();
        Ok((artifact, surface, host))
    }

    /// Regenerate from `config` into a new session. The old surface and its countdown are
    /// discarded; the selected slide is restored by id when it still exists.
    ///
    /// If the new artifact cannot be loaded the previous session stays in place.
    pub fn reload(&mut self, config: &Config) -> ReelResult<()> {
        let resume = self
            .host
            .view()
            .current_slide_id
            .as_deref()
            .and_then(|id| config.slide_index(id));
        let session = self.session + 1;
        let (artifact, surface, host) = Self::open(
            config,
            &self.assets,
            &self.opts,
            session,
            &self.clock,
            &self.host_outbox,
            resume,
        )?;
        self.session = session;
        self.artifact = artifact;
        self.surface = surface;
        self.host = host;
        tracing::info!(session, slides = config.slides.len(), "preview reloaded");
        Ok(())
    }

    /// Send a command through the Host session. `false` if the surface is not ready.
    pub fn send(&mut self, command: Command) -> bool {
        self.host.send(command)
    }

    /// Deliver queued messages both ways. Returns the events the Host accepted.
    pub fn pump(&mut self) -> Vec<Event> {
        let mut accepted = self.deliver_to_host();
        self.surface.pump();
        accepted.extend(self.deliver_to_host());
        self.surface.pump();
        accepted.extend(self.deliver_to_host());
        accepted
    }

    /// Advance the shared clock by `by`, then pump.
    pub fn advance(&mut self, by: Millis) -> Vec<Event> {
        self.clock.advance(by);
        self.pump()
    }

    /// Current clock reading.
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Current session number.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// The loaded artifact.
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// The Host session.
    pub fn host(&self) -> &HostSession<ChannelSink<String>> {
        &self.host
    }

    /// The surface of the current session.
    pub fn surface(&self) -> &Surface<ManualClock> {
        &self.surface
    }

    fn deliver_to_host(&mut self) -> Vec<Event> {
        self.host_inbox
            .drain()
            .iter()
            .filter_map(|wire| self.host.handle_wire(wire))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/preview.rs"]
mod tests;
