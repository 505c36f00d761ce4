//! Reference playback state machine.
//!
//! The embedded document script implements the same transitions; this model is driven by an
//! abstract [`Clock`] so hosts and tests can reason about playback without a browser.

use crate::bridge::protocol::{Command, Event, StatusReason};
use crate::config::model::{AssetTable, Config};
use crate::foundation::core::{Millis, progress_ratio, wrap_index};
use crate::generate::icons::IconRegistry;
use crate::generate::markup::Element;
use crate::generate::templates::{Resolver, slide_container};
use crate::playback::clock::Clock;

/// Receiver of controller events, in emission order.
pub trait EventSink {
    /// Accept one event.
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

#[derive(Clone, Copy, Debug)]
/// Tunables for a [`Controller`].
pub struct ControllerOpts {
    /// Duration used when neither the slide nor the config provides one.
    pub fallback_duration: Millis,
    /// Suggested polling period for [`Controller::tick`].
    pub tick_interval: Millis,
}

impl Default for ControllerOpts {
    fn default() -> Self {
        Self {
            fallback_duration: Millis(5000),
            tick_interval: Millis(50),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Lifecycle state of a [`Controller`].
pub enum PlaybackState {
    /// Constructed, not yet initialized.
    Idle,
    /// A slide is visible.
    Showing,
    /// Initialized with zero slides; commands are ignored.
    Degenerate,
}

#[derive(Clone, Debug)]
/// One built slide and its visibility.
pub struct SlideContainer {
    /// Slide id.
    pub id: String,
    /// Whether this container is the visible one.
    pub active: bool,
    /// Built `<section>` tree.
    pub node: Element,
}

/// Playback controller over one config.
#[derive(Debug)]
pub struct Controller<C: Clock> {
    clock: C,
    opts: ControllerOpts,
    config: Config,
    assets: AssetTable,
    state: PlaybackState,
    containers: Vec<SlideContainer>,
    durations: Vec<Millis>,
    current_index: usize,
    is_playing: bool,
    anchor: Millis,
    carried: Millis,
}

impl<C: Clock> Controller<C> {
    /// Controller for `config` with default options.
    pub fn new(config: Config, assets: AssetTable, clock: C) -> Self {
        Self::with_opts(config, assets, clock, ControllerOpts::default())
    }

    /// Controller for `config`.
    pub fn with_opts(config: Config, assets: AssetTable, clock: C, opts: ControllerOpts) -> Self {
        let mut this = Self {
            clock,
            opts,
            config,
            assets,
            state: PlaybackState::Idle,
            containers: Vec::new(),
            durations: Vec::new(),
            current_index: 0,
            is_playing: false,
            anchor: Millis::ZERO,
            carried: Millis::ZERO,
        };
        this.rebuild();
        this
    }

    /// Lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the visible slide.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether a countdown is running.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.containers.len()
    }

    /// Per-slide durations in playback order.
    pub fn durations(&self) -> &[Millis] {
        &self.durations
    }

    /// Built slide containers in playback order.
    pub fn containers(&self) -> &[SlideContainer] {
        &self.containers
    }

    /// Config the containers were built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Options this controller was built with.
    pub fn opts(&self) -> &ControllerOpts {
        &self.opts
    }

    /// Idle → Showing(0), or Degenerate for an empty config. Emits `ready` exactly once.
    pub fn initialize(&mut self, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Idle {
            return;
        }
        if self.containers.is_empty() {
            self.state = PlaybackState::Degenerate;
        } else {
            self.state = PlaybackState::Showing;
            self.activate(0);
        }
        sink.emit(Event::Ready {
            slide_count: self.slide_count(),
            current_index: self.current_index,
        });
        if self.config.general.timing.auto_play {
            self.play(sink);
        }
    }

    /// Activate slide `index`, wrapping any out-of-range value into range.
    pub fn show_slide(&mut self, index: i64, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Showing {
            return;
        }
        let Some(i) = wrap_index(index, self.containers.len()) else {
            return;
        };
        self.activate(i);
        self.carried = Millis::ZERO;
        if self.is_playing {
            self.anchor = self.clock.now();
        }
        self.emit_slide_changed(sink);
    }

    /// Show the following slide.
    pub fn next(&mut self, sink: &mut dyn EventSink) {
        self.show_slide(self.current_index as i64 + 1, sink);
    }

    /// Show the preceding slide.
    pub fn prev(&mut self, sink: &mut dyn EventSink) {
        self.show_slide(self.current_index as i64 - 1, sink);
    }

    /// Start (or resume) the countdown of the current slide.
    pub fn play(&mut self, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Showing || self.is_playing {
            return;
        }
        self.is_playing = true;
        self.anchor = self.clock.now();
        sink.emit(self.status(StatusReason::PlaybackChanged));
    }

    /// Stop the countdown, keeping the elapsed time for a later [`Controller::play`].
    pub fn pause(&mut self, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Showing || !self.is_playing {
            return;
        }
        self.carried = self.elapsed();
        self.is_playing = false;
        sink.emit(self.status(StatusReason::PlaybackChanged));
    }

    /// Set the current slide's duration and restart its countdown from now.
    ///
    /// A zero duration restores the presentation default.
    pub fn set_duration(&mut self, duration: Millis, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Showing {
            return;
        }
        let duration = if duration.is_zero() {
            self.default_duration()
        } else {
            duration
        };
        if let Some(d) = self.durations.get_mut(self.current_index) {
            *d = duration;
        }
        self.carried = Millis::ZERO;
        if self.is_playing {
            self.anchor = self.clock.now();
        }
        sink.emit(self.status(StatusReason::DurationChanged));
    }

    /// Rebuild every container from `config`, keeping the current index (wrapped).
    pub fn update_config(&mut self, config: Config, sink: &mut dyn EventSink) {
        let was = self.state;
        if was == PlaybackState::Degenerate && config.slides.is_empty() {
            self.config = config;
            return;
        }
        self.config = config;
        self.rebuild();
        match was {
            PlaybackState::Idle => {}
            _ if self.containers.is_empty() => {
                self.state = PlaybackState::Degenerate;
                self.is_playing = false;
                self.carried = Millis::ZERO;
                self.current_index = 0;
                sink.emit(self.status(StatusReason::ConfigUpdated));
            }
            _ => {
                self.state = PlaybackState::Showing;
                self.show_slide(self.current_index as i64, sink);
            }
        }
    }

    /// Poll the clock and advance past every elapsed countdown.
    ///
    /// Each following countdown is anchored at the previous deadline, so the tick period never
    /// accumulates as drift. Whole loops over the sequence that fit into the lag are skipped
    /// without events.
    pub fn tick(&mut self, sink: &mut dyn EventSink) {
        if self.state != PlaybackState::Showing || !self.is_playing {
            return;
        }
        let now = self.clock.now();
        let Some(deadline) = self.next_deadline() else {
            return;
        };
        let cycle = self
            .durations
            .iter()
            .fold(0u64, |acc, d| acc.saturating_add(d.0));
        if cycle == 0 {
            return;
        }
        let lag = now.saturating_sub(deadline).0;
        if lag >= cycle {
            self.anchor = self.anchor.saturating_add(Millis(lag / cycle * cycle));
        }
        while let Some(deadline) = self.next_deadline() {
            if now < deadline {
                break;
            }
            let next = (self.current_index + 1) % self.containers.len();
            self.activate(next);
            self.carried = Millis::ZERO;
            self.anchor = deadline;
            self.emit_slide_changed(sink);
        }
    }

    /// Dispatch a decoded command.
    pub fn apply(&mut self, command: Command, sink: &mut dyn EventSink) {
        match command {
            Command::Play => self.play(sink),
            Command::Pause => self.pause(sink),
            Command::Next => self.next(sink),
            Command::Prev => self.prev(sink),
            Command::GoToSlide { index } => self.show_slide(index, sink),
            Command::SetDuration { duration } => self.set_duration(duration, sink),
            Command::UpdateConfig { config } => self.update_config(*config, sink),
        }
    }

    /// Time spent on the current slide, excluding paused time.
    pub fn elapsed(&self) -> Millis {
        if self.is_playing {
            self.carried
                .saturating_add(self.clock.now().saturating_sub(self.anchor))
        } else {
            self.carried
        }
    }

    /// Completion of the current countdown in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.state != PlaybackState::Showing {
            return 0.0;
        }
        match self.durations.get(self.current_index) {
            Some(d) => progress_ratio(self.elapsed(), *d),
            None => 0.0,
        }
    }

    /// Clock reading at which the running countdown elapses.
    pub fn next_deadline(&self) -> Option<Millis> {
        if self.state != PlaybackState::Showing || !self.is_playing {
            return None;
        }
        let d = *self.durations.get(self.current_index)?;
        Some(self.anchor.saturating_add(d.saturating_sub(self.carried)))
    }

    /// Index of the active container, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.containers.iter().position(|c| c.active)
    }

    fn default_duration(&self) -> Millis {
        let d = self.config.general.timing.default_slide_duration;
        if d.is_zero() {
            self.opts.fallback_duration
        } else {
            d
        }
    }

    fn rebuild(&mut self) {
        let icons = IconRegistry::with_assets(&self.assets);
        let resolver = Resolver::new(&icons, &self.assets.logo_images);
        self.containers = self
            .config
            .slides
            .iter()
            .enumerate()
            .map(|(i, s)| SlideContainer {
                id: s.id.clone(),
                active: false,
                node: slide_container(i, s, &resolver),
            })
            .collect();
        let fallback = self.default_duration();
        self.durations = self
            .config
            .durations()
            .into_iter()
            .map(|d| if d.is_zero() { fallback } else { d })
            .collect();
    }

    fn activate(&mut self, index: usize) {
        for (i, c) in self.containers.iter_mut().enumerate() {
            c.active = i == index;
        }
        self.current_index = index;
    }

    fn status(&self, reason: StatusReason) -> Event {
        Event::Status {
            reason,
            is_playing: self.is_playing,
            current_index: self.current_index,
            slide_count: self.slide_count(),
        }
    }

    fn emit_slide_changed(&self, sink: &mut dyn EventSink) {
        sink.emit(self.status(StatusReason::SlideChanged));
        if let Some(c) = self.containers.get(self.current_index) {
            sink.emit(Event::SlideChanged {
                index: self.current_index,
                slide_id: c.id.clone(),
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
