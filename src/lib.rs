//! reelkit builds vertical slide reels: a typed configuration, a self-contained HTML artifact,
//! and a playback controller driven by messages.
//!
//! The public API follows the life of a reel:
//!
//! - Load and validate a [`Config`] (or edit one through a [`Project`])
//! - [`generate`] a self-contained [`Artifact`]
//! - Drive a [`Controller`] directly, or through a [`Surface`] and a [`HostSession`] exchanging
//!   [`Envelope`]s over a [`channel`]
//!
//! [`Preview`] wires a Host session and a surface together over a [`ManualClock`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod bridge;
pub(crate) mod config;
pub(crate) mod generate;
pub(crate) mod playback;

pub use crate::foundation::core::{Millis, progress_ratio, wrap_index};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::config::edit::{GeneralPatch, Project, SlideIdAllocator, SlidePatch};
pub use crate::config::model::{
    AssetTable, Background, Config, CtaContent, DEFAULT_SLIDE_DURATION,
    DEFAULT_TRANSITION_DURATION, Direction, FeaturesContent, Fonts, GeneralSettings, IconItem,
    ListContent, LogoRef, Slide, SlideContent, SlideKind, SlideTiming, Theme, TimingDefaults,
    TitleContent, Transition,
};
pub use crate::config::validate::{
    SchemaError, SchemaErrors, SchemaPathElem, load_config, load_project, validate,
    validate_report,
};

pub use crate::generate::document::{
    Artifact, ArtifactKind, CONFIG_BLOCK_ID, FALLBACK_SLIDE_DURATION_MS, GenerateOpts,
    RESOURCES_BLOCK_ID, RUNTIME_BLOCK_ID, RuntimeSettings, data_block, extract_assets,
    extract_config, extract_runtime, generate, generate_with, import_config,
};
pub use crate::generate::icons::{BUILTIN_ICONS, IconRegistry};
pub use crate::generate::markup::{Element, Node};
pub use crate::generate::templates::{
    Resolver, background_style, cta_slide, features_slide, list_slide, slide_container,
    slide_containers, slide_content, title_slide,
};

pub use crate::playback::clock::{Clock, ManualClock, SystemClock};
pub use crate::playback::controller::{
    Controller, ControllerOpts, EventSink, PlaybackState, SlideContainer,
};

pub use crate::bridge::channel::{ChannelSink, ChannelSource, MessageSink, channel};
pub use crate::bridge::host::{HostSession, PlaybackView};
pub use crate::bridge::preview::Preview;
pub use crate::bridge::protocol::{
    Command, Envelope, Event, Origin, StatusReason, decode, encode,
};
pub use crate::bridge::surface::Surface;
