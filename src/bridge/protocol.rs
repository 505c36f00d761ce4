use std::fmt;
use std::str::FromStr;

use crate::config::model::Config;
use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Host → controller command.
pub enum Command {
    /// Start the countdown if paused.
    Play,
    /// Stop the countdown if playing.
    Pause,
    /// Show the following slide (wrapping).
    Next,
    /// Show the preceding slide (wrapping).
    Prev,
    /// Show the slide at `index` (wrapping).
    #[serde(alias = "showSlide")]
    GoToSlide {
        /// Any signed index; normalized by wraparound.
        index: i64,
    },
    /// Override the current slide's duration.
    SetDuration {
        /// New duration. Zero restores the presentation default.
        duration: Millis,
    },
    /// Rebuild every slide from a new config.
    UpdateConfig {
        /// Replacement config.
        config: Box<Config>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Why a `status` event was sent.
pub enum StatusReason {
    /// A different slide became active.
    SlideChanged,
    /// Playback started or stopped.
    PlaybackChanged,
    /// The current slide's duration changed.
    DurationChanged,
    /// The slide sequence was replaced by an empty one.
    ConfigUpdated,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Controller → Host event.
pub enum Event {
    /// Initialization finished. Sent exactly once per session.
    #[serde(rename_all = "camelCase")]
    Ready {
        /// Number of slides.
        slide_count: usize,
        /// Active slide.
        current_index: usize,
    },
    /// Aggregate state after a transition.
    #[serde(rename_all = "camelCase")]
    Status {
        /// Transition that caused this event.
        reason: StatusReason,
        /// Whether a countdown is running.
        is_playing: bool,
        /// Active slide.
        current_index: usize,
        /// Number of slides.
        slide_count: usize,
    },
    /// A slide became active.
    #[serde(rename_all = "camelCase")]
    SlideChanged {
        /// Index of the now active slide.
        index: usize,
        /// Id of the now active slide.
        slide_id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Sender identity claimed by an envelope.
pub enum Origin {
    /// The Host application.
    Host,
    /// The rendering surface of one session.
    Surface(u64),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("host"),
            Self::Surface(session) => write!(f, "surface:{session}"),
        }
    }
}

impl FromStr for Origin {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        if s == "host" {
            return Ok(Self::Host);
        }
        s.strip_prefix("surface:")
            .and_then(|n| n.parse().ok())
            .map(Self::Surface)
            .ok_or_else(|| ReelError::protocol(format!("unknown origin '{s}'")))
    }
}

impl serde::Serialize for Origin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Origin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A message plus the origin its sender claims.
pub struct Envelope<M> {
    /// Claimed sender.
    pub origin: Origin,
    /// Payload.
    pub message: M,
}

impl<M> Envelope<M> {
    /// Wrap `message` as sent from `origin`.
    pub fn new(origin: Origin, message: M) -> Self {
        Self { origin, message }
    }
}

/// Encode an envelope as wire JSON.
pub fn encode<M: serde::Serialize>(envelope: &Envelope<M>) -> ReelResult<String> {
    serde_json::to_string(envelope).map_err(|e| ReelError::serde(format!("encode envelope: {e}")))
}

/// Decode wire JSON into an envelope. Unknown message types are protocol errors.
pub fn decode<M: serde::de::DeserializeOwned>(json: &str) -> ReelResult<Envelope<M>> {
    serde_json::from_str(json).map_err(|e| ReelError::protocol(format!("decode envelope: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/protocol.rs"]
mod tests;
