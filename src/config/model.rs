use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::ser::SerializeStruct as _;

use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};

/// Built-in default for `general.timing.defaultSlideDuration`.
pub const DEFAULT_SLIDE_DURATION: Millis = Millis(5000);
/// Built-in default for `general.timing.defaultTransitionDuration`.
pub const DEFAULT_TRANSITION_DURATION: Millis = Millis(800);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete reel: presentation-wide settings plus slides in playback order.
///
/// The config is a pure data model exchanged as JSON. It is compiled into a playable document
/// by [`crate::generate`] and never mutated by the engine.
pub struct Config {
    /// Presentation-wide settings.
    pub general: GeneralSettings,
    /// Slides in playback order.
    pub slides: Vec<Slide>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Presentation-wide settings.
pub struct GeneralSettings {
    /// Document title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// Text direction of the whole document.
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Direction,
    /// Color tokens bound to style variables.
    #[serde(deserialize_with = "lenient")]
    pub theme: Theme,
    /// Default timing applied to slides that do not set their own.
    #[serde(deserialize_with = "lenient")]
    pub timing: TimingDefaults,
    /// Heading/body font pair.
    #[serde(deserialize_with = "lenient")]
    pub fonts: Fonts,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Document text direction.
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// HTML/CSS keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Theme colors. Each value is an opaque CSS color token.
pub struct Theme {
    /// Accent used for progress and highlights.
    #[serde(deserialize_with = "lenient")]
    pub primary_color: String,
    /// Secondary accent (motivational text, CTA button).
    #[serde(deserialize_with = "lenient")]
    pub secondary_color: String,
    /// Default slide background.
    #[serde(deserialize_with = "lenient")]
    pub background_color: String,
    /// Body text color.
    #[serde(deserialize_with = "lenient")]
    pub text_color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Font pair. Values are CSS `font-family` lists.
pub struct Fonts {
    /// Font for headings.
    #[serde(deserialize_with = "lenient")]
    pub heading_font: String,
    /// Font for body text.
    #[serde(deserialize_with = "lenient")]
    pub body_font: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Presentation-wide timing defaults.
pub struct TimingDefaults {
    /// Duration of slides without their own `timing.duration`.
    #[serde(deserialize_with = "lenient_slide_duration")]
    pub default_slide_duration: Millis,
    /// Duration of enter/exit transition animations.
    #[serde(deserialize_with = "lenient_transition_duration")]
    pub default_transition_duration: Millis,
    /// Start playback as soon as the controller is ready.
    #[serde(deserialize_with = "lenient")]
    pub auto_play: bool,
}

impl Default for TimingDefaults {
    fn default() -> Self {
        Self {
            default_slide_duration: DEFAULT_SLIDE_DURATION,
            default_transition_duration: DEFAULT_TRANSITION_DURATION,
            auto_play: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Closed set of slide archetypes.
pub enum SlideKind {
    /// Title card.
    Title,
    /// Titled list of icon items.
    List,
    /// Feature list plus participation modes.
    Features,
    /// Call to action.
    Cta,
}

impl SlideKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::Title, Self::List, Self::Features, Self::Cta];

    /// Wire tag of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::List => "list",
            Self::Features => "features",
            Self::Cta => "cta",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One screen of the reel.
///
/// On the wire the `type` tag and the `content` object are sibling keys; in Rust they are fused
/// into [`SlideContent`] so a slide can never carry content of the wrong shape.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "SlideRepr")]
pub struct Slide {
    /// Caller-assigned id, unique within a config.
    pub id: String,
    /// Type-specific content.
    pub content: SlideContent,
    /// Per-slide timing.
    pub timing: SlideTiming,
    /// Background fill.
    pub background: Background,
    /// Optional logo strip.
    pub logos: Option<Vec<LogoRef>>,
}

impl Slide {
    /// Archetype of this slide.
    pub fn kind(&self) -> SlideKind {
        self.content.kind()
    }

    /// Duration this slide stays on screen while playing.
    ///
    /// An absent or zero `timing.duration` falls back to the presentation default.
    pub fn effective_duration(&self, defaults: &TimingDefaults) -> Millis {
        match self.timing.duration {
            Some(d) if !d.is_zero() => d,
            _ => defaults.default_slide_duration,
        }
    }
}

#[derive(serde::Deserialize)]
struct SlideRepr {
    #[serde(deserialize_with = "slide_id")]
    id: String,
    #[serde(rename = "type")]
    kind: SlideKind,
    #[serde(default)]
    content: serde_json::Value,
    #[serde(deserialize_with = "lenient")]
    timing: SlideTiming,
    #[serde(deserialize_with = "lenient")]
    background: Background,
    #[serde(default, deserialize_with = "lenient_opt_seq")]
    logos: Option<Vec<LogoRef>>,
}

impl TryFrom<SlideRepr> for Slide {
    type Error = ReelError;

    fn try_from(repr: SlideRepr) -> ReelResult<Self> {
        let content = SlideContent::from_value(repr.kind, repr.content)
            .map_err(|e| ReelError::serde(format!("slide '{}' content: {e}", repr.id)))?;
        Ok(Self {
            id: repr.id,
            content,
            timing: repr.timing,
            background: repr.background,
            logos: repr.logos,
        })
    }
}

impl serde::Serialize for Slide {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let len = if self.logos.is_some() { 6 } else { 5 };
        let mut st = serializer.serialize_struct("Slide", len)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("type", &self.kind())?;
        st.serialize_field("content", &self.content)?;
        st.serialize_field("timing", &self.timing)?;
        st.serialize_field("background", &self.background)?;
        if let Some(logos) = &self.logos {
            st.serialize_field("logos", logos)?;
        }
        st.end()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// Content of a slide, discriminated by its archetype.
pub enum SlideContent {
    /// `type: "title"`.
    Title(TitleContent),
    /// `type: "list"`.
    List(ListContent),
    /// `type: "features"`.
    Features(FeaturesContent),
    /// `type: "cta"`.
    Cta(CtaContent),
}

impl SlideContent {
    /// Archetype tag matching this content.
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title(_) => SlideKind::Title,
            Self::List(_) => SlideKind::List,
            Self::Features(_) => SlideKind::Features,
            Self::Cta(_) => SlideKind::Cta,
        }
    }

    /// Decode a raw `content` object against the shape of `kind`.
    ///
    /// Missing fields and fields of the wrong JSON type take their defaults, so they render as
    /// omitted content. Anything but an object decodes as an empty object.
    pub fn from_value(kind: SlideKind, value: serde_json::Value) -> serde_json::Result<Self> {
        let value = if value.is_object() {
            value
        } else {
            serde_json::Value::Object(serde_json::Map::new())
        };
        Ok(match kind {
            SlideKind::Title => Self::Title(serde_json::from_value(value)?),
            SlideKind::List => Self::List(serde_json::from_value(value)?),
            SlideKind::Features => Self::Features(serde_json::from_value(value)?),
            SlideKind::Cta => Self::Cta(serde_json::from_value(value)?),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Content of a title slide.
pub struct TitleContent {
    /// Headline.
    #[serde(default, deserialize_with = "lenient")]
    pub main_title: String,
    /// Secondary headline.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    /// Short line shown above the headline.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub motivational_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Content of a list slide.
pub struct ListContent {
    /// List heading.
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// Entries in display order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Vec<IconItem>,
    /// Short line shown after the list.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub motivational_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Content of a features slide.
pub struct FeaturesContent {
    /// Heading.
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// Feature entries in display order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub features: Vec<IconItem>,
    /// Ways to take part, shown as a row under the features.
    #[serde(
        default,
        deserialize_with = "lenient_opt_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub participation_modes: Option<Vec<IconItem>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Content of a call-to-action slide.
pub struct CtaContent {
    /// Heading.
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// Target of the action button.
    #[serde(default, deserialize_with = "lenient")]
    pub cta_link: String,
    /// Label of the action button.
    #[serde(default, deserialize_with = "lenient")]
    pub cta_text: String,
    /// Line under the heading.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Show a QR placeholder bound to `cta_link`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A text entry with an optional icon reference.
pub struct IconItem {
    /// Entry text.
    #[serde(default, deserialize_with = "lenient")]
    pub text: String,
    /// Icon registry key. Empty means no icon.
    #[serde(default, alias = "icon", deserialize_with = "lenient")]
    pub icon_id: String,
}

impl IconItem {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, icon_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_id: icon_id.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Per-slide timing.
pub struct SlideTiming {
    /// Time on screen. `None` (or zero) uses the presentation default.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Millis>,
    /// Enter animation.
    #[serde(default = "Transition::default_in", deserialize_with = "lenient_transition_in")]
    pub transition_in: Transition,
    /// Exit animation.
    #[serde(default = "Transition::default_out", deserialize_with = "lenient_transition_out")]
    pub transition_out: Transition,
}

impl Default for SlideTiming {
    fn default() -> Self {
        Self {
            duration: None,
            transition_in: Transition::default_in(),
            transition_out: Transition::default_out(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Fixed set of enter/exit animations.
pub enum Transition {
    /// Opacity 0 → 1.
    #[serde(alias = "fade-in")]
    FadeIn,
    /// Opacity 1 → 0.
    #[serde(alias = "fade-out")]
    FadeOut,
    /// Slide in from the right edge.
    #[serde(alias = "slide-in-right")]
    SlideInRight,
    /// Slide out towards the left edge.
    #[serde(alias = "slide-out-left")]
    SlideOutLeft,
    /// Grow in from half size.
    #[serde(alias = "zoom-in")]
    ZoomIn,
    /// Grow out while fading.
    #[serde(alias = "zoom-out")]
    ZoomOut,
}

impl Transition {
    fn default_in() -> Self {
        Self::FadeIn
    }

    fn default_out() -> Self {
        Self::FadeOut
    }

    /// Name of the keyframes/class implementing this transition in the document.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::FadeOut => "fadeOut",
            Self::SlideInRight => "slideInRight",
            Self::SlideOutLeft => "slideOutLeft",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
/// Slide background fill.
pub enum Background {
    /// Flat CSS color.
    Color(String),
    /// Raw CSS `background` expression, typically a gradient.
    Gradient(String),
    /// Image URL, cover-fitted.
    Image(String),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color("#1a1a2e".to_owned())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Reference to a Host-owned logo image.
pub struct LogoRef {
    /// Key into [`AssetTable::logo_images`].
    #[serde(alias = "id", deserialize_with = "lenient")]
    pub asset_id: String,
    /// Alternative text for the image.
    #[serde(default, alias = "alt", deserialize_with = "lenient")]
    pub alt_text: String,
}

impl Config {
    /// Parse a config from a JSON string (strict: no reset-to-empty fallback).
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Look a slide up by id.
    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Position of the slide with `id` in playback order.
    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Effective on-screen duration of every slide, in playback order.
    pub fn durations(&self) -> Vec<Millis> {
        self.slides
            .iter()
            .map(|s| s.effective_duration(&self.general.timing))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Host-owned asset references resolved at generation time.
pub struct AssetTable {
    /// Logo asset id → image URL (may be a `data:` URL).
    pub logo_images: BTreeMap<String, String>,
    /// Icon id → SVG markup; overrides and extends the built-in registry.
    pub svg_icons: BTreeMap<String, String>,
}

impl AssetTable {
    /// Read an asset table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open asset table '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("parse asset table JSON: {e}")))
    }
}

// Field decoders for untrusted configs: a value of the wrong JSON type decodes as the field's
// default.

fn lenient_value<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = <serde_json::Value as serde::Deserialize>::deserialize(de)?;
    match serde_json::from_value(raw) {
        Ok(v) => Ok(Some(v)),
        Err(err) => {
            tracing::debug!(error = %err, "mistyped config field; using its default");
            Ok(None)
        }
    }
}

fn lenient<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(lenient_value(de)?.unwrap_or_default())
}

fn decode_items<T: serde::de::DeserializeOwned>(raw: Vec<serde_json::Value>) -> Vec<T> {
    raw.into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::debug!(error = %err, "dropping malformed config entry");
                None
            }
        })
        .collect()
}

fn lenient_seq<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = lenient_value(de)?;
    Ok(decode_items(raw.unwrap_or_default()))
}

fn lenient_opt_seq<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw: Option<Option<Vec<serde_json::Value>>> = lenient_value(de)?;
    Ok(raw.flatten().map(decode_items))
}

fn lenient_slide_duration<'de, D: serde::Deserializer<'de>>(de: D) -> Result<Millis, D::Error> {
    Ok(lenient_value(de)?.unwrap_or(DEFAULT_SLIDE_DURATION))
}

fn lenient_transition_duration<'de, D: serde::Deserializer<'de>>(
    de: D,
) -> Result<Millis, D::Error> {
    Ok(lenient_value(de)?.unwrap_or(DEFAULT_TRANSITION_DURATION))
}

fn lenient_transition_in<'de, D: serde::Deserializer<'de>>(de: D) -> Result<Transition, D::Error> {
    Ok(lenient_value(de)?.unwrap_or_else(Transition::default_in))
}

fn lenient_transition_out<'de, D: serde::Deserializer<'de>>(
    de: D,
) -> Result<Transition, D::Error> {
    Ok(lenient_value(de)?.unwrap_or_else(Transition::default_out))
}

fn slide_id<'de, D: serde::Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match <serde_json::Value as serde::Deserialize>::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "slide id must be a string, found {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
