//! Host-side project editing.
//!
//! Every operation keeps the config well-formed: slides are only ever added whole, patches
//! replace whole fields, and slide ids are never handed out twice within a session.

use std::collections::BTreeSet;

use crate::config::model::{
    AssetTable, Background, Config, CtaContent, Direction, FeaturesContent, Fonts,
    GeneralSettings, ListContent, LogoRef, Slide, SlideContent, SlideKind, SlideTiming, Theme,
    TimingDefaults, TitleContent,
};
use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// The Host's editable aggregate: a config plus the asset table it references.
pub struct Project {
    /// The reel being edited.
    pub reels_config: Config,
    /// Host-owned assets.
    #[serde(default)]
    pub assets: AssetTable,
    #[serde(skip)]
    ids: SlideIdAllocator,
    #[serde(skip)]
    selection: Option<String>,
}

impl Project {
    /// The reset target: default settings, no slides, no assets.
    pub fn empty() -> Self {
        Self::from_config(Config {
            general: GeneralSettings {
                title: "New project".to_owned(),
                direction: Direction::Rtl,
                theme: Theme {
                    primary_color: "#4169e1".to_owned(),
                    secondary_color: "#ff8c00".to_owned(),
                    background_color: "#1a1a2e".to_owned(),
                    text_color: "#ffffff".to_owned(),
                },
                timing: TimingDefaults {
                    default_slide_duration: Millis(5000),
                    default_transition_duration: Millis(800),
                    auto_play: true,
                },
                fonts: Fonts {
                    heading_font: "Cairo, sans-serif".to_owned(),
                    body_font: "Tajawal, sans-serif".to_owned(),
                },
            },
            slides: Vec::new(),
        })
    }

    /// Wrap a loaded config. The first slide becomes the selection.
    pub fn from_config(config: Config) -> Self {
        let mut ids = SlideIdAllocator::default();
        for slide in &config.slides {
            ids.reserve(&slide.id);
        }
        let selection = config.slides.first().map(|s| s.id.clone());
        Self {
            reels_config: config,
            assets: AssetTable::default(),
            ids,
            selection,
        }
    }

    /// Replace the config wholesale (project load). Retired ids stay retired.
    pub fn load(&mut self, config: Config) {
        for slide in &config.slides {
            self.ids.reserve(&slide.id);
        }
        self.selection = config.slides.first().map(|s| s.id.clone());
        self.reels_config = config;
    }

    /// Reset to [`Project::empty`].
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// Currently selected slide id.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Select a slide by id. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selection = id
            .filter(|id| self.reels_config.slide(id).is_some())
            .map(str::to_owned);
    }

    /// Allocate a fresh slide id, never used before in this session.
    pub fn next_slide_id(&mut self) -> String {
        self.ids.allocate()
    }

    /// Shallow-merge the present fields of `patch` into the general settings.
    pub fn update_general(&mut self, patch: GeneralPatch) {
        let g = &mut self.reels_config.general;
        if let Some(title) = patch.title {
            g.title = title;
        }
        if let Some(direction) = patch.direction {
            g.direction = direction;
        }
        if let Some(theme) = patch.theme {
            g.theme = theme;
        }
        if let Some(timing) = patch.timing {
            g.timing = timing;
        }
        if let Some(fonts) = patch.fonts {
            g.fonts = fonts;
        }
    }

    /// Shallow-merge `patch` into the slide with `id`. Returns `false` if there is none.
    pub fn update_slide(&mut self, id: &str, patch: SlidePatch) -> bool {
        let Some(slide) = self.reels_config.slides.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if let Some(content) = patch.content {
            slide.content = content;
        }
        if let Some(timing) = patch.timing {
            slide.timing = timing;
        }
        if let Some(background) = patch.background {
            slide.background = background;
        }
        if let Some(logos) = patch.logos {
            slide.logos = logos;
        }
        true
    }

    /// Append a slide and select it.
    ///
    /// Rejects ids that are live or were retired earlier in this session.
    pub fn add_slide(&mut self, slide: Slide) -> ReelResult<()> {
        if slide.id.is_empty() {
            return Err(ReelError::validation("slide id must be non-empty"));
        }
        if self.reels_config.slide(&slide.id).is_some() {
            return Err(ReelError::validation(format!(
                "slide id '{}' is already in use",
                slide.id
            )));
        }
        if self.ids.is_retired(&slide.id) {
            return Err(ReelError::validation(format!(
                "slide id '{}' was removed earlier and cannot be reused",
                slide.id
            )));
        }
        self.ids.reserve(&slide.id);
        self.selection = Some(slide.id.clone());
        self.reels_config.slides.push(slide);
        Ok(())
    }

    /// Remove the slide with `id` and retire the id.
    ///
    /// When the selected slide is removed, the first remaining slide becomes selected.
    pub fn remove_slide(&mut self, id: &str) -> Option<Slide> {
        let idx = self.reels_config.slide_index(id)?;
        let removed = self.reels_config.slides.remove(idx);
        self.ids.retire(id);
        if self.selection.as_deref() == Some(id) {
            self.selection = self.reels_config.slides.first().map(|s| s.id.clone());
        }
        Some(removed)
    }

    /// Reorder slides to follow `order`.
    ///
    /// Unknown ids are ignored; slides whose id is not listed are dropped (and retired).
    pub fn reorder_slides(&mut self, order: &[&str]) {
        let mut remaining = std::mem::take(&mut self.reels_config.slides);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in order {
            if let Some(pos) = remaining.iter().position(|s| s.id == *id) {
                reordered.push(remaining.swap_remove(pos));
            }
        }
        for dropped in remaining {
            tracing::debug!(slide = %dropped.id, "slide not listed in new order; dropped");
            self.ids.retire(&dropped.id);
        }
        self.reels_config.slides = reordered;
        if let Some(sel) = self.selection.as_deref()
            && self.reels_config.slide(sel).is_none()
        {
            self.selection = self.reels_config.slides.first().map(|s| s.id.clone());
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Partial update of [`GeneralSettings`]. `None` fields are left untouched.
pub struct GeneralPatch {
    /// New title.
    pub title: Option<String>,
    /// New direction.
    pub direction: Option<Direction>,
    /// New theme.
    pub theme: Option<Theme>,
    /// New timing defaults.
    pub timing: Option<TimingDefaults>,
    /// New fonts.
    pub fonts: Option<Fonts>,
}

#[derive(Clone, Debug, Default)]
/// Partial update of a [`Slide`]. The id is immutable.
pub struct SlidePatch {
    /// New content (may change the archetype).
    pub content: Option<SlideContent>,
    /// New timing.
    pub timing: Option<SlideTiming>,
    /// New background.
    pub background: Option<Background>,
    /// New logo strip; `Some(None)` removes it.
    pub logos: Option<Option<Vec<LogoRef>>>,
}

#[derive(Clone, Debug, Default)]
/// Hands out `slide-N` ids that never collide with live or retired ids.
pub struct SlideIdAllocator {
    next: u64,
    used: BTreeSet<String>,
    retired: BTreeSet<String>,
}

impl SlideIdAllocator {
    /// Mark an externally chosen id as taken.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_owned());
    }

    /// Mark an id as removed; it will never be accepted or allocated again.
    pub fn retire(&mut self, id: &str) {
        self.retired.insert(id.to_owned());
    }

    /// Whether `id` was retired.
    pub fn is_retired(&self, id: &str) -> bool {
        self.retired.contains(id)
    }

    /// Next unused id.
    pub fn allocate(&mut self) -> String {
        loop {
            self.next += 1;
            let candidate = format!("slide-{}", self.next);
            if !self.used.contains(&candidate) && !self.retired.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

impl Slide {
    /// A new slide of `kind` with placeholder content and default timing.
    pub fn new_template(kind: SlideKind, id: impl Into<String>) -> Self {
        let (content, logos) = match kind {
            SlideKind::Title => (
                SlideContent::Title(TitleContent {
                    main_title: "New headline".to_owned(),
                    sub_title: Some("Subtitle".to_owned()),
                    motivational_text: Some("Motivational line".to_owned()),
                }),
                Some(Vec::new()),
            ),
            SlideKind::List => (
                SlideContent::List(ListContent {
                    title: "List title".to_owned(),
                    items: Vec::new(),
                    motivational_text: Some("Motivational line".to_owned()),
                }),
                None,
            ),
            SlideKind::Features => (
                SlideContent::Features(FeaturesContent {
                    title: "Features".to_owned(),
                    features: Vec::new(),
                    participation_modes: Some(Vec::new()),
                }),
                None,
            ),
            SlideKind::Cta => (
                SlideContent::Cta(CtaContent {
                    title: "Register now!".to_owned(),
                    cta_link: "https://example.com/register".to_owned(),
                    cta_text: "Register".to_owned(),
                    subtitle: Some("Don't miss out".to_owned()),
                    qr_code: Some(true),
                }),
                Some(Vec::new()),
            ),
        };
        Self {
            id: id.into(),
            content,
            timing: SlideTiming {
                duration: Some(Millis(5000)),
                ..SlideTiming::default()
            },
            background: Background::default(),
            logos,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/edit.rs"]
mod tests;
