//! Pure slide builders: one per archetype, plus the section container around them.

use std::collections::BTreeMap;

use crate::config::model::{
    Background, Config, CtaContent, FeaturesContent, IconItem, ListContent, LogoRef, Slide,
    SlideContent, TitleContent,
};
use crate::generate::icons::IconRegistry;
use crate::generate::markup::{Element, Node, css_token, css_url};

/// Asset lookups available to the builders.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    /// Icon id → SVG markup.
    pub icons: &'a IconRegistry,
    /// Logo asset id → image URL.
    pub logo_images: &'a BTreeMap<String, String>,
}

impl<'a> Resolver<'a> {
    /// Bundle an icon registry and a logo table.
    pub fn new(icons: &'a IconRegistry, logo_images: &'a BTreeMap<String, String>) -> Self {
        Self { icons, logo_images }
    }

    fn logo_url(&self, asset_id: &str) -> &str {
        self.logo_images
            .get(asset_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Build the content nodes of a title slide.
pub fn title_slide(c: &TitleContent, logos: Option<&[LogoRef]>, r: &Resolver<'_>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    if let Some(m) = non_empty(c.motivational_text.as_deref()) {
        out.push(Element::new("p").class("motivational").text(m).into());
    }
    if !c.main_title.is_empty() {
        out.push(Element::new("h1").class("main-title").text(&c.main_title).into());
    }
    if let Some(s) = non_empty(c.sub_title.as_deref()) {
        out.push(Element::new("h2").class("sub-title").text(s).into());
    }
    out.extend(logo_strip(logos, "logos-container", r));
    out
}

/// Build the content nodes of a list slide.
pub fn list_slide(c: &ListContent, logos: Option<&[LogoRef]>, r: &Resolver<'_>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    if !c.title.is_empty() {
        out.push(Element::new("h2").class("title").text(&c.title).into());
    }
    if !c.items.is_empty() {
        let entries = c
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| icon_entry(item, i, "specialty", r));
        out.push(Element::new("ul").class("specialties").children(entries).into());
    }
    if let Some(m) = non_empty(c.motivational_text.as_deref()) {
        out.push(Element::new("p").class("motivational-end").text(m).into());
    }
    out.extend(logo_strip(logos, "logos-container footer-logos", r));
    out
}

/// Build the content nodes of a features slide.
pub fn features_slide(
    c: &FeaturesContent,
    logos: Option<&[LogoRef]>,
    r: &Resolver<'_>,
) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    if !c.title.is_empty() {
        out.push(Element::new("h2").class("title").text(&c.title).into());
    }
    if !c.features.is_empty() {
        let entries = c
            .features
            .iter()
            .enumerate()
            .map(|(i, item)| icon_entry(item, i, "feature", r));
        out.push(Element::new("ul").class("features").children(entries).into());
    }
    if let Some(modes) = c.participation_modes.as_deref().filter(|m| !m.is_empty()) {
        let modes = modes.iter().map(|m| {
            let mut el = Element::new("div").class("mode");
            if let Some(svg) = r.icons.resolve(&m.icon_id) {
                el = el
                    .attr("data-icon", m.icon_id.clone())
                    .child(Element::new("div").class("mode-icon").child(Node::Raw(svg.to_owned())));
            }
            Node::from(el.child(Element::new("span").text(&m.text)))
        });
        out.push(Element::new("div").class("participation-modes").children(modes).into());
    }
    out.extend(logo_strip(logos, "logos-container footer-logos", r));
    out
}

/// Build the content nodes of a call-to-action slide.
pub fn cta_slide(c: &CtaContent, logos: Option<&[LogoRef]>, r: &Resolver<'_>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    if !c.title.is_empty() {
        out.push(Element::new("h2").class("title cta-title").text(&c.title).into());
    }
    if let Some(s) = non_empty(c.subtitle.as_deref()) {
        out.push(Element::new("p").class("subtitle").text(s).into());
    }
    if !c.cta_link.is_empty() {
        let button = Element::new("a")
            .class("cta-button")
            .attr("href", c.cta_link.clone())
            .attr("target", "_blank")
            .attr("rel", "noopener")
            .text(&c.cta_text);
        out.push(Element::new("div").class("cta-container").child(button).into());
    }
    if c.qr_code == Some(true) {
        let qr = Element::new("div")
            .class("qr-code")
            .attr("data-url", c.cta_link.clone())
            .text("QR");
        out.push(Element::new("div").class("qr-container").child(qr).into());
    }
    out.extend(logo_strip(logos, "logos-container footer-logos", r));
    out
}

/// Dispatch a slide to its archetype builder.
pub fn slide_content(slide: &Slide, r: &Resolver<'_>) -> Vec<Node> {
    let logos = slide.logos.as_deref();
    match &slide.content {
        SlideContent::Title(c) => title_slide(c, logos, r),
        SlideContent::List(c) => list_slide(c, logos, r),
        SlideContent::Features(c) => features_slide(c, logos, r),
        SlideContent::Cta(c) => cta_slide(c, logos, r),
    }
}

/// Inline style for a slide background.
pub fn background_style(bg: &Background) -> String {
    match bg {
        Background::Color(c) => format!("background-color: {}", css_token(c)),
        Background::Gradient(g) => format!("background: {}", css_token(g)),
        Background::Image(url) => format!(
            "background-image: url({}); background-size: cover; background-position: center",
            css_url(url)
        ),
    }
}

/// Full-viewport `<section>` for the slide at `index`, initially inactive.
pub fn slide_container(index: usize, slide: &Slide, r: &Resolver<'_>) -> Element {
    let content = Element::new("div")
        .class("content")
        .children(slide_content(slide, r));
    Element::new("section")
        .class("reel-slide")
        .attr("id", slide.id.clone())
        .attr("data-slide-index", index.to_string())
        .attr("data-type", slide.kind().as_str())
        .attr("data-transition-in", slide.timing.transition_in.css_name())
        .attr("data-transition-out", slide.timing.transition_out.css_name())
        .attr("style", background_style(&slide.background))
        .child(content)
}

/// One container per slide, in playback order.
pub fn slide_containers(config: &Config, r: &Resolver<'_>) -> Vec<Element> {
    config
        .slides
        .iter()
        .enumerate()
        .map(|(i, s)| slide_container(i, s, r))
        .collect()
}

fn icon_entry(item: &IconItem, index: usize, class: &'static str, r: &Resolver<'_>) -> Node {
    let mut li = Element::new("li")
        .class(class)
        .attr("style", format!("animation-delay: {:.1}s", index as f64 * 0.2));
    if let Some(svg) = r.icons.resolve(&item.icon_id) {
        let icon_class = match class {
            "feature" => "feature-icon",
            _ => "specialty-icon",
        };
        li = li.attr("data-icon", item.icon_id.clone()).child(
            Element::new("div")
                .class(icon_class)
                .child(Node::Raw(svg.to_owned())),
        );
    }
    li.child(Element::new("span").text(&item.text)).into()
}

fn logo_strip(logos: Option<&[LogoRef]>, class: &'static str, r: &Resolver<'_>) -> Option<Node> {
    let logos = logos.filter(|l| !l.is_empty())?;
    let imgs = logos.iter().map(|l| {
        Node::from(
            Element::new("img")
                .class("logo")
                .attr("src", r.logo_url(&l.asset_id))
                .attr("alt", l.alt_text.clone()),
        )
    });
    Some(Element::new("div").class(class).children(imgs).into())
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/templates.rs"]
mod tests;
