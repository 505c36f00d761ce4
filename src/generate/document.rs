use std::collections::BTreeMap;

use minijinja::{Environment, Value, context};

use crate::config::model::{AssetTable, Config, Direction};
use crate::foundation::error::{ReelError, ReelResult};
use crate::generate::icons::IconRegistry;
use crate::generate::markup::{Element, Node, css_token, render_all, script_safe_json};
use crate::generate::templates::{Resolver, slide_containers};

const SHELL_NAME: &str = "reel.html";
const SHELL: &str = include_str!("reel.html");
const CONTROLLER_JS: &str = include_str!("controller.js");

/// `id` of the embedded config data block.
pub const CONFIG_BLOCK_ID: &str = "reel-config";
/// `id` of the embedded resource table.
pub const RESOURCES_BLOCK_ID: &str = "reel-resources";
/// `id` of the embedded runtime settings.
pub const RUNTIME_BLOCK_ID: &str = "reel-runtime";

/// Controller fallback when neither the slide nor the config sets a duration.
pub const FALLBACK_SLIDE_DURATION_MS: u64 = 5000;

#[derive(Clone, Debug)]
/// Options for a single [`generate_with`] call.
pub struct GenerateOpts {
    /// Document `lang`. `None` picks `ar` for rtl and `en` for ltr configs.
    pub lang: Option<String>,
    /// Period of the embedded countdown poll, in milliseconds.
    pub tick_interval_ms: u64,
    /// Render the progress bar.
    pub progress_bar: bool,
    /// Expected origin of the parent window; `"*"` accepts the parent whatever its origin.
    pub host_origin: String,
    /// Session number stamped on every outgoing envelope.
    pub session: u64,
    /// Optional web-font stylesheet URL.
    pub font_stylesheet: Option<String>,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            lang: None,
            tick_interval_ms: 50,
            progress_bar: true,
            host_origin: "*".to_owned(),
            session: 0,
            font_stylesheet: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What an artifact shows when loaded.
pub enum ArtifactKind {
    /// One container per slide.
    Slides,
    /// Diagnostic panel for a config without slides.
    Empty,
    /// Error panel for a generation fault.
    Fault,
}

#[derive(Clone, Debug)]
/// A self-contained, scriptable HTML document.
pub struct Artifact {
    /// Complete document markup.
    pub html: String,
    /// Slide ids in container order.
    pub slide_ids: Vec<String>,
    /// xxh3-64 of `html`.
    pub fingerprint: u64,
    /// Which panel the document shows.
    pub kind: ArtifactKind,
}

impl Artifact {
    fn new(html: String, slide_ids: Vec<String>, kind: ArtifactKind) -> Self {
        let fingerprint = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
        Self {
            html,
            slide_ids,
            fingerprint,
            kind,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Resources {
    logos: BTreeMap<String, String>,
    icons: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Settings the embedded controller boots with (`reel-runtime` data block).
pub struct RuntimeSettings {
    /// Session number stamped on outgoing envelopes.
    pub session: u64,
    /// Expected parent origin, or `"*"`.
    pub host_origin: String,
    /// Countdown poll period in milliseconds.
    pub tick_interval: u64,
    /// Whether the progress bar is rendered.
    pub progress_bar: bool,
    /// Duration used when the config provides none.
    pub fallback_duration: u64,
}

/// Compile `config` into an artifact with default options.
pub fn generate(config: &Config, assets: &AssetTable) -> Artifact {
    generate_with(config, assets, &GenerateOpts::default())
}

/// Compile `config` into an artifact.
///
/// Never fails: an empty slide sequence yields an [`ArtifactKind::Empty`] document and a
/// rendering fault yields an [`ArtifactKind::Fault`] document carrying the error message.
#[tracing::instrument(skip(config, assets, opts), fields(slides = config.slides.len(), session = opts.session))]
pub fn generate_with(config: &Config, assets: &AssetTable, opts: &GenerateOpts) -> Artifact {
    match render_document(config, assets, opts) {
        Ok((html, kind)) => {
            let slide_ids = match kind {
                ArtifactKind::Slides => config.slides.iter().map(|s| s.id.clone()).collect(),
                _ => Vec::new(),
            };
            tracing::debug!(bytes = html.len(), ?kind, "artifact generated");
            Artifact::new(html, slide_ids, kind)
        }
        Err(err) => {
            tracing::warn!(error = %err, "generation fault; emitting error panel");
            fault_artifact(config, &err)
        }
    }
}

fn render_document(
    config: &Config,
    assets: &AssetTable,
    opts: &GenerateOpts,
) -> ReelResult<(String, ArtifactKind)> {
    let general = &config.general;
    let empty = config.slides.is_empty();
    let kind = if empty {
        ArtifactKind::Empty
    } else {
        ArtifactKind::Slides
    };

    let icons = IconRegistry::with_assets(assets);
    let slides_html = if empty {
        String::new()
    } else {
        let resolver = Resolver::new(&icons, &assets.logo_images);
        let nodes: Vec<Node> = slide_containers(config, &resolver)
            .into_iter()
            .map(Node::from)
            .collect();
        render_all(&nodes)
    };
    // Full tables: a later `updateConfig` may reference any registered icon or logo.
    let resources = Resources {
        logos: assets.logo_images.clone(),
        icons: icons.entries(),
    };

    let default_lang = match general.direction {
        Direction::Rtl => "ar",
        Direction::Ltr => "en",
    };
    let lang = opts.lang.as_deref().unwrap_or(default_lang);
    let runtime = RuntimeSettings {
        session: opts.session,
        host_origin: opts.host_origin.clone(),
        tick_interval: opts.tick_interval_ms.max(1),
        progress_bar: opts.progress_bar,
        fallback_duration: FALLBACK_SLIDE_DURATION_MS,
    };

    let mut env = Environment::new();
    env.add_template(SHELL_NAME, SHELL)
        .map_err(|e| ReelError::generation(format!("load document shell: {e}")))?;
    let tmpl = env
        .get_template(SHELL_NAME)
        .map_err(|e| ReelError::generation(format!("load document shell: {e}")))?;

    let theme = &general.theme;
    let css = context! {
        primary => safe(css_token(&theme.primary_color)),
        secondary => safe(css_token(&theme.secondary_color)),
        background => safe(css_token(&theme.background_color)),
        text => safe(css_token(&theme.text_color)),
        heading_font => safe(css_token(&general.fonts.heading_font)),
        body_font => safe(css_token(&general.fonts.body_font)),
        transition_ms => general.timing.default_transition_duration.0,
    };

    let html = tmpl
        .render(context! {
            lang => lang,
            dir => general.direction.as_str(),
            title => &general.title,
            font_stylesheet => opts.font_stylesheet.as_deref(),
            css => css,
            empty => empty,
            slides_html => safe(slides_html),
            progress_bar => opts.progress_bar,
            config_json => safe(embed_json(config)?),
            resources_json => safe(embed_json(&resources)?),
            runtime_json => safe(embed_json(&runtime)?),
            controller_js => safe(CONTROLLER_JS.to_owned()),
        })
        .map_err(|e| ReelError::generation(format!("render document: {e}")))?;
    Ok((html, kind))
}

fn safe(s: String) -> Value {
    Value::from_safe_string(s)
}

fn embed_json<T: serde::Serialize>(value: &T) -> ReelResult<String> {
    script_safe_json(value).map_err(|e| ReelError::serde(format!("embed JSON: {e}")))
}

fn fault_artifact(config: &Config, err: &ReelError) -> Artifact {
    let panel: Node = Element::new("div")
        .class("error-message")
        .attr("id", "reel-fault")
        .child(Element::new("h2").text("The reel could not be generated"))
        .child(Element::new("p").text(err.to_string()))
        .into();
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>Reel error</title>\n</head>\n<body>\n<div id=\"app\">",
    );
    panel.render(&mut html);
    html.push_str("</div>\n");
    if let Ok(json) = script_safe_json(config) {
        html.push_str("<script type=\"application/json\" id=\"reel-config\">");
        html.push_str(&json);
        html.push_str("</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    Artifact::new(html, Vec::new(), ArtifactKind::Fault)
}

/// Re-extract the config embedded in a generated document.
pub fn extract_config(html: &str) -> ReelResult<Config> {
    let json = data_block(html, CONFIG_BLOCK_ID)
        .ok_or_else(|| ReelError::import(format!("no '{CONFIG_BLOCK_ID}' data block found")))?;
    Config::from_json_str(json)
        .map_err(|e| ReelError::import(format!("embedded config is not valid: {e}")))
}

/// Runtime settings embedded in a generated document.
pub fn extract_runtime(html: &str) -> ReelResult<RuntimeSettings> {
    let json = data_block(html, RUNTIME_BLOCK_ID)
        .ok_or_else(|| ReelError::import(format!("no '{RUNTIME_BLOCK_ID}' data block found")))?;
    serde_json::from_str(json).map_err(|e| ReelError::import(format!("embedded runtime: {e}")))
}

/// Asset entries embedded in a generated document's resource table.
///
/// Documents without a table (fault panels) yield an empty one.
pub fn extract_assets(html: &str) -> ReelResult<AssetTable> {
    let Some(json) = data_block(html, RESOURCES_BLOCK_ID) else {
        return Ok(AssetTable::default());
    };
    let resources: Resources = serde_json::from_str(json)
        .map_err(|e| ReelError::import(format!("embedded resources: {e}")))?;
    Ok(AssetTable {
        logo_images: resources.logos,
        svg_icons: resources.icons,
    })
}

/// Import a config from either raw config JSON or a generated document.
pub fn import_config(text: &str) -> ReelResult<Config> {
    if text.trim_start().starts_with('{') {
        Config::from_json_str(text)
    } else {
        extract_config(text)
    }
}

/// Body of the `<script type="application/json" id="{id}">` element in `html`, if present.
///
/// Escaped text can never contain a `<`, so the opening tag is only ever matched on a real
/// data block.
pub fn data_block<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let open = format!("<script type=\"application/json\" id=\"{id}\">");
    let start = html.find(&open)? + open.len();
    let len = html[start..].find("</script>")?;
    Some(&html[start..start + len])
}

#[cfg(test)]
#[path = "../../tests/unit/generate/document.rs"]
mod tests;
