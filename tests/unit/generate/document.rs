use super::*;

use crate::SlideContent;
use crate::config::edit::Project;
use crate::generate::icons::BUILTIN_ICONS;

fn sample() -> Config {
    Config::from_json_str(include_str!("../../data/sample_reel.json")).unwrap()
}

fn assets() -> AssetTable {
    let mut a = AssetTable::default();
    a.logo_images
        .insert("areed".into(), "data:image/png;base64,AAAA".into());
    a.logo_images
        .insert("unused".into(), "https://x.test/unused.png".into());
    a
}

#[test]
fn slides_artifact_binds_theme_and_direction() {
    let art = generate(&sample(), &assets());
    assert_eq!(art.kind, ArtifactKind::Slides);
    assert_eq!(art.slide_ids, vec!["intro", "tracks", "perks", "signup"]);
    assert!(art.html.starts_with("<!DOCTYPE html>"));
    assert!(art.html.contains("<html lang=\"ar\" dir=\"rtl\">"));
    assert!(art.html.contains("--primary-color: #4169e1;"));
    assert!(art.html.contains("--heading-font: Cairo, sans-serif;"));
    assert!(art.html.contains("--transition-duration: 800ms;"));
    assert!(art.html.contains("direction: rtl;"));
    assert_eq!(art.html.matches("class=\"reel-slide\"").count(), 4);
    assert!(art.html.contains("@keyframes zoomOut"));
}

#[test]
fn generation_is_deterministic() {
    let a = generate(&sample(), &assets());
    let b = generate(&sample(), &assets());
    assert_eq!(a.html, b.html);
    assert_eq!(a.fingerprint, b.fingerprint);

    let mut other = sample();
    other.general.title = "Another".into();
    assert_ne!(generate(&other, &assets()).fingerprint, a.fingerprint);
}

#[test]
fn embedded_config_round_trips() {
    let cfg = sample();
    let art = generate(&cfg, &assets());
    assert_eq!(extract_config(&art.html).unwrap(), cfg);
    assert_eq!(import_config(&art.html).unwrap(), cfg);
}

#[test]
fn resource_table_embeds_the_whole_registry() {
    let mut a = assets();
    a.svg_icons.insert("rocket".into(), "<svg>rocket</svg>".into());
    let art = generate(&sample(), &a);
    let embedded = extract_assets(&art.html).unwrap();
    assert_eq!(embedded.logo_images, a.logo_images);
    assert_eq!(
        embedded.svg_icons,
        IconRegistry::with_assets(&a).entries()
    );
    for id in ["sustainability", "islamic", "publication", "rocket"] {
        assert!(embedded.svg_icons.contains_key(id), "{id}");
    }
}

#[test]
fn empty_config_yields_diagnostic_artifact() {
    let cfg = Project::empty().reels_config;
    let art = generate(&cfg, &AssetTable::default());
    assert_eq!(art.kind, ArtifactKind::Empty);
    assert!(art.slide_ids.is_empty());
    assert!(art.html.contains("No slides"));
    assert!(!art.html.contains("class=\"reel-slide\""));
    assert_eq!(extract_config(&art.html).unwrap(), cfg);
    let table = extract_assets(&art.html).unwrap();
    assert!(table.logo_images.is_empty());
    assert_eq!(table.svg_icons.len(), BUILTIN_ICONS.len());
}

#[test]
fn hostile_text_cannot_break_out() {
    let mut cfg = sample();
    cfg.general.title = "</title><script>alert(1)</script>".into();
    cfg.general.theme.primary_color = "red; } body { display: none".into();
    if let SlideContent::Title(t) = &mut cfg.slides[0].content {
        t.main_title = "</script><script>alert(2)</script>".into();
    }
    let art = generate(&cfg, &AssetTable::default());
    assert!(!art.html.contains("<script>alert"));
    assert!(art.html.contains("--primary-color: red  body  display: none;"));
    assert_eq!(extract_config(&art.html).unwrap(), cfg);
}

#[test]
fn opts_control_lang_progress_and_session() {
    let opts = GenerateOpts {
        lang: Some("fr".into()),
        progress_bar: false,
        session: 7,
        host_origin: "https://host.test".into(),
        font_stylesheet: Some("https://fonts.test/css?family=Cairo&x=1".into()),
        ..GenerateOpts::default()
    };
    let art = generate_with(&sample(), &AssetTable::default(), &opts);
    assert!(art.html.contains("<html lang=\"fr\""));
    assert!(!art.html.contains("class=\"progress-bar\""));
    assert!(art.html.contains("<link rel=\"stylesheet\" href=\""));
    assert!(art.html.contains("family=Cairo&amp;x=1"));
    let runtime: serde_json::Value =
        serde_json::from_str(data_block(&art.html, "reel-runtime").unwrap()).unwrap();
    assert_eq!(runtime["session"], 7);
    assert_eq!(runtime["hostOrigin"], "https://host.test");
    assert_eq!(runtime["tickInterval"], 50);
}

#[test]
fn import_accepts_raw_json_and_rejects_plain_html() {
    let cfg = sample();
    let raw = cfg.to_json_pretty().unwrap();
    assert_eq!(import_config(&raw).unwrap(), cfg);

    let err = import_config("<html><body>hi</body></html>").unwrap_err();
    assert!(matches!(err, ReelError::Import(_)));
}

#[test]
fn fault_artifact_shows_panel_and_keeps_config() {
    let cfg = sample();
    let art = fault_artifact(&cfg, &ReelError::generation("boom <b>"));
    assert_eq!(art.kind, ArtifactKind::Fault);
    assert!(art.html.contains("boom &lt;b&gt;"));
    assert_eq!(extract_config(&art.html).unwrap(), cfg);
}

#[test]
fn runtime_and_assets_can_be_recovered() {
    let opts = GenerateOpts {
        session: 3,
        tick_interval_ms: 20,
        ..GenerateOpts::default()
    };
    let art = generate_with(&sample(), &assets(), &opts);
    let rt = extract_runtime(&art.html).unwrap();
    assert_eq!(rt.session, 3);
    assert_eq!(rt.tick_interval, 20);
    assert_eq!(rt.fallback_duration, FALLBACK_SLIDE_DURATION_MS);
    let table = extract_assets(&art.html).unwrap();
    assert_eq!(table.logo_images.len(), 2);
    assert!(table.svg_icons.contains_key("workshop"));

    let empty = generate(&Project::empty().reels_config, &assets());
    let table = extract_assets(&empty.html).unwrap();
    assert_eq!(table.logo_images, assets().logo_images);
    assert!(table.svg_icons.contains_key("sustainability"));
}
