use super::*;

fn sample() -> Config {
    Config::from_json_str(include_str!("../../data/sample_reel.json")).unwrap()
}

fn logo_table() -> BTreeMap<String, String> {
    BTreeMap::from([("areed".to_owned(), "data:image/png;base64,AAAA".to_owned())])
}

fn classes(node: &Node, class: &str) -> usize {
    let mut found = Vec::new();
    node.find_by_class(class, &mut found);
    found.len()
}

#[test]
fn one_inactive_section_per_slide() {
    let cfg = sample();
    let icons = IconRegistry::builtin();
    let logos = logo_table();
    let r = Resolver::new(&icons, &logos);
    let sections = slide_containers(&cfg, &r);
    assert_eq!(sections.len(), 4);
    for (i, s) in sections.iter().enumerate() {
        assert_eq!(s.tag, "section");
        assert!(s.has_class("reel-slide"));
        assert!(!s.has_class("active"));
        assert_eq!(s.get_attr("data-slide-index"), Some(i.to_string().as_str()));
        assert_eq!(s.get_attr("id"), Some(cfg.slides[i].id.as_str()));
    }
    assert_eq!(sections[1].get_attr("data-type"), Some("list"));
    assert_eq!(sections[1].get_attr("data-transition-in"), Some("slideInRight"));
}

#[test]
fn unknown_icons_render_no_icon() {
    let cfg = sample();
    let icons = IconRegistry::builtin();
    let logos = BTreeMap::new();
    let r = Resolver::new(&icons, &logos);
    let node: Node = slide_container(1, &cfg.slides[1], &r).into();
    assert_eq!(classes(&node, "specialty"), 3);
    assert_eq!(classes(&node, "specialty-icon"), 2);
    assert!(node.text_content().contains("Mystery track"));
}

#[test]
fn unresolved_logo_ids_get_an_empty_src() {
    let cfg = sample();
    let icons = IconRegistry::builtin();
    let logos = logo_table();
    let r = Resolver::new(&icons, &logos);
    let node: Node = slide_container(0, &cfg.slides[0], &r).into();
    let mut imgs = Vec::new();
    node.find_by_class("logo", &mut imgs);
    assert_eq!(imgs.len(), 2);
    assert_eq!(imgs[0].get_attr("src"), Some("data:image/png;base64,AAAA"));
    assert_eq!(imgs[0].get_attr("alt"), Some("Areed"));
    assert_eq!(imgs[1].get_attr("src"), Some(""));
}

#[test]
fn missing_optional_fields_are_omitted() {
    let icons = IconRegistry::builtin();
    let logos = BTreeMap::new();
    let r = Resolver::new(&icons, &logos);
    let c = TitleContent {
        main_title: "Only a title".into(),
        ..TitleContent::default()
    };
    let nodes = title_slide(&c, None, &r);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].to_html(), "<h1 class=\"main-title\">Only a title</h1>");
}

#[test]
fn cta_renders_button_and_qr_placeholder() {
    let cfg = sample();
    let icons = IconRegistry::builtin();
    let logos = BTreeMap::new();
    let r = Resolver::new(&icons, &logos);
    let node: Node = slide_container(3, &cfg.slides[3], &r).into();
    let mut found = Vec::new();
    node.find_by_class("cta-button", &mut found);
    assert_eq!(found[0].get_attr("target"), Some("_blank"));
    assert_eq!(found[0].get_attr("rel"), Some("noopener"));
    found.clear();
    node.find_by_class("qr-code", &mut found);
    assert_eq!(found[0].get_attr("data-url"), Some("https://example.com/register"));
    assert_eq!(classes(&node, "logos-container"), 0);
}

#[test]
fn content_text_is_escaped() {
    let icons = IconRegistry::builtin();
    let logos = BTreeMap::new();
    let r = Resolver::new(&icons, &logos);
    let c = ListContent {
        title: "<script>alert(1)</script>".into(),
        items: vec![IconItem::new("a & b", "")],
        motivational_text: None,
    };
    let html = crate::generate::markup::render_all(&list_slide(&c, None, &r));
    assert!(!html.contains("<script>"));
    assert!(html.contains("a &amp; b"));
}

#[test]
fn background_styles_per_kind() {
    assert_eq!(
        background_style(&Background::Color("#123".into())),
        "background-color: #123"
    );
    assert_eq!(
        background_style(&Background::Gradient("linear-gradient(red, blue)".into())),
        "background: linear-gradient(red, blue)"
    );
    let img = background_style(&Background::Image("https://x.test/a.jpg".into()));
    assert!(img.starts_with("background-image: url(\"https://x.test/a.jpg\")"));
    assert!(img.contains("cover"));
}
