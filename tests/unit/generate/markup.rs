use super::*;

#[test]
fn text_and_attributes_are_escaped() {
    let node: Node = Element::new("a")
        .attr("href", "https://x.test/?a=1&b=\"2\"")
        .text("<b>Tom & Jerry</b>")
        .into();
    assert_eq!(
        node.to_html(),
        "<a href=\"https:&#x2f;&#x2f;x.test&#x2f;?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;Tom &amp; Jerry&lt;&#x2f;b&gt;</a>"
    );
}

#[test]
fn void_elements_have_no_closing_tag() {
    let node: Node = Element::new("img").attr("src", "a.png").attr("alt", "").into();
    assert_eq!(node.to_html(), "<img src=\"a.png\" alt=\"\">");
}

#[test]
fn raw_nodes_pass_through() {
    let node: Node = Element::new("div")
        .child(Node::Raw("<svg></svg>".into()))
        .into();
    assert_eq!(node.to_html(), "<div><svg></svg></div>");
    assert_eq!(node.text_content(), "");
}

#[test]
fn class_queries_walk_the_tree() {
    let node: Node = Element::new("ul")
        .class("features")
        .child(Element::new("li").class("feature first").text("a"))
        .child(Element::new("li").class("feature").text("b"))
        .into();
    let mut found = Vec::new();
    node.find_by_class("feature", &mut found);
    assert_eq!(found.len(), 2);
    assert!(found[0].has_class("first"));
    assert_eq!(node.text_content(), "ab");
}

#[test]
fn css_helpers_neutralize_breakouts() {
    assert_eq!(css_token(" #fff; } </style><script>"), "#fff  /stylescript");
    assert_eq!(css_url("a\"b\\c\n.png"), "\"a%22b%5Cc.png\"");
}

#[test]
fn script_safe_json_round_trips() {
    let v = serde_json::json!({ "t": "</script><!-- & \u{2028}" });
    let s = script_safe_json(&v).unwrap();
    assert!(!s.contains("</script>"));
    assert!(!s.contains('<'));
    assert!(!s.contains('&'));
    let back: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(back, v);
}

#[test]
fn attribute_quotes_cannot_close_the_value() {
    let node: Node = Element::new("img").attr("alt", "it's \"x\"").into();
    assert_eq!(node.to_html(), "<img alt=\"it&#x27;s &quot;x&quot;\">");
}
