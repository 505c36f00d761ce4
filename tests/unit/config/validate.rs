use super::*;

use crate::config::model::SlideContent;
use serde_json::json;

fn minimal() -> Value {
    json!({
        "general": { "theme": {}, "timing": {}, "fonts": {} },
        "slides": [
            {
                "id": "a",
                "type": "title",
                "content": { "mainTitle": "Hi" },
                "timing": { "duration": 1000 },
                "background": { "type": "color", "value": "#000" }
            }
        ]
    })
}

#[test]
fn accepts_minimal_shape() {
    assert!(validate(&minimal()));
    assert!(validate(&json!({
        "general": { "theme": {}, "timing": {}, "fonts": {} },
        "slides": []
    })));
}

#[test]
fn rejects_non_objects_and_missing_roots() {
    assert!(!validate(&json!(null)));
    assert!(!validate(&json!([1, 2])));
    assert!(!validate(&json!("config")));
    assert!(!validate(&json!({ "slides": [] })));
    assert!(!validate(&json!({ "general": { "theme": {}, "timing": {}, "fonts": {} } })));
    assert!(!validate(&json!({
        "general": { "theme": {}, "timing": {}, "fonts": {} },
        "slides": { "0": {} }
    })));
}

#[test]
fn rejects_slide_missing_required_key() {
    for key in ["id", "type", "content", "timing", "background"] {
        let mut v = minimal();
        v["slides"][0].as_object_mut().unwrap().remove(key);
        assert!(!validate(&v), "missing {key} must be rejected");
    }

    let mut v = minimal();
    v["slides"][0]["id"] = json!("");
    assert!(!validate(&v), "empty id counts as absent");
}

#[test]
fn content_shape_is_not_checked() {
    let mut v = minimal();
    v["slides"][0]["type"] = json!("list");
    v["slides"][0]["content"] = json!({ "unrelated": 1 });
    assert!(validate(&v));
}

#[test]
fn report_lists_every_violation_with_paths() {
    let v = json!({
        "general": { "theme": {} },
        "slides": [
            { "id": "a", "type": "title", "content": {}, "timing": {}, "background": {} },
            { "id": "b" },
            7
        ]
    });
    let errs = validate_report(&v).unwrap_err();
    let lines: Vec<String> = errs.errors.iter().map(ToString::to_string).collect();
    assert!(lines.contains(&"$.general.timing: missing required field".to_string()));
    assert!(lines.contains(&"$.general.fonts: missing required field".to_string()));
    assert!(lines.contains(&"$.slides[1].type: missing required field".to_string()));
    assert!(lines.contains(&"$.slides[1].background: missing required field".to_string()));
    assert!(lines.contains(&"$.slides[2]: slide must be an object".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("$.slides[0]")));
}

#[test]
fn load_config_resets_on_failure_without_guessing() {
    let cfg = load_config(&json!({ "slides": "nope" }));
    assert_eq!(cfg, Project::empty().reels_config);
    assert!(cfg.slides.is_empty());
}

#[test]
fn load_config_resets_on_unknown_slide_type() {
    let mut v = minimal();
    v["slides"][0]["type"] = json!("poll");
    assert!(validate(&v));
    assert!(load_config(&v).slides.is_empty());
}

#[test]
fn load_config_keeps_every_slide_when_one_field_is_mistyped() {
    let mut v = minimal();
    v["slides"][0]["content"] = json!({ "mainTitle": 42, "subTitle": "still here" });
    v["slides"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "id": "b",
            "type": "title",
            "content": { "mainTitle": "Fine" },
            "timing": { "duration": 1000 },
            "background": { "type": "color", "value": "#000" }
        }));
    assert!(validate(&v));

    let cfg = load_config(&v);
    assert_eq!(cfg.slides.len(), 2);
    let SlideContent::Title(a) = &cfg.slides[0].content else {
        panic!("expected title content");
    };
    assert_eq!(a.main_title, "");
    assert_eq!(a.sub_title.as_deref(), Some("still here"));
    assert_eq!(cfg.slides[1].id, "b");
}

#[test]
fn load_config_keeps_a_valid_candidate() {
    let cfg = load_config(&minimal());
    assert_eq!(cfg.slides.len(), 1);
    assert_eq!(cfg.slides[0].id, "a");
    let project = load_project(&minimal());
    assert_eq!(project.selection(), Some("a"));
}
