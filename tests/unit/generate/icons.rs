use super::*;

#[test]
fn builtin_icons_are_svg_fragments() {
    let reg = IconRegistry::builtin();
    for (id, _) in BUILTIN_ICONS {
        let svg = reg.resolve(id).unwrap();
        assert!(svg.starts_with("<svg"), "{id}");
        assert!(svg.ends_with("</svg>"), "{id}");
    }
}

#[test]
fn unknown_and_empty_ids_resolve_to_nothing() {
    let reg = IconRegistry::builtin();
    assert!(reg.resolve("no-such-icon").is_none());
    assert!(reg.resolve("").is_none());
}

#[test]
fn host_icons_override_and_extend() {
    let mut assets = AssetTable::default();
    assets.svg_icons.insert("ai".into(), "<svg>custom</svg>".into());
    assets.svg_icons.insert("rocket".into(), "<svg>rocket</svg>".into());
    let reg = IconRegistry::with_assets(&assets);
    assert_eq!(reg.resolve("ai"), Some("<svg>custom</svg>"));
    assert_eq!(reg.resolve("rocket"), Some("<svg>rocket</svg>"));
    assert!(reg.resolve("online").is_some());
}

#[test]
fn entries_cover_builtins_and_host_icons() {
    let mut assets = AssetTable::default();
    assets.svg_icons.insert("ai".into(), "<svg>custom</svg>".into());
    assets.svg_icons.insert("rocket".into(), "<svg>rocket</svg>".into());
    let all = IconRegistry::with_assets(&assets).entries();
    assert_eq!(all.len(), BUILTIN_ICONS.len() + 1);
    assert_eq!(all["ai"], "<svg>custom</svg>");
    assert!(all.contains_key("sustainability"));
    let keys: Vec<&String> = all.keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
