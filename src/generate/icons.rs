use std::collections::BTreeMap;

use crate::config::model::AssetTable;

macro_rules! icon24 {
    ($d:literal) => {
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" fill=\"white\"><path d=\"",
            $d,
            "\"/></svg>"
        )
    };
}

/// Icons available without any Host-supplied asset.
pub const BUILTIN_ICONS: [(&str, &str); 9] = [
    (
        "humanities",
        icon24!(
            "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm0 18c-4.41 0-8-3.59-8-8s3.59-8 8-8 8 3.59 8 8-3.59 8-8 8zm-5-9c.83 0 1.5-.67 1.5-1.5S7.83 8 7 8s-1.5.67-1.5 1.5S6.17 11 7 11zm8-1.5c0-.83-.67-1.5-1.5-1.5s-1.5.67-1.5 1.5.67 1.5 1.5 1.5 1.5-.67 1.5-1.5zM9.11 16.5c.39-.44.89-.8 1.45-1.07.56-.27 1.17-.43 1.8-.43.63 0 1.24.16 1.8.43.56.27 1.05.63 1.45 1.07.2.23.6.23.8 0 .21-.23.21-.6 0-.83-.48-.55-1.1-1-1.8-1.33-.71-.33-1.48-.5-2.25-.5-.77 0-1.54.17-2.25.5-.7.33-1.32.78-1.8 1.33-.21.23-.21.6 0 .83.2.23.6.23.8 0z"
        ),
    ),
    (
        "ai",
        icon24!(
            "M21 10.5h-1v-1c0-.83-.67-1.5-1.5-1.5h-1v-1c0-.83-.67-1.5-1.5-1.5h-6c-.83 0-1.5.67-1.5 1.5v1h-1c-.83 0-1.5.67-1.5 1.5v1h-1c-.83 0-1.5.67-1.5 1.5v5c0 .83.67 1.5 1.5 1.5h1v1c0 .83.67 1.5 1.5 1.5h1v1c0 .83.67 1.5 1.5 1.5h6c.83 0 1.5-.67 1.5-1.5v-1h1c.83 0 1.5-.67 1.5-1.5v-1h1c.83 0 1.5-.67 1.5-1.5v-5c0-.83-.67-1.5-1.5-1.5zM16 18H8v-1h8v1zm0-3H8v-1h8v1zm0-3H8v-1h8v1zm0-3H8V8h8v1z"
        ),
    ),
    (
        "sustainability",
        icon24!(
            "M12 22c4.97 0 9-4.03 9-9-4.97 0-9 4.03-9 9zM5.6 10.25c0 1.38 1.12 2.5 2.5 2.5.53 0 1.01-.16 1.42-.44l-.02.19c0 1.38 1.12 2.5 2.5 2.5s2.5-1.12 2.5-2.5l-.02-.19c.4.28.89.44 1.42.44 1.38 0 2.5-1.12 2.5-2.5 0-1-.59-1.85-1.43-2.25.84-.4 1.43-1.25 1.43-2.25 0-1.38-1.12-2.5-2.5-2.5-.53 0-1.01.16-1.42.44l.02-.19C14.5 2.12 13.38 1 12 1S9.5 2.12 9.5 3.5l.02.19c-.4-.28-.89-.44-1.42-.44-1.38 0-2.5 1.12-2.5 2.5 0 1 .59 1.85 1.43 2.25-.84.4-1.43 1.25-1.43 2.25zM12 5.5c1.38 0 2.5 1.12 2.5 2.5s-1.12 2.5-2.5 2.5S9.5 9.38 9.5 8s1.12-2.5 2.5-2.5zM3 13c0 4.97 4.03 9 9 9 0-4.97-4.03-9-9-9z"
        ),
    ),
    (
        "islamic",
        icon24!(
            "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm0 18c-4.41 0-8-3.59-8-8s3.59-8 8-8 8 3.59 8 8-3.59 8-8 8zm-1-13h2v6h-2zm0 8h2v2h-2z"
        ),
    ),
    (
        "workshop",
        icon24!(
            "M12 3c-4.97 0-9 4.03-9 9s4.03 9 9 9 9-4.03 9-9-4.03-9-9-9zm0 16c-3.86 0-7-3.14-7-7s3.14-7 7-7 7 3.14 7 7-3.14 7-7 7zm1-11h-2v3H8v2h3v3h2v-3h3v-2h-3V8z"
        ),
    ),
    (
        "publication",
        icon24!(
            "M19 3H5c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h14c1.1 0 2-.9 2-2V5c0-1.1-.9-2-2-2zm-5 14H7v-2h7v2zm3-4H7v-2h10v2zm0-4H7V7h10v2z"
        ),
    ),
    (
        "certificate",
        icon24!(
            "M12 1L3 5v6c0 5.55 3.84 10.74 9 12 5.16-1.26 9-6.45 9-12V5l-9-4zm0 10.99h7c-.53 4.12-3.28 7.79-7 8.94V12H5V6.3l7-3.11v8.8z"
        ),
    ),
    (
        "physical",
        icon24!(
            "M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z"
        ),
    ),
    (
        "online",
        icon24!(
            "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm-1 17.93c-3.95-.49-7-3.85-7-7.93 0-.62.08-1.21.21-1.79L9 15v1c0 1.1.9 2 2 2v1.93zm6.9-2.54c-.26-.81-1-1.39-1.9-1.39h-1v-3c0-.55-.45-1-1-1H8v-2h2c.55 0 1-.45 1-1V7h2c1.1 0 2-.9 2-2v-.41c2.93 1.19 5 4.06 5 7.41 0 2.08-.8 3.97-2.1 5.39z"
        ),
    ),
];

/// Icon id → SVG markup lookup: Host entries first, then the built-in set.
#[derive(Clone, Debug, Default)]
pub struct IconRegistry {
    host: BTreeMap<String, String>,
}

impl IconRegistry {
    /// Registry with only the built-in icons.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Registry layering the Host's `svgIcons` over the built-in icons.
    pub fn with_assets(assets: &AssetTable) -> Self {
        Self {
            host: assets.svg_icons.clone(),
        }
    }

    /// Resolve an icon id. Unknown and empty ids resolve to `None`.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        if id.is_empty() {
            return None;
        }
        if let Some(svg) = self.host.get(id) {
            return Some(svg.as_str());
        }
        BUILTIN_ICONS
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, svg)| *svg)
    }

    /// Every resolvable entry, keyed and ordered by id, Host entries replacing built-ins.
    pub fn entries(&self) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> = BUILTIN_ICONS
            .iter()
            .map(|(id, svg)| ((*id).to_owned(), (*svg).to_owned()))
            .collect();
        out.extend(self.host.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/icons.rs"]
mod tests;
