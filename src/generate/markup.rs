//! Minimal HTML node tree produced by the slide builders.
//!
//! Text and attribute values go through minijinja's HTML escaper at render time, the same one
//! that auto-escapes the document shell. Only [`Node::Raw`] bypasses escaping; it is reserved
//! for registry-provided SVG fragments.

use std::fmt::Write as _;

use minijinja::HtmlEscape;

#[derive(Clone, Debug, PartialEq, Eq)]
/// One node of a built slide.
pub enum Node {
    /// Element with attributes and children.
    Element(Element),
    /// Escaped text.
    Text(String),
    /// Trusted markup inserted verbatim.
    Raw(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An HTML element.
pub struct Element {
    /// Tag name.
    pub tag: &'static str,
    /// Attributes in insertion order.
    pub attrs: Vec<(&'static str, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

const VOID_TAGS: [&str; 3] = ["img", "br", "meta"];

impl Element {
    /// Empty element.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Shorthand for the `class` attribute.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Append a child.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Append every node of `nodes`.
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Value of the first attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl Node {
    /// Serialize this node (and its subtree) as HTML.
    pub fn render(&self, out: &mut String) {
        match self {
            Self::Text(t) => escape_into(t, out),
            Self::Raw(r) => out.push_str(r),
            Self::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (k, v) in &el.attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    escape_into(v, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for c in &el.children {
                    c.render(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }

    /// Render to a fresh string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    /// Depth-first search for elements carrying `class`.
    pub fn find_by_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if let Self::Element(el) = self {
            if el.has_class(class) {
                out.push(el);
            }
            for c in &el.children {
                c.find_by_class(class, out);
            }
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(t) => t.clone(),
            Self::Raw(_) => String::new(),
            Self::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}

/// Render a node list back to back.
pub fn render_all(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        n.render(&mut out);
    }
    out
}

fn escape_into(s: &str, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", HtmlEscape(s));
}

/// Drop characters that would let an opaque token escape a CSS declaration or style block.
pub fn css_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Quote a URL for use inside CSS `url(...)`.
pub fn css_url(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("%22"),
            '\\' => out.push_str("%5C"),
            '\n' | '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Serialize `value` as JSON that is safe to place inside a `<script>` element.
///
/// `<`, `>`, `&`, U+2028 and U+2029 are written as `\uXXXX` escapes, which any JSON parser reads
/// back unchanged.
pub fn script_safe_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    let raw = serde_json::to_string(value)?;
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/markup.rs"]
mod tests;
