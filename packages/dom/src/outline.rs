//! # Outline Builder
//!
//! Derives the hierarchical summary shown in the host's element tree panel.
//! The outline is rebuilt from scratch on every structural change — the
//! documents are small, and recomputation avoids an entire class of
//! incremental-sync bugs. For a fixed tree the output is identical on every
//! call.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::node::{is_meaningful_tag, is_non_content_tag, Node};
use crate::path::NodePath;

/// Read-only projection of one meaningful element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub tag: String,
    /// Category glyph shown next to the entry.
    pub label: String,
    /// Short text snippet (hard-truncated).
    pub text: String,
    pub path: NodePath,
    #[serde(rename = "childCount")]
    pub child_count: usize,
    pub children: Vec<OutlineNode>,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Descent stops silently past this depth.
    pub max_depth: usize,
    pub snippet_len: usize,
    /// Element ids excluded from the outline (editor overlay chrome, if a
    /// host ever round-trips a document that carries it).
    pub skip_ids: Vec<String>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            snippet_len: 50,
            skip_ids: vec!["floating-toolbar".to_string(), "drag-handle".to_string()],
        }
    }
}

/// Build the outline of the document body.
pub fn build_outline(document: &Document, config: &OutlineConfig) -> Vec<OutlineNode> {
    build_level(document.body(), NodePath::root(), 0, config)
}

fn build_level(
    element: &Node,
    path: NodePath,
    depth: usize,
    config: &OutlineConfig,
) -> Vec<OutlineNode> {
    if depth > config.max_depth {
        return Vec::new();
    }

    let mut nodes = Vec::new();
    for (index, child) in element.element_children().enumerate() {
        let tag = child.tag().expect("element_children yields elements");
        if is_non_content_tag(tag) {
            continue;
        }
        if child
            .attr("id")
            .is_some_and(|id| config.skip_ids.iter().any(|s| s == id))
        {
            continue;
        }

        let child_path = path.child(index);
        let children = build_level(child, child_path.clone(), depth + 1, config);
        if is_meaningful_tag(tag) || !children.is_empty() {
            nodes.push(OutlineNode {
                tag: tag.to_string(),
                label: tag_label(tag).to_string(),
                text: snippet(child, config.snippet_len),
                path: child_path,
                child_count: child.element_child_count(),
                children,
                depth,
            });
        }
    }
    nodes
}

/// Snippet shown next to the outline entry: fixed markers for images and
/// dividers, otherwise direct text falling back to descendant text, hard-cut
/// to `max_len` characters.
fn snippet(element: &Node, max_len: usize) -> String {
    match element.tag() {
        Some("img") => return "[Image]".to_string(),
        Some("hr") => return "[Divider]".to_string(),
        _ => {}
    }

    let mut text = element.direct_text().trim().to_string();
    if text.is_empty() {
        text = element.text_content().trim().to_string();
    }
    let truncated: String = text.chars().take(max_len).collect();
    if truncated.is_empty() {
        format!("[{}]", element.tag().unwrap_or("node"))
    } else {
        truncated
    }
}

fn tag_label(tag: &str) -> &'static str {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "\u{1f524}",
        "p" | "span" | "a" => "\u{1f4dd}",
        "img" => "\u{1f5bc}",
        "hr" => "\u{2501}",
        "table" | "tr" | "td" | "th" | "thead" | "tbody" => "\u{1f4ca}",
        "ul" | "ol" | "li" => "\u{1f4cb}",
        _ => "\u{1f4e6}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    fn outline(html: &str) -> Vec<OutlineNode> {
        build_outline(&doc(html), &OutlineConfig::default())
    }

    #[test]
    fn meaningful_tags_are_listed() {
        let nodes = outline("<h1>Menu</h1><p>Soup of the day</p><hr>");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].tag, "h1");
        assert_eq!(nodes[0].text, "Menu");
        assert_eq!(nodes[2].text, "[Divider]");
    }

    #[test]
    fn scripts_and_styles_are_skipped() {
        let nodes = outline("<style>p{}</style><p>Soup</p><script>x()</script>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag, "p");
        assert_eq!(nodes[0].path, NodePath::new(vec![1]));
    }

    #[test]
    fn wrapper_with_meaningful_descendant_is_kept() {
        // <canvas> is not on the allow-list, but contains a meaningful <p>.
        let nodes = outline("<canvas><p>deep</p></canvas>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag, "canvas");
        assert_eq!(nodes[0].children.len(), 1);

        let nodes = outline("<canvas><canvas></canvas></canvas>");
        assert!(nodes.is_empty());
    }

    #[test]
    fn snippet_falls_back_to_descendant_text() {
        let nodes = outline("<div><span>nested words</span></div>");
        assert_eq!(nodes[0].text, "nested words");
    }

    #[test]
    fn snippet_is_hard_truncated_to_fifty_chars() {
        let long = "x".repeat(80);
        let nodes = outline(&format!("<p>{long}</p>"));
        assert_eq!(nodes[0].text.chars().count(), 50);
    }

    #[test]
    fn empty_element_gets_bracketed_placeholder() {
        let nodes = outline("<section></section>");
        assert_eq!(nodes[0].text, "[section]");
    }

    #[test]
    fn depth_is_capped_without_error() {
        // 10 levels of nesting with content only at depth 8.
        let mut html = String::from("<p>deep</p>");
        for _ in 0..9 {
            html = format!("<div>{html}</div>");
        }
        let nodes = outline(&html);

        fn max_depth(nodes: &[OutlineNode]) -> usize {
            nodes
                .iter()
                .map(|n| n.depth.max(max_depth(&n.children)))
                .max()
                .unwrap_or(0)
        }
        assert!(max_depth(&nodes) <= 6);
    }

    #[test]
    fn output_is_deterministic() {
        let document = doc("<h1>A</h1><div><p>B</p><img src=\"x.png\"></div>");
        let config = OutlineConfig::default();
        assert_eq!(
            build_outline(&document, &config),
            build_outline(&document, &config)
        );
    }

    #[test]
    fn paths_in_outline_resolve() {
        let document = doc("text<h1>A</h1><div><p>B</p></div>");
        let nodes = build_outline(&document, &OutlineConfig::default());
        let p = &nodes[1].children[0];
        let resolved = p.path.resolve(document.body()).unwrap();
        assert_eq!(resolved.tag(), Some("p"));
    }

    #[test]
    fn child_count_counts_elements_only() {
        let nodes = outline("<ul>text<li>a</li><li>b</li></ul>");
        assert_eq!(nodes[0].child_count, 2);
    }
}
