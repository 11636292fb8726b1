//! # Node Model
//!
//! Owned tree representation of a generated menu document.
//!
//! The live tree is the single source of truth for the editor: there is no
//! separate mirror to keep in sync. Attributes and inline styles are kept as
//! ordered vectors so that serializing the same tree twice produces the same
//! markup.

use serde::{Deserialize, Serialize};

/// A single element attribute. The `style` attribute is not stored here; it
/// is split into [`StyleProperty`] entries at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One inline style declaration (`left: 50px`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
}

/// Document tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// HTML element (tag names stored lowercase)
    Element {
        tag: String,
        attributes: Vec<Attribute>,
        styles: Vec<StyleProperty>,
        children: Vec<Node>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl Node {
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<Node>) -> Self {
        if let Node::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Tag name for elements, `None` otherwise.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute, replacing an existing one of the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let Node::Element { attributes, .. } = self {
            let name = name.into();
            let value = value.into();
            if let Some(existing) = attributes.iter_mut().find(|a| a.name == name) {
                existing.value = value;
            } else {
                attributes.push(Attribute { name, value });
            }
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        if let Node::Element { attributes, .. } = self {
            attributes.retain(|a| a.name != name);
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { styles, .. } => styles
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.value.as_str()),
            _ => None,
        }
    }

    /// Set an inline style property, replacing an existing declaration.
    pub fn set_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let Node::Element { styles, .. } = self {
            let name = name.into();
            let value = value.into();
            if let Some(existing) = styles.iter_mut().find(|s| s.name == name) {
                existing.value = value;
            } else {
                styles.push(StyleProperty { name, value });
            }
        }
    }

    pub fn remove_style(&mut self, name: &str) {
        if let Node::Element { styles, .. } = self {
            styles.retain(|s| s.name != name);
        }
    }

    /// Parse a style property as a px length (`"50px"` or bare `"50"`).
    pub fn style_px(&self, name: &str) -> Option<f64> {
        self.style(name)
            .map(|v| v.trim().trim_end_matches("px"))
            .and_then(|v| v.trim().parse::<f64>().ok())
    }

    /// Whether the element is explicitly absolutely positioned.
    pub fn is_absolute(&self) -> bool {
        self.style("position").map(str::trim) == Some("absolute")
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Iterator over element children only (text and comments skipped).
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().iter().filter(|c| c.is_element())
    }

    pub fn element_child_count(&self) -> usize {
        self.element_children().count()
    }

    /// Map an element-child index (the unit paths are made of) to the index
    /// into `children()` that includes text and comment nodes.
    pub fn raw_child_index(&self, element_index: usize) -> Option<usize> {
        self.children()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_element())
            .nth(element_index)
            .map(|(raw, _)| raw)
    }

    /// Concatenated text of the node's direct text-node children.
    pub fn direct_text(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            if let Node::Text { content } = child {
                out.push_str(content);
            }
        }
        out
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            match node {
                Node::Text { content } => out.push_str(content),
                Node::Element { children, .. } => {
                    for child in children {
                        collect(child, out);
                    }
                }
                Node::Comment { .. } => {}
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}

/// Elements serialized without an end tag.
pub fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Tags that never appear in the outline and are not click targets.
pub fn is_non_content_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "link" | "meta")
}

/// Tags whose content is raw text (no entity decoding, no child elements).
pub fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// The outline's fixed allow-list of structurally meaningful tags.
pub fn is_meaningful_tag(tag: &str) -> bool {
    matches!(
        tag,
        "h1" | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "p"
            | "div"
            | "img"
            | "hr"
            | "section"
            | "table"
            | "ul"
            | "ol"
            | "li"
            | "span"
            | "a"
            | "header"
            | "footer"
            | "nav"
            | "article"
            | "main"
            | "figure"
            | "figcaption"
            | "blockquote"
            | "tr"
            | "td"
            | "th"
            | "thead"
            | "tbody"
    )
}

/// Block-level tags a click walks up to when selecting an element for
/// manipulation.
pub fn is_selectable_tag(tag: &str) -> bool {
    matches!(
        tag,
        "div" | "p"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "img"
            | "ul"
            | "ol"
            | "table"
            | "section"
            | "header"
            | "footer"
            | "figure"
            | "hr"
            | "blockquote"
    )
}

/// Inline formatting tags a click passes through when reporting the clicked
/// element to the host.
pub fn is_inline_tag(tag: &str) -> bool {
    matches!(
        tag,
        "span" | "b" | "i" | "u" | "em" | "strong" | "a" | "br" | "small" | "sub" | "sup"
    )
}
