//! # Serializer
//!
//! Markup emission for resyncs and element snapshots. Output is a pure
//! function of the tree: attribute and style order is preserved, so an
//! unchanged document always serializes to the same string.

use crate::node::{is_raw_text_tag, is_void_tag, Node};

/// Serialize a single node (outerHTML).
pub fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { content } => {
            out.push_str(&html_escape::encode_text(content));
        }
        Node::Comment { content } => {
            out.push_str("<!--");
            out.push_str(content);
            out.push_str("-->");
        }
        Node::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.name);
                if !attr.value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
                    out.push('"');
                }
            }
            if !styles.is_empty() {
                out.push_str(" style=\"");
                for (i, style) in styles.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&style.name);
                    out.push_str(": ");
                    out.push_str(&html_escape::encode_double_quoted_attribute(&style.value));
                }
                out.push('"');
            }
            out.push('>');

            if is_void_tag(tag) {
                return;
            }

            if is_raw_text_tag(tag) {
                for child in children {
                    if let Node::Text { content } = child {
                        out.push_str(content);
                    }
                }
            } else {
                for child in children {
                    serialize_node(child, out);
                }
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Convenience wrapper returning a fresh string.
pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    serialize_node(node, &mut out);
    out
}
