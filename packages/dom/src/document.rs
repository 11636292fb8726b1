//! # Document
//!
//! A parsed menu document, normalized to always carry an `html` element with
//! `head` and `body` children. The `body` element is the root container:
//! every element path is computed from it, and all mutation commands operate
//! inside it.

use serde::{Deserialize, Serialize};

use crate::node::Node;
use crate::parser::parse_fragment;
use crate::serializer::serialize_node;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The `html` element. Invariant: contains exactly one `head` and one
    /// `body` element child (synthesized at parse time when missing).
    root: Node,
}

impl Document {
    /// Parse a full page or a bare fragment. Never fails: fragments become
    /// the body of a synthesized page.
    pub fn parse(input: &str) -> Self {
        let roots = parse_fragment(input);
        Self::from_roots(roots)
    }

    /// Build a document whose body holds the given nodes (test and insert
    /// tooling convenience).
    pub fn from_body_nodes(nodes: Vec<Node>) -> Self {
        let body = Node::element("body").with_children(nodes);
        let root = Node::element("html")
            .with_child(Node::element("head"))
            .with_child(body);
        Self { root }
    }

    fn from_roots(mut roots: Vec<Node>) -> Self {
        // A proper page: take the html element as-is and normalize it.
        if let Some(index) = roots.iter().position(|n| n.tag() == Some("html")) {
            let mut root = roots.swap_remove(index);
            ensure_section(&mut root, "head", true);
            ensure_section(&mut root, "body", false);
            return Self { root };
        }

        // Headless input: pull out top-level head/body if present, put
        // everything else into the body.
        let mut head = None;
        let mut body = None;
        let mut loose = Vec::new();
        for node in roots {
            match node.tag() {
                Some("head") if head.is_none() => head = Some(node),
                Some("body") if body.is_none() => body = Some(node),
                _ => loose.push(node),
            }
        }
        let mut body = body.unwrap_or_else(|| Node::element("body"));
        if let Some(children) = body.children_mut() {
            children.extend(loose);
        }
        let root = Node::element("html")
            .with_child(head.unwrap_or_else(|| Node::element("head")))
            .with_child(body);
        Self { root }
    }

    pub fn head(&self) -> &Node {
        self.section("head")
    }

    /// The root container all paths are computed from.
    pub fn body(&self) -> &Node {
        self.section("body")
    }

    pub fn body_mut(&mut self) -> &mut Node {
        let index = self
            .root
            .children()
            .iter()
            .position(|n| n.tag() == Some("body"))
            .expect("document invariant: body exists");
        &mut self.root.children_mut().expect("html is an element")[index]
    }

    fn section(&self, tag: &str) -> &Node {
        self.root
            .children()
            .iter()
            .find(|n| n.tag() == Some(tag))
            .expect("document invariant: head and body exist")
    }

    /// Full-page serialization, the payload of every resync.
    pub fn serialize(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        serialize_node(&self.root, &mut out);
        out
    }
}

/// Insert an empty `head`/`body` into the html element when missing.
fn ensure_section(root: &mut Node, tag: &str, at_front: bool) {
    let exists = root.children().iter().any(|n| n.tag() == Some(tag));
    if exists {
        return;
    }
    if let Some(children) = root.children_mut() {
        let section = Node::element(tag);
        if at_front {
            children.insert(0, section);
        } else {
            children.push(section);
        }
    }
}
