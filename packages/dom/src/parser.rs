//! # Tree Builder
//!
//! Builds a [`Node`] tree from the token stream. Recovery rules: void and
//! self-closing tags never open a scope, an end tag with no matching open
//! element is dropped, and elements still open at end of input are closed
//! implicitly.

use crate::node::{is_void_tag, Node, StyleProperty};
use crate::tokenizer::{tokenize, Token};

/// Parse an HTML fragment into a list of top-level nodes. Never fails;
/// malformed input degrades to text or is dropped.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::new();
    for token in tokenize(input) {
        builder.process(token);
    }
    builder.finish()
}

struct TreeBuilder {
    roots: Vec<Node>,
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            roots: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn process(&mut self, token: Token) {
        match token {
            Token::Text(content) => self.append(Node::Text { content }),
            Token::Comment(content) => self.append(Node::Comment { content }),
            Token::Doctype => {}
            Token::StartTag {
                tag,
                attributes,
                self_closing,
            } => {
                let mut element = Node::Element {
                    tag: tag.clone(),
                    attributes,
                    styles: Vec::new(),
                    children: Vec::new(),
                };
                hoist_style_attribute(&mut element);
                if self_closing || is_void_tag(&tag) {
                    self.append(element);
                } else {
                    self.stack.push(element);
                }
            }
            Token::EndTag { tag } => self.close(&tag),
        }
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Node::Element { children, .. }) => children.push(node),
            _ => self.roots.push(node),
        }
    }

    /// Close the nearest open element with this tag, implicitly closing
    /// anything opened inside it. Unmatched end tags are dropped.
    fn close(&mut self, tag: &str) {
        let matches = self
            .stack
            .iter()
            .rposition(|open| open.tag() == Some(tag));
        let Some(index) = matches else {
            return;
        };
        while self.stack.len() > index {
            let node = self.stack.pop().expect("stack length checked");
            self.append(node);
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while let Some(node) = self.stack.pop() {
            self.append(node);
        }
        self.roots
    }
}

/// Move an element's `style` attribute into its parsed style list.
fn hoist_style_attribute(element: &mut Node) {
    let Some(raw) = element.attr("style").map(str::to_string) else {
        return;
    };
    element.remove_attr("style");
    if let Node::Element { styles, .. } = element {
        *styles = parse_style_text(&raw);
    }
}

/// Split inline style text (`"left: 50px; top: 10px"`) into declarations.
pub fn parse_style_text(raw: &str) -> Vec<StyleProperty> {
    raw.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some(StyleProperty {
                name: name.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
