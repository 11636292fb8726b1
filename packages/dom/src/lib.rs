//! # menukit-dom
//!
//! Document model for the menukit editor: an owned HTML node tree with a
//! forgiving parser, a deterministic serializer, element paths, and the
//! outline builder that feeds the host's tree panel.
//!
//! The tree is the single source of truth for the whole editor. Everything
//! else — outline, overlays, the host's mirror — is derived from it on
//! demand.

pub mod document;
pub mod node;
pub mod outline;
pub mod parser;
pub mod path;
pub mod serializer;
pub mod tokenizer;

pub use document::Document;
pub use node::{
    is_inline_tag, is_meaningful_tag, is_non_content_tag, is_raw_text_tag, is_selectable_tag,
    is_void_tag, Attribute, Node, StyleProperty,
};
pub use outline::{build_outline, OutlineConfig, OutlineNode};
pub use parser::{parse_fragment, parse_style_text};
pub use path::{walk, NodePath};
pub use serializer::{outer_html, serialize_node};
