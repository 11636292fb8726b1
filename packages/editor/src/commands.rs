//! # Mutation Commands
//!
//! Host-issued operations on the live document. Every command resolves its
//! path at the moment of execution — paths are never trusted across
//! mutations — and every successful mutation is followed by exactly one
//! outline update and one full resync, in that order, before the next
//! message is processed.
//!
//! Failures (stale path, empty fragment) are silent no-ops: the outline
//! panel is always built from a slightly older snapshot than a fast-moving
//! document, so races are expected. Each no-op leaves a debug trace for
//! implementers who want observability.

use menukit_dom::{outer_html, parse_fragment, Node, NodePath};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CommandFailure;
use crate::layout::Measure;
use crate::runtime::{EditorRuntime, Interaction};

/// Snippet length reported with element-level events.
pub(crate) const CLICK_SNIPPET_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Top,
    Before,
    After,
}

/// Commands the host can issue over the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    RequestOutline,
    /// Scroll the element into view and play a transient highlight.
    Select { path: NodePath },
    /// Remove the element and its subtree.
    Delete { path: NodePath },
    /// Swap the element with its previous/next sibling.
    Move { path: NodePath, direction: Direction },
    /// Parse the fragment and insert its first element.
    Insert {
        html: String,
        position: InsertPosition,
        anchor: Option<NodePath>,
    },
    /// Insert all parsed nodes before the target, then remove the target.
    Replace { path: NodePath, html: String },
    /// Report the element's markup back to the host.
    GetElementHtml { path: NodePath },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::RequestOutline => "request-outline",
            Command::Select { .. } => "select",
            Command::Delete { .. } => "delete",
            Command::Move { .. } => "move",
            Command::Insert { .. } => "insert",
            Command::Replace { .. } => "replace",
            Command::GetElementHtml { .. } => "get-element-html",
        }
    }
}

impl<M: Measure> EditorRuntime<M> {
    /// Apply one host command in full. Failures are absorbed; the only
    /// observable difference is the absence of the outline/resync pair.
    pub fn apply_command(&mut self, command: Command) {
        let name = command.name();
        let result = match command {
            Command::RequestOutline => {
                self.request_outline();
                Ok(())
            }
            Command::Select { path } => self.try_select(&path),
            Command::Delete { path } => self.try_delete(&path),
            Command::Move { path, direction } => self.try_move(&path, direction),
            Command::Insert {
                html,
                position,
                anchor,
            } => self.try_insert(&html, position, anchor.as_ref()),
            Command::Replace { path, html } => self.try_replace(&path, &html),
            Command::GetElementHtml { path } => self.try_get_element_html(&path),
        };
        if let Err(failure) = result {
            debug!(command = name, reason = %failure, "command ignored as no-op");
        }
    }

    fn try_select(&mut self, path: &NodePath) -> Result<(), CommandFailure> {
        path.resolve(self.document.body())
            .ok_or(CommandFailure::StalePath)?;
        if let Some(rect) = self.rect_of(path) {
            self.viewport.center_on(rect.mid_y());
        }
        self.start_highlight(path.clone());
        Ok(())
    }

    fn try_delete(&mut self, path: &NodePath) -> Result<(), CommandFailure> {
        remove_element(self.document.body_mut(), path)?;
        self.invalidate_selection_under(path);
        self.after_mutation();
        Ok(())
    }

    fn try_move(&mut self, path: &NodePath, direction: Direction) -> Result<(), CommandFailure> {
        let parent_path = path.parent().ok_or(CommandFailure::NoParent)?;
        let index = path.last_index().expect("non-root path has an index");
        let neighbor = match direction {
            Direction::Up => index.checked_sub(1).ok_or(CommandFailure::NoSibling)?,
            Direction::Down => index + 1,
        };

        let parent = parent_path
            .resolve_mut(self.document.body_mut())
            .ok_or(CommandFailure::StalePath)?;
        parent
            .raw_child_index(index)
            .ok_or(CommandFailure::StalePath)?;
        let raw_a = parent
            .raw_child_index(index.min(neighbor))
            .ok_or(CommandFailure::NoSibling)?;
        let raw_b = parent
            .raw_child_index(index.max(neighbor))
            .ok_or(CommandFailure::NoSibling)?;
        parent
            .children_mut()
            .expect("parent resolved as element")
            .swap(raw_a, raw_b);

        // A selection on the moved element follows it to its new slot.
        let moved_to = parent_path.child(neighbor);
        match &mut self.interaction {
            Interaction::ElementSelected { path: selected }
            | Interaction::ImageSelected { path: selected, .. }
                if selected == path =>
            {
                *selected = moved_to;
            }
            _ => {}
        }

        self.after_mutation();
        Ok(())
    }

    fn try_insert(
        &mut self,
        html: &str,
        position: InsertPosition,
        anchor: Option<&NodePath>,
    ) -> Result<(), CommandFailure> {
        let mut element = parse_fragment(html)
            .into_iter()
            .find(Node::is_element)
            .ok_or(CommandFailure::EmptyFragment)?;

        match element.tag() {
            Some("img") => {
                // Images land in free placement near the current scroll
                // position; they are expected to be repositioned by hand.
                element.set_style("position", "absolute");
                element.set_style("left", format!("{}px", self.config.insert_image_left));
                element.set_style(
                    "top",
                    format!(
                        "{}px",
                        self.viewport.scroll_y + self.config.insert_image_top_offset
                    ),
                );
            }
            Some("hr") => {}
            _ => element.set_attr("contenteditable", "true"),
        }

        let inserted_at = self.place(element, position, anchor);

        if let Some(rect) = self.rect_of(&inserted_at) {
            self.viewport.center_on(rect.mid_y());
        }
        self.start_highlight(inserted_at);
        self.after_mutation();
        Ok(())
    }

    /// Insert the element per the requested position, falling back to
    /// appending at the document end when the anchor is missing or stale.
    fn place(
        &mut self,
        element: Node,
        position: InsertPosition,
        anchor: Option<&NodePath>,
    ) -> NodePath {
        let body = self.document.body_mut();

        if position == InsertPosition::Top {
            body.children_mut()
                .expect("body is an element")
                .insert(0, element);
            return NodePath::new(vec![0]);
        }

        if let Some(anchor) = anchor {
            let resolvable = !anchor.is_root() && anchor.resolve(body).is_some();
            if resolvable {
                let parent_path = anchor.parent().expect("non-root anchor");
                let index = anchor.last_index().expect("non-root anchor");
                let parent = parent_path
                    .resolve_mut(body)
                    .expect("anchor resolved above");
                let raw = parent
                    .raw_child_index(index)
                    .expect("anchor resolved above");
                let (raw_slot, elem_slot) = match position {
                    InsertPosition::Before => (raw, index),
                    _ => (raw + 1, index + 1),
                };
                parent
                    .children_mut()
                    .expect("parent is an element")
                    .insert(raw_slot, element);
                return parent_path.child(elem_slot);
            }
        }

        body.children_mut()
            .expect("body is an element")
            .push(element);
        NodePath::new(vec![body.element_child_count() - 1])
    }

    fn try_replace(&mut self, path: &NodePath, html: &str) -> Result<(), CommandFailure> {
        let parent_path = path.parent().ok_or(CommandFailure::NoParent)?;
        let index = path.last_index().expect("non-root path has an index");

        let replacement = parse_fragment(html);
        if replacement.is_empty() {
            return Err(CommandFailure::EmptyFragment);
        }

        let parent = parent_path
            .resolve_mut(self.document.body_mut())
            .ok_or(CommandFailure::StalePath)?;
        let raw = parent
            .raw_child_index(index)
            .ok_or(CommandFailure::StalePath)?;
        let children = parent.children_mut().expect("parent resolved as element");

        // All new nodes go in front of the old element, then it is removed —
        // a multi-root fragment may replace a single element.
        children.splice(raw..=raw, replacement);

        self.invalidate_selection_under(path);
        self.after_mutation();
        Ok(())
    }

    fn try_get_element_html(&mut self, path: &NodePath) -> Result<(), CommandFailure> {
        let element = path
            .resolve(self.document.body())
            .ok_or(CommandFailure::StalePath)?;
        let event = crate::events::Event::ElementHtmlResponse {
            path: path.clone(),
            html: outer_html(element),
            tag_name: element.tag().unwrap_or("").to_ascii_uppercase(),
            snippet: element
                .text_content()
                .chars()
                .take(CLICK_SNIPPET_LEN)
                .collect(),
        };
        self.emit(event);
        Ok(())
    }

    /// Drop any selection (and highlight) pointing into a removed subtree.
    pub(crate) fn invalidate_selection_under(&mut self, removed: &NodePath) {
        let selected = match &self.interaction {
            Interaction::ElementSelected { path } => Some(path),
            Interaction::ImageSelected { path, .. } => Some(path),
            _ => None,
        };
        if selected.is_some_and(|p| p.indices().starts_with(removed.indices())) {
            self.interaction = Interaction::Idle;
        }
        if self
            .active_highlight()
            .is_some_and(|h| h.path.indices().starts_with(removed.indices()))
        {
            self.clear_highlight();
        }
    }
}

/// Detach the element at `path` from its parent and return it.
pub(crate) fn remove_element(body: &mut Node, path: &NodePath) -> Result<Node, CommandFailure> {
    let parent_path = path.parent().ok_or(CommandFailure::NoParent)?;
    let index = path.last_index().expect("non-root path has an index");
    let parent = parent_path
        .resolve_mut(body)
        .ok_or(CommandFailure::StalePath)?;
    let raw = parent
        .raw_child_index(index)
        .ok_or(CommandFailure::StalePath)?;
    Ok(parent
        .children_mut()
        .expect("parent resolved as element")
        .remove(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::geometry::Viewport;
    use crate::layout::BlockLayout;
    use menukit_dom::Document;

    fn runtime(html: &str) -> EditorRuntime<BlockLayout> {
        EditorRuntime::new(
            Document::parse(html),
            BlockLayout::default(),
            Viewport::new(800.0, 600.0),
        )
    }

    fn body_tags(rt: &EditorRuntime<BlockLayout>) -> Vec<String> {
        rt.document()
            .body()
            .element_children()
            .map(|c| c.tag().unwrap().to_string())
            .collect()
    }

    #[test]
    fn delete_emits_outline_then_resync_exactly_once() {
        let mut rt = runtime("<h1>A</h1><p>B</p>");
        rt.drain_events();
        rt.apply_command(Command::Delete {
            path: NodePath::new(vec![0]),
        });
        let events = rt.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::OutlineUpdated(_)));
        assert!(matches!(events[1], Event::DocumentResynced(_)));
        assert_eq!(body_tags(&rt), vec!["p"]);
    }

    #[test]
    fn stale_delete_is_a_silent_no_op() {
        let mut rt = runtime("<h1>A</h1>");
        let path = NodePath::new(vec![0]);
        rt.apply_command(Command::Delete { path: path.clone() });
        let after_first = rt.document().serialize();
        rt.drain_events();

        // Same path again: nothing happens, nothing is emitted.
        rt.apply_command(Command::Delete { path });
        assert!(rt.drain_events().is_empty());
        assert_eq!(rt.document().serialize(), after_first);
    }

    #[test]
    fn deleting_the_root_container_is_refused() {
        let mut rt = runtime("<p>A</p>");
        rt.drain_events();
        rt.apply_command(Command::Delete {
            path: NodePath::root(),
        });
        assert!(rt.drain_events().is_empty());
        assert_eq!(body_tags(&rt), vec!["p"]);
    }

    #[test]
    fn move_swaps_with_sibling_in_document_order() {
        let mut rt = runtime("<h1>A</h1><p>B</p><p>C</p>");
        rt.apply_command(Command::Move {
            path: NodePath::new(vec![2]),
            direction: Direction::Up,
        });
        assert_eq!(
            rt.document().body().element_children().nth(1).unwrap().text_content(),
            "C"
        );

        rt.apply_command(Command::Move {
            path: NodePath::new(vec![1]),
            direction: Direction::Down,
        });
        assert_eq!(
            rt.document().body().element_children().nth(1).unwrap().text_content(),
            "B"
        );
    }

    #[test]
    fn move_without_sibling_is_a_no_op() {
        let mut rt = runtime("<h1>A</h1><p>B</p>");
        rt.drain_events();
        rt.apply_command(Command::Move {
            path: NodePath::new(vec![0]),
            direction: Direction::Up,
        });
        rt.apply_command(Command::Move {
            path: NodePath::new(vec![1]),
            direction: Direction::Down,
        });
        assert!(rt.drain_events().is_empty());
        assert_eq!(body_tags(&rt), vec!["h1", "p"]);
    }

    #[test]
    fn insert_at_top_becomes_first_child() {
        let mut rt = runtime("<h1>Menu</h1>");
        rt.drain_events();
        rt.apply_command(Command::Insert {
            html: "<p>Daily specials</p>".into(),
            position: InsertPosition::Top,
            anchor: None,
        });

        let outline = rt.outline();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].tag, "p");
        assert_eq!(outline[0].text, "Daily specials");
        assert_eq!(outline[0].depth, 0);

        let events = rt.drain_events();
        match &events[1] {
            Event::DocumentResynced(html) => {
                assert!(html.contains("<body><p contenteditable=\"true\">Daily specials</p>"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn insert_before_and_after_anchor() {
        let mut rt = runtime("<h1>A</h1><p>B</p>");
        rt.apply_command(Command::Insert {
            html: "<hr>".into(),
            position: InsertPosition::Before,
            anchor: Some(NodePath::new(vec![1])),
        });
        assert_eq!(body_tags(&rt), vec!["h1", "hr", "p"]);

        rt.apply_command(Command::Insert {
            html: "<blockquote>Q</blockquote>".into(),
            position: InsertPosition::After,
            anchor: Some(NodePath::new(vec![2])),
        });
        assert_eq!(body_tags(&rt), vec!["h1", "hr", "p", "blockquote"]);
    }

    #[test]
    fn insert_with_stale_anchor_appends_at_end() {
        let mut rt = runtime("<h1>A</h1>");
        rt.apply_command(Command::Insert {
            html: "<p>tail</p>".into(),
            position: InsertPosition::After,
            anchor: Some(NodePath::new(vec![9])),
        });
        assert_eq!(body_tags(&rt), vec!["h1", "p"]);
    }

    #[test]
    fn inserted_image_gets_free_placement() {
        let mut rt = runtime("<h1>A</h1>");
        rt.scroll_by(0.0, 40.0);
        rt.apply_command(Command::Insert {
            html: "<img src=\"logo.png\">".into(),
            position: InsertPosition::After,
            anchor: None,
        });
        let img = rt.document().body().element_children().nth(1).unwrap();
        assert!(img.is_absolute());
        assert_eq!(img.style_px("left"), Some(50.0));
        assert_eq!(img.style_px("top"), Some(140.0));
        assert_eq!(img.attr("contenteditable"), None);
    }

    #[test]
    fn insert_of_text_only_fragment_is_a_no_op() {
        let mut rt = runtime("<h1>A</h1>");
        rt.drain_events();
        rt.apply_command(Command::Insert {
            html: "just words".into(),
            position: InsertPosition::Top,
            anchor: None,
        });
        assert!(rt.drain_events().is_empty());
    }

    #[test]
    fn replace_supports_multi_root_fragments() {
        let mut rt = runtime("<h1>A</h1><p>old</p>");
        rt.apply_command(Command::Replace {
            path: NodePath::new(vec![1]),
            html: "<p>one</p><p>two</p>".into(),
        });
        assert_eq!(body_tags(&rt), vec!["h1", "p", "p"]);
        assert!(!rt.document().serialize().contains("old"));
    }

    #[test]
    fn replace_with_empty_fragment_is_a_no_op() {
        let mut rt = runtime("<p>keep</p>");
        rt.drain_events();
        rt.apply_command(Command::Replace {
            path: NodePath::new(vec![0]),
            html: "".into(),
        });
        assert!(rt.drain_events().is_empty());
        assert!(rt.document().serialize().contains("keep"));
    }

    #[test]
    fn select_centers_viewport_and_highlights() {
        let mut rt = runtime("<h1>A</h1><p>B</p><p>C</p><p>D</p>");
        rt.tick(50);
        rt.drain_events(); // initial height report

        rt.apply_command(Command::Select {
            path: NodePath::new(vec![3]),
        });
        assert!(rt.active_highlight().is_some());
        // Selection is a view command: no outline, no resync, no height.
        rt.tick(1000);
        assert!(rt.drain_events().is_empty());
    }

    #[test]
    fn get_element_html_reports_markup() {
        let mut rt = runtime("<p class=\"x\">Soup</p>");
        rt.apply_command(Command::GetElementHtml {
            path: NodePath::new(vec![0]),
        });
        match rt.drain_events().pop().unwrap() {
            Event::ElementHtmlResponse {
                html,
                tag_name,
                snippet,
                ..
            } => {
                assert_eq!(html, "<p class=\"x\">Soup</p>");
                assert_eq!(tag_name, "P");
                assert_eq!(snippet, "Soup");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
