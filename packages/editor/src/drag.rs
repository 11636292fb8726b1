//! # Drag Engine
//!
//! Pointer-driven reordering and free placement. A drag starts from the
//! handle of the selected element and runs in one of two modes, fixed at
//! drag start:
//!
//! * **sort** — the element stays in flow; the pointer picks a drop slot
//!   among its current siblings and the move happens once, on release.
//! * **free** — the element is absolutely positioned; its `left`/`top`
//!   styles track the pointer continuously and release just syncs.
//!
//! While a drag is live, all `contenteditable` regions are suspended so
//! pointer moves cannot fall into text editing; they are restored on
//! release.

use menukit_dom::{is_non_content_tag, Node, NodePath};
use tracing::debug;

use crate::error::CommandFailure;
use crate::geometry::Point;
use crate::layout::Measure;
use crate::runtime::{DragMode, DragSession, DropSide, DropSpot, EditorRuntime, Interaction};

impl<M: Measure> EditorRuntime<M> {
    /// Pointer-down on the drag handle of the selected element.
    pub fn drag_start(&mut self, point: Point) {
        let path = match &self.interaction {
            Interaction::ElementSelected { path } => path.clone(),
            _ => {
                debug!(reason = %CommandFailure::NothingSelected, "drag start ignored");
                return;
            }
        };
        let Some(element) = path.resolve(self.document.body()) else {
            debug!(reason = %CommandFailure::StalePath, "drag start ignored");
            return;
        };

        let mode = if element.is_absolute() {
            DragMode::Free
        } else {
            DragMode::Sort
        };
        let origin = Point::new(
            element.style_px("left").unwrap_or(0.0),
            element.style_px("top").unwrap_or(0.0),
        );

        pause_editing(self.document.body_mut());

        // The start anchor lives in body space so a scroll mid-drag does
        // not shift the element under the pointer.
        self.interaction = Interaction::Dragging(DragSession {
            path,
            mode,
            start: self.viewport.to_body(point),
            pointer: point,
            origin,
            drop: None,
        });
    }

    /// Pointer move during a drag. `point` is in viewport coordinates.
    pub fn drag_move(&mut self, point: Point) {
        let Interaction::Dragging(session) = &mut self.interaction else {
            return;
        };
        session.pointer = point;
        let session = session.clone();

        match session.mode {
            DragMode::Free => {
                let body = self.viewport.to_body(point);
                let left = session.origin.x + (body.x - session.start.x);
                let top = session.origin.y + (body.y - session.start.y);
                if let Some(element) = session.path.resolve_mut(self.document.body_mut()) {
                    element.set_style("left", format!("{left}px"));
                    element.set_style("top", format!("{top}px"));
                }
            }
            DragMode::Sort => {
                let drop = self.find_drop_spot(&session.path, point);
                if let Interaction::Dragging(session) = &mut self.interaction {
                    session.drop = drop;
                }
                self.autoscroll(point);
            }
        }
    }

    /// Pointer-up: commit the drag and tear the session down. Sort mode
    /// mutates once here; free mode already moved the element and only
    /// needs the sync.
    pub fn drag_end(&mut self) {
        let Interaction::Dragging(session) = &self.interaction else {
            return;
        };
        let session = session.clone();

        resume_editing(self.document.body_mut());
        self.interaction = Interaction::Idle;

        match session.mode {
            DragMode::Free => self.emit_resync(),
            DragMode::Sort => {
                if let Some(drop) = session.drop {
                    match self.reorder(&session.path, &drop) {
                        Ok(()) => self.after_mutation(),
                        Err(failure) => debug!(reason = %failure, "drop ignored"),
                    }
                }
            }
        }
    }

    /// Flip the selected element between in-flow and free placement.
    /// Floating captures the element's on-screen rect first so it does not
    /// jump; un-floating clears the explicit geometry and lets it rejoin
    /// the flow where it sits in document order.
    pub fn toggle_placement(&mut self) {
        let path = match &self.interaction {
            Interaction::ElementSelected { path } => path.clone(),
            _ => {
                debug!(reason = %CommandFailure::NothingSelected, "placement toggle ignored");
                return;
            }
        };
        let Some(element) = path.resolve(self.document.body()) else {
            debug!(reason = %CommandFailure::StalePath, "placement toggle ignored");
            return;
        };

        if element.is_absolute() {
            let element = path
                .resolve_mut(self.document.body_mut())
                .expect("resolved above");
            for name in ["position", "left", "top", "width", "transform", "margin"] {
                element.remove_style(name);
            }
        } else {
            let Some(rect) = self.rect_of(&path) else {
                debug!(reason = %CommandFailure::StalePath, "placement toggle ignored");
                return;
            };

            // Free elements live directly under the body so their offsets
            // are body-relative.
            let new_path = if path.parent().is_some_and(|p| p.is_root()) {
                path.clone()
            } else {
                match crate::commands::remove_element(self.document.body_mut(), &path) {
                    Ok(node) => {
                        let body = self.document.body_mut();
                        body.children_mut().expect("body is an element").push(node);
                        NodePath::new(vec![body.element_child_count() - 1])
                    }
                    Err(failure) => {
                        debug!(reason = %failure, "placement toggle ignored");
                        return;
                    }
                }
            };

            let element = new_path
                .resolve_mut(self.document.body_mut())
                .expect("just placed");
            element.set_style("position", "absolute");
            element.set_style("left", format!("{}px", rect.x));
            element.set_style("top", format!("{}px", rect.y));
            element.set_style("width", format!("{}px", rect.width));
            element.set_style("margin", "0");
            self.interaction = Interaction::ElementSelected { path: new_path };
        }

        self.after_mutation();
    }

    /// Closest sibling by vertical midpoint distance, with the side picked
    /// by which half of it the pointer is in.
    fn find_drop_spot(&self, dragged: &NodePath, point: Point) -> Option<DropSpot> {
        let parent_path = dragged.parent()?;
        let dragged_index = dragged.last_index()?;
        let parent = parent_path.resolve(self.document.body())?;
        let body_y = self.viewport.to_body(point).y;

        let mut best: Option<(f64, DropSpot)> = None;
        for (index, node) in parent.element_children().enumerate() {
            if index == dragged_index {
                continue;
            }
            // Out-of-flow and non-content siblings are not sort slots.
            if node.is_absolute() || node.tag().is_some_and(is_non_content_tag) {
                continue;
            }
            let sibling = parent_path.child(index);
            let Some(rect) = self.rect_of(&sibling) else {
                continue;
            };
            let mid = rect.mid_y();
            let distance = (body_y - mid).abs();
            let side = if body_y < mid {
                DropSide::Before
            } else {
                DropSide::After
            };
            let spot = DropSpot {
                target: sibling,
                side,
            };
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, spot));
            }
        }
        best.map(|(_, spot)| spot)
    }

    fn autoscroll(&mut self, point: Point) {
        let margin = self.config.autoscroll_margin;
        let step = self.config.autoscroll_step;
        if point.y < margin {
            self.viewport.scroll_by(0.0, -step);
        } else if point.y > self.viewport.height - margin {
            self.viewport.scroll_by(0.0, step);
        }
    }

    /// Detach the dragged element and re-insert it next to the drop target.
    fn reorder(&mut self, dragged: &NodePath, drop: &DropSpot) -> Result<(), CommandFailure> {
        let parent_path = dragged.parent().ok_or(CommandFailure::NoParent)?;
        let dragged_index = dragged.last_index().expect("non-root path has an index");
        let target_index = drop.target.last_index().ok_or(CommandFailure::NoSibling)?;

        let node = crate::commands::remove_element(self.document.body_mut(), dragged)?;

        // The target shifts down by one when the dragged element sat above
        // it.
        let target_index = if dragged_index < target_index {
            target_index - 1
        } else {
            target_index
        };
        let slot = match drop.side {
            DropSide::Before => target_index,
            DropSide::After => target_index + 1,
        };

        let parent = parent_path
            .resolve_mut(self.document.body_mut())
            .ok_or(CommandFailure::StalePath)?;
        let raw_slot = parent
            .raw_child_index(slot)
            .unwrap_or_else(|| parent.children().len());
        parent
            .children_mut()
            .expect("parent resolved as element")
            .insert(raw_slot, node);
        Ok(())
    }
}

/// Suspend every `contenteditable` region for the duration of a drag.
fn pause_editing(node: &mut Node) {
    if node.attr("contenteditable") == Some("true") {
        node.set_attr("data-ce-paused", "true");
        node.set_attr("contenteditable", "false");
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            pause_editing(child);
        }
    }
}

fn resume_editing(node: &mut Node) {
    if node.attr("data-ce-paused").is_some() {
        node.set_attr("contenteditable", "true");
        node.remove_attr("data-ce-paused");
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            resume_editing(child);
        }
    }
}
