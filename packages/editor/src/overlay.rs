//! # Overlay Projection
//!
//! Overlays (toolbars, selection ring, drag handle, ghost, drop indicator,
//! highlight) are never part of the document tree and never appear in the
//! outline or the serialized markup. They are a pure projection of the
//! current interaction state, recomputed on demand in viewport coordinates.

use crate::geometry::{Point, Rect};
use crate::layout::Measure;
use crate::runtime::{DragMode, DropSide, EditorRuntime, Interaction};

/// Gap between an anchor's bottom edge and a toolbar flipped below it.
const BELOW_GAP: f64 = 6.0;
/// Horizontal offset of the drag handle from the ring's top-left corner.
const HANDLE_INSET: f64 = 28.0;

/// Everything the embedder needs to paint on top of the page, in viewport
/// coordinates. Absent fields mean the affordance is not showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    /// Anchor of the format toolbar, horizontally centered on the text
    /// selection.
    pub format_toolbar: Option<Point>,
    /// Top-left corner of the image toolbar.
    pub image_toolbar: Option<Point>,
    /// Ring drawn around the selected element.
    pub selection_ring: Option<Rect>,
    /// Position of the drag handle next to the ring.
    pub drag_handle: Option<Point>,
    /// Top-left of the drag ghost following the pointer in sort mode.
    pub ghost: Option<Point>,
    /// Horizontal line marking the candidate drop slot.
    pub drop_indicator: Option<Rect>,
    /// Transient highlight rect after select/insert.
    pub highlight: Option<Rect>,
}

impl<M: Measure> EditorRuntime<M> {
    /// Project the current interaction state into overlay geometry.
    pub fn overlays(&self) -> Overlays {
        let mut overlays = Overlays::default();

        match &self.interaction {
            Interaction::Idle => {}
            Interaction::TextSelecting { rect } => {
                let top = (rect.top() - self.config.toolbar_offset)
                    .max(self.config.toolbar_clamp_margin);
                overlays.format_toolbar = Some(Point::new(rect.center_x(), top));
            }
            Interaction::ElementSelected { path } => {
                if let Some(rect) = self.viewport_rect(path) {
                    overlays.drag_handle =
                        Some(Point::new(rect.left() - HANDLE_INSET, rect.top()));
                    overlays.selection_ring = Some(rect);
                }
            }
            Interaction::ImageSelected { path, .. } => {
                if let Some(rect) = self.viewport_rect(path) {
                    overlays.image_toolbar = Some(self.image_toolbar_anchor(&rect));
                    overlays.selection_ring = Some(rect);
                }
            }
            Interaction::Dragging(session) => match session.mode {
                DragMode::Sort => {
                    overlays.ghost = Some(
                        session
                            .pointer
                            .offset(self.config.ghost_offset, self.config.ghost_offset),
                    );
                    if let Some(drop) = &session.drop {
                        if let Some(rect) = self.viewport_rect(&drop.target) {
                            let y = match drop.side {
                                DropSide::Before => rect.top(),
                                DropSide::After => rect.bottom(),
                            };
                            overlays.drop_indicator =
                                Some(Rect::new(rect.x, y, rect.width, 0.0));
                        }
                    }
                }
                DragMode::Free => {
                    if let Some(rect) = self.viewport_rect(&session.path) {
                        overlays.selection_ring = Some(rect);
                    }
                }
            },
        }

        if let Some(highlight) = self.active_highlight() {
            overlays.highlight = self.viewport_rect(&highlight.path);
        }

        overlays
    }

    /// Image toolbar placement: above the image, flipped below when that
    /// would leave the viewport, horizontally centered and clamped to the
    /// left edge.
    fn image_toolbar_anchor(&self, rect: &Rect) -> Point {
        let margin = self.config.toolbar_clamp_margin;
        let mut top = rect.top() - self.config.toolbar_offset;
        if top < margin {
            top = rect.bottom() + BELOW_GAP;
        }
        let left = (rect.center_x() - self.config.image_toolbar_half_width).max(margin);
        Point::new(left, top)
    }

    fn viewport_rect(&self, path: &menukit_dom::NodePath) -> Option<Rect> {
        let rect = self.rect_of(path)?;
        let origin = self.viewport.to_viewport(rect.origin());
        Some(Rect::new(origin.x, origin.y, rect.width, rect.height))
    }
}
