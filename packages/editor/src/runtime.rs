//! # Editor Runtime
//!
//! The single owner of all editor state: the live document, the current
//! interaction mode, the viewport, pending timers, and the outgoing event
//! queue. Everything runs on one thread; handlers borrow the runtime
//! mutably, do their work against the live tree, and queue events — no
//! state lives outside this struct.
//!
//! Interaction is one tagged union. A drag cannot coexist with an open
//! image toolbar, a text selection cannot coexist with a drag session —
//! those combinations are unrepresentable rather than checked.

use std::collections::VecDeque;

use menukit_dom::{build_outline, Document, NodePath, OutlineNode};

use crate::config::EditorConfig;
use crate::events::Event;
use crate::geometry::{Point, Rect, Viewport};
use crate::layout::Measure;

/// Current interaction mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,

    /// A non-collapsed text selection is active; the format toolbar is
    /// anchored to its bounding rect (viewport coordinates).
    TextSelecting { rect: Rect },

    /// A structural element is selected: ring + drag handle are attached.
    ElementSelected { path: NodePath },

    /// An image is selected and its toolbar is open. `dirty` records
    /// whether it was resized in this session; if so, one resync is
    /// emitted when the toolbar closes.
    ImageSelected { path: NodePath, dirty: bool },

    /// A drag session is in progress.
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// In-flow reordering among siblings.
    Sort,
    /// Direct absolute positioning.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// Candidate drop position in sort mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DropSpot {
    pub target: NodePath,
    pub side: DropSide,
}

/// Ephemeral state of one drag. Created on pointer-down over the handle,
/// destroyed on pointer-up; at most one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub path: NodePath,
    pub mode: DragMode,
    /// Pointer position at drag start (body coordinates).
    pub start: Point,
    /// Current pointer position (viewport coordinates).
    pub pointer: Point,
    /// The element's explicit offset at drag start (free mode only).
    pub origin: Point,
    /// Current candidate drop target (sort mode only).
    pub drop: Option<DropSpot>,
}

/// Transient highlight played after select/insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub path: NodePath,
    pub remaining_ms: u64,
}

pub struct EditorRuntime<M: Measure> {
    pub(crate) document: Document,
    pub(crate) measure: M,
    pub(crate) viewport: Viewport,
    pub(crate) config: EditorConfig,
    pub(crate) interaction: Interaction,
    outbox: VecDeque<Event>,
    highlight: Option<Highlight>,
    /// Milliseconds until the pending height report fires.
    height_report_in: Option<u64>,
}

impl<M: Measure> EditorRuntime<M> {
    pub fn new(document: Document, measure: M, viewport: Viewport) -> Self {
        Self::with_config(document, measure, viewport, EditorConfig::default())
    }

    pub fn with_config(
        document: Document,
        measure: M,
        viewport: Viewport,
        config: EditorConfig,
    ) -> Self {
        let mut runtime = Self {
            document,
            measure,
            viewport,
            config,
            interaction: Interaction::Idle,
            outbox: VecDeque::new(),
            highlight: None,
            height_report_in: None,
        };
        // Initial height report, like the injected script's load handler.
        runtime.schedule_height_report();
        runtime
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn active_highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Take everything queued for the host, in emission order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.outbox.drain(..).collect()
    }

    /// Build the outline from the live tree (never cached).
    pub fn outline(&self) -> Vec<OutlineNode> {
        build_outline(&self.document, &self.config.outline)
    }

    /// Stateless outline request from the host.
    pub fn request_outline(&mut self) {
        let outline = self.outline();
        self.emit(Event::OutlineUpdated(outline));
    }

    /// User scroll. Overlay positions are derived on demand, so this only
    /// moves the viewport.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.viewport.scroll_by(dx, dy);
    }

    /// Advance cooperative timers: the transient highlight and the debounced
    /// height report.
    pub fn tick(&mut self, ms: u64) {
        if let Some(highlight) = &mut self.highlight {
            highlight.remaining_ms = highlight.remaining_ms.saturating_sub(ms);
        }
        if self.highlight.as_ref().is_some_and(|h| h.remaining_ms == 0) {
            self.highlight = None;
        }

        if let Some(remaining) = self.height_report_in {
            if remaining <= ms {
                self.height_report_in = None;
                let height = self.measure.content_height(&self.document);
                self.emit(Event::ContentHeightChanged(height));
            } else {
                self.height_report_in = Some(remaining - ms);
            }
        }
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.outbox.push_back(event);
    }

    /// Outline + full resync, the mandatory pair after every structural
    /// mutation, in that order.
    pub(crate) fn after_mutation(&mut self) {
        let outline = self.outline();
        self.emit(Event::OutlineUpdated(outline));
        self.emit_resync();
    }

    /// Full-document snapshot. Also (re)schedules the debounced height
    /// report so bursts of mutations coalesce into one measurement.
    pub(crate) fn emit_resync(&mut self) {
        let html = self.document.serialize();
        self.emit(Event::DocumentResynced(html));
        self.schedule_height_report();
    }

    pub(crate) fn schedule_height_report(&mut self) {
        self.height_report_in = Some(self.config.height_debounce_ms);
    }

    pub(crate) fn start_highlight(&mut self, path: NodePath) {
        self.highlight = Some(Highlight {
            path,
            remaining_ms: self.config.highlight_ms,
        });
    }

    pub(crate) fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Rect of an element in body coordinates, if it still exists.
    pub(crate) fn rect_of(&self, path: &NodePath) -> Option<Rect> {
        self.measure.rect_of(&self.document, path)
    }
}
