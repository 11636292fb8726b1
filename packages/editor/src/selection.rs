//! # Selection & Toolbar Controller
//!
//! Routes clicks and text-selection changes into the interaction union and
//! drives the image toolbar. Selection owns its affordances as a unit:
//! entering any selected state tears the previous one down first — there is
//! no selection stack.
//!
//! Resync granularity: image resizes only mark the session dirty; the one
//! resync is emitted when the toolbar closes. Source replacement is a
//! discrete edit and resyncs immediately.

use menukit_dom::{is_inline_tag, is_selectable_tag, outer_html, NodePath};
use tracing::debug;

use crate::commands::CLICK_SNIPPET_LEN;
use crate::error::CommandFailure;
use crate::events::Event;
use crate::geometry::{Point, Rect};
use crate::layout::Measure;
use crate::runtime::{EditorRuntime, Interaction};

impl<M: Measure> EditorRuntime<M> {
    /// The document's text selection changed. `rect` is the selection's
    /// bounding box in viewport coordinates, `None` when collapsed.
    pub fn selection_changed(&mut self, rect: Option<Rect>) {
        if matches!(self.interaction, Interaction::Dragging(_)) {
            return;
        }
        match rect {
            Some(rect) => {
                self.exit_image_mode();
                self.interaction = Interaction::TextSelecting { rect };
            }
            None => {
                if matches!(self.interaction, Interaction::TextSelecting { .. }) {
                    self.interaction = Interaction::Idle;
                }
            }
        }
    }

    /// A click at `point` (viewport coordinates). Reports the clicked
    /// content element to the host, then updates the selection state.
    pub fn click(&mut self, point: Point) {
        if matches!(self.interaction, Interaction::Dragging(_)) {
            return;
        }

        let body_point = self.viewport.to_body(point);
        let hit = self.measure.hit_test(&self.document, body_point);

        let Some(hit) = hit else {
            self.exit_image_mode();
            self.clear_element_selection();
            return;
        };

        // Image clicks open the image toolbar instead of the drag handle.
        let hit_tag = hit
            .resolve(self.document.body())
            .and_then(|n| n.tag())
            .map(str::to_string);
        if hit_tag.as_deref() == Some("img") {
            if !matches!(&self.interaction, Interaction::ImageSelected { path, .. } if *path == hit)
            {
                self.exit_image_mode();
                self.interaction = Interaction::ImageSelected {
                    path: hit,
                    dirty: false,
                };
            }
            return;
        }

        self.exit_image_mode();
        self.report_clicked_element(&hit);

        // Walk up to the nearest block-level tag for manipulation.
        let mut candidate = Some(hit);
        while let Some(path) = &candidate {
            let tag = path
                .resolve(self.document.body())
                .and_then(|n| n.tag())
                .unwrap_or("");
            if is_selectable_tag(tag) {
                break;
            }
            candidate = path.parent().filter(|p| !p.is_root());
        }

        match candidate {
            Some(path) => {
                if !matches!(&self.interaction, Interaction::ElementSelected { path: p } if *p == path)
                {
                    self.interaction = Interaction::ElementSelected { path };
                }
            }
            None => self.clear_element_selection(),
        }
    }

    /// Grow the selected image by the fixed ratio.
    pub fn image_grow(&mut self) {
        self.resize_image(self.config.grow_factor);
    }

    /// Shrink the selected image, bounded below by the minimum width.
    pub fn image_shrink(&mut self) {
        self.resize_image(self.config.shrink_factor);
    }

    fn resize_image(&mut self, factor: f64) {
        let result = self.with_selected_image(|runtime, path| {
            let current = runtime
                .selected_image_width(&path)
                .ok_or(CommandFailure::StalePath)?;
            let min = runtime.config.min_image_width;
            let next = (current * factor).round().max(min);
            let image = path
                .resolve_mut(runtime.document.body_mut())
                .ok_or(CommandFailure::StalePath)?;
            image.set_style("width", format!("{next}px"));
            image.set_style("height", "auto");
            if let Interaction::ImageSelected { dirty, .. } = &mut runtime.interaction {
                *dirty = true;
            }
            Ok(())
        });
        if let Err(failure) = result {
            debug!(reason = %failure, "image resize ignored");
        }
    }

    /// Rendered width of the selected image: explicit style first, measured
    /// rect otherwise.
    fn selected_image_width(&self, path: &NodePath) -> Option<f64> {
        let image = path.resolve(self.document.body())?;
        image
            .style_px("width")
            .or_else(|| self.rect_of(path).map(|r| r.width))
    }

    /// Replace the image source from a URL prompt. Discrete edit: resyncs
    /// immediately and closes the toolbar.
    pub fn image_replace_src(&mut self, url: &str) {
        let url = url.trim().to_string();
        if url.is_empty() {
            return;
        }
        let result = self.with_selected_image(|runtime, path| {
            let image = path
                .resolve_mut(runtime.document.body_mut())
                .ok_or(CommandFailure::StalePath)?;
            image.set_attr("src", url.clone());
            Ok(())
        });
        match result {
            Ok(()) => {
                self.emit_resync();
                // Markup is already synced; no second resync on close.
                self.interaction = Interaction::Idle;
            }
            Err(failure) => debug!(reason = %failure, "image url replace ignored"),
        }
    }

    /// Replace the image source with uploaded file data (a data: URL).
    /// The toolbar stays open, matching the upload flow.
    pub fn image_replace_data(&mut self, data_url: &str) {
        let data_url = data_url.to_string();
        let result = self.with_selected_image(|runtime, path| {
            let image = path
                .resolve_mut(runtime.document.body_mut())
                .ok_or(CommandFailure::StalePath)?;
            image.set_attr("src", data_url.clone());
            Ok(())
        });
        match result {
            Ok(()) => {
                self.emit_resync();
                if let Interaction::ImageSelected { dirty, .. } = &mut self.interaction {
                    *dirty = false;
                }
            }
            Err(failure) => debug!(reason = %failure, "image upload replace ignored"),
        }
    }

    /// Hand an image edit off to the host's generative capability. The
    /// runtime only emits the request; the round-trip is owned by the host.
    pub fn image_request_ai_edit(&mut self, prompt: &str) {
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return;
        }
        let src = match &self.interaction {
            Interaction::ImageSelected { path, .. } => path
                .resolve(self.document.body())
                .and_then(|n| n.attr("src"))
                .unwrap_or("")
                .to_string(),
            _ => {
                debug!("image edit request ignored: no image selected");
                return;
            }
        };
        self.emit(Event::ImageEditRequested { prompt, src });
    }

    /// Delete the currently selected element (handle trash button; the
    /// confirmation dialog is the embedder's business).
    pub fn delete_selected(&mut self) {
        let path = match &self.interaction {
            Interaction::ElementSelected { path } => path.clone(),
            Interaction::ImageSelected { path, .. } => path.clone(),
            _ => {
                debug!(reason = %CommandFailure::NothingSelected, "delete ignored");
                return;
            }
        };
        match crate::commands::remove_element(self.document.body_mut(), &path) {
            Ok(_) => {
                self.interaction = Interaction::Idle;
                // A highlight into the removed subtree must not re-resolve
                // against the shifted siblings.
                self.invalidate_selection_under(&path);
                self.after_mutation();
            }
            Err(failure) => debug!(reason = %failure, "delete ignored"),
        }
    }

    /// Close the image toolbar; emits the deferred resync when the image
    /// was resized during this session.
    pub(crate) fn exit_image_mode(&mut self) {
        if let Interaction::ImageSelected { dirty, .. } = self.interaction {
            self.interaction = Interaction::Idle;
            if dirty {
                self.emit_resync();
            }
        }
    }

    fn clear_element_selection(&mut self) {
        if matches!(self.interaction, Interaction::ElementSelected { .. }) {
            self.interaction = Interaction::Idle;
        }
    }

    fn report_clicked_element(&mut self, hit: &NodePath) {
        // Pass through inline formatting tags to the containing content
        // element.
        let mut path = hit.clone();
        loop {
            let tag = path
                .resolve(self.document.body())
                .and_then(|n| n.tag())
                .unwrap_or("");
            if !is_inline_tag(tag) {
                break;
            }
            match path.parent() {
                Some(parent) if !parent.is_root() => path = parent,
                _ => break,
            }
        }
        if path.is_root() {
            return;
        }
        let Some(element) = path.resolve(self.document.body()) else {
            return;
        };
        let event = Event::ElementClicked {
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
    }

    fn with_selected_image<F>(&mut self, op: F) -> Result<(), CommandFailure>
    where
        F: FnOnce(&mut Self, NodePath) -> Result<(), CommandFailure>,
    {
        let path = match &self.interaction {
            Interaction::ImageSelected { path, .. } => path.clone(),
            _ => return Err(CommandFailure::NothingSelected),
        };
        let is_image = path
            .resolve(self.document.body())
            .is_some_and(|n| n.tag() == Some("img"));
        if !is_image {
            return Err(CommandFailure::NotAnImage);
        }
        op(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::layout::BlockLayout;
    use menukit_dom::Document;

    fn runtime(html: &str) -> EditorRuntime<BlockLayout> {
        let mut rt = EditorRuntime::new(
            Document::parse(html),
            BlockLayout::default(),
            Viewport::new(800.0, 600.0),
        );
        rt.tick(50);
        rt.drain_events();
        rt
    }

    #[test]
    fn text_selection_toggles_toolbar_state() {
        let mut rt = runtime("<p>Soup of the day</p>");
        rt.selection_changed(Some(Rect::new(100.0, 200.0, 80.0, 16.0)));
        assert!(matches!(
            rt.interaction(),
            Interaction::TextSelecting { .. }
        ));
        rt.selection_changed(None);
        assert_eq!(*rt.interaction(), Interaction::Idle);
    }

    #[test]
    fn click_walks_up_to_block_element() {
        // The li (24px tall) starts after the h1 (48px).
        let mut rt = runtime("<h1>Menu</h1><ul><li><span>Bruschetta</span></li></ul>");
        rt.click(Point::new(10.0, 50.0));
        match rt.interaction() {
            Interaction::ElementSelected { path } => {
                let tag = path.resolve(rt.document().body()).unwrap().tag();
                // li is not in the selectable set; ul is.
                assert_eq!(tag, Some("ul"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn click_reports_content_element_past_inline_tags() {
        let mut rt = runtime("<p><b>Fresh</b> pasta</p>");
        rt.click(Point::new(10.0, 10.0));
        let events = rt.drain_events();
        match &events[0] {
            Event::ElementClicked {
                tag_name, snippet, ..
            } => {
                assert_eq!(tag_name, "P");
                assert_eq!(snippet, "Fresh pasta");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn click_outside_clears_selection() {
        let mut rt = runtime("<p>Soup</p>");
        rt.click(Point::new(10.0, 10.0));
        assert!(matches!(
            rt.interaction(),
            Interaction::ElementSelected { .. }
        ));
        rt.click(Point::new(10.0, 5000.0));
        assert_eq!(*rt.interaction(), Interaction::Idle);
    }

    #[test]
    fn clicking_an_image_opens_the_image_toolbar() {
        let mut rt = runtime("<img src=\"a.png\" style=\"height:150px\"><p>caption</p>");
        rt.click(Point::new(10.0, 20.0));
        assert!(matches!(
            rt.interaction(),
            Interaction::ImageSelected { dirty: false, .. }
        ));
    }

    #[test]
    fn grow_three_times_compounds_the_ratio_and_resyncs_once_on_exit() {
        let mut rt = runtime("<img src=\"a.png\" style=\"width:100px;height:150px\"><p>x</p>");
        rt.click(Point::new(10.0, 20.0));
        rt.image_grow();
        rt.image_grow();
        rt.image_grow();

        // round(round(round(100*1.2)*1.2)*1.2) = 173
        let img = rt.document().body().element_children().next().unwrap();
        assert_eq!(img.style_px("width"), Some(173.0));
        assert_eq!(img.style("height"), Some("auto"));

        // No resync yet.
        assert!(rt.drain_events().is_empty());

        // Click away: exactly one resync.
        rt.click(Point::new(10.0, 400.0));
        let resyncs = rt
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, Event::DocumentResynced(_)))
            .count();
        assert_eq!(resyncs, 1);
    }

    #[test]
    fn shrink_respects_minimum_width() {
        let mut rt = runtime("<img src=\"a.png\" style=\"width:32px;height:40px\"><p>x</p>");
        rt.click(Point::new(10.0, 10.0));
        rt.image_shrink();
        rt.image_shrink();
        let img = rt.document().body().element_children().next().unwrap();
        assert_eq!(img.style_px("width"), Some(30.0));
    }

    #[test]
    fn closing_an_untouched_image_toolbar_emits_nothing() {
        let mut rt = runtime("<img src=\"a.png\" style=\"height:100px\"><p>x</p>");
        rt.click(Point::new(10.0, 20.0));
        rt.click(Point::new(10.0, 4000.0));
        assert!(rt.drain_events().is_empty());
    }

    #[test]
    fn url_replace_resyncs_immediately_and_closes() {
        let mut rt = runtime("<img src=\"a.png\" style=\"height:100px\"><p>x</p>");
        rt.click(Point::new(10.0, 20.0));
        rt.image_replace_src("  https://cdn.example/b.png  ");
        assert_eq!(*rt.interaction(), Interaction::Idle);
        let events = rt.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::DocumentResynced(html) => {
                assert!(html.contains("https://cdn.example/b.png"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn ai_edit_request_carries_prompt_and_src() {
        let mut rt = runtime("<img src=\"dish.png\" style=\"height:100px\"><p>x</p>");
        rt.click(Point::new(10.0, 20.0));
        rt.image_request_ai_edit("make it watercolor");
        match rt.drain_events().pop().unwrap() {
            Event::ImageEditRequested { prompt, src } => {
                assert_eq!(prompt, "make it watercolor");
                assert_eq!(src, "dish.png");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn delete_selected_removes_and_resyncs() {
        let mut rt = runtime("<h1>A</h1><p>B</p>");
        rt.click(Point::new(10.0, 10.0));
        rt.drain_events();
        rt.delete_selected();
        assert_eq!(rt.document().body().element_child_count(), 1);
        assert_eq!(*rt.interaction(), Interaction::Idle);
        let events = rt.drain_events();
        assert!(matches!(events[0], Event::OutlineUpdated(_)));
        assert!(matches!(events[1], Event::DocumentResynced(_)));
    }

    #[test]
    fn delete_selected_drops_a_highlight_inside_the_removed_subtree() {
        let mut rt = runtime("<p>A</p><p>B</p>");
        rt.apply_command(crate::commands::Command::Select {
            path: NodePath::new(vec![0]),
        });
        assert!(rt.active_highlight().is_some());

        rt.click(Point::new(10.0, 10.0));
        rt.drain_events();
        rt.delete_selected();

        // The highlighted path now resolves to B; it must not light up.
        assert!(rt.active_highlight().is_none());
    }

    #[test]
    fn delete_with_nothing_selected_is_a_no_op() {
        let mut rt = runtime("<p>B</p>");
        rt.delete_selected();
        assert!(rt.drain_events().is_empty());
        assert_eq!(rt.document().body().element_child_count(), 1);
    }
}
