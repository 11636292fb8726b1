//! # Layout Seam
//!
//! The runtime is headless: it never computes real text layout. On-screen
//! rectangles come through the [`Measure`] trait — in a browser embedding
//! this is `getBoundingClientRect`, in tests and the cli it is
//! [`BlockLayout`], a deliberately simple vertical block model. All rects
//! are in body coordinates.

use menukit_dom::{walk, Document, Node, NodePath};

use crate::geometry::{Point, Rect};

/// Source of element geometry for the current document state. Results are
/// only valid until the next mutation, like paths.
pub trait Measure {
    /// Rectangle of the element at `path`, or `None` if the path is stale.
    fn rect_of(&self, document: &Document, path: &NodePath) -> Option<Rect>;

    /// Deepest element containing the point, in body coordinates.
    fn hit_test(&self, document: &Document, point: Point) -> Option<NodePath>;

    /// Total content height (the value reported to the host).
    fn content_height(&self, document: &Document) -> f64;
}

/// Simple vertical block layout: in-flow elements stack top to bottom and
/// span their parent's width; explicit `left`/`top`/`width`/`height` styles
/// and absolute positioning are honored. Enough to exercise every geometric
/// behavior of the editor without a real layout engine.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    /// Page width in px (defaults to A4 at 96 dpi).
    pub page_width: f64,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self { page_width: 794.0 }
    }
}

impl BlockLayout {
    pub fn new(page_width: f64) -> Self {
        Self { page_width }
    }

    /// Compute rects for every element in the body.
    pub fn rects(&self, document: &Document) -> Vec<(NodePath, Rect)> {
        let mut out = Vec::new();
        let body = document.body();
        let body_rect = Rect::new(0.0, 0.0, self.page_width, 0.0);
        self.layout_children(body, NodePath::root(), body_rect, &mut out);
        out
    }

    /// Stack the in-flow element children of `element` inside `area`,
    /// starting at its top. Returns the flow cursor's end position.
    fn layout_children(
        &self,
        element: &Node,
        path: NodePath,
        area: Rect,
        out: &mut Vec<(NodePath, Rect)>,
    ) -> f64 {
        let mut cursor_y = area.y;
        for (index, child) in element.element_children().enumerate() {
            let child_path = path.child(index);
            if child.is_absolute() {
                let rect = self.absolute_rect(child);
                out.push((child_path.clone(), rect));
                self.layout_children(child, child_path, rect, out);
            } else {
                let height = self.flow_height(child);
                let rect = Rect::new(area.x, cursor_y, area.width, height);
                out.push((child_path.clone(), rect));
                self.layout_children(child, child_path, rect, out);
                cursor_y += height;
            }
        }
        cursor_y
    }

    fn absolute_rect(&self, element: &Node) -> Rect {
        let x = element.style_px("left").unwrap_or(0.0);
        let y = element.style_px("top").unwrap_or(0.0);
        let width = element.style_px("width").unwrap_or(200.0);
        let height = element
            .style_px("height")
            .unwrap_or_else(|| self.flow_height(element));
        Rect::new(x, y, width, height)
    }

    fn flow_height(&self, element: &Node) -> f64 {
        if let Some(height) = element.style_px("height") {
            return height;
        }
        let base = base_height(element);
        let children: f64 = element
            .element_children()
            .filter(|c| !c.is_absolute())
            .map(|c| self.flow_height(c))
            .sum();
        base + children
    }
}

/// Intrinsic height contribution of an element, before its children.
fn base_height(element: &Node) -> f64 {
    match element.tag() {
        Some("h1") => 48.0,
        Some("h2") => 40.0,
        Some("h3" | "h4" | "h5" | "h6") => 32.0,
        Some("p" | "li" | "td" | "th" | "figcaption") => 24.0,
        Some("hr") => 8.0,
        Some("br") => 16.0,
        Some("img") => 150.0,
        _ => {
            // Containers contribute no height of their own unless they hold
            // bare text.
            if element.element_children().next().is_none()
                && !element.text_content().trim().is_empty()
            {
                24.0
            } else {
                0.0
            }
        }
    }
}

impl Measure for BlockLayout {
    fn rect_of(&self, document: &Document, path: &NodePath) -> Option<Rect> {
        self.rects(document)
            .into_iter()
            .find(|(p, _)| p == path)
            .map(|(_, rect)| rect)
    }

    fn hit_test(&self, document: &Document, point: Point) -> Option<NodePath> {
        // Deepest containing element wins; among equals, the later one in
        // document order (painted on top).
        self.rects(document)
            .into_iter()
            .enumerate()
            .filter(|(_, (_, rect))| rect.contains(point))
            .max_by_key(|(order, (path, _))| (path.depth(), *order))
            .map(|(_, (path, _))| path)
    }

    fn content_height(&self, document: &Document) -> f64 {
        self.rects(document)
            .iter()
            .map(|(_, rect)| rect.bottom())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_dom::Document;

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    #[test]
    fn in_flow_elements_stack_vertically() {
        let document = doc("<h1>A</h1><p>B</p><p>C</p>");
        let layout = BlockLayout::default();
        let h1 = layout.rect_of(&document, &NodePath::new(vec![0])).unwrap();
        let p1 = layout.rect_of(&document, &NodePath::new(vec![1])).unwrap();
        let p2 = layout.rect_of(&document, &NodePath::new(vec![2])).unwrap();
        assert_eq!(h1.top(), 0.0);
        assert_eq!(p1.top(), h1.bottom());
        assert_eq!(p2.top(), p1.bottom());
    }

    #[test]
    fn absolute_elements_leave_the_flow() {
        let document = doc(
            "<p>A</p>\
             <img style=\"position:absolute; left:40px; top:12px; width:80px; height:60px\">\
             <p>B</p>",
        );
        let layout = BlockLayout::default();
        let img = layout.rect_of(&document, &NodePath::new(vec![1])).unwrap();
        assert_eq!((img.x, img.y, img.width, img.height), (40.0, 12.0, 80.0, 60.0));

        // B stacks directly under A as if the image were not there.
        let a = layout.rect_of(&document, &NodePath::new(vec![0])).unwrap();
        let b = layout.rect_of(&document, &NodePath::new(vec![2])).unwrap();
        assert_eq!(b.top(), a.bottom());
    }

    #[test]
    fn nested_children_are_inside_their_parent() {
        let document = doc("<section><h2>T</h2><p>x</p></section>");
        let layout = BlockLayout::default();
        let section = layout.rect_of(&document, &NodePath::new(vec![0])).unwrap();
        let h2 = layout.rect_of(&document, &NodePath::new(vec![0, 0])).unwrap();
        let p = layout.rect_of(&document, &NodePath::new(vec![0, 1])).unwrap();
        assert_eq!(h2.top(), section.top());
        assert_eq!(p.top(), h2.bottom());
        assert_eq!(section.height, h2.height + p.height);
    }

    #[test]
    fn hit_test_finds_deepest_element() {
        let document = doc("<section><h2>T</h2><p>x</p></section>");
        let layout = BlockLayout::default();
        let hit = layout
            .hit_test(&document, Point::new(10.0, 45.0))
            .unwrap();
        assert_eq!(hit, NodePath::new(vec![0, 1]));
    }

    #[test]
    fn content_height_covers_absolutes() {
        let document = doc(
            "<p>A</p><img style=\"position:absolute; top:500px; height:100px\">",
        );
        let layout = BlockLayout::default();
        assert_eq!(layout.content_height(&document), 600.0);
    }

    #[test]
    fn stale_path_measures_to_none() {
        let document = doc("<p>A</p>");
        let layout = BlockLayout::default();
        assert!(layout
            .rect_of(&document, &NodePath::new(vec![5]))
            .is_none());
    }
}
