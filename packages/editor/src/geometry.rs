//! # Geometry
//!
//! Body-relative coordinate types shared by the drag engine, toolbars, and
//! layout seam. "Body" coordinates are measured from the document body's own
//! origin and do not move when the user scrolls; "viewport" coordinates are
//! what pointer events arrive in. The viewport conversion is a plain scroll
//! offset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Scroll state and size of the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Pointer (viewport) coordinates to body coordinates.
    pub fn to_body(&self, point: Point) -> Point {
        Point::new(point.x + self.scroll_x, point.y + self.scroll_y)
    }

    /// Body coordinates to on-screen coordinates.
    pub fn to_viewport(&self, point: Point) -> Point {
        Point::new(point.x - self.scroll_x, point.y - self.scroll_y)
    }

    /// Scroll by a delta; the top edge is clamped at zero.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll_x = (self.scroll_x + dx).max(0.0);
        self.scroll_y = (self.scroll_y + dy).max(0.0);
    }

    /// Center the viewport on a vertical position (scroll-into-view).
    pub fn center_on(&mut self, body_y: f64) {
        self.scroll_y = (body_y - self.height / 2.0).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_conversions_are_inverse() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_by(0.0, 150.0);
        let p = Point::new(30.0, 40.0);
        assert_eq!(viewport.to_viewport(viewport.to_body(p)), p);
        assert_eq!(viewport.to_body(p).y, 190.0);
    }

    #[test]
    fn scroll_clamps_at_top() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.scroll_by(0.0, -50.0);
        assert_eq!(viewport.scroll_y, 0.0);
    }

    #[test]
    fn center_on_scrolls_to_middle() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.center_on(1000.0);
        assert_eq!(viewport.scroll_y, 700.0);
        viewport.center_on(100.0);
        assert_eq!(viewport.scroll_y, 0.0);
    }

    #[test]
    fn rect_midpoint_and_containment() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.mid_y(), 40.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(!rect.contains(Point::new(110.0, 20.0)));
    }
}
