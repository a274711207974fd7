//! Integer canvas geometry. Origin is top-left, y grows downward.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rect of `size` whose center is `(cx, cy)`. Odd sizes put the extra
    /// pixel on the right/bottom.
    pub const fn centered_at(cx: i32, cy: i32, size: Size) -> Self {
        Self {
            x: cx - size.width / 2,
            y: cy - size.height / 2,
            width: size.width,
            height: size.height,
        }
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Overlap with a non-empty shared area. Touching edges do not count.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub const fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_has_requested_center() {
        let rect = Rect::centered_at(100, 200, Size::new(40, 60));
        assert_eq!(rect, Rect::new(80, 170, 40, 60));
        assert_eq!(rect.center(), (100, 200));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(a.intersects(&Rect::new(2, 2, 3, 3)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(!a.intersects(&Rect::new(-10, -10, 10, 10)));
    }

    #[test]
    fn point_containment_is_half_open() {
        let button = Rect::new(280, 350, 240, 50);
        assert!(button.contains_point(280, 350));
        assert!(button.contains_point(519, 399));
        assert!(!button.contains_point(520, 399));
    }
}
