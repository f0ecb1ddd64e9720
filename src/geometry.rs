//! Integer rectangles in playfield pixels.

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Rect { left, top, width, height }
    }

    /// The whole playfield.
    pub const fn screen() -> Self {
        Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn at_origin(size: Size) -> Self {
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.left + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.top + self.height / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    pub fn mid_bottom(&self) -> (i32, i32) {
        (self.center_x(), self.bottom())
    }

    pub fn set_right(&mut self, right: i32) {
        self.left = right - self.width;
    }

    pub fn set_center(&mut self, (x, y): (i32, i32)) {
        self.left = x - self.width / 2;
        self.top = y - self.height / 2;
    }

    pub fn set_mid_bottom(&mut self, (x, y): (i32, i32)) {
        self.left = x - self.width / 2;
        self.top = y - self.height;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.top += dy;
    }

    pub fn translated(mut self, dx: i32, dy: i32) -> Self {
        self.translate(dx, dy);
        self
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Strict AABB overlap. Rects with no area never collide.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Move `self` the least distance needed to sit inside `bounds`.
    /// An axis that is larger than the bounds is centred instead.
    pub fn clamp(&self, bounds: &Rect) -> Rect {
        let left = clamp_axis(self.left, self.width, bounds.left, bounds.width);
        let top = clamp_axis(self.top, self.height, bounds.top, bounds.height);
        Rect::new(left, top, self.width, self.height)
    }
}

fn clamp_axis(pos: i32, len: i32, min: i32, span: i32) -> i32 {
    if len >= span {
        min + span / 2 - len / 2
    } else if pos < min {
        min
    } else if pos + len > min + span {
        min + span - len
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_rect_back_inside() {
        let screen = Rect::screen();
        let r = Rect::new(-15, 710, 30, 20).clamp(&screen);
        assert_eq!(r, Rect::new(0, 700, 30, 20));
        assert!(screen.contains(&r));
    }

    #[test]
    fn clamp_centres_oversized_axis() {
        let bounds = Rect::new(0, 0, 100, 100);
        let r = Rect::new(40, 10, 200, 10).clamp(&bounds);
        assert_eq!(r.left, -50);
        assert_eq!(r.top, 10);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.collides(&b));
        assert!(a.collides(&b.translated(-1, 0)));
    }

    #[test]
    fn empty_rect_never_collides() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 0, 4);
        assert!(!a.collides(&b));
    }

    #[test]
    fn mid_bottom_round_trips_through_setter() {
        let mut r = Rect::new(0, 0, 30, 20);
        r.set_mid_bottom((640, 720));
        assert_eq!(r.mid_bottom(), (640, 720));
        assert_eq!(r.top, 700);
    }
}
