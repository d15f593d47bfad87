//! Axis-aligned rectangle in screen space (y grows downward)

use glam::Vec2;

/// Float rectangle stored as top-left corner plus size.
///
/// Edge setters move the rectangle and keep its size, so a sprite can be
/// anchored by whichever edge matters (`set_midbottom` for the player,
/// `set_bottom` for powerups sitting on a platform).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size with no meaningful position yet
    pub fn sized(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn centerx(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.centerx(), self.centery())
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_centerx(&mut self, cx: f32) {
        self.x = cx - self.w / 2.0;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn set_midbottom(&mut self, midbottom: Vec2) {
        self.set_centerx(midbottom.x);
        self.set_bottom(midbottom.y);
    }

    /// Replace the size, keeping the bottom edge where it was
    pub fn resize_keep_bottom(&mut self, w: f32, h: f32) {
        let bottom = self.bottom();
        self.w = w;
        self.h = h;
        self.set_bottom(bottom);
    }

    /// Replace the size, keeping the center where it was
    pub fn resize_keep_center(&mut self, w: f32, h: f32) {
        let center = self.center();
        self.w = w;
        self.h = h;
        self.set_center(center);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_midbottom_anchor() {
        let mut r = Rect::sized(60.0, 95.0);
        r.set_midbottom(Vec2::new(40.0, 500.0));
        assert_eq!(r.centerx(), 40.0);
        assert_eq!(r.bottom(), 500.0);

        r.resize_keep_bottom(60.0, 100.0);
        assert_eq!(r.bottom(), 500.0);
        assert_eq!(r.top(), 400.0);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));

        let c = Rect::new(5.0, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
