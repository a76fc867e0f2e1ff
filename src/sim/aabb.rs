//! Axis-aligned bounding boxes
//!
//! Every transient entity occupies one of these; all collision in the game is
//! box-vs-box overlap.

use glam::Vec2;

/// An axis-aligned box: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Overlap test on half-open intervals: boxes that merely share an edge
    /// do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_separated_boxes() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        // Shares the x = 10 edge exactly
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
        // Shares the y = 10 edge exactly
        let c = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contained_box() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(40.0, 40.0), Vec2::new(5.0, 5.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_center() {
        let a = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0));
        assert_eq!(a.center(), Vec2::new(12.0, 24.0));
    }
}
