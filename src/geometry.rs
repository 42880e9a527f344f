use crate::quadtree::Quadrant;
use crate::Point;
use std::rc::Rc;
use std::sync::Arc;

/// Axis-aligned rectangle described by its center and extents.
///
/// The y axis grows downwards: "top" is the smaller y.
/// No validation is done on construction; inverted or NaN extents make the predicates
/// meaningless but never panic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    center: Point,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            center: Point::new(x, y),
            min_x: x - half_width,
            max_x: x + half_width,
            min_y: y - half_height,
            max_y: y + half_height,
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f64 {
        self.height() / 2.0
    }

    /// Strict overlap test, rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && self.min_y < other.max_y
            && self.max_x > other.min_x
            && self.max_y > other.min_y
    }

    /// Inclusive containment test: `other` fits inside `self`, touching edges allowed.
    pub fn contains(&self, other: &Rect) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// The quarter of this rectangle lying in `quadrant`.
    pub fn quarter(&self, quadrant: Quadrant) -> Rect {
        let hw = self.half_width() / 2.0;
        let hh = self.half_height() / 2.0;
        let [x, y] = *self.center;
        let (dx, dy) = match quadrant {
            Quadrant::TopLeft => (-hw, -hh),
            Quadrant::TopRight => (hw, -hh),
            Quadrant::BottomLeft => (-hw, hh),
            Quadrant::BottomRight => (hw, hh),
        };
        Rect::new(x + dx, y + dy, hw, hh)
    }
}

/// Anything that can be placed in a [`Quadtree`](crate::Quadtree).
///
/// The returned bounds must stay the same for as long as the item is stored in a tree.
pub trait Spatial {
    fn bounds(&self) -> Rect;
}

impl Spatial for Rect {
    #[inline]
    fn bounds(&self) -> Rect {
        *self
    }
}

impl<'a, T: Spatial + ?Sized> Spatial for &'a T {
    #[inline]
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Spatial + ?Sized> Spatial for Box<T> {
    #[inline]
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Spatial + ?Sized> Spatial for Rc<T> {
    #[inline]
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<T: Spatial + ?Sized> Spatial for Arc<T> {
    #[inline]
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_from_center() {
        let r = Rect::new(50., 40., 10., 5.);
        assert_eq!(r.min_x(), 40.);
        assert_eq!(r.max_x(), 60.);
        assert_eq!(r.min_y(), 35.);
        assert_eq!(r.max_y(), 45.);
        assert_eq!(r.width(), 20.);
        assert_eq!(r.half_height(), 5.);
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0., 0., 1., 1.);
        let b = Rect::new(2., 0., 1., 1.);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = Rect::new(1.5, 0.5, 1., 1.);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn containment_is_inclusive() {
        let outer = Rect::new(50., 50., 50., 50.);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::new(25., 25., 25., 25.)));
        assert!(!outer.contains(&Rect::new(100., 100., 10., 10.)));
    }

    #[test]
    fn quarters_tile_the_parent() {
        let parent = Rect::new(50., 50., 50., 50.);
        let quarters = [
            (Quadrant::TopLeft, Rect::new(25., 25., 25., 25.)),
            (Quadrant::TopRight, Rect::new(75., 25., 25., 25.)),
            (Quadrant::BottomLeft, Rect::new(25., 75., 25., 25.)),
            (Quadrant::BottomRight, Rect::new(75., 75., 25., 25.)),
        ];
        for (q, expected) in quarters.iter() {
            let quarter = parent.quarter(*q);
            assert_eq!(quarter, *expected, "{:?}", q);
            assert!(parent.contains(&quarter));
        }
    }

    #[test]
    fn references_are_spatial() {
        let r = Rect::new(1., 2., 3., 4.);
        let by_ref: &Rect = &r;
        assert_eq!(by_ref.bounds(), r);
        assert_eq!(Rc::new(r).bounds(), r);
    }
}
