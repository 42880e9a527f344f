use crate::geometry::Rect;

/// One of the four equal sub-regions of a node, in child storage order.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Find the quadrant of `region` that `bounds` fits in entirely.
    ///
    /// Both the center and the far edge of `bounds` have to lie strictly on one side of each
    /// center line of `region`. Anything touching or crossing a center line fits nowhere and
    /// yields `None`.
    pub fn classify(region: &Rect, bounds: &Rect) -> Option<Quadrant> {
        let [cx, cy] = *region.center();
        let [x, y] = *bounds.center();

        let left = x < cx && bounds.max_x() < cx;
        let top = y < cy && bounds.max_y() < cy;
        if top && left {
            return Some(Quadrant::TopLeft);
        }
        let right = x > cx && bounds.min_x() > cx;
        if top && right {
            return Some(Quadrant::TopRight);
        }
        let bottom = y > cy && bounds.min_y() > cy;
        if bottom && left {
            return Some(Quadrant::BottomLeft);
        }
        if bottom && right {
            return Some(Quadrant::BottomRight);
        }
        None
    }
}
