//! Region Quadtree over axis-aligned rectangles.
//!
//! Rectangles are pushed down into the single child quadrant that fully contains them. Anything
//! straddling a node's center lines stays at that node.
//!
//! # Contracts:
//! - Retrieval is broad-phase: it returns every item stored in a node whose region intersects
//! the query. Use [`Quadtree::query`] or your own exact test when you need real overlaps.
//! - Items must not change their bounds after insertion.
//!
pub mod config;
pub mod geometry;
pub mod quadtree;

pub use config::{Config, ConfigError};
pub use geometry::{Rect, Spatial};
pub use quadtree::{Outline, Quadrant, Quadtree};

use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [f64; 2]);

impl Deref for Point {
    type Target = [f64; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0[1]
    }
}
