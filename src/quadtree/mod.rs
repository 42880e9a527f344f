mod quadrant;

pub use quadrant::Quadrant;

use crate::config::{Config, ConfigError};
use crate::geometry::{Rect, Spatial};
use arrayvec::ArrayVec;
use rayon::prelude::*;
use std::fmt;
use std::mem;
use tracing::{debug, trace};

type Children<T> = Option<Box<[Quadtree<T>; 4]>>;

/// A node of a region quadtree, and through its children the whole subtree below it.
///
/// Items are kept at the deepest node whose quadrant fully contains them. Items crossing a
/// node's center lines stay at that node for good.
#[derive(Debug, Clone)]
pub struct Quadtree<T = Rect> {
    region: Rect,
    level: u32,
    config: Config,

    // either None or all four quadrants, indexed by `Quadrant::index`
    children: Children<T>,

    items: Vec<T>,
}

impl<T> Quadtree<T> {
    /// Create an empty leaf covering `region` with the default [`Config`].
    ///
    /// A zero-area region is accepted but nothing will ever descend below it.
    pub fn new(level: u32, region: Rect) -> Self {
        Self::node(level, region, Config::default())
    }

    pub fn with_config(level: u32, region: Rect, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::node(level, region, config))
    }

    fn node(level: u32, region: Rect, config: Config) -> Self {
        Self {
            region,
            level,
            config,
            children: None,
            items: Vec::new(),
        }
    }

    pub fn region(&self) -> &Rect {
        &self.region
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Items stored at this node itself, excluding descendants.
    pub fn local_items(&self) -> &[T] {
        &self.items
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&[Quadtree<T>; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Quadtree<T>> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// Number of items in the whole subtree.
    pub fn len(&self) -> usize {
        self.items.len()
            + self
                .children()
                .map(|children| children.iter().map(Self::len).sum::<usize>())
                .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest level present in this subtree.
    pub fn depth(&self) -> u32 {
        self.children()
            .and_then(|children| children.iter().map(Self::depth).max())
            .unwrap_or(self.level)
    }

    /// Drop every item and every child. The region and level of this node are kept.
    pub fn clear(&mut self) {
        trace!(level = self.level, items = self.items.len(), "clearing node");
        self.items.clear();
        self.children = None;
    }

    /// Regions of this node and all of its descendants, parents first, siblings in
    /// [`Quadrant`] order.
    pub fn boundaries(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.boundaries_into(&mut out);
        out
    }

    fn boundaries_into(&self, out: &mut Vec<Rect>) {
        out.push(self.region);
        if let Some(children) = self.children() {
            for child in children.iter() {
                child.boundaries_into(out);
            }
        }
    }

    fn split(&mut self) {
        debug_assert!(self.children.is_none());

        let level = self.level + 1;
        let region = self.region;
        let config = self.config;

        debug!(
            level = self.level,
            x = region.center().x(),
            y = region.center().y(),
            items = self.items.len(),
            "splitting node"
        );

        self.children = Some(Box::new([
            Self::node(level, region.quarter(Quadrant::TopLeft), config),
            Self::node(level, region.quarter(Quadrant::TopRight), config),
            Self::node(level, region.quarter(Quadrant::BottomLeft), config),
            Self::node(level, region.quarter(Quadrant::BottomRight), config),
        ]));
    }

    fn children_intersecting(&self, query: &Rect) -> ArrayVec<[&Self; 4]> {
        let mut res = ArrayVec::new();
        if let Some(children) = self.children() {
            for child in children.iter().filter(|c| c.region.intersects(query)) {
                res.push(child);
            }
        }
        res
    }
}

impl<T: Spatial> Quadtree<T> {
    /// Build a root node over `region` and insert every item.
    pub fn from_items<It>(region: Rect, config: Config, items: It) -> Result<Self, ConfigError>
    where
        It: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_config(0, region, config)?;
        tree.extend(items);
        Ok(tree)
    }

    /// The quadrant of this node that would hold `item`, if any.
    ///
    /// Items not contained in this node's region never descend, whatever side of the center
    /// lines they are on.
    pub fn classify(&self, item: &T) -> Option<Quadrant> {
        self.fitting_quadrant(&item.bounds())
    }

    fn fitting_quadrant(&self, bounds: &Rect) -> Option<Quadrant> {
        if !self.region.contains(bounds) {
            return None;
        }
        Quadrant::classify(&self.region, bounds)
    }

    pub fn insert(&mut self, item: T) {
        if self.children.is_some() {
            if let Some(q) = self.fitting_quadrant(&item.bounds()) {
                if let Some(children) = self.children.as_mut() {
                    children[q.index()].insert(item);
                    return;
                }
            }
        }

        self.items.push(item);

        if self.items.len() <= self.config.capacity {
            return;
        }
        if self.level >= self.config.max_depth {
            trace!(
                level = self.level,
                items = self.items.len(),
                "node saturated at max depth"
            );
        } else if self.children.is_none() {
            self.push_down();
        }
        // once split, every local item crosses a center line, so there is nothing to push down
    }

    /// Split and move every local item that fits a quadrant into that child.
    fn push_down(&mut self) {
        // past the first overflow the older items were already found to fit nowhere
        let fits_any = if self.items.len() > self.config.capacity + 1 {
            self.items
                .last()
                .map_or(false, |item| self.fitting_quadrant(&item.bounds()).is_some())
        } else {
            self.items
                .iter()
                .any(|item| self.fitting_quadrant(&item.bounds()).is_some())
        };
        if !fits_any {
            trace!(
                level = self.level,
                items = self.items.len(),
                "no local item fits a quadrant, not splitting"
            );
            return;
        }

        self.split();

        for item in mem::take(&mut self.items) {
            let fits = self.fitting_quadrant(&item.bounds());
            match (fits, self.children.as_mut()) {
                (Some(q), Some(children)) => children[q.index()].insert(item),
                _ => self.items.push(item),
            }
        }
    }

    /// Broad-phase query.
    ///
    /// Collects the local items of this node and, recursively, of every child whose region
    /// intersects `query`. Items are not tested against `query` themselves, so the result is a
    /// superset of the items actually overlapping it. Result order is unspecified.
    pub fn retrieve(&self, query: &Rect) -> Vec<&T> {
        let mut out = Vec::new();
        self.retrieve_into(query, &mut out);
        out
    }

    /// Same as [`Quadtree::retrieve`] but appends to `out`, so the buffer can be reused.
    pub fn retrieve_into<'a>(&'a self, query: &Rect, out: &mut Vec<&'a T>) {
        out.extend(self.items.iter());
        for child in self.children_intersecting(query) {
            child.retrieve_into(query, out);
        }
    }

    /// Items whose bounds really intersect `query`, including items lying outside the root
    /// region.
    pub fn query(&self, query: &Rect) -> Vec<&T> {
        let mut out = self.retrieve(query);
        out.retain(|item| item.bounds().intersects(query));
        out
    }

    /// Run [`Quadtree::retrieve`] for every query on the rayon thread pool.
    /// The results are in the same order as `queries`.
    pub fn retrieve_batch(&self, queries: &[Rect]) -> Vec<Vec<&T>>
    where
        T: Sync,
    {
        queries.par_iter().map(|q| self.retrieve(q)).collect()
    }

    /// Text dump of the tree: one line per item, one line per child node, tab indented by level.
    pub fn outline(&self) -> Outline<'_, T> {
        Outline { tree: self }
    }

    fn write_outline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for item in self.items.iter() {
            let b = item.bounds();
            indent(f, self.level)?;
            writeln!(
                f,
                "item x:{} y:{} w:{} h:{}",
                b.center().x(),
                b.center().y(),
                b.width(),
                b.height()
            )?;
        }
        if let Some(children) = self.children() {
            for (q, child) in Quadrant::ALL.iter().zip(children.iter()) {
                indent(f, child.level)?;
                writeln!(f, "node {}.{}", child.level, q.index())?;
                child.write_outline(f)?;
            }
        }
        Ok(())
    }
}

fn indent(f: &mut fmt::Formatter, level: u32) -> fmt::Result {
    for _ in 0..level {
        f.write_str("\t")?;
    }
    Ok(())
}

impl<T: Spatial> Extend<T> for Quadtree<T> {
    fn extend<It>(&mut self, it: It)
    where
        It: IntoIterator<Item = T>,
    {
        for item in it {
            self.insert(item);
        }
    }
}

/// [`fmt::Display`] adapter returned by [`Quadtree::outline`].
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a, T> {
    tree: &'a Quadtree<T>,
}

impl<'a, T: Spatial> fmt::Display for Outline<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.tree.write_outline(f)
    }
}
