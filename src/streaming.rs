//! streaming window – grows the materialized strip ahead of the viewer
//!
//! Every tick both edges are checked independently. When the viewer gets
//! within `buffer` of an edge, one `chunk_width` strip is requested just
//! outside it. Requested strips always start exactly at the current bound, so
//! they never overlap what has already been handed to the scene.
use bevy::log::debug;

use crate::error::WorldResult;
use crate::grid::{align_down, align_up};

/// Current visible bounds in world x, supplied by the camera collaborator.
pub trait ViewerEdges {
    fn left_edge(&self) -> f32;
    fn right_edge(&self) -> f32;
}

/// Plain edges, handy for drivers that already know the numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edges {
    pub left: f32,
    pub right: f32,
}

impl Edges {
    pub fn around(center_x: f32, width: f32) -> Self {
        Self {
            left: center_x - width * 0.5,
            right: center_x + width * 0.5,
        }
    }
}

impl ViewerEdges for Edges {
    fn left_edge(&self) -> f32 {
        self.left
    }
    fn right_edge(&self) -> f32 {
        self.right
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Half‑open `[min_x, max_x)` strip of world columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strip {
    pub min_x: i32,
    pub max_x: i32,
}

/// Which sides grew during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extended {
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug)]
pub struct StreamingWindow {
    min_x: i32,
    max_x: i32,
    buffer: i32,
    chunk_width: i32,
}

impl StreamingWindow {
    /// `initial` is aligned outward to `pitch`; `buffer` and `chunk_width`
    /// are world units and should be multiples of `pitch` so every strip
    /// boundary stays on a grid column.
    pub fn new(initial: Strip, pitch: i32, buffer: i32, chunk_width: i32) -> Self {
        let min_x = align_down(initial.min_x.min(initial.max_x), pitch);
        let max_x = align_up(initial.max_x.max(initial.min_x), pitch);
        Self {
            min_x,
            max_x,
            buffer,
            chunk_width,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Strip {
        Strip {
            min_x: self.min_x,
            max_x: self.max_x,
        }
    }

    /// Check both edges once. `on_range_needed` materializes a strip; if it
    /// fails that side keeps its old bound, so the same strip is asked for
    /// again next tick. The other side is still checked, and the first error
    /// is returned once both have run.
    pub fn tick<F>(&mut self, edges: &impl ViewerEdges, mut on_range_needed: F) -> WorldResult<Extended>
    where
        F: FnMut(Side, Strip) -> WorldResult<()>,
    {
        let mut grew = Extended::default();
        let mut failed = None;

        /* left ---------------------------------------------------------- */
        if edges.left_edge() - (self.buffer as f32) < self.min_x as f32 {
            let strip = Strip {
                min_x: self.min_x - self.chunk_width,
                max_x: self.min_x,
            };
            match on_range_needed(Side::Left, strip) {
                Ok(()) => {
                    self.min_x = strip.min_x;
                    grew.left = true;
                    debug!("streaming: extended left to {}", self.min_x);
                }
                Err(err) => failed = Some(err),
            }
        }

        /* right --------------------------------------------------------- */
        if edges.right_edge() + (self.buffer as f32) > self.max_x as f32 {
            let strip = Strip {
                min_x: self.max_x,
                max_x: self.max_x + self.chunk_width,
            };
            match on_range_needed(Side::Right, strip) {
                Ok(()) => {
                    self.max_x = strip.max_x;
                    grew.right = true;
                    debug!("streaming: extended right to {}", self.max_x);
                }
                Err(err) => {
                    failed.get_or_insert(err);
                }
            }
        }

        match failed {
            Some(err) => Err(err),
            None => Ok(grew),
        }
    }
}
