//! One-dimensional interval algebra
//!
//! Lifeline routing is expressed entirely in terms of closed intervals on the
//! vertical axis: the spans claimed by interaction lines, the extents of
//! activity boxes, and the dashed pieces finally drawn. This module provides
//! the interval type plus the sort and merge operations used to collapse a
//! pile of obstructions into the minimal covering set.

use serde::Serialize;
use std::fmt;

/// A closed interval `[start, end]` on one axis
///
/// Callers normalise so that `start <= end` before sorting or merging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a segment from two coordinates given in either order
    pub fn normalized(a: f64, b: f64) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).abs()
    }

    /// True if `y` lies inside the closed interval
    pub fn contains(&self, y: f64) -> bool {
        self.start <= y && y <= self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Stable ascending sort by `start`
///
/// Ties keep their relative order. This is the required precondition for
/// [`merge`].
pub fn sort_by_start(segments: &mut [Segment]) {
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
}

/// Merge an already sorted list into the minimal non-overlapping cover
///
/// Touching segments (`next.start == tail.end`) are treated as overlapping and
/// collapse into one.
pub fn merge(sorted: &[Segment]) -> Vec<Segment> {
    debug_assert!(
        sorted.windows(2).all(|w| w[0].start <= w[1].start),
        "merge requires input sorted by start"
    );

    let mut merged: Vec<Segment> = Vec::with_capacity(sorted.len());
    for seg in sorted {
        match merged.last_mut() {
            Some(tail) if seg.start <= tail.end => {
                if seg.end > tail.end {
                    tail.end = seg.end;
                }
            }
            _ => merged.push(*seg),
        }
    }
    merged
}

/// Sort a list in place and merge it
pub fn sort_and_merge(mut segments: Vec<Segment>) -> Vec<Segment> {
    sort_by_start(&mut segments);
    merge(&segments)
}
