//! Lifeline segment assembly
//!
//! Combines a lifeline's no-go gaps and activity boxes into the dashed pieces
//! actually drawn between its title box and the bottom of the diagram.

use crate::core::segment::sort_and_merge;
use crate::core::Segment;

/// Vertical extent of one lifeline and the shortest piece worth drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifelineExtent {
    pub top: f64,
    pub bottom: f64,
    pub min_seg_length: f64,
}

impl LifelineExtent {
    pub fn new(top: f64, bottom: f64, min_seg_length: f64) -> Self {
        Self {
            top,
            bottom,
            min_seg_length,
        }
    }

    /// Drawable segments that avoid every obstruction
    ///
    /// Residual pieces shorter than `min_seg_length` are dropped; a piece of
    /// exactly that length is kept.
    pub fn assemble(&self, no_go_gaps: &[Segment], activity_boxes: &[Segment]) -> Vec<Segment> {
        let obstructions: Vec<Segment> = no_go_gaps
            .iter()
            .chain(activity_boxes)
            .copied()
            .collect();
        let merged = sort_and_merge(obstructions);

        let mut segments = Vec::with_capacity(merged.len() + 1);
        let mut prev = self.top;
        for gap in &merged {
            self.push_if_long_enough(&mut segments, prev, gap.start);
            prev = prev.max(gap.end);
        }
        self.push_if_long_enough(&mut segments, prev, self.bottom);
        segments
    }

    fn push_if_long_enough(&self, segments: &mut Vec<Segment>, start: f64, end: f64) {
        let length = end - start;
        if length > 0.0 && length >= self.min_seg_length {
            segments.push(Segment::new(start, end));
        }
    }
}
