//! Activity-box tracking
//!
//! Each lifeline owns one [`ActivityBoxes`] tracker recording the vertical
//! extents of its activity boxes. At most one box is open at a time.

use crate::core::{BoxError, Segment};

/// One recorded box; `end` is `None` while the box is open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSegment {
    pub start: f64,
    pub end: Option<f64>,
}

impl BoxSegment {
    pub fn closed(start: f64, end: f64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// The box as a closed interval, if it has been terminated
    pub fn segment(&self) -> Option<Segment> {
        self.end.map(|end| Segment::new(self.start, end))
    }
}

/// Box tracker for a single lifeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityBoxes {
    boxes: Vec<BoxSegment>,
}

impl ActivityBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new box starting at `y`
    pub fn add_starting_at(&mut self, y: f64) -> Result<(), BoxError> {
        if self.has_open_box() {
            return Err(BoxError::AlreadyOpen { y });
        }
        self.boxes.push(BoxSegment {
            start: y,
            end: None,
        });
        Ok(())
    }

    /// Close the open box at `y`
    pub fn terminate_at(&mut self, y: f64) -> Result<(), BoxError> {
        let last = self.boxes.last_mut().ok_or(BoxError::NoBox { y })?;
        if last.end.is_some() {
            return Err(BoxError::AlreadyClosed { y });
        }
        last.end = Some(y);
        Ok(())
    }

    pub fn has_open_box(&self) -> bool {
        self.boxes.last().is_some_and(BoxSegment::is_open)
    }

    pub fn open_box_start(&self) -> Option<f64> {
        self.boxes
            .last()
            .filter(|b| b.is_open())
            .map(|b| b.start)
    }

    /// Every box recorded so far, including an open one
    pub fn as_segments(&self) -> &[BoxSegment] {
        &self.boxes
    }

    /// Terminated boxes as closed intervals
    pub fn closed_segments(&self) -> Vec<Segment> {
        self.boxes.iter().filter_map(BoxSegment::segment).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
