//! Horizontal spacing of lifelines
//!
//! Lifeline title boxes are laid out left to right with equal gutters between
//! them and at both edges. The ideal title-box width is preferred, but a
//! gutter is never allowed to shrink below one font height; when the boxes
//! would be too wide the box width is sacrificed instead.

use tracing::debug;

use super::model::LifelineId;
use crate::core::DiagramError;

/// Title-box edges and centreline of one lifeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifelineCoords {
    pub left: f64,
    pub centre: f64,
    pub right: f64,
}

/// Driving values for the horizontal placement of `count` lifelines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    gutter: f64,
    title_box_width: f64,
    count: usize,
}

impl Spacing {
    pub fn new(
        diagram_width: f64,
        font_height: f64,
        count: usize,
        ideal_title_box_width: f64,
    ) -> Result<Self, DiagramError> {
        if count == 0 {
            return Ok(Self {
                gutter: diagram_width,
                title_box_width: 0.0,
                count,
            });
        }

        let n = count as f64;
        let mut title_box_width = ideal_title_box_width;
        let mut gutter = (diagram_width - title_box_width * n) / (n + 1.0);

        if gutter < font_height {
            gutter = font_height;
            title_box_width = (diagram_width - (n + 1.0) * gutter) / n;
            debug!(
                gutter,
                title_box_width, "Title boxes shrunk to keep minimum gutter"
            );
        }

        if title_box_width <= 0.0 {
            return Err(DiagramError::layout_error(format!(
                "diagram width {} is too narrow for {} lifelines",
                diagram_width, count
            )));
        }

        Ok(Self {
            gutter,
            title_box_width,
            count,
        })
    }

    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    pub fn title_box_width(&self) -> f64 {
        self.title_box_width
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Title-box edges and centreline for `lifeline`
    pub fn centre_line(&self, lifeline: LifelineId) -> Result<LifelineCoords, DiagramError> {
        let i = lifeline.index();
        if i >= self.count {
            return Err(DiagramError::UnregisteredLifeline {
                index: i,
                count: self.count,
            });
        }
        let i = i as f64;
        let centre = (i + 1.0) * self.gutter + (i + 0.5) * self.title_box_width;
        let half = self.title_box_width / 2.0;
        Ok(LifelineCoords {
            left: centre - half,
            centre,
            right: centre + half,
        })
    }
}
