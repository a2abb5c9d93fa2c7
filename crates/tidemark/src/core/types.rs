//! Core type definitions for diagram layout
//!
//! This module contains the small value types threaded through the layout:
//! the layout configuration, the derived diagram dimensions, and the
//! tidemark cursor.

use std::fmt;

use super::error::DiagramError;

/// Default diagram width in output coordinates
pub const DEFAULT_WIDTH: f64 = 2000.0;

/// Font height as a fraction of the diagram width, before scaling
pub const FONT_HEIGHT_RATIO: f64 = 0.01;

/// Caller-supplied layout options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of the whole diagram
    pub width: f64,
    /// Font scale; overrides any `textsize` statement when set
    pub font_scale: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            font_scale: None,
        }
    }
}

impl LayoutConfig {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_font_scale(mut self, scale: f64) -> Self {
        self.font_scale = Some(scale);
        self
    }

    /// Reject widths and scales that cannot produce a drawable diagram
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(DiagramError::layout_error(format!(
                "diagram width must be positive, got {}",
                self.width
            )));
        }
        if let Some(scale) = self.font_scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(DiagramError::layout_error(format!(
                    "font scale must be positive, got {}",
                    scale
                )));
            }
        }
        Ok(())
    }
}

/// Width and font height driving one layout run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub font_height: f64,
}

impl Dimensions {
    pub fn new(width: f64, font_height: f64) -> Self {
        Self { width, font_height }
    }

    /// Derive the font height from the width and a scale factor
    pub fn from_width(width: f64, font_scale: f64) -> Self {
        Self {
            width,
            font_height: width * FONT_HEIGHT_RATIO * font_scale,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}w (font {})", self.width, self.font_height)
    }
}

/// How far down the page output has been committed
///
/// Only ever moves forward. Layout steps take it by value and hand back the
/// advanced mark.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TideMark(f64);

impl TideMark {
    pub fn new(y: f64) -> Self {
        Self(y)
    }

    pub fn y(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn advance(self, by: f64) -> Self {
        debug_assert!(by >= 0.0, "tidemark cannot move backwards (by {})", by);
        Self(self.0 + by.max(0.0))
    }
}

impl fmt::Display for TideMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
