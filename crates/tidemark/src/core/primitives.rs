//! Graphics primitive sink
//!
//! The layout is a pure producer of geometry: lines, labels and filled
//! polygons pushed into a [`PrimitiveSink`]. Rasterising or exporting them is
//! someone else's job. [`Primitives`] is the recording sink used by the public
//! API and the CLI's JSON export.

use serde::Serialize;
use std::fmt;

/// A point in diagram coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal justification of a label about its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HJust {
    Left,
    #[default]
    Centre,
    Right,
}

/// Vertical justification of a label about its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VJust {
    #[default]
    Top,
    Centre,
    Bottom,
}

impl fmt::Display for HJust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HJust::Left => write!(f, "left"),
            HJust::Centre => write!(f, "centre"),
            HJust::Right => write!(f, "right"),
        }
    }
}

impl fmt::Display for VJust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VJust::Top => write!(f, "top"),
            VJust::Centre => write!(f, "centre"),
            VJust::Bottom => write!(f, "bottom"),
        }
    }
}

/// A straight line, optionally dashed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
    pub dashed: bool,
}

impl Line {
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }
}

/// A single line of text anchored at a point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub font_height: f64,
    pub anchor: Point,
    pub h_just: HJust,
    pub v_just: VJust,
}

/// A closed, filled polygon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledPolygon {
    pub vertices: Vec<Point>,
}

/// Receiver of the layout's drawing primitives
pub trait PrimitiveSink {
    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, dashed: bool);

    fn add_label(
        &mut self,
        text: &str,
        font_height: f64,
        anchor_x: f64,
        anchor_y: f64,
        h_just: HJust,
        v_just: VJust,
    );

    fn add_filled_polygon(&mut self, vertices: Vec<Point>);

    /// Axis-aligned rectangle expressed as four solid lines
    fn add_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.add_line(left, top, right, top, false);
        self.add_line(right, top, right, bottom, false);
        self.add_line(right, bottom, left, bottom, false);
        self.add_line(left, bottom, left, top, false);
    }
}

/// Recording sink holding every primitive in emission order per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Primitives {
    pub font_height: f64,
    pub dash_len: f64,
    pub dash_gap: f64,
    pub lines: Vec<Line>,
    pub labels: Vec<Label>,
    pub polygons: Vec<FilledPolygon>,
}

impl Primitives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rendering hints a consumer needs to draw dashed lines and text
    pub fn set_hints(&mut self, font_height: f64, dash_len: f64, dash_gap: f64) {
        self.font_height = font_height;
        self.dash_len = dash_len;
        self.dash_gap = dash_gap;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty() && self.polygons.is_empty()
    }

    /// Labels whose text matches `text` exactly
    pub fn labels_with_text<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Label> {
        self.labels.iter().filter(move |l| l.text == text)
    }

    pub fn dashed_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|l| l.dashed)
    }
}

impl PrimitiveSink for Primitives {
    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, dashed: bool) {
        self.lines.push(Line {
            p1: Point::new(x1, y1),
            p2: Point::new(x2, y2),
            dashed,
        });
    }

    fn add_label(
        &mut self,
        text: &str,
        font_height: f64,
        anchor_x: f64,
        anchor_y: f64,
        h_just: HJust,
        v_just: VJust,
    ) {
        self.labels.push(Label {
            text: text.to_string(),
            font_height,
            anchor: Point::new(anchor_x, anchor_y),
            h_just,
            v_just,
        });
    }

    fn add_filled_polygon(&mut self, vertices: Vec<Point>) {
        self.polygons.push(FilledPolygon { vertices });
    }
}
