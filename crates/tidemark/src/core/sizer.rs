//! Named size lookup
//!
//! Every padding, arrow dimension and spacing constant used by the layout is
//! looked up by name through a [`Sizer`]. The production [`RatioSizer`] scales
//! a table of ratios by the font height; [`FixedSizer`] serves literal values
//! so tests can reason about exact coordinates.
//!
//! The layout never calls a sizer on its hot path. All names are resolved
//! once, up front, into a typed [`Sizes`] value, so a misspelt name surfaces
//! as a [`DiagramError::UnknownSize`] before any statement is processed.

use std::collections::HashMap;

use super::error::DiagramError;

pub const FRAME_PAD_T: &str = "FramePadT";
pub const FRAME_PAD_B: &str = "FramePadB";
pub const FRAME_TITLE_TEXT_PAD_T: &str = "FrameTitleTextPadT";
pub const FRAME_TITLE_TEXT_PAD_B: &str = "FrameTitleTextPadB";
pub const FRAME_TITLE_TEXT_PAD_L: &str = "FrameTitleTextPadL";
pub const FRAME_TITLE_TEXT_PAD_R: &str = "FrameTitleTextPadR";
pub const FRAME_TITLE_RECT_PAD_B: &str = "FrameTitleRectPadB";
pub const CHAR_WIDTH: &str = "CharWidth";
pub const IDEAL_LIFELINE_TITLE_BOX_WIDTH: &str = "IdealLifelineTitleBoxWidth";
pub const TITLE_BOX_TEXT_PAD_T: &str = "TitleBoxTextPadT";
pub const TITLE_BOX_TEXT_PAD_B: &str = "TitleBoxTextPadB";
pub const TITLE_BOX_PAD_B: &str = "TitleBoxPadB";
pub const INTERACTION_LINE_TEXT_PAD_B: &str = "InteractionLineTextPadB";
pub const INTERACTION_LINE_PAD_B: &str = "InteractionLinePadB";
pub const ARROW_LEN: &str = "ArrowLen";
pub const ARROW_HEIGHT: &str = "ArrowHeight";
pub const ACTIVITY_BOX_WIDTH: &str = "ActivityBoxWidth";
pub const DASH_LINE_DASH_LEN: &str = "DashLineDashLen";
pub const DASH_LINE_DASH_GAP: &str = "DashLineDashGap";
pub const MIN_LIFELINE_SEG_LENGTH: &str = "MinLifelineSegLength";
pub const SELF_LOOP_WIDTH: &str = "SelfLoopWidth";
pub const SELF_LOOP_HEIGHT: &str = "SelfLoopHeight";
pub const SELF_LOOP_LABEL_PAD_L: &str = "SelfLoopLabelPadL";
pub const LIFELINE_FINAL_PAD_B: &str = "LifelineFinalPadB";

/// Production ratios, each a multiple of the font height
const RATIOS: &[(&str, f64)] = &[
    (FRAME_PAD_T, 1.5),
    (FRAME_PAD_B, 1.5),
    (FRAME_TITLE_TEXT_PAD_T, 0.5),
    (FRAME_TITLE_TEXT_PAD_B, 0.5),
    (FRAME_TITLE_TEXT_PAD_L, 0.5),
    (FRAME_TITLE_TEXT_PAD_R, 1.0),
    (FRAME_TITLE_RECT_PAD_B, 1.0),
    (CHAR_WIDTH, 0.6),
    (IDEAL_LIFELINE_TITLE_BOX_WIDTH, 10.0),
    (TITLE_BOX_TEXT_PAD_T, 0.5),
    (TITLE_BOX_TEXT_PAD_B, 0.5),
    (TITLE_BOX_PAD_B, 2.0),
    (INTERACTION_LINE_TEXT_PAD_B, 0.5),
    (INTERACTION_LINE_PAD_B, 2.0),
    (ARROW_LEN, 1.0),
    (ARROW_HEIGHT, 0.4),
    (ACTIVITY_BOX_WIDTH, 1.0),
    (DASH_LINE_DASH_LEN, 0.5),
    (DASH_LINE_DASH_GAP, 0.25),
    (MIN_LIFELINE_SEG_LENGTH, 0.25),
    (SELF_LOOP_WIDTH, 2.0),
    (SELF_LOOP_HEIGHT, 1.5),
    (SELF_LOOP_LABEL_PAD_L, 0.5),
    (LIFELINE_FINAL_PAD_B, 2.0),
];

/// Lookup of a named size value
pub trait Sizer {
    /// Resolve `name` to a coordinate-space value
    fn get(&self, name: &str) -> Result<f64, DiagramError>;
}

/// Production sizer: ratio table scaled by font height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSizer {
    font_height: f64,
}

impl RatioSizer {
    pub fn new(font_height: f64) -> Self {
        Self { font_height }
    }

    pub fn font_height(&self) -> f64 {
        self.font_height
    }

    /// All known size names in table order
    pub fn names() -> impl Iterator<Item = &'static str> {
        RATIOS.iter().map(|(name, _)| *name)
    }
}

impl Sizer for RatioSizer {
    fn get(&self, name: &str) -> Result<f64, DiagramError> {
        RATIOS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ratio)| ratio * self.font_height)
            .ok_or_else(|| DiagramError::unknown_size(name))
    }
}

/// Literal-valued sizer for tests
#[derive(Debug, Clone, Default)]
pub struct FixedSizer {
    values: HashMap<String, f64>,
}

impl FixedSizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known name mapped to the same value
    pub fn uniform(value: f64) -> Self {
        let values = RatioSizer::names()
            .map(|name| (name.to_string(), value))
            .collect();
        Self { values }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }
}

impl Sizer for FixedSizer {
    fn get(&self, name: &str) -> Result<f64, DiagramError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| DiagramError::unknown_size(name))
    }
}

/// Every size the layout needs, resolved up front
#[derive(Debug, Clone, PartialEq)]
pub struct Sizes {
    pub frame_pad_t: f64,
    pub frame_pad_b: f64,
    pub frame_title_text_pad_t: f64,
    pub frame_title_text_pad_b: f64,
    pub frame_title_text_pad_l: f64,
    pub frame_title_text_pad_r: f64,
    pub frame_title_rect_pad_b: f64,
    pub char_width: f64,
    pub ideal_lifeline_title_box_width: f64,
    pub title_box_text_pad_t: f64,
    pub title_box_text_pad_b: f64,
    pub title_box_pad_b: f64,
    pub interaction_line_text_pad_b: f64,
    pub interaction_line_pad_b: f64,
    pub arrow_len: f64,
    pub arrow_height: f64,
    pub activity_box_width: f64,
    pub dash_line_dash_len: f64,
    pub dash_line_dash_gap: f64,
    pub min_lifeline_seg_length: f64,
    pub self_loop_width: f64,
    pub self_loop_height: f64,
    pub self_loop_label_pad_l: f64,
    pub lifeline_final_pad_b: f64,
}

impl Sizes {
    pub fn resolve(sizer: &dyn Sizer) -> Result<Self, DiagramError> {
        Ok(Self {
            frame_pad_t: sizer.get(FRAME_PAD_T)?,
            frame_pad_b: sizer.get(FRAME_PAD_B)?,
            frame_title_text_pad_t: sizer.get(FRAME_TITLE_TEXT_PAD_T)?,
            frame_title_text_pad_b: sizer.get(FRAME_TITLE_TEXT_PAD_B)?,
            frame_title_text_pad_l: sizer.get(FRAME_TITLE_TEXT_PAD_L)?,
            frame_title_text_pad_r: sizer.get(FRAME_TITLE_TEXT_PAD_R)?,
            frame_title_rect_pad_b: sizer.get(FRAME_TITLE_RECT_PAD_B)?,
            char_width: sizer.get(CHAR_WIDTH)?,
            ideal_lifeline_title_box_width: sizer.get(IDEAL_LIFELINE_TITLE_BOX_WIDTH)?,
            title_box_text_pad_t: sizer.get(TITLE_BOX_TEXT_PAD_T)?,
            title_box_text_pad_b: sizer.get(TITLE_BOX_TEXT_PAD_B)?,
            title_box_pad_b: sizer.get(TITLE_BOX_PAD_B)?,
            interaction_line_text_pad_b: sizer.get(INTERACTION_LINE_TEXT_PAD_B)?,
            interaction_line_pad_b: sizer.get(INTERACTION_LINE_PAD_B)?,
            arrow_len: sizer.get(ARROW_LEN)?,
            arrow_height: sizer.get(ARROW_HEIGHT)?,
            activity_box_width: sizer.get(ACTIVITY_BOX_WIDTH)?,
            dash_line_dash_len: sizer.get(DASH_LINE_DASH_LEN)?,
            dash_line_dash_gap: sizer.get(DASH_LINE_DASH_GAP)?,
            min_lifeline_seg_length: sizer.get(MIN_LIFELINE_SEG_LENGTH)?,
            self_loop_width: sizer.get(SELF_LOOP_WIDTH)?,
            self_loop_height: sizer.get(SELF_LOOP_HEIGHT)?,
            self_loop_label_pad_l: sizer.get(SELF_LOOP_LABEL_PAD_L)?,
            lifeline_final_pad_b: sizer.get(LIFELINE_FINAL_PAD_B)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_sizer_scales_by_font_height() {
        let sizer = RatioSizer::new(20.0);
        assert_eq!(sizer.get(ARROW_LEN).unwrap(), 20.0);
        assert_eq!(sizer.get(IDEAL_LIFELINE_TITLE_BOX_WIDTH).unwrap(), 200.0);
    }

    #[test]
    fn test_ratio_sizer_unknown_name() {
        let err = RatioSizer::new(20.0).get("NoSuchThing").unwrap_err();
        assert!(matches!(err, DiagramError::UnknownSize { ref name } if name == "NoSuchThing"));
    }

    #[test]
    fn test_fixed_sizer_literal_values() {
        let sizer = FixedSizer::new().with(ARROW_LEN, 7.0);
        assert_eq!(sizer.get(ARROW_LEN).unwrap(), 7.0);
        assert!(sizer.get(ARROW_HEIGHT).is_err());
    }

    #[test]
    fn test_sizes_resolve_from_both_sizers() {
        assert!(Sizes::resolve(&RatioSizer::new(10.0)).is_ok());
        let sizes = Sizes::resolve(&FixedSizer::uniform(3.0)).unwrap();
        assert_eq!(sizes.self_loop_width, 3.0);
    }

    #[test]
    fn test_sizes_resolve_reports_missing_name() {
        let sizer = FixedSizer::uniform(1.0);
        let mut partial = FixedSizer::new();
        for name in RatioSizer::names().filter(|n| *n != SELF_LOOP_HEIGHT) {
            partial = partial.with(name, sizer.get(name).unwrap());
        }
        let err = Sizes::resolve(&partial).unwrap_err();
        assert!(err.to_string().contains(SELF_LOOP_HEIGHT));
    }
}
