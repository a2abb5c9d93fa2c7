//! Tidemark - interaction diagram layout
//!
//! Lays out interaction (sequence) diagrams from a small line-oriented DSL,
//! producing lines, labels and filled polygons in diagram coordinates.
//!
//! # Quick Start
//!
//! ```rust
//! use tidemark::layout;
//!
//! let input = "life A\nlife B\nfull A B hello";
//! let diagram = layout(input, 2000.0).unwrap();
//! assert_eq!(diagram.primitives.polygons.len(), 1);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use tidemark::prelude::*;
//!
//! let model = SequenceParser::new()
//!     .parse("life A\nlife B\nself A think\nstop A")
//!     .unwrap();
//! assert_eq!(model.lifeline_count(), 2);
//!
//! // Lay out into any PrimitiveSink
//! let dims = Dimensions::from_width(1000.0, 1.0);
//! let sizer = RatioSizer::new(dims.font_height);
//! let mut sink = Primitives::new();
//! let size = SequenceLayout::new(&model, dims, &sizer)
//!     .unwrap()
//!     .create(&mut sink)
//!     .unwrap();
//! assert!(size.height > 0.0);
//! ```

pub mod core;
pub mod sequence;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DiagramError, Dimensions, FixedSizer, HJust, LayoutConfig, PrimitiveSink, Primitives,
        RatioSizer, Segment, Sizer, TideMark, VJust,
    };
    pub use crate::sequence::{
        Diagram, SequenceLayout, SequenceLayoutAlgorithm, SequenceModel, SequenceParser,
        Statement, StatementKind,
    };
}

/// Lay out DSL input at the given diagram width
///
/// # Example
/// ```rust
/// use tidemark::layout;
///
/// let diagram = layout("life A\nlife B\ndash B A reply", 800.0).unwrap();
/// assert!(diagram.primitives.labels.iter().any(|l| l.text == "reply"));
/// ```
pub fn layout(input: &str, width: f64) -> anyhow::Result<sequence::Diagram> {
    layout_with_config(input, LayoutConfig::new(width))
}

/// Lay out DSL input with explicit options
pub fn layout_with_config(
    input: &str,
    config: LayoutConfig,
) -> anyhow::Result<sequence::Diagram> {
    config.validate()?;
    let model = parse(input)?;
    let diagram = sequence::SequenceLayoutAlgorithm::with_config(config).layout(&model)?;
    Ok(diagram)
}

/// Parse DSL input into a model without laying it out
///
/// # Example
/// ```rust
/// let model = tidemark::parse("life A\nlife B\nfull A B x").unwrap();
/// assert_eq!(model.interaction_count(), 1);
/// ```
pub fn parse(input: &str) -> anyhow::Result<sequence::SequenceModel> {
    let model = sequence::SequenceParser::new().parse(input)?;
    Ok(model)
}
