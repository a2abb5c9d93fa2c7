//! Core building blocks shared by the layout pipeline
//!
//! Errors, logging, configuration types, the interval algebra, the named-size
//! lookup and the primitive sink live here. Nothing in this module knows
//! about lifelines or statements.

pub mod chumsky_utils;
mod error;
pub mod logging;
mod primitives;
pub mod segment;
pub mod sizer;
mod types;

pub use error::*;
pub use primitives::*;
pub use segment::Segment;
pub use sizer::{FixedSizer, RatioSizer, Sizer, Sizes};
pub use types::*;
