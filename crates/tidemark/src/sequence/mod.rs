//! Interaction diagram layout
//!
//! Lifelines run top to bottom; interactions are horizontal arrows between
//! them, laid out in statement order.
//!
//! Syntax examples:
//! ```text
//! title Checkout | flow
//! life Shop
//! life Bank | Payment | Service
//! full Shop Bank charge card
//! self Bank check limits
//! dash Bank Shop ok
//! stop Bank
//! ```

mod activity;
mod events;
mod layout;
mod lifeline;
mod model;
mod nogo;
mod parser;
mod spacing;

pub use activity::{ActivityBoxes, BoxSegment};
pub use events::Event;
pub use layout::{Diagram, DiagramSize, SequenceLayout, SequenceLayoutAlgorithm};
pub use lifeline::LifelineExtent;
pub use model::{Lifeline, LifelineId, SequenceModel, Statement, StatementKind};
pub use nogo::{NoGoRegistry, NoGoZone};
pub use parser::SequenceParser;
pub use spacing::{LifelineCoords, Spacing};
