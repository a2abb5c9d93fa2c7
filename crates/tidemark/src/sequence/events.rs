//! Claim events making up each statement's layout
//!
//! Every statement kind expands into a fixed, ordered list of events. The
//! order is part of the layout: a label is always claimed before the line it
//! labels, so it lands above the line.

use std::fmt;

use super::model::StatementKind;

/// One step of a statement's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Claim room for the interaction label
    InteractionLabel,
    /// Open a box on the source lifeline unless one is already open
    PotentiallyStartFromBox,
    /// Open a box on the destination lifeline unless one is already open
    PotentiallyStartToBox,
    /// Draw the interaction line and its arrowhead
    InteractionLine,
    /// Draw the out, down and back lines of a self-call
    SelfInteractionLines,
    /// Close the lifeline's open box, if any
    EndBox,
}

const INTERACTION: &[Event] = &[
    Event::InteractionLabel,
    Event::PotentiallyStartFromBox,
    Event::PotentiallyStartToBox,
    Event::InteractionLine,
];

const SELF_CALL: &[Event] = &[
    Event::InteractionLabel,
    Event::PotentiallyStartFromBox,
    Event::SelfInteractionLines,
];

const STOP: &[Event] = &[Event::EndBox];

impl Event {
    /// Whether handling this event moves the tidemark down
    pub fn advances_tidemark(&self) -> bool {
        matches!(
            self,
            Event::InteractionLabel | Event::InteractionLine | Event::SelfInteractionLines
        )
    }

    /// The events a statement of `kind` expands into
    pub fn for_statement(kind: StatementKind) -> &'static [Event] {
        match kind {
            StatementKind::Full | StatementKind::Dash => INTERACTION,
            StatementKind::SelfCall => SELF_CALL,
            StatementKind::Stop => STOP,
            StatementKind::Title | StatementKind::TextSize | StatementKind::Life => &[],
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Event::InteractionLabel => "interaction-label",
            Event::PotentiallyStartFromBox => "start-from-box",
            Event::PotentiallyStartToBox => "start-to-box",
            Event::InteractionLine => "interaction-line",
            Event::SelfInteractionLines => "self-lines",
            Event::EndBox => "end-box",
        };
        f.write_str(name)
    }
}
