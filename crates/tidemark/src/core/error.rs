//! Core error types for diagram layout
//!
//! This module defines the error types used throughout the statement parsing
//! and layout pipeline.

use thiserror::Error;

/// Activity-box protocol violations reported by a lifeline's box tracker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoxError {
    #[error("cannot add new box at y={y} when previous is not terminated")]
    AlreadyOpen { y: f64 },

    #[error("no box to terminate at y={y}")]
    NoBox { y: f64 },

    #[error("cannot terminate at y={y}: box already terminated")]
    AlreadyClosed { y: f64 },
}

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("Unknown lifeline '{name}' referenced by statement {statement} (line {line})")]
    UnknownLifeline {
        name: String,
        statement: usize,
        line: usize,
    },

    #[error("Lifeline #{index} is not one of the {count} lifelines this layout was built for")]
    UnregisteredLifeline { index: usize, count: usize },

    #[error("Lifeline '{name}' is declared more than once (line {line})")]
    DuplicateLifeline { name: String, line: usize },

    #[error("Unknown size name: {name}")]
    UnknownSize { name: String },

    #[error("Activity box error on lifeline '{lifeline}' in statement {statement}: {source}")]
    ActivityBox {
        lifeline: String,
        statement: usize,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::LayoutError { message }
    }

    /// Create an unknown size error
    pub fn unknown_size(name: impl Into<String>) -> Self {
        Self::UnknownSize { name: name.into() }
    }
}
