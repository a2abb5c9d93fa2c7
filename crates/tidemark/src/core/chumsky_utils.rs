//! Shared chumsky parser utilities for statement parsing
//!
//! Statements are parsed one source line at a time, so none of these
//! combinators consume newlines.

use chumsky::prelude::*;

/// Parser extra carrying rich, span-aware errors
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parse optional inline whitespace (spaces and tabs only).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse required inline whitespace (at least one space or tab).
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone
{
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a lifeline name: letters, digits, `_` and `-`.
pub fn name<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '-')
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

/// Parse free text to the end of the line, split into `|`-separated lines.
///
/// Each line is trimmed and empty lines are dropped.
pub fn label_lines<'src>() -> impl Parser<'src, &'src str, Vec<String>, Extra<'src>> + Clone {
    any().repeated().to_slice().map(split_label)
}

/// Parse a non-negative decimal number such as `12` or `1.5`.
pub fn number<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> + Clone {
    one_of("0123456789.")
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| {
            s.parse::<f64>()
                .map_err(|e| Rich::custom(span, format!("invalid number '{}': {}", s, e)))
        })
}

/// Whether a trimmed line is a comment (`#` or Mermaid-style `%%`).
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("%%")
}

fn split_label(text: &str) -> Vec<String> {
    text.split('|')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
