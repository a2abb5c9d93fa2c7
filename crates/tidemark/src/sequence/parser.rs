//! Interaction diagram statement parser
//!
//! Parses the line-oriented DSL into [`Statement`] records:
//!
//! ```text
//! title Order flow | v2
//! textsize 1.5
//! life A Web | Server
//! life B Database
//! full A B select rows
//! dash B A rows
//! self A render page
//! stop B
//! ```
//!
//! One statement per line. Blank lines and lines starting with `#` or `%%`
//! are skipped.

use chumsky::prelude::*;
use tracing::{debug, info, span, trace, Level};

use super::model::{SequenceModel, Statement, StatementKind};
use crate::core::chumsky_utils::{
    inline_whitespace, inline_whitespace_required, is_comment, label_lines, name, number, Extra,
};
use crate::core::DiagramError;

/// Parsed statement before it is tagged with its source line
#[derive(Debug, Clone, PartialEq)]
struct ParsedStatement {
    kind: StatementKind,
    lifelines: Vec<String>,
    label: Vec<String>,
    value: Option<f64>,
}

impl ParsedStatement {
    fn new(kind: StatementKind, lifelines: Vec<String>, label: Vec<String>) -> Self {
        Self {
            kind,
            lifelines,
            label,
            value: None,
        }
    }
}

/// Interaction diagram parser
pub struct SequenceParser;

impl SequenceParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the whole input into statement records
    pub fn parse_statements(&self, input: &str) -> Result<Vec<Statement>, DiagramError> {
        let parse_span = span!(Level::INFO, "parse_sequence", input_len = input.len());
        let _enter = parse_span.enter();

        let parser = Self::statement_parser().then_ignore(end());
        let mut statements = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }
            let indent = raw.chars().take_while(|c| c.is_whitespace()).count();

            let parsed = parser.parse(line).into_result().map_err(|errors| {
                // Spans are byte offsets; columns count characters
                let (message, column) = errors
                    .first()
                    .map(|e| {
                        let before = line.get(..e.span().start).unwrap_or(line);
                        (e.to_string(), before.chars().count() + indent + 1)
                    })
                    .unwrap_or_else(|| ("unrecognised statement".to_string(), indent + 1));
                DiagramError::parse_error(message, line_no, column)
            })?;

            trace!(line = line_no, kind = %parsed.kind, "Parsed statement");
            statements.push(Statement {
                kind: parsed.kind,
                lifelines: parsed.lifelines,
                label: parsed.label,
                value: parsed.value,
                line: line_no,
            });
        }

        info!(statement_count = statements.len(), "Parsing completed");
        Ok(statements)
    }

    /// Parse the input and register its lifelines
    pub fn parse(&self, input: &str) -> Result<SequenceModel, DiagramError> {
        let statements = self.parse_statements(input)?;
        let model = SequenceModel::from_statements(statements)?;
        debug!(
            lifeline_count = model.lifeline_count(),
            interaction_count = model.interaction_count(),
            "Built sequence model"
        );
        Ok(model)
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, ParsedStatement, Extra<'src>> {
        let ws = inline_whitespace_required();

        // Optional trailing label after at least one space
        let trailing_label = ws
            .clone()
            .ignore_then(label_lines())
            .or_not()
            .map(Option::unwrap_or_default)
            .then_ignore(inline_whitespace());

        let title = just("title")
            .ignore_then(trailing_label.clone())
            .map(|label| ParsedStatement::new(StatementKind::Title, Vec::new(), label));

        let text_size = just("textsize")
            .ignore_then(ws.clone())
            .ignore_then(number())
            .then_ignore(inline_whitespace())
            .map(|value| ParsedStatement {
                value: Some(value),
                ..ParsedStatement::new(StatementKind::TextSize, Vec::new(), Vec::new())
            });

        let single = |keyword: &'static str, kind: StatementKind| {
            just(keyword)
                .ignore_then(ws.clone())
                .ignore_then(name())
                .then(trailing_label.clone())
                .map(move |(lifeline, label)| ParsedStatement::new(kind, vec![lifeline], label))
        };

        let pair = |keyword: &'static str, kind: StatementKind| {
            just(keyword)
                .ignore_then(ws.clone())
                .ignore_then(name())
                .then_ignore(ws.clone())
                .then(name())
                .then(trailing_label.clone())
                .map(move |((from, to), label)| {
                    ParsedStatement::new(kind, vec![from, to], label)
                })
        };

        let stop = just("stop")
            .ignore_then(ws.clone())
            .ignore_then(name())
            .then_ignore(inline_whitespace())
            .map(|lifeline| ParsedStatement::new(StatementKind::Stop, vec![lifeline], Vec::new()));

        choice((
            text_size,
            title,
            single("life", StatementKind::Life),
            pair("full", StatementKind::Full),
            pair("dash", StatementKind::Dash),
            single("self", StatementKind::SelfCall),
            stop,
        ))
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Statement> {
        SequenceParser::new().parse_statements(input).unwrap()
    }

    #[test]
    fn test_parse_life_with_title_lines() {
        let statements = parse("life A Web | Server");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].kind, StatementKind::Life);
        assert_eq!(statements[0].lifelines, vec!["A".to_string()]);
        assert_eq!(
            statements[0].label,
            vec!["Web".to_string(), "Server".to_string()]
        );
    }

    #[test]
    fn test_parse_life_without_title() {
        let statements = parse("life A");
        assert!(statements[0].label.is_empty());
    }

    #[test]
    fn test_parse_full_and_dash() {
        let statements = parse("full A B place order\ndash B A ack");
        assert_eq!(statements[0].kind, StatementKind::Full);
        assert_eq!(
            statements[0].lifelines,
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(statements[0].label, vec!["place order".to_string()]);
        assert_eq!(statements[1].kind, StatementKind::Dash);
        assert_eq!(statements[1].line, 2);
    }

    #[test]
    fn test_parse_self_and_stop() {
        let statements = parse("self A validate\nstop A");
        assert_eq!(statements[0].kind, StatementKind::SelfCall);
        assert_eq!(statements[1].kind, StatementKind::Stop);
        assert_eq!(statements[1].lifelines, vec!["A".to_string()]);
    }

    #[test]
    fn test_parse_title_and_text_size() {
        let statements = parse("title Order flow | v2\ntextsize 1.5");
        assert_eq!(statements[0].kind, StatementKind::Title);
        assert_eq!(statements[0].label.len(), 2);
        assert_eq!(statements[1].value, Some(1.5));
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let statements = parse("\n# heading\n   %% note\n  life A\n\n");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].line, 4);
    }

    #[test]
    fn test_unknown_keyword_reports_line() {
        let err = SequenceParser::new()
            .parse_statements("life A\njump A B")
            .unwrap_err();
        match err {
            DiagramError::ParseError { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column >= 1);
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_error_column_counts_characters() {
        let column = |input: &str| match SequenceParser::new().parse_statements(input) {
            Err(DiagramError::ParseError { column, .. }) => column,
            other => panic!("Expected ParseError, got {other:?}"),
        };
        assert_eq!(column("stop Äb now"), column("stop Ab now"));
        assert_eq!(column("  stop Ab now"), column("stop Ab now") + 2);
    }

    #[test]
    fn test_full_requires_two_lifelines() {
        assert!(SequenceParser::new().parse_statements("full A").is_err());
    }

    #[test]
    fn test_stop_rejects_trailing_text() {
        assert!(SequenceParser::new()
            .parse_statements("stop A now")
            .is_err());
    }
}
