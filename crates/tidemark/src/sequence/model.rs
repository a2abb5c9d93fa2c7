//! Statement model for interaction diagrams
//!
//! Stores the ordered statement records and the lifelines they declare.

use std::fmt;

use tracing::debug;

use crate::core::DiagramError;

/// Kind tag of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `title` - frame title text
    Title,
    /// `textsize` - font scale multiplier
    TextSize,
    /// `life` - lifeline declaration
    Life,
    /// `full` - synchronous interaction, solid line
    Full,
    /// `dash` - asynchronous interaction, dashed line
    Dash,
    /// `self` - self-call loop
    SelfCall,
    /// `stop` - end the lifeline's activity box
    Stop,
}

impl StatementKind {
    /// Keyword as written in the DSL
    pub fn keyword(&self) -> &'static str {
        match self {
            StatementKind::Title => "title",
            StatementKind::TextSize => "textsize",
            StatementKind::Life => "life",
            StatementKind::Full => "full",
            StatementKind::Dash => "dash",
            StatementKind::SelfCall => "self",
            StatementKind::Stop => "stop",
        }
    }

    /// Number of lifeline references the statement carries
    pub fn lifeline_arity(&self) -> usize {
        match self {
            StatementKind::Title | StatementKind::TextSize => 0,
            StatementKind::Life | StatementKind::SelfCall | StatementKind::Stop => 1,
            StatementKind::Full | StatementKind::Dash => 2,
        }
    }

    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            StatementKind::Full | StatementKind::Dash | StatementKind::SelfCall
        )
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One validated statement record
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    /// Referenced lifeline names, in source order
    pub lifelines: Vec<String>,
    /// Label text, one entry per rendered line
    pub label: Vec<String>,
    /// Numeric payload (`textsize`)
    pub value: Option<f64>,
    /// 1-based source line, 0 when built programmatically
    pub line: usize,
}

impl Statement {
    fn bare(kind: StatementKind) -> Self {
        Self {
            kind,
            lifelines: Vec::new(),
            label: Vec::new(),
            value: None,
            line: 0,
        }
    }

    pub fn title(lines: &[&str]) -> Self {
        Self::bare(StatementKind::Title).with_label(lines)
    }

    pub fn text_size(scale: f64) -> Self {
        Self {
            value: Some(scale),
            ..Self::bare(StatementKind::TextSize)
        }
    }

    pub fn life(name: impl Into<String>, title: &[&str]) -> Self {
        Self {
            lifelines: vec![name.into()],
            ..Self::bare(StatementKind::Life)
        }
        .with_label(title)
    }

    pub fn full(from: impl Into<String>, to: impl Into<String>, label: &[&str]) -> Self {
        Self::interaction(StatementKind::Full, from, to, label)
    }

    pub fn dash(from: impl Into<String>, to: impl Into<String>, label: &[&str]) -> Self {
        Self::interaction(StatementKind::Dash, from, to, label)
    }

    pub fn self_call(name: impl Into<String>, label: &[&str]) -> Self {
        Self {
            lifelines: vec![name.into()],
            ..Self::bare(StatementKind::SelfCall)
        }
        .with_label(label)
    }

    pub fn stop(name: impl Into<String>) -> Self {
        Self {
            lifelines: vec![name.into()],
            ..Self::bare(StatementKind::Stop)
        }
    }

    fn interaction(
        kind: StatementKind,
        from: impl Into<String>,
        to: impl Into<String>,
        label: &[&str],
    ) -> Self {
        Self {
            lifelines: vec![from.into(), to.into()],
            ..Self::bare(kind)
        }
        .with_label(label)
    }

    fn with_label(mut self, lines: &[&str]) -> Self {
        self.label = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Dense index of a lifeline, assigned at declaration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LifelineId(usize);

impl LifelineId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LifelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declared lifeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifeline {
    pub name: String,
    /// Title box text, one entry per line
    pub title: Vec<String>,
}

/// Ordered statements plus the lifelines they declare
#[derive(Debug, Default)]
pub struct SequenceModel {
    statements: Vec<Statement>,
    lifelines: Vec<Lifeline>,
}

impl SequenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model, registering every `life` statement in order
    pub fn from_statements(statements: Vec<Statement>) -> Result<Self, DiagramError> {
        let mut model = Self::new();
        for statement in statements {
            model.push(statement)?;
        }
        Ok(model)
    }

    /// Append a statement, registering the lifeline if it is a declaration
    pub fn push(&mut self, statement: Statement) -> Result<(), DiagramError> {
        let arity = statement.kind.lifeline_arity();
        if statement.lifelines.len() != arity {
            return Err(DiagramError::parse_error(
                format!(
                    "'{}' expects {} lifeline(s), found {}",
                    statement.kind,
                    arity,
                    statement.lifelines.len()
                ),
                statement.line,
                1,
            ));
        }

        if statement.kind == StatementKind::Life {
            let name = &statement.lifelines[0];
            if self.lifeline_id(name).is_some() {
                return Err(DiagramError::DuplicateLifeline {
                    name: name.clone(),
                    line: statement.line,
                });
            }
            let title = if statement.label.is_empty() {
                vec![name.clone()]
            } else {
                statement.label.clone()
            };
            debug!(lifeline = %name, index = self.lifelines.len(), "Registered lifeline");
            self.lifelines.push(Lifeline {
                name: name.clone(),
                title,
            });
        }

        self.statements.push(statement);
        Ok(())
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn lifelines(&self) -> &[Lifeline] {
        &self.lifelines
    }

    pub fn lifeline_count(&self) -> usize {
        self.lifelines.len()
    }

    pub fn lifeline_ids(&self) -> impl Iterator<Item = LifelineId> {
        (0..self.lifelines.len()).map(LifelineId::new)
    }

    pub fn lifeline(&self, id: LifelineId) -> Option<&Lifeline> {
        self.lifelines.get(id.index())
    }

    pub fn lifeline_id(&self, name: &str) -> Option<LifelineId> {
        self.lifelines
            .iter()
            .position(|l| l.name == name)
            .map(LifelineId::new)
    }

    /// Resolve a lifeline name used by statement number `statement`,
    /// written on source line `line`
    pub fn resolve(
        &self,
        name: &str,
        statement: usize,
        line: usize,
    ) -> Result<LifelineId, DiagramError> {
        self.lifeline_id(name)
            .ok_or_else(|| DiagramError::UnknownLifeline {
                name: name.to_string(),
                statement,
                line,
            })
    }

    /// Frame title lines from the last `title` statement
    pub fn title(&self) -> Option<&[String]> {
        self.statements
            .iter()
            .rev()
            .find(|s| s.kind == StatementKind::Title)
            .map(|s| s.label.as_slice())
    }

    /// Font scale from the last `textsize` statement
    pub fn text_size(&self) -> Option<f64> {
        self.statements
            .iter()
            .rev()
            .find(|s| s.kind == StatementKind::TextSize)
            .and_then(|s| s.value)
    }

    pub fn interaction_count(&self) -> usize {
        self.statements
            .iter()
            .filter(|s| s.kind.is_interaction())
            .count()
    }
}
