use super::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[display("error")]
    Error,
    #[display("warning")]
    Warning,
    #[display("info")]
    Info,
}

/// An editor diagnostic. Lines and columns are 1-based; the start is
/// inclusive and the end exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMarker {
    pub severity: Severity,
    pub message: String,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl ValidationMarker {
    pub fn new(severity: Severity, message: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            severity,
            message: message.into(),
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    pub fn error(message: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(Severity::Error, message, start, end)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }
}
