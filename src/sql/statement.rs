use crate::sql::{token_kind::TokenKind, tokenizer::tokenize};
use serde::Serialize;

/// One statement of a script. Offsets are absolute byte offsets into the
/// script; `text` is the raw slice between them, leading whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlStatement {
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl SqlStatement {
    fn slice(script: &str, start: usize, end: usize) -> Self {
        Self {
            text: script[start..end].to_string(),
            start_offset: start,
            end_offset: end,
        }
    }
}

/// Byte offsets of every top-level `;`.
fn terminators(script: &str) -> impl Iterator<Item = usize> {
    tokenize(script)
        .into_iter()
        .filter(|t| t.kind == TokenKind::Terminator)
        .map(|t| t.start)
}

/// Split a script on top-level semicolons.
///
/// Semicolons inside quotes, bracketed identifiers and comments do not split.
/// Every `;`-terminated segment is returned, even an empty one, so joining the
/// texts with `;` gives back the script; the trailing unterminated segment is
/// returned only when it holds something other than whitespace.
pub fn split_statements(script: &str) -> Vec<SqlStatement> {
    let mut out = Vec::new();
    let mut start = 0;
    for end in terminators(script) {
        out.push(SqlStatement::slice(script, start, end));
        start = end + 1;
    }
    if !script[start..].trim().is_empty() {
        out.push(SqlStatement::slice(script, start, script.len()));
    }
    out
}

/// Text after the last top-level `;`: the statement being typed.
pub fn current_statement(text: &str) -> &str {
    terminators(text).last().map_or(text, |end| &text[end + 1..])
}

/// The statement whose span holds `offset`, blank or not.
///
/// An offset sitting right before a `;` belongs to the statement that `;`
/// terminates. Offsets past the end are clamped.
pub fn statement_at(script: &str, offset: usize) -> SqlStatement {
    let offset = offset.min(script.len());
    let mut start = 0;
    for end in terminators(script) {
        if offset <= end {
            return SqlStatement::slice(script, start, end);
        }
        start = end + 1;
    }
    SqlStatement::slice(script, start, script.len())
}
