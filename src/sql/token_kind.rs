//! Lexical region kinds produced by the scanner.
//!
//! The scanner does not classify words; it only separates text that may hold
//! SQL structure (`Code`) from regions whose content must be ignored by the
//! analyzers (literals, bracketed identifiers, comments) and from statement
//! terminators.

/// Classification for a segment produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain SQL text outside any quote, bracket or comment.
    Code,
    /// `'...'` or `"..."`; the delimiter is kept so callers can tell strings
    /// from quoted identifiers.
    Quoted(char),
    /// `[...]` identifier.
    Bracketed,
    /// `-- ...` up to, not including, the newline.
    LineComment,
    /// `/* ... */`, closed by the first `*/`.
    BlockComment,
    /// A top-level `;`.
    Terminator,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_classification() {
        assert!(TokenKind::LineComment.is_comment());
        assert!(TokenKind::BlockComment.is_comment());
        assert!(!TokenKind::Quoted('\'').is_comment());
        assert!(!TokenKind::Code.is_comment());
        assert!(!TokenKind::Terminator.is_comment());
    }
}
