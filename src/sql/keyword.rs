//! SQL keyword model used by the context analyzer and the alias resolver.
//!
//! Only the keywords that govern a clause are modelled. Matching is
//! case-insensitive and word-bounded, and multi-word keywords (`ORDER BY`,
//! `GROUP BY`) tolerate any whitespace between their words.

use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Keyword {
    #[display("select")]
    Select,
    #[display("from")]
    From,
    #[display("where")]
    Where,
    #[display("order by")]
    OrderBy,
    #[display("group by")]
    GroupBy,
    #[display("having")]
    Having,
    #[display("insert")]
    Insert,
    #[display("update")]
    Update,
    #[display("set")]
    Set,
    #[display("values")]
    Values,
    #[display("join")]
    Join,
    #[display("on")]
    On,
}

static PATTERNS: LazyLock<HashMap<Keyword, Regex>> = LazyLock::new(|| {
    Keyword::ALL
        .into_iter()
        .map(|kw| {
            let words = kw.to_string().replace(' ', r"\s+");
            let pattern = Regex::new(&format!(r"(?i)\b{words}\b")).expect("keyword pattern");
            (kw, pattern)
        })
        .collect()
});

impl Keyword {
    pub const ALL: [Self; 12] = [
        Keyword::Select,
        Keyword::From,
        Keyword::Where,
        Keyword::OrderBy,
        Keyword::GroupBy,
        Keyword::Having,
        Keyword::Insert,
        Keyword::Update,
        Keyword::Set,
        Keyword::Values,
        Keyword::Join,
        Keyword::On,
    ];

    fn pattern(self) -> &'static Regex {
        &PATTERNS[&self]
    }

    /// Byte offset of the last occurrence in `text`.
    pub fn last_in(self, text: &str) -> Option<usize> {
        self.pattern().find_iter(text).last().map(|m| m.start())
    }

    /// Byte offset just past the last occurrence in `text`.
    pub fn last_end_in(self, text: &str) -> Option<usize> {
        self.pattern().find_iter(text).last().map(|m| m.end())
    }
}

/// Words that can follow a table name but are never its alias.
pub const ALIAS_STOP_WORDS: &[&str] = &[
    "as", "on", "where", "join", "inner", "left", "right", "full", "outer", "cross", "apply",
    "order", "group", "having", "union", "except", "intersect", "select", "from", "set", "values",
    "and", "or", "limit", "offset", "fetch", "with", "option", "for", "into", "pivot", "unpivot",
    "when", "then", "else", "end", "go", "using", "natural", "tablesample", "output",
];

pub fn is_alias_stop_word(word: &str) -> bool {
    ALIAS_STOP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Keyword::Select, "select a from (SELECT b FROM t)", Some(15))]
    #[case(Keyword::From, "SELECT fromage FROM t", Some(15))]
    #[case(Keyword::OrderBy, "SELECT * FROM t ORDER\n  BY x", Some(16))]
    #[case(Keyword::GroupBy, "SELECT * FROM t ORDER BY x", None)]
    #[case(Keyword::Set, "SELECT settings FROM t", None)]
    fn finds_last_word_bounded_occurrence(
        #[case] kw: Keyword,
        #[case] text: &str,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(kw.last_in(text), expected);
    }

    #[test]
    fn last_end_points_past_keyword() {
        assert_eq!(Keyword::Where.last_end_in("SELECT 1 WHERE x"), Some(14));
    }

    #[test]
    fn display_is_lowercase_sql() {
        assert_eq!(Keyword::OrderBy.to_string(), "order by");
        assert_eq!(Keyword::Values.to_string(), "values");
    }

    #[rstest]
    #[case("WHERE", true)]
    #[case("Join", true)]
    #[case("u", false)]
    #[case("orders", false)]
    fn stop_words(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(is_alias_stop_word(word), expected);
    }
}
