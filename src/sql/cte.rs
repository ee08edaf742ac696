use crate::sql::{
    identifier::{BRACKETED_IDENT, PLAIN_IDENT, strip_brackets},
    token_kind::TokenKind,
    tokenizer::tokenize,
};
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

static WITH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*WITH\b").expect("with pattern"));

/// `name [(columns)] AS (`, anchored at the current position.
static CTE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\s*({BRACKETED_IDENT}|{PLAIN_IDENT})\s*(?:\([^()]*\)\s*)?\bAS\s*\("
    ))
    .expect("cte head pattern")
});

static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*,").expect("cte continuation pattern"));

/// Names defined by a leading `WITH` clause, lower-cased.
///
/// Stops quietly at the first definition it cannot follow, keeping the names
/// found so far.
pub fn extract_ctes(statement: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    let Some(with) = WITH_PREFIX.find(statement) else {
        return names;
    };

    let mut pos = with.end();
    while let Some(head) = CTE_HEAD.captures(&statement[pos..]) {
        let name = strip_brackets(&head[1]);
        names.insert(name.to_lowercase());

        let open = pos + head[0].len() - 1;
        let Some(close) = matching_paren(statement, open) else {
            break;
        };
        pos = close + 1;

        match CONTINUATION.find(&statement[pos..]) {
            Some(comma) => pos += comma.end(),
            None => break,
        }
    }
    names
}

/// Offset of the `)` closing the `(` at `open`.
///
/// Parentheses inside literals, bracketed identifiers and comments are ignored.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for token in tokenize(&text[open..]) {
        if token.kind != TokenKind::Code {
            continue;
        }
        for (i, b) in token.text(&text[open..]).bytes().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(open + token.start + i);
                    }
                }
                _ => {}
            }
        }
    }
    None
}
