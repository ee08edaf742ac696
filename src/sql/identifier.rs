//! Identifier spelling shared by every pattern in the crate.

/// Plain identifier: optional `#`/`##` temp prefix, then a letter or `_`.
pub const PLAIN_IDENT: &str = r"#{0,2}[\p{L}_][\p{L}\p{N}_$@#]*";

/// Bracketed identifier including its brackets.
pub const BRACKETED_IDENT: &str = r"\[[^\]]+\]";

/// Either spelling; brackets are kept in the match.
pub const ANY_IDENT: &str = r"(?:\[[^\]]+\]|#{0,2}[\p{L}_][\p{L}\p{N}_$@#]*)";

/// `[name]` -> `name`; plain names pass through.
pub fn strip_brackets(ident: &str) -> &str {
    ident
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(ident)
}

/// Brackets a name unless it is a plain word.
pub fn quote_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '#')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '@' | '#'));
    if plain {
        name.to_string()
    } else {
        format!("[{name}]")
    }
}
