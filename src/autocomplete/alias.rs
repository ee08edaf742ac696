use crate::*;
use std::collections::HashSet;

const TABLE_PREFIXES: &[&str] = &["tbl_", "t_"];

/// Short lower-case alias for a table name.
///
/// `tbl_`/`t_` prefixes are dropped, then the alias is built from the initials
/// of `_`/space separated words, or of PascalCase words when there are several,
/// or else from the first character. Falls back to `t`.
pub fn generate_smart_alias(table_name: &str) -> String {
    let name = TABLE_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix_ignore_case(table_name, prefix))
        .unwrap_or(table_name);

    let words: Vec<&str> = name
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.len() > 1 {
        return initials(words.iter().filter_map(|w| w.chars().next()));
    }

    let humps = pascal_initials(name);
    if humps.len() > 1 {
        return initials(humps.into_iter());
    }

    name.chars()
        .find(|c| c.is_alphanumeric())
        .map_or_else(|| "t".to_string(), |c| c.to_lowercase().collect())
}

/// `base`, or `base` with the smallest counter from 2 up that is not taken.
/// Clause keywords such as `on` or `as` count as taken.
pub fn unique_alias<S: AsRef<str>>(base: &str, taken: &[S]) -> String {
    let taken: HashSet<String> = taken.iter().map(|t| t.as_ref().to_lowercase()).collect();
    let free = |candidate: &str| {
        !taken.contains(&candidate.to_lowercase()) && !is_alias_stop_word(candidate)
    };
    if free(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| free(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &name[prefix.len()..])
}

/// First letter of every segment when split before each uppercase letter:
/// `OrderItems` -> `O`, `I`; `OrderID` -> `O`, `I`, `D`.
fn pascal_initials(name: &str) -> Vec<char> {
    name.chars()
        .enumerate()
        .filter(|&(i, c)| c.is_uppercase() || (i == 0 && c.is_alphanumeric()))
        .map(|(_, c)| c)
        .collect()
}

fn initials(chars: impl Iterator<Item = char>) -> String {
    chars.flat_map(char::to_lowercase).collect()
}
